use crate::mask::Mask;

/// Lowest level: one payload slot per bit of `2^(3*leaf_bits)`.
pub struct LeafGrid<T> {
    mask: Mask,
    data: Box<[T]>,
}

impl<T: Default> LeafGrid<T> {
    pub(crate) fn new(leaf_bits: u32) -> Self {
        let size = 1usize << (3 * leaf_bits);
        Self {
            mask: Mask::new(size),
            data: (0..size).map(|_| T::default()).collect(),
        }
    }
}

impl<T> LeafGrid<T> {
    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Slot storage; meaningful only where the mask bit is on.
    #[inline]
    pub fn cell(&self, index: usize) -> &T {
        &self.data[index]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.mask.is_on(index).then(|| &self.data[index])
    }

    /// Payload is written before its bit is published.
    pub(crate) fn set(&mut self, index: usize, value: T) -> bool {
        self.data[index] = value;
        self.mask.set_on(index)
    }
}

/// Middle level: one optional leaf per bit of `2^(3*inner_bits)`.
pub struct InnerGrid<T> {
    mask: Mask,
    leaves: Box<[Option<Box<LeafGrid<T>>>]>,
}

impl<T> InnerGrid<T> {
    pub(crate) fn new(inner_bits: u32) -> Self {
        let size = 1usize << (3 * inner_bits);
        Self {
            mask: Mask::new(size),
            leaves: (0..size).map(|_| None).collect(),
        }
    }

    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    #[inline]
    pub fn leaf(&self, index: usize) -> Option<&LeafGrid<T>> {
        self.leaves[index].as_deref()
    }

    pub fn active_cells(&self) -> usize {
        self.mask
            .iter_on()
            .filter_map(|i| self.leaf(i))
            .map(|leaf| leaf.mask().count_on())
            .sum()
    }
}

impl<T: Default> InnerGrid<T> {
    /// Existing leaves are never moved or replaced; a missing one is appended.
    pub(crate) fn leaf_or_insert(&mut self, index: usize, leaf_bits: u32) -> &mut LeafGrid<T> {
        let slot = &mut self.leaves[index];
        if slot.is_none() {
            self.mask.set_on(index);
        }
        slot.get_or_insert_with(|| Box::new(LeafGrid::new(leaf_bits)))
    }
}
