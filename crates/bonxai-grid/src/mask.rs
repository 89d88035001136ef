/// Fixed-size occupancy bit set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    words: Box<[u64]>,
    len: usize,
}

impl Mask {
    pub fn new(len: usize) -> Self {
        let words = vec![0u64; len.div_ceil(64)].into_boxed_slice();
        Self { words, len }
    }

    #[inline]
    pub fn is_on(&self, index: usize) -> bool {
        index < self.len && (self.words[index >> 6] >> (index & 63)) & 1 == 1
    }

    /// Sets the bit; returns `true` if it was previously off.
    #[inline]
    pub fn set_on(&mut self, index: usize) -> bool {
        debug_assert!(index < self.len);
        let word = &mut self.words[index >> 6];
        let bit = 1u64 << (index & 63);
        let was_off = *word & bit == 0;
        *word |= bit;
        was_off
    }

    pub fn count_on(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Set bits in ascending index order.
    pub fn iter_on(&self) -> OnIter<'_> {
        OnIter {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

pub struct OnIter<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for OnIter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_idx += 1;
            if self.word_idx >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word_idx];
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some((self.word_idx << 6) | bit)
    }
}
