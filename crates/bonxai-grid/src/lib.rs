//! Sparse three-level voxel grid: root hash map -> inner bitmask grid -> leaf bitmask grid.
//!
//! The grid is safe to scan from one thread while another inserts. Root
//! buckets are reference counted and never removed, buckets are locked
//! individually, and leaves are only ever appended.
#![forbid(unsafe_code)]

mod accessor;
mod block;
mod mask;
pub mod traverse;

use std::sync::{Arc, PoisonError, RwLock};

use bonxai_geom::{CoordT, Point3D, coord_to_pos, inner_index_of, leaf_index_of, root_key_of};
use hashbrown::HashMap;
use thiserror::Error;

pub use accessor::Accessor;
pub use block::{InnerGrid, LeafGrid};
pub use mask::{Mask, OnIter};
pub use traverse::{for_each_occupied_cell, occupied_cells};

pub const DEFAULT_INNER_BITS: u32 = 2;
pub const DEFAULT_LEAF_BITS: u32 = 3;
/// Upper bound per level. Every root bucket eagerly allocates `2^(3*inner_bits)`
/// leaf slots and every leaf `2^(3*leaf_bits)` payloads, so 6 bits already
/// costs 2 MiB of pointers per bucket.
pub const MAX_LEVEL_BITS: u32 = 6;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    /// Either width is outside `1..=MAX_LEVEL_BITS`.
    #[error("invalid bit widths: inner={inner} leaf={leaf} (each must be in 1..={})", MAX_LEVEL_BITS)]
    InvalidBits { inner: u32, leaf: u32 },
    #[error("resolution must be positive and finite, got {0}")]
    InvalidResolution(f64),
}

pub(crate) type Bucket<T> = Arc<RwLock<InnerGrid<T>>>;

pub struct VoxelGrid<T> {
    inner_bits: u32,
    leaf_bits: u32,
    resolution: f64,
    inv_resolution: f64,
    root_map: RwLock<HashMap<CoordT, Bucket<T>>>,
}

impl<T> VoxelGrid<T> {
    /// Grid with the default `inner_bits = 2`, `leaf_bits = 3` layout.
    pub fn new(resolution: f64) -> Result<Self, GridError> {
        Self::with_bits(resolution, DEFAULT_INNER_BITS, DEFAULT_LEAF_BITS)
    }

    pub fn with_bits(resolution: f64, inner_bits: u32, leaf_bits: u32) -> Result<Self, GridError> {
        let valid = 1..=MAX_LEVEL_BITS;
        if !valid.contains(&inner_bits) || !valid.contains(&leaf_bits) {
            return Err(GridError::InvalidBits {
                inner: inner_bits,
                leaf: leaf_bits,
            });
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(GridError::InvalidResolution(resolution));
        }
        log::debug!(
            target: "grid",
            "new grid res={} inner_bits={} leaf_bits={}",
            resolution,
            inner_bits,
            leaf_bits
        );
        Ok(Self {
            inner_bits,
            leaf_bits,
            resolution,
            inv_resolution: 1.0 / resolution,
            root_map: RwLock::new(HashMap::new()),
        })
    }

    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    #[inline]
    pub fn inv_resolution(&self) -> f64 {
        self.inv_resolution
    }

    #[inline]
    pub fn inner_bits(&self) -> u32 {
        self.inner_bits
    }

    #[inline]
    pub fn leaf_bits(&self) -> u32 {
        self.leaf_bits
    }

    #[inline]
    pub fn pos_to_coord(&self, x: f64, y: f64, z: f64) -> CoordT {
        bonxai_geom::pos_to_coord(x, y, z, self.inv_resolution)
    }

    #[inline]
    pub fn coord_to_pos(&self, coord: CoordT) -> Point3D {
        coord_to_pos(coord, self.resolution)
    }

    pub fn root_count(&self) -> usize {
        self.root_map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn active_cells_count(&self) -> usize {
        self.buckets_snapshot()
            .iter()
            .map(|(_, bucket)| {
                bucket
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .active_cells()
            })
            .sum()
    }

    pub fn create_accessor(&self) -> Accessor<'_, T> {
        Accessor::new(self)
    }

    pub(crate) fn bucket(&self, root_key: &CoordT) -> Option<Bucket<T>> {
        self.root_map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(root_key)
            .cloned()
    }

    /// Handles to every root bucket, taken under a short read lock.
    pub(crate) fn buckets_snapshot(&self) -> Vec<(CoordT, Bucket<T>)> {
        self.root_map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, b)| (*k, b.clone()))
            .collect()
    }

    pub(crate) fn root_key(&self, coord: CoordT) -> CoordT {
        root_key_of(coord, self.inner_bits, self.leaf_bits)
    }
}

impl<T: Default> VoxelGrid<T> {
    pub(crate) fn bucket_or_insert(&self, root_key: CoordT) -> Bucket<T> {
        if let Some(bucket) = self.bucket(&root_key) {
            return bucket;
        }
        let mut map = self.root_map.write().unwrap_or_else(PoisonError::into_inner);
        map.entry(root_key)
            .or_insert_with(|| {
                log::trace!(target: "grid", "allocated root bucket {:?}", root_key);
                Arc::new(RwLock::new(InnerGrid::new(self.inner_bits)))
            })
            .clone()
    }

    /// Stores `value` at `coord`; returns `true` if the cell was previously empty.
    pub fn set_value(&self, coord: CoordT, value: T) -> bool {
        let bucket = self.bucket_or_insert(self.root_key(coord));
        self.set_in_bucket(&bucket, coord, value)
    }

    pub(crate) fn set_in_bucket(&self, bucket: &Bucket<T>, coord: CoordT, value: T) -> bool {
        let inner_index = inner_index_of(coord, self.inner_bits, self.leaf_bits) as usize;
        let leaf_index = leaf_index_of(coord, self.leaf_bits) as usize;
        let mut inner = bucket.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .leaf_or_insert(inner_index, self.leaf_bits)
            .set(leaf_index, value)
    }
}

impl<T: Clone> VoxelGrid<T> {
    /// Visits every occupied cell; see [`traverse::for_each_occupied_cell`].
    /// `visit` may write to the grid.
    pub fn for_each_cell<F>(&self, visit: F)
    where
        F: FnMut(&T, CoordT),
    {
        for_each_occupied_cell(self, visit)
    }

    pub fn value(&self, coord: CoordT) -> Option<T> {
        let bucket = self.bucket(&self.root_key(coord))?;
        self.value_in_bucket(&bucket, coord)
    }

    pub(crate) fn value_in_bucket(&self, bucket: &Bucket<T>, coord: CoordT) -> Option<T> {
        let inner_index = inner_index_of(coord, self.inner_bits, self.leaf_bits) as usize;
        let leaf_index = leaf_index_of(coord, self.leaf_bits) as usize;
        let inner = bucket.read().unwrap_or_else(PoisonError::into_inner);
        inner.leaf(inner_index)?.get(leaf_index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(
            VoxelGrid::<bool>::with_bits(1.0, 0, 3).err(),
            Some(GridError::InvalidBits { inner: 0, leaf: 3 })
        );
        assert_eq!(
            VoxelGrid::<bool>::with_bits(1.0, 2, MAX_LEVEL_BITS + 1).err(),
            Some(GridError::InvalidBits {
                inner: 2,
                leaf: MAX_LEVEL_BITS + 1
            })
        );
        assert_eq!(
            VoxelGrid::<bool>::with_bits(1.0, 7, 3).err(),
            Some(GridError::InvalidBits { inner: 7, leaf: 3 })
        );
        assert!(VoxelGrid::<bool>::with_bits(1.0, MAX_LEVEL_BITS, 1).is_ok());
        assert!(matches!(
            VoxelGrid::<bool>::new(0.0),
            Err(GridError::InvalidResolution(_))
        ));
        assert!(matches!(
            VoxelGrid::<bool>::new(f64::NAN),
            Err(GridError::InvalidResolution(_))
        ));
    }

    #[test]
    fn set_and_get_single_cell() {
        let grid = VoxelGrid::<u16>::with_bits(1.0, 2, 2).unwrap();
        let c = CoordT::new(3, 3, 3);
        assert_eq!(grid.value(c), None);
        assert!(grid.set_value(c, 7));
        assert!(!grid.set_value(c, 9));
        assert_eq!(grid.value(c), Some(9));
        assert_eq!(grid.active_cells_count(), 1);
        assert_eq!(grid.root_count(), 1);
    }

    #[test]
    fn cells_in_distinct_roots_are_separate_buckets() {
        let grid = VoxelGrid::<bool>::with_bits(0.5, 2, 2).unwrap();
        grid.set_value(CoordT::new(0, 0, 0), true);
        grid.set_value(CoordT::new(16, 0, 0), true);
        grid.set_value(CoordT::new(-1, 0, 0), true);
        assert_eq!(grid.root_count(), 3);
        assert_eq!(grid.active_cells_count(), 3);
        assert_eq!(grid.value(CoordT::new(1, 0, 0)), None);
    }
}
