use bonxai_geom::CoordT;

use crate::{Bucket, VoxelGrid};

/// Cursor that remembers the last root bucket it touched, so runs of nearby
/// writes skip the root map lookup.
pub struct Accessor<'g, T> {
    grid: &'g VoxelGrid<T>,
    cached: Option<(CoordT, Bucket<T>)>,
}

impl<'g, T> Accessor<'g, T> {
    pub(crate) fn new(grid: &'g VoxelGrid<T>) -> Self {
        Self { grid, cached: None }
    }

    fn cached_bucket(&self, root_key: CoordT) -> Option<&Bucket<T>> {
        match &self.cached {
            Some((key, bucket)) if *key == root_key => Some(bucket),
            _ => None,
        }
    }
}

impl<T: Default> Accessor<'_, T> {
    /// Stores `value` at `coord`; returns `true` if the cell was previously empty.
    pub fn set_value(&mut self, coord: CoordT, value: T) -> bool {
        let root_key = self.grid.root_key(coord);
        if self.cached_bucket(root_key).is_none() {
            self.cached = Some((root_key, self.grid.bucket_or_insert(root_key)));
        }
        match self.cached_bucket(root_key) {
            Some(bucket) => self.grid.set_in_bucket(bucket, coord, value),
            None => self.grid.set_value(coord, value),
        }
    }
}

impl<T: Clone> Accessor<'_, T> {
    pub fn value(&mut self, coord: CoordT) -> Option<T> {
        let root_key = self.grid.root_key(coord);
        if self.cached_bucket(root_key).is_none() {
            let bucket = self.grid.bucket(&root_key)?;
            self.cached = Some((root_key, bucket));
        }
        let bucket = self.cached_bucket(root_key)?;
        self.grid.value_in_bucket(bucket, coord)
    }
}
