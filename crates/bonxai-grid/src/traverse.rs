//! Full-grid scan in root-map order, then ascending inner bits, then
//! ascending leaf bits.
//!
//! Each bucket's cells are copied out under its read lock and visited after
//! the lock is released, so `visit` may itself write to the grid. Buckets
//! created after the scan took its snapshot are not visited; cells added to a
//! bucket that has not been reached yet are.

use std::sync::PoisonError;

use bonxai_geom::{CoordT, inner_base, leaf_coord};

use crate::{Bucket, VoxelGrid};

/// Calls `visit(payload, coord)` once for every occupied cell.
pub fn for_each_occupied_cell<T, F>(grid: &VoxelGrid<T>, mut visit: F)
where
    T: Clone,
    F: FnMut(&T, CoordT),
{
    let mut cells = Vec::new();
    for (root_key, bucket) in grid.buckets_snapshot() {
        collect_bucket(grid, root_key, &bucket, &mut cells);
        for (coord, value) in cells.drain(..) {
            visit(&value, coord);
        }
    }
}

fn collect_bucket<T: Clone>(
    grid: &VoxelGrid<T>,
    root_key: CoordT,
    bucket: &Bucket<T>,
    out: &mut Vec<(CoordT, T)>,
) {
    let inner_bits = grid.inner_bits();
    let leaf_bits = grid.leaf_bits();
    let inner = bucket.read().unwrap_or_else(PoisonError::into_inner);
    for inner_index in inner.mask().iter_on() {
        let Some(leaf) = inner.leaf(inner_index) else {
            continue;
        };
        let base = inner_base(root_key, inner_index as u32, inner_bits, leaf_bits);
        for leaf_index in leaf.mask().iter_on() {
            out.push((
                leaf_coord(base, leaf_index as u32, leaf_bits),
                leaf.cell(leaf_index).clone(),
            ));
        }
    }
}

/// Collects `(coord, payload)` for every occupied cell in scan order.
pub fn occupied_cells<T: Clone>(grid: &VoxelGrid<T>) -> Vec<(CoordT, T)> {
    let mut out = Vec::new();
    for_each_occupied_cell(grid, |v, c| out.push((c, v.clone())));
    out
}
