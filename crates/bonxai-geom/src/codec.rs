//! Packing of cell coordinates into the three-level index.
//!
//! A coordinate axis splits into `[root bits | inner_bits | leaf_bits]`. The
//! root key keeps the high bits in place with the low `inner_bits + leaf_bits`
//! cleared. Inner and leaf indices interleave the three axes as
//! `x | y << bits | z << 2*bits`.

use crate::{CoordT, Point3D, Vec3};

#[inline]
const fn low_mask(bits: u32) -> i32 {
    ((1u32 << bits) - 1) as i32
}

/// Root key, inner index and leaf index recombined into one coordinate.
#[inline]
pub fn decode_coordinate(
    root_key: CoordT,
    inner_index: u32,
    leaf_index: u32,
    inner_bits: u32,
    leaf_bits: u32,
) -> CoordT {
    let base = inner_base(root_key, inner_index, inner_bits, leaf_bits);
    leaf_coord(base, leaf_index, leaf_bits)
}

/// Coordinate of the first cell of the leaf at `inner_index` within `root_key`.
#[inline]
pub fn inner_base(root_key: CoordT, inner_index: u32, inner_bits: u32, leaf_bits: u32) -> CoordT {
    let m = low_mask(inner_bits);
    let i = inner_index as i32;
    CoordT {
        x: root_key.x | ((i & m) << leaf_bits),
        y: root_key.y | (((i >> inner_bits) & m) << leaf_bits),
        z: root_key.z | (((i >> (2 * inner_bits)) & m) << leaf_bits),
    }
}

#[inline]
pub fn leaf_coord(base: CoordT, leaf_index: u32, leaf_bits: u32) -> CoordT {
    let m = low_mask(leaf_bits);
    let l = leaf_index as i32;
    CoordT {
        x: base.x | (l & m),
        y: base.y | ((l >> leaf_bits) & m),
        z: base.z | ((l >> (2 * leaf_bits)) & m),
    }
}

#[inline]
pub fn root_key_of(coord: CoordT, inner_bits: u32, leaf_bits: u32) -> CoordT {
    let m = !low_mask(inner_bits + leaf_bits);
    CoordT {
        x: coord.x & m,
        y: coord.y & m,
        z: coord.z & m,
    }
}

#[inline]
pub fn inner_index_of(coord: CoordT, inner_bits: u32, leaf_bits: u32) -> u32 {
    let m = low_mask(inner_bits);
    let x = (coord.x >> leaf_bits) & m;
    let y = (coord.y >> leaf_bits) & m;
    let z = (coord.z >> leaf_bits) & m;
    (x | (y << inner_bits) | (z << (2 * inner_bits))) as u32
}

#[inline]
pub fn leaf_index_of(coord: CoordT, leaf_bits: u32) -> u32 {
    let m = low_mask(leaf_bits);
    let x = coord.x & m;
    let y = coord.y & m;
    let z = coord.z & m;
    (x | (y << leaf_bits) | (z << (2 * leaf_bits))) as u32
}

#[inline]
pub fn coord_to_pos(coord: CoordT, resolution: f64) -> Point3D {
    Point3D {
        x: coord.x as f64 * resolution,
        y: coord.y as f64 * resolution,
        z: coord.z as f64 * resolution,
    }
}

/// Cell containing a world position. Positions on a cell boundary belong to
/// the cell above them.
#[inline]
pub fn pos_to_coord(x: f64, y: f64, z: f64, inv_resolution: f64) -> CoordT {
    CoordT {
        x: (x * inv_resolution).floor() as i32,
        y: (y * inv_resolution).floor() as i32,
        z: (z * inv_resolution).floor() as i32,
    }
}

/// Grid space (z-up) to display space (y-up): `(x, y, z) -> (x, z, -y)`.
#[inline]
pub fn to_vis_frame(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, z, -y)
}
