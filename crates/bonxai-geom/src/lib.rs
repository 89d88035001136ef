//! Grid-space and display-space value types (no Raylib dependency).
#![forbid(unsafe_code)]

pub mod codec;

pub use codec::{
    coord_to_pos, decode_coordinate, inner_base, inner_index_of, leaf_coord, leaf_index_of,
    pos_to_coord, root_key_of, to_vis_frame,
};

/// Integer cell coordinate in grid space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct CoordT {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CoordT {
    pub const ORIGIN: CoordT = CoordT { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl From<(i32, i32, i32)> for CoordT {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self { x, y, z }
    }
}

/// World-space position of a cell (`CoordT` scaled by the grid resolution).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Display-space vector (f32, y-up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const RED: Rgba = Rgba::new(230, 41, 55, 255);
    pub const GREEN: Rgba = Rgba::new(0, 228, 48, 255);
    pub const BLUE: Rgba = Rgba::new(0, 121, 241, 255);
    pub const DARKGRAY: Rgba = Rgba::new(80, 80, 80, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    #[inline]
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for (u8, u8, u8, u8) {
    #[inline]
    fn from(c: Rgba) -> Self {
        (c.r, c.g, c.b, c.a)
    }
}
