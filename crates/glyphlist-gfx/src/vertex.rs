//! The shared quad template and fixed-point packing helpers.
//!
//! Glyph quads are never uploaded as full vertex records. One four-vertex
//! template is loaded into the vertex buffer and each draw patches its
//! screen position and texture coordinates in place.

use bytemuck::{Pod, Zeroable};

/// Hardware vertex layout (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [i16; 3],
    pub flag: u16,
    pub tex_coords: [i16; 2],
    pub color: [u8; 4],
}

impl Vertex {
    const fn new(x: i16, y: i16, s: i16, t: i16) -> Self {
        Self {
            position: [x, y, 0],
            flag: 0,
            tex_coords: [s, t],
            color: [0xff; 4],
        }
    }
}

static_assertions::assert_eq_size!(Vertex, [u8; 16]);

/// Unit quad, wound v0 → v1 → v2 → v3 counter-clockwise from the lower left.
pub static QUAD_TEMPLATE: [Vertex; 4] = [
    Vertex::new(0, 0, 0, 1),
    Vertex::new(1, 0, 0, 0),
    Vertex::new(1, 1, 1, 0),
    Vertex::new(0, 1, 1, 1),
];

/// Pack two fixed-point screen coordinates into one patch word (`x` high, `y` low).
///
/// Each half is the two's-complement low 16 bits of its coordinate, so
/// negative values do not borrow from the other half.
pub fn pack_screen_xy(x: i32, y: i32) -> u32 {
    ((x as u16 as u32) << 16) | (y as u16 as u32)
}

/// Pack texture coordinates into one patch word (`s` high, `t` low).
pub fn pack_st(s: i32, t: i32) -> u32 {
    pack_screen_xy(s, t)
}
