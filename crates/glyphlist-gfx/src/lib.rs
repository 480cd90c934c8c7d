//! Glyphlist Gfx - command vocabulary of a fixed-function display-list GPU.
//!
//! The renderer never talks to hardware. It appends [`Command`]s to a
//! [`CommandSink`] owned by the host, which turns them into its native
//! command words and submits them in order. This crate holds:
//!
//! - [`Command`] and its parameter types (tiles, filters, combiner presets)
//! - [`CommandSink`] and the Vec-backed [`DisplayList`]
//! - [`Color`], an RGBA8 color as consumed by the env-color register
//! - [`TextureRef`], a shared texel buffer compared by identity
//! - [`Vertex`] and the shared [`QUAD_TEMPLATE`] patched per draw

pub mod color;
pub mod command;
pub mod list;
pub mod texture;
pub mod vertex;

pub use color::Color;
pub use command::{CombineMode, Command, GeometryMode, RenderMode, VertexField};
pub use list::{CommandSink, DisplayList};
pub use texture::{ImageFormat, TexelSize, TextureFilter, TextureRef, TileAddress, TileDescriptor};
pub use vertex::{QUAD_TEMPLATE, Vertex, pack_screen_xy, pack_st};
