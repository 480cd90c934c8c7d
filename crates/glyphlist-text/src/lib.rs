//! Glyphlist Text - Bitmap-font text rendering for display-list GPUs
//!
//! This crate turns byte strings into draw commands for a fixed-function
//! GPU that consumes a display list:
//! - Fonts with one 4-bit intensity texture per character code
//! - Text styles with size, line height, alignment and color
//! - Immediate or texture-batched command emission
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use glyphlist_gfx::{DisplayList, TextureRef};
//! use glyphlist_text::{Color, Font, TextRender, TextRenderer, TextStyle, Vec2};
//!
//! let font = Font::builder(8, 12)
//!     .uniform_advance(8)
//!     .glyph(b'H', TextureRef::new(vec![0u8; 48]))
//!     .glyph(b'i', TextureRef::new(vec![0u8; 48]))
//!     .build();
//!
//! let style = TextStyle::new(Arc::new(font)).size(16.0).color(Color::WHITE);
//! let mut renderer = TextRenderer::default();
//! let mut list = DisplayList::new();
//!
//! renderer.print(&mut list, Vec2::new(20.0, 20.0), &style, "Hi Hi");
//! renderer.flush(&mut list);
//!
//! // One texture load per distinct glyph.
//! assert_eq!(renderer.stats().texture_loads, 2);
//! ```
//!
//! ## Features
//!
//! - **Batching**: Repeated glyphs share one texture load per frame
//! - **Fixed Memory**: The glyph arena never grows after construction
//! - **Kerning**: Per-character advances scaled to the drawn size
//! - **Asset Decoding**: Packed font records via [`FontAsset`]

pub mod arena;
pub mod asset;
pub mod error;
pub mod font;
pub mod layout;
pub mod metrics;
pub mod renderer;
pub mod text;

pub use glyphlist_core::math::Vec2;
pub use glyphlist_gfx::Color;

pub use arena::{Bucket, GlyphArena, GlyphIndex, GlyphInstance};
pub use asset::{EncodeOffsets, FontAsset, SegmentResolver, SegmentTable};
pub use error::{TextError, TextResult};
pub use font::{Font, FontBuilder, GLYPH_COUNT, GlyphCell};
pub use layout::{GlyphPlacement, LayoutOptions, LayoutSummary, YAxis, layout_glyphs};
pub use metrics::{CharLimit, line_run, measure_lines, measure_width};
pub use renderer::{
    BatchStats, BatchedTextRenderer, ImmediateTextRenderer, QuadRect, RenderStrategy, TextRender,
    TextRenderer, TextRendererConfig, quantize,
};
pub use text::{TextAlign, TextStyle};
