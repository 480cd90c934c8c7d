//! Text renderers.
//!
//! Two strategies share one layout path and one set of command sequences:
//!
//! - [`BatchedTextRenderer`]: queues glyphs in a fixed-capacity arena and
//!   emits them grouped by texture at `flush`, loading each distinct glyph
//!   texture once per frame
//! - [`ImmediateTextRenderer`]: emits every glyph with its full state during
//!   `submit`
//!
//! [`TextRenderer`] picks one from [`TextRendererConfig::strategy`].
//!
//! # Frame Lifecycle
//!
//! ```ignore
//! let mut renderer = TextRenderer::new(TextRendererConfig::default())?;
//! let mut list = DisplayList::new();
//!
//! renderer.print(&mut list, Vec2::new(20.0, 20.0), &hud_style, "LIVES 3");
//! renderer.submit(&mut list, Vec2::new(160.0, 200.0), &dialog_style, Some(visible), dialog);
//! renderer.flush(&mut list); // exactly once, after every submit
//! ```
//!
//! # Commands per Frame (batched)
//!
//! | Block | Commands | Emitted |
//! |-------|----------|---------|
//! | Preamble | 5 | once per non-empty frame |
//! | Sync | 1 | before every bucket after the first |
//! | Font state | 6 | per font change between buckets |
//! | Glyph state | 5 | per distinct `(code, font)` |
//! | Instance | 6 | per glyph, plus a sync when the color changes within a bucket |
//! | Revert | 8 | once per non-empty frame |

mod batched;
mod immediate;
mod shared;
mod strategy;

pub use batched::BatchedTextRenderer;
pub use immediate::ImmediateTextRenderer;
pub use shared::{
    BatchStats, QuadRect, RenderStrategy, TextRender, TextRendererConfig, quantize,
};
pub use strategy::TextRenderer;
