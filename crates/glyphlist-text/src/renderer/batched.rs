//! Deferred, texture-grouped text renderer.
//!
//! `submit` only lays text out and queues each drawable glyph in a
//! [`GlyphArena`]. `flush` then walks the arena's buckets in first-seen
//! order and emits:
//!
//! 1. the draw preamble, once
//! 2. a pipe sync before every bucket after the first
//! 3. font state (filter, quad template, texture extents) whenever the
//!    bucket's font differs from the previous bucket's
//! 4. the glyph's texture load, once per bucket
//! 5. per instance: env color, four corner patches, two triangles, with a
//!    pipe sync first when the color differs from the previous quad's
//!
//! so each distinct glyph texture is loaded once per frame however often it
//! appears. The arena is cleared afterwards.

use std::sync::Arc;

use glyphlist_core::math::Vec2;
use glyphlist_core::profiling::{profile_function, profile_scope};
use glyphlist_gfx::{Color, CommandSink};

use crate::arena::GlyphArena;
use crate::error::TextResult;
use crate::font::Font;
use crate::layout::layout_glyphs;
use crate::metrics::CharLimit;
use crate::text::TextStyle;

use super::shared::{BatchStats, CommandEmitter, TextRender, TextRendererConfig};

/// Text renderer that batches glyphs by texture until `flush`.
pub struct BatchedTextRenderer {
    config: TextRendererConfig,
    arena: GlyphArena,
    last: BatchStats,
}

impl BatchedTextRenderer {
    /// Create a renderer with the default configuration.
    pub fn new() -> Self {
        let config = TextRendererConfig::default();
        Self {
            arena: GlyphArena::new(config.capacity),
            config,
            last: BatchStats::default(),
        }
    }

    /// Create a renderer with a custom configuration.
    pub fn with_config(config: TextRendererConfig) -> TextResult<Self> {
        config.validate()?;
        Ok(Self {
            arena: GlyphArena::new(config.capacity),
            config,
            last: BatchStats::default(),
        })
    }

    /// Lay out text and queue its glyphs. See [`TextRender::submit`].
    pub fn submit(
        &mut self,
        _sink: &mut dyn CommandSink,
        position: Vec2,
        style: &TextStyle,
        limit: CharLimit,
        text: &[u8],
    ) {
        profile_function!();
        let font = style.font();
        let color = style.get_color();
        let arena = &mut self.arena;

        let result = layout_glyphs(
            position,
            style,
            self.config.layout_options(),
            limit,
            text,
            |placement, _texture| {
                arena.insert(font, placement, color);
            },
        );

        if let Err(err) = result {
            tracing::warn!("Text submit rejected: {}", err);
        }
    }

    /// Emit every queued glyph grouped by texture, then clear the arena.
    pub fn flush(&mut self, sink: &mut dyn CommandSink) {
        profile_function!();
        let arena = &self.arena;
        let mut stats = BatchStats {
            glyphs: arena.len() as u32,
            buckets: arena.bucket_count() as u32,
            dropped: arena.dropped() as u32,
            ..Default::default()
        };

        if arena.dropped() > 0 {
            tracing::warn!(
                "Glyph arena full: dropped {} glyphs (capacity {})",
                arena.dropped(),
                arena.capacity()
            );
        }

        if !arena.is_empty() {
            let mut emitter = CommandEmitter::new(sink, &self.config);
            emitter.draw_preamble();

            let mut current_font: Option<&Arc<Font>> = None;
            let mut current_color: Option<Color> = None;
            // Set once a primitive may still be rasterizing.
            let mut drawn = false;
            for bucket in arena.buckets() {
                profile_scope!("glyph_bucket");
                let font = bucket.font();
                let Some(texture) = font.texture(bucket.code()) else {
                    continue;
                };

                if drawn {
                    emitter.sync();
                    drawn = false;
                }

                if !current_font.is_some_and(|f| Arc::ptr_eq(f, font)) {
                    emitter.font_state(font);
                    stats.font_switches += 1;
                    current_font = Some(font);
                }

                emitter.glyph_state(&font.cell(), texture);
                stats.texture_loads += 1;

                for instance in bucket.chain() {
                    if drawn && current_color != Some(instance.color) {
                        emitter.sync();
                    }
                    emitter.env_color(instance.color);
                    emitter.quad(instance.x, instance.y, instance.width, instance.height);
                    current_color = Some(instance.color);
                    drawn = true;
                }
            }

            emitter.revert();
            stats.commands = emitter.emitted();
        }

        tracing::trace!("Batched text frame: {:?}", stats);
        self.last = stats;
        self.arena.clear();
    }

    pub fn stats(&self) -> BatchStats {
        self.last
    }

    pub fn config(&self) -> &TextRendererConfig {
        &self.config
    }

    /// The arena holding this frame's queued glyphs.
    pub fn arena(&self) -> &GlyphArena {
        &self.arena
    }
}

impl Default for BatchedTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRender for BatchedTextRenderer {
    fn submit(
        &mut self,
        sink: &mut dyn CommandSink,
        position: Vec2,
        style: &TextStyle,
        limit: CharLimit,
        text: &[u8],
    ) {
        BatchedTextRenderer::submit(self, sink, position, style, limit, text)
    }

    fn flush(&mut self, sink: &mut dyn CommandSink) {
        BatchedTextRenderer::flush(self, sink)
    }

    fn stats(&self) -> BatchStats {
        BatchedTextRenderer::stats(self)
    }

    fn config(&self) -> &TextRendererConfig {
        BatchedTextRenderer::config(self)
    }
}
