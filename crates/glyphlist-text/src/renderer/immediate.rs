//! Immediate-mode text renderer.
//!
//! Every drawable glyph gets its complete state (combiner, filter, template,
//! texture load) followed by its quad, inside `submit`. Nothing is queued, so
//! there is no capacity limit, but texture loads scale with glyph count
//! rather than with distinct glyphs. Use [`BatchedTextRenderer`] unless
//! commands must be interleaved with other drawing in submission order.
//!
//! [`BatchedTextRenderer`]: super::BatchedTextRenderer

use glyphlist_core::math::Vec2;
use glyphlist_core::profiling::profile_function;
use glyphlist_gfx::CommandSink;

use crate::error::TextResult;
use crate::layout::layout_glyphs;
use crate::metrics::CharLimit;
use crate::text::TextStyle;

use super::shared::{BatchStats, CommandEmitter, TextRender, TextRendererConfig};

/// Text renderer that emits commands during `submit`.
pub struct ImmediateTextRenderer {
    config: TextRendererConfig,
    pending: BatchStats,
    last: BatchStats,
}

impl ImmediateTextRenderer {
    /// Create a renderer with the default configuration.
    pub fn new() -> Self {
        Self {
            config: TextRendererConfig::default(),
            pending: BatchStats::default(),
            last: BatchStats::default(),
        }
    }

    /// Create a renderer with a custom configuration.
    pub fn with_config(config: TextRendererConfig) -> TextResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Lay out and emit text. See [`TextRender::submit`].
    pub fn submit(
        &mut self,
        sink: &mut dyn CommandSink,
        position: Vec2,
        style: &TextStyle,
        limit: CharLimit,
        text: &[u8],
    ) {
        profile_function!();
        let font = style.font();
        let color = style.get_color();
        let cell = font.cell();
        let mut emitter = CommandEmitter::new(sink, &self.config);
        let mut drawn = 0u32;

        let result = layout_glyphs(
            position,
            style,
            self.config.layout_options(),
            limit,
            text,
            |placement, texture| {
                if drawn == 0 {
                    emitter.env_color(color);
                }
                emitter.draw_preamble();
                emitter.font_state(font);
                emitter.glyph_state(&cell, texture);
                emitter.quad(placement.x, placement.y, placement.width, placement.height);
                drawn += 1;
            },
        );

        if let Err(err) = result {
            tracing::warn!("Text submit rejected: {}", err);
            return;
        }

        if drawn > 0 {
            emitter.revert();
        }

        self.pending.glyphs += drawn;
        self.pending.buckets += drawn;
        self.pending.font_switches += drawn;
        self.pending.texture_loads += drawn;
        self.pending.commands += emitter.emitted();
    }

    /// Close the frame's statistics. Immediate mode has nothing left to emit.
    pub fn flush(&mut self, _sink: &mut dyn CommandSink) {
        self.last = std::mem::take(&mut self.pending);
        tracing::trace!("Immediate text frame: {:?}", self.last);
    }

    pub fn stats(&self) -> BatchStats {
        self.last
    }

    pub fn config(&self) -> &TextRendererConfig {
        &self.config
    }
}

impl Default for ImmediateTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRender for ImmediateTextRenderer {
    fn submit(
        &mut self,
        sink: &mut dyn CommandSink,
        position: Vec2,
        style: &TextStyle,
        limit: CharLimit,
        text: &[u8],
    ) {
        ImmediateTextRenderer::submit(self, sink, position, style, limit, text)
    }

    fn flush(&mut self, sink: &mut dyn CommandSink) {
        ImmediateTextRenderer::flush(self, sink)
    }

    fn stats(&self) -> BatchStats {
        ImmediateTextRenderer::stats(self)
    }

    fn config(&self) -> &TextRendererConfig {
        ImmediateTextRenderer::config(self)
    }
}
