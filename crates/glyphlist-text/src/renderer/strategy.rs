//! Configuration-selected text renderer.

use glyphlist_core::math::Vec2;
use glyphlist_gfx::CommandSink;

use crate::error::TextResult;
use crate::metrics::CharLimit;
use crate::text::TextStyle;

use super::batched::BatchedTextRenderer;
use super::immediate::ImmediateTextRenderer;
use super::shared::{BatchStats, RenderStrategy, TextRender, TextRendererConfig};

/// A text renderer whose strategy is chosen by [`TextRendererConfig::strategy`].
///
/// Layout is identical for both strategies; only the point at which commands
/// reach the sink differs. Each instance owns its own arena, so independent
/// text layers can use separate renderers.
///
/// ```
/// use glyphlist_gfx::DisplayList;
/// use glyphlist_text::{RenderStrategy, TextRender, TextRenderer, TextRendererConfig};
///
/// let mut renderer = TextRenderer::new(TextRendererConfig::default()).unwrap();
/// assert_eq!(renderer.strategy(), RenderStrategy::Batched);
///
/// let mut list = DisplayList::new();
/// renderer.flush(&mut list);
/// assert!(list.is_empty());
/// ```
pub enum TextRenderer {
    Immediate(ImmediateTextRenderer),
    Batched(BatchedTextRenderer),
}

impl TextRenderer {
    /// Build the renderer selected by `config.strategy`.
    pub fn new(config: TextRendererConfig) -> TextResult<Self> {
        let strategy = config.strategy;
        let renderer = match strategy {
            RenderStrategy::Immediate => {
                TextRenderer::Immediate(ImmediateTextRenderer::with_config(config)?)
            }
            RenderStrategy::Batched => {
                TextRenderer::Batched(BatchedTextRenderer::with_config(config)?)
            }
        };
        tracing::debug!("Created {} text renderer", strategy);
        Ok(renderer)
    }

    pub fn strategy(&self) -> RenderStrategy {
        match self {
            TextRenderer::Immediate(_) => RenderStrategy::Immediate,
            TextRenderer::Batched(_) => RenderStrategy::Batched,
        }
    }

    fn inner(&self) -> &dyn TextRender {
        match self {
            TextRenderer::Immediate(r) => r,
            TextRenderer::Batched(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn TextRender {
        match self {
            TextRenderer::Immediate(r) => r,
            TextRenderer::Batched(r) => r,
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        TextRenderer::Batched(BatchedTextRenderer::new())
    }
}

impl TextRender for TextRenderer {
    fn submit(
        &mut self,
        sink: &mut dyn CommandSink,
        position: Vec2,
        style: &TextStyle,
        limit: CharLimit,
        text: &[u8],
    ) {
        self.inner_mut().submit(sink, position, style, limit, text)
    }

    fn flush(&mut self, sink: &mut dyn CommandSink) {
        self.inner_mut().flush(sink)
    }

    fn stats(&self) -> BatchStats {
        self.inner().stats()
    }

    fn config(&self) -> &TextRendererConfig {
        self.inner().config()
    }
}
