//! Shared types for text renderers.
//!
//! - [`TextRendererConfig`]: arena capacity, precision and output conventions
//! - [`TextRender`]: the submit/flush interface every strategy implements
//! - [`BatchStats`]: per-frame counters
//! - [`CommandEmitter`]: the command sequences both strategies emit

use glyphlist_core::math::Vec2;
use glyphlist_gfx::{
    Color, CombineMode, Command, CommandSink, GeometryMode, ImageFormat, QUAD_TEMPLATE, RenderMode,
    TexelSize, TextureFilter, TextureRef, TileAddress, TileDescriptor, VertexField, pack_screen_xy,
    pack_st,
};

use crate::arena::MAX_CAPACITY;
use crate::error::{TextError, TextResult};
use crate::font::{Font, GlyphCell, TILE_LINE};
use crate::layout::{LayoutOptions, YAxis};
use crate::metrics::CharLimit;
use crate::text::TextStyle;

/// Tile slot reserved for texture loads.
const LOAD_TILE: u8 = 7;
/// Tile slot sampled when drawing.
const RENDER_TILE: u8 = 0;

/// How glyphs reach the command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStrategy {
    /// Emit full state and a quad for every glyph during `submit`.
    Immediate,
    /// Queue glyphs in an arena and emit them grouped by texture on `flush`.
    #[default]
    Batched,
}

impl std::fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderStrategy::Immediate => write!(f, "Immediate"),
            RenderStrategy::Batched => write!(f, "Batched"),
        }
    }
}

/// Configuration for text renderers.
///
/// # Presets
///
/// | Config | Arena capacity |
/// |--------|----------------|
/// | small() | 64 glyphs |
/// | medium() | 200 glyphs (default) |
/// | large() | 1024 glyphs |
///
/// # Example
///
/// ```
/// use glyphlist_text::{RenderStrategy, TextRendererConfig, YAxis};
///
/// let config = TextRendererConfig::small()
///     .with_precision(2)
///     .with_y_axis(YAxis::Up)
///     .with_screen_height(480.0)
///     .with_strategy(RenderStrategy::Immediate);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TextRendererConfig {
    /// Maximum glyphs queued per frame. Further glyphs are dropped.
    pub capacity: usize,
    /// Fixed-point subdivisions per output unit for screen coordinates.
    pub precision: u32,
    /// Output height, used to flip y when the layout axis points up.
    pub screen_height: f32,
    /// Narrow glyphs by 0.75 for horizontally stretched 16:9 output.
    pub widescreen: bool,
    pub y_axis: YAxis,
    pub strategy: RenderStrategy,
}

impl Default for TextRendererConfig {
    fn default() -> Self {
        Self {
            capacity: 200,
            precision: 4,
            screen_height: 240.0,
            widescreen: false,
            y_axis: YAxis::Down,
            strategy: RenderStrategy::Batched,
        }
    }
}

impl TextRendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small arena for HUD counters and short labels.
    pub fn small() -> Self {
        Self {
            capacity: 64,
            ..Default::default()
        }
    }

    pub fn medium() -> Self {
        Self::default()
    }

    /// Large arena for dialogue boxes and debug overlays.
    pub fn large() -> Self {
        Self {
            capacity: 1024,
            ..Default::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_screen_height(mut self, screen_height: f32) -> Self {
        self.screen_height = screen_height;
        self
    }

    pub fn with_widescreen(mut self, widescreen: bool) -> Self {
        self.widescreen = widescreen;
        self
    }

    pub fn with_y_axis(mut self, y_axis: YAxis) -> Self {
        self.y_axis = y_axis;
        self
    }

    pub fn with_strategy(mut self, strategy: RenderStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> TextResult<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(TextError::InvalidConfig(format!(
                "capacity must be in 1..={}, got {}",
                MAX_CAPACITY, self.capacity
            )));
        }
        if self.precision == 0 {
            return Err(TextError::InvalidConfig(
                "precision must be at least 1".to_string(),
            ));
        }
        if !self.screen_height.is_finite() || self.screen_height < 0.0 {
            return Err(TextError::InvalidConfig(format!(
                "screen height must be finite and non-negative, got {}",
                self.screen_height
            )));
        }
        Ok(())
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            widescreen: self.widescreen,
            y_axis: self.y_axis,
        }
    }
}

/// Counters for the last flushed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Glyph quads drawn.
    pub glyphs: u32,
    /// Distinct `(code, font)` groups (equal to `glyphs` in immediate mode).
    pub buckets: u32,
    /// Glyphs dropped because the arena was full.
    pub dropped: u32,
    /// Font-level state blocks emitted.
    pub font_switches: u32,
    /// Glyph texture loads emitted.
    pub texture_loads: u32,
    /// Commands appended to the sink.
    pub commands: u32,
}

/// Common interface for text renderers.
///
/// Call [`submit`](TextRender::submit) any number of times during a frame,
/// then [`flush`](TextRender::flush) exactly once before the frame's display
/// list is finalized. Neither reports failure: invalid fonts draw nothing and
/// glyphs beyond capacity are dropped, both with a log line.
///
/// # Example
///
/// ```ignore
/// fn draw_hud<R: TextRender>(renderer: &mut R, list: &mut DisplayList, style: &TextStyle) {
///     renderer.print(list, Vec2::new(16.0, 16.0), style, "SCORE 0100");
///     renderer.flush(list);
/// }
/// ```
pub trait TextRender {
    /// Lay out up to `limit` characters of `text` anchored at `position`.
    fn submit(
        &mut self,
        sink: &mut dyn CommandSink,
        position: Vec2,
        style: &TextStyle,
        limit: CharLimit,
        text: &[u8],
    );

    /// Emit everything queued this frame and reset for the next one.
    fn flush(&mut self, sink: &mut dyn CommandSink);

    /// Counters for the last flushed frame.
    fn stats(&self) -> BatchStats;

    fn config(&self) -> &TextRendererConfig;

    /// Submit a whole string.
    fn print(&mut self, sink: &mut dyn CommandSink, position: Vec2, style: &TextStyle, text: &str) {
        self.submit(sink, position, style, None, text.as_bytes());
    }
}

/// Convert an output coordinate to fixed point, rounding half away from zero.
#[inline]
pub fn quantize(value: f32, precision: u32) -> i32 {
    (value * precision as f32).round() as i32
}

/// Screen rectangle of one glyph quad in fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadRect {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl QuadRect {
    /// Map a layout box to screen fixed point.
    pub fn from_layout(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        config: &TextRendererConfig,
    ) -> Self {
        let p = config.precision;
        let (top, bottom) = match config.y_axis {
            YAxis::Down => (y, y + height),
            YAxis::Up => (config.screen_height - (y + height), config.screen_height - y),
        };
        Self {
            left: quantize(x, p),
            right: quantize(x + width, p),
            top: quantize(top, p),
            bottom: quantize(bottom, p),
        }
    }
}

/// Appends the text pass's command sequences to a sink and counts them.
pub(crate) struct CommandEmitter<'a> {
    sink: &'a mut dyn CommandSink,
    config: &'a TextRendererConfig,
    emitted: u32,
}

impl<'a> CommandEmitter<'a> {
    pub fn new(sink: &'a mut dyn CommandSink, config: &'a TextRendererConfig) -> Self {
        Self {
            sink,
            config,
            emitted: 0,
        }
    }

    /// Commands appended so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    fn push(&mut self, command: Command) {
        self.sink.push(command);
        self.emitted += 1;
    }

    /// Wait for in-flight primitives before touching render or tile state.
    pub fn sync(&mut self) {
        self.push(Command::PipeSync);
    }

    /// Blender, combiner and depth state for textured text.
    pub fn draw_preamble(&mut self) {
        self.push(Command::PipeSync);
        self.push(Command::SetCombine(CombineMode::TexelModulateEnv));
        self.push(Command::ClearGeometryMode(GeometryMode::ZBUFFER));
        self.push(Command::SetRenderMode(RenderMode::AntiAliasedTranslucent));
        self.push(Command::Texture {
            scale_s: u16::MAX,
            scale_t: u16::MAX,
            level: 0,
            tile: RENDER_TILE,
            on: true,
        });
    }

    /// Filter mode and the quad template with this font's texture extents.
    pub fn font_state(&mut self, font: &Font) {
        let cell = font.cell();
        self.push(Command::SetTextureFilter(font.filter()));
        self.push(Command::LoadVertices {
            vertices: &QUAD_TEMPLATE,
            start: 0,
        });
        let corners = [
            pack_st(0, cell.t),
            pack_st(cell.s, cell.t),
            pack_st(cell.s, 0),
            pack_st(0, 0),
        ];
        for (index, value) in corners.into_iter().enumerate() {
            self.push(Command::ModifyVertex {
                index: index as u8,
                field: VertexField::TexCoords,
                value,
            });
        }
    }

    /// Load one glyph's texels into texture memory.
    pub fn glyph_state(&mut self, cell: &GlyphCell, texture: &TextureRef) {
        self.push(Command::SetTextureImage {
            format: ImageFormat::Intensity,
            size: TexelSize::Bits8,
            width: cell.image_width,
            image: texture.clone(),
        });
        self.push(Command::SetTile(TileDescriptor {
            format: ImageFormat::Intensity,
            size: TexelSize::Bits8,
            line: TILE_LINE,
            tmem: 0,
            tile: LOAD_TILE,
            palette: 0,
            address_t: TileAddress::WRAP,
            mask_t: 0,
            shift_t: 0,
            address_s: TileAddress::WRAP,
            mask_s: 0,
            shift_s: 0,
        }));
        self.push(Command::LoadTile {
            tile: LOAD_TILE,
            uls: 0,
            ult: 0,
            lrs: cell.load_lrs,
            lrt: cell.load_lrt,
        });
        self.push(Command::SetTile(TileDescriptor {
            format: ImageFormat::Intensity,
            size: TexelSize::Bits4,
            line: TILE_LINE,
            tmem: 0,
            tile: RENDER_TILE,
            palette: 0,
            address_t: TileAddress::CLAMP,
            mask_t: 7,
            shift_t: 0,
            address_s: TileAddress::CLAMP,
            mask_s: 6,
            shift_s: 0,
        }));
        self.push(Command::SetTileSize {
            tile: RENDER_TILE,
            uls: 0,
            ult: 0,
            lrs: cell.tile_lrs,
            lrt: cell.tile_lrt,
        });
    }

    pub fn env_color(&mut self, color: Color) {
        self.push(Command::SetEnvColor(color));
    }

    /// Patch the template's screen corners and draw it.
    pub fn quad(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let rect = QuadRect::from_layout(x, y, width, height, self.config);
        let corners = [
            pack_screen_xy(rect.left, rect.bottom),
            pack_screen_xy(rect.right, rect.bottom),
            pack_screen_xy(rect.right, rect.top),
            pack_screen_xy(rect.left, rect.top),
        ];
        for (index, value) in corners.into_iter().enumerate() {
            self.push(Command::ModifyVertex {
                index: index as u8,
                field: VertexField::ScreenXY,
                value,
            });
        }
        self.push(Command::Triangles2 {
            first: [0, 1, 2],
            second: [0, 2, 3],
        });
    }

    /// Restore the host's default 3D state after the text pass.
    pub fn revert(&mut self) {
        self.push(Command::PipeSync);
        self.push(Command::SetGeometryMode(GeometryMode::ZBUFFER));
        self.push(Command::SetTextureFilter(TextureFilter::Bilinear));
        self.push(Command::PipeSync);
        self.push(Command::SetGeometryMode(GeometryMode::LIGHTING));
        self.push(Command::ClearGeometryMode(GeometryMode::TEXTURE_GEN));
        self.push(Command::SetCombine(CombineMode::ShadeEnvAlpha));
        self.push(Command::Texture {
            scale_s: u16::MAX,
            scale_t: u16::MAX,
            level: 0,
            tile: RENDER_TILE,
            on: false,
        });
    }
}
