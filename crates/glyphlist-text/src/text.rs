use std::sync::Arc;

use glyphlist_gfx::Color;

use crate::font::Font;

/// Text alignment (horizontal), relative to the anchor x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// First character's left edge at the anchor.
    #[default]
    Left,
    /// Line midpoint at the anchor.
    Center,
    /// Line end at the anchor.
    Right,
}

impl TextAlign {
    /// Pen offset for a line of the given width.
    pub fn offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -(width / 2.0),
            TextAlign::Right => -width,
        }
    }
}

/// Per-call draw style.
///
/// Cheap to clone; the font is shared.
///
/// ```ignore
/// let style = TextStyle::new(font.clone())
///     .size(16.0)
///     .line_height(18.0)
///     .align(TextAlign::Center)
///     .color(Color::YELLOW);
/// ```
#[derive(Debug, Clone)]
pub struct TextStyle {
    font: Arc<Font>,
    size: f32,
    line_height: f32,
    align: TextAlign,
    color: Color,
}

impl TextStyle {
    /// Create a style drawing at the font's native cell height.
    pub fn new(font: Arc<Font>) -> Self {
        let size = font.glyph_height() as f32;
        Self {
            font,
            size,
            line_height: size,
            align: TextAlign::Left,
            color: Color::WHITE,
        }
    }

    /// Set the glyph height in output units.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the distance between successive lines in output units.
    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    pub fn get_size(&self) -> f32 {
        self.size
    }

    pub fn get_line_height(&self) -> f32 {
        self.line_height
    }

    pub fn get_align(&self) -> TextAlign {
        self.align
    }

    pub fn get_color(&self) -> Color {
        self.color
    }

    /// Width of one glyph box in output units.
    ///
    /// Widescreen output is horizontally stretched by 4:3, so glyphs are
    /// narrowed by 0.75 to keep their proportions.
    pub fn char_width(&self, widescreen: bool) -> f32 {
        let width = self.size * self.font.aspect();
        if widescreen { width * 0.75 } else { width }
    }

    /// Height of one glyph box in output units.
    pub fn char_height(&self) -> f32 {
        self.size
    }
}
