//! Line walking shared by every render strategy.
//!
//! [`layout_glyphs`] consumes a byte string line by line, aligns each line
//! against the anchor and reports one [`GlyphPlacement`] per drawable
//! character. What happens to a placement (immediate emission or arena
//! insertion) is up to the caller.

use glyphlist_core::math::Vec2;
use glyphlist_core::profiling::profile_function;
use glyphlist_gfx::TextureRef;

use crate::error::TextResult;
use crate::metrics::{CharLimit, is_terminator, measure_width};
use crate::text::TextStyle;

/// Vertical layout convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxis {
    /// Origin top-left, y grows downward. A glyph at `y` spans `y..y + h`
    /// and a newline moves the pen down by one line height.
    #[default]
    Down,
    /// Origin bottom-left, y grows upward. A glyph at `y` spans `y..y + h`
    /// upward and a newline moves the pen down (`y -= line_height`).
    Up,
}

impl YAxis {
    /// Pen y after a newline.
    pub fn next_line(self, y: f32, line_height: f32) -> f32 {
        match self {
            YAxis::Down => y + line_height,
            YAxis::Up => y - line_height,
        }
    }
}

/// Options that affect layout but not the style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutOptions {
    pub widescreen: bool,
    pub y_axis: YAxis,
}

/// Position and box of one drawable glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub code: u8,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Totals for one laid-out string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSummary {
    /// Characters consumed, including newlines and invisible glyphs.
    pub consumed: usize,
    /// Glyphs handed to the callback.
    pub placed: usize,
    /// Lines started (at least one for any accepted call).
    pub lines: usize,
}

/// Walk `text` and call `place` for every drawable character.
///
/// Consumes up to `limit` characters or a NUL byte, whichever comes first. A
/// newline is consumed without drawing and starts a new line, aligned using
/// only the remaining text. Every character advances the pen by its kerning
/// width, drawable or not.
///
/// Returns an error without calling `place` if the style's font is invalid.
pub fn layout_glyphs<F>(
    position: Vec2,
    style: &TextStyle,
    options: LayoutOptions,
    limit: CharLimit,
    text: &[u8],
    mut place: F,
) -> TextResult<LayoutSummary>
where
    F: FnMut(GlyphPlacement, &TextureRef),
{
    profile_function!();
    let font = style.font();
    font.validate()?;

    let char_width = style.char_width(options.widescreen);
    let char_height = style.char_height();
    let scale = font.advance_scale(char_width);

    let mut summary = LayoutSummary::default();
    let mut rest = text;
    let mut limit = limit;
    let mut pen_y = position.y;

    'lines: loop {
        summary.lines += 1;
        let width = measure_width(font, char_width, limit, rest);
        let mut pen_x = position.x + style.get_align().offset(width);

        while let Some((&code, tail)) = rest.split_first() {
            if limit == Some(0) || is_terminator(code) {
                break 'lines;
            }
            rest = tail;
            limit = limit.map(|n| n - 1);
            summary.consumed += 1;

            if code == b'\n' {
                pen_y = options.y_axis.next_line(pen_y, style.get_line_height());
                continue 'lines;
            }

            if let Some(texture) = font.texture(code) {
                place(
                    GlyphPlacement {
                        code,
                        x: pen_x,
                        y: pen_y,
                        width: char_width,
                        height: char_height,
                    },
                    texture,
                );
                summary.placed += 1;
            }
            pen_x += font.advance(code) as f32 * scale;
        }
        break;
    }

    Ok(summary)
}
