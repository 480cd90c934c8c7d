//! Advance-sum text measurement.
//!
//! Alignment measures the rest of the current line before drawing it, so the
//! run boundary rule lives here and layout uses the same one: a run ends at a
//! newline, a NUL byte, the end of the slice, or when the character limit is
//! spent, whichever comes first.

use glyphlist_core::profiling::profile_function;

use crate::font::Font;

/// Characters left to consume; `None` means unlimited.
pub type CharLimit = Option<usize>;

/// Whether `byte` terminates the whole string.
#[inline]
pub(crate) fn is_terminator(byte: u8) -> bool {
    byte == 0
}

/// The bytes of the current line: up to a newline, NUL or the limit.
pub fn line_run(text: &[u8], limit: CharLimit) -> &[u8] {
    let max = limit.map_or(text.len(), |n| n.min(text.len()));
    let end = text[..max]
        .iter()
        .position(|&b| b == b'\n' || is_terminator(b))
        .unwrap_or(max);
    &text[..end]
}

/// Width of the current line in output units.
///
/// Sums `kerning[c] * (char_width / glyph_width)` over [`line_run`].
pub fn measure_width(font: &Font, char_width: f32, limit: CharLimit, text: &[u8]) -> f32 {
    profile_function!();
    let scale = font.advance_scale(char_width);
    line_run(text, limit)
        .iter()
        .fold(0.0, |w, &c| w + font.advance(c) as f32 * scale)
}

/// Width of every line in the text, honouring the same limit as layout.
///
/// The newline that ends a line counts against the limit.
pub fn measure_lines(font: &Font, char_width: f32, limit: CharLimit, text: &[u8]) -> Vec<f32> {
    profile_function!();
    let mut widths = Vec::new();
    let mut rest = text;
    let mut limit = limit;

    loop {
        let run = line_run(rest, limit);
        widths.push(measure_width(font, char_width, limit, rest));

        let consumed = run.len();
        rest = &rest[consumed..];
        limit = limit.map(|n| n - consumed);

        match (rest.first(), limit) {
            (_, Some(0)) => break,
            (Some(b'\n'), _) => {
                rest = &rest[1..];
                limit = limit.map(|n| n - 1);
            }
            _ => break,
        }
    }

    widths
}
