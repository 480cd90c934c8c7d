//! Bitmap font descriptors.
//!
//! A [`Font`] is built once when assets load and shared through an
//! `Arc<Font>` by every style that draws with it. The arena groups glyphs by
//! that `Arc`'s identity, so two fonts with identical contents still batch
//! separately.

use std::fmt;

use glyphlist_gfx::{TextureFilter, TextureRef};

use crate::error::{TextError, TextResult};

/// Number of addressable glyph codes.
pub const GLYPH_COUNT: usize = 256;

/// Texture-memory row stride, in 64-bit words, shared by the load and render tiles.
pub(crate) const TILE_LINE: u16 = 4;

/// A bitmap font: one 4-bit intensity texture per glyph code plus advances.
pub struct Font {
    glyph_width: u8,
    glyph_height: u8,
    aspect: f32,
    textures: Box<[Option<TextureRef>; GLYPH_COUNT]>,
    kerning: [u8; GLYPH_COUNT],
    filter: TextureFilter,
}

impl Font {
    /// Create a font from complete tables.
    pub fn new(
        glyph_width: u8,
        glyph_height: u8,
        aspect: f32,
        textures: Box<[Option<TextureRef>; GLYPH_COUNT]>,
        kerning: [u8; GLYPH_COUNT],
        filter: TextureFilter,
    ) -> Self {
        Self {
            glyph_width,
            glyph_height,
            aspect,
            textures,
            kerning,
            filter,
        }
    }

    /// Start building a font with the given cell size.
    pub fn builder(glyph_width: u8, glyph_height: u8) -> FontBuilder {
        FontBuilder::new(glyph_width, glyph_height)
    }

    pub fn glyph_width(&self) -> u8 {
        self.glyph_width
    }

    pub fn glyph_height(&self) -> u8 {
        self.glyph_height
    }

    /// Width scale applied to the nominal glyph box (1.0 = square cells).
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    /// Texture for a glyph code; `None` for non-printing codes such as space.
    pub fn texture(&self, code: u8) -> Option<&TextureRef> {
        self.textures[code as usize].as_ref()
    }

    /// Whether the code has a texture and will produce a quad.
    pub fn is_drawable(&self, code: u8) -> bool {
        self.textures[code as usize].is_some()
    }

    /// Advance of a glyph in texel units.
    pub fn advance(&self, code: u8) -> u8 {
        self.kerning[code as usize]
    }

    pub fn kerning(&self) -> &[u8; GLYPH_COUNT] {
        &self.kerning
    }

    /// Number of codes that have a texture.
    pub fn drawable_count(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }

    /// Output units per texel unit for a given character width.
    pub fn advance_scale(&self, char_width: f32) -> f32 {
        char_width / self.glyph_width as f32
    }

    /// Check that the font can be drawn.
    ///
    /// Glyph texels are 4-bit and loaded as bytes, so the cell width must be
    /// even. Zero-sized cells would divide by zero in the advance scale.
    pub fn validate(&self) -> TextResult<()> {
        if self.glyph_width == 0 || self.glyph_height == 0 {
            return Err(TextError::EmptyGlyphCell {
                width: self.glyph_width,
                height: self.glyph_height,
            });
        }
        if self.glyph_width % 2 != 0 {
            return Err(TextError::OddGlyphWidth {
                width: self.glyph_width,
            });
        }
        Ok(())
    }

    /// Texture-space parameters for this font's glyph cell.
    pub fn cell(&self) -> GlyphCell {
        GlyphCell::new(self.glyph_width, self.glyph_height)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("glyph_width", &self.glyph_width)
            .field("glyph_height", &self.glyph_height)
            .field("aspect", &self.aspect)
            .field("filter", &self.filter)
            .field("drawable", &self.drawable_count())
            .finish()
    }
}

/// Texture-space extents and tile rectangles derived from a glyph cell.
///
/// Coordinates follow the hardware's fixed-point conventions: texture
/// coordinates are 10.5 scaled by 32 per texel, tile rectangles are 10.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    /// Right edge in texture coordinates.
    pub s: i32,
    /// Bottom edge in texture coordinates.
    pub t: i32,
    /// Width of the 8-bit view of one 4-bit row, in texels.
    pub image_width: u16,
    /// Load-tile lower-right corner.
    pub load_lrs: u16,
    pub load_lrt: u16,
    /// Render-tile lower-right corner.
    pub tile_lrs: u16,
    pub tile_lrt: u16,
}

impl GlyphCell {
    pub fn new(width: u8, height: u8) -> Self {
        let w = width as u16;
        let h = height as u16;
        let load_lrs = (w * 2).saturating_sub(2);
        let load_lrt = (h * 4).saturating_sub(4);
        Self {
            s: width as i32 * 32,
            t: height as i32 * 32,
            image_width: w / 2,
            load_lrs,
            load_lrt,
            tile_lrs: load_lrs * 2,
            tile_lrt: load_lrt,
        }
    }
}

/// Builder for [`Font`].
///
/// ```
/// use glyphlist_gfx::{TextureFilter, TextureRef};
/// use glyphlist_text::Font;
///
/// let font = Font::builder(8, 16)
///     .aspect(0.5)
///     .filter(TextureFilter::Point)
///     .uniform_advance(8)
///     .glyph(b'A', TextureRef::new(vec![0u8; 64]))
///     .advance(b' ', 4)
///     .build();
///
/// assert!(font.is_drawable(b'A'));
/// assert!(!font.is_drawable(b' '));
/// assert_eq!(font.advance(b' '), 4);
/// ```
pub struct FontBuilder {
    glyph_width: u8,
    glyph_height: u8,
    aspect: f32,
    textures: Box<[Option<TextureRef>; GLYPH_COUNT]>,
    kerning: [u8; GLYPH_COUNT],
    filter: TextureFilter,
}

impl FontBuilder {
    pub fn new(glyph_width: u8, glyph_height: u8) -> Self {
        Self {
            glyph_width,
            glyph_height,
            aspect: 1.0,
            textures: Box::new(std::array::from_fn(|_| None)),
            kerning: [0; GLYPH_COUNT],
            filter: TextureFilter::default(),
        }
    }

    pub fn aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Give a glyph code a texture.
    pub fn glyph(mut self, code: u8, texture: TextureRef) -> Self {
        self.textures[code as usize] = Some(texture);
        self
    }

    /// Set the advance of one glyph code.
    pub fn advance(mut self, code: u8, advance: u8) -> Self {
        self.kerning[code as usize] = advance;
        self
    }

    /// Set the same advance for every glyph code.
    pub fn uniform_advance(mut self, advance: u8) -> Self {
        self.kerning = [advance; GLYPH_COUNT];
        self
    }

    /// Replace the whole kerning table.
    pub fn kerning(mut self, kerning: [u8; GLYPH_COUNT]) -> Self {
        self.kerning = kerning;
        self
    }

    pub fn build(self) -> Font {
        Font::new(
            self.glyph_width,
            self.glyph_height,
            self.aspect,
            self.textures,
            self.kerning,
            self.filter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_odd_width() {
        let font = Font::builder(7, 8).build();
        assert_eq!(font.validate(), Err(TextError::OddGlyphWidth { width: 7 }));
    }

    #[test]
    fn test_validate_rejects_empty_cell() {
        let font = Font::builder(0, 8).build();
        assert_eq!(
            font.validate(),
            Err(TextError::EmptyGlyphCell {
                width: 0,
                height: 8
            })
        );
        assert!(Font::builder(8, 16).build().validate().is_ok());
    }

    #[test]
    fn test_cell_parameters() {
        let cell = GlyphCell::new(16, 16);
        assert_eq!(cell.s, 512);
        assert_eq!(cell.t, 512);
        assert_eq!(cell.image_width, 8);
        assert_eq!(cell.load_lrs, 30);
        assert_eq!(cell.load_lrt, 60);
        assert_eq!(cell.tile_lrs, 60);
        assert_eq!(cell.tile_lrt, 60);
    }

    #[test]
    fn test_advance_scale() {
        let font = Font::builder(8, 16).build();
        assert_eq!(font.advance_scale(4.0), 0.5);
    }
}
