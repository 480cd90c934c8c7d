//! Texel fixtures.

use glyphlist_gfx::TextureRef;

/// Bytes occupied by a 4-bit intensity glyph cell.
pub fn cell_bytes(width: u8, height: u8) -> usize {
    (width as usize * height as usize).div_ceil(2)
}

/// A 4-bit intensity cell filled with a pattern derived from `seed`.
///
/// Every call allocates a distinct buffer, so two calls never compare equal
/// as [`TextureRef`]s even with the same seed.
pub fn glyph_texels(width: u8, height: u8, seed: u8) -> TextureRef {
    let texels: Vec<u8> = (0..cell_bytes(width, height))
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect();
    TextureRef::new(texels)
}

/// An empty-looking (all zero) cell.
pub fn blank_texels(width: u8, height: u8) -> TextureRef {
    TextureRef::new(vec![0u8; cell_bytes(width, height)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bytes_rounds_up() {
        assert_eq!(cell_bytes(8, 16), 64);
        assert_eq!(cell_bytes(3, 3), 5);
    }

    #[test]
    fn test_glyph_texels_are_distinct() {
        let a = glyph_texels(8, 8, 1);
        let b = glyph_texels(8, 8, 1);
        assert_eq!(a.texels(), b.texels());
        assert_ne!(a, b);
    }
}
