//! Decoding of packed font records.
//!
//! Fonts ship as a 20-byte big-endian record whose table fields are
//! segmented references into host memory:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | glyph width |
//! | 1 | 1 | glyph height |
//! | 2 | 2 | padding |
//! | 4 | 4 | aspect (`f32`) |
//! | 8 | 4 | texture table reference |
//! | 12 | 4 | kerning table reference |
//! | 16 | 4 | filter mode (0 point, 1 bilinear, 2 average) |
//!
//! The texture table holds 256 references (0 = no glyph), the kerning table
//! 256 advance bytes. Resolving references is the host's job, through
//! [`SegmentResolver`].
//!
//! # Example
//!
//! ```ignore
//! let mut segments = SegmentTable::new();
//! segments.set_segment(7, level_data);
//!
//! let font = Arc::new(FontAsset::decode(&level_data[record..record + 20], &segments)?);
//! ```

use std::sync::Arc;

use glyphlist_core::profiling::profile_function;
use glyphlist_gfx::{TextureFilter, TextureRef};

use crate::error::{TextError, TextResult};
use crate::font::{Font, GLYPH_COUNT};

/// Maps segmented references to live data.
pub trait SegmentResolver {
    /// `len` bytes starting at `address`, if mapped.
    fn resolve_bytes(&self, address: u32, len: usize) -> Option<&[u8]>;

    /// A texel buffer of `len` bytes starting at `address`, if mapped.
    fn resolve_texture(&self, address: u32, len: usize) -> Option<TextureRef> {
        self.resolve_bytes(address, len).map(|b| TextureRef::new(b.to_vec()))
    }
}

/// Number of hardware segments.
pub const SEGMENT_COUNT: usize = 16;

/// A resolver over up to 16 segments, addressed as `0xSSoooooo`.
#[derive(Debug, Default, Clone)]
pub struct SegmentTable {
    segments: [Option<Arc<[u8]>>; SEGMENT_COUNT],
}

impl SegmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a segment. Only the low four bits of `segment` are used.
    pub fn set_segment(&mut self, segment: u8, data: impl Into<Arc<[u8]>>) {
        self.segments[(segment & 0x0f) as usize] = Some(data.into());
    }

    /// Build a segmented address.
    pub fn address(segment: u8, offset: u32) -> u32 {
        ((segment as u32 & 0x0f) << 24) | (offset & 0x00ff_ffff)
    }
}

impl SegmentResolver for SegmentTable {
    fn resolve_bytes(&self, address: u32, len: usize) -> Option<&[u8]> {
        let segment = ((address >> 24) & 0x0f) as usize;
        let offset = (address & 0x00ff_ffff) as usize;
        let data = self.segments[segment].as_ref()?;
        data.get(offset..offset.checked_add(len)?)
    }
}

/// Packed font record decoder.
pub struct FontAsset;

impl FontAsset {
    /// Size of the packed record.
    pub const RECORD_SIZE: usize = 20;
    /// Size of the texture reference table.
    pub const TEXTURE_TABLE_SIZE: usize = GLYPH_COUNT * 4;
    /// Size of the kerning table.
    pub const KERNING_TABLE_SIZE: usize = GLYPH_COUNT;

    /// Decode a font record, resolving its tables and glyph textures.
    ///
    /// Glyph textures that share a reference share one [`TextureRef`]. Odd
    /// glyph widths decode fine; such fonts are rejected when drawn.
    pub fn decode(record: &[u8], resolver: &dyn SegmentResolver) -> TextResult<Font> {
        profile_function!();
        if record.len() < Self::RECORD_SIZE {
            return Err(TextError::TruncatedAsset {
                expected: Self::RECORD_SIZE,
                actual: record.len(),
            });
        }

        let glyph_width = record[0];
        let glyph_height = record[1];
        let aspect = f32::from_bits(read_u32(record, 4)?);
        let texture_table = read_u32(record, 8)?;
        let kerning_table = read_u32(record, 12)?;
        let filter_raw = read_u32(record, 16)?;
        let filter =
            TextureFilter::from_raw(filter_raw).ok_or(TextError::InvalidFilterMode(filter_raw))?;

        let kerning_bytes = resolver
            .resolve_bytes(kerning_table, Self::KERNING_TABLE_SIZE)
            .ok_or(TextError::UnresolvedReference {
                address: kerning_table,
            })?;
        check_len(kerning_bytes.len(), Self::KERNING_TABLE_SIZE)?;
        let mut kerning = [0u8; GLYPH_COUNT];
        kerning.copy_from_slice(kerning_bytes);

        let table = resolver
            .resolve_bytes(texture_table, Self::TEXTURE_TABLE_SIZE)
            .ok_or(TextError::UnresolvedReference {
                address: texture_table,
            })?;
        check_len(table.len(), Self::TEXTURE_TABLE_SIZE)?;

        let texel_len = (glyph_width as usize * glyph_height as usize).div_ceil(2);
        let mut textures: Box<[Option<TextureRef>; GLYPH_COUNT]> =
            Box::new(std::array::from_fn(|_| None));
        let mut seen: Vec<(u32, TextureRef)> = Vec::new();

        for (code, slot) in textures.iter_mut().enumerate() {
            let address = read_u32(table, code * 4)?;
            if address == 0 {
                continue;
            }
            let texture = match seen.iter().find(|(a, _)| *a == address) {
                Some((_, texture)) => texture.clone(),
                None => {
                    let texture = resolver
                        .resolve_texture(address, texel_len)
                        .ok_or(TextError::UnresolvedReference { address })?;
                    check_len(texture.len(), texel_len)?;
                    seen.push((address, texture.clone()));
                    texture
                }
            };
            *slot = Some(texture);
        }

        let font = Font::new(glyph_width, glyph_height, aspect, textures, kerning, filter);
        tracing::debug!("Decoded font asset: {:?}", font);
        Ok(font)
    }

    /// Encode a font's header and tables for a segment layout.
    ///
    /// Writes the record and both tables at `offsets` inside `segment_data`,
    /// which is mapped as `segment`. Glyph textures must already live in
    /// mapped memory; `texture_address` supplies each drawable glyph's
    /// reference.
    pub fn encode_into(
        font: &Font,
        segment: u8,
        segment_data: &mut [u8],
        offsets: EncodeOffsets,
        mut texture_address: impl FnMut(u8) -> u32,
    ) -> TextResult<()> {
        let needed = [
            offsets.record + Self::RECORD_SIZE,
            offsets.texture_table + Self::TEXTURE_TABLE_SIZE,
            offsets.kerning_table + Self::KERNING_TABLE_SIZE,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        if segment_data.len() < needed {
            return Err(TextError::TruncatedAsset {
                expected: needed,
                actual: segment_data.len(),
            });
        }

        let record = &mut segment_data[offsets.record..offsets.record + Self::RECORD_SIZE];
        record[0] = font.glyph_width();
        record[1] = font.glyph_height();
        record[2..4].fill(0);
        record[4..8].copy_from_slice(&font.aspect().to_bits().to_be_bytes());
        record[8..12].copy_from_slice(
            &SegmentTable::address(segment, offsets.texture_table as u32).to_be_bytes(),
        );
        record[12..16].copy_from_slice(
            &SegmentTable::address(segment, offsets.kerning_table as u32).to_be_bytes(),
        );
        record[16..20].copy_from_slice(&(font.filter() as u32).to_be_bytes());

        for code in 0..GLYPH_COUNT {
            let address = if font.is_drawable(code as u8) {
                texture_address(code as u8)
            } else {
                0
            };
            let at = offsets.texture_table + code * 4;
            segment_data[at..at + 4].copy_from_slice(&address.to_be_bytes());
        }

        segment_data[offsets.kerning_table..offsets.kerning_table + Self::KERNING_TABLE_SIZE]
            .copy_from_slice(font.kerning());
        Ok(())
    }
}

/// Where [`FontAsset::encode_into`] places each part within a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOffsets {
    pub record: usize,
    pub texture_table: usize,
    pub kerning_table: usize,
}

/// Resolvers may hand back any slice; anything but the requested length is truncated data.
fn check_len(actual: usize, expected: usize) -> TextResult<()> {
    if actual != expected {
        return Err(TextError::TruncatedAsset { expected, actual });
    }
    Ok(())
}

fn read_u32(bytes: &[u8], offset: usize) -> TextResult<u32> {
    let word: [u8; 4] = offset
        .checked_add(4)
        .and_then(|end| bytes.get(offset..end))
        .and_then(|b| b.try_into().ok())
        .ok_or(TextError::TruncatedAsset {
            expected: offset.saturating_add(4),
            actual: bytes.len(),
        })?;
    Ok(u32::from_be_bytes(word))
}
