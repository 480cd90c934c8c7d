//! Integration tests for packed font record decoding.

use std::sync::Arc;

use glyphlist_gfx::{TextureFilter, TextureRef};
use glyphlist_test_utils::fixtures;
use glyphlist_text::{
    EncodeOffsets, Font, FontAsset, LayoutOptions, SegmentResolver, SegmentTable, TextError,
    TextStyle, Vec2, layout_glyphs,
};

const SEGMENT: u8 = 7;
const RECORD: usize = 0x00;
const TEXTURE_TABLE: usize = 0x20;
const KERNING_TABLE: usize = TEXTURE_TABLE + FontAsset::TEXTURE_TABLE_SIZE;
const TEXELS: usize = KERNING_TABLE + FontAsset::KERNING_TABLE_SIZE;

/// Hand-pack an 8x8 font: 'A' and 'B' share texels, 'C' has its own.
fn create_level_segment(filter: u32) -> Vec<u8> {
    let cell = fixtures::cell_bytes(8, 8);
    let mut data = vec![0u8; TEXELS + cell * 2];

    data[RECORD] = 8;
    data[RECORD + 1] = 8;
    data[RECORD + 4..RECORD + 8].copy_from_slice(&1.5f32.to_bits().to_be_bytes());
    data[RECORD + 8..RECORD + 12]
        .copy_from_slice(&SegmentTable::address(SEGMENT, TEXTURE_TABLE as u32).to_be_bytes());
    data[RECORD + 12..RECORD + 16]
        .copy_from_slice(&SegmentTable::address(SEGMENT, KERNING_TABLE as u32).to_be_bytes());
    data[RECORD + 16..RECORD + 20].copy_from_slice(&filter.to_be_bytes());

    let shared = SegmentTable::address(SEGMENT, TEXELS as u32);
    let own = SegmentTable::address(SEGMENT, (TEXELS + cell) as u32);
    for (code, address) in [(b'A', shared), (b'B', shared), (b'C', own)] {
        let at = TEXTURE_TABLE + code as usize * 4;
        data[at..at + 4].copy_from_slice(&address.to_be_bytes());
    }

    for code in 0..256 {
        data[KERNING_TABLE + code] = 6;
    }
    data[KERNING_TABLE + b' ' as usize] = 3;

    for (i, byte) in data[TEXELS..].iter_mut().enumerate() {
        *byte = i as u8;
    }
    data
}

fn table_with(data: Vec<u8>) -> SegmentTable {
    let mut table = SegmentTable::new();
    table.set_segment(SEGMENT, data);
    table
}

#[test]
fn test_decode_header_and_tables() {
    let data = create_level_segment(0);
    let table = table_with(data.clone());
    let font = FontAsset::decode(&data[RECORD..RECORD + FontAsset::RECORD_SIZE], &table).unwrap();

    assert_eq!(font.glyph_width(), 8);
    assert_eq!(font.glyph_height(), 8);
    assert_eq!(font.aspect(), 1.5);
    assert_eq!(font.filter(), TextureFilter::Point);
    assert_eq!(font.advance(b'A'), 6);
    assert_eq!(font.advance(b' '), 3);
    assert_eq!(font.drawable_count(), 3);
    assert!(!font.is_drawable(b' '));
}

#[test]
fn test_shared_references_share_textures() {
    let data = create_level_segment(1);
    let table = table_with(data.clone());
    let font = FontAsset::decode(&data[..FontAsset::RECORD_SIZE], &table).unwrap();

    let a = font.texture(b'A').unwrap();
    let b = font.texture(b'B').unwrap();
    let c = font.texture(b'C').unwrap();
    assert!(a.ptr_eq(b));
    assert!(!a.ptr_eq(c));
    assert_eq!(a.len(), fixtures::cell_bytes(8, 8));
    assert_eq!(a.texels()[1], 1);
    assert_eq!(c.texels()[0], fixtures::cell_bytes(8, 8) as u8);
}

#[test]
fn test_unknown_filter_is_rejected() {
    let data = create_level_segment(3);
    let table = table_with(data.clone());
    assert_eq!(
        FontAsset::decode(&data[..FontAsset::RECORD_SIZE], &table).unwrap_err(),
        TextError::InvalidFilterMode(3)
    );
}

#[test]
fn test_unmapped_glyph_reference_is_rejected() {
    let mut data = create_level_segment(0);
    let missing = SegmentTable::address(3, 0x100);
    let at = TEXTURE_TABLE + b'Z' as usize * 4;
    data[at..at + 4].copy_from_slice(&missing.to_be_bytes());

    let table = table_with(data.clone());
    assert_eq!(
        FontAsset::decode(&data[..FontAsset::RECORD_SIZE], &table).unwrap_err(),
        TextError::UnresolvedReference { address: missing }
    );
}

#[test]
fn test_unmapped_kerning_table_is_rejected() {
    let data = create_level_segment(0);
    let mut truncated = data.clone();
    truncated.truncate(KERNING_TABLE + 10);

    let table = table_with(truncated);
    let err = FontAsset::decode(&data[..FontAsset::RECORD_SIZE], &table).unwrap_err();
    assert!(matches!(err, TextError::UnresolvedReference { .. }));
}

#[test]
fn test_encode_then_decode_preserves_font() {
    let texels = fixtures::glyph_texels(8, 12, 9);
    let font = Font::builder(8, 12)
        .aspect(0.75)
        .filter(TextureFilter::Average)
        .uniform_advance(7)
        .advance(b'i', 3)
        .glyph(b'i', texels.clone())
        .build();

    let texel_offset = TEXELS;
    let mut data = vec![0u8; texel_offset + texels.len()];
    data[texel_offset..].copy_from_slice(texels.texels());

    let offsets = EncodeOffsets {
        record: RECORD,
        texture_table: TEXTURE_TABLE,
        kerning_table: KERNING_TABLE,
    };
    FontAsset::encode_into(&font, SEGMENT, &mut data, offsets, |_| {
        SegmentTable::address(SEGMENT, texel_offset as u32)
    })
    .unwrap();

    let table = table_with(data.clone());
    let decoded = FontAsset::decode(&data[..FontAsset::RECORD_SIZE], &table).unwrap();
    assert_eq!(decoded.glyph_height(), 12);
    assert_eq!(decoded.aspect(), 0.75);
    assert_eq!(decoded.filter(), TextureFilter::Average);
    assert_eq!(decoded.kerning(), font.kerning());
    assert_eq!(decoded.texture(b'i').unwrap().texels(), texels.texels());
    assert!(decoded.texture(b'j').is_none());
}

#[test]
fn test_encode_rejects_small_segment() {
    let font = Font::builder(8, 8).build();
    let mut data = vec![0u8; 16];
    let offsets = EncodeOffsets {
        record: 0,
        texture_table: 0x20,
        kerning_table: 0x420,
    };
    assert!(matches!(
        FontAsset::encode_into(&font, SEGMENT, &mut data, offsets, |_| 0),
        Err(TextError::TruncatedAsset { actual: 16, .. })
    ));
}

/// A resolver that hands out one preloaded texture for every reference.
struct FixedResolver {
    bytes: Vec<u8>,
    texture: TextureRef,
}

impl SegmentResolver for FixedResolver {
    fn resolve_bytes(&self, _address: u32, len: usize) -> Option<&[u8]> {
        self.bytes.get(..len)
    }

    fn resolve_texture(&self, _address: u32, _len: usize) -> Option<TextureRef> {
        Some(self.texture.clone())
    }
}

#[test]
fn test_custom_resolver_supplies_textures() {
    let mut bytes = vec![0u8; FontAsset::TEXTURE_TABLE_SIZE];
    bytes[b'Q' as usize * 4 + 3] = 1;
    let resolver = FixedResolver {
        bytes,
        texture: fixtures::blank_texels(8, 8),
    };

    let mut record = [0u8; FontAsset::RECORD_SIZE];
    record[0] = 8;
    record[1] = 8;
    record[4..8].copy_from_slice(&1.0f32.to_bits().to_be_bytes());

    let font = Arc::new(FontAsset::decode(&record, &resolver).unwrap());
    assert!(font.texture(b'Q').unwrap().ptr_eq(&resolver.texture));

    // Decoded fonts lay out like built ones.
    let style = TextStyle::new(font);
    let summary = layout_glyphs(Vec2::ZERO, &style, LayoutOptions::default(), None, b"QQ", |_, t| {
        assert!(t.ptr_eq(&resolver.texture));
    })
    .unwrap();
    assert_eq!(summary.placed, 2);
}

/// A resolver whose mappings are shorter than what is asked for.
struct ShortResolver {
    bytes: Vec<u8>,
}

impl SegmentResolver for ShortResolver {
    fn resolve_bytes(&self, _address: u32, len: usize) -> Option<&[u8]> {
        self.bytes.get(..len.min(self.bytes.len()))
    }
}

fn plain_record() -> [u8; FontAsset::RECORD_SIZE] {
    let mut record = [0u8; FontAsset::RECORD_SIZE];
    record[0] = 8;
    record[1] = 8;
    record[4..8].copy_from_slice(&1.0f32.to_bits().to_be_bytes());
    record
}

#[test]
fn test_short_table_is_truncated_not_a_panic() {
    let resolver = ShortResolver {
        bytes: vec![0u8; 4],
    };
    assert_eq!(
        FontAsset::decode(&plain_record(), &resolver).unwrap_err(),
        TextError::TruncatedAsset {
            expected: FontAsset::KERNING_TABLE_SIZE,
            actual: 4
        }
    );

    // Kerning fits, the texture table does not.
    let resolver = ShortResolver {
        bytes: vec![0u8; FontAsset::KERNING_TABLE_SIZE],
    };
    assert_eq!(
        FontAsset::decode(&plain_record(), &resolver).unwrap_err(),
        TextError::TruncatedAsset {
            expected: FontAsset::TEXTURE_TABLE_SIZE,
            actual: FontAsset::KERNING_TABLE_SIZE
        }
    );
}

#[test]
fn test_wrong_texture_size_is_rejected() {
    let mut bytes = vec![0u8; FontAsset::TEXTURE_TABLE_SIZE];
    bytes[b'Q' as usize * 4 + 3] = 1;
    // An 8x8 cell needs 32 texel bytes.
    let resolver = FixedResolver {
        bytes,
        texture: fixtures::blank_texels(4, 4),
    };
    assert_eq!(
        FontAsset::decode(&plain_record(), &resolver).unwrap_err(),
        TextError::TruncatedAsset {
            expected: fixtures::cell_bytes(8, 8),
            actual: fixtures::cell_bytes(4, 4)
        }
    );
}
