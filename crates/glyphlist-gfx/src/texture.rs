//! Texel buffers and tile descriptors.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

/// A shared, immutable texel buffer.
///
/// Two references are equal only when they point at the same buffer; the
/// contents are never compared. This mirrors how the hardware sees a texture:
/// as an address to load from.
#[derive(Clone)]
pub struct TextureRef {
    texels: Arc<[u8]>,
}

impl TextureRef {
    /// Wrap texel data in a new shared buffer.
    pub fn new(texels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            texels: texels.into(),
        }
    }

    /// The raw texel bytes.
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.texels.len()
    }

    /// Whether the buffer holds no texels.
    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    /// Identity of the buffer, stable for its lifetime.
    pub fn id(&self) -> usize {
        self.texels.as_ptr() as usize
    }

    /// Whether both references point at the same buffer.
    pub fn ptr_eq(&self, other: &TextureRef) -> bool {
        Arc::ptr_eq(&self.texels, &other.texels)
    }
}

impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TextureRef {}

impl fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureRef({:#x}, {} bytes)", self.id(), self.len())
    }
}

/// Texture sampling filter. The discriminants are the font asset encoding.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFilter {
    Point = 0,
    #[default]
    Bilinear = 1,
    Average = 2,
}

impl TextureFilter {
    /// Decode the asset encoding. Returns `None` for unknown values.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(TextureFilter::Point),
            1 => Some(TextureFilter::Bilinear),
            2 => Some(TextureFilter::Average),
            _ => None,
        }
    }
}

/// Texel image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Rgba,
    Yuv,
    ColorIndex,
    IntensityAlpha,
    Intensity,
}

/// Bits per texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexelSize {
    Bits4,
    Bits8,
    Bits16,
    Bits32,
}

bitflags! {
    /// Per-axis tile addressing. The empty set means wrap without mirroring.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TileAddress: u8 {
        const MIRROR = 1 << 0;
        const CLAMP = 1 << 1;
    }
}

impl TileAddress {
    /// Wrap, no mirror.
    pub const WRAP: TileAddress = TileAddress::empty();
}

/// Parameters of a set-tile command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileDescriptor {
    pub format: ImageFormat,
    pub size: TexelSize,
    /// Row stride in 64-bit words.
    pub line: u16,
    /// Texture memory address in 64-bit words.
    pub tmem: u16,
    pub tile: u8,
    pub palette: u8,
    pub address_t: TileAddress,
    pub mask_t: u8,
    pub shift_t: u8,
    pub address_s: TileAddress,
    pub mask_s: u8,
    pub shift_s: u8,
}
