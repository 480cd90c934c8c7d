/// An RGBA color with 8-bit components, as loaded into the env-color register.
///
/// ```
/// use glyphlist_gfx::Color;
///
/// let red = Color::rgb(255, 0, 0);
/// let half = Color::rgba(255, 255, 255, 128);
/// let from_hex = Color::from_hex(0xFF8800);
/// assert_eq!(from_hex.g, 0x88);
/// ```
///
/// The struct is `#[repr(C)]` and implements `bytemuck::Pod`, so its bytes
/// match the packed RGBA word the hardware expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Create a color from a 32-bit RGBA hex value (e.g. `0xFF880080`).
    pub const fn from_hex_alpha(hex: u32) -> Self {
        Self::rgba((hex >> 24) as u8, (hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Create a color from normalized float components, clamping to `0.0..=1.0`.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(q(r), q(g), q(b), q(a))
    }

    /// The packed `0xRRGGBBAA` word.
    pub const fn to_word(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from(arr: [u8; 4]) -> Self {
        Self::rgba(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

static_assertions::assert_eq_size!(Color, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip_word() {
        let c = Color::from_hex_alpha(0x12345678);
        assert_eq!(c, Color::rgba(0x12, 0x34, 0x56, 0x78));
        assert_eq!(c.to_word(), 0x12345678);
    }

    #[test]
    fn test_from_f32_clamps() {
        let c = Color::from_f32(2.0, -1.0, 0.5, 1.0);
        assert_eq!(c, Color::rgba(255, 0, 128, 255));
    }

    #[test]
    fn test_bytes_are_rgba_order() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(bytemuck::bytes_of(&c), &[1, 2, 3, 4]);
    }
}
