/// Errors that can occur in the text rendering system.
///
/// The draw path itself never returns these: a rejected `submit` draws
/// nothing and logs the reason. They surface from font decoding, font
/// validation and configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// Glyph cell width is odd; 4-bit texels cannot be loaded as bytes.
    OddGlyphWidth { width: u8 },

    /// Glyph cell has a zero dimension.
    EmptyGlyphCell { width: u8, height: u8 },

    /// Filter mode word is not one of the known modes.
    InvalidFilterMode(u32),

    /// Asset data ended before the expected length.
    TruncatedAsset { expected: usize, actual: usize },

    /// A segmented reference could not be resolved by the host.
    UnresolvedReference { address: u32 },

    /// Renderer configuration is out of range.
    InvalidConfig(String),
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::OddGlyphWidth { width } => {
                write!(f, "Glyph width must be even, got {}", width)
            }
            TextError::EmptyGlyphCell { width, height } => {
                write!(f, "Glyph cell must be non-empty, got {}x{}", width, height)
            }
            TextError::InvalidFilterMode(raw) => write!(f, "Invalid filter mode: {}", raw),
            TextError::TruncatedAsset { expected, actual } => write!(
                f,
                "Font asset truncated: expected {} bytes, got {}",
                expected, actual
            ),
            TextError::UnresolvedReference { address } => {
                write!(f, "Unresolved segmented reference: {:#010x}", address)
            }
            TextError::InvalidConfig(msg) => write!(f, "Invalid renderer config: {}", msg),
        }
    }
}

impl std::error::Error for TextError {}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
