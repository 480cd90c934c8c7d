/// Vector types used for layout anchors and pen positions.
///
/// Layout works in `f32` output units; these are the SIMD-backed `glam`
/// types so callers can do pen arithmetic directly.
///
/// ```
/// use glyphlist_core::math::Vec2;
///
/// let anchor = Vec2::new(160.0, 24.0);
/// let shadow = anchor + Vec2::new(1.0, 1.0);
/// assert_eq!(shadow.x, 161.0);
/// ```
pub use glam::{IVec2, Vec2};

/// Convert to the `mint` interchange type for hosts that use another math crate.
pub fn to_mint(v: Vec2) -> mint::Vector2<f32> {
    v.into()
}

/// Convert from the `mint` interchange type.
pub fn from_mint(v: mint::Vector2<f32>) -> Vec2 {
    v.into()
}
