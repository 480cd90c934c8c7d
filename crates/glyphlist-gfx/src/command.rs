//! Display-list commands.
//!
//! Each variant corresponds to one hardware command word (or a fixed pair for
//! the texture-image and tile commands). Commands execute strictly in the
//! order they are appended, so state must always precede the geometry it
//! affects.

use bitflags::bitflags;

use crate::color::Color;
use crate::texture::{ImageFormat, TexelSize, TextureFilter, TextureRef, TileDescriptor};
use crate::vertex::Vertex;

bitflags! {
    /// Geometry-mode bits toggled by set/clear commands.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GeometryMode: u32 {
        const ZBUFFER = 1 << 0;
        const SHADE = 1 << 2;
        const CULL_BACK = 1 << 10;
        const FOG = 1 << 16;
        const LIGHTING = 1 << 17;
        const TEXTURE_GEN = 1 << 18;
    }
}

/// Color combiner presets used by the text pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Color from env, alpha = texel intensity × env alpha.
    TexelModulateEnv,
    /// Shade color with env alpha; the host's default 3D mode.
    ShadeEnvAlpha,
}

/// Blender presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Anti-aliased translucent surface, two-cycle.
    AntiAliasedTranslucent,
    /// Opaque surface, two-cycle.
    Opaque,
}

/// Which attribute of a loaded vertex a modify-vertex command patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexField {
    /// Screen-space x/y in fixed point, packed `x << 16 | y`.
    ScreenXY,
    /// Texture coordinates, packed `s << 16 | t`.
    TexCoords,
}

/// A single display-list command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Wait for the pipeline to drain before changing render state.
    PipeSync,
    SetGeometryMode(GeometryMode),
    ClearGeometryMode(GeometryMode),
    SetCombine(CombineMode),
    SetRenderMode(RenderMode),
    SetTextureFilter(TextureFilter),
    /// Enable or disable texturing with the given S/T scale.
    Texture {
        scale_s: u16,
        scale_t: u16,
        level: u8,
        tile: u8,
        on: bool,
    },
    /// Point the loader at a texel buffer.
    SetTextureImage {
        format: ImageFormat,
        size: TexelSize,
        width: u16,
        image: TextureRef,
    },
    SetTile(TileDescriptor),
    /// Copy a rectangle of the current texture image into texture memory.
    LoadTile {
        tile: u8,
        uls: u16,
        ult: u16,
        lrs: u16,
        lrt: u16,
    },
    SetTileSize {
        tile: u8,
        uls: u16,
        ult: u16,
        lrs: u16,
        lrt: u16,
    },
    /// Load `vertices` into the vertex buffer starting at slot `start`.
    LoadVertices {
        vertices: &'static [Vertex],
        start: u8,
    },
    /// Patch one attribute of an already loaded vertex.
    ModifyVertex {
        index: u8,
        field: VertexField,
        value: u32,
    },
    /// Rasterize two triangles from loaded vertex slots.
    Triangles2 { first: [u8; 3], second: [u8; 3] },
    SetEnvColor(Color),
}

impl Command {
    /// Whether this command changes render state rather than drawing.
    pub fn is_state(&self) -> bool {
        !matches!(
            self,
            Command::Triangles2 { .. } | Command::ModifyVertex { .. } | Command::LoadVertices { .. }
        )
    }

    /// The texture buffer this command loads from, if any.
    pub fn texture(&self) -> Option<&TextureRef> {
        match self {
            Command::SetTextureImage { image, .. } => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_classification() {
        assert!(Command::PipeSync.is_state());
        assert!(Command::SetEnvColor(Color::WHITE).is_state());
        assert!(
            !Command::Triangles2 {
                first: [0, 1, 2],
                second: [0, 2, 3]
            }
            .is_state()
        );
    }

    #[test]
    fn test_texture_accessor() {
        let tex = TextureRef::new(vec![0u8; 8]);
        let cmd = Command::SetTextureImage {
            format: ImageFormat::Intensity,
            size: TexelSize::Bits8,
            width: 4,
            image: tex.clone(),
        };
        assert_eq!(cmd.texture(), Some(&tex));
        assert_eq!(Command::PipeSync.texture(), None);
    }
}
