//! Recording implementation of [`CommandSink`] for tests.

use glyphlist_gfx::{Command, CommandSink, TextureRef, VertexField};
use parking_lot::Mutex;

/// Records appended commands for verification in tests.
///
/// # Interior Mutability
///
/// Inspection methods take `&self`, and the sink may be shared through an
/// `Arc`, so the recording lives behind a `parking_lot::Mutex`.
#[derive(Default)]
pub struct MockCommandSink {
    calls: Mutex<Vec<Command>>,
}

impl MockCommandSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command through a shared reference.
    pub fn record(&self, command: Command) {
        self.calls.lock().push(command);
    }

    /// Get a copy of all recorded commands.
    pub fn calls(&self) -> Vec<Command> {
        self.calls.lock().clone()
    }

    /// Total number of recorded commands.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear recorded commands (useful between frames).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Count commands matching a predicate.
    pub fn count_where(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    /// Number of set-texture-image commands (texture binds).
    pub fn count_texture_binds(&self) -> usize {
        self.count_where(|c| matches!(c, Command::SetTextureImage { .. }))
    }

    /// Number of binds of one specific texel buffer.
    pub fn count_binds_of(&self, texture: &TextureRef) -> usize {
        self.count_where(|c| c.texture() == Some(texture))
    }

    /// Number of load-tile commands.
    pub fn count_tile_loads(&self) -> usize {
        self.count_where(|c| matches!(c, Command::LoadTile { .. }))
    }

    /// Number of quads drawn.
    pub fn count_triangle_pairs(&self) -> usize {
        self.count_where(|c| matches!(c, Command::Triangles2 { .. }))
    }

    /// Number of texture-filter changes.
    pub fn count_filter_changes(&self) -> usize {
        self.count_where(|c| matches!(c, Command::SetTextureFilter(_)))
    }

    /// Number of env-color changes.
    pub fn count_env_colors(&self) -> usize {
        self.count_where(|c| matches!(c, Command::SetEnvColor(_)))
    }

    /// Screen-coordinate patch words in emission order.
    pub fn screen_patches(&self) -> Vec<(u8, u32)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                Command::ModifyVertex {
                    index,
                    field: VertexField::ScreenXY,
                    value,
                } => Some((*index, *value)),
                _ => None,
            })
            .collect()
    }

    /// Texel buffers in the order they were bound.
    pub fn bound_textures(&self) -> Vec<TextureRef> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| c.texture().cloned())
            .collect()
    }
}

impl CommandSink for MockCommandSink {
    fn push(&mut self, command: Command) {
        self.calls.get_mut().push(command);
    }
}

impl CommandSink for &MockCommandSink {
    fn push(&mut self, command: Command) {
        self.record(command);
    }
}
