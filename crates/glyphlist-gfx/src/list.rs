//! Command sinks.

use crate::command::Command;

/// An append-only destination for display-list commands.
///
/// The renderer only appends and never reads back. Implementations must
/// preserve order.
pub trait CommandSink {
    /// Append one command.
    fn push(&mut self, command: Command);

    /// Append several commands in order.
    fn extend_commands<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = Command>,
        Self: Sized,
    {
        for command in commands {
            self.push(command);
        }
    }
}

impl CommandSink for Vec<Command> {
    fn push(&mut self, command: Command) {
        Vec::push(self, command);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn push(&mut self, command: Command) {
        (**self).push(command);
    }
}

/// A growable display list for one frame.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    commands: Vec<Command>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Discard all commands, keeping the allocation for the next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Finalize the frame's list and hand the commands to the host.
    pub fn finish(self) -> Vec<Command> {
        tracing::trace!("Display list finished with {} commands", self.commands.len());
        self.commands
    }
}

impl CommandSink for DisplayList {
    fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
