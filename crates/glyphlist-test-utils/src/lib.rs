//! Test utilities for the glyphlist crates.
//!
//! - [`MockCommandSink`] records every command appended to it and offers
//!   counting helpers for assertions (requires the `mock` feature)
//! - [`fixtures`] builds texel buffers for glyph textures
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use glyphlist_gfx::{Command, CommandSink};
//! use glyphlist_test_utils::MockCommandSink;
//!
//! let mut sink = MockCommandSink::new();
//! sink.push(Command::PipeSync);
//!
//! assert_eq!(sink.call_count(), 1);
//! # }
//! ```
//!
//! The mock uses interior mutability so it can be shared behind an `Arc`
//! and inspected while a renderer still holds a handle to it.

pub mod fixtures;
#[cfg(feature = "mock")]
pub mod mock_sink;

#[cfg(feature = "mock")]
pub use mock_sink::*;
