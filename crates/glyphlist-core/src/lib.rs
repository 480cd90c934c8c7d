//! Glyphlist Core
//!
//! Shared plumbing for the glyphlist crates: logging bootstrap, profiling
//! scopes and the math types used for anchor positions.

pub mod logging;
pub mod math;
pub mod profiling;
