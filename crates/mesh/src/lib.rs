//! Cube geometry and vertex colors.
//!
//! # Invariants
//! - Positions and indices are fixed for the process lifetime.
//! - Colors are the only mutable channel and are always replaced wholesale.
//! - Every index references one of the 8 cube vertices.

mod color;
mod cube;

pub use color::{ColorParseError, Rgba};
pub use cube::{CubeMesh, Position};
