//! wgpu render backend for the cube viewer.
//!
//! Compiles the shader pair once at startup, owns the three GPU buffers
//! (positions, colors, indices), and issues one indexed draw per frame.
//!
//! # Invariants
//! - The renderer never mutates view state; it only reads it per frame.
//! - Position and index buffers are written once; only the color buffer is
//!   ever rewritten, and always wholesale.

mod gpu;
mod shaders;

pub use gpu::CubeRenderer;
