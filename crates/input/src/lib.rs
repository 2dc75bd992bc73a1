//! Input handling for the cube viewer.
//!
//! Raw window events are translated into [`InputEvent`]s by the embedding
//! application, queued on the [`InputController`], and drained into the
//! view state once per frame. Draining in arrival order keeps the
//! last-write-wins behavior of single-threaded event handling even if the
//! host delivers events from another thread.
//!
//! # Invariants
//! - Rotation accumulates only between pointer-down and pointer-up.
//! - Zoom and pan are unbounded; no clamping anywhere.

mod controller;
mod event;

pub use controller::{
    DRAG_RADIANS_PER_PIXEL, InputController, PAN_STEP, ZOOM_PER_WHEEL_UNIT,
};
pub use event::{InputEvent, PanDirection};
