/// Arrow-key pan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// A view-manipulation event, already stripped of windowing-library detail.
///
/// Pointer coordinates are in physical pixels; `Wheel` carries a vertical
/// delta in browser-style pixel units (positive scrolls the cube closer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Wheel { delta_y: f32 },
    Pan(PanDirection),
}
