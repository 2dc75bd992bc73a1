use crate::event::{InputEvent, PanDirection};
use cubeview_view::ViewState;
use std::collections::VecDeque;

/// Radians of rotation per pixel of pointer drag.
pub const DRAG_RADIANS_PER_PIXEL: f32 = 0.01;
/// Zoom units per unit of vertical wheel delta.
pub const ZOOM_PER_WHEEL_UNIT: f32 = 0.01;
/// Translation units per arrow-key press.
pub const PAN_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { last_x: f32, last_y: f32 },
}

/// Queues view-manipulation events and applies them to the view state.
///
/// Events arrive from window-event callbacks via [`push`](Self::push) and
/// are drained once per frame by the render loop. A pointer move while no
/// drag is in progress is a no-op.
#[derive(Debug)]
pub struct InputController {
    drag: DragState,
    queue: VecDeque<InputEvent>,
}

impl InputController {
    pub fn new() -> Self {
        Self {
            drag: DragState::Idle,
            queue: VecDeque::new(),
        }
    }

    /// Enqueues an event for the next frame's drain.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Applies all queued events to `view` in arrival order.
    pub fn drain(&mut self, view: &mut ViewState) {
        while let Some(event) = self.queue.pop_front() {
            self.apply(event, view);
        }
    }

    /// Applies a single event immediately.
    pub fn apply(&mut self, event: InputEvent, view: &mut ViewState) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.drag = DragState::Dragging { last_x: x, last_y: y };
            }
            InputEvent::PointerMove { x, y } => {
                if let DragState::Dragging { last_x, last_y } = self.drag {
                    let dx = x - last_x;
                    let dy = y - last_y;
                    view.rotation_y += dx * DRAG_RADIANS_PER_PIXEL;
                    view.rotation_x += dy * DRAG_RADIANS_PER_PIXEL;
                    self.drag = DragState::Dragging { last_x: x, last_y: y };
                    tracing::trace!(
                        rotation_x = view.rotation_x,
                        rotation_y = view.rotation_y,
                        "drag rotate"
                    );
                }
            }
            InputEvent::PointerUp => {
                self.drag = DragState::Idle;
            }
            InputEvent::Wheel { delta_y } => {
                view.zoom += delta_y * ZOOM_PER_WHEEL_UNIT;
            }
            InputEvent::Pan(direction) => match direction {
                PanDirection::Up => view.translation_y += PAN_STEP,
                PanDirection::Down => view.translation_y -= PAN_STEP,
                PanDirection::Left => view.translation_x -= PAN_STEP,
                PanDirection::Right => view.translation_x += PAN_STEP,
            },
        }
    }

    /// True while a pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(
        ctl: &mut InputController,
        view: &mut ViewState,
        path: &[(f32, f32)],
    ) {
        let (x0, y0) = path[0];
        ctl.apply(InputEvent::PointerDown { x: x0, y: y0 }, view);
        for &(x, y) in &path[1..] {
            ctl.apply(InputEvent::PointerMove { x, y }, view);
        }
        ctl.apply(InputEvent::PointerUp, view);
    }

    #[test]
    fn rotation_accumulates_total_drag_distance() {
        // The same drag split into different step counts lands on the same
        // rotation.
        let mut coarse = ViewState::default();
        let mut fine = ViewState::default();
        let mut ctl = InputController::new();

        drag(&mut ctl, &mut coarse, &[(0.0, 0.0), (40.0, 20.0)]);
        drag(
            &mut ctl,
            &mut fine,
            &[(0.0, 0.0), (10.0, 5.0), (25.0, 12.0), (40.0, 20.0)],
        );

        assert!((coarse.rotation_y - 0.4).abs() < 1e-5);
        assert!((coarse.rotation_x - 0.2).abs() < 1e-5);
        assert!((fine.rotation_y - coarse.rotation_y).abs() < 1e-5);
        assert!((fine.rotation_x - coarse.rotation_x).abs() < 1e-5);
    }

    #[test]
    fn pointer_up_halts_rotation_instantly() {
        let mut view = ViewState::default();
        let mut ctl = InputController::new();

        drag(&mut ctl, &mut view, &[(0.0, 0.0), (10.0, 0.0)]);
        let after_drag = view;

        // Moves with no intervening pointer-down change nothing.
        ctl.apply(InputEvent::PointerMove { x: 500.0, y: 500.0 }, &mut view);
        assert_eq!(view, after_drag);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn move_before_any_down_is_a_no_op() {
        let mut view = ViewState::default();
        let mut ctl = InputController::new();
        ctl.apply(InputEvent::PointerMove { x: 42.0, y: 7.0 }, &mut view);
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn wheel_zoom_sums_independent_deltas() {
        let mut view = ViewState::default();
        let mut ctl = InputController::new();

        ctl.apply(InputEvent::Wheel { delta_y: 120.0 }, &mut view);
        assert!((view.zoom - (-6.0 + 1.2)).abs() < 1e-6);

        // Order of independent wheel events only matters by sum.
        let mut reordered = ViewState::default();
        for d in [-30.0, 120.0, 30.0] {
            ctl.apply(InputEvent::Wheel { delta_y: d }, &mut reordered);
        }
        assert!((reordered.zoom - (-6.0 + 1.2)).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_unbounded_in_both_directions() {
        let mut view = ViewState::default();
        let mut ctl = InputController::new();
        ctl.apply(InputEvent::Wheel { delta_y: 100_000.0 }, &mut view);
        assert!(view.zoom > 900.0);
        ctl.apply(InputEvent::Wheel { delta_y: -300_000.0 }, &mut view);
        assert!(view.zoom < -1_000.0);
    }

    #[test]
    fn arrow_keys_pan_in_fixed_steps() {
        let mut view = ViewState::default();
        let mut ctl = InputController::new();

        ctl.apply(InputEvent::Pan(PanDirection::Right), &mut view);
        assert!((view.translation_x - 0.1).abs() < 1e-6);
        ctl.apply(InputEvent::Pan(PanDirection::Left), &mut view);
        ctl.apply(InputEvent::Pan(PanDirection::Left), &mut view);
        assert!((view.translation_x + 0.1).abs() < 1e-6);

        ctl.apply(InputEvent::Pan(PanDirection::Up), &mut view);
        assert!((view.translation_y - 0.1).abs() < 1e-6);
        ctl.apply(InputEvent::Pan(PanDirection::Down), &mut view);
        assert!(view.translation_y.abs() < 1e-6);
    }

    #[test]
    fn drain_applies_queued_events_in_arrival_order() {
        let mut view = ViewState::default();
        let mut ctl = InputController::new();

        ctl.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        ctl.push(InputEvent::PointerMove { x: 10.0, y: 0.0 });
        ctl.push(InputEvent::PointerUp);
        // This move arrives after the up and must not rotate.
        ctl.push(InputEvent::PointerMove { x: 90.0, y: 90.0 });
        ctl.push(InputEvent::Wheel { delta_y: 50.0 });

        ctl.drain(&mut view);
        assert!((view.rotation_y - 0.1).abs() < 1e-6);
        assert_eq!(view.rotation_x, 0.0);
        assert!((view.zoom - (-5.5)).abs() < 1e-6);
        assert!(!ctl.is_dragging());

        // Queue is empty afterwards; a second drain changes nothing.
        let before = view;
        ctl.drain(&mut view);
        assert_eq!(view, before);
    }

    #[test]
    fn drag_wheel_and_arrow_scenario_from_start_state() {
        let mut view = ViewState::default();
        let mut ctl = InputController::new();

        drag(&mut ctl, &mut view, &[(100.0, 100.0), (130.0, 115.0)]);
        assert!((view.rotation_y - 0.30).abs() < 1e-5);
        assert!((view.rotation_x - 0.15).abs() < 1e-5);

        ctl.apply(InputEvent::Wheel { delta_y: 50.0 }, &mut view);
        assert!((view.zoom - (-5.5)).abs() < 1e-5);

        ctl.apply(InputEvent::Pan(PanDirection::Up), &mut view);
        assert!((view.translation_y - 0.1).abs() < 1e-5);
    }
}
