//! Drag state machine. A ButtonPress on a window's header starts a
//! drag; MotionNotify events reposition the frame relative to where the
//! drag began; any ButtonRelease ends it.

use crate::backend::{ConfigureRequest, DisplayBackend, WindowId};

/// Pointer position in root coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Idle, or dragging a specific window from a recorded origin/press point.
/// `target` is a `client_id`, resolved by the caller at point of use —
/// this type never holds a reference into the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        target: WindowId,
        origin: Point,
        press: Point,
    },
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

impl DragState {
    /// Starts a drag of `target`, whose frame currently sits at `origin`,
    /// triggered by a press at `press`.
    pub fn begin(target: WindowId, origin: Point, press: Point) -> Self {
        DragState::Dragging {
            target,
            origin,
            press,
        }
    }

    pub fn target(&self) -> Option<WindowId> {
        match self {
            DragState::Dragging { target, .. } => Some(*target),
            DragState::Idle => None,
        }
    }

    /// Computes the frame's new position for a MotionNotify at `root_pos`
    /// and issues the corresponding `configure` call on `target`'s frame,
    /// then returns the new (x, y) so the caller can update the
    /// `ManagedWindow` record. The delta is always taken against `origin`
    /// and `press` — never against the previous motion event — so repeated
    /// motion events don't accumulate error.
    pub fn motion<B: DisplayBackend>(&self, backend: &mut B, frame: WindowId, root_x: i32, root_y: i32) -> Option<(i32, i32)> {
        match self {
            DragState::Dragging { origin, press, .. } => {
                let dx = root_x - press.x;
                let dy = root_y - press.y;
                let new_x = origin.x + dx;
                let new_y = origin.y + dy;
                backend.configure(frame, ConfigureRequest::position(new_x, new_y));
                backend.flush();
                Some((new_x, new_y))
            }
            DragState::Idle => None,
        }
    }

    /// Ends the drag unconditionally, on any ButtonRelease.
    pub fn end(&mut self) {
        *self = DragState::Idle;
    }
}
