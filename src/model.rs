//! Per-window record: a managed client alongside its frame, its header, and
//! the state needed to move between Normal and the non-Normal states.

use crate::backend::{Geometry, WindowId};

/// The five states a managed window can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    SnappedLeft,
    SnappedRight,
    Maximized,
    Fullscreen,
}

impl WindowState {
    /// Whether a window in this state is decorated (has a visible header).
    /// Only `Fullscreen` hides it.
    pub fn decorated(self) -> bool {
        self != WindowState::Fullscreen
    }
}

/// A single adopted client window, its frame, its header, and the state
/// needed to move between Normal and the non-Normal states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedWindow {
    pub client_id: WindowId,
    pub frame_id: WindowId,
    pub header_id: WindowId,
    pub geometry: Geometry,
    pub state: WindowState,
    pub saved_geometry: Geometry,
}

impl ManagedWindow {
    pub fn new(client_id: WindowId, frame_id: WindowId, header_id: WindowId, geometry: Geometry) -> Self {
        ManagedWindow {
            client_id,
            frame_id,
            header_id,
            geometry,
            state: WindowState::Normal,
            saved_geometry: geometry,
        }
    }

    /// Captures `geometry` into `saved_geometry`, but only from Normal.
    /// Guarding unconditionally on `Normal` — rather than only the first
    /// time a non-Normal state is entered — is what keeps a
    /// SnappedLeft→Maximized→Normal chain restoring to the geometry that
    /// was current before the *first* non-Normal transition.
    pub fn save_state(&mut self) {
        if self.state == WindowState::Normal {
            self.saved_geometry = self.geometry;
        }
    }

    /// Leaves whatever non-Normal state the window is in and restores the
    /// geometry captured by the last `save_state` call.
    pub fn restore_state(&mut self) {
        self.state = WindowState::Normal;
        self.geometry = self.saved_geometry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> ManagedWindow {
        ManagedWindow::new(
            WindowId(1),
            WindowId(2),
            WindowId(3),
            Geometry::new(100, 100, 800, 600),
        )
    }

    #[test]
    fn save_restore_round_trip() {
        let mut w = window();
        let original = w.geometry;
        w.save_state();
        w.state = WindowState::SnappedLeft;
        w.geometry = Geometry::new(0, 0, 960, 1080);
        w.restore_state();
        assert_eq!(w.state, WindowState::Normal);
        assert_eq!(w.geometry, original);
        assert_eq!(w.saved_geometry, original);
    }

    #[test]
    fn save_state_is_guarded_by_normal() {
        let mut w = window();
        let original = w.geometry;
        w.save_state();
        w.state = WindowState::SnappedLeft;
        w.geometry = Geometry::new(0, 0, 960, 1080);

        // a second save_state call (as happens crossing SnappedLeft -> Maximized)
        // must not clobber the geometry saved from Normal.
        w.save_state();
        w.state = WindowState::Maximized;
        w.geometry = Geometry::new(0, 0, 1920, 1080);

        w.restore_state();
        assert_eq!(w.geometry, original);
    }
}
