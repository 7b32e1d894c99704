//! Window-state toggles: snap-left, snap-right, maximize, fullscreen.

use crate::backend::{DisplayBackend, Geometry, ScreenInfo};
use crate::config::Config;
use crate::framing::apply_geometry;
use crate::model::{ManagedWindow, WindowState};

/// The four toggleable states, each mapped to a target rectangle and
/// decoration flag by `rect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    SnapLeft,
    SnapRight,
    Maximize,
    Fullscreen,
}

impl ToggleKind {
    fn target_state(self) -> WindowState {
        match self {
            ToggleKind::SnapLeft => WindowState::SnappedLeft,
            ToggleKind::SnapRight => WindowState::SnappedRight,
            ToggleKind::Maximize => WindowState::Maximized,
            ToggleKind::Fullscreen => WindowState::Fullscreen,
        }
    }

    fn rect(self, screen: ScreenInfo) -> Geometry {
        match self {
            ToggleKind::SnapLeft => Geometry::new(0, 0, screen.width / 2, screen.height),
            ToggleKind::SnapRight => {
                Geometry::new((screen.width / 2) as i32, 0, screen.width / 2, screen.height)
            }
            ToggleKind::Maximize | ToggleKind::Fullscreen => {
                Geometry::new(0, 0, screen.width, screen.height)
            }
        }
    }
}

/// Applies `kind` to `window`. If the window isn't already in the
/// target state: save, transition, and apply the target rectangle. If it
/// is: restore to Normal and apply the saved rectangle. Decoration follows
/// `WindowState::decorated` in both directions.
pub fn toggle<B: DisplayBackend>(
    backend: &mut B,
    window: &mut ManagedWindow,
    config: &Config,
    screen: ScreenInfo,
    kind: ToggleKind,
) {
    if window.state == kind.target_state() {
        window.restore_state();
        let decorated = window.state.decorated();
        let geom = window.geometry;
        apply_geometry(backend, window, config, geom, decorated);
    } else {
        window.save_state();
        window.state = kind.target_state();
        let decorated = window.state.decorated();
        let geom = kind.rect(screen);
        apply_geometry(backend, window, config, geom, decorated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::backend::WindowId;

    fn screen() -> ScreenInfo {
        ScreenInfo {
            width: 1920,
            height: 1080,
        }
    }

    #[test]
    fn s3_snap_left_round_trip() {
        let mut backend = MockBackend::new();
        let config = Config::default();
        let original = Geometry::new(100, 100, 800, 600);
        let mut window = ManagedWindow::new(WindowId(1), WindowId(2), WindowId(3), original);

        toggle(&mut backend, &mut window, &config, screen(), ToggleKind::SnapLeft);
        assert_eq!(window.state, WindowState::SnappedLeft);
        assert_eq!(window.saved_geometry, original);
        assert_eq!(window.geometry, Geometry::new(0, 0, 960, 1080));

        toggle(&mut backend, &mut window, &config, screen(), ToggleKind::SnapLeft);
        assert_eq!(window.state, WindowState::Normal);
        assert_eq!(window.geometry, original);
    }

    #[test]
    fn fullscreen_is_undecorated() {
        let mut backend = MockBackend::new();
        let config = Config::default();
        let mut window =
            ManagedWindow::new(WindowId(1), WindowId(2), WindowId(3), Geometry::new(0, 0, 800, 600));

        toggle(&mut backend, &mut window, &config, screen(), ToggleKind::Fullscreen);
        assert!(!backend.is_mapped(window.header_id));
    }

    #[test]
    fn crossing_between_non_normal_states_uses_stale_saved_geometry() {
        let mut backend = MockBackend::new();
        let config = Config::default();
        let original = Geometry::new(100, 100, 800, 600);
        let mut window = ManagedWindow::new(WindowId(1), WindowId(2), WindowId(3), original);

        toggle(&mut backend, &mut window, &config, screen(), ToggleKind::SnapLeft);
        toggle(&mut backend, &mut window, &config, screen(), ToggleKind::Maximize);
        assert_eq!(window.state, WindowState::Maximized);
        assert_eq!(window.saved_geometry, original);

        toggle(&mut backend, &mut window, &config, screen(), ToggleKind::Maximize);
        assert_eq!(window.state, WindowState::Normal);
        assert_eq!(window.geometry, original);
    }
}
