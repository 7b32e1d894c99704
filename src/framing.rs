//! Reparenting/framing protocol: turning a bare client window into a framed,
//! decorated, managed window, and reconfiguring it afterwards.

use crate::backend::{ConfigureRequest, DisplayBackend, EventMask, Geometry, WindowId};
use crate::config::Config;
use crate::model::ManagedWindow;

/// Frames a newly mapped client and returns its `ManagedWindow` record. The
/// caller is responsible for inserting it into the current workspace and
/// focusing it, since that needs workspace access this module doesn't have.
///
/// `client` is queried for its current geometry; if that fails the caller
/// should drop the map-request entirely, so this returns `None` rather than
/// a default geometry.
pub fn frame_client<B: DisplayBackend>(
    backend: &mut B,
    root: WindowId,
    config: &Config,
    client: WindowId,
) -> Option<ManagedWindow> {
    let client_geom = backend.query_geometry(client).ok()?;

    let frame_x = client_geom.x;
    let frame_y = (client_geom.y - config.header_size as i32).max(0);
    let frame_geom = Geometry::new(
        frame_x,
        frame_y,
        client_geom.w,
        client_geom.h + config.header_size,
    );

    let frame = backend.create_frame(
        root,
        frame_geom,
        config.border_size,
        config.colors.unfocused_border,
        EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
    );

    let header = backend.create_header(
        frame,
        frame_geom.w,
        config.header_size,
        config.colors.unfocused_header,
        EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE | EventMask::BUTTON1_MOTION,
    );

    backend.reparent(client, frame, 0, config.header_size as i32);

    backend.map(frame);
    backend.map(header);
    backend.map(client);
    backend.flush();

    Some(ManagedWindow::new(client, frame, header, frame_geom))
}

/// Reconfigures an already-framed window to `geom`, decorated per
/// `show_decorations`. The frame is always resized to `geom`; the
/// header is shown/placed or hidden, and the client is placed to fill
/// whatever's left of the frame.
pub fn apply_geometry<B: DisplayBackend>(
    backend: &mut B,
    window: &mut ManagedWindow,
    config: &Config,
    geom: Geometry,
    show_decorations: bool,
) {
    let border_width = if show_decorations { config.border_size } else { 0 };
    backend.configure(window.frame_id, ConfigureRequest::geometry(geom, border_width));

    if show_decorations {
        backend.map(window.header_id);
        backend.configure(
            window.header_id,
            ConfigureRequest::geometry(Geometry::new(0, 0, geom.w, config.header_size), 0),
        );
        let client_w = geom.w.saturating_sub(2 * config.border_size);
        let client_h = geom
            .h
            .saturating_sub(config.header_size + 2 * config.border_size);
        backend.configure(
            client_of(window),
            ConfigureRequest::geometry(
                Geometry::new(0, config.header_size as i32, client_w, client_h),
                0,
            ),
        );
    } else {
        backend.unmap(window.header_id);
        backend.configure(
            client_of(window),
            ConfigureRequest::geometry(Geometry::new(0, 0, geom.w, geom.h), 0),
        );
    }

    window.geometry = geom;
    backend.flush();
}

fn client_of(window: &ManagedWindow) -> WindowId {
    window.client_id
}

/// Translates only the frame, leaving header/client coordinates (which are
/// relative to it) untouched — used by the MOVE command, which unlike
/// RESIZE never goes through `apply_geometry`.
pub fn translate_frame<B: DisplayBackend>(
    backend: &mut B,
    window: &mut ManagedWindow,
    dx: i32,
    dy: i32,
) {
    let new_x = window.geometry.x + dx;
    let new_y = window.geometry.y + dy;
    backend.configure(window.frame_id, ConfigureRequest::position(new_x, new_y));
    window.geometry.x = new_x;
    window.geometry.y = new_y;
    backend.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{Call, MockBackend};

    #[test]
    fn s1_frame_on_map() {
        let mut backend = MockBackend::new();
        let root = backend.root();
        let client = WindowId(42);
        backend.set_geometry(client, Geometry::new(10, 5, 300, 200));
        let config = Config::default();

        let window = frame_client(&mut backend, root, &config, client).unwrap();

        assert_eq!(window.geometry, Geometry::new(10, 0, 300, 220));
        assert_eq!(window.client_id, client);

        assert_eq!(backend.count(|c| matches!(c, Call::CreateFrame { .. })), 1);
        assert_eq!(backend.count(|c| matches!(c, Call::CreateHeader { .. })), 1);
        assert_eq!(backend.count(|c| matches!(c, Call::Reparent { .. })), 1);

        let maps: Vec<WindowId> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Map(w) => Some(*w),
                _ => None,
            })
            .collect();
        assert_eq!(maps, vec![window.frame_id, window.header_id, client]);

        match backend.calls.iter().find(|c| matches!(c, Call::Reparent { .. })) {
            Some(Call::Reparent { x, y, .. }) => {
                assert_eq!(*x, 0);
                assert_eq!(*y, 20);
            }
            _ => panic!("expected a reparent call"),
        }
    }

    #[test]
    fn frame_is_dropped_when_geometry_query_fails() {
        let mut backend = MockBackend::new();
        let root = backend.root();
        let config = Config::default();
        assert!(frame_client(&mut backend, root, &config, WindowId(99)).is_none());
    }

    #[test]
    fn apply_geometry_hides_header_when_undecorated() {
        let mut backend = MockBackend::new();
        let root = backend.root();
        let client = WindowId(42);
        backend.set_geometry(client, Geometry::new(10, 5, 300, 200));
        let config = Config::default();
        let mut window = frame_client(&mut backend, root, &config, client).unwrap();

        apply_geometry(&mut backend, &mut window, &config, Geometry::new(0, 0, 1920, 1080), false);

        assert!(!backend.is_mapped(window.header_id));
        assert_eq!(window.geometry, Geometry::new(0, 0, 1920, 1080));
    }

    #[test]
    fn translate_frame_moves_only_the_frame() {
        let mut backend = MockBackend::new();
        let root = backend.root();
        let client = WindowId(42);
        backend.set_geometry(client, Geometry::new(10, 5, 300, 200));
        let config = Config::default();
        let mut window = frame_client(&mut backend, root, &config, client).unwrap();

        translate_frame(&mut backend, &mut window, 30, 5);
        assert_eq!(window.geometry.x, 40);
        assert_eq!(window.geometry.y, 5);
    }
}
