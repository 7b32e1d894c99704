//! End-to-end scenarios driving `WindowManager<MockBackend>` through a
//! scripted event sequence. Each test builds the backend's event
//! queue and geometry table up front, constructs the manager (which performs
//! its own connect/grab/intern_atom sequence against the same backend), then
//! runs it to completion by ending the queue with a disconnect.

use rswm::atoms::CommandKind;
use rswm::backend::mock::MockBackend;
use rswm::backend::{Event, Geometry, WindowId};
use rswm::config::Config;
use rswm::WindowManager;

fn client_message(atom: rswm::backend::Atom, window: WindowId, data: [i32; 5]) -> Event {
    Event::ClientMessage {
        window,
        message_type: atom,
        data,
    }
}

/// S1 — Frame on map: a MapRequest is framed, decorated and mapped in the
/// frame → header → client order, and becomes the focused window.
#[test]
fn s1_frame_on_map_end_to_end() {
    let mut backend = MockBackend::new();
    let client = WindowId(42);
    backend.set_geometry(client, Geometry::new(10, 5, 300, 200));
    backend.push_event(Event::MapRequest { window: client });
    backend.disconnect();

    let mut manager = WindowManager::new(backend, Config::default()).unwrap();
    manager.run();

    let workspace = manager.workspaces().current();
    let window = workspace.find(client).expect("client should be framed");
    assert_eq!(window.geometry, Geometry::new(10, 0, 300, 220));
    assert_eq!(workspace.focused_id(), Some(client));
    assert!(manager.backend().is_mapped(window.frame_id));
    assert!(manager.backend().is_mapped(window.header_id));
    assert!(manager.backend().is_mapped(client));
}

/// S2 — Drag: pressing a header and dragging moves the frame by the
/// press-to-motion delta, measured against the original press, not
/// cumulatively across motion events.
#[test]
fn s2_drag_moves_frame_by_delta() {
    let mut backend = MockBackend::new();
    let client = WindowId(42);
    backend.set_geometry(client, Geometry::new(10, 5, 300, 200));
    backend.push_event(Event::MapRequest { window: client });
    backend.disconnect();

    let mut manager = WindowManager::new(backend, Config::default()).unwrap();
    manager.run();

    let header_id = manager
        .workspaces()
        .current()
        .find(client)
        .unwrap()
        .header_id;

    manager.backend_mut().push_event(Event::ButtonPress {
        event_window: header_id,
        child: None,
        button: 1,
        root_x: 100,
        root_y: 50,
    });
    manager.backend_mut().push_event(Event::MotionNotify {
        root_x: 130,
        root_y: 55,
    });
    manager.backend_mut().disconnect();
    manager.run();

    let window = manager.workspaces().current().find(client).unwrap();
    assert_eq!((window.geometry.x, window.geometry.y), (40, 5));

    manager.backend_mut().push_event(Event::MotionNotify {
        root_x: 90,
        root_y: 50,
    });
    manager.backend_mut().disconnect();
    manager.run();

    let window = manager.workspaces().current().find(client).unwrap();
    assert_eq!((window.geometry.x, window.geometry.y), (0, 0));
}

/// S3 — Snap-left toggle round-trips back to the original geometry.
#[test]
fn s3_snap_left_round_trip() {
    let mut backend = MockBackend::new().with_screen(1920, 1080);
    let client = WindowId(42);
    backend.set_geometry(client, Geometry::new(100, 100, 800, 600));
    backend.push_event(Event::MapRequest { window: client });
    backend.disconnect();

    let mut manager = WindowManager::new(backend, Config::default()).unwrap();
    manager.run();

    let atom = manager.atoms().atom_for(CommandKind::SnapLeft).unwrap();

    manager
        .backend_mut()
        .push_event(client_message(atom, client, [0; 5]));
    manager.backend_mut().disconnect();
    manager.run();

    let window = manager.workspaces().current().find(client).unwrap();
    assert_eq!(window.geometry, Geometry::new(0, 0, 960, 1080));
    assert_eq!(window.saved_geometry, Geometry::new(100, 100, 800, 600));

    manager
        .backend_mut()
        .push_event(client_message(atom, client, [0; 5]));
    manager.backend_mut().disconnect();
    manager.run();

    let window = manager.workspaces().current().find(client).unwrap();
    assert_eq!(window.geometry, Geometry::new(100, 100, 800, 600));
}

/// S4 — Workspace swap: sending the focused window to another workspace
/// leaves the source with no focused window (removal never auto-picks
/// a replacement), and switching to the destination re-maps and re-focuses
/// the moved window there.
#[test]
fn s4_workspace_swap_preserves_identity_and_focus() {
    let mut backend = MockBackend::new();
    let a = WindowId(42);
    let b = WindowId(43);
    backend.set_geometry(a, Geometry::new(0, 0, 300, 200));
    backend.set_geometry(b, Geometry::new(0, 0, 300, 200));
    backend.push_event(Event::MapRequest { window: a });
    backend.push_event(Event::MapRequest { window: b });
    backend.disconnect();

    let mut manager = WindowManager::new(backend, Config::default()).unwrap();
    manager.run();

    // `b` was framed last and is focused; re-focus `a` to match S4's setup.
    manager.focus(a);

    let atom = manager
        .atoms()
        .atom_for(CommandKind::SendToWorkspace)
        .unwrap();
    manager
        .backend_mut()
        .push_event(client_message(atom, a, [1, 0, 0, 0, 0]));
    manager.backend_mut().disconnect();
    manager.run();

    // `remove` never auto-picks a replacement focus: workspace 0 is
    // left with no focused window, even though `b` is still present on it.
    assert_eq!(manager.workspaces().current().focused_id(), None);
    assert!(manager.workspaces().current().find(a).is_none());
    assert!(manager.workspaces().current().find(b).is_some());

    let switch_atom = manager
        .atoms()
        .atom_for(CommandKind::SwitchWorkspace)
        .unwrap();
    manager
        .backend_mut()
        .push_event(client_message(switch_atom, a, [1, 0, 0, 0, 0]));
    manager.backend_mut().disconnect();
    manager.run();

    assert_eq!(manager.workspaces().current_index(), 1);
    let moved = manager.workspaces().current().find(a).unwrap();
    assert_eq!(manager.workspaces().current().focused_id(), Some(a));
    assert!(manager.backend().is_mapped(moved.frame_id));
}

/// S5 — Focus cycle: FOCUS_NEXT/FOCUS_PREV walk the workspace in insertion
/// order and wrap around.
#[test]
fn s5_focus_cycle_wraps() {
    let mut backend = MockBackend::new();
    let w0 = WindowId(10);
    let w1 = WindowId(11);
    let w2 = WindowId(12);
    for w in [w0, w1, w2] {
        backend.set_geometry(w, Geometry::new(0, 0, 100, 100));
        backend.push_event(Event::MapRequest { window: w });
    }
    backend.disconnect();

    let mut manager = WindowManager::new(backend, Config::default()).unwrap();
    manager.run();

    manager.set_focused(Some(w1));

    let next = manager.atoms().atom_for(CommandKind::FocusNext).unwrap();
    let prev = manager.atoms().atom_for(CommandKind::FocusPrev).unwrap();

    manager.backend_mut().push_event(client_message(next, w1, [0; 5]));
    manager.backend_mut().disconnect();
    manager.run();
    assert_eq!(manager.workspaces().current().focused_id(), Some(w2));

    manager.backend_mut().push_event(client_message(next, w1, [0; 5]));
    manager.backend_mut().disconnect();
    manager.run();
    assert_eq!(manager.workspaces().current().focused_id(), Some(w0));

    manager.backend_mut().push_event(client_message(prev, w1, [0; 5]));
    manager.backend_mut().disconnect();
    manager.run();
    assert_eq!(manager.workspaces().current().focused_id(), Some(w2));
}

/// S6 — Kill: KILL targets the focused client's id, and the subsequent
/// DestroyNotify removes the record and destroys its frame and header.
#[test]
fn s6_kill_then_destroy_notify_removes_window() {
    let mut backend = MockBackend::new();
    let client = WindowId(42);
    backend.set_geometry(client, Geometry::new(0, 0, 300, 200));
    backend.push_event(Event::MapRequest { window: client });
    backend.disconnect();

    let mut manager = WindowManager::new(backend, Config::default()).unwrap();
    manager.run();

    let window = manager
        .workspaces()
        .current()
        .find(client)
        .unwrap()
        .clone();

    let kill_atom = manager.atoms().atom_for(CommandKind::Kill).unwrap();
    manager
        .backend_mut()
        .push_event(client_message(kill_atom, client, [0; 5]));
    manager
        .backend_mut()
        .push_event(Event::DestroyNotify { window: client });
    manager.backend_mut().disconnect();
    manager.run();

    assert!(manager
        .backend()
        .calls
        .iter()
        .any(|c| matches!(c, rswm::backend::mock::Call::KillClient(id) if *id == client)));
    assert!(manager.workspaces().current().find(client).is_none());
    assert!(manager
        .backend()
        .calls
        .iter()
        .any(|c| matches!(c, rswm::backend::mock::Call::Destroy(id) if *id == window.frame_id)));
    assert!(manager
        .backend()
        .calls
        .iter()
        .any(|c| matches!(c, rswm::backend::mock::Call::Destroy(id) if *id == window.header_id)));
}
