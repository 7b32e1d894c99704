//! Single-threaded event-loop core. Owns every piece of mutable state
//! behind one context struct and drives it from whatever the backend hands
//! back from `wait_event`, one event at a time, to completion, with no
//! concurrent work spawned from inside a handler.

use log::{debug, error, info, trace};

use crate::atoms::AtomRegistry;
use crate::backend::{Connection, DisplayBackend, Event, EventMask, WindowId};
use crate::config::Config;
use crate::dispatch::{dispatch, ControlFlow};
use crate::drag::{DragState, Point};
use crate::error::WmError;
use crate::framing::frame_client;
use crate::workspace_set::WorkspaceSet;

/// Mouse button that triggers a drag when pressed on a header.
const DRAG_BUTTON: u8 = 1;

/// All state the manager needs, threaded explicitly through every handler
/// instead of living in globals.
pub struct WindowManager<B: DisplayBackend> {
    backend: B,
    connection: Connection,
    atoms: AtomRegistry,
    config: Config,
    workspaces: WorkspaceSet,
    drag: DragState,
}

impl<B: DisplayBackend> WindowManager<B> {
    /// Connects, selects the root event mask, grabs every button
    /// synchronously, and interns the command atoms. Any failure here is
    /// fatal.
    pub fn new(mut backend: B, config: Config) -> Result<Self, WmError> {
        let connection = backend.connect()?;
        backend.select_input(
            connection.root,
            EventMask::SUBSTRUCTURE_REDIRECT
                | EventMask::SUBSTRUCTURE_NOTIFY
                | EventMask::BUTTON_PRESS
                | EventMask::BUTTON_RELEASE,
        );
        backend.grab_button(connection.root, 0, 0);
        backend.flush();

        let atoms = AtomRegistry::intern_all(&mut backend)?;
        let workspaces = WorkspaceSet::new(config.max_workspaces);

        info!(
            "connected, root = {}, screen = {}x{}",
            connection.root, connection.screen.width, connection.screen.height
        );

        Ok(WindowManager {
            backend,
            connection,
            atoms,
            config,
            workspaces,
            drag: DragState::Idle,
        })
    }

    /// Blocks on `wait_event` and dispatches until QUIT or disconnect.
    /// Returns normally in both cases; `main` is responsible for
    /// the corresponding exit code.
    pub fn run(&mut self) {
        loop {
            let Some(event) = self.backend.wait_event() else {
                info!("display server disconnected, exiting");
                return;
            };
            if self.handle_event(event) == ControlFlow::Quit {
                info!("quit command received, exiting");
                return;
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> ControlFlow {
        trace!("event: {:?}", event);
        match event {
            Event::MapRequest { window } => {
                self.on_map_request(window);
            }
            Event::ConfigureRequest { window, request } => {
                self.backend.configure(window, request);
                self.backend.flush();
            }
            Event::DestroyNotify { window } => {
                self.on_destroy_notify(window);
            }
            Event::CreateNotify { window } => {
                debug!("create notify for {window}, ignored");
            }
            Event::EnterNotify { window } => {
                debug!("enter notify for {window}, ignored");
            }
            Event::LeaveNotify { window } => {
                debug!("leave notify for {window}, ignored");
            }
            Event::ButtonPress {
                event_window,
                child,
                button,
                root_x,
                root_y,
            } => {
                self.on_button_press(event_window, child, button, root_x, root_y);
            }
            Event::ButtonRelease { .. } => {
                self.drag.end();
            }
            Event::MotionNotify { root_x, root_y } => {
                self.on_motion_notify(root_x, root_y);
            }
            Event::ClientMessage {
                message_type, data, ..
            } => {
                return self.on_client_message(message_type, data);
            }
            Event::Other => {
                debug!("unhandled event kind, ignored");
            }
        }
        ControlFlow::Continue
    }

    /// Framing path: query geometry, build the frame/header, reparent
    /// and map, then register and focus the new window.
    fn on_map_request(&mut self, client: WindowId) {
        let Some(window) = frame_client(&mut self.backend, self.connection.root, &self.config, client) else {
            debug!("map request for {client} dropped: geometry query failed");
            return;
        };
        let client_id = window.client_id;
        debug!("framed {client} as frame {}", window.frame_id);
        self.workspaces.current_mut().insert(window);
        self.workspaces
            .current_mut()
            .focus(&mut self.backend, &self.config.colors, client_id);
    }

    fn on_destroy_notify(&mut self, window: WindowId) {
        if let Some(removed) = self.workspaces.remove_any(window) {
            debug!("destroying frame {} and header {}", removed.frame_id, removed.header_id);
            self.backend.destroy(removed.header_id);
            self.backend.destroy(removed.frame_id);
            self.backend.flush();
        }
    }

    /// Drives the drag state machine and the click-to-focus behavior.
    /// A press is always replayed so an ordinary client click still
    /// reaches the client underneath.
    fn on_button_press(&mut self, event_window: WindowId, child: Option<WindowId>, button: u8, root_x: i32, root_y: i32) {
        let probe = child.unwrap_or(event_window);
        let workspace = self.workspaces.current_mut();
        if let Some(window) = workspace.find(probe) {
            let client_id = window.client_id;
            let on_header = window.header_id == probe;
            let origin = Point {
                x: window.geometry.x,
                y: window.geometry.y,
            };
            workspace.focus(&mut self.backend, &self.config.colors, client_id);
            if on_header && button == DRAG_BUTTON {
                self.drag = DragState::begin(client_id, origin, Point { x: root_x, y: root_y });
            }
        }
        self.backend.replay_pointer();
    }

    fn on_motion_notify(&mut self, root_x: i32, root_y: i32) {
        let Some(target) = self.drag.target() else {
            return;
        };
        let Some(window) = self.workspaces.current_mut().find_mut(target) else {
            return;
        };
        let frame = window.frame_id;
        if let Some((x, y)) = self.drag.motion(&mut self.backend, frame, root_x, root_y) {
            window.geometry.x = x;
            window.geometry.y = y;
        }
    }

    fn on_client_message(&mut self, message_type: crate::backend::Atom, data: [i32; 5]) -> ControlFlow {
        let Some(kind) = self.atoms.lookup(message_type) else {
            debug!("unknown command atom {:?}, ignored", message_type);
            return ControlFlow::Continue;
        };
        dispatch(
            &mut self.backend,
            &mut self.workspaces,
            &self.config,
            self.connection.screen,
            kind,
            data,
        )
    }
}

/// Surfaces a fatal backend error the same way a disconnect or
/// construction failure would, for callers that only care about the
/// `log::error!` + propagate shape.
pub fn log_fatal(err: &WmError) {
    error!("{err}");
}

/// Accessors used by scripted-backend scenario tests to inspect the
/// manager's state after feeding it a sequence of events. Not needed by
/// `main`, so gated the same way `backend::mock` is.
#[cfg(feature = "testing")]
impl<B: DisplayBackend> WindowManager<B> {
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn workspaces(&self) -> &WorkspaceSet {
        &self.workspaces
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn atoms(&self) -> &AtomRegistry {
        &self.atoms
    }

    /// Sets the current workspace's focused window directly, without going
    /// through a ButtonPress, so scenario tests can establish a starting
    /// focus without scripting the click that would normally produce it.
    pub fn set_focused(&mut self, target: Option<WindowId>) {
        self.workspaces.current_mut().set_focused(target);
    }

    /// Focuses `target` the same way a click would, for tests that need the
    /// resulting decoration/raise side effects rather than a bare state set.
    pub fn focus(&mut self, target: WindowId) {
        let colors = self.config.colors;
        self.workspaces.current_mut().focus(&mut self.backend, &colors, target);
    }
}
