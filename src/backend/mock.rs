//! Scripted in-memory backend used by tests. Records every call it receives
//! and lets a test feed back canned geometry query results and a queue of
//! events, so the rest of the crate can be exercised without a live display
//! server.

use std::collections::{HashMap, VecDeque};

use super::{
    Color, Connection, ConfigureRequest, DisplayBackend, Event, EventMask, Geometry, ScreenInfo,
    WindowId,
};
use crate::error::BackendError;

/// One recorded call to the backend, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect,
    InternAtom(String),
    SelectInput(WindowId, EventMask),
    GrabButton(WindowId, u8, u32),
    CreateFrame {
        parent: WindowId,
        geometry: Geometry,
        border_width: u32,
        border_color: Color,
    },
    CreateHeader {
        frame: WindowId,
        width: u32,
        height: u32,
        back_color: Color,
    },
    Reparent {
        client: WindowId,
        new_parent: WindowId,
        x: i32,
        y: i32,
    },
    Configure(WindowId, ConfigureRequest),
    Map(WindowId),
    Unmap(WindowId),
    Destroy(WindowId),
    ChangeBackground(WindowId, Color),
    ChangeBorder(WindowId, Color),
    ClearArea(WindowId),
    KillClient(WindowId),
    SendClientMessage {
        target: WindowId,
        data: [i32; 5],
    },
    ReplayPointer,
    QueryGeometry(WindowId),
    Flush,
}

/// A scriptable, fully in-memory [`DisplayBackend`]. `next_id` hands out
/// fresh identifiers for `create_frame`/`create_header` the same way a real
/// server allocates new window ids. Geometry queries and the event stream
/// are scripted ahead of time by the test via `set_geometry`/`push_event`.
#[derive(Debug)]
pub struct MockBackend {
    pub calls: Vec<Call>,
    next_id: u64,
    next_atom: u64,
    screen: ScreenInfo,
    root: WindowId,
    geometries: HashMap<WindowId, Geometry>,
    border_colors: HashMap<WindowId, Color>,
    background_colors: HashMap<WindowId, Color>,
    mapped: HashMap<WindowId, bool>,
    events: VecDeque<Event>,
    disconnected: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend {
            calls: Vec::new(),
            next_id: 100,
            next_atom: 1,
            screen: ScreenInfo {
                width: 1920,
                height: 1080,
            },
            root: WindowId(1),
            geometries: HashMap::new(),
            border_colors: HashMap::new(),
            background_colors: HashMap::new(),
            mapped: HashMap::new(),
            events: VecDeque::new(),
            disconnected: false,
        }
    }

    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen = ScreenInfo { width, height };
        self
    }

    pub fn root(&self) -> WindowId {
        self.root
    }

    /// Registers the geometry a subsequent `query_geometry(window)` call
    /// should return, exactly as if the window had been created with it.
    pub fn set_geometry(&mut self, window: WindowId, geometry: Geometry) {
        self.geometries.insert(window, geometry);
    }

    /// Queues an event to be returned by `wait_event`, in FIFO order.
    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Makes the next `wait_event` call (after any queued events drain)
    /// report a disconnect.
    pub fn disconnect(&mut self) {
        self.disconnected = true;
    }

    pub fn is_mapped(&self, window: WindowId) -> bool {
        *self.mapped.get(&window).unwrap_or(&false)
    }

    pub fn border_color(&self, window: WindowId) -> Option<Color> {
        self.border_colors.get(&window).copied()
    }

    pub fn background_color(&self, window: WindowId) -> Option<Color> {
        self.background_colors.get(&window).copied()
    }

    /// Count of calls matching `pred`, handy for bijection-style assertions
    /// ("exactly one frame-create").
    pub fn count<F: Fn(&Call) -> bool>(&self, pred: F) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    fn fresh_id(&mut self) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        WindowId(id)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        MockBackend::new()
    }
}

impl DisplayBackend for MockBackend {
    fn connect(&mut self) -> Result<Connection, BackendError> {
        self.calls.push(Call::Connect);
        Ok(Connection {
            root: self.root,
            screen: self.screen,
        })
    }

    fn intern_atom(&mut self, name: &str) -> Result<super::Atom, BackendError> {
        self.calls.push(Call::InternAtom(name.to_string()));
        let atom = self.next_atom;
        self.next_atom += 1;
        Ok(super::Atom(atom))
    }

    fn select_input(&mut self, window: WindowId, mask: EventMask) {
        self.calls.push(Call::SelectInput(window, mask));
    }

    fn grab_button(&mut self, root: WindowId, button: u8, modifiers: u32) {
        self.calls.push(Call::GrabButton(root, button, modifiers));
    }

    fn create_frame(
        &mut self,
        parent: WindowId,
        geometry: Geometry,
        border_width: u32,
        border_color: Color,
        _event_mask: EventMask,
    ) -> WindowId {
        let id = self.fresh_id();
        self.geometries.insert(id, geometry);
        self.border_colors.insert(id, border_color);
        self.calls.push(Call::CreateFrame {
            parent,
            geometry,
            border_width,
            border_color,
        });
        id
    }

    fn create_header(
        &mut self,
        frame: WindowId,
        width: u32,
        height: u32,
        back_color: Color,
        _event_mask: EventMask,
    ) -> WindowId {
        let id = self.fresh_id();
        self.background_colors.insert(id, back_color);
        self.calls.push(Call::CreateHeader {
            frame,
            width,
            height,
            back_color,
        });
        id
    }

    fn reparent(&mut self, client: WindowId, new_parent: WindowId, x: i32, y: i32) {
        self.calls.push(Call::Reparent {
            client,
            new_parent,
            x,
            y,
        });
    }

    fn configure(&mut self, window: WindowId, request: ConfigureRequest) {
        if let Some(geom) = self.geometries.get_mut(&window) {
            if let Some(x) = request.x {
                geom.x = x;
            }
            if let Some(y) = request.y {
                geom.y = y;
            }
            if let Some(w) = request.w {
                geom.w = w;
            }
            if let Some(h) = request.h {
                geom.h = h;
            }
        }
        self.calls.push(Call::Configure(window, request));
    }

    fn map(&mut self, window: WindowId) {
        self.mapped.insert(window, true);
        self.calls.push(Call::Map(window));
    }

    fn unmap(&mut self, window: WindowId) {
        self.mapped.insert(window, false);
        self.calls.push(Call::Unmap(window));
    }

    fn destroy(&mut self, window: WindowId) {
        self.calls.push(Call::Destroy(window));
    }

    fn change_background(&mut self, window: WindowId, color: Color) {
        self.background_colors.insert(window, color);
        self.calls.push(Call::ChangeBackground(window, color));
    }

    fn change_border(&mut self, window: WindowId, color: Color) {
        self.border_colors.insert(window, color);
        self.calls.push(Call::ChangeBorder(window, color));
    }

    fn clear_area(&mut self, window: WindowId) {
        self.calls.push(Call::ClearArea(window));
    }

    fn kill_client(&mut self, window: WindowId) {
        self.calls.push(Call::KillClient(window));
    }

    fn send_client_message(&mut self, target: WindowId, _message_type: super::Atom, data: [i32; 5]) {
        self.calls.push(Call::SendClientMessage { target, data });
    }

    fn replay_pointer(&mut self) {
        self.calls.push(Call::ReplayPointer);
    }

    fn query_geometry(&mut self, window: WindowId) -> Result<Geometry, BackendError> {
        self.calls.push(Call::QueryGeometry(window));
        self.geometries.get(&window).copied().ok_or(BackendError::QueryGeometry)
    }

    fn flush(&mut self) {
        self.calls.push(Call::Flush);
    }

    fn wait_event(&mut self) -> Option<Event> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }
        if self.disconnected {
            return None;
        }
        None
    }
}
