//! Display backend adapter.
//!
//! Everything the event-loop core needs from the display server is expressed
//! through [`DisplayBackend`]. The real implementation ([`xlib::XlibBackend`])
//! is the only part of the crate that touches the wire; the `testing`
//! feature additionally exposes [`mock::MockBackend`] so the rest of the
//! crate can be driven deterministically in tests.

pub mod xlib;

#[cfg(feature = "testing")]
pub mod mock;

use crate::error::BackendError;
use std::fmt;

/// Raw server-assigned identifier for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// An interned command atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom(pub u64);

/// 24-bit RGB color, as sent to `change_background` / `change_border`.
pub type Color = u32;

/// Position and size of a window in root coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Geometry { x, y, w, h }
    }
}

/// Logical screen size, obtained once at connect time (single-screen only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
}

/// Everything `connect` hands back: the root window and the screen it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub root: WindowId,
    pub screen: ScreenInfo,
}

bitflags::bitflags! {
    /// Event-selection mask, passed to `select_input`/`create_frame`/`create_header`.
    pub struct EventMask: u32 {
        const SUBSTRUCTURE_REDIRECT = 1 << 0;
        const SUBSTRUCTURE_NOTIFY   = 1 << 1;
        const BUTTON_PRESS          = 1 << 2;
        const BUTTON_RELEASE        = 1 << 3;
        const BUTTON1_MOTION        = 1 << 4;
    }
}

/// Stacking order directive for `configure`'s `stack_mode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackMode {
    Above,
    Below,
}

/// Sparse configure request: only the fields present are applied, mirroring
/// the X11 `ConfigureWindow` value-mask convention so pass-through from a
/// `ConfigureRequest` event costs nothing beyond copying the fields the
/// client actually asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigureRequest {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<u32>,
    pub h: Option<u32>,
    pub border_width: Option<u32>,
    pub sibling: Option<WindowId>,
    pub stack_mode: Option<StackMode>,
}

impl ConfigureRequest {
    pub fn position(x: i32, y: i32) -> Self {
        ConfigureRequest {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn geometry(geom: Geometry, border_width: u32) -> Self {
        ConfigureRequest {
            x: Some(geom.x),
            y: Some(geom.y),
            w: Some(geom.w),
            h: Some(geom.h),
            border_width: Some(border_width),
            ..Default::default()
        }
    }

    pub fn raise() -> Self {
        ConfigureRequest {
            stack_mode: Some(StackMode::Above),
            ..Default::default()
        }
    }
}

/// Events the core event loop understands. Anything the backend can't map to
/// one of these variants becomes `Other`, which the loop logs and ignores,
/// matching the spec's "any other event is logged and ignored" rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    MapRequest {
        window: WindowId,
    },
    ConfigureRequest {
        window: WindowId,
        request: ConfigureRequest,
    },
    DestroyNotify {
        window: WindowId,
    },
    CreateNotify {
        window: WindowId,
    },
    EnterNotify {
        window: WindowId,
    },
    LeaveNotify {
        window: WindowId,
    },
    ButtonPress {
        event_window: WindowId,
        child: Option<WindowId>,
        button: u8,
        root_x: i32,
        root_y: i32,
    },
    ButtonRelease {
        event_window: WindowId,
        button: u8,
    },
    MotionNotify {
        root_x: i32,
        root_y: i32,
    },
    ClientMessage {
        window: WindowId,
        message_type: Atom,
        data: [i32; 5],
    },
    /// Anything not named above (UnmapNotify, MappingNotify, ...).
    Other,
}

/// Synchronous façade over the display server. All operations buffer
/// until `flush`; the core never touches the wire directly.
pub trait DisplayBackend {
    fn connect(&mut self) -> Result<Connection, BackendError>;
    fn intern_atom(&mut self, name: &str) -> Result<Atom, BackendError>;

    fn select_input(&mut self, window: WindowId, mask: EventMask);
    fn grab_button(&mut self, root: WindowId, button: u8, modifiers: u32);

    fn create_frame(
        &mut self,
        parent: WindowId,
        geometry: Geometry,
        border_width: u32,
        border_color: Color,
        event_mask: EventMask,
    ) -> WindowId;
    fn create_header(
        &mut self,
        frame: WindowId,
        width: u32,
        height: u32,
        back_color: Color,
        event_mask: EventMask,
    ) -> WindowId;

    fn reparent(&mut self, client: WindowId, new_parent: WindowId, x: i32, y: i32);
    fn configure(&mut self, window: WindowId, request: ConfigureRequest);

    fn map(&mut self, window: WindowId);
    fn unmap(&mut self, window: WindowId);
    fn destroy(&mut self, window: WindowId);

    fn change_background(&mut self, window: WindowId, color: Color);
    fn change_border(&mut self, window: WindowId, color: Color);
    fn clear_area(&mut self, window: WindowId);

    fn kill_client(&mut self, window: WindowId);
    fn send_client_message(&mut self, target: WindowId, message_type: Atom, data: [i32; 5]);

    /// Replays a synchronously-grabbed button press to the client beneath it.
    fn replay_pointer(&mut self);

    fn query_geometry(&mut self, window: WindowId) -> Result<Geometry, BackendError>;

    fn flush(&mut self);

    /// Blocks for the next event. `None` means the connection to the display
    /// server was lost.
    fn wait_event(&mut self) -> Option<Event>;
}
