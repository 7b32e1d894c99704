//! Real [`DisplayBackend`] implementation over raw Xlib. This is the only
//! module in the crate that touches the wire.

use libc::{c_int, c_long, c_uint, c_ulong};
use std::ffi::CString;
use x11::xlib;

use super::{
    Color, ConfigureRequest, Connection, DisplayBackend, Event, EventMask, Geometry, ScreenInfo,
    StackMode, WindowId,
};
use crate::error::BackendError;

type XWindow = xlib::Window;

fn to_xwindow(id: WindowId) -> XWindow {
    id.0 as XWindow
}

fn from_xwindow(w: XWindow) -> WindowId {
    WindowId(w as u64)
}

/// Xlib connection plus the root window it was opened against. Everything
/// the backend does is buffered by Xlib itself until `flush`, so it is
/// synchronous from the manager's perspective even though the wire
/// protocol is asynchronous.
pub struct XlibBackend {
    display: *mut xlib::Display,
    root: XWindow,
}

impl XlibBackend {
    /// Constructs the backend without opening a connection yet; `connect`
    /// issues the `XOpenDisplay` call.
    pub fn new() -> Self {
        XlibBackend {
            display: std::ptr::null_mut(),
            root: 0,
        }
    }

    fn configure_mask_and_values(request: &ConfigureRequest) -> (c_uint, xlib::XWindowChanges) {
        let mut mask: c_uint = 0;
        let mut changes: xlib::XWindowChanges = unsafe { std::mem::zeroed() };

        if let Some(x) = request.x {
            changes.x = x;
            mask |= xlib::CWX as c_uint;
        }
        if let Some(y) = request.y {
            changes.y = y;
            mask |= xlib::CWY as c_uint;
        }
        if let Some(w) = request.w {
            changes.width = w as c_int;
            mask |= xlib::CWWidth as c_uint;
        }
        if let Some(h) = request.h {
            changes.height = h as c_int;
            mask |= xlib::CWHeight as c_uint;
        }
        if let Some(bw) = request.border_width {
            changes.border_width = bw as c_int;
            mask |= xlib::CWBorderWidth as c_uint;
        }
        if let Some(sibling) = request.sibling {
            changes.sibling = to_xwindow(sibling);
            mask |= xlib::CWSibling as c_uint;
        }
        if let Some(stack_mode) = request.stack_mode {
            changes.stack_mode = match stack_mode {
                StackMode::Above => xlib::Above,
                StackMode::Below => xlib::Below,
            };
            mask |= xlib::CWStackMode as c_uint;
        }

        (mask, changes)
    }
}

impl Default for XlibBackend {
    fn default() -> Self {
        XlibBackend::new()
    }
}

impl DisplayBackend for XlibBackend {
    fn connect(&mut self) -> Result<Connection, BackendError> {
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            return Err(BackendError::Connect);
        }

        let screen_number = unsafe { xlib::XDefaultScreen(display) };
        let screen = unsafe { xlib::XScreenOfDisplay(display, screen_number) };
        if screen.is_null() {
            unsafe { xlib::XCloseDisplay(display) };
            return Err(BackendError::NoScreen);
        }

        let root = unsafe { xlib::XDefaultRootWindow(display) };
        let (width, height) = unsafe { ((*screen).width as u32, (*screen).height as u32) };

        self.display = display;
        self.root = root;

        Ok(Connection {
            root: from_xwindow(root),
            screen: ScreenInfo { width, height },
        })
    }

    fn intern_atom(&mut self, name: &str) -> Result<super::Atom, BackendError> {
        let c_name = CString::new(name).map_err(|_| BackendError::InternAtom(name.to_string()))?;
        let atom = unsafe { xlib::XInternAtom(self.display, c_name.as_ptr(), xlib::False) };
        if atom == 0 {
            return Err(BackendError::InternAtom(name.to_string()));
        }
        Ok(super::Atom(atom as u64))
    }

    fn select_input(&mut self, window: WindowId, mask: EventMask) {
        let mut xmask: c_long = 0;
        if mask.contains(EventMask::SUBSTRUCTURE_REDIRECT) {
            xmask |= xlib::SubstructureRedirectMask as c_long;
        }
        if mask.contains(EventMask::SUBSTRUCTURE_NOTIFY) {
            xmask |= xlib::SubstructureNotifyMask as c_long;
        }
        if mask.contains(EventMask::BUTTON_PRESS) {
            xmask |= xlib::ButtonPressMask as c_long;
        }
        if mask.contains(EventMask::BUTTON_RELEASE) {
            xmask |= xlib::ButtonReleaseMask as c_long;
        }
        if mask.contains(EventMask::BUTTON1_MOTION) {
            xmask |= xlib::Button1MotionMask as c_long;
        }
        unsafe { xlib::XSelectInput(self.display, to_xwindow(window), xmask) };
    }

    fn grab_button(&mut self, root: WindowId, button: u8, modifiers: u32) {
        let button = if button == 0 {
            xlib::AnyButton as c_uint
        } else {
            button as c_uint
        };
        let modifiers = if modifiers == 0 {
            xlib::AnyModifier
        } else {
            modifiers
        };
        unsafe {
            xlib::XGrabButton(
                self.display,
                button,
                modifiers,
                to_xwindow(root),
                xlib::False,
                xlib::ButtonPressMask as c_uint,
                xlib::GrabModeSync,
                xlib::GrabModeAsync,
                0,
                0,
            );
        }
    }

    fn create_frame(
        &mut self,
        parent: WindowId,
        geometry: Geometry,
        border_width: u32,
        border_color: Color,
        event_mask: EventMask,
    ) -> WindowId {
        let frame = unsafe {
            xlib::XCreateSimpleWindow(
                self.display,
                to_xwindow(parent),
                geometry.x,
                geometry.y,
                geometry.w,
                geometry.h,
                border_width,
                border_color as c_ulong,
                border_color as c_ulong,
            )
        };
        self.select_input(from_xwindow(frame), event_mask);
        from_xwindow(frame)
    }

    fn create_header(
        &mut self,
        frame: WindowId,
        width: u32,
        height: u32,
        back_color: Color,
        event_mask: EventMask,
    ) -> WindowId {
        let header = unsafe {
            xlib::XCreateSimpleWindow(
                self.display,
                to_xwindow(frame),
                0,
                0,
                width,
                height,
                0,
                back_color as c_ulong,
                back_color as c_ulong,
            )
        };
        self.select_input(from_xwindow(header), event_mask);
        from_xwindow(header)
    }

    fn reparent(&mut self, client: WindowId, new_parent: WindowId, x: i32, y: i32) {
        unsafe {
            xlib::XReparentWindow(self.display, to_xwindow(client), to_xwindow(new_parent), x, y);
            xlib::XAddToSaveSet(self.display, to_xwindow(client));
        }
    }

    fn configure(&mut self, window: WindowId, request: ConfigureRequest) {
        let (mask, mut changes) = Self::configure_mask_and_values(&request);
        if mask == 0 {
            return;
        }
        unsafe {
            xlib::XConfigureWindow(self.display, to_xwindow(window), mask, &mut changes);
        }
    }

    fn map(&mut self, window: WindowId) {
        unsafe { xlib::XMapWindow(self.display, to_xwindow(window)) };
    }

    fn unmap(&mut self, window: WindowId) {
        unsafe { xlib::XUnmapWindow(self.display, to_xwindow(window)) };
    }

    fn destroy(&mut self, window: WindowId) {
        unsafe { xlib::XDestroyWindow(self.display, to_xwindow(window)) };
    }

    fn change_background(&mut self, window: WindowId, color: Color) {
        unsafe { xlib::XSetWindowBackground(self.display, to_xwindow(window), color as c_ulong) };
    }

    fn change_border(&mut self, window: WindowId, color: Color) {
        unsafe { xlib::XSetWindowBorder(self.display, to_xwindow(window), color as c_ulong) };
    }

    fn clear_area(&mut self, window: WindowId) {
        unsafe {
            xlib::XClearArea(self.display, to_xwindow(window), 0, 0, 0, 0, xlib::False);
        }
    }

    fn kill_client(&mut self, window: WindowId) {
        unsafe { xlib::XKillClient(self.display, to_xwindow(window)) };
    }

    fn send_client_message(&mut self, target: WindowId, message_type: super::Atom, data: [i32; 5]) {
        let mut cm_data = xlib::ClientMessageData::new();
        for (index, value) in data.iter().enumerate() {
            cm_data.set_long(index, *value as c_long);
        }

        let mut xevent: xlib::XEvent = xlib::XClientMessageEvent {
            type_: xlib::ClientMessage,
            serial: 0,
            send_event: xlib::True,
            display: self.display,
            window: to_xwindow(target),
            message_type: message_type.0 as xlib::Atom,
            format: 32,
            data: cm_data,
        }
        .into();

        unsafe {
            xlib::XSendEvent(
                self.display,
                to_xwindow(target),
                xlib::False,
                xlib::NoEventMask,
                &mut xevent,
            );
        }
    }

    fn replay_pointer(&mut self) {
        unsafe {
            xlib::XAllowEvents(self.display, xlib::ReplayPointer, xlib::CurrentTime);
        }
    }

    fn query_geometry(&mut self, window: WindowId) -> Result<Geometry, BackendError> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let ok = unsafe { xlib::XGetWindowAttributes(self.display, to_xwindow(window), &mut attrs) };
        if ok == 0 {
            return Err(BackendError::QueryGeometry);
        }
        Ok(Geometry::new(attrs.x, attrs.y, attrs.width as u32, attrs.height as u32))
    }

    fn flush(&mut self) {
        unsafe { xlib::XFlush(self.display) };
    }

    fn wait_event(&mut self) -> Option<Event> {
        if self.display.is_null() {
            return None;
        }
        let mut event: xlib::XEvent = unsafe { std::mem::zeroed() };
        unsafe { xlib::XNextEvent(self.display, &mut event) };

        #[allow(non_upper_case_globals)]
        let translated = unsafe {
            match event.get_type() {
                xlib::MapRequest => Some(Event::MapRequest {
                    window: from_xwindow(event.map_request.window),
                }),
                xlib::ConfigureRequest => {
                    let e = event.configure_request;
                    let value_mask = e.value_mask as u64;
                    let mut request = ConfigureRequest::default();
                    if value_mask & xlib::CWX as u64 != 0 {
                        request.x = Some(e.x);
                    }
                    if value_mask & xlib::CWY as u64 != 0 {
                        request.y = Some(e.y);
                    }
                    if value_mask & xlib::CWWidth as u64 != 0 {
                        request.w = Some(e.width as u32);
                    }
                    if value_mask & xlib::CWHeight as u64 != 0 {
                        request.h = Some(e.height as u32);
                    }
                    if value_mask & xlib::CWBorderWidth as u64 != 0 {
                        request.border_width = Some(e.border_width as u32);
                    }
                    if value_mask & xlib::CWSibling as u64 != 0 {
                        request.sibling = Some(from_xwindow(e.above));
                    }
                    if value_mask & xlib::CWStackMode as u64 != 0 {
                        request.stack_mode = Some(if e.detail == xlib::Above {
                            StackMode::Above
                        } else {
                            StackMode::Below
                        });
                    }
                    Some(Event::ConfigureRequest {
                        window: from_xwindow(e.window),
                        request,
                    })
                }
                xlib::DestroyNotify => Some(Event::DestroyNotify {
                    window: from_xwindow(event.destroy_window.window),
                }),
                xlib::CreateNotify => Some(Event::CreateNotify {
                    window: from_xwindow(event.create_window.window),
                }),
                xlib::EnterNotify => Some(Event::EnterNotify {
                    window: from_xwindow(event.crossing.window),
                }),
                xlib::LeaveNotify => Some(Event::LeaveNotify {
                    window: from_xwindow(event.crossing.window),
                }),
                xlib::ButtonPress => {
                    let e = event.button;
                    let child = if e.subwindow == 0 {
                        None
                    } else {
                        Some(from_xwindow(e.subwindow))
                    };
                    Some(Event::ButtonPress {
                        event_window: from_xwindow(e.window),
                        child,
                        button: e.button as u8,
                        root_x: e.x_root,
                        root_y: e.y_root,
                    })
                }
                xlib::ButtonRelease => Some(Event::ButtonRelease {
                    event_window: from_xwindow(event.button.window),
                    button: event.button.button as u8,
                }),
                xlib::MotionNotify => Some(Event::MotionNotify {
                    root_x: event.motion.x_root,
                    root_y: event.motion.y_root,
                }),
                xlib::ClientMessage => {
                    let e = event.client_message;
                    let longs = e.data.as_longs();
                    let mut data = [0i32; 5];
                    for (slot, long) in data.iter_mut().zip(longs.iter()) {
                        *slot = *long as i32;
                    }
                    Some(Event::ClientMessage {
                        window: from_xwindow(e.window),
                        message_type: super::Atom(e.message_type as u64),
                        data,
                    })
                }
                _ => Some(Event::Other),
            }
        };

        translated
    }
}
