//! Command dispatcher: turns a decoded `CommandKind` and its payload
//! into the corresponding action against the current workspace.

use crate::atoms::CommandKind;
use crate::backend::{DisplayBackend, Geometry, ScreenInfo};
use crate::config::Config;
use crate::framing::{apply_geometry, translate_frame};
use crate::toggles::{toggle, ToggleKind};
use crate::workspace_set::WorkspaceSet;

/// What the event loop should do after dispatching a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Dispatches one decoded command. `data` is the client message's raw
/// `data32[0..4]` payload; each arm interprets only the leading elements it
/// needs.
pub fn dispatch<B: DisplayBackend>(
    backend: &mut B,
    workspaces: &mut WorkspaceSet,
    config: &Config,
    screen: ScreenInfo,
    kind: CommandKind,
    data: [i32; 5],
) -> ControlFlow {
    match kind {
        CommandKind::Quit => return ControlFlow::Quit,

        CommandKind::Kill => {
            if let Some(focused) = workspaces.current().focused_id() {
                backend.kill_client(focused);
                backend.flush();
            }
        }

        CommandKind::Move => {
            let (dx, dy) = (data[0], data[1]);
            if let Some(id) = workspaces.current().focused_id() {
                if let Some(window) = workspaces.current_mut().find_mut(id) {
                    translate_frame(backend, window, dx, dy);
                }
            }
        }

        CommandKind::Resize => {
            let (dw, dh) = (data[0], data[1]);
            if let Some(id) = workspaces.current().focused_id() {
                if let Some(window) = workspaces.current_mut().find_mut(id) {
                    let new_w = (window.geometry.w as i32 + dw).max(0) as u32;
                    let new_h = (window.geometry.h as i32 + dh).max(0) as u32;
                    let geom = Geometry::new(window.geometry.x, window.geometry.y, new_w, new_h);
                    let decorated = window.state.decorated();
                    apply_geometry(backend, window, config, geom, decorated);
                }
            }
        }

        CommandKind::FocusNext => {
            workspaces.current_mut().focus_relative(backend, &config.colors, 1);
        }
        CommandKind::FocusPrev => {
            workspaces.current_mut().focus_relative(backend, &config.colors, -1);
        }

        CommandKind::SnapLeft | CommandKind::SnapRight | CommandKind::Maximize | CommandKind::Fullscreen => {
            let toggle_kind = match kind {
                CommandKind::SnapLeft => ToggleKind::SnapLeft,
                CommandKind::SnapRight => ToggleKind::SnapRight,
                CommandKind::Maximize => ToggleKind::Maximize,
                CommandKind::Fullscreen => ToggleKind::Fullscreen,
                _ => unreachable!(),
            };
            if let Some(id) = workspaces.current().focused_id() {
                if let Some(window) = workspaces.current_mut().find_mut(id) {
                    toggle(backend, window, config, screen, toggle_kind);
                }
            }
        }

        CommandKind::SwitchWorkspace => {
            let index = data[0].max(0) as usize;
            workspaces.switch_to(backend, &config.colors, index);
        }
        CommandKind::SendToWorkspace => {
            let index = data[0].max(0) as usize;
            workspaces.send_to(backend, index);
        }
    }

    ControlFlow::Continue
}
