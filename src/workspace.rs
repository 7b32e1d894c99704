//! A single workspace's window collection and the focus state machine that
//! operates on it.

use crate::backend::{ConfigureRequest, DisplayBackend, Geometry, WindowId};
use crate::config::Colors;
use crate::model::ManagedWindow;

/// An ordered collection of managed windows plus which one (if any) is
/// focused. `focused` is kept as the window's stable `client_id`, never a
/// raw index, and is re-resolved by scanning `windows` every time it's used,
/// since `windows` is a plain growable `Vec` that reallocates and shifts on
/// insert/remove — a raw pointer or index into it would dangle across those
/// mutations.
#[derive(Debug, Default)]
pub struct Workspace {
    windows: Vec<ManagedWindow>,
    focused: Option<WindowId>,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    pub fn windows(&self) -> &[ManagedWindow] {
        &self.windows
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn focused_id(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn set_focused(&mut self, target: Option<WindowId>) {
        self.focused = target;
    }

    pub fn focused(&self) -> Option<&ManagedWindow> {
        self.focused.and_then(|id| self.find(id))
    }

    pub fn focused_mut(&mut self) -> Option<&mut ManagedWindow> {
        let id = self.focused?;
        self.find_mut(id)
    }

    /// Appends a new window in Normal state. Returns its `client_id`,
    /// which doubles as its stable handle.
    pub fn create(
        &mut self,
        client_id: WindowId,
        frame_id: WindowId,
        header_id: WindowId,
        geometry: Geometry,
    ) -> WindowId {
        self.windows
            .push(ManagedWindow::new(client_id, frame_id, header_id, geometry));
        client_id
    }

    /// Inserts an already-built record (used by `send_to` to move a window
    /// between workspaces without re-creating its server windows).
    pub fn insert(&mut self, window: ManagedWindow) {
        self.windows.push(window);
    }

    /// Finds the managed window whose `client_id`, `frame_id` or `header_id`
    /// equals `id`. Searches this workspace only.
    pub fn find(&self, id: WindowId) -> Option<&ManagedWindow> {
        self.windows
            .iter()
            .find(|w| w.client_id == id || w.frame_id == id || w.header_id == id)
    }

    pub fn find_mut(&mut self, id: WindowId) -> Option<&mut ManagedWindow> {
        self.windows
            .iter_mut()
            .find(|w| w.client_id == id || w.frame_id == id || w.header_id == id)
    }

    /// Removes the window with the given `client_id`, preserving the
    /// relative order of the survivors. If it was focused, focus becomes
    /// none — the manager does not automatically pick a replacement.
    pub fn remove(&mut self, client_id: WindowId) -> Option<ManagedWindow> {
        let index = self.windows.iter().position(|w| w.client_id == client_id)?;
        let removed = self.windows.remove(index);
        if self.focused == Some(client_id) {
            self.focused = None;
        }
        Some(removed)
    }

    /// Focuses `target`. A no-op if it's already focused or isn't a
    /// member of this workspace.
    pub fn focus<B: DisplayBackend>(&mut self, backend: &mut B, colors: &Colors, target: WindowId) {
        if self.focused == Some(target) {
            return;
        }
        if self.find(target).is_none() {
            return;
        }

        for w in self.windows.iter() {
            let (border, header) = if w.client_id == target {
                (colors.focused_border, colors.focused_header)
            } else {
                (colors.unfocused_border, colors.unfocused_header)
            };
            backend.change_border(w.frame_id, border);
            backend.change_background(w.header_id, header);
            backend.clear_area(w.header_id);
        }

        if let Some(w) = self.find(target) {
            backend.configure(w.frame_id, ConfigureRequest::raise());
        }

        self.focused = Some(target);
        backend.flush();
    }

    /// Moves focus by `direction` (+1 or -1) in insertion order, wrapping
    /// around. A no-op on an empty workspace; focuses the first
    /// window if nothing is currently focused.
    pub fn focus_relative<B: DisplayBackend>(&mut self, backend: &mut B, colors: &Colors, direction: i32) {
        if self.windows.is_empty() {
            return;
        }
        let target = match self.focused {
            None => self.windows[0].client_id,
            Some(current) => {
                let n = self.windows.len() as i32;
                let index = self
                    .windows
                    .iter()
                    .position(|w| w.client_id == current)
                    .unwrap_or(0) as i32;
                let new_index = (((index + direction) % n) + n) % n;
                self.windows[new_index as usize].client_id
            }
        };
        self.focus(backend, colors, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    fn push_window(ws: &mut Workspace, n: u64) -> WindowId {
        ws.create(
            WindowId(n * 10),
            WindowId(n * 10 + 1),
            WindowId(n * 10 + 2),
            Geometry::new(0, 0, 100, 100),
        )
    }

    #[test]
    fn find_matches_any_of_the_three_ids() {
        let mut ws = Workspace::new();
        let client = push_window(&mut ws, 1);
        assert_eq!(ws.find(client).unwrap().client_id, client);
        assert_eq!(ws.find(WindowId(11)).unwrap().client_id, client);
        assert_eq!(ws.find(WindowId(12)).unwrap().client_id, client);
        assert!(ws.find(WindowId(999)).is_none());
    }

    #[test]
    fn remove_clears_focus_only_if_it_was_focused() {
        let mut ws = Workspace::new();
        let a = push_window(&mut ws, 1);
        let b = push_window(&mut ws, 2);
        ws.set_focused(Some(a));
        ws.remove(b);
        assert_eq!(ws.focused_id(), Some(a));
        ws.remove(a);
        assert_eq!(ws.focused_id(), None);
    }

    #[test]
    fn remove_does_not_auto_pick_replacement_focus() {
        let mut ws = Workspace::new();
        let a = push_window(&mut ws, 1);
        push_window(&mut ws, 2);
        ws.set_focused(Some(a));
        ws.remove(a);
        assert_eq!(ws.focused_id(), None);
    }

    #[test]
    fn focus_cycle_wraps_forward_and_backward() {
        let mut ws = Workspace::new();
        let w0 = push_window(&mut ws, 0);
        let w1 = push_window(&mut ws, 1);
        let w2 = push_window(&mut ws, 2);
        let colors = Colors::default();
        let mut backend = MockBackend::new();

        ws.focus(&mut backend, &colors, w1);
        ws.focus_relative(&mut backend, &colors, 1);
        assert_eq!(ws.focused_id(), Some(w2));
        ws.focus_relative(&mut backend, &colors, 1);
        assert_eq!(ws.focused_id(), Some(w0));
        ws.focus_relative(&mut backend, &colors, -1);
        assert_eq!(ws.focused_id(), Some(w2));
    }

    #[test]
    fn focus_is_idempotent_and_exclusive() {
        let mut ws = Workspace::new();
        let w0 = push_window(&mut ws, 0);
        let w1 = push_window(&mut ws, 1);
        let colors = Colors::default();
        let mut backend = MockBackend::new();

        ws.focus(&mut backend, &colors, w0);
        ws.focus(&mut backend, &colors, w0);
        assert_eq!(ws.focused_id(), Some(w0));

        ws.focus(&mut backend, &colors, w1);
        assert_eq!(ws.focused_id(), Some(w1));
        // only one window has focused colors at a time.
        assert_eq!(
            backend.border_color(ws.find(w0).unwrap().frame_id),
            Some(colors.unfocused_border)
        );
        assert_eq!(
            backend.border_color(ws.find(w1).unwrap().frame_id),
            Some(colors.focused_border)
        );
    }
}
