//! Fixed-size collection of workspaces and the switch/send operations that
//! move windows and visibility between them.

use crate::backend::{DisplayBackend, WindowId};
use crate::config::Colors;
use crate::workspace::Workspace;

/// Owns `MAX_WORKSPACES` workspaces and the index of the one currently
/// visible. Constructed once at startup and lives for the process.
#[derive(Debug)]
pub struct WorkspaceSet {
    slots: Vec<Workspace>,
    current: usize,
}

impl WorkspaceSet {
    pub fn new(count: usize) -> Self {
        let mut slots = Vec::with_capacity(count.max(1));
        for _ in 0..count.max(1) {
            slots.push(Workspace::new());
        }
        WorkspaceSet { slots, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Workspace {
        &self.slots[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Workspace {
        &mut self.slots[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&Workspace> {
        self.slots.get(index)
    }

    /// Switches the visible workspace to `index`. A no-op if `index`
    /// is out of range or already current. Unmaps every frame on the way
    /// out, maps every frame on the way in, and re-focuses the destination's
    /// recorded focused window if it has one.
    pub fn switch_to<B: DisplayBackend>(&mut self, backend: &mut B, colors: &Colors, index: usize) {
        if index >= self.slots.len() || index == self.current {
            return;
        }

        for w in self.slots[self.current].windows() {
            backend.unmap(w.frame_id);
        }

        self.current = index;

        let focused = self.slots[self.current].focused_id();
        let ids: Vec<WindowId> = self.slots[self.current]
            .windows()
            .iter()
            .map(|w| w.frame_id)
            .collect();
        for frame in ids {
            backend.map(frame);
        }
        if let Some(target) = focused {
            self.slots[self.current].focus(backend, colors, target);
        }
        backend.flush();
    }

    /// Removes the managed window with the given `client_id` from whichever
    /// workspace holds it, regardless of which one is current. Used by
    /// DestroyNotify handling, since a destroyed client may belong to
    /// a workspace that isn't presently visible.
    pub fn remove_any(&mut self, client_id: WindowId) -> Option<crate::model::ManagedWindow> {
        for workspace in &mut self.slots {
            if let Some(window) = workspace.remove(client_id) {
                return Some(window);
            }
        }
        None
    }

    /// Moves the current workspace's focused window to workspace `index`.
    /// A no-op if nothing is focused, `index` is out of range, or it
    /// equals the current workspace. The moved window keeps its `state` and
    /// `saved_geometry`; its frame is unmapped since it is leaving the
    /// visible workspace. The destination's focused reference is updated to
    /// the moved window so that a later `switch_to` re-focuses it there; the
    /// source workspace's focused reference is cleared by `remove` and is
    /// not auto-replaced, even if another window remains on it.
    pub fn send_to<B: DisplayBackend>(&mut self, backend: &mut B, index: usize) {
        if index >= self.slots.len() || index == self.current {
            return;
        }
        let Some(client_id) = self.slots[self.current].focused_id() else {
            return;
        };
        let Some(window) = self.slots[self.current].remove(client_id) else {
            return;
        };

        backend.unmap(window.frame_id);
        backend.flush();

        self.slots[index].insert(window);
        self.slots[index].set_focused(Some(client_id));
    }
}
