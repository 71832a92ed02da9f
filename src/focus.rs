//! Focus trap for the variable modal.
//!
//! The trap constrains Tab cycling to one subtree and restores the
//! pre-trap focus target exactly once on teardown. Focus itself is
//! abstracted behind [`FocusBackend`] so the algorithm is portable to
//! any toolkit with an analogous focus concept: the backend only needs
//! to enumerate focusable nodes in tab order and move focus between
//! them.

use tracing::debug;

/// Opaque handle to a focusable element.
pub type NodeId = u64;

/// Minimal focus capability the trap needs from the host toolkit.
pub trait FocusBackend {
    /// Focusable nodes of the trapped subtree, in tab order.
    fn focusable_nodes(&self) -> Vec<NodeId>;
    /// Disabled nodes are present in the subtree but skipped by Tab.
    fn is_disabled(&self, id: NodeId) -> bool;
    /// The currently focused node, anywhere in the document.
    fn focused(&self) -> Option<NodeId>;
    fn focus(&mut self, id: NodeId);
    /// Whether a node is still attached to the document.
    fn is_attached(&self, id: NodeId) -> bool;
}

/// Constrains tab-order to a subtree and restores prior focus on exit.
#[derive(Debug, Default)]
pub struct FocusTrap {
    active: bool,
    previous: Option<NodeId>,
    pending_restore: Option<NodeId>,
}

impl FocusTrap {
    pub fn new() -> Self {
        FocusTrap::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activate the trap: capture whatever currently has focus, then
    /// move focus to the first tabbable node of the subtree.
    ///
    /// The capture happens before the initial focus so it cannot race
    /// with the subtree's own auto-focus.
    pub fn activate(&mut self, backend: &mut dyn FocusBackend) {
        if self.active {
            return;
        }
        self.previous = backend.focused();
        self.active = true;
        if let Some(first) = self.first_tabbable(backend) {
            backend.focus(first);
        }
        debug!(previous = ?self.previous, "Focus trap activated");
    }

    fn tabbable(&self, backend: &dyn FocusBackend) -> Vec<NodeId> {
        backend
            .focusable_nodes()
            .into_iter()
            .filter(|&id| !backend.is_disabled(id))
            .collect()
    }

    fn first_tabbable(&self, backend: &dyn FocusBackend) -> Option<NodeId> {
        self.tabbable(backend).into_iter().next()
    }

    /// Cycle focus one step forward (Tab) or backward (Shift+Tab),
    /// wrapping at the boundary elements. Disabled nodes are skipped.
    pub fn cycle(&self, backend: &mut dyn FocusBackend, backward: bool) {
        if !self.active {
            return;
        }
        let tabbable = self.tabbable(backend);
        if tabbable.is_empty() {
            return;
        }

        let current = backend
            .focused()
            .and_then(|id| tabbable.iter().position(|&n| n == id));

        let next = match current {
            // Focus escaped the subtree somehow; pull it back in
            None => tabbable[0],
            Some(i) if backward => tabbable[(i + tabbable.len() - 1) % tabbable.len()],
            Some(i) => tabbable[(i + 1) % tabbable.len()],
        };
        backend.focus(next);
    }

    /// Deactivate the trap and queue the focus restore. The restore is
    /// applied by [`apply_pending_restore`](Self::apply_pending_restore)
    /// after the host has torn the subtree down (at least one frame
    /// later), and happens at most once per activation.
    pub fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.pending_restore = self.previous.take();
        debug!(target_node = ?self.pending_restore, "Focus trap released, restore queued");
    }

    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore.is_some()
    }

    /// Apply the queued restore. Focus returns to the captured node only
    /// if it is still attached to the document.
    pub fn apply_pending_restore(&mut self, backend: &mut dyn FocusBackend) {
        if let Some(target) = self.pending_restore.take() {
            if backend.is_attached(target) {
                backend.focus(target);
            } else {
                debug!(target_node = target, "Restore target detached, leaving focus as-is");
            }
        }
    }
}
