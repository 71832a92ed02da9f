//! Variable-substitution modal workflow.
//!
//! Collects values for a prompt's placeholders and hands the completed
//! mapping to a caller-supplied resolver. While open, the modal owns
//! keyboard input (the orchestrator disables its router) and a
//! [`FocusTrap`] constrains Tab cycling to the form; on any exit path
//! the trap queues exactly one focus restore.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::focus::{FocusBackend, FocusTrap};
use crate::keyboard::{Key, KeyEvent};
use crate::prompts::{Prompt, Variable};

/// One editable form row, in the prompt's variable order.
#[derive(Debug, Clone)]
pub struct FormField {
    pub variable: Variable,
    pub value: String,
}

/// Outcome of routing a key event to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalDispatch {
    /// Consumed by the modal; nothing else may react to this keypress.
    Handled,
    /// Plain text input, forwarded to the focused field by the host.
    PassThrough,
    /// Enter was pressed; the host should attempt `confirm`.
    ConfirmRequested,
}

struct OpenState {
    target: Arc<Prompt>,
    fields: Vec<FormField>,
}

/// Two-state workflow: closed, or open over a target prompt.
///
/// Form values live only while the modal is open and are discarded on
/// confirm and cancel alike.
#[derive(Default)]
pub struct VariableModal {
    open: Option<OpenState>,
    trap: FocusTrap,
}

impl VariableModal {
    pub fn new() -> Self {
        VariableModal::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn target(&self) -> Option<&Arc<Prompt>> {
        self.open.as_ref().map(|s| &s.target)
    }

    pub fn fields(&self) -> &[FormField] {
        self.open.as_ref().map(|s| s.fields.as_slice()).unwrap_or(&[])
    }

    /// Open the modal for a prompt with variables. Every field starts at
    /// its variable's default; the focus trap captures the pre-open focus
    /// target and then auto-focuses the first field.
    ///
    /// Prompts without variables never open a modal.
    pub fn open(&mut self, prompt: Arc<Prompt>, backend: &mut dyn FocusBackend) -> bool {
        if self.open.is_some() || !prompt.has_variables() {
            return false;
        }

        let fields = prompt
            .variables
            .iter()
            .map(|v| FormField {
                variable: v.clone(),
                value: v.default.clone(),
            })
            .collect();

        debug!(prompt_id = %prompt.id, "Opening variable modal");
        self.open = Some(OpenState {
            target: prompt,
            fields,
        });
        self.trap.activate(backend);
        true
    }

    /// Update a field's value by variable name. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(state) = self.open.as_mut() {
            if let Some(field) = state.fields.iter_mut().find(|f| f.variable.name == name) {
                field.value = value.into();
            }
        }
    }

    /// Confirm is blocked while any required variable's value is empty.
    /// The disabled submit button and the Enter path both consult this,
    /// so they can never disagree.
    pub fn can_confirm(&self) -> bool {
        match &self.open {
            None => false,
            Some(state) => state
                .fields
                .iter()
                .all(|f| !f.variable.required || !f.value.is_empty()),
        }
    }

    /// Invoke the resolver with the full values mapping and close.
    ///
    /// Returns false (and stays open, resolver untouched) while
    /// validation blocks confirmation.
    pub fn confirm<R>(&mut self, resolver: R) -> bool
    where
        R: FnOnce(Arc<Prompt>, HashMap<String, String>),
    {
        if !self.can_confirm() {
            return false;
        }
        let state = match self.open.take() {
            Some(s) => s,
            None => return false,
        };
        let values: HashMap<String, String> = state
            .fields
            .into_iter()
            .map(|f| (f.variable.name, f.value))
            .collect();
        debug!(prompt_id = %state.target.id, "Variable modal confirmed");
        self.trap.release();
        resolver(state.target, values);
        true
    }

    /// Close without invoking the resolver. Values are discarded.
    pub fn cancel(&mut self) {
        if let Some(state) = self.open.take() {
            debug!(prompt_id = %state.target.id, "Variable modal cancelled");
            self.trap.release();
        }
    }

    /// Route a key event while open.
    ///
    /// Escape cancels the modal only — it is consumed here so the outer
    /// surface's Escape handler never fires on the same keypress. Tab and
    /// Shift+Tab cycle the focus trap. Enter requests confirmation.
    pub fn handle_key(&mut self, event: &KeyEvent, backend: &mut dyn FocusBackend) -> ModalDispatch {
        if self.open.is_none() {
            return ModalDispatch::PassThrough;
        }
        match event.key {
            Key::Escape => {
                self.cancel();
                ModalDispatch::Handled
            }
            Key::Tab => {
                self.trap.cycle(backend, event.modifiers.shift);
                ModalDispatch::Handled
            }
            Key::Enter => ModalDispatch::ConfirmRequested,
            _ => ModalDispatch::PassThrough,
        }
    }

    /// Click on the dimmed overlay outside the content box cancels.
    pub fn overlay_clicked(&mut self) {
        self.cancel();
    }

    /// Clicks inside the content box must not bubble into the overlay's
    /// cancel handler; the host calls this to swallow them.
    pub fn content_clicked(&self) -> ModalDispatch {
        ModalDispatch::Handled
    }

    pub fn has_pending_focus_restore(&self) -> bool {
        self.trap.has_pending_restore()
    }

    /// Apply the queued focus restore, one frame after close, once the
    /// modal's subtree is gone.
    pub fn apply_pending_focus_restore(&mut self, backend: &mut dyn FocusBackend) {
        self.trap.apply_pending_restore(backend);
    }
}
