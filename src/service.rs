//! Boundary to the persistence/OS layer.
//!
//! The orchestrator only ever talks to this trait; the real
//! implementation lives in the host application (file storage, window
//! management and the OS-level clipboard/paste simulation).

use serde::{Deserialize, Serialize};

use crate::prompts::Prompt;

/// Result from the copy-and-paste operation.
/// Provides detailed feedback about what succeeded/failed, so "copied
/// but not pasted" is distinguishable from total failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyPasteResult {
    /// Whether text was successfully copied to clipboard
    pub clipboard_success: bool,
    /// Whether auto-paste was attempted
    pub paste_attempted: bool,
    /// Whether paste is likely to have succeeded (best guess)
    pub paste_likely_success: bool,
    /// User-friendly message describing what happened
    pub message: String,
}

impl CopyPasteResult {
    /// A result describing a transport-level failure before the
    /// clipboard was ever written.
    pub fn failed(message: impl Into<String>) -> Self {
        CopyPasteResult {
            clipboard_success: false,
            paste_attempted: false,
            paste_likely_success: false,
            message: message.into(),
        }
    }
}

/// Whether the editor window opens on a blank form or an existing prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    New,
    Edit,
}

/// Capabilities the spotlight engine consumes from the host.
pub trait PromptService {
    /// Load the full prompt set. Fails with a generic I/O error on
    /// transport failure.
    fn get_all_prompts(&self) -> anyhow::Result<Vec<Prompt>>;

    /// Backing-store search, kept for consistency with the persistence
    /// layer. The engine ranks client-side on the already-fetched set
    /// and does not call this on the query path.
    fn search_prompts(&self, query: &str) -> anyhow::Result<Vec<Prompt>>;

    /// Fire-and-forget usage accounting.
    fn record_usage(&self, prompt_id: &str);

    /// Copy the resolved text and optionally simulate a paste.
    fn copy_and_paste(&self, text: &str, auto_paste: bool) -> anyhow::Result<CopyPasteResult>;

    /// Collapse the search surface and restore focus to the previous app.
    fn hide_and_restore(&self);

    fn open_editor_window(&self, prompt_id: Option<&str>, mode: EditorMode);

    fn open_settings_window(&self);
}
