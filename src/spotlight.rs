//! Spotlight orchestrator.
//!
//! Owns the query string, the candidate list, the active index and the
//! modal, and wires the pieces together: keystroke -> query -> debounce
//! -> search -> candidates -> selection reset -> rows. A confirmed
//! selection executes immediately (no variables) or opens the variable
//! modal, which on confirm calls back in to execute and close.
//!
//! Everything runs on the host's single event loop; the one async hazard
//! is a slow prompt load resolving after a newer one began, which the
//! generation token in `begin_load`/`complete_load` guards against.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::SpotlightConfig;
use crate::debounce::Debouncer;
use crate::focus::FocusBackend;
use crate::keyboard::{Dispatch, KeyEvent, KeyboardRouter, SpotlightIntent};
use crate::list_item::{build_rows, PromptRow};
use crate::modal::{ModalDispatch, VariableModal};
use crate::prompts::{resolve_with_defaults, Prompt, PromptMatch, SearchCache};
use crate::selection::{NavDirection, Selection};
use crate::service::{CopyPasteResult, EditorMode, PromptService};

/// State of the initial data load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    /// Blocking error state with a retry affordance; there is no
    /// automatic retry.
    Failed { message: String },
}

/// The spotlight search surface for one mounted session.
pub struct Spotlight {
    service: Arc<dyn PromptService>,
    prompts: Vec<Arc<Prompt>>,
    /// Bumped whenever the prompt set is replaced; keys the search cache.
    revision: u64,
    load_generation: u64,
    load_state: LoadState,
    query: String,
    debouncer: Debouncer<String>,
    cache: SearchCache,
    candidates: Vec<PromptMatch>,
    selection: Selection,
    router: KeyboardRouter,
    modal: VariableModal,
    last_copy_paste: Option<CopyPasteResult>,
    search_runs: u64,
}

impl Spotlight {
    pub fn new(service: Arc<dyn PromptService>, config: &SpotlightConfig) -> Self {
        Spotlight {
            service,
            prompts: Vec::new(),
            revision: 0,
            load_generation: 0,
            load_state: LoadState::Loading,
            query: String::new(),
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            cache: SearchCache::new(),
            candidates: Vec::new(),
            selection: Selection::new(),
            router: KeyboardRouter::new(&config.chords),
            modal: VariableModal::new(),
            last_copy_paste: None,
            search_runs: 0,
        }
    }

    // ---- data loading -----------------------------------------------------

    /// Start a load and get its generation token. A completion carrying
    /// a superseded token is dropped, so a slow fetch can never clobber
    /// the results of a newer one.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_state = LoadState::Loading;
        self.load_generation
    }

    /// Deliver the outcome of a load started with [`begin_load`](Self::begin_load).
    pub fn complete_load(&mut self, token: u64, result: anyhow::Result<Vec<Prompt>>) {
        if token != self.load_generation {
            debug!(token, current = self.load_generation, "Dropping stale prompt load");
            return;
        }
        match result {
            Ok(prompts) => {
                info!(count = prompts.len(), "Prompts loaded");
                self.prompts = prompts.into_iter().map(Arc::new).collect();
                self.revision += 1;
                self.load_state = LoadState::Loaded;
                let query = self.query.clone();
                self.run_search(&query);
            }
            Err(e) => {
                warn!(error = %e, "Prompt load failed");
                self.load_state = LoadState::Failed {
                    message: e.to_string(),
                };
                self.candidates.clear();
                self.selection.reset(0);
            }
        }
    }

    /// Fetch the prompt set through the service. Also serves as the
    /// retry action for [`LoadState::Failed`].
    pub fn reload(&mut self) {
        let token = self.begin_load();
        let result = self.service.get_all_prompts();
        self.complete_load(token, result);
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    // ---- query / search ---------------------------------------------------

    /// Record a keystroke's worth of query change. The search itself only
    /// re-runs once the value settles behind the debouncer.
    pub fn set_query(&mut self, query: &str, now: Instant) {
        self.query = query.to_string();
        self.debouncer.update(query.to_string(), now);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Drive pending timers. The host calls this from its event loop;
    /// a settled query value triggers exactly one search.
    pub fn tick(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.run_search(&query);
        }
    }

    fn run_search(&mut self, query: &str) {
        self.candidates = self.cache.search(self.revision, &self.prompts, query);
        self.search_runs += 1;
        debug!(
            query,
            results = self.candidates.len(),
            "Search re-ran"
        );
        // Selection resets strictly after the new list exists
        self.selection.reset(self.candidates.len());
    }

    pub fn candidates(&self) -> &[PromptMatch] {
        &self.candidates
    }

    /// How many times the search engine has re-ranked. Diagnostic only.
    pub fn search_runs(&self) -> u64 {
        self.search_runs
    }

    // ---- selection --------------------------------------------------------

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn selected_prompt(&self) -> Option<&Arc<Prompt>> {
        self.selection
            .selected()
            .and_then(|i| self.candidates.get(i))
            .map(|m| &m.prompt)
    }

    /// Mouse hover over a rendered row.
    pub fn hover(&mut self, index: usize) {
        self.selection.set_hovered(index);
    }

    /// Rows for the host to render.
    pub fn rows(&self) -> Vec<PromptRow> {
        build_rows(&self.candidates, self.selection.selected())
    }

    // ---- keyboard ---------------------------------------------------------

    /// Route a key event. While the modal is open it owns the keyboard
    /// entirely; otherwise the router translates and the orchestrator
    /// applies the intent.
    pub fn handle_key(&mut self, event: &KeyEvent, backend: &mut dyn FocusBackend) -> Dispatch {
        if self.modal.is_open() {
            let dispatch = match self.modal.handle_key(event, backend) {
                ModalDispatch::Handled => Dispatch::Handled,
                ModalDispatch::ConfirmRequested => {
                    self.confirm_modal();
                    Dispatch::Handled
                }
                ModalDispatch::PassThrough => Dispatch::PassThrough,
            };
            if !self.modal.is_open() {
                self.router.set_enabled(true);
            }
            return dispatch;
        }

        match self.router.route(event) {
            Some(intent) => {
                self.apply_intent(intent, backend);
                Dispatch::Handled
            }
            None => Dispatch::PassThrough,
        }
    }

    fn apply_intent(&mut self, intent: SpotlightIntent, backend: &mut dyn FocusBackend) {
        match intent {
            SpotlightIntent::NavigateUp => self.selection.move_selection(NavDirection::Up),
            SpotlightIntent::NavigateDown => self.selection.move_selection(NavDirection::Down),
            SpotlightIntent::Confirm => self.confirm_selection(backend),
            SpotlightIntent::Dismiss => self.service.hide_and_restore(),
            SpotlightIntent::EditSelected => {
                if let Some(prompt) = self.selected_prompt() {
                    let id = prompt.id.clone();
                    self.service
                        .open_editor_window(Some(&id), EditorMode::Edit);
                }
            }
            SpotlightIntent::NewPrompt => {
                self.service.open_editor_window(None, EditorMode::New);
            }
            SpotlightIntent::OpenSettings => self.service.open_settings_window(),
        }
    }

    // ---- confirmation & execution ----------------------------------------

    /// Confirm the active selection: prompts with variables open the
    /// modal (suspending the router), the rest execute immediately.
    pub fn confirm_selection(&mut self, backend: &mut dyn FocusBackend) {
        let prompt = match self.selected_prompt() {
            Some(p) => Arc::clone(p),
            None => return,
        };

        if prompt.has_variables() {
            if self.modal.open(prompt, backend) {
                self.router.set_enabled(false);
            }
        } else {
            self.execute(&prompt, HashMap::new());
        }
    }

    fn confirm_modal(&mut self) {
        let mut submitted = None;
        self.modal.confirm(|prompt, values| {
            submitted = Some((prompt, values));
        });
        if let Some((prompt, values)) = submitted {
            self.execute(&prompt, values);
        }
    }

    /// Resolve the template and hand the text to the host. Paste failure
    /// is communicated through [`CopyPasteResult`] fields, never as an
    /// error; the window only hides once the clipboard write succeeded.
    fn execute(&mut self, prompt: &Arc<Prompt>, values: HashMap<String, String>) {
        let resolved = resolve_with_defaults(prompt, &values);
        let result = match self.service.copy_and_paste(&resolved, prompt.auto_paste) {
            Ok(result) => result,
            Err(e) => CopyPasteResult::failed(format!("Failed to copy to clipboard: {}", e)),
        };

        info!(
            prompt_id = %prompt.id,
            clipboard_success = result.clipboard_success,
            paste_attempted = result.paste_attempted,
            paste_likely_success = result.paste_likely_success,
            "Prompt executed"
        );

        if result.clipboard_success {
            self.service.record_usage(&prompt.id);
            self.service.hide_and_restore();
        }
        self.last_copy_paste = Some(result);
    }

    /// Outcome of the most recent execution, for the host's status UI.
    pub fn last_copy_paste(&self) -> Option<&CopyPasteResult> {
        self.last_copy_paste.as_ref()
    }

    // ---- modal surface ----------------------------------------------------

    pub fn modal_is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn modal(&self) -> &VariableModal {
        &self.modal
    }

    /// Edit a variable's value while the modal is open.
    pub fn set_modal_value(&mut self, name: &str, value: impl Into<String>) {
        self.modal.set_value(name, value);
    }

    pub fn modal_can_confirm(&self) -> bool {
        self.modal.can_confirm()
    }

    /// The modal's confirm button. Agrees with the Enter path: both go
    /// through the same validation.
    pub fn modal_confirm_clicked(&mut self) {
        self.confirm_modal();
        if !self.modal.is_open() {
            self.router.set_enabled(true);
        }
    }

    pub fn modal_cancel_clicked(&mut self) {
        self.modal.cancel();
        self.router.set_enabled(true);
    }

    /// Click on the dimmed overlay outside the modal content.
    pub fn modal_overlay_clicked(&mut self) {
        self.modal.overlay_clicked();
        if !self.modal.is_open() {
            self.router.set_enabled(true);
        }
    }

    /// Click inside the modal content; swallowed so it never reaches the
    /// overlay cancel handler.
    pub fn modal_content_clicked(&mut self) -> Dispatch {
        match self.modal.content_clicked() {
            ModalDispatch::Handled => Dispatch::Handled,
            _ => Dispatch::PassThrough,
        }
    }

    /// Called by the host once per frame, after layout; applies any
    /// queued focus restore from a closed modal.
    pub fn on_frame(&mut self, backend: &mut dyn FocusBackend) {
        self.modal.apply_pending_focus_restore(backend);
    }

    // ---- teardown ---------------------------------------------------------

    /// Synchronously cancel pending timers and close the modal. Nothing
    /// fires after this; a cancelled debounce stays cancelled.
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        if self.modal.is_open() {
            self.modal.cancel();
            self.router.set_enabled(true);
        }
    }
}

#[cfg(test)]
#[path = "spotlight_tests.rs"]
mod spotlight_tests;
