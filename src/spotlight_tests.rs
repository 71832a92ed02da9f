use super::*;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::keyboard::{Key, Modifiers};
use crate::prompts::Variable;

/// Scripted service double. Counters are interior-mutable so the test
/// can keep an `Arc` handle alongside the orchestrator's.
#[derive(Default)]
struct FakePromptService {
    prompts: Mutex<Vec<Prompt>>,
    fail_load: AtomicBool,
    copy_calls: Mutex<Vec<(String, bool)>>,
    copy_fails: AtomicBool,
    usage: Mutex<Vec<String>>,
    hide_calls: AtomicUsize,
    editor_calls: Mutex<Vec<(Option<String>, EditorMode)>>,
    settings_calls: AtomicUsize,
}

impl FakePromptService {
    fn with_prompts(prompts: Vec<Prompt>) -> Arc<Self> {
        let service = FakePromptService::default();
        *service.prompts.lock() = prompts;
        Arc::new(service)
    }
}

impl PromptService for FakePromptService {
    fn get_all_prompts(&self) -> anyhow::Result<Vec<Prompt>> {
        if self.fail_load.load(Ordering::SeqCst) {
            anyhow::bail!("storage offline");
        }
        Ok(self.prompts.lock().clone())
    }

    fn search_prompts(&self, query: &str) -> anyhow::Result<Vec<Prompt>> {
        let query = query.to_lowercase();
        Ok(self
            .prompts
            .lock()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    fn record_usage(&self, prompt_id: &str) {
        self.usage.lock().push(prompt_id.to_string());
    }

    fn copy_and_paste(&self, text: &str, auto_paste: bool) -> anyhow::Result<CopyPasteResult> {
        self.copy_calls.lock().push((text.to_string(), auto_paste));
        if self.copy_fails.load(Ordering::SeqCst) {
            return Ok(CopyPasteResult {
                clipboard_success: false,
                paste_attempted: false,
                paste_likely_success: false,
                message: "clipboard locked".into(),
            });
        }
        Ok(CopyPasteResult {
            clipboard_success: true,
            paste_attempted: auto_paste,
            paste_likely_success: auto_paste,
            message: "ok".into(),
        })
    }

    fn hide_and_restore(&self) {
        self.hide_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn open_editor_window(&self, prompt_id: Option<&str>, mode: EditorMode) {
        self.editor_calls
            .lock()
            .push((prompt_id.map(str::to_string), mode));
    }

    fn open_settings_window(&self) {
        self.settings_calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct FakeFocusBackend {
    focused: Option<u64>,
}

impl FakeFocusBackend {
    fn new() -> Self {
        FakeFocusBackend { focused: Some(42) }
    }
}

impl FocusBackend for FakeFocusBackend {
    fn focusable_nodes(&self) -> Vec<u64> {
        vec![1, 2, 3]
    }
    fn is_disabled(&self, _id: u64) -> bool {
        false
    }
    fn focused(&self) -> Option<u64> {
        self.focused
    }
    fn focus(&mut self, id: u64) {
        self.focused = Some(id);
    }
    fn is_attached(&self, _id: u64) -> bool {
        true
    }
}

fn prompt(name: &str) -> Prompt {
    Prompt {
        id: format!("{}.md", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        description: String::new(),
        content: format!("{} body", name),
        folder: String::new(),
        icon: "file-text".into(),
        color: "#6B7280".into(),
        tags: vec![],
        variables: vec![],
        auto_paste: false,
        is_favorite: false,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn prompt_with_variable(name: &str) -> Prompt {
    let mut p = prompt(name);
    p.content = "Review this {{language}} code".into();
    p.variables = vec![Variable {
        name: "language".into(),
        default: "TypeScript".into(),
        required: true,
        description: None,
    }];
    p
}

fn three_prompts() -> Vec<Prompt> {
    vec![
        prompt("Email Template"),
        prompt("Code Review"),
        prompt("Meeting Notes"),
    ]
}

fn mounted(prompts: Vec<Prompt>) -> (Spotlight, Arc<FakePromptService>) {
    let service = FakePromptService::with_prompts(prompts);
    let mut spotlight = Spotlight::new(service.clone(), &SpotlightConfig::default());
    spotlight.reload();
    (spotlight, service)
}

fn key(k: Key) -> KeyEvent {
    KeyEvent::plain(k)
}

fn cmd(c: char) -> KeyEvent {
    KeyEvent {
        key: Key::Char(c),
        modifiers: Modifiers::command(),
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn mount_loads_prompts_and_selects_the_top() {
    let (spotlight, _) = mounted(three_prompts());
    assert_eq!(*spotlight.load_state(), LoadState::Loaded);
    assert_eq!(spotlight.candidates().len(), 3);
    assert_eq!(spotlight.selected_index(), Some(0));
}

#[test]
fn load_failure_is_blocking_until_retried() {
    let service = FakePromptService::with_prompts(three_prompts());
    service.fail_load.store(true, Ordering::SeqCst);
    let mut spotlight = Spotlight::new(service.clone(), &SpotlightConfig::default());
    spotlight.reload();

    match spotlight.load_state() {
        LoadState::Failed { message } => assert!(message.contains("storage offline")),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(spotlight.candidates().is_empty());

    // No automatic retry; the retry affordance calls reload again
    service.fail_load.store(false, Ordering::SeqCst);
    spotlight.reload();
    assert_eq!(*spotlight.load_state(), LoadState::Loaded);
    assert_eq!(spotlight.candidates().len(), 3);
}

#[test]
fn stale_load_completion_is_dropped() {
    let (mut spotlight, _) = mounted(three_prompts());

    let old_token = spotlight.begin_load();
    let new_token = spotlight.begin_load();
    spotlight.complete_load(new_token, Ok(vec![prompt("Fresh")]));
    assert_eq!(spotlight.candidates().len(), 1);

    // The slow older fetch resolves afterwards and must not clobber
    spotlight.complete_load(old_token, Ok(three_prompts()));
    assert_eq!(spotlight.candidates().len(), 1);
    assert_eq!(spotlight.candidates()[0].prompt.name, "Fresh");
}

#[test]
fn rapid_typing_searches_once_with_the_final_value() {
    let (mut spotlight, _) = mounted(three_prompts());
    let start = Instant::now();
    let runs_before = spotlight.search_runs();

    for (i, q) in ["e", "em", "ema", "emai", "email"].iter().enumerate() {
        let now = start + ms(20 * i as u64);
        spotlight.set_query(q, now);
        spotlight.tick(now);
    }
    assert_eq!(spotlight.search_runs(), runs_before);

    spotlight.tick(start + ms(80 + 150));
    assert_eq!(spotlight.search_runs(), runs_before + 1);
    assert_eq!(spotlight.candidates().len(), 1);
    assert_eq!(spotlight.candidates()[0].prompt.name, "Email Template");
}

#[test]
fn new_results_reset_the_selection_to_the_top() {
    let (mut spotlight, _) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();
    let start = Instant::now();

    spotlight.handle_key(&key(Key::Down), &mut backend);
    assert_eq!(spotlight.selected_index(), Some(1));

    spotlight.set_query("meeting", start);
    spotlight.tick(start + ms(200));
    assert_eq!(spotlight.selected_index(), Some(0));
    assert_eq!(spotlight.candidates()[0].prompt.name, "Meeting Notes");
}

#[test]
fn arrow_navigation_wraps_in_both_directions() {
    // Query "", Down once -> "Code Review"; Up once -> back; Up again
    // from the top wraps to "Meeting Notes".
    let (mut spotlight, _) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();

    spotlight.handle_key(&key(Key::Down), &mut backend);
    assert_eq!(spotlight.selected_prompt().unwrap().name, "Code Review");
    spotlight.handle_key(&key(Key::Up), &mut backend);
    assert_eq!(spotlight.selected_prompt().unwrap().name, "Email Template");
    spotlight.handle_key(&key(Key::Up), &mut backend);
    assert_eq!(spotlight.selected_prompt().unwrap().name, "Meeting Notes");
}

#[test]
fn hover_moves_the_selection() {
    let (mut spotlight, _) = mounted(three_prompts());
    spotlight.hover(2);
    assert_eq!(spotlight.selected_prompt().unwrap().name, "Meeting Notes");
    spotlight.hover(9);
    assert_eq!(spotlight.selected_prompt().unwrap().name, "Meeting Notes");
}

#[test]
fn confirming_a_plain_prompt_executes_immediately() {
    let (mut spotlight, service) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();

    spotlight.handle_key(&key(Key::Enter), &mut backend);

    let copies = service.copy_calls.lock();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].0, "Email Template body");
    assert!(!copies[0].1);
    assert_eq!(*service.usage.lock(), vec!["email-template.md".to_string()]);
    assert_eq!(service.hide_calls.load(Ordering::SeqCst), 1);
    assert!(!spotlight.modal_is_open());
}

#[test]
fn tab_promotes_exactly_like_enter() {
    let (mut spotlight, service) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Tab), &mut backend);
    assert_eq!(service.copy_calls.lock().len(), 1);
}

#[test]
fn clipboard_failure_keeps_the_surface_visible() {
    let (mut spotlight, service) = mounted(three_prompts());
    service.copy_fails.store(true, Ordering::SeqCst);
    let mut backend = FakeFocusBackend::new();

    spotlight.handle_key(&key(Key::Enter), &mut backend);

    let result = spotlight.last_copy_paste().expect("result recorded");
    assert!(!result.clipboard_success);
    assert!(service.usage.lock().is_empty());
    assert_eq!(service.hide_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn confirming_a_variable_prompt_opens_the_modal() {
    let (mut spotlight, service) = mounted(vec![prompt_with_variable("Code Review")]);
    let mut backend = FakeFocusBackend::new();

    spotlight.handle_key(&key(Key::Enter), &mut backend);

    assert!(spotlight.modal_is_open());
    assert!(service.copy_calls.lock().is_empty());
    assert_eq!(spotlight.modal().fields()[0].value, "TypeScript");
    // Trap auto-focused the first field
    assert_eq!(backend.focused, Some(1));
}

#[test]
fn escape_in_the_modal_closes_only_the_modal() {
    let (mut spotlight, service) = mounted(vec![prompt_with_variable("Code Review")]);
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Enter), &mut backend);

    let dispatch = spotlight.handle_key(&key(Key::Escape), &mut backend);
    assert_eq!(dispatch, Dispatch::Handled);
    assert!(!spotlight.modal_is_open());
    // The outer "hide window" did not also fire on the same keypress
    assert_eq!(service.hide_calls.load(Ordering::SeqCst), 0);

    // Focus restore applies on the next frame
    spotlight.on_frame(&mut backend);
    assert_eq!(backend.focused, Some(42));

    // With the modal gone, Escape reaches the outer surface again
    spotlight.handle_key(&key(Key::Escape), &mut backend);
    assert_eq!(service.hide_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn enter_with_a_cleared_required_value_is_ignored() {
    let (mut spotlight, service) = mounted(vec![prompt_with_variable("Code Review")]);
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Enter), &mut backend);

    spotlight.set_modal_value("language", "");
    assert!(!spotlight.modal_can_confirm());

    let dispatch = spotlight.handle_key(&key(Key::Enter), &mut backend);
    assert_eq!(dispatch, Dispatch::Handled);
    assert!(spotlight.modal_is_open());
    assert!(service.copy_calls.lock().is_empty());

    // The button path agrees with the keyboard path
    spotlight.modal_confirm_clicked();
    assert!(spotlight.modal_is_open());
}

#[test]
fn modal_confirm_resolves_variables_and_executes() {
    let (mut spotlight, service) = mounted(vec![prompt_with_variable("Code Review")]);
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Enter), &mut backend);

    spotlight.set_modal_value("language", "Python");
    assert!(spotlight.modal_can_confirm());
    spotlight.handle_key(&key(Key::Enter), &mut backend);

    assert!(!spotlight.modal_is_open());
    let copies = service.copy_calls.lock();
    assert_eq!(copies[0].0, "Review this Python code");
    assert_eq!(*service.usage.lock(), vec!["code-review.md".to_string()]);
    assert_eq!(service.hide_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn arrows_do_not_navigate_the_list_while_the_modal_is_open() {
    let (mut spotlight, _) = mounted(vec![
        prompt_with_variable("Code Review"),
        prompt("Email Template"),
    ]);
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Enter), &mut backend);
    assert!(spotlight.modal_is_open());

    let before = spotlight.selected_index();
    let dispatch = spotlight.handle_key(&key(Key::Down), &mut backend);
    assert_eq!(dispatch, Dispatch::PassThrough);
    assert_eq!(spotlight.selected_index(), before);
}

#[test]
fn overlay_click_cancels_but_content_click_does_not() {
    let (mut spotlight, _) = mounted(vec![prompt_with_variable("Code Review")]);
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Enter), &mut backend);

    assert_eq!(spotlight.modal_content_clicked(), Dispatch::Handled);
    assert!(spotlight.modal_is_open());

    spotlight.modal_overlay_clicked();
    assert!(!spotlight.modal_is_open());

    // Router is live again
    spotlight.handle_key(&key(Key::Down), &mut backend);
    assert_eq!(spotlight.selected_index(), Some(0));
}

#[test]
fn escape_on_the_outer_surface_hides_the_window() {
    let (mut spotlight, service) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Escape), &mut backend);
    assert_eq!(service.hide_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn window_management_chords_reach_the_service() {
    let (mut spotlight, service) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();

    spotlight.handle_key(&cmd('e'), &mut backend);
    spotlight.handle_key(&cmd('n'), &mut backend);
    spotlight.handle_key(&cmd(','), &mut backend);

    let editors = service.editor_calls.lock();
    assert_eq!(
        editors[0],
        (Some("email-template.md".to_string()), EditorMode::Edit)
    );
    assert_eq!(editors[1], (None, EditorMode::New));
    assert_eq!(service.settings_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn plain_typing_passes_through_to_the_input() {
    let (mut spotlight, _) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();
    assert_eq!(
        spotlight.handle_key(&key(Key::Char('e')), &mut backend),
        Dispatch::PassThrough
    );
}

#[test]
fn rows_reflect_candidates_and_selection() {
    let (mut spotlight, _) = mounted(three_prompts());
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Down), &mut backend);

    let rows = spotlight.rows();
    assert_eq!(rows.len(), 3);
    assert!(!rows[0].is_selected);
    assert!(rows[1].is_selected);
    assert_eq!(rows[1].name, "Code Review");
}

#[test]
fn confirm_with_no_candidates_is_a_noop() {
    let (mut spotlight, service) = mounted(vec![]);
    let mut backend = FakeFocusBackend::new();
    spotlight.handle_key(&key(Key::Enter), &mut backend);
    assert!(service.copy_calls.lock().is_empty());
}

#[test]
fn unmount_cancels_the_pending_debounce() {
    let (mut spotlight, _) = mounted(three_prompts());
    let start = Instant::now();
    let runs_before = spotlight.search_runs();

    spotlight.set_query("email", start);
    spotlight.unmount();
    spotlight.tick(start + ms(1000));
    assert_eq!(spotlight.search_runs(), runs_before);
}

#[test]
fn reload_keeps_the_current_query_filter() {
    let (mut spotlight, service) = mounted(three_prompts());
    let start = Instant::now();
    spotlight.set_query("email", start);
    spotlight.tick(start + ms(200));
    assert_eq!(spotlight.candidates().len(), 1);

    service
        .prompts
        .lock()
        .push(prompt("Email Digest"));
    spotlight.reload();
    assert_eq!(spotlight.candidates().len(), 2);
    assert_eq!(spotlight.selected_index(), Some(0));
}
