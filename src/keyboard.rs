//! Keyboard dispatch for the spotlight surface.
//!
//! A single router owned by the orchestrator translates key chords into
//! high-level intents. The `enabled` flag is an explicit data dependency:
//! while false the router claims no keys at all, which is how the
//! variable modal takes exclusive control of keyboard input. Unrecognized
//! keys always pass through so normal typing into the search field is
//! unaffected.

use crate::config::ChordBindings;
use crate::error::SpotlightError;

/// A key stripped of toolkit specifics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Tab,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub command: bool,
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        command: false,
        control: false,
        alt: false,
        shift: false,
    };

    pub fn command() -> Modifiers {
        Modifiers {
            command: true,
            ..Modifiers::NONE
        }
    }

    pub fn shift() -> Modifiers {
        Modifiers {
            shift: true,
            ..Modifiers::NONE
        }
    }

    fn any_chord_modifier(&self) -> bool {
        self.command || self.control || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        KeyEvent {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}

/// Whether a key event was claimed. `Handled` suppresses the default
/// behavior; `PassThrough` leaves the event untouched for the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    PassThrough,
}

/// High-level intents recognized by the spotlight surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotlightIntent {
    NavigateUp,
    NavigateDown,
    /// Enter and Tab are treated identically so keyboard-only flows stay fast.
    Confirm,
    /// Hide the whole search surface.
    Dismiss,
    EditSelected,
    NewPrompt,
    OpenSettings,
}

/// A `modifier+key` combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    pub modifiers: Modifiers,
    pub key: Key,
}

/// Parse a chord string such as `"cmd+e"` or `"ctrl+shift+,"`.
///
/// At least one non-shift modifier is required: a bare key would collide
/// with normal text entry.
pub fn parse_chord(spec: &str) -> Result<Chord, SpotlightError> {
    let mut modifiers = Modifiers::NONE;
    let mut key = None;

    for part in spec.split('+') {
        match part.trim().to_ascii_lowercase().as_str() {
            "cmd" | "command" | "super" => modifiers.command = true,
            "ctrl" | "control" => modifiers.control = true,
            "alt" | "opt" | "option" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "up" => key = Some(Key::Up),
            "down" => key = Some(Key::Down),
            "enter" | "return" => key = Some(Key::Enter),
            "tab" => key = Some(Key::Tab),
            "escape" | "esc" => key = Some(Key::Escape),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => key = Some(Key::Char(c)),
                    _ => {
                        return Err(SpotlightError::Config(format!(
                            "unrecognized key '{}' in chord '{}'",
                            other, spec
                        )))
                    }
                }
            }
        }
    }

    let key = key
        .ok_or_else(|| SpotlightError::Config(format!("chord '{}' has no key", spec)))?;
    if !modifiers.any_chord_modifier() {
        return Err(SpotlightError::Config(format!(
            "chord '{}' needs a modifier",
            spec
        )));
    }
    Ok(Chord { modifiers, key })
}

/// Translates key events into [`SpotlightIntent`]s.
///
/// The router holds no global state; handlers live in the orchestrator's
/// match on the returned intent, so a changed handler set takes effect on
/// the very next event and teardown is just `Drop`.
#[derive(Debug)]
pub struct KeyboardRouter {
    enabled: bool,
    edit_prompt: Chord,
    new_prompt: Chord,
    open_settings: Chord,
}

impl KeyboardRouter {
    /// Build a router from configured chord bindings. An invalid binding
    /// falls back to the default for that chord.
    pub fn new(bindings: &ChordBindings) -> Self {
        let defaults = ChordBindings::default();
        let parse_or = |spec: &str, fallback: &str| {
            parse_chord(spec).unwrap_or_else(|e| {
                tracing::warn!(error = %e, chord = spec, "Invalid chord binding, using default");
                parse_chord(fallback).expect("default chord parses")
            })
        };
        KeyboardRouter {
            enabled: true,
            edit_prompt: parse_or(&bindings.edit_prompt, &defaults.edit_prompt),
            new_prompt: parse_or(&bindings.new_prompt, &defaults.new_prompt),
            open_settings: parse_or(&bindings.open_settings, &defaults.open_settings),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suspend or resume dispatch. While suspended the router recognizes
    /// nothing, so every event reaches the layer that took over.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Translate an event into an intent, or `None` for pass-through.
    pub fn route(&self, event: &KeyEvent) -> Option<SpotlightIntent> {
        if !self.enabled {
            return None;
        }

        for (chord, intent) in [
            (self.edit_prompt, SpotlightIntent::EditSelected),
            (self.new_prompt, SpotlightIntent::NewPrompt),
            (self.open_settings, SpotlightIntent::OpenSettings),
        ] {
            if event.modifiers == chord.modifiers && event.key == chord.key {
                return Some(intent);
            }
        }

        // Chorded events that match no binding fall through to typing
        if event.modifiers.any_chord_modifier() {
            return None;
        }

        match event.key {
            Key::Up => Some(SpotlightIntent::NavigateUp),
            Key::Down => Some(SpotlightIntent::NavigateDown),
            Key::Enter | Key::Tab => Some(SpotlightIntent::Confirm),
            Key::Escape => Some(SpotlightIntent::Dismiss),
            Key::Char(_) => None,
        }
    }
}
