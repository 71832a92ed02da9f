//! Prompt Spotlight - search and interaction engine for a prompt launcher
//!
//! This library turns keystrokes into a ranked, navigable result list and
//! ultimately into a resolved, variable-substituted string handed to the
//! host for clipboard/paste. Persistence, window management and the OS
//! paste action live behind the [`service::PromptService`] boundary.

pub mod config;
pub mod debounce;
pub mod error;
pub mod focus;
pub mod keyboard;
pub mod list_item;
pub mod logging;
pub mod modal;
pub mod selection;
pub mod service;
pub mod spotlight;

// Prompt data model, relevance search and template substitution
pub mod prompts;
