//! Core types for the prompt data model and search results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A stored text template with optional `{{variable}}` placeholders.
///
/// Owned by the persistence layer; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prompt {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub folder: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub auto_paste: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_icon() -> String {
    "file-text".to_string()
}

fn default_color() -> String {
    "#6B7280".to_string()
}

impl Prompt {
    /// Validate that the prompt carries a usable name and content.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Prompt name cannot be empty".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("Prompt content cannot be empty".to_string());
        }
        Ok(())
    }

    /// Whether confirming this prompt must collect variable values first.
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }
}

/// A named placeholder within a prompt's content.
///
/// `name` corresponds to exactly one `{{name}}` token in the content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The highest-priority field a query matched in.
///
/// Variant order is ranking order: a name match always sorts before a
/// description match, and so on. Prompts within the same tier keep their
/// original relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchField {
    Name,
    Description,
    Tag,
    Content,
}

/// A `(prompt, best matching field)` pairing produced transiently per query.
///
/// `field` is `None` for an empty query, where every prompt is listed
/// unranked in identity order.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMatch {
    pub prompt: Arc<Prompt>,
    pub field: Option<MatchField>,
}
