//! Prompt data model, relevance search and template substitution.

mod search;
mod template;
mod types;

pub use search::{search_prompts, SearchCache};
pub use template::{extract_placeholders, resolve_template, resolve_with_defaults};
pub use types::{MatchField, Prompt, PromptMatch, Variable};
