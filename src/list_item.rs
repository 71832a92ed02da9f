//! Presentation data for result rows.
//!
//! The engine does not render; it hands the host a flat description of
//! each row (icon, name, description, folder badge, variables indicator)
//! plus which row is visually selected.

use crate::prompts::PromptMatch;

/// One row of the result list, ready for the host UI to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRow {
    pub id: String,
    pub icon: String,
    pub color: String,
    pub name: String,
    pub description: String,
    /// Folder badge text; empty means no badge.
    pub folder: String,
    /// Shown as the "fills in variables before pasting" indicator.
    pub has_variables: bool,
    pub is_selected: bool,
}

/// Build display rows from the current candidates.
///
/// `selected` outside the candidate range simply means no row is
/// visually selected; it never panics.
pub fn build_rows(candidates: &[PromptMatch], selected: Option<usize>) -> Vec<PromptRow> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, m)| PromptRow {
            id: m.prompt.id.clone(),
            icon: m.prompt.icon.clone(),
            color: m.prompt.color.clone(),
            name: m.prompt.name.clone(),
            description: m.prompt.description.clone(),
            folder: m.prompt.folder.clone(),
            has_variables: m.prompt.has_variables(),
            is_selected: selected == Some(i),
        })
        .collect()
}
