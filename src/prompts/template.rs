//! `{{variable}}` placeholder extraction and substitution.

use std::collections::HashMap;

use super::types::Prompt;

/// Extract named placeholders from prompt content.
/// Finds all `{{variableName}}` patterns, de-duplicated, in order of
/// first appearance.
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '{' && chars.peek() == Some(&'{') {
            chars.next(); // consume second {
            let mut name = String::new();

            // Collect the variable name
            while let Some(&ch) = chars.peek() {
                if ch == '}' {
                    break;
                }
                name.push(ch);
                chars.next();
            }

            // Skip closing }}
            if chars.peek() == Some(&'}') {
                chars.next();
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
            }

            let trimmed = name.trim();
            if !trimmed.is_empty() && !names.contains(&trimmed.to_string()) {
                names.push(trimmed.to_string());
            }
        }
    }

    names
}

/// Replace each `{{name}}` placeholder with its value from the map.
///
/// Placeholders without a value are left verbatim so the user can see
/// what was not filled in.
pub fn resolve_template(content: &str, values: &HashMap<String, String>) -> String {
    let mut result = content.to_string();
    for (name, value) in values {
        let placeholder = format!("{{{{{}}}}}", name);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Resolve a prompt's content: each declared variable's default first,
/// overlaid with the supplied values.
pub fn resolve_with_defaults(prompt: &Prompt, values: &HashMap<String, String>) -> String {
    let mut merged: HashMap<String, String> = prompt
        .variables
        .iter()
        .map(|v| (v.name.clone(), v.default.clone()))
        .collect();
    for (name, value) in values {
        merged.insert(name.clone(), value.clone());
    }
    resolve_template(&prompt.content, &merged)
}
