//! Relevance search over the in-memory prompt set.
//!
//! Matching is literal, case-insensitive substring containment, tested per
//! prompt in priority order: name, then description, then tags, then
//! content. Results are ordered by the best-matching tier only; within a
//! tier the original relative order is preserved, so exact-name matches
//! surface first without a numeric score. The query is never interpreted
//! as a pattern.

use std::sync::Arc;

use parking_lot::Mutex;

use super::types::{MatchField, Prompt, PromptMatch};

/// Check if haystack contains needle using ASCII case-insensitive matching.
/// `needle_lower` must already be lowercase.
/// No allocation - O(n*m) worst case but typically much faster.
#[inline]
pub(crate) fn contains_ignore_ascii_case(haystack: &str, needle_lower: &str) -> bool {
    let h = haystack.as_bytes();
    let n = needle_lower.as_bytes();
    if n.is_empty() {
        return true;
    }
    if n.len() > h.len() {
        return false;
    }
    'outer: for i in 0..=(h.len() - n.len()) {
        for j in 0..n.len() {
            if h[i + j].to_ascii_lowercase() != n[j] {
                continue 'outer;
            }
        }
        return true;
    }
    false
}

/// Case-insensitive containment with a non-allocating ASCII fast path.
/// `needle_lower` must already be lowercase.
#[inline]
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_ascii() && haystack.is_ascii() {
        contains_ignore_ascii_case(haystack, needle_lower)
    } else {
        haystack.to_lowercase().contains(needle_lower)
    }
}

/// Determine the highest-priority field of `prompt` containing `query_lower`.
///
/// Optional fields that are empty simply never match.
fn best_match(prompt: &Prompt, query_lower: &str) -> Option<MatchField> {
    if contains_ignore_case(&prompt.name, query_lower) {
        return Some(MatchField::Name);
    }
    if !prompt.description.is_empty() && contains_ignore_case(&prompt.description, query_lower) {
        return Some(MatchField::Description);
    }
    if prompt
        .tags
        .iter()
        .any(|tag| contains_ignore_case(tag, query_lower))
    {
        return Some(MatchField::Tag);
    }
    if contains_ignore_case(&prompt.content, query_lower) {
        return Some(MatchField::Content);
    }
    None
}

/// Search prompts by query string.
///
/// A query that trims to empty returns every prompt in identity order.
/// Otherwise the result contains exactly the prompts whose name,
/// description, tags or content contain the query, ordered by the best
/// matching tier with original order preserved inside each tier.
///
/// Pure: repeated calls with the same inputs yield the same output.
pub fn search_prompts(prompts: &[Arc<Prompt>], query: &str) -> Vec<PromptMatch> {
    if query.trim().is_empty() {
        return prompts
            .iter()
            .map(|p| PromptMatch {
                prompt: Arc::clone(p),
                field: None,
            })
            .collect();
    }

    let query_lower = query.to_lowercase();

    let mut matches: Vec<PromptMatch> = prompts
        .iter()
        .filter_map(|p| {
            best_match(p, &query_lower).map(|field| PromptMatch {
                prompt: Arc::clone(p),
                field: Some(field),
            })
        })
        .collect();

    // Stable sort keeps original relative order within a tier
    matches.sort_by_key(|m| m.field);

    matches
}

struct CacheEntry {
    revision: u64,
    query: String,
    results: Vec<PromptMatch>,
}

/// Memoizes the most recent `(source revision, query)` search.
///
/// The orchestrator bumps the revision whenever the prompt set is
/// replaced, so stale results can never be served across a reload.
pub struct SearchCache {
    entry: Mutex<Option<CacheEntry>>,
}

impl SearchCache {
    pub fn new() -> Self {
        SearchCache {
            entry: Mutex::new(None),
        }
    }

    /// Run (or re-use) a search for the given source revision and query.
    pub fn search(&self, revision: u64, prompts: &[Arc<Prompt>], query: &str) -> Vec<PromptMatch> {
        let mut entry = self.entry.lock();
        if let Some(cached) = entry.as_ref() {
            if cached.revision == revision && cached.query == query {
                return cached.results.clone();
            }
        }

        let results = search_prompts(prompts, query);
        *entry = Some(CacheEntry {
            revision,
            query: query.to_string(),
            results: results.clone(),
        });
        results
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}
