//! Collapsing and ranking suggestions.
//!
//! The analyzer emits one raw suggestion per qualifying step. Suggestions
//! for the same field id are merged into one entry: occurrence counts are
//! summed and the highest priority seen is kept.

use std::cmp::Reverse;
use std::collections::HashMap;

use explore_fixtures_core::FixtureSuggestion;

/// Merges suggestions by field id, preserving first-seen order.
///
/// The merged entry keeps the first value seen and the first non-empty
/// screen type. Its source follows whichever entry supplied the highest
/// priority (the earliest one on ties).
pub fn merge_suggestions(raw: Vec<FixtureSuggestion>) -> Vec<FixtureSuggestion> {
    let mut merged: Vec<FixtureSuggestion> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for suggestion in raw {
        match index.get(&suggestion.field_id) {
            Some(&at) => {
                let existing = &mut merged[at];
                existing.frequency += suggestion.frequency;
                if suggestion.priority > existing.priority {
                    existing.priority = suggestion.priority;
                    existing.source = suggestion.source;
                }
                if existing.screen_type.is_none() {
                    existing.screen_type = suggestion.screen_type;
                }
            }
            None => {
                index.insert(suggestion.field_id.clone(), merged.len());
                merged.push(suggestion);
            }
        }
    }

    merged
}

/// Sorts by priority, then frequency, both descending. Ties keep their
/// current relative order.
pub fn rank_suggestions(suggestions: &mut [FixtureSuggestion]) {
    suggestions.sort_by_key(|s| Reverse((s.priority, s.frequency)));
}
