//! Option uniqueness post-pass and disambiguating filler text

use crate::questions::{CorrectAnswer, ExamQuestion};
use std::collections::HashSet;
use tracing::warn;

/// `"<base> (Option n)"`
pub fn marker(base: &str, n: usize) -> String {
    format!("{base} (Option {n})")
}

/// Append numbered markers of `base` until `options` holds `count` entries.
///
/// Numbering starts after the current length and skips any marker that is
/// already present, so every appended entry is new.
pub fn pad_with_markers(base: &str, options: &mut Vec<String>, count: usize) {
    if options.len() >= count {
        return;
    }
    warn!(base, missing = count - options.len(), "synthesizing filler options");

    let mut n = options.len() + 1;
    while options.len() < count {
        let candidate = marker(base, n);
        n += 1;
        if candidate != base && !options.contains(&candidate) {
            options.push(candidate);
        }
    }
}

/// Make every option distinct without changing the option count.
///
/// The first occurrence of each string is kept; later copies become
/// `"<text> (Option k)"` with `k` the 1-based slot, bumped until it collides
/// with nothing. A question whose options are already distinct comes back
/// unchanged.
pub fn dedupe(mut question: ExamQuestion) -> ExamQuestion {
    if let CorrectAnswer::Single(answer) = &question.correct_answer {
        if !question.options.contains(answer) {
            if let Some(last) = question.options.last_mut() {
                warn!(id = %question.id, "correct answer missing from options, restoring it");
                *last = answer.clone();
            }
        }
    }

    if question.has_distinct_options() {
        return question;
    }

    let mut taken: HashSet<String> = question.options.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::with_capacity(question.options.len());
    for slot in 0..question.options.len() {
        let text = question.options[slot].clone();
        if seen.insert(text.clone()) {
            continue;
        }
        let mut k = slot + 1;
        let mut candidate = marker(&text, k);
        while taken.contains(&candidate) {
            k += 1;
            candidate = marker(&text, k);
        }
        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        question.options[slot] = candidate;
    }

    debug_assert!(question.has_distinct_options());
    question
}
