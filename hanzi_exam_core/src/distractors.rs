//! Archetype-aware wrong-option synthesis

use crate::dedupe::pad_with_markers;
use crate::questions::Archetype;
use crate::shuffle::shuffled;
use crate::tones::{tone_of, tone_variants};
use crate::vocab::VocabularyItem;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Placeholder components offered by character-component questions
pub const COMPONENTS: [(&str, &str); 11] = [
    ("口", "mouth"),
    ("木", "tree/wood"),
    ("水", "water"),
    ("火", "fire"),
    ("土", "earth"),
    ("人", "person"),
    ("女", "woman"),
    ("子", "child"),
    ("日", "sun/day"),
    ("月", "moon/month"),
    ("心", "heart"),
];

/// Appended to a sentence when a transformation cannot produce anything new
const SENTENCE_SUFFIXES: [&str; 4] = ["also", "too", "indeed", "perhaps"];

static PRONOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(I|you|he|she|they|we)\b").expect("valid regex"));
static HAVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(have|has)\b").expect("valid regex"));
static BE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(am|is|are)\b").expect("valid regex"));
static WILL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bwill\b").expect("valid regex"));
static QUESTION_AUX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(do|does|did|am|is|are|was|were)\b\s+(\w+)").expect("valid regex")
});
static NEGATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(don't|doesn't)\b").expect("valid regex"));
static AUXILIARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(have|has|am|is|are|do|does|will)\b").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistractorGenerator {
    max_attempts: usize,
}

impl Default for DistractorGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl DistractorGenerator {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Exactly `count` distinct strings, none equal to `answer`.
    ///
    /// `others` is the pool without `target` (without the whole batch for
    /// matching). When the archetype's source runs dry or the draw budget is
    /// spent, the rest is filled with `"<answer> (Option n)"` markers.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        target: &VocabularyItem,
        answer: &str,
        others: &[&VocabularyItem],
        archetype: Archetype,
        count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let mut picked = Vec::with_capacity(count);
        if count == 0 {
            return picked;
        }

        match archetype {
            Archetype::ToneSelection => {
                // a variant carrying the answer's tone would be a second right answer
                let tone = tone_of(answer);
                let variants: Vec<String> = tone_variants(answer)
                    .into_iter()
                    .filter(|v| tone.is_none() || tone_of(v) != tone)
                    .collect();
                self.draw(answer, shuffled(&variants, rng), count, &mut picked);
            }
            Archetype::Recognition | Archetype::MultipleChoiceMeaning => {
                let glosses: Vec<String> = others.iter().map(|item| item.english.clone()).collect();
                self.draw(answer, shuffled(&glosses, rng), count, &mut picked);
            }
            Archetype::MultipleChoiceCharacter => {
                let headwords: Vec<String> = others.iter().map(|item| item.hanzi.clone()).collect();
                self.draw(answer, shuffled(&headwords, rng), count, &mut picked);
            }
            Archetype::Matching => {
                let readings: Vec<String> = others.iter().map(|item| item.pinyin.clone()).collect();
                self.draw(answer, shuffled(&readings, rng), count, &mut picked);
            }
            Archetype::SentenceCompletion => {
                // same length keeps the blank plausible; relax only if short
                let len = target.char_len();
                let (same, rest): (Vec<&VocabularyItem>, Vec<&VocabularyItem>) =
                    others.iter().copied().partition(|item| item.char_len() == len);
                let same: Vec<String> = same.iter().map(|item| item.hanzi.clone()).collect();
                self.draw(answer, shuffled(&same, rng), count, &mut picked);
                if picked.len() < count {
                    let rest: Vec<String> = rest.iter().map(|item| item.hanzi.clone()).collect();
                    self.draw(answer, shuffled(&rest, rng), count, &mut picked);
                }
            }
            Archetype::Translation => self.sentences(answer, others, count, rng, &mut picked),
            Archetype::CharacterComponent => {
                let labels: Vec<String> = COMPONENTS
                    .iter()
                    .map(|(component, gloss)| format!("{component} ({gloss})"))
                    .collect();
                self.draw(answer, shuffled(&labels, rng), count, &mut picked);
            }
        }

        pad_with_markers(answer, &mut picked, count);
        picked
    }

    /// Take candidates in order until `count` are picked, skipping collisions.
    /// At most `max_attempts` draws per missing option.
    fn draw(&self, answer: &str, candidates: Vec<String>, count: usize, picked: &mut Vec<String>) {
        let budget = self.max_attempts * count.saturating_sub(picked.len());
        for candidate in candidates.into_iter().take(budget) {
            if picked.len() >= count {
                break;
            }
            if accepts(answer, picked, &candidate) {
                picked.push(candidate);
            }
        }
    }

    /// Slot `i` uses transformation `i % 3`, retried up to `max_attempts`
    /// times before falling back to a suffixed copy of the answer.
    fn sentences<R: Rng + ?Sized>(
        &self,
        answer: &str,
        others: &[&VocabularyItem],
        count: usize,
        rng: &mut R,
        picked: &mut Vec<String>,
    ) {
        let nouns: Vec<&str> = others
            .iter()
            .map(|item| item.english.as_str())
            .filter(|e| !e.contains(' ') && e.chars().count() > 2)
            .collect();

        for slot in 0..count {
            let mut accepted = false;
            for _ in 0..self.max_attempts {
                let candidate = match slot % 3 {
                    0 => substitute_noun(answer, &nouns, rng),
                    1 => shift_tense(answer),
                    _ => flip_polarity(answer),
                };
                if accepts(answer, picked, &candidate) {
                    picked.push(candidate);
                    accepted = true;
                    break;
                }
            }
            if !accepted {
                let suffix = SENTENCE_SUFFIXES[slot % SENTENCE_SUFFIXES.len()];
                let fallback = format!("{answer} {suffix}");
                if accepts(answer, picked, &fallback) {
                    picked.push(fallback);
                }
            }
        }
    }
}

fn accepts(answer: &str, picked: &[String], candidate: &str) -> bool {
    !candidate.trim().is_empty() && candidate != answer && !picked.iter().any(|p| p == candidate)
}

/// Swap the first plain word longer than two letters for another gloss;
/// without one, swap personal pronouns for "they".
fn substitute_noun<R: Rng + ?Sized>(sentence: &str, nouns: &[&str], rng: &mut R) -> String {
    if let Some(noun) = nouns.choose(rng) {
        let mut words: Vec<&str> = sentence.split(' ').collect();
        let slot = words
            .iter()
            .position(|w| w.chars().count() > 2 && !w.contains(['.', ',', '?', '!']));
        if let Some(slot) = slot {
            words[slot] = *noun;
            return words.join(" ");
        }
    }
    PRONOUN.replace_all(sentence, "they").into_owned()
}

fn shift_tense(sentence: &str) -> String {
    let shifted = HAVE.replace_all(sentence, "had");
    let shifted = BE.replace_all(&shifted, "was");
    WILL.replace_all(&shifted, "would").into_owned()
}

/// Question -> statement, negative -> positive, positive -> negative
fn flip_polarity(sentence: &str) -> String {
    if sentence.contains('?') {
        let statement = sentence.replacen('?', ".", 1);
        return QUESTION_AUX.replace(&statement, "${2}").into_owned();
    }
    if NEGATION.is_match(sentence) {
        let positive = NEGATION.replace_all(sentence, "");
        return positive.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    AUXILIARY
        .replace_all(sentence, |caps: &Captures| format!("{} not", &caps[0]))
        .into_owned()
}
