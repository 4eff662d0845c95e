//! Vocabulary items and the read-only pool the exam draws from

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

fn nfc(text: &str) -> String {
    text.nfc().collect()
}

/// Usage example attached to a vocabulary item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub hanzi: String,
    pub pinyin: String,
    pub english: String,
}

/// One learnable unit from the vocabulary store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "lesson_id", alias = "lessonId")]
    pub lesson: String,
    pub hanzi: String,
    pub pinyin: String,
    pub english: String,
    #[serde(default, alias = "example_sentence", skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<ExampleSentence>,
}

impl VocabularyItem {
    pub fn new(
        hanzi: impl Into<String>,
        pinyin: impl Into<String>,
        english: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            lesson: String::new(),
            hanzi: hanzi.into(),
            pinyin: pinyin.into(),
            english: english.into(),
            example_sentence: None,
        }
    }

    pub fn with_example(
        mut self,
        hanzi: impl Into<String>,
        pinyin: impl Into<String>,
        english: impl Into<String>,
    ) -> Self {
        self.example_sentence = Some(ExampleSentence {
            hanzi: hanzi.into(),
            pinyin: pinyin.into(),
            english: english.into(),
        });
        self
    }

    /// Headword length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.hanzi.chars().count()
    }

    /// First pinyin syllable group, e.g. "nǐ" for "nǐ hǎo"
    pub fn first_syllable(&self) -> &str {
        self.pinyin.split_whitespace().next().unwrap_or(&self.pinyin)
    }

    /// Compose every text field to NFC so equal-looking strings compare equal
    fn normalized(self) -> Self {
        Self {
            hanzi: nfc(&self.hanzi),
            pinyin: nfc(&self.pinyin),
            english: nfc(&self.english),
            example_sentence: self.example_sentence.map(|e| ExampleSentence {
                hanzi: nfc(&e.hanzi),
                pinyin: nfc(&e.pinyin),
                english: nfc(&e.english),
            }),
            ..self
        }
    }

    fn is_usable(&self) -> bool {
        [&self.hanzi, &self.pinyin, &self.english]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Immutable list of vocabulary items, grouped by lesson
#[derive(Debug, Clone, Default)]
pub struct VocabularyPool {
    items: Vec<VocabularyItem>,
}

impl VocabularyPool {
    /// Build a pool, dropping items with an empty hanzi, pinyin or english
    /// field. Text is stored in NFC.
    pub fn from_items(items: impl IntoIterator<Item = VocabularyItem>) -> Self {
        let mut kept = Vec::new();
        for item in items {
            if item.is_usable() {
                kept.push(item.normalized());
            } else {
                warn!(id = %item.id, hanzi = %item.hanzi, "skipping incomplete vocabulary item");
            }
        }
        Self { items: kept }
    }

    /// Build a pool from lesson-keyed groups; each item inherits its lesson key
    /// when it does not carry one.
    pub fn from_lessons(lessons: BTreeMap<String, Vec<VocabularyItem>>) -> Self {
        Self::from_items(lessons.into_iter().flat_map(|(lesson, items)| {
            items.into_iter().map(move |mut item| {
                if item.lesson.is_empty() {
                    item.lesson = lesson.clone();
                }
                item
            })
        }))
    }

    /// Copy of the pool limited to the given lesson keys
    pub fn restricted_to_lessons<S: AsRef<str>>(&self, lessons: &[S]) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| lessons.iter().any(|l| l.as_ref() == item.lesson))
            .cloned()
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct lesson keys in first-seen order
    pub fn lessons(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.lesson.as_str()) {
                seen.push(&item.lesson);
            }
        }
        seen
    }
}
