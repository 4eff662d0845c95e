//! Vocabulary pool import (JSON and CSV)

use crate::error::{ExamError, Result};
use crate::vocab::{ExampleSentence, VocabularyItem, VocabularyPool};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Load a pool from a file, picking the parser from the extension
pub fn load_pool(file_path: impl AsRef<Path>) -> Result<VocabularyPool> {
    let path = file_path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        _ => Err(ExamError::UnsupportedFormat { extension }),
    }
}

/// Either `{ "lesson1": [...], ... }` or a flat `[...]`
#[derive(Deserialize)]
#[serde(untagged)]
enum PoolDocument {
    Lessons(BTreeMap<String, Vec<VocabularyItem>>),
    Flat(Vec<VocabularyItem>),
}

pub fn load_json(path: impl AsRef<Path>) -> Result<VocabularyPool> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ExamError::io(path, e))?;
    let pool = parse_json_str(&text)?;
    info!(path = %path.display(), items = pool.len(), "loaded vocabulary JSON");
    Ok(pool)
}

pub fn parse_json_str(text: &str) -> Result<VocabularyPool> {
    let document: PoolDocument = serde_json::from_str(text)?;
    Ok(match document {
        PoolDocument::Lessons(lessons) => VocabularyPool::from_lessons(lessons),
        PoolDocument::Flat(items) => VocabularyPool::from_items(items),
    })
}

/// Column index mapping
#[derive(Debug, Default, Clone)]
struct ColumnMapping {
    hanzi: usize,
    pinyin: usize,
    english: usize,
    id: Option<usize>,
    lesson: Option<usize>,
    example_hanzi: Option<usize>,
    example_pinyin: Option<usize>,
    example_english: Option<usize>,
}

/// Detect column indices from header names
fn detect_columns(headers: &[String]) -> Result<ColumnMapping> {
    let mut mapping = ColumnMapping::default();
    let (mut hanzi, mut pinyin, mut english) = (None, None, None);

    for (i, header) in headers.iter().enumerate() {
        match header.trim().to_lowercase().as_str() {
            "hanzi" | "character" | "characters" | "word" => hanzi = Some(i),
            "pinyin" => pinyin = Some(i),
            "english" | "meaning" | "definition" | "gloss" => english = Some(i),
            "id" => mapping.id = Some(i),
            "lesson" | "lesson_id" => mapping.lesson = Some(i),
            "example_hanzi" => mapping.example_hanzi = Some(i),
            "example_pinyin" => mapping.example_pinyin = Some(i),
            "example_english" => mapping.example_english = Some(i),
            _ => {}
        }
    }

    mapping.hanzi = hanzi.ok_or(ExamError::MissingColumn { column: "hanzi" })?;
    mapping.pinyin = pinyin.ok_or(ExamError::MissingColumn { column: "pinyin" })?;
    mapping.english = english.ok_or(ExamError::MissingColumn { column: "english" })?;
    Ok(mapping)
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<VocabularyPool> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| ExamError::io(path, e))?;
    let pool = read_csv(file)?;
    info!(path = %path.display(), items = pool.len(), "loaded vocabulary CSV");
    Ok(pool)
}

/// Parse CSV rows into a pool; rows with an empty required field are dropped
/// by the pool constructor.
pub fn read_csv<R: Read>(reader: R) -> Result<VocabularyPool> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let mapping = detect_columns(&headers)?;

    let mut items = Vec::new();
    for result in reader.records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let optional = |i: Option<usize>| i.map(field).unwrap_or_default();

        let example_hanzi = optional(mapping.example_hanzi);
        let example_english = optional(mapping.example_english);
        let example_sentence = if example_hanzi.is_empty() || example_english.is_empty() {
            None
        } else {
            Some(ExampleSentence {
                hanzi: example_hanzi,
                pinyin: optional(mapping.example_pinyin),
                english: example_english,
            })
        };

        items.push(VocabularyItem {
            id: optional(mapping.id),
            lesson: optional(mapping.lesson),
            hanzi: field(mapping.hanzi),
            pinyin: field(mapping.pinyin),
            english: field(mapping.english),
            example_sentence,
        });
    }

    Ok(VocabularyPool::from_items(items))
}
