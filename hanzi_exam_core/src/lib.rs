//! Hanzi Exam Core - randomized practice exams for Chinese vocabulary
//!
//! Builds multiple-choice questions (recognition, tone selection, sentence
//! completion, matching, translation, character components) from a read-only
//! vocabulary pool. Every question carries its correct answer exactly once
//! among pairwise-distinct options.

mod config;
mod dedupe;
mod distractors;
mod error;
mod exam;
mod import;
mod logging;
mod questions;
mod shuffle;
mod tones;
mod vocab;

#[cfg(feature = "python")]
mod python;

pub use config::{ExamConfig, Stratum, StratumWeight};
pub use dedupe::dedupe;
pub use distractors::DistractorGenerator;
pub use error::{ExamError, Result};
pub use exam::{generate_exam, ExamAssembler};
pub use import::{load_csv, load_json, load_pool, parse_json_str, read_csv};
pub use logging::init as init_logging;
pub use questions::{Archetype, CorrectAnswer, ExamQuestion, MatchPair, QuestionFactory, Source};
pub use tones::{strip_tones, to_numbered, tone_of, tone_variants};
pub use vocab::{ExampleSentence, VocabularyItem, VocabularyPool};
