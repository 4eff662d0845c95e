//! Exam shape configuration (TOML file plus environment overrides)

use crate::error::{ExamError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One weighted slice of the exam partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stratum {
    Recognition,
    /// Character or meaning variant, picked per question
    MultipleChoice,
    ToneSelection,
    Matching,
    SentenceCompletion,
    Translation,
    CharacterComponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StratumWeight {
    pub stratum: Stratum,
    pub weight: u32,
}

impl StratumWeight {
    pub const fn new(stratum: Stratum, weight: u32) -> Self {
        Self { stratum, weight }
    }
}

/// Beginner distribution; sentence completion is last and takes the remainder
pub const DEFAULT_STRATA: [StratumWeight; 5] = [
    StratumWeight::new(Stratum::Recognition, 25),
    StratumWeight::new(Stratum::MultipleChoice, 25),
    StratumWeight::new(Stratum::ToneSelection, 20),
    StratumWeight::new(Stratum::Matching, 20),
    StratumWeight::new(Stratum::SentenceCompletion, 10),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamConfig {
    /// Options per question, correct answer included
    pub option_count: usize,
    /// Distractor draws allowed per option before filler text is used
    pub max_attempts: usize,
    pub strata: Vec<StratumWeight>,
    /// Restrict the pool to these lesson keys
    pub lessons: Option<Vec<String>>,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            option_count: 4,
            max_attempts: 5,
            strata: DEFAULT_STRATA.to_vec(),
            lessons: None,
        }
    }
}

impl ExamConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ExamConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ExamError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Apply `EXAM_OPTION_COUNT` / `EXAM_MAX_ATTEMPTS` when they parse
    pub fn with_env_overrides(self) -> Self {
        Self {
            option_count: std::env::var("EXAM_OPTION_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.option_count),
            max_attempts: std::env::var("EXAM_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.max_attempts),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.option_count < 2 {
            return Err(ExamError::invalid_config(format!(
                "option_count must be at least 2, got {}",
                self.option_count
            )));
        }
        if self.max_attempts == 0 {
            return Err(ExamError::invalid_config("max_attempts must be at least 1"));
        }
        if self.strata.is_empty() {
            return Err(ExamError::invalid_config("at least one stratum is required"));
        }
        if self.total_weight() == 0 {
            return Err(ExamError::invalid_config("stratum weights sum to zero"));
        }
        if matches!(&self.lessons, Some(lessons) if lessons.is_empty()) {
            return Err(ExamError::invalid_config("lessons filter is empty"));
        }
        Ok(())
    }

    pub fn total_weight(&self) -> u64 {
        self.strata.iter().map(|s| u64::from(s.weight)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ExamConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_weight(), 100);
    }

    #[test]
    fn test_parse_toml() {
        let config = ExamConfig::from_toml_str(
            r#"
            option_count = 5
            lessons = ["lesson1", "lesson2"]

            [[strata]]
            stratum = "translation"
            weight = 1

            [[strata]]
            stratum = "character-component"
            weight = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.option_count, 5);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.strata[0].stratum, Stratum::Translation);
        assert_eq!(config.lessons.as_deref().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(ExamConfig::from_toml_str("option_count = 1").is_err());
        assert!(ExamConfig::from_toml_str("strata = []").is_err());
        assert!(ExamConfig::from_toml_str(
            "[[strata]]\nstratum = \"matching\"\nweight = 0"
        )
        .is_err());
        assert!(matches!(
            ExamConfig::from_toml_str("option_count = \"four\""),
            Err(ExamError::Toml(_))
        ));
    }
}
