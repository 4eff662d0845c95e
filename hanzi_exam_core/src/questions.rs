//! Question records and the per-archetype question factory

use crate::config::ExamConfig;
use crate::distractors::{DistractorGenerator, COMPONENTS};
use crate::error::{ExamError, Result};
use crate::shuffle::shuffle_in_place;
use crate::tones::strip_tones;
use crate::vocab::{VocabularyItem, VocabularyPool};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Question template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Archetype {
    Recognition,
    MultipleChoiceCharacter,
    MultipleChoiceMeaning,
    ToneSelection,
    SentenceCompletion,
    Matching,
    Translation,
    CharacterComponent,
}

impl Archetype {
    pub const ALL: [Archetype; 8] = [
        Archetype::Recognition,
        Archetype::MultipleChoiceCharacter,
        Archetype::MultipleChoiceMeaning,
        Archetype::ToneSelection,
        Archetype::SentenceCompletion,
        Archetype::Matching,
        Archetype::Translation,
        Archetype::CharacterComponent,
    ];

    /// Stable prefix for question ids
    pub fn slug(self) -> &'static str {
        match self {
            Archetype::Recognition => "recognition",
            Archetype::MultipleChoiceCharacter => "multiple-choice-character",
            Archetype::MultipleChoiceMeaning => "multiple-choice-meaning",
            Archetype::ToneSelection => "tone-selection",
            Archetype::SentenceCompletion => "complete-sentence",
            Archetype::Matching => "matching",
            Archetype::Translation => "translation",
            Archetype::CharacterComponent => "component",
        }
    }
}

/// The answer a presentation layer compares the learner's response against.
///
/// Matching answers are an ordered right column and compare as a `Vec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    Ordered(Vec<String>),
}

impl CorrectAnswer {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            CorrectAnswer::Single(answer) => Some(answer),
            CorrectAnswer::Ordered(_) => None,
        }
    }
}

/// Left/right row of a matching question in canonical order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
    pub english: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    pub id: String,
    pub archetype: Archetype,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hanzi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_pairs: Option<Vec<MatchPair>>,
}

impl ExamQuestion {
    fn new(
        id: String,
        archetype: Archetype,
        prompt: String,
        options: Vec<String>,
        correct_answer: CorrectAnswer,
    ) -> Self {
        Self {
            id,
            archetype,
            prompt,
            options,
            correct_answer,
            hanzi: None,
            pinyin: None,
            english: None,
            context: None,
            match_pairs: None,
        }
    }

    fn about(mut self, item: &VocabularyItem) -> Self {
        self.hanzi = Some(item.hanzi.clone());
        self.pinyin = Some(item.pinyin.clone());
        self.english = Some(item.english.clone());
        self
    }

    pub fn has_distinct_options(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.options.len());
        self.options.iter().all(|o| seen.insert(o.as_str()))
    }

    /// Option count, distinctness, and answer placement all hold
    pub fn is_well_formed(&self, option_count: usize) -> bool {
        if self.options.len() != option_count || !self.has_distinct_options() {
            return false;
        }
        match &self.correct_answer {
            CorrectAnswer::Single(answer) => {
                self.options.iter().filter(|o| *o == answer).count() == 1
            }
            CorrectAnswer::Ordered(column) => {
                let rights: Option<Vec<&str>> = self
                    .match_pairs
                    .as_ref()
                    .map(|pairs| pairs.iter().map(|p| p.right.as_str()).collect());
                rights.is_some_and(|r| r.iter().copied().eq(column.iter().map(String::as_str)))
                    && column.iter().all(|c| self.options.contains(c))
            }
        }
    }
}

/// What a constructor draws from: one pool item, or a batch for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Single(usize),
    Batch(Vec<usize>),
}

impl Source {
    pub fn indices(&self) -> &[usize] {
        match self {
            Source::Single(index) => std::slice::from_ref(index),
            Source::Batch(indices) => indices,
        }
    }
}

/// Builds complete questions, one constructor per archetype
#[derive(Debug, Clone)]
pub struct QuestionFactory<'a> {
    pool: Cow<'a, VocabularyPool>,
    option_count: usize,
    distractors: DistractorGenerator,
}

impl<'a> QuestionFactory<'a> {
    pub fn new(pool: &'a VocabularyPool, config: &ExamConfig) -> Result<Self> {
        Self::with_pool(Cow::Borrowed(pool), config)
    }

    /// Borrowed or owned pool, e.g. one narrowed by a lesson filter
    pub(crate) fn with_pool(pool: Cow<'a, VocabularyPool>, config: &ExamConfig) -> Result<Self> {
        if pool.is_empty() {
            return Err(ExamError::EmptyPool);
        }
        config.validate()?;
        Ok(Self {
            pool,
            option_count: config.option_count,
            distractors: DistractorGenerator::new(config.max_attempts),
        })
    }

    pub fn pool(&self) -> &VocabularyPool {
        &self.pool
    }

    pub fn build<R: Rng + ?Sized>(
        &self,
        archetype: Archetype,
        source: &Source,
        id: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let index = source.indices().first().copied().unwrap_or(0) % self.pool.len();
        match archetype {
            Archetype::Recognition => self.recognition(index, id, rng),
            Archetype::MultipleChoiceCharacter => self.multiple_choice_character(index, id, rng),
            Archetype::MultipleChoiceMeaning => self.multiple_choice_meaning(index, id, rng),
            Archetype::ToneSelection => self.tone_selection(index, id, rng),
            Archetype::SentenceCompletion => self.sentence_completion(index, id, rng),
            Archetype::Matching => self.matching(source.indices(), id, rng),
            Archetype::Translation => self.translation(index, id, rng),
            Archetype::CharacterComponent => self.character_component(index, id, rng),
        }
    }

    fn item(&self, index: usize) -> &VocabularyItem {
        &self.pool.items()[index % self.pool.len()]
    }

    /// Every pool item except the one at `index`
    fn others(&self, index: usize) -> Vec<&VocabularyItem> {
        self.pool
            .items()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item)
            .collect()
    }

    /// Answer plus `option_count - 1` distractors, shuffled
    fn options_for<R: Rng + ?Sized>(
        &self,
        archetype: Archetype,
        index: usize,
        answer: &str,
        rng: &mut R,
    ) -> Vec<String> {
        let others = self.others(index);
        let count = self.option_count - 1;
        let mut options = self
            .distractors
            .generate(self.item(index), answer, &others, archetype, count, rng);
        options.push(answer.to_string());
        shuffle_in_place(&mut options, rng);
        options
    }

    fn single<R: Rng + ?Sized>(
        &self,
        archetype: Archetype,
        index: usize,
        id: String,
        prompt: String,
        answer: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let options = self.options_for(archetype, index, &answer, rng);
        ExamQuestion::new(id, archetype, prompt, options, CorrectAnswer::Single(answer))
    }

    fn recognition<R: Rng + ?Sized>(&self, index: usize, id: String, rng: &mut R) -> ExamQuestion {
        let item = self.item(index);
        self.single(
            Archetype::Recognition,
            index,
            id,
            "What is the meaning of this character?".to_string(),
            item.english.clone(),
            rng,
        )
        .about(item)
    }

    fn multiple_choice_character<R: Rng + ?Sized>(
        &self,
        index: usize,
        id: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let item = self.item(index);
        self.single(
            Archetype::MultipleChoiceCharacter,
            index,
            id,
            format!("Choose the correct Hanzi for \"{}\":", item.english),
            item.hanzi.clone(),
            rng,
        )
        .about(item)
    }

    fn multiple_choice_meaning<R: Rng + ?Sized>(
        &self,
        index: usize,
        id: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let item = self.item(index);
        self.single(
            Archetype::MultipleChoiceMeaning,
            index,
            id,
            format!("Choose the correct meaning for \"{}\":", item.hanzi),
            item.english.clone(),
            rng,
        )
        .about(item)
    }

    /// Tone of the first character, asked against its first pinyin syllable
    fn tone_selection<R: Rng + ?Sized>(
        &self,
        index: usize,
        id: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let item = self.item(index);
        let character: String = item.hanzi.chars().take(1).collect();
        let syllable = item.first_syllable().to_string();
        let skeleton = strip_tones(&syllable);

        let mut question = self.single(
            Archetype::ToneSelection,
            index,
            id,
            format!("Select the correct tone for \"{character}\" ({skeleton}):"),
            syllable.clone(),
            rng,
        );
        question.hanzi = Some(character);
        question.pinyin = Some(syllable);
        question.english = Some(item.english.clone());
        question
    }

    fn sentence_completion<R: Rng + ?Sized>(
        &self,
        index: usize,
        id: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let item = self.item(index);
        let context = match &item.example_sentence {
            Some(example) if example.hanzi.contains(&item.hanzi) => {
                example.hanzi.replacen(&item.hanzi, "___", 1)
            }
            _ => format!("请用\"{}\"造句。", item.hanzi),
        };

        let mut question = self.single(
            Archetype::SentenceCompletion,
            index,
            id,
            "Complete the sentence with the correct character:".to_string(),
            item.hanzi.clone(),
            rng,
        )
        .about(item);
        question.context = Some(context);
        question
    }

    /// Needs an example sentence; otherwise asks for the meaning instead
    fn translation<R: Rng + ?Sized>(&self, index: usize, id: String, rng: &mut R) -> ExamQuestion {
        let item = self.item(index);
        let Some(example) = item
            .example_sentence
            .as_ref()
            .filter(|e| !e.hanzi.trim().is_empty() && !e.english.trim().is_empty())
        else {
            return self.multiple_choice_meaning(index, id, rng);
        };

        let mut question = self.single(
            Archetype::Translation,
            index,
            id,
            "Translate this sentence to English:".to_string(),
            example.english.clone(),
            rng,
        );
        question.context = Some(example.hanzi.clone());
        question.hanzi = Some(example.hanzi.clone());
        question.pinyin = Some(example.pinyin.clone());
        question.english = Some(example.english.clone());
        question
    }

    /// Single characters only; the components are illustrative, not a real
    /// radical lookup
    fn character_component<R: Rng + ?Sized>(
        &self,
        index: usize,
        id: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let item = self.item(index);
        if item.char_len() != 1 {
            return self.multiple_choice_meaning(index, id, rng);
        }

        let (component, gloss) = COMPONENTS.choose(rng).copied().unwrap_or(COMPONENTS[0]);
        let answer = format!("{component} ({gloss})");
        self.single(
            Archetype::CharacterComponent,
            index,
            id,
            format!("Which component is found in the character \"{}\"?", item.hanzi),
            answer,
            rng,
        )
        .about(item)
    }

    /// Hanzi on the left, pinyin on the right. The batch is cut to the option
    /// count and to distinct pinyin so the right column has no duplicates.
    fn matching<R: Rng + ?Sized>(
        &self,
        indices: &[usize],
        id: String,
        rng: &mut R,
    ) -> ExamQuestion {
        let mut pairs: Vec<MatchPair> = Vec::with_capacity(self.option_count);
        for &index in indices {
            if pairs.len() == self.option_count {
                break;
            }
            let item = self.item(index);
            if pairs.iter().any(|p| p.right == item.pinyin || p.left == item.hanzi) {
                continue;
            }
            pairs.push(MatchPair {
                left: item.hanzi.clone(),
                right: item.pinyin.clone(),
                english: item.english.clone(),
            });
        }
        if pairs.is_empty() {
            let item = self.item(0);
            pairs.push(MatchPair {
                left: item.hanzi.clone(),
                right: item.pinyin.clone(),
                english: item.english.clone(),
            });
        }

        // short batches are topped up with readings of items outside the batch
        let column: Vec<String> = pairs.iter().map(|p| p.right.clone()).collect();
        let mut options = column.clone();
        if options.len() < self.option_count {
            let outside: Vec<&VocabularyItem> = self
                .pool
                .items()
                .iter()
                .filter(|item| !column.contains(&item.pinyin))
                .collect();
            let target = self.item(indices.first().copied().unwrap_or(0));
            let count = self.option_count - options.len();
            options.extend(self.distractors.generate(
                target,
                &column[0],
                &outside,
                Archetype::Matching,
                count,
                rng,
            ));
        }
        shuffle_in_place(&mut options, rng);

        let mut question = ExamQuestion::new(
            id,
            Archetype::Matching,
            "Match the characters with their correct pronunciation:".to_string(),
            options,
            CorrectAnswer::Ordered(column),
        );
        question.match_pairs = Some(pairs);
        question
    }
}
