//! Exam assembly: stratified sampling over archetypes and pool items

use crate::config::{ExamConfig, Stratum};
use crate::dedupe::dedupe;
use crate::error::Result;
use crate::questions::{Archetype, ExamQuestion, QuestionFactory, Source};
use crate::shuffle::{shuffle_in_place, shuffled_indices};
use crate::vocab::VocabularyPool;
use rand::Rng;
use std::borrow::Cow;
use tracing::{debug, info};

/// Split `count` across strata by integer weight. Every stratum but the last
/// gets `count * weight / total`; the last takes whatever is left, so the
/// quotas always sum to `count`.
pub fn partition(count: usize, config: &ExamConfig) -> Vec<(Stratum, usize)> {
    let total = config.total_weight();
    let Some((last, rest)) = config.strata.split_last() else {
        return Vec::new();
    };
    if total == 0 {
        return vec![(last.stratum, count)];
    }

    let mut quotas: Vec<(Stratum, usize)> = rest
        .iter()
        .map(|s| {
            let quota = (count as u64 * u64::from(s.weight) / total) as usize;
            (s.stratum, quota)
        })
        .collect();
    let assigned: usize = quotas.iter().map(|(_, q)| q).sum();
    quotas.push((last.stratum, count - assigned));
    quotas
}

impl Stratum {
    fn archetype<R: Rng + ?Sized>(self, rng: &mut R) -> Archetype {
        match self {
            Stratum::Recognition => Archetype::Recognition,
            Stratum::MultipleChoice if rng.gen_bool(0.5) => Archetype::MultipleChoiceCharacter,
            Stratum::MultipleChoice => Archetype::MultipleChoiceMeaning,
            Stratum::ToneSelection => Archetype::ToneSelection,
            Stratum::Matching => Archetype::Matching,
            Stratum::SentenceCompletion => Archetype::SentenceCompletion,
            Stratum::Translation => Archetype::Translation,
            Stratum::CharacterComponent => Archetype::CharacterComponent,
        }
    }
}

/// Walks one shuffled order of the pool, wrapping around when exhausted
struct PoolCursor {
    order: Vec<usize>,
    position: usize,
}

impl PoolCursor {
    fn new<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Self {
            order: shuffled_indices(len, rng),
            position: 0,
        }
    }

    fn next_index(&mut self) -> usize {
        let index = self.order[self.position % self.order.len()];
        self.position += 1;
        index
    }

    /// Up to `size` consecutive draws; never more than one lap of the pool
    fn batch(&mut self, size: usize) -> Vec<usize> {
        let take = size.min(self.order.len());
        (0..take).map(|_| self.next_index()).collect()
    }
}

/// Top-level exam generator over a read-only pool
#[derive(Debug, Clone)]
pub struct ExamAssembler<'a> {
    factory: QuestionFactory<'a>,
    config: ExamConfig,
}

impl<'a> ExamAssembler<'a> {
    /// Validates the config and applies its lesson filter to the pool
    pub fn new(pool: &'a VocabularyPool, config: ExamConfig) -> Result<Self> {
        config.validate()?;
        let pool = match &config.lessons {
            Some(lessons) => Cow::Owned(pool.restricted_to_lessons(lessons)),
            None => Cow::Borrowed(pool),
        };
        let factory = QuestionFactory::with_pool(pool, &config)?;
        Ok(Self { factory, config })
    }

    pub fn pool(&self) -> &VocabularyPool {
        self.factory.pool()
    }

    pub fn generate(&self, count: usize) -> Vec<ExamQuestion> {
        self.generate_with_rng(count, &mut rand::thread_rng())
    }

    /// Exactly `count` questions; `count == 0` gives an empty exam
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Vec<ExamQuestion> {
        if count == 0 {
            return Vec::new();
        }
        let pool_len = self.pool().len();
        info!(count, pool = pool_len, "generating exam");

        let mut cursor = PoolCursor::new(pool_len, rng);
        let mut questions = Vec::with_capacity(count);

        for (stratum, quota) in partition(count, &self.config) {
            debug!(?stratum, quota, "stratum quota");
            for _ in 0..quota {
                let archetype = stratum.archetype(rng);
                let source = match archetype {
                    Archetype::Matching => Source::Batch(cursor.batch(self.config.option_count)),
                    _ => Source::Single(cursor.next_index()),
                };
                let id = format!("{}-{}", archetype.slug(), questions.len() + 1);
                let question = dedupe(self.factory.build(archetype, &source, id, rng));
                debug_assert!(question.is_well_formed(self.config.option_count));
                questions.push(question);
            }
        }

        shuffle_in_place(&mut questions, rng);
        questions
    }
}

/// Generate `count` questions with the default configuration
pub fn generate_exam(pool: &VocabularyPool, count: usize) -> Result<Vec<ExamQuestion>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    Ok(ExamAssembler::new(pool, ExamConfig::default())?.generate(count))
}
