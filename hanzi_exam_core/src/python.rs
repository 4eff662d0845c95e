//! Python bindings (enabled with the `python` feature)

use crate::config::ExamConfig;
use crate::error::ExamError;
use crate::exam::ExamAssembler;
use crate::import::load_pool;
use crate::tones;
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

impl From<ExamError> for PyErr {
    fn from(err: ExamError) -> Self {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}

/// Generate an exam from a vocabulary file and return it as a JSON array
#[pyfunction]
#[pyo3(name = "generate_exam", signature = (vocab_path, count, seed=None, config_path=None))]
pub fn py_generate_exam(
    vocab_path: &str,
    count: usize,
    seed: Option<u64>,
    config_path: Option<&str>,
) -> PyResult<String> {
    let pool = load_pool(vocab_path)?;
    let config = match config_path {
        Some(path) => ExamConfig::load(path)?,
        None => ExamConfig::default(),
    }
    .with_env_overrides();

    let assembler = ExamAssembler::new(&pool, config)?;
    let questions = match seed {
        Some(seed) => assembler.generate_with_rng(count, &mut StdRng::seed_from_u64(seed)),
        None => assembler.generate(count),
    };

    serde_json::to_string(&questions).map_err(|e| ExamError::from(e).into())
}

#[pyfunction]
#[pyo3(name = "tone_variants")]
pub fn py_tone_variants(syllable: &str) -> Vec<String> {
    tones::tone_variants(syllable).to_vec()
}

#[pyfunction]
#[pyo3(name = "strip_tones")]
pub fn py_strip_tones(pinyin: &str) -> String {
    tones::strip_tones(pinyin)
}

#[pyfunction]
#[pyo3(name = "to_numbered")]
pub fn py_to_numbered(pinyin: &str) -> String {
    tones::to_numbered(pinyin)
}

/// Hanzi exam core Python module
#[pymodule]
fn hanzi_exam_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    crate::logging::init();

    m.add_function(wrap_pyfunction!(py_generate_exam, m)?)?;
    m.add_function(wrap_pyfunction!(py_tone_variants, m)?)?;
    m.add_function(wrap_pyfunction!(py_strip_tones, m)?)?;
    m.add_function(wrap_pyfunction!(py_to_numbered, m)?)?;

    Ok(())
}
