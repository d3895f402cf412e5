//! Python module exposing the distance engine to the pandas scripts.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cost::CostVariant;
use crate::engine::PhonologicalEngine;
use crate::segment::Transcription;

fn variant(vowel_weighted: bool) -> CostVariant {
    if vowel_weighted {
        CostVariant::VowelWeighted
    } else {
        CostVariant::Uniform
    }
}

fn engine(ipa: bool) -> PhonologicalEngine {
    PhonologicalEngine::for_transcription(if ipa {
        Transcription::Ipa
    } else {
        Transcription::Asjp
    })
}

/// Segment a transcription into phoneme symbols.
#[pyfunction]
#[pyo3(signature = (form, ipa = false))]
fn tokenize(form: &str, ipa: bool) -> Vec<String> {
    engine(ipa).tokenize(form).into_symbols()
}

/// Raw weighted edit distance between two transcriptions.
#[pyfunction]
#[pyo3(signature = (x, y, vowel_weighted = false, ipa = false))]
fn levenshtein(x: &str, y: &str, vowel_weighted: bool, ipa: bool) -> f64 {
    engine(ipa).raw(x, y, variant(vowel_weighted))
}

/// Edit distance normalized by the longer token count.
#[pyfunction]
#[pyo3(signature = (x, y, vowel_weighted = false, ipa = false))]
fn normalized_distance(x: &str, y: &str, vowel_weighted: bool, ipa: bool) -> PyResult<f64> {
    engine(ipa)
        .normalized(x, y, variant(vowel_weighted))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Batch normalized distances, parallelized with Rayon.
#[pyfunction]
#[pyo3(signature = (pairs, vowel_weighted = false, ipa = false))]
fn batch_normalized_distance(
    pairs: Vec<(String, String)>,
    vowel_weighted: bool,
    ipa: bool,
) -> PyResult<Vec<f64>> {
    engine(ipa)
        .batch_normalized(&pairs, variant(vowel_weighted))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Python module definition.
#[pymodule]
fn italic_phonetic(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(levenshtein, m)?)?;
    m.add_function(wrap_pyfunction!(normalized_distance, m)?)?;
    m.add_function(wrap_pyfunction!(batch_normalized_distance, m)?)?;
    Ok(())
}
