//! Italic phonetic: weighted phonological edit distance.
//!
//! Provides:
//! - Segmentation of ASJP and IPA transcriptions into phoneme sequences
//! - Pluggable symbol costs (uniform, vowel-weighted)
//! - Edit distance, normalization and alignment traceback
//! - Python bindings via PyO3 behind the `python` feature

pub mod cost;
pub mod distance;
pub mod engine;
pub mod error;
pub mod segment;
pub mod types;

#[cfg(feature = "python")]
mod python;

pub use cost::{CostVariant, SymbolCost, UniformCost, VowelCycle, VowelWeightedCost};
pub use distance::{align, distance_matrix, edit_distance, normalized_distance};
pub use engine::{extract_sound_correspondences, PhonologicalEngine};
pub use error::PhoneticError;
pub use segment::{PhonemeSequence, Tokenizer, Transcription};
pub use types::{Alignment, EditOp, GAP};
