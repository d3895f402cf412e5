//! Per-symbol substitution costs.
//!
//! The edit distance is parameterized by a [`SymbolCost`]; the empty symbol
//! `""` stands for a gap, so `cost(x, "")` is the price of inserting or
//! deleting `x`.

use serde::{Deserialize, Serialize};

use crate::error::PhoneticError;
use crate::segment::Transcription;

/// Symmetric, non-negative cost of aligning two symbols.
pub trait SymbolCost {
    fn cost(&self, a: &str, b: &str) -> f64;
}

impl<C: SymbolCost + ?Sized> SymbolCost for &C {
    fn cost(&self, a: &str, b: &str) -> f64 {
        (**self).cost(a, b)
    }
}

/// Which cost function a computation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostVariant {
    /// Every mismatch costs 1.
    Uniform,
    /// Neighbouring vowels and the reduced vowel cost 0.5 against vowels.
    VowelWeighted,
}

impl CostVariant {
    pub const ALL: [CostVariant; 2] = [CostVariant::Uniform, CostVariant::VowelWeighted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uniform => "regular",
            Self::VowelWeighted => "vowel-weighted",
        }
    }
}

/// Plain Levenshtein costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCost;

impl SymbolCost for UniformCost {
    fn cost(&self, a: &str, b: &str) -> f64 {
        if a == b {
            0.0
        } else {
            1.0
        }
    }
}

/// Ordered ring of vowels plus a reduced (schwa-like) vowel.
///
/// Adjacency wraps around: with `i e E a o u`, `u` neighbours `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VowelCycle {
    vowels: Vec<String>,
    reduced: String,
}

impl VowelCycle {
    /// Build a cycle. Needs at least three distinct, non-empty vowels so that
    /// no vowel is its own neighbour, and a reduced vowel outside the cycle.
    pub fn new<I, S>(vowels: I, reduced: impl Into<String>) -> Result<Self, PhoneticError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vowels: Vec<String> = vowels.into_iter().map(Into::into).collect();
        let reduced = reduced.into();

        if vowels.len() < 3 {
            return Err(invalid(format!(
                "need at least 3 vowels, got {}",
                vowels.len()
            )));
        }
        if vowels.iter().any(String::is_empty) || reduced.is_empty() {
            return Err(invalid("vowel symbols must be non-empty".to_string()));
        }
        for (i, v) in vowels.iter().enumerate() {
            if vowels[..i].contains(v) {
                return Err(invalid(format!("duplicate vowel {v:?}")));
            }
        }
        if vowels.contains(&reduced) {
            return Err(invalid(format!(
                "reduced vowel {reduced:?} is also a cycle member"
            )));
        }

        Ok(Self { vowels, reduced })
    }

    /// `i e E a o u` with reduced vowel `3`.
    pub fn asjp() -> Self {
        Self {
            vowels: ["i", "e", "E", "a", "o", "u"].map(String::from).to_vec(),
            reduced: "3".to_string(),
        }
    }

    /// `i e ɛ a o u` with reduced vowel `ə`.
    pub fn ipa() -> Self {
        Self {
            vowels: ["i", "e", "ɛ", "a", "o", "u"].map(String::from).to_vec(),
            reduced: "ə".to_string(),
        }
    }

    pub fn for_transcription(transcription: Transcription) -> Self {
        match transcription {
            Transcription::Asjp => Self::asjp(),
            Transcription::Ipa => Self::ipa(),
        }
    }

    pub fn vowels(&self) -> &[String] {
        &self.vowels
    }

    pub fn reduced(&self) -> &str {
        &self.reduced
    }

    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.vowels.iter().position(|v| v == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.position(symbol).is_some()
    }

    /// True when `a` and `b` are distinct cycle members one step apart.
    pub fn adjacent(&self, a: &str, b: &str) -> bool {
        let n = self.vowels.len();
        match (self.position(a), self.position(b)) {
            (Some(i), Some(j)) => (i + 1) % n == j || (j + 1) % n == i,
            _ => false,
        }
    }
}

fn invalid(reason: String) -> PhoneticError {
    PhoneticError::InvalidVowelCycle { reason }
}

/// Costs that treat close vowels as half a mismatch.
#[derive(Debug, Clone)]
pub struct VowelWeightedCost {
    cycle: VowelCycle,
}

impl VowelWeightedCost {
    pub const HALF: f64 = 0.5;

    pub fn new(cycle: VowelCycle) -> Self {
        Self { cycle }
    }

    pub fn cycle(&self) -> &VowelCycle {
        &self.cycle
    }
}

impl Default for VowelWeightedCost {
    fn default() -> Self {
        Self::new(VowelCycle::asjp())
    }
}

impl SymbolCost for VowelWeightedCost {
    fn cost(&self, a: &str, b: &str) -> f64 {
        // Equality first: nothing below may price a match above zero.
        if a == b {
            return 0.0;
        }
        if self.cycle.adjacent(a, b) {
            return Self::HALF;
        }

        let reduced = self.cycle.reduced();
        let reduced_against_vowel = (a == reduced && self.cycle.contains(b))
            || (b == reduced && self.cycle.contains(a));
        if reduced_against_vowel {
            return Self::HALF;
        }

        1.0
    }
}
