//! Tokenizer and cost strategies bundled behind one entry point.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::cost::{CostVariant, SymbolCost, UniformCost, VowelCycle, VowelWeightedCost};
use crate::distance::{align, edit_distance, normalized_distance};
use crate::error::PhoneticError;
use crate::segment::{PhonemeSequence, Tokenizer, Transcription};
use crate::types::Alignment;

/// Compares raw transcriptions under either cost variant.
#[derive(Debug, Clone)]
pub struct PhonologicalEngine {
    tokenizer: Tokenizer,
    uniform: UniformCost,
    weighted: VowelWeightedCost,
}

impl PhonologicalEngine {
    pub fn new(transcription: Transcription, cycle: VowelCycle) -> Self {
        Self {
            tokenizer: Tokenizer::new(transcription),
            uniform: UniformCost,
            weighted: VowelWeightedCost::new(cycle),
        }
    }

    /// Engine with the default vowel cycle of the transcription system.
    pub fn for_transcription(transcription: Transcription) -> Self {
        Self::new(transcription, VowelCycle::for_transcription(transcription))
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn vowel_cycle(&self) -> &VowelCycle {
        self.weighted.cycle()
    }

    pub fn tokenize(&self, transcription: &str) -> PhonemeSequence {
        self.tokenizer.tokenize(transcription)
    }

    /// The strategy object for a variant.
    pub fn cost(&self, variant: CostVariant) -> &(dyn SymbolCost + Sync) {
        match variant {
            CostVariant::Uniform => &self.uniform,
            CostVariant::VowelWeighted => &self.weighted,
        }
    }

    /// Raw edit distance between two transcriptions.
    pub fn raw(&self, x: &str, y: &str, variant: CostVariant) -> f64 {
        let (x, y) = (self.tokenize(x), self.tokenize(y));
        edit_distance(x.symbols(), y.symbols(), self.cost(variant))
    }

    /// Edit distance divided by the longer token count.
    ///
    /// # Errors
    ///
    /// [`PhoneticError::EmptyPair`] when both transcriptions segment to
    /// nothing.
    pub fn normalized(&self, x: &str, y: &str, variant: CostVariant) -> Result<f64, PhoneticError> {
        let (x, y) = (self.tokenize(x), self.tokenize(y));
        normalized_distance(x.symbols(), y.symbols(), self.cost(variant))
    }

    pub fn align(&self, x: &str, y: &str, variant: CostVariant) -> Alignment {
        let (x, y) = (self.tokenize(x), self.tokenize(y));
        align(x.symbols(), y.symbols(), self.cost(variant))
    }

    /// Normalized distances for many pairs, computed in parallel.
    ///
    /// Output order follows input order. Fails on the first empty pair.
    pub fn batch_normalized<S>(
        &self,
        pairs: &[(S, S)],
        variant: CostVariant,
    ) -> Result<Vec<f64>, PhoneticError>
    where
        S: AsRef<str> + Sync,
    {
        pairs
            .par_iter()
            .map(|(x, y)| self.normalized(x.as_ref(), y.as_ref(), variant))
            .collect()
    }
}

impl Default for PhonologicalEngine {
    fn default() -> Self {
        Self::for_transcription(Transcription::default())
    }
}

/// Count substituted symbol pairs across alignments.
///
/// Sorted by descending frequency, then by the pair itself.
pub fn extract_sound_correspondences(alignments: &[Alignment]) -> Vec<(String, String, usize)> {
    let mut correspondence_counts: FxHashMap<(String, String), usize> = FxHashMap::default();

    for alignment in alignments {
        for correspondence in alignment.extract_correspondences() {
            *correspondence_counts.entry(correspondence).or_insert(0) += 1;
        }
    }

    let mut correspondences: Vec<_> = correspondence_counts
        .into_iter()
        .map(|((a, b), count)| (a, b, count))
        .collect();

    correspondences.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (&a.0, &a.1).cmp(&(&b.0, &b.1))));

    correspondences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_concrete_cases() {
        let engine = PhonologicalEngine::default();
        assert_eq!(engine.normalized("ab", "ac", CostVariant::Uniform), Ok(0.5));
        assert_eq!(engine.raw("pater", "pater", CostVariant::Uniform), 0.0);
        assert_eq!(engine.normalized("pater", "pater", CostVariant::VowelWeighted), Ok(0.0));
    }

    #[test]
    fn test_empty_pair_is_rejected() {
        let engine = PhonologicalEngine::default();
        assert_eq!(
            engine.normalized("", "", CostVariant::Uniform),
            Err(PhoneticError::EmptyPair)
        );
        // a blank is a symbol, not an empty form
        assert_eq!(engine.normalized(" ", "", CostVariant::VowelWeighted), Ok(1.0));
    }

    #[test]
    fn test_normalization_uses_token_count() {
        let engine = PhonologicalEngine::default();
        // "ts~a" is two tokens, "sa" is two tokens
        assert_eq!(engine.normalized("ts~a", "sa", CostVariant::Uniform), Ok(0.5));
    }

    #[test]
    fn test_batch_preserves_order() {
        let engine = PhonologicalEngine::default();
        let pairs = [("a", "a"), ("a", "b"), ("ab", "ac")];
        let distances = engine.batch_normalized(&pairs, CostVariant::Uniform).unwrap();
        assert_eq!(distances, vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_batch_fails_on_empty_pair() {
        let engine = PhonologicalEngine::default();
        let pairs = [("a".to_string(), "b".to_string()), (String::new(), String::new())];
        assert!(engine.batch_normalized(&pairs, CostVariant::Uniform).is_err());
    }

    #[test]
    fn test_ipa_engine() {
        let engine = PhonologicalEngine::for_transcription(Transcription::Ipa);
        assert_eq!(engine.raw("pɛr", "par", CostVariant::VowelWeighted), 0.5);
        assert_eq!(engine.raw("pʰer", "per", CostVariant::Uniform), 1.0);
    }

    #[test]
    fn test_sound_correspondences() {
        let engine = PhonologicalEngine::default();
        let alignments = vec![
            engine.align("pis", "kis", CostVariant::Uniform),
            engine.align("pod", "kod", CostVariant::Uniform),
            engine.align("fEr", "far", CostVariant::Uniform),
        ];

        let correspondences = extract_sound_correspondences(&alignments);
        assert_eq!(correspondences[0], ("p".to_string(), "k".to_string(), 2));
        assert_eq!(correspondences[1], ("E".to_string(), "a".to_string(), 1));
    }
}
