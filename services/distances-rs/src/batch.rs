//! Per-label averaging of normalized distances.

use italic_phonetic::{
    extract_sound_correspondences, CostVariant, PhoneticError, PhonologicalEngine,
};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};

use crate::error::DistanceError;
use crate::types::{Correspondence, PairAverage, WordPair};

/// Round to `precision` decimal places.
///
/// Rounds the exact binary value of `value`, with exact ties going to the
/// even digit, so `0.03125` becomes `0.0312`.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let digits = precision as usize;
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Group pairs by label, keeping labels in order of first appearance.
pub fn group_by_label(pairs: &[WordPair]) -> Vec<(&str, Vec<&WordPair>)> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(&str, Vec<&WordPair>)> = Vec::new();

    for pair in pairs {
        let slot = *index.entry(pair.label.as_str()).or_insert_with(|| {
            groups.push((pair.label.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(pair);
    }

    groups
}

/// Mean normalized distance of a group under one cost variant, unrounded.
///
/// Pairs are compared in parallel; the sum is taken in input order so the
/// result does not depend on scheduling.
fn group_mean(
    label: &str,
    group: &[&WordPair],
    engine: &PhonologicalEngine,
    variant: CostVariant,
) -> Result<f64, DistanceError> {
    let distances: Vec<f64> = group
        .par_iter()
        .map(|pair| {
            engine
                .normalized(&pair.form_x, &pair.form_y, variant)
                .map_err(|e| match e {
                    PhoneticError::EmptyPair => DistanceError::EmptyPair {
                        label: label.to_string(),
                        row_index: pair.row_index,
                    },
                    other => DistanceError::Engine(other),
                })
        })
        .collect::<Result<_, _>>()?;

    Ok(distances.iter().sum::<f64>() / distances.len() as f64)
}

/// Average normalized distances per label.
///
/// Each requested variant is an independent pass over every group with its
/// own cost function. Means are rounded to `precision` decimals.
///
/// # Errors
///
/// [`DistanceError::EmptyPair`] for the first pair whose forms are both
/// empty.
#[instrument(skip_all, fields(pairs = pairs.len(), precision = precision))]
pub fn average_by_label(
    pairs: &[WordPair],
    engine: &PhonologicalEngine,
    variants: &[CostVariant],
    precision: u32,
) -> Result<Vec<PairAverage>, DistanceError> {
    let groups = group_by_label(pairs);
    let mut averages: Vec<PairAverage> = groups
        .iter()
        .map(|(label, group)| PairAverage {
            label: label.to_string(),
            n_pairs: group.len(),
            means: Vec::with_capacity(variants.len()),
        })
        .collect();

    for &variant in variants {
        for ((label, group), average) in groups.iter().zip(averages.iter_mut()) {
            let mean = round_to(group_mean(label, group, engine, variant)?, precision);
            debug!(
                label,
                variant = variant.as_str(),
                n = group.len(),
                mean,
                "group averaged"
            );
            average.means.push((variant, mean));
        }
        info!(variant = variant.as_str(), groups = groups.len(), "averaging pass complete");
    }

    Ok(averages)
}

/// Substitution counts over the cheapest alignments of all pairs.
pub fn sound_correspondences(
    pairs: &[WordPair],
    engine: &PhonologicalEngine,
    variant: CostVariant,
) -> Vec<Correspondence> {
    let alignments: Vec<_> = pairs
        .par_iter()
        .map(|pair| engine.align(&pair.form_x, &pair.form_y, variant))
        .collect();

    extract_sound_correspondences(&alignments)
        .into_iter()
        .map(|(from, to, count)| Correspondence { from, to, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(label: &str, forms: &[(&str, &str)]) -> Vec<WordPair> {
        forms
            .iter()
            .enumerate()
            .map(|(i, (x, y))| WordPair::new(label, *x, *y).at_row(i))
            .collect()
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(1.0 / 3.0, 4), 0.3333);
        assert_eq!(round_to(0.0, 4), 0.0);
    }

    #[test]
    fn test_round_to_ties_go_to_even() {
        assert_eq!(round_to(0.03125, 4), 0.0312);
        assert_eq!(round_to(0.09375, 4), 0.0938);
        assert_eq!(round_to(2.5, 0), 2.0);
        // 0.00015 is stored just below the tie
        assert_eq!(round_to(0.00015, 4), 0.0001);
    }

    #[test]
    fn test_group_mean_on_exact_tie() {
        let engine = PhonologicalEngine::default();
        let input = pairs(
            "x-y",
            &[("abcdefgh", "abcdefgk"), ("a", "a"), ("b", "b"), ("c", "c")],
        );
        let averages = average_by_label(&input, &engine, &[CostVariant::Uniform], 4).unwrap();
        // (1/8) / 4 = 0.03125
        assert_eq!(averages[0].mean(CostVariant::Uniform), Some(0.0312));
    }

    #[test]
    fn test_single_group_mean() {
        let engine = PhonologicalEngine::default();
        let input = pairs("x-y", &[("a", "a"), ("a", "b")]);
        let averages = average_by_label(&input, &engine, &[CostVariant::Uniform], 4).unwrap();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].n_pairs, 2);
        assert_eq!(averages[0].mean(CostVariant::Uniform), Some(0.5));
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let mut input = pairs("b-c", &[("pater", "pater")]);
        input.extend(pairs("a-b", &[("ab", "ac")]));
        input.extend(pairs("b-c", &[("a", "b")]));

        let groups = group_by_label(&input);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "b-c");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "a-b");
    }

    #[test]
    fn test_both_variants_are_independent_passes() {
        let engine = PhonologicalEngine::default();
        let input = pairs("latin-oscan", &[("pEtir", "pater"), ("fra", "fra")]);
        let averages = average_by_label(&input, &engine, &CostVariant::ALL, 4).unwrap();

        // uniform: 2/5 and 0 -> 0.2; weighted: 1/5 and 0 -> 0.1
        assert_eq!(averages[0].mean(CostVariant::Uniform), Some(0.2));
        assert_eq!(averages[0].mean(CostVariant::VowelWeighted), Some(0.1));
    }

    #[test]
    fn test_empty_pair_reports_label_and_row() {
        let engine = PhonologicalEngine::default();
        let input = pairs("en-nl", &[("a", "b"), ("", "")]);
        let err = average_by_label(&input, &engine, &[CostVariant::Uniform], 4).unwrap_err();
        match err {
            DistanceError::EmptyPair { label, row_index } => {
                assert_eq!(label, "en-nl");
                assert_eq!(row_index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sound_correspondences() {
        let engine = PhonologicalEngine::default();
        let input = pairs("latin-oscan", &[("kwis", "pis"), ("kwod", "pod")]);
        let found = sound_correspondences(&input, &engine, CostVariant::Uniform);
        assert!(found.iter().any(|c| c.count == 2));
    }
}
