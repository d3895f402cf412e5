//! End-to-end computation of the phonological distance table.

use std::path::Path;

use italic_phonetic::{CostVariant, PhonologicalEngine};
use tracing::{info, instrument, warn};

use crate::batch::average_by_label;
use crate::config::Config;
use crate::dataset::{AncientForms, ModernPairReader};
use crate::error::DistanceError;
use crate::report::build_report;
use crate::types::{PairAverage, ReportRow, WordPair};

/// Word pairs drawn from the configured ancient comparisons, in
/// comparison order.
pub fn ancient_pairs(forms: &AncientForms, config: &Config) -> Result<Vec<WordPair>, DistanceError> {
    let mut pairs = Vec::new();
    for comparison in config.ancient.language_pairs() {
        let selected = forms.pairs_for(&comparison)?;
        if selected.is_empty() {
            warn!(%comparison, "comparison has no complete rows");
        }
        pairs.extend(selected);
    }
    Ok(pairs)
}

/// Average both cost variants for every label of every source.
pub fn average_sources(
    sources: &[(&str, Vec<WordPair>)],
    engine: &PhonologicalEngine,
    precision: u32,
) -> Result<Vec<PairAverage>, DistanceError> {
    let mut averages = Vec::new();
    for (what, pairs) in sources {
        if pairs.is_empty() {
            return Err(DistanceError::EmptyDataset {
                what: what.to_string(),
            });
        }
        averages.extend(average_by_label(pairs, engine, &CostVariant::ALL, precision)?);
    }
    Ok(averages)
}

/// Read both tables, average per language pair and build the sorted report.
#[instrument(skip_all, fields(modern = %modern.display(), ancient = %ancient.display()))]
pub fn compute_report(
    modern: &Path,
    ancient: &Path,
    config: &Config,
) -> Result<Vec<ReportRow>, DistanceError> {
    config.report.validate()?;
    let engine = config.engine.build_engine()?;
    info!(transcription = %config.engine.transcription, "engine ready");

    let modern_pairs = ModernPairReader::new(modern).read()?;
    let forms = AncientForms::read(ancient)?;
    let ancient_pairs = ancient_pairs(&forms, config)?;

    let averages = average_sources(
        &[("modern word pairs", modern_pairs), ("ancient comparisons", ancient_pairs)],
        &engine,
        config.report.precision,
    )?;

    let rows = build_report(&averages, &config.report)?;
    info!(rows = rows.len(), "distance table built");
    Ok(rows)
}
