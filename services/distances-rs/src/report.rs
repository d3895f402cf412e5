//! Building and writing the per-pair distance table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use italic_phonetic::CostVariant;
use ordered_float::OrderedFloat;
use tracing::{debug, info, instrument};

use crate::config::ReportConfig;
use crate::error::DistanceError;
use crate::types::{PairAverage, ReportRow};

/// Turn averages into report rows, sorted ascending by the vowel-weighted
/// mean. Equal means keep their input order.
///
/// # Errors
///
/// [`DistanceError::MissingVariant`] if an average lacks either variant.
pub fn build_report(
    averages: &[PairAverage],
    config: &ReportConfig,
) -> Result<Vec<ReportRow>, DistanceError> {
    let mean = |avg: &PairAverage, variant: CostVariant| {
        avg.mean(variant).ok_or_else(|| DistanceError::MissingVariant {
            label: avg.label.clone(),
            variant,
        })
    };

    let mut rows = averages
        .iter()
        .map(|avg| -> Result<ReportRow, DistanceError> {
            Ok(ReportRow {
                index: 0,
                pair: config.display_name(&avg.label),
                regular: mean(avg, CostVariant::Uniform)?,
                vowel_weighted: mean(avg, CostVariant::VowelWeighted)?,
                italic: u8::from(config.is_italic(&avg.label)),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by_key(|row| OrderedFloat(row.vowel_weighted));
    for (index, row) in rows.iter_mut().enumerate() {
        row.index = index;
    }

    Ok(rows)
}

/// Serialize rows as a semicolon-delimited table with a leading index column.
pub fn write_rows<W: io::Write>(writer: W, rows: &[ReportRow]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the distance table to a file, creating parent directories.
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// # Errors
    ///
    /// Returns [`DistanceError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(path = %self.path.display(), rows = rows.len()))]
    pub fn write(&self, rows: &[ReportRow]) -> Result<(), DistanceError> {
        let write_error = |source: csv::Error| DistanceError::WriteFile {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_error(e.into()))?;
            debug!("output directory ready");
        }

        let file = fs::File::create(&self.path).map_err(|e| write_error(e.into()))?;
        write_rows(io::BufWriter::new(file), rows).map_err(write_error)?;

        info!("wrote distance table");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn average(label: &str, regular: f64, weighted: f64) -> PairAverage {
        PairAverage {
            label: label.to_string(),
            n_pairs: 1,
            means: vec![
                (CostVariant::Uniform, regular),
                (CostVariant::VowelWeighted, weighted),
            ],
        }
    }

    #[test]
    fn test_sorted_by_vowel_weighted() {
        let averages = vec![
            average("english-french", 0.7, 0.65),
            average("latin-oscan", 0.4, 0.3),
            average("afrikaans-dutch", 0.2, 0.15),
        ];
        let rows = build_report(&averages, &ReportConfig::default()).unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.pair.as_str()).collect();
        assert_eq!(names, vec!["Afrikaans ~ Dutch", "Oscan ~ Latin", "English ~ French"]);
        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(rows.iter().map(|r| r.italic).collect::<Vec<_>>(), vec![0, 1, 0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let averages = vec![average("b-c", 0.5, 0.2), average("a-b", 0.4, 0.2)];
        let rows = build_report(&averages, &ReportConfig::default()).unwrap();
        assert_eq!(rows[0].pair, "B ~ C");
    }

    #[test]
    fn test_missing_variant() {
        let averages = vec![PairAverage {
            label: "a-b".into(),
            n_pairs: 1,
            means: vec![(CostVariant::Uniform, 0.5)],
        }];
        let err = build_report(&averages, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, DistanceError::MissingVariant { .. }));
    }

    #[test]
    fn test_write_rows_format() {
        let rows = vec![ReportRow {
            index: 0,
            pair: "Umbrian ~ Oscan".into(),
            regular: 0.4567,
            vowel_weighted: 0.41,
            italic: 1,
        }];
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            ";pair;regular;vowel-weighted;italic\n0;Umbrian ~ Oscan;0.4567;0.41;1\n"
        );
    }
}
