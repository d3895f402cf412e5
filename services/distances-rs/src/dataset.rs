//! Readers for the curated word-pair tables.
//!
//! Both tables are semicolon-delimited with a header row. Cells matching
//! one of [`MISSING_MARKERS`] (or empty) are missing values; rows with a
//! missing form are skipped for the comparison that needs them.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::DistanceError;
use crate::types::{LanguagePair, WordPair};

/// Cell contents read as missing values.
pub const MISSING_MARKERS: [&str; 8] = ["", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL"];

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, DistanceError> {
    let file = File::open(path).map_err(|e| DistanceError::FileNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

fn csv_error(path: &Path, e: csv::Error) -> DistanceError {
    DistanceError::CsvParse {
        path: path.to_path_buf(),
        offset: e.position().map_or(0, |p| p.byte()),
        source: e,
    }
}

fn column_index(
    header: &csv::StringRecord,
    path: &Path,
    column: &str,
) -> Result<usize, DistanceError> {
    header
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| DistanceError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Reads the modern word-pair table.
///
/// Expected columns (others are ignored): `pairs` (language-pair label),
/// `form_x`, `form_y` and `cognate` (1 for cognates, 0 otherwise). Only
/// cognate rows are returned.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DistanceError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`DistanceError::CsvParse`] | Malformed CSV record |
/// | [`DistanceError::MissingColumn`] | A required column is absent |
/// | [`DistanceError::InvalidCognateFlag`] | `cognate` is not 0, 1 or missing |
pub struct ModernPairReader {
    path: PathBuf,
}

impl ModernPairReader {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Vec<WordPair>, DistanceError> {
        let mut rdr = open_csv(&self.path)?;
        let header = rdr.headers().map_err(|e| csv_error(&self.path, e))?.clone();

        let label_col = column_index(&header, &self.path, "pairs")?;
        let x_col = column_index(&header, &self.path, "form_x")?;
        let y_col = column_index(&header, &self.path, "form_y")?;
        let cognate_col = column_index(&header, &self.path, "cognate")?;

        let mut pairs = Vec::new();
        let mut non_cognate = 0usize;

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| csv_error(&self.path, e))?;
            let cell = |col: usize| record.get(col).unwrap_or("").trim();

            if !self.is_cognate(cell(cognate_col), row_index)? {
                non_cognate += 1;
                continue;
            }

            let (label, x, y) = (cell(label_col), cell(x_col), cell(y_col));
            if is_missing(label) || is_missing(x) || is_missing(y) {
                warn!(row_index, "skipping cognate row with a missing value");
                continue;
            }

            pairs.push(WordPair::new(label, x, y).at_row(row_index));
        }

        info!(pairs = pairs.len(), non_cognate, "read modern word pairs");
        Ok(pairs)
    }

    fn is_cognate(&self, raw: &str, row_index: usize) -> Result<bool, DistanceError> {
        if is_missing(raw) {
            return Ok(false);
        }
        match raw.parse::<f64>() {
            Ok(v) if v == 1.0 => Ok(true),
            Ok(v) if v == 0.0 => Ok(false),
            _ => Err(DistanceError::InvalidCognateFlag {
                path: self.path.clone(),
                row_index,
                raw: raw.to_string(),
            }),
        }
    }
}

/// Ancient forms, one column per language, one row per etymon.
#[derive(Debug, Clone)]
pub struct AncientForms {
    path: PathBuf,
    languages: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl AncientForms {
    /// Read the ancient table. Every column is kept; cells are trimmed and
    /// missing markers become `None`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self, DistanceError> {
        let mut rdr = open_csv(path)?;
        let header = rdr.headers().map_err(|e| csv_error(path, e))?.clone();
        let languages: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| csv_error(path, e))?;
            let row = (0..languages.len())
                .map(|col| {
                    record
                        .get(col)
                        .map(str::trim)
                        .filter(|cell| !is_missing(cell))
                        .map(str::to_string)
                })
                .collect();
            rows.push(row);
        }

        info!(rows = rows.len(), columns = languages.len(), "read ancient forms");
        Ok(Self {
            path: path.to_path_buf(),
            languages,
            rows,
        })
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Word pairs for one comparison, labelled `left-right`, dropping rows
    /// where either language lacks a form.
    pub fn pairs_for(&self, pair: &LanguagePair) -> Result<Vec<WordPair>, DistanceError> {
        let left = self.column(&pair.left)?;
        let right = self.column(&pair.right)?;
        let label = pair.label();

        let pairs: Vec<WordPair> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(row_index, row)| match (&row[left], &row[right]) {
                (Some(x), Some(y)) => {
                    Some(WordPair::new(label.as_str(), x.as_str(), y.as_str()).at_row(row_index))
                }
                _ => None,
            })
            .collect();

        debug!(
            %pair,
            kept = pairs.len(),
            dropped = self.rows.len() - pairs.len(),
            "selected ancient comparison"
        );
        Ok(pairs)
    }

    fn column(&self, language: &str) -> Result<usize, DistanceError> {
        self.languages
            .iter()
            .position(|l| l == language)
            .ok_or_else(|| DistanceError::MissingColumn {
                path: self.path.clone(),
                column: language.to_string(),
            })
    }
}
