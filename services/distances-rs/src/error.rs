//! Error types for dataset I/O, batch averaging and reporting.

use std::path::PathBuf;

use italic_phonetic::{CostVariant, PhoneticError};

/// Errors from reading word lists, averaging distances and writing reports.
#[derive(Debug, thiserror::Error)]
pub enum DistanceError {
    /// Returned when an input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when a required column is absent from the header.
    #[error("missing column \"{column}\" in {path}")]
    MissingColumn {
        /// Path to the CSV file.
        path: PathBuf,
        /// Name of the column that was looked up.
        column: String,
    },

    /// Returned when the cognacy flag is neither 0, 1 nor missing.
    #[error("invalid cognate flag \"{raw}\" in {path}, row {row_index}")]
    InvalidCognateFlag {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// The raw cell value.
        raw: String,
    },

    /// Returned when a filtered dataset contributes no word pairs at all.
    #[error("no usable word pairs in {what}")]
    EmptyDataset {
        /// Which dataset or comparison came up empty.
        what: String,
    },

    /// Returned when both forms of a pair segment to nothing.
    #[error("pair \"{label}\", row {row_index}: both forms are empty")]
    EmptyPair {
        /// Language-pair label of the offending row.
        label: String,
        /// Zero-based row index in its source file.
        row_index: usize,
    },

    /// Returned when a report is requested for a variant that was not computed.
    #[error("pair \"{label}\" has no {} average", .variant.as_str())]
    MissingVariant {
        /// Language-pair label.
        label: String,
        /// The absent cost variant.
        variant: CostVariant,
    },

    /// Returned when the configuration file cannot be read.
    #[error("cannot read config file {path}")]
    ConfigRead {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the configuration file is not valid TOML for the schema.
    #[error("invalid config file {path}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// Returned when the report precision is outside the supported range.
    #[error("precision {precision} is out of range (at most {max} decimals)")]
    InvalidPrecision {
        /// Configured number of decimals.
        precision: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// Wraps an engine configuration error such as a bad vowel cycle.
    #[error("engine configuration: {0}")]
    Engine(#[from] PhoneticError),

    /// Returned when an output file cannot be created or written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying CSV or I/O error.
        source: csv::Error,
    },
}
