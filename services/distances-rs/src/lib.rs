//! Italic distances: per-language-pair phonological distance tables.
//!
//! Reads the curated modern and ancient word-pair tables, averages the
//! normalized edit distance of every language pair under the uniform and
//! vowel-weighted cost functions, and writes the sorted table consumed by
//! the figure scripts.

pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;

pub use batch::{average_by_label, group_by_label, round_to, sound_correspondences};
pub use config::{AncientConfig, Config, EngineConfig, ReportConfig, MAX_PRECISION};
pub use dataset::{AncientForms, ModernPairReader, MISSING_MARKERS};
pub use error::DistanceError;
pub use pipeline::{ancient_pairs, average_sources, compute_report};
pub use report::{build_report, write_rows, ReportWriter};
pub use types::{Correspondence, LanguagePair, PairAverage, ReportRow, WordPair};
