//! Shared data structures for the distance pipeline.

use std::fmt;

use italic_phonetic::CostVariant;
use serde::Serialize;

/// Two transcribed forms compared under one language-pair label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPair {
    pub label: String,
    pub form_x: String,
    pub form_y: String,
    /// Zero-based data row in the source file, for error reports.
    pub row_index: usize,
}

impl WordPair {
    pub fn new(label: impl Into<String>, form_x: impl Into<String>, form_y: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            form_x: form_x.into(),
            form_y: form_y.into(),
            row_index: 0,
        }
    }

    pub fn at_row(mut self, row_index: usize) -> Self {
        self.row_index = row_index;
        self
    }
}

/// The two languages named by a pair label such as `latin-oscan`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub left: String,
    pub right: String,
}

impl LanguagePair {
    const SEPARATORS: [char; 3] = ['~', '-', '_'];

    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Split a label on the first `~`, `-` or `_`. Labels without a
    /// separator name no recognizable languages.
    pub fn parse(label: &str) -> Option<Self> {
        let (left, right) = label.split_once(Self::SEPARATORS)?;
        let (left, right) = (left.trim(), right.trim());
        if left.is_empty() || right.is_empty() {
            return None;
        }
        Some(Self::new(left, right))
    }

    /// Canonical label, `left-right`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.left, self.right)
    }

    /// Readable name, `Left ~ Right`.
    pub fn display_name(&self) -> String {
        format!("{} ~ {}", title_case(&self.left), title_case(&self.right))
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn title_case(word: &str) -> String {
    word.split(' ')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mean normalized distance of one label, per computed cost variant.
#[derive(Debug, Clone, PartialEq)]
pub struct PairAverage {
    pub label: String,
    pub n_pairs: usize,
    pub means: Vec<(CostVariant, f64)>,
}

impl PairAverage {
    pub fn mean(&self, variant: CostVariant) -> Option<f64> {
        self.means
            .iter()
            .find(|(v, _)| *v == variant)
            .map(|(_, mean)| *mean)
    }
}

/// One line of the exported distance table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "")]
    pub index: usize,
    pub pair: String,
    pub regular: f64,
    #[serde(rename = "vowel-weighted")]
    pub vowel_weighted: f64,
    pub italic: u8,
}

/// Count of one substituted symbol pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correspondence {
    pub from: String,
    pub to: String,
    pub count: usize,
}
