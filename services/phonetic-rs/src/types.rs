//! Alignment records produced by tracing back through a distance matrix.

use serde::{Deserialize, Serialize};

/// Gap marker used in aligned columns.
pub const GAP: &str = "-";

/// Edit operation in sequence alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp {
    Match,
    Substitute,
    Insert,
    Delete,
}

/// Result of phonological alignment.
///
/// `sequence_a` and `sequence_b` have equal length; a gap is written as
/// [`GAP`]. `Insert` means a symbol present only in `b`, `Delete` one
/// present only in `a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub sequence_a: Vec<String>,
    pub sequence_b: Vec<String>,
    pub operations: Vec<EditOp>,
    pub cost: f64,
}

impl Alignment {
    pub fn new(
        sequence_a: Vec<String>,
        sequence_b: Vec<String>,
        operations: Vec<EditOp>,
        cost: f64,
    ) -> Self {
        Self {
            sequence_a,
            sequence_b,
            operations,
            cost,
        }
    }

    /// Substituted symbol pairs, in alignment order
    pub fn extract_correspondences(&self) -> Vec<(String, String)> {
        self.operations
            .iter()
            .zip(self.sequence_a.iter().zip(&self.sequence_b))
            .filter(|(op, _)| **op == EditOp::Substitute)
            .map(|(_, (a, b))| (a.clone(), b.clone()))
            .collect()
    }

    /// Render as two rows of space-separated columns.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .sequence_a
            .iter()
            .zip(&self.sequence_b)
            .map(|(a, b)| a.chars().count().max(b.chars().count()))
            .collect();

        let row = |seq: &[String]| {
            seq.iter()
                .zip(&widths)
                .map(|(s, &w)| format!("{s:<w$}"))
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        };

        format!("{}\n{}", row(&self.sequence_a), row(&self.sequence_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_correspondences() {
        let alignment = Alignment::new(
            strings(&["p", "a", "-", "r"]),
            strings(&["p", "e", "t", "l"]),
            vec![
                EditOp::Match,
                EditOp::Substitute,
                EditOp::Insert,
                EditOp::Substitute,
            ],
            3.0,
        );

        assert_eq!(
            alignment.extract_correspondences(),
            vec![
                ("a".to_string(), "e".to_string()),
                ("r".to_string(), "l".to_string())
            ]
        );
    }

    #[test]
    fn test_render_pads_columns() {
        let alignment = Alignment::new(
            strings(&["ts~", "a"]),
            strings(&["s", "-"]),
            vec![EditOp::Substitute, EditOp::Delete],
            2.0,
        );
        assert_eq!(alignment.render(), "ts~ a\ns   -");
    }
}
