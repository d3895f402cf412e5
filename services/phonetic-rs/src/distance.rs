//! Weighted edit distance, normalization and alignment traceback.

use ndarray::Array2;

use crate::cost::SymbolCost;
use crate::error::PhoneticError;
use crate::types::{Alignment, EditOp, GAP};

const EPSILON: f64 = 1e-9;

/// Fill the (|y|+1)×(|x|+1) table of partial alignment costs.
///
/// Cell `[i, j]` holds the cheapest alignment of `y[..i]` with `x[..j]`.
/// The first row and column accumulate gap costs, which are not unit steps
/// when the cost function discounts some gaps.
pub fn distance_matrix<S, C>(x: &[S], y: &[S], cost: &C) -> Array2<f64>
where
    S: AsRef<str>,
    C: SymbolCost + ?Sized,
{
    let (len_x, len_y) = (x.len(), y.len());
    let mut dp = Array2::<f64>::zeros((len_y + 1, len_x + 1));

    for j in 1..=len_x {
        dp[[0, j]] = dp[[0, j - 1]] + cost.cost(x[j - 1].as_ref(), "");
    }
    for i in 1..=len_y {
        dp[[i, 0]] = dp[[i - 1, 0]] + cost.cost(y[i - 1].as_ref(), "");
    }

    for i in 1..=len_y {
        let seg_y = y[i - 1].as_ref();
        let gap_y = cost.cost(seg_y, "");

        for j in 1..=len_x {
            let seg_x = x[j - 1].as_ref();

            dp[[i, j]] = f64::min(
                f64::min(
                    dp[[i - 1, j]] + gap_y,                // y only
                    dp[[i, j - 1]] + cost.cost(seg_x, ""), // x only
                ),
                dp[[i - 1, j - 1]] + cost.cost(seg_y, seg_x), // substitution or match
            );
        }
    }

    dp
}

/// Minimum total cost of turning `x` into `y`.
///
/// Empty inputs are valid: two empty sequences are at distance 0, and an
/// empty sequence is at the summed gap cost of the other.
pub fn edit_distance<S, C>(x: &[S], y: &[S], cost: &C) -> f64
where
    S: AsRef<str>,
    C: SymbolCost + ?Sized,
{
    let dp = distance_matrix(x, y, cost);
    dp[[y.len(), x.len()]]
}

/// Edit distance divided by the length of the longer sequence.
///
/// # Errors
///
/// [`PhoneticError::EmptyPair`] when both sequences are empty.
pub fn normalized_distance<S, C>(x: &[S], y: &[S], cost: &C) -> Result<f64, PhoneticError>
where
    S: AsRef<str>,
    C: SymbolCost + ?Sized,
{
    let max_len = x.len().max(y.len());
    if max_len == 0 {
        return Err(PhoneticError::EmptyPair);
    }
    Ok(edit_distance(x, y, cost) / max_len as f64)
}

/// Recover one cheapest alignment of `x` (side a) against `y` (side b).
///
/// Ties prefer the diagonal, then a gap in `x`, then a gap in `y`.
pub fn align<S, C>(x: &[S], y: &[S], cost: &C) -> Alignment
where
    S: AsRef<str>,
    C: SymbolCost + ?Sized,
{
    let dp = distance_matrix(x, y, cost);

    let mut i = y.len();
    let mut j = x.len();
    let mut operations = Vec::with_capacity(i + j);
    let mut aligned_a = Vec::with_capacity(i + j);
    let mut aligned_b = Vec::with_capacity(i + j);

    while i > 0 || j > 0 {
        let here = dp[[i, j]];

        if i > 0 && j > 0 {
            let seg_y = y[i - 1].as_ref();
            let seg_x = x[j - 1].as_ref();
            if (dp[[i - 1, j - 1]] + cost.cost(seg_y, seg_x) - here).abs() < EPSILON {
                operations.push(if seg_x == seg_y {
                    EditOp::Match
                } else {
                    EditOp::Substitute
                });
                aligned_a.push(seg_x.to_string());
                aligned_b.push(seg_y.to_string());
                i -= 1;
                j -= 1;
                continue;
            }
        }

        let up_fits = i > 0
            && (j == 0
                || (dp[[i - 1, j]] + cost.cost(y[i - 1].as_ref(), "") - here).abs() < EPSILON);

        if up_fits {
            operations.push(EditOp::Insert);
            aligned_a.push(GAP.to_string());
            aligned_b.push(y[i - 1].as_ref().to_string());
            i -= 1;
        } else {
            operations.push(EditOp::Delete);
            aligned_a.push(x[j - 1].as_ref().to_string());
            aligned_b.push(GAP.to_string());
            j -= 1;
        }
    }

    // Reverse since we backtracked
    operations.reverse();
    aligned_a.reverse();
    aligned_b.reverse();

    Alignment::new(aligned_a, aligned_b, operations, dp[[y.len(), x.len()]])
}
