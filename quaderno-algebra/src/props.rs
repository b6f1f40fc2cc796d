//! Scalar matrix properties: determinant, trace, rank

use crate::helpers::check_square;
use crate::ops::transpose;
use quaderno_core::{NumMatrix, QuadernoError};

/// Determinant of a 2x2 or 3x3 matrix
///
/// 2x2 uses `ad - bc`; 3x3 expands by minors along the first row.
pub fn determinant(a: &NumMatrix) -> Result<f64, QuadernoError> {
    check_square(a, "determinant")?;
    match a.rows() {
        2 => Ok(a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]),
        3 => Ok(a[(0, 0)] * (a[(1, 1)] * a[(2, 2)] - a[(1, 2)] * a[(2, 1)])
            - a[(0, 1)] * (a[(1, 0)] * a[(2, 2)] - a[(1, 2)] * a[(2, 0)])
            + a[(0, 2)] * (a[(1, 0)] * a[(2, 1)] - a[(1, 1)] * a[(2, 0)])),
        n => Err(QuadernoError::unsupported_order(format!(
            "determinant: defined for orders 2 and 3, got {}×{}",
            n, n
        ))),
    }
}

/// Sum of the main diagonal of a square matrix
pub fn trace(a: &NumMatrix) -> Result<f64, QuadernoError> {
    check_square(a, "trace")?;
    Ok((0..a.rows()).map(|i| a[(i, i)]).sum())
}

/// Rank via Gauss-Jordan elimination with column shifting
///
/// The elimination pivots on the diagonal and assumes at least as many
/// rows as columns; wide matrices go through their transpose, which has
/// the same rank. A column whose pivot cannot be filled by a row swap
/// is replaced by the current last column and retried.
pub fn rank(a: &NumMatrix) -> usize {
    if a.cols() > a.rows() {
        return rank(&transpose(a));
    }

    let rows = a.rows();
    let mut m = a.to_nested();
    let mut rank = a.cols();
    let mut row = 0;

    while row < rank {
        if m[row][row] != 0.0 {
            for r in 0..rows {
                if r != row {
                    let factor = m[r][row] / m[row][row];
                    for c in 0..rank {
                        let delta = factor * m[row][c];
                        m[r][c] -= delta;
                    }
                }
            }
            row += 1;
        } else {
            let mut swapped = false;
            for r in row + 1..rows {
                if m[r][row] != 0.0 {
                    m.swap(row, r);
                    swapped = true;
                    break;
                }
            }
            if !swapped {
                rank -= 1;
                for r in 0..rows {
                    m[r][row] = m[r][rank];
                }
            }
        }
    }

    rank
}
