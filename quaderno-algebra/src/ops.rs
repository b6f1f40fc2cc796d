//! Matrix operations: arithmetic and transformations
//!
//! All operations are pure: they borrow their inputs and build a new
//! matrix. Inverse entries come back unrounded; presentation rounding
//! is a separate step owned by the caller.

use crate::helpers::{check_product_shapes, check_same_shape, check_square};
use crate::props::determinant;
use quaderno_core::{NumMatrix, QuadernoError};

/// Element-wise sum of two equally-shaped matrices
pub fn add(a: &NumMatrix, b: &NumMatrix) -> Result<NumMatrix, QuadernoError> {
    check_same_shape(a, b, "add")?;
    let mut out = NumMatrix::zeros(a.rows(), a.cols());
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            out[(i, j)] = a[(i, j)] + b[(i, j)];
        }
    }
    Ok(out)
}

/// Element-wise difference of two equally-shaped matrices
pub fn subtract(a: &NumMatrix, b: &NumMatrix) -> Result<NumMatrix, QuadernoError> {
    check_same_shape(a, b, "subtract")?;
    let mut out = NumMatrix::zeros(a.rows(), a.cols());
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            out[(i, j)] = a[(i, j)] - b[(i, j)];
        }
    }
    Ok(out)
}

/// Matrix product, requiring `a.cols() == b.rows()`
pub fn multiply(a: &NumMatrix, b: &NumMatrix) -> Result<NumMatrix, QuadernoError> {
    check_product_shapes(a, b, "multiply")?;
    let mut out = NumMatrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let mut sum = 0.0;
            for k in 0..a.cols() {
                sum += a[(i, k)] * b[(k, j)];
            }
            out[(i, j)] = sum;
        }
    }
    Ok(out)
}

/// Transpose; defined for every shape
pub fn transpose(a: &NumMatrix) -> NumMatrix {
    let mut out = NumMatrix::zeros(a.cols(), a.rows());
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            out[(j, i)] = a[(i, j)];
        }
    }
    out
}

/// Inverse of a 2x2 or 3x3 matrix with non-zero determinant
///
/// The 3x3 path writes the adjugate out entry by entry (the nine signed
/// 2x2 minors, already transposed) and divides by the determinant.
pub fn inverse(a: &NumMatrix) -> Result<NumMatrix, QuadernoError> {
    check_square(a, "inverse")?;
    let det = determinant(a)?;
    if det == 0.0 {
        return Err(QuadernoError::singular());
    }

    if a.rows() == 2 {
        let mut inv = NumMatrix::zeros(2, 2);
        inv[(0, 0)] = a[(1, 1)] / det;
        inv[(0, 1)] = -a[(0, 1)] / det;
        inv[(1, 0)] = -a[(1, 0)] / det;
        inv[(1, 1)] = a[(0, 0)] / det;
        Ok(inv)
    } else {
        // determinant() already limits the order to 2 or 3
        let mut inv = NumMatrix::zeros(3, 3);
        inv[(0, 0)] = (a[(1, 1)] * a[(2, 2)] - a[(1, 2)] * a[(2, 1)]) / det;
        inv[(0, 1)] = -(a[(0, 1)] * a[(2, 2)] - a[(0, 2)] * a[(2, 1)]) / det;
        inv[(0, 2)] = (a[(0, 1)] * a[(1, 2)] - a[(0, 2)] * a[(1, 1)]) / det;
        inv[(1, 0)] = -(a[(1, 0)] * a[(2, 2)] - a[(1, 2)] * a[(2, 0)]) / det;
        inv[(1, 1)] = (a[(0, 0)] * a[(2, 2)] - a[(0, 2)] * a[(2, 0)]) / det;
        inv[(1, 2)] = -(a[(0, 0)] * a[(1, 2)] - a[(0, 2)] * a[(1, 0)]) / det;
        inv[(2, 0)] = (a[(1, 0)] * a[(2, 1)] - a[(1, 1)] * a[(2, 0)]) / det;
        inv[(2, 1)] = -(a[(0, 0)] * a[(2, 1)] - a[(0, 1)] * a[(2, 0)]) / det;
        inv[(2, 2)] = (a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]) / det;
        Ok(inv)
    }
}
