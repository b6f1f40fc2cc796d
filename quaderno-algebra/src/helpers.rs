//! Shape checks shared by the operations

use quaderno_core::{NumMatrix, QuadernoError};

/// Check that two matrices have the same dimensions
pub fn check_same_shape(a: &NumMatrix, b: &NumMatrix, op: &str) -> Result<(), QuadernoError> {
    if a.shape() != b.shape() {
        return Err(QuadernoError::shape_mismatch(format!(
            "{}: matrices must have same dimensions: {}×{} vs {}×{}",
            op,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Check that two matrices have compatible dimensions for a product
pub fn check_product_shapes(a: &NumMatrix, b: &NumMatrix, op: &str) -> Result<(), QuadernoError> {
    if a.cols() != b.rows() {
        return Err(QuadernoError::shape_mismatch(format!(
            "{}: incompatible dimensions {}×{} and {}×{}",
            op,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Check that a matrix is square
///
/// Non-square input counts as an unsupported order, not a shape
/// mismatch; shape mismatches are reserved for binary operand pairs.
pub fn check_square(m: &NumMatrix, op: &str) -> Result<(), QuadernoError> {
    if !m.is_square() {
        return Err(QuadernoError::unsupported_order(format!(
            "{}: requires square matrix, got {}×{}",
            op,
            m.rows(),
            m.cols()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quaderno_core::codes;

    #[test]
    fn test_check_same_shape() {
        let a = NumMatrix::zeros(2, 3);
        let b = NumMatrix::zeros(2, 3);
        assert!(check_same_shape(&a, &b, "add").is_ok());

        let c = NumMatrix::zeros(3, 2);
        let err = check_same_shape(&a, &c, "add").unwrap_err();
        assert_eq!(err.code, codes::SHAPE_MISMATCH);
        assert!(err.message.contains("add"));
    }

    #[test]
    fn test_check_product_shapes() {
        let a = NumMatrix::zeros(2, 3);
        let b = NumMatrix::zeros(3, 5);
        assert!(check_product_shapes(&a, &b, "multiply").is_ok());

        let err = check_product_shapes(&b, &a, "multiply").unwrap_err();
        assert_eq!(err.code, codes::SHAPE_MISMATCH);
        assert!(check_product_shapes(&a, &a, "multiply").is_err());
    }

    #[test]
    fn test_check_square() {
        assert!(check_square(&NumMatrix::zeros(3, 3), "trace").is_ok());
        let err = check_square(&NumMatrix::zeros(2, 3), "trace").unwrap_err();
        assert_eq!(err.code, codes::UNSUPPORTED_ORDER);
        assert!(err.message.contains("requires square matrix"));
    }
}
