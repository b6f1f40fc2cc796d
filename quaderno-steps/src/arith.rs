//! Narration for element-wise arithmetic and the matrix product

use crate::shown;
use quaderno_core::{fmt_num, CellGrid};

/// Steps for element-wise addition, one line per output cell
pub fn addition_steps(a: &CellGrid, b: &CellGrid) -> Vec<String> {
    let mut steps = Vec::new();
    steps.push(format!(
        "Perform element-wise addition of {} and {}.",
        a.name, b.name
    ));
    steps.push(format!(
        "Formula: C[i][j] = {}[i][j] + {}[i][j]",
        a.name, b.name
    ));

    for i in 0..a.rows {
        for j in 0..a.cols {
            let sum = a.data[i][j].value() + b.data[i][j].value();
            steps.push(format!(
                "C[{},{}] = {} + {} = {}",
                i + 1,
                j + 1,
                shown(&a.data[i][j]),
                shown(&b.data[i][j]),
                fmt_num(sum)
            ));
        }
    }
    steps
}

/// Steps for element-wise subtraction, one line per output cell
pub fn subtraction_steps(a: &CellGrid, b: &CellGrid) -> Vec<String> {
    let mut steps = Vec::new();
    steps.push(format!(
        "Perform element-wise subtraction of {} from {}.",
        b.name, a.name
    ));
    steps.push(format!(
        "Formula: C[i][j] = {}[i][j] - {}[i][j]",
        a.name, b.name
    ));

    for i in 0..a.rows {
        for j in 0..a.cols {
            let diff = a.data[i][j].value() - b.data[i][j].value();
            steps.push(format!(
                "C[{},{}] = {} - {} = {}",
                i + 1,
                j + 1,
                shown(&a.data[i][j]),
                shown(&b.data[i][j]),
                fmt_num(diff)
            ));
        }
    }
    steps
}

/// Steps for the matrix product, one dot-product line per output cell
pub fn multiplication_steps(a: &CellGrid, b: &CellGrid) -> Vec<String> {
    let mut steps = Vec::new();
    steps.push(format!(
        "Multiply {} (Rows: {}, Cols: {}) by {} (Rows: {}, Cols: {}).",
        a.name, a.rows, a.cols, b.name, b.rows, b.cols
    ));

    for i in 0..a.rows {
        for j in 0..b.cols {
            let mut terms = Vec::with_capacity(a.cols);
            let mut sum = 0.0;
            for k in 0..a.cols {
                let va = a.data[i][k].value();
                let vb = b.data[k][j].value();
                sum += va * vb;
                terms.push(format!("({} × {})", fmt_num(va), fmt_num(vb)));
            }
            steps.push(format!(
                "C[{},{}] (Row {} of {} • Col {} of {}) = {} = {}",
                i + 1,
                j + 1,
                i + 1,
                a.name,
                j + 1,
                b.name,
                terms.join(" + "),
                fmt_num(sum)
            ));
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(name: &str, rows: &[&[&str]]) -> CellGrid {
        CellGrid::from_text(name, rows).unwrap()
    }

    #[test]
    fn test_addition_steps() {
        let a = grid("A", &[&["1", "2"], &["3", "4"]]);
        let b = grid("B", &[&["5", "6"], &["7", "8"]]);
        let steps = addition_steps(&a, &b);
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0], "Perform element-wise addition of A and B.");
        assert_eq!(steps[1], "Formula: C[i][j] = A[i][j] + B[i][j]");
        assert_eq!(steps[2], "C[1,1] = 1 + 5 = 6");
        assert_eq!(steps[5], "C[2,2] = 4 + 8 = 12");
    }

    #[test]
    fn test_addition_narrates_raw_text() {
        let a = grid("A", &[&["abc", ""]]);
        let b = grid("B", &[&["5", "2"]]);
        let steps = addition_steps(&a, &b);
        assert_eq!(steps[2], "C[1,1] = abc + 5 = 5");
        assert_eq!(steps[3], "C[1,2] = 0 + 2 = 2");
    }

    #[test]
    fn test_subtraction_steps() {
        let a = grid("A", &[&["5"]]);
        let b = grid("B", &[&["1"]]);
        let steps = subtraction_steps(&a, &b);
        assert_eq!(steps[0], "Perform element-wise subtraction of B from A.");
        assert_eq!(steps[2], "C[1,1] = 5 - 1 = 4");
    }

    #[test]
    fn test_multiplication_steps() {
        let a = grid("Matrix A", &[&["1", "2"], &["3", "4"]]);
        let b = grid("Matrix B", &[&["5", "6"], &["7", "8"]]);
        let steps = multiplication_steps(&a, &b);
        assert_eq!(steps.len(), 5);
        assert_eq!(
            steps[0],
            "Multiply Matrix A (Rows: 2, Cols: 2) by Matrix B (Rows: 2, Cols: 2)."
        );
        assert_eq!(
            steps[1],
            "C[1,1] (Row 1 of Matrix A • Col 1 of Matrix B) = (1 × 5) + (2 × 7) = 19"
        );
        assert_eq!(
            steps[4],
            "C[2,2] (Row 2 of Matrix A • Col 2 of Matrix B) = (3 × 6) + (4 × 8) = 50"
        );
    }

    #[test]
    fn test_multiplication_rectangular_count() {
        let a = grid("A", &[&["1", "2", "3"], &["4", "5", "6"]]);
        let b = grid("B", &[&["1"], &["1"], &["1"]]);
        let steps = multiplication_steps(&a, &b);
        assert_eq!(steps.len(), 1 + 2);
        assert_eq!(steps[1], "C[1,1] (Row 1 of A • Col 1 of B) = (1 × 1) + (2 × 1) + (3 × 1) = 6");
    }
}
