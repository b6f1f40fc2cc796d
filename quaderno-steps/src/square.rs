//! Narration for determinant, trace, and the one-line method notes

use crate::shown;
use quaderno_core::{fmt_num, CellGrid};

/// Steps for the determinant: full derivation for orders 2 and 3,
/// a generic method note for anything else
pub fn determinant_steps(m: &CellGrid) -> Vec<String> {
    let mut steps = Vec::new();
    match m.shape() {
        (2, 2) => {
            steps.push(format!("Calculate determinant of 2x2 matrix {}.", m.name));
            steps.push("Formula: ad - bc".to_string());
            let a = m.data[0][0].value();
            let b = m.data[0][1].value();
            let c = m.data[1][0].value();
            let d = m.data[1][1].value();
            steps.push(format!(
                "= ({} × {}) - ({} × {})",
                fmt_num(a),
                fmt_num(d),
                fmt_num(b),
                fmt_num(c)
            ));
            steps.push(format!("= {} - {}", fmt_num(a * d), fmt_num(b * c)));
            steps.push(format!("= {}", fmt_num(a * d - b * c)));
        }
        (3, 3) => {
            steps.push(format!(
                "Calculate determinant of 3x3 matrix {} using expansion by minors (Row 1).",
                m.name
            ));
            steps.push("Formula: a(ei - fh) - b(di - fg) + c(dh - eg)".to_string());
            let a = m.data[0][0].value();
            let b = m.data[0][1].value();
            let c = m.data[0][2].value();
            let d1 = m.data[1][1].value() * m.data[2][2].value()
                - m.data[1][2].value() * m.data[2][1].value();
            let d2 = m.data[1][0].value() * m.data[2][2].value()
                - m.data[1][2].value() * m.data[2][0].value();
            let d3 = m.data[1][0].value() * m.data[2][1].value()
                - m.data[1][1].value() * m.data[2][0].value();

            steps.push(format!(
                "Term 1: {} × |Minor 1| = {} × (({}×{}) - ({}×{})) = {} × {}",
                fmt_num(a),
                fmt_num(a),
                shown(&m.data[1][1]),
                shown(&m.data[2][2]),
                shown(&m.data[1][2]),
                shown(&m.data[2][1]),
                fmt_num(a),
                fmt_num(d1)
            ));
            steps.push(format!(
                "Term 2: {} × |Minor 2| = {} × (({}×{}) - ({}×{})) = {} × {}",
                fmt_num(b),
                fmt_num(b),
                shown(&m.data[1][0]),
                shown(&m.data[2][2]),
                shown(&m.data[1][2]),
                shown(&m.data[2][0]),
                fmt_num(b),
                fmt_num(d2)
            ));
            steps.push(format!(
                "Term 3: {} × |Minor 3| = {} × (({}×{}) - ({}×{})) = {} × {}",
                fmt_num(c),
                fmt_num(c),
                shown(&m.data[1][0]),
                shown(&m.data[2][1]),
                shown(&m.data[1][1]),
                shown(&m.data[2][0]),
                fmt_num(c),
                fmt_num(d3)
            ));

            steps.push(format!(
                "Total = ({} × {}) - ({} × {}) + ({} × {})",
                fmt_num(a),
                fmt_num(d1),
                fmt_num(b),
                fmt_num(d2),
                fmt_num(c),
                fmt_num(d3)
            ));
            steps.push(format!(
                "= {} - {} + {}",
                fmt_num(a * d1),
                fmt_num(b * d2),
                fmt_num(c * d3)
            ));
            steps.push(format!("= {}", fmt_num(a * d1 - b * d2 + c * d3)));
        }
        (rows, cols) => {
            steps.push(format!(
                "Determinants of {}x{} matrices are computed using Gaussian elimination or LU decomposition.",
                rows, cols
            ));
            steps.push("Complexity increases factorially for expansion by minors.".to_string());
        }
    }
    steps
}

/// Summary line plus the diagonal sum written out
pub fn trace_steps(m: &CellGrid) -> Vec<String> {
    let n = m.rows.min(m.cols);
    let diag: Vec<f64> = (0..n).map(|i| m.data[i][i].value()).collect();
    let sum: f64 = diag.iter().sum();
    let terms: Vec<String> = diag.iter().map(|&v| fmt_num(v)).collect();
    vec![
        format!(
            "Calculate trace of {}x{} matrix {}: sum of the main diagonal.",
            m.rows, m.cols, m.name
        ),
        format!("tr({}) = {} = {}", m.name, terms.join(" + "), fmt_num(sum)),
    ]
}

/// Single method note shown with an inverse result
pub fn inverse_note(m: &CellGrid) -> Vec<String> {
    vec![format!(
        "Inverse of {} computed from the determinant and the adjugate matrix.",
        m.name
    )]
}

/// Single method note shown with a rank result
pub fn rank_note(m: &CellGrid) -> Vec<String> {
    vec![format!(
        "Rank of {} calculated by reducing to row echelon form and counting non-zero rows.",
        m.name
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(name: &str, rows: &[&[&str]]) -> CellGrid {
        CellGrid::from_text(name, rows).unwrap()
    }

    #[test]
    fn test_determinant_2x2_lines() {
        let m = grid("A", &[&["1", "2"], &["3", "4"]]);
        let steps = determinant_steps(&m);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], "Calculate determinant of 2x2 matrix A.");
        assert_eq!(steps[1], "Formula: ad - bc");
        assert_eq!(steps[2], "= (1 × 4) - (2 × 3)");
        assert_eq!(steps[3], "= 4 - 6");
        assert_eq!(steps[4], "= -2");
    }

    #[test]
    fn test_determinant_3x3_lines() {
        let m = grid("D", &[&["2", "0", "0"], &["0", "3", "0"], &["0", "0", "4"]]);
        let steps = determinant_steps(&m);
        assert_eq!(steps.len(), 8);
        assert_eq!(
            steps[0],
            "Calculate determinant of 3x3 matrix D using expansion by minors (Row 1)."
        );
        assert_eq!(
            steps[2],
            "Term 1: 2 × |Minor 1| = 2 × ((3×4) - (0×0)) = 2 × 12"
        );
        assert_eq!(steps[5], "Total = (2 × 12) - (0 × 0) + (0 × 0)");
        assert_eq!(steps[7], "= 24");
    }

    #[test]
    fn test_determinant_generic_note() {
        let m = grid(
            "Z",
            &[
                &["0", "0", "0", "0"],
                &["0", "0", "0", "0"],
                &["0", "0", "0", "0"],
                &["0", "0", "0", "0"],
            ],
        );
        let steps = determinant_steps(&m);
        assert_eq!(steps.len(), 2);
        assert!(steps[0].contains("4x4"));
    }

    #[test]
    fn test_trace_steps() {
        let m = grid("B", &[&["4", "-2", "1"], &["0", "5", "3"], &["1", "1", "9"]]);
        let steps = trace_steps(&m);
        assert_eq!(steps.len(), 2);
        assert_eq!(
            steps[0],
            "Calculate trace of 3x3 matrix B: sum of the main diagonal."
        );
        assert_eq!(steps[1], "tr(B) = 4 + 5 + 9 = 18");
    }

    #[test]
    fn test_method_notes() {
        let m = grid("A", &[&["1", "2"], &["3", "4"]]);
        let inv = inverse_note(&m);
        assert_eq!(inv.len(), 1);
        assert!(inv[0].contains("adjugate"));
        let rk = rank_note(&m);
        assert_eq!(rk.len(), 1);
        assert!(rk[0].contains("row echelon form"));
    }
}
