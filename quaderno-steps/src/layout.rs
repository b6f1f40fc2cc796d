//! Narration for transpose

use crate::shown;
use quaderno_core::CellGrid;

/// Two summary lines, then one move line per off-diagonal element
pub fn transpose_steps(m: &CellGrid) -> Vec<String> {
    let mut steps = Vec::new();
    steps.push(format!("Transpose {}: Swap rows and columns.", m.name));
    steps.push("For each element M[i][j], place it at T[j][i].".to_string());

    for i in 0..m.rows {
        for j in 0..m.cols {
            if i != j {
                steps.push(format!(
                    "Move element at [{},{}] ({}) to [{},{}]",
                    i + 1,
                    j + 1,
                    shown(&m.data[i][j]),
                    j + 1,
                    i + 1
                ));
            }
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
    fn test_transpose_steps() {
        let m = grid("M", &[&["1", "2"], &["3", "4"]]);
        let steps = transpose_steps(&m);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], "Transpose M: Swap rows and columns.");
        assert_eq!(steps[1], "For each element M[i][j], place it at T[j][i].");
        assert_eq!(steps[2], "Move element at [1,2] (2) to [2,1]");
        assert_eq!(steps[3], "Move element at [2,1] (3) to [1,2]");
    }

    #[test]
    fn test_transpose_diagonal_not_narrated() {
        let m = grid("M", &[&["7"]]);
        assert_eq!(transpose_steps(&m).len(), 2);
    }

    #[test]
    fn test_transpose_rectangular() {
        let m = grid("M", &[&["1", "2", "3"], &["4", "5", "6"]]);
        let steps = transpose_steps(&m);
        assert_eq!(steps.len(), 2 + 4);
        assert_eq!(steps[2], "Move element at [1,2] (2) to [2,1]");
    }
}
