//! Operation kinds and their metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// One calculator operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Subtract,
    Multiply,
    Transpose,
    Inverse,
    Determinant,
    Rank,
    Trace,
}

/// Metadata for help-style listings
#[derive(Debug, Clone, Serialize)]
pub struct OpMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub operands: usize,
    pub returns: &'static str,
    pub example: &'static str,
    pub aliases: &'static [&'static str],
}

impl OpKind {
    pub const ALL: [OpKind; 8] = [
        OpKind::Add,
        OpKind::Subtract,
        OpKind::Multiply,
        OpKind::Transpose,
        OpKind::Inverse,
        OpKind::Determinant,
        OpKind::Rank,
        OpKind::Trace,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Subtract => "subtract",
            OpKind::Multiply => "multiply",
            OpKind::Transpose => "transpose",
            OpKind::Inverse => "inverse",
            OpKind::Determinant => "determinant",
            OpKind::Rank => "rank",
            OpKind::Trace => "trace",
        }
    }

    /// Binary kinds take two operands; everything else takes one
    pub fn is_binary(&self) -> bool {
        matches!(self, OpKind::Add | OpKind::Subtract | OpKind::Multiply)
    }

    /// Parse an operation name, accepting the short aliases
    pub fn parse(name: &str) -> Option<OpKind> {
        match name.to_lowercase().as_str() {
            "add" => Some(OpKind::Add),
            "subtract" | "sub" => Some(OpKind::Subtract),
            "multiply" | "mul" => Some(OpKind::Multiply),
            "transpose" => Some(OpKind::Transpose),
            "inverse" => Some(OpKind::Inverse),
            "determinant" | "det" => Some(OpKind::Determinant),
            "rank" => Some(OpKind::Rank),
            "trace" => Some(OpKind::Trace),
            _ => None,
        }
    }

    /// Description of one application, as recorded in results:
    /// `A + B`, `Transpose(A)`, `det(A)`, ...
    pub fn describe(&self, a: &str, b: Option<&str>) -> String {
        match self {
            OpKind::Add => format!("{} + {}", a, b.unwrap_or("?")),
            OpKind::Subtract => format!("{} - {}", a, b.unwrap_or("?")),
            OpKind::Multiply => format!("{} × {}", a, b.unwrap_or("?")),
            OpKind::Transpose => format!("Transpose({})", a),
            OpKind::Inverse => format!("Inverse({})", a),
            OpKind::Determinant => format!("det({})", a),
            OpKind::Rank => format!("Rank({})", a),
            OpKind::Trace => format!("Trace({})", a),
        }
    }

    pub fn meta(&self) -> OpMeta {
        match self {
            OpKind::Add => OpMeta {
                name: "add",
                description: "Element-wise sum of two matrices",
                usage: "add(A, B)",
                operands: 2,
                returns: "Matrix",
                example: "add(A, B) → A + B",
                aliases: &[],
            },
            OpKind::Subtract => OpMeta {
                name: "subtract",
                description: "Element-wise difference of two matrices",
                usage: "subtract(A, B)",
                operands: 2,
                returns: "Matrix",
                example: "subtract(A, B) → A - B",
                aliases: &["sub"],
            },
            OpKind::Multiply => OpMeta {
                name: "multiply",
                description: "Matrix product (rows of A dotted with columns of B)",
                usage: "multiply(A, B)",
                operands: 2,
                returns: "Matrix",
                example: "multiply(A, B) → A × B",
                aliases: &["mul"],
            },
            OpKind::Transpose => OpMeta {
                name: "transpose",
                description: "Flip rows and columns",
                usage: "transpose(A)",
                operands: 1,
                returns: "Matrix",
                example: "transpose(A) → Aᵀ",
                aliases: &[],
            },
            OpKind::Inverse => OpMeta {
                name: "inverse",
                description: "Inverse of a 2x2 or 3x3 matrix, entries rounded to 4 decimals",
                usage: "inverse(A)",
                operands: 1,
                returns: "Matrix",
                example: "inverse(A) → A⁻¹",
                aliases: &[],
            },
            OpKind::Determinant => OpMeta {
                name: "determinant",
                description: "Determinant of a 2x2 or 3x3 matrix",
                usage: "determinant(A)",
                operands: 1,
                returns: "Scalar",
                example: "determinant(A) → det(A)",
                aliases: &["det"],
            },
            OpKind::Rank => OpMeta {
                name: "rank",
                description: "Number of linearly independent rows",
                usage: "rank(A)",
                operands: 1,
                returns: "Scalar",
                example: "rank(A) → r",
                aliases: &[],
            },
            OpKind::Trace => OpMeta {
                name: "trace",
                description: "Sum of the main diagonal of a square matrix",
                usage: "trace(A)",
                operands: 1,
                returns: "Scalar",
                example: "trace(A) → tr(A)",
                aliases: &[],
            },
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation names similar to `name`, best match first (for suggestions)
pub fn find_similar(name: &str) -> Vec<&'static str> {
    let query = name.to_lowercase();
    let mut matches: Vec<(&'static str, usize)> = OpKind::ALL
        .iter()
        .filter_map(|kind| {
            let score = similarity_score(&query, kind.name());
            if score > 0 {
                Some((kind.name(), score))
            } else {
                None
            }
        })
        .collect();

    // Sort by similarity score (higher = more similar)
    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches.into_iter().map(|(n, _)| n).collect()
}

/// Calculate similarity score between two strings
fn similarity_score(query: &str, candidate: &str) -> usize {
    let mut score = 0;

    // Exact prefix match is best
    if candidate.starts_with(query) {
        score += 100;
    }
    // Contains the query
    else if candidate.contains(query) {
        score += 50;
    }
    // Query contains the candidate
    else if query.contains(candidate) {
        score += 30;
    }

    // Levenshtein-like: count matching characters
    let query_chars: std::collections::HashSet<char> = query.chars().collect();
    let candidate_chars: std::collections::HashSet<char> = candidate.chars().collect();
    let common = query_chars.intersection(&candidate_chars).count();
    score += common * 2;

    // Penalize length difference
    let len_diff = (query.len() as i32 - candidate.len() as i32).unsigned_abs() as usize;
    if len_diff < 5 && score > 0 {
        score += 5 - len_diff;
    }

    score
}
