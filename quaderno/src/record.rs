//! Records produced by the dispatcher and kept in session history

use crate::kind::OpKind;
use quaderno_core::{fmt_num, NumMatrix};
use serde::{Deserialize, Serialize};

/// What an operation produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum OpOutput {
    Matrix(NumMatrix),
    Scalar(f64),
}

impl OpOutput {
    pub fn as_matrix(&self) -> Option<&NumMatrix> {
        match self {
            OpOutput::Matrix(m) => Some(m),
            OpOutput::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            OpOutput::Scalar(v) => Some(*v),
            OpOutput::Matrix(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            OpOutput::Matrix(_) => "Matrix",
            OpOutput::Scalar(_) => "Scalar",
        }
    }

    /// Short rendering for history lists: scalars print their value,
    /// matrix outputs print as the word `Matrix`
    pub fn summary(&self) -> String {
        match self {
            OpOutput::Matrix(_) => "Matrix".to_string(),
            OpOutput::Scalar(v) => fmt_num(*v),
        }
    }
}

/// A computed operation: what was asked, what came out, and the
/// derivation that led there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedResult {
    pub op: OpKind,
    pub description: String,
    pub output: OpOutput,
    pub steps: Vec<String>,
}

/// One successful operation recorded in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub op: OpKind,
    pub description: String,
    pub summary: String,
    pub output: OpOutput,
    pub steps: Vec<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_accessors() {
        let s = OpOutput::Scalar(-2.0);
        assert_eq!(s.as_scalar(), Some(-2.0));
        assert_eq!(s.as_matrix(), None);
        assert_eq!(s.kind_name(), "Scalar");

        let m = OpOutput::Matrix(NumMatrix::identity(2));
        assert!(m.as_matrix().is_some());
        assert_eq!(m.as_scalar(), None);
        assert_eq!(m.kind_name(), "Matrix");
    }

    #[test]
    fn test_summary_rendering() {
        assert_eq!(OpOutput::Scalar(24.0).summary(), "24");
        assert_eq!(OpOutput::Scalar(0.5).summary(), "0.5");
        assert_eq!(OpOutput::Matrix(NumMatrix::identity(2)).summary(), "Matrix");
    }

    #[test]
    fn test_output_serde_shape() {
        let json = serde_json::to_string(&OpOutput::Scalar(24.0)).unwrap();
        assert_eq!(json, r#"{"kind":"scalar","value":24.0}"#);

        let m = OpOutput::Matrix(NumMatrix::identity(1));
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.starts_with(r#"{"kind":"matrix","value":"#));
        let back: OpOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_worked_result_roundtrip() {
        let worked = WorkedResult {
            op: OpKind::Determinant,
            description: "det(A)".to_string(),
            output: OpOutput::Scalar(-2.0),
            steps: vec!["Formula: ad - bc".to_string()],
        };
        let json = serde_json::to_string(&worked).unwrap();
        let back: WorkedResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, worked);
    }
}
