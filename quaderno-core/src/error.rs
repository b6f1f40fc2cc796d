//! Structured errors that travel as values
//!
//! Nothing in the core panics on user input. Operations that cannot
//! produce a result return an error carrying a machine-readable code,
//! a human message, and a suggestion for fixing it.

use crate::GridError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
    pub const UNSUPPORTED_ORDER: &str = "UNSUPPORTED_ORDER";
    pub const SINGULAR: &str = "SINGULAR";
    pub const MISSING_OPERAND: &str = "MISSING_OPERAND";
    pub const UNKNOWN_OPERATION: &str = "UNKNOWN_OPERATION";
    pub const UNKNOWN_MATRIX: &str = "UNKNOWN_MATRIX";
    pub const UNKNOWN_ENTRY: &str = "UNKNOWN_ENTRY";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const MALFORMED_GRID: &str = "MALFORMED_GRID";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Computation continued with a degraded result
    Warning,
    /// This operation failed
    Error,
    /// The session state itself is unusable
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Operation being applied when the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    /// Display name of the matrix involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<String>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadernoError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl QuadernoError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: add context
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Builder: set operation context
    pub fn in_operation(mut self, operation: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.operation = Some(operation.into());
        self
    }

    /// Builder: set matrix context
    pub fn on_matrix(mut self, matrix: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.matrix = Some(matrix.into());
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn shape_mismatch(details: impl Into<String>) -> Self {
        Self::new(codes::SHAPE_MISMATCH, details)
            .with_suggestion("Check matrix dimensions before applying the operation")
    }

    pub fn unsupported_order(details: impl Into<String>) -> Self {
        Self::new(codes::UNSUPPORTED_ORDER, details)
            .with_suggestion("Supported orders are 2x2 and 3x3")
    }

    pub fn singular() -> Self {
        Self::new(codes::SINGULAR, "Matrix is singular (determinant is zero)")
            .with_suggestion("Only matrices with a non-zero determinant can be inverted")
    }

    pub fn missing_operand(operation: &str) -> Self {
        Self::new(
            codes::MISSING_OPERAND,
            format!("Operation '{}' requires two matrices", operation),
        )
        .with_suggestion("Provide a second operand")
    }

    pub fn unknown_operation(name: &str) -> Self {
        Self::new(codes::UNKNOWN_OPERATION, format!("Unknown operation: {}", name))
            .with_suggestion("Use list_operations to see what is available")
    }

    pub fn unknown_matrix(name: &str) -> Self {
        Self::new(codes::UNKNOWN_MATRIX, format!("Unknown matrix: {}", name))
            .with_suggestion(format!("Add '{}' first or check spelling", name))
    }

    pub fn unknown_entry(id: Option<u64>) -> Self {
        match id {
            Some(id) => Self::new(
                codes::UNKNOWN_ENTRY,
                format!("Unknown history entry: {}", id),
            )
            .with_suggestion("Use history to list entry ids"),
            None => Self::new(codes::UNKNOWN_ENTRY, "History is empty")
                .with_suggestion("Run an operation first"),
        }
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn malformed_grid(details: impl Into<String>) -> Self {
        Self::new(codes::MALFORMED_GRID, format!("Malformed grid: {}", details.into()))
            .with_suggestion("Every row must have the same number of cells")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for QuadernoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for QuadernoError {}

impl From<GridError> for QuadernoError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::Empty => Self::malformed_grid("grid has no cells"),
            GridError::RaggedRow { row, got, expected } => Self::malformed_grid(format!(
                "row {} has {} cells, expected {}",
                row, got, expected
            )),
        }
    }
}
