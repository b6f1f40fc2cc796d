//! The operation dispatcher
//!
//! Arity check, numeric parse, algebra, narration, packaging. Algebra
//! errors propagate unchanged and produce no steps. Inverse outputs go
//! through the named rounding step before they leave the engine.

use crate::kind::{find_similar, OpKind, OpMeta};
use crate::record::{OpOutput, WorkedResult};
use quaderno_algebra as algebra;
use quaderno_core::{CellGrid, QuadernoError, INVERSE_DECIMALS};
use quaderno_steps as narrate;
use tracing::debug;

/// Main Quaderno engine
pub struct Quaderno {
    inverse_decimals: u32,
}

impl Quaderno {
    pub fn new() -> Self {
        Self {
            inverse_decimals: INVERSE_DECIMALS,
        }
    }

    /// Override the decimals kept on inverse entries
    pub fn with_inverse_decimals(mut self, decimals: u32) -> Self {
        self.inverse_decimals = decimals;
        self
    }

    /// Apply `kind` to `a` (and `b` for the binary kinds; unary kinds
    /// ignore `b`)
    pub fn apply(
        &self,
        kind: OpKind,
        a: &CellGrid,
        b: Option<&CellGrid>,
    ) -> Result<WorkedResult, QuadernoError> {
        debug!(op = kind.name(), a = %a.name, "applying operation");

        let ma = a.to_numeric();
        let (output, steps) = match (kind, b) {
            (OpKind::Add, Some(b)) => (
                OpOutput::Matrix(algebra::add(&ma, &b.to_numeric())?),
                narrate::addition_steps(a, b),
            ),
            (OpKind::Subtract, Some(b)) => (
                OpOutput::Matrix(algebra::subtract(&ma, &b.to_numeric())?),
                narrate::subtraction_steps(a, b),
            ),
            (OpKind::Multiply, Some(b)) => (
                OpOutput::Matrix(algebra::multiply(&ma, &b.to_numeric())?),
                narrate::multiplication_steps(a, b),
            ),
            (OpKind::Add | OpKind::Subtract | OpKind::Multiply, None) => {
                return Err(QuadernoError::missing_operand(kind.name()));
            }
            (OpKind::Transpose, _) => (
                OpOutput::Matrix(algebra::transpose(&ma)),
                narrate::transpose_steps(a),
            ),
            (OpKind::Inverse, _) => {
                let inv = algebra::inverse(&ma)?;
                (
                    OpOutput::Matrix(inv.rounded(self.inverse_decimals)),
                    narrate::inverse_note(a),
                )
            }
            (OpKind::Determinant, _) => (
                OpOutput::Scalar(algebra::determinant(&ma)?),
                narrate::determinant_steps(a),
            ),
            (OpKind::Rank, _) => (
                OpOutput::Scalar(algebra::rank(&ma) as f64),
                narrate::rank_note(a),
            ),
            (OpKind::Trace, _) => (
                OpOutput::Scalar(algebra::trace(&ma)?),
                narrate::trace_steps(a),
            ),
        };

        Ok(WorkedResult {
            op: kind,
            description: kind.describe(&a.name, b.map(|g| g.name.as_str())),
            output,
            steps,
        })
    }

    /// Apply an operation given by name, accepting the short aliases;
    /// unknown names come back with nearest-name suggestions
    pub fn apply_named(
        &self,
        name: &str,
        a: &CellGrid,
        b: Option<&CellGrid>,
    ) -> Result<WorkedResult, QuadernoError> {
        match OpKind::parse(name) {
            Some(kind) => self.apply(kind, a, b),
            None => {
                let similar = find_similar(name);
                let mut err = QuadernoError::unknown_operation(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).copied().collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use list_operations for the full list.",
                        suggestions.join(", ")
                    ));
                }
                Err(err)
            }
        }
    }

    /// Metadata for every operation
    pub fn operations(&self) -> Vec<OpMeta> {
        OpKind::ALL.iter().map(|kind| kind.meta()).collect()
    }

    /// Metadata for one operation by name or alias
    pub fn describe_operation(&self, name: &str) -> Option<OpMeta> {
        OpKind::parse(name).map(|kind| kind.meta())
    }
}

impl Default for Quaderno {
    fn default() -> Self {
        Self::new()
    }
}
