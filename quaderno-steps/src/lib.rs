//! Quaderno Steps - human-readable derivations
//!
//! Narration runs on the raw grids, not the parsed matrices: operand
//! positions echo the text the user typed (a blank cell narrates as the
//! substituted 0), while every computed number goes through the same
//! total reading the algebra uses, so the narrated arithmetic always
//! lands on the computed result. Indices are 1-based for human eyes.

pub mod arith;
pub mod layout;
pub mod square;

pub use arith::{addition_steps, multiplication_steps, subtraction_steps};
pub use layout::transpose_steps;
pub use square::{determinant_steps, inverse_note, rank_note, trace_steps};

use quaderno_core::RawCell;

/// Cell text as shown in operand position: raw, trimmed, blank reads 0
pub(crate) fn shown(cell: &RawCell) -> String {
    let text = cell.text().trim();
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}
