//! Quaderno Algebra - pure matrix arithmetic
//!
//! Operations borrow their inputs and return fresh matrices or scalars.
//! A result that does not exist (mismatched shapes, singular matrix,
//! unsupported order) comes back as an error value, never a panic.

pub mod helpers;
pub mod ops;
pub mod props;

pub use ops::{add, inverse, multiply, subtract, transpose};
pub use props::{determinant, rank, trace};
