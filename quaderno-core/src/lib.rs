//! Quaderno Core - Fundamental types
//!
//! This crate provides the core types used throughout Quaderno:
//! - `RawCell`: one grid cell as the user typed it, with a total numeric reading
//! - `CellGrid` / `NumMatrix`: named raw grids and their rectangular f64 view
//! - `QuadernoError`: structured errors that travel as values

mod cell;
mod error;
mod grid;

pub use cell::{fmt_num, round_to, RawCell, INVERSE_DECIMALS};
pub use error::{codes, ErrorContext, QuadernoError, Severity};
pub use grid::{CellGrid, GridError, NumMatrix};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CellGrid, NumMatrix, QuadernoError, RawCell, Severity};
    pub use crate::error::codes;
}
