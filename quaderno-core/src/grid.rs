//! Cell grids and their numeric counterpart
//!
//! `CellGrid` is the unit users edit and store: named, id-stamped, raw
//! text in every cell. `NumMatrix` is the numeric view computations
//! work on. Construction validates shape; everything downstream can
//! rely on rectangular data.

use crate::cell::{fmt_num, round_to, RawCell};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Construction failures for grids and matrices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
}

fn checked_shape<T>(data: &[Vec<T>]) -> Result<(usize, usize), GridError> {
    if data.is_empty() || data[0].is_empty() {
        return Err(GridError::Empty);
    }
    let cols = data[0].len();
    for (i, row) in data.iter().enumerate().skip(1) {
        if row.len() != cols {
            return Err(GridError::RaggedRow {
                row: i,
                got: row.len(),
                expected: cols,
            });
        }
    }
    Ok((data.len(), cols))
}

/// A named grid of raw cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    pub id: u64,
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<RawCell>>,
}

impl CellGrid {
    /// Create a grid, validating that every row has the same width
    pub fn new(
        id: u64,
        name: impl Into<String>,
        data: Vec<Vec<RawCell>>,
    ) -> Result<Self, GridError> {
        let (rows, cols) = checked_shape(&data)?;
        Ok(Self {
            id,
            name: name.into(),
            rows,
            cols,
            data,
        })
    }

    /// Build from literal text, for seed data and tests
    pub fn from_text(name: &str, rows: &[&[&str]]) -> Result<Self, GridError> {
        let data = rows
            .iter()
            .map(|row| row.iter().map(|cell| RawCell::new(*cell)).collect())
            .collect();
        Self::new(0, name, data)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&RawCell> {
        self.data.get(row)?.get(col)
    }

    /// Numeric view: every cell through the total reading
    pub fn to_numeric(&self) -> NumMatrix {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(RawCell::value).collect())
            .collect();
        NumMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

/// A rectangular f64 matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
}

impl NumMatrix {
    /// Create from nested rows, validating that the data is rectangular
    pub fn new(data: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let (rows, cols) = checked_shape(&data)?;
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i][i] = 1.0;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row)?.get(col).copied()
    }

    /// Row as a slice
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// Copy of the data as nested rows
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }

    /// Render every entry back to cell text
    pub fn to_raw(&self) -> Vec<Vec<RawCell>> {
        self.data
            .iter()
            .map(|row| row.iter().map(|&v| RawCell::from_value(v)).collect())
            .collect()
    }

    /// Copy with every entry rounded to `places` decimals
    pub fn rounded(&self, places: u32) -> Self {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&v| round_to(v, places)).collect())
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Entry-wise comparison within a tolerance
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tol))
    }
}

impl Index<(usize, usize)> for NumMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row][col]
    }
}

impl IndexMut<(usize, usize)> for NumMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row][col]
    }
}

impl fmt::Display for NumMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", fmt_num(self.data[i][j]))?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
