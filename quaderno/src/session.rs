//! Named grids and the record of what was computed against them

use crate::dispatch::Quaderno;
use crate::kind::OpKind;
use crate::record::{HistoryEntry, WorkedResult};
use quaderno_core::{CellGrid, QuadernoError, RawCell};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Build a 3x3 grid from literal cell text. Shape is known good, so
/// no validation pass
fn seed(id: u64, name: &str, cells: [[&str; 3]; 3]) -> CellGrid {
    CellGrid {
        id,
        name: name.to_string(),
        rows: 3,
        cols: 3,
        data: cells
            .iter()
            .map(|row| row.iter().map(|c| RawCell::new(*c)).collect())
            .collect(),
    }
}

fn resolved<'a>(grids: &'a [CellGrid], name: &str) -> Result<&'a CellGrid, QuadernoError> {
    grids
        .iter()
        .find(|g| g.name == name)
        .ok_or_else(|| QuadernoError::unknown_matrix(name))
}

/// A working set of named grids plus the history of operations run
/// against them. Grids are looked up by name; history entries by id.
/// Only successful operations are recorded.
#[derive(Debug, Default)]
pub struct Session {
    grids: Vec<CellGrid>,
    history: Vec<HistoryEntry>,
    last_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session pre-loaded with a 3x3 identity and a 3x3 sample grid
    pub fn with_starter_grids() -> Self {
        let mut session = Self::new();
        let id = session.next_id();
        session.grids.push(seed(
            id,
            "Matrix A",
            [["1", "0", "0"], ["0", "1", "0"], ["0", "0", "1"]],
        ));
        let id = session.next_id();
        session.grids.push(seed(
            id,
            "Matrix B",
            [["4", "-2", "1"], ["0", "5", "3"], ["1", "1", "9"]],
        ));
        session
    }

    /// Epoch-millisecond ids, bumped past the last one handed out so
    /// ids stay distinct within a single millisecond
    fn next_id(&mut self) -> u64 {
        let id = now_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Add a grid under `name`, replacing any existing grid with that
    /// name. Data is validated for rectangular shape
    pub fn add_grid(
        &mut self,
        name: &str,
        data: Vec<Vec<RawCell>>,
    ) -> Result<&CellGrid, QuadernoError> {
        let id = self.next_id();
        let grid = CellGrid::new(id, name, data)?;
        debug!(name, rows = grid.rows, cols = grid.cols, "adding grid");
        self.grids.retain(|g| g.name != name);
        self.grids.push(grid);
        Ok(&self.grids[self.grids.len() - 1])
    }

    pub fn remove_grid(&mut self, name: &str) -> Result<CellGrid, QuadernoError> {
        match self.grids.iter().position(|g| g.name == name) {
            Some(idx) => Ok(self.grids.remove(idx)),
            None => Err(QuadernoError::unknown_matrix(name)),
        }
    }

    pub fn grid(&self, name: &str) -> Option<&CellGrid> {
        self.grids.iter().find(|g| g.name == name)
    }

    pub fn grid_by_id(&self, id: u64) -> Option<&CellGrid> {
        self.grids.iter().find(|g| g.id == id)
    }

    pub fn grids(&self) -> &[CellGrid] {
        &self.grids
    }

    /// History entries, most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Run an operation against grids resolved by name and record the
    /// outcome. A failed operation leaves the history untouched
    pub fn apply(
        &mut self,
        engine: &Quaderno,
        kind: OpKind,
        a: &str,
        b: Option<&str>,
    ) -> Result<HistoryEntry, QuadernoError> {
        let grid_a = resolved(&self.grids, a)?;
        let grid_b = match b {
            Some(name) => Some(resolved(&self.grids, name)?),
            None => None,
        };
        let worked = engine.apply(kind, grid_a, grid_b)?;
        Ok(self.record(worked))
    }

    /// Same as [`apply`](Self::apply) with the operation given by name
    /// or alias
    pub fn apply_named(
        &mut self,
        engine: &Quaderno,
        op: &str,
        a: &str,
        b: Option<&str>,
    ) -> Result<HistoryEntry, QuadernoError> {
        let grid_a = resolved(&self.grids, a)?;
        let grid_b = match b {
            Some(name) => Some(resolved(&self.grids, name)?),
            None => None,
        };
        let worked = engine.apply_named(op, grid_a, grid_b)?;
        Ok(self.record(worked))
    }

    fn record(&mut self, worked: WorkedResult) -> HistoryEntry {
        let id = self.next_id();
        let entry = HistoryEntry {
            id,
            op: worked.op,
            description: worked.description,
            summary: worked.output.summary(),
            output: worked.output,
            steps: worked.steps,
            timestamp: now_millis(),
        };
        self.history.insert(0, entry.clone());
        entry
    }

    /// Store a history entry's matrix output as a new grid, named
    /// `Result <description>`. With no id the most recent entry is
    /// used. Scalar outputs cannot be stored
    pub fn store_result(&mut self, entry_id: Option<u64>) -> Result<&CellGrid, QuadernoError> {
        let entry = match entry_id {
            Some(id) => self
                .history
                .iter()
                .find(|e| e.id == id)
                .ok_or_else(|| QuadernoError::unknown_entry(Some(id)))?,
            None => self
                .history
                .first()
                .ok_or_else(|| QuadernoError::unknown_entry(None))?,
        };
        let matrix = entry.output.as_matrix().ok_or_else(|| {
            QuadernoError::type_error("Matrix", entry.output.kind_name())
                .with_note("only matrix results can be stored as grids")
        })?;
        let data = matrix.to_raw();
        // The entry id keeps the name unique when the same operation
        // was stored before
        let base = format!("Result {}", entry.description);
        let name = if self.grid(&base).is_some() {
            format!("{} ({})", base, entry.id)
        } else {
            base
        };
        debug!(name = %name, "storing result as grid");
        self.add_grid(&name, data)
    }

    /// Drop one history entry by id
    pub fn remove_entry(&mut self, id: u64) -> Result<HistoryEntry, QuadernoError> {
        match self.history.iter().position(|e| e.id == id) {
            Some(idx) => Ok(self.history.remove(idx)),
            None => Err(QuadernoError::unknown_entry(Some(id))),
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::OpOutput;
    use quaderno_core::codes;

    fn cells(rows: &[&[&str]]) -> Vec<Vec<RawCell>> {
        rows.iter()
            .map(|row| row.iter().map(|c| RawCell::new(*c)).collect())
            .collect()
    }

    #[test]
    fn test_starter_grids() {
        let session = Session::with_starter_grids();
        assert_eq!(session.grids().len(), 2);

        let a = session.grid("Matrix A").unwrap();
        assert_eq!(a.shape(), (3, 3));
        assert_eq!(a.to_numeric(), quaderno_core::NumMatrix::identity(3));

        let b = session.grid("Matrix B").unwrap();
        assert_eq!(b.shape(), (3, 3));
        assert_eq!(b.get(0, 1).unwrap().value(), -2.0);

        assert_ne!(a.id, b.id);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_add_and_remove_grid() {
        let mut session = Session::new();
        let grid = session
            .add_grid("C", cells(&[&["1", "2"], &["3", "4"]]))
            .unwrap();
        assert_eq!(grid.shape(), (2, 2));
        let id = grid.id;

        assert!(session.grid("C").is_some());
        assert!(session.grid_by_id(id).is_some());

        let removed = session.remove_grid("C").unwrap();
        assert_eq!(removed.id, id);
        assert!(session.grid("C").is_none());

        let err = session.remove_grid("C").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_MATRIX);
    }

    #[test]
    fn test_add_grid_replaces_same_name() {
        let mut session = Session::new();
        session.add_grid("C", cells(&[&["1"]])).unwrap();
        session.add_grid("C", cells(&[&["1", "2"], &["3", "4"]])).unwrap();

        assert_eq!(session.grids().len(), 1);
        assert_eq!(session.grid("C").unwrap().shape(), (2, 2));
    }

    #[test]
    fn test_add_grid_rejects_ragged_data() {
        let mut session = Session::new();
        let err = session
            .add_grid("C", cells(&[&["1", "2"], &["3"]]))
            .unwrap_err();
        assert_eq!(err.code, codes::MALFORMED_GRID);
        assert!(session.grid("C").is_none());
    }

    #[test]
    fn test_apply_records_history_newest_first() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();

        let first = session
            .apply(&engine, OpKind::Add, "Matrix A", Some("Matrix B"))
            .unwrap();
        let second = session
            .apply(&engine, OpKind::Determinant, "Matrix B", None)
            .unwrap();

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
        assert!(history[0].id > history[1].id);

        assert_eq!(first.description, "Matrix A + Matrix B");
        assert_eq!(first.summary, "Matrix");
        assert!(second.output.as_scalar().is_some());
    }

    #[test]
    fn test_apply_unknown_matrix() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();

        let err = session
            .apply(&engine, OpKind::Add, "Matrix A", Some("Nope"))
            .unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_MATRIX);
        assert!(err.message.contains("Nope"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_failed_operation_not_recorded() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();
        session.add_grid("Wide", cells(&[&["1", "2", "3"], &["4", "5", "6"]])).unwrap();

        let err = session
            .apply(&engine, OpKind::Add, "Matrix A", Some("Wide"))
            .unwrap_err();
        assert_eq!(err.code, codes::SHAPE_MISMATCH);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_apply_named_with_alias() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();

        let entry = session
            .apply_named(&engine, "det", "Matrix A", None)
            .unwrap();
        assert_eq!(entry.op, OpKind::Determinant);
        assert_eq!(entry.output, OpOutput::Scalar(1.0));
        assert_eq!(entry.summary, "1");
    }

    #[test]
    fn test_store_result_latest() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();
        session
            .apply(&engine, OpKind::Multiply, "Matrix A", Some("Matrix B"))
            .unwrap();

        let stored = session.store_result(None).unwrap();
        assert_eq!(stored.name, "Result Matrix A × Matrix B");
        assert_eq!(stored.shape(), (3, 3));
        // identity times B gives B back
        assert_eq!(stored.get(1, 1).unwrap().text(), "5");

        // stored grid is usable as an operand
        let entry = session
            .apply(&engine, OpKind::Transpose, "Result Matrix A × Matrix B", None)
            .unwrap();
        assert_eq!(entry.op, OpKind::Transpose);
    }

    #[test]
    fn test_store_result_by_id_and_name_collision() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();
        let entry = session
            .apply(&engine, OpKind::Add, "Matrix A", Some("Matrix B"))
            .unwrap();

        let first = session.store_result(Some(entry.id)).unwrap().name.clone();
        assert_eq!(first, "Result Matrix A + Matrix B");

        let second = session.store_result(Some(entry.id)).unwrap().name.clone();
        assert_eq!(second, format!("Result Matrix A + Matrix B ({})", entry.id));
    }

    #[test]
    fn test_store_result_scalar_rejected() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();
        session
            .apply(&engine, OpKind::Determinant, "Matrix B", None)
            .unwrap();

        let err = session.store_result(None).unwrap_err();
        assert_eq!(err.code, codes::TYPE_ERROR);
    }

    #[test]
    fn test_store_result_empty_history() {
        let mut session = Session::with_starter_grids();
        let err = session.store_result(None).unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_ENTRY);
        assert!(err.message.contains("empty"));

        let err = session.store_result(Some(42)).unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_ENTRY);
        assert!(err.message.contains("42"));
    }

    #[test]
    fn test_remove_entry_and_clear() {
        let engine = Quaderno::new();
        let mut session = Session::with_starter_grids();
        let entry = session
            .apply(&engine, OpKind::Trace, "Matrix B", None)
            .unwrap();

        let removed = session.remove_entry(entry.id).unwrap();
        assert_eq!(removed.id, entry.id);
        assert!(session.history().is_empty());

        let err = session.remove_entry(entry.id).unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_ENTRY);

        session.apply(&engine, OpKind::Trace, "Matrix B", None).unwrap();
        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_ids_monotonic() {
        let mut session = Session::new();
        session.add_grid("A", cells(&[&["1"]])).unwrap();
        session.add_grid("B", cells(&[&["2"]])).unwrap();
        session.add_grid("C", cells(&[&["3"]])).unwrap();

        let ids: Vec<u64> = session.grids().iter().map(|g| g.id).collect();
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);
    }
}
