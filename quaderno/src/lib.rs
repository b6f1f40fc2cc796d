//! Quaderno - Step-by-Step Matrix Calculations

mod dispatch;
mod kind;
mod record;
mod session;

pub use dispatch::Quaderno;
pub use kind::{find_similar, OpKind, OpMeta};
pub use record::{HistoryEntry, OpOutput, WorkedResult};
pub use session::Session;

/// Build grid data from nested literals. Cells can be strings or
/// numbers; strings keep their raw text, numbers are formatted
///
/// ```
/// use quaderno::cells;
/// let data = cells![["1", "2"], ["3", "x"]];
/// assert_eq!(data[1][1].text(), "x");
/// ```
#[macro_export]
macro_rules! cells {
    ( $( [ $($cell:expr),* $(,)? ] ),* $(,)? ) => {
        vec![ $( vec![ $( quaderno_core::RawCell::from($cell) ),* ] ),* ]
    };
}
