use std::fmt;

use serde::Serialize;

/// A cell address: `column` in `0..columns`, `row` in `0..rows`.
///
/// Ordering is column-major (column first, then row), which is the order
/// cells are generated and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GridIndex {
    pub column: usize,
    pub row: usize,
}

impl GridIndex {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl From<(usize, usize)> for GridIndex {
    fn from((column, row): (usize, usize)) -> Self {
        Self::new(column, row)
    }
}
