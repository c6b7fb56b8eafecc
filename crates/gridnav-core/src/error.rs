use std::fmt;

/// Errors that can occur when building a [`Grid`](crate::Grid) from rows
/// or from serialized data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or rows without any columns.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// A character other than `.` or `#` in an ASCII grid.
    InvalidChar { ch: char, row: usize, col: usize },
    /// Stored cells do not cover `height × width` exactly.
    SizeMismatch {
        height: i32,
        width: i32,
        cells: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::Ragged { row, expected, got } => {
                write!(f, "grid: row {row} has {got} columns, expected {expected}")
            }
            Self::InvalidChar { ch, row, col } => {
                write!(
                    f,
                    "grid contains invalid character \u{201c}{ch}\u{201d} at ({row}, {col})"
                )
            }
            Self::SizeMismatch {
                height,
                width,
                cells,
            } => write!(f, "grid: {height}x{width} dimensions but {cells} cells"),
        }
    }
}

impl std::error::Error for GridError {}
