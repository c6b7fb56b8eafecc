//! The [`Grid`] type: a rectangular occupancy matrix.
//!
//! A `Grid` owns its cells outright (no shared buffer, no interior
//! mutability), so a `&Grid` can be handed to several searches running on
//! different threads at once.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::GridError;
use crate::geom::{Cell, Dir};
use crate::raster;

/// A `height × width` occupancy grid. `true` marks a blocked cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    height: i32,
    width: i32,
    blocked: Vec<bool>,
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    height: i32,
    width: i32,
    blocked: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let expected = (repr.height.max(0) as usize) * (repr.width.max(0) as usize);
        if repr.height < 0 || repr.width < 0 || repr.blocked.len() != expected {
            return Err(GridError::SizeMismatch {
                height: repr.height,
                width: repr.width,
                cells: repr.blocked.len(),
            });
        }
        Ok(Self {
            height: repr.height,
            width: repr.width,
            blocked: repr.blocked,
        })
    }
}

impl Grid {
    /// Create a grid of the given dimensions with every cell free.
    pub fn new(height: i32, width: i32) -> Self {
        let h = height.max(0);
        let w = width.max(0);
        Self {
            height: h,
            width: w,
            blocked: vec![false; (h as usize) * (w as usize)],
        }
    }

    /// Build a grid from rows of booleans (`true` = blocked).
    pub fn from_bools(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        Self::from_rows_with(rows, |&b| b)
    }

    /// Build a grid from a `0`/`1` matrix. Any non-zero value is blocked.
    pub fn from_matrix(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        Self::from_rows_with(rows, |&v| v != 0)
    }

    /// Build a grid from an ASCII picture: `.` is free, `#` is blocked.
    ///
    /// Leading/trailing whitespace on each line and blank lines are ignored,
    /// so indented raw string literals work as-is.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row_idx = rows.len();
            let mut row = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '.' => row.push(false),
                    '#' => row.push(true),
                    _ => {
                        return Err(GridError::InvalidChar {
                            ch,
                            row: row_idx,
                            col,
                        });
                    }
                }
            }
            rows.push(row);
        }
        Self::from_bools(&rows)
    }

    fn from_rows_with<T>(rows: &[Vec<T>], is_blocked: impl Fn(&T) -> bool) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let mut blocked = Vec::with_capacity(rows.len() * width);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    got: values.len(),
                });
            }
            blocked.extend(values.iter().map(&is_blocked));
        }
        Ok(Self {
            height: rows.len() as i32,
            width: width as i32,
            blocked,
        })
    }

    // -----------------------------------------------------------------------
    // Dimensions and indexing
    // -----------------------------------------------------------------------

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.height && c.col < self.width
    }

    /// Row-major flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.width as usize + c.col as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell_at(&self, idx: usize) -> Cell {
        let w = self.width.max(1) as usize;
        Cell::new((idx / w) as i32, (idx % w) as i32)
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(|i| self.cell_at(i))
    }

    // -----------------------------------------------------------------------
    // Occupancy
    // -----------------------------------------------------------------------

    /// True if `c` is out of bounds or marked blocked.
    #[inline]
    pub fn is_blocked(&self, c: Cell) -> bool {
        self.index(c).is_none_or(|i| self.blocked[i])
    }

    /// True if `c` is in bounds and not blocked.
    #[inline]
    pub fn is_free(&self, c: Cell) -> bool {
        !self.is_blocked(c)
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Mark `c` blocked or free. No-op if `c` is out of bounds.
    pub fn set_blocked(&mut self, c: Cell, blocked: bool) {
        if let Some(i) = self.index(c) {
            self.blocked[i] = blocked;
        }
    }

    /// Block every cell of the rectangle spanned by two corners (inclusive).
    /// Parts outside the grid are ignored.
    pub fn block_rect(&mut self, a: Cell, b: Cell) {
        for row in a.row.min(b.row)..=a.row.max(b.row) {
            for col in a.col.min(b.col)..=a.col.max(b.col) {
                self.set_blocked(Cell::new(row, col), true);
            }
        }
    }

    /// Block columns `cols` of one row.
    pub fn block_row(&mut self, row: i32, cols: RangeInclusive<i32>) {
        for col in cols {
            self.set_blocked(Cell::new(row, col), true);
        }
    }

    /// Block rows `rows` of one column.
    pub fn block_col(&mut self, col: i32, rows: RangeInclusive<i32>) {
        for row in rows {
            self.set_blocked(Cell::new(row, col), true);
        }
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    /// Whether a single step `dir` from `from` is legal: the target must be
    /// free and, for a diagonal step, both orthogonal components must be
    /// free too (no corner-cutting).
    #[inline]
    pub fn can_step(&self, from: Cell, dir: Dir) -> bool {
        let to = from + dir;
        if self.is_blocked(to) {
            return false;
        }
        if dir.is_diagonal() {
            let (row_part, col_part) = dir.components();
            return self.is_free(from + row_part) && self.is_free(from + col_part);
        }
        true
    }

    /// Append the legal 8-directional neighbours of `c` into `buf`, in
    /// [`Dir::ALL`] order. The caller clears `buf` before calling.
    pub fn neighbors8(&self, c: Cell, buf: &mut Vec<Cell>) {
        for dir in Dir::ALL {
            if self.can_step(c, dir) {
                buf.push(c + dir);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Lines
    // -----------------------------------------------------------------------

    /// Bresenham cells from `a` to `b`, endpoints included.
    #[inline]
    pub fn line(&self, a: Cell, b: Cell) -> Vec<Cell> {
        raster::line(a, b)
    }

    /// True if every cell strictly between `a` and `b` on their Bresenham
    /// line is in bounds and free. The endpoints themselves are not tested.
    pub fn line_of_sight(&self, a: Cell, b: Cell) -> bool {
        let cells = raster::line(a, b);
        let interior = cells.len().saturating_sub(1);
        cells
            .iter()
            .take(interior)
            .skip(1)
            .all(|&c| self.is_free(c))
    }

    /// Line of sight that can also be walked: both endpoints are free and
    /// every consecutive pair of rasterized cells is a legal step, so no
    /// diagonal squeezes between two blocked cells.
    pub fn walkable_line(&self, a: Cell, b: Cell) -> bool {
        if self.is_blocked(a) || self.is_blocked(b) {
            return false;
        }
        raster::line(a, b)
            .windows(2)
            .all(|w| self.can_step(w[0], w[1] - w[0]))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let ch = if self.is_blocked(Cell::new(row, col)) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_free() {
        let g = Grid::new(3, 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.width(), 4);
        assert_eq!(g.len(), 12);
        assert_eq!(g.blocked_count(), 0);
        assert!(g.is_free(Cell::new(2, 3)));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let g = Grid::new(2, 2);
        assert!(g.is_blocked(Cell::new(-1, 0)));
        assert!(g.is_blocked(Cell::new(0, 2)));
        assert!(g.is_blocked(Cell::new(2, 0)));
        assert_eq!(g.index(Cell::new(1, 1)), Some(3));
        assert_eq!(g.index(Cell::new(1, 2)), None);
        assert_eq!(g.cell_at(3), Cell::new(1, 1));
    }

    #[test]
    fn from_matrix_and_ragged() {
        let g = Grid::from_matrix(&[vec![0, 1], vec![0, 0]]).unwrap();
        assert!(g.is_blocked(Cell::new(0, 1)));
        assert!(g.is_free(Cell::new(1, 1)));

        let err = Grid::from_matrix(&[vec![0, 1], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                got: 1
            }
        );
        assert_eq!(Grid::from_matrix(&[]).unwrap_err(), GridError::Empty);
    }

    #[test]
    fn from_ascii_round_trips_display() {
        let src = "\
            .#..
            ..#.
            ....";
        let g = Grid::from_ascii(src).unwrap();
        assert_eq!(g.height(), 3);
        assert_eq!(g.width(), 4);
        assert_eq!(g.to_string(), ".#..\n..#.\n....\n");
    }

    #[test]
    fn from_ascii_rejects_unknown_chars() {
        let err = Grid::from_ascii("..\n.x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidChar {
                ch: 'x',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn block_helpers() {
        let mut g = Grid::new(5, 5);
        g.block_rect(Cell::new(3, 3), Cell::new(1, 1));
        assert_eq!(g.blocked_count(), 9);
        g.block_row(0, 0..=10);
        assert_eq!(g.blocked_count(), 14);
        g.block_col(4, 0..=4);
        assert_eq!(g.blocked_count(), 18);
        g.set_blocked(Cell::new(2, 2), false);
        assert!(g.is_free(Cell::new(2, 2)));
    }

    #[test]
    fn neighbors8_respects_corner_cutting() {
        let g = Grid::from_ascii(
            "...
             .#.
             ...",
        )
        .unwrap();
        let mut buf = Vec::new();
        g.neighbors8(Cell::new(0, 0), &mut buf);
        // East and south only; the south-east diagonal would cut the corner.
        assert_eq!(buf, vec![Cell::new(0, 1), Cell::new(1, 0)]);

        buf.clear();
        g.neighbors8(Cell::new(0, 1), &mut buf);
        assert_eq!(buf, vec![Cell::new(0, 2), Cell::new(0, 0)]);
    }

    #[test]
    fn neighbors8_open_cell_has_eight() {
        let g = Grid::new(3, 3);
        let mut buf = Vec::new();
        g.neighbors8(Cell::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 8);
        buf.clear();
        g.neighbors8(Cell::new(0, 0), &mut buf);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn line_of_sight_ignores_endpoints() {
        let g = Grid::from_ascii(
            "#...#
             .....
             ..#..",
        )
        .unwrap();
        assert!(g.line_of_sight(Cell::new(0, 0), Cell::new(0, 4)));
        assert!(!g.line_of_sight(Cell::new(2, 0), Cell::new(2, 4)));
        assert!(g.line_of_sight(Cell::new(1, 0), Cell::new(1, 4)));
        assert!(g.line_of_sight(Cell::new(1, 1), Cell::new(1, 1)));
    }

    #[test]
    fn walkable_line_rejects_squeeze() {
        let g = Grid::from_ascii(
            ".#
             #.",
        )
        .unwrap();
        assert!(g.line_of_sight(Cell::new(0, 0), Cell::new(1, 1)));
        assert!(!g.walkable_line(Cell::new(0, 0), Cell::new(1, 1)));
        assert!(!g.walkable_line(Cell::new(0, 0), Cell::new(0, 1)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let grid = Grid::from_ascii(
            "..#
             #..",
        )
        .unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn rejects_cells_that_do_not_fill_the_grid() {
        let err = serde_json::from_str::<Grid>(r#"{"height":10,"width":10,"blocked":[false,false]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("10x10 dimensions but 2 cells"));
    }

    #[test]
    fn rejects_negative_dimensions() {
        assert!(serde_json::from_str::<Grid>(r#"{"height":-1,"width":0,"blocked":[]}"#).is_err());
    }
}
