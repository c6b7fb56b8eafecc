//! Geometry primitives: [`Cell`] and [`Dir`].
//!
//! Cells are addressed as `(row, col)`: rows grow downward and columns grow
//! to the right, matching the layout of an occupancy matrix. A [`Dir`] is a
//! displacement between two cells; the eight unit steps of 8-directional
//! movement are provided as constants.

use std::fmt;
use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid cell. Equality and hashing are by value, so a `Cell` doubles as a
/// graph-vertex identity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell one `dir` away.
    #[inline]
    pub const fn step(self, dir: Dir) -> Self {
        Self {
            row: self.row + dir.dr,
            col: self.col + dir.dc,
        }
    }

    /// Chebyshev (L∞) distance: the number of 8-directional steps on an
    /// empty grid.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Cell) -> i64 {
        let dr = i64::from(self.row - other.row);
        let dc = i64::from(self.col - other.col);
        dr * dr + dc * dc
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Cell) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order.
impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add<Dir> for Cell {
    type Output = Cell;
    #[inline]
    fn add(self, rhs: Dir) -> Cell {
        self.step(rhs)
    }
}

impl Sub<Dir> for Cell {
    type Output = Cell;
    #[inline]
    fn sub(self, rhs: Dir) -> Cell {
        self.step(-rhs)
    }
}

/// Displacement from `rhs` to `self`.
impl Sub for Cell {
    type Output = Dir;
    #[inline]
    fn sub(self, rhs: Cell) -> Dir {
        Dir::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// A displacement `(dr, dc)` between two cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dir {
    pub dr: i32,
    pub dc: i32,
}

impl Dir {
    pub const N: Self = Self::new(-1, 0);
    pub const NE: Self = Self::new(-1, 1);
    pub const E: Self = Self::new(0, 1);
    pub const SE: Self = Self::new(1, 1);
    pub const S: Self = Self::new(1, 0);
    pub const SW: Self = Self::new(1, -1);
    pub const W: Self = Self::new(0, -1);
    pub const NW: Self = Self::new(-1, -1);

    /// The four orthogonal unit steps.
    pub const ORTHOGONAL: [Self; 4] = [Self::N, Self::E, Self::S, Self::W];

    /// The four diagonal unit steps.
    pub const DIAGONAL: [Self; 4] = [Self::NE, Self::SE, Self::SW, Self::NW];

    /// All eight unit steps, orthogonal first.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::E,
        Self::S,
        Self::W,
        Self::NE,
        Self::SE,
        Self::SW,
        Self::NW,
    ];

    #[inline]
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.dr == 0 && self.dc == 0
    }

    /// Both components are non-zero.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.dr != 0 && self.dc != 0
    }

    /// A single 8-directional step.
    #[inline]
    pub const fn is_unit(self) -> bool {
        !self.is_zero() && self.dr.abs() <= 1 && self.dc.abs() <= 1
    }

    /// Component-wise sign, turning a displacement into the unit step that
    /// heads the same way.
    #[inline]
    pub const fn signum(self) -> Self {
        Self::new(self.dr.signum(), self.dc.signum())
    }

    /// The row-only and column-only parts of this displacement.
    #[inline]
    pub const fn components(self) -> (Self, Self) {
        (Self::new(self.dr, 0), Self::new(0, self.dc))
    }

    /// The two unit steps perpendicular to an orthogonal direction.
    ///
    /// For a diagonal direction this returns the perpendicular steps of its
    /// row component.
    #[inline]
    pub const fn laterals(self) -> [Self; 2] {
        if self.dr == 0 {
            [Self::S, Self::N]
        } else {
            [Self::E, Self::W]
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.dr, self.dc)
    }
}

impl Add for Dir {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.dr + rhs.dr, self.dc + rhs.dc)
    }
}

impl Sub for Dir {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.dr - rhs.dr, self.dc - rhs.dc)
    }
}

impl Neg for Dir {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.dr, -self.dc)
    }
}
