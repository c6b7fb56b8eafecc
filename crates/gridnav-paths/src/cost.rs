//! Movement costs and heuristics for 8-directional grids.
//!
//! Orthogonal steps cost 10 and diagonal steps 14, keeping an integer
//! approximation of 1 and √2.

use gridnav_core::{Cell, Dir};

/// Cost and heuristic functions shared by the grid searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostModel;

impl CostModel {
    /// Cost of one orthogonal step.
    pub const STRAIGHT: i32 = 10;
    /// Cost of one diagonal step.
    pub const DIAGONAL: i32 = 14;

    /// Cost of a single step: 14 if both components are non-zero, else 10.
    #[inline]
    pub const fn step_cost(dir: Dir) -> i32 {
        if dir.dr != 0 && dir.dc != 0 {
            Self::DIAGONAL
        } else {
            Self::STRAIGHT
        }
    }

    /// Octile distance `10 * (dx + dy) + (14 - 20) * min(dx, dy)`.
    ///
    /// Admissible and consistent under [`step_cost`](Self::step_cost).
    #[inline]
    pub fn heuristic(a: Cell, b: Cell) -> i32 {
        let dx = (a.row - b.row).abs();
        let dy = (a.col - b.col).abs();
        Self::STRAIGHT * (dx + dy) + (Self::DIAGONAL - 2 * Self::STRAIGHT) * dx.min(dy)
    }

    /// Cost of walking from `a` to `b` along a straight or 45° run, or more
    /// generally the cheapest 8-directional cost on an empty grid:
    /// `14 * min + 10 * (max - min)`. Equal to [`heuristic`](Self::heuristic).
    #[inline]
    pub fn segment_cost(a: Cell, b: Cell) -> i32 {
        let dx = (a.row - b.row).abs();
        let dy = (a.col - b.col).abs();
        let diag = dx.min(dy);
        Self::DIAGONAL * diag + Self::STRAIGHT * (dx.max(dy) - diag)
    }

    /// Euclidean distance, unscaled.
    #[inline]
    pub fn euclidean(a: Cell, b: Cell) -> f64 {
        a.distance(b)
    }
}
