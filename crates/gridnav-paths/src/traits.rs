//! The [`PathFinder`] trait implemented by every strategy.

use gridnav_core::{Cell, Grid};

use crate::error::PathError;
use crate::stats::SearchStats;

/// A pathfinding strategy.
///
/// Every implementation returns the ordered cells from `start` to `goal`
/// (both included) or an error, and exposes counters for the last call so
/// benchmarking and visualization code can stay strategy-agnostic.
pub trait PathFinder {
    /// Short, stable identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Plan a route on `grid` from `start` to `goal`.
    ///
    /// Fails with [`PathError::InvalidEndpoint`] before searching if either
    /// endpoint is out of bounds or blocked, and returns `[start]` without
    /// searching when `start == goal`.
    fn find_path(&mut self, grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>, PathError>;

    /// Counters from the most recent [`find_path`](Self::find_path) call.
    fn stats(&self) -> &SearchStats;
}
