//! Helpers for working with returned paths.
//!
//! Strategies return either single steps ([`AStarSearch`](crate::AStarSearch),
//! [`BidirectionalAStarSearch`](crate::BidirectionalAStarSearch)) or
//! waypoints joined by straight lines (smoothed
//! [`JumpPointSearch`](crate::JumpPointSearch),
//! [`VisibilityGraphSearch`](crate::VisibilityGraphSearch)). The functions
//! here accept both.

use gridnav_core::{Cell, Grid, line};

use crate::cost::CostModel;

/// Total cost of a path under [`CostModel`]: each consecutive pair is
/// charged [`CostModel::segment_cost`], which equals the cost of walking
/// the rasterized line between them.
pub fn path_cost(path: &[Cell]) -> i64 {
    path.windows(2)
        .map(|w| i64::from(CostModel::segment_cost(w[0], w[1])))
        .sum()
}

/// Expand waypoints into single steps by rasterizing each segment. Each
/// waypoint appears once; consecutive duplicates are dropped.
pub fn expand_waypoints(waypoints: &[Cell]) -> Vec<Cell> {
    let Some(&first) = waypoints.first() else {
        return Vec::new();
    };
    let mut out = vec![first];
    for w in waypoints.windows(2) {
        out.extend(line(w[0], w[1]).into_iter().skip(1));
    }
    out
}

/// Whether `path` is a legal step-by-step route on `grid`: non-empty, every
/// cell free, and each consecutive pair either identical or one legal
/// 8-directional step apart (no corner-cutting).
pub fn is_valid_path(grid: &Grid, path: &[Cell]) -> bool {
    if path.is_empty() || path.iter().any(|&c| grid.is_blocked(c)) {
        return false;
    }
    path.windows(2).all(|w| {
        let step = w[1] - w[0];
        step.is_zero() || (step.is_unit() && grid.can_step(w[0], step))
    })
}
