//! Per-call search statistics.

use std::time::{Duration, Instant};

use gridnav_core::{Cell, Grid};

use crate::error::{PathError, check_endpoints};

/// Instrumentation counters for the most recent `find_path` call.
///
/// Every field is reset at the start of each call, including calls that
/// fail endpoint validation.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes taken off the open set and expanded.
    pub nodes_expanded: usize,
    /// Wall time spent inside `find_path`.
    pub elapsed: Duration,
    /// Number of cells in the returned sequence; 0 on failure.
    pub path_length: usize,
    /// Cost of the path under [`CostModel`](crate::CostModel).
    pub path_cost: Option<i64>,
    /// Mean Chebyshev length of the jumps between jump points (JPS only).
    pub avg_jump_distance: Option<f64>,
    /// Nodes in the visibility graph (visibility search only).
    pub graph_vertices: Option<usize>,
    /// Undirected edges in the visibility graph (visibility search only).
    pub graph_edges: Option<usize>,
}

/// Run one `find_path` call with the bookkeeping every strategy shares:
/// reset the counters, validate endpoints, short-circuit `start == goal`,
/// time the search and log the outcome.
pub(crate) fn instrumented<F>(
    stats: &mut SearchStats,
    strategy: &'static str,
    grid: &Grid,
    start: Cell,
    goal: Cell,
    search: F,
) -> Result<Vec<Cell>, PathError>
where
    F: FnOnce(&mut SearchStats) -> Result<Vec<Cell>, PathError>,
{
    *stats = SearchStats::default();
    let timer = Instant::now();

    let result = match check_endpoints(grid, start, goal) {
        Err(err) => Err(err),
        Ok(()) if start == goal => {
            stats.path_cost = Some(0);
            Ok(vec![start])
        }
        Ok(()) => search(stats),
    };

    stats.elapsed = timer.elapsed();
    match &result {
        Ok(path) => {
            stats.path_length = path.len();
            log::debug!(
                "{strategy}: {start} -> {goal}: {} cells, cost {:?}, {} expanded in {:?}",
                path.len(),
                stats.path_cost,
                stats.nodes_expanded,
                stats.elapsed
            );
        }
        Err(err) => {
            stats.path_cost = None;
            log::debug!(
                "{strategy}: {start} -> {goal}: {err} ({} expanded in {:?})",
                stats.nodes_expanded,
                stats.elapsed
            );
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resets_and_short_circuits_degenerate_input() {
        let grid = Grid::new(4, 4);
        let mut stats = SearchStats {
            nodes_expanded: 99,
            ..SearchStats::default()
        };
        let c = Cell::new(2, 2);
        let path = instrumented(&mut stats, "test", &grid, c, c, |_| {
            panic!("search must not run for start == goal")
        })
        .unwrap();
        assert_eq!(path, vec![c]);
        assert_eq!(stats.nodes_expanded, 0);
        assert_eq!(stats.path_length, 1);
        assert_eq!(stats.path_cost, Some(0));
    }

    #[test]
    fn invalid_endpoint_skips_search() {
        let grid = Grid::new(4, 4);
        let mut stats = SearchStats::default();
        let err = instrumented(
            &mut stats,
            "test",
            &grid,
            Cell::new(0, 0),
            Cell::new(9, 9),
            |_| panic!("search must not run for invalid endpoints"),
        )
        .unwrap_err();
        assert!(matches!(err, PathError::InvalidEndpoint { .. }));
        assert_eq!(stats.path_length, 0);
    }

    #[test]
    fn failure_clears_path_fields() {
        let grid = Grid::new(4, 4);
        let mut stats = SearchStats::default();
        let err = instrumented(
            &mut stats,
            "test",
            &grid,
            Cell::new(0, 0),
            Cell::new(3, 3),
            |s| {
                s.nodes_expanded = 7;
                s.path_cost = Some(1);
                Err(PathError::NoPathFound)
            },
        )
        .unwrap_err();
        assert!(err.is_no_path());
        assert_eq!(stats.nodes_expanded, 7);
        assert_eq!(stats.path_cost, None);
        assert_eq!(stats.path_length, 0);
    }
}
