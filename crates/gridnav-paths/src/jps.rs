//! Jump Point Search (JPS) on 8-directional grids without corner-cutting.
//!
//! JPS is an A* variant that does not enqueue every neighbour. From each
//! expanded node it "jumps" along straight and diagonal runs of free cells
//! and only adds the cells where the run has to be reconsidered: the goal,
//! cells with a *forced neighbour*, and diagonal cells from which an
//! orthogonal jump succeeds. Edges between jump points are costed with
//! [`CostModel::segment_cost`], so the result costs the same as
//! [`AStarSearch`](crate::AStarSearch).
//!
//! The forced-neighbour rule is adapted to the no-corner-cutting movement
//! of [`Grid::can_step`]. A diagonal step can never slip past a blocked
//! cell, so diagonal runs have no forced neighbours of their own, and an
//! orthogonal run stops only where a lateral cell opens up behind an
//! obstacle.

use gridnav_core::{Cell, Dir, Grid};
use rustc_hash::FxHashMap;

use crate::config::JpsConfig;
use crate::cost::CostModel;
use crate::error::PathError;
use crate::node::SearchSpace;
use crate::path::expand_waypoints;
use crate::stats::{SearchStats, instrumented};
use crate::traits::PathFinder;

/// Jump Point Search.
///
/// With [`JpsConfig::smoothing`] on, the returned path is a list of
/// waypoints joined by walkable straight lines (see
/// [`expand_waypoints`](crate::expand_waypoints) to get single steps back).
/// With smoothing off it is the step-by-step route through every jump
/// point.
#[derive(Debug, Clone, Default)]
pub struct JumpPointSearch {
    config: JpsConfig,
    stats: SearchStats,
}

impl JumpPointSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JpsConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &JpsConfig {
        &self.config
    }
}

impl PathFinder for JumpPointSearch {
    fn name(&self) -> &'static str {
        "jps"
    }

    fn find_path(&mut self, grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>, PathError> {
        let config = self.config;
        instrumented(&mut self.stats, "jps", grid, start, goal, |stats| {
            let jump_points = jps(grid, start, goal, &config, stats)?;
            Ok(if config.smoothing {
                smooth_path(grid, &jump_points)
            } else {
                expand_waypoints(&jump_points)
            })
        })
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Run the search and return the raw jump-point sequence.
fn jps(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    config: &JpsConfig,
    stats: &mut SearchStats,
) -> Result<Vec<Cell>, PathError> {
    let mut space = SearchSpace::new(grid, start, goal);
    let mut jumper = Jumper::new(grid, goal, config.jump_cache);

    let found = 'search: loop {
        let Some(ci) = space.pop() else {
            break 'search None;
        };
        let current = *space.node(ci);
        if current.cell == goal {
            break 'search Some(ci);
        }
        if config.search.exhausted(stats.nodes_expanded) {
            return Err(PathError::ExpansionLimit {
                limit: stats.nodes_expanded,
            });
        }
        space.close(ci);
        stats.nodes_expanded += 1;

        let dirs = match current.parent {
            None => start_dirs(current.cell, goal, config.goal_biased_order),
            Some(pi) => prune_dirs(grid, current.cell, space.node(pi).cell),
        };
        for dir in dirs {
            let Some(jp) = jumper.jump(current.cell, dir) else {
                continue;
            };
            if space.is_closed(jp) {
                continue;
            }
            let g = current.g + CostModel::segment_cost(current.cell, jp);
            space.push(jp, g, Some(ci));
        }
    };

    log::trace!(
        "jps: {} jump calls, {} cache hits",
        jumper.calls,
        jumper.hits
    );

    let Some(gi) = found else {
        return Err(PathError::NoPathFound);
    };
    let jump_points = space.chain(gi);
    let total: i32 = jump_points.windows(2).map(|w| w[0].chebyshev(w[1])).sum();
    stats.avg_jump_distance = Some(f64::from(total) / (jump_points.len() - 1) as f64);
    stats.path_cost = Some(i64::from(space.node(gi).g));
    Ok(jump_points)
}

// ---------------------------------------------------------------------------
// Forced neighbours and pruning
// ---------------------------------------------------------------------------

/// Whether a run arriving at `cell` while moving along `dir` must stop
/// there because the obstacles around it open a new direction.
///
/// Orthogonal moves: a lateral cell is blocked while the cell past it in
/// the move direction is free, or a lateral cell is free while the cell
/// behind it was blocked. Diagonal moves: a trailing orthogonal neighbour
/// is blocked while the diagonal beyond it is free.
///
/// Jumping itself only stops where a side opens behind an obstacle. The
/// other conditions either cannot hold after a legal step or mark a cell
/// whose only successor is the run already being followed.
pub fn forced_neighbor(grid: &Grid, cell: Cell, dir: Dir) -> bool {
    if dir.is_diagonal() {
        let (row_part, col_part) = dir.components();
        return (grid.is_blocked(cell - row_part) && grid.is_free(cell + (col_part - row_part)))
            || (grid.is_blocked(cell - col_part) && grid.is_free(cell + (row_part - col_part)));
    }
    side_opens(grid, cell, dir)
        || dir.laterals().into_iter().any(|side| {
            let lateral = cell + side;
            grid.is_blocked(lateral) && grid.is_free(lateral + dir)
        })
}

/// A lateral cell of an orthogonal run at `cell` is free while the one
/// behind it is blocked: a turn around that obstacle starts here.
fn side_opens(grid: &Grid, cell: Cell, dir: Dir) -> bool {
    dir.laterals().into_iter().any(|side| {
        let lateral = cell + side;
        grid.is_free(lateral) && grid.is_blocked(lateral - dir)
    })
}

/// Directions worth jumping in from a node reached from `parent`.
fn prune_dirs(grid: &Grid, cell: Cell, parent: Cell) -> Vec<Dir> {
    let d = (cell - parent).signum();
    let mut dirs = Vec::with_capacity(5);

    if d.is_diagonal() {
        // Both trailing orthogonals are free after a legal diagonal step.
        let (row_part, col_part) = d.components();
        dirs.extend([row_part, col_part, d]);
    } else {
        dirs.push(d);
        for side in d.laterals() {
            let lateral = cell + side;
            if grid.is_free(lateral) && grid.is_blocked(lateral - d) {
                dirs.push(side);
                dirs.push(d + side);
            }
        }
    }
    dirs
}

/// All eight directions, optionally reordered so the ones heading toward
/// `goal` are tried first.
fn start_dirs(start: Cell, goal: Cell, goal_biased: bool) -> Vec<Dir> {
    if !goal_biased {
        return Dir::ALL.to_vec();
    }
    let toward = (goal - start).signum();
    let mut dirs = Vec::with_capacity(8);
    if toward.is_diagonal() {
        let (row_part, col_part) = toward.components();
        dirs.extend([toward, row_part, col_part]);
    } else if !toward.is_zero() {
        dirs.push(toward);
    }
    let rest: Vec<Dir> = Dir::ALL.into_iter().filter(|d| !dirs.contains(d)).collect();
    dirs.extend(rest);
    dirs
}

// ---------------------------------------------------------------------------
// Jumping
// ---------------------------------------------------------------------------

/// Jump evaluation for one search call, with optional memoization by
/// `(cell, dir)`.
struct Jumper<'g> {
    grid: &'g Grid,
    goal: Cell,
    cache: Option<FxHashMap<(Cell, Dir), Option<Cell>>>,
    calls: usize,
    hits: usize,
}

impl<'g> Jumper<'g> {
    fn new(grid: &'g Grid, goal: Cell, cached: bool) -> Self {
        Self {
            grid,
            goal,
            cache: cached.then(FxHashMap::default),
            calls: 0,
            hits: 0,
        }
    }

    /// The first jump point reached from `from` moving along `dir`, or
    /// `None` if the run ends at an obstacle or the grid edge first.
    fn jump(&mut self, from: Cell, dir: Dir) -> Option<Cell> {
        self.calls += 1;
        if let Some(&hit) = self.cache.as_ref().and_then(|cache| cache.get(&(from, dir))) {
            self.hits += 1;
            return hit;
        }

        let result = if dir.is_diagonal() {
            self.jump_diagonal(from, dir)
        } else {
            self.jump_straight(from, dir)
        };

        if let Some(cache) = &mut self.cache {
            cache.insert((from, dir), result);
        }
        result
    }

    fn jump_straight(&self, from: Cell, dir: Dir) -> Option<Cell> {
        let mut cell = from;
        loop {
            if !self.grid.can_step(cell, dir) {
                return None;
            }
            cell = cell + dir;
            if cell == self.goal || side_opens(self.grid, cell, dir) {
                return Some(cell);
            }
        }
    }

    fn jump_diagonal(&mut self, from: Cell, dir: Dir) -> Option<Cell> {
        let (row_part, col_part) = dir.components();
        let mut cell = from;
        loop {
            if !self.grid.can_step(cell, dir) {
                return None;
            }
            cell = cell + dir;
            if cell == self.goal {
                return Some(cell);
            }
            if self.jump(cell, row_part).is_some() || self.jump(cell, col_part).is_some() {
                return Some(cell);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Smoothing
// ---------------------------------------------------------------------------

/// Greedily drop waypoints: from each kept waypoint, skip ahead to the
/// furthest later one joined to it by a [`Grid::walkable_line`].
///
/// Consecutive input waypoints are expected to be walkable to each other;
/// the first and last waypoints are always kept.
pub fn smooth_path(grid: &Grid, waypoints: &[Cell]) -> Vec<Cell> {
    let Some(&first) = waypoints.first() else {
        return Vec::new();
    };
    let mut out = vec![first];
    let mut i = 0;
    while i + 1 < waypoints.len() {
        let next = (i + 2..waypoints.len())
            .rev()
            .find(|&j| grid.walkable_line(waypoints[i], waypoints[j]))
            .unwrap_or(i + 1);
        out.push(waypoints[next]);
        i = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::AStarSearch;
    use crate::path::{is_valid_path, path_cost};

    fn jumper(grid: &Grid, goal: Cell) -> Jumper<'_> {
        Jumper::new(grid, goal, false)
    }

    #[test]
    fn forced_neighbor_open_grid() {
        let grid = Grid::new(5, 5);
        for dir in Dir::ALL {
            assert!(!forced_neighbor(&grid, Cell::new(2, 2), dir));
        }
        // The border counts as blocked but never opens anything.
        assert!(!forced_neighbor(&grid, Cell::new(0, 2), Dir::E));
        assert!(!forced_neighbor(&grid, Cell::new(2, 0), Dir::S));
    }

    #[test]
    fn forced_neighbor_orthogonal() {
        let mut grid = Grid::new(3, 5);
        grid.set_blocked(Cell::new(0, 1), true);
        // Beside the obstacle, with free space past it.
        assert!(forced_neighbor(&grid, Cell::new(1, 1), Dir::E));
        // Just past the obstacle, where the corner opens.
        assert!(forced_neighbor(&grid, Cell::new(1, 2), Dir::E));
        assert!(!forced_neighbor(&grid, Cell::new(1, 3), Dir::E));
        // Moving west the roles swap.
        assert!(forced_neighbor(&grid, Cell::new(1, 0), Dir::W));
        assert!(!forced_neighbor(&grid, Cell::new(1, 3), Dir::W));
    }

    #[test]
    fn forced_neighbor_diagonal() {
        let mut grid = Grid::new(5, 5);
        grid.set_blocked(Cell::new(1, 2), true);
        // Moving south-east into (2, 2): the cell above is blocked while the
        // one up and to the right is free.
        assert!(forced_neighbor(&grid, Cell::new(2, 2), Dir::SE));
        assert!(!forced_neighbor(&grid, Cell::new(3, 3), Dir::SE));
    }

    #[test]
    fn straight_jump_stops_where_the_side_opens() {
        let mut grid = Grid::new(3, 8);
        grid.set_blocked(Cell::new(0, 2), true);
        let mut j = jumper(&grid, Cell::new(2, 7));
        // (1, 2) sits beside the obstacle; the run goes on to (1, 3), where
        // the cell above opens.
        assert!(forced_neighbor(&grid, Cell::new(1, 2), Dir::E));
        assert!(!side_opens(&grid, Cell::new(1, 2), Dir::E));
        assert_eq!(j.jump(Cell::new(1, 0), Dir::E), Some(Cell::new(1, 3)));
    }

    #[test]
    fn straight_jump_stops_at_goal_or_wall() {
        let mut grid = Grid::new(3, 8);
        grid.set_blocked(Cell::new(1, 6), true);
        let goal = Cell::new(1, 4);
        let mut j = jumper(&grid, goal);
        assert_eq!(j.jump(Cell::new(1, 0), Dir::E), Some(goal));
        assert_eq!(j.jump(Cell::new(1, 5), Dir::E), None);
        assert_eq!(j.jump(Cell::new(0, 0), Dir::N), None);
    }

    #[test]
    fn diagonal_jump_stops_where_orthogonal_run_succeeds() {
        let grid = Grid::new(8, 8);
        let goal = Cell::new(3, 7);
        let mut j = jumper(&grid, goal);
        // Walking south-east from the corner, (3, 3) is the first cell from
        // which a run east reaches the goal.
        assert_eq!(j.jump(Cell::new(0, 0), Dir::SE), Some(Cell::new(3, 3)));
    }

    #[test]
    fn diagonal_jump_refuses_corner_cut() {
        let grid = Grid::from_ascii(
            "....
             .#..
             ....",
        )
        .unwrap();
        let mut j = jumper(&grid, Cell::new(2, 2));
        assert_eq!(j.jump(Cell::new(0, 0), Dir::SE), None);
    }

    #[test]
    fn cache_does_not_change_results() {
        let grid = Grid::from_ascii(
            "..........
             ..##......
             ..##..#...
             ......#...
             ####..#.##
             ......#...
             ..#.......
             ..#..###..
             ..#.......
             ..........",
        )
        .unwrap();
        let goal = Cell::new(9, 9);
        let mut cached = Jumper::new(&grid, goal, true);
        let mut plain = jumper(&grid, goal);
        for cell in grid.cells().filter(|&c| grid.is_free(c)) {
            for dir in Dir::ALL {
                assert_eq!(cached.jump(cell, dir), plain.jump(cell, dir), "{cell} {dir}");
            }
        }
        assert!(cached.hits > 0);
        assert_eq!(plain.hits, 0);
    }

    #[test]
    fn prune_after_diagonal_arrival() {
        let grid = Grid::new(5, 5);
        let dirs = prune_dirs(&grid, Cell::new(2, 2), Cell::new(1, 1));
        assert_eq!(dirs, vec![Dir::S, Dir::E, Dir::SE]);

        // Obstacles beside the diagonal leave the natural directions alone.
        let mut grid = grid;
        grid.set_blocked(Cell::new(1, 3), true);
        grid.set_blocked(Cell::new(3, 1), true);
        let dirs = prune_dirs(&grid, Cell::new(2, 2), Cell::new(0, 0));
        assert_eq!(dirs, vec![Dir::S, Dir::E, Dir::SE]);
    }

    #[test]
    fn diagonal_run_passes_obstacle_corners() {
        let mut grid = Grid::new(6, 6);
        grid.set_blocked(Cell::new(1, 3), true);
        grid.set_blocked(Cell::new(3, 1), true);
        let mut j = jumper(&grid, Cell::new(5, 5));
        // Nothing stops the run at (1, 1); at (2, 2) the run south turns
        // around the obstacle at (3, 1).
        assert_eq!(j.jump(Cell::new(0, 0), Dir::SE), Some(Cell::new(2, 2)));
    }

    #[test]
    fn prune_after_orthogonal_arrival_around_corner() {
        let mut grid = Grid::new(5, 5);
        grid.set_blocked(Cell::new(1, 1), true);
        let dirs = prune_dirs(&grid, Cell::new(2, 2), Cell::new(2, 0));
        assert_eq!(dirs, vec![Dir::E, Dir::N, Dir::NE]);
    }

    #[test]
    fn start_dirs_goal_bias() {
        let dirs = start_dirs(Cell::new(0, 0), Cell::new(5, 9), true);
        assert_eq!(&dirs[..3], &[Dir::SE, Dir::S, Dir::E]);
        assert_eq!(dirs.len(), 8);
        let dirs = start_dirs(Cell::new(4, 4), Cell::new(4, 0), true);
        assert_eq!(dirs[0], Dir::W);
        assert_eq!(dirs.len(), 8);
        assert_eq!(start_dirs(Cell::new(0, 0), Cell::new(5, 9), false), Dir::ALL.to_vec());
    }

    #[test]
    fn empty_grid_single_jump() {
        let grid = Grid::new(10, 10);
        let mut finder = JumpPointSearch::new();
        let path = finder.find_path(&grid, Cell::new(0, 0), Cell::new(9, 9)).unwrap();
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(9, 9)]);
        let stats = finder.stats();
        assert_eq!(stats.path_cost, Some(126));
        assert_eq!(stats.avg_jump_distance, Some(9.0));
        assert_eq!(stats.nodes_expanded, 1);
    }

    #[test]
    fn unsmoothed_path_is_stepwise() {
        let grid = Grid::new(10, 10);
        let mut finder = JumpPointSearch::with_config(JpsConfig {
            smoothing: false,
            ..JpsConfig::default()
        });
        let path = finder.find_path(&grid, Cell::new(0, 0), Cell::new(9, 9)).unwrap();
        assert_eq!(path.len(), 10);
        assert!(is_valid_path(&grid, &path));
    }

    #[test]
    fn matches_astar_cost_with_obstacles() {
        let grid = Grid::from_ascii(
            "..........
             .#######..
             .......#..
             .#####.#..
             .#...#.#..
             .#.#.#.#..
             .#.#...#..
             .#.#####..
             .#........
             .#........",
        )
        .unwrap();
        let start = Cell::new(4, 2);
        let goal = Cell::new(9, 9);
        let reference = AStarSearch::new().find_path(&grid, start, goal).unwrap();

        for smoothing in [true, false] {
            let mut finder = JumpPointSearch::with_config(JpsConfig {
                smoothing,
                ..JpsConfig::default()
            });
            let path = finder.find_path(&grid, start, goal).unwrap();
            assert_eq!(finder.stats().path_cost, Some(path_cost(&reference)));
            assert_eq!(path_cost(&path), path_cost(&reference));
            assert!(is_valid_path(&grid, &expand_waypoints(&path)));
        }
    }

    #[test]
    fn smooth_path_skips_visible_waypoints() {
        let grid = Grid::new(6, 10);
        let points = [Cell::new(0, 0), Cell::new(0, 5), Cell::new(3, 8)];
        assert_eq!(smooth_path(&grid, &points), vec![Cell::new(0, 0), Cell::new(3, 8)]);

        let mut grid = grid;
        grid.set_blocked(Cell::new(1, 3), true);
        assert_eq!(smooth_path(&grid, &points), points.to_vec());
        assert!(smooth_path(&grid, &[]).is_empty());
    }
}
