use gridnav_core::{Cell, Grid};

use crate::config::SearchConfig;
use crate::cost::CostModel;
use crate::error::PathError;
use crate::node::SearchSpace;
use crate::stats::{SearchStats, instrumented};
use crate::traits::PathFinder;

/// Classic best-first A* over single 8-directional steps.
///
/// Optimal under [`CostModel`]: the octile heuristic is consistent, so each
/// cell is expanded at most once and with its final cost.
#[derive(Debug, Clone, Default)]
pub struct AStarSearch {
    config: SearchConfig,
    stats: SearchStats,
}

impl AStarSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl PathFinder for AStarSearch {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn find_path(&mut self, grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>, PathError> {
        let config = self.config;
        instrumented(&mut self.stats, "astar", grid, start, goal, |stats| {
            astar(grid, start, goal, &config, stats)
        })
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

fn astar(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    stats: &mut SearchStats,
) -> Result<Vec<Cell>, PathError> {
    let mut space = SearchSpace::new(grid, start, goal);
    let mut nbuf = Vec::with_capacity(8);

    while let Some(ci) = space.pop() {
        let current = *space.node(ci);
        if current.cell == goal {
            stats.path_cost = Some(i64::from(current.g));
            return Ok(space.chain(ci));
        }
        if config.exhausted(stats.nodes_expanded) {
            return Err(PathError::ExpansionLimit {
                limit: stats.nodes_expanded,
            });
        }
        expand_steps(grid, &mut space, ci, &mut nbuf);
        stats.nodes_expanded += 1;
    }
    Err(PathError::NoPathFound)
}

/// Close node `ci` and push each legal single-step neighbour whose cost
/// improves.
fn expand_steps(grid: &Grid, space: &mut SearchSpace<'_>, ci: usize, nbuf: &mut Vec<Cell>) {
    space.close(ci);
    let current = *space.node(ci);

    nbuf.clear();
    grid.neighbors8(current.cell, nbuf);
    for &next in nbuf.iter() {
        if space.is_closed(next) {
            continue;
        }
        let g = current.g + CostModel::step_cost(next - current.cell);
        space.push(next, g, Some(ci));
    }
}
