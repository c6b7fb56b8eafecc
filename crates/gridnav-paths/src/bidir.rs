use gridnav_core::{Cell, Grid};

use crate::config::SearchConfig;
use crate::cost::CostModel;
use crate::error::PathError;
use crate::node::SearchSpace;
use crate::stats::{SearchStats, instrumented};
use crate::traits::PathFinder;

/// Meet-in-the-middle A*: one search rooted at the start and aimed at the
/// goal, one rooted at the goal and aimed at the start, expanded in
/// lock-step.
///
/// Whenever one side expands a cell, or relaxes a step into a cell, that the
/// other side has already reached, the joined route becomes a candidate
/// meeting. The search stops once the cheapest candidate is no more
/// expensive than the smallest `f` left on either frontier, so the result
/// costs the same as [`AStarSearch`](crate::AStarSearch).
#[derive(Debug, Clone, Default)]
pub struct BidirectionalAStarSearch {
    config: SearchConfig,
    stats: SearchStats,
}

impl BidirectionalAStarSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The expansion cap counts both frontiers together.
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

impl PathFinder for BidirectionalAStarSearch {
    fn name(&self) -> &'static str {
        "bidir"
    }

    fn find_path(&mut self, grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>, PathError> {
        let config = self.config;
        instrumented(&mut self.stats, "bidir", grid, start, goal, |stats| {
            bidirectional(grid, start, goal, &config, stats)
        })
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// A joined route: the forward chain to `fwd`, then the backward chain from
/// `bwd` read in reverse. The two cells are equal or one step apart.
#[derive(Debug, Clone, Copy)]
struct Meeting {
    cost: i32,
    fwd: usize,
    bwd: usize,
}

fn bidirectional(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    config: &SearchConfig,
    stats: &mut SearchStats,
) -> Result<Vec<Cell>, PathError> {
    let mut fwd = SearchSpace::new(grid, start, goal);
    let mut bwd = SearchSpace::new(grid, goal, start);
    let mut best: Option<Meeting> = None;
    let mut nbuf = Vec::with_capacity(8);

    'search: loop {
        for forward in [true, false] {
            let (this, other) = if forward {
                (&mut fwd, &bwd)
            } else {
                (&mut bwd, &fwd)
            };

            let Some(ci) = this.pop() else {
                break 'search;
            };
            let current = *this.node(ci);
            if best.is_some_and(|m| current.f >= m.cost) {
                break 'search;
            }
            if config.exhausted(stats.nodes_expanded) {
                return Err(PathError::ExpansionLimit {
                    limit: stats.nodes_expanded,
                });
            }
            this.close(ci);
            stats.nodes_expanded += 1;

            let mut offer = |g: i32, cell: Cell| {
                let Some(oi) = other.best_node(cell) else {
                    return;
                };
                let cost = g + other.node(oi).g;
                if best.is_none_or(|m| cost < m.cost) {
                    let (f, b) = if forward { (ci, oi) } else { (oi, ci) };
                    best = Some(Meeting { cost, fwd: f, bwd: b });
                }
            };

            offer(current.g, current.cell);
            nbuf.clear();
            grid.neighbors8(current.cell, &mut nbuf);
            for &next in &nbuf {
                let g = current.g + CostModel::step_cost(next - current.cell);
                offer(g, next);
                if !this.is_closed(next) {
                    this.push(next, g, Some(ci));
                }
            }
        }
    }

    let Some(meeting) = best else {
        return Err(PathError::NoPathFound);
    };
    let mut path = fwd.chain(meeting.fwd);
    let mut tail = bwd.chain(meeting.bwd);
    tail.reverse();
    log::trace!(
        "bidir: frontiers met at {} / {} (cost {})",
        fwd.node(meeting.fwd).cell,
        bwd.node(meeting.bwd).cell,
        meeting.cost
    );
    if path.last() == tail.first() {
        tail.remove(0);
    }
    path.extend(tail);
    stats.path_cost = Some(i64::from(meeting.cost));
    Ok(path)
}
