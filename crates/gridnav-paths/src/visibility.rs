//! Visibility-graph search over obstacle corners.
//!
//! Every convex obstacle corner seen from open space contributes the free
//! cell just outside it as a routing waypoint. The start, the goal and those
//! waypoints are joined by an edge whenever the straight line between them
//! can be walked ([`Grid::walkable_line`]), weighted by Euclidean distance.
//! A* (or Dijkstra) over that graph returns a short list of waypoints that
//! bends only at obstacle corners.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridnav_core::{Cell, Dir, Grid};
use rustc_hash::FxHashMap;

use crate::config::VisibilityConfig;
use crate::cost::CostModel;
use crate::error::PathError;
use crate::path::path_cost;
use crate::stats::{SearchStats, instrumented};
use crate::traits::PathFinder;

// ---------------------------------------------------------------------------
// Corner extraction
// ---------------------------------------------------------------------------

/// Blocked cells that form a convex corner as seen from open space.
///
/// A blocked cell qualifies when, for one of its four diagonal quadrants,
/// the two orthogonal neighbours on that side and the diagonal neighbour
/// between them are all in bounds and free. Returned in row-major order.
pub fn extract_vertices(grid: &Grid) -> Vec<Cell> {
    grid.cells()
        .filter(|&c| grid.is_blocked(c) && open_quadrants(grid, c).next().is_some())
        .collect()
}

/// The free cell diagonally outside each open corner of each obstacle:
/// where a route bends around that corner. Deduplicated, row-major order.
pub fn corner_waypoints(grid: &Grid) -> Vec<Cell> {
    let mut waypoints: Vec<Cell> = grid
        .cells()
        .filter(|&c| grid.is_blocked(c))
        .flat_map(|c| open_quadrants(grid, c).map(move |d| c + d))
        .collect();
    waypoints.sort_unstable();
    waypoints.dedup();
    waypoints
}

fn open_quadrants(grid: &Grid, corner: Cell) -> impl Iterator<Item = Dir> + '_ {
    Dir::DIAGONAL.into_iter().filter(move |&d| {
        let (row_part, col_part) = d.components();
        grid.is_free(corner + row_part) && grid.is_free(corner + col_part) && grid.is_free(corner + d)
    })
}

// ---------------------------------------------------------------------------
// VisibilityGraph
// ---------------------------------------------------------------------------

/// Undirected visibility graph for one query.
///
/// Nodes are the corner waypoints followed by the start and the goal. Built
/// with `O(V²)` walkability tests and discarded after the search.
#[derive(Debug, Clone)]
pub struct VisibilityGraph {
    corners: Vec<Cell>,
    nodes: Vec<Cell>,
    index: FxHashMap<Cell, usize>,
    edges: Vec<Vec<(usize, f64)>>,
    edge_count: usize,
}

impl VisibilityGraph {
    /// Build the graph joining `start` and `goal` to the obstacle corners
    /// of `grid`.
    pub fn build(grid: &Grid, start: Cell, goal: Cell) -> Self {
        let corners = extract_vertices(grid);
        let mut nodes: Vec<Cell> = corner_waypoints(grid)
            .into_iter()
            .filter(|&c| c != start && c != goal)
            .collect();
        nodes.push(start);
        if goal != start {
            nodes.push(goal);
        }

        let index = nodes.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        let mut edges = vec![Vec::new(); nodes.len()];
        let mut edge_count = 0;
        for i in 0..nodes.len() {
            for j in i + 1..nodes.len() {
                let (a, b) = (nodes[i], nodes[j]);
                if grid.walkable_line(a, b) {
                    let w = CostModel::euclidean(a, b);
                    edges[i].push((j, w));
                    edges[j].push((i, w));
                    edge_count += 1;
                }
            }
        }

        Self {
            corners,
            nodes,
            index,
            edges,
            edge_count,
        }
    }

    /// The obstacle corners the graph was built around.
    pub fn corners(&self) -> &[Cell] {
        &self.corners
    }

    /// Graph nodes: corner waypoints, then start, then goal.
    pub fn nodes(&self) -> &[Cell] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell)
    }

    /// Cells visible from `cell`, with their distance. Empty if `cell` is
    /// not a node.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = (Cell, f64)> + '_ {
        self.index
            .get(&cell)
            .into_iter()
            .flat_map(move |&i| self.edges[i].iter().map(move |&(j, w)| (self.nodes[j], w)))
    }

    /// Edge weight between two nodes, if they see each other.
    pub fn distance(&self, a: Cell, b: Cell) -> Option<f64> {
        self.neighbors(a).find(|&(c, _)| c == b).map(|(_, w)| w)
    }

    fn node_index(&self, cell: Cell) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    fn degree(&self, i: usize) -> usize {
        self.edges[i].len()
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Shortest route through the visibility graph.
///
/// Returns the waypoint sequence from start to goal; consecutive waypoints
/// are joined by walkable straight lines, so
/// [`expand_waypoints`](crate::expand_waypoints) of the result is a valid
/// step-by-step path.
#[derive(Debug, Clone, Default)]
pub struct VisibilityGraphSearch {
    config: VisibilityConfig,
    stats: SearchStats,
}

impl VisibilityGraphSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: VisibilityConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }
}

impl PathFinder for VisibilityGraphSearch {
    fn name(&self) -> &'static str {
        "visibility"
    }

    fn find_path(&mut self, grid: &Grid, start: Cell, goal: Cell) -> Result<Vec<Cell>, PathError> {
        let config = self.config;
        instrumented(&mut self.stats, "visibility", grid, start, goal, |stats| {
            let graph = VisibilityGraph::build(grid, start, goal);
            stats.graph_vertices = Some(graph.node_count());
            stats.graph_edges = Some(graph.edge_count());
            log::trace!(
                "visibility: {} corners, {} nodes, {} edges",
                graph.corners().len(),
                graph.node_count(),
                graph.edge_count()
            );

            let path = search_graph(&graph, start, goal, &config, stats)?;
            stats.path_cost = Some(path_cost(&path));
            Ok(path)
        })
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Open-set entry with a floating-point priority.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    f: f64,
    h: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn search_graph(
    graph: &VisibilityGraph,
    start: Cell,
    goal: Cell,
    config: &VisibilityConfig,
    stats: &mut SearchStats,
) -> Result<Vec<Cell>, PathError> {
    let (Some(si), Some(gi)) = (graph.node_index(start), graph.node_index(goal)) else {
        return Err(PathError::NoPathFound);
    };
    if graph.degree(si) == 0 || graph.degree(gi) == 0 {
        return Err(PathError::NoPathFound);
    }

    let heuristic = |i: usize| {
        if config.use_heuristic {
            CostModel::euclidean(graph.nodes[i], goal)
        } else {
            0.0
        }
    };

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut open = BinaryHeap::new();

    dist[si] = 0.0;
    open.push(Frontier {
        f: heuristic(si),
        h: heuristic(si),
        node: si,
    });

    while let Some(Frontier { node, .. }) = open.pop() {
        if closed[node] {
            continue;
        }
        if node == gi {
            let mut path = Vec::new();
            let mut cur = Some(gi);
            while let Some(i) = cur {
                path.push(graph.nodes[i]);
                cur = parent[i];
            }
            path.reverse();
            return Ok(path);
        }
        if config.search.exhausted(stats.nodes_expanded) {
            return Err(PathError::ExpansionLimit {
                limit: stats.nodes_expanded,
            });
        }
        closed[node] = true;
        stats.nodes_expanded += 1;

        for &(next, w) in &graph.edges[node] {
            if closed[next] {
                continue;
            }
            let d = dist[node] + w;
            if d < dist[next] {
                dist[next] = d;
                parent[next] = Some(node);
                let h = heuristic(next);
                open.push(Frontier { f: d + h, h, node: next });
            }
        }
    }
    Err(PathError::NoPathFound)
}
