//! Node arena, open set and closed set shared by the A*-family searches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use gridnav_core::{Cell, Grid};

use crate::cost::CostModel;

/// A node created during a grid search.
///
/// `parent` is an index into the same search's node arena, so predecessor
/// links form a tree and never own anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SearchNode {
    pub(crate) cell: Cell,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: Option<usize>,
}

// ---------------------------------------------------------------------------
// Open-set entry
// ---------------------------------------------------------------------------

/// Reference into the node arena, ordered for use in `BinaryHeap`.
///
/// Pops the smallest `f` first, ties broken by smaller `h` (closer to the
/// goal), then by creation order.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Open set, closed set and node arena of one A*-family run.
///
/// Built at the start of a search and dropped when it returns. Per-cell
/// state lives in flat vectors indexed by [`Grid::index`].
pub(crate) struct SearchSpace<'g> {
    grid: &'g Grid,
    target: Cell,
    nodes: Vec<SearchNode>,
    open: BinaryHeap<OpenEntry>,
    best: Vec<Option<usize>>,
    closed: Vec<Option<usize>>,
}

impl<'g> SearchSpace<'g> {
    /// Seed a search rooted at `root` whose heuristic points at `target`.
    pub(crate) fn new(grid: &'g Grid, root: Cell, target: Cell) -> Self {
        let mut space = Self {
            grid,
            target,
            nodes: Vec::new(),
            open: BinaryHeap::new(),
            best: vec![None; grid.len()],
            closed: vec![None; grid.len()],
        };
        space.push(root, 0, None);
        space
    }

    /// Record `cell` reached with cost `g` from `parent`. Returns `false`
    /// (and records nothing) unless `g` improves on the best cost seen for
    /// that cell. Superseded open entries are left in the heap and skipped
    /// when popped.
    pub(crate) fn push(&mut self, cell: Cell, g: i32, parent: Option<usize>) -> bool {
        let Some(ci) = self.grid.index(cell) else {
            return false;
        };
        if self.best[ci].is_some_and(|b| g >= self.nodes[b].g) {
            return false;
        }

        let h = CostModel::heuristic(cell, self.target);
        let created = SearchNode {
            cell,
            g,
            h,
            f: g + h,
            parent,
        };
        let node = self.nodes.len();
        self.best[ci] = Some(node);
        self.open.push(OpenEntry {
            f: created.f,
            h: created.h,
            node,
        });
        self.nodes.push(created);
        true
    }

    /// Pop the best open node that is neither closed nor superseded.
    pub(crate) fn pop(&mut self) -> Option<usize> {
        while let Some(entry) = self.open.pop() {
            let Some(ci) = self.grid.index(self.nodes[entry.node].cell) else {
                continue;
            };
            if self.closed[ci].is_some() || self.best[ci] != Some(entry.node) {
                continue;
            }
            return Some(entry.node);
        }
        None
    }

    /// Mark the node's cell as finalized.
    pub(crate) fn close(&mut self, node: usize) {
        if let Some(ci) = self.grid.index(self.nodes[node].cell) {
            self.closed[ci] = Some(node);
        }
    }

    /// The cheapest node recorded for `cell` so far, open or closed.
    pub(crate) fn best_node(&self, cell: Cell) -> Option<usize> {
        self.grid.index(cell).and_then(|ci| self.best[ci])
    }

    /// The node that closed `cell`, if any.
    pub(crate) fn closed_node(&self, cell: Cell) -> Option<usize> {
        self.grid.index(cell).and_then(|ci| self.closed[ci])
    }

    #[inline]
    pub(crate) fn is_closed(&self, cell: Cell) -> bool {
        self.closed_node(cell).is_some()
    }

    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &SearchNode {
        &self.nodes[idx]
    }

    /// Cells from the root to `idx`, following parent links.
    pub(crate) fn chain(&self, idx: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut cur = Some(idx);
        while let Some(i) = cur {
            path.push(self.nodes[i].cell);
            cur = self.nodes[i].parent;
        }
        path.reverse();
        path
    }
}
