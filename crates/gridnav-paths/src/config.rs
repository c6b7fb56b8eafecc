//! Tuning knobs for the search strategies.

use gridnav_core::Grid;

/// Settings shared by every strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Stop with [`PathError::ExpansionLimit`](crate::PathError::ExpansionLimit)
    /// after this many node expansions. `None` means unbounded.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Upper bound on expansions applied by [`capped_for`](Self::capped_for).
    pub const DEFAULT_CAP: usize = 10_000;

    /// No expansion cap.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Stop after `limit` expansions.
    pub fn with_max_expansions(limit: usize) -> Self {
        Self {
            max_expansions: Some(limit),
        }
    }

    /// Cap sized to the grid: half its cells, never more than
    /// [`DEFAULT_CAP`](Self::DEFAULT_CAP).
    pub fn capped_for(grid: &Grid) -> Self {
        Self::with_max_expansions((grid.len() / 2).min(Self::DEFAULT_CAP))
    }

    /// Whether `expanded` expansions already reached the cap.
    #[inline]
    pub(crate) fn exhausted(&self, expanded: usize) -> bool {
        self.max_expansions.is_some_and(|limit| expanded >= limit)
    }
}

/// Settings for [`JumpPointSearch`](crate::JumpPointSearch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JpsConfig {
    pub search: SearchConfig,
    /// Drop intermediate jump points that can be walked past in a straight
    /// line. When off, the jump points are expanded into single steps.
    pub smoothing: bool,
    /// Memoize jumps by `(cell, direction)` for the duration of one call.
    pub jump_cache: bool,
    /// At the start node, try the directions that head toward the goal
    /// first. Only affects tie-breaking between equal-cost paths.
    pub goal_biased_order: bool,
}

impl Default for JpsConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            smoothing: true,
            jump_cache: true,
            goal_biased_order: true,
        }
    }
}

/// Settings for [`VisibilityGraphSearch`](crate::VisibilityGraphSearch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityConfig {
    pub search: SearchConfig,
    /// Guide the graph search with the Euclidean distance to the goal (A*).
    /// When off, plain Dijkstra is used.
    pub use_heuristic: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            use_heuristic: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_for_grid() {
        assert_eq!(
            SearchConfig::capped_for(&Grid::new(10, 10)).max_expansions,
            Some(50)
        );
        assert_eq!(
            SearchConfig::capped_for(&Grid::new(500, 500)).max_expansions,
            Some(SearchConfig::DEFAULT_CAP)
        );
    }

    #[test]
    fn exhausted() {
        assert!(!SearchConfig::unbounded().exhausted(usize::MAX));
        let cfg = SearchConfig::with_max_expansions(3);
        assert!(!cfg.exhausted(2));
        assert!(cfg.exhausted(3));
    }

    #[test]
    fn defaults() {
        let jps = JpsConfig::default();
        assert!(jps.smoothing && jps.jump_cache && jps.goal_biased_order);
        assert_eq!(jps.search.max_expansions, None);
        assert!(VisibilityConfig::default().use_heuristic);
    }
}
