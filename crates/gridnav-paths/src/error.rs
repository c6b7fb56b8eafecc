//! Search errors and endpoint validation.

use std::fmt;

use gridnav_core::{Cell, Grid};

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointIssue {
    OutOfBounds,
    Blocked,
}

/// Errors returned by [`PathFinder::find_path`](crate::PathFinder::find_path).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathError {
    /// Start or goal is out of bounds or blocked. Raised before any search
    /// state is built.
    InvalidEndpoint { cell: Cell, reason: EndpointIssue },
    /// The search space was exhausted without reaching the goal.
    NoPathFound,
    /// The configured expansion cap was hit before the search finished.
    ExpansionLimit { limit: usize },
}

impl PathError {
    /// True for [`PathError::NoPathFound`], the ordinary "unreachable"
    /// outcome.
    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPathFound)
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { cell, reason } => match reason {
                EndpointIssue::OutOfBounds => write!(f, "endpoint {cell} is out of bounds"),
                EndpointIssue::Blocked => write!(f, "endpoint {cell} is blocked"),
            },
            Self::NoPathFound => write!(f, "no path found"),
            Self::ExpansionLimit { limit } => {
                write!(f, "search stopped after {limit} expansions")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Fail fast unless both endpoints are in bounds and free.
pub(crate) fn check_endpoints(grid: &Grid, start: Cell, goal: Cell) -> Result<(), PathError> {
    for cell in [start, goal] {
        if !grid.contains(cell) {
            return Err(PathError::InvalidEndpoint {
                cell,
                reason: EndpointIssue::OutOfBounds,
            });
        }
        if grid.is_blocked(cell) {
            return Err(PathError::InvalidEndpoint {
                cell,
                reason: EndpointIssue::Blocked,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_validated_in_order() {
        let mut g = Grid::new(3, 3);
        g.set_blocked(Cell::new(1, 1), true);
        assert_eq!(check_endpoints(&g, Cell::new(0, 0), Cell::new(2, 2)), Ok(()));
        assert_eq!(
            check_endpoints(&g, Cell::new(0, 3), Cell::new(1, 1)),
            Err(PathError::InvalidEndpoint {
                cell: Cell::new(0, 3),
                reason: EndpointIssue::OutOfBounds
            })
        );
        assert_eq!(
            check_endpoints(&g, Cell::new(0, 0), Cell::new(1, 1)),
            Err(PathError::InvalidEndpoint {
                cell: Cell::new(1, 1),
                reason: EndpointIssue::Blocked
            })
        );
    }

    #[test]
    fn display() {
        assert_eq!(PathError::NoPathFound.to_string(), "no path found");
        assert_eq!(
            PathError::ExpansionLimit { limit: 5 }.to_string(),
            "search stopped after 5 expansions"
        );
        assert_eq!(
            PathError::InvalidEndpoint {
                cell: Cell::new(1, 2),
                reason: EndpointIssue::Blocked
            }
            .to_string(),
            "endpoint (1, 2) is blocked"
        );
        assert!(PathError::NoPathFound.is_no_path());
        assert!(!PathError::ExpansionLimit { limit: 1 }.is_no_path());
    }
}
