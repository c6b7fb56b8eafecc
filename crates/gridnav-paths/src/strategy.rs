//! Choosing a strategy by name.

use std::fmt;
use std::str::FromStr;

use crate::astar::AStarSearch;
use crate::bidir::BidirectionalAStarSearch;
use crate::jps::JumpPointSearch;
use crate::traits::PathFinder;
use crate::visibility::VisibilityGraphSearch;

/// Selects one of the search strategies by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    #[cfg_attr(feature = "serde", serde(rename = "astar"))]
    AStar,
    #[cfg_attr(feature = "serde", serde(rename = "bidir"))]
    Bidirectional,
    Jps,
    Visibility,
}

impl Strategy {
    pub const ALL: [Self; 4] = [Self::AStar, Self::Bidirectional, Self::Jps, Self::Visibility];

    /// Stable short name, identical to [`PathFinder::name`] of the built
    /// finder.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::AStar => "astar",
            Strategy::Bidirectional => "bidir",
            Strategy::Jps => "jps",
            Strategy::Visibility => "visibility",
        }
    }

    /// A finder for this strategy with default settings.
    pub fn build(self) -> Box<dyn PathFinder + Send> {
        match self {
            Strategy::AStar => Box::new(AStarSearch::new()),
            Strategy::Bidirectional => Box::new(BidirectionalAStarSearch::new()),
            Strategy::Jps => Box::new(JumpPointSearch::new()),
            Strategy::Visibility => Box::new(VisibilityGraphSearch::new()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    /// Case-insensitive; accepts a few common spellings besides
    /// [`as_str`](Strategy::as_str).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Strategy::AStar),
            "bidir" | "bidirectional" | "bi-astar" => Ok(Strategy::Bidirectional),
            "jps" | "jump-point" | "jumppoint" => Ok(Strategy::Jps),
            "visibility" | "vis" | "visgraph" => Ok(Strategy::Visibility),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized [`Strategy`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy '{}' (expected one of: astar, bidir, jps, visibility)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}
