//! Search strategies for 8-directional occupancy grids.
//!
//! Four algorithms share one [`PathFinder`] interface:
//!
//! - **A\*** over single steps ([`AStarSearch`])
//! - **Bidirectional A\*** meeting in the middle ([`BidirectionalAStarSearch`])
//! - **Jump Point Search** with optional smoothing ([`JumpPointSearch`])
//! - **Visibility-graph search** over obstacle corners ([`VisibilityGraphSearch`])
//!
//! Orthogonal steps cost 10 and diagonal steps 14 ([`CostModel`]); diagonal
//! steps never cut past a blocked cell. Every call validates its endpoints,
//! returns `[start]` when `start == goal`, and records [`SearchStats`] that
//! stay readable until the next call.
//!
//! ```
//! use gridnav_core::{Cell, Grid};
//! use gridnav_paths::{PathFinder, Strategy};
//!
//! let mut grid = Grid::new(10, 10);
//! grid.block_row(5, 3..=6);
//!
//! for strategy in Strategy::ALL {
//!     let mut finder = strategy.build();
//!     let path = finder.find_path(&grid, Cell::new(0, 0), Cell::new(9, 9)).unwrap();
//!     assert_eq!(path.first(), Some(&Cell::new(0, 0)));
//!     assert_eq!(path.last(), Some(&Cell::new(9, 9)));
//! }
//! ```
//!
//! Searches keep no state beyond their counters, so a `&Grid` can be shared
//! by finders running on different threads.

mod astar;
mod bidir;
mod config;
mod cost;
mod error;
mod jps;
mod node;
mod path;
mod stats;
mod strategy;
mod traits;
mod visibility;

pub use astar::AStarSearch;
pub use bidir::BidirectionalAStarSearch;
pub use config::{JpsConfig, SearchConfig, VisibilityConfig};
pub use cost::CostModel;
pub use error::{EndpointIssue, PathError};
pub use jps::{JumpPointSearch, forced_neighbor, smooth_path};
pub use path::{expand_waypoints, is_valid_path, path_cost};
pub use stats::SearchStats;
pub use strategy::{Strategy, UnknownStrategy};
pub use traits::PathFinder;
pub use visibility::{VisibilityGraph, VisibilityGraphSearch, corner_waypoints, extract_vertices};
