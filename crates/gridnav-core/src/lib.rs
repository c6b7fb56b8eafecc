//! **gridnav-core** provides occupancy grids for 8-directional pathfinding.
//!
//! This crate provides the foundation shared by every search strategy in
//! `gridnav-paths`: the [`Cell`] coordinate and [`Dir`] displacement types,
//! the read-only [`Grid`] occupancy matrix with its bounds, blockage and
//! no-corner-cutting movement rules, and integer Bresenham rasterization
//! for line-of-sight tests.

pub mod error;
pub mod geom;
pub mod grid;
pub mod raster;

pub use error::GridError;
pub use geom::{Cell, Dir};
pub use grid::Grid;
pub use raster::line;
