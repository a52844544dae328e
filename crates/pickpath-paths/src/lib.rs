//! Shortest paths over discretized floor-plan cost grids.
//!
//! - **Dijkstra** single-source search producing a full [`ShortestPathTree`]
//!   (distance map + predecessor map) with [`dijkstra`]
//! - **Path reconstruction** from a predecessor map with
//!   [`reconstruct_path`] / [`ShortestPathTree::path_to`]
//!
//! Searches run through the [`Pather`] / [`WeightedPather`] traits. A cost
//! grid (`Grid<f32>`) implements both: moves are 4-connected, entering a
//! cell costs the cell's value, and non-finite cells are impassable.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |

mod dijkstra;
mod traits;
mod tree;

pub use dijkstra::dijkstra;
pub use traits::{Pather, WeightedPather};
pub use tree::{ShortestPathTree, UNREACHABLE, reconstruct_path};
