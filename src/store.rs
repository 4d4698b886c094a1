//! State store: the tracker collection, its reducer and write-through
//! persistence.
//!
//! The collection is the single source of truth. Every dispatched action is
//! applied to it and the whole collection is then written back to the data
//! file; there is no incremental diffing.

mod model;
mod persist;
mod reducer;

pub use model::*;
pub use persist::*;
pub use reducer::*;
