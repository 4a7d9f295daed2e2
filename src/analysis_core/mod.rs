//! Traversal and aggregation over the catalog
//!
//! - `traversal` - evolution-chain linearization (pre-order, iterative)
//! - `reduce` - Count / Collect / Extremum / GroupTally reductions
//! - `scan` - sequential source-set scans feeding a reduction

pub mod reduce;
pub mod scan;
pub mod traversal;

pub use reduce::{
    reduce_all, Collect, Count, Direction, Extremum, ExtremumResult, Gather, GroupTally,
    Reduction, TallyResult, UNKNOWN_BUCKET,
};
pub use scan::{AggregationEngine, SourceSet};
pub use traversal::{linearize_chain, ChainTraverser};
