//! Import module
//!
//! Reads timing data from Qt Quick scene graph debug logs and
//! turns it into a frame-rate summary.

mod common;
pub mod scenegraph;

pub use common::PerfSummary;
pub use scenegraph::parse_scenegraph_log;
