//! Graph structures shared by the layout stages.

mod graph_base;

pub use graph_base::{LinkIndex, NodeIndex};

pub(crate) use graph_base::{LinkedGraph, LinkedLink};
