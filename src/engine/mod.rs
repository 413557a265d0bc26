//! Reference tick engine: wires a [`Config`](crate::config::Config) into a
//! [`Graph`] and drives its atoms one tick at a time.

pub mod graph;
pub mod scheduler;

pub use graph::{Graph, GraphLink, GraphNode};
pub use scheduler::{Engine, RunReport};
