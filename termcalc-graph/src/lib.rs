pub mod graph;

pub use graph::{Canvas, Graph};
