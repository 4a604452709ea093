//! Rendering of query results: JSON shapes, text tables and the history chart.

pub mod graph;
pub mod json;
pub mod text;

pub use graph::{render_chart, Series, YAxis};
pub use json::print_json;
