//! Graph Modelling Language, the subset this editor reads and writes:
//!
//! ```text
//! Creator "..."
//! graph [
//!     directed 0
//!     vertexsize 0.028
//!     node [ id 0 label "A" graphics [ x 0.5 y 0.5 fill "#0000ffff" ] ]
//!     edge [ source 0 target 1 label "3" graphics [ fill "#000000ff" ] ]
//! ]
//! ```
//!
//! Edge labels carry the weight. Unknown labels are skipped with a warning.

mod parser;
mod tokenizer;
mod writer;

use super::{FileError, LoadedGraph};
use crate::graph::Graph;
use crate::options::RenderOptions;

pub(super) fn parse(text: &str, render: &RenderOptions) -> Result<LoadedGraph, FileError> {
	parser::Parser::new(text, render).parse()
}

pub(super) fn write(graph: &Graph, render: &RenderOptions) -> String {
	writer::write(graph, render)
}
