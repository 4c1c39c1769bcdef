//! Structural graph errors.

use thiserror::Error;

/// Recoverable failures of Graph Core operations. The graph is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	#[error("Such a vertex already exists: {0}")]
	VertexAlreadyExists(String),

	#[error("Such an edge already exists: ({0} - {1})")]
	EdgeAlreadyExists(String, String),

	#[error("No self-loops are allowed in the graph, tried to add a self-loop to vertex {0}")]
	SelfLoop(String),

	#[error("No such vertex exists in graph: {0}")]
	NoSuchVertex(String),

	#[error("No such edge exists in graph: ({0} - {1})")]
	NoSuchEdge(String, String),

	#[error("Unsupported graph extension: {0}")]
	UnsupportedFormat(String),
}

/// A coloring snapshot does not fit the graph it is applied to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColoringError {
	#[error("coloring has {expected} vertices, graph has {actual}")]
	VertexCount { expected: usize, actual: usize },

	#[error("coloring has {expected} edges for vertex #{vertex}, graph has {actual}")]
	EdgeCount {
		vertex: usize,
		expected: usize,
		actual: usize,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_graph_error_display() {
		let err = GraphError::EdgeAlreadyExists("A".into(), "B".into());
		assert_eq!(err.to_string(), "Such an edge already exists: (A - B)");
	}
}
