use thiserror::Error;

/// Precondition failures of [`Kruskal::init`](super::Kruskal::init).
///
/// The algorithm never starts and the graph is left uncolored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
	#[error("The graph is empty, there is nothing to run the algorithm on")]
	EmptyGraph,

	#[error("The number of vertices should not be more than {limit}, your number of vertices: {count}")]
	TooManyVertices { count: usize, limit: usize },

	#[error(
		"The number of connectivity components should not be more than 1. The real number of connectivity components: {count}"
	)]
	TooManyComponents { count: usize },
}
