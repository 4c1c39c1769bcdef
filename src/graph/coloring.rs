//! Color snapshots used as algorithm history checkpoints.

use crate::color::Color;

use super::{ColoringError, Graph};

/// Colors of one vertex and of its adjacency records, in record order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexColors {
	pub vertex: Color,
	pub edges: Vec<Color>,
}

/// Full color state of a graph, parallel to its vertex iteration order.
///
/// Restoring is an in-place operation: the graph must have the same shape as
/// when the snapshot was taken. Positions are never touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphColoring {
	vertices: Vec<VertexColors>,
}

impl GraphColoring {
	pub fn capture(graph: &Graph) -> Self {
		Self {
			vertices: graph
				.vertices()
				.map(|vertex| VertexColors {
					vertex: vertex.color(),
					edges: vertex.edges().iter().map(|e| e.color()).collect(),
				})
				.collect(),
		}
	}

	pub fn vertices(&self) -> &[VertexColors] {
		&self.vertices
	}

	/// Writes the snapshot back. The shape is checked before anything changes.
	pub fn apply(&self, graph: &mut Graph) -> Result<(), ColoringError> {
		if self.vertices.len() != graph.vertex_count() {
			return Err(ColoringError::VertexCount {
				expected: self.vertices.len(),
				actual: graph.vertex_count(),
			});
		}
		for (colors, vertex) in self.vertices.iter().zip(graph.vertices()) {
			if colors.edges.len() != vertex.degree() {
				return Err(ColoringError::EdgeCount {
					vertex: vertex.id(),
					expected: colors.edges.len(),
					actual: vertex.degree(),
				});
			}
		}

		for (colors, vertex) in self.vertices.iter().zip(graph.vertices_mut()) {
			vertex.color = colors.vertex;
			for (record, &color) in vertex.edges.iter_mut().zip(&colors.edges) {
				record.color = color;
			}
		}
		Ok(())
	}
}
