//! Vertex placement algorithms.
//!
//! Every layout recomputes all positions in normalized `[0, 1] x [0, 1]` space
//! and is deterministic for a given graph: vertices are always visited in id
//! order. Mapping to screen pixels is the renderer's job.

mod circle;
mod grid;
mod spring;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, Point};

pub use circle::CircleLayout;
pub use grid::GridLayout;
pub use spring::SpringLayout;

/// A vertex placement algorithm.
pub trait Layout {
	/// Assigns a position to every vertex of `graph`.
	fn position_vertices(&self, graph: &mut Graph);
}

/// The configurable choice of layout, as stored in editor options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutKind {
	Circle(CircleLayout),
	Grid(GridLayout),
	Spring(SpringLayout),
}

impl LayoutKind {
	pub fn name(&self) -> &'static str {
		match self {
			LayoutKind::Circle(_) => "Circle layout",
			LayoutKind::Grid(_) => "Naive grid layout",
			LayoutKind::Spring(_) => "Spring layout",
		}
	}

	/// All layouts with default parameters, in menu order.
	pub fn all() -> [LayoutKind; 3] {
		[
			LayoutKind::Circle(CircleLayout::default()),
			LayoutKind::Grid(GridLayout::default()),
			LayoutKind::Spring(SpringLayout::default()),
		]
	}
}

impl Default for LayoutKind {
	fn default() -> Self {
		LayoutKind::Circle(CircleLayout::default())
	}
}

impl Layout for LayoutKind {
	fn position_vertices(&self, graph: &mut Graph) {
		match self {
			LayoutKind::Circle(layout) => layout.position_vertices(graph),
			LayoutKind::Grid(layout) => layout.position_vertices(graph),
			LayoutKind::Spring(layout) => layout.position_vertices(graph),
		}
	}
}

/// Scales every placed vertex around the center of the unit square.
fn rescale_positions(graph: &mut Graph, factor: f64) {
	for vertex in graph.vertices_mut() {
		if let Some(position) = vertex.position {
			vertex.position = Some(position.scale_around(Point::CENTER, factor));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layout_kind_deserializes_with_defaults() {
		let kind: LayoutKind = serde_json::from_str(r#"{"type": "grid"}"#).unwrap();
		assert_eq!(kind, LayoutKind::Grid(GridLayout::default()));

		let kind: LayoutKind =
			serde_json::from_str(r#"{"type": "spring", "delta": 0.1}"#).unwrap();
		match kind {
			LayoutKind::Spring(spring) => {
				assert_eq!(spring.delta, 0.1);
				assert_eq!(spring.spring_factor, SpringLayout::default().spring_factor);
			}
			other => panic!("unexpected layout {other:?}"),
		}
	}
}
