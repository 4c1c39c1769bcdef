//! What the renderer gets to draw.
//!
//! The core never draws. A [`RenderFrame`] is a flat, owned copy of positions,
//! colors and labels that a canvas (or a test) can consume.

use crate::color::Color;
use crate::graph::{DEFAULT_EDGE_COLOR, Graph, Point, VertexId};

#[derive(Clone, Debug, PartialEq)]
pub struct VertexSprite {
	pub id: VertexId,
	pub position: Point,
	pub color: Color,
	/// Name up to the first `$`; may be empty.
	pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	pub from: VertexId,
	pub to: VertexId,
	pub from_position: Point,
	pub to_position: Point,
	pub weight: i64,
	pub color: Color,
}

impl EdgeSprite {
	/// Point at `t` along the edge, where its weight label goes.
	pub fn label_position(&self, t: f64) -> Point {
		self.from_position + (self.to_position - self.from_position) * t
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
	/// Back to front: skipped edges, then default ones, then highlighted.
	pub edges: Vec<EdgeSprite>,
	pub vertices: Vec<VertexSprite>,
}

impl RenderFrame {
	/// Snapshot of every positioned vertex and every edge with both ends placed.
	pub fn capture(graph: &Graph, skipped_color: Color) -> Self {
		let vertices: Vec<VertexSprite> = graph
			.vertices()
			.filter_map(|vertex| {
				Some(VertexSprite {
					id: vertex.id(),
					position: vertex.position()?,
					color: vertex.color(),
					label: vertex.display_name().to_string(),
				})
			})
			.collect();

		let position_of = |id| graph.vertex(id).and_then(|v| v.position());
		let mut edges: Vec<EdgeSprite> = graph
			.edges()
			.into_iter()
			.filter_map(|edge| {
				Some(EdgeSprite {
					from: edge.from,
					to: edge.to,
					from_position: position_of(edge.from)?,
					to_position: position_of(edge.to)?,
					weight: edge.weight,
					color: edge.color,
				})
			})
			.collect();

		let layer = |color: Color| {
			if color == skipped_color {
				0
			} else if color == DEFAULT_EDGE_COLOR {
				1
			} else {
				2
			}
		};
		edges.sort_by_key(|edge| layer(edge.color));

		Self { edges, vertices }
	}
}
