//! Vertex, adjacency record and position types.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Stable vertex identifier. Assigned monotonically, never reused.
pub type VertexId = usize;

/// A point in normalized layout space. The visible area is `[0, 1] x [0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const CENTER: Point = Point { x: 0.5, y: 0.5 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Point) -> f64 {
		(self - other).length()
	}

	/// Scales the point around `origin`.
	pub fn scale_around(self, origin: Point, factor: f64) -> Point {
		(self - origin) * factor + origin
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// One half of an undirected edge, stored on its source vertex.
///
/// Every record has a mirror on the target vertex with the same weight and
/// color. Only [`Graph`](super::Graph) mutates records, always in pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingEdge {
	pub(crate) to: VertexId,
	pub(crate) weight: i64,
	pub(crate) color: Color,
}

impl OutgoingEdge {
	pub fn to(&self) -> VertexId {
		self.to
	}

	pub fn weight(&self) -> i64 {
		self.weight
	}

	pub fn color(&self) -> Color {
		self.color
	}
}

/// A graph vertex with its adjacency records.
#[derive(Clone, Debug)]
pub struct Vertex {
	pub(crate) id: VertexId,
	pub(crate) name: String,
	pub(crate) position: Option<Point>,
	pub(crate) color: Color,
	pub(crate) edges: Vec<OutgoingEdge>,
}

impl Vertex {
	pub fn id(&self) -> VertexId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The part of the name shown on the canvas: everything before the first `$`.
	pub fn display_name(&self) -> &str {
		self.name.split('$').next().unwrap_or_default()
	}

	/// `None` until a layout or the user places the vertex.
	pub fn position(&self) -> Option<Point> {
		self.position
	}

	pub fn color(&self) -> Color {
		self.color
	}

	/// Adjacency records in insertion order.
	pub fn edges(&self) -> &[OutgoingEdge] {
		&self.edges
	}

	pub fn degree(&self) -> usize {
		self.edges.len()
	}

	pub(crate) fn edge_to(&self, to: VertexId) -> Option<&OutgoingEdge> {
		self.edges.iter().find(|e| e.to == to)
	}

	pub(crate) fn edge_to_mut(&mut self, to: VertexId) -> Option<&mut OutgoingEdge> {
		self.edges.iter_mut().find(|e| e.to == to)
	}
}

/// Canonical undirected edge view, `from < to` by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub from: VertexId,
	pub to: VertexId,
	pub weight: i64,
	pub color: Color,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_point_scale_around_center() {
		let p = Point::new(0.75, 0.5).scale_around(Point::CENTER, 2.0);
		assert_eq!(p, Point::new(1.0, 0.5));
	}

	#[test]
	fn test_display_name_drops_dollar_suffix() {
		let vertex = Vertex {
			id: 0,
			name: "A$hidden".into(),
			position: None,
			color: Color::BLUE,
			edges: Vec::new(),
		};
		assert_eq!(vertex.display_name(), "A");

		let hidden = Vertex {
			name: "$only".into(),
			..vertex
		};
		assert_eq!(hidden.display_name(), "");
	}
}
