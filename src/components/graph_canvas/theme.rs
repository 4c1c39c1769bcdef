//! Canvas look: background, vertex shading, labels and interaction hints.
//!
//! Vertex and edge colors come from the graph itself; the theme only covers
//! what the graph does not carry.

use crate::color::Color;

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Center color of the radial gradient.
	pub color_secondary: Color,
	pub use_gradient: bool,
}

/// Vertex shading.
#[derive(Clone, Debug)]
pub struct VertexStyle {
	/// Radial highlight from the top left.
	pub use_gradient: bool,
	/// 0 disables the border.
	pub border_width: f64,
	pub border_color: Color,
	/// Vertex names are drawn centered on the vertex in this color. The
	/// algorithm palette keeps vertex colors away from black.
	pub label_color: Color,
}

/// Weight labels.
#[derive(Clone, Debug)]
pub struct WeightStyle {
	pub text_color: Color,
	/// Box behind the weight so it stays readable over the edge.
	pub background: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct CanvasTheme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub vertex: VertexStyle,
	pub weight: WeightStyle,
	pub hover_ring: Color,
	/// Edge being drawn with shift-drag.
	pub draft_edge: Color,
}

impl CanvasTheme {
	/// White paper, the colors the algorithm palettes are picked against.
	pub fn paper() -> Self {
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::rgb(244, 244, 240),
				color_secondary: Color::WHITE,
				use_gradient: true,
			},
			vertex: VertexStyle {
				use_gradient: true,
				border_width: 1.0,
				border_color: Color::rgba(0, 0, 0, 96),
				label_color: Color::BLACK,
			},
			weight: WeightStyle {
				text_color: Color::BLACK,
				background: Color::rgba(255, 255, 255, 200),
			},
			hover_ring: Color::rgba(40, 40, 40, 200),
			draft_edge: Color::GRAY,
		}
	}
}

impl Default for CanvasTheme {
	fn default() -> Self {
		Self::paper()
	}
}
