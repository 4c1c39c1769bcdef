//! Zoom-dependent sizes of everything the canvas draws.
//!
//! # Coordinate Spaces
//!
//! - **Layout space**: the normalized `[0, 1]` square the layouts place
//!   vertices in. [`RenderOptions`] sizes are given in this space.
//! - **World space**: layout space multiplied by the canvas side (the smaller
//!   of width and height), so one world unit is one pixel at zoom 1.
//! - **Screen space**: canvas pixels, after pan and zoom.
//!
//! A [`ScaleBehavior`] decides how a world-space size reacts to zoom.

use crate::options::RenderOptions;

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for a given base value and zoom level, ready to be
	/// used after the canvas transform has been applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how alpha scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum AlphaBehavior {
	Constant,
	/// Fully visible at `full_alpha_k`, gone at `zero_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub vertex: ScaleBehavior,
	pub edge: ScaleBehavior,
	pub font: ScaleBehavior,
	/// Weight labels fade out when zoomed far out.
	pub weight_alpha: AlphaBehavior,
	/// Hover ring stroke, screen pixels.
	pub ring_width: f64,
	/// Gap between vertex and hover ring, screen pixels.
	pub ring_offset: f64,
	/// Dash pattern of the edge being drawn with shift-drag, screen pixels.
	pub draft_dash: (f64, f64),
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			vertex: ScaleBehavior::Clamped {
				min_screen: 4.0,
				max_screen: f64::INFINITY,
			},
			edge: ScaleBehavior::Clamped {
				min_screen: 1.0,
				max_screen: 12.0,
			},
			font: ScaleBehavior::Clamped {
				min_screen: 7.0,
				max_screen: 48.0,
			},
			weight_alpha: AlphaBehavior::Fade {
				zero_alpha_k: 0.3,
				full_alpha_k: 0.6,
			},
			ring_width: 2.0,
			ring_offset: 3.0,
			draft_dash: (6.0, 4.0),
		}
	}
}

/// Pre-computed world-space sizes for one frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub vertex_radius: f64,
	pub edge_width: f64,
	pub name_font_size: f64,
	pub weight_font_size: f64,
	/// Font strings for `CanvasRenderingContext2d::set_font`.
	pub name_font: String,
	pub weight_font: String,
	pub weight_alpha: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
	pub draft_dash: (f64, f64),
}

impl ScaledValues {
	/// `side` is the canvas side in pixels, `k` the zoom factor.
	pub fn new(config: &ScaleConfig, render: &RenderOptions, side: f64, k: f64) -> Self {
		let name_font_size = config.font.apply(render.vertex_name_font_size * side, k);
		let weight_font_size = config.font.apply(render.weight_font_size * side, k);
		Self {
			k,
			vertex_radius: config.vertex.apply(render.vertex_size * side, k),
			edge_width: config.edge.apply(render.edge_width * side, k),
			name_font_size,
			weight_font_size,
			name_font: format!("{name_font_size}px sans-serif"),
			weight_font: format!("{weight_font_size}px sans-serif"),
			weight_alpha: config.weight_alpha.apply(k),
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
			draft_dash: (config.draft_dash.0 / k, config.draft_dash.1 / k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_scale_behaviors() {
		assert_eq!(ScaleBehavior::World.apply(10.0, 2.0), 10.0);
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: 8.0,
		};
		// 10 world units at k = 0.1 would be 1 px on screen
		assert_eq!(clamped.apply(10.0, 0.1), 40.0);
		assert_eq!(clamped.apply(10.0, 2.0), 4.0);
		assert_eq!(clamped.apply(5.0, 1.0), 5.0);
	}

	#[test]
	fn test_fade() {
		let fade = AlphaBehavior::Fade {
			zero_alpha_k: 0.3,
			full_alpha_k: 0.6,
		};
		assert_eq!(fade.apply(0.1), 0.0);
		assert_eq!(fade.apply(1.0), 1.0);
		assert!((fade.apply(0.45) - 0.5).abs() < 1e-9);
		assert_eq!(AlphaBehavior::Constant.apply(0.01), 1.0);
	}

	#[test]
	fn test_sizes_follow_render_options() {
		let render = RenderOptions::default();
		let scale = ScaledValues::new(&ScaleConfig::default(), &render, 500.0, 1.0);
		assert!((scale.vertex_radius - 14.0).abs() < 1e-9);
		assert!((scale.edge_width - 2.5).abs() < 1e-9);
		assert_eq!(scale.name_font, "20px sans-serif");
		assert_eq!(scale.weight_alpha, 1.0);
	}
}
