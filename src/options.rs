//! Editor configuration.
//!
//! Everything has a default, and every field may be omitted when options are
//! read from JSON, so a page can override just what it needs:
//!
//! ```json
//! { "render": { "vertex_size": 0.035 }, "layout": { "type": "grid", "grid_step": 0.08 } }
//! ```

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithm::{AlgorithmTheme, DEFAULT_INTERVAL, MAX_INTERVAL, MIN_INTERVAL};
use crate::layout::LayoutKind;

/// Sizes of the drawn graph, in normalized layout units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
	/// Vertex radius, also the pick radius for the mouse.
	pub vertex_size: f64,
	pub edge_width: f64,
	pub vertex_name_font_size: f64,
	pub weight_font_size: f64,
	/// Where along an edge its weight label sits: 0 at the source, 1 at the target.
	pub weight_position: f64,
}

impl RenderOptions {
	pub const VERTEX_SIZE_RANGE: RangeInclusive<f64> = 0.005..=0.1;
	pub const EDGE_WIDTH_RANGE: RangeInclusive<f64> = 0.001..=0.02;
	pub const FONT_SIZE_RANGE: RangeInclusive<f64> = 0.01..=0.1;
	pub const WEIGHT_POSITION_RANGE: RangeInclusive<f64> = 0.0..=1.0;

	/// Forces every value into its valid range.
	pub fn clamped(self) -> Self {
		let clamp = |value: f64, range: RangeInclusive<f64>| {
			if value.is_nan() {
				*range.start()
			} else {
				value.clamp(*range.start(), *range.end())
			}
		};
		Self {
			vertex_size: clamp(self.vertex_size, Self::VERTEX_SIZE_RANGE),
			edge_width: clamp(self.edge_width, Self::EDGE_WIDTH_RANGE),
			vertex_name_font_size: clamp(self.vertex_name_font_size, Self::FONT_SIZE_RANGE),
			weight_font_size: clamp(self.weight_font_size, Self::FONT_SIZE_RANGE),
			weight_position: clamp(self.weight_position, Self::WEIGHT_POSITION_RANGE),
		}
	}
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			vertex_size: 0.028,
			edge_width: 0.005,
			vertex_name_font_size: 0.04,
			weight_font_size: 0.03,
			weight_position: 0.5,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmOptions {
	pub theme: AlgorithmTheme,
	/// Initial auto-play interval in milliseconds.
	pub step_interval_ms: u64,
}

impl AlgorithmOptions {
	pub fn step_interval(&self) -> Duration {
		Duration::from_millis(self.step_interval_ms).clamp(MIN_INTERVAL, MAX_INTERVAL)
	}
}

impl Default for AlgorithmOptions {
	fn default() -> Self {
		Self {
			theme: AlgorithmTheme::default(),
			step_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
		}
	}
}

/// All editor settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
	pub render: RenderOptions,
	pub layout: LayoutKind,
	pub algorithm: AlgorithmOptions,
}

impl EditorOptions {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let mut options: Self = serde_json::from_str(json)?;
		options.render = options.render.clamped();
		Ok(options)
	}
}
