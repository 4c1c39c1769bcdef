//! RGBA color values shared by the graph, the algorithm and the renderer.
//!
//! Colors are compared exactly: the Kruskal visualization uses vertex colors as
//! component labels, so two vertices are "in the same tree" iff their colors
//! are equal.

use serde::{Deserialize, Serialize};

/// RGBA color representation with 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Color {
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	pub const WHITE: Color = Color::rgb(255, 255, 255);
	pub const BLUE: Color = Color::rgb(0, 0, 255);
	pub const RED: Color = Color::rgb(255, 0, 0);
	pub const GRAY: Color = Color::rgb(136, 136, 136);
	pub const MAGENTA: Color = Color::rgb(255, 0, 255);
	pub const YELLOW: Color = Color::rgb(255, 255, 0);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 255 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: u8) -> Self {
		Self { a, ..self }
	}

	/// Alpha as a `[0, 1]` fraction, the unit the canvas API expects.
	pub fn alpha(self) -> f64 {
		self.a as f64 / 255.0
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t) as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: mix(self.a, other.a),
		}
	}

	/// Manhattan distance over the RGB channels, ignoring alpha.
	pub fn distance(self, other: Color) -> u32 {
		self.r.abs_diff(other.r) as u32
			+ self.g.abs_diff(other.g) as u32
			+ self.b.abs_diff(other.b) as u32
	}

	pub fn to_css(self) -> String {
		if self.a == 255 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!(
				"rgba({}, {}, {}, {:.3})",
				self.r,
				self.g,
				self.b,
				self.alpha()
			)
		}
	}

	/// `#RRGGBBAA`, the form GML files carry.
	pub fn to_hex_rgba(self) -> String {
		format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
	}

	/// Parses `#RRGGBB`, `#RRGGBBAA` or `rgb()`/`rgba()` functional notation.
	pub fn parse_css(color_str: &str) -> Option<Color> {
		let color_str = color_str.trim();
		if let Some(hex) = color_str.strip_prefix('#') {
			let channel = |i: usize| {
				hex.get(i..i + 2)
					.and_then(|s| u8::from_str_radix(s, 16).ok())
			};
			return match hex.len() {
				6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
				8 => Some(Color::rgba(
					channel(0)?,
					channel(2)?,
					channel(4)?,
					channel(6)?,
				)),
				_ => None,
			};
		}

		if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(str::trim)
				.collect();
			let r = nums.first()?.parse().ok()?;
			let g = nums.get(1)?.parse().ok()?;
			let b = nums.get(2)?.parse().ok()?;
			let a = match nums.get(3) {
				Some(a) => (a.parse::<f64>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
				None => 255,
			};
			return Some(Color::rgba(r, g, b, a));
		}

		None
	}
}
