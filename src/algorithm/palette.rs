//! Visually distinct starting colors for the vertices.

use std::collections::HashSet;

use crate::color::Color;

/// Colors closer than this (sum of channel differences) to the text color
/// would make vertex names unreadable.
const MIN_TEXT_DISTANCE: u32 = 102;

/// Walks a progressively finer RGB lattice.
///
/// Starts with the corners of the 2x2x2 cube; once a lattice is exhausted the
/// resolution doubles and the step halves. Black, white and anything too close
/// to the text color are never handed out, nor is any color twice.
#[derive(Debug)]
pub struct DistinctColors {
	used: HashSet<Color>,
	text_color: Color,
	step: u32,
	per_channel: u32,
	index: u32,
}

impl DistinctColors {
	pub fn new(text_color: Color) -> Self {
		Self {
			used: HashSet::from([Color::BLACK, Color::WHITE]),
			text_color,
			step: 256,
			per_channel: 2,
			index: 0,
		}
	}

	fn next_candidate(&mut self) -> Color {
		let c = self.per_channel;
		let channel = |value: u32| (value * self.step).min(255) as u8;
		let color = Color::rgb(
			channel(self.index % c),
			channel((self.index / c) % c),
			channel((self.index / (c * c)) % c),
		);

		self.index += 1;
		if self.index >= c * c * c {
			self.index = 0;
			self.per_channel *= 2;
			self.step = (self.step / 2).max(1);
		}
		color
	}
}

impl Iterator for DistinctColors {
	type Item = Color;

	fn next(&mut self) -> Option<Color> {
		loop {
			let color = self.next_candidate();
			if self.used.contains(&color) || color.distance(self.text_color) < MIN_TEXT_DISTANCE {
				continue;
			}
			self.used.insert(color);
			return Some(color);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_first_colors_are_cube_corners() {
		let colors: Vec<Color> = DistinctColors::new(Color::BLACK).take(6).collect();
		assert_eq!(
			colors,
			vec![
				Color::rgb(255, 0, 0),
				Color::rgb(0, 255, 0),
				Color::rgb(255, 255, 0),
				Color::rgb(0, 0, 255),
				Color::rgb(255, 0, 255),
				Color::rgb(0, 255, 255),
			]
		);
	}

	#[test]
	fn test_five_hundred_colors_are_distinct_and_readable() {
		let colors: Vec<Color> = DistinctColors::new(Color::BLACK).take(500).collect();
		let unique: HashSet<Color> = colors.iter().copied().collect();
		assert_eq!(unique.len(), 500);
		assert!(!unique.contains(&Color::WHITE));
		for color in colors {
			assert!(color.distance(Color::BLACK) >= MIN_TEXT_DISTANCE);
			assert_eq!(color.a, 255);
		}
	}
}
