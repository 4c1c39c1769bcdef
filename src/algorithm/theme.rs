use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Color scheme of the algorithm visualization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmTheme {
	#[default]
	Default,
	Red,
	Blue,
	Pastel,
}

/// Colors a theme resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColors {
	/// Edges accepted into the tree.
	pub tree_edge: Color,
	/// Edges rejected because they would close a cycle.
	pub skipped_edge: Color,
	/// Edge list entries of tree edges.
	pub tree_edge_text: Color,
	/// Edge list entries of skipped edges.
	pub skipped_edge_text: Color,
	pub console_text: Color,
	pub console_skipped: Color,
	pub console_added: Color,
	pub console_recolored: Color,
	pub console_weight: Color,
}

impl AlgorithmTheme {
	pub const ALL: [AlgorithmTheme; 4] = [
		AlgorithmTheme::Default,
		AlgorithmTheme::Red,
		AlgorithmTheme::Blue,
		AlgorithmTheme::Pastel,
	];

	pub fn name(self) -> &'static str {
		match self {
			AlgorithmTheme::Default => "Default",
			AlgorithmTheme::Red => "Red",
			AlgorithmTheme::Blue => "Blue",
			AlgorithmTheme::Pastel => "Pastel",
		}
	}

	pub fn colors(self) -> ThemeColors {
		match self {
			AlgorithmTheme::Default => ThemeColors {
				tree_edge: Color::MAGENTA,
				skipped_edge: Color::GRAY,
				tree_edge_text: Color::MAGENTA,
				skipped_edge_text: Color::GRAY,
				console_text: Color::BLACK,
				console_skipped: Color::rgb(0, 24, 161),
				console_added: Color::rgb(47, 5, 173),
				console_recolored: Color::rgb(132, 0, 176),
				console_weight: Color::MAGENTA,
			},
			AlgorithmTheme::Red => ThemeColors {
				tree_edge: Color::RED,
				skipped_edge: Color::GRAY,
				tree_edge_text: Color::RED,
				skipped_edge_text: Color::GRAY,
				console_text: Color::rgb(69, 0, 196),
				console_skipped: Color::rgb(131, 0, 207),
				console_added: Color::rgb(255, 0, 251),
				console_recolored: Color::rgb(255, 0, 136),
				console_weight: Color::RED,
			},
			AlgorithmTheme::Blue => ThemeColors {
				tree_edge: Color::BLUE,
				skipped_edge: Color::GRAY,
				tree_edge_text: Color::BLUE,
				skipped_edge_text: Color::GRAY,
				console_text: Color::rgb(8, 0, 161),
				console_skipped: Color::rgb(0, 52, 143),
				console_added: Color::rgb(6, 122, 161),
				console_recolored: Color::rgb(0, 163, 166),
				console_weight: Color::rgb(0, 179, 134),
			},
			AlgorithmTheme::Pastel => ThemeColors {
				tree_edge: Color::rgb(252, 116, 173),
				skipped_edge: Color::rgba(128, 128, 128, 200),
				tree_edge_text: Color::rgb(252, 116, 173),
				skipped_edge_text: Color::rgba(128, 128, 128, 200),
				console_text: Color::rgb(212, 104, 131),
				console_skipped: Color::rgb(212, 106, 185),
				console_added: Color::rgb(180, 86, 196),
				console_recolored: Color::rgb(139, 77, 189),
				console_weight: Color::rgb(73, 64, 168),
			},
		}
	}
}
