//! User-facing text log.
//!
//! Diagnostics go through `log`; this is the colored console the user reads:
//! command feedback in edit mode, step narration in algorithm mode.

use crate::color::Color;

/// Color of ordinary command feedback.
pub const INFO_COLOR: Color = Color::BLUE;
/// Color of rejected commands and failed operations.
pub const ERROR_COLOR: Color = Color::RED;

/// One printed line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleLine {
	pub text: String,
	pub color: Color,
}

/// Anything that accepts colored lines.
pub trait Console {
	fn println(&mut self, text: &str, color: Color);
}

/// In-memory console: an ordered list of lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsoleBuffer {
	lines: Vec<ConsoleLine>,
}

impl ConsoleBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn lines(&self) -> &[ConsoleLine] {
		&self.lines
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	pub fn clear(&mut self) {
		self.lines.clear();
	}

	/// Copy of the current lines, used as a history checkpoint.
	pub fn snapshot(&self) -> Vec<ConsoleLine> {
		self.lines.clone()
	}

	pub fn restore(&mut self, lines: &[ConsoleLine]) {
		self.lines = lines.to_vec();
	}

	/// The whole log as plain text.
	pub fn text(&self) -> String {
		self.lines
			.iter()
			.map(|line| line.text.as_str())
			.collect::<Vec<_>>()
			.join("\n")
	}
}

impl Console for ConsoleBuffer {
	fn println(&mut self, text: &str, color: Color) {
		// multi-line messages (help) become one entry per line
		for line in text.lines() {
			self.lines.push(ConsoleLine {
				text: line.to_string(),
				color,
			});
		}
		if text.is_empty() {
			self.lines.push(ConsoleLine {
				text: String::new(),
				color,
			});
		}
	}
}
