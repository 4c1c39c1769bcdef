//! Console command grammar.
//!
//! ```text
//! help/h
//! add/a vertex/v [name] [x y]
//! add/a edge/e first second [weight]
//! delete/d vertex/v name
//! delete/d edge/e first second
//! rename/r name newname
//! weight/w first second weight
//! clear console | clear graph
//! position
//! ```
//!
//! Parsing is separate from execution: [`Command::parse`] only checks the
//! shape of a line, the [`Session`](crate::session::Session) applies it.

use thiserror::Error;

use crate::graph::Point;

pub const HELP: &str = "Commands available:
help/h
add/a vertex/v [name] [x y]
add/a edge/e first second [weight]
delete/d vertex/v name
delete/d edge/e first second
rename/r name newname
weight/w first second weight
clear console
clear graph
position - automatically set vertex positions";

/// A line that is not a valid command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
	#[error("Unknown command: {0}, type help to get available commands list")]
	Unknown(String),

	#[error("Command add takes edge/e or vertex/v as first argument")]
	AddTarget,

	#[error("Command add vertex can take 1, 2, or 4 arguments, but {0} were given")]
	AddVertexArity(usize),

	#[error("Vertex position must be a pair of numbers (x, y), but ({0}, {1}) was given")]
	BadPosition(String, String),

	#[error("Command add edge must have <first>, <second> and [<weight>] arguments to define an edge")]
	AddEdgeArity,

	#[error("Weight must be an integer, but {0} was given")]
	BadWeight(String),

	#[error("Command delete takes edge/e or vertex/v as first argument")]
	DeleteTarget,

	#[error("Command delete vertex must have <name> argument")]
	DeleteVertexArity,

	#[error("Command delete edge must have <first> and <second> arguments to define an edge")]
	DeleteEdgeArity,

	#[error("Command rename takes 2 arguments: name, newname")]
	RenameArity,

	#[error("Command weight takes 3 arguments: first, second, weight")]
	WeightArity,

	#[error("Command clear takes 1 argument: console or graph")]
	ClearArity,

	#[error("Unknown argument {0}, clear takes console or graph")]
	ClearTarget(String),

	#[error("Command position takes no arguments")]
	PositionArity,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	Help,
	/// Without a name one is made up; without a position the graph is laid out again.
	AddVertex {
		name: Option<String>,
		position: Option<Point>,
	},
	/// Missing endpoints are created.
	AddEdge {
		from: String,
		to: String,
		weight: i64,
	},
	DeleteVertex(String),
	DeleteEdge(String, String),
	Rename {
		from: String,
		to: String,
	},
	Weight {
		from: String,
		to: String,
		weight: i64,
	},
	ClearConsole,
	ClearGraph,
	Position,
}

impl Command {
	/// Parses one console line. Blank lines are `Ok(None)`.
	pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
		let mut words = line.split_whitespace();
		let Some(command) = words.next() else {
			return Ok(None);
		};
		let args: Vec<&str> = words.collect();

		let parsed = match command {
			"help" | "h" => Command::Help,
			"add" | "a" => parse_add(&args)?,
			"delete" | "d" => parse_delete(&args)?,
			"rename" | "r" => match args.as_slice() {
				[from, to] => Command::Rename {
					from: from.to_string(),
					to: to.to_string(),
				},
				_ => return Err(CommandError::RenameArity),
			},
			"weight" | "w" => match args.as_slice() {
				[from, to, weight] => Command::Weight {
					from: from.to_string(),
					to: to.to_string(),
					weight: parse_weight(weight)?,
				},
				_ => return Err(CommandError::WeightArity),
			},
			"clear" => match args.as_slice() {
				["console"] => Command::ClearConsole,
				["graph"] => Command::ClearGraph,
				[other] => return Err(CommandError::ClearTarget(other.to_string())),
				_ => return Err(CommandError::ClearArity),
			},
			"position" => {
				if !args.is_empty() {
					return Err(CommandError::PositionArity);
				}
				Command::Position
			}
			other => return Err(CommandError::Unknown(other.to_string())),
		};
		Ok(Some(parsed))
	}

	/// Whether running it changes the graph structure. Positions are not
	/// part of it, so `position` is allowed while the algorithm runs.
	pub fn edits_graph(&self) -> bool {
		!matches!(
			self,
			Command::Help | Command::ClearConsole | Command::Position
		)
	}
}

fn parse_add(args: &[&str]) -> Result<Command, CommandError> {
	match args {
		["vertex" | "v", rest @ ..] => match rest {
			[] => Ok(Command::AddVertex {
				name: None,
				position: None,
			}),
			[name] => Ok(Command::AddVertex {
				name: Some(name.to_string()),
				position: None,
			}),
			[name, x, y] => {
				let position = x
					.parse::<f64>()
					.ok()
					.zip(y.parse::<f64>().ok())
					.filter(|(x, y)| x.is_finite() && y.is_finite())
					.ok_or_else(|| CommandError::BadPosition(x.to_string(), y.to_string()))?;
				Ok(Command::AddVertex {
					name: Some(name.to_string()),
					position: Some(Point::new(position.0, position.1)),
				})
			}
			_ => Err(CommandError::AddVertexArity(args.len())),
		},
		["edge" | "e", rest @ ..] => match rest {
			[from, to] => Ok(Command::AddEdge {
				from: from.to_string(),
				to: to.to_string(),
				weight: 1,
			}),
			[from, to, weight] => Ok(Command::AddEdge {
				from: from.to_string(),
				to: to.to_string(),
				weight: parse_weight(weight)?,
			}),
			_ => Err(CommandError::AddEdgeArity),
		},
		_ => Err(CommandError::AddTarget),
	}
}

fn parse_delete(args: &[&str]) -> Result<Command, CommandError> {
	match args {
		["vertex" | "v", rest @ ..] => match rest {
			[name] => Ok(Command::DeleteVertex(name.to_string())),
			_ => Err(CommandError::DeleteVertexArity),
		},
		["edge" | "e", rest @ ..] => match rest {
			[from, to] => Ok(Command::DeleteEdge(from.to_string(), to.to_string())),
			_ => Err(CommandError::DeleteEdgeArity),
		},
		_ => Err(CommandError::DeleteTarget),
	}
}

fn parse_weight(text: &str) -> Result<i64, CommandError> {
	text.parse()
		.map_err(|_| CommandError::BadWeight(text.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_add_forms() {
		assert_eq!(
			Command::parse("a v").unwrap(),
			Some(Command::AddVertex {
				name: None,
				position: None
			})
		);
		assert_eq!(
			Command::parse("add vertex X 0.5 0.25").unwrap(),
			Some(Command::AddVertex {
				name: Some("X".into()),
				position: Some(Point::new(0.5, 0.25))
			})
		);
		assert_eq!(
			Command::parse("a e A B").unwrap(),
			Some(Command::AddEdge {
				from: "A".into(),
				to: "B".into(),
				weight: 1
			})
		);
		assert_eq!(
			Command::parse("  add   edge A B -3 ").unwrap(),
			Some(Command::AddEdge {
				from: "A".into(),
				to: "B".into(),
				weight: -3
			})
		);
	}

	#[test]
	fn test_parse_errors_match_console_messages() {
		assert_eq!(Command::parse("add vertex X 1"), Err(CommandError::AddVertexArity(3)));
		assert_eq!(
			Command::parse("add vertex X 1 y").unwrap_err().to_string(),
			"Vertex position must be a pair of numbers (x, y), but (1, y) was given"
		);
		assert_eq!(
			Command::parse("w A B heavy"),
			Err(CommandError::BadWeight("heavy".into()))
		);
		assert_eq!(Command::parse("add"), Err(CommandError::AddTarget));
		assert_eq!(Command::parse("d edge A"), Err(CommandError::DeleteEdgeArity));
		assert_eq!(
			Command::parse("clear screen"),
			Err(CommandError::ClearTarget("screen".into()))
		);
		assert_eq!(Command::parse("position now"), Err(CommandError::PositionArity));
		assert_eq!(
			Command::parse("frobnicate").unwrap_err().to_string(),
			"Unknown command: frobnicate, type help to get available commands list"
		);
	}

	#[test]
	fn test_blank_line_is_nothing() {
		assert_eq!(Command::parse("   "), Ok(None));
	}

	#[test]
	fn test_edits_graph() {
		assert!(!Command::Help.edits_graph());
		assert!(!Command::ClearConsole.edits_graph());
		assert!(!Command::Position.edits_graph());
		assert!(Command::DeleteVertex("a".into()).edits_graph());
	}
}
