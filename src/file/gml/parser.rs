use std::collections::{HashMap, HashSet};

use log::warn;

use super::tokenizer::{Token, Tokenizer};
use crate::color::Color;
use crate::file::{FileError, LoadedGraph};
use crate::graph::{Graph, Point, VertexId};
use crate::options::RenderOptions;

/// Recursive descent over the token stream.
pub(super) struct Parser<'a> {
	tokens: Tokenizer<'a>,
	graph: Graph,
	nodes: HashMap<i64, VertexId>,
	render: RenderOptions,
	notes: Vec<String>,
	warnings: Vec<String>,
}

#[derive(Default)]
struct NodeGraphics {
	x: Option<f64>,
	y: Option<f64>,
	fill: Option<Color>,
}

impl<'a> Parser<'a> {
	pub(super) fn new(text: &'a str, render: &RenderOptions) -> Self {
		Self {
			tokens: Tokenizer::new(text),
			graph: Graph::new(),
			nodes: HashMap::new(),
			render: render.clone(),
			notes: Vec::new(),
			warnings: Vec::new(),
		}
	}

	pub(super) fn parse(mut self) -> Result<LoadedGraph, FileError> {
		while let Some(token) = self.tokens.next() {
			let label = match token? {
				Token::Identifier(label) => label,
				other => return Err(FileError::UnexpectedToken(other.text())),
			};
			match label.as_str() {
				"graph" => self.graph_scope()?,
				"Creator" => {
					let creator = self.string()?;
					self.notes.push(format!("Graph by {creator}"));
				}
				"Version" => {
					let version = self.float()?;
					self.notes.push(format!("Graph version {version}"));
				}
				_ => self.skip_unknown(&label)?,
			}
		}

		Ok(LoadedGraph {
			graph: self.graph,
			render: Some(self.render.clamped()),
			notes: self.notes,
			warnings: self.warnings,
		})
	}

	fn graph_scope(&mut self) -> Result<(), FileError> {
		self.scope(&["node", "edge"], |parser, label| {
			match label {
				"label" => {
					parser.string()?;
				}
				"directed" => {
					if parser.int()? > 0 {
						return Err(FileError::UnsupportedGraphType("directed graph".into()));
					}
				}
				"vertexsize" => parser.render.vertex_size = parser.float()?,
				"edgewidth" => parser.render.edge_width = parser.float()?,
				"vertexfontsize" => parser.render.vertex_name_font_size = parser.float()?,
				"weightfontsize" => parser.render.weight_font_size = parser.float()?,
				"weightposition" => parser.render.weight_position = parser.float()?,
				"node" => parser.node()?,
				"edge" => parser.edge()?,
				_ => parser.skip_unknown(label)?,
			}
			Ok(())
		})
	}

	fn node(&mut self) -> Result<(), FileError> {
		let mut id = None;
		let mut name = None;
		let mut graphics = NodeGraphics::default();

		self.scope(&[], |parser, label| {
			match label {
				"id" => id = Some(parser.int()?),
				"name" | "label" => name = Some(parser.string()?),
				"graphics" => graphics = parser.node_graphics()?,
				_ => parser.skip_unknown(label)?,
			}
			Ok(())
		})?;

		let id = id.ok_or(FileError::MissingLabel {
			scope: "node",
			label: "id",
		})?;
		let name = name.unwrap_or_else(|| self.graph.make_up_vertex_name());
		let position = graphics.x.zip(graphics.y).map(|(x, y)| Point::new(x, y));
		let vertex = self.graph.add_vertex(&name, position)?;
		self.graph.set_vertex_color(vertex, graphics.fill)?;
		if self.nodes.insert(id, vertex).is_some() {
			self.warn(format!("Node id {id} is used twice, the last node keeps it"));
		}
		Ok(())
	}

	fn edge(&mut self) -> Result<(), FileError> {
		let mut source = None;
		let mut target = None;
		let mut weight = None;
		let mut fill = None;

		self.scope(&[], |parser, label| {
			match label {
				"source" => source = Some(parser.int()?),
				"target" => target = Some(parser.int()?),
				"label" => weight = Some(parser.string()?),
				"graphics" => fill = parser.edge_graphics()?,
				_ => parser.skip_unknown(label)?,
			}
			Ok(())
		})?;

		let source = source.ok_or(FileError::MissingLabel {
			scope: "edge",
			label: "source",
		})?;
		let target = target.ok_or(FileError::MissingLabel {
			scope: "edge",
			label: "target",
		})?;
		let weight = match weight {
			Some(text) => text.trim().parse().map_err(|_| FileError::InvalidWeight(text))?,
			None => 1,
		};

		let from = self.vertex_for(source)?;
		let to = self.vertex_for(target)?;
		self.graph.add_edge(from, to, weight)?;
		self.graph.set_edge_color(from, to, fill)?;
		Ok(())
	}

	fn node_graphics(&mut self) -> Result<NodeGraphics, FileError> {
		let mut graphics = NodeGraphics::default();
		self.scope(&[], |parser, label| {
			match label {
				"x" => graphics.x = Some(parser.float()?),
				"y" => graphics.y = Some(parser.float()?),
				"fill" => graphics.fill = Some(parser.color()?),
				_ => parser.skip_unknown(label)?,
			}
			Ok(())
		})?;
		Ok(graphics)
	}

	fn edge_graphics(&mut self) -> Result<Option<Color>, FileError> {
		let mut fill = None;
		self.scope(&[], |parser, label| {
			match label {
				"fill" => fill = Some(parser.color()?),
				_ => parser.skip_unknown(label)?,
			}
			Ok(())
		})?;
		Ok(fill)
	}

	/// Parses `[ label value ... ]`, calling `on_label` for each label.
	/// Labels outside `repeatable` may appear only once.
	fn scope(
		&mut self,
		repeatable: &[&str],
		mut on_label: impl FnMut(&mut Self, &str) -> Result<(), FileError>,
	) -> Result<(), FileError> {
		self.expect_left_bracket()?;
		let mut seen: HashSet<String> = HashSet::new();
		loop {
			let label = match self.next_token()? {
				Token::RightBracket => return Ok(()),
				Token::Identifier(label) => label,
				other => return Err(FileError::UnexpectedToken(other.text())),
			};
			if !repeatable.contains(&label.as_str()) && !seen.insert(label.clone()) {
				return Err(FileError::DuplicateLabel(label));
			}
			on_label(self, &label)?;
		}
	}

	/// Skips the value of an unknown label, a whole bracketed scope included.
	fn skip_unknown(&mut self, label: &str) -> Result<(), FileError> {
		self.warn(format!("Unknown label: {label}"));
		if self.next_token()? != Token::LeftBracket {
			return Ok(());
		}
		let mut depth = 1;
		while depth > 0 {
			match self.next_token()? {
				Token::LeftBracket => depth += 1,
				Token::RightBracket => depth -= 1,
				_ => {}
			}
		}
		Ok(())
	}

	fn vertex_for(&self, node: i64) -> Result<VertexId, FileError> {
		self.nodes
			.get(&node)
			.copied()
			.ok_or_else(|| FileError::UnknownNodeId(node.to_string()))
	}

	fn warn(&mut self, message: String) {
		warn!("gml: {message}");
		self.warnings.push(message);
	}

	fn next_token(&mut self) -> Result<Token, FileError> {
		self.tokens.next().unwrap_or(Err(FileError::UnexpectedEof))
	}

	fn expect_left_bracket(&mut self) -> Result<(), FileError> {
		match self.next_token()? {
			Token::LeftBracket => Ok(()),
			other => Err(FileError::UnexpectedToken(other.text())),
		}
	}

	fn int(&mut self) -> Result<i64, FileError> {
		match self.next_token()? {
			Token::Int(value) => Ok(value),
			other => Err(FileError::UnexpectedToken(other.text())),
		}
	}

	/// A real number; integers are accepted too.
	fn float(&mut self) -> Result<f64, FileError> {
		match self.next_token()? {
			Token::Double(value) => Ok(value),
			Token::Int(value) => Ok(value as f64),
			other => Err(FileError::UnexpectedToken(other.text())),
		}
	}

	fn string(&mut self) -> Result<String, FileError> {
		match self.next_token()? {
			Token::Str(text) => Ok(text),
			// a name that happens to look like a color
			Token::Color(color) => Ok(color.to_hex_rgba()),
			other => Err(FileError::UnexpectedToken(other.text())),
		}
	}

	fn color(&mut self) -> Result<Color, FileError> {
		match self.next_token()? {
			Token::Color(color) => Ok(color),
			other => Err(FileError::UnexpectedToken(other.text())),
		}
	}
}
