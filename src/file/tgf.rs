//! Trivial Graph Format.
//!
//! ```text
//! <label> [name]        one vertex per line, name defaults to the label
//! #
//! <from> <to> [weight]  one edge per line, weight defaults to 1
//! ```
//!
//! Labels are integers. Lines that do not parse are skipped.

use std::collections::HashMap;
use std::fmt::Write;

use log::debug;

use super::FileError;
use crate::graph::{Graph, VertexId};

pub(super) fn parse(text: &str) -> Result<Graph, FileError> {
	let mut graph = Graph::new();
	let mut by_label: HashMap<i64, VertexId> = HashMap::new();
	let mut reading_vertices = true;

	for line in text.lines() {
		let line = line.trim_end();
		if line == "#" {
			reading_vertices = false;
			continue;
		}

		if reading_vertices {
			let (label, name) = match line.split_once(' ') {
				Some((label, name)) if !name.is_empty() => (label, name),
				_ => (line, line),
			};
			let Ok(number) = label.parse::<i64>() else {
				debug!("tgf: skipping vertex line {line:?}");
				continue;
			};
			let id = graph.add_vertex(name, None)?;
			by_label.insert(number, id);
		} else {
			let mut fields = line.split_whitespace();
			let endpoints = fields
				.next()
				.and_then(|f| f.parse::<i64>().ok())
				.zip(fields.next().and_then(|f| f.parse::<i64>().ok()));
			let Some((from, to)) = endpoints else {
				debug!("tgf: skipping edge line {line:?}");
				continue;
			};
			let weight = fields.next().and_then(|f| f.parse().ok()).unwrap_or(1);
			let (Some(&from), Some(&to)) = (by_label.get(&from), by_label.get(&to)) else {
				debug!("tgf: edge {line:?} refers to an unknown vertex");
				continue;
			};
			graph.add_edge(from, to, weight)?;
		}
	}
	Ok(graph)
}

pub(super) fn write(graph: &Graph) -> String {
	let mut out = String::new();
	for vertex in graph.vertices() {
		let _ = writeln!(out, "{} {}", vertex.id(), vertex.name());
	}
	out.push_str("#\n");
	for edge in graph.edges() {
		let _ = writeln!(out, "{} {} {}", edge.from, edge.to, edge.weight);
	}
	out
}
