//! Graph files: TGF, GML and the JSON shape the page embeds.
//!
//! Loading produces a fresh [`Graph`]; saving only reads one. Neither
//! applies a layout: callers position vertices that a format left unplaced.

mod gml;
mod json;
mod tgf;

use std::path::Path;

use log::info;
use thiserror::Error;

use crate::graph::{Graph, GraphError};
use crate::options::RenderOptions;

pub use json::{GraphData, GraphLink, GraphNode};

/// Failures while reading or writing a graph file.
#[derive(Error, Debug)]
pub enum FileError {
	#[error(transparent)]
	Graph(#[from] GraphError),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid JSON graph: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Unexpected token: {0}")]
	UnexpectedToken(String),

	#[error("Unexpected end of file")]
	UnexpectedEof,

	#[error("Label {0} can only appear once in a scope")]
	DuplicateLabel(String),

	#[error("Every {scope} must have a {label} label")]
	MissingLabel {
		scope: &'static str,
		label: &'static str,
	},

	#[error("No node with id {0}")]
	UnknownNodeId(String),

	#[error("Unsupported graph type: {0}")]
	UnsupportedGraphType(String),

	#[error("Edge weight can only be an integer, got: {0}")]
	InvalidWeight(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFormat {
	Tgf,
	Gml,
	Json,
}

impl GraphFormat {
	pub fn from_extension(extension: &str) -> Result<Self, GraphError> {
		match extension.to_ascii_lowercase().as_str() {
			"tgf" => Ok(GraphFormat::Tgf),
			"gml" => Ok(GraphFormat::Gml),
			"json" => Ok(GraphFormat::Json),
			_ => Err(GraphError::UnsupportedFormat(extension.to_string())),
		}
	}

	pub fn from_path(path: &Path) -> Result<Self, GraphError> {
		let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
		Self::from_extension(extension)
	}

	pub fn extension(self) -> &'static str {
		match self {
			GraphFormat::Tgf => "tgf",
			GraphFormat::Gml => "gml",
			GraphFormat::Json => "json",
		}
	}
}

/// A graph read from a file, plus whatever else the file carried.
#[derive(Debug)]
pub struct LoadedGraph {
	pub graph: Graph,
	/// Render settings stored in the file, merged over the ones passed in.
	pub render: Option<RenderOptions>,
	/// Informational lines (creator, version).
	pub notes: Vec<String>,
	/// Things that were ignored while reading.
	pub warnings: Vec<String>,
}

impl LoadedGraph {
	fn plain(graph: Graph) -> Self {
		Self {
			graph,
			render: None,
			notes: Vec::new(),
			warnings: Vec::new(),
		}
	}

	/// Whether some vertex still needs a position.
	pub fn needs_layout(&self) -> bool {
		self.graph.vertices().any(|v| v.position().is_none())
	}
}

pub fn load(format: GraphFormat, text: &str, render: &RenderOptions) -> Result<LoadedGraph, FileError> {
	let loaded = match format {
		GraphFormat::Tgf => LoadedGraph::plain(tgf::parse(text)?),
		GraphFormat::Gml => gml::parse(text, render)?,
		GraphFormat::Json => json::parse(text)?,
	};
	info!(
		"file: loaded {} graph with {} vertices and {} edges",
		format.extension(),
		loaded.graph.vertex_count(),
		loaded.graph.edge_count()
	);
	Ok(loaded)
}

pub fn save(format: GraphFormat, graph: &Graph, render: &RenderOptions) -> Result<String, FileError> {
	Ok(match format {
		GraphFormat::Tgf => tgf::write(graph),
		GraphFormat::Gml => gml::write(graph, render),
		GraphFormat::Json => json::write(graph)?,
	})
}

pub fn load_path(path: &Path, render: &RenderOptions) -> Result<LoadedGraph, FileError> {
	let format = GraphFormat::from_path(path)?;
	let text = std::fs::read_to_string(path)?;
	load(format, &text, render)
}

pub fn save_path(path: &Path, graph: &Graph, render: &RenderOptions) -> Result<(), FileError> {
	let format = GraphFormat::from_path(path)?;
	std::fs::write(path, save(format, graph, render)?)?;
	info!("file: saved graph to {}", path.display());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_format_dispatch() {
		assert_eq!(GraphFormat::from_path(Path::new("a/b.TGF")), Ok(GraphFormat::Tgf));
		assert_eq!(GraphFormat::from_path(Path::new("g.gml")), Ok(GraphFormat::Gml));
		assert_eq!(
			GraphFormat::from_path(Path::new("g.graphml")),
			Err(GraphError::UnsupportedFormat("graphml".into()))
		);
		assert_eq!(
			GraphFormat::from_path(Path::new("noext")),
			Err(GraphError::UnsupportedFormat(String::new()))
		);
	}

	#[test]
	fn test_save_then_load_through_filesystem() {
		let mut graph = Graph::new();
		let a = graph.add_vertex("a", None).unwrap();
		let b = graph.add_vertex("b", None).unwrap();
		graph.add_edge(a, b, 9).unwrap();

		let path = std::env::temp_dir().join(format!("kruskal-graph-{}.tgf", std::process::id()));
		save_path(&path, &graph, &RenderOptions::default()).unwrap();
		let loaded = load_path(&path, &RenderOptions::default()).unwrap();
		let _ = std::fs::remove_file(&path);

		assert!(loaded.needs_layout());
		let (la, lb) = (loaded.graph.id_of("a").unwrap(), loaded.graph.id_of("b").unwrap());
		assert_eq!(loaded.graph.edge(la, lb).unwrap().weight, 9);
	}

	#[test]
	fn test_missing_file_is_io_error() {
		let err = load_path(Path::new("/nonexistent/dir/graph.tgf"), &RenderOptions::default())
			.unwrap_err();
		assert!(matches!(err, FileError::Io(_)));
	}
}
