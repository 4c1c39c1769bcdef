//! JSON graph data: `{ nodes: [...], links: [...] }`.
//!
//! This is also what the page can embed in `<script id="graph-data">`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FileError, LoadedGraph};
use crate::color::Color;
use crate::graph::{Graph, Point, VertexId};

/// A node in the graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Vertex name; the id is used when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// CSS color (e.g., "#ff0000" or "rgb(255, 0, 0)").
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Normalized position; the vertex is laid out when either is missing.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
}

/// An undirected, weighted edge between two nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Defaults to 1.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub weight: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Builds a graph. Unknown colors fall back to the defaults.
	pub fn to_graph(&self) -> Result<Graph, FileError> {
		let mut graph = Graph::new();
		let mut by_id: HashMap<&str, VertexId> = HashMap::with_capacity(self.nodes.len());

		for node in &self.nodes {
			let name = node.label.as_deref().unwrap_or(&node.id);
			let position = node.x.zip(node.y).map(|(x, y)| Point::new(x, y));
			let vertex = graph.add_vertex(name, position)?;
			graph.set_vertex_color(vertex, node.color.as_deref().and_then(Color::parse_css))?;
			by_id.insert(&node.id, vertex);
		}

		for link in &self.links {
			let endpoint = |id: &str| {
				by_id
					.get(id)
					.copied()
					.ok_or_else(|| FileError::UnknownNodeId(id.to_string()))
			};
			let (from, to) = (endpoint(&link.source)?, endpoint(&link.target)?);
			graph.add_edge(from, to, link.weight.unwrap_or(1))?;
			graph.set_edge_color(from, to, link.color.as_deref().and_then(Color::parse_css))?;
		}
		Ok(graph)
	}

	pub fn from_graph(graph: &Graph) -> Self {
		let nodes = graph
			.vertices()
			.map(|vertex| GraphNode {
				id: vertex.id().to_string(),
				label: Some(vertex.name().to_string()),
				color: Some(vertex.color().to_css()),
				x: vertex.position().map(|p| p.x),
				y: vertex.position().map(|p| p.y),
			})
			.collect();
		let links = graph
			.edges()
			.into_iter()
			.map(|edge| GraphLink {
				source: edge.from.to_string(),
				target: edge.to.to_string(),
				weight: Some(edge.weight),
				color: Some(edge.color.to_css()),
			})
			.collect();
		Self { nodes, links }
	}
}

pub(super) fn parse(text: &str) -> Result<LoadedGraph, FileError> {
	let data: GraphData = serde_json::from_str(text)?;
	Ok(LoadedGraph::plain(data.to_graph()?))
}

pub(super) fn write(graph: &Graph) -> Result<String, FileError> {
	Ok(serde_json::to_string_pretty(&GraphData::from_graph(graph))?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_minimal_json_uses_ids_as_names() {
		let loaded = parse(r#"{"nodes": [{"id": "a"}, {"id": "b", "label": "Bee", "color": "rgb(255, 0, 0)"}], "links": [{"source": "a", "target": "b"}]}"#).unwrap();
		let graph = loaded.graph;
		let a = graph.id_of("a").unwrap();
		let b = graph.id_of("Bee").unwrap();
		assert_eq!(graph.edge(a, b).unwrap().weight, 1);
		assert_eq!(graph.vertex(b).unwrap().color(), Color::RED);
	}

	#[test]
	fn test_unknown_link_endpoint() {
		let err = parse(r#"{"nodes": [{"id": "a"}], "links": [{"source": "a", "target": "z"}]}"#)
			.unwrap_err();
		assert!(matches!(err, FileError::UnknownNodeId(id) if id == "z"));
	}

	#[test]
	fn test_written_json_reads_back() {
		let mut graph = Graph::new();
		let a = graph.add_vertex("a", Some(Point::new(0.3, 0.4))).unwrap();
		let b = graph.add_vertex("b", None).unwrap();
		graph.add_edge(a, b, 5).unwrap();
		graph.set_edge_color(a, b, Some(Color::GRAY)).unwrap();

		let text = write(&graph).unwrap();
		let reread = parse(&text).unwrap().graph;
		let (ra, rb) = (reread.id_of("a").unwrap(), reread.id_of("b").unwrap());
		assert_eq!(reread.vertex(ra).unwrap().position(), Some(Point::new(0.3, 0.4)));
		assert_eq!(reread.vertex(rb).unwrap().position(), None);
		assert_eq!(reread.edge(ra, rb).unwrap().color, Color::GRAY);
		assert_eq!(reread.edge(ra, rb).unwrap().weight, 5);
	}

	#[test]
	fn test_malformed_json() {
		assert!(matches!(parse("{"), Err(FileError::Json(_))));
	}
}
