//! Kruskal's algorithm as a steppable state machine.
//!
//! Components of the spanning forest are tracked by vertex color instead of a
//! union-find: two vertices are in the same tree iff they share a color, and
//! accepting an edge repaints the whole second tree. The repaint is what the
//! user watches, so it stays a bulk recolor.

use log::{debug, info};

use super::palette::DistinctColors;
use super::{AlgorithmError, AlgorithmTheme};
use crate::console::Console;
use crate::graph::{Graph, TEXT_COLOR, VertexId};

/// Largest graph the algorithm accepts.
pub const MAX_VERTICES: usize = 500;

/// Where an edge stands in the current run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeState {
	Pending,
	Skipped,
	InTree,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishReason {
	/// `V - 1` edges were accepted.
	TreeComplete,
	/// Every remaining edge joins two vertices of the same tree.
	EdgesExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	Uninitialized,
	Running,
	Finished(FinishReason),
}

/// An edge of the sorted candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortedEdge {
	pub from: VertexId,
	pub to: VertexId,
	pub weight: i64,
}

/// The algorithm state. It does not own the graph: every call that reads or
/// paints colors gets it passed in, and it must be the graph given to
/// [`Kruskal::init`], structurally unchanged.
#[derive(Clone, Debug)]
pub struct Kruskal {
	theme: AlgorithmTheme,
	phase: Phase,
	edges: Vec<SortedEdge>,
	states: Vec<EdgeState>,
	cursor: usize,
	step_number: usize,
	accepted: usize,
	// wide enough for any sum of i64 weights
	total_weight: i128,
	vertex_count: usize,
}

impl Kruskal {
	pub fn new(theme: AlgorithmTheme) -> Self {
		Self {
			theme,
			phase: Phase::Uninitialized,
			edges: Vec::new(),
			states: Vec::new(),
			cursor: 0,
			step_number: 0,
			accepted: 0,
			total_weight: 0,
			vertex_count: 0,
		}
	}

	/// Validates the graph, gives every vertex its own color and caches the
	/// edges sorted by weight. On error nothing is changed.
	pub fn init(&mut self, graph: &mut Graph) -> Result<(), AlgorithmError> {
		if graph.is_empty() {
			return Err(AlgorithmError::EmptyGraph);
		}
		if graph.vertex_count() > MAX_VERTICES {
			return Err(AlgorithmError::TooManyVertices {
				count: graph.vertex_count(),
				limit: MAX_VERTICES,
			});
		}
		let components = graph.split_into_components().len();
		if components > 1 {
			return Err(AlgorithmError::TooManyComponents { count: components });
		}

		graph.reset_colors();
		let ids: Vec<VertexId> = graph.vertices().map(|v| v.id()).collect();
		for (id, color) in ids.into_iter().zip(DistinctColors::new(TEXT_COLOR)) {
			// ids come from the graph itself
			let _ = graph.set_vertex_color(id, Some(color));
		}

		let mut edges: Vec<SortedEdge> = graph
			.edges()
			.into_iter()
			.map(|e| SortedEdge {
				from: e.from,
				to: e.to,
				weight: e.weight,
			})
			.collect();
		// stable: equal weights keep the canonical edge order
		edges.sort_by_key(|e| e.weight);

		self.states = vec![EdgeState::Pending; edges.len()];
		self.edges = edges;
		self.cursor = 0;
		self.step_number = 0;
		self.accepted = 0;
		self.total_weight = 0;
		self.vertex_count = graph.vertex_count();
		self.phase = Phase::Running;
		info!(
			"kruskal: initialized with {} vertices and {} edges",
			self.vertex_count,
			self.edges.len()
		);
		Ok(())
	}

	/// Accepts the next edge joining two different trees.
	///
	/// Returns `false`, without touching the graph, once the algorithm is
	/// finished or if it was never initialized. The call that discovers the
	/// end prints a closing line.
	pub fn step(&mut self, graph: &mut Graph, console: &mut dyn Console) -> bool {
		if self.phase != Phase::Running {
			return false;
		}
		let colors = self.theme.colors();

		if self.accepted + 1 >= self.vertex_count {
			self.finish(FinishReason::TreeComplete, console);
			return false;
		}

		let color_of = |graph: &Graph, id: VertexId| graph.vertex(id).map(|v| v.color());
		let found = (self.cursor..self.edges.len()).find(|&i| {
			let edge = self.edges[i];
			color_of(graph, edge.from) != color_of(graph, edge.to)
		});
		let Some(index) = found else {
			self.finish(FinishReason::EdgesExhausted, console);
			return false;
		};

		self.step_number += 1;
		let skipped = index - self.cursor;
		for i in self.cursor..index {
			let edge = self.edges[i];
			self.states[i] = EdgeState::Skipped;
			let _ = graph.set_edge_color(edge.from, edge.to, Some(colors.skipped_edge));
		}

		let edge = self.edges[index];
		let (Some(keep), Some(absorb)) = (color_of(graph, edge.from), color_of(graph, edge.to))
		else {
			return false;
		};
		let recolored = graph.replace_vertex_color(absorb, keep);
		let _ = graph.set_edge_color(edge.from, edge.to, Some(colors.tree_edge));
		self.states[index] = EdgeState::InTree;
		self.cursor = index + 1;
		self.accepted += 1;
		self.total_weight += i128::from(edge.weight);

		let name = |id: VertexId| graph.vertex(id).map(|v| v.name().to_string()).unwrap_or_default();
		console.println(
			&format!("___________ Step №{} _____________", self.step_number),
			colors.console_text,
		);
		console.println(&format!("{skipped} edges skipped"), colors.console_skipped);
		console.println(
			&format!(
				"Added {} --(weight = {})-- {}",
				name(edge.from),
				edge.weight,
				name(edge.to)
			),
			colors.console_added,
		);
		console.println(&format!("Recolored {recolored} vertices"), colors.console_recolored);
		console.println(
			&format!("Current MST weight: {}", self.total_weight),
			colors.console_weight,
		);
		debug!(
			"kruskal: step {} accepted #{} - #{}, {} skipped",
			self.step_number, edge.from, edge.to, skipped
		);
		true
	}

	fn finish(&mut self, reason: FinishReason, console: &mut dyn Console) {
		self.phase = Phase::Finished(reason);
		let colors = self.theme.colors();
		let message = match reason {
			FinishReason::TreeComplete => format!(
				"The minimum spanning tree is complete, its weight: {}",
				self.total_weight
			),
			FinishReason::EdgesExhausted => format!(
				"No edges left to add, current MST weight: {}",
				self.total_weight
			),
		};
		console.println(&message, colors.console_weight);
		info!("kruskal: finished ({reason:?}) with weight {}", self.total_weight);
	}

	pub fn theme(&self) -> AlgorithmTheme {
		self.theme
	}

	pub fn is_initialized(&self) -> bool {
		self.phase != Phase::Uninitialized
	}

	pub fn is_finished(&self) -> bool {
		matches!(self.phase, Phase::Finished(_))
	}

	pub fn finish_reason(&self) -> Option<FinishReason> {
		match self.phase {
			Phase::Finished(reason) => Some(reason),
			_ => None,
		}
	}

	/// Candidate edges in processing order.
	pub fn edges(&self) -> &[SortedEdge] {
		&self.edges
	}

	/// State of every candidate edge, parallel to [`Kruskal::edges`].
	pub fn edge_states(&self) -> &[EdgeState] {
		&self.states
	}

	/// Index of the next candidate edge.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Number of successful steps so far.
	pub fn step_number(&self) -> usize {
		self.step_number
	}

	/// Sum of the accepted weights. Never overflows, whatever the weights.
	pub fn total_weight(&self) -> i128 {
		self.total_weight
	}

	/// Edges accepted into the tree, in acceptance order.
	pub fn tree_edges(&self) -> impl Iterator<Item = &SortedEdge> {
		self.edges
			.iter()
			.zip(&self.states)
			.filter(|(_, state)| **state == EdgeState::InTree)
			.map(|(edge, _)| edge)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::color::Color;
	use crate::console::ConsoleBuffer;
	use crate::graph::DEFAULT_EDGE_COLOR;
	use crate::graph::tests::assert_symmetric;

	fn triangle() -> (Graph, VertexId, VertexId, VertexId) {
		let mut graph = Graph::new();
		let a = graph.add_vertex("A", None).unwrap();
		let b = graph.add_vertex("B", None).unwrap();
		let c = graph.add_vertex("C", None).unwrap();
		graph.add_edge(a, b, 2).unwrap();
		graph.add_edge(b, c, 1).unwrap();
		graph.add_edge(a, c, 3).unwrap();
		(graph, a, b, c)
	}

	#[test]
	fn test_init_rejects_empty_graph() {
		let mut graph = Graph::new();
		assert_eq!(
			Kruskal::new(AlgorithmTheme::Default).init(&mut graph),
			Err(AlgorithmError::EmptyGraph)
		);
	}

	#[test]
	fn test_init_rejects_disconnected_graph_without_painting() {
		let mut graph = Graph::new();
		let a = graph.add_vertex("A", None).unwrap();
		graph.add_vertex("B", None).unwrap();
		graph.set_vertex_color(a, Some(Color::YELLOW)).unwrap();

		let err = Kruskal::new(AlgorithmTheme::Default).init(&mut graph).unwrap_err();
		assert_eq!(err, AlgorithmError::TooManyComponents { count: 2 });
		assert_eq!(
			err.to_string(),
			"The number of connectivity components should not be more than 1. The real number of connectivity components: 2"
		);
		assert_eq!(graph.vertex(a).unwrap().color(), Color::YELLOW);
	}

	#[test]
	fn test_init_rejects_too_many_vertices() {
		let mut graph = Graph::new();
		let mut previous = graph.add_vertex("0", None).unwrap();
		for i in 1..=MAX_VERTICES {
			let next = graph.add_vertex(&i.to_string(), None).unwrap();
			graph.add_edge(previous, next, 1).unwrap();
			previous = next;
		}
		assert_eq!(
			Kruskal::new(AlgorithmTheme::Default).init(&mut graph),
			Err(AlgorithmError::TooManyVertices {
				count: 501,
				limit: 500
			})
		);
	}

	#[test]
	fn test_init_paints_distinct_vertex_colors() {
		let (mut graph, ..) = triangle();
		Kruskal::new(AlgorithmTheme::Default).init(&mut graph).unwrap();
		let colors: HashSet<Color> = graph.vertices().map(|v| v.color()).collect();
		assert_eq!(colors.len(), 3);
	}

	#[test]
	fn test_triangle_accepts_bc_then_ab() {
		let (mut graph, a, b, c) = triangle();
		let mut console = ConsoleBuffer::new();
		let mut kruskal = Kruskal::new(AlgorithmTheme::Default);
		kruskal.init(&mut graph).unwrap();

		assert!(kruskal.step(&mut graph, &mut console));
		assert_eq!(
			graph.vertex(b).unwrap().color(),
			graph.vertex(c).unwrap().color()
		);
		assert_ne!(
			graph.vertex(a).unwrap().color(),
			graph.vertex(b).unwrap().color()
		);
		assert_eq!(graph.edge(b, c).unwrap().color, Color::MAGENTA);

		assert!(kruskal.step(&mut graph, &mut console));
		assert_eq!(graph.edge(a, b).unwrap().color, Color::MAGENTA);
		assert_eq!(graph.edge(a, c).unwrap().color, DEFAULT_EDGE_COLOR);

		assert!(!kruskal.step(&mut graph, &mut console));
		assert!(!kruskal.step(&mut graph, &mut console));
		assert_eq!(kruskal.finish_reason(), Some(FinishReason::TreeComplete));
		assert_eq!(kruskal.total_weight(), 3);

		let tree: Vec<(VertexId, VertexId)> = kruskal.tree_edges().map(|e| (e.from, e.to)).collect();
		assert_eq!(tree, vec![(b, c), (a, b)]);
		assert_eq!(kruskal.edge_states()[2], EdgeState::Pending);
		assert_symmetric(&graph);

		let text = console.text();
		assert!(text.contains("___________ Step №1 _____________"));
		assert!(text.contains("Added B --(weight = 1)-- C"));
		assert!(text.contains("Added A --(weight = 2)-- B"));
		assert!(text.contains("Current MST weight: 3"));
	}

	#[test]
	fn test_extreme_weights_sum_without_overflow() {
		let mut graph = Graph::new();
		let ids: Vec<_> = ["a", "b", "c"]
			.iter()
			.map(|n| graph.add_vertex(n, None).unwrap())
			.collect();
		graph.add_edge(ids[0], ids[1], i64::MAX).unwrap();
		graph.add_edge(ids[1], ids[2], i64::MAX).unwrap();

		let mut console = ConsoleBuffer::new();
		let mut kruskal = Kruskal::new(AlgorithmTheme::Default);
		kruskal.init(&mut graph).unwrap();
		while kruskal.step(&mut graph, &mut console) {}

		let expected = 2 * i128::from(i64::MAX);
		assert_eq!(kruskal.total_weight(), expected);
		assert_eq!(kruskal.finish_reason(), Some(FinishReason::TreeComplete));
		assert!(console.text().ends_with(&format!(
			"The minimum spanning tree is complete, its weight: {expected}"
		)));
	}

	#[test]
	fn test_skipped_edges_are_painted_and_counted() {
		// square a-b-c-d with a heavy diagonal that must be skipped
		let mut graph = Graph::new();
		let ids: Vec<_> = ["a", "b", "c", "d"]
			.iter()
			.map(|n| graph.add_vertex(n, None).unwrap())
			.collect();
		graph.add_edge(ids[0], ids[1], 1).unwrap();
		graph.add_edge(ids[1], ids[2], 1).unwrap();
		graph.add_edge(ids[0], ids[2], 2).unwrap();
		graph.add_edge(ids[2], ids[3], 5).unwrap();

		let mut console = ConsoleBuffer::new();
		let mut kruskal = Kruskal::new(AlgorithmTheme::Red);
		kruskal.init(&mut graph).unwrap();
		while kruskal.step(&mut graph, &mut console) {}

		assert_eq!(kruskal.total_weight(), 7);
		assert_eq!(graph.edge(ids[0], ids[2]).unwrap().color, Color::GRAY);
		assert_eq!(graph.edge(ids[2], ids[3]).unwrap().color, Color::RED);
		assert!(console.text().contains("1 edges skipped"));
		assert!(console.text().contains("___________ Step №3 _____________"));
		assert!(console.text().contains("Added c --(weight = 5)-- d"));

		let first = graph.vertices().next().unwrap().color();
		assert!(graph.vertices().all(|v| v.color() == first));
	}

	#[test]
	fn test_single_vertex_finishes_immediately() {
		let mut graph = Graph::new();
		graph.add_vertex("solo", None).unwrap();
		let mut kruskal = Kruskal::new(AlgorithmTheme::Default);
		kruskal.init(&mut graph).unwrap();
		assert!(!kruskal.step(&mut graph, &mut ConsoleBuffer::new()));
		assert_eq!(kruskal.finish_reason(), Some(FinishReason::TreeComplete));
	}

	#[test]
	fn test_step_before_init_is_noop() {
		let (mut graph, ..) = triangle();
		let mut console = ConsoleBuffer::new();
		assert!(!Kruskal::new(AlgorithmTheme::Default).step(&mut graph, &mut console));
		assert!(console.is_empty());
	}
}
