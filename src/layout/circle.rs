//! Circular layout, optionally one circle per connected component.

use std::collections::HashSet;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{Layout, rescale_positions};
use crate::graph::{Graph, Point, VertexId};

/// Places vertices on a circle.
///
/// - `radius` is a fraction in `[0, 1]` of the largest circle fitting the
///   area; `0` picks the default.
/// - With `separate_components`, each component gets its own square sub-area
///   sized by its vertex count.
/// - `vertex_tolerance` and `edge_tolerance` control how crowded a graph may
///   get before the whole picture is spread out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleLayout {
	pub radius: f64,
	pub separate_components: bool,
	pub vertex_tolerance: f64,
	pub edge_tolerance: f64,
}

impl Default for CircleLayout {
	fn default() -> Self {
		Self {
			radius: 0.0,
			separate_components: true,
			vertex_tolerance: 30.0,
			edge_tolerance: 90.0,
		}
	}
}

impl Layout for CircleLayout {
	fn position_vertices(&self, graph: &mut Graph) {
		graph.reset_positions();
		let edge_count = graph.edge_count();

		if self.separate_components {
			let mut components = graph.split_into_components();
			if components.len() > 1 {
				components.sort_by(|a, b| b.len().cmp(&a.len()));
				let areas = component_areas(components.iter().map(|c| c.len() as f64));
				for (component, (center, size)) in components.iter().zip(areas) {
					let radius = self.actual_radius(size, component.len());
					place_on_circle(graph, component, center, radius);
				}
				self.spread_if_crowded(graph, edge_count);
				return;
			}
		}

		let all: Vec<VertexId> = graph.vertices().map(|v| v.id()).collect();
		place_on_circle(graph, &all, Point::CENTER, self.actual_radius(1.0, 1));
		self.spread_if_crowded(graph, edge_count);
	}
}

impl CircleLayout {
	fn actual_radius(&self, area_size: f64, vertex_count: usize) -> f64 {
		// two-vertex components otherwise touch the neighbouring areas
		let small_component = if vertex_count == 2 { 0.85 } else { 1.0 };
		let radius = if self.radius == 0.0 {
			1.0
		} else {
			self.radius.clamp(0.0, 1.0)
		};
		area_size * radius * 0.45 * small_component
	}

	fn spread_if_crowded(&self, graph: &mut Graph, edge_count: usize) {
		let crowding = graph.vertex_count() as f64 / self.vertex_tolerance
			+ edge_count as f64 / self.edge_tolerance;
		if crowding > 1.0 {
			rescale_positions(graph, crowding.sqrt());
		}
	}
}

fn place_on_circle(graph: &mut Graph, vertices: &[VertexId], center: Point, radius: f64) {
	if let [single] = vertices {
		graph.place(*single, center);
		return;
	}

	let ordered = order_by_edges(graph, vertices);
	let step = 2.0 * PI / ordered.len() as f64;
	for (i, id) in ordered.into_iter().enumerate() {
		let angle = step * i as f64;
		graph.place(id, center + Point::new(angle.sin(), angle.cos()) * radius);
	}
}

/// Greedy walk that keeps adjacent vertices next to each other on the ring.
fn order_by_edges(graph: &Graph, vertices: &[VertexId]) -> Vec<VertexId> {
	let mut placed: HashSet<VertexId> = HashSet::with_capacity(vertices.len());
	let mut order = Vec::with_capacity(vertices.len());
	let Some(&first) = vertices.first() else {
		return order;
	};

	let mut current = first;
	order.push(current);
	placed.insert(current);
	while order.len() < vertices.len() {
		let next = graph
			.vertex(current)
			.and_then(|v| v.edges().iter().map(|e| e.to()).find(|id| !placed.contains(id)))
			.or_else(|| vertices.iter().copied().find(|id| !placed.contains(id)));
		let Some(next) = next else {
			break;
		};
		current = next;
		order.push(current);
		placed.insert(current);
	}
	order
}

/// Packs squares of the given sizes (largest first) into one square and
/// returns each square's center and side, scaled to the unit square.
fn component_areas(sizes: impl IntoIterator<Item = f64>) -> Vec<(Point, f64)> {
	let mut areas = Vec::new();
	let (mut end, mut end_x, mut end_y) = (0.0, 0.0, 0.0);

	for size in sizes {
		if size > end_x && size > end_y {
			// start a new diagonal block
			areas.push((Point::new(end + size / 2.0, end + size / 2.0), size));
			end_x = end;
			end_y = end;
			end += size;
		} else if size <= end_x {
			areas.push((Point::new(end_x - size / 2.0, end - size / 2.0), size));
			end_x -= size;
		} else {
			areas.push((Point::new(end - size / 2.0, end_y - size / 2.0), size));
			end_y -= size;
		}
	}

	if end == 0.0 {
		return areas;
	}
	let scale = 1.0 / end;
	areas
		.into_iter()
		.map(|(center, size)| (center * scale, size * scale))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn positions(graph: &Graph) -> Vec<Point> {
		graph.vertices().filter_map(|v| v.position()).collect()
	}

	#[test]
	fn test_single_vertex_goes_to_center() {
		let mut graph = Graph::new();
		graph.add_vertex("a", Some(Point::new(0.9, 0.9))).unwrap();
		CircleLayout::default().position_vertices(&mut graph);
		assert_eq!(positions(&graph), vec![Point::CENTER]);
	}

	#[test]
	fn test_circle_is_deterministic() {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..12)
			.map(|i| graph.add_vertex(&format!("v{i}"), None).unwrap())
			.collect();
		for pair in ids.windows(2) {
			graph.add_edge(pair[0], pair[1], 1).unwrap();
		}
		graph.add_edge(ids[0], ids[7], 4).unwrap();

		let layout = CircleLayout::default();
		layout.position_vertices(&mut graph);
		let first = positions(&graph);
		layout.position_vertices(&mut graph);
		assert_eq!(first, positions(&graph));
		assert_eq!(first.len(), 12);
	}

	#[test]
	fn test_connected_graph_uses_one_circle() {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..4)
			.map(|i| graph.add_vertex(&i.to_string(), None).unwrap())
			.collect();
		for pair in ids.windows(2) {
			graph.add_edge(pair[0], pair[1], 1).unwrap();
		}
		CircleLayout::default().position_vertices(&mut graph);
		for p in positions(&graph) {
			assert!((p.distance(Point::CENTER) - 0.45).abs() < 1e-9);
		}
	}

	#[test]
	fn test_ring_order_follows_edges() {
		let mut graph = Graph::new();
		let a = graph.add_vertex("a", None).unwrap();
		let b = graph.add_vertex("b", None).unwrap();
		let c = graph.add_vertex("c", None).unwrap();
		let d = graph.add_vertex("d", None).unwrap();
		// path a - c - b - d
		graph.add_edge(a, c, 1).unwrap();
		graph.add_edge(c, b, 1).unwrap();
		graph.add_edge(b, d, 1).unwrap();
		assert_eq!(order_by_edges(&graph, &[a, b, c, d]), vec![a, c, b, d]);
	}

	#[test]
	fn test_components_get_separate_areas() {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..5)
			.map(|i| graph.add_vertex(&i.to_string(), None).unwrap())
			.collect();
		graph.add_edge(ids[0], ids[1], 1).unwrap();
		graph.add_edge(ids[1], ids[2], 1).unwrap();
		graph.add_edge(ids[3], ids[4], 1).unwrap();

		CircleLayout::default().position_vertices(&mut graph);
		let all = positions(&graph);
		assert_eq!(all.len(), 5);
		for p in &all {
			assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
		}

		let separate = CircleLayout {
			separate_components: false,
			..CircleLayout::default()
		};
		separate.position_vertices(&mut graph);
		for p in positions(&graph) {
			assert!((p.distance(Point::CENTER) - 0.45).abs() < 1e-9);
		}
	}

	#[test]
	fn test_component_areas_fill_unit_square() {
		let areas = component_areas([3.0, 1.0, 1.0]);
		assert_eq!(areas.len(), 3);
		assert_eq!(areas[0], (Point::new(0.375, 0.375), 0.75));
		assert_eq!(areas[1], (Point::new(0.875, 0.875), 0.25));
		assert_eq!(areas[2], (Point::new(0.625, 0.875), 0.25));
	}

	#[test]
	fn test_dense_graph_is_spread_out() {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..60)
			.map(|i| graph.add_vertex(&i.to_string(), None).unwrap())
			.collect();
		for pair in ids.windows(2) {
			graph.add_edge(pair[0], pair[1], 1).unwrap();
		}
		CircleLayout::default().position_vertices(&mut graph);

		let crowding: f64 = 60.0 / 30.0 + 59.0 / 90.0;
		let expected = 0.45 * crowding.sqrt();
		for p in positions(&graph) {
			assert!((p.distance(Point::CENTER) - expected).abs() < 1e-9);
		}
	}
}
