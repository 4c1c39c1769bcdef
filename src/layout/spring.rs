//! Force-directed layout: vertices repel, edges act as springs.

use serde::{Deserialize, Serialize};

use super::{CircleLayout, Layout, rescale_positions};
use crate::graph::{Graph, Point, VertexId};

/// Relaxation runs in a space this many times larger than the unit square.
const SPACE_SCALE: f64 = 8.0;
const MIN_DISTANCE: f64 = 0.01;

/// Spring layout parameters.
///
/// The iteration count is `10 * floor(V^iterations_factor)`; repulsion acts
/// only closer than `distance_limit` and the rest length of a spring is
/// `weight^edge_weight_power`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringLayout {
	pub iterations_factor: f64,
	pub repulsion_factor: f64,
	pub spring_factor: f64,
	pub edge_weight_power: f64,
	pub distance_limit: f64,
	pub delta: f64,
}

impl Default for SpringLayout {
	fn default() -> Self {
		Self {
			iterations_factor: 0.5,
			repulsion_factor: 0.9,
			spring_factor: 0.6,
			edge_weight_power: 0.5,
			distance_limit: 4.0,
			delta: 0.05,
		}
	}
}

impl Layout for SpringLayout {
	fn position_vertices(&self, graph: &mut Graph) {
		CircleLayout::default().position_vertices(graph);

		let iterations =
			10 * (graph.vertex_count() as f64).powf(self.iterations_factor).floor() as usize;
		rescale_positions(graph, SPACE_SCALE);
		for _ in 0..iterations {
			self.iterate(graph);
		}
		rescale_positions(graph, 1.0 / SPACE_SCALE);
	}
}

impl SpringLayout {
	fn iterate(&self, graph: &mut Graph) {
		let bodies: Vec<(VertexId, Point)> = graph
			.vertices()
			.filter_map(|v| v.position().map(|p| (v.id(), p)))
			.collect();

		let mut forces = Vec::with_capacity(bodies.len());
		for &(id, position) in &bodies {
			let Some(vertex) = graph.vertex(id) else {
				continue;
			};
			let mut force = Point::default();
			for &(other, other_position) in &bodies {
				if other == id || other_position == position {
					continue;
				}

				let relative = position - other_position;
				let distance = relative.length().max(MIN_DISTANCE);
				let repulsion = if distance < self.distance_limit {
					self.repulsion_factor / (distance * distance)
				} else {
					0.0
				};
				let spring = vertex
					.edge_to(other)
					.map(|record| {
						let rest = (record.weight().max(0) as f64).powf(self.edge_weight_power);
						-self.spring_factor * (distance - rest)
					})
					.unwrap_or(0.0);

				force = force + relative * ((repulsion + spring) / distance);
			}
			forces.push((id, position + force * self.delta));
		}

		for (id, position) in forces {
			graph.place(id, position);
		}
	}
}
