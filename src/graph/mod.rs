//! Mutable undirected weighted graph with referential integrity.
//!
//! Vertices live in a map ordered by id, so every traversal (edge listing,
//! component split, layouts, coloring snapshots) sees the same order for the
//! same graph. An undirected edge is stored as two [`OutgoingEdge`] records,
//! one per endpoint; they are only ever created, updated and removed together
//! through the graph mutators.
//!
//! All mutators validate first and mutate second, so a failed call never
//! leaves the graph half-changed.

mod coloring;
mod error;
mod vertex;

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::color::Color;

pub use coloring::{GraphColoring, VertexColors};
pub use error::{ColoringError, GraphError};
pub use vertex::{Edge, OutgoingEdge, Point, Vertex, VertexId};

/// Color of a vertex that has not been painted.
pub const DEFAULT_VERTEX_COLOR: Color = Color::BLUE;
/// Color of an edge that has not been painted.
pub const DEFAULT_EDGE_COLOR: Color = Color::BLACK;
/// Color used for vertex names and weights on the canvas.
pub const TEXT_COLOR: Color = Color::BLACK;

/// The graph: vertices by id plus a name index.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	vertices: BTreeMap<VertexId, Vertex>,
	names: HashMap<String, VertexId>,
	next_id: VertexId,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn edge_count(&self) -> usize {
		self.vertices.values().map(Vertex::degree).sum::<usize>() / 2
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	/// Vertices in ascending id order.
	pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
		self.vertices.values()
	}

	pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Vertex> {
		self.vertices.values_mut()
	}

	pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
		self.vertices.get(&id)
	}

	pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
		self.names.get(name).and_then(|id| self.vertices.get(id))
	}

	pub fn contains(&self, id: VertexId) -> bool {
		self.vertices.contains_key(&id)
	}

	/// Resolves a vertex name to its id.
	pub fn id_of(&self, name: &str) -> Result<VertexId, GraphError> {
		self.names
			.get(name)
			.copied()
			.ok_or_else(|| GraphError::NoSuchVertex(name.to_string()))
	}

	/// Canonical undirected view: for every vertex, only the records whose
	/// target has a larger id.
	pub fn edges(&self) -> Vec<Edge> {
		let mut result = Vec::with_capacity(self.edge_count());
		for vertex in self.vertices.values() {
			for record in &vertex.edges {
				if record.to > vertex.id {
					result.push(Edge {
						from: vertex.id,
						to: record.to,
						weight: record.weight,
						color: record.color,
					});
				}
			}
		}
		result
	}

	/// The edge between `a` and `b`, normalized so that `from < to`.
	pub fn edge(&self, a: VertexId, b: VertexId) -> Option<Edge> {
		let record = self.vertices.get(&a)?.edge_to(b)?;
		Some(Edge {
			from: a.min(b),
			to: a.max(b),
			weight: record.weight,
			color: record.color,
		})
	}

	/// Adds an isolated vertex. Fails if the name is taken.
	pub fn add_vertex(
		&mut self,
		name: &str,
		position: Option<Point>,
	) -> Result<VertexId, GraphError> {
		if self.names.contains_key(name) {
			return Err(GraphError::VertexAlreadyExists(name.to_string()));
		}

		let id = self.next_id;
		self.next_id += 1;
		self.vertices.insert(
			id,
			Vertex {
				id,
				name: name.to_string(),
				position,
				color: DEFAULT_VERTEX_COLOR,
				edges: Vec::new(),
			},
		);
		self.names.insert(name.to_string(), id);
		debug!("graph: added vertex {name} as #{id}");
		Ok(id)
	}

	/// Removes a vertex together with every incident edge.
	pub fn remove_vertex(&mut self, id: VertexId) -> Result<(), GraphError> {
		let vertex = self
			.vertices
			.remove(&id)
			.ok_or_else(|| GraphError::NoSuchVertex(Self::id_label(id)))?;

		for record in &vertex.edges {
			if let Some(neighbor) = self.vertices.get_mut(&record.to) {
				neighbor.edges.retain(|e| e.to != id);
			}
		}
		self.names.remove(&vertex.name);
		debug!(
			"graph: removed vertex {} with {} edges",
			vertex.name,
			vertex.edges.len()
		);
		Ok(())
	}

	/// Adds an undirected edge. Fails on self-loops, duplicates and unknown endpoints.
	pub fn add_edge(
		&mut self,
		from: VertexId,
		to: VertexId,
		weight: i64,
	) -> Result<(), GraphError> {
		let source = self.require(from)?;
		let target = self.require(to)?;
		if from == to {
			return Err(GraphError::SelfLoop(source.name.clone()));
		}
		if source.edge_to(to).is_some() {
			return Err(GraphError::EdgeAlreadyExists(
				source.name.clone(),
				target.name.clone(),
			));
		}

		for (a, b) in [(from, to), (to, from)] {
			if let Some(vertex) = self.vertices.get_mut(&a) {
				vertex.edges.push(OutgoingEdge {
					to: b,
					weight,
					color: DEFAULT_EDGE_COLOR,
				});
			}
		}
		debug!("graph: added edge #{from} - #{to} (weight {weight})");
		Ok(())
	}

	pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<(), GraphError> {
		self.require_edge(from, to)?;
		for (a, b) in [(from, to), (to, from)] {
			if let Some(vertex) = self.vertices.get_mut(&a) {
				vertex.edges.retain(|e| e.to != b);
			}
		}
		debug!("graph: removed edge #{from} - #{to}");
		Ok(())
	}

	/// Renames a vertex. Renaming to the current name is a no-op.
	pub fn rename_vertex(&mut self, id: VertexId, new_name: &str) -> Result<(), GraphError> {
		let old_name = self.require(id)?.name.clone();
		if old_name == new_name {
			return Ok(());
		}
		if self.names.contains_key(new_name) {
			return Err(GraphError::VertexAlreadyExists(new_name.to_string()));
		}

		self.names.remove(&old_name);
		self.names.insert(new_name.to_string(), id);
		if let Some(vertex) = self.vertices.get_mut(&id) {
			vertex.name = new_name.to_string();
		}
		Ok(())
	}

	pub fn set_edge_weight(
		&mut self,
		from: VertexId,
		to: VertexId,
		weight: i64,
	) -> Result<(), GraphError> {
		self.update_edge(from, to, |record| record.weight = weight)
	}

	/// `None` resets the vertex to [`DEFAULT_VERTEX_COLOR`].
	pub fn set_vertex_color(
		&mut self,
		id: VertexId,
		color: Option<Color>,
	) -> Result<(), GraphError> {
		let vertex = self
			.vertices
			.get_mut(&id)
			.ok_or_else(|| GraphError::NoSuchVertex(Self::id_label(id)))?;
		vertex.color = color.unwrap_or(DEFAULT_VERTEX_COLOR);
		Ok(())
	}

	/// `None` resets the edge to [`DEFAULT_EDGE_COLOR`].
	pub fn set_edge_color(
		&mut self,
		from: VertexId,
		to: VertexId,
		color: Option<Color>,
	) -> Result<(), GraphError> {
		let color = color.unwrap_or(DEFAULT_EDGE_COLOR);
		self.update_edge(from, to, |record| record.color = color)
	}

	pub fn set_vertex_position(
		&mut self,
		id: VertexId,
		position: Option<Point>,
	) -> Result<(), GraphError> {
		let vertex = self
			.vertices
			.get_mut(&id)
			.ok_or_else(|| GraphError::NoSuchVertex(Self::id_label(id)))?;
		vertex.position = position;
		Ok(())
	}

	pub(crate) fn place(&mut self, id: VertexId, position: Point) {
		if let Some(vertex) = self.vertices.get_mut(&id) {
			vertex.position = Some(position);
		}
	}

	/// Forgets every vertex position.
	pub fn reset_positions(&mut self) {
		for vertex in self.vertices.values_mut() {
			vertex.position = None;
		}
	}

	/// Paints every vertex and edge with the default colors.
	pub fn reset_colors(&mut self) {
		for vertex in self.vertices.values_mut() {
			vertex.color = DEFAULT_VERTEX_COLOR;
			for record in &mut vertex.edges {
				record.color = DEFAULT_EDGE_COLOR;
			}
		}
	}

	/// Nearest positioned vertex within `radius` of `point`.
	pub fn vertex_at(&self, point: Point, radius: f64) -> Option<VertexId> {
		let mut best: Option<(VertexId, f64)> = None;
		for vertex in self.vertices.values() {
			let Some(position) = vertex.position else {
				continue;
			};
			let distance = position.distance(point);
			if distance <= radius && best.is_none_or(|(_, d)| distance < d) {
				best = Some((vertex.id, distance));
			}
		}
		best.map(|(id, _)| id)
	}

	/// Splits the vertices into connected components.
	///
	/// Iterative depth-first search; components and the vertices inside each
	/// are listed in ascending order of their smallest id.
	pub fn split_into_components(&self) -> Vec<Vec<VertexId>> {
		let mut component_of: HashMap<VertexId, usize> = HashMap::with_capacity(self.vertices.len());
		let mut count = 0;

		for &start in self.vertices.keys() {
			if component_of.contains_key(&start) {
				continue;
			}
			component_of.insert(start, count);

			// (vertex, index of the next adjacency record to look at)
			let mut stack: Vec<(VertexId, usize)> = vec![(start, 0)];
			while let Some(top) = stack.last_mut() {
				let (current, next) = *top;
				let records = &self.vertices[&current].edges;
				match records[next..]
					.iter()
					.position(|e| !component_of.contains_key(&e.to))
				{
					Some(offset) => {
						let neighbor = records[next + offset].to;
						top.1 = next + offset + 1;
						component_of.insert(neighbor, count);
						stack.push((neighbor, 0));
					}
					None => {
						stack.pop();
					}
				}
			}
			count += 1;
		}

		let mut components = vec![Vec::new(); count];
		for &id in self.vertices.keys() {
			components[component_of[&id]].push(id);
		}
		components
	}

	/// Smallest non-negative integer not used as a vertex name.
	pub fn make_up_vertex_name(&self) -> String {
		let mut used = vec![false; self.vertices.len()];
		for vertex in self.vertices.values() {
			if let Ok(number) = vertex.name.parse::<usize>() {
				if let Some(slot) = used.get_mut(number) {
					*slot = true;
				}
			}
		}
		used.iter()
			.position(|taken| !taken)
			.unwrap_or(used.len())
			.to_string()
	}

	/// Repaints every vertex colored `old` with `new`. Returns how many changed.
	pub fn replace_vertex_color(&mut self, old: Color, new: Color) -> usize {
		if old == new {
			return 0;
		}

		let mut changed = 0;
		for vertex in self.vertices.values_mut() {
			if vertex.color == old {
				vertex.color = new;
				changed += 1;
			}
		}
		changed
	}

	/// Applies `apply` to both records of an existing edge.
	fn update_edge(
		&mut self,
		from: VertexId,
		to: VertexId,
		mut apply: impl FnMut(&mut OutgoingEdge),
	) -> Result<(), GraphError> {
		self.require_edge(from, to)?;
		for (a, b) in [(from, to), (to, from)] {
			if let Some(record) = self.vertices.get_mut(&a).and_then(|v| v.edge_to_mut(b)) {
				apply(record);
			}
		}
		Ok(())
	}

	fn require(&self, id: VertexId) -> Result<&Vertex, GraphError> {
		self.vertices
			.get(&id)
			.ok_or_else(|| GraphError::NoSuchVertex(Self::id_label(id)))
	}

	fn require_edge(&self, from: VertexId, to: VertexId) -> Result<(), GraphError> {
		let source = self.require(from)?;
		let target = self.require(to)?;
		if source.edge_to(to).is_none() {
			return Err(GraphError::NoSuchEdge(
				source.name.clone(),
				target.name.clone(),
			));
		}
		Ok(())
	}

	fn id_label(id: VertexId) -> String {
		format!("#{id}")
	}
}
