//! Naive square grid layout.

use serde::{Deserialize, Serialize};

use super::Layout;
use crate::graph::{Graph, Point};

/// Row-major square grid, one connected component after another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
	/// Distance between neighbouring grid cells.
	pub grid_step: f64,
}

impl Default for GridLayout {
	fn default() -> Self {
		Self { grid_step: 0.1 }
	}
}

impl Layout for GridLayout {
	fn position_vertices(&self, graph: &mut Graph) {
		graph.reset_positions();

		let width = ((graph.vertex_count() as f64).sqrt().floor() as usize).max(1);
		let origin = 0.5 - width as f64 * self.grid_step / 2.0;
		let (mut column, mut row) = (0usize, 0usize);

		for component in graph.split_into_components() {
			for id in component {
				graph.place(
					id,
					Point::new(
						origin + column as f64 * self.grid_step,
						origin + row as f64 * self.grid_step,
					),
				);
				column += 1;
				if column >= width {
					column = 0;
					row += 1;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_grid_cells_are_equally_spaced() {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..9)
			.map(|i| graph.add_vertex(&i.to_string(), None).unwrap())
			.collect();
		graph.add_edge(ids[0], ids[8], 1).unwrap();

		let layout = GridLayout { grid_step: 0.2 };
		layout.position_vertices(&mut graph);

		let position = |id| graph.vertex(id).unwrap().position().unwrap();
		// component {0, 8} comes first
		assert!(position(ids[0]).distance(Point::new(0.2, 0.2)) < 1e-12);
		assert!(position(ids[8]).distance(Point::new(0.4, 0.2)) < 1e-12);
		assert!(position(ids[1]).distance(Point::new(0.6, 0.2)) < 1e-12);
		assert!(position(ids[2]).distance(Point::new(0.2, 0.4)) < 1e-12);

		let mut xs: Vec<f64> = graph.vertices().filter_map(|v| v.position()).map(|p| p.x).collect();
		xs.sort_by(f64::total_cmp);
		xs.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
		assert_eq!(xs.len(), 3);
		for pair in xs.windows(2) {
			assert!((pair[1] - pair[0] - 0.2).abs() < 1e-12);
		}
	}

	#[test]
	fn test_grid_rows_share_y() {
		let mut graph = Graph::new();
		for i in 0..5 {
			graph.add_vertex(&i.to_string(), None).unwrap();
		}
		GridLayout::default().position_vertices(&mut graph);
		let positions: Vec<Point> = graph.vertices().filter_map(|v| v.position()).collect();
		assert_eq!(positions.len(), 5);
		// width 2: rows of two, the last row holds the fifth vertex
		assert_eq!(positions[0].y, positions[1].y);
		assert_eq!(positions[2].y, positions[3].y);
		assert_eq!(positions[0].x, positions[2].x);
		assert_eq!(positions[4].x, positions[0].x);
	}
}
