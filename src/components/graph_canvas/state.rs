//! View transform and interaction tracking for the canvas.
//!
//! The graph itself lives in the session; this is only what the canvas needs
//! between two mouse events: pan and zoom, the vertex being dragged, the edge
//! being drawn, and the hover ring fade.

use std::collections::HashMap;

use crate::graph::{Point, VertexId};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Pan and zoom transform: `screen = world * k + (x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to `MIN_ZOOM..=MAX_ZOOM`).
	pub k: f64,
}

/// Tracks an in-progress vertex drag.
#[derive(Clone, Debug)]
pub struct DragState {
	pub vertex: VertexId,
	/// Offset from the pointer to the vertex center, in layout units, so the
	/// vertex does not jump under the pointer.
	pub grab_offset: Point,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// An edge being drawn with shift-drag, from a vertex to the pointer.
#[derive(Clone, Debug)]
pub struct EdgeDraft {
	pub from: VertexId,
	/// Pointer position in layout units.
	pub pointer: Point,
}

/// Hover ring intensity per vertex, eased in and out.
///
/// Exponential smoothing: `value += (target - value) * (1 - e^(-speed * dt))`.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub hovered: Option<VertexId>,
	intensity: HashMap<VertexId, f64>,
}

impl HoverState {
	const FADE_IN_SPEED: f64 = 12.0;
	const FADE_OUT_SPEED: f64 = 6.0;

	pub fn set_hover(&mut self, vertex: Option<VertexId>) {
		self.hovered = vertex;
	}

	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-Self::FADE_IN_SPEED * dt).exp();
		let fade_out = (-Self::FADE_OUT_SPEED * dt).exp();

		if let Some(id) = self.hovered {
			let value = self.intensity.entry(id).or_insert(0.0);
			*value += (1.0 - *value) * fade_in;
		}
		let hovered = self.hovered;
		self.intensity.retain(|id, value| {
			if hovered == Some(*id) {
				return true;
			}
			*value *= fade_out;
			*value > 0.005
		});
	}

	pub fn intensity(&self, id: VertexId) -> f64 {
		self.intensity.get(&id).copied().unwrap_or(0.0)
	}

	/// Vertices with a visible ring.
	pub fn rings(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
		self.intensity.iter().map(|(&id, &value)| (id, value))
	}
}

/// Everything the canvas keeps between frames.
///
/// Created once when the component mounts, then mutated by the event handlers
/// and the animation loop.
#[derive(Clone, Debug)]
pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: Option<DragState>,
	pub pan: PanState,
	pub draft: Option<EdgeDraft>,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	/// Starts with the layout square centered in the canvas.
	pub fn new(width: f64, height: f64) -> Self {
		let mut state = Self {
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: None,
			pan: PanState::default(),
			draft: None,
			hover: HoverState::default(),
			width,
			height,
		};
		state.fit();
		state
	}

	/// Canvas side in pixels: one layout unit at zoom 1.
	pub fn side(&self) -> f64 {
		self.width.min(self.height).max(1.0)
	}

	/// Resets pan and zoom so the layout square fills the canvas.
	pub fn fit(&mut self) {
		let side = self.side();
		self.transform = ViewTransform {
			x: (self.width - side) / 2.0,
			y: (self.height - side) / 2.0,
			k: 1.0,
		};
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn screen_to_layout(&self, sx: f64, sy: f64) -> Point {
		let (wx, wy) = self.screen_to_world(sx, sy);
		let side = self.side();
		Point::new(wx / side, wy / side)
	}

	/// World coordinates of a layout point, for drawing after the transform.
	pub fn layout_to_world(&self, point: Point) -> (f64, f64) {
		let side = self.side();
		(point.x * side, point.y * side)
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn start_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends any drag, pan or edge draft.
	pub fn release(&mut self) {
		self.drag = None;
		self.draft = None;
		self.pan.active = false;
	}

	pub fn tick(&mut self, dt: f64) {
		self.hover.tick(dt);
	}

	/// Keeps the view centered on the same layout point.
	pub fn resize(&mut self, width: f64, height: f64) {
		let center = self.screen_to_layout(self.width / 2.0, self.height / 2.0);
		self.width = width;
		self.height = height;
		let (wx, wy) = self.layout_to_world(center);
		self.transform.x = width / 2.0 - wx * self.transform.k;
		self.transform.y = height / 2.0 - wy * self.transform.k;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Point, b: Point) -> bool {
		a.distance(b) < 1e-9
	}

	#[test]
	fn test_layout_square_is_centered() {
		let state = CanvasState::new(800.0, 600.0);
		assert_eq!(state.side(), 600.0);
		assert!(close(state.screen_to_layout(400.0, 300.0), Point::new(0.5, 0.5)));
		assert!(close(state.screen_to_layout(100.0, 0.0), Point::new(0.0, 0.0)));
	}

	#[test]
	fn test_zoom_keeps_pointer_fixed() {
		let mut state = CanvasState::new(600.0, 600.0);
		let before = state.screen_to_layout(150.0, 420.0);
		state.zoom_at(150.0, 420.0, 1.1);
		state.zoom_at(150.0, 420.0, 1.1);
		assert!(close(state.screen_to_layout(150.0, 420.0), before));

		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 0.5);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn test_pan() {
		let mut state = CanvasState::new(600.0, 600.0);
		state.pan_to(50.0, 50.0);
		assert_eq!(state.transform.x, 0.0);
		state.start_pan(10.0, 10.0);
		state.pan_to(70.0, 40.0);
		assert_eq!((state.transform.x, state.transform.y), (60.0, 30.0));
		state.release();
		assert!(!state.pan.active);
	}

	#[test]
	fn test_resize_keeps_center() {
		let mut state = CanvasState::new(600.0, 600.0);
		state.zoom_at(100.0, 100.0, 2.0);
		let center = state.screen_to_layout(300.0, 300.0);
		state.resize(1000.0, 800.0);
		assert!(close(state.screen_to_layout(500.0, 400.0), center));
	}

	#[test]
	fn test_hover_fades_out() {
		let mut hover = HoverState::default();
		hover.set_hover(Some(3));
		for _ in 0..30 {
			hover.tick(0.016);
		}
		assert!(hover.intensity(3) > 0.9);
		hover.set_hover(None);
		for _ in 0..120 {
			hover.tick(0.016);
		}
		assert_eq!(hover.intensity(3), 0.0);
		assert_eq!(hover.rings().count(), 0);
	}
}
