//! Leptos component drawing the session's graph on a canvas.
//!
//! The component creates an HTML canvas element and wires up mouse and wheel
//! handlers for vertex dragging, edge drawing, panning and zooming. An
//! animation loop runs via `requestAnimationFrame`, capturing a
//! [`RenderFrame`](crate::frame::RenderFrame) from the session and drawing it
//! each frame.
//!
//! | Gesture                       | Edit mode            | Algorithm mode |
//! |-------------------------------|----------------------|----------------|
//! | drag a vertex                 | move it              | move it        |
//! | drag the background           | pan                  | pan            |
//! | wheel                         | zoom                 | zoom           |
//! | double-click a vertex         | delete it            | -              |
//! | double-click the background   | add a vertex there   | -              |
//! | shift-drag vertex to vertex   | add an edge          | -              |

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::{CanvasState, DragState, EdgeDraft};
use super::theme::CanvasTheme;
use crate::console::ERROR_COLOR;
use crate::session::{Mode, Session, SessionError};

/// Bundles view state with visual configuration.
struct CanvasContext {
	state: CanvasState,
	scale: ScaleConfig,
	theme: CanvasTheme,
}

/// Prints a failed canvas edit to the session console.
fn report<T>(session: &mut Session, result: Result<T, SessionError>) {
	if let Err(err) = result {
		warn!("graph-canvas: {err}");
		session.println(&err.to_string(), ERROR_COLOR);
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas.
fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the session's graph on a canvas element and edits it with the mouse.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize automatically with the
/// window. Explicit `width`/`height` override automatic sizing.
#[component]
pub fn GraphCanvas(
	session: RwSignal<Session>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("graph-canvas: no 2d context");
			return;
		};
		info!("graph-canvas: mounted at {w}x{h}");

		*context_init.borrow_mut() = Some(CanvasContext {
			state: CanvasState::new(w, h),
			scale: ScaleConfig::default(),
			theme: CanvasTheme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// gone once the component is disposed; stop the loop
			let Some((frame, render_options)) = session
				.try_with_untracked(|s| (s.frame(), s.render_options().clone()))
			else {
				return;
			};
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				render::render(&frame, &c.state, &ctx, &c.scale, &c.theme, &render_options);
			}
			if let (Some(cb), Some(window)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let point = c.state.screen_to_layout(x, y);
			let (hit, editing) = session.with_untracked(|s| (s.vertex_at(point), s.mode() == Mode::Edit));

			match hit {
				Some(id) if ev.shift_key() && editing => {
					c.state.draft = Some(EdgeDraft {
						from: id,
						pointer: point,
					});
				}
				Some(id) => {
					let position = session
						.with_untracked(|s| s.graph().vertex(id).and_then(|v| v.position()))
						.unwrap_or(point);
					c.state.drag = Some(DragState {
						vertex: id,
						grab_offset: position - point,
					});
				}
				None => c.state.start_pan(x, y),
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let point = c.state.screen_to_layout(x, y);

			if let Some(drag) = &c.state.drag {
				let target = point + drag.grab_offset;
				let vertex = drag.vertex;
				// positions are read every frame, nothing else needs to know
				session.update_untracked(|s| {
					let _ = s.move_vertex(vertex, target);
				});
			} else if let Some(draft) = &mut c.state.draft {
				draft.pointer = point;
			} else {
				c.state.pan_to(x, y);
			}

			if c.state.drag.is_none() && !c.state.pan.active {
				let hovered = session.with_untracked(|s| s.vertex_at(point));
				c.state.hover.set_hover(hovered);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let position = pointer(canvas_ref, &ev);
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if let (Some(draft), Some((x, y))) = (c.state.draft.take(), position) {
				let point = c.state.screen_to_layout(x, y);
				session.update(|s| {
					if let Some(to) = s.vertex_at(point).filter(|&to| to != draft.from) {
						let result = s.add_edge(draft.from, to, 1);
						report(s, result);
					}
				});
			}
			c.state.release();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.release();
			c.state.hover.set_hover(None);
		}
	};

	let context_dc = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let Some(point) = context_dc
			.borrow()
			.as_ref()
			.map(|c| c.state.screen_to_layout(x, y))
		else {
			return;
		};
		if session.with_untracked(|s| s.mode()) != Mode::Edit {
			return;
		}
		session.update(|s| {
			let result = match s.vertex_at(point) {
				Some(id) => s.remove_vertex(id),
				None => s.add_vertex_at(point).map(|_| ()),
			};
			report(s, result);
		});
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: crosshair;"
		/>
	}
}
