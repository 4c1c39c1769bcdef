//! Canvas rendering of a [`RenderFrame`].
//!
//! Passes, back to front:
//! 1. Background (screen space)
//! 2. Edges in frame order, then the edge draft (world space)
//! 3. Weight labels, vertices, hover rings, vertex names

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::CanvasState;
use super::theme::CanvasTheme;
use crate::frame::{EdgeSprite, RenderFrame, VertexSprite};
use crate::graph::DEFAULT_EDGE_COLOR;
use crate::options::RenderOptions;

/// Renders the complete frame to the canvas.
pub fn render(
	frame: &RenderFrame,
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &CanvasTheme,
	render: &RenderOptions,
) {
	let scale = ScaledValues::new(config, render, state.side(), state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	for edge in &frame.edges {
		draw_edge(state, ctx, &scale, edge);
	}
	draw_draft(frame, state, ctx, &scale, theme);

	if scale.weight_alpha > 0.01 {
		for edge in &frame.edges {
			draw_weight(state, ctx, &scale, theme, edge, render.weight_position);
		}
	}

	for vertex in &frame.vertices {
		draw_vertex(state, ctx, &scale, theme, vertex);
	}
	draw_hover_rings(frame, state, ctx, &scale, theme);
	for vertex in &frame.vertices {
		draw_vertex_name(state, ctx, &scale, theme, vertex);
	}

	ctx.restore();
}

fn draw_background(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &CanvasTheme) {
	let background = &theme.background;
	let gradient = background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&background.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edge(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	edge: &EdgeSprite,
) {
	let (x1, y1) = state.layout_to_world(edge.from_position);
	let (x2, y2) = state.layout_to_world(edge.to_position);

	ctx.set_stroke_style_str(&edge.color.to_css());
	ctx.set_line_width(scale.edge_width);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
}

/// Dashed line from the source vertex to the pointer while shift-dragging.
fn draw_draft(
	frame: &RenderFrame,
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
) {
	let Some(draft) = &state.draft else {
		return;
	};
	let Some(source) = frame.vertices.iter().find(|v| v.id == draft.from) else {
		return;
	};
	let (x1, y1) = state.layout_to_world(source.position);
	let (x2, y2) = state.layout_to_world(draft.pointer);

	ctx.set_stroke_style_str(&theme.draft_edge.to_css());
	ctx.set_line_width(scale.edge_width);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.draft_dash.0),
		&JsValue::from_f64(scale.draft_dash.1),
	));
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_weight(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
	edge: &EdgeSprite,
	weight_position: f64,
) {
	let (x, y) = state.layout_to_world(edge.label_position(weight_position));
	let text = edge.weight.to_string();

	ctx.set_global_alpha(scale.weight_alpha);
	ctx.set_font(&scale.weight_font);
	let width = ctx
		.measure_text(&text)
		.map(|metrics| metrics.width())
		.unwrap_or(scale.weight_font_size * text.len() as f64 * 0.6);
	let (pad, height) = (scale.weight_font_size * 0.2, scale.weight_font_size);

	ctx.set_fill_style_str(&theme.weight.background.to_css());
	ctx.fill_rect(
		x - width / 2.0 - pad,
		y - height / 2.0 - pad,
		width + 2.0 * pad,
		height + 2.0 * pad,
	);

	let text_color = if edge.color == DEFAULT_EDGE_COLOR {
		theme.weight.text_color
	} else {
		edge.color.with_alpha(255)
	};
	ctx.set_fill_style_str(&text_color.to_css());
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&text, x, y);
	ctx.set_global_alpha(1.0);
}

fn draw_vertex(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
	vertex: &VertexSprite,
) {
	let (x, y) = state.layout_to_world(vertex.position);
	let radius = scale.vertex_radius;
	let style = &theme.vertex;

	let gradient = style
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &vertex.color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &vertex.color.to_css());
			let _ = gradient.add_color_stop(1.0, &vertex.color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&vertex.color.to_css()),
	}
	ctx.fill();

	if style.border_width > 0.0 {
		ctx.set_stroke_style_str(&style.border_color.to_css());
		ctx.set_line_width(style.border_width / scale.k);
		ctx.stroke();
	}
}

fn draw_hover_rings(
	frame: &RenderFrame,
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
) {
	for (id, intensity) in state.hover.rings() {
		let Some(vertex) = frame.vertices.iter().find(|v| v.id == id) else {
			continue;
		};
		let (x, y) = state.layout_to_world(vertex.position);
		let alpha = (f64::from(theme.hover_ring.a) * intensity).round() as u8;

		ctx.begin_path();
		let _ = ctx.arc(
			x,
			y,
			scale.vertex_radius + scale.ring_offset,
			0.0,
			2.0 * PI,
		);
		ctx.set_stroke_style_str(&theme.hover_ring.with_alpha(alpha).to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}
}

fn draw_vertex_name(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
	vertex: &VertexSprite,
) {
	if vertex.label.is_empty() {
		return;
	}
	let (x, y) = state.layout_to_world(vertex.position);
	ctx.set_font(&scale.name_font);
	ctx.set_fill_style_str(&theme.vertex.label_color.to_css());
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&vertex.label, x, y);
}
