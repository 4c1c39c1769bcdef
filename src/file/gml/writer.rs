use std::fmt::Write;

use crate::graph::Graph;
use crate::options::RenderOptions;

pub(super) const CREATOR: &str = "Kruskal algorithm visualizer";

/// Always has a decimal point, so it reads back as a real number.
fn real(value: f64) -> String {
	if !value.is_finite() {
		return "0.0".into();
	}
	let mut text = format!("{value:.6}");
	while text.ends_with('0') {
		text.pop();
	}
	if text.ends_with('.') {
		text.push('0');
	}
	text
}

/// GML has no escapes inside strings.
fn quoted(text: &str) -> String {
	format!("\"{}\"", text.replace('"', "'"))
}

pub(super) fn write(graph: &Graph, render: &RenderOptions) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "Creator {}", quoted(CREATOR));
	out.push_str("graph [\n");
	out.push_str("\tlabel \"Graph\"\n");
	out.push_str("\tdirected -1\n");
	let _ = writeln!(out, "\tvertexsize {}", real(render.vertex_size));
	let _ = writeln!(out, "\tedgewidth {}", real(render.edge_width));
	let _ = writeln!(out, "\tvertexfontsize {}", real(render.vertex_name_font_size));
	let _ = writeln!(out, "\tweightfontsize {}", real(render.weight_font_size));
	let _ = writeln!(out, "\tweightposition {}", real(render.weight_position));

	for vertex in graph.vertices() {
		out.push_str("\tnode [\n");
		let _ = writeln!(out, "\t\tid {}", vertex.id());
		let _ = writeln!(out, "\t\tlabel {}", quoted(vertex.name()));
		out.push_str("\t\tgraphics [\n");
		let _ = writeln!(out, "\t\t\tfill {}", quoted(&vertex.color().to_hex_rgba()));
		if let Some(position) = vertex.position() {
			let _ = writeln!(out, "\t\t\tx {}", real(position.x));
			let _ = writeln!(out, "\t\t\ty {}", real(position.y));
		}
		out.push_str("\t\t]\n");
		out.push_str("\t]\n");
	}

	for edge in graph.edges() {
		out.push_str("\tedge [\n");
		let _ = writeln!(out, "\t\tsource {}", edge.from);
		let _ = writeln!(out, "\t\ttarget {}", edge.to);
		let _ = writeln!(out, "\t\tlabel \"{}\"", edge.weight);
		out.push_str("\t\tgraphics [\n");
		let _ = writeln!(out, "\t\t\tfill {}", quoted(&edge.color.to_hex_rgba()));
		out.push_str("\t\t]\n");
		out.push_str("\t]\n");
	}

	out.push_str("]\n");
	out
}
