//! kruskal-graph: an undirected weighted graph editor that steps through
//! Kruskal's minimum spanning tree algorithm.
//!
//! The core (graph, layouts, algorithm, history, file formats, commands and
//! the [`Session`] tying them together) is plain Rust and runs anywhere. The
//! [`components`] module adds a Leptos UI on a canvas for the WASM target.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod algorithm;
pub mod color;
pub mod command;
pub mod components;
pub mod console;
pub mod file;
pub mod frame;
pub mod graph;
pub mod layout;
pub mod options;
pub mod session;

pub use components::{Editor, GraphCanvas};
pub use file::GraphData;
pub use options::EditorOptions;
pub use session::Session;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("kruskal-graph: logging initialized");
}

/// Text of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Editor options from `<script id="editor-options">`, if present.
fn load_editor_options() -> EditorOptions {
	let Some(json_text) = script_text("editor-options") else {
		return EditorOptions::default();
	};
	match EditorOptions::from_json(&json_text) {
		Ok(options) => options,
		Err(e) => {
			warn!("kruskal-graph: failed to parse editor options: {}", e);
			EditorOptions::default()
		}
	}
}

/// Initial graph from `<script id="graph-data">`.
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_session(options: EditorOptions) -> Session {
	let Some(json_text) = script_text("graph-data") else {
		return Session::new(options);
	};
	let graph = serde_json::from_str::<GraphData>(&json_text)
		.map_err(file::FileError::from)
		.and_then(|data| data.to_graph());
	match graph {
		Ok(graph) => {
			info!(
				"kruskal-graph: loaded {} vertices, {} edges",
				graph.vertex_count(),
				graph.edge_count()
			);
			Session::with_graph(graph, options)
		}
		Err(e) => {
			warn!("kruskal-graph: failed to load graph data: {}", e);
			Session::new(options)
		}
	}
}

/// Main application component.
/// Loads the initial graph and options from the DOM and mounts the editor.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let session = RwSignal::new(load_session(load_editor_options()));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Kruskal Algorithm Visualizer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Editor session=session />
	}
}
