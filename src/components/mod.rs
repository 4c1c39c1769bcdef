//! Web UI components.

mod editor;
pub mod graph_canvas;

pub use editor::Editor;
pub use graph_canvas::GraphCanvas;
