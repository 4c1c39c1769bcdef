//! Interactive canvas for the graph editor.
//!
//! Draws the session's graph with:
//! - Pan and zoom
//! - Vertex dragging in both modes
//! - Double-click and shift-drag editing in edit mode
//! - A fading hover ring
//!
//! # Example
//!
//! ```ignore
//! use kruskal_graph::components::GraphCanvas;
//! use kruskal_graph::session::Session;
//!
//! let session = RwSignal::new(Session::default());
//! view! { <GraphCanvas session=session fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
pub mod state;
pub mod theme;

pub use component::GraphCanvas;
pub use theme::CanvasTheme;
