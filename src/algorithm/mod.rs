//! Minimum spanning tree visualization: Kruskal's algorithm, its color
//! themes, and the history/playback runner.

mod error;
mod kruskal;
mod palette;
mod runner;
mod theme;

pub use error::AlgorithmError;
pub use kruskal::{EdgeState, FinishReason, Kruskal, MAX_VERTICES, SortedEdge};
pub use palette::DistinctColors;
pub use runner::{
	AlgorithmRunner, DEFAULT_INTERVAL, EdgeListEntry, MAX_INTERVAL, MIN_INTERVAL, StepOutcome,
};
pub use theme::{AlgorithmTheme, ThemeColors};
