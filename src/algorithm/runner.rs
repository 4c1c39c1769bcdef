//! Step history and playback around [`Kruskal`].
//!
//! Checkpoint 0 is the state right after initialization; checkpoint `n` the
//! state after `n` successful steps. Moving to a known step is a direct
//! restore, and the live algorithm is only asked for a step when the user is
//! at the newest checkpoint, so it is always in sync with the last one.

use std::time::Duration;

use log::{info, warn};

use super::{AlgorithmError, AlgorithmTheme, EdgeState, Kruskal};
use crate::console::{ConsoleBuffer, ConsoleLine};
use crate::graph::{Graph, GraphColoring};

pub const MIN_INTERVAL: Duration = Duration::from_millis(80);
pub const MAX_INTERVAL: Duration = Duration::from_millis(5000);
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// What a navigation request ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
	/// A new step was computed.
	Advanced,
	/// A previously computed step was restored.
	Restored,
	/// There are no more steps.
	Finished,
	/// Already at the initial state, nothing to undo.
	AtStart,
}

impl StepOutcome {
	/// Message to show the user, if the request could not be carried out.
	pub fn notice(self) -> Option<&'static str> {
		match self {
			StepOutcome::Finished => Some("Algorithm is finished, no more steps can be done"),
			StepOutcome::AtStart => {
				Some("You are in the algorithm initial state, no steps to be undone")
			}
			StepOutcome::Advanced | StepOutcome::Restored => None,
		}
	}
}

#[derive(Clone, Debug)]
struct Checkpoint {
	coloring: GraphColoring,
	console: Vec<ConsoleLine>,
	edge_states: Vec<EdgeState>,
	cursor: usize,
}

/// One row of the edge side panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeListEntry {
	pub from_name: String,
	pub to_name: String,
	pub weight: i64,
	pub state: EdgeState,
}

impl EdgeListEntry {
	pub fn label(&self) -> String {
		let suffix = match self.state {
			EdgeState::Pending => "",
			EdgeState::Skipped => " skipped",
			EdgeState::InTree => " - in MST",
		};
		format!(
			"{} --(weight = {})-- {}{}",
			self.from_name, self.weight, self.to_name, suffix
		)
	}
}

/// Drives a [`Kruskal`] run with full undo/redo and timed playback.
///
/// The graph and the console are passed into every call, like for the
/// algorithm itself. The runner owns no timer: the caller invokes
/// [`AlgorithmRunner::tick`] every [`AlgorithmRunner::interval`] while
/// [`AlgorithmRunner::is_running`] holds.
#[derive(Debug)]
pub struct AlgorithmRunner {
	kruskal: Kruskal,
	history: Vec<Checkpoint>,
	current: usize,
	has_more_steps: bool,
	running: bool,
	interval: Duration,
}

impl AlgorithmRunner {
	/// Initializes the algorithm and records checkpoint 0.
	///
	/// Clears the console. On failure the graph colors are reset.
	pub fn start(
		graph: &mut Graph,
		console: &mut ConsoleBuffer,
		theme: AlgorithmTheme,
		interval: Duration,
	) -> Result<Self, AlgorithmError> {
		let mut kruskal = Kruskal::new(theme);
		if let Err(err) = kruskal.init(graph) {
			warn!("runner: algorithm refused to start: {err}");
			graph.reset_colors();
			return Err(err);
		}

		console.clear();
		let mut runner = Self {
			kruskal,
			history: Vec::new(),
			current: 0,
			has_more_steps: true,
			running: false,
			interval: interval.clamp(MIN_INTERVAL, MAX_INTERVAL),
		};
		runner.push_checkpoint(graph, console);
		Ok(runner)
	}

	/// Restores default colors. Consumes the runner and its history.
	pub fn teardown(self, graph: &mut Graph) {
		info!("runner: teardown after {} checkpoints", self.history.len());
		graph.reset_colors();
	}

	/// Reinitializes with another theme and replays up to the step reached.
	pub fn change_theme(
		&mut self,
		graph: &mut Graph,
		console: &mut ConsoleBuffer,
		theme: AlgorithmTheme,
	) -> Result<(), AlgorithmError> {
		let reached = self.current;
		graph.reset_colors();
		let mut fresh = Self::start(graph, console, theme, self.interval)?;
		while fresh.current < reached && fresh.kruskal.step(graph, console) {
			fresh.push_checkpoint(graph, console);
			fresh.current += 1;
		}
		*self = fresh;
		Ok(())
	}

	pub fn step_forth(&mut self, graph: &mut Graph, console: &mut ConsoleBuffer) -> StepOutcome {
		if self.current + 1 < self.history.len() {
			self.current += 1;
			self.restore(self.current, graph, console);
			return StepOutcome::Restored;
		}

		if !self.kruskal.step(graph, console) {
			self.has_more_steps = false;
			return StepOutcome::Finished;
		}
		self.push_checkpoint(graph, console);
		self.current += 1;
		StepOutcome::Advanced
	}

	pub fn step_back(&mut self, graph: &mut Graph, console: &mut ConsoleBuffer) -> StepOutcome {
		if self.current == 0 {
			return StepOutcome::AtStart;
		}
		self.has_more_steps = true;
		self.current -= 1;
		self.restore(self.current, graph, console);
		StepOutcome::Restored
	}

	pub fn to_beginning(&mut self, graph: &mut Graph, console: &mut ConsoleBuffer) {
		self.pause();
		self.current = 0;
		self.has_more_steps = true;
		self.restore(0, graph, console);
	}

	/// Runs the algorithm to completion, recording every step.
	pub fn to_end(&mut self, graph: &mut Graph, console: &mut ConsoleBuffer) {
		if !self.has_more_steps {
			return;
		}
		self.pause();

		let last = self.history.len() - 1;
		if self.current < last {
			self.current = last;
			self.restore(last, graph, console);
		}
		while self.kruskal.step(graph, console) {
			self.push_checkpoint(graph, console);
			self.current += 1;
		}
		self.has_more_steps = false;
	}

	pub fn run(&mut self) {
		self.running = true;
	}

	pub fn pause(&mut self) {
		self.running = false;
	}

	/// Shortens the interval by a fifth and (re)starts playback.
	pub fn accelerate(&mut self) {
		self.interval = scale_interval(self.interval, 4, 5);
		self.run();
	}

	/// Lengthens the interval by a quarter and (re)starts playback.
	pub fn decelerate(&mut self) {
		self.interval = scale_interval(self.interval, 5, 4);
		self.run();
	}

	/// One playback tick. Does nothing unless running; stops playback once
	/// no steps remain.
	pub fn tick(&mut self, graph: &mut Graph, console: &mut ConsoleBuffer) -> Option<StepOutcome> {
		if !self.running {
			return None;
		}
		let outcome = self.step_forth(graph, console);
		if !self.has_more_steps {
			self.pause();
		}
		Some(outcome)
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn has_more_steps(&self) -> bool {
		self.has_more_steps
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	pub fn current_step(&self) -> usize {
		self.current
	}

	/// Number of recorded checkpoints, the initial state included.
	pub fn history_len(&self) -> usize {
		self.history.len()
	}

	pub fn theme(&self) -> AlgorithmTheme {
		self.kruskal.theme()
	}

	pub fn kruskal(&self) -> &Kruskal {
		&self.kruskal
	}

	/// Side panel rows for the displayed step, in processing order.
	pub fn edge_list(&self, graph: &Graph) -> Vec<EdgeListEntry> {
		let Some(checkpoint) = self.history.get(self.current) else {
			return Vec::new();
		};
		let name = |id| graph.vertex(id).map(|v| v.name().to_string()).unwrap_or_default();
		self.kruskal
			.edges()
			.iter()
			.zip(&checkpoint.edge_states)
			.map(|(edge, &state)| EdgeListEntry {
				from_name: name(edge.from),
				to_name: name(edge.to),
				weight: edge.weight,
				state,
			})
			.collect()
	}

	/// Index of the next candidate edge at the displayed step.
	pub fn cursor(&self) -> usize {
		self.history.get(self.current).map_or(0, |c| c.cursor)
	}

	fn push_checkpoint(&mut self, graph: &Graph, console: &ConsoleBuffer) {
		self.history.push(Checkpoint {
			coloring: GraphColoring::capture(graph),
			console: console.snapshot(),
			edge_states: self.kruskal.edge_states().to_vec(),
			cursor: self.kruskal.cursor(),
		});
	}

	fn restore(&self, index: usize, graph: &mut Graph, console: &mut ConsoleBuffer) {
		let Some(checkpoint) = self.history.get(index) else {
			return;
		};
		if let Err(err) = checkpoint.coloring.apply(graph) {
			warn!("runner: checkpoint {index} does not fit the graph: {err}");
		}
		console.restore(&checkpoint.console);
	}
}

fn scale_interval(interval: Duration, numerator: u64, denominator: u64) -> Duration {
	let millis = interval.as_millis() as u64 * numerator / denominator;
	Duration::from_millis(millis).clamp(MIN_INTERVAL, MAX_INTERVAL)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::VertexId;

	fn path(weights: &[i64]) -> (Graph, Vec<VertexId>) {
		let mut graph = Graph::new();
		let ids: Vec<_> = (0..=weights.len())
			.map(|i| graph.add_vertex(&format!("v{i}"), None).unwrap())
			.collect();
		for (pair, &weight) in ids.windows(2).zip(weights) {
			graph.add_edge(pair[0], pair[1], weight).unwrap();
		}
		(graph, ids)
	}

	fn start(graph: &mut Graph, console: &mut ConsoleBuffer) -> AlgorithmRunner {
		AlgorithmRunner::start(graph, console, AlgorithmTheme::Default, DEFAULT_INTERVAL).unwrap()
	}

	#[test]
	fn test_step_back_restores_identical_state() {
		let (mut graph, _) = path(&[3, 1, 2, 5]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);

		for _ in 0..2 {
			let before = (GraphColoring::capture(&graph), console.clone(), runner.edge_list(&graph));
			assert_eq!(runner.step_forth(&mut graph, &mut console), StepOutcome::Advanced);
			assert_ne!(GraphColoring::capture(&graph), before.0);
			assert_eq!(runner.step_back(&mut graph, &mut console), StepOutcome::Restored);
			assert_eq!(GraphColoring::capture(&graph), before.0);
			assert_eq!(console, before.1);
			assert_eq!(runner.edge_list(&graph), before.2);
			// replay from history, then move on
			assert_eq!(runner.step_forth(&mut graph, &mut console), StepOutcome::Restored);
		}
		assert_eq!(runner.current_step(), 2);
		assert_eq!(runner.history_len(), 3);
	}

	#[test]
	fn test_step_back_at_start_reports_notice() {
		let (mut graph, _) = path(&[1]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);
		let outcome = runner.step_back(&mut graph, &mut console);
		assert_eq!(outcome, StepOutcome::AtStart);
		assert_eq!(
			outcome.notice(),
			Some("You are in the algorithm initial state, no steps to be undone")
		);
	}

	#[test]
	fn test_to_end_and_back_to_beginning() {
		let (mut graph, _) = path(&[4, 2, 7]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);
		let initial = GraphColoring::capture(&graph);

		runner.step_forth(&mut graph, &mut console);
		runner.step_back(&mut graph, &mut console);
		runner.to_end(&mut graph, &mut console);
		assert_eq!(runner.current_step(), 3);
		assert!(!runner.has_more_steps());
		assert_eq!(runner.kruskal().total_weight(), 13);

		let outcome = runner.step_forth(&mut graph, &mut console);
		assert_eq!(outcome, StepOutcome::Finished);
		assert!(outcome.notice().is_some());

		runner.to_beginning(&mut graph, &mut console);
		assert_eq!(runner.current_step(), 0);
		assert!(runner.has_more_steps());
		assert_eq!(GraphColoring::capture(&graph), initial);
		assert!(console.is_empty());
		assert!(runner.edge_list(&graph).iter().all(|e| e.state == EdgeState::Pending));

		// everything is recorded, forth only restores now
		assert_eq!(runner.step_forth(&mut graph, &mut console), StepOutcome::Restored);
	}

	#[test]
	fn test_playback_ticks_until_finished() {
		let (mut graph, _) = path(&[1, 1]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);

		assert_eq!(runner.tick(&mut graph, &mut console), None);
		runner.run();
		assert_eq!(runner.tick(&mut graph, &mut console), Some(StepOutcome::Advanced));
		assert_eq!(runner.tick(&mut graph, &mut console), Some(StepOutcome::Advanced));
		assert!(runner.is_running());
		assert_eq!(runner.tick(&mut graph, &mut console), Some(StepOutcome::Finished));
		assert!(!runner.is_running());
	}

	#[test]
	fn test_interval_is_clamped() {
		let (mut graph, _) = path(&[1]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);

		runner.accelerate();
		assert_eq!(runner.interval(), Duration::from_millis(800));
		assert!(runner.is_running());
		for _ in 0..40 {
			runner.accelerate();
		}
		assert_eq!(runner.interval(), MIN_INTERVAL);
		for _ in 0..40 {
			runner.decelerate();
		}
		assert_eq!(runner.interval(), MAX_INTERVAL);
	}

	#[test]
	fn test_change_theme_replays_to_reached_step() {
		let (mut graph, ids) = path(&[2, 1, 3]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);
		runner.step_forth(&mut graph, &mut console);
		runner.step_forth(&mut graph, &mut console);

		runner
			.change_theme(&mut graph, &mut console, AlgorithmTheme::Blue)
			.unwrap();
		assert_eq!(runner.theme(), AlgorithmTheme::Blue);
		assert_eq!(runner.current_step(), 2);
		let tree_edge = AlgorithmTheme::Blue.colors().tree_edge;
		assert_eq!(graph.edge(ids[1], ids[2]).unwrap().color, tree_edge);
		assert_eq!(graph.edge(ids[0], ids[1]).unwrap().color, tree_edge);
	}

	#[test]
	fn test_failed_start_resets_colors() {
		let mut graph = Graph::new();
		let a = graph.add_vertex("a", None).unwrap();
		graph.add_vertex("b", None).unwrap();
		graph
			.set_vertex_color(a, Some(crate::color::Color::YELLOW))
			.unwrap();
		let mut console = ConsoleBuffer::new();
		let err = AlgorithmRunner::start(
			&mut graph,
			&mut console,
			AlgorithmTheme::Default,
			DEFAULT_INTERVAL,
		)
		.unwrap_err();
		assert_eq!(err, AlgorithmError::TooManyComponents { count: 2 });
		assert_eq!(
			graph.vertex(a).unwrap().color(),
			crate::graph::DEFAULT_VERTEX_COLOR
		);
	}

	#[test]
	fn test_teardown_resets_colors() {
		let (mut graph, _) = path(&[1]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);
		runner.step_forth(&mut graph, &mut console);
		runner.teardown(&mut graph);
		assert!(
			graph
				.vertices()
				.all(|v| v.color() == crate::graph::DEFAULT_VERTEX_COLOR)
		);
	}

	#[test]
	fn test_edge_list_labels() {
		let (mut graph, _) = path(&[1]);
		let mut console = ConsoleBuffer::new();
		let mut runner = start(&mut graph, &mut console);
		assert_eq!(runner.edge_list(&graph)[0].label(), "v0 --(weight = 1)-- v1");
		runner.step_forth(&mut graph, &mut console);
		assert_eq!(runner.edge_list(&graph)[0].label(), "v0 --(weight = 1)-- v1 - in MST");
		assert_eq!(runner.cursor(), 1);
	}
}
