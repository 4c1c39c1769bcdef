//! The editor state: one graph, one console, the options, and the algorithm
//! runner while algorithm mode is on.
//!
//! In algorithm mode the graph's structure is frozen (the runner's
//! checkpoints depend on it); vertices can still be moved around.

use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::algorithm::{AlgorithmError, AlgorithmRunner, AlgorithmTheme, EdgeListEntry, StepOutcome};
use crate::color::Color;
use crate::command::{Command, CommandError, HELP};
use crate::console::{Console, ConsoleBuffer, ERROR_COLOR, INFO_COLOR};
use crate::file::{self, FileError, GraphFormat, LoadedGraph};
use crate::frame::RenderFrame;
use crate::graph::{Graph, GraphError, Point, TEXT_COLOR, VertexId};
use crate::layout::{Layout, LayoutKind};
use crate::options::{EditorOptions, RenderOptions};

/// Color of non-fatal file warnings.
const WARNING_COLOR: Color = Color::rgb(176, 128, 0);

#[derive(Error, Debug)]
pub enum SessionError {
	#[error("The graph can not be changed while the algorithm is running")]
	AlgorithmActive,

	#[error("The algorithm is not running")]
	AlgorithmInactive,

	#[error(transparent)]
	Graph(#[from] GraphError),

	#[error(transparent)]
	Algorithm(#[from] AlgorithmError),

	#[error(transparent)]
	File(#[from] FileError),

	#[error(transparent)]
	Command(#[from] CommandError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	Edit,
	Algorithm,
}

#[derive(Debug, Default)]
pub struct Session {
	graph: Graph,
	console: ConsoleBuffer,
	options: EditorOptions,
	runner: Option<AlgorithmRunner>,
}

impl Session {
	pub fn new(options: EditorOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	/// Starts from an existing graph, laying it out if some vertex is unplaced.
	pub fn with_graph(graph: Graph, options: EditorOptions) -> Self {
		let mut session = Self::new(options);
		session.graph = graph;
		if session.graph.vertices().any(|v| v.position().is_none()) {
			session.reposition();
		}
		session
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn console(&self) -> &ConsoleBuffer {
		&self.console
	}

	pub fn options(&self) -> &EditorOptions {
		&self.options
	}

	pub fn render_options(&self) -> &RenderOptions {
		&self.options.render
	}

	pub fn mode(&self) -> Mode {
		if self.runner.is_some() {
			Mode::Algorithm
		} else {
			Mode::Edit
		}
	}

	pub fn runner(&self) -> Option<&AlgorithmRunner> {
		self.runner.as_ref()
	}

	/// Prints to the console.
	pub fn println(&mut self, text: &str, color: Color) {
		self.console.println(text, color);
	}

	pub fn clear_console(&mut self) {
		self.console.clear();
	}

	fn ensure_editable(&self) -> Result<(), SessionError> {
		if self.runner.is_some() {
			return Err(SessionError::AlgorithmActive);
		}
		Ok(())
	}

	/// Adds a vertex; a name is made up if none is given, and the graph is
	/// laid out again if no position is given.
	pub fn add_vertex(
		&mut self,
		name: Option<&str>,
		position: Option<Point>,
	) -> Result<VertexId, SessionError> {
		self.ensure_editable()?;
		let name = name.map_or_else(|| self.graph.make_up_vertex_name(), str::to_string);
		let id = self.graph.add_vertex(&name, position)?;
		if position.is_none() {
			self.reposition();
		}
		Ok(id)
	}

	/// Adds a vertex with a made-up name where the user clicked.
	pub fn add_vertex_at(&mut self, point: Point) -> Result<VertexId, SessionError> {
		self.add_vertex(None, Some(point))
	}

	pub fn remove_vertex(&mut self, id: VertexId) -> Result<(), SessionError> {
		self.ensure_editable()?;
		Ok(self.graph.remove_vertex(id)?)
	}

	pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: i64) -> Result<(), SessionError> {
		self.ensure_editable()?;
		Ok(self.graph.add_edge(from, to, weight)?)
	}

	pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<(), SessionError> {
		self.ensure_editable()?;
		Ok(self.graph.remove_edge(from, to)?)
	}

	pub fn rename_vertex(&mut self, id: VertexId, name: &str) -> Result<(), SessionError> {
		self.ensure_editable()?;
		Ok(self.graph.rename_vertex(id, name)?)
	}

	pub fn set_edge_weight(
		&mut self,
		from: VertexId,
		to: VertexId,
		weight: i64,
	) -> Result<(), SessionError> {
		self.ensure_editable()?;
		Ok(self.graph.set_edge_weight(from, to, weight)?)
	}

	pub fn clear_graph(&mut self) -> Result<(), SessionError> {
		self.ensure_editable()?;
		self.graph = Graph::new();
		Ok(())
	}

	/// Moving vertices is allowed in both modes.
	pub fn move_vertex(&mut self, id: VertexId, position: Point) -> Result<(), SessionError> {
		Ok(self.graph.set_vertex_position(id, Some(position))?)
	}

	/// The vertex under `point`, within the vertex radius.
	pub fn vertex_at(&self, point: Point) -> Option<VertexId> {
		self.graph.vertex_at(point, self.options.render.vertex_size)
	}

	/// Lays the graph out with the configured layout.
	pub fn reposition(&mut self) {
		self.options.layout.position_vertices(&mut self.graph);
	}

	pub fn set_layout(&mut self, layout: LayoutKind) {
		info!("session: switching to {}", layout.name());
		self.options.layout = layout;
		self.reposition();
	}

	pub fn set_render_options(&mut self, render: RenderOptions) {
		self.options.render = render.clamped();
	}

	pub fn start_algorithm(&mut self) -> Result<(), SessionError> {
		if self.runner.is_some() {
			return Ok(());
		}
		let runner = AlgorithmRunner::start(
			&mut self.graph,
			&mut self.console,
			self.options.algorithm.theme,
			self.options.algorithm.step_interval(),
		)?;
		self.runner = Some(runner);
		info!("session: algorithm mode");
		Ok(())
	}

	/// Back to edit mode: history dropped, colors and console reset.
	pub fn stop_algorithm(&mut self) {
		if let Some(runner) = self.runner.take() {
			runner.teardown(&mut self.graph);
			self.console.clear();
			info!("session: edit mode");
		}
	}

	/// Changes the theme, restarting a running algorithm at the same step.
	pub fn set_theme(&mut self, theme: AlgorithmTheme) -> Result<(), SessionError> {
		self.options.algorithm.theme = theme;
		if let Some(runner) = self.runner.as_mut() {
			runner.change_theme(&mut self.graph, &mut self.console, theme)?;
		}
		Ok(())
	}

	fn with_runner<T>(
		&mut self,
		action: impl FnOnce(&mut AlgorithmRunner, &mut Graph, &mut ConsoleBuffer) -> T,
	) -> Result<T, SessionError> {
		let runner = self.runner.as_mut().ok_or(SessionError::AlgorithmInactive)?;
		Ok(action(runner, &mut self.graph, &mut self.console))
	}

	pub fn step_forth(&mut self) -> Result<StepOutcome, SessionError> {
		self.with_runner(|runner, graph, console| runner.step_forth(graph, console))
	}

	pub fn step_back(&mut self) -> Result<StepOutcome, SessionError> {
		self.with_runner(|runner, graph, console| runner.step_back(graph, console))
	}

	pub fn to_beginning(&mut self) -> Result<(), SessionError> {
		self.with_runner(|runner, graph, console| runner.to_beginning(graph, console))
	}

	pub fn to_end(&mut self) -> Result<(), SessionError> {
		self.with_runner(|runner, graph, console| runner.to_end(graph, console))
	}

	pub fn run(&mut self) -> Result<(), SessionError> {
		self.with_runner(|runner, _, _| runner.run())
	}

	pub fn pause(&mut self) -> Result<(), SessionError> {
		self.with_runner(|runner, _, _| runner.pause())
	}

	pub fn accelerate(&mut self) -> Result<(), SessionError> {
		self.with_runner(|runner, _, _| runner.accelerate())
	}

	pub fn decelerate(&mut self) -> Result<(), SessionError> {
		self.with_runner(|runner, _, _| runner.decelerate())
	}

	/// Timer callback: one playback step if the algorithm is playing.
	pub fn tick(&mut self) -> Option<StepOutcome> {
		let runner = self.runner.as_mut()?;
		runner.tick(&mut self.graph, &mut self.console)
	}

	pub fn is_running(&self) -> bool {
		self.runner.as_ref().is_some_and(AlgorithmRunner::is_running)
	}

	pub fn playback_interval(&self) -> Duration {
		self.runner
			.as_ref()
			.map_or_else(|| self.options.algorithm.step_interval(), AlgorithmRunner::interval)
	}

	/// Side panel rows; empty in edit mode.
	pub fn edge_list(&self) -> Vec<EdgeListEntry> {
		self.runner
			.as_ref()
			.map(|runner| runner.edge_list(&self.graph))
			.unwrap_or_default()
	}

	pub fn edge_cursor(&self) -> Option<usize> {
		self.runner.as_ref().map(AlgorithmRunner::cursor)
	}

	pub fn frame(&self) -> RenderFrame {
		let theme = self
			.runner
			.as_ref()
			.map_or(self.options.algorithm.theme, AlgorithmRunner::theme);
		RenderFrame::capture(&self.graph, theme.colors().skipped_edge)
	}

	/// Replaces the graph with one read from `text`.
	pub fn load_text(&mut self, format: GraphFormat, text: &str) -> Result<(), SessionError> {
		self.ensure_editable()?;
		let loaded = file::load(format, text, &self.options.render)?;
		self.install(loaded);
		Ok(())
	}

	pub fn save_text(&self, format: GraphFormat) -> Result<String, SessionError> {
		Ok(file::save(format, &self.graph, &self.options.render)?)
	}

	pub fn load_path(&mut self, path: &Path) -> Result<(), SessionError> {
		self.ensure_editable()?;
		let loaded = file::load_path(path, &self.options.render)?;
		self.install(loaded);
		Ok(())
	}

	pub fn save_path(&self, path: &Path) -> Result<(), SessionError> {
		Ok(file::save_path(path, &self.graph, &self.options.render)?)
	}

	fn install(&mut self, loaded: LoadedGraph) {
		let needs_layout = loaded.needs_layout();
		for note in &loaded.notes {
			self.console.println(note, INFO_COLOR);
		}
		for warning in &loaded.warnings {
			self.console.println(warning, WARNING_COLOR);
		}
		if let Some(render) = loaded.render {
			self.options.render = render;
		}
		self.graph = loaded.graph;
		if needs_layout {
			self.reposition();
		}
	}

	/// Runs one console line. Feedback and errors go to the console; the
	/// error is returned as well.
	pub fn execute_command(&mut self, line: &str) -> Result<(), SessionError> {
		let result = self.try_execute(line);
		if let Err(err) = &result {
			warn!("session: command {line:?} failed: {err}");
			self.console.println(&err.to_string(), ERROR_COLOR);
		}
		result
	}

	fn try_execute(&mut self, line: &str) -> Result<(), SessionError> {
		let Some(command) = Command::parse(line)? else {
			return Ok(());
		};
		self.console.println(line.trim(), TEXT_COLOR);
		if command.edits_graph() {
			self.ensure_editable()?;
		}

		match command {
			Command::Help => self.console.println(HELP, INFO_COLOR),
			Command::AddVertex { name, position } => {
				self.add_vertex(name.as_deref(), position)?;
			}
			Command::AddEdge { from, to, weight } => {
				if from == to {
					return Err(GraphError::SelfLoop(from).into());
				}
				let (from_id, to_id) = (self.graph.id_of(&from).ok(), self.graph.id_of(&to).ok());
				if let (Some(a), Some(b)) = (from_id, to_id) {
					self.graph.add_edge(a, b, weight)?;
				} else {
					let a = match from_id {
						Some(id) => id,
						None => self.graph.add_vertex(&from, None)?,
					};
					let b = match to_id {
						Some(id) => id,
						None => self.graph.add_vertex(&to, None)?,
					};
					self.graph.add_edge(a, b, weight)?;
					self.reposition();
				}
			}
			Command::DeleteVertex(name) => {
				let id = self.graph.id_of(&name)?;
				self.graph.remove_vertex(id)?;
			}
			Command::DeleteEdge(from, to) => {
				let (a, b) = (self.graph.id_of(&from)?, self.graph.id_of(&to)?);
				self.graph.remove_edge(a, b)?;
			}
			Command::Rename { from, to } => {
				let id = self.graph.id_of(&from)?;
				self.graph.rename_vertex(id, &to)?;
			}
			Command::Weight { from, to, weight } => {
				let (a, b) = (self.graph.id_of(&from)?, self.graph.id_of(&to)?);
				self.graph.set_edge_weight(a, b, weight)?;
			}
			Command::ClearConsole => self.console.clear(),
			Command::ClearGraph => self.graph = Graph::new(),
			Command::Position => self.reposition(),
		}
		Ok(())
	}
}
