//! Integration tests driving the editor session the way the UI does.

use kruskal_graph::algorithm::{AlgorithmError, EdgeState, StepOutcome};
use kruskal_graph::console::ERROR_COLOR;
use kruskal_graph::file::GraphFormat;
use kruskal_graph::graph::{DEFAULT_EDGE_COLOR, DEFAULT_VERTEX_COLOR, Point};
use kruskal_graph::options::EditorOptions;
use kruskal_graph::session::{Mode, Session, SessionError};

const SQUARE: [&str; 5] = [
	"add edge a b 1",
	"add edge b c 2",
	"add edge c d 5",
	"add edge d a 3",
	"add edge a c 2",
];

fn square() -> Session {
	let mut session = Session::default();
	for line in SQUARE {
		session.execute_command(line).unwrap();
	}
	session
}

#[test]
fn test_console_session_to_finished_tree() {
	let mut session = square();
	session.start_algorithm().unwrap();
	assert_eq!(session.mode(), Mode::Algorithm);

	session.run().unwrap();
	let mut outcomes = Vec::new();
	while let Some(outcome) = session.tick() {
		outcomes.push(outcome);
	}
	assert_eq!(
		outcomes,
		vec![
			StepOutcome::Advanced,
			StepOutcome::Advanced,
			StepOutcome::Advanced,
			StepOutcome::Finished
		]
	);
	assert_eq!(
		StepOutcome::Finished.notice(),
		Some("Algorithm is finished, no more steps can be done")
	);

	let text = session.console().text();
	assert!(text.contains("Step №3"));
	assert!(text.ends_with("The minimum spanning tree is complete, its weight: 6"));

	let panel: Vec<String> = session.edge_list().iter().map(|e| e.label()).collect();
	assert_eq!(panel[0], "a --(weight = 1)-- b - in MST");
	assert_eq!(
		panel.iter().filter(|label| label.ends_with(" - in MST")).count(),
		3
	);
	assert!(panel.iter().any(|label| label.ends_with(" skipped")));

	let frame = session.frame();
	assert_eq!(frame.vertices.len(), 4);
	assert_eq!(frame.edges.len(), 5);
}

#[test]
fn test_stepping_back_restores_panel_and_console() {
	let mut session = square();
	session.start_algorithm().unwrap();
	session.step_forth().unwrap();
	let after_first = (session.console().clone(), session.edge_list());
	session.step_forth().unwrap();
	assert_eq!(session.step_back().unwrap(), StepOutcome::Restored);
	assert_eq!((session.console().clone(), session.edge_list()), after_first);
	assert_eq!(session.step_back().unwrap(), StepOutcome::Restored);
	assert_eq!(session.step_back().unwrap(), StepOutcome::AtStart);
	assert!(
		session
			.edge_list()
			.iter()
			.all(|entry| entry.state == EdgeState::Pending)
	);
}

#[test]
fn test_leaving_algorithm_mode_restores_editing() {
	let mut session = square();
	session.start_algorithm().unwrap();
	session.to_end().unwrap();

	let err = session.execute_command("delete edge a b").unwrap_err();
	assert!(matches!(err, SessionError::AlgorithmActive));
	assert_eq!(session.console().lines().last().unwrap().color, ERROR_COLOR);

	session.stop_algorithm();
	assert_eq!(session.mode(), Mode::Edit);
	assert!(session.console().is_empty());
	assert!(session.graph().vertices().all(|v| v.color() == DEFAULT_VERTEX_COLOR));
	assert!(session.graph().edges().iter().all(|e| e.color == DEFAULT_EDGE_COLOR));

	session.execute_command("delete edge a b").unwrap();
	assert_eq!(session.graph().edge_count(), 4);
}

#[test]
fn test_gml_round_trip_between_sessions() {
	let mut session = square();
	session.execute_command("add vertex e 0.9 0.1").unwrap();
	session.execute_command("add edge e a -4").unwrap();
	let text = session.save_text(GraphFormat::Gml).unwrap();

	let mut other = Session::default();
	other.load_text(GraphFormat::Gml, &text).unwrap();
	assert_eq!(other.graph().vertex_count(), 5);
	assert_eq!(other.graph().edge_count(), 6);

	let e = other.graph().id_of("e").unwrap();
	let a = other.graph().id_of("a").unwrap();
	assert_eq!(other.graph().edge(e, a).unwrap().weight, -4);
	for vertex in session.graph().vertices() {
		let copy = other.graph().vertex_by_name(vertex.name()).unwrap();
		let (p, q) = (vertex.position().unwrap(), copy.position().unwrap());
		assert!(p.distance(q) < 1e-5);
	}
}

#[test]
fn test_tgf_load_then_disconnected_start_fails() {
	let mut session = Session::default();
	session
		.load_text(GraphFormat::Tgf, "1 One\n2 Two\n3 Three\n#\n1 2 4\n")
		.unwrap();
	assert!(session.graph().vertices().all(|v| v.position().is_some()));

	let err = session.start_algorithm().unwrap_err();
	assert!(matches!(
		err,
		SessionError::Algorithm(AlgorithmError::TooManyComponents { count: 2 })
	));
	assert_eq!(session.mode(), Mode::Edit);
	assert!(session.graph().vertices().all(|v| v.color() == DEFAULT_VERTEX_COLOR));
}

#[test]
fn test_options_choose_the_layout() {
	let options = EditorOptions::from_json(r#"{ "layout": { "type": "grid", "grid_step": 0.2 } }"#).unwrap();
	let mut session = Session::new(options);
	for name in ["p", "q", "r", "s"] {
		session.execute_command(&format!("add vertex {name}")).unwrap();
	}
	// 2 x 2 grid centered on the canvas
	let positions: Vec<Point> = session
		.graph()
		.vertices()
		.filter_map(|v| v.position())
		.collect();
	assert_eq!(positions.len(), 4);
	for position in positions {
		let (dx, dy) = ((position.x - 0.5).abs(), (position.y - 0.5).abs());
		assert!(dx < 0.2 + 1e-9 && dy < 0.2 + 1e-9, "{position:?}");
	}
}

#[test]
fn test_canvas_helpers() {
	let mut session = Session::default();
	let id = session.add_vertex_at(Point::new(0.2, 0.3)).unwrap();
	assert_eq!(session.vertex_at(Point::new(0.21, 0.3)), Some(id));
	assert_eq!(session.vertex_at(Point::new(0.6, 0.6)), None);
	session.move_vertex(id, Point::new(0.6, 0.6)).unwrap();
	assert_eq!(session.vertex_at(Point::new(0.6, 0.6)), Some(id));
	assert_eq!(session.graph().vertex(id).unwrap().name(), "0");
}

#[test]
fn test_largest_weights_from_the_console_finish_the_tree() {
	let mut session = Session::default();
	session.execute_command("add edge a b 9223372036854775807").unwrap();
	session.execute_command("add edge b c 9223372036854775807").unwrap();
	session.start_algorithm().unwrap();
	session.to_end().unwrap();

	let total = session.runner().unwrap().kruskal().total_weight();
	assert_eq!(total, 18446744073709551614);
	assert!(
		session
			.console()
			.text()
			.ends_with("The minimum spanning tree is complete, its weight: 18446744073709551614")
	);
}
