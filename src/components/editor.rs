//! The editor shell around the canvas: toolbar, console, command line, edge
//! panel and a plain-text import/export box.
//!
//! Every control goes through the [`Session`]; the components only keep what
//! is being typed and the status line.

use std::mem::discriminant;

use leptos::prelude::*;
use log::warn;
use web_sys::{Event, KeyboardEvent};

use super::graph_canvas::GraphCanvas;
use crate::algorithm::{AlgorithmTheme, StepOutcome};
use crate::file::GraphFormat;
use crate::layout::LayoutKind;
use crate::session::{Mode, Session, SessionError};

const FORMATS: [GraphFormat; 3] = [GraphFormat::Gml, GraphFormat::Tgf, GraphFormat::Json];

/// Graph editor with the Kruskal visualization controls.
#[component]
pub fn Editor(session: RwSignal<Session>) -> impl IntoView {
	let status = RwSignal::new(None::<String>);
	let command = RwSignal::new(String::new());
	let file_text = RwSignal::new(String::new());
	let file_format = RwSignal::new(GraphFormat::Gml);

	let in_algorithm = Memo::new(move |_| session.with(|s| s.mode() == Mode::Algorithm));
	let playback = Memo::new(move |_| {
		session.with(|s| s.is_running().then(|| s.playback_interval()))
	});

	// Auto-play: one tick per interval while playing, re-armed on every
	// interval change.
	let interval_handle = StoredValue::new(None::<IntervalHandle>);
	Effect::new(move |_| {
		let playback = playback.get();
		if let Some(handle) = interval_handle.get_value() {
			handle.clear();
		}
		interval_handle.set_value(None);
		let Some(interval) = playback else {
			return;
		};
		let tick = move || {
			session.update(|s| {
				if let Some(outcome) = s.tick() {
					status.set(outcome.notice().map(str::to_string));
				}
			});
		};
		match set_interval_with_handle(tick, interval) {
			Ok(handle) => interval_handle.set_value(Some(handle)),
			Err(err) => warn!("editor: could not start playback: {err:?}"),
		}
	});
	on_cleanup(move || {
		if let Some(handle) = interval_handle.try_get_value().flatten() {
			handle.clear();
		}
	});

	let navigate = move |step: fn(&mut Session) -> Result<StepOutcome, SessionError>| {
		session.update(|s| {
			status.set(match step(s) {
				Ok(outcome) => outcome.notice().map(str::to_string),
				Err(err) => Some(err.to_string()),
			});
		});
	};
	let control = move |action: fn(&mut Session) -> Result<(), SessionError>| {
		session.update(|s| status.set(action(s).err().map(|err| err.to_string())));
	};

	let toggle_algorithm = move |_| {
		session.update(|s| {
			if s.mode() == Mode::Algorithm {
				s.stop_algorithm();
				status.set(None);
			} else {
				status.set(s.start_algorithm().err().map(|err| err.to_string()));
			}
		});
	};
	let toggle_playback = move |_| {
		if session.with_untracked(Session::is_running) {
			control(Session::pause);
		} else {
			control(Session::run);
		}
	};

	let select_layout = move |ev: Event| {
		let name = event_target_value(&ev);
		let Some(layout) = LayoutKind::all().into_iter().find(|l| l.name() == name) else {
			return;
		};
		session.update(|s| {
			// keep configured parameters when the kind does not change
			if discriminant(&s.options().layout) == discriminant(&layout) {
				s.reposition();
			} else {
				s.set_layout(layout);
			}
		});
	};
	let select_theme = move |ev: Event| {
		let name = event_target_value(&ev);
		if let Some(theme) = AlgorithmTheme::ALL.into_iter().find(|t| t.name() == name) {
			session.update(|s| status.set(s.set_theme(theme).err().map(|err| err.to_string())));
		}
	};
	let select_format = move |ev: Event| {
		if let Ok(format) = GraphFormat::from_extension(&event_target_value(&ev)) {
			file_format.set(format);
		}
	};

	let run_command = move |ev: KeyboardEvent| {
		if ev.key() != "Enter" {
			return;
		}
		let line = command.get_untracked();
		command.set(String::new());
		session.update(|s| {
			// the console shows the outcome
			let _ = s.execute_command(&line);
		});
	};

	let load_file = move |_| {
		let (format, text) = (file_format.get_untracked(), file_text.get_untracked());
		session.update(|s| status.set(s.load_text(format, &text).err().map(|err| err.to_string())));
	};
	let save_file = move |_| {
		match session.with_untracked(|s| s.save_text(file_format.get_untracked())) {
			Ok(text) => {
				file_text.set(text);
				status.set(None);
			}
			Err(err) => status.set(Some(err.to_string())),
		}
	};

	let layout_options = LayoutKind::all()
		.into_iter()
		.map(|layout| {
			let name = layout.name();
			let selected = move || session.with(|s| s.options().layout.name() == name);
			view! { <option value=name selected=selected>{name}</option> }
		})
		.collect_view();
	let theme_options = AlgorithmTheme::ALL
		.into_iter()
		.map(|theme| {
			let name = theme.name();
			let selected = move || session.with(|s| s.options().algorithm.theme == theme);
			view! { <option value=name selected=selected>{name}</option> }
		})
		.collect_view();
	let format_options = FORMATS
		.into_iter()
		.map(|format| {
			let extension = format.extension();
			view! { <option value=extension>{extension.to_uppercase()}</option> }
		})
		.collect_view();

	view! {
		<div class="editor">
			<div class="toolbar">
				<select on:change=select_layout disabled=move || in_algorithm.get()>
					{layout_options}
				</select>
				<button on:click=move |_| session.update(Session::reposition)>"Position"</button>
				<select on:change=select_theme>{theme_options}</select>
				<button on:click=toggle_algorithm>
					{move || if in_algorithm.get() { "Edit graph" } else { "Start Kruskal" }}
				</button>
				<span class="algorithm-controls" class:hidden=move || !in_algorithm.get()>
					<button on:click=move |_| control(Session::to_beginning)>"|<"</button>
					<button on:click=move |_| navigate(Session::step_back)>"<"</button>
					<button on:click=toggle_playback>
						{move || if playback.get().is_some() { "Pause" } else { "Run" }}
					</button>
					<button on:click=move |_| navigate(Session::step_forth)>">"</button>
					<button on:click=move |_| control(Session::to_end)>">|"</button>
					<button on:click=move |_| control(Session::decelerate)>"Slower"</button>
					<button on:click=move |_| control(Session::accelerate)>"Faster"</button>
					<span class="interval">
						{move || session.with(|s| format!("{} ms", s.playback_interval().as_millis()))}
					</span>
					<span class="step">
						{move || {
							session.with(|s| s.runner().map(|r| format!("Step {}", r.current_step())))
						}}
					</span>
				</span>
			</div>

			<div class="workspace">
				<div class="canvas-pane">
					<GraphCanvas session=session />
				</div>
				<ol class="edge-panel" class:hidden=move || !in_algorithm.get()>
					{move || {
						session.with(|s| {
							let cursor = s.edge_cursor();
							s.edge_list()
								.into_iter()
								.enumerate()
								.map(|(index, entry)| {
									let class = if Some(index) == cursor { "edge current" } else { "edge" };
									view! { <li class=class>{entry.label()}</li> }
								})
								.collect_view()
						})
					}}
				</ol>
			</div>

			<p class="status">{move || status.get()}</p>

			<div class="console">
				{move || {
					session.with(|s| {
						s.console()
							.lines()
							.iter()
							.map(|line| {
								let style = format!("color: {}", line.color.to_css());
								view! { <div class="console-line" style=style>{line.text.clone()}</div> }
							})
							.collect_view()
					})
				}}
			</div>
			<input
				type="text"
				class="command-line"
				placeholder="Type help to get available commands"
				prop:value=move || command.get()
				on:input=move |ev| command.set(event_target_value(&ev))
				on:keydown=run_command
			/>

			<div class="file-box">
				<select on:change=select_format>{format_options}</select>
				<button on:click=load_file disabled=move || in_algorithm.get()>"Load"</button>
				<button on:click=save_file>"Save"</button>
				<textarea
					prop:value=move || file_text.get()
					on:input=move |ev| file_text.set(event_target_value(&ev))
				/>
			</div>
		</div>
	}
}
