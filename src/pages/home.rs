use leptos::prelude::*;
use log::warn;

use crate::analysis::analyze;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::metrics_panel::MetricsPanel;
use crate::dataset::{GraphData, TOPICS, Topic};

/// Snapshot bundled with the app, in the same shape the crawler backend serves.
const SAMPLE_GRAPH: &str = include_str!("../../assets/sample_graph.json");

/// Canvas plus metrics for one dataset, with a topic filter that swaps the
/// dataset in place.
#[component]
fn Audit(data: GraphData) -> impl IntoView {
	let (topic, set_topic) = signal(None::<Topic>);
	let analysis = Memo::new(move |_| analyze(&data.filter_topic(topic.get())));
	let graph = Signal::derive(move || analysis.with(|a| a.graph.clone()));
	let metrics = Signal::derive(move || analysis.with(|a| a.metrics.clone()));

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph fullscreen=true />
			<div class="graph-overlay">
				<h1>"Recommendation Visibility Audit"</h1>
				<p class="subtitle">"Hover a channel to trace its recommendations. Drag to pin it."</p>
				<select
					class="topic-filter"
					on:change=move |ev| set_topic.set(Topic::parse(&event_target_value(&ev)))
				>
					<option value="">"All topics"</option>
					{TOPICS
						.iter()
						.map(|t| view! { <option value={t.name()}>{t.name()}</option> })
						.collect_view()}
				</select>
				<MetricsPanel metrics=metrics />
			</div>
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let loaded = GraphData::from_json(SAMPLE_GRAPH)
		.inspect_err(|e| warn!("bundled dataset rejected: {e}"));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{loaded.map(|data| view! { <Audit data=data /> })}
		</ErrorBoundary>
	}
}
