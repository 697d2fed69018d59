use leptos::prelude::*;

use crate::analysis::MetricsSnapshot;
use crate::dataset::format_subscribers;

/// Gini, top share, network size and the leaderboard for one ranking.
#[component]
pub fn MetricsPanel(#[prop(into)] metrics: Signal<MetricsSnapshot>) -> impl IntoView {
	let verdict_class = move || {
		if metrics.with(|m| m.is_high_inequality()) {
			"verdict verdict-high"
		} else {
			"verdict"
		}
	};

	view! {
		<div class="metrics-panel">
			<div class="metric">
				<span class="metric-label">"Gini coefficient"</span>
				<span class="metric-value">{move || format!("{:.3}", metrics.with(|m| m.gini))}</span>
				<span class=verdict_class>{move || metrics.with(|m| m.verdict())}</span>
			</div>
			<div class="metric">
				<span class="metric-label">"Top influencer share"</span>
				<span class="metric-value">
					{move || format!("{:.1}%", metrics.with(|m| m.top_share()))}
				</span>
			</div>
			<div class="metric">
				<span class="metric-label">"Network size"</span>
				<span class="metric-value">
					{move || {
						metrics
							.with(|m| format!("{} channels • {} recommendations", m.node_count, m.link_count))
					}}
				</span>
			</div>
			<ol class="leaderboard">
				{move || {
					metrics
						.get()
						.top
						.into_iter()
						.map(|node| {
							let swatch = format!("background: {}", node.color());
							let detail = format!(
								"{} • {} subs",
								node.topic,
								format_subscribers(node.subscribers),
							);
							let share = format!("{:.1}%", node.rank * 100.0);
							view! {
								<li>
									<span class="swatch" style=swatch></span>
									<span class="name">{node.name}</span>
									<span class="detail">{detail}</span>
									<span class="share">{share}</span>
								</li>
							}
						})
						.collect_view()
				}}
			</ol>
			<ul class="topic-counts">
				{move || {
					metrics
						.get()
						.topics
						.into_iter()
						.map(|(topic, count)| {
							let swatch = format!("background: {}", topic.color());
							view! {
								<li>
									<span class="swatch" style=swatch></span>
									{format!("{topic}: {count}")}
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}
