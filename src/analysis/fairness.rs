//! Inequality metrics over ranked channels.

use super::rank::{RankedGraph, RankedNode};
use crate::dataset::{TOPICS, Topic};

/// Number of leaders reported by default.
pub const TOP_K: usize = 5;

/// Gini above which the distribution is flagged as unequal.
pub const HIGH_INEQUALITY: f64 = 0.4;

/// Target number of sampled Lorenz points (plus the origin).
const LORENZ_SAMPLES: usize = 20;

/// One sample of the Lorenz curve. All fields are percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzPoint {
	/// Share of channels included so far.
	pub percent: f64,
	/// Share of total rank held by those channels.
	pub actual: f64,
	/// Share they would hold under perfect equality.
	pub perfect: f64,
}

/// Metrics derived from one ranking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
	/// Gini coefficient in `[0, 1]`.
	pub gini: f64,
	/// Sampled Lorenz curve.
	pub lorenz: Vec<LorenzPoint>,
	/// Highest-ranked channels, best first.
	pub top: Vec<RankedNode>,
	/// Channel count.
	pub node_count: usize,
	/// Recommendation count.
	pub link_count: usize,
	/// Channel count per topic, in palette order.
	pub topics: Vec<(Topic, usize)>,
}

impl MetricsSnapshot {
	/// Percentage of all rank held by the leading channel.
	pub fn top_share(&self) -> f64 {
		self.top.first().map_or(0.0, |n| n.rank * 100.0)
	}

	/// Whether the Gini coefficient crosses [`HIGH_INEQUALITY`].
	pub fn is_high_inequality(&self) -> bool {
		self.gini > HIGH_INEQUALITY
	}

	/// Short verdict shown under the Gini figure.
	pub fn verdict(&self) -> &'static str {
		if self.is_high_inequality() {
			"High Inequality Detected"
		} else {
			"Balanced Distribution"
		}
	}
}

fn sorted_ascending(values: &[f64]) -> Vec<f64> {
	let mut sorted = values.to_vec();
	sorted.sort_by(f64::total_cmp);
	sorted
}

/// Discrete Gini estimator. Empty or all-zero input yields 0.
pub fn gini(values: &[f64]) -> f64 {
	let n = values.len();
	if n == 0 {
		return 0.0;
	}
	let sorted = sorted_ascending(values);
	let (weighted, total) = sorted
		.iter()
		.enumerate()
		.fold((0.0, 0.0), |(w, t), (i, v)| (w + (i + 1) as f64 * v, t + v));
	if total <= 0.0 {
		return 0.0;
	}
	let n = n as f64;
	(2.0 * weighted / (n * total) - (n + 1.0) / n).clamp(0.0, 1.0)
}

/// Sampled Lorenz curve: the origin, then every `ceil(n / 20)`-th channel in
/// ascending rank order, then always the last one.
pub fn lorenz(values: &[f64]) -> Vec<LorenzPoint> {
	let n = values.len();
	if n == 0 {
		return Vec::new();
	}
	let sorted = sorted_ascending(values);
	let total: f64 = sorted.iter().sum();
	let step = n.div_ceil(LORENZ_SAMPLES);

	let mut points = Vec::with_capacity(LORENZ_SAMPLES + 2);
	points.push(LorenzPoint {
		percent: 0.0,
		actual: 0.0,
		perfect: 0.0,
	});

	let mut cumulative = 0.0;
	for (i, value) in sorted.iter().enumerate() {
		cumulative += value;
		if i % step == 0 || i == n - 1 {
			let perfect = (i + 1) as f64 / n as f64 * 100.0;
			let actual = if total > 0.0 {
				cumulative / total * 100.0
			} else {
				perfect
			};
			points.push(LorenzPoint {
				percent: perfect,
				actual,
				perfect,
			});
		}
	}
	points
}

/// The `k` highest-ranked nodes. Ties keep input order.
pub fn top_k(nodes: &[RankedNode], k: usize) -> Vec<RankedNode> {
	let mut sorted: Vec<&RankedNode> = nodes.iter().collect();
	sorted.sort_by(|a, b| b.rank.total_cmp(&a.rank));
	sorted.into_iter().take(k).cloned().collect()
}

/// Compute every metric for a ranked graph.
pub fn summarize(graph: &RankedGraph) -> MetricsSnapshot {
	let ranks: Vec<f64> = graph.nodes.iter().map(|n| n.rank).collect();
	let mut topics: Vec<(Topic, usize)> = TOPICS.iter().map(|&t| (t, 0)).collect();
	for node in &graph.nodes {
		topics[node.topic.index()].1 += 1;
	}
	MetricsSnapshot {
		gini: gini(&ranks),
		lorenz: lorenz(&ranks),
		top: top_k(&graph.nodes, TOP_K),
		node_count: graph.nodes.len(),
		link_count: graph.links.len(),
		topics,
	}
}
