//! Ranking and fairness metrics, recomputed once per dataset.

pub mod fairness;
pub mod rank;

pub use fairness::{LorenzPoint, MetricsSnapshot, TOP_K, gini, lorenz, summarize, top_k};
pub use rank::{RankConfig, RankedGraph, RankedNode, rank, rank_graph};

use crate::dataset::GraphData;

/// Everything the presentation side needs from one dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analysis {
	/// Ranked nodes and links for the canvas.
	pub graph: RankedGraph,
	/// Inequality metrics for the dashboard.
	pub metrics: MetricsSnapshot,
}

/// Rank a dataset and derive its metrics.
pub fn analyze(data: &GraphData) -> Analysis {
	let graph = rank_graph(data, RankConfig::default());
	let metrics = summarize(&graph);
	Analysis { graph, metrics }
}
