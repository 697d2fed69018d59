//! Graph snapshot as supplied by the data-acquisition side.
//!
//! A dataset is the JSON document `{ "nodes": [...], "links": [...] }`. It is
//! consumed identically whether it came from the crawler backend or from the
//! bundled static file. Fields the backend precomputes (`pagerank`, `color`,
//! `mass`, velocities, link `weight`) are accepted and ignored.

use std::collections::HashSet;
use std::fmt;

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Fixed topic palette, in legend order.
pub const TOPICS: [Topic; 6] = [
	Topic::Gaming,
	Topic::Tech,
	Topic::Vlogs,
	Topic::Music,
	Topic::Education,
	Topic::News,
];

const COLORS: [&str; 6] = [
	"#FF4D4D", "#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899",
];

/// Content category of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Topic {
	/// Gaming channels.
	Gaming,
	/// Technology channels.
	Tech,
	/// Vlogs.
	Vlogs,
	/// Music channels.
	Music,
	/// Education channels.
	Education,
	/// News channels.
	News,
}

impl Topic {
	/// Topic assigned when the dataset leaves it out: the sum of the id's
	/// characters picks a palette slot.
	pub fn from_id(id: &str) -> Self {
		let sum: u64 = id.chars().map(|c| c as u64).sum();
		TOPICS[(sum % TOPICS.len() as u64) as usize]
	}

	/// Palette slot of this topic.
	pub fn index(self) -> usize {
		self as usize
	}

	/// Display color used by the canvas and the legend.
	pub fn color(self) -> &'static str {
		COLORS[self.index()]
	}

	/// Human readable topic name.
	pub fn name(self) -> &'static str {
		match self {
			Topic::Gaming => "Gaming",
			Topic::Tech => "Tech",
			Topic::Vlogs => "Vlogs",
			Topic::Music => "Music",
			Topic::Education => "Education",
			Topic::News => "News",
		}
	}

	/// Inverse of [`Topic::name`].
	pub fn parse(name: &str) -> Option<Self> {
		TOPICS.into_iter().find(|t| t.name() == name)
	}
}

impl fmt::Display for Topic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A channel in the recommendation graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct GraphNode {
	/// Unique channel id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Content category.
	pub topic: Topic,
	/// Subscriber count, used for display and mass bucketing.
	pub subscribers: u64,
	/// Initial position, when the supplier already laid the node out.
	pub position: Option<(f64, f64)>,
}

#[derive(Deserialize)]
struct RawNode {
	id: String,
	#[serde(default, alias = "label", alias = "title")]
	name: Option<String>,
	#[serde(default)]
	topic: Option<Topic>,
	#[serde(default)]
	subscribers: u64,
	#[serde(default)]
	x: Option<f64>,
	#[serde(default)]
	y: Option<f64>,
}

impl From<RawNode> for GraphNode {
	fn from(raw: RawNode) -> Self {
		let topic = raw.topic.unwrap_or_else(|| Topic::from_id(&raw.id));
		let position = match (raw.x, raw.y) {
			(Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
			_ => None,
		};
		Self {
			name: raw.name.unwrap_or_else(|| raw.id.clone()),
			id: raw.id,
			topic,
			subscribers: raw.subscribers,
			position,
		}
	}
}

/// A "source recommends target" edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct GraphLink {
	/// Recommending channel id.
	pub source: String,
	/// Recommended channel id.
	pub target: String,
}

/// A complete graph snapshot.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// Channels, in supplier order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Recommendations, in supplier order.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

/// Reasons a supplied dataset is rejected.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// The document is not a valid `{ nodes, links }` JSON object.
	#[error("malformed dataset: {0}")]
	Json(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
}

impl GraphData {
	/// Parse and validate a dataset. Duplicate links are dropped.
	pub fn from_json(json: &str) -> Result<Self, DatasetError> {
		let mut data: GraphData = serde_json::from_str(json)?;

		let mut ids = HashSet::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(DatasetError::DuplicateNode(node.id.clone()));
			}
		}

		let before = data.links.len();
		data.dedup_links();
		if data.links.len() < before {
			warn!("dropped {} duplicate links", before - data.links.len());
		}
		info!(
			"loaded dataset: {} nodes, {} links",
			data.nodes.len(),
			data.links.len()
		);
		Ok(data)
	}

	/// Remove repeated `(source, target)` pairs, keeping the first.
	pub fn dedup_links(&mut self) {
		let mut seen = HashSet::with_capacity(self.links.len());
		self.links
			.retain(|l| seen.insert((l.source.clone(), l.target.clone())));
	}

	/// Sub-dataset with only the nodes of `topic` and the links between them.
	/// `None` keeps everything.
	pub fn filter_topic(&self, topic: Option<Topic>) -> GraphData {
		let Some(topic) = topic else {
			return self.clone();
		};
		let nodes: Vec<GraphNode> = self
			.nodes
			.iter()
			.filter(|n| n.topic == topic)
			.cloned()
			.collect();
		let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let links = self
			.links
			.iter()
			.filter(|l| kept.contains(l.source.as_str()) && kept.contains(l.target.as_str()))
			.cloned()
			.collect();
		GraphData { nodes, links }
	}

	/// Node count per topic, in palette order.
	pub fn topic_distribution(&self) -> [(Topic, usize); 6] {
		let mut counts = TOPICS.map(|t| (t, 0));
		for node in &self.nodes {
			counts[node.topic.index()].1 += 1;
		}
		counts
	}
}

/// Compact subscriber count: `12.3M`, `950.0K`, `999`.
pub fn format_subscribers(count: u64) -> String {
	if count >= 1_000_000 {
		format!("{:.1}M", count as f64 / 1_000_000.0)
	} else if count >= 1_000 {
		format!("{:.1}K", count as f64 / 1_000.0)
	} else {
		count.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_shape_and_ignores_precomputed_fields() {
		let json = r##"{
			"nodes": [
				{ "id": "a", "name": "Alpha", "topic": "Tech", "color": "#3B82F6",
				  "subscribers": 1200, "pagerank": 0.4, "normalizedRank": 1.0,
				  "mass": 5, "x": 10, "y": 20, "vx": 0, "vy": 0 },
				{ "id": "b", "label": "Beta" }
			],
			"links": [ { "source": "a", "target": "b", "weight": 2 } ]
		}"##;
		let data = GraphData::from_json(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].topic, Topic::Tech);
		assert_eq!(data.nodes[0].position, Some((10.0, 20.0)));
		assert_eq!(data.nodes[1].name, "Beta");
		assert_eq!(data.nodes[1].topic, Topic::from_id("b"));
		assert_eq!(data.nodes[1].subscribers, 0);
		assert_eq!(data.nodes[1].position, None);
		assert_eq!(data.links.len(), 1);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let json = r#"{ "nodes": [ { "id": "a" }, { "id": "a" } ], "links": [] }"#;
		match GraphData::from_json(json) {
			Err(DatasetError::DuplicateNode(id)) => assert_eq!(id, "a"),
			other => panic!("expected duplicate error, got {other:?}"),
		}
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(matches!(
			GraphData::from_json("{ \"nodes\": 3 }"),
			Err(DatasetError::Json(_))
		));
	}

	#[test]
	fn drops_duplicate_links() {
		let json = r#"{
			"nodes": [ { "id": "a" }, { "id": "b" } ],
			"links": [
				{ "source": "a", "target": "b" },
				{ "source": "a", "target": "b" },
				{ "source": "b", "target": "a" }
			]
		}"#;
		let data = GraphData::from_json(json).unwrap();
		assert_eq!(data.links.len(), 2);
	}

	#[test]
	fn topic_filter_drops_dangling_links() {
		let json = r#"{
			"nodes": [
				{ "id": "a", "topic": "Music" },
				{ "id": "b", "topic": "Music" },
				{ "id": "c", "topic": "News" }
			],
			"links": [
				{ "source": "a", "target": "b" },
				{ "source": "a", "target": "c" }
			]
		}"#;
		let data = GraphData::from_json(json).unwrap();
		let music = data.filter_topic(Some(Topic::Music));
		assert_eq!(music.nodes.len(), 2);
		assert_eq!(music.links.len(), 1);
		assert_eq!(data.filter_topic(None), data);

		let dist = data.topic_distribution();
		assert_eq!(dist[Topic::Music.index()], (Topic::Music, 2));
		assert_eq!(dist[Topic::News.index()], (Topic::News, 1));
		assert_eq!(dist[Topic::Gaming.index()], (Topic::Gaming, 0));
	}

	#[test]
	fn topic_names_round_trip_through_the_palette() {
		for topic in TOPICS {
			assert_eq!(Topic::parse(topic.name()), Some(topic));
		}
		assert_eq!(Topic::Gaming.color(), "#FF4D4D");
		assert_eq!(Topic::News.color(), "#EC4899");
	}

	#[test]
	fn formats_subscriber_counts() {
		assert_eq!(format_subscribers(999), "999");
		assert_eq!(format_subscribers(950_000), "950.0K");
		assert_eq!(format_subscribers(12_345_678), "12.3M");
	}
}
