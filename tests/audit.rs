use visibility_audit::analysis::{TOP_K, analyze};
use visibility_audit::dataset::{GraphData, Topic};

const SAMPLE_GRAPH: &str = include_str!("../assets/sample_graph.json");

#[test]
fn bundled_dataset_produces_a_consistent_audit() {
	let data = GraphData::from_json(SAMPLE_GRAPH).expect("bundled dataset parses");
	let audit = analyze(&data);

	assert_eq!(audit.graph.nodes.len(), data.nodes.len());
	assert_eq!(audit.metrics.node_count, data.nodes.len());
	assert_eq!(audit.metrics.link_count, data.links.len());
	assert_eq!(audit.metrics.top.len(), TOP_K);

	let max = audit
		.graph
		.nodes
		.iter()
		.map(|n| n.normalized_rank)
		.fold(0.0_f64, f64::max);
	assert_eq!(max, 1.0);
	assert!(audit.graph.nodes.iter().all(|n| (0.0..=1.0).contains(&n.normalized_rank)));
	assert_eq!(audit.metrics.top[0].normalized_rank, 1.0);

	assert!((0.0..=1.0).contains(&audit.metrics.gini));
	assert!(audit.metrics.lorenz.len() <= 22);
	let last = audit.metrics.lorenz.last().unwrap();
	assert!((last.actual - 100.0).abs() < 1e-9);

	let per_topic: usize = audit.metrics.topics.iter().map(|(_, c)| c).sum();
	assert_eq!(per_topic, data.nodes.len());
}

#[test]
fn three_cycle_is_perfectly_fair() {
	let json = r#"{
		"nodes": [ { "id": "A" }, { "id": "B" }, { "id": "C" } ],
		"links": [
			{ "source": "A", "target": "B" },
			{ "source": "B", "target": "C" },
			{ "source": "C", "target": "A" }
		]
	}"#;
	let audit = analyze(&GraphData::from_json(json).unwrap());
	for node in &audit.graph.nodes {
		assert!((node.rank - 1.0 / 3.0).abs() < 1e-9);
	}
	assert!(audit.metrics.gini.abs() < 1e-9);
	assert!(!audit.metrics.is_high_inequality());
}

#[test]
fn star_graph_concentrates_visibility() {
	let json = r#"{
		"nodes": [ { "id": "A" }, { "id": "B" }, { "id": "C" }, { "id": "D" } ],
		"links": [
			{ "source": "B", "target": "A" },
			{ "source": "C", "target": "A" },
			{ "source": "D", "target": "A" }
		]
	}"#;
	let audit = analyze(&GraphData::from_json(json).unwrap());
	assert_eq!(audit.metrics.top[0].id, "A");
	let a = audit.metrics.top[0].rank;
	assert!(audit.graph.nodes.iter().filter(|n| n.id != "A").all(|n| n.rank < a));
	assert!(audit.metrics.gini > 0.0);
	assert!((audit.metrics.top_share() - a * 100.0).abs() < 1e-12);
}

#[test]
fn empty_dataset_is_not_an_error() {
	let audit = analyze(&GraphData::from_json(r#"{ "nodes": [], "links": [] }"#).unwrap());
	assert!(audit.graph.nodes.is_empty());
	assert_eq!(audit.metrics.gini, 0.0);
	assert!(audit.metrics.lorenz.is_empty());
	assert!(audit.metrics.top.is_empty());
}

#[test]
fn topic_filter_reranks_the_subgraph() {
	let data = GraphData::from_json(SAMPLE_GRAPH).unwrap();
	let gaming = data.filter_topic(Some(Topic::Gaming));
	let audit = analyze(&gaming);
	assert!(audit.graph.nodes.iter().all(|n| n.topic == Topic::Gaming));
	assert_eq!(audit.metrics.node_count, gaming.nodes.len());
	assert!(audit.metrics.top.len() <= TOP_K);
}
