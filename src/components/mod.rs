pub mod force_graph;
pub mod metrics_panel;
