use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use super::physics;
use super::types::{PhysicsParams, SimNode};
use crate::analysis::RankedGraph;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
}

impl DragState {
	pub fn active(&self) -> bool {
		self.node_idx.is_some()
	}
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
}

/// How an edge is drawn for the current hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEmphasis {
	Normal,
	Highlighted,
	Dimmed,
}

/// How a node is drawn for the current hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEmphasis {
	Normal,
	Hovered,
	Dimmed,
}

/// Sole owner of the live layout.
///
/// Pointer handlers write into it between frames; `tick` and the renderer
/// run inside the animation frame. Everything happens on the UI thread, so a
/// drag move is seen by the next render and a release hands the node back to
/// physics before the next step.
pub struct ForceGraphState {
	pub nodes: Vec<SimNode>,
	pub edges: Vec<(usize, usize)>,
	pub params: PhysicsParams,
	pub drag: DragState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	/// Wall-clock seconds of the last tick; drives the glow pulse.
	pub flow_time: f64,
	running: bool,
	index: HashMap<String, usize>,
	seed: u64,
}

impl ForceGraphState {
	pub fn new(graph: &RankedGraph, width: f64, height: f64, seed: u64) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			params: PhysicsParams::default(),
			drag: DragState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
			running: true,
			index: HashMap::new(),
			seed,
		};
		state.load(graph, &HashMap::new());
		state
	}

	/// Swap in a new dataset. Ids that survive keep their on-screen position;
	/// new ids take the supplied position or a random spot. Drag and hover
	/// are cleared since their indices no longer mean anything.
	pub fn replace_data(&mut self, graph: &RankedGraph) {
		let previous: HashMap<String, (f64, f64)> = self
			.nodes
			.drain(..)
			.map(|n| (n.id, (n.x, n.y)))
			.collect();
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.load(graph, &previous);
		let carried = self
			.nodes
			.iter()
			.filter(|n| previous.contains_key(&n.id))
			.count();
		info!(
			"replaced dataset: {} nodes ({} carried over), {} edges",
			self.nodes.len(),
			carried,
			self.edges.len()
		);
	}

	fn load(&mut self, graph: &RankedGraph, previous: &HashMap<String, (f64, f64)>) {
		self.seed = self.seed.wrapping_add(1);
		let (seed, width, height) = (self.seed, self.width, self.height);
		let pad = self.params.wall_padding;
		self.nodes = graph
			.nodes
			.iter()
			.map(|node| {
				let (x, y) = previous
					.get(&node.id)
					.copied()
					.or(node.position)
					.unwrap_or_else(|| scatter(&node.id, seed, width, height, pad));
				SimNode::new(node, x, y)
			})
			.collect();

		self.index = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();

		let mut skipped = 0usize;
		self.edges = graph
			.links
			.iter()
			.filter_map(|link| {
				match (self.index.get(&link.source), self.index.get(&link.target)) {
					(Some(&src), Some(&tgt)) if src != tgt => Some((src, tgt)),
					(Some(_), Some(_)) => None,
					_ => {
						skipped += 1;
						None
					}
				}
			})
			.collect();
		if skipped > 0 {
			warn!("skipped {skipped} links with unknown endpoints");
		}
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some()
	}

	pub fn edge_emphasis(&self, src: usize, tgt: usize) -> EdgeEmphasis {
		match self.hover.node {
			None => EdgeEmphasis::Normal,
			Some(h) if h == src || h == tgt => EdgeEmphasis::Highlighted,
			Some(_) => EdgeEmphasis::Dimmed,
		}
	}

	pub fn node_emphasis(&self, idx: usize) -> NodeEmphasis {
		match self.hover.node {
			None => NodeEmphasis::Normal,
			Some(h) if h == idx => NodeEmphasis::Hovered,
			Some(_) if self.hover.neighbors.contains(&idx) => NodeEmphasis::Normal,
			Some(_) => NodeEmphasis::Dimmed,
		}
	}

	/// One physics step per frame. `clock` is wall-clock seconds, so the
	/// pulse phase does not depend on the display's frame rate.
	pub fn tick(&mut self, clock: f64) {
		if !self.running {
			return;
		}
		physics::step(
			&mut self.nodes,
			&self.edges,
			self.width,
			self.height,
			&self.params,
		);
		self.flow_time = clock;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Ends the simulation for good. The animation loop checks
	/// `is_running` every frame and drops itself once this is called.
	pub fn stop(&mut self) {
		if self.running {
			debug!("simulation stopped");
		}
		self.running = false;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}
}

/// Deterministic spot inside the padded viewport for a node with no position.
fn scatter(id: &str, seed: u64, width: f64, height: f64, pad: f64) -> (f64, f64) {
	let mut h = seed ^ 0xcbf2_9ce4_8422_2325;
	for b in id.bytes() {
		h = (h ^ b as u64).wrapping_mul(0x0100_0000_01b3);
	}
	let mut next = || {
		h = h.wrapping_add(0x9e37_79b9_7f4a_7c15);
		let mut z = h;
		z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
		z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
		((z ^ (z >> 31)) >> 11) as f64 / (1u64 << 53) as f64
	};
	let span_x = (width - 2.0 * pad).max(0.0);
	let span_y = (height - 2.0 * pad).max(0.0);
	(pad + next() * span_x, pad + next() * span_y)
}
