use log::debug;

use super::state::ForceGraphState;
use super::types::NodeMotion;

/// Extra reach when grabbing a node.
pub const DRAG_TOLERANCE: f64 = 5.0;
/// Extra reach when hovering a node.
pub const HOVER_TOLERANCE: f64 = 0.0;

impl ForceGraphState {
	/// Nearest node whose hit circle, grown by `tolerance`, contains the point.
	pub fn node_at_position(&self, x: f64, y: f64, tolerance: f64) -> Option<usize> {
		self.nodes
			.iter()
			.enumerate()
			.filter_map(|(idx, node)| {
				let distance = (node.x - x).hypot(node.y - y);
				(distance < node.hit_radius() + tolerance).then_some((idx, distance))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	/// Start dragging the node under the pointer, if any.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
		let Some(idx) = self.node_at_position(x, y, DRAG_TOLERANCE) else {
			return false;
		};
		let node = &mut self.nodes[idx];
		node.motion = NodeMotion::Pinned;
		node.vx = 0.0;
		node.vy = 0.0;
		self.drag.node_idx = Some(idx);
		debug!("drag start: {}", node.id);
		true
	}

	/// Move the drag target to the pointer, or update hover when idle.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		match self.drag.node_idx {
			Some(idx) => {
				if let Some(node) = self.nodes.get_mut(idx) {
					node.x = x;
					node.y = y;
				}
			}
			None => {
				let hovered = self.node_at_position(x, y, HOVER_TOLERANCE);
				self.set_hover(hovered);
			}
		}
	}

	/// Hand the drag target back to physics.
	pub fn pointer_up(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			if let Some(node) = self.nodes.get_mut(idx) {
				node.motion = NodeMotion::Free;
				debug!("drag end: {}", node.id);
			}
		}
	}

	/// Pointer left the canvas: release any drag and drop hover.
	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.active()
	}

	/// CSS cursor for the current pointer state.
	pub fn cursor(&self) -> &'static str {
		if self.is_dragging() {
			"grabbing"
		} else if self.has_active_highlight() {
			"pointer"
		} else {
			"default"
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::analysis::{RankedGraph, RankedNode};
	use crate::dataset::{GraphLink, Topic};

	fn ranked(id: &str, x: f64, y: f64, normalized_rank: f64) -> RankedNode {
		RankedNode {
			id: id.into(),
			name: id.into(),
			topic: Topic::Education,
			subscribers: 0,
			position: Some((x, y)),
			mass: 2.0,
			rank: normalized_rank,
			normalized_rank,
		}
	}

	fn state() -> ForceGraphState {
		let graph = RankedGraph {
			nodes: vec![
				ranked("a", 200.0, 200.0, 1.0),
				ranked("b", 260.0, 200.0, 0.0),
				ranked("c", 600.0, 400.0, 0.5),
			],
			links: vec![GraphLink {
				source: "a".into(),
				target: "b".into(),
			}],
		};
		ForceGraphState::new(&graph, 800.0, 600.0, 0)
	}

	#[test]
	fn hit_radius_grows_with_rank() {
		let s = state();
		// a reaches 35 units, b only 15.
		assert_eq!(s.node_at_position(232.0, 200.0, HOVER_TOLERANCE), Some(0));
		assert_eq!(s.node_at_position(200.0, 240.0, HOVER_TOLERANCE), None);
		assert_eq!(s.node_at_position(200.0, 238.0, DRAG_TOLERANCE), Some(0));
		assert_eq!(s.node_at_position(260.0, 218.0, HOVER_TOLERANCE), None);
	}

	#[test]
	fn nearest_node_wins_overlapping_hits() {
		let s = state();
		assert_eq!(s.node_at_position(250.0, 200.0, HOVER_TOLERANCE), Some(1));
		assert_eq!(s.node_at_position(225.0, 200.0, HOVER_TOLERANCE), Some(0));
	}

	#[test]
	fn pointer_down_on_empty_space_does_nothing() {
		let mut s = state();
		assert!(!s.pointer_down(50.0, 550.0));
		assert!(!s.is_dragging());
		assert!(s.nodes.iter().all(|n| n.motion == NodeMotion::Free));
	}

	#[test]
	fn held_node_stays_exactly_under_the_pointer() {
		let mut s = state();
		assert!(s.pointer_down(600.0, 400.0));
		assert_eq!(s.nodes[2].motion, NodeMotion::Pinned);
		s.pointer_move(100.0, 100.0);
		for _ in 0..10 {
			s.tick(0.016);
			assert_eq!((s.nodes[2].x, s.nodes[2].y), (100.0, 100.0));
			assert_eq!((s.nodes[2].vx, s.nodes[2].vy), (0.0, 0.0));
		}

		s.pointer_up();
		assert!(!s.is_dragging());
		assert_eq!(s.nodes[2].motion, NodeMotion::Free);
		s.tick(0.016);
		assert!(s.nodes[2].speed() > 0.0);
		assert_ne!((s.nodes[2].x, s.nodes[2].y), (100.0, 100.0));
	}

	#[test]
	fn hover_only_updates_when_not_dragging() {
		let mut s = state();
		s.pointer_move(200.0, 200.0);
		assert_eq!(s.hover.node, Some(0));
		assert!(s.hover.neighbors.contains(&1));

		s.pointer_move(700.0, 100.0);
		assert_eq!(s.hover.node, None);

		s.pointer_down(600.0, 400.0);
		s.pointer_move(200.0, 200.0);
		assert_eq!(s.hover.node, None);
		assert_eq!((s.nodes[2].x, s.nodes[2].y), (200.0, 200.0));
	}

	#[test]
	fn hover_never_moves_nodes() {
		let mut s = state();
		let before: Vec<(f64, f64)> = s.nodes.iter().map(|n| (n.x, n.y)).collect();
		s.pointer_move(200.0, 200.0);
		let after: Vec<(f64, f64)> = s.nodes.iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn leaving_the_canvas_releases_everything() {
		let mut s = state();
		s.pointer_move(600.0, 400.0);
		s.pointer_down(600.0, 400.0);
		s.pointer_leave();
		assert!(!s.is_dragging());
		assert_eq!(s.hover.node, None);
		assert_eq!(s.nodes[2].motion, NodeMotion::Free);
	}

	#[test]
	fn cursor_returns_to_normal_once_the_drag_ends() {
		let mut s = state();
		assert_eq!(s.cursor(), "default");
		s.pointer_move(600.0, 400.0);
		assert_eq!(s.cursor(), "pointer");
		s.pointer_down(600.0, 400.0);
		assert_eq!(s.cursor(), "grabbing");
		s.pointer_up();
		assert_eq!(s.cursor(), "pointer");

		s.pointer_down(600.0, 400.0);
		s.pointer_leave();
		assert_eq!(s.cursor(), "default");
	}
}
