use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{EdgeEmphasis, ForceGraphState, NodeEmphasis};
use super::types::SimNode;

const BACKGROUND: &str = "#0F172A";
const DIMMED_FILL: &str = "#334155";
const ARROW_SIZE: f64 = 8.0;
const GLOW_RANK: f64 = 0.4;
const LABEL_RANK: f64 = 0.2;

/// Stroke settings for one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	pub color: &'static str,
	pub width: f64,
	pub alpha: f64,
	pub arrow: bool,
}

impl EdgeStyle {
	pub fn for_emphasis(emphasis: EdgeEmphasis) -> Self {
		match emphasis {
			EdgeEmphasis::Highlighted => Self {
				color: "#FFF",
				width: 2.0,
				alpha: 1.0,
				arrow: true,
			},
			EdgeEmphasis::Dimmed => Self {
				color: DIMMED_FILL,
				width: 1.0,
				alpha: 0.1,
				arrow: false,
			},
			EdgeEmphasis::Normal => Self {
				color: "#475569",
				width: 1.0,
				alpha: 0.5,
				arrow: true,
			},
		}
	}
}

/// Where the arrowhead tip sits along an edge of length `dist`.
pub fn arrow_offset(dist: f64) -> f64 {
	if dist > 40.0 { dist - 25.0 } else { dist / 2.0 }
}

/// Shadow blur for a node, or `None` when it does not glow. Pulses with time.
pub fn glow_blur(node: &SimNode, emphasis: NodeEmphasis, time: f64) -> Option<f64> {
	match emphasis {
		NodeEmphasis::Hovered => Some(25.0 + 5.0),
		NodeEmphasis::Normal if node.normalized_rank > GLOW_RANK => {
			Some(15.0 + (time * 5.0).sin() * 2.0)
		}
		_ => None,
	}
}

pub fn shows_label(node: &SimNode, emphasis: NodeEmphasis) -> bool {
	match emphasis {
		NodeEmphasis::Hovered => true,
		NodeEmphasis::Normal => node.normalized_rank > LABEL_RANK,
		NodeEmphasis::Dimmed => false,
	}
}

/// Draw one frame. Reads the state only.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	for &(src, tgt) in &state.edges {
		let (Some(from), Some(to)) = (state.nodes.get(src), state.nodes.get(tgt)) else {
			continue;
		};
		let style = EdgeStyle::for_emphasis(state.edge_emphasis(src, tgt));

		ctx.begin_path();
		ctx.set_line_width(style.width);
		ctx.set_stroke_style_str(style.color);
		ctx.set_global_alpha(style.alpha);
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();

		if !style.arrow {
			continue;
		}
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = dx.hypot(dy);
		if dist < 0.001 {
			continue;
		}
		let angle = dy.atan2(dx);
		let along = arrow_offset(dist);
		let (ax, ay) = (from.x + angle.cos() * along, from.y + angle.sin() * along);
		ctx.begin_path();
		ctx.move_to(ax, ay);
		ctx.line_to(
			ax - ARROW_SIZE * (angle - PI / 6.0).cos(),
			ay - ARROW_SIZE * (angle - PI / 6.0).sin(),
		);
		ctx.line_to(
			ax - ARROW_SIZE * (angle + PI / 6.0).cos(),
			ay - ARROW_SIZE * (angle + PI / 6.0).sin(),
		);
		ctx.close_path();
		ctx.set_fill_style_str(style.color);
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	for (idx, node) in state.nodes.iter().enumerate() {
		let emphasis = state.node_emphasis(idx);
		let radius = node.radius();

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		if emphasis == NodeEmphasis::Dimmed {
			ctx.set_fill_style_str(DIMMED_FILL);
			ctx.fill();
			continue;
		}

		ctx.set_fill_style_str(node.color);
		match glow_blur(node, emphasis, state.flow_time) {
			Some(blur) => {
				ctx.set_shadow_blur(blur);
				ctx.set_shadow_color(node.color);
			}
			None => ctx.set_shadow_blur(0.0),
		}
		ctx.fill();

		let hovered = emphasis == NodeEmphasis::Hovered;
		ctx.set_shadow_blur(0.0);
		ctx.set_stroke_style_str("#fff");
		ctx.set_line_width(if hovered { 3.0 } else { 1.5 });
		ctx.stroke();

		if shows_label(node, emphasis) {
			draw_label(ctx, node, radius, hovered);
		}
	}
}

fn draw_label(ctx: &CanvasRenderingContext2d, node: &SimNode, radius: f64, hovered: bool) {
	ctx.set_font(if hovered {
		"bold 12px sans-serif"
	} else {
		"10px sans-serif"
	});
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let text_width = ctx
		.measure_text(&node.name)
		.map(|m| m.width())
		.unwrap_or(0.0);
	let (bx, by, bw, bh) = (
		node.x - text_width / 2.0 - 4.0,
		node.y + radius + 6.0,
		text_width + 8.0,
		16.0,
	);

	ctx.set_global_alpha(0.7);
	ctx.set_fill_style_str("#000");
	rounded_rect(ctx, bx, by, bw, bh, 4.0);
	ctx.fill();

	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str("#FFF");
	let _ = ctx.fill_text(&node.name, node.x, node.y + radius + 14.0);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::NodeMotion;

	fn node(normalized_rank: f64) -> SimNode {
		SimNode {
			id: "n".into(),
			name: "n".into(),
			color: "#10B981",
			mass: 2.0,
			normalized_rank,
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			motion: NodeMotion::Free,
		}
	}

	#[test]
	fn arrowhead_sits_near_the_target() {
		assert_eq!(arrow_offset(100.0), 75.0);
		assert_eq!(arrow_offset(30.0), 15.0);
	}

	#[test]
	fn dimmed_edges_drop_their_arrow() {
		let dimmed = EdgeStyle::for_emphasis(EdgeEmphasis::Dimmed);
		let lit = EdgeStyle::for_emphasis(EdgeEmphasis::Highlighted);
		let normal = EdgeStyle::for_emphasis(EdgeEmphasis::Normal);
		assert!(!dimmed.arrow);
		assert!(lit.width > normal.width);
		assert!(lit.alpha > normal.alpha && normal.alpha > dimmed.alpha);
	}

	#[test]
	fn glow_and_label_thresholds() {
		let small = node(0.1);
		let mid = node(0.3);
		let big = node(0.9);
		assert_eq!(glow_blur(&small, NodeEmphasis::Normal, 0.0), None);
		assert_eq!(glow_blur(&mid, NodeEmphasis::Normal, 0.0), None);
		assert_eq!(glow_blur(&big, NodeEmphasis::Normal, 0.0), Some(15.0));
		assert_eq!(glow_blur(&small, NodeEmphasis::Hovered, 0.0), Some(30.0));
		assert_eq!(glow_blur(&big, NodeEmphasis::Dimmed, 0.0), None);

		let pulsed = glow_blur(&big, NodeEmphasis::Normal, 0.3).unwrap();
		assert!((13.0..=17.0).contains(&pulsed));

		assert!(!shows_label(&small, NodeEmphasis::Normal));
		assert!(shows_label(&mid, NodeEmphasis::Normal));
		assert!(shows_label(&small, NodeEmphasis::Hovered));
		assert!(!shows_label(&big, NodeEmphasis::Dimmed));
	}
}
