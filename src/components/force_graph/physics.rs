use super::types::{PhysicsParams, SimNode};

/// Advance the layout by one frame.
///
/// Forces are computed from a snapshot of the positions at the start of the
/// step, so the result does not depend on node order. Pinned nodes push and
/// pull on others but are never moved here. `edges` holds resolved index
/// pairs; self-loops are ignored.
pub fn step(
	nodes: &mut [SimNode],
	edges: &[(usize, usize)],
	width: f64,
	height: f64,
	params: &PhysicsParams,
) {
	let count = nodes.len();
	if count == 0 {
		return;
	}

	let positions: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x, n.y)).collect();
	let mut forces = vec![(0.0_f64, 0.0_f64); count];

	for (i, force) in forces.iter_mut().enumerate() {
		if nodes[i].is_pinned() {
			continue;
		}
		let (x, y) = positions[i];
		for (j, &(ox, oy)) in positions.iter().enumerate() {
			if i == j {
				continue;
			}
			let (dx, dy) = (x - ox, y - oy);
			let mut dist_sq = dx * dx + dy * dy;
			if dist_sq == 0.0 {
				dist_sq = 1.0;
			}
			let dist = dist_sq.sqrt();
			if dist < params.repulsion_radius {
				let push = params.repulsion / dist_sq;
				force.0 += dx / dist * push;
				force.1 += dy / dist * push;
			}
		}
	}

	for &(a, b) in edges {
		if a == b || a >= count || b >= count {
			continue;
		}
		let (dx, dy) = (positions[b].0 - positions[a].0, positions[b].1 - positions[a].1);
		let mut dist = (dx * dx + dy * dy).sqrt();
		if dist == 0.0 {
			dist = 1.0;
		}
		let pull = (dist - params.spring_length) * params.spring_k;
		let (fx, fy) = (dx / dist * pull, dy / dist * pull);
		forces[a].0 += fx;
		forces[a].1 += fy;
		forces[b].0 -= fx;
		forces[b].1 -= fy;
	}

	let (cx, cy) = (width / 2.0, height / 2.0);
	let (min_x, max_x) = (params.wall_padding, width - params.wall_padding);
	let (min_y, max_y) = (params.wall_padding, height - params.wall_padding);

	for (node, (fx, fy)) in nodes.iter_mut().zip(forces) {
		if node.is_pinned() {
			node.vx = 0.0;
			node.vy = 0.0;
			continue;
		}

		let fx = fx + (cx - node.x) * params.center_gravity * node.mass;
		let fy = fy + (cy - node.y) * params.center_gravity * node.mass;

		node.vx = (node.vx + fx) * params.damping;
		node.vy = (node.vy + fy) * params.damping;

		let speed = node.speed();
		if speed > params.max_speed {
			node.vx = node.vx / speed * params.max_speed;
			node.vy = node.vy / speed * params.max_speed;
		}

		node.x += node.vx;
		node.y += node.vy;

		let bounce = -params.wall_restitution;
		if node.x < min_x {
			node.x = min_x;
			node.vx *= bounce;
		}
		if node.x > max_x {
			node.x = max_x;
			node.vx *= bounce;
		}
		if node.y < min_y {
			node.y = min_y;
			node.vy *= bounce;
		}
		if node.y > max_y {
			node.y = max_y;
			node.vy *= bounce;
		}
	}
}
