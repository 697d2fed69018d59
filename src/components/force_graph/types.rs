use crate::analysis::RankedNode;

pub const NODE_RADIUS_MIN: f64 = 8.0;
pub const NODE_RADIUS_SPAN: f64 = 25.0;
pub const HIT_RADIUS_MIN: f64 = 15.0;
pub const HIT_RADIUS_SPAN: f64 = 20.0;

/// Who controls a node's position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeMotion {
	/// Moved by the physics step.
	#[default]
	Free,
	/// Held by the pointer; velocity stays zero and physics skips it.
	Pinned,
}

/// Physics constants for one simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
	pub repulsion: f64,
	pub repulsion_radius: f64,
	pub spring_length: f64,
	pub spring_k: f64,
	pub center_gravity: f64,
	pub damping: f64,
	pub max_speed: f64,
	pub wall_padding: f64,
	pub wall_restitution: f64,
}

impl Default for PhysicsParams {
	fn default() -> Self {
		Self {
			repulsion: 500.0,
			repulsion_radius: 400.0,
			spring_length: 120.0,
			spring_k: 0.04,
			center_gravity: 0.0002,
			damping: 0.85,
			max_speed: 8.0,
			wall_padding: 20.0,
			wall_restitution: 0.5,
		}
	}
}

/// Live per-node simulation record.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	pub id: String,
	pub name: String,
	pub color: &'static str,
	pub mass: f64,
	pub normalized_rank: f64,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub motion: NodeMotion,
}

impl SimNode {
	pub fn new(node: &RankedNode, x: f64, y: f64) -> Self {
		Self {
			id: node.id.clone(),
			name: node.name.clone(),
			color: node.color(),
			mass: node.mass,
			normalized_rank: node.normalized_rank,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			motion: NodeMotion::Free,
		}
	}

	/// Drawn circle radius.
	pub fn radius(&self) -> f64 {
		NODE_RADIUS_MIN + self.normalized_rank * NODE_RADIUS_SPAN
	}

	/// Pointer target radius before tolerance.
	pub fn hit_radius(&self) -> f64 {
		HIT_RADIUS_MIN + self.normalized_rank * HIT_RADIUS_SPAN
	}

	pub fn is_pinned(&self) -> bool {
		self.motion == NodeMotion::Pinned
	}

	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}
}
