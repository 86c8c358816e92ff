//! Layout constraints applied on top of the force_graph step.
//!
//! Each pass works on a snapshot of node positions indexed by slot and never
//! moves pinned bodies.

/// Snapshot of one node's layout state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub pinned: bool,
}

/// Pulls or pushes linked bodies toward `rest` length, scaled by `alpha`.
pub fn link_distance(bodies: &mut [Body], links: &[(usize, usize)], rest: f64, alpha: f64) {
	const STRENGTH: f64 = 0.5;
	for &(a, b) in links {
		let (dx, dy) = (bodies[b].x - bodies[a].x, bodies[b].y - bodies[a].y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 1e-6 {
			continue;
		}
		let k = (dist - rest) / dist * alpha * STRENGTH;
		let (share_a, share_b) = shares(&bodies[a], &bodies[b]);
		bodies[a].x += dx * k * share_a;
		bodies[a].y += dy * k * share_a;
		bodies[b].x -= dx * k * share_b;
		bodies[b].y -= dy * k * share_b;
	}
}

/// Translates free bodies so their centroid moves toward `(cx, cy)`.
pub fn center(bodies: &mut [Body], cx: f64, cy: f64, strength: f64) {
	if bodies.is_empty() {
		return;
	}
	let n = bodies.len() as f64;
	let (sx, sy) = bodies
		.iter()
		.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
	let (shift_x, shift_y) = ((cx - sx / n) * strength, (cy - sy / n) * strength);
	for body in bodies.iter_mut().filter(|b| !b.pinned) {
		body.x += shift_x;
		body.y += shift_y;
	}
}

/// Separates overlapping circles of `radius + margin`.
pub fn collide(bodies: &mut [Body], margin: f64) {
	for i in 0..bodies.len() {
		for j in (i + 1)..bodies.len() {
			let min = bodies[i].radius + bodies[j].radius + 2.0 * margin;
			let (dx, dy) = (bodies[j].x - bodies[i].x, bodies[j].y - bodies[i].y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist >= min {
				continue;
			}
			let (ux, uy) = if dist < 1e-6 {
				// coincident: split along a slot-dependent direction
				let angle = (i * 7 + j) as f64;
				(angle.cos(), angle.sin())
			} else {
				(dx / dist, dy / dist)
			};
			let overlap = min - dist;
			push_apart(bodies, i, j, ux * overlap, uy * overlap);
		}
	}
}

fn push_apart(bodies: &mut [Body], i: usize, j: usize, dx: f64, dy: f64) {
	let (share_i, share_j) = shares(&bodies[i], &bodies[j]);
	bodies[i].x -= dx * share_i;
	bodies[i].y -= dy * share_i;
	bodies[j].x += dx * share_j;
	bodies[j].y += dy * share_j;
}

/// How a correction is split between two bodies.
fn shares(a: &Body, b: &Body) -> (f64, f64) {
	match (a.pinned, b.pinned) {
		(false, false) => (0.5, 0.5),
		(true, false) => (0.0, 1.0),
		(false, true) => (1.0, 0.0),
		(true, true) => (0.0, 0.0),
	}
}
