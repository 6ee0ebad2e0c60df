//! Per-frame point physics.
//!
//! One call to [`update_points`] advances every point by one frame:
//! pointer repulsion, ambient drift, speed clamp, integration and the
//! boundary policy, in that order.

use super::config::{BoundaryPolicy, NetworkConfig};
use super::points::{Point, wrap};
use super::state::PointerState;

/// Angular speed of the ambient drift, per millisecond.
const DRIFT_TIME_SCALE: f64 = 0.002;
/// Phase shift of the ambient drift, per pixel of x.
const DRIFT_SPACE_SCALE: f64 = 0.01;

/// Logical canvas size the simulation runs in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Bounds {
	/// Bounds of `width` x `height`.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Both dimensions are positive and finite.
	pub fn is_drawable(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}

	/// `(x, y)` lies in `[0, width) x [0, height)`.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
	}
}

/// Speed cap for a point, lower for floating points.
pub fn speed_cap(point: &Point, config: &NetworkConfig) -> f64 {
	if point.layer.is_floating() {
		config.floating_speed_cap
	} else {
		config.speed_cap
	}
}

/// Advance all points by one frame in place.
///
/// `time_ms` is wall-clock time and only phases the ambient drift, so a
/// fixed value gives reproducible results in tests.
pub fn update_points(
	points: &mut [Point],
	pointer: &PointerState,
	bounds: Bounds,
	time_ms: f64,
	config: &NetworkConfig,
) {
	if !bounds.is_drawable() {
		return;
	}

	for point in points.iter_mut() {
		point.radius = point.base_radius;

		if let Some((px, py)) = pointer.position {
			repel(point, px, py, config);
		}

		point.vy += (time_ms * DRIFT_TIME_SCALE + point.x * DRIFT_SPACE_SCALE).sin()
			* config.oscillation_amplitude;

		let cap = speed_cap(point, config);
		clamp_speed(point, cap);

		point.x += point.vx;
		point.y += point.vy;

		match config.boundary {
			BoundaryPolicy::Wrap => {
				point.x = wrap(point.x, bounds.width);
				point.y = wrap(point.y, bounds.height);
			}
			BoundaryPolicy::Reflect => {
				(point.x, point.vx) = reflect(point.x, point.vx, bounds.width);
				(point.y, point.vy) = reflect(point.y, point.vy, bounds.height);
			}
		}
	}
}

/// Push `point` away from the pointer at `(px, py)` if it is inside the
/// repulsion field. The impulse grows linearly towards the pointer.
fn repel(point: &mut Point, px: f64, py: f64, config: &NetworkConfig) {
	let radius = config.pointer_repulsion_radius;
	let (dx, dy) = (px - point.x, py - point.y);
	let distance = (dx * dx + dy * dy).sqrt();
	if distance >= radius {
		return;
	}

	let force = (radius - distance) / config.repulsion_damping;
	point.vx -= dx * force;
	point.vy -= dy * force;

	if config.pointer_inflate {
		point.radius = point.base_radius * config.pointer_inflate_scale;
	}
}

fn clamp_speed(point: &mut Point, cap: f64) {
	let speed = point.speed();
	if speed > cap && speed > 0.0 {
		point.vx = point.vx / speed * cap;
		point.vy = point.vy / speed * cap;
	}
}

/// Mirror `v` back into `[0, extent)`, flipping `velocity` if it bounced.
fn reflect(v: f64, velocity: f64, extent: f64) -> (f64, f64) {
	let (mirrored, velocity) = if v < 0.0 {
		(-v, velocity.abs())
	} else if v >= extent {
		(2.0 * extent - v, -velocity.abs())
	} else {
		return (v, velocity);
	};
	// Only reachable when a single step is longer than the canvas
	if (0.0..extent).contains(&mirrored) {
		(mirrored, velocity)
	} else {
		(wrap(mirrored, extent), velocity)
	}
}
