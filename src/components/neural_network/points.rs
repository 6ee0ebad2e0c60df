//! Point model and initial placement.
//!
//! Points are laid out in vertical "layers" like the columns of a neural
//! network diagram, plus a sprinkling of unstructured floating points.

use rand::Rng;

use super::config::NetworkConfig;

/// Floating points start slower than layered ones.
const FLOATING_SPEED_SCALE: f64 = 0.5;
const FLOATING_RADIUS_SCALE: f64 = 0.8;

/// Structural grouping of a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
	/// Column `n` of the network, counted from the left.
	Structured(u32),
	/// Unstructured point scattered over the whole canvas.
	Floating,
}

impl Layer {
	/// Index used for adjacency arithmetic. Floating points sit at `-1`,
	/// next to the first column.
	pub fn index(self) -> i64 {
		match self {
			Layer::Structured(n) => n as i64,
			Layer::Floating => -1,
		}
	}

	/// Same layer or neighbouring layers.
	pub fn is_adjacent(self, other: Layer) -> bool {
		(self.index() - other.index()).abs() <= 1
	}

	/// Not part of any structured layer.
	pub fn is_floating(self) -> bool {
		matches!(self, Layer::Floating)
	}
}

/// A single animated particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
	/// Horizontal position in CSS pixels.
	pub x: f64,
	/// Vertical position in CSS pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
	/// Size the point returns to every frame.
	pub base_radius: f64,
	/// Size drawn this frame.
	pub radius: f64,
	/// Layer the point belongs to.
	pub layer: Layer,
	/// Opacity baseline, fixed at creation.
	pub alpha: f64,
}

impl Point {
	/// Magnitude of the velocity.
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}

	/// Euclidean distance to `other`.
	pub fn distance_to(&self, other: &Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Size multiplier for a layer: 1.0 at the middle layer, shrinking towards
/// the outer layers to fake depth.
pub fn layer_scale(layer: usize, layer_count: usize) -> f64 {
	if layer_count == 0 {
		return 1.0;
	}
	let middle = layer_count as f64 / 2.0;
	1.0 - (layer as f64 - middle).abs() / layer_count as f64
}

/// Wrap `v` into `[0, extent)`.
pub(crate) fn wrap(v: f64, extent: f64) -> f64 {
	let wrapped = v.rem_euclid(extent);
	// rem_euclid rounds tiny negatives up to `extent`
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// Create the full point set for a `width` x `height` canvas.
///
/// Returns an empty set when either dimension is not a positive finite
/// number; the caller retries on the next resize.
pub fn initialize_points(
	width: f64,
	height: f64,
	config: &NetworkConfig,
	rng: &mut impl Rng,
) -> Vec<Point> {
	if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
		return Vec::new();
	}

	let layer_count = config.layer_count;
	let per_layer = config.points_per_layer();
	let layered_total = layer_count.saturating_mul(per_layer);
	let floating = (config.floating_fraction * layered_total as f64).round() as usize;

	let mut points = Vec::with_capacity(layered_total.saturating_add(floating));
	let spread = width * config.layer_spread;
	let spacing = height / (per_layer + 1) as f64;
	let bias = config.horizontal_bias;

	for layer in 0..layer_count {
		let layer_x = width * (layer + 1) as f64 / (layer_count + 1) as f64;
		let radius = config.base_point_radius * layer_scale(layer, layer_count);

		for i in 0..per_layer {
			let x = layer_x + rng.gen_range(-0.5..0.5) * spread;
			let y = spacing * (i + 1) as f64 + rng.gen_range(-0.5..0.5) * config.vertical_jitter;

			points.push(Point {
				x: wrap(x, width),
				y: wrap(y, height),
				vx: rng.gen_range(-1.0..1.0) * config.point_speed * bias,
				vy: rng.gen_range(-1.0..1.0) * config.point_speed * (1.0 - bias),
				base_radius: radius,
				radius,
				layer: Layer::Structured(layer as u32),
				alpha: rng.gen_range(0.7..1.0),
			});
		}
	}

	let floating_speed = config.point_speed * FLOATING_SPEED_SCALE;
	let floating_radius = config.base_point_radius * FLOATING_RADIUS_SCALE;
	for _ in 0..floating {
		points.push(Point {
			x: rng.gen_range(0.0..width),
			y: rng.gen_range(0.0..height),
			vx: rng.gen_range(-0.5..0.5) * floating_speed,
			vy: rng.gen_range(-0.5..0.5) * floating_speed,
			base_radius: floating_radius,
			radius: floating_radius,
			layer: Layer::Floating,
			alpha: rng.gen_range(0.5..0.8),
		});
	}

	points
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn rng() -> StdRng {
		StdRng::seed_from_u64(0x5eed)
	}

	#[test]
	fn default_layout_counts() {
		let config = NetworkConfig {
			num_points: 120,
			layer_count: 4,
			floating_fraction: 0.2,
			..NetworkConfig::default()
		};
		let points = initialize_points(800.0, 600.0, &config, &mut rng());

		assert_eq!(points.len(), 144);
		let floating = points.iter().filter(|p| p.layer.is_floating()).count();
		assert_eq!(floating, 24);
		for layer in 0..4 {
			let count = points
				.iter()
				.filter(|p| p.layer == Layer::Structured(layer))
				.count();
			assert_eq!(count, 30);
		}
	}

	#[test]
	fn all_points_start_inside_bounds() {
		let config = NetworkConfig {
			vertical_jitter: 400.0,
			layer_spread: 1.0,
			..NetworkConfig::default()
		};
		for p in initialize_points(320.0, 200.0, &config, &mut rng()) {
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!((0.0..320.0).contains(&p.x), "x out of bounds: {}", p.x);
			assert!((0.0..200.0).contains(&p.y), "y out of bounds: {}", p.y);
		}
	}

	#[test]
	fn degenerate_dimensions_defer_creation() {
		let config = NetworkConfig::default();
		assert!(initialize_points(0.0, 0.0, &config, &mut rng()).is_empty());
		assert!(initialize_points(-10.0, 600.0, &config, &mut rng()).is_empty());
		assert!(initialize_points(800.0, f64::NAN, &config, &mut rng()).is_empty());
	}

	#[test]
	fn layered_velocity_favours_horizontal_motion() {
		let config = NetworkConfig {
			horizontal_bias: 1.0,
			..NetworkConfig::default()
		};
		for p in initialize_points(800.0, 600.0, &config, &mut rng()) {
			if !p.layer.is_floating() {
				assert_eq!(p.vy, 0.0);
			}
		}
	}

	#[test]
	fn size_is_a_function_of_layer_only() {
		let config = NetworkConfig::default();
		let points = initialize_points(800.0, 600.0, &config, &mut rng());
		for p in &points {
			if let Layer::Structured(n) = p.layer {
				let expected = config.base_point_radius * layer_scale(n as usize, 4);
				assert_eq!(p.base_radius, expected);
			}
		}
		assert!(layer_scale(2, 4) > layer_scale(0, 4));
		assert_eq!(layer_scale(2, 4), 1.0);
	}

	#[test]
	fn same_seed_same_layout() {
		let config = NetworkConfig::default();
		let a = initialize_points(800.0, 600.0, &config, &mut rng());
		let b = initialize_points(800.0, 600.0, &config, &mut rng());
		assert_eq!(a, b);
	}

	#[test]
	fn floating_layer_is_adjacent_to_first_column() {
		assert!(Layer::Floating.is_adjacent(Layer::Structured(0)));
		assert!(Layer::Floating.is_adjacent(Layer::Floating));
		assert!(!Layer::Floating.is_adjacent(Layer::Structured(1)));
		assert!(Layer::Structured(2).is_adjacent(Layer::Structured(3)));
		assert!(!Layer::Structured(0).is_adjacent(Layer::Structured(2)));
	}

	#[test]
	fn wrap_lands_in_half_open_range() {
		assert_eq!(wrap(-1.0, 100.0), 99.0);
		assert_eq!(wrap(100.0, 100.0), 0.0);
		assert_eq!(wrap(250.0, 100.0), 50.0);
		assert!(wrap(-1.0e-18, 100.0) < 100.0);
	}
}
