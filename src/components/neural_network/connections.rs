//! Proximity links between points.
//!
//! Links are rebuilt from scratch every frame. Pairs in the same or
//! neighbouring layers link at the full connection radius; pairs further
//! apart need to be twice as close, which is what makes the layer structure
//! visible instead of a uniform mesh.
//!
//! The pass is O(n²). That is fine for the ~150 points the presets use; a
//! much larger point budget would need a spatial grid.

use super::points::Point;

const ADJACENT_ALPHA: f64 = 0.8;
const DISTANT_ALPHA: f64 = 0.4;
const DISTANT_RADIUS_SCALE: f64 = 0.5;

/// A link between two points, by index into the point slice it was built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
	/// Index of the lower-numbered endpoint.
	pub from: usize,
	/// Index of the higher-numbered endpoint.
	pub to: usize,
	/// Opacity in `(0, 0.8]`.
	pub alpha: f64,
}

/// Link distance between `a` and `b`'s layers.
pub fn effective_radius(a: &Point, b: &Point, connection_radius: f64) -> f64 {
	if a.layer.is_adjacent(b.layer) {
		connection_radius
	} else {
		connection_radius * DISTANT_RADIUS_SCALE
	}
}

/// Line alpha for the pair, or `None` if they are too far apart to link.
/// Symmetric in its two point arguments.
pub fn link_alpha(a: &Point, b: &Point, connection_radius: f64) -> Option<f64> {
	let max = effective_radius(a, b, connection_radius);
	let distance = a.distance_to(b);
	if max <= 0.0 || distance >= max {
		return None;
	}
	let weight = if a.layer.is_adjacent(b.layer) {
		ADJACENT_ALPHA
	} else {
		DISTANT_ALPHA
	};
	Some((1.0 - distance / max) * weight)
}

/// Build the links for `points`.
pub fn build_lines(points: &[Point], connection_radius: f64) -> Vec<Line> {
	let mut lines = Vec::new();
	build_lines_into(&mut lines, points, connection_radius);
	lines
}

/// Like [`build_lines`], reusing `lines`' allocation. Each unordered pair is
/// emitted once, with `from < to`.
pub fn build_lines_into(lines: &mut Vec<Line>, points: &[Point], connection_radius: f64) {
	lines.clear();
	for (i, a) in points.iter().enumerate() {
		for (j, b) in points.iter().enumerate().skip(i + 1) {
			if let Some(alpha) = link_alpha(a, b, connection_radius) {
				lines.push(Line { from: i, to: j, alpha });
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::rngs::StdRng;
	use rand::{Rng, SeedableRng};

	use super::super::points::Layer;
	use super::*;

	fn at(x: f64, y: f64, layer: Layer) -> Point {
		Point {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			base_radius: 1.0,
			radius: 1.0,
			layer,
			alpha: 1.0,
		}
	}

	#[test]
	fn linking_is_symmetric() {
		let mut rng = StdRng::seed_from_u64(99);
		let layers = [
			Layer::Floating,
			Layer::Structured(0),
			Layer::Structured(1),
			Layer::Structured(3),
		];
		for _ in 0..500 {
			let a = at(
				rng.gen_range(0.0..400.0),
				rng.gen_range(0.0..400.0),
				layers[rng.gen_range(0..layers.len())],
			);
			let b = at(
				rng.gen_range(0.0..400.0),
				rng.gen_range(0.0..400.0),
				layers[rng.gen_range(0..layers.len())],
			);
			assert_eq!(link_alpha(&a, &b, 250.0), link_alpha(&b, &a, 250.0));
		}
	}

	#[test]
	fn distant_layers_need_half_the_distance() {
		let radius = 250.0;
		let d = 200.0;
		let same = (at(0.0, 0.0, Layer::Structured(1)), at(d, 0.0, Layer::Structured(1)));
		let far = (at(0.0, 0.0, Layer::Structured(0)), at(d, 0.0, Layer::Structured(3)));

		assert!(link_alpha(&same.0, &same.1, radius).is_some());
		assert!(link_alpha(&far.0, &far.1, radius).is_none());

		assert_eq!(effective_radius(&same.0, &same.1, radius), 2.0 * effective_radius(&far.0, &far.1, radius));
	}

	#[test]
	fn alpha_fades_with_distance() {
		let a = at(0.0, 0.0, Layer::Structured(0));
		let near = link_alpha(&a, &at(10.0, 0.0, Layer::Structured(1)), 100.0).unwrap();
		let far = link_alpha(&a, &at(90.0, 0.0, Layer::Structured(1)), 100.0).unwrap();
		assert!(near > far);
		assert!((near - 0.9 * 0.8).abs() < 1e-12);

		let distant = link_alpha(&a, &at(25.0, 0.0, Layer::Structured(2)), 100.0).unwrap();
		assert!((distant - 0.5 * 0.4).abs() < 1e-12);
	}

	#[test]
	fn threshold_is_exclusive() {
		let a = at(0.0, 0.0, Layer::Structured(0));
		let b = at(100.0, 0.0, Layer::Structured(0));
		assert!(link_alpha(&a, &b, 100.0).is_none());
	}

	#[test]
	fn each_pair_is_emitted_once() {
		let points = vec![
			at(0.0, 0.0, Layer::Structured(0)),
			at(10.0, 0.0, Layer::Structured(0)),
			at(20.0, 0.0, Layer::Structured(0)),
		];
		let lines = build_lines(&points, 100.0);
		assert_eq!(lines.len(), 3);
		assert!(lines.iter().all(|l| l.from < l.to));
	}

	#[test]
	fn reuse_clears_previous_frame() {
		let mut lines = vec![Line {
			from: 7,
			to: 9,
			alpha: 1.0,
		}];
		build_lines_into(&mut lines, &[at(0.0, 0.0, Layer::Floating)], 100.0);
		assert!(lines.is_empty());
	}
}
