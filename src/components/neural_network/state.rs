//! Animation state owned by one mounted canvas.
//!
//! [`NetworkState`] bundles the point set, the lines derived from it, the
//! last known pointer position and the RNG used for (re)initialization. The
//! driver mutates it once per frame; the renderer only reads it.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::NetworkConfig;
use super::connections::{Line, build_lines_into};
use super::physics::{Bounds, update_points};
use super::points::{Point, initialize_points};

/// Last known pointer location in logical canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// `None` while the pointer is outside the canvas.
	pub position: Option<(f64, f64)>,
}

impl PointerState {
	/// Pointer is at `(x, y)`.
	pub fn set(&mut self, x: f64, y: f64) {
		self.position = Some((x, y));
	}

	/// Pointer is gone.
	pub fn clear(&mut self) {
		self.position = None;
	}
}

/// Core animation state, created at mount and reset wholesale on resize.
pub struct NetworkState {
	/// Sanitized configuration.
	pub config: NetworkConfig,
	/// Current point set.
	pub points: Vec<Point>,
	/// Lines from the last step.
	pub lines: Vec<Line>,
	/// Latest pointer position.
	pub pointer: PointerState,
	/// Logical canvas size.
	pub bounds: Bounds,
	/// Wall-clock time of the last step, in milliseconds.
	pub time_ms: f64,
	rng: StdRng,
}

impl NetworkState {
	/// Create an empty state. Points appear on the first [`resize`] with a
	/// drawable size.
	///
	/// [`resize`]: NetworkState::resize
	pub fn new(config: NetworkConfig) -> Self {
		let seed = config.seed.unwrap_or_else(entropy_seed);
		Self::with_rng(config, StdRng::seed_from_u64(seed))
	}

	/// Create an empty state drawing randomness from `rng`.
	pub fn with_rng(config: NetworkConfig, rng: StdRng) -> Self {
		Self {
			config: config.sanitized(),
			points: Vec::new(),
			lines: Vec::new(),
			pointer: PointerState::default(),
			bounds: Bounds::default(),
			time_ms: 0.0,
			rng,
		}
	}

	/// Replace the point set for a new logical size. Nothing is carried over
	/// from the previous geometry.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = Bounds::new(width, height);
		self.points = initialize_points(width, height, &self.config, &mut self.rng);
		self.lines.clear();
		debug!(
			"neural-canvas: initialized {} points for {}x{}",
			self.points.len(),
			width,
			height
		);
	}

	/// Advance one frame: move the points, then rebuild the lines.
	pub fn step(&mut self, time_ms: f64) {
		self.time_ms = time_ms;
		update_points(
			&mut self.points,
			&self.pointer,
			self.bounds,
			time_ms,
			&self.config,
		);
		build_lines_into(&mut self.lines, &self.points, self.config.connection_radius);
	}
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
	use std::time::{SystemTime, UNIX_EPOCH};
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_nanos() as u64)
		.unwrap_or(0x9e37_79b9_7f4a_7c15)
}
