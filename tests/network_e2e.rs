//! End-to-end tests for the network engine through its public API.

// Test target links every lib dep, silence noisy lint.
#![allow(unused_crate_dependencies)]

use neural_canvas::components::neural_network::{
	AnimationDriver, Bounds, FrameHost, FrameId, HostError, Layer, NetworkConfig, NetworkState,
	Phase, PointerState, build_lines, initialize_points, update_points,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn scenario_config() -> NetworkConfig {
	NetworkConfig {
		num_points: 120,
		layer_count: 4,
		floating_fraction: 0.2,
		seed: Some(42),
		..NetworkConfig::default()
	}
}

/// Minimal host that counts what the driver asks of it.
#[derive(Default)]
struct CountingHost {
	size: (f64, f64),
	pending: Vec<FrameId>,
	next: FrameId,
	listeners: usize,
	frames_drawn: usize,
	lines_on_first_frame: Option<usize>,
}

impl FrameHost for CountingHost {
	fn layout_size(&self) -> (f64, f64) {
		self.size
	}

	fn device_pixel_ratio(&self) -> f64 {
		1.0
	}

	fn configure_surface(&mut self, _width: f64, _height: f64, _dpr: f64) {}

	fn attach_listeners(&mut self) -> Result<(), HostError> {
		self.listeners += 3;
		Ok(())
	}

	fn detach_listeners(&mut self) {
		self.listeners = 0;
	}

	fn request_frame(&mut self) -> Result<FrameId, HostError> {
		self.next += 1;
		self.pending.push(self.next);
		Ok(self.next)
	}

	fn cancel_frame(&mut self, id: FrameId) {
		self.pending.retain(|&p| p != id);
	}

	fn present(&mut self, state: &NetworkState) {
		self.frames_drawn += 1;
		self.lines_on_first_frame.get_or_insert(state.lines.len());
	}

	fn release_surface(&mut self) {}
}

#[test]
fn first_frame_of_the_reference_scene() {
	let host = CountingHost {
		size: (800.0, 600.0),
		..Default::default()
	};
	let mut driver = AnimationDriver::new(host, NetworkState::new(scenario_config()));
	driver.mount().unwrap();

	let state = driver.state();
	assert_eq!(state.points.len(), 120 + 24);
	for p in &state.points {
		assert!(p.x.is_finite() && p.y.is_finite());
		assert!(state.bounds.contains(p.x, p.y));
	}

	driver.host_mut().pending.clear();
	driver.on_frame(16.0);
	assert!(driver.host().lines_on_first_frame.unwrap() >= 1);
	assert_eq!(driver.host().pending.len(), 1);

	driver.teardown();
	driver.teardown();
	assert_eq!(driver.phase(), Phase::Unmounted);
	assert!(driver.host().pending.is_empty());
	assert_eq!(driver.host().listeners, 0);
}

#[test]
fn seeded_states_evolve_identically() {
	let run = || {
		let mut state = NetworkState::new(scenario_config());
		state.resize(800.0, 600.0);
		state.pointer.set(300.0, 200.0);
		for frame in 0..60 {
			state.step(frame as f64 * 16.0);
		}
		state.points
	};
	assert_eq!(run(), run());
}

#[test]
fn long_run_keeps_every_invariant() {
	let config = scenario_config();
	let bounds = Bounds::new(640.0, 480.0);
	let mut rng = StdRng::seed_from_u64(7);
	let mut points = initialize_points(bounds.width, bounds.height, &config, &mut rng);
	let mut pointer = PointerState::default();

	for frame in 0..1_000 {
		// sweep the pointer across the canvas, leaving it every 100 frames
		if frame % 100 < 80 {
			pointer.set((frame % 640) as f64, 240.0);
		} else {
			pointer.clear();
		}
		update_points(&mut points, &pointer, bounds, frame as f64 * 16.0, &config);

		for p in &points {
			assert!(bounds.contains(p.x, p.y));
			let cap = if p.layer == Layer::Floating {
				config.floating_speed_cap
			} else {
				config.speed_cap
			};
			assert!(p.speed() <= cap + 1e-9);
		}

		let lines = build_lines(&points, config.connection_radius);
		for line in &lines {
			assert!(line.from < line.to);
			assert!(line.alpha > 0.0 && line.alpha <= 0.8);
		}
	}
}
