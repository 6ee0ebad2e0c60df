//! Animation lifecycle.
//!
//! [`AnimationDriver`] owns the [`NetworkState`] and walks it through
//! `Unmounted → Initializing → Running ⇄ Resizing → Unmounted`. Everything
//! that touches the browser goes through a [`FrameHost`], so the state
//! machine runs the same against a real canvas or a test double.

use log::{debug, info, warn};
use thiserror::Error;

use super::state::NetworkState;

/// Handle returned by a frame request, used to cancel it.
pub type FrameId = i32;

/// Failures talking to the hosting page. None of them are fatal to the page;
/// the animation just does not run.
#[derive(Debug, Error)]
pub enum HostError {
	/// `web_sys::window()` returned nothing.
	#[error("no window available")]
	NoWindow,
	/// The canvas refused a 2d context.
	#[error("2d context unavailable: {0}")]
	NoContext(String),
	/// Browser callbacks were never bound.
	#[error("callbacks are not bound to a driver")]
	Unbound,
	/// `addEventListener` threw.
	#[error("failed to attach {event} listener: {reason}")]
	Listener {
		/// DOM event name.
		event: &'static str,
		/// What the browser reported.
		reason: String,
	},
	/// `requestAnimationFrame` threw.
	#[error("animation frame request failed: {0}")]
	FrameRequest(String),
}

/// Where a driver is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Not mounted, or torn down.
	Unmounted,
	/// Sizing the surface and seeding points.
	Initializing,
	/// Frames are being scheduled.
	Running,
	/// Handling a resize between frames.
	Resizing,
}

/// The page-side half of the animation: surface, frame scheduling and
/// input listeners.
pub trait FrameHost {
	/// Container size in CSS pixels.
	fn layout_size(&self) -> (f64, f64);

	/// Physical pixels per CSS pixel.
	fn device_pixel_ratio(&self) -> f64;

	/// Size the backing store to `width * dpr` by `height * dpr` and make
	/// drawing commands use CSS pixels.
	fn configure_surface(&mut self, width: f64, height: f64, dpr: f64);

	/// Start delivering resize, pointer-move and pointer-leave events.
	fn attach_listeners(&mut self) -> Result<(), HostError>;

	/// Stop delivering events. No-op when nothing is attached.
	fn detach_listeners(&mut self);

	/// Ask for one frame callback.
	fn request_frame(&mut self) -> Result<FrameId, HostError>;

	/// Drop a pending frame callback.
	fn cancel_frame(&mut self, id: FrameId);

	/// Draw `state`.
	fn present(&mut self, state: &NetworkState);

	/// Drop the drawing surface and any callbacks. The host is inert after.
	fn release_surface(&mut self);
}

/// Runs one network animation on one host.
pub struct AnimationDriver<H: FrameHost> {
	host: H,
	state: NetworkState,
	phase: Phase,
	pending_frame: Option<FrameId>,
	torn_down: bool,
}

impl<H: FrameHost> AnimationDriver<H> {
	/// Wrap `host` and `state`. Nothing runs until [`Self::mount`].
	pub fn new(host: H, state: NetworkState) -> Self {
		Self {
			host,
			state,
			phase: Phase::Unmounted,
			pending_frame: None,
			torn_down: false,
		}
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Simulation state.
	pub fn state(&self) -> &NetworkState {
		&self.state
	}

	/// The host.
	pub fn host(&self) -> &H {
		&self.host
	}

	/// Mutable access to the host.
	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	/// A frame callback is outstanding.
	pub fn has_pending_frame(&self) -> bool {
		self.pending_frame.is_some()
	}

	/// Size the surface, create the points, attach listeners and schedule
	/// the first frame.
	///
	/// Does nothing if already mounted or torn down. On error the driver is
	/// torn down before returning.
	pub fn mount(&mut self) -> Result<(), HostError> {
		if self.phase != Phase::Unmounted || self.torn_down {
			return Ok(());
		}

		self.phase = Phase::Initializing;
		self.reconfigure();

		if let Err(e) = self.host.attach_listeners() {
			self.teardown();
			return Err(e);
		}

		self.phase = Phase::Running;
		match self.host.request_frame() {
			Ok(id) => self.pending_frame = Some(id),
			Err(e) => {
				self.teardown();
				return Err(e);
			}
		}

		info!(
			"neural-canvas: mounted {}x{} with {} points",
			self.state.bounds.width,
			self.state.bounds.height,
			self.state.points.len()
		);
		Ok(())
	}

	/// One animation frame: update, rebuild lines, draw, reschedule.
	///
	/// Ignored unless running, so a callback that slips past teardown does
	/// not touch the released surface.
	pub fn on_frame(&mut self, time_ms: f64) {
		if self.phase != Phase::Running {
			return;
		}
		self.pending_frame = None;

		// Container may not have been laid out at mount
		if !self.state.bounds.is_drawable() {
			self.reconfigure();
		}

		self.state.step(time_ms);
		self.host.present(&self.state);

		match self.host.request_frame() {
			Ok(id) => self.pending_frame = Some(id),
			Err(e) => warn!("neural-canvas: animation stopped: {}", e),
		}
	}

	/// Re-measure and rebuild the point set from scratch.
	pub fn on_resize(&mut self) {
		if self.phase != Phase::Running {
			return;
		}
		self.phase = Phase::Resizing;
		self.reconfigure();
		self.phase = Phase::Running;
		debug!(
			"neural-canvas: resized to {}x{}",
			self.state.bounds.width, self.state.bounds.height
		);
	}

	/// Pointer moved to `(x, y)` in canvas CSS pixels.
	pub fn on_pointer_move(&mut self, x: f64, y: f64) {
		if self.phase != Phase::Unmounted {
			self.state.pointer.set(x, y);
		}
	}

	/// Pointer left the canvas.
	pub fn on_pointer_leave(&mut self) {
		self.state.pointer.clear();
	}

	/// Cancel the pending frame, detach listeners and release the surface.
	///
	/// Safe to call any number of times, and before `mount` finished.
	pub fn teardown(&mut self) {
		if self.torn_down {
			return;
		}

		if let Some(id) = self.pending_frame.take() {
			self.host.cancel_frame(id);
		}
		self.host.detach_listeners();
		self.host.release_surface();
		self.state.pointer.clear();

		self.phase = Phase::Unmounted;
		self.torn_down = true;
		info!("neural-canvas: torn down");
	}

	fn reconfigure(&mut self) {
		let (width, height) = self.host.layout_size();
		let dpr = self.host.device_pixel_ratio();
		let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };

		self.host.configure_surface(width, height, dpr);
		self.state.resize(width, height);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::config::NetworkConfig;
	use super::*;

	#[derive(Default)]
	struct RecordingHost {
		size: (f64, f64),
		dpr: f64,
		backing: (f64, f64),
		scheduled: Vec<FrameId>,
		next_frame: FrameId,
		listeners: usize,
		presented: usize,
		released: bool,
		fail_attach: bool,
	}

	impl FrameHost for RecordingHost {
		fn layout_size(&self) -> (f64, f64) {
			self.size
		}

		fn device_pixel_ratio(&self) -> f64 {
			self.dpr
		}

		fn configure_surface(&mut self, width: f64, height: f64, dpr: f64) {
			self.backing = (width * dpr, height * dpr);
		}

		fn attach_listeners(&mut self) -> Result<(), HostError> {
			if self.fail_attach {
				return Err(HostError::Listener {
					event: "resize",
					reason: "test".into(),
				});
			}
			self.listeners = 3;
			Ok(())
		}

		fn detach_listeners(&mut self) {
			self.listeners = 0;
		}

		fn request_frame(&mut self) -> Result<FrameId, HostError> {
			self.next_frame += 1;
			self.scheduled.push(self.next_frame);
			Ok(self.next_frame)
		}

		fn cancel_frame(&mut self, id: FrameId) {
			self.scheduled.retain(|&f| f != id);
		}

		fn present(&mut self, _state: &NetworkState) {
			self.presented += 1;
		}

		fn release_surface(&mut self) {
			self.released = true;
		}
	}

	fn driver(size: (f64, f64)) -> AnimationDriver<RecordingHost> {
		let host = RecordingHost {
			size,
			dpr: 2.0,
			..Default::default()
		};
		let state = NetworkState::with_rng(NetworkConfig::default(), StdRng::seed_from_u64(1));
		AnimationDriver::new(host, state)
	}

	/// Fire the most recent frame callback, like the browser would.
	fn fire(d: &mut AnimationDriver<RecordingHost>, time_ms: f64) {
		assert_eq!(d.host().scheduled.len(), 1, "expected exactly one pending frame");
		d.host_mut().scheduled.clear();
		d.on_frame(time_ms);
	}

	#[test]
	fn mount_starts_running() {
		let mut d = driver((800.0, 600.0));
		assert_eq!(d.phase(), Phase::Unmounted);
		d.mount().unwrap();

		assert_eq!(d.phase(), Phase::Running);
		assert_eq!(d.host().backing, (1600.0, 1200.0));
		assert_eq!(d.host().listeners, 3);
		assert_eq!(d.host().scheduled.len(), 1);
		assert_eq!(d.state().points.len(), 144);
	}

	#[test]
	fn each_frame_presents_and_reschedules() {
		let mut d = driver((800.0, 600.0));
		d.mount().unwrap();
		for i in 0..10 {
			fire(&mut d, i as f64 * 16.0);
		}
		assert_eq!(d.host().presented, 10);
		assert_eq!(d.host().scheduled.len(), 1);
		assert!(!d.state().lines.is_empty());
	}

	#[test]
	fn teardown_twice_leaves_nothing_behind() {
		let mut d = driver((800.0, 600.0));
		d.mount().unwrap();
		fire(&mut d, 0.0);

		d.teardown();
		d.teardown();

		assert_eq!(d.phase(), Phase::Unmounted);
		assert!(d.host().scheduled.is_empty());
		assert_eq!(d.host().listeners, 0);
		assert!(d.host().released);
		assert!(!d.has_pending_frame());
	}

	#[test]
	fn teardown_before_mount_is_safe() {
		let mut d = driver((800.0, 600.0));
		d.teardown();
		assert!(d.host().released);

		// a torn down driver cannot be revived
		d.mount().unwrap();
		assert_eq!(d.phase(), Phase::Unmounted);
		assert!(d.host().scheduled.is_empty());
	}

	#[test]
	fn stale_frame_after_teardown_is_ignored() {
		let mut d = driver((800.0, 600.0));
		d.mount().unwrap();
		d.teardown();

		d.on_frame(16.0);
		assert_eq!(d.host().presented, 0);
		assert!(d.host().scheduled.is_empty());
	}

	#[test]
	fn failed_attach_tears_down() {
		let mut d = driver((800.0, 600.0));
		d.host_mut().fail_attach = true;

		assert!(d.mount().is_err());
		assert_eq!(d.phase(), Phase::Unmounted);
		assert!(d.host().scheduled.is_empty());
		assert!(d.host().released);
	}

	#[test]
	fn resize_from_zero_creates_points() {
		let mut d = driver((0.0, 0.0));
		d.mount().unwrap();
		assert!(d.state().points.is_empty());
		fire(&mut d, 0.0);
		assert!(d.state().points.is_empty());

		d.host_mut().size = (800.0, 600.0);
		d.on_resize();

		assert_eq!(d.phase(), Phase::Running);
		assert_eq!(d.state().points.len(), 144);
		for p in &d.state().points {
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!(d.state().bounds.contains(p.x, p.y));
		}
	}

	#[test]
	fn late_layout_is_picked_up_by_the_next_frame() {
		let mut d = driver((0.0, 0.0));
		d.mount().unwrap();
		d.host_mut().size = (400.0, 300.0);
		fire(&mut d, 0.0);
		assert_eq!(d.state().points.len(), 144);
	}

	#[test]
	fn pointer_events_update_shared_position() {
		let mut d = driver((800.0, 600.0));
		d.mount().unwrap();

		d.on_pointer_move(10.0, 20.0);
		assert_eq!(d.state().pointer.position, Some((10.0, 20.0)));
		d.on_pointer_leave();
		assert_eq!(d.state().pointer.position, None);
	}

	#[test]
	fn invalid_dpr_falls_back_to_one() {
		let mut d = driver((100.0, 50.0));
		d.host_mut().dpr = f64::NAN;
		d.mount().unwrap();
		assert_eq!(d.host().backing, (100.0, 50.0));
	}
}
