//! Engine configuration.
//!
//! Every tunable of the animation lives in [`NetworkConfig`]. Values are
//! plain data so tests can build any configuration directly, and the page can
//! override any subset through a JSON script element:
//!
//! ```html
//! <script id="network-config" type="application/json">
//!   { "num_points": 80, "connection_radius": 180, "theme": "ember" }
//! </script>
//! ```
//!
//! Missing fields fall back to the [`Variant::Hero`] values.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use super::theme::ThemeName;

/// What happens when a point crosses the canvas edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
	/// Reappear at the opposite edge.
	#[default]
	Wrap,
	/// Mirror back inside and flip the velocity component.
	Reflect,
}

/// Tunables for point placement, physics and connections.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	/// Layered point budget, split evenly across `layer_count` layers.
	pub num_points: usize,
	/// Number of vertical "network layers".
	pub layer_count: usize,
	/// Link distance for same/adjacent layer pairs, in CSS pixels.
	pub connection_radius: f64,
	/// Radius of a middle-layer point.
	pub base_point_radius: f64,
	/// Initial speed scale, pixels per frame.
	pub point_speed: f64,
	/// Speed cap for layered points.
	pub speed_cap: f64,
	/// Speed cap for floating points.
	pub floating_speed_cap: f64,
	/// Floating points created, as a fraction of the layered total.
	pub floating_fraction: f64,
	/// Share of the initial speed that is horizontal, in `[0, 1]`.
	pub horizontal_bias: f64,
	/// Horizontal jitter of a layer, as a fraction of canvas width.
	pub layer_spread: f64,
	/// Vertical jitter range in pixels.
	pub vertical_jitter: f64,
	/// Radius of the pointer repulsion field.
	pub pointer_repulsion_radius: f64,
	/// Divides the repulsion impulse. Larger is gentler.
	pub repulsion_damping: f64,
	/// Inflate points inside the repulsion field for the current frame.
	pub pointer_inflate: bool,
	/// Radius multiplier for inflated points.
	pub pointer_inflate_scale: f64,
	/// Vertical velocity added per frame by the ambient drift.
	pub oscillation_amplitude: f64,
	/// What happens at the canvas edges.
	pub boundary: BoundaryPolicy,
	/// Fixed RNG seed. `None` seeds from the host.
	pub seed: Option<u64>,
	/// Visual theme for the renderer.
	pub theme: ThemeName,
}

/// Upper bound on layered points. Line building is quadratic in this.
pub const MAX_POINTS: usize = 1_000;
/// Upper bound on floating points as a fraction of the layered ones.
pub const MAX_FLOATING_FRACTION: f64 = 1.0;

impl Default for NetworkConfig {
	fn default() -> Self {
		Variant::Hero.config()
	}
}

impl NetworkConfig {
	/// Points placed in each layer.
	pub fn points_per_layer(&self) -> usize {
		if self.layer_count == 0 {
			0
		} else {
			self.num_points / self.layer_count
		}
	}

	/// Replace values that would break the simulation with defaults or the
	/// nearest valid value.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();

		fn non_negative(v: f64, fallback: f64) -> f64 {
			if v.is_finite() && v >= 0.0 { v } else { fallback }
		}
		fn positive(v: f64, fallback: f64) -> f64 {
			if v.is_finite() && v > 0.0 { v } else { fallback }
		}
		fn unit(v: f64, fallback: f64) -> f64 {
			if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback }
		}

		self.connection_radius = non_negative(self.connection_radius, defaults.connection_radius);
		self.base_point_radius = non_negative(self.base_point_radius, defaults.base_point_radius);
		self.point_speed = non_negative(self.point_speed, defaults.point_speed);
		self.speed_cap = non_negative(self.speed_cap, defaults.speed_cap);
		self.floating_speed_cap = non_negative(self.floating_speed_cap, defaults.floating_speed_cap);
		self.floating_fraction = non_negative(self.floating_fraction, defaults.floating_fraction)
			.min(MAX_FLOATING_FRACTION);
		self.num_points = self.num_points.min(MAX_POINTS);
		self.layer_count = self.layer_count.min(self.num_points.max(1));
		self.horizontal_bias = unit(self.horizontal_bias, defaults.horizontal_bias);
		self.layer_spread = unit(self.layer_spread, defaults.layer_spread);
		self.vertical_jitter = non_negative(self.vertical_jitter, defaults.vertical_jitter);
		self.pointer_repulsion_radius =
			non_negative(self.pointer_repulsion_radius, defaults.pointer_repulsion_radius);
		self.repulsion_damping = positive(self.repulsion_damping, defaults.repulsion_damping);
		self.pointer_inflate_scale =
			positive(self.pointer_inflate_scale, defaults.pointer_inflate_scale);
		self.oscillation_amplitude =
			non_negative(self.oscillation_amplitude, defaults.oscillation_amplitude);
		self
	}
}

/// Built-in presets. They differ only in presentation tuning; `Hero` is the
/// canonical set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
	/// Full-bleed hero banner: dense, wide links, strong glow.
	#[default]
	Hero,
	/// Small illustration card: fewer points, shorter links.
	Card,
	/// Section backdrop: many faint points, no inflation.
	Backdrop,
}

impl Variant {
	/// Configuration for this preset.
	pub fn config(self) -> NetworkConfig {
		let hero = NetworkConfig {
			num_points: 120,
			layer_count: 4,
			connection_radius: 250.0,
			base_point_radius: 2.5,
			point_speed: 0.4,
			speed_cap: 2.0,
			floating_speed_cap: 1.5,
			floating_fraction: 0.2,
			horizontal_bias: 0.7,
			layer_spread: 0.15,
			vertical_jitter: 100.0,
			pointer_repulsion_radius: 200.0,
			repulsion_damping: 8000.0,
			pointer_inflate: true,
			pointer_inflate_scale: 1.2,
			oscillation_amplitude: 0.01,
			boundary: BoundaryPolicy::Wrap,
			seed: None,
			theme: ThemeName::Neural,
		};

		match self {
			Variant::Hero => hero,
			Variant::Card => NetworkConfig {
				num_points: 60,
				layer_count: 3,
				connection_radius: 160.0,
				vertical_jitter: 60.0,
				pointer_repulsion_radius: 120.0,
				..hero
			},
			Variant::Backdrop => NetworkConfig {
				num_points: 150,
				layer_count: 5,
				connection_radius: 200.0,
				base_point_radius: 2.0,
				point_speed: 0.3,
				pointer_inflate: false,
				theme: ThemeName::DeepSea,
				..hero
			},
		}
	}
}

/// Load configuration overrides from a script element with
/// `id="network-config"`.
///
/// Returns `None` when the element is absent or its JSON does not parse.
pub fn load_config() -> Option<NetworkConfig> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id("network-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_config(&json_text) {
		Ok(config) => {
			info!(
				"neural-canvas: loaded config ({} points, {} layers)",
				config.num_points, config.layer_count
			);
			Some(config)
		}
		Err(e) => {
			warn!("neural-canvas: failed to parse network config: {}", e);
			None
		}
	}
}

/// Parse and sanitize a JSON configuration document.
pub fn parse_config(json: &str) -> Result<NetworkConfig, serde_json::Error> {
	serde_json::from_str::<NetworkConfig>(json).map(NetworkConfig::sanitized)
}
