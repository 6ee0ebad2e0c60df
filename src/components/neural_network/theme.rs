//! Visual theming for the neural network animation.
//!
//! A [`Theme`] carries everything the renderer needs that is not physics:
//! the primary color, background treatment, line/point glow and the pointer
//! halo. Themes are selected by [`ThemeName`] so configuration can name one.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with opacity `a`, clamped to `[0, 1]`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string, hex when opaque.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background treatment painted before anything else each frame.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Solid fill, or the top stop of the gradient. `None` leaves the canvas
	/// transparent so the page shows through.
	pub color: Option<Color>,
	/// Bottom stop of a vertical gradient (ignored without `color`)
	pub color_secondary: Option<Color>,
}

/// Connection line style.
#[derive(Clone, Debug)]
pub struct LineStyle {
	/// Stroke width before the pulse is added
	pub width: f64,
	/// Alpha multiplier at the `to` end relative to the `from` end
	pub tail_fade: f64,
	/// Shadow blur radius before the pulse is added
	pub glow_radius: f64,
	/// Shadow color alpha multiplier
	pub glow_intensity: f64,
}

/// Point (particle) style.
#[derive(Clone, Debug)]
pub struct PointStyle {
	/// Alpha at the gradient center before the pulse and per-point alpha
	pub core_alpha: f64,
	/// How much the core is lightened relative to the primary color
	pub core_lighten: f64,
	/// Shadow blur radius before the pulse is added
	pub glow_radius: f64,
	/// Shadow color alpha
	pub glow_intensity: f64,
}

/// Shared glow pulse: `(sin(t * speed + phase) + 1) * amplitude`.
#[derive(Clone, Debug)]
pub struct PulseStyle {
	/// Angular speed per millisecond
	pub speed: f64,
	/// Peak glow added by the pulse.
	pub amplitude: f64,
	/// Extra blur pixels per unit of pulse
	pub blur_gain: f64,
	/// Per-point phase offset per pixel of x
	pub phase_per_px: f64,
}

impl PulseStyle {
	/// Pulse value at `time_ms`, optionally phase-shifted by an x coordinate.
	pub fn at(&self, time_ms: f64, x: f64) -> f64 {
		((time_ms * self.speed + x * self.phase_per_px).sin() + 1.0) * self.amplitude
	}
}

/// Soft light following the pointer.
#[derive(Clone, Debug)]
pub struct HaloStyle {
	/// Draw the halo at all.
	pub enabled: bool,
	/// Outer radius in CSS pixels.
	pub radius: f64,
	/// Opacity at the center.
	pub inner_alpha: f64,
	/// Opacity halfway out.
	pub mid_alpha: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Short identifier, matches [`ThemeName`].
	pub name: &'static str,
	/// Color every line, point and halo is derived from
	pub primary: Color,
	/// Canvas fill behind everything.
	pub background: BackgroundStyle,
	/// Line glow.
	pub line: LineStyle,
	/// Point glow.
	pub point: PointStyle,
	/// Shared pulse timing.
	pub pulse: PulseStyle,
	/// Pointer halo.
	pub halo: HaloStyle,
}

impl Theme {
	/// Indigo glow on a transparent background (default)
	pub fn neural() -> Self {
		Self {
			name: "neural",
			primary: Color::rgb(99, 102, 241),
			background: BackgroundStyle {
				color: None,
				color_secondary: None,
			},
			line: LineStyle {
				width: 2.0,
				tail_fade: 0.7,
				glow_radius: 40.0,
				glow_intensity: 1.0,
			},
			point: PointStyle {
				core_alpha: 0.9,
				core_lighten: 0.2,
				glow_radius: 40.0,
				glow_intensity: 1.0,
			},
			pulse: PulseStyle {
				speed: 0.003,
				amplitude: 0.2,
				blur_gain: 10.0,
				phase_per_px: 0.01,
			},
			halo: HaloStyle {
				enabled: true,
				radius: 150.0,
				inner_alpha: 0.2,
				mid_alpha: 0.1,
			},
		}
	}

	/// Warm amber on a dark brown gradient
	pub fn ember() -> Self {
		Self {
			name: "ember",
			primary: Color::rgb(230, 150, 90),
			background: BackgroundStyle {
				color: Some(Color::rgb(28, 24, 22)),
				color_secondary: Some(Color::rgb(35, 30, 28)),
			},
			line: LineStyle {
				width: 1.5,
				tail_fade: 0.7,
				glow_radius: 24.0,
				glow_intensity: 0.8,
			},
			point: PointStyle {
				core_alpha: 0.9,
				core_lighten: 0.3,
				glow_radius: 24.0,
				glow_intensity: 0.9,
			},
			pulse: PulseStyle {
				speed: 0.002,
				amplitude: 0.2,
				blur_gain: 8.0,
				phase_per_px: 0.01,
			},
			halo: HaloStyle {
				enabled: true,
				radius: 180.0,
				inner_alpha: 0.15,
				mid_alpha: 0.06,
			},
		}
	}

	/// Cyan on deep blue
	pub fn deep_sea() -> Self {
		Self {
			name: "deep_sea",
			primary: Color::rgb(90, 200, 230),
			background: BackgroundStyle {
				color: Some(Color::rgb(15, 25, 35)),
				color_secondary: Some(Color::rgb(20, 32, 45)),
			},
			line: LineStyle {
				width: 1.5,
				tail_fade: 0.6,
				glow_radius: 30.0,
				glow_intensity: 0.9,
			},
			point: PointStyle {
				core_alpha: 0.9,
				core_lighten: 0.25,
				glow_radius: 30.0,
				glow_intensity: 1.0,
			},
			pulse: PulseStyle {
				speed: 0.003,
				amplitude: 0.2,
				blur_gain: 10.0,
				phase_per_px: 0.01,
			},
			halo: HaloStyle {
				enabled: true,
				radius: 150.0,
				inner_alpha: 0.2,
				mid_alpha: 0.1,
			},
		}
	}

	/// No glow, no halo. Cheapest to draw.
	pub fn minimal() -> Self {
		Self {
			name: "minimal",
			primary: Color::rgb(130, 145, 165),
			background: BackgroundStyle {
				color: Some(Color::rgb(25, 28, 35)),
				color_secondary: None,
			},
			line: LineStyle {
				width: 1.0,
				tail_fade: 1.0,
				glow_radius: 0.0,
				glow_intensity: 0.0,
			},
			point: PointStyle {
				core_alpha: 0.9,
				core_lighten: 0.0,
				glow_radius: 0.0,
				glow_intensity: 0.0,
			},
			pulse: PulseStyle {
				speed: 0.0,
				amplitude: 0.0,
				blur_gain: 0.0,
				phase_per_px: 0.0,
			},
			halo: HaloStyle {
				enabled: false,
				radius: 0.0,
				inner_alpha: 0.0,
				mid_alpha: 0.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::neural()
	}
}

/// Names a built-in theme in configuration (`"neural"`, `"ember"`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
	/// [`Theme::neural`].
	#[default]
	Neural,
	/// [`Theme::ember`].
	Ember,
	/// [`Theme::deep_sea`].
	DeepSea,
	/// [`Theme::minimal`].
	Minimal,
}

impl From<ThemeName> for Theme {
	fn from(name: ThemeName) -> Self {
		match name {
			ThemeName::Neural => Theme::neural(),
			ThemeName::Ember => Theme::ember(),
			ThemeName::DeepSea => Theme::deep_sea(),
			ThemeName::Minimal => Theme::minimal(),
		}
	}
}
