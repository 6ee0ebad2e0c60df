//! Canvas rendering for the neural network animation.
//!
//! Drawing happens in passes so later layers sit on top:
//! 1. Background
//! 2. Connection lines (gradient stroke + pulsing glow)
//! 3. Points (radial gradient + pulsing glow, phase-shifted by x)
//! 4. Pointer halo over the whole surface
//!
//! Rendering never mutates the state it draws.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::connections::Line;
use super::points::Point;
use super::state::NetworkState;
use super::theme::Theme;

/// Renders one frame of `state` to the canvas.
pub fn render(ctx: &CanvasRenderingContext2d, state: &NetworkState, theme: &Theme, time_ms: f64) {
	let (width, height) = (state.bounds.width, state.bounds.height);

	draw_background(ctx, theme, width, height);
	draw_lines(ctx, &state.points, &state.lines, theme, time_ms);
	draw_points(ctx, &state.points, theme, time_ms);

	if theme.halo.enabled {
		if let Some((x, y)) = state.pointer.position {
			draw_halo(ctx, theme, x, y, width, height);
		}
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, theme: &Theme, width: f64, height: f64) {
	ctx.clear_rect(0.0, 0.0, width, height);

	let Some(color) = theme.background.color else {
		return;
	};

	match theme.background.color_secondary {
		Some(secondary) => {
			let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
			let _ = gradient.add_color_stop(0.0, &color.to_css());
			let _ = gradient.add_color_stop(1.0, &secondary.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_lines(
	ctx: &CanvasRenderingContext2d,
	points: &[Point],
	lines: &[Line],
	theme: &Theme,
	time_ms: f64,
) {
	let style = &theme.line;
	let primary = theme.primary;
	let pulse = theme.pulse.at(time_ms, 0.0);

	ctx.set_line_width(style.width + pulse);
	ctx.set_shadow_blur(style.glow_radius + pulse * theme.pulse.blur_gain);

	for line in lines {
		let (Some(from), Some(to)) = (points.get(line.from), points.get(line.to)) else {
			continue;
		};

		let gradient = ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
		let _ = gradient.add_color_stop(0.0, &primary.with_alpha(line.alpha).to_css());
		let _ = gradient.add_color_stop(
			1.0,
			&primary.with_alpha(line.alpha * style.tail_fade).to_css(),
		);

		ctx.set_shadow_color(&primary.with_alpha(style.glow_intensity * line.alpha).to_css());
		#[allow(deprecated)]
		ctx.set_stroke_style(&gradient);

		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();
	}

	ctx.set_shadow_blur(0.0);
}

fn draw_points(ctx: &CanvasRenderingContext2d, points: &[Point], theme: &Theme, time_ms: f64) {
	let style = &theme.point;
	let core = theme.primary.lighten(style.core_lighten);

	ctx.set_shadow_color(&theme.primary.with_alpha(style.glow_intensity).to_css());

	for point in points {
		if point.radius <= 0.0 {
			continue;
		}
		let pulse = theme.pulse.at(time_ms, point.x);
		ctx.set_shadow_blur(style.glow_radius + pulse * theme.pulse.blur_gain);

		let Ok(gradient) =
			ctx.create_radial_gradient(point.x, point.y, 0.0, point.x, point.y, point.radius)
		else {
			continue;
		};
		let _ = gradient.add_color_stop(
			0.0,
			&core.with_alpha((style.core_alpha + pulse) * point.alpha).to_css(),
		);
		let _ = gradient.add_color_stop(1.0, &theme.primary.with_alpha(0.0).to_css());

		ctx.begin_path();
		let _ = ctx.arc(point.x, point.y, point.radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	}

	ctx.set_shadow_blur(0.0);
}

fn draw_halo(ctx: &CanvasRenderingContext2d, theme: &Theme, x: f64, y: f64, width: f64, height: f64) {
	let halo = &theme.halo;
	let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, halo.radius) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, &theme.primary.with_alpha(halo.inner_alpha).to_css());
	let _ = gradient.add_color_stop(0.5, &theme.primary.with_alpha(halo.mid_alpha).to_css());
	let _ = gradient.add_color_stop(1.0, &theme.primary.with_alpha(0.0).to_css());

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}
