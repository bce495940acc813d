use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, Path2d};

use super::palette::{HIGHLIGHT, Marker};
use super::ripple::PULSE_COUNT;
use super::state::MapState;
use super::types::{MotionProfile, PulseFrame, RingPoint};

/// Pulses to draw this frame, with their stroke.
pub struct PulseLayer {
	pub profile: MotionProfile,
	pub frames: [Option<PulseFrame>; PULSE_COUNT],
	pub stroke_width: f64,
}

pub fn render(state: &MapState, pulses: Option<&PulseLayer>, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	let shape = Shape::resolve(state.palette().marker);
	draw_center(state, &shape, ctx);
	if state.ready {
		draw_rings(state, &shape, ctx);
	}
	if let Some(layer) = pulses {
		draw_pulses(state, layer, ctx);
	}
}

/// A marker resolved for one frame, so path data is parsed once.
enum Shape {
	Circle,
	Path { path: Path2d, unit: f64 },
}

impl Shape {
	fn resolve(marker: Marker) -> Self {
		match marker {
			Marker::Circle => Shape::Circle,
			Marker::Path { data, unit } => match Path2d::new_with_path_string(data) {
				Ok(path) => Shape::Path { path, unit },
				Err(_) => Shape::Circle,
			},
		}
	}

	fn fill(&self, ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64) {
		match self {
			Shape::Circle => {
				ctx.begin_path();
				let _ = ctx.arc(x, y, size, 0.0, 2.0 * PI);
				ctx.fill();
			}
			Shape::Path { path, unit } => {
				ctx.save();
				place_path(ctx, x, y, size, *unit);
				ctx.fill_with_path_2d(path);
				ctx.restore();
			}
		}
	}

	/// Stroke the marker at the same placement as its last `fill`.
	fn outline(&self, ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64) {
		match self {
			Shape::Circle => ctx.stroke(),
			Shape::Path { path, unit } => {
				ctx.save();
				place_path(ctx, x, y, size, *unit);
				ctx.stroke_with_path(path);
				ctx.restore();
			}
		}
	}
}

/// Translation and uniform scale that draw a path marker `unit` wide at
/// `size`.
fn path_transform(x: f64, y: f64, size: f64, unit: f64) -> (f64, f64, f64) {
	(x, y, size / unit)
}

fn place_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64, unit: f64) {
	let (tx, ty, scale) = path_transform(x, y, size, unit);
	let _ = ctx.translate(tx, ty);
	let _ = ctx.scale(scale, scale);
}

fn draw_center(state: &MapState, shape: &Shape, ctx: &CanvasRenderingContext2d) {
	let (cx, cy) = state.center();
	let palette = state.palette();
	ctx.set_fill_style_str(palette.center);
	match shape {
		Shape::Circle => shape.fill(ctx, cx, cy, state.config.layout.center_size),
		Shape::Path { unit, .. } => {
			ctx.set_global_alpha(0.9);
			shape.fill(ctx, cx, cy, 0.75 * unit);
			ctx.set_global_alpha(1.0);
		}
	}
}

fn draw_rings(state: &MapState, shape: &Shape, ctx: &CanvasRenderingContext2d) {
	let idle_opacity = state.palette().marker.idle_opacity();
	let mut active: Option<&RingPoint> = None;

	ctx.set_global_alpha(idle_opacity);
	for point in state.rings.iter().flatten() {
		if point.active {
			active = Some(point);
			continue;
		}
		let (x, y) = state.draw_position(point);
		ctx.set_fill_style_str(&point.color);
		shape.fill(ctx, x, y, point.size);
	}
	ctx.set_global_alpha(1.0);

	// Hovered point last so it sits above its neighbours.
	let Some(point) = active else {
		return;
	};
	let (x, y) = state.draw_position(point);
	ctx.save();
	ctx.set_shadow_color(HIGHLIGHT.glow);
	ctx.set_shadow_blur(HIGHLIGHT.glow_blur);
	ctx.set_fill_style_str(&point.color);
	ctx.set_stroke_style_str(HIGHLIGHT.stroke);
	ctx.set_line_width(HIGHLIGHT.stroke_width);
	shape.fill(ctx, x, y, point.size);
	shape.outline(ctx, x, y, point.size);
	ctx.restore();
}

fn draw_pulses(state: &MapState, layer: &PulseLayer, ctx: &CanvasRenderingContext2d) {
	let (cx, cy) = state.center();
	ctx.set_stroke_style_str(layer.profile.stroke());
	ctx.set_line_width(layer.stroke_width);
	for frame in layer.frames.iter().flatten() {
		if frame.opacity <= 0.0 {
			continue;
		}
		ctx.set_global_alpha(frame.opacity);
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, frame.radius, 0.0, 2.0 * PI);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}
