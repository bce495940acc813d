use rand::Rng;
use rand::rngs::StdRng;

use super::layout::RingLayout;
use super::palette::{ColorScheme, HIGHLIGHT, Palette};
use super::types::{Degree, RingPoint};
use crate::config::MapConfig;
use crate::network::{NetworkCounts, compute_counts};

/// Pointer distance, in canvas pixels, that still counts as touching a point.
pub const HIT_RADIUS: f64 = 6.0;

/// Burst of points from the center out to their placements.
#[derive(Clone, Debug, Default)]
pub struct ScatterState {
	/// 0 at the center, 1 at the final position.
	pub t: f64,
	duration_ms: f64,
}

impl ScatterState {
	pub fn begin(&mut self, duration_ms: f64) {
		self.t = 0.0;
		self.duration_ms = duration_ms;
	}

	pub fn settle(&mut self) {
		self.t = 1.0;
	}

	pub fn is_animating(&self) -> bool {
		self.t < 1.0
	}

	/// Eased interpolation factor.
	pub fn eased(&self) -> f64 {
		1.0 - (1.0 - self.t).powi(3)
	}

	fn advance(&mut self, dt_ms: f64) {
		if self.duration_ms <= 0.0 {
			self.t = 1.0;
			return;
		}
		self.t = (self.t + dt_ms / self.duration_ms).min(1.0);
	}
}

pub struct MapState<R: Rng = StdRng> {
	pub config: MapConfig,
	pub counts: NetworkCounts,
	pub scheme: ColorScheme,
	pub hovered: Option<String>,
	pub rings: [Vec<RingPoint>; 3],
	pub scatter: ScatterState,
	/// No layout pass runs until the host allows the first heavy draw.
	pub ready: bool,
	pub dirty: bool,
	pub width: f64,
	pub height: f64,
	layout: RingLayout<R>,
}

impl<R: Rng> MapState<R> {
	pub fn new(config: MapConfig, rng: R) -> Self {
		let counts = compute_counts(config.network.first_degree, config.network.branching_factor);
		let size = config.layout.canvas_size;
		Self {
			layout: RingLayout::new(rng, config.layout.clone()),
			config,
			counts,
			scheme: ColorScheme::default(),
			hovered: None,
			rings: Default::default(),
			scatter: ScatterState {
				t: 1.0,
				duration_ms: 0.0,
			},
			ready: false,
			dirty: true,
			width: size,
			height: size,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	pub fn palette(&self) -> &'static Palette {
		self.scheme.palette()
	}

	/// Recompute the network from a new first-degree count and re-place every
	/// ring, bursting out from the center.
	pub fn set_first_degree(&mut self, first_degree: u64) {
		if first_degree == self.counts.first_degree {
			return;
		}
		self.counts = compute_counts(first_degree, self.config.network.branching_factor);
		if self.ready {
			self.relayout();
			self.scatter.begin(self.config.timing.scatter_ms);
		}
	}

	pub fn set_scheme(&mut self, scheme: ColorScheme) {
		if scheme == self.scheme {
			return;
		}
		self.scheme = scheme;
		self.restyle();
	}

	pub fn set_hover(&mut self, id: Option<String>) {
		if self.hovered == id {
			return;
		}
		self.hovered = id;
		self.restyle();
	}

	/// Allow layout and run the first pass.
	pub fn set_ready(&mut self) {
		if self.ready {
			return;
		}
		self.ready = true;
		self.relayout();
	}

	/// Place every ring from scratch with fresh random offsets.
	pub fn relayout(&mut self) {
		let palette = self.scheme.palette();
		for degree in Degree::ALL {
			let count = self.counts.for_degree(degree);
			let radius = self.config.layout.ring_radii[degree.slot()];
			self.rings[degree.slot()] =
				self.layout
					.layout_ring(count, radius, degree, palette, self.hovered.as_deref());
		}
		self.dirty = true;
	}

	/// Re-apply colors and sizes in place; positions don't move.
	fn restyle(&mut self) {
		let palette = self.scheme.palette();
		let layout = &self.config.layout;
		for degree in Degree::ALL {
			let base_size = layout.point_sizes[degree.slot()];
			for (i, point) in self.rings[degree.slot()].iter_mut().enumerate() {
				point.active = self.hovered.as_deref() == Some(point.id.as_str());
				if point.active {
					point.color = HIGHLIGHT.fill.to_string();
					point.size = layout.active_size;
				} else {
					point.color = palette.color_for(degree, i).to_string();
					point.size = base_size;
				}
			}
		}
		self.dirty = true;
	}

	/// Where a point is drawn this frame, accounting for the scatter burst.
	pub fn draw_position(&self, point: &RingPoint) -> (f64, f64) {
		let (cx, cy) = self.center();
		let (x, y) = point.position(cx, cy);
		let k = self.scatter.eased();
		(cx + (x - cx) * k, cy + (y - cy) * k)
	}

	/// Id of the point under the pointer, nearest first.
	pub fn point_at_position(&self, x: f64, y: f64) -> Option<String> {
		if !self.ready {
			return None;
		}
		let mut best: Option<(&RingPoint, f64)> = None;
		for point in self.rings.iter().flatten() {
			let (px, py) = self.draw_position(point);
			let dist = ((px - x).powi(2) + (py - y).powi(2)).sqrt();
			if dist < HIT_RADIUS.max(point.size) && best.is_none_or(|(_, d)| dist < d) {
				best = Some((point, dist));
			}
		}
		best.map(|(point, _)| point.id.clone())
	}

	pub fn tick(&mut self, dt_ms: f64) {
		if self.scatter.is_animating() {
			self.scatter.advance(dt_ms);
			self.dirty = true;
		}
	}
}
