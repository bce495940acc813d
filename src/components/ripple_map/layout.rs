//! Ring layout: scatters a bounded number of points through an annular band.

use std::f64::consts::PI;

use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use super::palette::{HIGHLIGHT, Palette};
use super::types::{Degree, RingPoint};
use crate::config::LayoutConfig;

/// pi * (3 - sqrt(5)), about 2.399963 rad.
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Band geometry for one ring after density scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
	pub thickness: f64,
	pub spacing: f64,
}

pub struct RingLayout<R: Rng = StdRng> {
	rng: R,
	config: LayoutConfig,
}

impl<R: Rng> RingLayout<R> {
	pub fn new(rng: R, config: LayoutConfig) -> Self {
		Self { rng, config }
	}

	/// Thicken the band and tighten spacing as the count grows.
	pub fn band(&self, count: u64, degree: Degree) -> Band {
		let slot = degree.slot();
		let density_boost = ((count.max(1) as f64).log10() / 3.0).min(2.0);
		Band {
			thickness: self.config.base_thickness[slot] * (1.0 + density_boost * 0.8),
			spacing: (self.config.base_spacing[slot] * (1.0 - density_boost * 0.4)).max(1.0),
		}
	}

	/// Points the band around `radius` can hold legibly, by area packing.
	pub fn area_capacity(&self, count: u64, radius: f64, degree: Degree) -> usize {
		let band = self.band(count, degree);
		let annulus_area = 2.0 * PI * radius * band.thickness;
		((annulus_area * self.config.packing_efficiency) / (band.spacing * band.spacing)).floor()
			as usize
	}

	/// Number of points actually rendered for a logical count.
	pub fn rendered_count(&self, count: u64, radius: f64, degree: Degree) -> usize {
		if count == 0 {
			return 0;
		}
		let cap = self.config.hard_caps[degree.slot()];
		let by_area = self.area_capacity(count, radius, degree).max(1);
		count.min(cap as u64).min(by_area as u64) as usize
	}

	/// Lay out one ring. The random angular offset and radial jitter are
	/// drawn fresh on every call.
	pub fn layout_ring(
		&mut self,
		count: u64,
		radius: f64,
		degree: Degree,
		palette: &Palette,
		active_id: Option<&str>,
	) -> Vec<RingPoint> {
		let rendered = self.rendered_count(count, radius, degree);
		if rendered == 0 {
			return Vec::new();
		}
		let band = self.band(count, degree);
		let base_size = self.config.point_sizes[degree.slot()];
		let angle_start = self.rng.random::<f64>() * 2.0 * PI;

		debug!(
			"layout ring {}: {} connections, {} rendered",
			degree.number(),
			count,
			rendered
		);

		(0..rendered)
			.map(|i| {
				let id = RingPoint::id_for(degree, i);
				let active = active_id == Some(id.as_str());
				let jitter = (self.rng.random::<f64>() - 0.5) * band.thickness;
				RingPoint {
					angle: angle_start + i as f64 * GOLDEN_ANGLE,
					radius: radius + jitter,
					color: if active {
						HIGHLIGHT.fill.to_string()
					} else {
						palette.color_for(degree, i).to_string()
					},
					size: if active { self.config.active_size } else { base_size },
					active,
					id,
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::ripple_map::palette::ColorScheme;

	fn engine(seed: u64) -> RingLayout {
		RingLayout::new(StdRng::seed_from_u64(seed), LayoutConfig::default())
	}

	#[test]
	fn test_golden_angle_constant() {
		let expected = PI * (3.0 - 5.0_f64.sqrt());
		assert!((GOLDEN_ANGLE - expected).abs() < 1e-12);
	}

	#[test]
	fn test_zero_count_is_empty() {
		let mut layout = engine(1);
		let palette = ColorScheme::Default.palette();
		for degree in Degree::ALL {
			for radius in [0.0, 90.0, 500.0] {
				assert!(layout.layout_ring(0, radius, degree, palette, None).is_empty());
			}
		}
	}

	#[test]
	fn test_small_counts_render_exactly() {
		let mut layout = engine(2);
		let palette = ColorScheme::Default.palette();
		let points = layout.layout_ring(10, 90.0, Degree::First, palette, None);
		assert_eq!(points.len(), 10);
		assert_eq!(points[3].id, "1-3");
	}

	#[test]
	fn test_length_bounded_by_cap_area_and_count() {
		let mut layout = engine(3);
		let palette = ColorScheme::Default.palette();
		let config = LayoutConfig::default();
		for degree in Degree::ALL {
			let radius = config.ring_radii[degree.slot()];
			for count in [1u64, 5, 120, 1_440, 17_280, 1_000_000] {
				let cap = config.hard_caps[degree.slot()] as u64;
				let by_area = layout.area_capacity(count, radius, degree).max(1) as u64;
				let points = layout.layout_ring(count, radius, degree, palette, None);
				let bound = count.min(cap).min(by_area);
				assert!(
					points.len() as u64 <= bound,
					"degree {} count {} rendered {} > {}",
					degree.number(),
					count,
					points.len(),
					bound
				);
			}
		}
	}

	#[test]
	fn test_outer_ring_hits_hard_cap() {
		let layout = engine(4);
		assert_eq!(layout.rendered_count(1_000_000, 270.0, Degree::Third), 10_000);
	}

	#[test]
	fn test_tiny_radius_still_renders_one() {
		let layout = engine(5);
		assert_eq!(layout.rendered_count(50, 0.0, Degree::First), 1);
	}

	#[test]
	fn test_density_boost_is_bounded() {
		let layout = engine(6);
		let sparse = layout.band(1, Degree::Third);
		let dense = layout.band(u64::MAX, Degree::Third);
		assert_eq!(sparse.thickness, 36.0);
		assert_eq!(sparse.spacing, 2.0);
		assert!((dense.thickness - 36.0 * 2.6).abs() < 1e-9);
		assert_eq!(dense.spacing, 1.0);
	}

	#[test]
	fn test_angles_pairwise_distinct() {
		let mut layout = engine(7);
		let palette = ColorScheme::Default.palette();
		let mut angles: Vec<f64> = layout
			.layout_ring(2_000, 180.0, Degree::Second, palette, None)
			.iter()
			.map(|p| p.angle)
			.collect();
		angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
		assert!(angles.windows(2).all(|w| w[0] != w[1]));
	}

	#[test]
	fn test_radial_jitter_stays_in_band() {
		let mut layout = engine(8);
		let band = layout.band(500, Degree::Second);
		let palette = ColorScheme::Ocean.palette();
		for point in layout.layout_ring(500, 180.0, Degree::Second, palette, None) {
			assert!((point.radius - 180.0).abs() <= band.thickness / 2.0 + 1e-9);
		}
	}

	#[test]
	fn test_same_seed_same_layout() {
		let palette = ColorScheme::Dusk.palette();
		let a = engine(9).layout_ring(300, 180.0, Degree::Second, palette, None);
		let b = engine(9).layout_ring(300, 180.0, Degree::Second, palette, None);
		assert_eq!(a, b);
	}

	#[test]
	fn test_active_point_is_highlighted() {
		let mut layout = engine(10);
		let palette = ColorScheme::Rainbow.palette();
		let points = layout.layout_ring(12, 90.0, Degree::First, palette, Some("1-4"));
		let active: Vec<_> = points.iter().filter(|p| p.active).collect();
		assert_eq!(active.len(), 1);
		assert_eq!(active[0].id, "1-4");
		assert_eq!(active[0].color, HIGHLIGHT.fill);
		assert_eq!(active[0].size, 5.0);
		assert_eq!(points[0].size, 3.5);
	}

	#[test]
	fn test_rainbow_cycles_and_others_use_degree_color() {
		let mut layout = engine(11);
		let rainbow =
			layout.layout_ring(8, 270.0, Degree::Third, ColorScheme::Rainbow.palette(), None);
		assert_eq!(rainbow[0].color, "#ef4444");
		assert_eq!(rainbow[7].color, "#ef4444");
		assert_eq!(rainbow[1].color, "#f59e0b");

		let warm =
			layout.layout_ring(8, 270.0, Degree::Third, ColorScheme::Default.palette(), None);
		assert!(warm.iter().all(|p| p.color == "#ef4444"));
	}
}
