//! Configuration for the ripple map.
//!
//! Every value has a default. A page may override any subset by embedding a
//! JSON blob, which is merged over the defaults field by field.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Id of the optional inline `<script type="application/json">` config element.
pub const CONFIG_ELEMENT_ID: &str = "ripple-map-config";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MapConfig {
	#[serde(default)]
	pub network: NetworkConfig,

	#[serde(default)]
	pub layout: LayoutConfig,

	#[serde(default)]
	pub ripple: RippleConfig,

	#[serde(default)]
	pub timing: TimingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
	#[serde(default = "default_first_degree")]
	pub first_degree: u64,

	#[serde(default = "default_branching_factor")]
	pub branching_factor: f64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			first_degree: default_first_degree(),
			branching_factor: default_branching_factor(),
		}
	}
}

fn default_first_degree() -> u64 {
	10
}

fn default_branching_factor() -> f64 {
	12.0
}

/// Ring geometry. Arrays are indexed by degree - 1.
///
/// `hard_caps` and `packing_efficiency` are heuristics: the packing estimate
/// assumes hexagonal packing of a jittered band, so some overlap at high
/// density is expected.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
	#[serde(default = "default_canvas_size")]
	pub canvas_size: f64,

	#[serde(default = "default_ring_radii")]
	pub ring_radii: [f64; 3],

	#[serde(default = "default_base_thickness")]
	pub base_thickness: [f64; 3],

	#[serde(default = "default_base_spacing")]
	pub base_spacing: [f64; 3],

	#[serde(default = "default_hard_caps")]
	pub hard_caps: [usize; 3],

	#[serde(default = "default_packing_efficiency")]
	pub packing_efficiency: f64,

	#[serde(default = "default_point_sizes")]
	pub point_sizes: [f64; 3],

	#[serde(default = "default_active_size")]
	pub active_size: f64,

	#[serde(default = "default_center_size")]
	pub center_size: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			canvas_size: default_canvas_size(),
			ring_radii: default_ring_radii(),
			base_thickness: default_base_thickness(),
			base_spacing: default_base_spacing(),
			hard_caps: default_hard_caps(),
			packing_efficiency: default_packing_efficiency(),
			point_sizes: default_point_sizes(),
			active_size: default_active_size(),
			center_size: default_center_size(),
		}
	}
}

fn default_canvas_size() -> f64 {
	600.0
}

fn default_ring_radii() -> [f64; 3] {
	[90.0, 180.0, 270.0]
}

fn default_base_thickness() -> [f64; 3] {
	[18.0, 24.0, 36.0]
}

fn default_base_spacing() -> [f64; 3] {
	[4.0, 4.0, 2.0]
}

fn default_hard_caps() -> [usize; 3] {
	[1200, 2000, 10000]
}

fn default_packing_efficiency() -> f64 {
	0.7
}

fn default_point_sizes() -> [f64; 3] {
	[3.5, 2.5, 1.5]
}

fn default_active_size() -> f64 {
	5.0
}

fn default_center_size() -> f64 {
	3.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct RippleConfig {
	#[serde(default = "default_max_radius")]
	pub max_radius: f64,

	#[serde(default = "default_delays_ms")]
	pub delays_ms: [f64; 3],

	#[serde(default = "default_primed_opacity")]
	pub primed_opacity: f64,

	#[serde(default = "default_stroke_width")]
	pub stroke_width: f64,
}

impl Default for RippleConfig {
	fn default() -> Self {
		Self {
			max_radius: default_max_radius(),
			delays_ms: default_delays_ms(),
			primed_opacity: default_primed_opacity(),
			stroke_width: default_stroke_width(),
		}
	}
}

fn default_max_radius() -> f64 {
	300.0
}

fn default_delays_ms() -> [f64; 3] {
	[0.0, 3000.0, 6000.0]
}

fn default_primed_opacity() -> f64 {
	0.28
}

fn default_stroke_width() -> f64 {
	4.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
	#[serde(default = "default_scatter_ms")]
	pub scatter_ms: f64,

	#[serde(default = "default_ready_fallback_ms")]
	pub ready_fallback_ms: i32,
}

impl Default for TimingConfig {
	fn default() -> Self {
		Self {
			scatter_ms: default_scatter_ms(),
			ready_fallback_ms: default_ready_fallback_ms(),
		}
	}
}

fn default_scatter_ms() -> f64 {
	1000.0
}

fn default_ready_fallback_ms() -> i32 {
	200
}

impl MapConfig {
	pub fn from_json(raw: &str) -> Result<Self> {
		serde_json::from_str(raw).context("invalid ripple map config")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_object_yields_defaults() {
		let config = MapConfig::from_json("{}").unwrap();
		assert_eq!(config.network.first_degree, 10);
		assert_eq!(config.network.branching_factor, 12.0);
		assert_eq!(config.layout.hard_caps, [1200, 2000, 10000]);
		assert_eq!(config.ripple.delays_ms, [0.0, 3000.0, 6000.0]);
		assert_eq!(config.timing.ready_fallback_ms, 200);
	}

	#[test]
	fn test_partial_override() {
		let raw = r#"{"layout": {"packing_efficiency": 0.5}, "network": {"first_degree": 4}}"#;
		let config = MapConfig::from_json(raw).unwrap();
		assert_eq!(config.layout.packing_efficiency, 0.5);
		assert_eq!(config.layout.ring_radii, [90.0, 180.0, 270.0]);
		assert_eq!(config.network.first_degree, 4);
		assert_eq!(config.network.branching_factor, 12.0);
	}

	#[test]
	fn test_malformed_json_is_an_error() {
		assert!(MapConfig::from_json("{ not json").is_err());
	}
}
