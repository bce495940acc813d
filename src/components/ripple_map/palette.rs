//! Color schemes and marker styling, kept as data so new schemes don't touch
//! placement code.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use super::types::Degree;

/// Heart outline designed around a ~4px unit.
pub const HEART_PATH: &str = "M0,-4 C-2,-8 -10,-2 -4,4 C0,8 4,4 10,-2 C4,-8 2,-4 0,-4 Z";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Marker {
	Circle,
	/// SVG path data drawn around the origin, scaled by `size / unit`.
	Path { data: &'static str, unit: f64 },
}

impl Marker {
	/// Resting opacity of a non-active point.
	pub fn idle_opacity(&self) -> f64 {
		match self {
			Marker::Circle => 0.6,
			Marker::Path { .. } => 0.75,
		}
	}
}

/// How ring points pick their color from the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coloring {
	/// One color per ring, `colors[degree - 1]`.
	PerDegree,
	/// `colors[index % len]` across every ring.
	Cycle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	pub colors: &'static [&'static str],
	pub center: &'static str,
	pub coloring: Coloring,
	pub marker: Marker,
}

impl Palette {
	pub fn color_for(&self, degree: Degree, index: usize) -> &'static str {
		match self.coloring {
			Coloring::Cycle => self.colors[index % self.colors.len()],
			Coloring::PerDegree => self.colors[degree.slot().min(self.colors.len() - 1)],
		}
	}
}

/// Emphasis applied to the hovered point regardless of scheme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightStyle {
	pub fill: &'static str,
	pub stroke: &'static str,
	pub stroke_width: f64,
	pub glow: &'static str,
	pub glow_blur: f64,
}

pub const HIGHLIGHT: HighlightStyle = HighlightStyle {
	fill: "#facc15",
	stroke: "#fcd34d",
	stroke_width: 1.5,
	glow: "rgba(250, 204, 21, 0.5)",
	glow_blur: 6.0,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
	#[default]
	Default,
	Cool,
	Forest,
	Ocean,
	Dusk,
	Grayscale,
	Rainbow,
	Cupid,
}

impl ColorScheme {
	pub const ALL: [ColorScheme; 8] = [
		ColorScheme::Default,
		ColorScheme::Cool,
		ColorScheme::Forest,
		ColorScheme::Ocean,
		ColorScheme::Dusk,
		ColorScheme::Grayscale,
		ColorScheme::Rainbow,
		ColorScheme::Cupid,
	];

	pub fn key(self) -> &'static str {
		match self {
			ColorScheme::Default => "default",
			ColorScheme::Cool => "cool",
			ColorScheme::Forest => "forest",
			ColorScheme::Ocean => "ocean",
			ColorScheme::Dusk => "dusk",
			ColorScheme::Grayscale => "grayscale",
			ColorScheme::Rainbow => "rainbow",
			ColorScheme::Cupid => "cupid",
		}
	}

	/// Name shown in the scheme picker.
	pub fn label(self) -> &'static str {
		match self {
			ColorScheme::Default => "Warm",
			ColorScheme::Cool => "Cool",
			ColorScheme::Forest => "Forest",
			ColorScheme::Ocean => "Ocean",
			ColorScheme::Dusk => "Dusk",
			ColorScheme::Grayscale => "Grayscale",
			ColorScheme::Rainbow => "Rainbow",
			ColorScheme::Cupid => "Cupid",
		}
	}

	pub fn palette(self) -> &'static Palette {
		match self {
			ColorScheme::Default => &WARM,
			ColorScheme::Cool => &COOL,
			ColorScheme::Forest => &FOREST,
			ColorScheme::Ocean => &OCEAN,
			ColorScheme::Dusk => &DUSK,
			ColorScheme::Grayscale => &GRAYSCALE,
			ColorScheme::Rainbow => &RAINBOW,
			ColorScheme::Cupid => &CUPID,
		}
	}
}

impl fmt::Display for ColorScheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

impl FromStr for ColorScheme {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match ColorScheme::ALL.iter().find(|scheme| scheme.key() == s) {
			Some(&scheme) => Ok(scheme),
			None => bail!("unknown color scheme: {s}"),
		}
	}
}

const fn per_degree(colors: &'static [&'static str], center: &'static str) -> Palette {
	Palette {
		colors,
		center,
		coloring: Coloring::PerDegree,
		marker: Marker::Circle,
	}
}

static WARM: Palette = per_degree(&["#f59e0b", "#f97316", "#ef4444"], "#f59e0b");
static COOL: Palette = per_degree(&["#6366f1", "#0ea5e9", "#34d399"], "#6366f1");
static FOREST: Palette = per_degree(&["#14532d", "#166534", "#4ade80"], "#14532d");
static OCEAN: Palette = per_degree(&["#0c4a6e", "#0284c7", "#7dd3fc"], "#0c4a6e");
static DUSK: Palette = per_degree(&["#7c3aed", "#9333ea", "#e879f9"], "#7c3aed");
static GRAYSCALE: Palette = per_degree(&["#555", "#999", "#ccc"], "#555");

static RAINBOW: Palette = Palette {
	colors: &[
		"#ef4444", "#f59e0b", "#facc15", "#22c55e", "#22d3ee", "#6366f1", "#a855f7",
	],
	center: "#e11d48",
	coloring: Coloring::Cycle,
	marker: Marker::Circle,
};

static CUPID: Palette = Palette {
	colors: &["#ff4d6d", "#ff6b81", "#ff8fa3"],
	center: "#ff4d6d",
	coloring: Coloring::PerDegree,
	marker: Marker::Path {
		data: HEART_PATH,
		unit: 4.0,
	},
};
