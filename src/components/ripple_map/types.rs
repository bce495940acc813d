use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// Ring index: direct, secondary or tertiary connections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Degree {
	First,
	Second,
	Third,
}

impl Degree {
	pub const ALL: [Degree; 3] = [Degree::First, Degree::Second, Degree::Third];

	/// 1, 2 or 3.
	pub fn number(self) -> u8 {
		match self {
			Degree::First => 1,
			Degree::Second => 2,
			Degree::Third => 3,
		}
	}

	/// Zero-based slot into per-degree config arrays.
	pub fn slot(self) -> usize {
		self.number() as usize - 1
	}
}

impl TryFrom<u8> for Degree {
	type Error = anyhow::Error;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(Degree::First),
			2 => Ok(Degree::Second),
			3 => Ok(Degree::Third),
			other => bail!("degree must be 1, 2 or 3, got {other}"),
		}
	}
}

/// One placed point of a ring. Rebuilt on every layout pass; `id` is stable
/// per (degree, index) so hover state survives re-layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RingPoint {
	pub id: String,
	pub angle: f64,
	pub radius: f64,
	pub color: String,
	pub size: f64,
	pub active: bool,
}

impl RingPoint {
	pub fn id_for(degree: Degree, index: usize) -> String {
		format!("{}-{}", degree.number(), index)
	}

	/// Position relative to a center point.
	pub fn position(&self, cx: f64, cy: f64) -> (f64, f64) {
		(
			cx + self.radius * self.angle.cos(),
			cy + self.radius * self.angle.sin(),
		)
	}
}

/// How a pulse's radius and opacity evolve over one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionProfile {
	/// "Good vibes": fast outward travel, late sharp fade.
	OutwardHold,
	/// "Loving-kindness": slower outward travel, same fade.
	#[default]
	OutwardLinear,
	/// "We-care": expands and contracts back to the center.
	OutAndBack,
}

impl MotionProfile {
	pub const ALL: [MotionProfile; 3] = [
		MotionProfile::OutwardHold,
		MotionProfile::OutwardLinear,
		MotionProfile::OutAndBack,
	];

	/// Cycle length in milliseconds.
	pub fn duration_ms(self) -> f64 {
		match self {
			MotionProfile::OutwardHold => 8000.0,
			MotionProfile::OutwardLinear => 12000.0,
			MotionProfile::OutAndBack => 14000.0,
		}
	}

	pub fn key(self) -> &'static str {
		match self {
			MotionProfile::OutwardHold => "good-vibes",
			MotionProfile::OutwardLinear => "loving-kindness",
			MotionProfile::OutAndBack => "we-care",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			MotionProfile::OutwardHold => "Beam Good Vibes",
			MotionProfile::OutwardLinear => "Beam Loving-Kindness",
			MotionProfile::OutAndBack => "Beam We-Care",
		}
	}

	/// Pulse stroke color.
	pub fn stroke(self) -> &'static str {
		match self {
			MotionProfile::OutwardHold => "rgba(250, 204, 21, 0.5)",
			MotionProfile::OutwardLinear => "rgba(236, 72, 153, 0.45)",
			MotionProfile::OutAndBack => "rgba(34, 197, 94, 0.45)",
		}
	}
}

impl fmt::Display for MotionProfile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

impl FromStr for MotionProfile {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"good-vibes" | "outward-hold" => Ok(MotionProfile::OutwardHold),
			"loving-kindness" | "outward-linear" => Ok(MotionProfile::OutwardLinear),
			"we-care" | "out-and-back" => Ok(MotionProfile::OutAndBack),
			other => bail!("unknown motion profile: {other}"),
		}
	}
}

/// Per-frame output for one pulse instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseFrame {
	pub radius: f64,
	pub opacity: f64,
}
