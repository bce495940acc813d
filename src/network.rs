//! Network size model: expands a first-degree count into the outer degrees.

use crate::components::ripple_map::Degree;

/// Connection counts for the three rings plus their sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetworkCounts {
	pub first_degree: u64,
	pub second_degree: u64,
	pub third_degree: u64,
	pub total: u64,
}

impl NetworkCounts {
	/// Logical count for a ring.
	pub fn for_degree(&self, degree: Degree) -> u64 {
		match degree {
			Degree::First => self.first_degree,
			Degree::Second => self.second_degree,
			Degree::Third => self.third_degree,
		}
	}
}

/// Multiply a count by the branching factor, rounding to the nearest whole
/// connection. Integer factors stay exact.
fn expand(count: u64, branching_factor: f64) -> u64 {
	if branching_factor.fract() == 0.0 && branching_factor >= 0.0 {
		return count.saturating_mul(branching_factor as u64);
	}
	(count as f64 * branching_factor.max(0.0)).round() as u64
}

/// Compute second- and third-degree counts and the network total.
pub fn compute_counts(first_degree: u64, branching_factor: f64) -> NetworkCounts {
	let second_degree = expand(first_degree, branching_factor);
	let third_degree = expand(second_degree, branching_factor);
	NetworkCounts {
		first_degree,
		second_degree,
		third_degree,
		total: first_degree
			.saturating_add(second_degree)
			.saturating_add(third_degree),
	}
}

/// Normalize raw text input to a count from its leading integer, so "3.5"
/// is 3 and "12abc" is 12. No digits, or a negative sign, gives 0.
pub fn parse_count(raw: &str) -> u64 {
	let raw = raw.trim_start();
	if raw.starts_with('-') {
		return 0;
	}
	raw.strip_prefix('+')
		.unwrap_or(raw)
		.bytes()
		.take_while(u8::is_ascii_digit)
		.fold(0u64, |n, d| {
			n.saturating_mul(10).saturating_add(u64::from(d - b'0'))
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_small_network() {
		let counts = compute_counts(3, 2.0);
		assert_eq!(counts.second_degree, 6);
		assert_eq!(counts.third_degree, 12);
		assert_eq!(counts.total, 21);
	}

	#[test]
	fn test_default_like_network() {
		let counts = compute_counts(10, 15.0);
		assert_eq!(
			counts,
			NetworkCounts {
				first_degree: 10,
				second_degree: 150,
				third_degree: 2250,
				total: 2410,
			}
		);
	}

	#[test]
	fn test_algebraic_identity() {
		for f in [0u64, 1, 7, 42, 1000] {
			for a in [1u64, 2, 12, 30] {
				let counts = compute_counts(f, a as f64);
				assert_eq!(counts.second_degree, f * a);
				assert_eq!(counts.third_degree, f * a * a);
				assert_eq!(counts.total, f + f * a + f * a * a);
			}
		}
	}

	#[test]
	fn test_fractional_branching_rounds() {
		let counts = compute_counts(3, 2.5);
		assert_eq!(counts.second_degree, 8);
		assert_eq!(counts.third_degree, 20);
	}

	#[test]
	fn test_parse_count_normalizes() {
		assert_eq!(parse_count("12"), 12);
		assert_eq!(parse_count(" 5 "), 5);
		assert_eq!(parse_count("-4"), 0);
		assert_eq!(parse_count("abc"), 0);
		assert_eq!(parse_count(""), 0);
	}

	#[test]
	fn test_parse_count_keeps_leading_integer() {
		assert_eq!(parse_count("3.5"), 3);
		assert_eq!(parse_count("12abc"), 12);
		assert_eq!(parse_count("+7"), 7);
		assert_eq!(parse_count("-3.5"), 0);
		assert_eq!(parse_count(".5"), 0);
		assert_eq!(parse_count("99999999999999999999999"), u64::MAX);
	}

	#[test]
	fn test_for_degree_selects_ring() {
		let counts = compute_counts(3, 2.0);
		assert_eq!(counts.for_degree(Degree::First), 3);
		assert_eq!(counts.for_degree(Degree::Second), 6);
		assert_eq!(counts.for_degree(Degree::Third), 12);
	}
}
