//! Strings handed to the page's share buttons. Link construction for each
//! platform lives outside this crate.

pub const SHARE_URL: &str = "https://www.jordanquaglia.com/ripplemap";
pub const SHARE_TEXT: &str = "Visualize your social network and ripple effect:";

/// Opaque share payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareTarget {
	pub url: &'static str,
	pub text: &'static str,
}

impl Default for ShareTarget {
	fn default() -> Self {
		Self {
			url: SHARE_URL,
			text: SHARE_TEXT,
		}
	}
}

impl ShareTarget {
	/// The url without its scheme, as shown in the page footer.
	pub fn display_url(&self) -> &'static str {
		self.url
			.strip_prefix("https://")
			.or_else(|| self.url.strip_prefix("http://"))
			.unwrap_or(self.url)
	}
}
