//! Ripple map: a center node ringed by first-, second- and third-degree
//! connections, with pulses beamed outward on demand.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};

// Modules
mod components;
mod config;
mod network;
mod pages;
mod share;

// Top-Level pages
use crate::config::{CONFIG_ELEMENT_ID, MapConfig};
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Read overrides from the page's inline config element, if any.
fn load_config() -> MapConfig {
	let Some(raw) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.text_content())
	else {
		return MapConfig::default();
	};
	match MapConfig::from_json(&raw) {
		Ok(config) => {
			info!("Loaded config from #{CONFIG_ELEMENT_ID}");
			config
		}
		Err(err) => {
			warn!("{err:#}; using defaults");
			MapConfig::default()
		}
	}
}

/// An app router which renders the homepage and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(load_config());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Ripple Map: See Your Impact" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/ripplemap") view=Home />
			</Routes>
		</Router>
	}
}
