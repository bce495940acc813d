use leptos::prelude::*;

use crate::components::ripple_map::RippleMap;
use crate::config::MapConfig;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<MapConfig>().unwrap_or_default();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="ripple-page">
				<div class="ripple-intro">
					<h1>"Ripple Map: See Your Impact"</h1>
					<p>
						"To visualize how your impact ripples through your social network across three degrees of connection:"
					</p>
					<ol>
						<li>
							"Estimate your first-degree connections. Count the people you interact with regularly, in person or digitally, where the relationship is personal and two-way."
						</li>
						<li>"Click and hover over the buttons to visualize the social reach of your care."</li>
					</ol>
				</div>
				<RippleMap config=config />
			</div>
		</ErrorBoundary>
	}
}
