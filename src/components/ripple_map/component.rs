use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent};

use super::palette::ColorScheme;
use super::render::{self, PulseLayer};
use super::ripple::{BeamControls, RippleSession};
use super::scheduler::{FrameHandle, FrameScheduler, RafScheduler, ReadyGate};
use super::state::MapState;
use super::types::MotionProfile;
use crate::config::MapConfig;
use crate::network::{compute_counts, parse_count};
use crate::share::ShareTarget;

type Shared<T> = Rc<RefCell<T>>;
type Session = RippleSession<RafScheduler>;

/// Everything that can still call back into the page after unmount.
struct Teardown {
	render_loop: RafScheduler,
	render_frame: Rc<Cell<Option<FrameHandle>>>,
	ripple: Shared<Session>,
	ripple_loop: RafScheduler,
	gate: Shared<Option<ReadyGate>>,
}

impl Teardown {
	fn run(&self) {
		self.ripple.borrow_mut().stop();
		self.ripple_loop.release();
		if let Some(handle) = self.render_frame.take() {
			self.render_loop.clone().cancel(handle);
		}
		self.render_loop.release();
		if let Some(mut gate) = self.gate.borrow_mut().take() {
			gate.cancel();
		}
	}
}

/// Map a pointer event to canvas pixels, allowing for CSS scaling.
fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	let (sx, sy) = if rect.width() > 0.0 && rect.height() > 0.0 {
		(
			canvas.width() as f64 / rect.width(),
			canvas.height() as f64 / rect.height(),
		)
	} else {
		(1.0, 1.0)
	};
	(
		(ev.client_x() as f64 - rect.left()) * sx,
		(ev.client_y() as f64 - rect.top()) * sy,
	)
}

fn beam_button(
	profile: MotionProfile,
	controls: Shared<BeamControls>,
	ripple: Shared<Session>,
	continuous: RwSignal<Option<MotionProfile>>,
) -> impl IntoView {
	let (controls_enter, ripple_enter) = (controls.clone(), ripple.clone());
	let on_enter = move |_: PointerEvent| {
		if let Some(command) = controls_enter.borrow().enter(profile) {
			ripple_enter.borrow_mut().apply(command);
		}
	};

	let (controls_leave, ripple_leave) = (controls.clone(), ripple.clone());
	let on_leave = move |_: PointerEvent| {
		if let Some(command) = controls_leave.borrow().leave() {
			ripple_leave.borrow_mut().apply(command);
		}
	};

	let on_press = move |ev: PointerEvent| {
		ev.prevent_default();
		let command = controls.borrow_mut().press(profile);
		continuous.set(controls.borrow().continuous());
		ripple.borrow_mut().apply(command);
	};

	view! {
		<button
			class=format!("beam beam-{}", profile.key())
			class:latched=move || continuous.get() == Some(profile)
			on:pointerenter=on_enter
			on:pointerleave=on_leave
			on:pointerdown=on_press
		>
			{profile.label()}
		</button>
	}
}

#[component]
pub fn RippleMap(#[prop(optional)] config: MapConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let size = config.layout.canvas_size;
	let branching_factor = config.network.branching_factor;
	let first_degree = RwSignal::new(config.network.first_degree);
	let scheme = RwSignal::new(ColorScheme::default());
	let continuous = RwSignal::new(None::<MotionProfile>);
	let counts = Memo::new(move |_| compute_counts(first_degree.get(), branching_factor));

	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	let state: Shared<MapState> = Rc::new(RefCell::new(MapState::new(
		config.clone(),
		StdRng::seed_from_u64(seed),
	)));

	let ripple_loop = RafScheduler::new();
	let ripple: Shared<Session> = Rc::new(RefCell::new(RippleSession::new(
		ripple_loop.clone(),
		config.ripple.clone(),
	)));
	{
		let ripple = ripple.clone();
		ripple_loop.set_callback(move |now| ripple.borrow_mut().on_frame(now));
	}
	let controls: Shared<BeamControls> = Rc::new(RefCell::new(BeamControls::default()));

	let render_loop = RafScheduler::new();
	let render_frame: Rc<Cell<Option<FrameHandle>>> = Rc::new(Cell::new(None));
	let gate: Shared<Option<ReadyGate>> = Rc::new(RefCell::new(None));

	let teardown = StoredValue::new_local(Teardown {
		render_loop: render_loop.clone(),
		render_frame: render_frame.clone(),
		ripple: ripple.clone(),
		ripple_loop,
		gate: gate.clone(),
	});
	on_cleanup(move || {
		teardown.try_with_value(Teardown::run);
	});

	let (state_init, ripple_init) = (state.clone(), ripple.clone());
	let ready_fallback_ms = config.timing.ready_fallback_ms;
	let stroke_width = config.ripple.stroke_width;
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx,
			_ => {
				warn!("canvas 2d context unavailable");
				return;
			}
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};

		let state_ready = state_init.clone();
		*gate.borrow_mut() = ReadyGate::arm(
			move || {
				state_ready.borrow_mut().set_ready();
				info!("ripple map ready");
			},
			ready_fallback_ms,
		);

		let (state_anim, ripple_anim, frame_anim) =
			(state_init.clone(), ripple_init.clone(), render_frame.clone());
		let mut scheduler = render_loop.clone();
		let last_frame = Cell::new(None::<f64>);
		let pulses_shown = Cell::new(false);
		render_loop.set_callback(move |now| {
			let dt = last_frame
				.replace(Some(now))
				.map(|prev| now - prev)
				.unwrap_or(0.0);
			let ripple = ripple_anim.borrow();
			let mut s = state_anim.borrow_mut();
			s.tick(dt);

			let ripple_state = ripple.state();
			if s.dirty || ripple_state.active || pulses_shown.get() {
				let layer = ripple_state.active.then(|| PulseLayer {
					profile: ripple_state.profile,
					frames: *ripple.pulses(),
					stroke_width,
				});
				render::render(&s, layer.as_ref(), &ctx);
				pulses_shown.set(layer.is_some());
				s.dirty = false;
			}
			frame_anim.set(scheduler.request());
		});
		render_frame.set(render_loop.clone().request());
	});

	let state_count = state.clone();
	Effect::new(move |_| {
		let n = first_degree.get();
		state_count.borrow_mut().set_first_degree(n);
	});

	let state_scheme = state.clone();
	Effect::new(move |_| {
		let selected = scheme.get();
		state_scheme.borrow_mut().set_scheme(selected);
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = canvas_point(&canvas, &ev);
		let mut s = state_mm.borrow_mut();
		let hovered = s.point_at_position(x, y);
		s.set_hover(hovered);
	};

	let state_me = state.clone();
	let on_mouseenter = move |_: MouseEvent| {
		let mut s = state_me.borrow_mut();
		let scatter_ms = s.config.timing.scatter_ms;
		s.scatter.begin(scatter_ms);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.set_hover(None);
		s.scatter.settle();
		s.dirty = true;
	};

	let share = ShareTarget::default();

	view! {
		<div class="ripple-map">
			<div class="ripple-map-controls">
				<label class="field">
					<span>"# of First-degree Connections:"</span>
					<input
						type="number"
						min="0"
						prop:value=move || match first_degree.get() {
							0 => String::new(),
							n => n.to_string(),
						}
						on:input=move |ev| first_degree.set(parse_count(&event_target_value(&ev)))
					/>
				</label>

				<label class="field">
					<span>"Color Scheme"</span>
					<select
						prop:value=move || scheme.get().key()
						on:change=move |ev| {
							match event_target_value(&ev).parse::<ColorScheme>() {
								Ok(selected) => scheme.set(selected),
								Err(err) => {
									warn!("{err}, falling back to default");
									scheme.set(ColorScheme::default());
								}
							}
						}
					>
						{ColorScheme::ALL
							.into_iter()
							.map(|s| view! { <option value=s.key()>{s.label()}</option> })
							.collect_view()}
					</select>
				</label>

				<div class="beams">
					{MotionProfile::ALL
						.into_iter()
						.map(|profile| {
							beam_button(profile, controls.clone(), ripple.clone(), continuous)
						})
						.collect_view()}
				</div>
			</div>

			<div class="ripple-map-view">
				<canvas
					node_ref=canvas_ref
					class="ripple-map-canvas"
					width=size.to_string()
					height=size.to_string()
					on:mousemove=on_mousemove
					on:mouseenter=on_mouseenter
					on:mouseleave=on_mouseleave
					style="display: block; max-width: 100%;"
				/>
				<div class="ripple-map-stats">
					<p>{move || format!("1st degree: {} connections", counts.get().first_degree)}</p>
					<p>{move || format!("2nd degree: {} connections", counts.get().second_degree)}</p>
					<p>{move || format!("3rd degree: {} connections", counts.get().third_degree)}</p>
					<p>{move || format!("Total network size: {}", counts.get().total)}</p>
					<p class="share" title=share.text>
						{format!("Visualize Your Network Here: {}", share.display_url())}
					</p>
				</div>
			</div>
		</div>
	}
}
