//! Frame scheduling seam between the animation code and the browser.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Id of a scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// A monotonic clock plus a "call me next frame" hook.
pub trait FrameScheduler {
	/// Milliseconds on the same timeline as frame timestamps.
	fn now(&self) -> f64;

	/// Ask for one more frame callback. `None` if the host refused.
	fn request(&mut self) -> Option<FrameHandle>;

	/// Drop a pending callback. Must take effect before the next frame.
	fn cancel(&mut self, handle: FrameHandle);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame`-backed scheduler. Clones share one callback.
#[derive(Clone, Default)]
pub struct RafScheduler {
	callback: FrameCallback,
}

impl RafScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_callback(&self, f: impl FnMut(f64) + 'static) {
		*self.callback.borrow_mut() = Some(Closure::new(f));
	}

	/// Drop the callback so nothing further can be scheduled.
	pub fn release(&self) {
		self.callback.borrow_mut().take();
	}
}

impl FrameScheduler for RafScheduler {
	fn now(&self) -> f64 {
		web_sys::window()
			.and_then(|w| w.performance())
			.map(|p| p.now())
			.unwrap_or(0.0)
	}

	fn request(&mut self) -> Option<FrameHandle> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel(&mut self, handle: FrameHandle) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle.0);
		}
	}
}

/// Defers a heavy first draw until two frames after mount, with a timeout
/// fallback for hosts that throttle animation frames.
pub struct ReadyGate {
	outer: Option<Closure<dyn FnMut()>>,
	inner: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	fallback: Option<Closure<dyn FnMut()>>,
	outer_id: Option<i32>,
	inner_id: Rc<Cell<Option<i32>>>,
	timeout_id: Option<i32>,
}

impl ReadyGate {
	pub fn arm(on_ready: impl Fn() + 'static, fallback_ms: i32) -> Option<Self> {
		let window = web_sys::window()?;
		let fired = Rc::new(Cell::new(false));
		let on_ready: Rc<dyn Fn()> = Rc::new(on_ready);
		let fire = {
			let fired = fired.clone();
			move || {
				if !fired.replace(true) {
					on_ready();
				}
			}
		};

		let inner: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
		let inner_id = Rc::new(Cell::new(None));
		*inner.borrow_mut() = Some(Closure::new(fire.clone()));

		let (inner_outer, inner_id_outer) = (inner.clone(), inner_id.clone());
		let outer: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *inner_outer.borrow() {
				inner_id_outer.set(
					window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		});
		let fallback: Closure<dyn FnMut()> = Closure::new(fire);

		let outer_id = window
			.request_animation_frame(outer.as_ref().unchecked_ref())
			.ok();
		let timeout_id = window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				fallback.as_ref().unchecked_ref(),
				fallback_ms,
			)
			.ok();

		Some(Self {
			outer: Some(outer),
			inner,
			fallback: Some(fallback),
			outer_id,
			inner_id,
			timeout_id,
		})
	}

	/// Cancel every pending callback.
	pub fn cancel(&mut self) {
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.outer_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(id) = self.inner_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(id) = self.timeout_id.take() {
				window.clear_timeout_with_handle(id);
			}
		}
		self.outer.take();
		self.inner.borrow_mut().take();
		self.fallback.take();
	}
}
