//! Ripple pulses: three phase-staggered rings driven by a frame loop.

use std::f64::consts::PI;

use log::info;

use super::scheduler::{FrameHandle, FrameScheduler};
use super::types::{MotionProfile, PulseFrame};
use crate::config::RippleConfig;

pub const PULSE_COUNT: usize = 3;

/// Progress past which outward pulses start their final fade.
const EDGE_HOLD: f64 = 0.85;

/// Radius and opacity for a pulse `local_ms` into its own timeline.
/// Periodic in the profile's duration.
pub fn pulse_frame(profile: MotionProfile, local_ms: f64, max_radius: f64) -> PulseFrame {
	let duration = profile.duration_ms();
	let progress = local_ms.max(0.0) % duration / duration;
	match profile {
		MotionProfile::OutAndBack => {
			let s = (1.0 - (2.0 * PI * progress).cos()) / 2.0;
			let center_bias = 1.0 - (1.0 - 2.0 * progress).abs();
			PulseFrame {
				radius: 1.0 + s * (max_radius - 1.0),
				opacity: (0.28 + 0.12 * center_bias).min(0.42),
			}
		}
		MotionProfile::OutwardHold | MotionProfile::OutwardLinear => PulseFrame {
			radius: 1.0 + progress * (max_radius - 1.0),
			opacity: if progress < EDGE_HOLD {
				1.0 - progress * 0.6
			} else {
				(0.4 - (progress - EDGE_HOLD) * 2.2).max(0.0)
			},
		},
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RippleCommand {
	/// Show pulses for a profile; no-op if it is already running.
	Start(MotionProfile),
	/// Bump the sequence id and resynchronize all pulses from zero.
	Restart(MotionProfile),
	Stop,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RippleState {
	pub active: bool,
	pub profile: MotionProfile,
	pub sequence_id: u64,
	pub start_time: f64,
}

/// One ripple session. At most one frame callback is pending at a time.
pub struct RippleSession<S: FrameScheduler> {
	scheduler: S,
	config: RippleConfig,
	state: RippleState,
	pending: Option<FrameHandle>,
	/// `None` while a pulse has no render target.
	pulses: [Option<PulseFrame>; PULSE_COUNT],
}

impl<S: FrameScheduler> RippleSession<S> {
	pub fn new(scheduler: S, config: RippleConfig) -> Self {
		Self {
			scheduler,
			config,
			state: RippleState::default(),
			pending: None,
			pulses: [None; PULSE_COUNT],
		}
	}

	pub fn state(&self) -> &RippleState {
		&self.state
	}

	pub fn pulses(&self) -> &[Option<PulseFrame>; PULSE_COUNT] {
		&self.pulses
	}

	#[cfg(test)]
	fn is_running(&self) -> bool {
		self.state.active && self.pending.is_some()
	}

	pub fn apply(&mut self, command: RippleCommand) {
		match command {
			RippleCommand::Start(profile) => {
				if self.state.active && self.state.profile == profile {
					return;
				}
				self.arm(profile);
			}
			RippleCommand::Restart(profile) => {
				self.state.sequence_id += 1;
				self.arm(profile);
			}
			RippleCommand::Stop => self.stop(),
		}
	}

	/// Cancel any prior loop, prime the pulses and schedule the first frame.
	fn arm(&mut self, profile: MotionProfile) {
		self.cancel_pending();
		self.state.active = true;
		self.state.profile = profile;
		self.state.start_time = self.scheduler.now();
		self.pulses = [Some(self.primed()); PULSE_COUNT];
		self.pending = self.scheduler.request();
		info!(
			"ripple {} started (sequence {})",
			profile, self.state.sequence_id
		);
	}

	/// Cancel the loop and hide every pulse at once.
	pub fn stop(&mut self) {
		self.cancel_pending();
		if self.state.active {
			info!("ripple {} stopped", self.state.profile);
		}
		self.state.active = false;
		for pulse in self.pulses.iter_mut().flatten() {
			pulse.opacity = 0.0;
		}
	}

	/// Frame callback. Updates all pulses against one shared start time and
	/// schedules the next frame.
	pub fn on_frame(&mut self, now: f64) {
		self.pending = None;
		if !self.state.active {
			return;
		}
		let elapsed = now - self.state.start_time;
		let primed = self.primed();
		for (pulse, delay) in self.pulses.iter_mut().zip(self.config.delays_ms) {
			let Some(pulse) = pulse else {
				continue;
			};
			*pulse = if elapsed < delay {
				primed
			} else {
				pulse_frame(self.state.profile, elapsed - delay, self.config.max_radius)
			};
		}
		self.pending = self.scheduler.request();
	}

	/// Drop the render target for one pulse; it is skipped until re-primed.
	#[cfg(test)]
	fn detach_pulse(&mut self, index: usize) {
		if let Some(pulse) = self.pulses.get_mut(index) {
			*pulse = None;
		}
	}

	fn primed(&self) -> PulseFrame {
		PulseFrame {
			radius: 1.0,
			opacity: self.config.primed_opacity,
		}
	}

	fn cancel_pending(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel(handle);
		}
	}
}

/// Beam buttons: hovering previews a profile, pressing latches it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BeamControls {
	continuous: Option<MotionProfile>,
}

impl BeamControls {
	pub fn continuous(&self) -> Option<MotionProfile> {
		self.continuous
	}

	pub fn enter(&self, profile: MotionProfile) -> Option<RippleCommand> {
		self.continuous
			.is_none()
			.then_some(RippleCommand::Start(profile))
	}

	pub fn leave(&self) -> Option<RippleCommand> {
		self.continuous.is_none().then_some(RippleCommand::Stop)
	}

	pub fn press(&mut self, profile: MotionProfile) -> RippleCommand {
		if self.continuous == Some(profile) {
			self.continuous = None;
			return RippleCommand::Stop;
		}
		self.continuous = Some(profile);
		RippleCommand::Restart(profile)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Scheduler double: a settable clock and a record of requests.
	#[derive(Default)]
	struct ManualScheduler {
		clock: f64,
		next_id: i32,
		pending: Vec<FrameHandle>,
		cancelled: Vec<FrameHandle>,
	}

	impl FrameScheduler for ManualScheduler {
		fn now(&self) -> f64 {
			self.clock
		}

		fn request(&mut self) -> Option<FrameHandle> {
			self.next_id += 1;
			let handle = FrameHandle(self.next_id);
			self.pending.push(handle);
			Some(handle)
		}

		fn cancel(&mut self, handle: FrameHandle) {
			self.pending.retain(|h| *h != handle);
			self.cancelled.push(handle);
		}
	}

	fn session() -> RippleSession<ManualScheduler> {
		RippleSession::new(ManualScheduler::default(), RippleConfig::default())
	}

	/// Fire the pending frame at time `now`.
	fn tick(session: &mut RippleSession<ManualScheduler>, now: f64) {
		session.scheduler.clock = now;
		session.scheduler.pending.clear();
		session.on_frame(now);
	}

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn test_pulse_is_periodic() {
		for profile in MotionProfile::ALL {
			let d = profile.duration_ms();
			for t in [0.0, 250.0, 3_333.0, 7_999.0] {
				let a = pulse_frame(profile, t, 300.0);
				let b = pulse_frame(profile, t + 3.0 * d, 300.0);
				assert!(close(a.radius, b.radius), "{profile} at {t}");
				assert!(close(a.opacity, b.opacity), "{profile} at {t}");
			}
		}
	}

	#[test]
	fn test_out_and_back_contracts_at_cycle_edges() {
		let d = MotionProfile::OutAndBack.duration_ms();
		assert!(close(pulse_frame(MotionProfile::OutAndBack, 0.0, 300.0).radius, 1.0));
		assert!(close(pulse_frame(MotionProfile::OutAndBack, d, 300.0).radius, 1.0));
		let mid = pulse_frame(MotionProfile::OutAndBack, d / 2.0, 300.0);
		assert!(close(mid.radius, 300.0));
		assert!(close(mid.opacity, 0.40));
		assert!(mid.opacity <= 0.42);
	}

	#[test]
	fn test_outward_holds_then_fades() {
		let d = MotionProfile::OutwardHold.duration_ms();
		let start = pulse_frame(MotionProfile::OutwardHold, 0.0, 300.0);
		assert!(close(start.radius, 1.0));
		assert!(close(start.opacity, 1.0));

		let held = pulse_frame(MotionProfile::OutwardHold, d * 0.8, 300.0);
		assert!(close(held.opacity, 0.52));

		let late = pulse_frame(MotionProfile::OutwardHold, d * 0.99, 300.0);
		assert!(late.opacity < 0.1);
		assert!(late.radius > 290.0);
	}

	#[test]
	fn test_linear_profile_is_slower() {
		let t = 4_000.0;
		let hold = pulse_frame(MotionProfile::OutwardHold, t, 300.0);
		let linear = pulse_frame(MotionProfile::OutwardLinear, t, 300.0);
		assert!(linear.radius < hold.radius);
	}

	#[test]
	fn test_start_primes_and_schedules() {
		let mut session = session();
		session.scheduler.clock = 100.0;
		session.apply(RippleCommand::Start(MotionProfile::OutwardHold));
		assert!(session.is_running());
		assert_eq!(session.state().start_time, 100.0);
		for pulse in session.pulses() {
			assert_eq!(
				*pulse,
				Some(PulseFrame {
					radius: 1.0,
					opacity: 0.28
				})
			);
		}
		assert_eq!(session.scheduler.pending.len(), 1);
	}

	#[test]
	fn test_pulses_are_staggered_by_delay() {
		let mut session = session();
		session.apply(RippleCommand::Start(MotionProfile::OutwardLinear));
		tick(&mut session, 4_000.0);
		let pulses: Vec<PulseFrame> = session.pulses().iter().map(|p| p.unwrap()).collect();
		assert!(close(
			pulses[0].radius,
			pulse_frame(MotionProfile::OutwardLinear, 4_000.0, 300.0).radius
		));
		assert!(close(
			pulses[1].radius,
			pulse_frame(MotionProfile::OutwardLinear, 1_000.0, 300.0).radius
		));
		// third pulse has not started yet
		assert_eq!(pulses[2].radius, 1.0);
		assert_eq!(pulses[2].opacity, 0.28);
	}

	#[test]
	fn test_stop_zeroes_opacity_and_cancels() {
		let mut session = session();
		session.apply(RippleCommand::Start(MotionProfile::OutAndBack));
		tick(&mut session, 500.0);
		session.apply(RippleCommand::Stop);

		assert!(!session.is_running());
		assert!(session.scheduler.pending.is_empty());
		assert_eq!(session.scheduler.cancelled.len(), 1);
		assert!(session.pulses().iter().flatten().all(|p| p.opacity == 0.0));

		// a stale frame after stop does nothing
		tick(&mut session, 900.0);
		assert!(session.pulses().iter().flatten().all(|p| p.opacity == 0.0));
		assert!(session.scheduler.pending.is_empty());
	}

	#[test]
	fn test_restart_resets_elapsed() {
		let mut session = session();
		session.apply(RippleCommand::Start(MotionProfile::OutwardHold));
		tick(&mut session, 5_000.0);
		session.scheduler.clock = 5_000.0;
		session.apply(RippleCommand::Restart(MotionProfile::OutwardHold));

		assert_eq!(session.state().sequence_id, 1);
		assert_eq!(session.state().start_time, 5_000.0);
		assert_eq!(session.scheduler.pending.len(), 1);

		tick(&mut session, 5_000.0);
		let first = session.pulses()[0].unwrap();
		assert!(close(first.radius, 1.0));
		assert_eq!(session.pulses()[1].unwrap().opacity, 0.28);
	}

	#[test]
	fn test_only_one_loop_per_session() {
		let mut session = session();
		session.apply(RippleCommand::Start(MotionProfile::OutwardHold));
		session.apply(RippleCommand::Start(MotionProfile::OutAndBack));
		session.apply(RippleCommand::Restart(MotionProfile::OutAndBack));
		assert_eq!(session.scheduler.pending.len(), 1);
		assert_eq!(session.scheduler.cancelled.len(), 2);
	}

	#[test]
	fn test_repeat_start_same_profile_keeps_timing() {
		let mut session = session();
		session.apply(RippleCommand::Start(MotionProfile::OutwardHold));
		session.scheduler.clock = 2_000.0;
		session.apply(RippleCommand::Start(MotionProfile::OutwardHold));
		assert_eq!(session.state().start_time, 0.0);
	}

	#[test]
	fn test_detached_pulse_is_skipped() {
		let mut session = session();
		session.apply(RippleCommand::Start(MotionProfile::OutwardHold));
		session.detach_pulse(1);
		tick(&mut session, 4_000.0);
		assert!(session.pulses()[1].is_none());
		assert!(session.pulses()[0].is_some());
		assert!(session.is_running());
	}

	#[test]
	fn test_hover_previews_until_pressed() {
		let mut controls = BeamControls::default();
		assert_eq!(
			controls.enter(MotionProfile::OutAndBack),
			Some(RippleCommand::Start(MotionProfile::OutAndBack))
		);
		assert_eq!(controls.leave(), Some(RippleCommand::Stop));

		assert_eq!(
			controls.press(MotionProfile::OutwardHold),
			RippleCommand::Restart(MotionProfile::OutwardHold)
		);
		assert_eq!(controls.continuous(), Some(MotionProfile::OutwardHold));
		assert_eq!(controls.enter(MotionProfile::OutAndBack), None);
		assert_eq!(controls.leave(), None);
	}

	#[test]
	fn test_press_toggles_and_switches() {
		let mut controls = BeamControls::default();
		controls.press(MotionProfile::OutwardLinear);
		assert_eq!(
			controls.press(MotionProfile::OutAndBack),
			RippleCommand::Restart(MotionProfile::OutAndBack)
		);
		assert_eq!(controls.press(MotionProfile::OutAndBack), RippleCommand::Stop);
		assert_eq!(controls.continuous(), None);
	}
}
