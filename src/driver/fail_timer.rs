//---------------------------------------------------------------------------------------------------- use
use std::time::{Duration, Instant};

//---------------------------------------------------------------------------------------------------- FailTimer
/// When an output last failed, if it did.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub(super) struct FailTimer(Option<Instant>);

impl FailTimer {
	/// No failure.
	pub(super) const NONE: Self = Self(None);

	/// Forget the failure.
	pub(super) fn reset(&mut self) {
		self.0 = None;
	}

	/// Record a failure that happened just now.
	pub(super) fn update(&mut self) {
		self.0 = Some(Instant::now());
	}

	/// Has at least `duration` passed since the failure?
	///
	/// `true` if there was no failure.
	pub(super) fn check(&self, duration: Duration) -> bool {
		self.0.map_or(true, |t| t.elapsed() >= duration)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lifecycle() {
		let mut timer = FailTimer::default();
		assert_eq!(timer, FailTimer::NONE);
		assert!(timer.check(Duration::from_secs(1000)));

		timer.update();
		assert_ne!(timer, FailTimer::NONE);
		assert!(!timer.check(Duration::from_secs(1000)));
		assert!(timer.check(Duration::ZERO));

		timer.reset();
		assert_eq!(timer, FailTimer::NONE);
	}
}
