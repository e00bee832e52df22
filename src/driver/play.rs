//! Playback: pacing chunks into the device.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	chunk::Chunk,
	driver::{
		thread::{finish_command, OutputThread},
		State,
	},
	error::{DriverError, OutputError},
	macros::{error2,trace2},
	notify::PlayerNotify,
	output::OutputPlugin,
};
use parking_lot::{Condvar, MutexGuard};
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- Free functions
/// Wait until the device is ready for more data.
///
/// Returns `false` as soon as a command is pending, without
/// waiting at all if one already is. The wait is bounded by
/// the device's reported delay, and repeated until it is zero.
pub(super) fn wait_for_delay<P: OutputPlugin>(
	plugin: &P,
	wake: &Condvar,
	state: &mut MutexGuard<'_, State>,
) -> bool {
	if state.has_command() {
		return false;
	}

	loop {
		let delay = plugin.delay();
		if delay.is_zero() {
			return true;
		}

		wake.wait_for(state, delay);

		if state.has_command() {
			return false;
		}
	}
}

/// The chunk after the last one played, or the head of the queue.
fn next_chunk(state: &State) -> Option<Arc<Chunk>> {
	let pipe = state.pipe.as_ref()?;
	match state.current_chunk {
		Some(id) => pipe.next(id),
		None => pipe.peek(),
	}
}

//---------------------------------------------------------------------------------------------------- Playback
impl<P: OutputPlugin, N: PlayerNotify> OutputThread<P, N> {
	/// Play chunks until the queue runs dry or a command arrives.
	///
	/// Returns `false` if there was nothing to play.
	pub(super) fn play(&mut self, state: &mut MutexGuard<'_, State>) -> bool {
		let Some(mut chunk) = next_chunk(state) else {
			return false;
		};

		state.current_chunk_finished = false;
		debug_assert!(!state.in_playback_loop);
		state.in_playback_loop = true;

		while !state.has_command() {
			state.current_chunk = Some(chunk.id);

			if !self.play_chunk(state, &chunk) {
				debug_assert!(state.current_chunk.is_none());
				break;
			}

			match state.pipe.as_ref().and_then(|p| p.next(chunk.id)) {
				Some(next) => chunk = next,
				None => break,
			}
		}

		state.in_playback_loop = false;
		state.current_chunk_finished = true;

		let player = &self.player;
		MutexGuard::unlocked(state, || player.signal());

		true
	}

	/// Play one chunk, closing the device on failure.
	///
	/// Returns `false` if the device failed.
	fn play_chunk(&mut self, state: &mut MutexGuard<'_, State>, chunk: &Chunk) -> bool {
		match self.write_chunk(state, chunk) {
			Ok(()) => true,
			Err(e) => {
				error2!("\"{}\" [{}] failed to play: {e}", self.name, P::NAME);
				self.close(state, false);
				state.fail_timer.update();
				false
			},
		}
	}

	/// Filter `chunk` and write it to the device.
	///
	/// Returns early (successfully) if a command interrupts the writes.
	fn write_chunk(&mut self, state: &mut MutexGuard<'_, State>, chunk: &Chunk) -> Result<(), DriverError> {
		if let Some(tag) = chunk.tag.as_deref() {
			if self.tags && self.plugin.supports_tags() {
				let plugin = &mut self.plugin;
				MutexGuard::unlocked(state, || plugin.send_tag(tag));
			}
		}

		self.filters.set_replay_gain_mode(state.replay_gain_mode);

		let filters = &mut self.filters;
		let mut data = MutexGuard::unlocked(state, move || {
			let filters = filters;
			filters.filter_chunk(chunk)
		})?;

		trace2!("\"{}\" - chunk {}: {} bytes", self.name, chunk.id, data.len());

		while !data.is_empty() && !state.has_command() {
			if !wait_for_delay(&self.plugin, &self.shared.wake, state) {
				break;
			}

			let plugin = &mut self.plugin;
			let written = MutexGuard::unlocked(state, || plugin.play(data))?;
			if written == 0 {
				return Err(OutputError::Write.into());
			}

			data = &data[written.min(data.len())..];
		}

		Ok(())
	}

	//---------------------------------------------------------------------------------------------------- Pause
	/// Stay paused until a command arrives.
	///
	/// The pause command itself is finished right away,
	/// the command that ends the pause is left pending.
	pub(super) fn pause(&mut self, state: &mut MutexGuard<'_, State>) {
		self.cancel(state);

		state.pause = true;
		finish_command(state);

		loop {
			if !wait_for_delay(&self.plugin, &self.shared.wake, state) {
				break;
			}

			let plugin = &mut self.plugin;
			if let Err(e) = MutexGuard::unlocked(state, || plugin.pause()) {
				error2!("\"{}\" [{}] failed to pause: {e}", self.name, P::NAME);
				self.close(state, false);
				state.fail_timer.update();
				break;
			}

			if state.has_command() {
				break;
			}

			self.shared.wake.wait_for(state, self.pause_poll);
		}

		state.pause = false;
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		chunk::ReplayGainMode,
		driver::{Command, Pending, Shared},
		format::AudioFormat,
	};
	use std::{
		sync::atomic::{AtomicUsize, Ordering},
		time::Duration,
	};

	/// Reports a 1ms delay the first `n` times it is asked.
	struct Countdown(AtomicUsize);

	impl Countdown {
		fn asked(&self, from: usize) -> usize {
			from - self.0.load(Ordering::SeqCst)
		}
	}

	impl OutputPlugin for Countdown {
		const NAME: &'static str = "countdown";

		fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, OutputError> {
			Ok(format)
		}

		fn close(&mut self) {}

		fn delay(&self) -> Duration {
			match self.0.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)) {
				Ok(_) => Duration::from_millis(1),
				Err(_) => Duration::ZERO,
			}
		}

		fn play(&mut self, data: &[u8]) -> Result<usize, OutputError> {
			Ok(data.len())
		}
	}

	#[test]
	// A pending command returns before the device is asked.
	fn command_pending() {
		let plugin = Countdown(AtomicUsize::new(3));
		let shared = Shared::new(ReplayGainMode::Off);
		let mut state = shared.state.lock();
		let (pending, _completion) = Pending::new(Command::Cancel);
		state.command = Some(pending);

		assert!(!wait_for_delay(&plugin, &shared.wake, &mut state));
		assert_eq!(plugin.asked(3), 0);
	}

	#[test]
	// Waits until the delay reaches zero.
	fn ready() {
		let plugin = Countdown(AtomicUsize::new(3));
		let shared = Shared::new(ReplayGainMode::Off);
		let mut state = shared.state.lock();

		assert!(wait_for_delay(&plugin, &shared.wake, &mut state));
		assert_eq!(plugin.asked(3), 3);
	}

	#[test]
	// A command arriving mid-wait ends it.
	fn interrupted() {
		let plugin = Countdown(AtomicUsize::new(usize::MAX));
		let shared = Arc::new(Shared::new(ReplayGainMode::Off));

		let other = Arc::clone(&shared);
		let thread = std::thread::spawn(move || {
			std::thread::sleep(Duration::from_millis(20));
			let (pending, completion) = Pending::new(Command::Drain);
			other.state.lock().command = Some(pending);
			other.wake.notify_one();
			completion
		});

		let mut state = shared.state.lock();
		assert!(!wait_for_delay(&plugin, &shared.wake, &mut state));
		assert!(state.has_command());
		drop(state);

		drop(thread.join().unwrap());
	}
}
