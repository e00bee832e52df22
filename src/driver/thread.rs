//! The driver thread: command loop and device lifecycle.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	driver::{ChunkFilter, Command, Shared, State},
	format::AudioFormat,
	macros::{debug2,error2,info2,warn2},
	notify::PlayerNotify,
	output::OutputPlugin,
};
use parking_lot::MutexGuard;
use std::{
	sync::Arc,
	thread::JoinHandle,
	time::Duration,
};

//---------------------------------------------------------------------------------------------------- Constants
/// Buffer size and sample rate passed to the real-time promotion.
///
/// These only tune the scheduling parameters, 0 frames lets the OS decide.
const RT_BUFFER_FRAMES: u32 = 0;
const RT_SAMPLE_RATE: u32 = 44_100;

//---------------------------------------------------------------------------------------------------- Flush
/// What to do with buffered audio before closing the device.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub(super) enum Flush {
	/// Play it out.
	Drain,
	/// Discard it.
	Cancel,
	/// Leave the plugin alone, just close it.
	Skip,
}

//---------------------------------------------------------------------------------------------------- Abort
/// Shuts the mailbox if the driver thread unwinds.
///
/// Dropping the pending command wakes its issuer,
/// and later commands complete without being run.
struct Abort<'a>(&'a Shared);

impl Drop for Abort<'_> {
	fn drop(&mut self) {
		if std::thread::panicking() {
			let mut state = self.0.state.lock();
			state.terminated = true;
			drop(state.command.take());
		}
	}
}

//---------------------------------------------------------------------------------------------------- OutputThread
/// The state the driver thread owns outright.
///
/// Nothing here is shared: the other side only sees [`State`].
pub(super) struct OutputThread<P: OutputPlugin, N: PlayerNotify> {
	pub(super) name: String,
	pub(super) plugin: P,
	/// The operator's format mask.
	pub(super) config_format: AudioFormat,
	pub(super) tags: bool,
	pub(super) pause_poll: Duration,
	pub(super) filters: ChunkFilter,
	pub(super) player: N,
	pub(super) shared: Arc<Shared>,
}

/// Empty the mailbox and wake the issuer.
///
/// The lock is released while waking.
pub(super) fn finish_command(state: &mut MutexGuard<'_, State>) {
	if let Some(pending) = state.command.take() {
		MutexGuard::unlocked(state, || pending.finish());
	}
}

impl<P: OutputPlugin, N: PlayerNotify> OutputThread<P, N> {
	//---------------------------------------------------------------------------------------------------- Init
	#[cold]
	#[inline(never)]
	/// Spawn the driver thread.
	pub(super) fn spawn(self, realtime: bool) -> std::io::Result<JoinHandle<()>> {
		std::thread::Builder::new()
			.name(format!("output:{}", self.name))
			.spawn(move || {
				// Kept alive for as long as the thread runs.
				let _priority = if realtime {
					match audio_thread_priority::promote_current_thread_to_real_time(RT_BUFFER_FRAMES, RT_SAMPLE_RATE) {
						Ok(handle) => Some(handle),
						Err(e) => {
							warn2!("\"{}\" [{}] - real-time priority failed: {e}", self.name, P::NAME);
							None
						},
					}
				} else {
					None
				};

				self.main();
			})
	}

	//---------------------------------------------------------------------------------------------------- Main Loop
	#[cold]
	#[inline(never)]
	/// The command loop.
	fn main(mut self) {
		debug2!("\"{}\" [{}] - main()", self.name, P::NAME);

		let shared = Arc::clone(&self.shared);
		let _abort = Abort(&shared);
		let mut state = shared.state.lock();

		loop {
			match state.command() {
				None => (),

				Some(Command::Enable) => {
					self.enable(&mut state);
					finish_command(&mut state);
				},

				Some(Command::Disable) => {
					self.disable(&mut state);
					finish_command(&mut state);
				},

				Some(Command::Open) => {
					self.open(&mut state);
					finish_command(&mut state);
				},

				Some(Command::Reopen) => {
					self.reopen(&mut state);
					finish_command(&mut state);
				},

				Some(Command::Close { drain }) => {
					if state.open {
						self.close(&mut state, drain);
					}
					finish_command(&mut state);
				},

				Some(Command::Pause) => {
					// The output may have failed after the
					// pause was issued, nothing to pause then.
					if state.open {
						self.pause(&mut state);
						// Whatever ended the pause is handled
						// before playing or going idle.
						continue;
					}
					finish_command(&mut state);
				},

				Some(Command::Drain) => {
					if state.open {
						let plugin = &mut self.plugin;
						MutexGuard::unlocked(&mut state, || plugin.drain());
					}
					finish_command(&mut state);
					continue;
				},

				Some(Command::Cancel) => {
					state.current_chunk = None;
					if state.open {
						self.cancel(&mut state);
					}
					finish_command(&mut state);
					continue;
				},

				Some(Command::Terminate) => {
					state.current_chunk = None;
					state.terminated = true;
					finish_command(&mut state);
					debug2!("\"{}\" [{}] - terminated", self.name, P::NAME);
					return;
				},
			}

			// More chunks may be waiting, don't go idle.
			if state.open && state.allow_play && self.play(&mut state) {
				continue;
			}

			if !state.has_command() {
				state.woken_for_play = false;
				shared.wake.wait(&mut state);
			}
		}
	}

	/// Discard audio buffered in the device and the filters.
	pub(super) fn cancel(&mut self, state: &mut MutexGuard<'_, State>) {
		let Self { plugin, filters, .. } = self;
		MutexGuard::unlocked(state, || {
			plugin.cancel();
			filters.reset();
		});
	}

	//---------------------------------------------------------------------------------------------------- Enable/Disable
	/// Returns `true` if the device is (now) enabled.
	fn enable(&mut self, state: &mut MutexGuard<'_, State>) -> bool {
		if state.really_enabled {
			return true;
		}

		let plugin = &mut self.plugin;
		if let Err(e) = MutexGuard::unlocked(state, || plugin.enable()) {
			error2!("Failed to enable \"{}\" [{}]: {e}", self.name, P::NAME);
			return false;
		}

		state.really_enabled = true;
		info2!("\"{}\" [{}] - enabled", self.name, P::NAME);
		true
	}

	fn disable(&mut self, state: &mut MutexGuard<'_, State>) {
		if state.open {
			self.close(state, false);
		}

		if state.really_enabled {
			state.really_enabled = false;
			let plugin = &mut self.plugin;
			MutexGuard::unlocked(state, || plugin.disable());
		}
	}

	//---------------------------------------------------------------------------------------------------- Open/Close
	fn open(&mut self, state: &mut MutexGuard<'_, State>) {
		debug_assert!(!state.open);
		debug_assert!(state.current_chunk.is_none());

		state.fail_timer.reset();

		let in_format = state.in_audio_format;
		if state.pipe.is_none() || !in_format.is_valid() {
			error2!("Failed to open \"{}\" [{}]: invalid input format {in_format}", self.name, P::NAME);
			state.fail_timer.update();
			return;
		}

		// The last enable may have failed.
		if !self.enable(state) {
			state.fail_timer.update();
			return;
		}

		let filters = &mut self.filters;
		let filter_format = match MutexGuard::unlocked(state, || filters.open(in_format)) {
			Ok(format) => format,
			Err(e) => {
				error2!("Failed to open filter for \"{}\" [{}]: {e}", self.name, P::NAME);
				state.fail_timer.update();
				return;
			},
		};

		let requested = filter_format.with_mask(self.config_format);
		let plugin = &mut self.plugin;
		let out_format = match MutexGuard::unlocked(state, || plugin.open(requested)) {
			Ok(format) => format,
			Err(e) => {
				error2!("Failed to open \"{}\" [{}]: {e}", self.name, P::NAME);
				let filters = &mut self.filters;
				MutexGuard::unlocked(state, || filters.close());
				state.fail_timer.update();
				return;
			},
		};

		if let Err(e) = self.filters.set_convert(out_format) {
			error2!("Failed to convert for \"{}\" [{}]: {e}", self.name, P::NAME);
			let Self { plugin, filters, .. } = self;
			MutexGuard::unlocked(state, || {
				plugin.close();
				filters.close();
			});
			state.fail_timer.update();
			return;
		}

		state.out_audio_format = out_format;
		state.open = true;

		debug2!("opened plugin={} name=\"{}\" audio_format={out_format}", P::NAME, self.name);
		if in_format != out_format {
			debug2!("converting from {in_format}");
		}
	}

	pub(super) fn close(&mut self, state: &mut MutexGuard<'_, State>, drain: bool) {
		debug_assert!(state.open);
		let flush = if drain { Flush::Drain } else { Flush::Cancel };
		self.teardown(state, flush, true);
	}

	/// Detach from the queue and close the device.
	///
	/// The lock is released for the plugin and filter calls, which happen
	/// in this order: drain or cancel, close the plugin, close the filters.
	/// `close_filters` is `false` when the filters were already closed.
	fn teardown(&mut self, state: &mut MutexGuard<'_, State>, flush: Flush, close_filters: bool) {
		state.pipe = None;
		state.current_chunk = None;
		state.open = false;

		let Self { plugin, filters, .. } = self;
		MutexGuard::unlocked(state, || {
			match flush {
				Flush::Drain  => plugin.drain(),
				Flush::Cancel => plugin.cancel(),
				Flush::Skip   => (),
			}
			plugin.close();
			if close_filters {
				filters.close();
			}
		});

		debug2!("closed plugin={} name=\"{}\"", P::NAME, self.name);
	}

	//---------------------------------------------------------------------------------------------------- Reopen
	fn reopen(&mut self, state: &mut MutexGuard<'_, State>) {
		if !self.config_format.is_fully_defined() {
			// The device format follows the input, so the device
			// itself must be reopened. The queue stays attached.
			if state.open {
				let pipe = state.pipe.clone();
				self.close(state, true);
				state.pipe = pipe;
			}

			state.out_audio_format = state.in_audio_format.with_mask(self.config_format);
		}

		if state.open {
			self.reopen_filters(state);
		} else {
			self.open(state);
		}
	}

	/// Reconfigure the filters for a new input format, keeping the device open.
	fn reopen_filters(&mut self, state: &mut MutexGuard<'_, State>) {
		let in_format = state.in_audio_format;
		let out_format = state.out_audio_format;

		let filters = &mut self.filters;
		let opened = MutexGuard::unlocked(state, || {
			filters.close();
			filters.open(in_format)
		});

		let result = match opened {
			// A failed open leaves nothing open.
			Err(e) => Err((e, false)),
			Ok(_) => self.filters.set_convert(out_format).map_err(|e| (e, true)),
		};

		if let Err((e, close_filters)) = result {
			error2!("Failed to open filter for \"{}\" [{}]: {e}", self.name, P::NAME);
			self.teardown(state, Flush::Skip, close_filters);
			state.fail_timer.update();
		}
	}
}
