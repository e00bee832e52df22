//---------------------------------------------------------------------------------------------------- use
use crate::{
	chunk::{ChunkId, ChunkQueue, ReplayGainMode},
	driver::{Command, FailTimer, Pending},
	format::AudioFormat,
};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- Shared
/// What an [`Output`](crate::Output) and its driver thread share.
#[derive(Debug)]
pub(super) struct Shared {
	pub(super) state: Mutex<State>,
	/// Wakes the driver thread: a command was issued, or a chunk arrived.
	pub(super) wake: Condvar,
}

impl Shared {
	pub(super) fn new(replay_gain_mode: ReplayGainMode) -> Self {
		Self {
			state: Mutex::new(State::new(replay_gain_mode)),
			wake: Condvar::new(),
		}
	}
}

//---------------------------------------------------------------------------------------------------- State
/// Everything guarded by the output's lock.
///
/// Invariants:
/// - `current_chunk.is_some()` implies `pipe.is_some() && open`
/// - `open` implies the filters are open and `out_audio_format` is valid
pub(super) struct State {
	/// The mailbox, at most one command in flight.
	pub(super) command: Option<Pending>,
	/// The driver thread exited, nothing reads the mailbox anymore.
	pub(super) terminated: bool,

	/// The device and filters are open.
	pub(super) open: bool,
	/// `OutputPlugin::enable()` succeeded and `disable()` wasn't called since.
	pub(super) really_enabled: bool,
	/// The driver thread is inside its pause loop.
	pub(super) pause: bool,
	/// Chunks may be played; cleared by `Output::cancel()`.
	pub(super) allow_play: bool,
	/// The driver thread is inside its playback loop.
	pub(super) in_playback_loop: bool,
	/// The playback loop ran out of chunks after playing `current_chunk`.
	pub(super) current_chunk_finished: bool,
	/// The last wake-up was for a chunk, not a command.
	pub(super) woken_for_play: bool,

	pub(super) pipe: Option<Arc<dyn ChunkQueue>>,
	/// The last chunk handed to the device.
	pub(super) current_chunk: Option<ChunkId>,

	pub(super) in_audio_format: AudioFormat,
	pub(super) out_audio_format: AudioFormat,

	pub(super) fail_timer: FailTimer,
	pub(super) replay_gain_mode: ReplayGainMode,
}

impl State {
	pub(super) const fn new(replay_gain_mode: ReplayGainMode) -> Self {
		Self {
			command: None,
			terminated: false,
			open: false,
			really_enabled: false,
			pause: false,
			allow_play: true,
			in_playback_loop: false,
			current_chunk_finished: false,
			woken_for_play: false,
			pipe: None,
			current_chunk: None,
			in_audio_format: AudioFormat::UNDEFINED,
			out_audio_format: AudioFormat::UNDEFINED,
			fail_timer: FailTimer::NONE,
			replay_gain_mode,
		}
	}

	#[inline]
	/// The command in the mailbox, if any.
	pub(super) fn command(&self) -> Option<Command> {
		self.command.as_ref().map(|p| p.command)
	}

	#[inline]
	/// Is a command waiting to be executed?
	pub(super) const fn has_command(&self) -> bool {
		self.command.is_some()
	}
}

impl std::fmt::Debug for State {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("State")
			.field("command", &self.command())
			.field("open", &self.open)
			.field("really_enabled", &self.really_enabled)
			.field("pause", &self.pause)
			.field("allow_play", &self.allow_play)
			.field("in_playback_loop", &self.in_playback_loop)
			.field("current_chunk", &self.current_chunk)
			.field("in_audio_format", &self.in_audio_format)
			.field("out_audio_format", &self.out_audio_format)
			.field("fail_timer", &self.fail_timer)
			.finish_non_exhaustive()
	}
}
