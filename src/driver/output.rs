//! The control side of an output.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	chunk::{ChunkId, ChunkQueue, ReplayGainMode},
	config::OutputConfig,
	driver::{ChunkFilter, Command, Completion, OutputThread, Pending, Shared, State},
	filter::FilterChain,
	format::AudioFormat,
	macros::{debug2,error2},
	notify::PlayerNotify,
	output::OutputPlugin,
};
use std::{
	sync::Arc,
	thread::JoinHandle,
	time::Duration,
};

//---------------------------------------------------------------------------------------------------- Output
/// One audio output and its driver thread.
///
/// All methods are called from a single control thread.
/// Blocking work (opening, writing, draining) happens on the
/// driver thread; methods here only block while waiting for
/// a command to be acknowledged.
///
/// At most one command is in flight: issuing a new one first
/// waits for the previous one to finish.
///
/// ```rust
/// # use outpipe::{*, chunk::*, config::*, filter::*, format::*, output::*};
/// # use std::sync::Arc;
/// let pipe = Arc::new(MusicPipe::new());
/// let mut output = Output::spawn(
///     OutputConfig::new("null"),
///     NullOutput::new(false),
///     FilterChain::new(),
///     (),
/// ).unwrap();
///
/// let format = AudioFormat::new(44100, SampleFormat::S16, 2);
/// assert!(output.open(format, pipe.clone()));
/// assert_eq!(output.out_audio_format(), Some(format));
///
/// pipe.push(Chunk::new(vec![0; 4096]));
/// output.play();
///
/// output.finish();
/// ```
pub struct Output {
	name: String,
	shared: Arc<Shared>,
	thread: Option<JoinHandle<()>>,
	/// The last command issued asynchronously.
	pending: Option<Completion>,

	/// The operator wants this output enabled.
	enabled: bool,
	always_on: bool,
	reopen_after: Duration,
}

/// Put `command` in the mailbox.
///
/// After termination the command is dropped,
/// which completes it immediately.
fn submit(state: &mut State, command: Command) -> Completion {
	debug_assert!(!state.has_command(), "command {command} issued while another is pending");
	let (pending, completion) = Pending::new(command);
	if !state.terminated {
		state.command = Some(pending);
	}
	completion
}

impl Output {
	//---------------------------------------------------------------------------------------------------- Init
	#[cold]
	#[inline(never)]
	/// Spawn the driver thread for `plugin`.
	///
	/// `filters` are run on every chunk before it is converted to
	/// the device format. `player` is signaled whenever the output
	/// runs out of chunks or a playback loop is interrupted.
	///
	/// If `config.enabled`, the output is enabled before returning.
	///
	/// # Errors
	/// The thread could not be spawned.
	pub fn spawn<P, N>(
		config: OutputConfig,
		plugin: P,
		filters: FilterChain,
		player: N,
	) -> std::io::Result<Self>
	where
		P: OutputPlugin,
		N: PlayerNotify,
	{
		debug2!("Output - spawn(), name: \"{}\", plugin: {}", config.name, P::NAME);

		let mode = config.replay_gain.map_or(ReplayGainMode::Off, |r| r.mode);
		let shared = Arc::new(Shared::new(mode));

		let thread = OutputThread {
			name: config.name.clone(),
			plugin,
			config_format: config.format,
			tags: config.tags,
			pause_poll: config.pause_poll,
			filters: ChunkFilter::new(config.replay_gain.as_ref(), filters),
			player,
			shared: Arc::clone(&shared),
		};
		let handle = thread.spawn(config.realtime)?;

		let mut this = Self {
			name: config.name,
			shared,
			thread: Some(handle),
			pending: None,
			enabled: false,
			always_on: config.always_on,
			reopen_after: config.reopen_after,
		};

		if config.enabled {
			this.enable();
		}

		Ok(this)
	}

	#[must_use]
	/// The name this output was configured with.
	pub fn name(&self) -> &str {
		&self.name
	}

	//---------------------------------------------------------------------------------------------------- Commands
	/// Issue `command` and return without waiting for it.
	///
	/// Waits for the previously issued command first.
	/// [`Command::Close`] on a closed output does nothing.
	pub fn command_async(&mut self, command: Command) {
		self.wait();

		let mut state = self.shared.state.lock();
		if matches!(command, Command::Close { .. }) && !state.open {
			return;
		}

		let completion = submit(&mut state, command);
		drop(state);
		self.shared.wake.notify_one();
		self.pending = Some(completion);
	}

	/// Issue `command` and block until the driver thread finished it.
	pub fn command(&mut self, command: Command) {
		self.command_async(command);
		self.wait();
	}

	/// Block until the last issued command finished.
	pub fn wait(&mut self) {
		if let Some(completion) = self.pending.take() {
			completion.wait();
		}
	}

	/// Submit under an already held lock, then wait.
	fn command_locked(&mut self, mut state: parking_lot::MutexGuard<'_, State>, command: Command) {
		let completion = submit(&mut state, command);
		drop(state);
		self.shared.wake.notify_one();
		completion.wait();
	}

	//---------------------------------------------------------------------------------------------------- Lifecycle
	/// Enable the output and acquire its device.
	pub fn enable(&mut self) {
		self.enabled = true;
		self.command(Command::Enable);
	}

	/// Close the output if open and release its device.
	pub fn disable(&mut self) {
		self.enabled = false;
		self.command(Command::Disable);
	}

	/// Play `format` audio from `pipe`.
	///
	/// An output already open for `format` is kept as is,
	/// a paused one is resumed. Otherwise the output is
	/// opened, or reconfigured if it was open.
	///
	/// Returns whether the output is open afterwards.
	pub fn open(&mut self, format: AudioFormat, pipe: Arc<dyn ChunkQueue>) -> bool {
		self.wait();

		let shared = Arc::clone(&self.shared);
		let mut state = shared.state.lock();

		if state.open && format == state.in_audio_format {
			if state.pause {
				// Cancel leaves the pause loop and
				// discards the device buffer with it.
				state.current_chunk = None;
				state.pipe = Some(pipe);
				self.command_locked(state, Command::Cancel);
			}
			return true;
		}

		state.fail_timer.reset();
		state.in_audio_format = format;
		state.current_chunk = None;
		state.pipe = Some(pipe);

		let command = if state.open { Command::Reopen } else { Command::Open };
		self.command_locked(state, command);

		self.is_open()
	}

	/// Bring the output in line with its enabled flag.
	///
	/// Opens it if enabled and no failure cooldown is active,
	/// closes it if disabled. Returns `true` if it was opened.
	pub fn update(&mut self, format: AudioFormat, pipe: Arc<dyn ChunkQueue>) -> bool {
		self.wait();

		let (really_enabled, open, cooldown) = {
			let state = self.shared.state.lock();
			(state.really_enabled, state.open, !state.fail_timer.check(self.reopen_after))
		};

		if self.enabled && really_enabled {
			if !cooldown {
				return self.open(format, pipe);
			}
		} else if open {
			self.close();
		}

		false
	}

	/// Close the output, discarding buffered audio.
	///
	/// A closed output is left alone, failure cooldown included.
	pub fn close(&mut self) {
		self.wait();

		let shared = Arc::clone(&self.shared);
		let state = shared.state.lock();
		if state.open {
			self.command_locked(state, Command::Close { drain: false });
		}
	}

	/// Playback stopped: pause if `always_on`, close otherwise.
	pub fn release(&mut self) {
		if self.always_on {
			self.pause();
		} else {
			self.close();
		}
	}

	#[cold]
	#[inline(never)]
	/// Close the output and join its driver thread.
	///
	/// This is also done on [`Drop`].
	pub fn finish(mut self) {
		self.shutdown();
	}

	fn shutdown(&mut self) {
		let Some(thread) = self.thread.take() else {
			return;
		};

		self.close();
		self.command(Command::Terminate);

		if thread.join().is_err() {
			error2!("Output - \"{}\" driver thread panicked", self.name);
		}
	}

	//---------------------------------------------------------------------------------------------------- Playback
	/// New chunks are in the queue.
	///
	/// Wakes the driver thread unless it is
	/// already playing or was already woken.
	pub fn play(&self) {
		let mut state = self.shared.state.lock();
		if state.open && !state.in_playback_loop && !state.woken_for_play {
			state.woken_for_play = true;
			self.shared.wake.notify_one();
		}
	}

	/// Pause an open output, without waiting.
	pub fn pause(&mut self) {
		if self.is_open() {
			self.command_async(Command::Pause);
		}
	}

	/// Drain an open output, without waiting.
	pub fn drain_async(&mut self) {
		if self.is_open() {
			self.command_async(Command::Drain);
		}
	}

	/// Stop playing and discard everything buffered, without waiting.
	///
	/// Chunks aren't played again until [`Self::allow_play`].
	pub fn cancel(&mut self) {
		self.wait();

		let mut state = self.shared.state.lock();
		state.allow_play = false;
		if !state.open {
			return;
		}

		let completion = submit(&mut state, Command::Cancel);
		drop(state);
		self.shared.wake.notify_one();
		self.pending = Some(completion);
	}

	/// Allow playing chunks again after [`Self::cancel`].
	pub fn allow_play(&self) {
		let mut state = self.shared.state.lock();
		state.allow_play = true;
		if state.open {
			self.shared.wake.notify_one();
		}
	}

	/// Use `mode` for the next chunk played.
	pub fn set_replay_gain_mode(&self, mode: ReplayGainMode) {
		self.shared.state.lock().replay_gain_mode = mode;
	}

	//---------------------------------------------------------------------------------------------------- Queries
	#[must_use]
	/// Is the device open?
	pub fn is_open(&self) -> bool {
		self.shared.state.lock().open
	}

	#[must_use]
	/// Does the operator want this output enabled?
	pub const fn is_enabled(&self) -> bool {
		self.enabled
	}

	#[must_use]
	/// Did the output fail less than `reopen_after` ago?
	///
	/// While this is `true`, [`Self::update`] won't reopen it.
	pub fn cooldown_active(&self) -> bool {
		!self.shared.state.lock().fail_timer.check(self.reopen_after)
	}

	#[must_use]
	/// The format the device was opened with, `None` if closed.
	pub fn out_audio_format(&self) -> Option<AudioFormat> {
		let state = self.shared.state.lock();
		state.open.then_some(state.out_audio_format)
	}

	#[must_use]
	/// Is this output done with chunk `id`?
	///
	/// A closed output holds on to nothing. Otherwise, chunks before
	/// the current one are done, and the current one is done once it
	/// was fully played and nothing follows it.
	pub fn is_chunk_consumed(&self, id: ChunkId) -> bool {
		let state = self.shared.state.lock();

		if !state.open {
			return true;
		}

		let Some(current) = state.current_chunk else {
			return false;
		};

		match id.cmp(&current) {
			std::cmp::Ordering::Less => true,
			std::cmp::Ordering::Greater => false,
			std::cmp::Ordering::Equal => {
				state.current_chunk_finished
					&& state.pipe.as_ref().map_or(true, |p| p.next(id).is_none())
			},
		}
	}
}

impl Drop for Output {
	fn drop(&mut self) {
		self.shutdown();
	}
}

impl std::fmt::Debug for Output {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Output")
			.field("name", &self.name)
			.field("enabled", &self.enabled)
			.field("always_on", &self.always_on)
			.field("state", &*self.shared.state.lock())
			.finish_non_exhaustive()
	}
}

//---------------------------------------------------------------------------------------------------- TESTS
#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		chunk::{Chunk, MusicPipe, Tag, TagType},
		format::SampleFormat,
		tests::{spawn, spawn_chain, spawn_with, Call, Refuse, S16_MONO, TIMEOUT},
	};
	use pretty_assertions::assert_eq;
	use std::{
		sync::atomic::Ordering,
		time::Instant,
	};

	const STEREO_48K: AudioFormat = AudioFormat::new(48_000, SampleFormat::S16, 2);
	const DSD: AudioFormat = AudioFormat::new(352_800, SampleFormat::Dsd, 2);

	fn config() -> OutputConfig {
		OutputConfig::new("test")
	}

	#[test]
	// A synchronous command leaves the mailbox empty.
	fn command_completes() {
		let (mut output, _mock, _player) = spawn(config());
		for command in [Command::Enable, Command::Disable, Command::Enable] {
			output.command(command);
			assert!(!output.shared.state.lock().has_command());
		}
	}

	#[test]
	fn open_close_order() {
		let (mut output, mut mock, _player) = spawn(config());
		let pipe = Arc::new(MusicPipe::new());

		assert!(output.open(S16_MONO, pipe));
		assert_eq!(output.out_audio_format(), Some(S16_MONO));

		output.close();
		assert!(!output.is_open());
		assert_eq!(output.out_audio_format(), None);
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO), Call::Cancel, Call::Close]);
	}

	#[test]
	fn close_drain() {
		let (mut output, mut mock, _player) = spawn(config());
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));

		output.command(Command::Close { drain: true });
		assert!(!output.is_open());
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO), Call::Drain, Call::Close]);
	}

	#[test]
	// Closing a closed output never reaches the plugin.
	fn close_when_closed() {
		let (mut output, mut mock, _player) = spawn(config());
		output.close();
		output.close();
		assert_eq!(mock.calls(), [Call::Enable]);
	}

	#[test]
	// A close issued directly on a closed output is dropped.
	fn close_command_when_closed() {
		let (mut output, mut mock, _player) = spawn(config());
		output.command(Command::Close { drain: false });
		output.command(Command::Close { drain: true });

		output.enable();
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO)]);
	}

	#[test]
	// A panicking plugin takes the driver thread down,
	// but never the threads issuing commands.
	fn driver_panic_releases_issuer() {
		let (mut output, mut mock, _player) = spawn_with(config(), |s| s.panic_open = true);
		assert!(!output.open(S16_MONO, Arc::new(MusicPipe::new())));
		assert!(output.shared.state.lock().terminated);

		output.command(Command::Enable);
		output.command(Command::Close { drain: false });
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO)]);
		output.finish();
	}

	#[test]
	fn disable_closes() {
		let (mut output, mut mock, _player) = spawn(config());
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));

		output.disable();
		assert!(!output.is_open());
		assert!(!output.is_enabled());
		assert_eq!(
			mock.calls(),
			[Call::Enable, Call::Open(S16_MONO), Call::Cancel, Call::Close, Call::Disable],
		);
	}

	#[test]
	fn not_enabled_on_spawn() {
		let config = OutputConfig { enabled: false, ..config() };
		let (output, mut mock, _player) = spawn(config);
		assert!(!output.is_enabled());
		assert!(mock.calls().is_empty());
	}

	#[test]
	// A device accepting fewer bytes gets the rest on the next write.
	fn partial_writes() {
		let (mut output, mut mock, player) = spawn_with(config(), |s| s.play_cap = Some(100));
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		let id = pipe.push(Chunk::new(vec![0; 350]));
		output.play();
		player.recv_timeout(TIMEOUT).unwrap();

		assert_eq!(mock.plays(), [100, 100, 100, 50]);
		assert!(output.is_chunk_consumed(id));
		assert!(output.is_open());
	}

	#[test]
	fn chunk_consumed() {
		let (mut output, _mock, _player) = spawn(config());
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));
		let first = pipe.push(Chunk::new(vec![0; 8]));
		let second = pipe.push(Chunk::new(vec![0; 4]));

		// Keeps the driver from touching the current chunk.
		output.cancel();
		output.wait();

		// Nothing played yet.
		assert!(!output.is_chunk_consumed(first));

		let set = |id, finished| {
			let mut state = output.shared.state.lock();
			state.current_chunk = Some(id);
			state.current_chunk_finished = finished;
		};

		// Finished, but something follows.
		set(first, true);
		assert!(!output.is_chunk_consumed(first));
		assert!(!output.is_chunk_consumed(second));

		set(second, false);
		assert!(output.is_chunk_consumed(first));
		assert!(!output.is_chunk_consumed(second));

		set(second, true);
		assert!(output.is_chunk_consumed(second));

		// A closed output holds nothing.
		output.close();
		assert!(output.is_chunk_consumed(ChunkId(u64::MAX)));
	}

	#[test]
	// A device that stops accepting data is closed
	// and not reopened until the cooldown ends.
	fn zero_write_closes() {
		let (mut output, mut mock, player) = spawn_with(config(), |s| s.zero_play_at = Some(0));
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		pipe.push(Chunk::new(vec![0; 16]));
		output.play();
		player.recv_timeout(TIMEOUT).unwrap();

		assert!(!output.is_open());
		assert!(output.cooldown_active());
		assert_eq!(
			mock.calls(),
			[Call::Enable, Call::Open(S16_MONO), Call::Play(0), Call::Cancel, Call::Close],
		);

		// Still cooling down.
		assert!(!output.update(S16_MONO, pipe.clone()));
		assert_eq!(mock.calls().len(), 5);

		// Closing what is already closed keeps the cooldown.
		output.close();
		output.release();
		assert!(output.cooldown_active());
		assert_eq!(mock.calls().len(), 5);

		// An explicit open ignores it.
		assert!(output.open(S16_MONO, pipe));
		assert!(!output.cooldown_active());
	}

	#[test]
	fn update_follows_enabled() {
		let (mut output, mut mock, _player) = spawn(config());
		let pipe = Arc::new(MusicPipe::new());

		assert!(output.update(S16_MONO, pipe.clone()));
		assert!(output.is_open());

		output.enabled = false;
		assert!(!output.update(S16_MONO, pipe));
		assert!(!output.is_open());
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO), Call::Cancel, Call::Close]);
	}

	#[test]
	fn open_failure() {
		let (mut output, mut mock, _player) = spawn_with(config(), |s| s.fail_open = true);
		assert!(!output.open(S16_MONO, Arc::new(MusicPipe::new())));
		assert!(!output.is_open());
		assert!(output.cooldown_active());
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO)]);
	}

	#[test]
	// The device isn't touched if the filters can't be opened.
	fn filter_open_failure() {
		let refuse = Refuse::new(None);
		let opened = Arc::clone(&refuse.opened);
		let mut filters = FilterChain::new();
		filters.push(refuse);

		let (mut output, mut mock, _player) = spawn_chain(config(), filters, |_| ());
		assert!(!output.open(S16_MONO, Arc::new(MusicPipe::new())));
		assert!(!output.is_open());
		assert!(output.cooldown_active());
		assert_eq!(mock.calls(), [Call::Enable]);
		assert_eq!(opened.load(Ordering::SeqCst), 0);
	}

	#[test]
	// The device settling on a format the filters
	// can't produce closes it again.
	fn convert_failure() {
		let quad = AudioFormat::new(44_100, SampleFormat::S16, 4);
		let (mut output, mut mock, _player) = spawn_with(config(), |s| s.open_format = Some(quad));

		assert!(!output.open(STEREO_48K, Arc::new(MusicPipe::new())));
		assert!(!output.is_open());
		assert!(output.cooldown_active());
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(STEREO_48K), Call::Close]);
	}

	#[test]
	fn device_format_converted() {
		let (mut output, mut mock, _player) = spawn_with(config(), |s| s.open_format = Some(S16_MONO));
		assert!(output.open(STEREO_48K, Arc::new(MusicPipe::new())));
		assert_eq!(output.out_audio_format(), Some(S16_MONO));
		assert!(!output.cooldown_active());
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(STEREO_48K)]);
	}

	#[test]
	// With a pinned format, an input the filters can't convert
	// closes the device without draining it.
	fn reopen_convert_failure() {
		let config = OutputConfig { format: S16_MONO, ..config() };
		let (mut output, mut mock, _player) = spawn(config);
		let pipe = Arc::new(MusicPipe::new());

		assert!(output.open(S16_MONO, pipe.clone()));
		assert!(!output.open(DSD, pipe.clone()));
		assert!(!output.is_open());
		assert!(output.cooldown_active());
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO), Call::Close]);

		assert!(output.open(S16_MONO, pipe));
		assert!(!output.cooldown_active());
	}

	#[test]
	// Filters that failed to reopen are not closed a second time.
	fn reopen_filter_failure() {
		let refuse = Refuse::new(Some(STEREO_48K));
		let opened = Arc::clone(&refuse.opened);
		let mut filters = FilterChain::new();
		filters.push(refuse);

		let config = OutputConfig { format: S16_MONO, ..config() };
		let (mut output, mut mock, _player) = spawn_chain(config, filters, |_| ());
		let pipe = Arc::new(MusicPipe::new());

		assert!(output.open(S16_MONO, pipe.clone()));
		assert_eq!(opened.load(Ordering::SeqCst), 1);

		assert!(!output.open(STEREO_48K, pipe.clone()));
		assert!(output.cooldown_active());
		assert_eq!(opened.load(Ordering::SeqCst), 0);
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO), Call::Close]);

		assert!(output.open(S16_MONO, pipe));
		assert_eq!(opened.load(Ordering::SeqCst), 1);
	}

	#[test]
	// Enabling is retried by the next open.
	fn enable_failure() {
		let (mut output, mut mock, _player) = spawn_with(config(), |s| s.fail_enable = true);
		assert!(!output.open(S16_MONO, Arc::new(MusicPipe::new())));
		assert!(output.cooldown_active());
		assert_eq!(mock.calls(), [Call::Enable, Call::Enable]);

		mock.script.lock().fail_enable = false;
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));
		assert_eq!(mock.calls(), [Call::Enable, Call::Enable, Call::Enable, Call::Open(S16_MONO)]);
	}

	#[test]
	// Opening again with the same format is a no-op.
	fn open_reuse() {
		let (mut output, mut mock, _player) = spawn(config());
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));
		assert!(output.open(S16_MONO, pipe));
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO)]);
	}

	#[test]
	// A pinned device format keeps the device open,
	// only the filters follow the new input.
	fn reopen_pinned() {
		let config = OutputConfig { format: S16_MONO, ..config() };
		let (mut output, mut mock, _player) = spawn(config);
		let pipe = Arc::new(MusicPipe::new());

		assert!(output.open(S16_MONO, pipe.clone()));
		assert!(output.open(STEREO_48K, pipe));
		assert_eq!(output.out_audio_format(), Some(S16_MONO));
		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO)]);
	}

	#[test]
	// Otherwise the device is drained and opened again.
	fn reopen_unpinned() {
		let (mut output, mut mock, _player) = spawn(config());
		let pipe = Arc::new(MusicPipe::new());

		assert!(output.open(S16_MONO, pipe.clone()));
		assert!(output.open(STEREO_48K, pipe));
		assert_eq!(output.out_audio_format(), Some(STEREO_48K));
		assert_eq!(
			mock.calls(),
			[Call::Enable, Call::Open(S16_MONO), Call::Drain, Call::Close, Call::Open(STEREO_48K)],
		);
	}

	#[test]
	fn pause_then_finish() {
		let (mut output, mut mock, _player) = spawn(config());
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));

		output.pause();
		mock.wait_for(&Call::Pause);
		output.finish();

		let calls = mock.calls();
		assert_eq!(&calls[..4], [Call::Enable, Call::Open(S16_MONO), Call::Cancel, Call::Pause]);
		assert_eq!(&calls[calls.len() - 2..], [Call::Cancel, Call::Close]);
	}

	#[test]
	// Terminate ends the pause and the thread, the device is left as is.
	fn terminate_while_paused() {
		let (mut output, mut mock, _player) = spawn(config());
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));

		output.pause();
		mock.wait_for(&Call::Pause);
		output.command(Command::Terminate);
		assert!(output.shared.state.lock().terminated);

		let calls = mock.calls();
		assert_eq!(&calls[..4], [Call::Enable, Call::Open(S16_MONO), Call::Cancel, Call::Pause]);
		assert!(calls[4..].iter().all(|c| *c == Call::Pause));
	}

	#[test]
	// Opening a paused output with the same format resumes it.
	fn open_resumes_pause() {
		let (mut output, mut mock, _player) = spawn(config());
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		output.pause();
		mock.wait_for(&Call::Pause);

		assert!(output.open(S16_MONO, pipe));
		assert!(output.is_open());
		assert_eq!(mock.calls().last(), Some(&Call::Cancel));
		assert!(!output.shared.state.lock().pause);
	}

	#[test]
	fn pause_failure() {
		let (mut output, mut mock, _player) = spawn_with(config(), |s| s.fail_pause = true);
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));

		output.pause();
		mock.wait_for(&Call::Close);
		// Already enabled, so this only waits for the driver to go idle.
		output.command(Command::Enable);

		assert!(!output.is_open());
		assert!(output.cooldown_active());
		assert_eq!(
			mock.calls(),
			[Call::Enable, Call::Open(S16_MONO), Call::Cancel, Call::Pause, Call::Cancel, Call::Close],
		);
	}

	#[test]
	fn release() {
		let (mut output, mut mock, _player) = spawn(config());
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));
		output.release();
		assert!(!output.is_open());
		assert_eq!(mock.calls().last(), Some(&Call::Close));

		let config = OutputConfig { always_on: true, ..config() };
		let (mut output, mut mock, _player) = spawn(config);
		assert!(output.open(S16_MONO, Arc::new(MusicPipe::new())));
		output.release();
		mock.wait_for(&Call::Pause);
		assert!(output.is_open());
	}

	#[test]
	// Nothing is played between `cancel()` and `allow_play()`.
	fn cancel_then_allow_play() {
		let (mut output, mut mock, player) = spawn(config());
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		output.cancel();
		pipe.push(Chunk::new(vec![0; 6]));
		output.play();
		output.wait();
		assert!(player.recv_timeout(Duration::from_millis(100)).is_err());
		assert!(mock.plays().is_empty());

		output.allow_play();
		player.recv_timeout(TIMEOUT).unwrap();
		assert_eq!(mock.plays(), [6]);
	}

	#[test]
	// Nothing is written until the device reports no delay.
	fn paced_by_delay() {
		let delay = Duration::from_millis(20);
		let (mut output, mut mock, player) = spawn_with(config(), |s| s.delays = [delay; 3].into());
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		let start = Instant::now();
		pipe.push(Chunk::new(vec![0; 4]));
		output.play();
		player.recv_timeout(TIMEOUT).unwrap();

		assert!(start.elapsed() >= delay * 3);
		assert!(mock.script.lock().delays.is_empty());
		assert_eq!(mock.plays(), [4]);
	}

	#[test]
	// A command doesn't wait for a long device delay.
	fn command_interrupts_delay() {
		let (mut output, mut mock, player) =
			spawn_with(config(), |s| s.delays = [Duration::from_secs(3600)].into());
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		pipe.push(Chunk::new(vec![0; 4]));
		output.play();

		// The delay is asked under the lock, so once it is
		// taken the driver thread is waiting on it.
		let start = Instant::now();
		while !mock.script.lock().delays.is_empty() {
			assert!(start.elapsed() < TIMEOUT);
			std::thread::sleep(Duration::from_millis(1));
		}

		output.cancel();
		output.wait();
		player.recv_timeout(TIMEOUT).unwrap();

		assert!(start.elapsed() < TIMEOUT);
		assert!(mock.plays().is_empty());
		assert_eq!(mock.calls().last(), Some(&Call::Cancel));
	}

	#[test]
	fn tags_before_play() {
		let (mut output, mut mock, player) = spawn_with(config(), |s| s.supports_tags = true);
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		pipe.push(Chunk::new(vec![0; 4]).with_tag(Tag::new().with(TagType::Title, "a")));
		output.play();
		player.recv_timeout(TIMEOUT).unwrap();

		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO), Call::Tag, Call::Play(4)]);
	}

	#[test]
	fn tags_disabled() {
		let config = OutputConfig { tags: false, ..config() };
		let (mut output, mut mock, player) = spawn_with(config, |s| s.supports_tags = true);
		let pipe = Arc::new(MusicPipe::new());
		assert!(output.open(S16_MONO, pipe.clone()));

		pipe.push(Chunk::new(vec![0; 4]).with_tag(Tag::new().with(TagType::Title, "a")));
		output.play();
		player.recv_timeout(TIMEOUT).unwrap();

		assert_eq!(mock.calls(), [Call::Enable, Call::Open(S16_MONO), Call::Play(4)]);
	}

	#[test]
	// Commands after termination return instead of hanging.
	fn command_after_terminate() {
		let (mut output, _mock, _player) = spawn(config());
		output.command(Command::Terminate);
		output.command(Command::Enable);
		output.command(Command::Disable);
		output.finish();
	}
}
