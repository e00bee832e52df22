//! An output that plays nothing.
//!
//! Everything written is discarded. With `sync`, it
//! accepts audio only as fast as a real device would
//! play it, which makes it useful for benchmarking
//! decoders and for testing the driver itself.

//----------------------------------------------------------------------------------------------- use
use crate::{
	error::OutputError,
	format::AudioFormat,
	macros::{debug2,trace2},
	output::OutputPlugin,
};
use std::time::{Duration, Instant};

//----------------------------------------------------------------------------------------------- Timer
/// Tracks how far ahead of the wall clock the written audio is.
#[derive(Debug)]
struct Timer {
	bytes_per_second: u64,
	/// `None` until the first write.
	start: Option<Instant>,
	/// Playback time of everything written since `start`.
	written: Duration,
}

impl Timer {
	fn new(format: AudioFormat) -> Self {
		Self {
			bytes_per_second: format.bytes_per_second() as u64,
			start: None,
			written: Duration::ZERO,
		}
	}

	fn add(&mut self, bytes: usize) {
		if self.start.is_none() {
			self.start = Some(Instant::now());
		}

		if self.bytes_per_second != 0 {
			let nanos = bytes as u128 * 1_000_000_000 / u128::from(self.bytes_per_second);
			self.written += Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX));
		}
	}

	fn reset(&mut self) {
		self.start = None;
		self.written = Duration::ZERO;
	}

	fn delay(&self) -> Duration {
		self.start.map_or(Duration::ZERO, |start| {
			self.written.saturating_sub(start.elapsed())
		})
	}
}

//----------------------------------------------------------------------------------------------- NullOutput
/// A device that discards all audio.
#[derive(Debug, Default)]
pub struct NullOutput {
	sync: bool,
	timer: Option<Timer>,
}

impl NullOutput {
	#[must_use]
	/// A null output, paced like real hardware if `sync`.
	pub const fn new(sync: bool) -> Self {
		Self { sync, timer: None }
	}

	#[must_use]
	/// Is this output open?
	pub const fn is_open(&self) -> bool {
		self.timer.is_some()
	}
}

//----------------------------------------------------------------------------------------------- `OutputPlugin` Impl
impl OutputPlugin for NullOutput {
	const NAME: &'static str = "null";

	fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, OutputError> {
		debug2!("NullOutput - open(), format: {format}, sync: {}", self.sync);

		if !format.is_valid() {
			return Err(OutputError::InvalidFormat(format));
		}

		self.timer = Some(Timer::new(format));
		Ok(format)
	}

	fn close(&mut self) {
		debug2!("NullOutput - close()");
		self.timer = None;
	}

	fn delay(&self) -> Duration {
		match (&self.timer, self.sync) {
			(Some(timer), true) => timer.delay(),
			_ => Duration::ZERO,
		}
	}

	fn play(&mut self, data: &[u8]) -> Result<usize, OutputError> {
		trace2!("NullOutput - play(), {} bytes", data.len());

		let Some(timer) = self.timer.as_mut() else {
			return Err(OutputError::StreamClosed);
		};

		if self.sync {
			timer.add(data.len());
		}

		Ok(data.len())
	}

	fn cancel(&mut self) {
		if let Some(timer) = self.timer.as_mut() {
			timer.reset();
		}
	}

	fn pause(&mut self) -> Result<(), OutputError> {
		if let Some(timer) = self.timer.as_mut() {
			timer.reset();
		}
		Ok(())
	}
}
