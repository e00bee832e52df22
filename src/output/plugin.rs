//! The device plugin contract.

//----------------------------------------------------------------------------------------------- use
use crate::{
	chunk::Tag,
	error::OutputError,
	format::AudioFormat,
};
use std::time::Duration;

//----------------------------------------------------------------------------------------------- OutputPlugin Trait
/// A sink that PCM audio is written to.
///
/// All methods are called from the output's own driver thread and
/// never concurrently. Except for `delay()`, none are called while
/// the driver holds its lock, so they are free to block. `delay()`
/// is asked with the lock held and must return right away.
///
/// The driver upholds the following, so implementors don't have to check:
/// 1. `open()` is only called while enabled and closed
/// 2. `close()`, `play()`, `drain()`, `cancel()`, `pause()` and `delay()` are only called while open
/// 3. `send_tag()` is only called if `supports_tags()` returns `true`
pub trait OutputPlugin: Send + 'static {
	/// Name of this plugin, used in log messages.
	const NAME: &'static str;

	/// Acquire the device without opening it yet.
	///
	/// Called once before the first `open()`,
	/// and again after each `disable()`.
	///
	/// By default, this does nothing.
	///
	/// # Errors
	/// The device can't be used right now.
	fn enable(&mut self) -> Result<(), OutputError> {
		Ok(())
	}

	/// Release what `enable()` acquired.
	///
	/// By default, this does nothing.
	fn disable(&mut self) {}

	/// Open the device for audio in `format`.
	///
	/// `format` is fully defined. The device may pick something
	/// close to it instead; the returned format is what will be
	/// written to it.
	///
	/// # Errors
	/// The device could not be opened.
	fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, OutputError>;

	/// Close the device.
	///
	/// Buffered audio was already drained or cancelled.
	fn close(&mut self);

	/// How long to wait before `play()` can accept more data.
	///
	/// [`Duration::ZERO`] means "ready now", which is the default.
	fn delay(&self) -> Duration {
		Duration::ZERO
	}

	/// Can this plugin display tags?
	fn supports_tags(&self) -> bool {
		false
	}

	/// A new tag became current.
	///
	/// By default, this does nothing.
	fn send_tag(&mut self, _tag: &Tag) {}

	/// Write PCM data, returning how many bytes were consumed.
	///
	/// Writing less than `data.len()` is fine, the
	/// rest will be offered again. Returning `0` is
	/// treated as a failure and closes the device.
	///
	/// # Errors
	/// The device failed.
	fn play(&mut self, data: &[u8]) -> Result<usize, OutputError>;

	/// Block until all buffered audio was played.
	///
	/// By default, this does nothing.
	fn drain(&mut self) {}

	/// Discard buffered audio as fast as possible.
	///
	/// By default, this does nothing.
	fn cancel(&mut self) {}

	/// Stay paused, keeping the device open.
	///
	/// While paused this is called repeatedly,
	/// whenever `delay()` reaches zero.
	///
	/// # Errors
	/// The plugin can't pause (the default), the
	/// driver closes the device in that case.
	fn pause(&mut self) -> Result<(), OutputError> {
		Err(OutputError::PauseUnsupported)
	}
}
