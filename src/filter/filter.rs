//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::FilterError,
	format::AudioFormat,
};

//---------------------------------------------------------------------------------------------------- Filter
/// A PCM transformer with an open/process/close lifecycle.
///
/// Filters run on the driver thread, but the driver
/// never holds its lock while calling into them.
pub trait Filter: Send {
	/// Prepare for audio in `format`.
	///
	/// Returns the format [`Filter::filter`] will produce.
	///
	/// # Errors
	/// The filter can't handle `format`.
	fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, FilterError>;

	/// Release whatever [`Filter::open`] set up.
	///
	/// Calling this on a closed filter is a no-op.
	fn close(&mut self);

	/// Process `src`.
	///
	/// The output may be `src` itself or a buffer owned by the filter,
	/// and may be empty (e.g. a resampler still collecting input).
	///
	/// # Errors
	/// The data could not be processed, or the filter isn't open.
	fn filter<'a>(&'a mut self, src: &'a [u8]) -> Result<&'a [u8], FilterError>;

	/// Forget any audio buffered inside the filter.
	///
	/// Called when playback is cancelled, the filter stays open.
	fn reset(&mut self) {}
}

impl<F: Filter + ?Sized> Filter for Box<F> {
	fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, FilterError> {
		(**self).open(format)
	}

	fn close(&mut self) {
		(**self).close();
	}

	fn filter<'a>(&'a mut self, src: &'a [u8]) -> Result<&'a [u8], FilterError> {
		(**self).filter(src)
	}

	fn reset(&mut self) {
		(**self).reset();
	}
}
