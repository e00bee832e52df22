//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::PcmError,
	format::AudioFormat,
};
use std::borrow::Cow;

//---------------------------------------------------------------------------------------------------- FilterError
/// Error that occurs when opening a filter or
/// when running PCM data through it.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
	#[error("filter does not accept the audio format {0}")]
	/// `open()` was handed a format this filter can't handle
	UnsupportedFormat(AudioFormat),

	#[error("cannot convert from {from} to {to}")]
	/// The convert filter can't bridge these two formats
	UnsupportedConversion {
		/// Format the filter chain produces
		from: AudioFormat,
		/// Format the device wants
		to: AudioFormat,
	},

	#[error("filter is not open")]
	/// `filter()` was called before `open()`
	NotOpen,

	#[error("cross-fade failed: {0}")]
	/// Mixing the two chunks of a cross-fade failed
	CrossFade(PcmError),

	#[error("pcm error: {0}")]
	/// A sample-level operation failed
	Pcm(#[from] PcmError),

	#[error("resampler error: {0}")]
	/// The resampler could not be created or failed to process
	Resample(Cow<'static, str>),

	#[error("unknown error: {0}")]
	/// An unknown or very specific error occurred.
	///
	/// The `str` will contain more information.
	Unknown(Cow<'static, str>),
}

//---------------------------------------------------------------------------------------------------- Error re-map
impl From<rubato::ResamplerConstructionError> for FilterError {
	fn from(error: rubato::ResamplerConstructionError) -> Self {
		Self::Resample(Cow::Owned(error.to_string()))
	}
}

impl From<rubato::ResampleError> for FilterError {
	fn from(error: rubato::ResampleError) -> Self {
		Self::Resample(Cow::Owned(error.to_string()))
	}
}
