//---------------------------------------------------------------------------------------------------- use
#[allow(unused_imports)] // docs
use crate::format::AudioFormat;

//---------------------------------------------------------------------------------------------------- ParseFormatError
/// Error when parsing the `rate:format:channels` text form of an [`AudioFormat`].
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseFormatError {
	#[error("audio format must have the form `rate:format:channels`: {0}")]
	/// Not exactly 3 `:` separated fields
	Syntax(String),

	#[error("invalid sample rate: {0}")]
	/// The sample rate was not a number or out of range
	SampleRate(String),

	#[error("invalid sample format: {0}")]
	/// Unknown sample format
	SampleFormat(String),

	#[error("invalid channel count: {0}")]
	/// The channel count was not a number or out of range
	Channels(String),
}
