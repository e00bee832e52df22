//---------------------------------------------------------------------------------------------------- use
use crate::format::AudioFormat;
use std::borrow::Cow;

//----------------------------------------------------------------------------------------------- OutputError
/// Error that occurs when talking to the audio hardware/server.
///
/// This can be due to many reasons, e.g:
/// - Audio device was unplugged
/// - Audio server disconnected/killed
/// - Audio format is not supported by the hardware/server
///
/// Output plugins will generally have the same
/// errors, so instead of being generic per backend,
/// each one will just conform to this enum.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
	#[error("audio stream was closed")]
	/// The audio stream was closed.
	StreamClosed,

	#[error("audio hardware/server is unavailable")]
	/// The audio hardware/server is unavailable.
	DeviceUnavailable,

	#[error("audio format {0} is invalid or unsupported")]
	/// The audio format is invalid or unsupported.
	InvalidFormat(AudioFormat),

	#[error("failed to write bytes to the audio stream")]
	/// Failed to write bytes to the audio stream.
	///
	/// A plugin that reports `0` bytes written is also turned into this.
	Write,

	#[error("audio output does not support pausing")]
	/// The plugin can't pause; the driver closes it instead.
	PauseUnsupported,

	#[error("i/o error: {0}")]
	/// The plugin's underlying file/socket/device failed.
	Io(#[from] std::io::Error),

	#[error("unknown error: {0}")]
	/// An unknown or very specific error occurred.
	///
	/// The `str` will contain more information.
	Unknown(Cow<'static, str>),
}
