//---------------------------------------------------------------------------------------------------- use
use crate::error::{FilterError,OutputError,PcmError};

//---------------------------------------------------------------------------------------------------- DriverError
#[derive(thiserror::Error, Debug)]
/// Any failure the driver thread can hit while playing a chunk.
pub enum DriverError {
	#[error("audio output error: {0}")]
	/// The output plugin failed
	Output(#[from] OutputError),

	#[error("filter error: {0}")]
	/// The filter chain failed
	Filter(#[from] FilterError),

	#[error("pcm error: {0}")]
	/// A sample-level operation failed
	Pcm(#[from] PcmError),
}
