//---------------------------------------------------------------------------------------------------- use
use crate::format::SampleFormat;

//---------------------------------------------------------------------------------------------------- PcmError
/// Error from a sample-level PCM operation (mixing, volume, conversion).
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PcmError {
	#[error("cannot process sample format {0}")]
	/// The operation is not defined for this sample format, e.g. DSD
	UnsupportedFormat(SampleFormat),

	#[error("buffer length {len} is not a multiple of the sample size {sample_size}")]
	/// The byte buffer does not contain whole samples
	Misaligned {
		/// Length of the offending buffer
		len: usize,
		/// Sample size of the format
		sample_size: usize,
	},
}
