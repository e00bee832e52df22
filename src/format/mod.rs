//! Audio format descriptors.
//!
//! Every byte buffer that flows through an output is described by
//! an [`AudioFormat`]: the sample rate, the [`SampleFormat`] of each
//! sample and the amount of interleaved channels.

mod sample_format;
pub use sample_format::SampleFormat;

mod audio_format;
pub use audio_format::{AudioFormat, MAX_CHANNELS, MAX_SAMPLE_RATE};
