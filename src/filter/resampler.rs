//! Sample rate conversion backed by `rubato`.

//---------------------------------------------------------------------------------------------------- use
use crate::error::FilterError;
use rubato::{FftFixedIn, Resampler as _};

//---------------------------------------------------------------------------------------------------- Constants
/// Input frames per resampling block.
const CHUNK_FRAMES: usize = 1024;

/// Sub-chunks `rubato` splits each block into.
const SUB_CHUNKS: usize = 2;

//---------------------------------------------------------------------------------------------------- Resampler
/// Converts interleaved `f32` audio between two sample rates.
///
/// `rubato` works on fixed-size blocks, so input is collected
/// per channel until a full block is available. Output for a
/// given input may therefore be empty.
pub(crate) struct Resampler {
	inner: FftFixedIn<f32>,
	channels: usize,
	/// De-interleaved input not yet resampled.
	pending: Vec<Vec<f32>>,
}

impl Resampler {
	/// # Errors
	/// `rubato` refused the rates or channel count.
	pub(crate) fn new(from: u32, to: u32, channels: u8) -> Result<Self, FilterError> {
		let channels = usize::from(channels);
		let inner = FftFixedIn::<f32>::new(
			from as usize,
			to as usize,
			CHUNK_FRAMES,
			SUB_CHUNKS,
			channels,
		)?;

		Ok(Self {
			inner,
			channels,
			pending: vec![Vec::with_capacity(CHUNK_FRAMES * 2); channels],
		})
	}

	/// Resample interleaved `input`, appending interleaved output to `out`.
	///
	/// # Errors
	/// `rubato` failed to process a block.
	pub(crate) fn process(&mut self, input: &[f32], out: &mut Vec<f32>) -> Result<(), FilterError> {
		for frame in input.chunks_exact(self.channels) {
			for (channel, sample) in self.pending.iter_mut().zip(frame) {
				channel.push(*sample);
			}
		}

		loop {
			let needed = self.inner.input_frames_next();
			if self.pending.first().map_or(0, Vec::len) < needed {
				return Ok(());
			}

			let block: Vec<&[f32]> = self.pending.iter().map(|c| &c[..needed]).collect();
			let resampled = self.inner.process(block.as_slice(), None)?;

			let frames = resampled.first().map_or(0, Vec::len);
			out.reserve(frames * self.channels);
			for i in 0..frames {
				out.extend(resampled.iter().map(|c| c[i]));
			}

			for channel in &mut self.pending {
				channel.drain(..needed);
			}
		}
	}
}

impl Resampler {
	/// Drop buffered input and the filter's history.
	pub(crate) fn reset(&mut self) {
		self.inner.reset();
		self.pending.iter_mut().for_each(Vec::clear);
	}
}

impl std::fmt::Debug for Resampler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Resampler")
			.field("channels", &self.channels)
			.field("pending", &self.pending.first().map_or(0, Vec::len))
			.finish_non_exhaustive()
	}
}
