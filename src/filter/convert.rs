//! The terminal filter stage.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::FilterError,
	filter::{resampler::Resampler, Filter},
	format::AudioFormat,
	pcm,
};

//---------------------------------------------------------------------------------------------------- ConvertFilter
/// Reconciles the filter chain's format with the device's.
///
/// Conversion goes through `f32`:
/// 1. decode the input sample format
/// 2. remix channels (only to or from mono)
/// 3. resample
/// 4. encode the output sample format
///
/// DSD can't be decoded, so it only passes through unconverted.
#[derive(Debug, Default)]
pub struct ConvertFilter {
	/// Set by [`Filter::open`].
	in_format: Option<AudioFormat>,
	/// Set by [`ConvertFilter::set`], defaults to `in_format`.
	out_format: Option<AudioFormat>,
	resampler: Option<Resampler>,

	samples: Vec<f32>,
	remixed: Vec<f32>,
	resampled: Vec<f32>,
	buffer: Vec<u8>,
}

impl ConvertFilter {
	#[must_use]
	/// A closed convert filter.
	pub fn new() -> Self {
		Self::default()
	}

	/// Produce `out` from now on.
	///
	/// # Errors
	/// The filter is closed, or the formats can't be bridged.
	/// The previous output format is kept on error.
	pub fn set(&mut self, out: AudioFormat) -> Result<(), FilterError> {
		let Some(from) = self.in_format else {
			return Err(FilterError::NotOpen);
		};

		if from == out {
			self.out_format = Some(out);
			self.resampler = None;
			return Ok(());
		}

		let unsupported = || FilterError::UnsupportedConversion { from, to: out };

		if !out.is_valid() || !from.format.is_pcm() || !out.format.is_pcm() {
			return Err(unsupported());
		}

		if from.channels != out.channels && from.channels != 1 && out.channels != 1 {
			return Err(unsupported());
		}

		let resampler = if from.sample_rate == out.sample_rate {
			None
		} else {
			Some(Resampler::new(from.sample_rate, out.sample_rate, out.channels)?)
		};

		self.out_format = Some(out);
		self.resampler = resampler;
		Ok(())
	}

	#[must_use]
	/// The format [`Filter::filter`] currently produces.
	pub const fn out_format(&self) -> Option<AudioFormat> {
		self.out_format
	}
}

impl Filter for ConvertFilter {
	fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, FilterError> {
		if !format.is_valid() {
			return Err(FilterError::UnsupportedFormat(format));
		}

		self.in_format = Some(format);
		self.out_format = Some(format);
		self.resampler = None;
		Ok(format)
	}

	fn close(&mut self) {
		self.in_format = None;
		self.out_format = None;
		self.resampler = None;
	}

	fn reset(&mut self) {
		if let Some(resampler) = self.resampler.as_mut() {
			resampler.reset();
		}
	}

	fn filter<'a>(&'a mut self, src: &'a [u8]) -> Result<&'a [u8], FilterError> {
		let Self {
			in_format,
			out_format,
			resampler,
			samples,
			remixed,
			resampled,
			buffer,
		} = self;

		let (Some(from), Some(to)) = (*in_format, *out_format) else {
			return Err(FilterError::NotOpen);
		};

		if from == to {
			return Ok(src);
		}

		samples.clear();
		pcm::to_f32(from.format, src, samples)?;
		let mut current: &[f32] = samples.as_slice();

		if from.channels != to.channels {
			remixed.clear();
			remix(current, usize::from(from.channels), usize::from(to.channels), remixed);
			current = remixed.as_slice();
		}

		if let Some(resampler) = resampler {
			resampled.clear();
			resampler.process(current, resampled)?;
			current = resampled.as_slice();
		}

		buffer.clear();
		pcm::from_f32(to.format, current, buffer)?;
		Ok(buffer.as_slice())
	}
}

//---------------------------------------------------------------------------------------------------- Channels
/// Interleaved `from` channel audio into `to` channels.
///
/// One of the two must be mono: mono is duplicated,
/// everything else is averaged down.
fn remix(src: &[f32], from: usize, to: usize, out: &mut Vec<f32>) {
	if from == 1 {
		for sample in src {
			out.extend(std::iter::repeat(*sample).take(to));
		}
	} else {
		#[allow(clippy::cast_precision_loss)]
		let divisor = from as f32;
		out.extend(src.chunks_exact(from).map(|f| f.iter().sum::<f32>() / divisor));
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::format::SampleFormat;
	use pretty_assertions::assert_eq;

	const fn fmt(format: SampleFormat, channels: u8) -> AudioFormat {
		AudioFormat::new(48000, format, channels)
	}

	#[test]
	fn not_open() {
		let mut c = ConvertFilter::new();
		assert!(matches!(c.set(fmt(SampleFormat::S16, 2)), Err(FilterError::NotOpen)));
		assert!(matches!(c.filter(&[]), Err(FilterError::NotOpen)));
	}

	#[test]
	fn s16_to_float() {
		let mut c = ConvertFilter::new();
		c.open(fmt(SampleFormat::S16, 1)).unwrap();
		c.set(fmt(SampleFormat::Float, 1)).unwrap();

		let src: Vec<u8> = [16_384_i16, -32_768].iter().flat_map(|s| s.to_ne_bytes()).collect();
		let out: Vec<f32> = c
			.filter(&src)
			.unwrap()
			.chunks_exact(4)
			.map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
			.collect();
		assert_eq!(out, [0.5, -1.0]);
	}

	#[test]
	fn stereo_to_mono() {
		let mut c = ConvertFilter::new();
		c.open(fmt(SampleFormat::S16, 2)).unwrap();
		c.set(fmt(SampleFormat::S16, 1)).unwrap();

		let src: Vec<u8> = [100_i16, 300].iter().flat_map(|s| s.to_ne_bytes()).collect();
		assert_eq!(c.filter(&src).unwrap(), 200_i16.to_ne_bytes());
	}

	#[test]
	fn rejected() {
		let mut c = ConvertFilter::new();
		c.open(fmt(SampleFormat::S16, 2)).unwrap();

		// Neither side is mono.
		assert!(c.set(fmt(SampleFormat::S16, 6)).is_err());
		// DSD can't be produced.
		assert!(c.set(fmt(SampleFormat::Dsd, 2)).is_err());
		// The previous output format survives.
		assert_eq!(c.out_format(), Some(fmt(SampleFormat::S16, 2)));
	}

	#[test]
	// Input held back for an incomplete resampler block is dropped.
	fn reset_forgets_buffered() {
		let mut c = ConvertFilter::new();
		c.open(fmt(SampleFormat::S16, 1)).unwrap();
		c.set(AudioFormat::new(44100, SampleFormat::S16, 1)).unwrap();

		assert!(c.filter(&vec![0; 1000 * 2]).unwrap().is_empty());
		c.reset();
		assert!(c.filter(&vec![0; 100 * 2]).unwrap().is_empty());

		// Without a reset, the two would have filled a block.
		assert!(!c.filter(&vec![0; 1000 * 2]).unwrap().is_empty());
	}

	#[test]
	fn dsd_passthrough() {
		let dsd = fmt(SampleFormat::Dsd, 2);
		let mut c = ConvertFilter::new();
		c.open(dsd).unwrap();
		c.set(dsd).unwrap();
		assert_eq!(c.filter(&[1, 2, 3, 4]).unwrap(), [1, 2, 3, 4]);
	}
}
