//---------------------------------------------------------------------------------------------------- use
use crate::{
	format::SampleFormat,
	error::ParseFormatError,
};
use std::{fmt, str::FromStr};

//---------------------------------------------------------------------------------------------------- Constants
/// The highest channel count an output accepts.
pub const MAX_CHANNELS: u8 = 8;

/// Sample rates at or above this are rejected as nonsense.
pub const MAX_SAMPLE_RATE: u32 = 1 << 30;

//---------------------------------------------------------------------------------------------------- AudioFormat
/// Sample rate, sample format and channel count of a PCM stream.
///
/// A field set to `0` / [`SampleFormat::Undefined`] is "undefined".
/// An `AudioFormat` with undefined fields is a _mask_: applied onto
/// another format with [`AudioFormat::apply_mask`], only the defined
/// fields override.
///
/// The textual form is `rate:format:channels`, with `*` for undefined:
/// ```rust
/// # use outpipe::format::*;
/// let format: AudioFormat = "44100:16:2".parse().unwrap();
/// assert_eq!(format.frame_size(), 4);
///
/// let mask: AudioFormat = "48000:*:*".parse().unwrap();
/// assert_eq!(format.with_mask(mask).to_string(), "48000:16:2");
/// ```
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct AudioFormat {
	/// Frames per second, `0` if undefined
	pub sample_rate: u32,
	/// Encoding of each sample
	pub format: SampleFormat,
	/// Interleaved channels per frame, `0` if undefined
	pub channels: u8,
}

impl AudioFormat {
	/// Every field undefined.
	pub const UNDEFINED: Self = Self {
		sample_rate: 0,
		format:      SampleFormat::Undefined,
		channels:    0,
	};

	#[inline]
	#[must_use]
	/// Create a new [`AudioFormat`].
	pub const fn new(sample_rate: u32, format: SampleFormat, channels: u8) -> Self {
		Self { sample_rate, format, channels }
	}

	#[inline]
	#[must_use]
	/// Has this format been set at all?
	///
	/// Only the sample rate is checked.
	pub const fn is_defined(&self) -> bool {
		self.sample_rate != 0
	}

	#[inline]
	#[must_use]
	/// Are all 3 fields defined?
	pub const fn is_fully_defined(&self) -> bool {
		self.sample_rate != 0 && self.format.is_defined() && self.channels != 0
	}

	#[inline]
	#[must_use]
	/// Is at least one field undefined?
	pub const fn is_mask(&self) -> bool {
		!self.is_fully_defined()
	}

	#[must_use]
	/// Is this a format an output can actually be opened with?
	pub const fn is_valid(&self) -> bool {
		self.sample_rate > 0
			&& self.sample_rate < MAX_SAMPLE_RATE
			&& self.format.is_defined()
			&& self.channels >= 1
			&& self.channels <= MAX_CHANNELS
	}

	/// Override the fields of `self` that are defined in `mask`.
	pub fn apply_mask(&mut self, mask: Self) {
		if mask.sample_rate != 0 {
			self.sample_rate = mask.sample_rate;
		}
		if mask.format.is_defined() {
			self.format = mask.format;
		}
		if mask.channels != 0 {
			self.channels = mask.channels;
		}
	}

	#[inline]
	#[must_use]
	/// Copying version of [`Self::apply_mask`].
	pub fn with_mask(mut self, mask: Self) -> Self {
		self.apply_mask(mask);
		self
	}

	#[inline]
	#[must_use]
	/// Bytes per sample.
	pub const fn sample_size(&self) -> usize {
		self.format.sample_size()
	}

	#[inline]
	#[must_use]
	/// Bytes per frame (one sample for every channel).
	pub const fn frame_size(&self) -> usize {
		self.format.sample_size() * self.channels as usize
	}

	#[inline]
	#[must_use]
	/// Bytes consumed by one second of audio in this format.
	pub const fn bytes_per_second(&self) -> usize {
		self.frame_size() * self.sample_rate as usize
	}
}

//---------------------------------------------------------------------------------------------------- Text form
impl fmt::Display for AudioFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.sample_rate == 0 {
			f.write_str("*")?;
		} else {
			write!(f, "{}", self.sample_rate)?;
		}

		write!(f, ":{}:", self.format)?;

		if self.channels == 0 {
			f.write_str("*")
		} else {
			write!(f, "{}", self.channels)
		}
	}
}

impl FromStr for AudioFormat {
	type Err = ParseFormatError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut fields = s.trim().split(':');

		let (Some(rate), Some(format), Some(channels), None) =
			(fields.next(), fields.next(), fields.next(), fields.next())
		else {
			return Err(ParseFormatError::Syntax(s.into()));
		};

		let sample_rate = if rate == "*" {
			0
		} else {
			match rate.parse::<u32>() {
				Ok(r) if r > 0 && r < MAX_SAMPLE_RATE => r,
				_ => return Err(ParseFormatError::SampleRate(rate.into())),
			}
		};

		let Ok(format) = format.parse::<SampleFormat>() else {
			return Err(ParseFormatError::SampleFormat(format.into()));
		};

		let channels = if channels == "*" {
			0
		} else {
			match channels.parse::<u8>() {
				Ok(c) if (1..=MAX_CHANNELS).contains(&c) => c,
				_ => return Err(ParseFormatError::Channels(channels.into())),
			}
		};

		Ok(Self { sample_rate, format, channels })
	}
}

impl TryFrom<String> for AudioFormat {
	type Error = ParseFormatError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<AudioFormat> for String {
	fn from(format: AudioFormat) -> Self {
		format.to_string()
	}
}
