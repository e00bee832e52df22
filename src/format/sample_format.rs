//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- SampleFormat
/// The encoding of a single PCM sample.
///
/// Samples are always stored in native byte order.
///
/// The textual form is the one used in format strings, e.g. `44100:16:2`.
/// ```rust
/// # use outpipe::format::*;
/// assert_eq!(SampleFormat::S16.to_string(), "16");
/// assert_eq!(SampleFormat::Float.to_string(), "f");
/// assert_eq!("24".parse::<SampleFormat>().unwrap(), SampleFormat::S24P32);
/// ```
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SampleFormat {
	#[default]
	#[strum(serialize = "*")]
	/// Not known (yet), also used as the "any" value inside masks
	Undefined,
	#[strum(serialize = "8")]
	/// Signed 8-bit integer
	S8,
	#[strum(serialize = "16")]
	/// Signed 16-bit integer
	S16,
	#[strum(serialize = "24")]
	/// Signed 24-bit integer, stored in the low bits of a 32-bit integer
	S24P32,
	#[strum(serialize = "32")]
	/// Signed 32-bit integer
	S32,
	#[strum(serialize = "f")]
	/// 32-bit float, nominal range `-1.0..=1.0`
	Float,
	#[strum(serialize = "dsd")]
	/// Direct Stream Digital, 8 one-bit samples packed per byte
	///
	/// DSD cannot be mixed, scaled or converted, only passed through.
	Dsd,
}

impl SampleFormat {
	#[inline]
	#[must_use]
	/// The amount of bytes a single sample of this format occupies.
	///
	/// [`SampleFormat::Undefined`] returns `0`.
	pub const fn sample_size(self) -> usize {
		match self {
			Self::Undefined => 0,
			Self::S8 | Self::Dsd => 1,
			Self::S16 => 2,
			Self::S24P32 | Self::S32 | Self::Float => 4,
		}
	}

	#[inline]
	#[must_use]
	/// Is this anything other than [`SampleFormat::Undefined`]?
	pub const fn is_defined(self) -> bool {
		!matches!(self, Self::Undefined)
	}

	#[inline]
	#[must_use]
	/// Can samples of this format be scaled, mixed and converted?
	pub const fn is_pcm(self) -> bool {
		!matches!(self, Self::Undefined | Self::Dsd)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use strum::IntoEnumIterator;

	#[test]
	fn display_parse() {
		for format in SampleFormat::iter() {
			let string = format.to_string();
			assert_eq!(string.parse::<SampleFormat>().unwrap(), format);
		}
	}

	#[test]
	fn sizes() {
		assert_eq!(SampleFormat::Undefined.sample_size(), 0);
		assert_eq!(SampleFormat::S8.sample_size(), 1);
		assert_eq!(SampleFormat::S16.sample_size(), 2);
		assert_eq!(SampleFormat::S24P32.sample_size(), 4);
		assert_eq!(SampleFormat::Float.sample_size(), 4);
		assert!(!SampleFormat::Dsd.is_pcm());
		assert!(SampleFormat::S32.is_pcm());
	}
}
