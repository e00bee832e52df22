//! Per-format sample access.
//!
//! Integer samples are read into an `i64` so intermediate
//! products can't overflow, and written back clamped to
//! the range of their format.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::PcmError,
	format::SampleFormat,
};

//---------------------------------------------------------------------------------------------------- IntSample
/// An integer sample layout.
pub(crate) trait IntSample {
	/// Bytes per sample.
	const SIZE: usize;
	/// Lowest legal value.
	const MIN: i64;
	/// Highest legal value.
	const MAX: i64;

	/// Read one sample from exactly `SIZE` bytes.
	fn read(bytes: &[u8]) -> i64;

	/// Clamp `value` and write it into exactly `SIZE` bytes.
	fn write(value: i64, bytes: &mut [u8]);

	#[inline]
	/// Clamp into `MIN..=MAX`.
	fn clamp(value: i64) -> i64 {
		value.clamp(Self::MIN, Self::MAX)
	}
}

macro_rules! impl_int_sample {
	(
		$name:ident,    // Marker type
		$int:ty,        // Storage type
		$size:literal,  // Bytes per sample
		$min:expr,      // Lowest legal value
		$max:expr,      // Highest legal value
	) => {
		pub(crate) struct $name;

		impl IntSample for $name {
			const SIZE: usize = $size;
			const MIN: i64 = $min;
			const MAX: i64 = $max;

			#[inline]
			fn read(bytes: &[u8]) -> i64 {
				let mut buf = [0_u8; $size];
				buf.copy_from_slice(bytes);
				i64::from(<$int>::from_ne_bytes(buf))
			}

			#[inline]
			#[allow(clippy::cast_possible_truncation)]
			fn write(value: i64, bytes: &mut [u8]) {
				let value = Self::clamp(value) as $int;
				bytes.copy_from_slice(&value.to_ne_bytes());
			}
		}
	};
}

impl_int_sample! { S8,     i8,  1, i8::MIN as i64,  i8::MAX as i64, }
impl_int_sample! { S16,    i16, 2, i16::MIN as i64, i16::MAX as i64, }
impl_int_sample! { S24P32, i32, 4, -(1 << 23),      (1 << 23) - 1, }
impl_int_sample! { S32,    i32, 4, i32::MIN as i64, i32::MAX as i64, }

//---------------------------------------------------------------------------------------------------- Float
#[inline]
/// Read a native-endian `f32`.
pub(crate) fn read_f32(bytes: &[u8]) -> f32 {
	let mut buf = [0_u8; 4];
	buf.copy_from_slice(bytes);
	f32::from_ne_bytes(buf)
}

#[inline]
/// Write a native-endian `f32`.
pub(crate) fn write_f32(value: f32, bytes: &mut [u8]) {
	bytes.copy_from_slice(&value.to_ne_bytes());
}

//---------------------------------------------------------------------------------------------------- Checks
/// Make sure `format` is processable and `len` holds whole samples.
pub(crate) fn check_aligned(format: SampleFormat, len: usize) -> Result<(), PcmError> {
	if !format.is_pcm() {
		return Err(PcmError::UnsupportedFormat(format));
	}

	let sample_size = format.sample_size();
	if len % sample_size != 0 {
		return Err(PcmError::Misaligned { len, sample_size });
	}

	Ok(())
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn read_write_clamps() {
		let mut buf = [0_u8; 2];
		S16::write(40_000, &mut buf);
		assert_eq!(S16::read(&buf), 32_767);
		S16::write(-40_000, &mut buf);
		assert_eq!(S16::read(&buf), -32_768);

		let mut buf = [0_u8; 4];
		S24P32::write(1 << 24, &mut buf);
		assert_eq!(S24P32::read(&buf), (1 << 23) - 1);
	}

	#[test]
	fn aligned() {
		assert!(check_aligned(SampleFormat::S16, 4).is_ok());
		assert_eq!(
			check_aligned(SampleFormat::S16, 3),
			Err(PcmError::Misaligned { len: 3, sample_size: 2 }),
		);
		assert_eq!(
			check_aligned(SampleFormat::Dsd, 4),
			Err(PcmError::UnsupportedFormat(SampleFormat::Dsd)),
		);
	}
}
