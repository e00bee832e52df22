//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::PcmError,
	format::SampleFormat,
	pcm::sample::{check_aligned,IntSample,S8,S16,S24P32,S32,read_f32,write_f32},
};

//---------------------------------------------------------------------------------------------------- Constants
/// Fixed-point precision of an integer volume.
pub const PCM_VOLUME_BITS: u32 = 10;

/// The integer volume that leaves samples untouched (`1.0`).
pub const PCM_VOLUME_1: i32 = 1 << PCM_VOLUME_BITS;

//---------------------------------------------------------------------------------------------------- Volume
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
/// Convert a linear `f32` factor into a fixed-point volume.
///
/// Negative and `NaN` factors become `0` (silence).
/// ```rust
/// # use outpipe::pcm::*;
/// assert_eq!(float_to_volume(1.0), PCM_VOLUME_1);
/// assert_eq!(float_to_volume(0.5), PCM_VOLUME_1 / 2);
/// assert_eq!(float_to_volume(-1.0), 0);
/// ```
pub fn float_to_volume(factor: f32) -> i32 {
	let volume = factor * PCM_VOLUME_1 as f32 + 0.5;
	if volume.is_nan() || volume <= 0.0 {
		0
	} else {
		volume as i32
	}
}

#[inline]
/// Scale one integer sample by a fixed-point volume.
pub(super) fn scale(sample: i64, volume: i32) -> i64 {
	(sample * i64::from(volume) + i64::from(PCM_VOLUME_1 / 2)) >> PCM_VOLUME_BITS
}

fn apply_int<S: IntSample>(buffer: &mut [u8], volume: i32) {
	for sample in buffer.chunks_exact_mut(S::SIZE) {
		S::write(scale(S::read(sample), volume), sample);
	}
}

fn apply_float(buffer: &mut [u8], volume: i32) {
	let factor = volume as f32 / PCM_VOLUME_1 as f32;
	for sample in buffer.chunks_exact_mut(4) {
		write_f32(read_f32(sample) * factor, sample);
	}
}

/// Scale every sample in `buffer` by `volume` in place.
///
/// [`PCM_VOLUME_1`] is a no-op, `0` writes silence.
///
/// # Errors
/// DSD and undefined formats can't be scaled.
pub fn apply_volume(format: SampleFormat, buffer: &mut [u8], volume: i32) -> Result<(), PcmError> {
	check_aligned(format, buffer.len())?;

	if volume == PCM_VOLUME_1 {
		return Ok(());
	}

	if volume <= 0 {
		buffer.fill(0);
		return Ok(());
	}

	match format {
		SampleFormat::S8     => apply_int::<S8>(buffer, volume),
		SampleFormat::S16    => apply_int::<S16>(buffer, volume),
		SampleFormat::S24P32 => apply_int::<S24P32>(buffer, volume),
		SampleFormat::S32    => apply_int::<S32>(buffer, volume),
		SampleFormat::Float  => apply_float(buffer, volume),
		SampleFormat::Undefined | SampleFormat::Dsd => return Err(PcmError::UnsupportedFormat(format)),
	}

	Ok(())
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::s16;
	use pretty_assertions::assert_eq;

	#[test]
	fn half() {
		let mut buf = s16(&[1000, -1000, 32_767]);
		apply_volume(SampleFormat::S16, &mut buf, PCM_VOLUME_1 / 2).unwrap();
		assert_eq!(buf, s16(&[500, -500, 16_384]));
	}

	#[test]
	fn saturates() {
		let mut buf = s16(&[30_000, -30_000]);
		apply_volume(SampleFormat::S16, &mut buf, PCM_VOLUME_1 * 2).unwrap();
		assert_eq!(buf, s16(&[32_767, -32_768]));
	}

	#[test]
	fn silence_and_identity() {
		let original = s16(&[123, -456]);

		let mut buf = original.clone();
		apply_volume(SampleFormat::S16, &mut buf, PCM_VOLUME_1).unwrap();
		assert_eq!(buf, original);

		apply_volume(SampleFormat::S16, &mut buf, 0).unwrap();
		assert_eq!(buf, s16(&[0, 0]));
	}

	#[test]
	fn float() {
		let mut buf: Vec<u8> = [0.5_f32, -1.0].iter().flat_map(|f| f.to_ne_bytes()).collect();
		apply_volume(SampleFormat::Float, &mut buf, PCM_VOLUME_1 / 2).unwrap();
		assert_eq!(read_f32(&buf[0..4]), 0.25);
		assert_eq!(read_f32(&buf[4..8]), -0.5);
	}

	#[test]
	fn dsd() {
		let mut buf = vec![0_u8; 4];
		assert_eq!(
			apply_volume(SampleFormat::Dsd, &mut buf, PCM_VOLUME_1 / 2),
			Err(PcmError::UnsupportedFormat(SampleFormat::Dsd)),
		);
	}
}
