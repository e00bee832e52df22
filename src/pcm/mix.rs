//! Cross-fade mixing.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::PcmError,
	format::SampleFormat,
	pcm::{
		sample::{check_aligned,IntSample,S8,S16,S24P32,S32,read_f32,write_f32},
		volume::{float_to_volume,PCM_VOLUME_1,PCM_VOLUME_BITS},
	},
};

//---------------------------------------------------------------------------------------------------- Add
fn add_vol_int<S: IntSample>(dest: &mut [u8], src: &[u8], vol1: i32, vol2: i32) {
	let rounding = i64::from(PCM_VOLUME_1 / 2);
	for (d, s) in dest.chunks_exact_mut(S::SIZE).zip(src.chunks_exact(S::SIZE)) {
		let mixed = (S::read(d) * i64::from(vol1) + S::read(s) * i64::from(vol2) + rounding) >> PCM_VOLUME_BITS;
		S::write(mixed, d);
	}
}

fn add_vol_float(dest: &mut [u8], src: &[u8], vol1: i32, vol2: i32) {
	let vol1 = vol1 as f32 / PCM_VOLUME_1 as f32;
	let vol2 = vol2 as f32 / PCM_VOLUME_1 as f32;
	for (d, s) in dest.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
		write_f32(read_f32(d) * vol1 + read_f32(s) * vol2, d);
	}
}

fn add_int<S: IntSample>(dest: &mut [u8], src: &[u8]) {
	for (d, s) in dest.chunks_exact_mut(S::SIZE).zip(src.chunks_exact(S::SIZE)) {
		S::write(S::read(d) + S::read(s), d);
	}
}

fn add_float(dest: &mut [u8], src: &[u8]) {
	for (d, s) in dest.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
		write_f32(read_f32(d) + read_f32(s), d);
	}
}

fn add_vol(format: SampleFormat, dest: &mut [u8], src: &[u8], vol1: i32, vol2: i32) -> Result<(), PcmError> {
	match format {
		SampleFormat::S8     => add_vol_int::<S8>(dest, src, vol1, vol2),
		SampleFormat::S16    => add_vol_int::<S16>(dest, src, vol1, vol2),
		SampleFormat::S24P32 => add_vol_int::<S24P32>(dest, src, vol1, vol2),
		SampleFormat::S32    => add_vol_int::<S32>(dest, src, vol1, vol2),
		SampleFormat::Float  => add_vol_float(dest, src, vol1, vol2),
		SampleFormat::Undefined | SampleFormat::Dsd => return Err(PcmError::UnsupportedFormat(format)),
	}
	Ok(())
}

/// Saturating sample-wise `dest += src`.
///
/// Only the common prefix of the two buffers is touched.
///
/// # Errors
/// DSD and undefined formats can't be added.
pub fn add(format: SampleFormat, dest: &mut [u8], src: &[u8]) -> Result<(), PcmError> {
	check_aligned(format, dest.len())?;
	check_aligned(format, src.len())?;

	match format {
		SampleFormat::S8     => add_int::<S8>(dest, src),
		SampleFormat::S16    => add_int::<S16>(dest, src),
		SampleFormat::S24P32 => add_int::<S24P32>(dest, src),
		SampleFormat::S32    => add_int::<S32>(dest, src),
		SampleFormat::Float  => add_float(dest, src),
		SampleFormat::Undefined | SampleFormat::Dsd => return Err(PcmError::UnsupportedFormat(format)),
	}
	Ok(())
}

//---------------------------------------------------------------------------------------------------- Mix
/// Linearly mix `src` into `dest`.
///
/// The result is `dest * portion1 + src * (1 - portion1)`,
/// clamped to the sample format's range.
///
/// A `portion1` outside of `0.0..=1.0` (including `NaN`)
/// means "not a cross-fade": the buffers are simply added.
///
/// Only the common prefix of the two buffers is touched.
///
/// # Errors
/// DSD and undefined formats can't be mixed.
pub fn mix(format: SampleFormat, dest: &mut [u8], src: &[u8], portion1: f32) -> Result<(), PcmError> {
	check_aligned(format, dest.len())?;
	check_aligned(format, src.len())?;

	if (0.0..=1.0).contains(&portion1) {
		let vol1 = float_to_volume(portion1);
		let vol2 = float_to_volume(1.0 - portion1);
		add_vol(format, dest, src, vol1, vol2)
	} else {
		add(format, dest, src)
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use crate::tests::s16;
	use pretty_assertions::assert_eq;

	#[test]
	fn portions() {
		let src = s16(&[1000, 2000]);

		// All `dest`.
		let mut dest = s16(&[100, 200]);
		mix(SampleFormat::S16, &mut dest, &src, 1.0).unwrap();
		assert_eq!(dest, s16(&[100, 200]));

		// All `src`.
		let mut dest = s16(&[100, 200]);
		mix(SampleFormat::S16, &mut dest, &src, 0.0).unwrap();
		assert_eq!(dest, s16(&[1000, 2000]));

		// Half/half.
		let mut dest = s16(&[0, 2000]);
		mix(SampleFormat::S16, &mut dest, &src, 0.5).unwrap();
		assert_eq!(dest, s16(&[500, 2000]));
	}

	#[test]
	fn out_of_range_portion_adds() {
		let mut dest = s16(&[30_000, 5]);
		mix(SampleFormat::S16, &mut dest, &s16(&[30_000, 5]), f32::NAN).unwrap();
		assert_eq!(dest, s16(&[32_767, 10]));

		let mut dest = s16(&[-30_000]);
		mix(SampleFormat::S16, &mut dest, &s16(&[-30_000]), -1.0).unwrap();
		assert_eq!(dest, s16(&[-32_768]));
	}

	#[test]
	fn float() {
		let mut dest: Vec<u8> = [1.0_f32].iter().flat_map(|f| f.to_ne_bytes()).collect();
		let src: Vec<u8> = [0.0_f32].iter().flat_map(|f| f.to_ne_bytes()).collect();
		mix(SampleFormat::Float, &mut dest, &src, 0.25).unwrap();
		assert_eq!(read_f32(&dest), 0.25);
	}

	#[test]
	fn dsd_fails() {
		let mut dest = vec![0_u8; 2];
		assert_eq!(
			mix(SampleFormat::Dsd, &mut dest, &[0, 0], 0.5),
			Err(PcmError::UnsupportedFormat(SampleFormat::Dsd)),
		);
	}
}
