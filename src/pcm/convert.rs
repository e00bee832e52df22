//! Conversion between raw samples and normalized `f32`.
//!
//! Integer formats are scaled so that their full range maps
//! onto `-1.0..1.0`. Converting back rounds and clamps.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::PcmError,
	format::SampleFormat,
	pcm::sample::{check_aligned,IntSample,S8,S16,S24P32,S32,read_f32},
};

//---------------------------------------------------------------------------------------------------- Int
#[allow(clippy::cast_precision_loss)]
fn int_to_f32<S: IntSample>(src: &[u8], out: &mut Vec<f32>) {
	let scale = (S::MAX + 1) as f64;
	out.extend(src.chunks_exact(S::SIZE).map(|s| (S::read(s) as f64 / scale) as f32));
}

#[allow(clippy::cast_possible_truncation)]
fn f32_to_int<S: IntSample>(src: &[f32], out: &mut Vec<u8>) {
	let scale = (S::MAX + 1) as f64;
	let start = out.len();
	out.resize(start + src.len() * S::SIZE, 0);
	for (f, bytes) in src.iter().zip(out[start..].chunks_exact_mut(S::SIZE)) {
		S::write((f64::from(*f) * scale).round() as i64, bytes);
	}
}

//---------------------------------------------------------------------------------------------------- Public
/// Append every sample of `src` to `out` as a normalized `f32`.
///
/// # Errors
/// DSD and undefined formats have no `f32` representation.
pub fn to_f32(format: SampleFormat, src: &[u8], out: &mut Vec<f32>) -> Result<(), PcmError> {
	check_aligned(format, src.len())?;

	match format {
		SampleFormat::S8     => int_to_f32::<S8>(src, out),
		SampleFormat::S16    => int_to_f32::<S16>(src, out),
		SampleFormat::S24P32 => int_to_f32::<S24P32>(src, out),
		SampleFormat::S32    => int_to_f32::<S32>(src, out),
		SampleFormat::Float  => out.extend(src.chunks_exact(4).map(read_f32)),
		SampleFormat::Undefined | SampleFormat::Dsd => return Err(PcmError::UnsupportedFormat(format)),
	}

	Ok(())
}

/// Append every `f32` of `src` to `out` encoded as `format`.
///
/// # Errors
/// DSD and undefined formats have no `f32` representation.
pub fn from_f32(format: SampleFormat, src: &[f32], out: &mut Vec<u8>) -> Result<(), PcmError> {
	match format {
		SampleFormat::S8     => f32_to_int::<S8>(src, out),
		SampleFormat::S16    => f32_to_int::<S16>(src, out),
		SampleFormat::S24P32 => f32_to_int::<S24P32>(src, out),
		SampleFormat::S32    => f32_to_int::<S32>(src, out),
		SampleFormat::Float  => out.extend(src.iter().flat_map(|f| f.to_ne_bytes())),
		SampleFormat::Undefined | SampleFormat::Dsd => return Err(PcmError::UnsupportedFormat(format)),
	}

	Ok(())
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn s16_to_f32() {
		let src: Vec<u8> = [-32_768_i16, 0, 16_384].iter().flat_map(|s| s.to_ne_bytes()).collect();
		let mut out = vec![];
		to_f32(SampleFormat::S16, &src, &mut out).unwrap();
		assert_eq!(out, [-1.0, 0.0, 0.5]);
	}

	#[test]
	fn f32_to_s24() {
		let mut out = vec![];
		from_f32(SampleFormat::S24P32, &[0.5, 2.0], &mut out).unwrap();

		let samples: Vec<i32> = out
			.chunks_exact(4)
			.map(|b| i32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
			.collect();
		assert_eq!(samples, [1 << 22, (1 << 23) - 1]);
	}

	#[test]
	fn appends() {
		let mut out = vec![0xFF];
		from_f32(SampleFormat::S8, &[0.0], &mut out).unwrap();
		assert_eq!(out, [0xFF, 0]);
	}

	#[test]
	fn dsd() {
		let mut out = vec![];
		assert_eq!(
			to_f32(SampleFormat::Dsd, &[0], &mut out),
			Err(PcmError::UnsupportedFormat(SampleFormat::Dsd)),
		);
	}
}
