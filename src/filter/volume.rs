//! Software volume.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	atomic::AtomicF32,
	error::FilterError,
	filter::Filter,
	format::{AudioFormat, SampleFormat},
	pcm::{self, PCM_VOLUME_1},
};
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- VolumeControl
/// Changes the volume of a [`VolumeFilter`] from another thread.
///
/// The new volume takes effect with the next chunk.
#[derive(Clone, Debug)]
pub struct VolumeControl(Arc<AtomicF32>);

impl VolumeControl {
	/// Set the linear volume factor, clamped to `0.0..=2.0`.
	pub fn set(&self, volume: f32) {
		self.0.set(clamp(volume));
	}

	#[must_use]
	/// The linear volume factor.
	pub fn get(&self) -> f32 {
		self.0.get()
	}
}

#[inline]
fn clamp(volume: f32) -> f32 {
	if volume.is_nan() {
		0.0
	} else {
		volume.clamp(0.0, 2.0)
	}
}

//---------------------------------------------------------------------------------------------------- VolumeFilter
/// Scales every sample by an adjustable factor.
#[derive(Debug)]
pub struct VolumeFilter {
	volume: Arc<AtomicF32>,
	format: Option<SampleFormat>,
	buffer: Vec<u8>,
}

impl VolumeFilter {
	#[must_use]
	/// A closed filter at `volume` (`1.0` is unchanged).
	pub fn new(volume: f32) -> Self {
		Self {
			volume: Arc::new(AtomicF32::new(clamp(volume))),
			format: None,
			buffer: vec![],
		}
	}

	#[must_use]
	/// A handle that changes this filter's volume.
	pub fn control(&self) -> VolumeControl {
		VolumeControl(Arc::clone(&self.volume))
	}
}

impl Filter for VolumeFilter {
	fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, FilterError> {
		if !format.format.is_pcm() {
			return Err(FilterError::UnsupportedFormat(format));
		}

		self.format = Some(format.format);
		Ok(format)
	}

	fn close(&mut self) {
		self.format = None;
	}

	fn filter<'a>(&'a mut self, src: &'a [u8]) -> Result<&'a [u8], FilterError> {
		let Some(format) = self.format else {
			return Err(FilterError::NotOpen);
		};

		let volume = pcm::float_to_volume(self.volume.get());
		if volume == PCM_VOLUME_1 {
			return Ok(src);
		}

		self.buffer.clear();
		self.buffer.extend_from_slice(src);
		pcm::apply_volume(format, &mut self.buffer, volume)?;
		Ok(&self.buffer)
	}
}
