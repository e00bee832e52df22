//! Replay gain normalization.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	chunk::{ReplayGainInfo, ReplayGainMode},
	config::ReplayGainConfig,
	error::FilterError,
	filter::Filter,
	format::{AudioFormat, SampleFormat},
	macros::trace2,
	pcm::{self, PCM_VOLUME_1},
};

//---------------------------------------------------------------------------------------------------- ReplayGainFilter
/// Scales audio by the replay gain of the song it belongs to.
///
/// The scale is recomputed only by [`Self::set_info`]
/// and [`Self::set_mode`], never per chunk.
#[derive(Debug)]
pub struct ReplayGainFilter {
	mode: ReplayGainMode,
	/// Linear factors.
	preamp: f32,
	missing_preamp: f32,
	limit: bool,

	info: Option<ReplayGainInfo>,
	/// Fixed-point version of the current scale.
	volume: i32,

	format: Option<SampleFormat>,
	buffer: Vec<u8>,
}

impl ReplayGainFilter {
	#[must_use]
	/// A closed filter configured by `config`.
	pub fn new(config: &ReplayGainConfig) -> Self {
		Self {
			mode: config.mode,
			preamp: config.preamp_factor(),
			missing_preamp: config.missing_preamp_factor(),
			limit: config.limit,
			info: None,
			volume: PCM_VOLUME_1,
			format: None,
			buffer: vec![],
		}
	}

	/// Switch to another mode.
	pub fn set_mode(&mut self, mode: ReplayGainMode) {
		if self.mode != mode {
			self.mode = mode;
			self.update();
		}
	}

	/// Use the replay gain values of a new song.
	///
	/// `None` means the song has no values, so the
	/// configured missing-preamp is applied instead.
	pub fn set_info(&mut self, info: Option<&ReplayGainInfo>) {
		self.info = info.copied();
		self.update();
	}

	#[must_use]
	/// The current mode.
	pub const fn mode(&self) -> ReplayGainMode {
		self.mode
	}

	#[must_use]
	/// The linear factor currently applied.
	pub fn scale(&self) -> f32 {
		self.volume as f32 / PCM_VOLUME_1 as f32
	}

	fn update(&mut self) {
		let scale = match (self.mode, self.info) {
			(ReplayGainMode::Off, _) => 1.0,
			(mode, Some(info)) => info.get(mode).calculate_scale(self.preamp, self.missing_preamp, self.limit),
			(_, None) => self.missing_preamp,
		};

		self.volume = pcm::float_to_volume(scale);
		trace2!("ReplayGainFilter - mode: {}, scale: {scale}", self.mode);
	}
}

impl Filter for ReplayGainFilter {
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

		if self.volume == PCM_VOLUME_1 {
			return Ok(src);
		}

		self.buffer.clear();
		self.buffer.extend_from_slice(src);
		pcm::apply_volume(format, &mut self.buffer, self.volume)?;
		Ok(&self.buffer)
	}
}
