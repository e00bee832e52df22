//! Per-chunk filtering: replay gain, cross-fade, then the filter chain.

//---------------------------------------------------------------------------------------------------- use
use crate::{
	chunk::{Chunk, ReplayGainMode, ReplayGainSerial},
	config::ReplayGainConfig,
	error::FilterError,
	filter::{Filter, FilterChain, ReplayGainFilter},
	format::AudioFormat,
	macros::warn2,
	pcm,
};

//---------------------------------------------------------------------------------------------------- GainStage
/// A replay gain filter plus the serial it was last configured for.
#[derive(Debug)]
struct GainStage {
	filter: ReplayGainFilter,
	serial: Option<ReplayGainSerial>,
	open: bool,
}

impl GainStage {
	fn new(config: &ReplayGainConfig) -> Self {
		Self {
			filter: ReplayGainFilter::new(config),
			serial: None,
			open: false,
		}
	}

	/// A stage that fails to open is skipped, the chunk plays unscaled.
	fn open(&mut self, format: AudioFormat) {
		self.serial = None;
		match self.filter.open(format) {
			Ok(_) => self.open = true,
			Err(e) => {
				warn2!("ChunkFilter - replay gain disabled for {format}: {e}");
				self.open = false;
			},
		}
	}

	fn close(&mut self) {
		if self.open {
			self.filter.close();
			self.open = false;
		}
	}
}

/// Remember `serial`, returning `true` if it differs from the last one.
fn serial_changed(cache: &mut Option<ReplayGainSerial>, serial: ReplayGainSerial) -> bool {
	if *cache == Some(serial) {
		false
	} else {
		*cache = Some(serial);
		true
	}
}

/// A chunk's data after its replay gain.
fn chunk_data<'a>(stage: Option<&'a mut GainStage>, chunk: &'a Chunk) -> Result<&'a [u8], FilterError> {
	let data = chunk.data();

	let Some(stage) = stage.filter(|s| s.open) else {
		return Ok(data);
	};

	if data.is_empty() {
		return Ok(data);
	}

	if serial_changed(&mut stage.serial, chunk.replay_gain_serial) {
		stage.filter.set_info(chunk.replay_gain_info.as_ref());
	}

	stage.filter.filter(data)
}

//---------------------------------------------------------------------------------------------------- ChunkFilter
/// Every filter a driver thread owns.
#[derive(Debug)]
pub(super) struct ChunkFilter {
	replay_gain: Option<GainStage>,
	/// For the chunk being cross-faded in.
	other_replay_gain: Option<GainStage>,
	chain: FilterChain,
	cross_fade_buffer: Vec<u8>,
	/// The input format, `None` while closed.
	format: Option<AudioFormat>,
}

impl ChunkFilter {
	pub(super) fn new(replay_gain: Option<&ReplayGainConfig>, chain: FilterChain) -> Self {
		Self {
			replay_gain: replay_gain.map(GainStage::new),
			other_replay_gain: replay_gain.map(GainStage::new),
			chain,
			cross_fade_buffer: vec![],
			format: None,
		}
	}

	/// Open everything for input in `format`.
	///
	/// Returns the format the filter chain produces.
	///
	/// # Errors
	/// The filter chain failed to open, nothing is left open.
	pub(super) fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, FilterError> {
		self.replay_gain.iter_mut().for_each(|s| s.open(format));
		self.other_replay_gain.iter_mut().for_each(|s| s.open(format));

		match self.chain.open(format) {
			Ok(out) => {
				self.format = Some(format);
				Ok(out)
			},
			Err(e) => {
				self.replay_gain.iter_mut().for_each(GainStage::close);
				self.other_replay_gain.iter_mut().for_each(GainStage::close);
				Err(e)
			},
		}
	}

	/// Close everything, no-op if already closed.
	pub(super) fn close(&mut self) {
		if self.format.take().is_some() {
			self.replay_gain.iter_mut().for_each(GainStage::close);
			self.other_replay_gain.iter_mut().for_each(GainStage::close);
			self.chain.close();
		}
	}

	/// Make the chain's output match the device format.
	///
	/// # Errors
	/// The formats can't be converted.
	pub(super) fn set_convert(&mut self, out: AudioFormat) -> Result<(), FilterError> {
		self.chain.set_convert(out)
	}

	/// Drop audio buffered in the chain, e.g. by a resampler.
	pub(super) fn reset(&mut self) {
		if self.format.is_some() {
			self.chain.reset();
		}
	}

	pub(super) fn set_replay_gain_mode(&mut self, mode: ReplayGainMode) {
		for stage in self.replay_gain.iter_mut().chain(self.other_replay_gain.iter_mut()) {
			stage.filter.set_mode(mode);
		}
	}

	/// Turn a chunk into device-ready bytes.
	///
	/// If the chunk cross-fades, both sides are replay gain filtered,
	/// and the common prefix is mixed. Any rest of the incoming
	/// chunk is part of the next song and follows unmixed.
	///
	/// # Errors
	/// Any filter failed, or the format can't be mixed.
	pub(super) fn filter_chunk<'a>(&'a mut self, chunk: &'a Chunk) -> Result<&'a [u8], FilterError> {
		let Self {
			replay_gain,
			other_replay_gain,
			chain,
			cross_fade_buffer,
			format,
		} = self;

		let Some(format) = *format else {
			return Err(FilterError::NotOpen);
		};

		let data = chunk_data(replay_gain.as_mut(), chunk)?;
		if data.is_empty() {
			return Ok(data);
		}

		let data = match chunk.other.as_deref() {
			None => data,
			Some(other) => {
				let other_data = chunk_data(other_replay_gain.as_mut(), other)?;
				if other_data.is_empty() {
					return Ok(&[]);
				}

				let len = data.len().min(other_data.len());
				cross_fade_buffer.clear();
				cross_fade_buffer.extend_from_slice(other_data);
				pcm::mix(
					format.format,
					&mut cross_fade_buffer[..len],
					&data[..len],
					1.0 - chunk.mix_ratio,
				).map_err(FilterError::CrossFade)?;

				cross_fade_buffer.as_slice()
			},
		};

		chain.filter(data)
	}
}
