//! Replay gain values carried by chunks.

//---------------------------------------------------------------------------------------------------- use
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- Constants
/// Gains at or below this are "not set".
const GAIN_UNDEFINED: f32 = -100.0;

/// The largest linear scale replay gain may ever apply.
const SCALE_MAX: f32 = 15.0;

//---------------------------------------------------------------------------------------------------- ReplayGainMode
/// Which of the two replay gain values to apply.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReplayGainMode {
	#[default]
	/// Leave the volume alone
	Off,
	/// Normalize every track on its own
	Track,
	/// Normalize whole albums
	Album,
}

//---------------------------------------------------------------------------------------------------- ReplayGainSerial
/// Identifies one [`ReplayGainInfo`] value.
///
/// Consecutive chunks of the same song share a serial so
/// the replay gain filter is only reconfigured on change.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReplayGainSerial(pub u32);

//---------------------------------------------------------------------------------------------------- ReplayGainTuple
/// A gain (dB) and the peak (linear) it was computed with.
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayGainTuple {
	/// Gain in dB
	pub gain: f32,
	/// Highest absolute sample, linear
	pub peak: f32,
}

impl ReplayGainTuple {
	/// No gain known.
	pub const UNDEFINED: Self = Self { gain: -200.0, peak: 0.0 };

	#[inline]
	#[must_use]
	/// Was this gain actually set?
	pub fn is_defined(&self) -> bool {
		self.gain > GAIN_UNDEFINED
	}

	#[must_use]
	/// The linear factor samples get multiplied by.
	///
	/// `preamp` and `missing_preamp` are linear factors.
	/// With `limit`, the scale is lowered so `peak` won't clip.
	/// ```rust
	/// # use outpipe::chunk::*;
	/// let tuple = ReplayGainTuple { gain: -6.0, peak: 0.5 };
	/// assert!((tuple.calculate_scale(1.0, 1.0, true) - 0.501).abs() < 0.001);
	///
	/// // Missing values use `missing_preamp`.
	/// assert_eq!(ReplayGainTuple::UNDEFINED.calculate_scale(1.0, 0.7, true), 0.7);
	/// ```
	pub fn calculate_scale(&self, preamp: f32, missing_preamp: f32, limit: bool) -> f32 {
		if !self.is_defined() {
			return missing_preamp;
		}

		let mut scale = 10.0_f32.powf(self.gain / 20.0) * preamp;
		if scale > SCALE_MAX {
			scale = SCALE_MAX;
		}

		if limit && self.peak > 0.0 && scale * self.peak > 1.0 {
			scale = 1.0 / self.peak;
		}

		scale
	}
}

impl Default for ReplayGainTuple {
	fn default() -> Self {
		Self::UNDEFINED
	}
}

//---------------------------------------------------------------------------------------------------- ReplayGainInfo
/// Track and album replay gain of a song.
#[derive(Copy,Clone,Debug,Default,PartialEq,PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayGainInfo {
	/// Per-track value
	pub track: ReplayGainTuple,
	/// Per-album value
	pub album: ReplayGainTuple,
}

impl ReplayGainInfo {
	#[must_use]
	/// The tuple for `mode`, falling back to the other one if unset.
	///
	/// [`ReplayGainMode::Off`] returns [`ReplayGainTuple::UNDEFINED`].
	pub fn get(&self, mode: ReplayGainMode) -> ReplayGainTuple {
		let (wanted, fallback) = match mode {
			ReplayGainMode::Off   => return ReplayGainTuple::UNDEFINED,
			ReplayGainMode::Track => (self.track, self.album),
			ReplayGainMode::Album => (self.album, self.track),
		};

		if wanted.is_defined() {
			wanted
		} else {
			fallback
		}
	}
}
