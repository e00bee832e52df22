//---------------------------------------------------------------------------------------------------- use
use crate::chunk::ReplayGainMode;

//---------------------------------------------------------------------------------------------------- ReplayGainConfig
/// How an output normalizes volume with replay gain.
#[derive(Copy,Clone,Debug,PartialEq,PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReplayGainConfig {
	/// The initial mode, changeable at runtime with
	/// [`Output::set_replay_gain_mode`](crate::Output::set_replay_gain_mode).
	pub mode: ReplayGainMode,

	/// Extra gain in dB applied on top of a known gain.
	pub preamp: f32,

	/// Gain in dB applied to songs without replay gain values.
	pub missing_preamp: f32,

	/// Lower the gain so the song's peak never clips.
	pub limit: bool,
}

impl ReplayGainConfig {
	/// Replay gain off, no pre-amplification, limiting on.
	pub const DEFAULT: Self = Self {
		mode:           ReplayGainMode::Off,
		preamp:         0.0,
		missing_preamp: 0.0,
		limit:          true,
	};

	#[must_use]
	/// [`Self::preamp`] as a linear factor.
	pub fn preamp_factor(&self) -> f32 {
		db_to_factor(self.preamp)
	}

	#[must_use]
	/// [`Self::missing_preamp`] as a linear factor.
	pub fn missing_preamp_factor(&self) -> f32 {
		db_to_factor(self.missing_preamp)
	}
}

impl Default for ReplayGainConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}

#[inline]
fn db_to_factor(db: f32) -> f32 {
	10.0_f32.powf(db / 20.0)
}
