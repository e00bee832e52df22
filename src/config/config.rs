//---------------------------------------------------------------------------------------------------- use
use crate::{
	config::{ReplayGainConfig, PAUSE_POLL, REOPEN_AFTER},
	format::AudioFormat,
};
use std::time::Duration;

#[allow(unused_imports)] // docs
use crate::Output;

//---------------------------------------------------------------------------------------------------- OutputConfig
/// Configuration of one [`Output`].
///
/// This is passed once to [`Output::spawn`] and
/// used for the rest of the output's lifetime.
#[derive(Clone,Debug,PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OutputConfig {
	/// The operator's name for this output.
	///
	/// Used in log messages and as the driver thread's name.
	pub name: String,

	/// Format mask applied on top of the filter chain's format.
	///
	/// Fields left undefined (`*`) follow the input, so
	/// [`AudioFormat::UNDEFINED`] means "whatever is playing".
	/// A fully defined format pins the device format, which
	/// lets format changes only reconfigure the filters.
	pub format: AudioFormat,

	/// Forward tags to plugins that support them.
	pub tags: bool,

	/// Pause instead of closing when playback is released.
	pub always_on: bool,

	/// Whether the output starts enabled.
	pub enabled: bool,

	/// Try to give the driver thread real-time priority.
	///
	/// Failure to do so is logged and otherwise ignored.
	pub realtime: bool,

	/// How long after a failure [`Output::cooldown_active`] stays `true`.
	pub reopen_after: Duration,

	/// How often the pause loop polls the plugin.
	pub pause_poll: Duration,

	/// Replay gain settings, `None` disables the replay gain filters.
	pub replay_gain: Option<ReplayGainConfig>,
}

impl OutputConfig {
	/// ```rust
	/// # use outpipe::config::*;
	/// # use outpipe::format::*;
	/// assert_eq!(OutputConfig::DEFAULT.format, AudioFormat::UNDEFINED);
	/// assert_eq!(OutputConfig::DEFAULT.reopen_after, REOPEN_AFTER);
	/// assert!(OutputConfig::DEFAULT.enabled);
	/// ```
	pub const DEFAULT: Self = Self {
		name:         String::new(),
		format:       AudioFormat::UNDEFINED,
		tags:         true,
		always_on:    false,
		enabled:      true,
		realtime:     false,
		reopen_after: REOPEN_AFTER,
		pause_poll:   PAUSE_POLL,
		replay_gain:  Some(ReplayGainConfig::DEFAULT),
	};

	#[must_use]
	/// [`Self::DEFAULT`] with a name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::DEFAULT
		}
	}
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}
