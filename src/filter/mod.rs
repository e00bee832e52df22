//! PCM filters.
//!
//! Every stage implements [`Filter`]. The driver owns:
//! - up to two [`ReplayGainFilter`]s (the playing chunk and the chunk it cross-fades with)
//! - one [`FilterChain`]: the operator's filters followed by a terminal [`ConvertFilter`]

mod filter;
pub use filter::Filter;

mod chain;
pub use chain::FilterChain;

mod convert;
pub use convert::ConvertFilter;

mod resampler;

mod replay_gain;
pub use replay_gain::ReplayGainFilter;

mod volume;
pub use volume::{VolumeControl, VolumeFilter};
