//! Per-output configuration.
//!
//! Loading these from a file is left to the embedder;
//! with the `serde` feature they (de)serialize from any format.

mod config;
pub use config::OutputConfig;

mod replay_gain;
pub use replay_gain::ReplayGainConfig;

mod constants;
pub use constants::{PAUSE_POLL, REOPEN_AFTER};
