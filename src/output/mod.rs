//! Audio output plugins.
//!
//! A plugin is the device-specific half of an output: it knows
//! how to talk to one kind of sink. Everything around it (threading,
//! filtering, pacing, failure handling) is done by [`Output`](crate::Output).

mod plugin;
pub use plugin::OutputPlugin;

mod null;
pub use null::NullOutput;
