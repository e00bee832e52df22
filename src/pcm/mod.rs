//! Sample-level PCM operations.
//!
//! All functions here work on raw, native-endian byte buffers
//! described by a [`SampleFormat`](crate::format::SampleFormat).
//! Integer math saturates at the limits of the sample format
//! instead of wrapping.

mod sample;

mod volume;
pub use volume::{apply_volume, float_to_volume, PCM_VOLUME_1, PCM_VOLUME_BITS};

mod mix;
pub use mix::{add, mix};

mod convert;
pub use convert::{from_f32, to_f32};
