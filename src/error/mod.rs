//! Errors that can occur inside an output.
//!
//! None of these ever cross the command boundary; the driver
//! thread logs them and turns them into a closed device plus
//! a failure cooldown. They are public so that plugin and
//! filter implementations can return them.

mod format;
pub use format::ParseFormatError;

mod pcm;
pub use pcm::PcmError;

mod filter;
pub use filter::FilterError;

mod output;
pub use output::OutputError;

mod error;
pub use error::DriverError;
