//! Default timings.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

//---------------------------------------------------------------------------------------------------- Constants
/// How long a failed output is left alone before it may be opened again.
pub const REOPEN_AFTER: Duration = Duration::from_secs(REOPEN_AFTER_SECS);
/// [`REOPEN_AFTER`] in seconds.
const REOPEN_AFTER_SECS: u64 = 10;

/// How often a paused output is re-polled while no command arrives.
pub const PAUSE_POLL: Duration = Duration::from_millis(PAUSE_POLL_MILLIS);
/// [`PAUSE_POLL`] in milliseconds.
const PAUSE_POLL_MILLIS: u64 = 100;
