//! The output driver.
//!
//! Every [`Output`] owns one driver thread. The two sides share a
//! single [`State`] behind a mutex plus one condition variable that
//! wakes the driver thread, either for a new [`Command`] or because a
//! chunk arrived. Commands travel through a one-slot mailbox; the
//! issuer waits on its own one-shot channel, not on the shared lock.

mod command;
pub use command::Command;
use command::{Completion, Pending};

mod fail_timer;
use fail_timer::FailTimer;

mod state;
use state::{Shared, State};

mod chunk_filter;
use chunk_filter::ChunkFilter;

mod thread;
use thread::OutputThread;

mod play;

mod output;
pub use output::Output;
