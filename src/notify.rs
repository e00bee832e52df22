//! Player notification.
//!
//! An [`Output`](crate::Output) tells its player side that something
//! happened (e.g. it ran out of chunks, or a command that was
//! interrupted by playback is now done) through [`PlayerNotify`].
//!
//! This trait is already implemented on:
//! - `std::sync::mpsc::Sender<()>`
//! - `std::sync::mpsc::SyncSender<()>`
//! - `crossbeam::channel::Sender<()>`
//! - `()`
//!
//! `signal()` on `()` does nothing, which is
//! useful if nothing needs to be woken up.
//!
//! For example, with `crossbeam`'s channels:
//! ```rust
//! use outpipe::notify::PlayerNotify;
//!
//! let (send, recv) = crossbeam::channel::bounded(1);
//! send.signal();
//! send.signal(); // full, the player wasn't woken yet.
//! assert_eq!(recv.try_iter().count(), 1);
//! ```

//---------------------------------------------------------------------------------------------------- PlayerNotify
/// Wakes up whatever is feeding an output.
///
/// This is called by the driver thread without holding
/// any lock, so it may block, but it shouldn't block for long.
pub trait PlayerNotify: Send + 'static {
	/// Signal that the output's playback state changed.
	///
	/// Signals may be coalesced: the receiver should
	/// re-check the output's state, not count signals.
	fn signal(&self);
}

//---------------------------------------------------------------------------------------------------- crossbeam
impl PlayerNotify for crossbeam::channel::Sender<()> {
	#[inline]
	fn signal(&self) {
		// Full or disconnected, either way there's nobody to wake.
		let _ = self.try_send(());
	}
}

//---------------------------------------------------------------------------------------------------- std
impl PlayerNotify for std::sync::mpsc::Sender<()> {
	#[inline]
	fn signal(&self) {
		let _ = self.send(());
	}
}

impl PlayerNotify for std::sync::mpsc::SyncSender<()> {
	#[inline]
	fn signal(&self) {
		let _ = self.try_send(());
	}
}

//---------------------------------------------------------------------------------------------------- ()
impl PlayerNotify for () {
	#[inline(always)]
	fn signal(&self) {}
}
