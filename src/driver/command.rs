//! Commands and their completion handles.

//---------------------------------------------------------------------------------------------------- use
use crossbeam::channel::{Receiver, Sender};
use strum::{
	AsRefStr,
	Display,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- Command
/// A request to an output's driver thread.
///
/// Commands are executed one at a time, in the order they are issued.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
#[derive(AsRefStr,Display,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Command {
	/// Acquire the device, does nothing if already enabled
	Enable,
	/// Close if open, then release the device
	Disable,
	/// Open the filters and the device for the current input format
	Open,
	/// The input format changed, reconfigure for it
	Reopen,
	/// Close the device, draining or discarding its buffered audio
	Close {
		/// Play out buffered audio before closing
		drain: bool,
	},
	/// Stay open but silent until the next command
	Pause,
	/// Block until the device played everything buffered
	Drain,
	/// Forget the current chunk and discard buffered audio
	Cancel,
	/// Exit the driver thread
	Terminate,
}

//---------------------------------------------------------------------------------------------------- Pending
/// A [`Command`] sitting in the mailbox.
#[derive(Debug)]
pub(super) struct Pending {
	pub(super) command: Command,
	done: Sender<()>,
}

impl Pending {
	/// Create a command and the handle its issuer waits on.
	pub(super) fn new(command: Command) -> (Self, Completion) {
		let (done, recv) = crossbeam::channel::bounded(1);
		(Self { command, done }, Completion(recv))
	}

	/// Tell the issuer the command is done.
	pub(super) fn finish(self) {
		// The issuer may have stopped waiting.
		let _ = self.done.try_send(());
	}
}

//---------------------------------------------------------------------------------------------------- Completion
/// The issuer's side of a [`Pending`] command.
#[derive(Debug)]
pub(super) struct Completion(Receiver<()>);

impl Completion {
	/// Block until the command finished.
	///
	/// Also returns if the command was dropped unfinished,
	/// so a dead driver thread never hangs the issuer.
	pub(super) fn wait(self) {
		let _ = self.0.recv();
	}
}
