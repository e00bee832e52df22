//! Per-device audio output driver.
//!
//! An [`Output`] owns one audio device (an [`OutputPlugin`](output::OutputPlugin))
//! and a dedicated driver thread. The control side issues [`Command`]s;
//! the driver thread opens and closes the device, runs every queued
//! [`Chunk`](chunk::Chunk) through its filters and writes the result,
//! pacing itself on the device's reported delay.
//!
//! Failures never cross the command boundary: a failing device is
//! closed and not reopened until its cooldown ends
//! (see [`Output::update`] and [`config::REOPEN_AFTER`]).
//!
//! ```rust
//! # use outpipe::{*, chunk::*, config::*, filter::*, format::*, output::*};
//! # use std::sync::Arc;
//! let (notify, player) = crossbeam::channel::unbounded();
//! let pipe = Arc::new(MusicPipe::new());
//!
//! let mut output = Output::spawn(
//!     OutputConfig::new("speakers"),
//!     NullOutput::new(false),
//!     FilterChain::new(),
//!     notify,
//! ).unwrap();
//!
//! // Opens the device, nothing queued yet.
//! let format = AudioFormat::new(44100, SampleFormat::S16, 2);
//! assert!(output.open(format, pipe.clone()));
//!
//! let id = pipe.push(Chunk::new(vec![0; 4096]));
//! output.play();
//!
//! // The player is signaled once the queue ran dry.
//! player.recv().unwrap();
//! assert!(output.is_chunk_consumed(id));
//!
//! output.finish();
//! ```

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::type_complexity,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
    missing_docs,
)]

#![forbid(
    unused_unsafe,
    future_incompatible,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    exported_private_dependencies,
    for_loops_over_fallibles,
    large_assignments,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_comparisons,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
)]

//---------------------------------------------------------------------------------------------------- Public API
pub mod format;
pub mod chunk;
pub mod pcm;
pub mod filter;
pub mod output;
pub mod config;
pub mod error;
pub mod notify;

mod driver;
pub use driver::{Command, Output};

//---------------------------------------------------------------------------------------------------- Private Usage
mod atomic;
mod macros;
