//! Audio chunks and the queue they travel through.
//!
//! A decoder fills a [`ChunkQueue`] with [`Chunk`]s; every output
//! walks the same queue independently, remembering only the
//! [`ChunkId`] of the last chunk it played. Chunks are never
//! removed or mutated by an output.

mod chunk;
pub use chunk::{Chunk, ChunkId};

mod tag;
pub use tag::{Tag, TagItem, TagType};

mod replay_gain;
pub use replay_gain::{ReplayGainInfo, ReplayGainMode, ReplayGainSerial, ReplayGainTuple};

mod queue;
pub use queue::ChunkQueue;

mod pipe;
pub use pipe::MusicPipe;
