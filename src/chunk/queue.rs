//---------------------------------------------------------------------------------------------------- use
use crate::chunk::{Chunk, ChunkId};
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- ChunkQueue
/// The producer side of playback, as seen by an output.
///
/// The decoder owns the queue and is the only one inserting
/// or removing chunks. Outputs only look at it.
///
/// # Invariants
/// 1. [`ChunkId`]s of chunks in the queue strictly increase from head to tail
/// 2. Neither function may block for a noticeable time, they are called with the output's lock held
pub trait ChunkQueue: Send + Sync {
	/// The oldest chunk still in the queue, without removing it.
	fn peek(&self) -> Option<Arc<Chunk>>;

	/// The first chunk that comes after `id`.
	///
	/// If `id` itself was already removed, this is
	/// the first remaining chunk with a greater ID.
	fn next(&self, id: ChunkId) -> Option<Arc<Chunk>>;
}
