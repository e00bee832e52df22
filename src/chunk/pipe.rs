//! A simple [`ChunkQueue`] for decoders to push into.

//---------------------------------------------------------------------------------------------------- use
use crate::chunk::{Chunk, ChunkId, ChunkQueue};
use parking_lot::Mutex;
use std::{
	collections::VecDeque,
	sync::Arc,
};

//---------------------------------------------------------------------------------------------------- MusicPipe
/// A FIFO of [`Chunk`]s shared between a decoder and its outputs.
///
/// [`MusicPipe::push`] stamps every chunk with the next [`ChunkId`].
///
/// ```rust
/// # use outpipe::chunk::*;
/// let pipe = MusicPipe::new();
/// let a = pipe.push(Chunk::new(vec![0; 4]));
/// let b = pipe.push(Chunk::new(vec![0; 4]));
///
/// assert_eq!(pipe.peek().unwrap().id, a);
/// assert_eq!(pipe.next(a).unwrap().id, b);
/// assert!(pipe.next(b).is_none());
///
/// // `a` is gone, but what comes after it is still known.
/// pipe.shift();
/// assert_eq!(pipe.next(a).unwrap().id, b);
/// ```
#[derive(Debug, Default)]
pub struct MusicPipe {
	inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
	chunks: VecDeque<Arc<Chunk>>,
	next_id: u64,
}

impl MusicPipe {
	#[must_use]
	/// An empty pipe.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a chunk to the tail, returning the ID it was given.
	pub fn push(&self, mut chunk: Chunk) -> ChunkId {
		let mut inner = self.inner.lock();
		inner.next_id += 1;
		let id = ChunkId(inner.next_id);
		chunk.id = id;
		inner.chunks.push_back(Arc::new(chunk));
		id
	}

	/// Remove the head chunk.
	///
	/// Outputs that still need it keep it alive through their `Arc`.
	pub fn shift(&self) -> Option<Arc<Chunk>> {
		self.inner.lock().chunks.pop_front()
	}

	/// Remove every chunk.
	pub fn clear(&self) {
		self.inner.lock().chunks.clear();
	}

	#[must_use]
	/// Amount of chunks queued.
	pub fn len(&self) -> usize {
		self.inner.lock().chunks.len()
	}

	#[must_use]
	/// Is the pipe empty?
	pub fn is_empty(&self) -> bool {
		self.inner.lock().chunks.is_empty()
	}

	#[must_use]
	/// Is the chunk with this ID still queued?
	pub fn contains(&self, id: ChunkId) -> bool {
		self.inner.lock().chunks.iter().any(|c| c.id == id)
	}
}

impl ChunkQueue for MusicPipe {
	fn peek(&self) -> Option<Arc<Chunk>> {
		self.inner.lock().chunks.front().map(Arc::clone)
	}

	fn next(&self, id: ChunkId) -> Option<Arc<Chunk>> {
		self.inner
			.lock()
			.chunks
			.iter()
			.find(|c| c.id > id)
			.map(Arc::clone)
	}
}
