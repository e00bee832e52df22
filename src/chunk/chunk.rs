//---------------------------------------------------------------------------------------------------- use
use crate::chunk::{ReplayGainInfo, ReplayGainSerial, Tag};
use std::sync::Arc;

//---------------------------------------------------------------------------------------------------- ChunkId
/// A stable handle to a chunk inside a [`ChunkQueue`](crate::chunk::ChunkQueue).
///
/// IDs are handed out in increasing order, so "the chunk after `x`"
/// stays meaningful even after `x` itself was reclaimed.
#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChunkId(pub u64);

impl std::fmt::Display for ChunkId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

//---------------------------------------------------------------------------------------------------- Chunk
/// A segment of decoded PCM audio plus its metadata.
///
/// `data.len()` is always a multiple of the input format's frame size.
#[derive(Clone,Debug,Default)]
pub struct Chunk {
	/// Position of this chunk in its queue
	pub id: ChunkId,

	/// Raw native-endian PCM bytes
	pub data: Vec<u8>,

	/// The chunk of the _next_ song this one cross-fades with
	pub other: Option<Arc<Chunk>>,

	/// How much of `other` is audible, `0.0..=1.0`
	///
	/// Values outside that range mean "add both chunks unweighted".
	pub mix_ratio: f32,

	/// A tag that becomes current with this chunk
	pub tag: Option<Arc<Tag>>,

	/// Changes whenever `replay_gain_info` changes
	pub replay_gain_serial: ReplayGainSerial,

	/// Replay gain values for the song this chunk belongs to
	pub replay_gain_info: Option<ReplayGainInfo>,
}

impl Chunk {
	#[must_use]
	/// Create a plain chunk holding `data`.
	pub fn new(data: Vec<u8>) -> Self {
		Self {
			data,
			..Default::default()
		}
	}

	#[must_use]
	/// Cross-fade this chunk with `other` (the incoming song).
	pub fn with_other(mut self, other: Arc<Self>, mix_ratio: f32) -> Self {
		self.other = Some(other);
		self.mix_ratio = mix_ratio;
		self
	}

	#[must_use]
	/// Attach a tag.
	pub fn with_tag(mut self, tag: Tag) -> Self {
		self.tag = Some(Arc::new(tag));
		self
	}

	#[must_use]
	/// Attach replay gain info under a serial.
	pub fn with_replay_gain(mut self, serial: ReplayGainSerial, info: Option<ReplayGainInfo>) -> Self {
		self.replay_gain_serial = serial;
		self.replay_gain_info = info;
		self
	}

	#[inline]
	#[must_use]
	/// The raw PCM bytes.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	#[inline]
	#[must_use]
	/// Does this chunk carry no audio?
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}
