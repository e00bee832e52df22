//! Song metadata that travels inline with the audio.
//!
//! Outputs that stream to a network (e.g. an HTTP or shout
//! server) forward these to their listeners when the chunk
//! carrying the tag starts playing.

//---------------------------------------------------------------------------------------------------- use
use std::time::Duration;
use strum::{
	AsRefStr,
	Display,
	EnumCount,
	EnumIter,
	EnumString,
	IntoStaticStr,
};

//---------------------------------------------------------------------------------------------------- TagType
/// The kind of a [`TagItem`].
///
/// Parsing is case-insensitive:
/// ```rust
/// # use outpipe::chunk::*;
/// assert_eq!("ALBUMARTIST".parse::<TagType>().unwrap(), TagType::AlbumArtist);
/// assert_eq!(TagType::MusicBrainzTrackId.to_string(), "musicbrainz_trackid");
/// ```
#[derive(Copy,Clone,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[derive(AsRefStr,Display,EnumCount,EnumIter,EnumString,IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum TagType {
	Artist,
	ArtistSort,
	Album,
	AlbumSort,
	AlbumArtist,
	AlbumArtistSort,
	Title,
	Track,
	Name,
	Genre,
	Date,
	Composer,
	Performer,
	Comment,
	Disc,
	#[strum(serialize = "musicbrainz_artistid")]
	MusicBrainzArtistId,
	#[strum(serialize = "musicbrainz_albumid")]
	MusicBrainzAlbumId,
	#[strum(serialize = "musicbrainz_trackid")]
	MusicBrainzTrackId,
}

//---------------------------------------------------------------------------------------------------- TagItem
/// One `type = value` pair.
#[derive(Clone,Debug,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagItem {
	/// What this value describes
	pub kind: TagType,
	/// The value itself
	pub value: String,
}

//---------------------------------------------------------------------------------------------------- Tag
/// Metadata of a song (or of a radio stream at some point in time).
#[derive(Clone,Debug,Default,PartialEq,Eq,Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
	/// Length of the song, `None` if unknown
	pub duration: Option<Duration>,
	/// Does the file carry an embedded playlist (e.g. a CUE sheet)?
	pub has_playlist: bool,
	/// All items, in insertion order
	pub items: Vec<TagItem>,
}

impl Tag {
	#[must_use]
	/// An empty tag.
	pub const fn new() -> Self {
		Self {
			duration: None,
			has_playlist: false,
			items: Vec::new(),
		}
	}

	#[must_use]
	/// Builder-style [`Self::push`].
	pub fn with(mut self, kind: TagType, value: impl Into<String>) -> Self {
		self.push(kind, value);
		self
	}

	/// Append an item.
	pub fn push(&mut self, kind: TagType, value: impl Into<String>) {
		self.items.push(TagItem { kind, value: value.into() });
	}

	#[inline]
	#[must_use]
	/// No items (the duration is ignored)?
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	#[inline]
	#[must_use]
	/// Does this tag carry any information at all?
	pub fn is_defined(&self) -> bool {
		!self.is_empty() || self.duration.is_some()
	}

	#[must_use]
	/// The first value of `kind`.
	pub fn get_value(&self, kind: TagType) -> Option<&str> {
		self.items
			.iter()
			.find(|item| item.kind == kind)
			.map(|item| item.value.as_str())
	}

	#[must_use]
	/// Is there at least one item of `kind`?
	pub fn has_type(&self, kind: TagType) -> bool {
		self.items.iter().any(|item| item.kind == kind)
	}

	#[must_use]
	/// Merge two tags: for every type present in `add`, only `add`'s values are kept.
	pub fn merge(base: &Self, add: &Self) -> Self {
		let mut items: Vec<TagItem> = base
			.items
			.iter()
			.filter(|item| !add.has_type(item.kind))
			.cloned()
			.collect();
		items.extend(add.items.iter().cloned());

		Self {
			duration: add.duration.or(base.duration),
			has_playlist: base.has_playlist || add.has_playlist,
			items,
		}
	}
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn defined() {
		let mut tag = Tag::new();
		assert!(!tag.is_defined());
		tag.duration = Some(Duration::from_secs(1));
		assert!(tag.is_empty());
		assert!(tag.is_defined());
	}

	#[test]
	fn merge() {
		let base = Tag::new()
			.with(TagType::Artist, "a")
			.with(TagType::Title, "old");
		let add = Tag::new().with(TagType::Title, "new");

		let merged = Tag::merge(&base, &add);
		assert_eq!(merged.get_value(TagType::Artist), Some("a"));
		assert_eq!(merged.get_value(TagType::Title), Some("new"));
		assert_eq!(merged.items.len(), 2);
	}
}
