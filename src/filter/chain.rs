//---------------------------------------------------------------------------------------------------- use
use crate::{
	error::FilterError,
	filter::{ConvertFilter, Filter},
	format::AudioFormat,
};

//---------------------------------------------------------------------------------------------------- FilterChain
/// The operator's filters, in order, followed by a [`ConvertFilter`].
///
/// [`Filter::open`] returns the format the operator's filters
/// produce; the device format is only known later, so the
/// convert stage starts as a passthrough until
/// [`FilterChain::set_convert`] is called.
#[derive(Default)]
pub struct FilterChain {
	filters: Vec<Box<dyn Filter>>,
	convert: ConvertFilter,
}

impl FilterChain {
	#[must_use]
	/// A chain with only the convert stage.
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	/// A chain running `filters` before the convert stage.
	pub fn with(filters: Vec<Box<dyn Filter>>) -> Self {
		Self {
			filters,
			convert: ConvertFilter::new(),
		}
	}

	/// Append a filter before the convert stage.
	pub fn push(&mut self, filter: impl Filter + 'static) {
		self.filters.push(Box::new(filter));
	}

	#[must_use]
	/// Amount of filters, not counting the convert stage.
	pub fn len(&self) -> usize {
		self.filters.len()
	}

	#[must_use]
	/// Does this chain only convert?
	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	/// Make the convert stage produce `out`.
	///
	/// # Errors
	/// The convert stage can't bridge the chain's format and `out`.
	pub fn set_convert(&mut self, out: AudioFormat) -> Result<(), FilterError> {
		self.convert.set(out)
	}
}

impl Filter for FilterChain {
	fn open(&mut self, format: AudioFormat) -> Result<AudioFormat, FilterError> {
		let mut current = format;

		let mut failure = None;
		for (i, filter) in self.filters.iter_mut().enumerate() {
			match filter.open(current) {
				Ok(f) => current = f,
				Err(e) => {
					failure = Some((i, e));
					break;
				},
			}
		}

		if let Some((i, e)) = failure {
			self.filters[..i].iter_mut().rev().for_each(|f| f.close());
			return Err(e);
		}

		if let Err(e) = self.convert.open(current) {
			self.filters.iter_mut().rev().for_each(|f| f.close());
			return Err(e);
		}

		Ok(current)
	}

	fn close(&mut self) {
		self.convert.close();
		self.filters.iter_mut().rev().for_each(|f| f.close());
	}

	fn filter<'a>(&'a mut self, src: &'a [u8]) -> Result<&'a [u8], FilterError> {
		let Self { filters, convert } = self;

		let mut data = src;
		for filter in filters.iter_mut() {
			data = filter.filter(data)?;
		}

		convert.filter(data)
	}

	fn reset(&mut self) {
		self.filters.iter_mut().for_each(|f| f.reset());
		self.convert.reset();
	}
}

impl std::fmt::Debug for FilterChain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FilterChain")
			.field("filters", &self.filters.len())
			.field("convert", &self.convert)
			.finish()
	}
}
