/*!
# CD Stream: Track
*/

use crate::{
	Sectors,
	Tags,
};
use std::{
	ops::RangeInclusive,
	time::Duration,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Track.
///
/// A single table of contents entry. Sector numbers are inclusive on both
/// ends and exclude the lead-in.
///
/// Nothing is validated here; that happens when the track is added to a
/// [`TrackTable`](crate::TrackTable).
pub struct Track {
	audio: bool,
	number: u32,
	start: u32,
	end: u32,
	tags: Tags,
}

impl Track {
	#[must_use]
	/// # New.
	pub const fn new(number: u32, start: u32, end: u32, audio: bool) -> Self {
		Self {
			audio,
			number,
			start,
			end,
			tags: Tags::new(),
		}
	}

	#[must_use]
	/// # New Audio Track.
	pub const fn audio(number: u32, start: u32, end: u32) -> Self {
		Self::new(number, start, end, true)
	}

	#[must_use]
	/// # New Data Track.
	pub const fn data(number: u32, start: u32, end: u32) -> Self {
		Self::new(number, start, end, false)
	}

	#[must_use]
	/// # With Tags.
	pub fn with_tags(self, tags: Tags) -> Self {
		Self {
			tags,
			..self
		}
	}
}

impl Track {
	#[must_use]
	/// # Contains Sector?
	pub const fn contains(&self, sector: u32) -> bool {
		self.start <= sector && sector <= self.end
	}

	#[must_use]
	/// # Duration.
	pub const fn duration(&self) -> Duration { self.len().duration() }

	#[must_use]
	/// # End Sector (Inclusive).
	pub const fn end_sector(&self) -> u32 { self.end }

	#[must_use]
	/// # Is Audio?
	pub const fn is_audio(&self) -> bool { self.audio }

	#[must_use]
	/// # Length.
	///
	/// Return the total number of sectors in the track. (An inverted range
	/// is treated as empty; a range spanning every possible sector saturates
	/// at `u32::MAX`.)
	pub const fn len(&self) -> Sectors {
		if self.end < self.start { Sectors::new(0) }
		else { Sectors::new((self.end - self.start).saturating_add(1)) }
	}

	#[must_use]
	/// # Number.
	///
	/// This is the number reported by the table of contents; it does not
	/// necessarily start at one.
	pub const fn number(&self) -> u32 { self.number }

	#[must_use]
	/// # Overlaps?
	pub const fn overlaps(&self, other: &Self) -> bool {
		self.start <= other.end && other.start <= self.end
	}

	#[must_use]
	/// # Sector Range.
	pub const fn sector_range(&self) -> RangeInclusive<u32> { self.start..=self.end }

	#[must_use]
	/// # Start Sector.
	pub const fn start_sector(&self) -> u32 { self.start }

	#[must_use]
	/// # Tags.
	pub const fn tags(&self) -> &Tags { &self.tags }

	/// # Tags (Mutable).
	pub(crate) fn tags_mut(&mut self) -> &mut Tags { &mut self.tags }
}
