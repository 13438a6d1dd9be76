/*!
# CD Stream: Track Table
*/

use crate::{
	BuildError,
	CD_LEADOUT_LABEL,
	Sectors,
	Track,
	TrackError,
};
use std::fmt;



#[derive(Debug, Clone, Default)]
/// # Track Table.
///
/// The validated table of contents for a disc. Tracks are kept in the order
/// they were added (TOC order), alongside an index sorted by start sector for
/// fast lookups.
///
/// Tracks may not overlap, but gaps between them are tolerated; a sector in
/// a gap simply doesn't belong to anything.
///
/// Once frozen (the streaming engine does this when the first sector is
/// requested) the table can no longer be modified.
pub struct TrackTable {
	/// # Tracks (TOC Order).
	tracks: Vec<Track>,

	/// # Indices Sorted by Start Sector.
	by_start: Vec<usize>,

	/// # Audio Track Count.
	audio: usize,

	/// # Frozen?
	frozen: bool,
}

impl fmt::Display for TrackTable {
	/// # Summarize the Table.
	///
	/// This prints a simple table of contents with the inclusive sector
	/// range and length of each track.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		/// # Divider.
		const DIVIDER: &str = "----------------------------------------\n";

		f.write_str("##   FIRST    LAST  LENGTH\n")?;
		f.write_str(DIVIDER)?;

		for &idx in &self.by_start {
			let t = &self.tracks[idx];
			if t.is_audio() {
				writeln!(
					f,
					"{:02}  {:>6}  {:>6}  {}",
					t.number(),
					t.start_sector(),
					t.end_sector(),
					t.len(),
				)?;
			}
			else {
				writeln!(
					f,
					"{:02}  {:>6}  {:>6}  DATA TRACK",
					t.number(),
					t.start_sector(),
					t.end_sector(),
				)?;
			}
		}

		if let Some(last) = self.by_start.last().map(|&idx| &self.tracks[idx]) {
			writeln!(
				f,
				"{CD_LEADOUT_LABEL}  {:>6}                  LEAD-OUT",
				u64::from(last.end_sector()) + 1,
			)?;
		}

		f.write_str(DIVIDER)
	}
}

impl TrackTable {
	#[must_use]
	/// # New (Empty).
	pub const fn new() -> Self {
		Self {
			tracks: Vec::new(),
			by_start: Vec::new(),
			audio: 0,
			frozen: false,
		}
	}

	/// # Add Track.
	///
	/// Validate and append a track, returning its (zero-based) index.
	///
	/// ## Errors
	///
	/// This will return an error if the table is frozen, the track's range is
	/// inverted, or the range intersects a track that is already present. In
	/// all cases the table is left as it was.
	pub fn add_track(&mut self, track: Track) -> Result<usize, BuildError> {
		if self.frozen { return Err(BuildError::AlreadyStreaming); }

		let start = track.start_sector();
		let end = track.end_sector();
		if end < start {
			return Err(BuildError::InvalidRange { start, end });
		}

		// Since the existing tracks don't overlap each other, only the
		// neighbors on either side of the insertion point can possibly
		// collide with the new one.
		let pos = self.by_start.partition_point(|&idx| self.tracks[idx].start_sector() <= start);
		let neighbors = pos.checked_sub(1).into_iter().chain(Some(pos));
		for n in neighbors {
			if let Some(existing) = self.by_start.get(n).map(|&idx| &self.tracks[idx]) {
				if existing.overlaps(&track) {
					return Err(BuildError::Overlap {
						number: track.number(),
						existing: existing.number(),
					});
				}
			}
		}

		let idx = self.tracks.len();
		if track.is_audio() { self.audio += 1; }
		self.tracks.push(track);
		self.by_start.insert(pos, idx);
		Ok(idx)
	}

	/// # Clear.
	///
	/// Remove everything and unfreeze.
	pub fn clear(&mut self) {
		self.tracks.clear();
		self.by_start.clear();
		self.audio = 0;
		self.frozen = false;
	}

	/// # Freeze.
	pub fn freeze(&mut self) { self.frozen = true; }

	/// # Tracks (Mutable).
	///
	/// This is only used to decorate tracks with derived tags.
	pub(crate) fn tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
		self.tracks.iter_mut()
	}
}

impl TrackTable {
	#[must_use]
	/// # Number of Audio Tracks.
	pub const fn audio_len(&self) -> usize { self.audio }

	/// # Audio Tracks.
	///
	/// Iterate over the audio tracks, paired with their indices, in sector
	/// order.
	pub fn audio_tracks(&self) -> impl Iterator<Item = (usize, &Track)> {
		self.by_start.iter()
			.filter_map(|&idx| {
				let t = &self.tracks[idx];
				if t.is_audio() { Some((idx, t)) }
				else { None }
			})
	}

	#[must_use]
	/// # Audio Ordinal.
	///
	/// Return the one-based position of the track among the audio tracks,
	/// if it is one.
	pub fn audio_ordinal(&self, idx: usize) -> Option<u32> {
		self.audio_tracks()
			.position(|(i, _)| i == idx)
			.and_then(|pos| u32::try_from(pos + 1).ok())
	}

	#[must_use]
	/// # Disc End.
	///
	/// The last sector of the last audio track.
	pub fn disc_end(&self) -> Option<u32> {
		self.last_audio().map(|idx| self.tracks[idx].end_sector())
	}

	#[must_use]
	/// # Disc Length.
	///
	/// The number of sectors between the start of the first audio track and
	/// the end of the last, inclusive. (Any data tracks or gaps in the middle
	/// are counted too.) This saturates at `u32::MAX`.
	pub fn disc_len(&self) -> Sectors {
		match (self.disc_start(), self.disc_end()) {
			(Some(start), Some(end)) => Sectors::new(end.saturating_sub(start).saturating_add(1)),
			_ => Sectors::new(0),
		}
	}

	#[must_use]
	/// # Disc Start.
	///
	/// The first sector of the first audio track. Whole-disc streams begin
	/// here.
	pub fn disc_start(&self) -> Option<u32> {
		self.first_audio().map(|idx| self.tracks[idx].start_sector())
	}

	#[must_use]
	/// # First Audio Track Index.
	pub fn first_audio(&self) -> Option<usize> {
		self.audio_tracks().next().map(|(idx, _)| idx)
	}

	#[must_use]
	/// # First Sector.
	///
	/// The lowest sector of any track, audio or otherwise.
	pub fn first_sector(&self) -> Option<u32> {
		self.by_start.first().map(|&idx| self.tracks[idx].start_sector())
	}

	#[must_use]
	/// # Get Track.
	pub fn get(&self, idx: usize) -> Option<&Track> { self.tracks.get(idx) }

	#[must_use]
	/// # Is Contiguous?
	///
	/// Returns `true` if each track (in sector order) begins immediately
	/// after the previous one ends.
	pub fn is_contiguous(&self) -> bool {
		self.by_start.windows(2).all(|pair| {
			let a = &self.tracks[pair[0]];
			let b = &self.tracks[pair[1]];
			u64::from(a.end_sector()) + 1 == u64::from(b.start_sector())
		})
	}

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.tracks.is_empty() }

	#[must_use]
	/// # Is Frozen?
	pub const fn is_frozen(&self) -> bool { self.frozen }

	/// # Iterate (TOC Order).
	pub fn iter(&self) -> std::slice::Iter<'_, Track> { self.tracks.iter() }

	#[must_use]
	/// # Last Audio Track Index.
	pub fn last_audio(&self) -> Option<usize> {
		self.by_start.iter()
			.rev()
			.copied()
			.find(|&idx| self.tracks[idx].is_audio())
	}

	#[must_use]
	/// # Number of Tracks.
	///
	/// This includes data tracks.
	pub fn len(&self) -> usize { self.tracks.len() }

	#[must_use]
	/// # Next Audio Track.
	///
	/// Return the index of the first audio track starting at or after
	/// `sector`.
	pub fn next_audio(&self, sector: u32) -> Option<usize> {
		let pos = self.by_start.partition_point(|&idx| self.tracks[idx].start_sector() < sector);
		self.by_start[pos..].iter()
			.copied()
			.find(|&idx| self.tracks[idx].is_audio())
	}

	/// # Track by Number.
	///
	/// Map a TOC track number to its index. When `audio_only` is set, data
	/// tracks are treated as missing.
	///
	/// ## Errors
	///
	/// Returns `NoSuchTrack` if there is no matching track.
	pub fn track_by_number(&self, number: u32, audio_only: bool) -> Result<usize, TrackError> {
		self.tracks.iter()
			.position(|t| t.number() == number && (t.is_audio() || ! audio_only))
			.ok_or(TrackError::NoSuchTrack(number))
	}

	/// # Track for Sector.
	///
	/// Return the index of the track containing `sector`. This is a binary
	/// search over the start-sorted index, so works with or without gaps.
	///
	/// ## Errors
	///
	/// Returns `NotFound` if the sector falls in a gap, or before the first
	/// or after the last track.
	pub fn track_for_sector(&self, sector: u32) -> Result<usize, TrackError> {
		let pos = self.by_start.partition_point(|&idx| self.tracks[idx].start_sector() <= sector);
		pos.checked_sub(1)
			.map(|p| self.by_start[p])
			.filter(|&idx| self.tracks[idx].contains(sector))
			.ok_or(TrackError::NotFound(sector))
	}
}



#[cfg(test)]
mod test {
	use super::*;

	/// # Two-Track Table.
	fn two() -> TrackTable {
		let mut table = TrackTable::new();
		assert_eq!(table.add_track(Track::audio(1, 0, 999)), Ok(0));
		assert_eq!(table.add_track(Track::audio(2, 1000, 1999)), Ok(1));
		table
	}

	#[test]
	fn t_add_invalid_range() {
		let mut table = TrackTable::new();
		assert_eq!(
			table.add_track(Track::audio(1, 500, 100)),
			Err(BuildError::InvalidRange { start: 500, end: 100 }),
		);
		assert!(table.is_empty(), "Failed adds should not change anything.");

		// Single-sector tracks are fine.
		assert_eq!(table.add_track(Track::audio(1, 5, 5)), Ok(0));
	}

	#[test]
	fn t_add_overlap() {
		let mut table = TrackTable::new();
		table.add_track(Track::audio(1, 0, 999)).expect("Add failed.");
		assert_eq!(
			table.add_track(Track::audio(2, 500, 1500)),
			Err(BuildError::Overlap { number: 2, existing: 1 }),
		);
		assert_eq!(table.len(), 1, "The table should only hold the first track.");
		assert_eq!(table.get(0).map(Track::number), Some(1));

		// Insertion order shouldn't matter.
		let tracks = [
			Track::audio(1, 0, 99),
			Track::audio(2, 100, 199),
			Track::audio(3, 200, 299),
		];
		let orders: [[usize; 3]; 6] = [
			[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0],
		];
		for order in orders {
			let mut table = TrackTable::new();
			for i in order {
				table.add_track(tracks[i].clone()).expect("Add failed.");
			}
			assert!(table.is_contiguous(), "Order {order:?} should be contiguous.");

			// Anything touching an existing range should fail.
			for bad in [
				Track::audio(9, 50, 50),
				Track::audio(9, 99, 100),
				Track::audio(9, 250, 400),
				Track::audio(9, 0, 1000),
			] {
				assert!(
					matches!(table.add_track(bad), Err(BuildError::Overlap { .. })),
					"Overlap not caught for order {order:?}.",
				);
			}
			assert_eq!(table.len(), 3);
		}
	}

	#[test]
	fn t_frozen() {
		let mut table = two();
		table.freeze();
		assert!(table.is_frozen());
		assert_eq!(
			table.add_track(Track::audio(3, 2000, 2999)),
			Err(BuildError::AlreadyStreaming),
		);

		table.clear();
		assert!(! table.is_frozen());
		assert!(table.is_empty());
		assert_eq!(table.audio_len(), 0);
	}

	#[test]
	fn t_track_for_sector() {
		let table = two();
		for s in 0..2000 {
			let expected = if s < 1000 { 0 } else { 1 };
			assert_eq!(table.track_for_sector(s), Ok(expected), "Wrong track for {s}.");
		}
		assert_eq!(table.track_for_sector(2000), Err(TrackError::NotFound(2000)));
		assert_eq!(table.track_for_sector(u32::MAX), Err(TrackError::NotFound(u32::MAX)));

		// Gaps and late starts.
		let mut table = TrackTable::new();
		table.add_track(Track::audio(5, 300, 399)).expect("Add failed.");
		table.add_track(Track::audio(4, 100, 199)).expect("Add failed.");
		assert!(! table.is_contiguous());
		assert_eq!(table.track_for_sector(99), Err(TrackError::NotFound(99)));
		assert_eq!(table.track_for_sector(150), Ok(1));
		assert_eq!(table.track_for_sector(250), Err(TrackError::NotFound(250)));
		assert_eq!(table.track_for_sector(300), Ok(0));
		assert_eq!(table.first_sector(), Some(100));
	}

	#[test]
	fn t_track_by_number() {
		let mut table = TrackTable::new();
		table.add_track(Track::data(1, 0, 99)).expect("Add failed.");
		table.add_track(Track::audio(2, 100, 199)).expect("Add failed.");
		table.add_track(Track::audio(3, 200, 299)).expect("Add failed.");

		assert_eq!(table.len(), 3);
		assert_eq!(table.audio_len(), 2);
		assert_eq!(table.track_by_number(1, false), Ok(0));
		assert_eq!(table.track_by_number(1, true), Err(TrackError::NoSuchTrack(1)));
		assert_eq!(table.track_by_number(3, true), Ok(2));
		assert_eq!(table.track_by_number(4, false), Err(TrackError::NoSuchTrack(4)));
		assert_eq!(table.track_by_number(0, false), Err(TrackError::NoSuchTrack(0)));

		assert_eq!(table.audio_ordinal(0), None);
		assert_eq!(table.audio_ordinal(1), Some(1));
		assert_eq!(table.audio_ordinal(2), Some(2));
	}

	#[test]
	fn t_disc_range() {
		let mut table = TrackTable::new();
		assert_eq!(table.disc_start(), None);
		assert_eq!(table.disc_len(), Sectors::new(0));

		table.add_track(Track::audio(1, 0, 99)).expect("Add failed.");
		table.add_track(Track::audio(2, 100, 199)).expect("Add failed.");
		table.add_track(Track::data(3, 11_600, 20_000)).expect("Add failed.");

		assert_eq!(table.disc_start(), Some(0));
		assert_eq!(table.disc_end(), Some(199), "Trailing data should be ignored.");
		assert_eq!(table.disc_len(), Sectors::new(200));
		assert_eq!(table.next_audio(100), Some(1));
		assert_eq!(table.next_audio(101), None);
		assert_eq!(table.last_audio(), Some(1));
	}

	#[test]
	fn t_disc_range_max() {
		let mut table = TrackTable::new();
		assert_eq!(table.add_track(Track::audio(1, 0, u32::MAX)), Ok(0));
		assert_eq!(table.disc_len(), Sectors::new(u32::MAX), "The length should saturate.");
		assert_eq!(table.track_for_sector(u32::MAX), Ok(0));
		assert!(table.to_string().contains("AA  4294967296"), "Wrong leadout.");
	}

	#[test]
	fn t_display() {
		let mut table = two();
		table.add_track(Track::data(3, 2000, 2099)).expect("Add failed.");
		let out = table.to_string();
		assert!(out.contains("01       0     999  00:13:25"), "Missing track one:\n{out}");
		assert!(out.contains("02    1000    1999  00:13:25"), "Missing track two:\n{out}");
		assert!(out.contains("03    2000    2099  DATA TRACK"), "Missing data track:\n{out}");
		assert!(out.contains("AA    2100"), "Missing leadout:\n{out}");
	}
}
