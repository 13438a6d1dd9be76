/*!
# CD Stream: Streaming Tests
*/

use cdstream_core::{
	BuildError,
	CdSource,
	FixtureDevice,
	ImageDevice,
	SeekError,
	SeekTarget,
	SourceOptions,
	StreamError,
	StreamMode,
	TagKind,
	Track,
	TrackError,
	TrackTable,
};
use std::{
	io::Write,
	time::Duration,
};



/// # Open a Fixture.
fn fixture<I>(tracks: I, mode: StreamMode) -> CdSource<FixtureDevice>
where I: IntoIterator<Item = Track> {
	let mut src = CdSource::new(
		FixtureDevice::new(tracks),
		SourceOptions::default().with_mode(mode),
	);
	src.open(None).expect("Open failed.");
	src
}

/// # Two Tracks.
fn two(mode: StreamMode) -> CdSource<FixtureDevice> {
	fixture([Track::audio(1, 0, 999), Track::audio(2, 1000, 1999)], mode)
}



#[test]
fn t_track_for_sector() {
	for layout in [
		vec![(0, 0)],
		vec![(0, 9), (10, 10), (11, 500)],
		vec![(33, 74), (75, 149), (150, 150), (151, 999)],
	] {
		let mut table = TrackTable::new();
		for (i, &(start, end)) in layout.iter().enumerate() {
			table.add_track(Track::audio(i as u32 + 1, start, end)).expect("Add failed.");
		}

		let first = layout[0].0;
		let last = layout[layout.len() - 1].1;
		for s in first..=last {
			let idx = table.track_for_sector(s).expect("Lookup failed.");
			let (start, end) = layout[idx];
			assert!(start <= s && s <= end, "Sector {s} mapped to the wrong track.");
		}

		if let Some(before) = first.checked_sub(1) {
			assert_eq!(table.track_for_sector(before), Err(TrackError::NotFound(before)));
		}
		assert_eq!(table.track_for_sector(last + 1), Err(TrackError::NotFound(last + 1)));
	}
}

#[test]
fn t_build_errors() {
	let mut table = TrackTable::new();
	assert_eq!(
		table.add_track(Track::audio(1, 500, 100)),
		Err(BuildError::InvalidRange { start: 500, end: 100 }),
	);

	assert_eq!(table.add_track(Track::audio(1, 0, 999)), Ok(0));
	assert_eq!(
		table.add_track(Track::audio(2, 500, 1500)),
		Err(BuildError::Overlap { number: 2, existing: 1 }),
	);
	assert_eq!(table.len(), 1, "The overlapping track should not have been kept.");
	assert_eq!(table.get(0).map(Track::sector_range), Some(0..=999));
}

#[test]
fn t_whole_disc() {
	let mut src = two(StreamMode::WholeDisc);

	let mut changes = Vec::new();
	let mut last = None;
	for n in 0..1001 {
		let unit = src.read_next().expect("Read failed.");
		assert_eq!(unit.sector(), n, "Sectors should be delivered in order.");
		if let Some(change) = unit.track_change() {
			assert_eq!(change.index(), 1, "The change should point to the second track.");
			assert_eq!(change.tags().get(TagKind::TrackNumber), Some("2"));
			assert_eq!(change.tags().get(TagKind::Duration), Some("00:13:25"));
			changes.push((unit.sector(), change.number()));
		}
		last.replace(unit);
	}

	// The 1001st unit is sector 1000, the first of track two.
	let mut last = last.expect("Nothing was read.");
	assert_eq!(last.track_number(), 2);
	let change = last.take_track_change().expect("Missing track change.");
	assert_eq!(change.number(), 2);
	assert!(last.take_track_change().is_none(), "The change can only be taken once.");
	assert!(last.track_change().is_none(), "The change should be gone.");
	assert_eq!(src.current_track_index(), Some(1));
	assert_eq!(changes, [(1000, 2)], "There should have been exactly one change.");

	// Read out the rest.
	let mut total = 1001;
	loop {
		match src.read_next() {
			Ok(unit) => {
				assert!(unit.track_change().is_none(), "Unexpected track change.");
				total += 1;
			},
			Err(e) => {
				assert!(e.is_eos(), "Expected end-of-stream, got {e}.");
				break;
			},
		}
	}
	assert_eq!(total, 2000);
	assert_eq!(src.read_next(), Err(StreamError::EndOfStream), "EOS should stick.");
}

#[test]
fn t_whole_disc_skips_data() {
	let mut src = fixture(
		[
			Track::audio(1, 0, 9),
			Track::data(2, 10, 19),
			Track::audio(3, 20, 29),
			Track::data(4, 30, 39),
		],
		StreamMode::WholeDisc,
	);

	let mut sectors = Vec::new();
	let mut changes = 0;
	while let Ok(unit) = src.read_next() {
		sectors.push(unit.sector());
		if unit.track_change().is_some() { changes += 1; }
	}
	let expected: Vec<u32> = (0..10).chain(20..30).collect();
	assert_eq!(sectors, expected, "Data sectors should never be streamed.");
	assert_eq!(changes, 1);

	assert!(matches!(
		src.seek(SeekTarget::Sector(15)),
		Err(SeekError::SeekOutOfRange(15)),
	));
	assert_eq!(
		src.seek(SeekTarget::Track { number: 2, offset: 0 }),
		Err(SeekError::NoSuchTrack(TrackError::NoSuchTrack(2))),
	);
}

#[test]
fn t_per_track() {
	let mut src = two(StreamMode::PerTrack);
	src.select_track(1).expect("Select failed.");

	for n in 0..1000 {
		let unit = src.read_next().expect("Read failed.");
		assert_eq!(unit.sector(), n);
		assert!(unit.track_change().is_none(), "Per-track streams have no notifications.");
	}
	assert_eq!(src.read_next(), Err(StreamError::EndOfStream));
	assert_eq!(src.read_next(), Err(StreamError::EndOfStream), "EOS should stick.");
	assert_eq!(src.device().reads().len(), 1000, "Nothing past the end should be read.");

	src.select_track(2).expect("Select failed.");
	let unit = src.read_next().expect("Read failed.");
	assert_eq!(unit.sector(), 1000);
	assert_eq!(unit.track_number(), 2);
	assert_eq!(unit.timestamp(), Duration::ZERO, "Per-track timestamps restart.");

	assert_eq!(src.select_track(3), Err(TrackError::NoSuchTrack(3)));
}

#[test]
fn t_seek_range() {
	let mut src = two(StreamMode::PerTrack);

	for s in [0, 1, 999, 1000, 1500, 1999] {
		assert_eq!(src.seek(SeekTarget::Sector(s)), Ok(()), "Seek to {s} failed.");
		assert_eq!(src.read_next().map(|u| u.sector()), Ok(s));
	}
	for s in [2000, 5000, u32::MAX] {
		assert_eq!(
			src.seek(SeekTarget::Sector(s)),
			Err(SeekError::SeekOutOfRange(u64::from(s))),
		);
	}

	// Relative seeks stay inside the track.
	src.seek(SeekTarget::Sector(1000)).expect("Seek failed.");
	assert_eq!(src.seek(SeekTarget::Samples(588 * 999)), Ok(()));
	assert_eq!(src.pending_seek(), Some(1999));
	assert_eq!(src.seek(SeekTarget::Bytes(2352 * 1000)), Err(SeekError::SeekOutOfRange(2000)));
	assert_eq!(
		src.seek(SeekTarget::Track { number: 1, offset: 1000 }),
		Err(SeekError::SeekOutOfRange(1000)),
	);
}

#[test]
fn t_seek_idempotent() {
	let mut a = two(StreamMode::WholeDisc);
	let mut b = two(StreamMode::WholeDisc);

	let target = SeekTarget::Time(Duration::from_secs(20));
	a.seek(target).expect("Seek failed.");
	b.seek(target).expect("Seek failed.");
	b.seek(target).expect("Seek failed.");
	assert_eq!(a.pending_seek(), Some(1500));
	assert_eq!(a.pending_seek(), b.pending_seek());
	assert_eq!(a.read_next(), b.read_next());

	// The last seek wins.
	a.seek(SeekTarget::Sector(10)).expect("Seek failed.");
	a.seek(SeekTarget::Track { number: 2, offset: 5 }).expect("Seek failed.");
	let unit = a.read_next().expect("Read failed.");
	assert_eq!(unit.sector(), 1005);
	assert_eq!(unit.track_change().map(|c| c.number()), None, "No boundary was crossed.");

	a.seek(SeekTarget::Sector(3)).expect("Seek failed.");
	let unit = a.read_next().expect("Read failed.");
	assert_eq!(unit.track_change().map(|c| c.number()), Some(1), "Seeking back should announce track one.");
}

#[test]
fn t_image() {
	let mut file = tempfile::NamedTempFile::new().expect("Tempfile failed.");
	for s in 0_u8..6 {
		file.write_all(&[s; 2352]).expect("Write failed.");
	}
	file.flush().expect("Flush failed.");

	let dev = ImageDevice::new([Track::audio(1, 0, 2), Track::audio(2, 3, 5)])
		.with_disc_id(0x0300_0401)
		.with_disc_tag(TagKind::Title, "Scratch");
	let mut src = CdSource::new(dev, SourceOptions::default().with_mode(StreamMode::WholeDisc));
	let path = file.path().to_string_lossy().into_owned();
	src.open(Some(path.as_str())).expect("Open failed.");
	assert_eq!(src.disc().tags().get(TagKind::Title), Some("Scratch"));
	assert_eq!(src.disc().tags().get(TagKind::DiscId), Some("03000401"));

	let mut got = Vec::new();
	while let Ok(unit) = src.read_next() {
		assert_eq!(unit.data().len(), 2352);
		got.push(unit.data().as_bytes()[0]);
	}
	assert_eq!(got, [0, 1, 2, 3, 4, 5]);
}
