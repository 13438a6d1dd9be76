/*!
# CD Stream: Streaming Engine
*/

use crate::{
	BuildError,
	CddaUri,
	OpenError,
	SectorBuffer,
	SectorDevice,
	Sectors,
	SeekError,
	SourceOptions,
	StreamError,
	StreamMode,
	TagKind,
	Tags,
	TocBuilder,
	Track,
	TrackError,
	TrackTable,
};
use log::{
	debug,
	info,
	trace,
	warn,
};
use std::time::Duration;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Source State.
pub enum SourceState {
	#[default]
	/// # No Device Session.
	Closed,

	/// # Device Opened, TOC Being Read.
	Opening,

	/// # TOC Complete, Nothing Read Yet.
	Ready,

	/// # Sectors Are Being Delivered.
	Streaming,
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Disc Information.
///
/// Disc-level identifiers and tags, as reported by the device (or forced via
/// [`SourceOptions::with_disc_id`]). How the identifiers are derived is up to
/// the device.
pub struct DiscInfo {
	id: Option<u32>,
	vendor_id: Option<String>,
	tags: Tags,
}

impl DiscInfo {
	#[must_use]
	/// # Disc ID.
	pub const fn id(&self) -> Option<u32> { self.id }

	#[must_use]
	/// # Tags.
	pub const fn tags(&self) -> &Tags { &self.tags }

	#[must_use]
	/// # Vendor Disc ID.
	pub fn vendor_id(&self) -> Option<&str> { self.vendor_id.as_deref() }
}

impl DiscInfo {
	/// # Clear.
	fn clear(&mut self) {
		self.id = None;
		self.vendor_id = None;
		self.tags = Tags::new();
	}

	/// # Set ID.
	pub(crate) fn set_id(&mut self, id: u32) { self.id = Some(id); }

	/// # Set Vendor ID.
	pub(crate) fn set_vendor_id(&mut self, id: String) {
		self.vendor_id = Some(id).filter(|v| ! v.trim().is_empty());
	}

	/// # Tags (Mutable).
	pub(crate) fn tags_mut(&mut self) -> &mut Tags { &mut self.tags }
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Track Change.
///
/// In whole-disc mode, this accompanies the first sector delivered from a
/// new track.
pub struct TrackChange {
	index: usize,
	number: u32,
	tags: Tags,
}

impl TrackChange {
	/// # New.
	fn new(index: usize, track: &Track) -> Self {
		Self {
			index,
			number: track.number(),
			tags: track.tags().clone(),
		}
	}

	#[must_use]
	/// # Track Index.
	pub const fn index(&self) -> usize { self.index }

	#[must_use]
	/// # Track Number.
	pub const fn number(&self) -> u32 { self.number }

	#[must_use]
	/// # Track Tags.
	pub const fn tags(&self) -> &Tags { &self.tags }
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Sector Unit.
///
/// One delivered sector, along with everything needed to place it: its
/// absolute address, the track it belongs to, and its offset into the
/// current segment (the track in per-track mode, the disc in whole-disc
/// mode).
pub struct SectorUnit {
	data: SectorBuffer,
	sector: u32,
	track: usize,
	track_number: u32,
	offset: Sectors,
	change: Option<TrackChange>,
}

impl SectorUnit {
	#[must_use]
	/// # Byte Offset.
	///
	/// The position of the first byte within the segment.
	pub const fn byte_offset(&self) -> u64 { self.offset.bytes() }

	#[must_use]
	/// # Data.
	pub const fn data(&self) -> &SectorBuffer { &self.data }

	#[must_use]
	/// # Duration.
	pub const fn duration(&self) -> Duration { Sectors::new(1).duration() }

	#[must_use]
	/// # Into Data.
	pub fn into_data(self) -> SectorBuffer { self.data }

	#[must_use]
	/// # Sample Offset.
	///
	/// The position of the first sample within the segment.
	pub const fn sample_offset(&self) -> u64 { self.offset.samples() }

	#[must_use]
	/// # Absolute Sector.
	pub const fn sector(&self) -> u32 { self.sector }

	#[must_use]
	/// # Segment Offset.
	pub const fn segment_offset(&self) -> Sectors { self.offset }

	/// # Take Track Change.
	pub fn take_track_change(&mut self) -> Option<TrackChange> { self.change.take() }

	#[must_use]
	/// # Timestamp.
	///
	/// The start time of the sector within the segment.
	pub const fn timestamp(&self) -> Duration { self.offset.duration() }

	#[must_use]
	/// # Track Change.
	pub const fn track_change(&self) -> Option<&TrackChange> { self.change.as_ref() }

	#[must_use]
	/// # Track Index.
	pub const fn track_index(&self) -> usize { self.track }

	#[must_use]
	/// # Track Number.
	pub const fn track_number(&self) -> u32 { self.track_number }
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Seek Target.
pub enum SeekTarget {
	/// # Absolute Sector.
	Sector(u32),

	/// # Sector Offset Within a (TOC-Numbered, Audio) Track.
	Track {
		/// # Track Number.
		number: u32,

		/// # Offset.
		offset: u32,
	},

	/// # Bytes From the Segment Start.
	Bytes(u64),

	/// # Samples From the Segment Start.
	Samples(u64),

	/// # Time From the Segment Start.
	Time(Duration),
}



#[derive(Debug, Clone, Copy, Default)]
/// # Stream Position.
struct Position {
	/// # Current Track Index.
	current: Option<usize>,

	/// # Track Index of the Last Delivered Sector.
	previous: Option<usize>,

	/// # Next Sector to Deliver.
	sector: u64,

	/// # Pending Seek.
	seek: Option<u32>,
}



#[derive(Debug)]
/// # CD Source.
///
/// The streaming engine. It owns the table of contents and the read
/// position, and drives a [`SectorDevice`] to turn them into an ordered,
/// gap-free sequence of sectors.
///
/// The lifecycle goes `Closed → Opening → Ready → Streaming → Closed`:
/// [`CdSource::open`] connects to the device and reads its table of
/// contents, the first [`CdSource::read_next`] freezes the table and starts
/// streaming, and [`CdSource::close`] tears it all down again. Dropping the
/// source closes it too.
///
/// Access is strictly sequential; nothing here is meant to be shared across
/// threads mid-read.
pub struct CdSource<D: SectorDevice> {
	/// # Device.
	device: D,

	/// # Options.
	opts: SourceOptions,

	/// # State.
	state: SourceState,

	/// # Opened Device Identifier.
	session: Option<String>,

	/// # Table of Contents.
	table: TrackTable,

	/// # Disc Information.
	disc: DiscInfo,

	/// # Position.
	pos: Position,
}

impl<D: SectorDevice> Drop for CdSource<D> {
	fn drop(&mut self) { self.close(); }
}

impl<D: SectorDevice> CdSource<D> {
	#[must_use]
	/// # New.
	pub const fn new(device: D, opts: SourceOptions) -> Self {
		Self {
			device,
			opts,
			state: SourceState::Closed,
			session: None,
			table: TrackTable::new(),
			disc: DiscInfo {
				id: None,
				vendor_id: None,
				tags: Tags::new(),
			},
			pos: Position {
				current: None,
				previous: None,
				sector: 0,
				seek: None,
			},
		}
	}

	/// # Open.
	///
	/// Connect to the device and read its table of contents. The device
	/// identifier is `device`, or failing that the one from the options, or
	/// failing that the device's own default.
	///
	/// If a starting track was configured, it is selected straight away.
	///
	/// ## Errors
	///
	/// This will return an error if a session is already open, no device can
	/// be determined, the device can't be opened, its table of contents is
	/// bad or has no audio tracks, or the starting track doesn't exist. In
	/// all cases the source is left closed.
	pub fn open(&mut self, device: Option<&str>) -> Result<(), OpenError> {
		if self.state != SourceState::Closed { return Err(OpenError::AlreadyOpen); }

		let id = device.filter(|d| ! d.is_empty())
			.or_else(|| self.opts.device())
			.map(str::to_owned)
			.or_else(|| self.device.default_device())
			.ok_or(OpenError::NoDevice)?;

		self.reset();
		self.state = SourceState::Opening;
		if let Err(e) = self.device.open(&id) {
			warn!("Unable to open {id}: {e}");
			self.state = SourceState::Closed;
			return Err(OpenError::Device(e));
		}
		self.session = Some(id);

		if let Err(e) = self.open_toc() {
			warn!("Unable to read the table of contents: {e}");
			self.close();
			return Err(e);
		}

		self.state = SourceState::Ready;
		if let Some(n) = self.opts.track() {
			if let Err(e) = self.select_track(n) {
				self.close();
				return Err(OpenError::Track(e));
			}
		}

		info!(
			"Opened {}: {} track(s), {} audio, {} sectors.",
			self.session.as_deref().unwrap_or_default(),
			self.table.len(),
			self.table.audio_len(),
			self.table.disc_len().sectors(),
		);
		Ok(())
	}

	/// # Open: Read TOC.
	fn open_toc(&mut self) -> Result<(), OpenError> {
		let mut toc = TocBuilder::new(&mut self.table, &mut self.disc);
		self.device.read_toc(&mut toc)?;

		if self.table.audio_len() == 0 { return Err(BuildError::EmptyDisc.into()); }
		if ! self.table.is_contiguous() {
			warn!("The table of contents has gaps; sectors in them cannot be streamed.");
		}

		if let Some(id) = self.opts.disc_id() { self.disc.set_id(id); }
		self.decorate();
		Ok(())
	}

	/// # Close.
	///
	/// Close the device and discard the table of contents. This is safe to
	/// call at any time, including mid-stream or when already closed.
	pub fn close(&mut self) {
		if self.state == SourceState::Closed { return; }

		self.device.close();
		if let Some(id) = self.session.as_deref() { info!("Closed {id}."); }
		self.reset();
		self.state = SourceState::Closed;
	}

	/// # Reset.
	fn reset(&mut self) {
		self.session = None;
		self.table.clear();
		self.disc.clear();
		self.pos = Position::default();
	}

	/// # Add Track.
	///
	/// Add a track to the table of contents directly. This is only possible
	/// after the device is open and before streaming begins.
	///
	/// ## Errors
	///
	/// This will return an error if there is no session, streaming has
	/// started, or the track is invalid or overlaps another.
	pub fn add_track(&mut self, track: Track) -> Result<usize, BuildError> {
		match self.state {
			SourceState::Closed => Err(BuildError::NotOpen),
			SourceState::Streaming => Err(BuildError::AlreadyStreaming),
			SourceState::Opening | SourceState::Ready => {
				let idx = self.table.add_track(track)?;
				self.decorate();
				Ok(idx)
			},
		}
	}

	/// # Decorate.
	///
	/// Add the tags derived from the table of contents to the disc and each
	/// audio track.
	fn decorate(&mut self) {
		let count = self.table.audio_len().to_string();
		let audio: Vec<bool> = self.table.iter().map(Track::is_audio).collect();
		for (t, is_audio) in self.table.tracks_mut().zip(audio) {
			if ! is_audio { continue; }
			let number = t.number().to_string();
			let len = t.len().to_string();
			let tags = t.tags_mut();
			tags.insert(TagKind::TrackNumber, number);
			tags.insert(TagKind::TrackCount, count.as_str());
			tags.insert(TagKind::Duration, len);
		}

		let id = self.disc.id();
		let tags = self.disc.tags_mut();
		tags.insert(TagKind::TrackCount, count);
		if let Some(id) = id { tags.insert(TagKind::DiscId, format!("{id:08x}")); }
		if let Some(v) = self.disc.vendor_id.clone() {
			self.disc.tags_mut().insert(TagKind::VendorDiscId, v);
		}
	}
}

impl<D: SectorDevice> CdSource<D> {
	/// # Set Mode.
	///
	/// ## Errors
	///
	/// The mode cannot be changed once streaming has begun.
	pub fn set_mode(&mut self, mode: StreamMode) -> Result<(), StreamError> {
		if self.state == SourceState::Streaming && mode != self.opts.mode() {
			return Err(StreamError::ModeLocked);
		}
		debug!("Stream mode: {mode}.");
		self.opts.set_mode(mode);
		Ok(())
	}

	/// # Select Track.
	///
	/// Seek to the start of the audio track with the given TOC number. In
	/// per-track mode, this also makes it the track being streamed.
	///
	/// When no session is open, the number is simply remembered and applied
	/// (and validated) on the next [`CdSource::open`].
	///
	/// ## Errors
	///
	/// Returns `NoSuchTrack` if there is no such audio track.
	pub fn select_track(&mut self, number: u32) -> Result<(), TrackError> {
		if matches!(self.state, SourceState::Closed | SourceState::Opening) {
			debug!("Track #{number} will be selected on open.");
			self.opts.set_track(Some(number));
			return Ok(());
		}

		let idx = self.table.track_by_number(number, true)?;
		let start = self.table.get(idx)
			.map(Track::start_sector)
			.ok_or(TrackError::NoSuchTrack(number))?;

		debug!("Selected track #{number}.");
		self.opts.set_track(Some(number));
		self.pos.seek = Some(start);
		Ok(())
	}

	/// # Select URI.
	///
	/// Select the track (and, if no session is open, the device) from a
	/// `cdda://[device#]track` URI.
	///
	/// ## Errors
	///
	/// This will return an error if the URI is malformed, names a different
	/// device than the open one, or names a track that doesn't exist.
	pub fn select_uri(&mut self, uri: &str) -> Result<(), TrackError> {
		let parsed = CddaUri::parse(uri)?;
		if let Some(dev) = parsed.device() {
			match self.session.as_deref() {
				None => { self.opts.set_device(Some(dev.to_owned())); },
				Some(open) if open == dev => {},
				Some(_) => return Err(TrackError::InvalidUri(uri.trim().to_owned())),
			}
		}
		self.select_track(parsed.track())
	}

	/// # Seek.
	///
	/// Queue up a new position for the next read. Sector and track targets
	/// are absolute; byte, sample, and time targets are relative to the start
	/// of the current segment.
	///
	/// Only one seek can be pending at a time; a new one simply replaces the
	/// old.
	///
	/// ## Errors
	///
	/// This will return an error if no session is open, the track doesn't
	/// exist, or the resulting sector isn't streamable (in a data track, a
	/// gap, or outside the disc; relative targets in per-track mode must also
	/// stay inside the current track).
	pub fn seek(&mut self, target: SeekTarget) -> Result<(), SeekError> {
		if ! matches!(self.state, SourceState::Ready | SourceState::Streaming) {
			return Err(SeekError::NotReady);
		}

		let sector = match target {
			SeekTarget::Sector(s) => u64::from(s),
			SeekTarget::Track { number, offset } => {
				let idx = self.table.track_by_number(number, true)?;
				let track = self.track(idx)?;
				let sector = u64::from(track.start_sector()) + u64::from(offset);
				if offset >= track.len().sectors() {
					return Err(SeekError::SeekOutOfRange(sector));
				}
				sector
			},
			SeekTarget::Bytes(n) => self.relative_sector(Sectors::from_bytes(n))?,
			SeekTarget::Samples(n) => self.relative_sector(Sectors::from_samples(n))?,
			SeekTarget::Time(n) => self.relative_sector(Sectors::from_duration(n))?,
		};

		let sector = u32::try_from(sector).map_err(|_| SeekError::SeekOutOfRange(sector))?;
		self.resolve(sector)?;

		debug!("Seek to sector {sector} ({target:?}).");
		self.pos.seek = Some(sector);
		Ok(())
	}

	/// # Relative Sector.
	///
	/// Convert an offset from the segment start into an absolute sector.
	fn relative_sector(&self, offset: Sectors) -> Result<u64, SeekError> {
		let idx = self.segment_track().ok_or(SeekError::NotReady)?;
		let start = self.segment_start(idx);
		let sector = u64::from(start) + u64::from(offset.sectors());

		if self.opts.mode() == StreamMode::PerTrack {
			let end = self.track(idx).map(Track::end_sector)?;
			if u64::from(end) < sector { return Err(SeekError::SeekOutOfRange(sector)); }
		}

		Ok(sector)
	}

	/// # Resolve Sector.
	///
	/// Return the index of the audio track containing `sector`.
	fn resolve(&self, sector: u32) -> Result<usize, SeekError> {
		let out = SeekError::SeekOutOfRange(u64::from(sector));
		let idx = self.table.track_for_sector(sector).map_err(|_| out.clone())?;
		if self.table.get(idx).is_some_and(Track::is_audio) { Ok(idx) }
		else { Err(out) }
	}

	/// # Track by Index.
	fn track(&self, idx: usize) -> Result<&Track, SeekError> {
		self.table.get(idx).ok_or(SeekError::NotReady)
	}
}

impl<D: SectorDevice> CdSource<D> {
	/// # Read Next Sector.
	///
	/// Deliver the next sector of the stream:
	///
	/// 1. Apply any pending seek.
	/// 2. Check for the end of the segment. In per-track mode that's the end
	///    of the current track; in whole-disc mode, the end of the last audio
	///    track, with boundary crossings handled along the way.
	/// 3. Read the sector from the device.
	/// 4. Advance.
	///
	/// In whole-disc mode, the first sector read from a different track than
	/// the previous one carries a [`TrackChange`].
	///
	/// ## Errors
	///
	/// Returns `EndOfStream` when the segment is exhausted, `NotReady` if no
	/// session is open, `Seek` if a pending seek can't be resolved, and
	/// `DeviceReadFailed` if the device chokes. Read failures leave the
	/// position as-is, so the same sector will be tried again next time.
	pub fn read_next(&mut self) -> Result<SectorUnit, StreamError> {
		match self.state {
			SourceState::Closed | SourceState::Opening => return Err(StreamError::NotReady),
			SourceState::Ready => self.start()?,
			SourceState::Streaming => {},
		}

		// Seek first.
		if let Some(sector) = self.pos.seek.take() {
			let idx = self.resolve(sector)?;
			self.pos.current = Some(idx);
			self.pos.sector = u64::from(sector);
		}

		let mut idx = self.pos.current.ok_or(StreamError::NotReady)?;
		let mut track = self.table.get(idx).ok_or(StreamError::NotReady)?;

		// End of stream?
		match self.opts.mode() {
			StreamMode::PerTrack =>
				if u64::from(track.end_sector()) < self.pos.sector {
					return Err(StreamError::EndOfStream);
				},
			StreamMode::WholeDisc => {
				let end = self.table.disc_end().ok_or(StreamError::NotReady)?;
				if u64::from(end) < self.pos.sector {
					return Err(StreamError::EndOfStream);
				}

				// Cross into the next audio track if we've left this one,
				// jumping over anything that isn't audio.
				if u64::from(track.end_sector()) < self.pos.sector {
					let sector = u32::try_from(self.pos.sector)
						.map_err(|_| StreamError::EndOfStream)?;
					idx = self.table.next_audio(sector).ok_or(StreamError::EndOfStream)?;
					track = self.table.get(idx).ok_or(StreamError::NotReady)?;
					self.pos.current = Some(idx);
					self.pos.sector = u64::from(track.start_sector());
				}
			},
		}

		// Read it!
		let sector = u32::try_from(self.pos.sector).map_err(|_| StreamError::EndOfStream)?;
		let first = self.table.first_sector().unwrap_or_default();
		let lba = self.opts.correction().device_sector(sector, first);
		let data = self.device.read_sector(lba).map_err(|e| {
			warn!("Unable to read sector {sector} (device {lba}): {e}");
			StreamError::DeviceReadFailed(e)
		})?;

		// Announce track changes.
		let change =
			if
				self.opts.mode() == StreamMode::WholeDisc &&
				self.pos.previous.is_some_and(|prev| prev != idx)
			{
				debug!("Entered track #{} at sector {sector}.", track.number());
				Some(TrackChange::new(idx, track))
			}
			else { None };

		let unit = SectorUnit {
			data,
			sector,
			track: idx,
			track_number: track.number(),
			offset: Sectors::new(sector.saturating_sub(self.segment_start(idx))),
			change,
		};
		trace!("Read sector {sector} (track #{}).", unit.track_number);

		self.pos.previous = Some(idx);
		self.pos.sector += 1;
		Ok(unit)
	}

	/// # Start Streaming.
	///
	/// Freeze the table and establish the initial position, unless a seek
	/// is already lined up.
	fn start(&mut self) -> Result<(), StreamError> {
		self.table.freeze();
		self.decorate();

		if self.pos.seek.is_none() {
			let idx = self.table.first_audio().ok_or(StreamError::NotReady)?;
			let start = self.table.get(idx).map(Track::start_sector).ok_or(StreamError::NotReady)?;
			self.pos.current = Some(idx);
			self.pos.sector = u64::from(start);
		}

		debug!("Streaming started ({}).", self.opts.mode());
		self.state = SourceState::Streaming;
		Ok(())
	}

	/// # Segment Track.
	///
	/// Return the index of the track the current (or pending) position
	/// belongs to, falling back to the selected or first audio track.
	fn segment_track(&self) -> Option<usize> {
		self.pos.seek
			.and_then(|s| self.table.track_for_sector(s).ok())
			.or(self.pos.current)
			.or_else(|| self.opts.track().and_then(|n| self.table.track_by_number(n, true).ok()))
			.or_else(|| self.table.first_audio())
	}

	/// # Segment Start.
	fn segment_start(&self, idx: usize) -> u32 {
		match self.opts.mode() {
			StreamMode::PerTrack => self.table.get(idx).map_or(0, Track::start_sector),
			StreamMode::WholeDisc => self.table.disc_start().unwrap_or_default(),
		}
	}
}

impl<D: SectorDevice> CdSource<D> {
	#[must_use]
	/// # Current Track.
	pub fn current_track(&self) -> Option<&Track> {
		self.pos.current.and_then(|idx| self.table.get(idx))
	}

	#[must_use]
	/// # Current Track Index.
	pub const fn current_track_index(&self) -> Option<usize> { self.pos.current }

	#[must_use]
	/// # Default Device.
	pub fn default_device(&self) -> Option<String> { self.device.default_device() }

	#[must_use]
	/// # Device.
	pub const fn device(&self) -> &D { &self.device }

	/// # Device (Mutable).
	pub fn device_mut(&mut self) -> &mut D { &mut self.device }

	#[must_use]
	/// # Device Identifier.
	///
	/// The identifier of the open device, if any.
	pub fn device_id(&self) -> Option<&str> { self.session.as_deref() }

	#[must_use]
	/// # Disc Information.
	pub const fn disc(&self) -> &DiscInfo { &self.disc }

	#[must_use]
	/// # Duration.
	///
	/// The length of the current segment: the current (or selected) track
	/// in per-track mode, or the whole disc.
	pub fn duration(&self) -> Option<Sectors> {
		if ! self.is_open() { return None; }
		match self.opts.mode() {
			StreamMode::PerTrack => self.segment_track()
				.and_then(|idx| self.table.get(idx))
				.map(Track::len),
			StreamMode::WholeDisc => Some(self.table.disc_len()),
		}
	}

	#[must_use]
	/// # Is Open?
	pub const fn is_open(&self) -> bool {
		matches!(self.state, SourceState::Ready | SourceState::Streaming)
	}

	#[must_use]
	/// # Mode.
	pub const fn mode(&self) -> StreamMode { self.opts.mode() }

	#[must_use]
	/// # Next Sector.
	///
	/// The sector the next read will deliver, as things stand (a pending
	/// seek takes priority). This is `None` before streaming starts.
	pub fn next_sector(&self) -> Option<u64> {
		if let Some(s) = self.pos.seek { Some(u64::from(s)) }
		else if self.state == SourceState::Streaming { Some(self.pos.sector) }
		else { None }
	}

	#[must_use]
	/// # Options.
	pub const fn options(&self) -> &SourceOptions { &self.opts }

	#[must_use]
	/// # Pending Seek.
	pub const fn pending_seek(&self) -> Option<u32> { self.pos.seek }

	#[must_use]
	/// # Position.
	///
	/// The offset of the next sector from the start of the current segment.
	pub fn position(&self) -> Option<Sectors> {
		if ! self.is_open() { return None; }
		let idx = self.segment_track()?;
		let start = u64::from(self.segment_start(idx));
		let next = self.next_sector().unwrap_or(start);
		u32::try_from(next.saturating_sub(start)).ok().map(Sectors::new)
	}

	#[must_use]
	/// # Probe Devices.
	pub fn probe_devices(&self) -> Vec<String> { self.device.probe_devices() }

	#[must_use]
	/// # State.
	pub const fn state(&self) -> SourceState { self.state }

	#[must_use]
	/// # Table of Contents.
	pub const fn table(&self) -> &TrackTable { &self.table }

	#[must_use]
	/// # URI.
	///
	/// Return the `cdda://` URI for the current position or selection.
	pub fn uri(&self) -> CddaUri {
		let number = self.current_track()
			.map(Track::number)
			.or_else(|| self.opts.track())
			.unwrap_or(1);
		let device = self.session.as_deref().or_else(|| self.opts.device());
		CddaUri::new(device.map(str::to_owned), number)
	}
}
