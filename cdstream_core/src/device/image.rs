/*!
# CD Stream: Image Device
*/

use cdtoc::{
	Toc,
	TocKind,
};
use crate::{
	BYTES_PER_SECTOR,
	DeviceError,
	OpenError,
	SectorBuffer,
	SectorDevice,
	TagKind,
	Tags,
	TocBuilder,
	Track,
};
use std::{
	fs::File,
	io::{
		Read,
		Seek,
		SeekFrom,
	},
	path::Path,
};



#[derive(Debug)]
/// # Image Device.
///
/// A raw CD-DA disc image: a flat file of 2352-byte sectors, with sector zero
/// at byte zero. Images don't carry their own table of contents, so one has
/// to be supplied, either as a list of tracks or as a CDTOC string (see
/// [`ImageDevice::from_cdtoc`]).
pub struct ImageDevice {
	/// # Table of Contents.
	tracks: Vec<Track>,

	/// # Disc ID.
	disc_id: Option<u32>,

	/// # Disc Tags.
	tags: Tags,

	/// # Open File.
	file: Option<File>,
}

impl ImageDevice {
	#[must_use]
	/// # New.
	pub fn new<I>(tracks: I) -> Self
	where I: IntoIterator<Item = Track> {
		Self {
			tracks: tracks.into_iter().collect(),
			disc_id: None,
			tags: Tags::new(),
			file: None,
		}
	}

	/// # From CDTOC.
	///
	/// Build the table of contents from a CDTOC string, like
	/// `4+96+2D2B+6256+B327+D84A`. Parsing and validation are handled by
	/// [`cdtoc::Toc`], including the `X` data-track prefix and the audio
	/// cut-off for CD-Extra discs.
	///
	/// Tracks are numbered in disc order, data tracks included. Sectors are
	/// normalized, so the first track of a typical audio CD starts at zero.
	///
	/// ```
	/// use cdstream_core::ImageDevice;
	///
	/// let dev = ImageDevice::from_cdtoc("4+96+2D2B+6256+B327+D84A").unwrap();
	/// assert_eq!(dev.tracks().len(), 4);
	/// assert_eq!(dev.tracks()[0].start_sector(), 0);
	/// assert_eq!(dev.tracks()[0].end_sector(), 11_412);
	/// ```
	///
	/// ## Errors
	///
	/// This will return an error if the string can't be parsed.
	pub fn from_cdtoc(src: &str) -> Result<Self, DeviceError> {
		let toc = Toc::from_cdtoc(src).map_err(|e| DeviceError::Toc(e.to_string()))?;
		let mut ranges: Vec<(u32, u32, bool)> = Vec::new();

		// Leading data track.
		if matches!(toc.kind(), TocKind::DataFirst) {
			if let Some(start) = toc.data_sector_normalized() {
				let end = toc.audio_leadin_normalized().saturating_sub(1);
				ranges.push((start, end, false));
			}
		}

		// The audio tracks.
		for t in toc.audio_tracks() {
			let rng = t.sector_range_normalized();
			ranges.push((rng.start, rng.end.saturating_sub(1), true));
		}

		// Trailing data track.
		if matches!(toc.kind(), TocKind::CDExtra) {
			if let Some(start) = toc.data_sector_normalized() {
				let end = toc.leadout_normalized().saturating_sub(1);
				ranges.push((start, end, false));
			}
		}

		Ok(Self::new(
			(1..).zip(ranges).map(|(n, (start, end, audio))| Track::new(n, start, end, audio))
		))
	}

	#[must_use]
	/// # With Disc ID.
	pub fn with_disc_id(self, id: u32) -> Self {
		Self {
			disc_id: Some(id),
			..self
		}
	}

	#[must_use]
	/// # With Disc Tag.
	pub fn with_disc_tag<S>(mut self, kind: TagKind, value: S) -> Self
	where S: Into<String> {
		self.tags.insert(kind, value);
		self
	}

	#[must_use]
	/// # Tracks.
	pub fn tracks(&self) -> &[Track] { &self.tracks }
}

impl SectorDevice for ImageDevice {
	fn open(&mut self, device: &str) -> Result<(), DeviceError> {
		let path = Path::new(device);
		if ! path.is_file() {
			return Err(DeviceError::Missing(device.to_owned()));
		}

		let file = File::open(path)
			.map_err(|_| DeviceError::Open(device.to_owned()))?;
		self.file.replace(file);
		Ok(())
	}

	fn read_toc(&mut self, toc: &mut TocBuilder<'_>) -> Result<(), OpenError> {
		for t in &self.tracks { toc.add_track(t.clone())?; }
		if let Some(id) = self.disc_id { toc.set_disc_id(id); }
		for (k, v) in self.tags.iter() { toc.set_disc_tag(k, v); }
		Ok(())
	}

	fn close(&mut self) { self.file.take(); }

	fn read_sector(&mut self, sector: i32) -> Result<SectorBuffer, DeviceError> {
		let file = self.file.as_mut().ok_or(DeviceError::NotOpen)?;

		// There's nothing before the start.
		let Ok(pos) = u64::try_from(sector) else { return Ok(SectorBuffer::silence()); };

		let mut buf = vec![0_u8; usize::from(BYTES_PER_SECTOR)];
		file.seek(SeekFrom::Start(pos * u64::from(BYTES_PER_SECTOR)))
			.and_then(|_| file.read_exact(&mut buf))
			.map_err(|_| DeviceError::Read(sector))?;

		Ok(SectorBuffer::from(buf))
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use std::io::Write;

	#[test]
	fn t_from_cdtoc() {
		let dev = ImageDevice::from_cdtoc("4+96+2D2B+6256+B327+D84A").expect("CDTOC failed.");
		let got: Vec<(u32, u32, u32, bool)> = dev.tracks().iter()
			.map(|t| (t.number(), t.start_sector(), t.end_sector(), t.is_audio()))
			.collect();
		assert_eq!(
			got,
			[
				(1, 0, 11_412, true),
				(2, 11_413, 25_023, true),
				(3, 25_024, 45_712, true),
				(4, 45_713, 55_219, true),
			],
		);

		// Trailing data session.
		let dev = ImageDevice::from_cdtoc("3+96+2D2B+X8000+9000").expect("CDTOC failed.");
		let t = dev.tracks();
		assert_eq!(t.len(), 3);
		assert_eq!(t[1].end_sector(), 0x8000 - 150 - 11_400 - 1, "The CD-Extra gap was not applied.");
		assert!(! t[2].is_audio());
		assert_eq!(t[2].start_sector(), 0x8000 - 150);

		// Leading data track.
		let dev = ImageDevice::from_cdtoc("2+X96+2D2B+6256").expect("CDTOC failed.");
		let t = dev.tracks();
		assert!(! t[0].is_audio());
		assert_eq!(t[0].end_sector(), 0x2D2B - 151);

		for bad in [
			"",
			"0+96",
			"2+96+2D2B",
			"2+2D2B+96+6256",
			"1+96+50",
			"1+ZZ+6256",
		] {
			assert!(
				matches!(ImageDevice::from_cdtoc(bad), Err(DeviceError::Toc(_))),
				"CDTOC should fail: {bad:?}",
			);
		}
	}

	#[test]
	fn t_read() {
		let mut file = tempfile::NamedTempFile::new().expect("Tempfile failed.");
		for s in 0_u8..4 {
			file.write_all(&[s; 2352]).expect("Write failed.");
		}
		file.flush().expect("Flush failed.");
		let path = file.path().to_string_lossy().into_owned();

		let mut dev = ImageDevice::new([Track::audio(1, 0, 3)]);
		assert_eq!(dev.read_sector(0), Err(DeviceError::NotOpen), "Reads require an open device.");
		assert_eq!(
			dev.open("/no/such/image.bin"),
			Err(DeviceError::Missing("/no/such/image.bin".to_owned())),
		);

		dev.open(&path).expect("Open failed.");
		for s in 0..4 {
			let buf = dev.read_sector(s).expect("Read failed.");
			assert!(buf.as_bytes().iter().all(|&b| i32::from(b) == s), "Wrong data for sector {s}.");
		}
		assert_eq!(dev.read_sector(-1), Ok(SectorBuffer::silence()));
		assert_eq!(dev.read_sector(4), Err(DeviceError::Read(4)));

		dev.close();
		assert_eq!(dev.read_sector(0), Err(DeviceError::NotOpen), "Closed devices can't be read.");
	}
}
