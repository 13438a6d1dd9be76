/*!
# CD Stream: Sector Devices
*/

pub(super) mod fixture;
pub(super) mod image;

use crate::{
	BuildError,
	BYTES_PER_SECTOR,
	DeviceError,
	DiscInfo,
	OpenError,
	TagKind,
	Track,
	TrackTable,
};



/// # Sector Device.
///
/// This is the collaborator that does the actual talking-to-hardware (or
/// files, or whatever). The streaming engine only ever calls it through this
/// trait, and never cares which implementation is behind it.
///
/// The engine guarantees the call order: `open`, then `read_toc`, then any
/// number of `read_sector`s, then `close`. It will not call `read_sector`
/// outside an open session.
pub trait SectorDevice {
	/// # Open.
	///
	/// Connect to the device identified by `device`.
	///
	/// ## Errors
	///
	/// Implementations should return an error if the device is missing,
	/// unreadable, or does not contain a usable disc.
	fn open(&mut self, device: &str) -> Result<(), DeviceError>;

	/// # Read Table of Contents.
	///
	/// Report each track (audio or data) via [`TocBuilder::add_track`], and
	/// any disc-level details via the builder's other setters.
	///
	/// ## Errors
	///
	/// Device problems and rejected tracks should both be bubbled up.
	fn read_toc(&mut self, toc: &mut TocBuilder<'_>) -> Result<(), OpenError>;

	/// # Close.
	///
	/// This must be safe to call at any point after a successful `open`.
	fn close(&mut self);

	/// # Read Sector.
	///
	/// Read a single sector of audio data. The address has already been
	/// run through any [`TocCorrection`](crate::TocCorrection), so may be
	/// negative or otherwise out of range.
	///
	/// ## Errors
	///
	/// Any read failure should be returned as-is; the engine does not retry.
	fn read_sector(&mut self, sector: i32) -> Result<SectorBuffer, DeviceError>;

	/// # Default Device.
	///
	/// Return the identifier to use when none is given, if there is one.
	fn default_device(&self) -> Option<String> { None }

	/// # Probe Devices.
	///
	/// Return the identifiers of all devices this implementation could open.
	fn probe_devices(&self) -> Vec<String> { Vec::new() }
}

impl<T: SectorDevice + ?Sized> SectorDevice for Box<T> {
	#[inline]
	fn open(&mut self, device: &str) -> Result<(), DeviceError> { (**self).open(device) }

	#[inline]
	fn read_toc(&mut self, toc: &mut TocBuilder<'_>) -> Result<(), OpenError> {
		(**self).read_toc(toc)
	}

	#[inline]
	fn close(&mut self) { (**self).close(); }

	#[inline]
	fn read_sector(&mut self, sector: i32) -> Result<SectorBuffer, DeviceError> {
		(**self).read_sector(sector)
	}

	#[inline]
	fn default_device(&self) -> Option<String> { (**self).default_device() }

	#[inline]
	fn probe_devices(&self) -> Vec<String> { (**self).probe_devices() }
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Sector Buffer.
///
/// The raw bytes returned for one sector: 588 16-bit stereo samples,
/// little-endian.
pub struct SectorBuffer(Vec<u8>);

impl AsRef<[u8]> for SectorBuffer {
	#[inline]
	fn as_ref(&self) -> &[u8] { &self.0 }
}

impl From<Vec<u8>> for SectorBuffer {
	#[inline]
	fn from(src: Vec<u8>) -> Self { Self(src) }
}

impl From<SectorBuffer> for Vec<u8> {
	#[inline]
	fn from(src: SectorBuffer) -> Self { src.0 }
}

impl SectorBuffer {
	#[must_use]
	/// # Silence.
	///
	/// Audio CD silence is typically literally nothing.
	pub fn silence() -> Self { Self(vec![0; usize::from(BYTES_PER_SECTOR)]) }

	#[must_use]
	/// # As Bytes.
	pub fn as_bytes(&self) -> &[u8] { &self.0 }

	#[must_use]
	/// # Into Inner.
	pub fn into_inner(self) -> Vec<u8> { self.0 }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	#[must_use]
	/// # Length.
	pub fn len(&self) -> usize { self.0.len() }
}



#[derive(Debug)]
/// # TOC Builder.
///
/// This is what a device sees while reporting its table of contents. It
/// funnels tracks into the engine's [`TrackTable`] and collects disc-level
/// details on the side.
pub struct TocBuilder<'a> {
	table: &'a mut TrackTable,
	disc: &'a mut DiscInfo,
}

impl<'a> TocBuilder<'a> {
	/// # New.
	pub(crate) fn new(table: &'a mut TrackTable, disc: &'a mut DiscInfo) -> Self {
		Self { table, disc }
	}

	/// # Add Track.
	///
	/// ## Errors
	///
	/// See [`TrackTable::add_track`].
	pub fn add_track(&mut self, track: Track) -> Result<usize, BuildError> {
		self.table.add_track(track)
	}

	/// # Set Disc ID.
	///
	/// A checksum-style identifier for the disc, like a CDDB ID.
	pub fn set_disc_id(&mut self, id: u32) { self.disc.set_id(id); }

	/// # Set Disc Tag.
	pub fn set_disc_tag<S>(&mut self, kind: TagKind, value: S)
	where S: Into<String> {
		self.disc.tags_mut().insert(kind, value);
	}

	/// # Set Vendor Disc ID.
	///
	/// Any other identifier string the device knows about, like a
	/// MusicBrainz ID.
	pub fn set_vendor_id<S>(&mut self, id: S)
	where S: Into<String> {
		self.disc.set_vendor_id(id.into());
	}

	#[must_use]
	/// # Table So Far.
	pub fn table(&self) -> &TrackTable { self.table }
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::FixtureDevice;

	#[test]
	fn t_boxed() {
		let mut dev: Box<dyn SectorDevice> = Box::new(
			FixtureDevice::new([Track::audio(1, 0, 9)])
		);
		assert_eq!(dev.default_device().as_deref(), Some(FixtureDevice::DEFAULT_DEVICE));
		assert!(dev.open(FixtureDevice::DEFAULT_DEVICE).is_ok());

		let mut table = TrackTable::new();
		let mut disc = DiscInfo::default();
		let mut toc = TocBuilder::new(&mut table, &mut disc);
		assert!(dev.read_toc(&mut toc).is_ok());
		toc.set_disc_tag(TagKind::Title, "Boxed");
		assert_eq!(toc.table().len(), 1);

		assert_eq!(disc.tags().get(TagKind::Title), Some("Boxed"));
		assert_eq!(dev.read_sector(3).map(|b| b.len()), Ok(usize::from(BYTES_PER_SECTOR)));
		dev.close();
	}

	#[test]
	fn t_silence() {
		let buf = SectorBuffer::silence();
		assert_eq!(buf.len(), 2352);
		assert!(buf.as_bytes().iter().all(|&b| b == 0));
	}
}
