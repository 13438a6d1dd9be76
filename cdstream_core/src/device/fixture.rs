/*!
# CD Stream: Fixture Device
*/

use crate::{
	BYTES_PER_SECTOR,
	DeviceError,
	OpenError,
	SectorBuffer,
	SectorDevice,
	TocBuilder,
	Track,
};
use std::collections::BTreeMap;



#[derive(Debug, Clone)]
/// # Fixture Device.
///
/// A synthetic, in-memory device for tests and demos. Every sector is filled
/// with a deterministic pattern derived from its address (see
/// [`FixtureDevice::pattern`]), so callers can verify exactly which sector
/// they were handed.
///
/// Failures can be scripted per sector, and every read is logged.
pub struct FixtureDevice {
	/// # Table of Contents.
	tracks: Vec<Track>,

	/// # Disc ID.
	disc_id: Option<u32>,

	/// # Scripted Failures (remaining count).
	failures: BTreeMap<i32, usize>,

	/// # Refuse to Open?
	broken: bool,

	/// # Open?
	open: Option<String>,

	/// # Read Log.
	reads: Vec<i32>,

	/// # Open/Close Counts.
	opens: usize,
	closes: usize,
}

impl FixtureDevice {
	/// # Default Device Name.
	pub const DEFAULT_DEVICE: &'static str = "fixture";

	#[must_use]
	/// # New.
	pub fn new<I>(tracks: I) -> Self
	where I: IntoIterator<Item = Track> {
		Self {
			tracks: tracks.into_iter().collect(),
			disc_id: None,
			failures: BTreeMap::new(),
			broken: false,
			open: None,
			reads: Vec::new(),
			opens: 0,
			closes: 0,
		}
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
	/// # With Open Failure.
	///
	/// When `true`, every `open` call fails.
	pub fn with_broken(self, broken: bool) -> Self {
		Self {
			broken,
			..self
		}
	}

	/// # Fail Reads.
	///
	/// Make the next `times` reads of `sector` fail.
	pub fn fail_sector(&mut self, sector: i32, times: usize) {
		if times == 0 { self.failures.remove(&sector); }
		else { self.failures.insert(sector, times); }
	}

	/// # Reset Read Log.
	pub fn clear_reads(&mut self) { self.reads.clear(); }
}

impl FixtureDevice {
	#[must_use]
	/// # Closes.
	pub const fn closes(&self) -> usize { self.closes }

	#[must_use]
	/// # Is Open?
	pub const fn is_open(&self) -> bool { self.open.is_some() }

	#[must_use]
	/// # Opened Device.
	pub fn opened(&self) -> Option<&str> { self.open.as_deref() }

	#[must_use]
	/// # Opens.
	pub const fn opens(&self) -> usize { self.opens }

	#[must_use]
	/// # Pattern.
	///
	/// Return the bytes this device produces for `sector`: the address in
	/// little-endian, repeated to fill the sector. Negative addresses are
	/// silent.
	pub fn pattern(sector: i32) -> Vec<u8> {
		if sector < 0 { return SectorBuffer::silence().into_inner(); }
		sector.to_le_bytes()
			.into_iter()
			.cycle()
			.take(usize::from(BYTES_PER_SECTOR))
			.collect()
	}

	#[must_use]
	/// # Read Log.
	///
	/// Every address passed to `read_sector`, successful or not, in order.
	pub fn reads(&self) -> &[i32] { &self.reads }
}

impl SectorDevice for FixtureDevice {
	fn open(&mut self, device: &str) -> Result<(), DeviceError> {
		if self.broken {
			return Err(DeviceError::Open(device.to_owned()));
		}
		self.opens += 1;
		self.open = Some(device.to_owned());
		Ok(())
	}

	fn read_toc(&mut self, toc: &mut TocBuilder<'_>) -> Result<(), OpenError> {
		for t in &self.tracks { toc.add_track(t.clone())?; }
		if let Some(id) = self.disc_id { toc.set_disc_id(id); }
		Ok(())
	}

	fn close(&mut self) {
		if self.open.take().is_some() { self.closes += 1; }
	}

	fn read_sector(&mut self, sector: i32) -> Result<SectorBuffer, DeviceError> {
		self.reads.push(sector);
		if self.open.is_none() { return Err(DeviceError::NotOpen); }

		if let Some(left) = self.failures.get_mut(&sector) {
			*left -= 1;
			if *left == 0 { self.failures.remove(&sector); }
			return Err(DeviceError::Read(sector));
		}

		Ok(SectorBuffer::from(Self::pattern(sector)))
	}

	fn default_device(&self) -> Option<String> { Some(Self::DEFAULT_DEVICE.to_owned()) }

	fn probe_devices(&self) -> Vec<String> { vec![Self::DEFAULT_DEVICE.to_owned()] }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_pattern() {
		let a = FixtureDevice::pattern(1000);
		assert_eq!(a.len(), 2352);
		assert_eq!(&a[..8], &[0xE8, 0x03, 0, 0, 0xE8, 0x03, 0, 0]);
		assert_ne!(a, FixtureDevice::pattern(1001));
		assert!(FixtureDevice::pattern(-5).iter().all(|&b| b == 0), "Negative sectors should be silent.");
	}

	#[test]
	fn t_failures() {
		let mut dev = FixtureDevice::new([Track::audio(1, 0, 9)]);
		assert_eq!(dev.read_sector(0), Err(DeviceError::NotOpen), "Reads require an open device.");

		dev.open("x").expect("Open failed.");
		dev.fail_sector(4, 2);
		assert_eq!(dev.read_sector(4), Err(DeviceError::Read(4)));
		assert_eq!(dev.read_sector(4), Err(DeviceError::Read(4)));
		assert!(dev.read_sector(4).is_ok(), "The failures should be used up.");
		assert_eq!(dev.reads(), &[0, 4, 4, 4]);

		dev.close();
		dev.close();
		assert_eq!(dev.opens(), 1);
		assert_eq!(dev.closes(), 1, "Closing twice should only count once.");

		let mut dev = dev.with_broken(true);
		assert_eq!(dev.open("y"), Err(DeviceError::Open("y".to_owned())));
		assert!(! dev.is_open());
	}
}
