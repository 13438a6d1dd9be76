/*!
# CD Stream: Sector Arithmetic
*/

use crate::{
	BYTES_PER_SECTOR,
	SAMPLE_RATE,
	SAMPLES_PER_SECTOR,
	SECTORS_PER_SECOND,
};
use std::{
	fmt,
	ops::{
		Add,
		Sub,
	},
	time::Duration,
};



#[derive(Debug, Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Sector Count.
///
/// This holds a number of sectors, a length or an offset, and converts it
/// to and from the other units people tend to care about: samples, bytes, and
/// time.
///
/// Conversions _into_ sectors round down to the containing sector.
pub struct Sectors(u32);

impl Add for Sectors {
	type Output = Self;
	#[inline]
	fn add(self, rhs: Self) -> Self { Self(self.0.saturating_add(rhs.0)) }
}

impl Sub for Sectors {
	type Output = Self;
	#[inline]
	fn sub(self, rhs: Self) -> Self { Self(self.0.saturating_sub(rhs.0)) }
}

impl From<u32> for Sectors {
	#[inline]
	fn from(src: u32) -> Self { Self(src) }
}

impl From<Sectors> for u32 {
	#[inline]
	fn from(src: Sectors) -> Self { src.0 }
}

impl fmt::Display for Sectors {
	/// # Display.
	///
	/// Print the value as a CD-style `MM:SS:FF` timestamp, where `FF` is the
	/// sector (frame) within the second.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let frames = self.0 % SECTORS_PER_SECOND;
		let secs = self.0 / SECTORS_PER_SECOND;
		write!(f, "{:02}:{:02}:{frames:02}", secs / 60, secs % 60)
	}
}

impl Sectors {
	#[must_use]
	/// # New.
	pub const fn new(sectors: u32) -> Self { Self(sectors) }

	#[must_use]
	/// # From Bytes.
	///
	/// Values too large to fit are saturated.
	pub const fn from_bytes(bytes: u64) -> Self {
		Self::saturate(bytes / BYTES_PER_SECTOR as u64)
	}

	#[must_use]
	/// # From Duration.
	pub const fn from_duration(time: Duration) -> Self {
		let secs = time.as_secs().saturating_mul(SECTORS_PER_SECOND as u64);
		let frac = time.subsec_nanos() as u64 * SECTORS_PER_SECOND as u64 / 1_000_000_000;
		Self::saturate(secs.saturating_add(frac))
	}

	#[must_use]
	/// # From Samples.
	pub const fn from_samples(samples: u64) -> Self {
		Self::saturate(samples / SAMPLES_PER_SECTOR as u64)
	}

	#[allow(clippy::cast_possible_truncation)]
	/// # Saturate.
	const fn saturate(src: u64) -> Self {
		if src > u32::MAX as u64 { Self(u32::MAX) }
		else { Self(src as u32) }
	}
}

impl Sectors {
	#[must_use]
	/// # Bytes.
	pub const fn bytes(self) -> u64 { self.0 as u64 * BYTES_PER_SECTOR as u64 }

	#[must_use]
	#[allow(clippy::cast_possible_truncation)]
	/// # Duration.
	pub const fn duration(self) -> Duration {
		let samples = self.samples();
		let secs = samples / SAMPLE_RATE as u64;
		let rem = samples % SAMPLE_RATE as u64;
		Duration::new(secs, (rem * 1_000_000_000 / SAMPLE_RATE as u64) as u32)
	}

	#[must_use]
	/// # Is Zero?
	pub const fn is_zero(self) -> bool { self.0 == 0 }

	#[must_use]
	/// # Samples.
	pub const fn samples(self) -> u64 { self.0 as u64 * SAMPLES_PER_SECTOR as u64 }

	#[must_use]
	/// # Sectors.
	pub const fn sectors(self) -> u32 { self.0 }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_conversions() {
		let s = Sectors::new(75);
		assert_eq!(s.samples(), 44_100);
		assert_eq!(s.bytes(), 176_400);
		assert_eq!(s.duration(), Duration::from_secs(1));

		assert_eq!(Sectors::from_samples(44_100), s);
		assert_eq!(Sectors::from_bytes(176_400), s);
		assert_eq!(Sectors::from_duration(Duration::from_secs(1)), s);

		// Partial sectors round down.
		assert_eq!(Sectors::from_samples(587), Sectors::new(0));
		assert_eq!(Sectors::from_samples(589), Sectors::new(1));
		assert_eq!(Sectors::from_bytes(2351), Sectors::new(0));
		assert_eq!(Sectors::from_duration(Duration::from_millis(1010)), Sectors::new(75));
		assert_eq!(Sectors::from_duration(Duration::from_millis(1014)), Sectors::new(76));

		// One sector is 1/75th of a second.
		assert_eq!(Sectors::new(1).duration(), Duration::new(0, 13_333_333));
	}

	#[test]
	fn t_display() {
		assert_eq!(Sectors::new(0).to_string(), "00:00:00");
		assert_eq!(Sectors::new(74).to_string(), "00:00:74");
		assert_eq!(Sectors::new(75 * 61 + 3).to_string(), "01:01:03");
	}

	#[test]
	fn t_math() {
		assert_eq!(Sectors::new(5) + Sectors::new(6), Sectors::new(11));
		assert_eq!(Sectors::new(5) - Sectors::new(6), Sectors::new(0), "Subtraction saturates.");
		assert_eq!(Sectors::new(u32::MAX) + Sectors::new(1), Sectors::new(u32::MAX));
		assert_eq!(Sectors::from_bytes(u64::MAX), Sectors::new(u32::MAX));
	}
}
