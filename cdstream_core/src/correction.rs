/*!
# CD Stream: TOC Correction
*/

use std::fmt;



/// # Min Offset.
///
/// An audio CD cannot hold much more than 100 minutes of data.
const MIN_OFFSET: i32 = -450_000;

/// # Max Offset.
const MAX_OFFSET: i32 = 450_000;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # TOC Correction.
///
/// Some drives address sectors differently than their own table of contents
/// suggests. This policy maps a published TOC sector to the address actually
/// handed to the device:
///
/// ```text
/// device = sector + offset - (bias ? first_track_start : 0)
/// ```
///
/// The table of contents itself (and with it every position, seek, and
/// timestamp) always stays in published TOC sectors. Only raw reads are
/// shifted.
///
/// Offsets are restricted to `-450_000..=450_000`.
///
/// ```
/// use cdstream_core::TocCorrection;
///
/// let fix = TocCorrection::try_from("-3").unwrap().with_bias(true);
/// assert_eq!(fix.offset(), -3);
/// assert_eq!(fix.device_sector(1000, 150), 847);
/// ```
pub struct TocCorrection {
	offset: i32,
	bias: bool,
}

impl fmt::Display for TocCorrection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:+}", self.offset)?;
		if self.bias { f.write_str(" (biased)") }
		else { Ok(()) }
	}
}

impl TryFrom<i32> for TocCorrection {
	type Error = ();
	fn try_from(src: i32) -> Result<Self, Self::Error> {
		if (MIN_OFFSET..=MAX_OFFSET).contains(&src) {
			Ok(Self { offset: src, bias: false })
		}
		else { Err(()) }
	}
}

impl TryFrom<&[u8]> for TocCorrection {
	type Error = ();
	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		let src = src.trim_ascii();
		if src.is_empty() { Ok(Self::default()) }
		else {
			std::str::from_utf8(src).ok()
				.and_then(|s| s.strip_prefix('+').unwrap_or(s).parse::<i32>().ok())
				.ok_or(())
				.and_then(Self::try_from)
		}
	}
}

impl TryFrom<&str> for TocCorrection {
	type Error = ();
	fn try_from(src: &str) -> Result<Self, Self::Error> {
		Self::try_from(src.as_bytes())
	}
}

impl TocCorrection {
	#[must_use]
	/// # With Bias.
	///
	/// When `true`, the start of the first track is treated as device
	/// address zero.
	pub const fn with_bias(self, bias: bool) -> Self {
		Self {
			bias,
			..self
		}
	}

	#[must_use]
	/// # Bias?
	pub const fn bias(self) -> bool { self.bias }

	#[must_use]
	/// # Is Noop?
	pub const fn is_noop(self) -> bool { self.offset == 0 && ! self.bias }

	#[must_use]
	/// # Offset (Sectors).
	pub const fn offset(self) -> i32 { self.offset }
}

impl TocCorrection {
	#[must_use]
	#[allow(clippy::cast_possible_truncation)]
	/// # Device Sector.
	///
	/// Translate a TOC sector into the address to request from the device.
	/// The result may be negative; devices are expected to cope with that
	/// (usually by returning silence).
	pub const fn device_sector(self, sector: u32, first_start: u32) -> i32 {
		let mut out = sector as i64 + self.offset as i64;
		if self.bias { out -= first_start as i64; }

		if out < i32::MIN as i64 { i32::MIN }
		else if out > i32::MAX as i64 { i32::MAX }
		else { out as i32 }
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_parse() {
		for (raw, expected) in [
			("", Some(0)),
			("0", Some(0)),
			(" 12 ", Some(12)),
			("+12", Some(12)),
			("-450000", Some(-450_000)),
			("450001", None),
			("1.5", None),
			("abc", None),
		] {
			assert_eq!(
				TocCorrection::try_from(raw).ok().map(TocCorrection::offset),
				expected,
				"Unexpected parse for {raw:?}.",
			);
		}
	}

	#[test]
	fn t_device_sector() {
		let fix = TocCorrection::default();
		assert!(fix.is_noop());
		assert_eq!(fix.device_sector(500, 150), 500);

		let fix = TocCorrection::try_from(10).expect("Offset failed.");
		assert_eq!(fix.device_sector(500, 150), 510);

		let fix = fix.with_bias(true);
		assert!(! fix.is_noop());
		assert_eq!(fix.device_sector(150, 150), 10);

		let fix = TocCorrection::try_from(-20).expect("Offset failed.").with_bias(true);
		assert_eq!(fix.device_sector(0, 150), -170, "Negative addresses are allowed.");
		assert_eq!(fix.to_string(), "-20 (biased)");
	}
}
