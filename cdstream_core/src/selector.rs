/*!
# CD Stream: CDDA URIs
*/

use crate::{
	CDDA_SCHEME,
	TrackError,
};
use std::{
	fmt,
	str::FromStr,
};



#[derive(Debug, Clone, Eq, Hash, PartialEq)]
/// # CDDA URI.
///
/// A URI of the form `cdda://[device#]track`, selecting a track and,
/// optionally, the device to find it on.
///
/// An empty track part means track one.
///
/// ```
/// use cdstream_core::CddaUri;
///
/// let uri = CddaUri::parse("cdda:///dev/sr0#4").unwrap();
/// assert_eq!(uri.device(), Some("/dev/sr0"));
/// assert_eq!(uri.track(), 4);
/// assert_eq!(uri.to_string(), "cdda:///dev/sr0#4");
///
/// let uri = CddaUri::parse("cdda://").unwrap();
/// assert_eq!(uri.device(), None);
/// assert_eq!(uri.track(), 1);
/// ```
pub struct CddaUri {
	device: Option<String>,
	track: u32,
}

impl fmt::Display for CddaUri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(dev) = self.device.as_deref() {
			write!(f, "{CDDA_SCHEME}://{dev}#{}", self.track)
		}
		else { write!(f, "{CDDA_SCHEME}://{}", self.track) }
	}
}

impl FromStr for CddaUri {
	type Err = TrackError;
	#[inline]
	fn from_str(src: &str) -> Result<Self, Self::Err> { Self::parse(src) }
}

impl CddaUri {
	#[must_use]
	/// # New.
	///
	/// Track zero is bumped to one.
	pub fn new(device: Option<String>, track: u32) -> Self {
		Self {
			device: device.filter(|d| ! d.is_empty()),
			track: track.max(1),
		}
	}

	/// # Parse.
	///
	/// The scheme is matched case-insensitively. Surrounding whitespace is
	/// ignored.
	///
	/// ## Errors
	///
	/// This will return an error if the scheme is wrong or the track part is
	/// not a positive integer.
	pub fn parse(src: &str) -> Result<Self, TrackError> {
		let bad = || TrackError::InvalidUri(src.trim().to_owned());

		let src = src.trim();
		let rest = src.split_once("://")
			.filter(|(scheme, _)| scheme.eq_ignore_ascii_case(CDDA_SCHEME))
			.map(|(_, rest)| rest)
			.ok_or_else(bad)?;

		// Device paths can contain just about anything, so split on the last
		// hash.
		let (device, track) = match rest.rsplit_once('#') {
			Some((dev, track)) => (Some(dev).filter(|d| ! d.is_empty()), track),
			None => (None, rest),
		};

		let track = track.trim();
		let track =
			if track.is_empty() { 1 }
			else {
				track.parse::<u32>().ok()
					.filter(|&t| t != 0)
					.ok_or_else(bad)?
			};

		Ok(Self {
			device: device.map(str::to_owned),
			track,
		})
	}
}

impl CddaUri {
	#[must_use]
	/// # Device.
	pub fn device(&self) -> Option<&str> { self.device.as_deref() }

	#[must_use]
	/// # Track Number.
	pub const fn track(&self) -> u32 { self.track }
}
