/*!
# CD Stream: Errors
*/

use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Table Build Errors.
///
/// These are returned while the table of contents is being put together.
/// Aside from `EmptyDisc`, they are only fatal to the specific call that
/// triggered them; the table remains usable.
pub enum BuildError {
	/// # Already Streaming.
	///
	/// The table is frozen once the first sector has been delivered.
	AlreadyStreaming,

	/// # No Audio Tracks.
	EmptyDisc,

	/// # Start After End.
	InvalidRange {
		/// # Start Sector.
		start: u32,

		/// # End Sector.
		end: u32,
	},

	/// # No Device Session.
	NotOpen,

	/// # Overlapping Tracks.
	Overlap {
		/// # TOC Number of the New Track.
		number: u32,

		/// # TOC Number of the Existing Track.
		existing: u32,
	},
}

impl Error for BuildError {}

impl fmt::Display for BuildError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AlreadyStreaming => f.write_str("The table of contents cannot change once streaming has begun."),
			Self::EmptyDisc => f.write_str("The disc has no audio tracks."),
			Self::InvalidRange { start, end } => write!(f, "Invalid track range ({start}..={end})."),
			Self::NotOpen => f.write_str("No device session is open."),
			Self::Overlap { number, existing } => write!(f, "Track #{number} overlaps track #{existing}."),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Track Lookup Errors.
pub enum TrackError {
	/// # Invalid URI.
	InvalidUri(String),

	/// # No Track Owns the Sector.
	NotFound(u32),

	/// # No Such (Audio) Track Number.
	NoSuchTrack(u32),
}

impl Error for TrackError {}

impl fmt::Display for TrackError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidUri(s) => write!(f, "Invalid CDDA URI {s}."),
			Self::NotFound(n) => write!(f, "Sector {n} does not belong to any track."),
			Self::NoSuchTrack(n) => write!(f, "There is no audio track #{n} on this disc."),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Seek Errors.
pub enum SeekError {
	/// # Unknown Track.
	NoSuchTrack(TrackError),

	/// # No Device Session.
	NotReady,

	/// # Sector Out of Range.
	SeekOutOfRange(u64),
}

impl Error for SeekError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::NoSuchTrack(e) => Some(e),
			_ => None,
		}
	}
}

impl From<TrackError> for SeekError {
	#[inline]
	fn from(err: TrackError) -> Self { Self::NoSuchTrack(err) }
}

impl fmt::Display for SeekError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoSuchTrack(e) => write!(f, "{e}"),
			Self::NotReady => f.write_str("Seeking requires an open device."),
			Self::SeekOutOfRange(n) => write!(f, "Cannot seek to sector {n}; it is outside the streamable range."),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Device Errors.
///
/// These originate with a [`SectorDevice`](crate::SectorDevice)
/// implementation and are passed along as-is.
pub enum DeviceError {
	/// # No Such Device.
	Missing(String),

	/// # Not Open.
	NotOpen,

	/// # Unable to Open Device.
	Open(String),

	/// # Read Error.
	Read(i32),

	/// # Unreadable Table of Contents.
	Toc(String),
}

impl Error for DeviceError {}

impl fmt::Display for DeviceError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Missing(s) => write!(f, "No such device: {s}."),
			Self::NotOpen => f.write_str("The device is not open."),
			Self::Open(s) => write!(f, "Unable to open {s}."),
			Self::Read(n) => write!(f, "Unable to read sector {n}."),
			Self::Toc(s) => write!(f, "Invalid table of contents: {s}."),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Open Errors.
pub enum OpenError {
	/// # A Session Is Already Open.
	AlreadyOpen,

	/// # Table Problems.
	Build(BuildError),

	/// # Device Problems.
	Device(DeviceError),

	/// # No Device Identifier.
	NoDevice,

	/// # Bad Initial Track.
	Track(TrackError),
}

impl Error for OpenError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Build(e) => Some(e),
			Self::Device(e) => Some(e),
			Self::Track(e) => Some(e),
			Self::AlreadyOpen | Self::NoDevice => None,
		}
	}
}

impl From<BuildError> for OpenError {
	#[inline]
	fn from(err: BuildError) -> Self { Self::Build(err) }
}

impl From<DeviceError> for OpenError {
	#[inline]
	fn from(err: DeviceError) -> Self { Self::Device(err) }
}

impl From<TrackError> for OpenError {
	#[inline]
	fn from(err: TrackError) -> Self { Self::Track(err) }
}

impl fmt::Display for OpenError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::AlreadyOpen => f.write_str("A device session is already open."),
			Self::Build(e) => write!(f, "{e}"),
			Self::Device(e) => write!(f, "{e}"),
			Self::NoDevice => f.write_str("No device was specified and there is no default."),
			Self::Track(e) => write!(f, "{e}"),
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Stream Errors.
pub enum StreamError {
	/// # Device Read Failed.
	///
	/// The position is left untouched so the caller can try again.
	DeviceReadFailed(DeviceError),

	/// # End of Stream.
	///
	/// This isn't really an error; it marks the end of the current segment,
	/// be that a track or the whole disc.
	EndOfStream,

	/// # Mode Changes Are Locked.
	ModeLocked,

	/// # No Device Session.
	NotReady,

	/// # Pending Seek Failed.
	Seek(SeekError),
}

impl Error for StreamError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::DeviceReadFailed(e) => Some(e),
			Self::Seek(e) => Some(e),
			_ => None,
		}
	}
}

impl From<SeekError> for StreamError {
	#[inline]
	fn from(err: SeekError) -> Self { Self::Seek(err) }
}

impl fmt::Display for StreamError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DeviceReadFailed(e) => write!(f, "Device read failed: {e}"),
			Self::EndOfStream => f.write_str("End of stream."),
			Self::ModeLocked => f.write_str("The streaming mode cannot be changed mid-stream."),
			Self::NotReady => f.write_str("The source is not open."),
			Self::Seek(e) => write!(f, "{e}"),
		}
	}
}

impl StreamError {
	#[must_use]
	/// # Is End of Stream?
	pub const fn is_eos(&self) -> bool { matches!(self, Self::EndOfStream) }
}
