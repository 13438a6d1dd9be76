/*!
# CD Stream: Errors
*/

use cdstream_core::{
	DeviceError,
	OpenError,
	StreamError,
	TrackError,
};
use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Error.
pub(super) enum CdStreamError {
	/// # Invalid CLI Option.
	CliParse(&'static str),

	/// # Bad Device/TOC.
	Device(DeviceError),

	/// # Aborted.
	Killed,

	/// # Open Failed.
	Open(OpenError),

	/// # Stream Failed.
	Stream(StreamError),

	/// # Bad Track Selection.
	Track(TrackError),

	/// # Write Failed.
	Write(String),
}

impl Error for CdStreamError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Device(e) => Some(e),
			Self::Open(e) => Some(e),
			Self::Stream(e) => Some(e),
			Self::Track(e) => Some(e),
			_ => None,
		}
	}
}

impl From<DeviceError> for CdStreamError {
	#[inline]
	fn from(err: DeviceError) -> Self { Self::Device(err) }
}

impl From<OpenError> for CdStreamError {
	#[inline]
	fn from(err: OpenError) -> Self { Self::Open(err) }
}

impl From<StreamError> for CdStreamError {
	#[inline]
	fn from(err: StreamError) -> Self { Self::Stream(err) }
}

impl From<TrackError> for CdStreamError {
	#[inline]
	fn from(err: TrackError) -> Self { Self::Track(err) }
}

impl fmt::Display for CdStreamError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliParse(s) => write!(f, "Invalid CLI option: {s}."),
			Self::Device(e) => write!(f, "{e}"),
			Self::Killed => f.write_str("The process was aborted."),
			Self::Open(e) => write!(f, "{e}"),
			Self::Stream(e) => write!(f, "{e}"),
			Self::Track(e) => write!(f, "{e}"),
			Self::Write(s) => write!(f, "Unable to write to {s}."),
		}
	}
}
