/*!
# CD Stream: Source Options
*/

use crate::TocCorrection;
use std::fmt;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Streaming Mode.
///
/// This determines what a "stream" is, and so where it ends.
pub enum StreamMode {
	#[default]
	/// # One Track.
	///
	/// Each track is its own stream. Reading past the end of the track yields
	/// end-of-stream; moving on requires a new selection or seek.
	PerTrack,

	/// # Whole Disc.
	///
	/// The disc is one continuous stream, from the start of the first audio
	/// track to the end of the last. Track boundaries are reported as
	/// notifications rather than stream breaks.
	WholeDisc,
}

impl fmt::Display for StreamMode {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl StreamMode {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::PerTrack => "per-track",
			Self::WholeDisc => "whole-disc",
		}
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Source Options.
///
/// This struct holds the settings a [`CdSource`](crate::CdSource) is
/// constructed with: the streaming mode, which device and track to start
/// with, how to correct the table of contents, etc.
///
/// Options are set using builder-style methods, like:
///
/// ```
/// use cdstream_core::{
///     SourceOptions,
///     StreamMode,
/// };
///
/// let opts = SourceOptions::default()
///     .with_mode(StreamMode::WholeDisc)
///     .with_device("/dev/cdrom")
///     .with_track(3);
///
/// assert_eq!(opts.mode(), StreamMode::WholeDisc);
/// assert_eq!(opts.device(), Some("/dev/cdrom"));
/// assert_eq!(opts.track(), Some(3));
/// ```
pub struct SourceOptions {
	mode: StreamMode,
	device: Option<String>,
	track: Option<u32>,
	correction: TocCorrection,
	disc_id: Option<u32>,
}

/// ## Setters.
impl SourceOptions {
	#[must_use]
	/// # With Device.
	///
	/// Set the device identifier to open when none is passed explicitly.
	///
	/// The default is `None`, in which case the device's own default (if any)
	/// is used.
	pub fn with_device<S>(self, device: S) -> Self
	where S: Into<String> {
		let device: String = device.into();
		Self {
			device: Some(device).filter(|d| ! d.is_empty()),
			..self
		}
	}

	#[must_use]
	/// # With Disc ID.
	///
	/// Override whatever disc ID the device reports (or doesn't report).
	/// This is mostly useful for testing.
	pub fn with_disc_id(self, id: u32) -> Self {
		Self {
			disc_id: Some(id),
			..self
		}
	}

	#[must_use]
	/// # With Mode.
	///
	/// The default is [`StreamMode::PerTrack`].
	pub fn with_mode(self, mode: StreamMode) -> Self {
		Self {
			mode,
			..self
		}
	}

	#[must_use]
	/// # With TOC Correction.
	///
	/// The default is no correction.
	pub fn with_correction(self, correction: TocCorrection) -> Self {
		Self {
			correction,
			..self
		}
	}

	#[must_use]
	/// # With Track.
	///
	/// Choose the (TOC-numbered, audio) track to start from. Zero resets the
	/// value to the default, which is the first audio track.
	pub fn with_track(self, track: u32) -> Self {
		Self {
			track: Some(track).filter(|&t| t != 0),
			..self
		}
	}
}

/// ## Getters.
impl SourceOptions {
	#[must_use]
	/// # TOC Correction.
	pub const fn correction(&self) -> TocCorrection { self.correction }

	#[must_use]
	/// # Device.
	pub fn device(&self) -> Option<&str> { self.device.as_deref() }

	#[must_use]
	/// # Disc ID Override.
	pub const fn disc_id(&self) -> Option<u32> { self.disc_id }

	#[must_use]
	/// # Mode.
	pub const fn mode(&self) -> StreamMode { self.mode }

	#[must_use]
	/// # Track.
	pub const fn track(&self) -> Option<u32> { self.track }
}

/// ## Internal.
impl SourceOptions {
	/// # Set Mode.
	pub(crate) fn set_mode(&mut self, mode: StreamMode) { self.mode = mode; }

	/// # Set Device.
	pub(crate) fn set_device(&mut self, device: Option<String>) { self.device = device; }

	/// # Set Track.
	pub(crate) fn set_track(&mut self, track: Option<u32>) { self.track = track; }
}
