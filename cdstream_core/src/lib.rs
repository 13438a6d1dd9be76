/*!
# CD Stream: Library

This crate turns an audio CD (or anything that can pretend to be one) into
a continuous, seekable sequence of sectors.

The device itself is a pluggable collaborator (see [`SectorDevice`]); the
crate only concerns itself with the table of contents, the read position,
and the rules for crossing (or not crossing) track boundaries.

```
use cdstream_core::{
	CdSource,
	FixtureDevice,
	SourceOptions,
	StreamMode,
	Track,
};

let device = FixtureDevice::new([
	Track::audio(1, 0, 999),
	Track::audio(2, 1000, 1999),
]);
let opts = SourceOptions::default().with_mode(StreamMode::WholeDisc);
let mut src = CdSource::new(device, opts);
src.open(None).expect("Open failed.");

let unit = src.read_next().expect("Read failed.");
assert_eq!(unit.sector(), 0);
assert_eq!(unit.track_number(), 1);
```
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(
	clippy::doc_markdown,
	clippy::module_name_repetitions,
	clippy::redundant_pub_crate,
)]

mod correction;
mod device;
mod error;
mod opts;
mod sectors;
mod selector;
mod source;
mod table;
mod tags;
mod track;

pub use correction::TocCorrection;
pub use device::{
	fixture::FixtureDevice,
	image::ImageDevice,
	SectorBuffer,
	SectorDevice,
	TocBuilder,
};
pub use error::{
	BuildError,
	DeviceError,
	OpenError,
	SeekError,
	StreamError,
	TrackError,
};
pub use opts::{
	SourceOptions,
	StreamMode,
};
pub use sectors::Sectors;
pub use selector::CddaUri;
pub use source::{
	CdSource,
	DiscInfo,
	SectorUnit,
	SourceState,
	SeekTarget,
	TrackChange,
};
pub use table::TrackTable;
pub use tags::{
	TagKind,
	Tags,
};
pub use track::Track;



/// # Bytes Per Sample.
pub const BYTES_PER_SAMPLE: u16 = 4;

/// # Samples per sector.
pub const SAMPLES_PER_SECTOR: u16 = 588;

/// # Bytes Per Sector.
///
/// This is the number of bytes per sector of _audio_ data.
pub const BYTES_PER_SECTOR: u16 = SAMPLES_PER_SECTOR * BYTES_PER_SAMPLE;

/// # Sample Rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// # Sectors Per Second.
pub const SECTORS_PER_SECOND: u32 = 75;

/// # Number of lead-in sectors.
///
/// All discs have a 2-second region at the start before any data. Sector
/// numbers used by this crate exclude it, so the first track of a typical
/// disc starts at zero.
pub const CD_LEADIN: u16 = 150;

/// # Lead-out Label.
///
/// This is used solely for the table of contents printout; e.g. 01 02 03 AA.
pub const CD_LEADOUT_LABEL: &str = "AA";

/// # Default URI Scheme.
pub const CDDA_SCHEME: &str = "cdda";
