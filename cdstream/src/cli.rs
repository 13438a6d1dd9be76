/*!
# CD Stream: CLI
*/

use crate::CdStreamError;
use cdstream_core::{
	BYTES_PER_SECTOR,
	CddaUri,
	CdSource,
	ImageDevice,
	SourceOptions,
	StreamMode,
	TocCorrection,
	Track,
};
use clap::{
	ArgAction,
	Parser,
};
use log::LevelFilter;
use std::{
	collections::BTreeSet,
	path::{
		Path,
		PathBuf,
	},
};



#[derive(Debug, Parser)]
#[command(
	name = "cdstream",
	version,
	about = "Stream a raw CD-DA image to WAV, track-by-track or as one continuous disc.",
	long_about = None,
)]
/// # CLI Arguments.
struct Cli {
	#[arg(
		short = 'd',
		long = "dev",
		value_name = "PATH",
		help = "The raw (2352-byte sector) disc image to read."
	)]
	/// # Image Path.
	dev: Option<String>,

	#[arg(
		long = "toc",
		value_name = "CDTOC",
		help = "The table of contents, as a CDTOC string like 4+96+2D2B+6256+B327+D84A. [default: one track spanning the image]"
	)]
	/// # Table of Contents.
	toc: Option<String>,

	#[arg(
		short = 't',
		long = "track",
		value_name = "NUM",
		help = "Stream this track (by TOC number). Repeat for more. [default: every audio track]"
	)]
	/// # Tracks.
	tracks: Vec<u32>,

	#[arg(
		long = "uri",
		value_name = "URI",
		conflicts_with = "tracks",
		help = "Select the image and track with a cdda://[PATH#]NUM URI."
	)]
	/// # URI.
	uri: Option<String>,

	#[arg(
		long = "whole-disc",
		conflicts_with_all = ["tracks", "uri"],
		help = "Stream the whole disc to a single file."
	)]
	/// # Whole Disc.
	whole_disc: bool,

	#[arg(
		long = "toc-offset",
		value_name = "SECTORS",
		allow_hyphen_values = true,
		value_parser = parse_offset,
		default_value = "0",
		help = "Shift device reads by this many sectors."
	)]
	/// # TOC Offset.
	toc_offset: TocCorrection,

	#[arg(
		long = "toc-bias",
		help = "Treat the first track's start as sector zero when reading."
	)]
	/// # TOC Bias.
	toc_bias: bool,

	#[arg(
		long = "disc-id",
		value_name = "HEX",
		value_parser = parse_disc_id,
		help = "Use this (CDDB-style) disc ID instead of the one from the TOC."
	)]
	/// # Disc ID.
	disc_id: Option<u32>,

	#[arg(
		short = 'o',
		long = "output",
		value_name = "DIR",
		default_value = ".",
		help = "Save the WAV files to this directory."
	)]
	/// # Output Directory.
	output: PathBuf,

	#[arg(
		long = "no-stream",
		help = "Print the table of contents and exit."
	)]
	/// # No Stream.
	no_stream: bool,

	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Log more. Repeat for even more."
	)]
	/// # Verbosity.
	verbose: u8,

	#[arg(
		short = 'q',
		long = "quiet",
		conflicts_with = "verbose",
		help = "Only log errors."
	)]
	/// # Quiet.
	quiet: bool,
}



/// # Parsed Settings.
pub(super) struct Settings {
	/// # Source.
	pub(super) source: CdSource<ImageDevice>,

	/// # Track Numbers.
	///
	/// This is empty in whole-disc mode, and when every track is wanted.
	pub(super) tracks: Vec<u32>,

	/// # Output Directory.
	pub(super) output: PathBuf,

	/// # Log Level.
	pub(super) level: LevelFilter,

	/// # No Stream.
	pub(super) no_stream: bool,
}



/// # Parse Options.
///
/// Parse the CLI arguments and set up an (unopened) source from them.
pub(super) fn parse() -> Result<Settings, CdStreamError> { settings(Cli::parse()) }

/// # Settings From Arguments.
fn settings(cli: Cli) -> Result<Settings, CdStreamError> {
	let level =
		if cli.quiet { LevelFilter::Error }
		else {
			match cli.verbose {
				0 => LevelFilter::Info,
				1 => LevelFilter::Debug,
				_ => LevelFilter::Trace,
			}
		};

	// The URI might carry the path, but it can't disagree with -d.
	let uri = cli.uri.as_deref()
		.map(CddaUri::parse)
		.transpose()?;
	let uri_dev = uri.as_ref().and_then(CddaUri::device);
	let path = match (cli.dev.as_deref(), uri_dev) {
		(Some(a), Some(b)) if a != b => return Err(CdStreamError::CliParse("--uri")),
		(Some(p), _) | (None, Some(p)) => p.to_owned(),
		(None, None) => return Err(CdStreamError::CliParse("-d/--dev")),
	};

	let device = match cli.toc.as_deref() {
		Some(toc) => ImageDevice::from_cdtoc(toc)?,
		None => ImageDevice::new([whole_image(&path)?]),
	};
	let device =
		if let Some(id) = cli.disc_id { device.with_disc_id(id) }
		else { device };

	let opts = SourceOptions::default()
		.with_device(path)
		.with_mode(if cli.whole_disc { StreamMode::WholeDisc } else { StreamMode::PerTrack })
		.with_correction(cli.toc_offset.with_bias(cli.toc_bias));
	let opts =
		if let Some(id) = cli.disc_id { opts.with_disc_id(id) }
		else { opts };

	let mut source = CdSource::new(device, opts);
	let mut tracks = cli.tracks;
	if let Some(uri) = uri {
		source.select_uri(&uri.to_string())?;
		tracks.push(uri.track());
	}
	dedup(&mut tracks);

	Ok(Settings {
		source,
		tracks,
		output: cli.output,
		level,
		no_stream: cli.no_stream,
	})
}



/// # Dedup Tracks.
///
/// Remove repeated track numbers, keeping the first occurrence of each.
fn dedup(tracks: &mut Vec<u32>) {
	let mut seen = BTreeSet::new();
	tracks.retain(|&n| seen.insert(n));
}

/// # Single-Track TOC.
///
/// Without a table of contents, treat the whole image as one track.
fn whole_image(path: &str) -> Result<Track, CdStreamError> {
	let len = Path::new(path).metadata()
		.map(|m| m.len())
		.map_err(|_| CdStreamError::CliParse("-d/--dev"))?;
	let sectors = u32::try_from(len / u64::from(BYTES_PER_SECTOR))
		.ok()
		.filter(|&s| s != 0)
		.ok_or(CdStreamError::CliParse("-d/--dev"))?;
	Ok(Track::audio(1, 0, sectors - 1))
}

/// # Parse TOC Offset.
fn parse_offset(src: &str) -> Result<TocCorrection, String> {
	TocCorrection::try_from(src)
		.map_err(|()| format!("expected a sector offset between -450000 and 450000, not {src:?}"))
}

/// # Parse Disc ID.
fn parse_disc_id(src: &str) -> Result<u32, String> {
	let src = src.trim();
	let hex = src.strip_prefix("0x").unwrap_or(src);
	u32::from_str_radix(hex, 16)
		.map_err(|_| format!("expected an eight-digit hex ID, not {src:?}"))
}
