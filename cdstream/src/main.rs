/*!
# CD Stream
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

mod cli;
mod error;
mod export;

use cdstream_core::{
	CdSource,
	ImageDevice,
	StreamError,
	StreamMode,
	TagKind,
};
use error::CdStreamError;
use export::WavSink;
use log::{
	debug,
	info,
	warn,
};
use std::{
	path::Path,
	process::ExitCode,
	sync::atomic::{
		AtomicBool,
		Ordering::{
			Acquire,
			Release,
		},
	},
};



/// # Kill Switch.
///
/// The CTRL-C intercept sets this, letting the stream loop tidy up before
/// dying.
static KILLED: AtomicBool = AtomicBool::new(false);

/// # Read Retries.
///
/// The number of times a failed sector read is retried before giving up.
const RETRIES: u8 = 3;



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() -> ExitCode {
	match main__() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("Error: {e}");
			ExitCode::FAILURE
		},
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff.
fn main__() -> Result<(), CdStreamError> {
	let cli::Settings { mut source, tracks, output, level, no_stream } = cli::parse()?;
	colog::default_builder().filter_level(level).init();

	if let Err(e) = ctrlc::set_handler(|| { KILLED.store(true, Release); }) {
		warn!("Unable to intercept CTRL-C: {e}");
	}

	source.open(None)?;
	summary(&source);

	// Go ahead and leave if there's no streaming to do.
	if no_stream { return Ok(()); }

	let prefix = source.disc().id().map_or_else(
		|| String::from("cdstream"),
		|id| format!("{id:08x}"),
	);

	if source.mode() == StreamMode::WholeDisc {
		stream(&mut source, &output, &format!("{prefix}.wav"))?;
	}
	else {
		let tracks =
			if tracks.is_empty() {
				source.table().audio_tracks().map(|(_, t)| t.number()).collect()
			}
			else { tracks };

		for n in tracks {
			source.select_track(n)?;
			stream(&mut source, &output, &format!("{prefix}_{n:02}.wav"))?;
		}
	}

	source.close();
	Ok(())
}

/// # Summary.
///
/// Print the table of contents and any disc tags.
fn summary(source: &CdSource<ImageDevice>) {
	let disc = source.disc();
	if let Some(id) = disc.id() { eprintln!("Disc ID: {id:08x}"); }
	for (k, v) in disc.tags().iter() {
		if ! matches!(k, TagKind::DiscId | TagKind::TrackCount) {
			eprintln!("{k}: {v}");
		}
	}
	eprintln!("\n{}", source.table());
}

/// # Stream.
///
/// Read the current segment from start to end, saving it as a WAV.
fn stream(source: &mut CdSource<ImageDevice>, dir: &Path, name: &str)
-> Result<(), CdStreamError> {
	let mut sink = WavSink::new(dir.join(name))?;
	let mut tries = 0;

	loop {
		if KILLED.load(Acquire) { return Err(CdStreamError::Killed); }

		match source.read_next() {
			Ok(unit) => {
				tries = 0;
				if let Some(change) = unit.track_change() {
					info!(
						"Track #{:02} ({}).",
						change.number(),
						change.tags().get(TagKind::Duration).unwrap_or("??:??:??"),
					);
				}
				sink.push(unit.data().as_bytes())?;
			},
			Err(StreamError::EndOfStream) => break,
			Err(e @ StreamError::DeviceReadFailed(_)) if tries < RETRIES => {
				tries += 1;
				debug!("{e} (retry {tries}/{RETRIES})");
			},
			Err(e) => return Err(e.into()),
		}
	}

	let (dst, len, crc) = sink.finish()?;
	println!("{}  {len}  {crc:08X}", dst.display());
	Ok(())
}
