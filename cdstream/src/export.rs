/*!
# CD Stream: WAV Export
*/

use crate::CdStreamError;
use cdstream_core::{
	SAMPLE_RATE,
	Sectors,
};
use crc32fast::Hasher as Crc;
use hound::{
	SampleFormat,
	WavSpec,
	WavWriter,
};
use std::{
	fs::File,
	io::BufWriter,
	path::{
		Path,
		PathBuf,
	},
};
use tempfile::NamedTempFile;



/// # Wave Spec.
const WAVE_SPEC: WavSpec = WavSpec {
	channels: 2,
	sample_rate: SAMPLE_RATE,
	bits_per_sample: 16,
	sample_format: SampleFormat::Int,
};



/// # WAV Sink.
///
/// Sectors are written to a temporary file next to the destination, which
/// only replaces the destination once [`WavSink::finish`] is called. If the
/// sink is dropped instead, the partial file is discarded.
pub(super) struct WavSink {
	/// # Destination.
	dst: PathBuf,

	/// # Temporary File.
	tmp: NamedTempFile,

	/// # Writer.
	wav: WavWriter<BufWriter<File>>,

	/// # Checksum.
	crc: Crc,

	/// # Sectors Written.
	len: u32,
}

impl WavSink {
	/// # New.
	///
	/// ## Errors
	///
	/// This will return an error if the temporary file can't be created.
	pub(super) fn new(dst: PathBuf) -> Result<Self, CdStreamError> {
		let err = || CdStreamError::Write(dst.to_string_lossy().into_owned());
		let dir = dst.parent()
			.filter(|p| ! p.as_os_str().is_empty())
			.unwrap_or_else(|| Path::new("."));

		let tmp = NamedTempFile::new_in(dir).map_err(|_| err())?;
		let file = tmp.reopen().map_err(|_| err())?;
		let wav = WavWriter::new(BufWriter::new(file), WAVE_SPEC).map_err(|_| err())?;

		Ok(Self {
			dst,
			tmp,
			wav,
			crc: Crc::new(),
			len: 0,
		})
	}

	/// # Push Sector.
	///
	/// In CD contexts, a sample is an L+R pair; hound counts each channel
	/// separately.
	///
	/// ## Errors
	///
	/// This will return an error if the data can't be written.
	pub(super) fn push(&mut self, data: &[u8]) -> Result<(), CdStreamError> {
		self.crc.update(data);
		for pair in data.chunks_exact(2) {
			self.wav.write_sample(i16::from_le_bytes([pair[0], pair[1]]))
				.map_err(|_| CdStreamError::Write(self.dst.to_string_lossy().into_owned()))?;
		}
		self.len += 1;
		Ok(())
	}

	/// # Finish.
	///
	/// Finalize the WAV headers and move the file into place, returning the
	/// destination, the amount of audio written, and the CRC32 of the raw
	/// sector data.
	///
	/// ## Errors
	///
	/// This will return an error if the file can't be finalized or saved.
	pub(super) fn finish(self) -> Result<(PathBuf, Sectors, u32), CdStreamError> {
		let Self { dst, tmp, wav, crc, len } = self;
		let err = CdStreamError::Write(dst.to_string_lossy().into_owned());

		wav.finalize().map_err(|_| err.clone())?;
		tmp.persist(&dst).map_err(|_| err)?;
		Ok((dst, Sectors::new(len), crc.finalize()))
	}
}
