//! Shader debug-info recovery.
//!
//! Applications often ship stripped shader bytecode and keep the full blob,
//! debug chunks included, in a separate file. The stripped blob may record
//! where that file lives; this module finds it, optionally LZ4-decompresses
//! it, and hands it back only if it really carries debug information.
//!
//! Recovery is best-effort enrichment: every failure leaves the original
//! bytecode in place and is at most logged.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::dxbc;
use crate::errors::{CaptureError, Result};
use crate::settings::CaptureSettings;

/// Prefix on a recorded path marking the file as an LZ4 block.
pub const LZ4_MARKER: &str = "lz4#";

pub trait ReadSeek: Read + Seek + Send {}
impl<T: Read + Seek + Send> ReadSeek for T {}

/// File access used while searching for debug files.
pub trait DebugFileReader: Send + Sync {
    fn open(&self, path: &Path) -> std::io::Result<Box<dyn ReadSeek>>;
}

/// Reads debug files straight from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDebugFileReader;

impl DebugFileReader for FsDebugFileReader {
    fn open(&self, path: &Path) -> std::io::Result<Box<dyn ReadSeek>> {
        Ok(Box::new(File::open(path)?))
    }
}

/// Looks for the full version of `bytecode` and returns it if found.
///
/// `debug_path` overrides the path recorded inside the blob. Returns `None`
/// when the blob already has debug info, no path is known, no candidate file
/// exists, or the candidate turns out not to carry debug info either.
#[must_use]
pub fn try_replace_original_bytecode(
    bytecode: &[u8],
    debug_path: Option<&str>,
    settings: &CaptureSettings,
    reader: &dyn DebugFileReader,
) -> Option<Vec<u8>> {
    if dxbc::has_debug_info(bytecode) {
        return None;
    }

    let recorded = match debug_path.filter(|p| !p.is_empty()) {
        Some(path) => path.to_owned(),
        None => dxbc::debug_binary_path(bytecode)?,
    };

    match recover(bytecode, &recorded, settings, reader) {
        Ok(found) => found,
        Err(err) => {
            log::error!("{err}");
            None
        }
    }
}

fn recover(
    bytecode: &[u8],
    recorded: &str,
    settings: &CaptureSettings,
    reader: &dyn DebugFileReader,
) -> Result<Option<Vec<u8>>> {
    let (path, lz4) = match recorded.strip_prefix(LZ4_MARKER) {
        Some(rest) => (rest, true),
        None => (recorded, false),
    };

    let Some((found_path, mut file)) = open_candidate(path, &settings.debug_info_search_paths, reader)
    else {
        log::debug!("Shader debug file {path} not found in any search path");
        return Ok(None);
    };

    let size = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;

    // An uncompressed full blob can never be smaller than the stripped one.
    if !lz4 && size < bytecode.len() as u64 {
        log::debug!(
            "Ignoring {}: {size} bytes is smaller than the {} byte shader",
            found_path.display(),
            bytecode.len()
        );
        return Ok(None);
    }

    let mut contents = Vec::with_capacity(size as usize);
    file.read_to_end(&mut contents)?;

    if lz4 {
        contents = decompress_lz4(&contents, &found_path, settings)?;
    }

    if dxbc::has_debug_info(&contents) {
        log::info!("Recovered shader debug info from {}", found_path.display());
        Ok(Some(contents))
    } else {
        log::debug!("{} carries no debug info", found_path.display());
        Ok(None)
    }
}

/// Tries `path` as given, then under each search directory in order.
fn open_candidate(
    path: &str,
    search_paths: &[PathBuf],
    reader: &dyn DebugFileReader,
) -> Option<(PathBuf, Box<dyn ReadSeek>)> {
    std::iter::once(PathBuf::from(path))
        .chain(search_paths.iter().map(|dir| dir.join(path)))
        .find_map(|candidate| {
            log::trace!("Looking for shader debug file at {}", candidate.display());
            reader.open(&candidate).ok().map(|file| (candidate, file))
        })
}

/// Decompresses an LZ4 block of unknown decompressed size.
///
/// A fixed-size buffer is tried first; on failure the buffer grows to the
/// largest size the block could possibly expand to and decoding is retried.
pub fn decompress_lz4(compressed: &[u8], path: &Path, settings: &CaptureSettings) -> Result<Vec<u8>> {
    let mut out = vec![0u8; settings.lz4_initial_capacity];
    if let Ok(len) = lz4_flex::block::decompress_into(compressed, &mut out) {
        out.truncate(len);
        out.shrink_to_fit();
        return Ok(out);
    }

    out.resize(compressed.len().saturating_mul(settings.lz4_retry_ratio), 0);
    match lz4_flex::block::decompress_into(compressed, &mut out) {
        Ok(len) => {
            out.truncate(len);
            out.shrink_to_fit();
            Ok(out)
        }
        Err(err) => Err(CaptureError::DecompressFailed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::dxbc::{CHUNK_PRIV, CHUNK_SDBG, assemble, debug_path_chunk};
    use rustc_hash::FxHashMap;
    use std::io::Cursor;

    #[derive(Default)]
    struct MemoryReader {
        files: FxHashMap<PathBuf, Vec<u8>>,
    }

    impl DebugFileReader for MemoryReader {
        fn open(&self, path: &Path) -> std::io::Result<Box<dyn ReadSeek>> {
            self.files
                .get(path)
                .map(|data| Box::new(Cursor::new(data.clone())) as Box<dyn ReadSeek>)
                .ok_or_else(|| std::io::ErrorKind::NotFound.into())
        }
    }

    fn stripped(path: &str) -> Vec<u8> {
        let body = debug_path_chunk(path);
        assemble(&[(*b"SHEX", &[7; 8][..]), (CHUNK_PRIV, body.as_slice())])
    }

    fn full() -> Vec<u8> {
        assemble(&[(*b"SHEX", &[7; 8][..]), (CHUNK_SDBG, &[1; 256][..])])
    }

    #[test]
    fn search_paths_are_tried_after_literal_path() {
        let mut reader = MemoryReader::default();
        reader.files.insert(PathBuf::from("/pdb/a.bin"), full());
        let settings = CaptureSettings::default()
            .with_search_path("/missing")
            .with_search_path("/pdb");

        let recovered = try_replace_original_bytecode(&stripped("a.bin"), None, &settings, &reader);
        assert_eq!(recovered, Some(full()));
    }

    #[test]
    fn override_wins_over_recorded_path() {
        let mut reader = MemoryReader::default();
        reader.files.insert(PathBuf::from("override.bin"), full());
        let settings = CaptureSettings::default();

        let recovered = try_replace_original_bytecode(
            &stripped("recorded.bin"),
            Some("override.bin"),
            &settings,
            &reader,
        );
        assert!(recovered.is_some());
    }

    #[test]
    fn candidate_without_debug_info_is_rejected() {
        let mut reader = MemoryReader::default();
        let decoy = assemble(&[(*b"SHEX", &[0; 512][..])]);
        reader.files.insert(PathBuf::from("decoy.bin"), decoy);

        let settings = CaptureSettings::default();
        assert_eq!(
            try_replace_original_bytecode(&stripped("decoy.bin"), None, &settings, &reader),
            None
        );
    }

    #[test]
    fn retry_handles_output_larger_than_initial_guess() {
        let payload = vec![3u8; 4096];
        let compressed = lz4_flex::block::compress(&payload);
        let settings = CaptureSettings {
            lz4_initial_capacity: 16,
            ..CaptureSettings::default()
        };
        let out = decompress_lz4(&compressed, Path::new("x"), &settings).unwrap();
        assert_eq!(out, payload);
    }

    #[test]
    fn garbage_fails_to_decompress() {
        let settings = CaptureSettings::default();
        let err = decompress_lz4(&[0xff; 8], Path::new("broken.lz4"), &settings).unwrap_err();
        assert!(err.to_string().starts_with("Failed to decompress LZ4 data from broken.lz4"));
    }
}
