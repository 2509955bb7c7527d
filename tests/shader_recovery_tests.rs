//! Shader Debug-Info Recovery Tests
//!
//! Tests for:
//! - Recovery of an uncompressed debug file from a search directory
//! - Recovery of an `lz4#`-marked compressed debug file
//! - Size gate on uncompressed candidates
//! - Corrupt compressed data leaving the original bytecode in place
//! - Lazy, once-only recovery through `ShaderEntry`
//! - Settings loaded from a JSON file

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use capture_core::resources::ShaderStage;
use capture_core::settings::CaptureSettings;
use capture_core::shader::dxbc::{self, CHUNK_PRIV, CHUNK_SDBG};
use capture_core::shader::{FsDebugFileReader, ShaderEntry, try_replace_original_bytecode};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn stripped_shader(debug_path: &str) -> Vec<u8> {
    let priv_body = dxbc::debug_path_chunk(debug_path);
    dxbc::assemble(&[(*b"SHEX", &[0x11; 64][..]), (CHUNK_PRIV, priv_body.as_slice())])
}

fn full_shader() -> Vec<u8> {
    dxbc::assemble(&[(*b"SHEX", &[0x11; 64][..]), (CHUNK_SDBG, &[0x5a; 2048][..])])
}

fn settings_with(dir: &Path) -> CaptureSettings {
    CaptureSettings::default().with_search_path(dir)
}

// ============================================================================
// Search & Size Gate
// ============================================================================

#[test]
fn uncompressed_file_found_in_search_path() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    fs::write(dir.path().join("blur_ps.bin"), full_shader())?;

    let recovered = try_replace_original_bytecode(
        &stripped_shader("blur_ps.bin"),
        None,
        &settings_with(dir.path()),
        &FsDebugFileReader,
    );
    assert_eq!(recovered, Some(full_shader()));
    Ok(())
}

#[test]
fn literal_path_is_tried_first() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("absolute.bin");
    fs::write(&path, full_shader())?;

    let bytecode = stripped_shader(&path.to_string_lossy());
    let recovered =
        try_replace_original_bytecode(&bytecode, None, &CaptureSettings::default(), &FsDebugFileReader);
    assert!(recovered.is_some());
    Ok(())
}

#[test]
fn smaller_uncompressed_file_is_ignored() -> Result<()> {
    let dir = TempDir::new()?;
    let tiny = dxbc::assemble(&[(CHUNK_SDBG, &[1; 4][..])]);
    let bytecode = stripped_shader("tiny.bin");
    assert!(tiny.len() < bytecode.len());
    fs::write(dir.path().join("tiny.bin"), tiny)?;

    let recovered =
        try_replace_original_bytecode(&bytecode, None, &settings_with(dir.path()), &FsDebugFileReader);
    assert_eq!(recovered, None);
    Ok(())
}

#[test]
fn missing_file_keeps_original() {
    let recovered = try_replace_original_bytecode(
        &stripped_shader("nowhere/to/be/found.bin"),
        None,
        &CaptureSettings::default(),
        &FsDebugFileReader,
    );
    assert_eq!(recovered, None);
}

// ============================================================================
// LZ4
// ============================================================================

#[test]
fn lz4_marked_file_is_decompressed() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let compressed = lz4_flex::block::compress(&full_shader());
    // Compressed files skip the size gate.
    let bytecode = stripped_shader("lz4#shader.lz4");
    fs::write(dir.path().join("shader.lz4"), compressed)?;

    let recovered =
        try_replace_original_bytecode(&bytecode, None, &settings_with(dir.path()), &FsDebugFileReader);
    assert_eq!(recovered, Some(full_shader()));
    Ok(())
}

#[test]
fn large_lz4_payload_needs_the_retry() -> Result<()> {
    let dir = TempDir::new()?;
    let big = dxbc::assemble(&[(CHUNK_SDBG, &vec![0u8; 200 * 1024][..])]);
    fs::write(dir.path().join("big.lz4"), lz4_flex::block::compress(&big))?;

    let recovered = try_replace_original_bytecode(
        &stripped_shader("lz4#big.lz4"),
        None,
        &settings_with(dir.path()),
        &FsDebugFileReader,
    );
    assert_eq!(recovered.map(|blob| blob.len()), Some(big.len()));
    Ok(())
}

#[test]
fn corrupt_lz4_keeps_original() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    fs::write(dir.path().join("broken.lz4"), [0xf0u8; 32])?;

    let recovered = try_replace_original_bytecode(
        &stripped_shader("lz4#broken.lz4"),
        None,
        &settings_with(dir.path()),
        &FsDebugFileReader,
    );
    assert_eq!(recovered, None);
    Ok(())
}

// ============================================================================
// ShaderEntry
// ============================================================================

#[test]
fn entry_recovers_lazily_and_once() -> Result<()> {
    let dir = TempDir::new()?;
    let file = dir.path().join("lazy.bin");
    fs::write(&file, full_shader())?;

    let settings = Arc::new(settings_with(dir.path()));
    let entry = ShaderEntry::new(ShaderStage::Compute, stripped_shader("lazy.bin"), settings);
    assert!(!entry.is_resolved());

    assert_eq!(entry.bytecode(), full_shader().as_slice());
    assert!(entry.is_recovered());
    assert!(entry.has_debug_info());

    // The file is no longer needed once recovered.
    fs::remove_file(&file)?;
    assert_eq!(entry.bytecode(), full_shader().as_slice());
    assert_eq!(entry.original_bytecode(), stripped_shader("lazy.bin").as_slice());
    Ok(())
}

#[test]
fn entry_debug_path_override() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("override.bin"), full_shader())?;

    let settings = Arc::new(settings_with(dir.path()));
    let entry = ShaderEntry::new(ShaderStage::Domain, stripped_shader("recorded.bin"), settings);
    entry.set_debug_path("override.bin");

    assert!(entry.has_debug_info());
    assert!(entry.is_recovered());
    Ok(())
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_from_json_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("capture.json");
    fs::write(
        &path,
        r#"{ "debug_info_search_paths": ["/opt/pdb"], "recover_shader_debug_info": false }"#,
    )?;

    let settings = CaptureSettings::from_json_file(&path)?;
    assert_eq!(settings.debug_info_search_paths.len(), 1);
    assert!(!settings.recover_shader_debug_info);
    assert_eq!(settings.lz4_retry_ratio, 255);
    Ok(())
}
