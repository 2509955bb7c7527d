//! Error Types
//!
//! This module defines the error type shared by every component of the capture core.
//!
//! # Overview
//!
//! [`CaptureError`] separates the failure classes the capture layer cares about:
//! - Contract violations by a caller (duplicate registration, reference underflow,
//!   asking for the size of the "no format" sentinel)
//! - Input that is valid but not understood (raw format values outside the known set)
//! - Input that is understood but deliberately unsupported (video / planar formats)
//! - I/O and decompression failures from best-effort enrichment paths
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, CaptureError>`.
//!
//! ```rust,ignore
//! use capture_core::format::{bits_per_pixel, PixelFormat};
//!
//! let bpp = bits_per_pixel(PixelFormat::R8G8B8A8Unorm)?;
//! assert_eq!(bpp, 32);
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::format::PixelFormat;
use crate::resources::{NativeHandle, ResourceId, ResourceKind};

/// The main error type for the capture core.
#[derive(Error, Debug)]
pub enum CaptureError {
    // ========================================================================
    // Format Errors
    // ========================================================================
    /// A size or layout query was made against [`PixelFormat::Unknown`].
    #[error("Format query on the unknown format sentinel")]
    UnknownFormat,

    /// A raw format value that is not part of the known format set.
    #[error("Unrecognised format value: {0}")]
    UnrecognisedFormat(u32),

    /// Video and planar formats have no single per-texel size.
    #[error("Video format not supported: {0:?}")]
    VideoFormatUnsupported(PixelFormat),

    /// The format does not belong to any layout class with a typeless root.
    #[error("No typeless format for {0:?}")]
    NoTypelessForm(PixelFormat),

    // ========================================================================
    // Registry Errors
    // ========================================================================
    /// An identity was registered twice while the first entry is still live.
    #[error("Duplicate {kind} registration for {id}")]
    DuplicateResource {
        /// Kind of the registry that rejected the entry
        kind: ResourceKind,
        /// The identity that is already live
        id: ResourceId,
    },

    /// A native handle was registered twice while the first entry is still live.
    #[error("Duplicate {kind} registration for handle {handle}")]
    DuplicateHandle {
        /// Kind of the registry that rejected the entry
        kind: ResourceKind,
        /// The handle that is already claimed
        handle: NativeHandle,
    },

    /// The identity is not registered in the given kind's registry.
    #[error("{kind} {id} not found")]
    ResourceNotFound {
        /// Kind of the registry that was searched
        kind: ResourceKind,
        /// The identity that was looked up
        id: ResourceId,
    },

    // ========================================================================
    // Lifetime Errors
    // ========================================================================
    /// More releases than acquires on a reference counter.
    #[error("Reference count underflow on {0}")]
    RefCountUnderflow(&'static str),

    /// `AddRef` or `Release` on a wrapper whose final release already ran.
    #[error("{kind} {id} used after its final release")]
    ResourceTornDown {
        /// Kind of the torn-down wrapper
        kind: ResourceKind,
        /// Identity of the torn-down wrapper
        id: ResourceId,
    },

    // ========================================================================
    // Shader Debug-Info Errors
    // ========================================================================
    /// A compressed debug blob could not be decompressed, even after a retry.
    #[error("Failed to decompress LZ4 data from {}: {reason}", path.display())]
    DecompressFailed {
        /// File the compressed data was read from
        path: PathBuf,
        /// Decoder error message
        reason: String,
    },

    // ========================================================================
    // I/O & Settings Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings JSON parse error.
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),
}

/// Alias for `Result<T, CaptureError>`.
pub type Result<T> = std::result::Result<T, CaptureError>;
