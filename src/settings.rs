//! Capture Settings
//!
//! Runtime configuration of the capture core. Every field has a working
//! default, so a settings file only needs to name what it changes.
//!
//! ```rust,ignore
//! use capture_core::CaptureSettings;
//!
//! let settings = CaptureSettings::from_json_str(
//!     r#"{ "debug_info_search_paths": ["C:/build/shaders/pdb"] }"#,
//! )?;
//! assert!(settings.recover_shader_debug_info);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::Result;

/// First output buffer size tried when decompressing an LZ4 debug blob.
pub const DEFAULT_LZ4_INITIAL_CAPACITY: usize = 100 * 1024;

/// LZ4 never expands more than this factor, so a retry at
/// `ratio × compressed size` always has room.
pub const DEFAULT_LZ4_RETRY_RATIO: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Directories searched for external shader debug files, in order, after
    /// the recorded path itself.
    pub debug_info_search_paths: Vec<PathBuf>,

    pub lz4_initial_capacity: usize,

    pub lz4_retry_ratio: usize,

    /// When false, shader bytecode is always used exactly as the application
    /// supplied it.
    pub recover_shader_debug_info: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            debug_info_search_paths: Vec::new(),
            lz4_initial_capacity: DEFAULT_LZ4_INITIAL_CAPACITY,
            lz4_retry_ratio: DEFAULT_LZ4_RETRY_RATIO,
            recover_shader_debug_info: true,
        }
    }
}

impl CaptureSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&text)?;
        log::debug!("Loaded capture settings from {}", path.as_ref().display());
        Ok(settings)
    }

    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_info_search_paths.push(path.into());
        self
    }
}
