//! Shader Entries
//!
//! The per-shader record kept in the shader registries. A [`ShaderEntry`]
//! holds the bytecode the application supplied and, on first use, swaps in a
//! full debug-info blob if one can be recovered (see [`recovery`]).

pub mod dxbc;
pub mod recovery;

pub use recovery::{DebugFileReader, FsDebugFileReader, try_replace_original_bytecode};

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::resources::ShaderStage;
use crate::settings::CaptureSettings;

pub struct ShaderEntry {
    stage: ShaderStage,
    original: Vec<u8>,
    debug_path: Mutex<Option<String>>,
    settings: Arc<CaptureSettings>,
    reader: Arc<dyn DebugFileReader>,
    /// `Some` once a recovered blob replaced the original.
    resolved: OnceLock<Option<Vec<u8>>>,
}

impl ShaderEntry {
    #[must_use]
    pub fn new(stage: ShaderStage, bytecode: Vec<u8>, settings: Arc<CaptureSettings>) -> Self {
        Self {
            stage,
            original: bytecode,
            debug_path: Mutex::new(None),
            settings,
            reader: Arc::new(FsDebugFileReader),
            resolved: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_reader(mut self, reader: Arc<dyn DebugFileReader>) -> Self {
        self.reader = reader;
        self
    }

    #[inline]
    #[must_use]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Overrides the debug-file path recorded in the bytecode.
    ///
    /// Only has an effect before the first [`ShaderEntry::bytecode`] call.
    pub fn set_debug_path(&self, path: impl Into<String>) {
        if self.is_resolved() {
            log::warn!("Debug path set on a {:?} shader whose bytecode is already in use", self.stage);
        }
        *self.debug_path.lock() = Some(path.into());
    }

    /// Bytecode exactly as the application supplied it.
    #[inline]
    #[must_use]
    pub fn original_bytecode(&self) -> &[u8] {
        &self.original
    }

    /// Bytecode to use for capture and reflection.
    ///
    /// The first call attempts debug-info recovery; every later call returns
    /// the same blob.
    #[must_use]
    pub fn bytecode(&self) -> &[u8] {
        self.resolved
            .get_or_init(|| {
                if self.settings.recover_shader_debug_info {
                    self.try_replace_original_bytecode()
                } else {
                    None
                }
            })
            .as_deref()
            .unwrap_or(&self.original)
    }

    /// Runs one recovery attempt without caching the result.
    #[must_use]
    pub fn try_replace_original_bytecode(&self) -> Option<Vec<u8>> {
        let debug_path = self.debug_path.lock().clone();
        recovery::try_replace_original_bytecode(
            &self.original,
            debug_path.as_deref(),
            &self.settings,
            self.reader.as_ref(),
        )
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Whether the bytecode in use was recovered from an external file.
    #[must_use]
    pub fn is_recovered(&self) -> bool {
        matches!(self.resolved.get(), Some(Some(_)))
    }

    #[must_use]
    pub fn has_debug_info(&self) -> bool {
        dxbc::has_debug_info(self.bytecode())
    }
}

impl std::fmt::Debug for ShaderEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderEntry")
            .field("stage", &self.stage)
            .field("original_len", &self.original.len())
            .field("recovered", &self.is_recovered())
            .finish_non_exhaustive()
    }
}
