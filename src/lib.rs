#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Identity, lifetime and format bookkeeping for a graphics API capture layer.
//!
//! - [`format`]: per-format facts (sizes, classes, typeless/typed/sRGB siblings)
//! - [`registry`]: per-kind registries of wrapped objects and handle dispatch
//! - [`lifetime`]: hard/soft reference counting between resources and devices
//! - [`shader`]: shader records and debug-info recovery

pub mod errors;
pub mod format;
pub mod lifetime;
pub mod registry;
pub mod resources;
pub mod settings;
pub mod shader;

pub use errors::{CaptureError, Result};
pub use format::PixelFormat;
pub use lifetime::{DeviceRefs, RefCounter, SoftRefDevice};
pub use registry::{KindRegistry, Registry, ResourceRegistries};
pub use resources::{
    BufferDesc, NativeHandle, ResourceId, ResourceKind, ShaderStage, TextureDesc,
    TextureDimension, ViewDesc, WrappedResource,
};
pub use settings::CaptureSettings;
pub use shader::ShaderEntry;
