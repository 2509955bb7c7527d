//! Resource Identity
//!
//! Types that name a wrapped object and describe what it is:
//!
//! - [`ResourceId`]: process-unique identity used in capture data
//! - [`NativeHandle`]: the opaque token the API consumer holds
//! - [`ResourceKind`]: closed category fixed at wrap time
//! - [`WrappedResource`]: the real object plus identity, refcount and cached record

pub mod desc;
pub mod id;
pub mod kind;
pub mod wrapped;

pub use desc::{BufferDesc, TextureDesc, TextureDimension, ViewDesc};
pub use id::{NativeHandle, ResourceId};
pub use kind::{ResourceKind, ShaderStage};
pub use wrapped::{RealObject, WrappedResource};
