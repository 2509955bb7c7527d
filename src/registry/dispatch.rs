//! Type identification of opaque handles.
//!
//! A handle passed across the API may be a wrapper this layer created or a
//! foreign object it has never seen. Handles are never dereferenced; each
//! registry is asked "is this one of yours?" in [`PROBE_ORDER`] and the first
//! claimant decides the kind.

use super::ResourceRegistries;
use crate::resources::{NativeHandle, ResourceId, ResourceKind, ShaderStage};

/// Order in which the per-kind registries are probed.
pub const PROBE_ORDER: [ResourceKind; 26] = [
    ResourceKind::InputLayout,
    ResourceKind::Shader(ShaderStage::Vertex),
    ResourceKind::Shader(ShaderStage::Pixel),
    ResourceKind::Shader(ShaderStage::Geometry),
    ResourceKind::Shader(ShaderStage::Hull),
    ResourceKind::Shader(ShaderStage::Domain),
    ResourceKind::Shader(ShaderStage::Compute),
    ResourceKind::Buffer,
    ResourceKind::Texture1D,
    ResourceKind::Texture2D,
    ResourceKind::Texture3D,
    ResourceKind::RasterizerState,
    ResourceKind::BlendState,
    ResourceKind::DepthStencilState,
    ResourceKind::SamplerState,
    ResourceKind::RenderTargetView,
    ResourceKind::ShaderResourceView,
    ResourceKind::DepthStencilView,
    ResourceKind::UnorderedAccessView,
    ResourceKind::Counter,
    ResourceKind::Query,
    ResourceKind::Predicate,
    ResourceKind::ClassInstance,
    ResourceKind::ClassLinkage,
    ResourceKind::DeviceContext,
    ResourceKind::CommandList,
];

impl ResourceRegistries {
    #[must_use]
    pub fn probe_order(&self) -> &'static [ResourceKind] {
        &PROBE_ORDER
    }

    /// Kind of the wrapper behind `handle`, or `None` for null and foreign
    /// handles. A foreign handle is logged.
    #[must_use]
    pub fn identify_kind(&self, handle: NativeHandle) -> Option<ResourceKind> {
        if handle.is_null() {
            return None;
        }
        let found = PROBE_ORDER
            .iter()
            .copied()
            .find(|kind| self.registry(*kind).contains_handle(handle));

        if cfg!(debug_assertions)
            && let Some(kind) = found
        {
            let claimants = PROBE_ORDER
                .iter()
                .filter(|k| self.registry(**k).contains_handle(handle))
                .count();
            debug_assert_eq!(claimants, 1, "handle {handle} claimed by {kind} and another registry");
        }

        if found.is_none() {
            log::error!("Unknown type for ptr {handle}");
        }
        found
    }

    /// Identity of the wrapper behind `handle`.
    ///
    /// A null handle maps to [`ResourceId::NULL`] silently. A non-null handle
    /// that no registry claims is a foreign object: it is logged and also maps
    /// to [`ResourceId::NULL`].
    #[must_use]
    pub fn identity_of(&self, handle: NativeHandle) -> ResourceId {
        if handle.is_null() {
            return ResourceId::NULL;
        }
        for kind in PROBE_ORDER {
            if let Some(id) = self.registry(kind).identity_of(handle) {
                return id;
            }
        }
        log::error!("Unknown type for ptr {handle}");
        ResourceId::NULL
    }
}
