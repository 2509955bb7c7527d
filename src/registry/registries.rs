use std::sync::Arc;

use super::{KindRegistry, Registry};
use crate::resources::{
    BufferDesc, ResourceId, ResourceKind, ShaderStage, TextureDesc, ViewDesc,
};
use crate::shader::ShaderEntry;

/// Every per-kind registry of one capture session.
///
/// Owned by the session (or device) and passed to whoever needs to wrap or
/// resolve objects; there is no process-global registry.
pub struct ResourceRegistries {
    pub buffers: Arc<Registry<BufferDesc>>,
    pub textures_1d: Arc<Registry<TextureDesc>>,
    pub textures_2d: Arc<Registry<TextureDesc>>,
    pub textures_3d: Arc<Registry<TextureDesc>>,
    pub input_layouts: Arc<Registry<()>>,
    pub sampler_states: Arc<Registry<()>>,
    pub rasterizer_states: Arc<Registry<()>>,
    pub blend_states: Arc<Registry<()>>,
    pub depth_stencil_states: Arc<Registry<()>>,
    pub shader_resource_views: Arc<Registry<ViewDesc>>,
    pub unordered_access_views: Arc<Registry<ViewDesc>>,
    pub render_target_views: Arc<Registry<ViewDesc>>,
    pub depth_stencil_views: Arc<Registry<ViewDesc>>,
    shaders: [Arc<Registry<ShaderEntry>>; 6],
    pub counters: Arc<Registry<()>>,
    pub queries: Arc<Registry<()>>,
    pub predicates: Arc<Registry<()>>,
    pub class_instances: Arc<Registry<()>>,
    pub class_linkages: Arc<Registry<()>>,
    pub device_contexts: Arc<Registry<()>>,
    pub command_lists: Arc<Registry<()>>,
}

fn registry<T>(kind: ResourceKind) -> Arc<Registry<T>> {
    Arc::new(Registry::new(kind))
}

impl ResourceRegistries {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffers: registry(ResourceKind::Buffer),
            textures_1d: registry(ResourceKind::Texture1D),
            textures_2d: registry(ResourceKind::Texture2D),
            textures_3d: registry(ResourceKind::Texture3D),
            input_layouts: registry(ResourceKind::InputLayout),
            sampler_states: registry(ResourceKind::SamplerState),
            rasterizer_states: registry(ResourceKind::RasterizerState),
            blend_states: registry(ResourceKind::BlendState),
            depth_stencil_states: registry(ResourceKind::DepthStencilState),
            shader_resource_views: registry(ResourceKind::ShaderResourceView),
            unordered_access_views: registry(ResourceKind::UnorderedAccessView),
            render_target_views: registry(ResourceKind::RenderTargetView),
            depth_stencil_views: registry(ResourceKind::DepthStencilView),
            shaders: ShaderStage::ALL.map(|stage| registry(ResourceKind::Shader(stage))),
            counters: registry(ResourceKind::Counter),
            queries: registry(ResourceKind::Query),
            predicates: registry(ResourceKind::Predicate),
            class_instances: registry(ResourceKind::ClassInstance),
            class_linkages: registry(ResourceKind::ClassLinkage),
            device_contexts: registry(ResourceKind::DeviceContext),
            command_lists: registry(ResourceKind::CommandList),
        }
    }

    #[must_use]
    pub fn shaders(&self, stage: ShaderStage) -> &Arc<Registry<ShaderEntry>> {
        &self.shaders[stage as usize]
    }

    /// The registry holding wrappers of `kind`, type-erased.
    #[must_use]
    pub fn registry(&self, kind: ResourceKind) -> &dyn KindRegistry {
        match kind {
            ResourceKind::Buffer => &*self.buffers,
            ResourceKind::Texture1D => &*self.textures_1d,
            ResourceKind::Texture2D => &*self.textures_2d,
            ResourceKind::Texture3D => &*self.textures_3d,
            ResourceKind::InputLayout => &*self.input_layouts,
            ResourceKind::SamplerState => &*self.sampler_states,
            ResourceKind::RasterizerState => &*self.rasterizer_states,
            ResourceKind::BlendState => &*self.blend_states,
            ResourceKind::DepthStencilState => &*self.depth_stencil_states,
            ResourceKind::ShaderResourceView => &*self.shader_resource_views,
            ResourceKind::UnorderedAccessView => &*self.unordered_access_views,
            ResourceKind::RenderTargetView => &*self.render_target_views,
            ResourceKind::DepthStencilView => &*self.depth_stencil_views,
            ResourceKind::Shader(stage) => &**self.shaders(stage),
            ResourceKind::Counter => &*self.counters,
            ResourceKind::Query => &*self.queries,
            ResourceKind::Predicate => &*self.predicates,
            ResourceKind::ClassInstance => &*self.class_instances,
            ResourceKind::ClassLinkage => &*self.class_linkages,
            ResourceKind::DeviceContext => &*self.device_contexts,
            ResourceKind::CommandList => &*self.command_lists,
        }
    }

    /// Cached descriptor of a live texture of any dimension.
    #[must_use]
    pub fn texture_desc(&self, id: ResourceId) -> Option<TextureDesc> {
        [&self.textures_1d, &self.textures_2d, &self.textures_3d]
            .into_iter()
            .find_map(|textures| textures.lookup(id))
            .map(|wrapper| *wrapper.record())
    }

    /// Total number of live wrappers across every kind.
    #[must_use]
    pub fn live_count(&self) -> usize {
        ResourceKind::ALL
            .iter()
            .map(|kind| self.registry(*kind).len())
            .sum()
    }

    /// Drops every remaining entry at session shutdown.
    ///
    /// Anything still registered was never released by the application; each
    /// such wrapper is reported as a leak and reclaimed: its real object is
    /// dropped and its device soft references are returned, so the device can
    /// still be torn down. Returns the leaked identities.
    pub fn clear(&self) -> Vec<(ResourceKind, ResourceId)> {
        let mut leaked = Vec::new();
        for kind in ResourceKind::ALL {
            for id in self.registry(kind).clear() {
                log::warn!("Leaked {kind} {id} at shutdown");
                leaked.push((kind, id));
            }
        }
        leaked
    }
}

impl Default for ResourceRegistries {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResourceRegistries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRegistries")
            .field("live", &self.live_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    #[test]
    fn each_kind_has_its_own_registry() {
        let registries = ResourceRegistries::new();
        for kind in ResourceKind::ALL {
            assert_eq!(registries.registry(kind).kind(), kind);
        }
    }

    #[test]
    fn texture_desc_searches_all_dimensions() {
        let registries = ResourceRegistries::new();
        let desc = TextureDesc::new_3d(16, 16, 4, 0, PixelFormat::R16G16B16A16Float);
        let texture = registries
            .textures_3d
            .wrap(Arc::new(()), desc, None)
            .unwrap();

        assert_eq!(registries.texture_desc(texture.id()), Some(desc));
        assert_eq!(registries.live_count(), 1);
    }

    #[test]
    fn clear_reports_leaks() {
        let registries = ResourceRegistries::new();
        let buffer = registries
            .buffers
            .wrap(Arc::new(()), BufferDesc { byte_width: 64 }, None)
            .unwrap();

        let leaked = registries.clear();
        assert_eq!(leaked, vec![(ResourceKind::Buffer, buffer.id())]);
        assert_eq!(registries.live_count(), 0);
    }
}
