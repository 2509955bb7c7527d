use std::fmt;

/// Pipeline stage of a shader object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    Hull,
    Domain,
    Geometry,
    Pixel,
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 6] = [
        ShaderStage::Vertex,
        ShaderStage::Hull,
        ShaderStage::Domain,
        ShaderStage::Geometry,
        ShaderStage::Pixel,
        ShaderStage::Compute,
    ];
}

/// Category of a wrapped object. Fixed when the object is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Buffer,
    Texture1D,
    Texture2D,
    Texture3D,
    InputLayout,
    SamplerState,
    RasterizerState,
    BlendState,
    DepthStencilState,
    ShaderResourceView,
    UnorderedAccessView,
    RenderTargetView,
    DepthStencilView,
    Shader(ShaderStage),
    Counter,
    Query,
    Predicate,
    ClassInstance,
    ClassLinkage,
    DeviceContext,
    CommandList,
}

impl ResourceKind {
    /// Every kind, one entry per shader stage.
    pub const ALL: [ResourceKind; 26] = [
        ResourceKind::Buffer,
        ResourceKind::Texture1D,
        ResourceKind::Texture2D,
        ResourceKind::Texture3D,
        ResourceKind::InputLayout,
        ResourceKind::SamplerState,
        ResourceKind::RasterizerState,
        ResourceKind::BlendState,
        ResourceKind::DepthStencilState,
        ResourceKind::ShaderResourceView,
        ResourceKind::UnorderedAccessView,
        ResourceKind::RenderTargetView,
        ResourceKind::DepthStencilView,
        ResourceKind::Shader(ShaderStage::Vertex),
        ResourceKind::Shader(ShaderStage::Hull),
        ResourceKind::Shader(ShaderStage::Domain),
        ResourceKind::Shader(ShaderStage::Geometry),
        ResourceKind::Shader(ShaderStage::Pixel),
        ResourceKind::Shader(ShaderStage::Compute),
        ResourceKind::Counter,
        ResourceKind::Query,
        ResourceKind::Predicate,
        ResourceKind::ClassInstance,
        ResourceKind::ClassLinkage,
        ResourceKind::DeviceContext,
        ResourceKind::CommandList,
    ];

    #[inline]
    #[must_use]
    pub fn is_texture(self) -> bool {
        matches!(self, Self::Texture1D | Self::Texture2D | Self::Texture3D)
    }

    #[inline]
    #[must_use]
    pub fn is_view(self) -> bool {
        matches!(
            self,
            Self::ShaderResourceView
                | Self::UnorderedAccessView
                | Self::RenderTargetView
                | Self::DepthStencilView
        )
    }

    /// Name used in logs and capture metadata. All shader stages share one name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Buffer => "Resource_Buffer",
            Self::Texture1D => "Resource_Texture1D",
            Self::Texture2D => "Resource_Texture2D",
            Self::Texture3D => "Resource_Texture3D",
            Self::InputLayout => "Resource_InputLayout",
            Self::SamplerState => "Resource_SamplerState",
            Self::RasterizerState => "Resource_RasterizerState",
            Self::BlendState => "Resource_BlendState",
            Self::DepthStencilState => "Resource_DepthStencilState",
            Self::ShaderResourceView => "Resource_ShaderResourceView",
            Self::UnorderedAccessView => "Resource_UnorderedAccessView",
            Self::RenderTargetView => "Resource_RenderTargetView",
            Self::DepthStencilView => "Resource_DepthStencilView",
            Self::Shader(_) => "Resource_Shader",
            Self::Counter => "Resource_Counter",
            Self::Query => "Resource_Query",
            Self::Predicate => "Resource_Predicate",
            Self::ClassInstance => "Resource_ClassInstance",
            Self::ClassLinkage => "Resource_ClassLinkage",
            Self::DeviceContext => "Resource_DeviceContext",
            Self::CommandList => "Resource_CommandList",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
