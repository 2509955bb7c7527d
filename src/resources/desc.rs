use crate::format::PixelFormat;

use super::ResourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureDimension {
    Texture1D,
    Texture2D,
    Texture3D,
}

/// Texture metadata cached when the texture is wrapped.
///
/// Size and format queries read this record instead of the live API object,
/// which may already be gone by the time capture data is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    pub dimension: TextureDimension,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Zero means "full mip chain".
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: PixelFormat,
}

impl TextureDesc {
    #[must_use]
    pub fn new_1d(width: u32, mip_levels: u32, array_size: u32, format: PixelFormat) -> Self {
        Self {
            dimension: TextureDimension::Texture1D,
            width,
            height: 1,
            depth: 1,
            mip_levels,
            array_size,
            format,
        }
    }

    #[must_use]
    pub fn new_2d(
        width: u32,
        height: u32,
        mip_levels: u32,
        array_size: u32,
        format: PixelFormat,
    ) -> Self {
        Self {
            dimension: TextureDimension::Texture2D,
            width,
            height,
            depth: 1,
            mip_levels,
            array_size,
            format,
        }
    }

    #[must_use]
    pub fn new_3d(width: u32, height: u32, depth: u32, mip_levels: u32, format: PixelFormat) -> Self {
        Self {
            dimension: TextureDimension::Texture3D,
            width,
            height,
            depth,
            mip_levels,
            array_size: 1,
            format,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferDesc {
    pub byte_width: u64,
}

/// A view records the resource it looks at and the format it reinterprets it as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDesc {
    pub resource: ResourceId,
    pub format: PixelFormat,
}
