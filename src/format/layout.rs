//! Byte footprints of texture subresources.

use super::{PixelFormat, bits_per_pixel, is_block_compressed};
use crate::errors::{CaptureError, Result};
use crate::resources::{TextureDesc, TextureDimension};

/// Texel granularity of block-compressed formats along width and height.
pub const BLOCK_DIM: u32 = 4;

#[inline]
fn mip_extent(extent: u32, mip: u32) -> u32 {
    extent.checked_shr(mip).unwrap_or(0).max(1)
}

#[inline]
fn align_up_block(extent: u32) -> u64 {
    u64::from(extent.div_ceil(BLOCK_DIM) * BLOCK_DIM)
}

/// Number of levels in a full mip chain: `floor(log2(max(w, h, d))) + 1`.
#[must_use]
pub fn calc_num_mips(width: u32, height: u32, depth: u32) -> u32 {
    let largest = width.max(height).max(depth).max(1);
    largest.ilog2() + 1
}

/// Exact byte size of one mip level of a `width × height × depth` image.
///
/// Dimensions are halved per mip and clamped to 1. Block-compressed formats
/// round width and height up to whole 4×4 blocks, so even a 1×1 level
/// occupies a full block; depth is never rounded.
pub fn storage_bytes(width: u32, height: u32, depth: u32, format: PixelFormat, mip: u32) -> Result<u64> {
    let w = mip_extent(width, mip);
    let h = mip_extent(height, mip);
    let d = u64::from(mip_extent(depth, mip));

    if format == PixelFormat::Unknown {
        log::error!("Getting byte size of unknown DXGI format");
        return Err(CaptureError::UnknownFormat);
    }

    let bits = u64::from(bits_per_pixel(format)?);

    if is_block_compressed(format) {
        let texels_per_block = u64::from(BLOCK_DIM * BLOCK_DIM);
        let block_bytes = bits / 8;
        return Ok(align_up_block(w) * align_up_block(h) * d * block_bytes / texels_per_block);
    }

    let texels = u64::from(w) * u64::from(h) * d;
    if format == PixelFormat::R1Unorm {
        return Ok((texels * bits / 8).max(1));
    }

    Ok(texels * bits / 8)
}

/// Mip level addressed by a flattened subresource index
/// (`array_slice * mip_levels + mip_level`).
///
/// A declared mip count of zero means "full chain"; the effective count is
/// then computed from the dimensions the texture actually has.
#[must_use]
pub fn mip_index_for_subresource(desc: &TextureDesc, subresource: u32) -> u32 {
    subresource % effective_mip_levels(desc)
}

/// Declared mip count, or the full-chain count when the declaration is zero.
#[must_use]
pub fn effective_mip_levels(desc: &TextureDesc) -> u32 {
    if desc.mip_levels != 0 {
        return desc.mip_levels;
    }
    match desc.dimension {
        TextureDimension::Texture1D => calc_num_mips(desc.width, 1, 1),
        TextureDimension::Texture2D => calc_num_mips(desc.width, desc.height, 1),
        TextureDimension::Texture3D => calc_num_mips(desc.width, desc.height, desc.depth),
    }
}

/// Byte size of one subresource of a texture, using its cached descriptor.
pub fn texture_subresource_bytes(desc: &TextureDesc, subresource: u32) -> Result<u64> {
    let mip = mip_index_for_subresource(desc, subresource);
    match desc.dimension {
        TextureDimension::Texture1D => storage_bytes(desc.width, 1, 1, desc.format, mip),
        TextureDimension::Texture2D => storage_bytes(desc.width, desc.height, 1, desc.format, mip),
        TextureDimension::Texture3D => {
            storage_bytes(desc.width, desc.height, desc.depth, desc.format, mip)
        }
    }
}
