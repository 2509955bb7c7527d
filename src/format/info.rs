//! Per-format classification and bit sizes.
//!
//! Each predicate is a membership test against a fixed set; the sets are
//! written out once, in [`format_flags`], as an exhaustive match so a new
//! format cannot slip through unclassified.

use bitflags::bitflags;

use super::PixelFormat;
use crate::errors::{CaptureError, Result};

bitflags! {
    /// Static classification of a [`PixelFormat`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FormatFlags: u32 {
        /// Stored as fixed 4×4 texel blocks.
        const BLOCK_COMPRESSED = 1 << 0;
        /// Depth (or depth-stencil) layout, including its typeless views.
        const DEPTH            = 1 << 1;
        /// Bit layout only, no numeric interpretation.
        const TYPELESS         = 1 << 2;
        /// Unsigned integer channels.
        const UINT             = 1 << 3;
        /// Signed integer channels.
        const SINT             = 1 << 4;
        /// sRGB-encoded colour channels.
        const SRGB             = 1 << 5;
        /// Video / planar / palettized; no per-texel size.
        const VIDEO            = 1 << 6;
    }
}

/// Returns the static classification flags of `format`.
#[must_use]
pub fn format_flags(format: PixelFormat) -> FormatFlags {
    use PixelFormat as F;

    const BC: FormatFlags = FormatFlags::BLOCK_COMPRESSED;
    const BC_TYPELESS: FormatFlags = BC.union(FormatFlags::TYPELESS);
    const BC_SRGB: FormatFlags = BC.union(FormatFlags::SRGB);
    const DEPTH_TYPELESS: FormatFlags = FormatFlags::DEPTH.union(FormatFlags::TYPELESS);

    match format {
        F::R32G32B32A32Typeless
        | F::R32G32B32Typeless
        | F::R16G16B16A16Typeless
        | F::R32G32Typeless
        | F::R10G10B10A2Typeless
        | F::R8G8B8A8Typeless
        | F::R16G16Typeless
        | F::R32Typeless
        | F::R8G8Typeless
        | F::R16Typeless
        | F::R8Typeless
        | F::B8G8R8A8Typeless
        | F::B8G8R8X8Typeless => FormatFlags::TYPELESS,

        F::R32G8X24Typeless
        | F::R32FloatX8X24Typeless
        | F::X32TypelessG8X24Uint
        | F::R24G8Typeless
        | F::R24UnormX8Typeless
        | F::X24TypelessG8Uint => DEPTH_TYPELESS,

        F::D32FloatS8X24Uint | F::D32Float | F::D24UnormS8Uint | F::D16Unorm => FormatFlags::DEPTH,

        F::R32G32B32A32Uint
        | F::R32G32B32Uint
        | F::R16G16B16A16Uint
        | F::R32G32Uint
        | F::R10G10B10A2Uint
        | F::R8G8B8A8Uint
        | F::R16G16Uint
        | F::R32Uint
        | F::R8G8Uint
        | F::R16Uint
        | F::R8Uint => FormatFlags::UINT,

        F::R32G32B32A32Sint
        | F::R32G32B32Sint
        | F::R16G16B16A16Sint
        | F::R32G32Sint
        | F::R8G8B8A8Sint
        | F::R16G16Sint
        | F::R32Sint
        | F::R8G8Sint
        | F::R16Sint
        | F::R8Sint => FormatFlags::SINT,

        F::R8G8B8A8UnormSrgb | F::B8G8R8A8UnormSrgb | F::B8G8R8X8UnormSrgb => FormatFlags::SRGB,

        F::Bc1Typeless
        | F::Bc2Typeless
        | F::Bc3Typeless
        | F::Bc4Typeless
        | F::Bc5Typeless
        | F::Bc6hTypeless
        | F::Bc7Typeless => BC_TYPELESS,

        F::Bc1UnormSrgb | F::Bc2UnormSrgb | F::Bc3UnormSrgb | F::Bc7UnormSrgb => BC_SRGB,

        F::Bc1Unorm
        | F::Bc2Unorm
        | F::Bc3Unorm
        | F::Bc4Unorm
        | F::Bc4Snorm
        | F::Bc5Unorm
        | F::Bc5Snorm
        | F::Bc6hUf16
        | F::Bc6hSf16
        | F::Bc7Unorm => BC,

        F::Ayuv
        | F::Y410
        | F::Y416
        | F::Nv12
        | F::P010
        | F::P016
        | F::Opaque420
        | F::Yuy2
        | F::Y210
        | F::Y216
        | F::Nv11
        | F::Ai44
        | F::Ia44
        | F::P8
        | F::A8P8
        | F::P208
        | F::V208
        | F::V408 => FormatFlags::VIDEO,

        F::Unknown
        | F::R32G32B32A32Float
        | F::R32G32B32Float
        | F::R16G16B16A16Float
        | F::R16G16B16A16Unorm
        | F::R16G16B16A16Snorm
        | F::R32G32Float
        | F::R10G10B10A2Unorm
        | F::R11G11B10Float
        | F::R8G8B8A8Unorm
        | F::R8G8B8A8Snorm
        | F::R16G16Float
        | F::R16G16Unorm
        | F::R16G16Snorm
        | F::R32Float
        | F::R8G8Unorm
        | F::R8G8Snorm
        | F::R16Float
        | F::R16Unorm
        | F::R16Snorm
        | F::R8Unorm
        | F::R8Snorm
        | F::A8Unorm
        | F::R1Unorm
        | F::R9G9B9E5SharedExp
        | F::R8G8B8G8Unorm
        | F::G8R8G8B8Unorm
        | F::B5G6R5Unorm
        | F::B5G5R5A1Unorm
        | F::B8G8R8A8Unorm
        | F::B8G8R8X8Unorm
        | F::R10G10B10XrBiasA2Unorm
        | F::B4G4R4A4Unorm => FormatFlags::empty(),
    }
}

#[inline]
#[must_use]
pub fn is_block_compressed(format: PixelFormat) -> bool {
    format_flags(format).contains(FormatFlags::BLOCK_COMPRESSED)
}

#[inline]
#[must_use]
pub fn is_depth_format(format: PixelFormat) -> bool {
    format_flags(format).contains(FormatFlags::DEPTH)
}

#[inline]
#[must_use]
pub fn is_typeless(format: PixelFormat) -> bool {
    format_flags(format).contains(FormatFlags::TYPELESS)
}

#[inline]
#[must_use]
pub fn is_unsigned_integer(format: PixelFormat) -> bool {
    format_flags(format).contains(FormatFlags::UINT)
}

#[inline]
#[must_use]
pub fn is_signed_integer(format: PixelFormat) -> bool {
    format_flags(format).contains(FormatFlags::SINT)
}

#[inline]
#[must_use]
pub fn is_srgb(format: PixelFormat) -> bool {
    format_flags(format).contains(FormatFlags::SRGB)
}

#[inline]
#[must_use]
pub fn is_video_format(format: PixelFormat) -> bool {
    format_flags(format).contains(FormatFlags::VIDEO)
}

/// Bits per texel, or bits per 4×4 block for block-compressed formats.
///
/// Callers working with block formats divide by the 16 texels of a block
/// themselves. `R1_UNORM` reports a single bit.
pub fn bits_per_pixel(format: PixelFormat) -> Result<u32> {
    use PixelFormat as F;

    let bytes = match format {
        F::R32G32B32A32Typeless | F::R32G32B32A32Float | F::R32G32B32A32Uint | F::R32G32B32A32Sint => 16,

        F::R32G32B32Typeless | F::R32G32B32Float | F::R32G32B32Uint | F::R32G32B32Sint => 12,

        F::R16G16B16A16Typeless
        | F::R16G16B16A16Float
        | F::R16G16B16A16Unorm
        | F::R16G16B16A16Uint
        | F::R16G16B16A16Snorm
        | F::R16G16B16A16Sint
        | F::R32G32Typeless
        | F::R32G32Float
        | F::R32G32Uint
        | F::R32G32Sint
        | F::R32G8X24Typeless
        | F::D32FloatS8X24Uint
        | F::R32FloatX8X24Typeless
        | F::X32TypelessG8X24Uint => 8,

        F::R10G10B10A2Typeless
        | F::R10G10B10A2Unorm
        | F::R10G10B10A2Uint
        | F::R11G11B10Float
        | F::R8G8B8A8Typeless
        | F::R8G8B8A8Unorm
        | F::R8G8B8A8UnormSrgb
        | F::R8G8B8A8Uint
        | F::R8G8B8A8Snorm
        | F::R8G8B8A8Sint
        | F::R16G16Typeless
        | F::R16G16Float
        | F::R16G16Unorm
        | F::R16G16Uint
        | F::R16G16Snorm
        | F::R16G16Sint
        | F::R32Typeless
        | F::D32Float
        | F::R32Float
        | F::R32Uint
        | F::R32Sint
        | F::R24G8Typeless
        | F::D24UnormS8Uint
        | F::R24UnormX8Typeless
        | F::X24TypelessG8Uint
        | F::R9G9B9E5SharedExp
        | F::R8G8B8G8Unorm
        | F::G8R8G8B8Unorm
        | F::B8G8R8A8Unorm
        | F::B8G8R8X8Unorm
        | F::R10G10B10XrBiasA2Unorm
        | F::B8G8R8A8Typeless
        | F::B8G8R8A8UnormSrgb
        | F::B8G8R8X8Typeless
        | F::B8G8R8X8UnormSrgb => 4,

        F::R8G8Typeless
        | F::R8G8Unorm
        | F::R8G8Uint
        | F::R8G8Snorm
        | F::R8G8Sint
        | F::R16Typeless
        | F::R16Float
        | F::D16Unorm
        | F::R16Unorm
        | F::R16Uint
        | F::R16Snorm
        | F::R16Sint
        | F::B5G6R5Unorm
        | F::B5G5R5A1Unorm
        // 4 channels, half a byte each
        | F::B4G4R4A4Unorm => 2,

        F::R8Typeless | F::R8Unorm | F::R8Uint | F::R8Snorm | F::R8Sint | F::A8Unorm => 1,

        F::R1Unorm => return Ok(1),

        // block size, in bytes
        F::Bc1Typeless
        | F::Bc1Unorm
        | F::Bc1UnormSrgb
        | F::Bc4Typeless
        | F::Bc4Unorm
        | F::Bc4Snorm => 8,

        F::Bc2Typeless
        | F::Bc2Unorm
        | F::Bc2UnormSrgb
        | F::Bc3Typeless
        | F::Bc3Unorm
        | F::Bc3UnormSrgb
        | F::Bc5Typeless
        | F::Bc5Unorm
        | F::Bc5Snorm
        | F::Bc6hTypeless
        | F::Bc6hUf16
        | F::Bc6hSf16
        | F::Bc7Typeless
        | F::Bc7Unorm
        | F::Bc7UnormSrgb => 16,

        F::Ayuv
        | F::Y410
        | F::Y416
        | F::Nv12
        | F::P010
        | F::P016
        | F::Opaque420
        | F::Yuy2
        | F::Y210
        | F::Y216
        | F::Nv11
        | F::Ai44
        | F::Ia44
        | F::P8
        | F::A8P8
        | F::P208
        | F::V208
        | F::V408 => {
            log::error!("Video formats not supported: {format:?}");
            return Err(CaptureError::VideoFormatUnsupported(format));
        }

        F::Unknown => {
            log::warn!("Getting BPP of DXGI_FORMAT_UNKNOWN");
            return Err(CaptureError::UnknownFormat);
        }
    };

    Ok(bytes * 8)
}
