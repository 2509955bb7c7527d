//! Pixel Format Metadata
//!
//! Pure, stateless facts about the DXGI pixel format set:
//!
//! - [`info`]: per-format classification flags and bits per pixel / block
//! - [`layout`]: byte footprint of a mip level, mip-chain inference and
//!   subresource-to-mip mapping
//! - [`convert`]: the layout-equivalence graph (typeless root, typed siblings,
//!   sRGB / linear pairs, depth views)
//!
//! Every function here is total over [`PixelFormat`]. Raw values coming from
//! the API are checked once at the boundary through `TryFrom<u32>`; anything
//! outside the known set is [`CaptureError::UnrecognisedFormat`], which is kept
//! distinct from the deliberate [`PixelFormat::Unknown`] sentinel.

pub mod convert;
pub mod info;
pub mod layout;

use crate::errors::CaptureError;

pub use convert::{
    depth_typed_form, float_form, generic_typed_form, linear_form, sint_form, snorm_form,
    srgb_form, typeless_form, uint_form, unorm_form, views_compatible,
};
pub use info::{
    FormatFlags, bits_per_pixel, format_flags, is_block_compressed, is_depth_format,
    is_signed_integer, is_srgb, is_typeless, is_unsigned_integer, is_video_format,
};
pub use layout::{
    BLOCK_DIM, calc_num_mips, effective_mip_levels, mip_index_for_subresource, storage_bytes,
    texture_subresource_bytes,
};

macro_rules! pixel_formats {
    ($($name:ident = $value:literal,)*) => {
        /// A pixel format from the DXGI format set, carrying its raw API value.
        #[repr(u32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum PixelFormat {
            $($name = $value,)*
        }

        impl PixelFormat {
            /// Every known format, in ascending raw-value order.
            pub const ALL: &'static [PixelFormat] = &[$(PixelFormat::$name,)*];

            /// Raw API value of the format.
            #[inline]
            #[must_use]
            pub const fn raw(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for PixelFormat {
            type Error = CaptureError;

            fn try_from(raw: u32) -> Result<Self, Self::Error> {
                match raw {
                    $($value => Ok(PixelFormat::$name),)*
                    _ => {
                        log::error!("Unrecognised DXGI Format: {raw}");
                        Err(CaptureError::UnrecognisedFormat(raw))
                    }
                }
            }
        }
    };
}

pixel_formats! {
    Unknown = 0,
    R32G32B32A32Typeless = 1,
    R32G32B32A32Float = 2,
    R32G32B32A32Uint = 3,
    R32G32B32A32Sint = 4,
    R32G32B32Typeless = 5,
    R32G32B32Float = 6,
    R32G32B32Uint = 7,
    R32G32B32Sint = 8,
    R16G16B16A16Typeless = 9,
    R16G16B16A16Float = 10,
    R16G16B16A16Unorm = 11,
    R16G16B16A16Uint = 12,
    R16G16B16A16Snorm = 13,
    R16G16B16A16Sint = 14,
    R32G32Typeless = 15,
    R32G32Float = 16,
    R32G32Uint = 17,
    R32G32Sint = 18,
    R32G8X24Typeless = 19,
    D32FloatS8X24Uint = 20,
    R32FloatX8X24Typeless = 21,
    X32TypelessG8X24Uint = 22,
    R10G10B10A2Typeless = 23,
    R10G10B10A2Unorm = 24,
    R10G10B10A2Uint = 25,
    R11G11B10Float = 26,
    R8G8B8A8Typeless = 27,
    R8G8B8A8Unorm = 28,
    R8G8B8A8UnormSrgb = 29,
    R8G8B8A8Uint = 30,
    R8G8B8A8Snorm = 31,
    R8G8B8A8Sint = 32,
    R16G16Typeless = 33,
    R16G16Float = 34,
    R16G16Unorm = 35,
    R16G16Uint = 36,
    R16G16Snorm = 37,
    R16G16Sint = 38,
    R32Typeless = 39,
    D32Float = 40,
    R32Float = 41,
    R32Uint = 42,
    R32Sint = 43,
    R24G8Typeless = 44,
    D24UnormS8Uint = 45,
    R24UnormX8Typeless = 46,
    X24TypelessG8Uint = 47,
    R8G8Typeless = 48,
    R8G8Unorm = 49,
    R8G8Uint = 50,
    R8G8Snorm = 51,
    R8G8Sint = 52,
    R16Typeless = 53,
    R16Float = 54,
    D16Unorm = 55,
    R16Unorm = 56,
    R16Uint = 57,
    R16Snorm = 58,
    R16Sint = 59,
    R8Typeless = 60,
    R8Unorm = 61,
    R8Uint = 62,
    R8Snorm = 63,
    R8Sint = 64,
    A8Unorm = 65,
    R1Unorm = 66,
    R9G9B9E5SharedExp = 67,
    R8G8B8G8Unorm = 68,
    G8R8G8B8Unorm = 69,
    Bc1Typeless = 70,
    Bc1Unorm = 71,
    Bc1UnormSrgb = 72,
    Bc2Typeless = 73,
    Bc2Unorm = 74,
    Bc2UnormSrgb = 75,
    Bc3Typeless = 76,
    Bc3Unorm = 77,
    Bc3UnormSrgb = 78,
    Bc4Typeless = 79,
    Bc4Unorm = 80,
    Bc4Snorm = 81,
    Bc5Typeless = 82,
    Bc5Unorm = 83,
    Bc5Snorm = 84,
    B5G6R5Unorm = 85,
    B5G5R5A1Unorm = 86,
    B8G8R8A8Unorm = 87,
    B8G8R8X8Unorm = 88,
    R10G10B10XrBiasA2Unorm = 89,
    B8G8R8A8Typeless = 90,
    B8G8R8A8UnormSrgb = 91,
    B8G8R8X8Typeless = 92,
    B8G8R8X8UnormSrgb = 93,
    Bc6hTypeless = 94,
    Bc6hUf16 = 95,
    Bc6hSf16 = 96,
    Bc7Typeless = 97,
    Bc7Unorm = 98,
    Bc7UnormSrgb = 99,
    Ayuv = 100,
    Y410 = 101,
    Y416 = 102,
    Nv12 = 103,
    P010 = 104,
    P016 = 105,
    Opaque420 = 106,
    Yuy2 = 107,
    Y210 = 108,
    Y216 = 109,
    Nv11 = 110,
    Ai44 = 111,
    Ia44 = 112,
    P8 = 113,
    A8P8 = 114,
    B4G4R4A4Unorm = 115,
    P208 = 130,
    V208 = 131,
    V408 = 132,
}

impl Default for PixelFormat {
    #[inline]
    fn default() -> Self {
        Self::Unknown
    }
}
