//! Format Metadata Tests
//!
//! Tests for:
//! - Storage size of single texels and full block-compressed levels
//! - Mip index mapping with declared and full-chain mip counts
//! - sRGB / linear conversion idempotence
//! - Typeless round trip through the generic typed form
//! - Sentinel, video and raw-value error reporting
//! - View format compatibility

use capture_core::errors::CaptureError;
use capture_core::format::{
    PixelFormat, bits_per_pixel, depth_typed_form, float_form, generic_typed_form,
    is_block_compressed, is_depth_format, is_srgb, is_typeless, is_video_format, linear_form,
    mip_index_for_subresource, sint_form, srgb_form, storage_bytes, texture_subresource_bytes,
    typeless_form, uint_form, unorm_form, views_compatible,
};
use capture_core::resources::TextureDesc;

// ============================================================================
// Storage Size
// ============================================================================

#[test]
fn single_texel_matches_bits_per_pixel() {
    for &format in PixelFormat::ALL {
        let Ok(bits) = bits_per_pixel(format) else {
            assert!(
                format == PixelFormat::Unknown || is_video_format(format),
                "{format:?} has no size"
            );
            continue;
        };
        let bytes = storage_bytes(1, 1, 1, format, 0).unwrap();
        assert_eq!(bytes, u64::from((bits / 8).max(1)), "{format:?}");
    }
}

#[test]
fn block_compressed_256_square() {
    for format in [PixelFormat::Bc2Unorm, PixelFormat::Bc3Unorm, PixelFormat::Bc7UnormSrgb] {
        assert_eq!(storage_bytes(256, 256, 1, format, 0).unwrap(), 64 * 64 * 16);
    }
    assert_eq!(storage_bytes(256, 256, 1, PixelFormat::Bc1Unorm, 0).unwrap(), 64 * 64 * 8);
}

#[test]
fn block_compressed_tail_mips_keep_a_full_block() {
    // 256 >> 9 clamps to 1, which still occupies one 4×4 block.
    assert_eq!(storage_bytes(256, 256, 1, PixelFormat::Bc3Unorm, 9).unwrap(), 16);
    assert_eq!(storage_bytes(256, 256, 1, PixelFormat::Bc3Unorm, 7).unwrap(), 16);
    assert_eq!(storage_bytes(256, 256, 1, PixelFormat::Bc3Unorm, 5).unwrap(), 2 * 2 * 16);
}

#[test]
fn uncompressed_mip_halving() {
    let format = PixelFormat::R8G8B8A8Unorm;
    assert_eq!(storage_bytes(64, 32, 1, format, 0).unwrap(), 64 * 32 * 4);
    assert_eq!(storage_bytes(64, 32, 1, format, 1).unwrap(), 32 * 16 * 4);
    assert_eq!(storage_bytes(64, 32, 1, format, 6).unwrap(), 4);
    assert_eq!(storage_bytes(8, 8, 8, PixelFormat::R32Float, 1).unwrap(), 4 * 4 * 4 * 4);
}

#[test]
fn sentinel_and_video_formats_are_errors() {
    assert!(matches!(
        storage_bytes(4, 4, 1, PixelFormat::Unknown, 0),
        Err(CaptureError::UnknownFormat)
    ));
    assert!(matches!(
        storage_bytes(4, 4, 1, PixelFormat::Nv12, 0),
        Err(CaptureError::VideoFormatUnsupported(PixelFormat::Nv12))
    ));
}

#[test]
fn unrecognised_raw_value_differs_from_sentinel() {
    assert!(matches!(PixelFormat::try_from(0u32), Ok(PixelFormat::Unknown)));
    assert!(matches!(
        PixelFormat::try_from(500u32),
        Err(CaptureError::UnrecognisedFormat(500))
    ));
}

// ============================================================================
// Mip Mapping
// ============================================================================

#[test]
fn full_chain_mip_count_from_width() {
    let desc = TextureDesc::new_2d(256, 1, 0, 4, PixelFormat::R8G8B8A8Unorm);
    assert_eq!(mip_index_for_subresource(&desc, 10), 1);
    assert_eq!(mip_index_for_subresource(&desc, 8), 8);
    assert_eq!(mip_index_for_subresource(&desc, 9), 0);
}

#[test]
fn declared_mip_count_is_used_as_is() {
    let desc = TextureDesc::new_2d(256, 256, 3, 6, PixelFormat::R8G8B8A8Unorm);
    assert_eq!(mip_index_for_subresource(&desc, 7), 1);
}

#[test]
fn subresource_bytes_follow_mip_mapping() {
    let desc = TextureDesc::new_2d(256, 256, 0, 2, PixelFormat::Bc7Unorm);
    // Slice 1, mip 0.
    assert_eq!(texture_subresource_bytes(&desc, 9).unwrap(), 65536);
    // Slice 1, mip 1.
    assert_eq!(texture_subresource_bytes(&desc, 10).unwrap(), 32 * 32 * 16);

    let volume = TextureDesc::new_3d(16, 16, 16, 0, PixelFormat::R8Unorm);
    assert_eq!(texture_subresource_bytes(&volume, 1).unwrap(), 8 * 8 * 8);
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn predicates_on_representative_formats() {
    assert!(is_block_compressed(PixelFormat::Bc6hSf16));
    assert!(!is_block_compressed(PixelFormat::R8G8B8A8Unorm));
    assert!(is_depth_format(PixelFormat::D24UnormS8Uint));
    assert!(is_depth_format(PixelFormat::R24G8Typeless));
    assert!(!is_depth_format(PixelFormat::R32Float));
    assert!(is_typeless(PixelFormat::Bc1Typeless));
    assert!(is_srgb(PixelFormat::B8G8R8A8UnormSrgb));
    assert!(!is_srgb(PixelFormat::B8G8R8A8Unorm));
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn srgb_conversion_is_idempotent() {
    let srgb = srgb_form(PixelFormat::R8G8B8A8Unorm);
    assert_eq!(srgb, PixelFormat::R8G8B8A8UnormSrgb);
    assert_eq!(srgb_form(srgb), srgb);
    assert_eq!(linear_form(srgb), PixelFormat::R8G8B8A8Unorm);
    assert_eq!(linear_form(PixelFormat::R8G8B8A8Unorm), PixelFormat::R8G8B8A8Unorm);
}

#[test]
fn typeless_round_trip_is_stable() {
    for &format in PixelFormat::ALL {
        let Ok(root) = typeless_form(format) else {
            continue;
        };
        let back = typeless_form(generic_typed_form(root)).unwrap();
        assert_eq!(back, root, "{format:?}");
    }
}

#[test]
fn every_typed_sibling_shares_its_root() {
    let siblings = [
        PixelFormat::R16G16B16A16Float,
        PixelFormat::R16G16B16A16Unorm,
        PixelFormat::R16G16B16A16Uint,
        PixelFormat::R16G16B16A16Snorm,
        PixelFormat::R16G16B16A16Sint,
    ];
    for format in siblings {
        assert_eq!(typeless_form(format).unwrap(), PixelFormat::R16G16B16A16Typeless);
    }
}

#[test]
fn missing_sibling_returns_input() {
    assert_eq!(uint_form(PixelFormat::Bc1Unorm), PixelFormat::Bc1Unorm);
    assert_eq!(unorm_form(PixelFormat::R32Float), PixelFormat::R32Float);
    assert_eq!(depth_typed_form(PixelFormat::R8G8B8A8Unorm), PixelFormat::R8G8B8A8Unorm);
}

#[test]
fn siblings_across_a_layout() {
    assert_eq!(depth_typed_form(PixelFormat::R32Typeless), PixelFormat::D32Float);
    assert_eq!(depth_typed_form(PixelFormat::R24UnormX8Typeless), PixelFormat::D24UnormS8Uint);
    assert_eq!(uint_form(PixelFormat::R16G16Float), PixelFormat::R16G16Uint);
    assert_eq!(sint_form(PixelFormat::R8G8B8A8Unorm), PixelFormat::R8G8B8A8Sint);
}

#[test]
fn float_form_falls_back_to_generic() {
    assert_eq!(float_form(PixelFormat::R32Uint), PixelFormat::R32Float);
    assert_eq!(float_form(PixelFormat::Bc3Typeless), PixelFormat::Bc3Unorm);
}

#[test]
fn alpha_only_float_view_keeps_its_channel() {
    assert_eq!(float_form(PixelFormat::A8Unorm), PixelFormat::A8Unorm);
    assert_eq!(float_form(PixelFormat::R8Uint), PixelFormat::R8Unorm);
    assert_eq!(float_form(PixelFormat::R16G16Unorm), PixelFormat::R16G16Float);
}

#[test]
fn typeless_form_errors() {
    assert!(matches!(typeless_form(PixelFormat::Unknown), Err(CaptureError::UnknownFormat)));
    assert!(matches!(
        typeless_form(PixelFormat::R1Unorm),
        Err(CaptureError::NoTypelessForm(PixelFormat::R1Unorm))
    ));
}

#[test]
fn view_compatibility_uses_typeless_roots() {
    assert!(views_compatible(PixelFormat::R8G8B8A8UnormSrgb, PixelFormat::R8G8B8A8Typeless));
    assert!(views_compatible(PixelFormat::R32Float, PixelFormat::R32Typeless));
    assert!(!views_compatible(PixelFormat::R32Float, PixelFormat::R16G16Typeless));
    assert!(views_compatible(PixelFormat::R1Unorm, PixelFormat::R1Unorm));
}
