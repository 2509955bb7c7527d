//! Format conversion graph.
//!
//! Formats sharing a bit layout form a family rooted at their typeless format.
//! Every typed member of a family can reach any sibling interpretation (unorm,
//! snorm, uint, sint, float, sRGB, depth) through the family table below.
//!
//! Rules shared by every conversion:
//! - a format already in the requested interpretation is returned unchanged
//! - a format whose family has no sibling in that interpretation is returned unchanged
//! - a format outside every family is returned unchanged
//!
//! [`typeless_form`] is the only conversion that can fail: a format with no
//! layout class has no typeless root, and that is reported rather than guessed.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::PixelFormat;
use super::PixelFormat as F;
use crate::errors::{CaptureError, Result};

/// Interpretation a family member plays within its layout class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Role {
    Typeless,
    Unorm,
    Snorm,
    Uint,
    Sint,
    Float,
    Srgb,
    Depth,
}

/// One layout-equivalence class.
///
/// `float` is the view a shader reads as floating point; for layouts without a
/// float member this is the unorm member, and `None` falls back to
/// [`generic_typed_form`]. `generic` is the typed form chosen for the typeless
/// root when no interpretation is requested.
#[derive(Debug)]
struct Family {
    typeless: PixelFormat,
    members: &'static [(PixelFormat, Role)],
    unorm: Option<PixelFormat>,
    snorm: Option<PixelFormat>,
    uint: Option<PixelFormat>,
    sint: Option<PixelFormat>,
    float: Option<PixelFormat>,
    srgb: Option<PixelFormat>,
    depth: Option<PixelFormat>,
    generic: Option<PixelFormat>,
}

impl Family {
    const EMPTY: Family = Family {
        typeless: F::Unknown,
        members: &[],
        unorm: None,
        snorm: None,
        uint: None,
        sint: None,
        float: None,
        srgb: None,
        depth: None,
        generic: None,
    };

    fn sibling(&self, role: Role) -> Option<PixelFormat> {
        match role {
            Role::Typeless => Some(self.typeless),
            Role::Unorm => self.unorm,
            Role::Snorm => self.snorm,
            Role::Uint => self.uint,
            Role::Sint => self.sint,
            Role::Float => self.float,
            Role::Srgb => self.srgb,
            Role::Depth => self.depth,
        }
    }
}

static FAMILIES: &[Family] = &[
    Family {
        typeless: F::R32G32B32A32Typeless,
        members: &[
            (F::R32G32B32A32Typeless, Role::Typeless),
            (F::R32G32B32A32Float, Role::Float),
            (F::R32G32B32A32Uint, Role::Uint),
            (F::R32G32B32A32Sint, Role::Sint),
        ],
        uint: Some(F::R32G32B32A32Uint),
        sint: Some(F::R32G32B32A32Sint),
        float: Some(F::R32G32B32A32Float),
        generic: Some(F::R32G32B32A32Float),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R32G32B32Typeless,
        members: &[
            (F::R32G32B32Typeless, Role::Typeless),
            (F::R32G32B32Float, Role::Float),
            (F::R32G32B32Uint, Role::Uint),
            (F::R32G32B32Sint, Role::Sint),
        ],
        uint: Some(F::R32G32B32Uint),
        sint: Some(F::R32G32B32Sint),
        float: Some(F::R32G32B32Float),
        generic: Some(F::R32G32B32Float),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R16G16B16A16Typeless,
        members: &[
            (F::R16G16B16A16Typeless, Role::Typeless),
            (F::R16G16B16A16Float, Role::Float),
            (F::R16G16B16A16Unorm, Role::Unorm),
            (F::R16G16B16A16Uint, Role::Uint),
            (F::R16G16B16A16Snorm, Role::Snorm),
            (F::R16G16B16A16Sint, Role::Sint),
        ],
        unorm: Some(F::R16G16B16A16Unorm),
        snorm: Some(F::R16G16B16A16Snorm),
        uint: Some(F::R16G16B16A16Uint),
        sint: Some(F::R16G16B16A16Sint),
        float: Some(F::R16G16B16A16Float),
        generic: Some(F::R16G16B16A16Float),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R32G32Typeless,
        members: &[
            (F::R32G32Typeless, Role::Typeless),
            (F::R32G32Float, Role::Float),
            (F::R32G32Uint, Role::Uint),
            (F::R32G32Sint, Role::Sint),
        ],
        uint: Some(F::R32G32Uint),
        sint: Some(F::R32G32Sint),
        float: Some(F::R32G32Float),
        generic: Some(F::R32G32Float),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R32G8X24Typeless,
        members: &[
            (F::R32G8X24Typeless, Role::Typeless),
            (F::D32FloatS8X24Uint, Role::Depth),
            (F::R32FloatX8X24Typeless, Role::Float),
            (F::X32TypelessG8X24Uint, Role::Uint),
        ],
        uint: Some(F::X32TypelessG8X24Uint),
        depth: Some(F::D32FloatS8X24Uint),
        generic: Some(F::R32G8X24Typeless),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R10G10B10A2Typeless,
        members: &[
            (F::R10G10B10A2Typeless, Role::Typeless),
            (F::R10G10B10A2Unorm, Role::Unorm),
            (F::R10G10B10A2Uint, Role::Uint),
        ],
        unorm: Some(F::R10G10B10A2Unorm),
        uint: Some(F::R10G10B10A2Uint),
        float: Some(F::R10G10B10A2Unorm),
        generic: Some(F::R10G10B10A2Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R8G8B8A8Typeless,
        members: &[
            (F::R8G8B8A8Typeless, Role::Typeless),
            (F::R8G8B8A8Unorm, Role::Unorm),
            (F::R8G8B8A8UnormSrgb, Role::Srgb),
            (F::R8G8B8A8Uint, Role::Uint),
            (F::R8G8B8A8Snorm, Role::Snorm),
            (F::R8G8B8A8Sint, Role::Sint),
        ],
        unorm: Some(F::R8G8B8A8Unorm),
        snorm: Some(F::R8G8B8A8Snorm),
        uint: Some(F::R8G8B8A8Uint),
        sint: Some(F::R8G8B8A8Sint),
        float: Some(F::R8G8B8A8Unorm),
        srgb: Some(F::R8G8B8A8UnormSrgb),
        generic: Some(F::R8G8B8A8Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R16G16Typeless,
        members: &[
            (F::R16G16Typeless, Role::Typeless),
            (F::R16G16Float, Role::Float),
            (F::R16G16Unorm, Role::Unorm),
            (F::R16G16Uint, Role::Uint),
            (F::R16G16Snorm, Role::Snorm),
            (F::R16G16Sint, Role::Sint),
        ],
        unorm: Some(F::R16G16Unorm),
        snorm: Some(F::R16G16Snorm),
        uint: Some(F::R16G16Uint),
        sint: Some(F::R16G16Sint),
        float: Some(F::R16G16Float),
        generic: Some(F::R16G16Float),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R32Typeless,
        members: &[
            (F::R32Typeless, Role::Typeless),
            (F::D32Float, Role::Depth),
            (F::R32Float, Role::Float),
            (F::R32Uint, Role::Uint),
            (F::R32Sint, Role::Sint),
        ],
        uint: Some(F::R32Uint),
        sint: Some(F::R32Sint),
        float: Some(F::R32Float),
        depth: Some(F::D32Float),
        generic: Some(F::R32Float),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R24G8Typeless,
        members: &[
            (F::R24G8Typeless, Role::Typeless),
            (F::D24UnormS8Uint, Role::Depth),
            (F::R24UnormX8Typeless, Role::Unorm),
            (F::X24TypelessG8Uint, Role::Uint),
        ],
        unorm: Some(F::R24UnormX8Typeless),
        uint: Some(F::X24TypelessG8Uint),
        depth: Some(F::D24UnormS8Uint),
        generic: Some(F::R24UnormX8Typeless),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R8G8Typeless,
        members: &[
            (F::R8G8Typeless, Role::Typeless),
            (F::R8G8Unorm, Role::Unorm),
            (F::R8G8Uint, Role::Uint),
            (F::R8G8Snorm, Role::Snorm),
            (F::R8G8Sint, Role::Sint),
        ],
        unorm: Some(F::R8G8Unorm),
        snorm: Some(F::R8G8Snorm),
        uint: Some(F::R8G8Uint),
        sint: Some(F::R8G8Sint),
        float: Some(F::R8G8Unorm),
        generic: Some(F::R8G8Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R16Typeless,
        members: &[
            (F::R16Typeless, Role::Typeless),
            (F::R16Float, Role::Float),
            (F::D16Unorm, Role::Depth),
            (F::R16Unorm, Role::Unorm),
            (F::R16Uint, Role::Uint),
            (F::R16Snorm, Role::Snorm),
            (F::R16Sint, Role::Sint),
        ],
        unorm: Some(F::R16Unorm),
        snorm: Some(F::R16Snorm),
        uint: Some(F::R16Uint),
        sint: Some(F::R16Sint),
        float: Some(F::R16Float),
        depth: Some(F::D16Unorm),
        generic: Some(F::R16Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::R8Typeless,
        members: &[
            (F::R8Typeless, Role::Typeless),
            (F::R8Unorm, Role::Unorm),
            (F::R8Uint, Role::Uint),
            (F::R8Snorm, Role::Snorm),
            (F::R8Sint, Role::Sint),
            (F::A8Unorm, Role::Unorm),
        ],
        unorm: Some(F::R8Unorm),
        snorm: Some(F::R8Snorm),
        uint: Some(F::R8Uint),
        sint: Some(F::R8Sint),
        float: Some(F::R8Unorm),
        generic: Some(F::R8Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::Bc1Typeless,
        members: &[
            (F::Bc1Typeless, Role::Typeless),
            (F::Bc1Unorm, Role::Unorm),
            (F::Bc1UnormSrgb, Role::Srgb),
        ],
        unorm: Some(F::Bc1Unorm),
        srgb: Some(F::Bc1UnormSrgb),
        generic: Some(F::Bc1Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::Bc2Typeless,
        members: &[
            (F::Bc2Typeless, Role::Typeless),
            (F::Bc2Unorm, Role::Unorm),
            (F::Bc2UnormSrgb, Role::Srgb),
        ],
        unorm: Some(F::Bc2Unorm),
        srgb: Some(F::Bc2UnormSrgb),
        generic: Some(F::Bc2Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::Bc3Typeless,
        members: &[
            (F::Bc3Typeless, Role::Typeless),
            (F::Bc3Unorm, Role::Unorm),
            (F::Bc3UnormSrgb, Role::Srgb),
        ],
        unorm: Some(F::Bc3Unorm),
        srgb: Some(F::Bc3UnormSrgb),
        generic: Some(F::Bc3Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::Bc4Typeless,
        members: &[
            (F::Bc4Typeless, Role::Typeless),
            (F::Bc4Unorm, Role::Unorm),
            (F::Bc4Snorm, Role::Snorm),
        ],
        unorm: Some(F::Bc4Unorm),
        snorm: Some(F::Bc4Snorm),
        generic: Some(F::Bc4Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::Bc5Typeless,
        members: &[
            (F::Bc5Typeless, Role::Typeless),
            (F::Bc5Unorm, Role::Unorm),
            (F::Bc5Snorm, Role::Snorm),
        ],
        unorm: Some(F::Bc5Unorm),
        snorm: Some(F::Bc5Snorm),
        generic: Some(F::Bc5Unorm),
        ..Family::EMPTY
    },
    // UF16 / SF16 are treated as the unsigned / signed halves of the layout.
    Family {
        typeless: F::Bc6hTypeless,
        members: &[
            (F::Bc6hTypeless, Role::Typeless),
            (F::Bc6hUf16, Role::Unorm),
            (F::Bc6hSf16, Role::Snorm),
        ],
        unorm: Some(F::Bc6hUf16),
        snorm: Some(F::Bc6hSf16),
        generic: Some(F::Bc6hUf16),
        ..Family::EMPTY
    },
    Family {
        typeless: F::Bc7Typeless,
        members: &[
            (F::Bc7Typeless, Role::Typeless),
            (F::Bc7Unorm, Role::Unorm),
            (F::Bc7UnormSrgb, Role::Srgb),
        ],
        unorm: Some(F::Bc7Unorm),
        srgb: Some(F::Bc7UnormSrgb),
        generic: Some(F::Bc7Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::B8G8R8A8Typeless,
        members: &[
            (F::B8G8R8A8Typeless, Role::Typeless),
            (F::B8G8R8A8Unorm, Role::Unorm),
            (F::B8G8R8A8UnormSrgb, Role::Srgb),
        ],
        unorm: Some(F::B8G8R8A8Unorm),
        srgb: Some(F::B8G8R8A8UnormSrgb),
        generic: Some(F::B8G8R8A8Unorm),
        ..Family::EMPTY
    },
    Family {
        typeless: F::B8G8R8X8Typeless,
        members: &[
            (F::B8G8R8X8Typeless, Role::Typeless),
            (F::B8G8R8X8Unorm, Role::Unorm),
            (F::B8G8R8X8UnormSrgb, Role::Srgb),
        ],
        unorm: Some(F::B8G8R8X8Unorm),
        srgb: Some(F::B8G8R8X8UnormSrgb),
        generic: Some(F::B8G8R8X8Unorm),
        ..Family::EMPTY
    },
];

/// Formats that share a layout with a family for storage purposes only.
/// They map to the family's typeless root but take part in no other conversion.
static TYPELESS_ALIASES: &[(PixelFormat, PixelFormat)] = &[
    (F::R10G10B10XrBiasA2Unorm, F::R10G10B10A2Typeless),
    (F::R8G8B8G8Unorm, F::B8G8R8A8Typeless),
    (F::G8R8G8B8Unorm, F::B8G8R8A8Typeless),
];

fn index() -> &'static FxHashMap<PixelFormat, (&'static Family, Role)> {
    static INDEX: OnceLock<FxHashMap<PixelFormat, (&'static Family, Role)>> = OnceLock::new();

    INDEX.get_or_init(|| {
        let mut map = FxHashMap::default();
        for family in FAMILIES {
            for &(format, role) in family.members {
                let previous = map.insert(format, (family, role));
                debug_assert!(previous.is_none(), "{format:?} listed in two families");
            }
        }
        map
    })
}

fn convert(format: PixelFormat, role: Role) -> PixelFormat {
    let Some(&(family, own_role)) = index().get(&format) else {
        return format;
    };
    if own_role == role {
        return format;
    }
    family.sibling(role).unwrap_or(format)
}

/// The depth-stencil typed form of a depth-capable layout (e.g. `R24G8_TYPELESS` → `D24_UNORM_S8_UINT`).
#[must_use]
pub fn depth_typed_form(format: PixelFormat) -> PixelFormat {
    convert(format, Role::Depth)
}

/// The linear (non-sRGB) form of an sRGB format.
#[must_use]
pub fn linear_form(format: PixelFormat) -> PixelFormat {
    match index().get(&format) {
        Some(&(family, Role::Srgb)) => family.unorm.unwrap_or(format),
        _ => format,
    }
}

/// The sRGB form of a typeless or unorm format whose layout has one.
#[must_use]
pub fn srgb_form(format: PixelFormat) -> PixelFormat {
    match index().get(&format) {
        Some(&(family, Role::Typeless | Role::Unorm)) => family.srgb.unwrap_or(format),
        _ => format,
    }
}

#[must_use]
pub fn unorm_form(format: PixelFormat) -> PixelFormat {
    convert(format, Role::Unorm)
}

#[must_use]
pub fn snorm_form(format: PixelFormat) -> PixelFormat {
    convert(format, Role::Snorm)
}

#[must_use]
pub fn uint_form(format: PixelFormat) -> PixelFormat {
    convert(format, Role::Uint)
}

#[must_use]
pub fn sint_form(format: PixelFormat) -> PixelFormat {
    convert(format, Role::Sint)
}

/// The floating-point view of a layout, falling back to [`generic_typed_form`]
/// when the layout has none.
#[must_use]
pub fn float_form(format: PixelFormat) -> PixelFormat {
    if format == F::A8Unorm {
        // Already float-readable; the R8 siblings would move alpha into red.
        return format;
    }
    match index().get(&format) {
        Some(&(_, Role::Float)) => format,
        Some(&(family, _)) => family.float.unwrap_or_else(|| generic_typed_form(format)),
        None => generic_typed_form(format),
    }
}

/// The default typed form of a typeless root. Typed formats are returned unchanged.
#[must_use]
pub fn generic_typed_form(format: PixelFormat) -> PixelFormat {
    match index().get(&format) {
        Some(&(family, Role::Typeless)) => family.generic.unwrap_or(format),
        _ => format,
    }
}

/// The typeless root of the format's layout class.
pub fn typeless_form(format: PixelFormat) -> Result<PixelFormat> {
    if let Some(&(family, _)) = index().get(&format) {
        return Ok(family.typeless);
    }
    if let Some(&(_, root)) = TYPELESS_ALIASES.iter().find(|(alias, _)| *alias == format) {
        return Ok(root);
    }
    if format == PixelFormat::Unknown {
        log::warn!("Getting Typeless format of DXGI_FORMAT_UNKNOWN");
        return Err(CaptureError::UnknownFormat);
    }
    log::error!("No Typeless DXGI Format for {format:?}");
    Err(CaptureError::NoTypelessForm(format))
}

/// Whether a view of `view_format` may be created on storage of `resource_format`.
///
/// Identical formats are always compatible; otherwise both must share a typeless root.
#[must_use]
pub fn views_compatible(view_format: PixelFormat, resource_format: PixelFormat) -> bool {
    if view_format == resource_format {
        return true;
    }
    match (typeless_form(view_format), typeless_form(resource_format)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
