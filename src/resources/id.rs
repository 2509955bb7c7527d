use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global identity generator. Identities are never reused within a process.
static NEXT_RESOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Globally unique identity of a wrapped resource.
///
/// Capture data refers to resources only through this token, never through a
/// native handle. [`ResourceId::NULL`] is the "no resource" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourceId(u64);

impl ResourceId {
    pub const NULL: ResourceId = ResourceId(0);

    /// Allocates a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self(NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Rebuilds an identity read back from capture data.
    ///
    /// Replay uses this to register live objects under the identities the
    /// capture recorded.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId::{}", self.0)
    }
}

/// Opaque handle an API consumer holds for an object.
///
/// For wrapped objects this is the stable address of the wrapper; any other
/// value is a foreign object this layer never created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NativeHandle(usize);

impl NativeHandle {
    pub const NULL: NativeHandle = NativeHandle(0);

    #[inline]
    #[must_use]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Handle naming the object at `ptr`.
    #[inline]
    #[must_use]
    pub fn of<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
