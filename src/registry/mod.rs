//! Wrapped-Resource Registry
//!
//! One [`Registry`] per [`ResourceKind`], mapping identities to live wrappers
//! plus a reverse index from native handles. Both maps sit behind a single
//! lock, so a concurrent lookup sees an entry either fully registered or fully
//! removed.
//!
//! [`ResourceRegistries`] owns the full set of per-kind registries and answers
//! "which wrapped object is this handle?" by probing them in a fixed order.

pub mod dispatch;
pub mod registries;

pub use dispatch::PROBE_ORDER;
pub use registries::ResourceRegistries;

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{CaptureError, Result};
use crate::lifetime::SoftRefDevice;
use crate::resources::{NativeHandle, RealObject, ResourceId, ResourceKind, WrappedResource};

// Internal data structure, protected by a lock.
struct RegistryInner<T> {
    by_id: FxHashMap<ResourceId, Arc<WrappedResource<T>>>,
    by_handle: FxHashMap<NativeHandle, ResourceId>,
}

impl<T> Default for RegistryInner<T> {
    fn default() -> Self {
        Self {
            by_id: FxHashMap::default(),
            by_handle: FxHashMap::default(),
        }
    }
}

/// Thread-safe registry of every live wrapper of one kind.
pub struct Registry<T> {
    kind: ResourceKind,
    inner: RwLock<RegistryInner<T>>,
}

impl<T> Registry<T> {
    #[must_use]
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            inner: RwLock::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Wraps a freshly created real object under a new identity and registers it.
    ///
    /// The returned wrapper holds one hard reference for its creator.
    pub fn wrap(
        self: &Arc<Self>,
        real: RealObject,
        record: T,
        device: Option<Arc<dyn SoftRefDevice>>,
    ) -> Result<Arc<WrappedResource<T>>> {
        self.wrap_with_id(ResourceId::new(), real, record, device)
    }

    /// Wraps a real object under a known identity, as replay does when it
    /// recreates the objects a capture refers to.
    pub fn wrap_with_id(
        self: &Arc<Self>,
        id: ResourceId,
        real: RealObject,
        record: T,
        device: Option<Arc<dyn SoftRefDevice>>,
    ) -> Result<Arc<WrappedResource<T>>> {
        let wrapper = Arc::new(WrappedResource::new(
            id,
            self.kind,
            real,
            record,
            device,
            Arc::downgrade(self),
        ));
        if let Err(err) = self.register(Arc::clone(&wrapper)) {
            wrapper.abandon()?;
            return Err(err);
        }
        Ok(wrapper)
    }

    /// [Write] Adds a live wrapper. Fails if its identity or handle is already live.
    pub fn register(&self, wrapper: Arc<WrappedResource<T>>) -> Result<NativeHandle> {
        debug_assert_eq!(wrapper.kind(), self.kind, "wrapper registered with the wrong kind");

        let id = wrapper.id();
        let handle = wrapper.handle();
        let mut guard = self.inner.write();

        if guard.by_id.contains_key(&id) {
            log::error!("Duplicate {} registration for {id}", self.kind);
            return Err(CaptureError::DuplicateResource {
                kind: self.kind,
                id,
            });
        }
        if guard.by_handle.contains_key(&handle) {
            log::error!("Duplicate {} registration for handle {handle}", self.kind);
            return Err(CaptureError::DuplicateHandle {
                kind: self.kind,
                handle,
            });
        }

        guard.by_handle.insert(handle, id);
        guard.by_id.insert(id, wrapper);
        log::trace!("Registered {} {id} at {handle}", self.kind);
        Ok(handle)
    }

    /// [Read] Gets the live wrapper for an identity.
    #[must_use]
    pub fn lookup(&self, id: ResourceId) -> Option<Arc<WrappedResource<T>>> {
        self.inner.read().by_id.get(&id).cloned()
    }

    /// Like [`Registry::lookup`], but a missing entry is an error.
    pub fn get(&self, id: ResourceId) -> Result<Arc<WrappedResource<T>>> {
        self.lookup(id).ok_or(CaptureError::ResourceNotFound {
            kind: self.kind,
            id,
        })
    }

    #[must_use]
    pub fn lookup_by_handle(&self, handle: NativeHandle) -> Option<Arc<WrappedResource<T>>> {
        let guard = self.inner.read();
        let id = guard.by_handle.get(&handle)?;
        guard.by_id.get(id).cloned()
    }

    /// [Write] Removes an entry, returning it. Removing an absent entry is a no-op.
    pub fn unregister(&self, id: ResourceId) -> Option<Arc<WrappedResource<T>>> {
        let mut guard = self.inner.write();
        let wrapper = guard.by_id.remove(&id)?;
        guard.by_handle.remove(&wrapper.handle());
        log::trace!("Unregistered {} {id}", self.kind);
        Some(wrapper)
    }

    /// Membership test on the handle index. Never dereferences `handle`.
    #[must_use]
    pub fn contains_handle(&self, handle: NativeHandle) -> bool {
        self.inner.read().by_handle.contains_key(&handle)
    }

    #[must_use]
    pub fn identity_of(&self, handle: NativeHandle) -> Option<ResourceId> {
        self.inner.read().by_handle.get(&handle).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }

    /// [Write] Removes every entry and hands the wrappers back to the caller.
    pub fn drain(&self) -> Vec<Arc<WrappedResource<T>>> {
        let mut guard = self.inner.write();
        guard.by_handle.clear();
        guard.by_id.drain().map(|(_, wrapper)| wrapper).collect()
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("len", &self.len())
            .finish()
    }
}

// ============================================================================
// Type-erased access
// ============================================================================

/// The kind-independent face of a [`Registry`], used when probing every
/// registry for a handle.
pub trait KindRegistry: Send + Sync {
    fn kind(&self) -> ResourceKind;
    fn contains_handle(&self, handle: NativeHandle) -> bool;
    fn identity_of(&self, handle: NativeHandle) -> Option<ResourceId>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Drops every remaining entry, returning the identities that were still
    /// live. Each is reclaimed so it no longer holds device soft references.
    fn clear(&self) -> Vec<ResourceId>;
}

impl<T: Send + Sync> KindRegistry for Registry<T> {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn contains_handle(&self, handle: NativeHandle) -> bool {
        Registry::contains_handle(self, handle)
    }

    fn identity_of(&self, handle: NativeHandle) -> Option<ResourceId> {
        Registry::identity_of(self, handle)
    }

    fn len(&self) -> usize {
        Registry::len(self)
    }

    fn clear(&self) -> Vec<ResourceId> {
        self.drain()
            .into_iter()
            .map(|wrapper| {
                if let Err(err) = wrapper.reclaim_leaked() {
                    log::error!("Reclaiming leaked {} {}: {err}", self.kind, wrapper.id());
                }
                wrapper.id()
            })
            .collect()
    }
}
