use std::any::Any;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::{NativeHandle, ResourceId, ResourceKind};
use crate::errors::{CaptureError, Result};
use crate::lifetime::{RefCounter, SoftRefDevice};
use crate::registry::Registry;

/// The real API object behind a wrapper.
pub type RealObject = Arc<dyn Any + Send + Sync>;

/// A real API object plus everything the capture layer tracks about it.
///
/// Created through [`Registry::wrap`]. The wrapper starts with one hard
/// reference held by its creator; the release that brings the count to zero
/// runs final teardown:
///
/// 1. the entry is unregistered, so its handle no longer resolves,
/// 2. the construction-time device soft reference is returned,
/// 3. the real object is dropped.
///
/// Teardown runs at most once. `add_ref` and `release` on a torn-down wrapper
/// fail with [`CaptureError::ResourceTornDown`] and leave the device alone.
pub struct WrappedResource<T> {
    id: ResourceId,
    kind: ResourceKind,
    refs: RefCounter,
    record: T,
    real: Mutex<Option<RealObject>>,
    registry: Weak<Registry<T>>,
}

impl<T> WrappedResource<T> {
    pub(crate) fn new(
        id: ResourceId,
        kind: ResourceKind,
        real: RealObject,
        record: T,
        device: Option<Arc<dyn SoftRefDevice>>,
        registry: Weak<Registry<T>>,
    ) -> Self {
        let refs = RefCounter::new(device);
        refs.add_device_soft_ref();
        refs.acquire_creator_ref();
        Self {
            id,
            kind,
            refs,
            record,
            real: Mutex::new(Some(real)),
            registry,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Handle the API consumer holds for this wrapper: its own address.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> NativeHandle {
        NativeHandle::of(self)
    }

    /// Per-kind bookkeeping cached at creation (texture descriptor, shader
    /// entry, view description, ...).
    #[inline]
    #[must_use]
    pub fn record(&self) -> &T {
        &self.record
    }

    #[inline]
    #[must_use]
    pub fn ref_count(&self) -> u32 {
        self.refs.ref_count()
    }

    /// Returns the real object as `R`, or `None` after teardown or on a type
    /// mismatch.
    #[must_use]
    pub fn real<R: Any + Send + Sync>(&self) -> Option<Arc<R>> {
        let real = self.real.lock().clone()?;
        real.downcast::<R>().ok()
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.real.lock().is_none()
    }

    /// Consumer-visible `AddRef`. Returns the new hard count.
    pub fn add_ref(&self) -> Result<u32> {
        if self.is_torn_down() {
            return Err(self.torn_down_error("AddRef"));
        }
        Ok(self.refs.acquire_with_device_soft_ref())
    }

    /// Consumer-visible `Release`. Returns the remaining hard count.
    pub fn release(&self) -> Result<u32> {
        if self.is_torn_down() {
            return Err(self.torn_down_error("Release"));
        }
        let remaining = self.refs.release_with_device_soft_ref()?;
        if remaining == 0 {
            self.teardown()?;
        }
        Ok(remaining)
    }

    /// Undoes construction for a wrapper that was never registered.
    pub(crate) fn abandon(&self) -> Result<()> {
        let real = self.real.lock().take();
        let released = self
            .refs
            .release_with_device_soft_ref()
            .and_then(|_| self.refs.release_device_soft_ref());
        drop(real);
        released
    }

    /// Reclaims a wrapper the application never released, returning every
    /// device soft reference it still holds. The wrapper must already be out
    /// of its registry.
    pub(crate) fn reclaim_leaked(&self) -> Result<()> {
        let Some(real) = self.real.lock().take() else {
            return Ok(());
        };
        let released = self
            .refs
            .release_all_with_device_soft_refs()
            .and_then(|_| self.refs.release_device_soft_ref());
        drop(real);
        released
    }

    fn teardown(&self) -> Result<()> {
        // Taking the real object claims the teardown.
        let Some(real) = self.real.lock().take() else {
            return Err(self.torn_down_error("Release"));
        };
        log::debug!("Final release of {} {}", self.kind, self.id);
        // Keep the registry's Arc alive until teardown has finished with `self`.
        let _entry = self
            .registry
            .upgrade()
            .and_then(|registry| registry.unregister(self.id));
        let released = self.refs.release_device_soft_ref();
        drop(real);
        released
    }

    fn torn_down_error(&self, call: &str) -> CaptureError {
        log::error!("{call} on {} {} after its final release", self.kind, self.id);
        CaptureError::ResourceTornDown {
            kind: self.kind,
            id: self.id,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for WrappedResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedResource")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("refs", &self.refs)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}
