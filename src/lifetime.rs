//! Lifetime / Reference Coordination
//!
//! Two independent counters govern object lifetime:
//!
//! - **Hard references**: the count the API consumer sees on a resource
//!   (acquire / release).
//! - **Soft references**: held by every live resource against its owning
//!   device. One is taken unconditionally at construction and returned at
//!   final teardown; one more accompanies every hard reference.
//!
//! A device is torn down only once both its own hard count and its soft count
//! reach zero, so it always outlives every resource it created even when the
//! consumer has already released it.
//!
//! Imbalances (more releases than acquires) are reported as
//! [`CaptureError::RefCountUnderflow`], never clamped.
//!
//! Every counter operation is `SeqCst`: a hard release and a soft release
//! racing on one device must each observe the other's decrement, or neither
//! would see both counts at zero.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;

use crate::errors::{CaptureError, Result};

/// Decrements `counter`, refusing to go below zero.
fn checked_release(counter: &AtomicU32, what: &'static str) -> Result<u32> {
    match counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)) {
        Ok(prev) => Ok(prev - 1),
        Err(_) => {
            log::error!("Reference count underflow on {what}");
            Err(CaptureError::RefCountUnderflow(what))
        }
    }
}

// ============================================================================
// Device side
// ============================================================================

/// Hook points a device exposes to the resources it owns.
pub trait SoftRefDevice: Send + Sync {
    /// Takes a soft reference; returns the new soft count.
    fn soft_ref(&self) -> u32;

    /// Returns a soft reference; returns the remaining soft count.
    fn soft_release(&self) -> Result<u32>;
}

type TeardownHook = Box<dyn FnOnce() + Send>;

/// Hard and soft counters of a device plus its deferred teardown.
///
/// The teardown hook runs exactly once, on whichever release brings the
/// second of the two counters to zero.
pub struct DeviceRefs {
    hard: AtomicU32,
    soft: AtomicU32,
    torn_down: AtomicBool,
    teardown: Mutex<Option<TeardownHook>>,
}

impl DeviceRefs {
    /// Creates the counters holding the creator's hard reference.
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            hard: AtomicU32::new(1),
            soft: AtomicU32::new(0),
            torn_down: AtomicBool::new(false),
            teardown: Mutex::new(Some(Box::new(teardown))),
        }
    }

    #[inline]
    pub fn add_ref(&self) -> u32 {
        self.hard.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Releases a consumer-visible reference. Reaching zero only tears the
    /// device down if no resource still holds a soft reference.
    pub fn release(&self) -> Result<u32> {
        let remaining = checked_release(&self.hard, "device hard reference")?;
        if remaining == 0 {
            self.try_teardown();
        }
        Ok(remaining)
    }

    #[inline]
    #[must_use]
    pub fn hard_count(&self) -> u32 {
        self.hard.load(Ordering::SeqCst)
    }

    #[inline]
    #[must_use]
    pub fn soft_count(&self) -> u32 {
        self.soft.load(Ordering::SeqCst)
    }

    #[inline]
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    fn try_teardown(&self) {
        if self.hard_count() != 0 || self.soft_count() != 0 {
            return;
        }
        // The hook is taken under the lock, so racing releases run it once.
        let hook = self.teardown.lock().take();
        if let Some(hook) = hook {
            log::debug!("Device teardown: all hard and soft references released");
            self.torn_down.store(true, Ordering::SeqCst);
            hook();
        }
    }
}

impl SoftRefDevice for DeviceRefs {
    fn soft_ref(&self) -> u32 {
        if self.is_torn_down() {
            log::error!("Soft reference taken on a device that has already been torn down");
        }
        self.soft.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn soft_release(&self) -> Result<u32> {
        let remaining = checked_release(&self.soft, "device soft reference")?;
        if remaining == 0 {
            self.try_teardown();
        }
        Ok(remaining)
    }
}

impl std::fmt::Debug for DeviceRefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceRefs")
            .field("hard", &self.hard_count())
            .field("soft", &self.soft_count())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}

// ============================================================================
// Resource side
// ============================================================================

/// Hard reference count of one resource, paired with its owning device.
pub struct RefCounter {
    refs: AtomicU32,
    device: Option<Arc<dyn SoftRefDevice>>,
}

impl RefCounter {
    /// Starts at zero hard references; the creator's reference is taken with
    /// [`RefCounter::acquire_creator_ref`].
    #[must_use]
    pub fn new(device: Option<Arc<dyn SoftRefDevice>>) -> Self {
        Self {
            refs: AtomicU32::new(0),
            device,
        }
    }

    #[inline]
    #[must_use]
    pub fn ref_count(&self) -> u32 {
        self.refs.load(Ordering::SeqCst)
    }

    #[inline]
    #[must_use]
    pub fn device(&self) -> Option<&Arc<dyn SoftRefDevice>> {
        self.device.as_ref()
    }

    /// Takes the creator's hard reference and its device soft reference.
    ///
    /// Wrapping without a device is legitimate, so unlike
    /// [`RefCounter::acquire_with_device_soft_ref`] this never logs.
    pub fn acquire_creator_ref(&self) -> u32 {
        let count = self.refs.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(device) = &self.device {
            device.soft_ref();
        }
        count
    }

    /// Adds a hard reference and a matching device soft reference.
    ///
    /// Without a device only the hard count moves, and the call is logged:
    /// it means a resource is being used after its device went away.
    pub fn acquire_with_device_soft_ref(&self) -> u32 {
        let count = self.refs.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.device {
            Some(device) => {
                device.soft_ref();
            }
            None => log::warn!("No device pointer, is a deleted resource being AddRef()d?"),
        }
        count
    }

    /// Drops a hard reference and its matching device soft reference.
    /// Returns the remaining hard count.
    pub fn release_with_device_soft_ref(&self) -> Result<u32> {
        let count = checked_release(&self.refs, "resource hard reference")?;
        match &self.device {
            Some(device) => {
                device.soft_release()?;
            }
            None => log::warn!("No device pointer, is a deleted resource being Release()d?"),
        }
        Ok(count)
    }

    /// Takes the unconditional construction-time soft reference on the device.
    pub fn add_device_soft_ref(&self) {
        if let Some(device) = &self.device {
            device.soft_ref();
        }
    }

    /// Returns the construction-time soft reference at final teardown.
    pub fn release_device_soft_ref(&self) -> Result<()> {
        if let Some(device) = &self.device {
            device.soft_release()?;
        }
        Ok(())
    }

    /// Zeroes the hard count and returns the soft reference paired with each
    /// hard reference still held. Used when leaked resources are reclaimed.
    /// Returns how many hard references were dropped.
    pub fn release_all_with_device_soft_refs(&self) -> Result<u32> {
        let held = self.refs.swap(0, Ordering::SeqCst);
        if let Some(device) = &self.device {
            for _ in 0..held {
                device.soft_release()?;
            }
        }
        Ok(held)
    }
}

impl std::fmt::Debug for RefCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefCounter")
            .field("refs", &self.ref_count())
            .field("has_device", &self.device.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_device() -> (Arc<DeviceRefs>, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let hook_fired = Arc::clone(&fired);
        let device = Arc::new(DeviceRefs::new(move || {
            hook_fired.fetch_add(1, Ordering::SeqCst);
        }));
        (device, fired)
    }

    #[test]
    fn device_waits_for_soft_refs() {
        let (device, fired) = counting_device();
        device.soft_ref();

        assert_eq!(device.release().unwrap(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!device.is_torn_down());

        assert_eq!(device.soft_release().unwrap(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(device.is_torn_down());
    }

    #[test]
    fn underflow_is_reported() {
        let (device, _) = counting_device();
        assert!(matches!(
            device.soft_release(),
            Err(CaptureError::RefCountUnderflow(_))
        ));

        let counter = RefCounter::new(None);
        assert!(counter.release_with_device_soft_ref().is_err());
        assert_eq!(counter.ref_count(), 0);
    }

    #[test]
    fn missing_device_still_counts() {
        let counter = RefCounter::new(None);
        assert_eq!(counter.acquire_with_device_soft_ref(), 1);
        assert_eq!(counter.acquire_with_device_soft_ref(), 2);
        assert_eq!(counter.release_with_device_soft_ref().unwrap(), 1);
        counter.add_device_soft_ref();
        counter.release_device_soft_ref().unwrap();
    }

    #[test]
    fn creator_ref_without_device() {
        let counter = RefCounter::new(None);
        assert_eq!(counter.acquire_creator_ref(), 1);
        assert_eq!(counter.release_with_device_soft_ref().unwrap(), 0);
    }

    #[test]
    fn release_all_returns_every_paired_soft_ref() {
        let (device, fired) = counting_device();
        let counter = RefCounter::new(Some(device.clone() as Arc<dyn SoftRefDevice>));
        counter.acquire_creator_ref();
        counter.acquire_with_device_soft_ref();
        assert_eq!(device.soft_count(), 2);

        assert_eq!(counter.release_all_with_device_soft_refs().unwrap(), 2);
        assert_eq!(counter.ref_count(), 0);
        assert_eq!(device.soft_count(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn racing_hard_and_soft_release_tear_down_once() {
        for _ in 0..200 {
            let (device, fired) = counting_device();
            device.soft_ref();

            let hard = {
                let device = Arc::clone(&device);
                std::thread::spawn(move || device.release().unwrap())
            };
            let soft = {
                let device = Arc::clone(&device);
                std::thread::spawn(move || device.soft_release().unwrap())
            };
            hard.join().unwrap();
            soft.join().unwrap();

            assert_eq!(fired.load(Ordering::SeqCst), 1);
            assert!(device.is_torn_down());
        }
    }

    #[test]
    fn acquire_pairs_with_device() {
        let (device, _) = counting_device();
        let counter = RefCounter::new(Some(device.clone() as Arc<dyn SoftRefDevice>));
        counter.add_device_soft_ref();
        counter.acquire_with_device_soft_ref();
        counter.acquire_with_device_soft_ref();
        assert_eq!(device.soft_count(), 3);

        counter.release_with_device_soft_ref().unwrap();
        assert_eq!(device.soft_count(), 2);
    }
}
