//! Cached shared texture slot.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::{DeviceResult, GpuTexture, SharedHandle, TextureDesc};

/// One cached texture plus a non-blocking lock flag.
///
/// The producer replaces the texture through the owning
/// [`IsolatedDevice`](crate::IsolatedDevice); consumers call [`lock`](Self::lock)
/// before reading it on their own device and [`unlock`](Self::unlock) after.
/// The lock never blocks: a consumer that finds the slot locked skips it.
#[derive(Debug)]
pub struct SharedTextureSlot<T> {
    texture: Mutex<Option<T>>,
    locked: AtomicBool,
}

impl<T: Clone> SharedTextureSlot<T> {
    /// Create an empty, unlocked slot.
    pub fn new() -> Self {
        Self {
            texture: Mutex::new(None),
            locked: AtomicBool::new(false),
        }
    }

    /// Get the current texture without touching the lock.
    pub fn get(&self) -> Option<T> {
        self.texture.lock().clone()
    }

    /// Try to lock the slot.
    ///
    /// Returns `None` without waiting if the slot is already locked.
    /// Otherwise the slot is locked and its current texture is returned,
    /// which is also `None` for a slot that has never been populated.
    pub fn lock(&self) -> Option<T> {
        let texture = self.texture.lock();
        if self
            .locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        texture.clone()
    }

    /// Unlock the slot. Safe to call on an unlocked slot.
    pub fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    /// Check whether the slot is locked. Advisory only.
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Lock the slot for the lifetime of the returned guard.
    pub fn try_acquire(&self) -> Option<SlotGuard<'_, T>> {
        let texture = self.texture.lock();
        if self
            .locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        Some(SlotGuard {
            slot: self,
            texture: texture.clone(),
        })
    }

    /// Store a new texture, returning the previous one.
    pub(crate) fn store(&self, texture: T) -> Option<T> {
        self.texture.lock().replace(texture)
    }

    /// Store a new texture unless a consumer holds the populated slot.
    ///
    /// On refusal the new texture is handed back.
    pub(crate) fn store_unless_busy(&self, texture: T) -> Result<Option<T>, T> {
        let mut current = self.texture.lock();
        if current.is_some() && self.locked.load(Ordering::Acquire) {
            return Err(texture);
        }
        Ok(current.replace(texture))
    }
}

impl<T: GpuTexture> SharedTextureSlot<T> {
    /// Description of the current texture.
    pub fn desc(&self) -> Option<TextureDesc> {
        self.texture.lock().as_ref().map(GpuTexture::desc)
    }

    /// Cross-device handle of the current texture.
    pub fn shared_handle(&self) -> Option<DeviceResult<SharedHandle>> {
        self.texture.lock().as_ref().map(GpuTexture::shared_handle)
    }
}

impl<T: Clone> Default for SharedTextureSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped lock on a [`SharedTextureSlot`]; unlocks when dropped.
#[derive(Debug)]
pub struct SlotGuard<'a, T: Clone> {
    slot: &'a SharedTextureSlot<T>,
    texture: Option<T>,
}

impl<T: Clone> SlotGuard<'_, T> {
    /// Texture snapshot taken when the lock was acquired.
    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }
}

impl<T: Clone> Drop for SlotGuard<'_, T> {
    fn drop(&mut self) {
        self.slot.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTexture;
    use crate::PixelFormat;

    fn populated() -> (SharedTextureSlot<FakeTexture>, FakeTexture) {
        let slot = SharedTextureSlot::new();
        let texture = FakeTexture::new(TextureDesc::new(64, 64, PixelFormat::BGRA8_UNORM));
        slot.store(texture.clone());
        (slot, texture)
    }

    #[test]
    fn test_new_slot_is_empty() {
        let slot: SharedTextureSlot<FakeTexture> = SharedTextureSlot::new();
        assert!(slot.get().is_none());
        assert!(slot.desc().is_none());
        assert!(!slot.is_locked());
    }

    #[test]
    fn test_get_does_not_lock() {
        let (slot, texture) = populated();
        let current = slot.get().unwrap();

        assert!(current.same_resource(&texture));
        assert!(!slot.is_locked());
    }

    #[test]
    fn test_lock_is_non_blocking() {
        let (slot, texture) = populated();

        let first = slot.lock().unwrap();
        assert!(first.same_resource(&texture));
        assert!(slot.is_locked());

        assert!(slot.lock().is_none());
        assert!(slot.is_locked());
    }

    #[test]
    fn test_lock_empty_slot() {
        let slot: SharedTextureSlot<FakeTexture> = SharedTextureSlot::new();
        assert!(slot.lock().is_none());
        assert!(slot.is_locked());
        slot.unlock();
        assert!(!slot.is_locked());
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let (slot, _texture) = populated();

        slot.unlock();
        assert!(!slot.is_locked());

        slot.lock();
        slot.unlock();
        slot.unlock();
        slot.unlock();
        assert!(!slot.is_locked());
        assert!(slot.lock().is_some());
    }

    #[test]
    fn test_guard_unlocks_on_drop() {
        let (slot, texture) = populated();
        {
            let guard = slot.try_acquire().unwrap();
            assert!(guard.texture().unwrap().same_resource(&texture));
            assert!(slot.try_acquire().is_none());
            assert!(slot.lock().is_none());
        }
        assert!(!slot.is_locked());
    }

    #[test]
    fn test_store_unless_busy() {
        let (slot, texture) = populated();
        let next = FakeTexture::new(TextureDesc::new(32, 32, PixelFormat::BGRA8_UNORM));

        slot.lock();
        let refused = slot.store_unless_busy(next.clone()).unwrap_err();
        assert!(refused.same_resource(&next));
        assert!(slot.get().unwrap().same_resource(&texture));

        slot.unlock();
        let previous = slot.store_unless_busy(next.clone()).unwrap().unwrap();
        assert!(previous.same_resource(&texture));
        assert!(slot.get().unwrap().same_resource(&next));
    }

    #[test]
    fn test_replaced_texture_outlives_slot_reference() {
        let (slot, texture) = populated();
        let held = slot.lock().unwrap();

        let next = FakeTexture::new(TextureDesc::new(8, 8, PixelFormat::BGRA8_UNORM));
        slot.store(next);
        drop(texture);

        assert_eq!(held.desc().width, 64);
        assert_eq!(held.ref_count(), 1);
    }
}
