//! Isolated device that owns the shared texture cache.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, trace, warn};

use crate::error::DeviceError;
use crate::slot::SharedTextureSlot;
use crate::{
    DeviceRequest, DeviceResult, FeatureLevel, GpuTexture, GraphicsBackend, GraphicsDevice,
    IsolatedDeviceConfig, ReplacePolicy, TextureOf,
};

/// A graphics device independent of the host's, plus a fixed pool of
/// shareable texture slots created on it.
///
/// Every slot texture is created by the device this value owns. Dropping
/// the isolated device releases the device and the slot references;
/// consumers that still hold a texture keep it alive until they release it.
pub struct IsolatedDevice<B: GraphicsBackend> {
    backend: B,
    device: Option<B::Device>,
    slots: Vec<Arc<SharedTextureSlot<TextureOf<B>>>>,
    config: IsolatedDeviceConfig,
}

impl<B: GraphicsBackend> IsolatedDevice<B> {
    /// Allocate `cached_texture_count` empty slots. No native resources are
    /// created until [`create`](Self::create).
    pub fn new(backend: B, cached_texture_count: usize) -> Self {
        Self::with_config(
            backend,
            IsolatedDeviceConfig::with_cached_texture_count(cached_texture_count),
        )
    }

    /// Allocate empty slots as described by `config`.
    pub fn with_config(backend: B, config: IsolatedDeviceConfig) -> Self {
        let slots = (0..config.cached_texture_count)
            .map(|_| Arc::new(SharedTextureSlot::new()))
            .collect();

        Self {
            backend,
            device: None,
            slots,
            config,
        }
    }

    /// Realize the native device on `adapter`, or on the default hardware
    /// driver. The backend's status code is returned unchanged on failure.
    #[instrument(
        name = "isolated_device_create",
        skip(self, adapter),
        fields(has_adapter = adapter.is_some())
    )]
    pub fn create(&mut self, adapter: Option<&B::Adapter>) -> DeviceResult<()> {
        if self.device.is_some() {
            return Err(DeviceError::AlreadyCreated);
        }

        let request = DeviceRequest::from(&self.config);
        let device = match self.backend.create_device(adapter, &request) {
            Ok(device) => device,
            Err(e) => {
                error!("Creating isolated device failed: {}", e);
                return Err(e);
            }
        };

        info!(
            feature_level = %device.feature_level(),
            slots = self.slots.len(),
            "Created isolated device"
        );
        self.device = Some(device);
        Ok(())
    }

    /// Get slot `index` holding a shareable texture compatible with `src`.
    ///
    /// A slot whose texture already matches the source's format, width and
    /// height is returned as is. Otherwise a new, uninitialized texture is
    /// created from the source's description with the shared flag set; the
    /// caller copies the frame into it. On failure the slot keeps its
    /// previous texture.
    pub fn get_compatible_slot(
        &mut self,
        src: &TextureOf<B>,
        index: usize,
    ) -> DeviceResult<Arc<SharedTextureSlot<TextureOf<B>>>> {
        let count = self.slots.len();
        let Some(slot) = self.slots.get(index) else {
            error!(index, count, "Slot index out of cached texture range");
            return Err(DeviceError::IndexOutOfRange { index, count });
        };

        let Some(device) = self.device.as_ref() else {
            error!(index, "Shared texture requested before create");
            return Err(DeviceError::NotCreated);
        };

        let src_desc = src.desc();
        if let Some(current) = slot.desc() {
            if current.is_compatible_with(&src_desc) {
                trace!(index, "Reusing cached shared texture");
                return Ok(Arc::clone(slot));
            }

            if self.config.replace_policy == ReplacePolicy::SkipWhileLocked && slot.is_locked() {
                warn!(index, %current, new = %src_desc, "Slot is locked, keeping previous texture");
                return Ok(Arc::clone(slot));
            }
        }

        let desc = src_desc.to_shareable();
        let texture = match device.create_texture(&desc) {
            Ok(texture) => texture,
            Err(e) => {
                error!(index, %desc, "Creating shared texture failed: {}", e);
                return Err(e);
            }
        };

        match self.config.replace_policy {
            ReplacePolicy::Overwrite => {
                let previous = slot.store(texture);
                debug!(index, %desc, replaced = previous.is_some(), "Created shared texture");
            }
            ReplacePolicy::SkipWhileLocked => match slot.store_unless_busy(texture) {
                Ok(previous) => {
                    debug!(index, %desc, replaced = previous.is_some(), "Created shared texture");
                }
                Err(_) => {
                    warn!(index, %desc, "Slot was locked during creation, discarding new texture");
                }
            },
        }

        Ok(Arc::clone(slot))
    }

    /// Get the realized native device.
    pub fn device(&self) -> Option<&B::Device> {
        self.device.as_ref()
    }

    /// Check whether [`create`](Self::create) succeeded.
    pub fn is_created(&self) -> bool {
        self.device.is_some()
    }

    /// Feature level of the realized device.
    pub fn feature_level(&self) -> Option<FeatureLevel> {
        self.device.as_ref().map(GraphicsDevice::feature_level)
    }

    /// Number of cached texture slots.
    pub fn cached_texture_count(&self) -> usize {
        self.slots.len()
    }

    /// Get slot `index` without touching its texture.
    pub fn slot(&self, index: usize) -> Option<Arc<SharedTextureSlot<TextureOf<B>>>> {
        self.slots.get(index).cloned()
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Arc<SharedTextureSlot<TextureOf<B>>>] {
        &self.slots
    }

    /// Get the configuration.
    pub fn config(&self) -> &IsolatedDeviceConfig {
        &self.config
    }
}

impl<B: GraphicsBackend> Drop for IsolatedDevice<B> {
    fn drop(&mut self) {
        if self.device.is_some() {
            debug!(slots = self.slots.len(), "Releasing isolated device");
        }
    }
}
