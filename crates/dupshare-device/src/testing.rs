//! In-memory backend for exercising the device layer without a GPU.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    DeviceError, DeviceRequest, DeviceResult, DriverKind, FeatureLevel, GpuTexture,
    GraphicsBackend, GraphicsDevice, SharedHandle, TextureDesc,
};

/// Status code reported when no requested feature level is supported.
pub const UNSUPPORTED_CODE: i32 = 0x887A0004_u32 as i32;

/// Status code reported for an injected allocation failure.
pub const OUT_OF_MEMORY_CODE: i32 = 0x8007000E_u32 as i32;

static NEXT_RESOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Install a test subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dupshare_device=trace".into()),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
struct FakeResource {
    id: u64,
    desc: TextureDesc,
}

/// Reference-counted fake texture.
#[derive(Clone, Debug)]
pub struct FakeTexture {
    inner: Arc<FakeResource>,
}

impl FakeTexture {
    pub fn new(desc: TextureDesc) -> Self {
        Self {
            inner: Arc::new(FakeResource {
                id: NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed),
                desc,
            }),
        }
    }

    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl GpuTexture for FakeTexture {
    fn desc(&self) -> TextureDesc {
        self.inner.desc
    }

    fn shared_handle(&self) -> DeviceResult<SharedHandle> {
        if !self.inner.desc.misc_flags.is_shareable() {
            return Err(DeviceError::SharedHandle {
                message: "texture was not created shareable".to_string(),
            });
        }
        Ok(SharedHandle(self.inner.id as usize))
    }

    fn same_resource(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Fake device with injectable texture creation failures.
pub struct FakeDevice {
    feature_level: FeatureLevel,
    fail_next: AtomicBool,
    created: AtomicUsize,
}

impl FakeDevice {
    /// Make the next texture creation fail.
    pub fn fail_next_texture(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of textures created so far.
    pub fn textures_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl GraphicsDevice for FakeDevice {
    type Texture = FakeTexture;

    fn create_texture(&self, desc: &TextureDesc) -> DeviceResult<FakeTexture> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DeviceError::TextureCreation {
                code: Some(OUT_OF_MEMORY_CODE),
                message: "out of video memory".to_string(),
            });
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(FakeTexture::new(*desc))
    }

    fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }
}

/// Adapter selector for the fake backend.
pub struct FakeAdapter {
    pub max_level: FeatureLevel,
}

/// Fake backend that records the last device request.
pub struct FakeBackend {
    max_level: FeatureLevel,
    last_request: Mutex<Option<(DriverKind, DeviceRequest)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::with_max_level(FeatureLevel::Level11_0)
    }

    pub fn with_max_level(max_level: FeatureLevel) -> Self {
        Self {
            max_level,
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<(DriverKind, DeviceRequest)> {
        self.last_request.lock().clone()
    }
}

impl GraphicsBackend for FakeBackend {
    type Adapter = FakeAdapter;
    type Device = FakeDevice;

    fn create_device(
        &self,
        adapter: Option<&FakeAdapter>,
        request: &DeviceRequest,
    ) -> DeviceResult<FakeDevice> {
        let driver = DeviceRequest::driver_kind(adapter.is_some());
        *self.last_request.lock() = Some((driver, request.clone()));

        let max_level = adapter.map_or(self.max_level, |adapter| adapter.max_level);
        let feature_level = request
            .feature_levels
            .iter()
            .copied()
            .find(|level| *level <= max_level)
            .ok_or_else(|| DeviceError::CreationFailed {
                code: UNSUPPORTED_CODE,
                message: "no requested feature level is supported".to_string(),
            })?;

        Ok(FakeDevice {
            feature_level,
            fail_next: AtomicBool::new(false),
            created: AtomicUsize::new(0),
        })
    }
}
