//! Isolated graphics device and shared texture cache.
//!
//! This crate owns a secondary graphics device, independent of the host
//! application's rendering device, and a fixed pool of cross-device
//! shareable textures that captured desktop frames are copied into.

mod cursor;
#[cfg(windows)]
mod d3d11;
mod error;
mod isolated;
mod slot;
#[cfg(test)]
mod testing;

pub use cursor::SlotCursor;
#[cfg(windows)]
pub use d3d11::{D3D11Backend, D3D11Device, IsolatedD3D11Device};
pub use error::DeviceError;
pub use isolated::IsolatedDevice;
pub use slot::{SharedTextureSlot, SlotGuard};

pub use dupshare_types::{
    DeviceRequest, DriverKind, FeatureLevel, IsolatedDeviceConfig, PixelFormat, ReplacePolicy,
    ResourceMiscFlags, SharedHandle, TextureDesc, DEFAULT_CACHED_TEXTURE_COUNT,
    DEFAULT_FEATURE_LEVELS,
};

/// Result type for isolated device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// A reference-counted GPU texture.
///
/// Cloning adds a reference to the same underlying resource; the resource
/// is released when the last clone is dropped.
pub trait GpuTexture: Clone + Send + Sync {
    /// Read the texture description.
    fn desc(&self) -> TextureDesc;

    /// Get the handle another device can open this texture with.
    fn shared_handle(&self) -> DeviceResult<SharedHandle>;

    /// Check whether both references point at the same resource.
    fn same_resource(&self, other: &Self) -> bool;
}

/// A realized native graphics device.
pub trait GraphicsDevice: Send + Sync {
    /// Texture type created by this device.
    type Texture: GpuTexture;

    /// Create an uninitialized texture.
    fn create_texture(&self, desc: &TextureDesc) -> DeviceResult<Self::Texture>;

    /// Feature level the device was created at.
    fn feature_level(&self) -> FeatureLevel;
}

/// Factory for native graphics devices.
pub trait GraphicsBackend {
    /// Adapter selector accepted on device creation.
    type Adapter;

    /// Device type produced by this backend.
    type Device: GraphicsDevice;

    /// Create a device on `adapter`, or on the default hardware driver when
    /// no adapter is supplied.
    fn create_device(
        &self,
        adapter: Option<&Self::Adapter>,
        request: &DeviceRequest,
    ) -> DeviceResult<Self::Device>;
}

/// Texture type served by the devices of backend `B`.
pub type TextureOf<B> = <<B as GraphicsBackend>::Device as GraphicsDevice>::Texture;
