//! Shared value types for the isolated capture device.
//!
//! This crate defines the texture descriptor, device request and
//! configuration types used by the device layer and by integrators that
//! consume shared textures on their own rendering device.

mod config;
mod device;
mod texture;

pub use config::{IsolatedDeviceConfig, ReplacePolicy};
pub use device::{DeviceRequest, DriverKind, FeatureLevel};
pub use texture::{PixelFormat, ResourceMiscFlags, SharedHandle, TextureDesc};

/// Default number of cached shared textures per isolated device.
pub const DEFAULT_CACHED_TEXTURE_COUNT: usize = 3;

/// Feature levels requested on device creation, most capable first.
pub const DEFAULT_FEATURE_LEVELS: [FeatureLevel; 6] = [
    FeatureLevel::Level11_0,
    FeatureLevel::Level10_1,
    FeatureLevel::Level10_0,
    FeatureLevel::Level9_3,
    FeatureLevel::Level9_2,
    FeatureLevel::Level9_1,
];
