//! Device creation request types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::IsolatedDeviceConfig;
use crate::DEFAULT_FEATURE_LEVELS;

/// Graphics feature level a device can be created at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureLevel {
    #[serde(rename = "9_1")]
    Level9_1,
    #[serde(rename = "9_2")]
    Level9_2,
    #[serde(rename = "9_3")]
    Level9_3,
    #[serde(rename = "10_0")]
    Level10_0,
    #[serde(rename = "10_1")]
    Level10_1,
    #[serde(rename = "11_0")]
    Level11_0,
}

impl FeatureLevel {
    /// Major and minor version of the level.
    pub const fn version(self) -> (u32, u32) {
        match self {
            Self::Level9_1 => (9, 1),
            Self::Level9_2 => (9, 2),
            Self::Level9_3 => (9, 3),
            Self::Level10_0 => (10, 0),
            Self::Level10_1 => (10, 1),
            Self::Level11_0 => (11, 0),
        }
    }
}

impl fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.version();
        write!(f, "{}_{}", major, minor)
    }
}

/// Which driver the native device is created on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// Driver of an explicitly supplied adapter.
    Adapter,

    /// Default hardware-accelerated driver.
    Hardware,
}

/// Parameters for realizing a native device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRequest {
    /// Allow BGRA surfaces so frames can be consumed by 2D compositing layers.
    pub bgra_support: bool,

    /// Allow video processing interop.
    pub video_support: bool,

    /// Enable the native debug layer.
    pub debug_layer: bool,

    /// Feature levels to try, most capable first.
    pub feature_levels: Vec<FeatureLevel>,
}

impl DeviceRequest {
    /// Driver to use given whether an adapter was supplied.
    pub fn driver_kind(has_adapter: bool) -> DriverKind {
        if has_adapter {
            DriverKind::Adapter
        } else {
            DriverKind::Hardware
        }
    }
}

impl Default for DeviceRequest {
    fn default() -> Self {
        Self {
            bgra_support: true,
            video_support: false,
            debug_layer: false,
            feature_levels: DEFAULT_FEATURE_LEVELS.to_vec(),
        }
    }
}

impl From<&IsolatedDeviceConfig> for DeviceRequest {
    fn from(config: &IsolatedDeviceConfig) -> Self {
        Self {
            bgra_support: config.bgra_support,
            video_support: config.video_support,
            debug_layer: config.debug_layer,
            feature_levels: config.feature_levels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels_descend() {
        let request = DeviceRequest::default();
        let levels = &request.feature_levels;
        assert_eq!(levels.first(), Some(&FeatureLevel::Level11_0));
        assert_eq!(levels.last(), Some(&FeatureLevel::Level9_1));
        assert!(levels.windows(2).all(|w| w[0] > w[1]));
        assert!(request.bgra_support);
    }

    #[test]
    fn test_driver_kind() {
        assert_eq!(DeviceRequest::driver_kind(true), DriverKind::Adapter);
        assert_eq!(DeviceRequest::driver_kind(false), DriverKind::Hardware);
    }

    #[test]
    fn test_feature_level_display() {
        assert_eq!(FeatureLevel::Level10_1.to_string(), "10_1");
        assert_eq!(FeatureLevel::Level9_3.version(), (9, 3));
    }
}
