//! Isolated device configuration.

use serde::{Deserialize, Serialize};

use crate::device::FeatureLevel;
use crate::{DEFAULT_CACHED_TEXTURE_COUNT, DEFAULT_FEATURE_LEVELS};

/// What the producer does when the slot it targets is locked by a consumer
/// and its texture has to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacePolicy {
    /// Replace the texture regardless of the lock. The consumer keeps its
    /// own reference alive but may see a stale frame or tearing.
    #[default]
    Overwrite,

    /// Keep the previous texture while the slot is locked and return it.
    SkipWhileLocked,
}

/// Configuration for an isolated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolatedDeviceConfig {
    /// Number of cached shared texture slots.
    pub cached_texture_count: usize,

    /// Create the device with BGRA (2D interop) support.
    pub bgra_support: bool,

    /// Create the device with video support.
    pub video_support: bool,

    /// Enable the native debug layer.
    pub debug_layer: bool,

    /// Feature levels to try, most capable first.
    pub feature_levels: Vec<FeatureLevel>,

    /// Behavior when replacing a locked slot.
    pub replace_policy: ReplacePolicy,
}

impl IsolatedDeviceConfig {
    /// Default configuration with the given slot count.
    pub fn with_cached_texture_count(count: usize) -> Self {
        Self {
            cached_texture_count: count,
            ..Default::default()
        }
    }
}

impl Default for IsolatedDeviceConfig {
    fn default() -> Self {
        Self {
            cached_texture_count: DEFAULT_CACHED_TEXTURE_COUNT,
            bgra_support: true,
            video_support: false,
            debug_layer: false,
            feature_levels: DEFAULT_FEATURE_LEVELS.to_vec(),
            replace_policy: ReplacePolicy::Overwrite,
        }
    }
}
