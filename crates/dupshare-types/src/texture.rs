//! Texture descriptor types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel format of a texture, stored as the native DXGI format code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelFormat(pub u32);

impl PixelFormat {
    pub const UNKNOWN: Self = Self(0);
    pub const RGBA16_FLOAT: Self = Self(10);
    pub const RGB10A2_UNORM: Self = Self(24);
    pub const RGBA8_UNORM: Self = Self(28);
    pub const BGRA8_UNORM: Self = Self(87);
    pub const BGRA8_UNORM_SRGB: Self = Self(91);
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::UNKNOWN => write!(f, "UNKNOWN"),
            Self::RGBA16_FLOAT => write!(f, "R16G16B16A16_FLOAT"),
            Self::RGB10A2_UNORM => write!(f, "R10G10B10A2_UNORM"),
            Self::RGBA8_UNORM => write!(f, "R8G8B8A8_UNORM"),
            Self::BGRA8_UNORM => write!(f, "B8G8R8A8_UNORM"),
            Self::BGRA8_UNORM_SRGB => write!(f, "B8G8R8A8_UNORM_SRGB"),
            Self(code) => write!(f, "DXGI_FORMAT({code})"),
        }
    }
}

/// Miscellaneous resource flags of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourceMiscFlags(pub u32);

impl ResourceMiscFlags {
    pub const NONE: Self = Self(0);
    /// Openable by another device through a legacy shared handle.
    pub const SHARED: Self = Self(0x2);
    pub const SHARED_KEYED_MUTEX: Self = Self(0x100);
    pub const SHARED_NT_HANDLE: Self = Self(0x800);

    /// Check whether all bits of `other` are set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether any sharing flag is set.
    pub fn is_shareable(self) -> bool {
        self.0 & (Self::SHARED.0 | Self::SHARED_KEYED_MUTEX.0 | Self::SHARED_NT_HANDLE.0) != 0
    }
}

impl std::ops::BitOr for ResourceMiscFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Description of a 2D texture.
///
/// Mirrors the native 2D texture descriptor field for field so that a
/// backend can convert in both directions without losing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDesc {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,

    pub mip_levels: u32,
    pub array_size: u32,

    /// Pixel format.
    pub format: PixelFormat,

    pub sample_count: u32,
    pub sample_quality: u32,

    /// Native usage value (0 is default GPU read/write).
    pub usage: u32,

    /// Native bind flags.
    pub bind_flags: u32,

    /// Native CPU access flags.
    pub cpu_access_flags: u32,

    /// Miscellaneous resource flags.
    pub misc_flags: ResourceMiscFlags,
}

impl TextureDesc {
    /// Create a single-mip, single-sample GPU texture description.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            mip_levels: 1,
            array_size: 1,
            format,
            sample_count: 1,
            sample_quality: 0,
            usage: 0,
            bind_flags: 0,
            cpu_access_flags: 0,
            misc_flags: ResourceMiscFlags::NONE,
        }
    }

    /// Check whether a texture with this description can receive a copy of
    /// a texture described by `other`.
    pub fn is_compatible_with(&self, other: &TextureDesc) -> bool {
        self.format == other.format && self.width == other.width && self.height == other.height
    }

    /// Derive the description of a cross-device shareable copy target.
    ///
    /// All misc flags are replaced by [`ResourceMiscFlags::SHARED`], so flags
    /// such as mip generation on the source are not carried over.
    pub fn to_shareable(&self) -> TextureDesc {
        TextureDesc {
            misc_flags: ResourceMiscFlags::SHARED,
            ..*self
        }
    }
}

impl fmt::Display for TextureDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.format)
    }
}

/// Opaque handle that another device can open to reach a shared texture.
///
/// The value is the raw native handle. It stays valid only while the
/// texture it was taken from is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedHandle(pub usize);

impl SharedHandle {
    /// Check whether the handle is null.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}
