//! Error types for the isolated device.

use thiserror::Error;

/// Errors that can occur while creating the isolated device or serving
/// shared textures from it.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Native device creation failed for every requested feature level.
    #[error("Device creation failed ({code:#010x}): {message}")]
    CreationFailed { code: i32, message: String },

    /// The native device was already realized.
    #[error("Isolated device already created")]
    AlreadyCreated,

    /// A texture was requested before the native device was realized.
    #[error("Isolated device not created")]
    NotCreated,

    /// Slot index outside the cached texture range.
    #[error("Slot index {index} is out of range (cached texture count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Creating a shared texture failed.
    #[error("Creating shared texture failed: {message}")]
    TextureCreation { code: Option<i32>, message: String },

    /// The texture has no cross-device handle.
    #[error("Shared handle unavailable: {message}")]
    SharedHandle { message: String },

    /// Windows API error.
    #[error("Windows API error: {message}")]
    WindowsApi {
        message: String,
        #[cfg(windows)]
        #[source]
        source: Option<windows::core::Error>,
    },
}

impl DeviceError {
    /// Native status code carried by the error, if any.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::CreationFailed { code, .. } => Some(*code),
            Self::TextureCreation { code, .. } => *code,
            #[cfg(windows)]
            Self::WindowsApi {
                source: Some(source),
                ..
            } => Some(source.code().0),
            _ => None,
        }
    }

    /// Whether the next frame can retry safely with the same device.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::TextureCreation { .. } | Self::SharedHandle { .. }
        )
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for DeviceError {
    fn from(err: windows::core::Error) -> Self {
        Self::WindowsApi {
            message: err.message().to_string(),
            source: Some(err),
        }
    }
}
