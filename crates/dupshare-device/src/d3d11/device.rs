//! Direct3D 11 device management for the isolated device.

use tracing::{debug, instrument};
use windows::Win32::Foundation::HMODULE;
use windows::Win32::Graphics::Direct3D::{
    D3D_DRIVER_TYPE, D3D_DRIVER_TYPE_HARDWARE, D3D_DRIVER_TYPE_UNKNOWN, D3D_FEATURE_LEVEL,
};
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDevice, ID3D11Device, ID3D11DeviceContext, ID3D11Texture2D,
    D3D11_CREATE_DEVICE_BGRA_SUPPORT, D3D11_CREATE_DEVICE_DEBUG, D3D11_CREATE_DEVICE_FLAG,
    D3D11_CREATE_DEVICE_VIDEO_SUPPORT, D3D11_SDK_VERSION,
};
use windows::Win32::Graphics::Dxgi::IDXGIAdapter;

use super::texture::{feature_level_from_native, feature_level_to_native, to_native_desc};
use crate::error::DeviceError;
use crate::{
    DeviceRequest, DeviceResult, DriverKind, FeatureLevel, GraphicsBackend, GraphicsDevice,
    TextureDesc,
};

/// Creates Direct3D 11 devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct D3D11Backend;

impl GraphicsBackend for D3D11Backend {
    type Adapter = IDXGIAdapter;
    type Device = D3D11Device;

    #[instrument(name = "d3d11_create_device", skip(self, adapter))]
    fn create_device(
        &self,
        adapter: Option<&IDXGIAdapter>,
        request: &DeviceRequest,
    ) -> DeviceResult<D3D11Device> {
        let driver_type: D3D_DRIVER_TYPE = match DeviceRequest::driver_kind(adapter.is_some()) {
            DriverKind::Adapter => D3D_DRIVER_TYPE_UNKNOWN,
            DriverKind::Hardware => D3D_DRIVER_TYPE_HARDWARE,
        };

        let mut flags = D3D11_CREATE_DEVICE_FLAG::default();
        if request.bgra_support {
            flags |= D3D11_CREATE_DEVICE_BGRA_SUPPORT;
        }
        if request.video_support {
            flags |= D3D11_CREATE_DEVICE_VIDEO_SUPPORT;
        }
        if request.debug_layer {
            flags |= D3D11_CREATE_DEVICE_DEBUG;
        }

        let levels: Vec<D3D_FEATURE_LEVEL> = request
            .feature_levels
            .iter()
            .copied()
            .map(feature_level_to_native)
            .collect();

        let mut device = None;
        let mut context = None;
        let mut supported = D3D_FEATURE_LEVEL::default();

        unsafe {
            D3D11CreateDevice(
                adapter,
                driver_type,
                HMODULE::default(),
                flags,
                Some(&levels),
                D3D11_SDK_VERSION,
                Some(&mut device),
                Some(&mut supported),
                Some(&mut context),
            )
        }
        .map_err(|err| DeviceError::CreationFailed {
            code: err.code().0,
            message: err.message().to_string(),
        })?;

        let device = device.ok_or_else(|| DeviceError::WindowsApi {
            message: "Failed to create D3D11 device".to_string(),
            source: None,
        })?;

        let context = context.ok_or_else(|| DeviceError::WindowsApi {
            message: "Failed to get D3D11 device context".to_string(),
            source: None,
        })?;

        let Some(feature_level) = feature_level_from_native(supported) else {
            return Err(DeviceError::WindowsApi {
                message: format!("Unexpected feature level {:#x}", supported.0),
                source: None,
            });
        };

        debug!(%feature_level, "Created D3D11 device");
        Ok(D3D11Device {
            device,
            context,
            feature_level,
        })
    }
}

/// Direct3D 11 device owned by an isolated device.
pub struct D3D11Device {
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    feature_level: FeatureLevel,
}

impl D3D11Device {
    /// Get the D3D11 device.
    pub fn device(&self) -> &ID3D11Device {
        &self.device
    }

    /// Get the immediate context, used to copy captured frames into slots.
    pub fn context(&self) -> &ID3D11DeviceContext {
        &self.context
    }
}

impl GraphicsDevice for D3D11Device {
    type Texture = ID3D11Texture2D;

    fn create_texture(&self, desc: &TextureDesc) -> DeviceResult<ID3D11Texture2D> {
        let native = to_native_desc(desc);
        let mut texture = None;

        let result = unsafe {
            self.device
                .CreateTexture2D(&native, None, Some(&mut texture))
        };
        result.map_err(|err| DeviceError::TextureCreation {
            code: Some(err.code().0),
            message: err.message().to_string(),
        })?;

        texture.ok_or_else(|| DeviceError::TextureCreation {
            code: None,
            message: "CreateTexture2D returned no texture".to_string(),
        })
    }

    fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }
}
