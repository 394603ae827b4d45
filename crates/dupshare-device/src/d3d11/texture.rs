//! Conversions between native Direct3D 11 texture types and [`TextureDesc`].

use windows::core::Interface;
use windows::Win32::Graphics::Direct3D::{
    D3D_FEATURE_LEVEL, D3D_FEATURE_LEVEL_10_0, D3D_FEATURE_LEVEL_10_1, D3D_FEATURE_LEVEL_11_0,
    D3D_FEATURE_LEVEL_9_1, D3D_FEATURE_LEVEL_9_2, D3D_FEATURE_LEVEL_9_3,
};
use windows::Win32::Graphics::Direct3D11::{ID3D11Texture2D, D3D11_TEXTURE2D_DESC, D3D11_USAGE};
use windows::Win32::Graphics::Dxgi::Common::{DXGI_FORMAT, DXGI_SAMPLE_DESC};
use windows::Win32::Graphics::Dxgi::IDXGIResource;

use crate::error::DeviceError;
use crate::{
    DeviceResult, FeatureLevel, GpuTexture, PixelFormat, ResourceMiscFlags, SharedHandle,
    TextureDesc,
};

impl GpuTexture for ID3D11Texture2D {
    fn desc(&self) -> TextureDesc {
        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { self.GetDesc(&mut desc) };
        from_native_desc(&desc)
    }

    fn shared_handle(&self) -> DeviceResult<SharedHandle> {
        let resource: IDXGIResource = self.cast()?;
        let handle = unsafe { resource.GetSharedHandle()? };
        if handle.is_invalid() {
            return Err(DeviceError::SharedHandle {
                message: "texture was not created with a shared flag".to_string(),
            });
        }
        Ok(SharedHandle(handle.0 as usize))
    }

    fn same_resource(&self, other: &Self) -> bool {
        self.as_raw() == other.as_raw()
    }
}

pub(super) fn to_native_desc(desc: &TextureDesc) -> D3D11_TEXTURE2D_DESC {
    D3D11_TEXTURE2D_DESC {
        Width: desc.width,
        Height: desc.height,
        MipLevels: desc.mip_levels,
        ArraySize: desc.array_size,
        Format: DXGI_FORMAT(desc.format.0 as _),
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: desc.sample_count,
            Quality: desc.sample_quality,
        },
        Usage: D3D11_USAGE(desc.usage as _),
        BindFlags: desc.bind_flags as _,
        CPUAccessFlags: desc.cpu_access_flags as _,
        MiscFlags: desc.misc_flags.0 as _,
    }
}

pub(super) fn from_native_desc(desc: &D3D11_TEXTURE2D_DESC) -> TextureDesc {
    TextureDesc {
        width: desc.Width,
        height: desc.Height,
        mip_levels: desc.MipLevels,
        array_size: desc.ArraySize,
        format: PixelFormat(desc.Format.0 as u32),
        sample_count: desc.SampleDesc.Count,
        sample_quality: desc.SampleDesc.Quality,
        usage: desc.Usage.0 as u32,
        bind_flags: desc.BindFlags as u32,
        cpu_access_flags: desc.CPUAccessFlags as u32,
        misc_flags: ResourceMiscFlags(desc.MiscFlags as u32),
    }
}

pub(super) fn feature_level_to_native(level: FeatureLevel) -> D3D_FEATURE_LEVEL {
    match level {
        FeatureLevel::Level11_0 => D3D_FEATURE_LEVEL_11_0,
        FeatureLevel::Level10_1 => D3D_FEATURE_LEVEL_10_1,
        FeatureLevel::Level10_0 => D3D_FEATURE_LEVEL_10_0,
        FeatureLevel::Level9_3 => D3D_FEATURE_LEVEL_9_3,
        FeatureLevel::Level9_2 => D3D_FEATURE_LEVEL_9_2,
        FeatureLevel::Level9_1 => D3D_FEATURE_LEVEL_9_1,
    }
}

pub(super) fn feature_level_from_native(level: D3D_FEATURE_LEVEL) -> Option<FeatureLevel> {
    match level {
        D3D_FEATURE_LEVEL_11_0 => Some(FeatureLevel::Level11_0),
        D3D_FEATURE_LEVEL_10_1 => Some(FeatureLevel::Level10_1),
        D3D_FEATURE_LEVEL_10_0 => Some(FeatureLevel::Level10_0),
        D3D_FEATURE_LEVEL_9_3 => Some(FeatureLevel::Level9_3),
        D3D_FEATURE_LEVEL_9_2 => Some(FeatureLevel::Level9_2),
        D3D_FEATURE_LEVEL_9_1 => Some(FeatureLevel::Level9_1),
        _ => None,
    }
}
