//! Direct3D 11 backend.

mod device;
mod texture;

pub use device::{D3D11Backend, D3D11Device};

use crate::IsolatedDevice;

/// Isolated device backed by Direct3D 11.
pub type IsolatedD3D11Device = IsolatedDevice<D3D11Backend>;
