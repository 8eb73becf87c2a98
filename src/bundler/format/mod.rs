//! Binary layout of the produced artifacts.
//!
//! The device maps both artifacts directly from flash, so every field here
//! is a bit-exact contract: fixed-width NUL-padded names, little-endian
//! integers, and offsets assigned in emission order.

pub mod assets;
pub mod checksum;
pub mod container;
pub mod names;

pub use assets::{AssetBundleBuilder, BundledAssets};
pub use container::{ModelContainerBuilder, MODEL_CONTAINER_FILE};

use crate::bundler::error::{Error, Result};

/// Converts a size/offset into a u32 header field, rejecting overflow.
pub(crate) fn u32_field(value: usize, field: &'static str) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::FieldOverflow {
        field,
        value: value as u64,
    })
}
