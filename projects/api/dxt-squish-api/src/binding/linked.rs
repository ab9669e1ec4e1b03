//! Binds the entry points of the `dxt-squish-codec` crate linked into this binary.

use super::architecture::Architecture;
use super::table::{Codec, CodecSource, CodecTable};
use dxt_squish_codec::c_api;

impl CodecTable {
    /// The linked codec's entry points.
    pub fn linked() -> Self {
        Self {
            storage_requirements: c_api::squish_storage_requirements,
            compress: c_api::squish_compress,
            compress_masked: c_api::squish_compress_masked,
            decompress: c_api::squish_decompress,
            compress_image: c_api::squish_compress_image,
            decompress_image: c_api::squish_decompress_image,
        }
    }
}

impl Codec {
    /// The codec linked into this binary, bound for the current architecture.
    pub fn linked() -> Self {
        Self {
            table: CodecTable::linked(),
            architecture: Architecture::current(),
            source: CodecSource::Linked,
            #[cfg(feature = "dynamic-codec")]
            _library: None,
        }
    }
}
