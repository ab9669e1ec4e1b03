//! The architecture-independent codec function table.

use super::architecture::Architecture;
use core::ffi::{c_int, c_void};
use std::path::PathBuf;

/// `storage_requirements(width, height, flags) -> size`
pub type StorageRequirementsFn = unsafe extern "C" fn(c_int, c_int, c_int) -> c_int;
/// `compress(rgba, block, flags)`
pub type CompressFn = unsafe extern "C" fn(*const c_void, *mut c_void, c_int);
/// `compress_masked(rgba, mask, block, flags)`
pub type CompressMaskedFn = unsafe extern "C" fn(*const c_void, c_int, *mut c_void, c_int);
/// `decompress(rgba, block, flags)`
pub type DecompressFn = unsafe extern "C" fn(*mut c_void, *const c_void, c_int);
/// `compress_image(rgba, width, height, blocks, flags)`
pub type CompressImageFn = unsafe extern "C" fn(*const c_void, c_int, c_int, *mut c_void, c_int);
/// `decompress_image(rgba, width, height, blocks, flags)`
pub type DecompressImageFn =
    unsafe extern "C" fn(*mut c_void, c_int, c_int, *const c_void, c_int);

/// The six codec entry points.
///
/// Every function must honour the codec contract: it reads and writes only
/// within the buffer sizes implied by its dimensions and flags, and never
/// retains a pointer past the call.
#[derive(Debug, Clone, Copy)]
pub struct CodecTable {
    /// See [`StorageRequirementsFn`].
    pub storage_requirements: StorageRequirementsFn,
    /// See [`CompressFn`].
    pub compress: CompressFn,
    /// See [`CompressMaskedFn`].
    pub compress_masked: CompressMaskedFn,
    /// See [`DecompressFn`].
    pub decompress: DecompressFn,
    /// See [`CompressImageFn`].
    pub compress_image: CompressImageFn,
    /// See [`DecompressImageFn`].
    pub decompress_image: DecompressImageFn,
}

/// Where a [`Codec`]'s entry points came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecSource {
    /// The `dxt-squish-codec` crate, linked into this binary.
    Linked,
    /// A shared library loaded at runtime.
    Dynamic(PathBuf),
    /// A caller-supplied table.
    Custom,
}

/// A resolved codec: its function table, the architecture it was bound for and its source.
#[derive(Debug)]
pub struct Codec {
    pub(super) table: CodecTable,
    pub(super) architecture: Architecture,
    pub(super) source: CodecSource,
    // Keeps a dynamically loaded library mapped for as long as the table is reachable.
    #[cfg(feature = "dynamic-codec")]
    pub(super) _library: Option<libloading::Library>,
}

impl Codec {
    /// Wraps a caller-supplied table for the current architecture.
    ///
    /// # Safety
    ///
    /// Every function in `table` must honour the codec contract described on
    /// [`CodecTable`]. The safe facade relies on it for memory safety.
    pub unsafe fn from_table(table: CodecTable) -> Self {
        Self {
            table,
            architecture: Architecture::current(),
            source: CodecSource::Custom,
            #[cfg(feature = "dynamic-codec")]
            _library: None,
        }
    }

    /// The resolved function table.
    #[inline]
    pub fn table(&self) -> &CodecTable {
        &self.table
    }

    /// The architecture this codec was bound for.
    #[inline]
    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Where the entry points came from.
    #[inline]
    pub fn source(&self) -> &CodecSource {
        &self.source
    }
}
