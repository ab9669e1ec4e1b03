//! Common test imports and utilities for API tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase, plus a recording codec that
//! logs every entry point call before forwarding it to the linked codec.

// External crates commonly used in tests
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::binding::{Codec, CodecSource, CodecTable};
pub use crate::error::{FlagsError, LoadError, SquishError};
pub use crate::flags::{CompressionOptions, Fit, Format, Metric, SquishFlags};
pub use crate::pin::active_pins;

use core::cell::RefCell;
use core::ffi::{c_int, c_void};
use dxt_squish_codec::c_api;

/// One entry point call seen by [`recording_codec`].
///
/// `pins` is the number of live pin guards on the calling thread while the
/// codec ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    StorageRequirements {
        width: c_int,
        height: c_int,
        flags: c_int,
    },
    Compress {
        flags: c_int,
        pins: usize,
    },
    CompressMasked {
        mask: c_int,
        flags: c_int,
        input: usize,
        pins: usize,
    },
    Decompress {
        flags: c_int,
        pins: usize,
    },
    CompressImage {
        width: c_int,
        height: c_int,
        flags: c_int,
        pins: usize,
    },
    DecompressImage {
        width: c_int,
        height: c_int,
        flags: c_int,
        pins: usize,
    },
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
}

fn record(call: Call) {
    CALLS.with(|calls| calls.borrow_mut().push(call));
}

/// Drains the calls recorded on this thread.
pub(crate) fn take_calls() -> Vec<Call> {
    CALLS.with(|calls| calls.take())
}

unsafe extern "C" fn recording_storage_requirements(width: c_int, height: c_int, flags: c_int) -> c_int {
    record(Call::StorageRequirements { width, height, flags });
    c_api::squish_storage_requirements(width, height, flags)
}

unsafe extern "C" fn recording_compress(rgba: *const c_void, block: *mut c_void, flags: c_int) {
    record(Call::Compress {
        flags,
        pins: active_pins(),
    });
    unsafe { c_api::squish_compress(rgba, block, flags) }
}

unsafe extern "C" fn recording_compress_masked(
    rgba: *const c_void,
    mask: c_int,
    block: *mut c_void,
    flags: c_int,
) {
    record(Call::CompressMasked {
        mask,
        flags,
        input: rgba as usize,
        pins: active_pins(),
    });
    unsafe { c_api::squish_compress_masked(rgba, mask, block, flags) }
}

unsafe extern "C" fn recording_decompress(rgba: *mut c_void, block: *const c_void, flags: c_int) {
    record(Call::Decompress {
        flags,
        pins: active_pins(),
    });
    unsafe { c_api::squish_decompress(rgba, block, flags) }
}

unsafe extern "C" fn recording_compress_image(
    rgba: *const c_void,
    width: c_int,
    height: c_int,
    blocks: *mut c_void,
    flags: c_int,
) {
    record(Call::CompressImage {
        width,
        height,
        flags,
        pins: active_pins(),
    });
    unsafe { c_api::squish_compress_image(rgba, width, height, blocks, flags) }
}

unsafe extern "C" fn recording_decompress_image(
    rgba: *mut c_void,
    width: c_int,
    height: c_int,
    blocks: *const c_void,
    flags: c_int,
) {
    record(Call::DecompressImage {
        width,
        height,
        flags,
        pins: active_pins(),
    });
    unsafe { c_api::squish_decompress_image(rgba, width, height, blocks, flags) }
}

/// A codec that records every call on this thread and forwards it to the linked codec.
///
/// Clears any calls previously recorded on this thread.
pub(crate) fn recording_codec() -> Codec {
    take_calls();
    let table = CodecTable {
        storage_requirements: recording_storage_requirements,
        compress: recording_compress,
        compress_masked: recording_compress_masked,
        decompress: recording_decompress,
        compress_image: recording_compress_image,
        decompress_image: recording_decompress_image,
    };

    // Safety: every entry forwards to the linked codec unchanged.
    unsafe { Codec::from_table(table) }
}

unsafe extern "C" fn negative_storage_requirements(_: c_int, _: c_int, _: c_int) -> c_int {
    -1
}

/// A codec whose storage query always reports `-1`.
pub(crate) fn negative_storage_codec() -> Codec {
    let table = CodecTable {
        storage_requirements: negative_storage_requirements,
        ..CodecTable::linked()
    };

    // Safety: the remaining entries are the linked codec's.
    unsafe { Codec::from_table(table) }
}

unsafe extern "C" fn doubled_storage_requirements(width: c_int, height: c_int, flags: c_int) -> c_int {
    2 * c_api::squish_storage_requirements(width, height, flags)
}

/// A codec whose storage query reports twice the linked codec's size.
pub(crate) fn doubled_storage_codec() -> Codec {
    let table = CodecTable {
        storage_requirements: doubled_storage_requirements,
        ..CodecTable::linked()
    };

    // Safety: buffers only grow, and the remaining entries are the linked codec's.
    unsafe { Codec::from_table(table) }
}

/// A 4x4 opaque block with a gradient on each colour channel.
pub(crate) fn gradient_rgba() -> Vec<u8> {
    (0..16)
        .flat_map(|i: u8| {
            let (x, y) = (i % 4, i / 4);
            [x * 80, y * 60 + 20, (x + y) * 30, 255]
        })
        .collect()
}
