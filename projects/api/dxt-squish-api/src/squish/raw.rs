//! Unchecked raw-pointer calls into the codec.
//!
//! These forward straight to the codec table with no validation. They suit
//! callers that manage buffer lifetimes themselves; everyone else should use
//! the slice functions.

use crate::binding::Codec;
use core::ffi::c_int;

impl Codec {
    /// Storage size in bytes for a `width` x `height` image, as reported by the codec.
    ///
    /// # Safety
    ///
    /// The codec must honour its contract (always true for the linked codec).
    #[inline]
    pub unsafe fn storage_requirements_raw(&self, width: c_int, height: c_int, flags: c_int) -> c_int {
        unsafe { (self.table().storage_requirements)(width, height, flags) }
    }

    /// Compresses one 4x4 block.
    ///
    /// # Safety
    ///
    /// - `rgba` must be valid for reads of 64 bytes
    /// - `block` must be valid for writes of one compressed block (8 bytes for DXT1, 16 otherwise)
    /// - Neither buffer may move or be freed during the call
    #[inline]
    pub unsafe fn compress_raw(&self, rgba: *const u8, block: *mut u8, flags: c_int) {
        unsafe { (self.table().compress)(rgba.cast(), block.cast(), flags) }
    }

    /// Compresses one 4x4 block using only the pixels whose bit is set in `mask`.
    ///
    /// # Safety
    ///
    /// Same as [`Codec::compress_raw`].
    #[inline]
    pub unsafe fn compress_masked_raw(&self, rgba: *const u8, mask: c_int, block: *mut u8, flags: c_int) {
        unsafe { (self.table().compress_masked)(rgba.cast(), mask, block.cast(), flags) }
    }

    /// Decompresses one block into 64 bytes of RGBA.
    ///
    /// # Safety
    ///
    /// - `rgba` must be valid for writes of 64 bytes
    /// - `block` must be valid for reads of one compressed block
    #[inline]
    pub unsafe fn decompress_raw(&self, rgba: *mut u8, block: *const u8, flags: c_int) {
        unsafe { (self.table().decompress)(rgba.cast(), block.cast(), flags) }
    }

    /// Compresses a `width` x `height` RGBA image.
    ///
    /// # Safety
    ///
    /// - `rgba` must be valid for reads of `width * height * 4` bytes
    /// - `blocks` must be valid for writes of [`Codec::storage_requirements_raw`] bytes
    #[inline]
    pub unsafe fn compress_image_raw(
        &self,
        rgba: *const u8,
        width: c_int,
        height: c_int,
        blocks: *mut u8,
        flags: c_int,
    ) {
        unsafe { (self.table().compress_image)(rgba.cast(), width, height, blocks.cast(), flags) }
    }

    /// Decompresses blocks into a `width` x `height` RGBA image.
    ///
    /// # Safety
    ///
    /// - `rgba` must be valid for writes of `width * height * 4` bytes
    /// - `blocks` must be valid for reads of [`Codec::storage_requirements_raw`] bytes
    #[inline]
    pub unsafe fn decompress_image_raw(
        &self,
        rgba: *mut u8,
        width: c_int,
        height: c_int,
        blocks: *const u8,
        flags: c_int,
    ) {
        unsafe { (self.table().decompress_image)(rgba.cast(), width, height, blocks.cast(), flags) }
    }
}
