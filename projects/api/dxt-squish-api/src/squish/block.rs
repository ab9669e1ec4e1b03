//! Single block operations on an explicit [`Codec`].

use super::{check_length, check_output, validate_flags, BLOCK_RGBA_LEN};
use crate::binding::Codec;
use crate::error::SquishError;
use crate::flags::SquishFlags;
use crate::pin::{PinnedBuffer, PinnedBufferMut};
use core::ffi::c_int;

impl Codec {
    /// Compresses one 4x4 block into `output`.
    ///
    /// # Parameters
    ///
    /// - `rgba`: exactly 64 bytes, 16 RGBA pixels row-major
    /// - `output`: at least one compressed block (8 bytes for DXT1, 16 otherwise)
    /// - `flags`: compression flags
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`SquishError::InvalidFlags`] if `flags` is not a valid combination
    /// - [`SquishError::InvalidLength`] if `rgba` is not 64 bytes
    /// - [`SquishError::OutputBufferTooSmall`] if `output` cannot hold one block
    pub fn compress_into(
        &self,
        rgba: &[u8],
        output: &mut [u8],
        flags: impl Into<SquishFlags>,
    ) -> Result<usize, SquishError> {
        let flags = flags.into();
        validate_flags(flags)?;
        check_length(BLOCK_RGBA_LEN, rgba.len())?;
        let needed = self.storage_requirements(4, 4, flags)?;
        check_output(needed, output.len())?;

        let input = PinnedBuffer::new(rgba);
        let mut output = PinnedBufferMut::new(&mut output[..needed]);
        // Safety: both lengths were checked against the codec's requirements above.
        unsafe { self.compress_raw(input.as_ptr(), output.as_mut_ptr(), flags.bits()) };
        Ok(needed)
    }

    /// Compresses one 4x4 block into a newly allocated buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::compress_into`], minus the output size check.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dxt_squish_api::{Codec, SquishFlags};
    ///
    /// let codec = Codec::linked();
    /// let rgba = [255u8, 0, 0, 255].repeat(16);
    /// let block = codec.compress(&rgba, SquishFlags::DXT1)?;
    /// assert_eq!(block.len(), 8);
    /// # Ok(())
    /// # }
    /// ```
    pub fn compress(&self, rgba: &[u8], flags: impl Into<SquishFlags>) -> Result<Vec<u8>, SquishError> {
        let flags = flags.into();
        let mut output = vec![0u8; self.storage_requirements(4, 4, flags)?];
        self.compress_into(rgba, &mut output, flags)?;
        Ok(output)
    }

    /// Compresses one 4x4 block into `output`, considering only the pixels whose bit is set in `mask`.
    ///
    /// Bit `i` of `mask` is pixel `i` in row-major order. `rgba` is handed to
    /// the codec as given, including the masked-out pixels.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::compress_into`].
    pub fn compress_masked_into(
        &self,
        rgba: &[u8],
        mask: u16,
        output: &mut [u8],
        flags: impl Into<SquishFlags>,
    ) -> Result<usize, SquishError> {
        let flags = flags.into();
        validate_flags(flags)?;
        check_length(BLOCK_RGBA_LEN, rgba.len())?;
        let needed = self.storage_requirements(4, 4, flags)?;
        check_output(needed, output.len())?;

        let input = PinnedBuffer::new(rgba);
        let mut output = PinnedBufferMut::new(&mut output[..needed]);
        // Safety: both lengths were checked against the codec's requirements above.
        unsafe {
            self.compress_masked_raw(
                input.as_ptr(),
                c_int::from(mask),
                output.as_mut_ptr(),
                flags.bits(),
            )
        };
        Ok(needed)
    }

    /// Compresses one masked 4x4 block into a newly allocated buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::compress_masked_into`], minus the output size check.
    pub fn compress_masked(
        &self,
        rgba: &[u8],
        mask: u16,
        flags: impl Into<SquishFlags>,
    ) -> Result<Vec<u8>, SquishError> {
        let flags = flags.into();
        let mut output = vec![0u8; self.storage_requirements(4, 4, flags)?];
        self.compress_masked_into(rgba, mask, &mut output, flags)?;
        Ok(output)
    }

    /// Decompresses one block into `output` (16 RGBA pixels).
    ///
    /// `block` must be exactly as long as the codec's storage requirement for
    /// a 4x4 image, the same size [`Codec::compress`] produces.
    ///
    /// # Returns
    ///
    /// The number of bytes written, always 64.
    ///
    /// # Errors
    ///
    /// - [`SquishError::InvalidFlags`] if `flags` is not a valid combination
    /// - [`SquishError::InvalidLength`] if `block` is not exactly one compressed block
    /// - [`SquishError::InvalidStorageSize`] if the codec reports a negative size
    /// - [`SquishError::OutputBufferTooSmall`] if `output` is shorter than 64 bytes
    pub fn decompress_into(
        &self,
        block: &[u8],
        output: &mut [u8],
        flags: impl Into<SquishFlags>,
    ) -> Result<usize, SquishError> {
        let flags = flags.into();
        validate_flags(flags)?;
        check_length(self.storage_requirements(4, 4, flags)?, block.len())?;
        check_output(BLOCK_RGBA_LEN, output.len())?;

        let input = PinnedBuffer::new(block);
        let mut output = PinnedBufferMut::new(&mut output[..BLOCK_RGBA_LEN]);
        // Safety: both lengths were checked against the codec's requirements above.
        unsafe { self.decompress_raw(output.as_mut_ptr(), input.as_ptr(), flags.bits()) };
        Ok(BLOCK_RGBA_LEN)
    }

    /// Decompresses one block into a newly allocated 64 byte buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::decompress_into`], minus the output size check.
    pub fn decompress(&self, block: &[u8], flags: impl Into<SquishFlags>) -> Result<Vec<u8>, SquishError> {
        let mut output = vec![0u8; BLOCK_RGBA_LEN];
        self.decompress_into(block, &mut output, flags)?;
        Ok(output)
    }
}
