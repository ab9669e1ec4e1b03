//! Whole-image operations on an explicit [`Codec`].

use super::{check_length, check_output, image_len, validate_dimensions, validate_flags};
use crate::binding::Codec;
use crate::error::SquishError;
use crate::flags::SquishFlags;
use crate::pin::{PinnedBuffer, PinnedBufferMut};

impl Codec {
    /// Number of bytes needed to compress a `width` x `height` image.
    ///
    /// This is `ceil(width / 4) * ceil(height / 4) * bytes_per_block`, as
    /// reported by the codec.
    ///
    /// # Errors
    ///
    /// - [`SquishError::InvalidFlags`] if `flags` is not a valid combination
    /// - [`SquishError::InvalidDimensions`] if either dimension is zero or too large
    /// - [`SquishError::InvalidStorageSize`] if the codec reports a negative size
    pub fn storage_requirements(
        &self,
        width: usize,
        height: usize,
        flags: impl Into<SquishFlags>,
    ) -> Result<usize, SquishError> {
        let flags = flags.into();
        validate_flags(flags)?;
        let (c_width, c_height) = validate_dimensions(width, height)?;

        // Safety: the storage query reads no buffers.
        let size = unsafe { self.storage_requirements_raw(c_width, c_height, flags.bits()) };
        usize::try_from(size).map_err(|_| SquishError::InvalidStorageSize(size))
    }

    /// Compresses a `width` x `height` RGBA image into `output`.
    ///
    /// Dimensions need not be multiples of 4; the codec masks out the pixels
    /// of edge blocks that fall outside the image.
    ///
    /// # Returns
    ///
    /// The number of bytes written, equal to [`Codec::storage_requirements`].
    ///
    /// # Errors
    ///
    /// - [`SquishError::InvalidFlags`] if `flags` is not a valid combination
    /// - [`SquishError::InvalidDimensions`] if either dimension is zero or too large
    /// - [`SquishError::InvalidLength`] if `rgba` is not `width * height * 4` bytes
    /// - [`SquishError::OutputBufferTooSmall`] if `output` is smaller than the storage requirement
    pub fn compress_image_into(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
        output: &mut [u8],
        flags: impl Into<SquishFlags>,
    ) -> Result<usize, SquishError> {
        let flags = flags.into();
        validate_flags(flags)?;
        let (c_width, c_height) = validate_dimensions(width, height)?;
        check_length(image_len(width, height)?, rgba.len())?;
        let needed = self.storage_requirements(width, height, flags)?;
        check_output(needed, output.len())?;

        let input = PinnedBuffer::new(rgba);
        let mut output = PinnedBufferMut::new(&mut output[..needed]);
        // Safety: both lengths were checked against the codec's requirements above.
        unsafe {
            self.compress_image_raw(
                input.as_ptr(),
                c_width,
                c_height,
                output.as_mut_ptr(),
                flags.bits(),
            )
        };
        Ok(needed)
    }

    /// Compresses a `width` x `height` RGBA image into a newly allocated buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::compress_image_into`], minus the output size check.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dxt_squish_api::{Codec, SquishFlags};
    ///
    /// let codec = Codec::linked();
    /// let rgba = vec![128u8; 5 * 3 * 4];
    /// let blocks = codec.compress_image(&rgba, 5, 3, SquishFlags::DXT1)?;
    /// assert_eq!(blocks.len(), 2 * 8);
    /// # Ok(())
    /// # }
    /// ```
    pub fn compress_image(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
        flags: impl Into<SquishFlags>,
    ) -> Result<Vec<u8>, SquishError> {
        let flags = flags.into();
        let mut output = vec![0u8; self.storage_requirements(width, height, flags)?];
        self.compress_image_into(rgba, width, height, &mut output, flags)?;
        Ok(output)
    }

    /// Decompresses blocks into a `width` x `height` RGBA image in `output`.
    ///
    /// # Returns
    ///
    /// The number of bytes written, `width * height * 4`.
    ///
    /// # Errors
    ///
    /// - [`SquishError::InvalidFlags`] if `flags` is not a valid combination
    /// - [`SquishError::InvalidDimensions`] if either dimension is zero or too large
    /// - [`SquishError::InvalidLength`] if `blocks` is not exactly the storage requirement
    /// - [`SquishError::OutputBufferTooSmall`] if `output` is shorter than `width * height * 4`
    pub fn decompress_image_into(
        &self,
        blocks: &[u8],
        width: usize,
        height: usize,
        output: &mut [u8],
        flags: impl Into<SquishFlags>,
    ) -> Result<usize, SquishError> {
        let flags = flags.into();
        validate_flags(flags)?;
        let (c_width, c_height) = validate_dimensions(width, height)?;
        check_length(self.storage_requirements(width, height, flags)?, blocks.len())?;
        let needed = image_len(width, height)?;
        check_output(needed, output.len())?;

        let input = PinnedBuffer::new(blocks);
        let mut output = PinnedBufferMut::new(&mut output[..needed]);
        // Safety: both lengths were checked against the codec's requirements above.
        unsafe {
            self.decompress_image_raw(
                output.as_mut_ptr(),
                c_width,
                c_height,
                input.as_ptr(),
                flags.bits(),
            )
        };
        Ok(needed)
    }

    /// Decompresses blocks into a newly allocated `width` x `height` RGBA image.
    ///
    /// # Errors
    ///
    /// Same as [`Codec::decompress_image_into`], minus the output size check.
    pub fn decompress_image(
        &self,
        blocks: &[u8],
        width: usize,
        height: usize,
        flags: impl Into<SquishFlags>,
    ) -> Result<Vec<u8>, SquishError> {
        let flags = flags.into();
        validate_flags(flags)?;
        let mut output = vec![0u8; image_len(width, height)?];
        self.decompress_image_into(blocks, width, height, &mut output, flags)?;
        Ok(output)
    }
}
