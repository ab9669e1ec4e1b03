//! Error types for codec selection, flag validation and buffer marshaling.

use thiserror::Error;

/// Errors that can occur while selecting or loading the codec.
///
/// Cached by the process-wide selector, so it is [`Clone`] and carries
/// loader messages as strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No codec source is enabled for this build.
    #[error("No codec available: enable the `linked-codec` or `dynamic-codec` feature, or install one.")]
    NoCodecAvailable,

    /// The shared library for the current architecture could not be opened.
    #[error("Failed to load codec library '{library}': {reason}")]
    LibraryNotFound {
        /// The library name or path that was tried
        library: String,
        /// The loader's message
        reason: String,
    },

    /// The library was opened but lacks one of the codec entry points.
    #[error("Codec library is missing symbol '{symbol}': {reason}")]
    MissingSymbol {
        /// The entry point that could not be resolved
        symbol: &'static str,
        /// The loader's message
        reason: String,
    },

    /// A codec was already selected for this process.
    #[error("A codec has already been selected for this process.")]
    AlreadyInitialized,
}

/// Errors in a set of compression flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlagsError {
    /// Bits outside of every known flag group are set.
    #[error("Unknown flag bits: {0:#x}")]
    UnknownBits(i32),

    /// None of DXT1, DXT3 or DXT5 is set.
    #[error("No block format selected: exactly one of DXT1, DXT3 or DXT5 must be set.")]
    MissingFormat,

    /// More than one block format is set.
    #[error("Conflicting block formats: {0:#x}")]
    ConflictingFormats(i32),

    /// More than one colour fit is set.
    #[error("Conflicting colour fits: {0:#x}")]
    ConflictingFits(i32),

    /// More than one colour metric is set.
    #[error("Conflicting colour metrics: {0:#x}")]
    ConflictingMetrics(i32),
}

/// Errors that can occur during compression and decompression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquishError {
    /// The process-wide codec could not be selected.
    #[error("Codec unavailable: {0}")]
    CodecUnavailable(#[from] LoadError),

    /// The flags are not a valid combination.
    #[error("Invalid flags: {0}")]
    InvalidFlags(#[from] FlagsError),

    /// Width or height is zero or does not fit the codec's integer type.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// The width in pixels
        width: usize,
        /// The height in pixels
        height: usize,
    },

    /// An input buffer does not have the exact length the operation requires.
    #[error("Invalid input length: expected {expected} bytes, got {actual} bytes.")]
    InvalidLength {
        /// The required length in bytes
        expected: usize,
        /// The actual length in bytes
        actual: usize,
    },

    /// The output buffer is too small for the operation.
    #[error("Output buffer too small: need {needed} bytes, but only {actual} bytes available.")]
    OutputBufferTooSmall {
        /// The required size in bytes
        needed: usize,
        /// The actual size in bytes
        actual: usize,
    },

    /// The codec reported a negative storage size.
    #[error("Codec reported an invalid storage size: {0}")]
    InvalidStorageSize(i32),
}
