//! C API error handling for squish operations.

use crate::error::SquishError;
use core::ffi::c_char;

/// C-compatible error codes for squish operations.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DltSquishErrorCode {
    /// Operation succeeded
    Success = 0,
    /// No codec could be selected for this process
    CodecUnavailable = 1,
    /// The flags are not a valid combination
    InvalidFlags = 2,
    /// Width or height is zero or too large
    InvalidDimensions = 3,
    /// Input buffer length does not match what the operation requires
    InvalidLength = 4,
    /// Output buffer too small for the operation
    OutputBufferTooSmall = 5,
    /// The codec reported a negative storage size
    InvalidStorageSize = 6,
    /// Null pointer provided for input parameter
    NullInputPointer = 7,
    /// Null pointer provided for output buffer parameter
    NullOutputBufferPointer = 8,
}

/// C-compatible Result type for squish operations.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DltSquishResult {
    /// Error code (0 = success, non-zero = error)
    pub error_code: DltSquishErrorCode,
}

impl DltSquishResult {
    /// Create a success result
    pub const fn success() -> Self {
        Self {
            error_code: DltSquishErrorCode::Success,
        }
    }

    /// Create an error result from an error code
    pub const fn from_error_code(error_code: DltSquishErrorCode) -> Self {
        Self { error_code }
    }

    /// Check if the result is successful
    pub fn is_success(&self) -> bool {
        matches!(self.error_code, DltSquishErrorCode::Success)
    }
}

impl From<SquishError> for DltSquishResult {
    fn from(error: SquishError) -> Self {
        let error_code = match error {
            SquishError::CodecUnavailable(_) => DltSquishErrorCode::CodecUnavailable,
            SquishError::InvalidFlags(_) => DltSquishErrorCode::InvalidFlags,
            SquishError::InvalidDimensions { .. } => DltSquishErrorCode::InvalidDimensions,
            SquishError::InvalidLength { .. } => DltSquishErrorCode::InvalidLength,
            SquishError::OutputBufferTooSmall { .. } => DltSquishErrorCode::OutputBufferTooSmall,
            SquishError::InvalidStorageSize(_) => DltSquishErrorCode::InvalidStorageSize,
        };
        Self::from_error_code(error_code)
    }
}

impl<T> From<Result<T, SquishError>> for DltSquishResult {
    fn from(result: Result<T, SquishError>) -> Self {
        match result {
            Ok(_) => Self::success(),
            Err(e) => e.into(),
        }
    }
}

/// Get a null-terminated string description of the error code.
///
/// The returned string is a static string literal that does not need to be freed.
#[unsafe(no_mangle)]
pub extern "C" fn dltsquish_error_message(error_code: DltSquishErrorCode) -> *const c_char {
    let message = match error_code {
        DltSquishErrorCode::Success => c"Success",
        DltSquishErrorCode::CodecUnavailable => c"No codec could be selected for this process",
        DltSquishErrorCode::InvalidFlags => c"Invalid flags: exactly one block format and at most one fit and metric",
        DltSquishErrorCode::InvalidDimensions => c"Invalid image dimensions",
        DltSquishErrorCode::InvalidLength => c"Input length does not match the operation",
        DltSquishErrorCode::OutputBufferTooSmall => c"Output buffer too small for the operation",
        DltSquishErrorCode::InvalidStorageSize => c"Codec reported an invalid storage size",
        DltSquishErrorCode::NullInputPointer => c"Null pointer provided for input parameter",
        DltSquishErrorCode::NullOutputBufferPointer => c"Null pointer provided for output parameter",
    };
    message.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use core::ffi::CStr;

    fn message(code: DltSquishErrorCode) -> &'static str {
        let ptr = dltsquish_error_message(code);
        assert!(!ptr.is_null());
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    #[rstest]
    #[case(DltSquishErrorCode::Success, "Success")]
    #[case(DltSquishErrorCode::OutputBufferTooSmall, "Output buffer too small for the operation")]
    #[case(DltSquishErrorCode::NullInputPointer, "Null pointer provided for input parameter")]
    fn error_message_is_static_c_string(#[case] code: DltSquishErrorCode, #[case] expected: &str) {
        assert_eq!(message(code), expected);
    }

    #[test]
    fn every_code_has_a_message() {
        for code in [
            DltSquishErrorCode::CodecUnavailable,
            DltSquishErrorCode::InvalidFlags,
            DltSquishErrorCode::InvalidDimensions,
            DltSquishErrorCode::InvalidLength,
            DltSquishErrorCode::InvalidStorageSize,
            DltSquishErrorCode::NullOutputBufferPointer,
        ] {
            assert!(!message(code).is_empty());
        }
    }

    #[rstest]
    #[case(SquishError::InvalidFlags(FlagsError::MissingFormat), DltSquishErrorCode::InvalidFlags)]
    #[case(SquishError::InvalidLength { expected: 64, actual: 3 }, DltSquishErrorCode::InvalidLength)]
    #[case(SquishError::InvalidStorageSize(-1), DltSquishErrorCode::InvalidStorageSize)]
    #[case(SquishError::CodecUnavailable(LoadError::NoCodecAvailable), DltSquishErrorCode::CodecUnavailable)]
    fn squish_errors_map_to_codes(#[case] error: SquishError, #[case] expected: DltSquishErrorCode) {
        assert_eq!(DltSquishResult::from(error).error_code, expected);
    }

    #[test]
    fn ok_result_is_success() {
        let result: DltSquishResult = Ok::<usize, SquishError>(8).into();
        assert!(result.is_success());
    }
}
