//! Loads the codec from the `squish_x86` / `squish_x64` shared library at runtime.

use super::architecture::{Architecture, EntryPoint};
use super::table::{Codec, CodecSource, CodecTable};
use crate::error::LoadError;
use libloading::Library;
use std::path::Path;
use tracing::debug;

/// Resolves one entry point from `library` as a function pointer of type `T`.
///
/// # Safety
///
/// `T` must be the function pointer type matching the symbol's real signature.
unsafe fn resolve<T: Copy>(library: &Library, entry: EntryPoint) -> Result<T, LoadError> {
    let symbol = unsafe { library.get::<T>(entry.symbol().as_bytes()) }.map_err(|e| {
        LoadError::MissingSymbol {
            symbol: entry.symbol(),
            reason: e.to_string(),
        }
    })?;

    debug!(symbol = entry.symbol(), "resolved codec entry point");
    Ok(*symbol)
}

impl Codec {
    /// Loads a codec from the shared library at `path` (or a bare library name
    /// searched by the platform loader).
    ///
    /// # Errors
    ///
    /// - [`LoadError::LibraryNotFound`] if the library cannot be opened
    /// - [`LoadError::MissingSymbol`] if any of the six entry points is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        // Safety: loading runs the library's initialisers; a codec library is
        // expected to have none with observable side effects.
        let library = unsafe { Library::new(path) }.map_err(|e| LoadError::LibraryNotFound {
            library: path.display().to_string(),
            reason: e.to_string(),
        })?;

        // Safety: the types below are the documented signatures of each entry point.
        let table = unsafe {
            CodecTable {
                storage_requirements: resolve(&library, EntryPoint::StorageRequirements)?,
                compress: resolve(&library, EntryPoint::Compress)?,
                compress_masked: resolve(&library, EntryPoint::CompressMasked)?,
                decompress: resolve(&library, EntryPoint::Decompress)?,
                compress_image: resolve(&library, EntryPoint::CompressImage)?,
                decompress_image: resolve(&library, EntryPoint::DecompressImage)?,
            }
        };

        debug!(library = %path.display(), "loaded codec library");
        Ok(Self {
            table,
            architecture: Architecture::current(),
            source: CodecSource::Dynamic(path.to_path_buf()),
            _library: Some(library),
        })
    }

    /// Loads the platform library for the current architecture, e.g.
    /// `libsquish_x64.so` in a 64-bit Linux process.
    pub fn load_default() -> Result<Self, LoadError> {
        Self::load(Architecture::current().library_filename())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_reported() {
        let result = Codec::load("definitely_not_a_squish_codec_library");
        assert!(matches!(
            result,
            Err(LoadError::LibraryNotFound { ref library, .. }) if library == "definitely_not_a_squish_codec_library"
        ));
    }
}
