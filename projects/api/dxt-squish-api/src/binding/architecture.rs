//! Architecture-specific codec entry-point sets.

use derive_enum_all_values::AllValues;

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("dxt-squish-api supports only 32-bit and 64-bit targets.");

/// Process architecture; each one has its own codec library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum Architecture {
    /// 32-bit process, binds `squish_x86`.
    X86,
    /// 64-bit process, binds `squish_x64`.
    X64,
}

impl Architecture {
    /// The architecture of the running process, fixed at compile time.
    #[inline]
    pub const fn current() -> Self {
        if cfg!(target_pointer_width = "64") {
            Architecture::X64
        } else {
            Architecture::X86
        }
    }

    /// Name of the codec library for this architecture, without platform prefix or suffix.
    #[inline]
    pub const fn library_name(self) -> &'static str {
        match self {
            Architecture::X86 => "squish_x86",
            Architecture::X64 => "squish_x64",
        }
    }

    /// Platform file name of the codec library, e.g. `libsquish_x64.so` or `squish_x64.dll`.
    pub fn library_filename(self) -> String {
        use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
        format!("{DLL_PREFIX}{}{DLL_SUFFIX}", self.library_name())
    }
}

/// One of the six codec entry points, as exported by the codec library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum EntryPoint {
    /// `squish_storage_requirements(width, height, flags) -> int`
    StorageRequirements,
    /// `squish_compress(rgba, block, flags)`
    Compress,
    /// `squish_compress_masked(rgba, mask, block, flags)`
    CompressMasked,
    /// `squish_decompress(rgba, block, flags)`
    Decompress,
    /// `squish_compress_image(rgba, width, height, blocks, flags)`
    CompressImage,
    /// `squish_decompress_image(rgba, width, height, blocks, flags)`
    DecompressImage,
}

impl EntryPoint {
    /// The exported symbol name. Identical for both architectures.
    #[inline]
    pub const fn symbol(self) -> &'static str {
        match self {
            EntryPoint::StorageRequirements => "squish_storage_requirements",
            EntryPoint::Compress => "squish_compress",
            EntryPoint::CompressMasked => "squish_compress_masked",
            EntryPoint::Decompress => "squish_decompress",
            EntryPoint::CompressImage => "squish_compress_image",
            EntryPoint::DecompressImage => "squish_decompress_image",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn current_matches_pointer_width() {
        let expected = if size_of::<usize>() == 8 {
            Architecture::X64
        } else {
            Architecture::X86
        };
        assert_eq!(Architecture::current(), expected);
    }

    #[rstest]
    #[case(Architecture::X86, "squish_x86")]
    #[case(Architecture::X64, "squish_x64")]
    fn library_names(#[case] architecture: Architecture, #[case] name: &str) {
        assert_eq!(architecture.library_name(), name);
        assert!(architecture.library_filename().contains(name));
    }

    #[test]
    fn symbols_are_unique_and_prefixed() {
        let symbols: Vec<_> = EntryPoint::all_values().iter().map(|e| e.symbol()).collect();
        assert_eq!(symbols.len(), 6);
        for (i, symbol) in symbols.iter().enumerate() {
            assert!(symbol.starts_with("squish_"));
            assert!(!symbols[i + 1..].contains(symbol));
        }
    }
}
