//! With only the dynamic loader enabled and no codec library on the search
//! path, selection fails once and every facade call reports that failure.
//!
//! Run with `cargo test -p dxt-squish-api --no-default-features --features dynamic-codec`.

#![cfg(all(feature = "dynamic-codec", not(feature = "linked-codec")))]

use dxt_squish_api::*;

#[test]
fn failed_selection_is_reported_and_cached() {
    let error = match binding::init() {
        Ok(codec) => panic!("unexpected codec {:?} on the search path", codec.source()),
        Err(error) => error,
    };
    assert!(
        matches!(
            &error,
            LoadError::LibraryNotFound { library, .. }
                if *library == Architecture::current().library_filename()
        ),
        "{error:?}"
    );

    assert_eq!(binding::codec().unwrap_err(), error);
    assert_eq!(
        storage_requirements(4, 4, SquishFlags::DXT1),
        Err(SquishError::CodecUnavailable(error.clone()))
    );
    assert_eq!(
        compress(&[0u8; 64], SquishFlags::DXT1),
        Err(SquishError::CodecUnavailable(error.clone()))
    );
    assert_eq!(
        decompress(&[0u8; 8], SquishFlags::DXT1),
        Err(SquishError::CodecUnavailable(error))
    );
    assert_eq!(active_pins(), 0);

    // The failure is final for this process.
    assert_eq!(
        binding::install(Codec::linked()).unwrap_err(),
        LoadError::AlreadyInitialized
    );
}
