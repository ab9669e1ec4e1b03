//! Codec Binding Selector.
//!
//! Picks the codec entry-point set once per process and hands out the same
//! table afterwards. The source is chosen in this order:
//!
//! 1. A codec supplied through [`install`] before first use
//! 2. The linked codec (`linked-codec` feature, default)
//! 3. The `squish_x86` / `squish_x64` shared library (`dynamic-codec` feature)
//!
//! If none is available, every facade call fails with
//! [`SquishError::CodecUnavailable`](crate::SquishError::CodecUnavailable).
//! There is no fallback to the other architecture.

pub mod architecture;
pub mod table;

#[cfg(feature = "dynamic-codec")]
mod dynamic;
mod linked;

pub use architecture::{Architecture, EntryPoint};
pub use table::{Codec, CodecSource, CodecTable};

use crate::error::LoadError;
use std::sync::OnceLock;
use tracing::{info, warn};

static CODEC: OnceLock<Result<Codec, LoadError>> = OnceLock::new();

/// The process-wide codec, selected on first use.
///
/// The outcome of the first selection is cached, including failure.
pub fn codec() -> Result<&'static Codec, LoadError> {
    CODEC.get_or_init(select).as_ref().map_err(Clone::clone)
}

/// Selects the process-wide codec now, so that a missing codec is reported at
/// start-up rather than on the first compression call.
///
/// Calling this more than once is harmless and returns the cached result.
pub fn init() -> Result<&'static Codec, LoadError> {
    codec()
}

/// Makes `codec` the process-wide codec.
///
/// # Errors
///
/// [`LoadError::AlreadyInitialized`] if a codec was already selected, either
/// by an earlier [`install`] or by any facade call.
pub fn install(codec: Codec) -> Result<&'static Codec, LoadError> {
    let architecture = codec.architecture();
    let source = codec.source().clone();
    CODEC
        .set(Ok(codec))
        .map_err(|_| LoadError::AlreadyInitialized)?;

    info!(?architecture, ?source, "installed codec");
    self::codec()
}

fn select() -> Result<Codec, LoadError> {
    let selected = select_source();
    match &selected {
        Ok(codec) => info!(
            architecture = ?codec.architecture(),
            source = ?codec.source(),
            "selected codec"
        ),
        Err(error) => warn!(%error, "no codec could be selected"),
    }
    selected
}

#[cfg(feature = "linked-codec")]
fn select_source() -> Result<Codec, LoadError> {
    Ok(Codec::linked())
}

#[cfg(all(not(feature = "linked-codec"), feature = "dynamic-codec"))]
fn select_source() -> Result<Codec, LoadError> {
    Codec::load_default()
}

#[cfg(not(any(feature = "linked-codec", feature = "dynamic-codec")))]
fn select_source() -> Result<Codec, LoadError> {
    Err(LoadError::NoCodecAvailable)
}
