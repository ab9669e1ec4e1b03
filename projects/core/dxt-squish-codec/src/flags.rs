//! Raw flag bits understood by the codec.
//!
//! The bit values match libsquish so that callers can forward their flags
//! unchanged. Higher level crates wrap these in a validated type; the codec
//! itself is lenient and normalises whatever it is given (see [`CodecFlags`]).

use derive_enum_all_values::AllValues;

/// Use DXT1 compression.
pub const DXT1: i32 = 1 << 0;
/// Use DXT3 compression.
pub const DXT3: i32 = 1 << 1;
/// Use DXT5 compression.
pub const DXT5: i32 = 1 << 2;
/// Use a slow but high quality colour compressor.
pub const COLOUR_CLUSTER_FIT: i32 = 1 << 3;
/// Use a fast but low quality colour compressor.
pub const COLOUR_RANGE_FIT: i32 = 1 << 4;
/// Use a perceptual metric for colour error.
pub const COLOUR_METRIC_PERCEPTUAL: i32 = 1 << 5;
/// Use a uniform metric for colour error.
pub const COLOUR_METRIC_UNIFORM: i32 = 1 << 6;
/// Weight the colour by alpha during cluster fit.
pub const WEIGHT_COLOUR_BY_ALPHA: i32 = 1 << 7;
/// Use a very slow but very high quality colour compressor.
pub const COLOUR_ITERATIVE_CLUSTER_FIT: i32 = 1 << 8;

/// All format bits.
pub const FORMAT_MASK: i32 = DXT1 | DXT3 | DXT5;
/// All colour fit bits.
pub const FIT_MASK: i32 = COLOUR_CLUSTER_FIT | COLOUR_RANGE_FIT | COLOUR_ITERATIVE_CLUSTER_FIT;
/// All colour metric bits.
pub const METRIC_MASK: i32 = COLOUR_METRIC_PERCEPTUAL | COLOUR_METRIC_UNIFORM;

/// Compressed block format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum BlockFormat {
    /// 8 byte blocks, RGB with optional 1-bit alpha.
    Dxt1,
    /// 16 byte blocks, explicit 4-bit alpha.
    Dxt3,
    /// 16 byte blocks, interpolated alpha.
    Dxt5,
}

impl BlockFormat {
    /// Size of one compressed 4x4 block in bytes.
    #[inline]
    pub const fn bytes_per_block(self) -> usize {
        match self {
            BlockFormat::Dxt1 => 8,
            BlockFormat::Dxt3 | BlockFormat::Dxt5 => 16,
        }
    }

    /// Picks the format from raw flags. Anything other than exactly DXT3 or
    /// exactly DXT5 falls back to DXT1.
    #[inline]
    pub const fn from_flags(flags: i32) -> Self {
        match flags & FORMAT_MASK {
            DXT3 => BlockFormat::Dxt3,
            DXT5 => BlockFormat::Dxt5,
            _ => BlockFormat::Dxt1,
        }
    }

    /// Raw flag bit for this format.
    #[inline]
    pub const fn bits(self) -> i32 {
        match self {
            BlockFormat::Dxt1 => DXT1,
            BlockFormat::Dxt3 => DXT3,
            BlockFormat::Dxt5 => DXT5,
        }
    }
}

/// Colour fitting method selected by the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FitMethod {
    Range,
    Cluster,
    IterativeCluster,
}

/// Normalised view of the raw flags, as used by the compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CodecFlags {
    pub format: BlockFormat,
    pub fit: FitMethod,
    pub perceptual: bool,
    pub weight_colour_by_alpha: bool,
}

impl CodecFlags {
    /// Range fit wins whenever its bit is set or no fit bit is present.
    /// The metric is uniform unless the perceptual bit is set.
    pub fn from_bits(flags: i32) -> Self {
        let fit = if flags & COLOUR_RANGE_FIT != 0 || flags & FIT_MASK == 0 {
            FitMethod::Range
        } else if flags & COLOUR_ITERATIVE_CLUSTER_FIT != 0 {
            FitMethod::IterativeCluster
        } else {
            FitMethod::Cluster
        };

        Self {
            format: BlockFormat::from_flags(flags),
            fit,
            perceptual: flags & COLOUR_METRIC_PERCEPTUAL != 0,
            weight_colour_by_alpha: flags & WEIGHT_COLOUR_BY_ALPHA != 0,
        }
    }

    #[inline]
    pub fn is_dxt1(&self) -> bool {
        self.format == BlockFormat::Dxt1
    }
}
