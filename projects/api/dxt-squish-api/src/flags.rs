//! Compression flags.
//!
//! [`SquishFlags`] is the raw bitmask the codec understands and is forwarded to
//! it unchanged. [`CompressionOptions`] is its validated, structured form.
//! Both convert into each other without loss.

use crate::error::FlagsError;
use bitflags::bitflags;
use derive_enum_all_values::AllValues;
use dxt_squish_codec::flags as raw;

bitflags! {
    /// Raw compression flags, bit-compatible with libsquish.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SquishFlags: i32 {
        /// Use DXT1 compression.
        const DXT1 = raw::DXT1;
        /// Use DXT3 compression.
        const DXT3 = raw::DXT3;
        /// Use DXT5 compression.
        const DXT5 = raw::DXT5;
        /// Use a slow but high quality colour compressor.
        const CLUSTER_FIT = raw::COLOUR_CLUSTER_FIT;
        /// Use a fast but low quality colour compressor.
        const RANGE_FIT = raw::COLOUR_RANGE_FIT;
        /// Use a perceptual metric for colour error.
        const METRIC_PERCEPTUAL = raw::COLOUR_METRIC_PERCEPTUAL;
        /// Use a uniform metric for colour error.
        const METRIC_UNIFORM = raw::COLOUR_METRIC_UNIFORM;
        /// Weight the colour by alpha during the fit.
        const WEIGHT_COLOUR_BY_ALPHA = raw::WEIGHT_COLOUR_BY_ALPHA;
        /// Use a very slow but very high quality colour compressor.
        const ITERATIVE_CLUSTER_FIT = raw::COLOUR_ITERATIVE_CLUSTER_FIT;

        /// All format bits.
        const FORMATS = Self::DXT1.bits() | Self::DXT3.bits() | Self::DXT5.bits();
        /// All colour fit bits.
        const FITS = Self::CLUSTER_FIT.bits() | Self::RANGE_FIT.bits() | Self::ITERATIVE_CLUSTER_FIT.bits();
        /// All colour metric bits.
        const METRICS = Self::METRIC_PERCEPTUAL.bits() | Self::METRIC_UNIFORM.bits();
    }
}

/// Compressed block format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum Format {
    /// 8 byte blocks, RGB with optional 1-bit alpha.
    Dxt1,
    /// 16 byte blocks, explicit 4-bit alpha.
    Dxt3,
    /// 16 byte blocks, interpolated alpha.
    Dxt5,
}

impl Format {
    /// Size of one compressed 4x4 block in bytes.
    #[inline]
    pub const fn bytes_per_block(self) -> usize {
        match self {
            Format::Dxt1 => 8,
            Format::Dxt3 | Format::Dxt5 => 16,
        }
    }

    /// The flag selecting this format.
    #[inline]
    pub const fn flag(self) -> SquishFlags {
        match self {
            Format::Dxt1 => SquishFlags::DXT1,
            Format::Dxt3 => SquishFlags::DXT3,
            Format::Dxt5 => SquishFlags::DXT5,
        }
    }
}

/// Colour endpoint fitting method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum Fit {
    /// Fast, endpoints at the extremes of the principal axis.
    Range,
    /// Slow, least squares over every ordered split of the colours.
    Cluster,
    /// Very slow, cluster fit refined over several passes.
    IterativeCluster,
}

impl Fit {
    /// The flag selecting this fit.
    #[inline]
    pub const fn flag(self) -> SquishFlags {
        match self {
            Fit::Range => SquishFlags::RANGE_FIT,
            Fit::Cluster => SquishFlags::CLUSTER_FIT,
            Fit::IterativeCluster => SquishFlags::ITERATIVE_CLUSTER_FIT,
        }
    }
}

/// Colour error metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum Metric {
    /// All channels weigh the same.
    Uniform,
    /// Channels weighted by perceived luminance.
    Perceptual,
}

impl Metric {
    /// The flag selecting this metric.
    #[inline]
    pub const fn flag(self) -> SquishFlags {
        match self {
            Metric::Uniform => SquishFlags::METRIC_UNIFORM,
            Metric::Perceptual => SquishFlags::METRIC_PERCEPTUAL,
        }
    }
}

/// Validated compression flags.
///
/// `None` for [`fit`](Self::fit) or [`metric`](Self::metric) means no bit of
/// that group is set; the codec then uses [`Fit::Range`] and [`Metric::Uniform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionOptions {
    /// The block format.
    pub format: Format,
    /// The colour fit, if one was chosen explicitly.
    pub fit: Option<Fit>,
    /// The colour metric, if one was chosen explicitly.
    pub metric: Option<Metric>,
    /// Weight colour error by pixel alpha.
    pub weight_colour_by_alpha: bool,
}

impl CompressionOptions {
    /// Options for `format` with every other group left at the codec default.
    pub const fn new(format: Format) -> Self {
        Self {
            format,
            fit: None,
            metric: None,
            weight_colour_by_alpha: false,
        }
    }

    /// Sets the colour fit.
    pub const fn with_fit(mut self, fit: Fit) -> Self {
        self.fit = Some(fit);
        self
    }

    /// Sets the colour metric.
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Sets whether colour error is weighted by alpha.
    pub const fn with_weight_colour_by_alpha(mut self, weight: bool) -> Self {
        self.weight_colour_by_alpha = weight;
        self
    }

    /// The fit the codec will use.
    #[inline]
    pub fn effective_fit(&self) -> Fit {
        self.fit.unwrap_or(Fit::Range)
    }

    /// The metric the codec will use.
    #[inline]
    pub fn effective_metric(&self) -> Metric {
        self.metric.unwrap_or(Metric::Uniform)
    }

    /// Raw flags for these options.
    pub fn flags(&self) -> SquishFlags {
        let mut flags = self.format.flag();
        if let Some(fit) = self.fit {
            flags |= fit.flag();
        }
        if let Some(metric) = self.metric {
            flags |= metric.flag();
        }
        flags.set(SquishFlags::WEIGHT_COLOUR_BY_ALPHA, self.weight_colour_by_alpha);
        flags
    }

    /// Every valid combination of options, including unset fit and metric.
    pub fn all_combinations() -> impl Iterator<Item = CompressionOptions> {
        let fits = core::iter::once(None).chain(Fit::all_values().iter().copied().map(Some));
        let metrics: [Option<Metric>; 3] = [None, Some(Metric::Uniform), Some(Metric::Perceptual)];

        Format::all_values().iter().flat_map(move |&format| {
            fits.clone().flat_map(move |fit| {
                metrics.into_iter().flat_map(move |metric| {
                    [false, true].into_iter().map(move |weight_colour_by_alpha| {
                        CompressionOptions {
                            format,
                            fit,
                            metric,
                            weight_colour_by_alpha,
                        }
                    })
                })
            })
        })
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self::new(Format::Dxt1)
    }
}

/// Returns the single set bit of `group` within `flags`, `Ok(None)` if none is set,
/// or the group bits if several are.
fn single_bit(flags: SquishFlags, group: SquishFlags) -> Result<Option<SquishFlags>, i32> {
    let selected = flags & group;
    match selected.bits().count_ones() {
        0 => Ok(None),
        1 => Ok(Some(selected)),
        _ => Err(selected.bits()),
    }
}

impl TryFrom<SquishFlags> for CompressionOptions {
    type Error = FlagsError;

    fn try_from(flags: SquishFlags) -> Result<Self, Self::Error> {
        let unknown = flags.bits() & !SquishFlags::all().bits();
        if unknown != 0 {
            return Err(FlagsError::UnknownBits(unknown));
        }

        let format = match single_bit(flags, SquishFlags::FORMATS)
            .map_err(FlagsError::ConflictingFormats)?
        {
            None => return Err(FlagsError::MissingFormat),
            Some(bit) if bit == SquishFlags::DXT3 => Format::Dxt3,
            Some(bit) if bit == SquishFlags::DXT5 => Format::Dxt5,
            Some(_) => Format::Dxt1,
        };

        let fit = single_bit(flags, SquishFlags::FITS)
            .map_err(FlagsError::ConflictingFits)?
            .map(|bit| {
                if bit == SquishFlags::RANGE_FIT {
                    Fit::Range
                } else if bit == SquishFlags::CLUSTER_FIT {
                    Fit::Cluster
                } else {
                    Fit::IterativeCluster
                }
            });

        let metric = single_bit(flags, SquishFlags::METRICS)
            .map_err(FlagsError::ConflictingMetrics)?
            .map(|bit| {
                if bit == SquishFlags::METRIC_PERCEPTUAL {
                    Metric::Perceptual
                } else {
                    Metric::Uniform
                }
            });

        Ok(Self {
            format,
            fit,
            metric,
            weight_colour_by_alpha: flags.contains(SquishFlags::WEIGHT_COLOUR_BY_ALPHA),
        })
    }
}

impl TryFrom<i32> for CompressionOptions {
    type Error = FlagsError;

    fn try_from(bits: i32) -> Result<Self, Self::Error> {
        Self::try_from(SquishFlags::from_bits_retain(bits))
    }
}

impl From<CompressionOptions> for SquishFlags {
    fn from(options: CompressionOptions) -> Self {
        options.flags()
    }
}

impl From<Format> for SquishFlags {
    fn from(format: Format) -> Self {
        format.flag()
    }
}

impl From<Format> for CompressionOptions {
    fn from(format: Format) -> Self {
        Self::new(format)
    }
}
