//! Entropy Module: Shannon Entropy Estimation over Fields
//!
//! Implements the numeric core and its two orchestrations:
//!
//! ## Estimators
//!
//! Histogram-based entropy derives probabilities from bin frequencies:
//!
//!   H = -Σᵢ pᵢ log2(pᵢ),  pᵢ = countsᵢ / total
//!
//! with the convention `0·log2 0 := 0` and an optional normalization by
//! `log2(bin_count)`, the entropy of the uniform distribution. KDE-based
//! entropy replaces the frequencies with Gaussian kernel density estimates;
//! it is O(n²) and reserved for scalar exploratory use.
//!
//! ## Orchestration
//!
//! [`GlobalEntropyComputer`] aggregates a whole field into one entropy
//! value; [`LocalEntropyComputer`] produces an entropy value per cell from
//! that cell's neighborhood window, yielding a spatial map of informational
//! complexity. Both share one bin-mapping pass and the histogram estimator.

mod core;
mod global;
mod local;

pub use self::core::{entropy_of_bin_ids, histogram_entropy, kde_entropy};
pub use global::GlobalEntropyComputer;
pub use local::LocalEntropyComputer;

/// Default number of histogram bins.
pub const DEFAULT_BIN_COUNT: usize = 360;

/// Knobs of one entropy analysis call.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    /// Number of histogram bins.
    pub bin_count: usize,
    /// Normalize entropies into [0, 1] by the uniform-distribution bound.
    pub normalize: bool,
    /// KDE bandwidth; 0 selects Silverman's rule.
    pub kde_bandwidth: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            normalize: false,
            kde_bandwidth: 0.0,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration with a custom bin count.
    pub fn with_bin_count(bin_count: usize) -> Self {
        Self {
            bin_count,
            ..Self::default()
        }
    }
}
