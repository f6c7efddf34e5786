//! Histograms and bin-index mapping.
//!
//! Probability estimation is histogram-based: every sample is first mapped
//! to an integer bin id, then the ids are counted into a fixed-size
//! histogram. The mapping policies mirror the kinds of random variable the
//! engine produces: linear scalar binning over a value range, orientation
//! angles over (-π, π], and 3-vectors against a sphere patch table. Both
//! the global and the windowed entropy paths map samples to bin ids exactly
//! once and reuse the ids for every histogram they build.

use std::f64::consts::PI;

use crate::error::{EntropyError, Result};
use crate::histogram::sphere::SpherePatchTable;

/// Bin counts of a fixed number of bins over a sample set.
///
/// Derived per entropy call, never persisted.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    counts: Vec<usize>,
    total: usize,
}

impl Histogram {
    /// Count precomputed bin ids into a histogram of `bin_count` bins.
    pub fn from_bin_ids(ids: &[usize], bin_count: usize) -> Result<Self> {
        if bin_count == 0 {
            return Err(EntropyError::InvalidBinCount(0));
        }
        let mut counts = vec![0usize; bin_count];
        for &id in ids {
            if id >= bin_count {
                return Err(EntropyError::BinIdOutOfRange { id, bin_count });
            }
            counts[id] += 1;
        }
        Ok(Self {
            counts,
            total: ids.len(),
        })
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn count(&self, bin: usize) -> usize {
        self.counts[bin]
    }

    /// Total number of counted samples.
    pub fn total(&self) -> usize {
        self.total
    }
}

/// A policy mapping samples of type `T` to integer bin ids in
/// `[0, bin_count)`.
pub trait BinMapping<T> {
    fn bin_count(&self) -> usize;
    fn bin_of(&self, sample: &T) -> usize;
}

/// Linear scalar binning over a declared or observed value range.
#[derive(Debug, Clone, Copy)]
pub struct ScalarBinning {
    bin_count: usize,
    min: f64,
    max: f64,
}

impl ScalarBinning {
    pub fn new(bin_count: usize, min: f64, max: f64) -> Result<Self> {
        if bin_count == 0 {
            return Err(EntropyError::InvalidBinCount(0));
        }
        if !(min <= max) {
            return Err(EntropyError::InvalidRange { min, max });
        }
        Ok(Self {
            bin_count,
            min,
            max,
        })
    }

    /// Derive the range from the samples themselves.
    ///
    /// An empty sample set degenerates to the `[0, 0]` range, which maps
    /// everything to bin 0.
    pub fn from_samples(bin_count: usize, samples: &[f64]) -> Result<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in samples {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 0.0;
        }
        Self::new(bin_count, min, max)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl BinMapping<f64> for ScalarBinning {
    fn bin_count(&self) -> usize {
        self.bin_count
    }

    fn bin_of(&self, sample: &f64) -> usize {
        if !sample.is_finite() || self.max <= self.min {
            return 0;
        }
        let t = (sample - self.min) / (self.max - self.min);
        let bin = (t * self.bin_count as f64).floor();
        if bin < 0.0 {
            0
        } else {
            (bin as usize).min(self.bin_count - 1)
        }
    }
}

/// Binning of orientation angles over (-π, π].
#[derive(Debug, Clone, Copy)]
pub struct OrientationBinning {
    bin_count: usize,
}

impl OrientationBinning {
    pub fn new(bin_count: usize) -> Result<Self> {
        if bin_count == 0 {
            return Err(EntropyError::InvalidBinCount(0));
        }
        Ok(Self { bin_count })
    }
}

impl BinMapping<f64> for OrientationBinning {
    fn bin_count(&self) -> usize {
        self.bin_count
    }

    fn bin_of(&self, angle: &f64) -> usize {
        if !angle.is_finite() {
            return 0;
        }
        // Fold into (-π, π] first; atan2 output already satisfies this.
        let mut a = *angle;
        while a > PI {
            a -= 2.0 * PI;
        }
        while a <= -PI {
            a += 2.0 * PI;
        }
        let t = (a + PI) / (2.0 * PI);
        // The angle axis is circular: exactly π wraps into bin 0, the bin
        // that also covers angles just above -π.
        let bin = (t * self.bin_count as f64).floor() as usize;
        bin % self.bin_count
    }
}

/// Binning of 3-vectors against an injected sphere patch table.
#[derive(Debug, Clone, Copy)]
pub struct SphereBinning<'t> {
    table: &'t SpherePatchTable,
}

impl<'t> SphereBinning<'t> {
    pub fn new(table: &'t SpherePatchTable) -> Self {
        Self { table }
    }
}

impl BinMapping<[f64; 3]> for SphereBinning<'_> {
    fn bin_count(&self) -> usize {
        self.table.len()
    }

    fn bin_of(&self, sample: &[f64; 3]) -> usize {
        self.table.bin_of(*sample)
    }
}

/// Bins sample sequences into fixed-size histograms under one mapping.
#[derive(Debug, Clone, Copy)]
pub struct HistogramBuilder<M> {
    mapping: M,
}

impl<M> HistogramBuilder<M> {
    pub fn new(mapping: M) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &M {
        &self.mapping
    }

    /// Map each sample to its bin id.
    pub fn map_bins<T>(&self, samples: &[T]) -> Vec<usize>
    where
        M: BinMapping<T>,
    {
        samples.iter().map(|s| self.mapping.bin_of(s)).collect()
    }

    /// Bin the samples and count them into a histogram.
    pub fn build<T>(&self, samples: &[T]) -> Result<Histogram>
    where
        M: BinMapping<T>,
    {
        let ids = self.map_bins(samples);
        Histogram::from_bin_ids(&ids, self.mapping.bin_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts() {
        let hist = Histogram::from_bin_ids(&[0, 1, 1, 3, 3, 3], 4).unwrap();
        assert_eq!(hist.counts(), &[1, 2, 0, 3]);
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn test_histogram_rejects_out_of_range_id() {
        assert!(matches!(
            Histogram::from_bin_ids(&[0, 4], 4),
            Err(EntropyError::BinIdOutOfRange { id: 4, bin_count: 4 })
        ));
    }

    #[test]
    fn test_scalar_binning_linear() {
        let binning = ScalarBinning::new(10, 0.0, 10.0).unwrap();
        assert_eq!(binning.bin_of(&0.0), 0);
        assert_eq!(binning.bin_of(&4.99), 4);
        assert_eq!(binning.bin_of(&9.99), 9);
        // Boundaries clamp.
        assert_eq!(binning.bin_of(&10.0), 9);
        assert_eq!(binning.bin_of(&-3.0), 0);
        assert_eq!(binning.bin_of(&42.0), 9);
    }

    #[test]
    fn test_scalar_binning_degenerate_range() {
        let binning = ScalarBinning::new(8, 2.0, 2.0).unwrap();
        assert_eq!(binning.bin_of(&2.0), 0);
        assert_eq!(binning.bin_of(&100.0), 0);
    }

    #[test]
    fn test_scalar_binning_observed_range() {
        let samples = vec![-1.0, 0.0, 3.0];
        let binning = ScalarBinning::from_samples(4, &samples).unwrap();
        assert_eq!(binning.range(), (-1.0, 3.0));
        assert_eq!(binning.bin_of(&-1.0), 0);
        assert_eq!(binning.bin_of(&3.0), 3);
    }

    #[test]
    fn test_orientation_cardinal_directions() {
        // atan2-derived angles for the four cardinal unit vectors must land
        // in four distinct, reproducible bins.
        let binning = OrientationBinning::new(360).unwrap();
        let east = binning.bin_of(&f64::atan2(0.0, 1.0));
        let north = binning.bin_of(&f64::atan2(1.0, 0.0));
        let west = binning.bin_of(&f64::atan2(0.0, -1.0));
        let south = binning.bin_of(&f64::atan2(-1.0, 0.0));
        assert_eq!(east, 180);
        assert_eq!(north, 270);
        assert_eq!(south, 90);
        // atan2(0, -1) = π wraps around the circular axis into bin 0.
        assert_eq!(west, 0);
        let bins = [east, north, west, south];
        for i in 0..4 {
            for j in i + 1..4 {
                assert_ne!(bins[i], bins[j]);
            }
        }
    }

    #[test]
    fn test_orientation_reproducible() {
        let binning = OrientationBinning::new(60).unwrap();
        let angle = f64::atan2(0.7, -0.3);
        assert_eq!(binning.bin_of(&angle), binning.bin_of(&angle));
    }

    #[test]
    fn test_builder_with_sphere_mapping() {
        let table = SpherePatchTable::fibonacci(32).unwrap();
        let builder = HistogramBuilder::new(SphereBinning::new(&table));
        let samples = vec![[1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let hist = builder.build(&samples).unwrap();
        assert_eq!(hist.total(), 3);
        let occupied: usize = hist.counts().iter().filter(|&&c| c > 0).count();
        assert_eq!(occupied, 2);
    }

    #[test]
    fn test_builder_scalar() {
        let builder = HistogramBuilder::new(ScalarBinning::new(5, 0.0, 5.0).unwrap());
        let hist = builder.build(&[0.5, 1.5, 2.5, 3.5, 4.5]).unwrap();
        assert_eq!(hist.counts(), &[1, 1, 1, 1, 1]);
    }
}
