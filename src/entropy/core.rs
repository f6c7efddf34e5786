//! Shannon entropy estimators.
//!
//! Two probability models feed the same entropy accumulation:
//!
//! - **Histogram-based**: probabilities are bin frequencies. This is the
//!   estimator both the global and the windowed (local) paths use.
//!
//! - **Kernel-density-based**: probabilities are Gaussian-kernel density
//!   estimates at each sample. O(n²) in the sample count; intended for
//!   block-local exploratory use on scalar data, never for whole-domain
//!   sample sets and never on the windowed path.
//!
//! Both treat an unobserved outcome as contributing nothing
//! (`0·log2 0 := 0`), and both special-case degenerate distributions to a
//! defined zero-entropy sentinel instead of propagating NaN or Inf.

use crate::error::{EntropyError, Result};
use crate::histogram::Histogram;

/// Shannon entropy of a histogram, in bits.
///
/// `H = -Σ p[i]·log2 p[i]` with `p[i] = counts[i] / total`. With
/// `normalize`, the result is divided by `log2(bin_count)` — the
/// maximum-entropy bound of a uniform distribution — yielding a value in
/// `[0, 1]`. A single-bin histogram or an empty sample set is degenerate
/// and returns 0 with normalization skipped.
pub fn histogram_entropy(hist: &Histogram, normalize: bool) -> f64 {
    if hist.total() == 0 || hist.bin_count() <= 1 {
        return 0.0;
    }

    let total = hist.total() as f64;
    let mut entropy = 0.0;
    for &count in hist.counts() {
        if count > 0 {
            let p = count as f64 / total;
            entropy -= p * p.log2();
        }
    }

    if normalize {
        entropy /= (hist.bin_count() as f64).log2();
    }

    entropy
}

/// Shannon entropy of precomputed bin ids.
pub fn entropy_of_bin_ids(ids: &[usize], bin_count: usize, normalize: bool) -> Result<f64> {
    let hist = Histogram::from_bin_ids(ids, bin_count)?;
    Ok(histogram_entropy(&hist, normalize))
}

/// Kernel-density-based Shannon entropy of a scalar sample set.
///
/// Densities are estimated at every sample as
/// `p[i] = (1/(n·h)) · Σ_j K((x_i - x_j)/h)` and accumulated like the
/// histogram case. A `bandwidth` of 0 selects Silverman's rule,
/// `h = 1.06·σ·n^(-0.2)`. With `normalize`, the result is divided by
/// `log2(n)`.
///
/// The kernel is evaluated with the global mean and variance of the data
/// rather than the standardized kernel argument:
/// `K(x) = exp(-(x - μ)/(2σ²)) / sqrt(2π·σ²)`, with a linear (not
/// squared) exponent. This deviates from the textbook Gaussian kernel and
/// is kept deliberately; changing it to the standard form would be a
/// documented behavior change, not a drop-in fix.
///
/// Zero-variance sample sets are degenerate and return 0. The estimator
/// is fully deterministic: identical input produces bit-identical output.
/// Cost is O(n²), a scalability boundary that bounds its use to the
/// samples of a single block.
pub fn kde_entropy(samples: &[f64], bandwidth: f64, normalize: bool) -> Result<f64> {
    let n = samples.len();
    if n == 0 {
        return Err(EntropyError::EmptySampleSet);
    }

    let nf = n as f64;
    let mean = samples.iter().sum::<f64>() / nf;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / nf;
    log::debug!("kde: n={} mean={} variance={}", n, mean, variance);

    if variance <= 0.0 || !variance.is_finite() {
        return Ok(0.0);
    }

    let sigma = variance.sqrt();
    let h = if bandwidth > 0.0 {
        bandwidth
    } else {
        1.06 * sigma * nf.powf(-0.2)
    };
    log::debug!("kde: bandwidth={}", h);
    if h <= 0.0 || !h.is_finite() {
        return Ok(0.0);
    }

    let norm = 1.0 / (2.0 * std::f64::consts::PI * variance).sqrt();
    let mut entropy = 0.0;
    for i in 0..n {
        let mut kernel_sum = 0.0;
        for j in 0..n {
            let x = (samples[i] - samples[j]) / h;
            kernel_sum += norm * (-(x - mean) / (2.0 * variance)).exp();
        }
        let p = kernel_sum / (nf * h);
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }

    if normalize && n > 1 {
        entropy /= nf.log2();
    }

    Ok(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_identical_samples_zero_entropy() {
        // 1000 copies of the same bin id over 10 bins.
        let ids = vec![5usize; 1000];
        let h = entropy_of_bin_ids(&ids, 10, false).unwrap();
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_uniform_bins_maximal_entropy() {
        // 360 samples, one per bin: H = log2(360), normalized 1.
        let ids: Vec<usize> = (0..360).collect();
        let h = entropy_of_bin_ids(&ids, 360, false).unwrap();
        assert!((h - 360.0_f64.log2()).abs() < 1e-10, "H = {}", h);
        let hn = entropy_of_bin_ids(&ids, 360, true).unwrap();
        assert!((hn - 1.0).abs() < 1e-10, "normalized H = {}", hn);
    }

    #[test]
    fn test_entropy_bounds() {
        let mut rng = rand::rng();
        let bins = 16;
        let ids: Vec<usize> = (0..500).map(|_| rng.random_range(0..bins)).collect();
        let h = entropy_of_bin_ids(&ids, bins, false).unwrap();
        assert!(h >= 0.0);
        assert!(h <= (bins as f64).log2() + 1e-12);
        let hn = entropy_of_bin_ids(&ids, bins, true).unwrap();
        assert!((0.0..=1.0 + 1e-12).contains(&hn));
    }

    #[test]
    fn test_two_even_bins_is_one_bit() {
        let mut ids = vec![0usize; 64];
        ids.extend(vec![7usize; 64]);
        let h = entropy_of_bin_ids(&ids, 8, false).unwrap();
        assert!((h - 1.0).abs() < 1e-12, "H = {}", h);
    }

    #[test]
    fn test_degenerate_single_bin() {
        // One bin cannot be normalized (log2(1) = 0); the sentinel is 0.
        let ids = vec![0usize; 50];
        assert_eq!(entropy_of_bin_ids(&ids, 1, true).unwrap(), 0.0);
        assert_eq!(entropy_of_bin_ids(&ids, 1, false).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_sample_set_histogram() {
        assert_eq!(entropy_of_bin_ids(&[], 8, false).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(entropy_of_bin_ids(&[0], 0, false).is_err());
    }

    #[test]
    fn test_kde_deterministic() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut rng = rand::rng();
        let samples: Vec<f64> = (0..200).map(|_| normal.sample(&mut rng)).collect();
        let a = kde_entropy(&samples, 0.5, false).unwrap();
        let b = kde_entropy(&samples, 0.5, false).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_kde_zero_variance_sentinel() {
        let samples = vec![3.0; 100];
        assert_eq!(kde_entropy(&samples, 0.0, true).unwrap(), 0.0);
    }

    #[test]
    fn test_kde_auto_bandwidth() {
        let normal = Normal::new(5.0, 2.0).unwrap();
        let mut rng = rand::rng();
        let samples: Vec<f64> = (0..100).map(|_| normal.sample(&mut rng)).collect();
        // Auto bandwidth must produce a finite value.
        let h = kde_entropy(&samples, 0.0, false).unwrap();
        assert!(h.is_finite());
    }

    #[test]
    fn test_kde_empty_rejected() {
        assert!(matches!(
            kde_entropy(&[], 0.0, false),
            Err(EntropyError::EmptySampleSet)
        ));
    }
}
