//! Unit-sphere patch tables for vector-orientation binning.
//!
//! Binning a 3-vector by orientation needs a discretization of the unit
//! sphere into a fixed number of patches. The table is an external,
//! read-only resource: it is loaded (or generated) once per process,
//! injected into the analysis, and shared by every histogram built
//! afterwards. The core never constructs patch layouts on its own beyond
//! the deterministic default used when the host asks for the `"!"` token.

use crate::error::{EntropyError, Result};

/// The resource token selecting the built-in default patch layout.
pub const DEFAULT_PATCH_TOKEN: &str = "!";

/// A fixed discretization of the unit sphere into patches.
///
/// Each patch is represented by its center direction (a unit vector); a
/// sample vector maps to the patch whose center it is closest to in angle.
#[derive(Debug, Clone)]
pub struct SpherePatchTable {
    centers: Vec<[f64; 3]>,
}

impl SpherePatchTable {
    /// Build a table from externally supplied patch center directions.
    ///
    /// Centers are normalized; a zero-length center is rejected. This is
    /// the injection point for patch layouts loaded from a host resource.
    pub fn from_centers(centers: Vec<[f64; 3]>) -> Result<Self> {
        if centers.is_empty() {
            return Err(EntropyError::InvalidBinCount(0));
        }
        let mut unit = Vec::with_capacity(centers.len());
        for c in centers {
            let norm = (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();
            if norm == 0.0 || !norm.is_finite() {
                return Err(EntropyError::InvalidRange {
                    min: norm,
                    max: norm,
                });
            }
            unit.push([c[0] / norm, c[1] / norm, c[2] / norm]);
        }
        Ok(Self { centers: unit })
    }

    /// The deterministic default layout: a Fibonacci lattice of
    /// `bin_count` evenly spread directions.
    pub fn fibonacci(bin_count: usize) -> Result<Self> {
        if bin_count == 0 {
            return Err(EntropyError::InvalidBinCount(0));
        }
        // Golden-angle spiral; no randomness, identical across processes.
        let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        let n = bin_count as f64;
        let centers = (0..bin_count)
            .map(|i| {
                let z = 1.0 - 2.0 * (i as f64 + 0.5) / n;
                let r = (1.0 - z * z).sqrt();
                let phi = golden_angle * i as f64;
                [r * phi.cos(), r * phi.sin(), z]
            })
            .collect();
        Self::from_centers(centers)
    }

    /// Resolve a table by its resource token.
    ///
    /// `"!"` selects the built-in default layout. Any other token names a
    /// host-managed resource that must be injected via
    /// [`SpherePatchTable::from_centers`] instead.
    pub fn named(token: &str, bin_count: usize) -> Result<Self> {
        if token == DEFAULT_PATCH_TOKEN {
            Self::fibonacci(bin_count)
        } else {
            Err(EntropyError::Unsupported(
                "named patch tables must be injected via from_centers",
            ))
        }
    }

    /// Number of patches (histogram bins).
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Patch center directions.
    pub fn centers(&self) -> &[[f64; 3]] {
        &self.centers
    }

    /// Patch id of a (not necessarily unit) vector: the center with the
    /// largest dot product. Zero and non-finite vectors map to patch 0.
    pub fn bin_of(&self, v: [f64; 3]) -> usize {
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return 0;
        }
        let mut best = 0;
        let mut best_dot = f64::NEG_INFINITY;
        for (i, c) in self.centers.iter().enumerate() {
            let dot = (v[0] * c[0] + v[1] * c[1] + v[2] * c[2]) / norm;
            if dot > best_dot {
                best_dot = dot;
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_size() {
        let table = SpherePatchTable::fibonacci(360).unwrap();
        assert_eq!(table.len(), 360);
        for c in table.centers() {
            let norm = (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();
            assert!((norm - 1.0).abs() < 1e-12, "center not unit: {}", norm);
        }
    }

    #[test]
    fn test_default_token() {
        let table = SpherePatchTable::named(DEFAULT_PATCH_TOKEN, 64).unwrap();
        assert_eq!(table.len(), 64);
        assert!(SpherePatchTable::named("coarse_128", 128).is_err());
    }

    #[test]
    fn test_bin_of_matches_center() {
        let table = SpherePatchTable::fibonacci(100).unwrap();
        // A vector pointing exactly at a patch center lands in that patch.
        for (i, &c) in table.centers().iter().enumerate().step_by(17) {
            assert_eq!(table.bin_of(c), i);
        }
    }

    #[test]
    fn test_bin_of_scale_invariant() {
        let table = SpherePatchTable::fibonacci(50).unwrap();
        let v = [0.3, -0.7, 0.2];
        let scaled = [3.0, -7.0, 2.0];
        assert_eq!(table.bin_of(v), table.bin_of(scaled));
    }

    #[test]
    fn test_zero_vector() {
        let table = SpherePatchTable::fibonacci(10).unwrap();
        assert_eq!(table.bin_of([0.0, 0.0, 0.0]), 0);
    }

    #[test]
    fn test_axes_distinct() {
        let table = SpherePatchTable::fibonacci(360).unwrap();
        let bins = [
            table.bin_of([1.0, 0.0, 0.0]),
            table.bin_of([-1.0, 0.0, 0.0]),
            table.bin_of([0.0, 1.0, 0.0]),
            table.bin_of([0.0, -1.0, 0.0]),
            table.bin_of([0.0, 0.0, 1.0]),
            table.bin_of([0.0, 0.0, -1.0]),
        ];
        for i in 0..bins.len() {
            for j in i + 1..bins.len() {
                assert_ne!(bins[i], bins[j], "axes {} and {} share a patch", i, j);
            }
        }
    }

    #[test]
    fn test_injected_centers_normalized() {
        let table =
            SpherePatchTable::from_centers(vec![[2.0, 0.0, 0.0], [0.0, 0.0, -5.0]]).unwrap();
        assert_eq!(table.len(), 2);
        assert!((table.centers()[1][2] + 1.0).abs() < 1e-12);
        assert_eq!(table.bin_of([0.1, 0.0, -0.9]), 1);
    }
}
