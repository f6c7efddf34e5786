//! Local entropy: one Shannon entropy value per grid cell.
//!
//! Where global entropy reduces a block to a single number, local entropy
//! maps informational complexity in space: each cell's entropy is computed
//! over the histogram of its own neighborhood window, producing a field of
//! the same unpadded shape as the input. This spatial entropy map is the
//! primary product consumed by downstream visualization.

use crate::entropy::core::entropy_of_bin_ids;
use crate::error::{EntropyError, Result};
use crate::field::RegularField;
use crate::histogram::BinMapping;

/// Computes a per-cell Shannon entropy field over neighborhood windows.
///
/// The raw samples are converted to bin ids once, over the full padded
/// buffer (halo cells included, so boundary windows have defined values);
/// every cell then builds a histogram over the bin ids inside its
/// hyper-rectangular window of the field's neighborhood radius.
#[derive(Debug)]
pub struct LocalEntropyComputer<'f, T> {
    field: &'f RegularField<T>,
    bin_ids: Option<Vec<usize>>,
    bin_count: usize,
}

impl<'f, T: Copy + Default> LocalEntropyComputer<'f, T> {
    pub fn new(field: &'f RegularField<T>) -> Self {
        Self {
            field,
            bin_ids: None,
            bin_count: 0,
        }
    }

    /// Map every cell of the padded buffer to its bin id.
    pub fn compute_bin_field<M: BinMapping<T>>(&mut self, mapping: &M) -> Result<()> {
        if mapping.bin_count() == 0 {
            return Err(EntropyError::InvalidBinCount(0));
        }
        self.bin_count = mapping.bin_count();
        self.bin_ids = Some(
            self.field
                .data_full()
                .iter()
                .map(|s| mapping.bin_of(s))
                .collect(),
        );
        Ok(())
    }

    /// Per-cell entropy over each cell's neighborhood window.
    ///
    /// The output has the same unpadded shape as the input field, no
    /// padding, and no neighborhood radius of its own.
    pub fn compute_entropy_field(&self, normalize: bool) -> Result<RegularField<f64>> {
        let bin_ids = self
            .bin_ids
            .as_ref()
            .ok_or(EntropyError::BinFieldNotComputed)?;

        let dim = self.field.dim();
        let lengths = &self.field.lengths()[..dim];
        let zeros = vec![0usize; dim];
        let mut out = RegularField::new(dim, lengths, &zeros, &zeros, &zeros)?;

        let mut window_ids = Vec::new();
        for cell in 0..self.field.cell_count() {
            window_ids.clear();
            window_ids.extend(self.field.window_indices(cell).into_iter().map(|i| bin_ids[i]));
            let h = entropy_of_bin_ids(&window_ids, self.bin_count, normalize)?;
            out.set(cell, h);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::global::GlobalEntropyComputer;
    use crate::histogram::ScalarBinning;
    use rand::Rng;

    #[test]
    fn test_constant_field_zero_everywhere() {
        let samples = vec![4.0; 25];
        let field =
            RegularField::from_samples(&samples, 2, &[5, 5], &[0, 0], &[0, 0], &[1, 1]).unwrap();
        let mut computer = LocalEntropyComputer::new(&field);
        computer
            .compute_bin_field(&ScalarBinning::new(8, 0.0, 8.0).unwrap())
            .unwrap();
        let entropy = computer.compute_entropy_field(false).unwrap();
        assert_eq!(entropy.cell_count(), 25);
        for cell in 0..entropy.cell_count() {
            assert_eq!(entropy.get(cell), 0.0);
        }
    }

    #[test]
    fn test_edge_detection() {
        // Two homogeneous half-planes: entropy is zero deep inside each
        // half and positive along the interface.
        let mut samples = Vec::new();
        for y in 0..8 {
            for _x in 0..8 {
                samples.push(if y < 4 { 1.0 } else { 9.0 });
            }
        }
        let field =
            RegularField::from_samples(&samples, 2, &[8, 8], &[0, 0], &[0, 0], &[1, 1]).unwrap();
        let mut computer = LocalEntropyComputer::new(&field);
        computer
            .compute_bin_field(&ScalarBinning::new(10, 0.0, 10.0).unwrap())
            .unwrap();
        let entropy = computer.compute_entropy_field(false).unwrap();

        // Deep in the lower half (y = 0..3 windows stay homogeneous).
        assert_eq!(entropy.get(8 + 2), 0.0);
        // On the interface row the window mixes both values.
        let interface = entropy.get(4 * 8 + 3);
        assert!(interface > 0.0, "interface entropy = {}", interface);
    }

    #[test]
    fn test_block_covering_window_matches_global() {
        // When the window covers the whole block, every cell's local
        // entropy equals the single global entropy value.
        let mut rng = rand::rng();
        let samples: Vec<f64> = (0..36).map(|_| rng.random::<f64>() * 10.0).collect();
        let binning = ScalarBinning::new(6, 0.0, 10.0).unwrap();

        let field =
            RegularField::from_samples(&samples, 2, &[6, 6], &[0, 0], &[0, 0], &[6, 6]).unwrap();

        let mut global = GlobalEntropyComputer::new(&field);
        global.compute_bin_field(&binning).unwrap();
        let expected = global.compute_entropy(false).unwrap();

        let mut local = LocalEntropyComputer::new(&field);
        local.compute_bin_field(&binning).unwrap();
        let entropy = local.compute_entropy_field(false).unwrap();

        for cell in 0..entropy.cell_count() {
            assert!(
                (entropy.get(cell) - expected).abs() < 1e-12,
                "cell {}: local {} vs global {}",
                cell,
                entropy.get(cell),
                expected
            );
        }
    }

    #[test]
    fn test_output_shape_matches_input() {
        let samples = vec![0.0; 24];
        let field =
            RegularField::from_samples(&samples, 3, &[4, 3, 2], &[1, 1, 1], &[1, 1, 1], &[1, 1, 1])
                .unwrap();
        let mut computer = LocalEntropyComputer::new(&field);
        computer
            .compute_bin_field(&ScalarBinning::new(4, 0.0, 1.0).unwrap())
            .unwrap();
        let entropy = computer.compute_entropy_field(false).unwrap();
        assert_eq!(entropy.dim(), 3);
        assert_eq!(entropy.lengths(), &[4, 3, 2, 1]);
        assert_eq!(entropy.padded_cell_count(), 24);
    }

    #[test]
    fn test_entropy_requires_bin_field() {
        let samples = vec![0.0; 4];
        let field =
            RegularField::from_samples(&samples, 1, &[4], &[0], &[0], &[1]).unwrap();
        let computer = LocalEntropyComputer::new(&field);
        assert!(matches!(
            computer.compute_entropy_field(false),
            Err(EntropyError::BinFieldNotComputed)
        ));
    }
}
