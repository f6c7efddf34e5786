//! Global entropy: one Shannon entropy value per block.

use crate::entropy::core::entropy_of_bin_ids;
use crate::error::{EntropyError, Result};
use crate::field::RegularField;
use crate::histogram::BinMapping;

/// Computes the aggregated Shannon entropy of a whole field.
///
/// The raw samples are converted to bin ids once, over the full padded
/// buffer; the entropy itself is then a single histogram over the interior
/// cells. Call [`compute_bin_field`](Self::compute_bin_field) before
/// [`compute_entropy`](Self::compute_entropy).
#[derive(Debug)]
pub struct GlobalEntropyComputer<'f, T> {
    field: &'f RegularField<T>,
    bin_ids: Option<Vec<usize>>,
    bin_count: usize,
}

impl<'f, T: Copy + Default> GlobalEntropyComputer<'f, T> {
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

    /// Shannon entropy over all interior cells.
    pub fn compute_entropy(&self, normalize: bool) -> Result<f64> {
        let bin_ids = self
            .bin_ids
            .as_ref()
            .ok_or(EntropyError::BinFieldNotComputed)?;
        let interior: Vec<usize> = self
            .field
            .interior_indices()
            .into_iter()
            .map(|i| bin_ids[i])
            .collect();
        entropy_of_bin_ids(&interior, self.bin_count, normalize)
    }
}
