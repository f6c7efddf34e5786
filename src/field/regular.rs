//! Padded regular fields and neighborhood windowing.
//!
//! A `RegularField` is the dense payload the entropy engine sweeps over:
//! the per-cell samples of a random variable, flattened row-major with
//! axis 0 fastest, surrounded by a declared low/high padding region (halo)
//! per axis. Windowed queries near the boundary read into the halo instead
//! of out of bounds; the halo is zero-filled by default, or carries
//! host-duplicated values when the caller's halo exchange supplies them.
//!
//! The buffer is deliberately flat and contiguous: the externally-owned
//! dump format is a flattened value buffer preceded by its per-axis
//! dimensions, and [`RegularField::data_full`] plus
//! [`RegularField::padded_lengths`] expose exactly that.

use ndarray::{ArrayViewD, IxDyn};

use crate::error::{EntropyError, Result};
use crate::field::block::MAX_BLOCK_DIM;

/// A padded N-dimensional container over a primitive cell type.
///
/// `T` is a scalar (`f64`) or a 3-vector (`[f64; 3]`); bin fields reuse the
/// same container with `usize` cells.
#[derive(Debug, Clone)]
pub struct RegularField<T> {
    /// Flattened padded buffer, length = product of padded lengths.
    data: Vec<T>,
    dim: usize,
    lengths: [usize; MAX_BLOCK_DIM],
    low_pad: [usize; MAX_BLOCK_DIM],
    high_pad: [usize; MAX_BLOCK_DIM],
    radius: [usize; MAX_BLOCK_DIM],
}

impl<T: Copy + Default> RegularField<T> {
    /// Create a zero-filled padded field.
    ///
    /// `lengths`, `low_pad`, `high_pad`, and `radius` must each supply at
    /// least `dim` entries; axes beyond `dim` get length 1 and no padding.
    /// All validation happens before the buffer is allocated.
    pub fn new(
        dim: usize,
        lengths: &[usize],
        low_pad: &[usize],
        high_pad: &[usize],
        radius: &[usize],
    ) -> Result<Self> {
        if dim == 0
            || dim > MAX_BLOCK_DIM
            || lengths.len() < dim
            || low_pad.len() < dim
            || high_pad.len() < dim
            || radius.len() < dim
        {
            return Err(EntropyError::InvalidDimension { dim });
        }
        for (d, &length) in lengths.iter().enumerate().take(dim) {
            if length < 1 {
                return Err(EntropyError::InvalidDimLength { dim: d, length });
            }
        }

        let mut full_lengths = [1; MAX_BLOCK_DIM];
        let mut full_low = [0; MAX_BLOCK_DIM];
        let mut full_high = [0; MAX_BLOCK_DIM];
        let mut full_radius = [0; MAX_BLOCK_DIM];
        for d in 0..dim {
            full_lengths[d] = lengths[d];
            full_low[d] = low_pad[d];
            full_high[d] = high_pad[d];
            full_radius[d] = radius[d];
        }

        let padded: usize = (0..MAX_BLOCK_DIM)
            .map(|d| full_lengths[d] + full_low[d] + full_high[d])
            .product();

        Ok(Self {
            data: vec![T::default(); padded],
            dim,
            lengths: full_lengths,
            low_pad: full_low,
            high_pad: full_high,
            radius: full_radius,
        })
    }

    /// Create a field from a dense interior sample buffer.
    ///
    /// `samples` must hold one value per interior cell in row-major order
    /// (axis 0 fastest). The padding region stays zero-filled.
    pub fn from_samples(
        samples: &[T],
        dim: usize,
        lengths: &[usize],
        low_pad: &[usize],
        high_pad: &[usize],
        radius: &[usize],
    ) -> Result<Self> {
        let mut field = Self::new(dim, lengths, low_pad, high_pad, radius)?;
        if samples.len() != field.cell_count() {
            return Err(EntropyError::SampleCountMismatch {
                got: samples.len(),
                expected: field.cell_count(),
            });
        }
        for (cell, &v) in samples.iter().enumerate() {
            let idx = field.padded_index_of_cell(cell);
            field.data[idx] = v;
        }
        Ok(field)
    }

    /// Create a field from a host-supplied full padded buffer.
    ///
    /// Used when the caller's halo exchange has already filled the padding
    /// with duplicated neighbor-block values.
    pub fn from_padded(
        data: Vec<T>,
        dim: usize,
        lengths: &[usize],
        low_pad: &[usize],
        high_pad: &[usize],
        radius: &[usize],
    ) -> Result<Self> {
        let mut field = Self::new(dim, lengths, low_pad, high_pad, radius)?;
        if data.len() != field.data.len() {
            return Err(EntropyError::SampleCountMismatch {
                got: data.len(),
                expected: field.data.len(),
            });
        }
        field.data = data;
        Ok(field)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// True (unpadded) per-axis lengths; unused axes are 1.
    pub fn lengths(&self) -> &[usize; MAX_BLOCK_DIM] {
        &self.lengths
    }

    pub fn radius(&self) -> &[usize; MAX_BLOCK_DIM] {
        &self.radius
    }

    /// Per-axis lengths of the padded buffer.
    pub fn padded_lengths(&self) -> [usize; MAX_BLOCK_DIM] {
        let mut out = [1; MAX_BLOCK_DIM];
        for d in 0..MAX_BLOCK_DIM {
            out[d] = self.lengths[d] + self.low_pad[d] + self.high_pad[d];
        }
        out
    }

    /// Interior cells (excluding padding).
    pub fn cell_count(&self) -> usize {
        self.lengths.iter().product()
    }

    /// All cells of the padded buffer.
    pub fn padded_cell_count(&self) -> usize {
        self.data.len()
    }

    /// The flat contiguous padded buffer, in the layout the external dump
    /// format expects.
    pub fn data_full(&self) -> &[T] {
        &self.data
    }

    /// Interior cell value by row-major cell index.
    pub fn get(&self, cell: usize) -> T {
        self.data[self.padded_index_of_cell(cell)]
    }

    /// Set an interior cell value by row-major cell index.
    pub fn set(&mut self, cell: usize, value: T) {
        let idx = self.padded_index_of_cell(cell);
        self.data[idx] = value;
    }

    /// Decompose an interior cell index into per-axis coordinates.
    fn cell_coords(&self, cell: usize) -> [usize; MAX_BLOCK_DIM] {
        debug_assert!(cell < self.cell_count());
        let mut coords = [0; MAX_BLOCK_DIM];
        let mut rest = cell;
        for d in 0..MAX_BLOCK_DIM {
            coords[d] = rest % self.lengths[d];
            rest /= self.lengths[d];
        }
        coords
    }

    /// Flat index into the padded buffer of a padded coordinate tuple.
    fn padded_index(&self, coords: [usize; MAX_BLOCK_DIM]) -> usize {
        let plen = self.padded_lengths();
        let mut idx = 0;
        let mut stride = 1;
        for d in 0..MAX_BLOCK_DIM {
            debug_assert!(coords[d] < plen[d]);
            idx += coords[d] * stride;
            stride *= plen[d];
        }
        idx
    }

    /// Flat padded-buffer index of an interior cell.
    pub fn padded_index_of_cell(&self, cell: usize) -> usize {
        let coords = self.cell_coords(cell);
        let mut padded = [0; MAX_BLOCK_DIM];
        for d in 0..MAX_BLOCK_DIM {
            padded[d] = coords[d] + self.low_pad[d];
        }
        self.padded_index(padded)
    }

    /// Flat padded-buffer indices of every interior cell, in cell order.
    pub fn interior_indices(&self) -> Vec<usize> {
        (0..self.cell_count())
            .map(|c| self.padded_index_of_cell(c))
            .collect()
    }

    /// Flat padded-buffer indices of the hyper-rectangular window of
    /// half-width `radius[d]` per axis around an interior cell.
    ///
    /// The window is clamped to the padded bounds, so boundary queries read
    /// the halo region; index arithmetic never leaves the buffer.
    pub fn window_indices(&self, cell: usize) -> Vec<usize> {
        let coords = self.cell_coords(cell);
        let plen = self.padded_lengths();

        let mut lo = [0usize; MAX_BLOCK_DIM];
        let mut hi = [0usize; MAX_BLOCK_DIM];
        let mut count = 1;
        for d in 0..MAX_BLOCK_DIM {
            let center = coords[d] + self.low_pad[d];
            lo[d] = center.saturating_sub(self.radius[d]);
            hi[d] = (center + self.radius[d]).min(plen[d] - 1);
            count *= hi[d] - lo[d] + 1;
        }

        let mut out = Vec::with_capacity(count);
        let mut cursor = lo;
        loop {
            out.push(self.padded_index(cursor));
            // Odometer over the window, axis 0 fastest.
            let mut d = 0;
            loop {
                if cursor[d] < hi[d] {
                    cursor[d] += 1;
                    break;
                }
                cursor[d] = lo[d];
                d += 1;
                if d == MAX_BLOCK_DIM {
                    return out;
                }
            }
        }
    }

    /// Values inside the neighborhood window of an interior cell.
    pub fn neighbors_of(&self, cell: usize) -> Vec<T> {
        self.window_indices(cell)
            .into_iter()
            .map(|i| self.data[i])
            .collect()
    }

    /// Interior values in row-major cell order.
    pub fn interior_values(&self) -> Vec<T> {
        (0..self.cell_count()).map(|c| self.get(c)).collect()
    }

    /// Borrow the padded buffer as an `ndarray` view, shaped slowest axis
    /// first over the declared dims (standard C order).
    pub fn as_ndarray(&self) -> ArrayViewD<'_, T> {
        let plen = self.padded_lengths();
        let shape: Vec<usize> = (0..self.dim).rev().map(|d| plen[d]).collect();
        ArrayViewD::from_shape(IxDyn(&shape), &self.data)
            .expect("padded buffer length matches its dimension vector")
    }
}
