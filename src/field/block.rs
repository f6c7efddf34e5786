//! Blocks: rectangular sub-domains of the simulation grid.
//!
//! A distributed simulation decomposes its domain into blocks, one or more
//! per process. A block records its dimensionality, per-axis lengths, an
//! analysis extent (the sub-region entropy is computed over), the geometric
//! coordinates of its axes, and the set of data components defined on it.
//!
//! Blocks are laid out row-major with axis 0 fastest; a cell's linear index
//! is the one the host uses when it addresses the same cell through a
//! strided source array.

use crate::error::{EntropyError, Result};
use crate::field::view::{DataComponent, StridedView};

/// Maximal dimensionality of a block. Four axes (three spatial plus time)
/// are sufficient for most scientific data; the time axis must currently
/// have length 1.
pub const MAX_BLOCK_DIM: usize = 4;

/// Geometry of a block, tagged by grid kind.
///
/// Rectilinear grids (per-axis coordinate arrays, possibly non-uniform) are
/// the sole implemented case. The coordinates are diagnostic only; entropy
/// math on a regular grid does not consult them.
#[derive(Debug, Clone)]
pub enum Geometry<'a> {
    Rectilinear {
        axes: [Option<StridedView<'a>>; MAX_BLOCK_DIM],
    },
}

impl Default for Geometry<'_> {
    fn default() -> Self {
        Geometry::Rectilinear {
            axes: [None; MAX_BLOCK_DIM],
        }
    }
}

/// One rectangular sub-domain of the simulation grid.
#[derive(Debug, Clone)]
pub struct Block<'a> {
    /// Declared dimensionality, 1..=MAX_BLOCK_DIM.
    dim: usize,
    /// Per-axis lengths; unused axes are fixed at 1.
    lengths: [usize; MAX_BLOCK_DIM],
    /// Analysis extent, inclusive lower cell per axis.
    extent_low: [usize; MAX_BLOCK_DIM],
    /// Analysis extent, inclusive upper cell per axis.
    extent_up: [usize; MAX_BLOCK_DIM],
    geometry: Geometry<'a>,
    components: Vec<DataComponent<'a>>,
}

impl<'a> Block<'a> {
    /// Create a 1x1x1x1 block with `n_components` unbound data components.
    pub fn new(n_components: usize) -> Result<Self> {
        if n_components == 0 {
            return Err(EntropyError::InvalidComponentCount {
                count: n_components,
            });
        }
        Ok(Self {
            dim: 1,
            lengths: [1; MAX_BLOCK_DIM],
            extent_low: [0; MAX_BLOCK_DIM],
            extent_up: [0; MAX_BLOCK_DIM],
            geometry: Geometry::default(),
            components: vec![DataComponent::default(); n_components],
        })
    }

    /// Set the block's dimensionality and per-axis lengths.
    ///
    /// Every declared length must be at least 1; axes beyond the declared
    /// dimensionality default to length 1. The analysis extent is reset to
    /// the full block. Validation happens before any state is touched, so a
    /// rejected size leaves the block (and its buffers) unchanged.
    pub fn set_size(&mut self, dim: usize, lengths: &[usize]) -> Result<()> {
        if dim == 0 || dim > MAX_BLOCK_DIM || lengths.len() < dim {
            return Err(EntropyError::InvalidDimension { dim });
        }
        for (d, &length) in lengths.iter().enumerate().take(dim) {
            if length < 1 {
                return Err(EntropyError::InvalidDimLength { dim: d, length });
            }
        }
        self.dim = dim;
        for d in 0..MAX_BLOCK_DIM {
            let length = if d < dim { lengths[d] } else { 1 };
            self.lengths[d] = length;
            self.extent_low[d] = 0;
            self.extent_up[d] = length - 1;
        }
        Ok(())
    }

    /// Restrict the analysis region to a sub-range of cells per axis.
    ///
    /// Entropy is only computed within this region. Bounds are inclusive
    /// and in cell-index units.
    pub fn set_extent(&mut self, low: &[usize], up: &[usize]) -> Result<()> {
        let n = self.dim.min(low.len()).min(up.len());
        for d in 0..n {
            if low[d] > up[d] || up[d] >= self.lengths[d] {
                return Err(EntropyError::InvalidExtent {
                    dim: d,
                    low: low[d],
                    up: up[d],
                    length: self.lengths[d],
                });
            }
        }
        for d in 0..n {
            self.extent_low[d] = low[d];
            self.extent_up[d] = up[d];
        }
        Ok(())
    }

    /// Attach a (possibly non-uniform) coordinate axis for one dim.
    ///
    /// Used for geometry diagnostics only; dumping the coordinates to disk
    /// is the host's job.
    pub fn set_dim_coord(&mut self, dim_id: usize, view: StridedView<'a>) -> Result<()> {
        if dim_id >= MAX_BLOCK_DIM {
            return Err(EntropyError::InvalidDimension { dim: dim_id });
        }
        match &mut self.geometry {
            Geometry::Rectilinear { axes } => axes[dim_id] = Some(view),
        }
        Ok(())
    }

    /// Collect the coordinates along one axis for the host's geometry dump.
    pub fn axis_coords(&self, dim_id: usize) -> Result<Vec<f64>> {
        if dim_id >= MAX_BLOCK_DIM {
            return Err(EntropyError::InvalidDimension { dim: dim_id });
        }
        let view = match &self.geometry {
            Geometry::Rectilinear { axes } => axes[dim_id].as_ref(),
        };
        let view = view.ok_or(EntropyError::UnboundAxis { dim: dim_id })?;
        let n = self.lengths[dim_id];
        if !view.covers(n) {
            return Err(EntropyError::SourceTooShort {
                len: view.len(),
                cells: n,
            });
        }
        Ok((0..n).map(|i| view.value_at(i)).collect())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn lengths(&self) -> &[usize; MAX_BLOCK_DIM] {
        &self.lengths
    }

    pub fn extent_low(&self) -> &[usize; MAX_BLOCK_DIM] {
        &self.extent_low
    }

    pub fn extent_up(&self) -> &[usize; MAX_BLOCK_DIM] {
        &self.extent_up
    }

    /// Total cells in the block (all axes, full lengths).
    pub fn cell_count(&self) -> usize {
        self.lengths.iter().product()
    }

    /// Per-axis lengths of the analysis extent; unused axes are 1.
    pub fn extent_lengths(&self) -> [usize; MAX_BLOCK_DIM] {
        let mut out = [1; MAX_BLOCK_DIM];
        for d in 0..MAX_BLOCK_DIM {
            out[d] = self.extent_up[d] - self.extent_low[d] + 1;
        }
        out
    }

    /// Cells inside the analysis extent.
    pub fn extent_cell_count(&self) -> usize {
        self.extent_lengths().iter().product()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, index: usize) -> Result<&DataComponent<'a>> {
        self.components
            .get(index)
            .ok_or(EntropyError::FeatureIndexOutOfRange {
                index,
                count: self.components.len(),
            })
    }

    pub fn component_mut(&mut self, index: usize) -> Result<&mut DataComponent<'a>> {
        let count = self.components.len();
        self.components
            .get_mut(index)
            .ok_or(EntropyError::FeatureIndexOutOfRange { index, count })
    }

    /// The bound source view of one component, or the unbound-source error.
    pub fn source_of(&self, index: usize) -> Result<&StridedView<'a>> {
        self.component(index)?
            .source()
            .ok_or(EntropyError::UnboundSource { component: index })
    }

    /// Linear cell index of a coordinate tuple, axis 0 fastest.
    pub fn linear_index(&self, coords: [usize; MAX_BLOCK_DIM]) -> usize {
        let mut idx = 0;
        let mut stride = 1;
        for d in 0..MAX_BLOCK_DIM {
            idx += coords[d] * stride;
            stride *= self.lengths[d];
        }
        idx
    }

    /// Reject blocks whose time axis is longer than 1.
    pub fn check_time_axis(&self) -> Result<()> {
        if self.lengths[MAX_BLOCK_DIM - 1] != 1 {
            return Err(EntropyError::Unsupported("4-D blocks"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_size() {
        let mut block = Block::new(1).unwrap();
        block.set_size(3, &[4, 5, 6]).unwrap();
        assert_eq!(block.dim(), 3);
        assert_eq!(block.lengths(), &[4, 5, 6, 1]);
        assert_eq!(block.cell_count(), 120);
        // Extent defaults to the full block.
        assert_eq!(block.extent_low(), &[0, 0, 0, 0]);
        assert_eq!(block.extent_up(), &[3, 4, 5, 0]);
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut block = Block::new(1).unwrap();
        let err = block.set_size(2, &[4, 0]);
        assert!(matches!(
            err,
            Err(EntropyError::InvalidDimLength { dim: 1, length: 0 })
        ));
        // Rejected sizes leave the block untouched.
        assert_eq!(block.cell_count(), 1);
    }

    #[test]
    fn test_invalid_dimensionality_rejected() {
        let mut block = Block::new(1).unwrap();
        assert!(block.set_size(0, &[]).is_err());
        assert!(block.set_size(5, &[1, 1, 1, 1, 1]).is_err());
    }

    #[test]
    fn test_extent_restricts_cells() {
        let mut block = Block::new(1).unwrap();
        block.set_size(2, &[8, 8]).unwrap();
        block.set_extent(&[2, 2], &[5, 5]).unwrap();
        assert_eq!(block.extent_lengths(), [4, 4, 1, 1]);
        assert_eq!(block.extent_cell_count(), 16);
    }

    #[test]
    fn test_extent_validation() {
        let mut block = Block::new(1).unwrap();
        block.set_size(2, &[8, 8]).unwrap();
        assert!(block.set_extent(&[5, 0], &[2, 7]).is_err());
        assert!(block.set_extent(&[0, 0], &[8, 7]).is_err());
    }

    #[test]
    fn test_linear_index_axis0_fastest() {
        let mut block = Block::new(1).unwrap();
        block.set_size(3, &[4, 3, 2]).unwrap();
        assert_eq!(block.linear_index([0, 0, 0, 0]), 0);
        assert_eq!(block.linear_index([1, 0, 0, 0]), 1);
        assert_eq!(block.linear_index([0, 1, 0, 0]), 4);
        assert_eq!(block.linear_index([0, 0, 1, 0]), 12);
        assert_eq!(block.linear_index([3, 2, 1, 0]), 23);
    }

    #[test]
    fn test_time_axis_rejected() {
        let mut block = Block::new(1).unwrap();
        block.set_size(4, &[4, 4, 4, 2]).unwrap();
        assert!(matches!(
            block.check_time_axis(),
            Err(EntropyError::Unsupported(_))
        ));
    }

    #[test]
    fn test_axis_coords() {
        let coords = vec![0.0, 0.5, 1.5, 4.0];
        let mut block = Block::new(1).unwrap();
        block.set_size(1, &[4]).unwrap();
        block
            .set_dim_coord(0, StridedView::contiguous(&coords))
            .unwrap();
        let xs = block.axis_coords(0).unwrap();
        assert_eq!(xs.len(), 4);
        assert!((xs[2] - 1.5).abs() < 1e-12);
        // Axis 1 has no coordinates bound.
        assert!(matches!(
            block.axis_coords(1),
            Err(EntropyError::UnboundAxis { dim: 1 })
        ));
    }

    #[test]
    fn test_unbound_component_read() {
        let block = Block::new(2).unwrap();
        assert!(matches!(
            block.source_of(1),
            Err(EntropyError::UnboundSource { component: 1 })
        ));
        assert!(matches!(
            block.source_of(2),
            Err(EntropyError::FeatureIndexOutOfRange { index: 2, count: 2 })
        ));
    }
}
