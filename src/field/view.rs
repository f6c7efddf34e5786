//! Strided views over host-owned arrays.
//!
//! A simulation hands its arrays to the analysis without copying. The host
//! memory may interleave several physical quantities (array-of-structures
//! layouts, Fortran slices), so a channel is addressed by a
//! (base offset, stride) pair into a flat buffer. The view borrows the
//! buffer read-only; the borrow checker scopes its validity to the host
//! buffer's lifetime, and the full footprint is validated at construction
//! so that element access never leaves the buffer.

use crate::error::{EntropyError, Result};

/// A non-owning, read-only view over a strided sequence of `f64` values.
///
/// Element `i` of the view resolves to `data[base + i * stride]` for
/// `0 <= i < len`. Negative strides are legal as long as every addressable
/// element stays inside the buffer.
#[derive(Debug, Clone, Copy)]
pub struct StridedView<'a> {
    data: &'a [f64],
    base: usize,
    stride: isize,
    len: usize,
}

impl<'a> StridedView<'a> {
    /// Create a view after validating its full footprint against the buffer.
    pub fn new(data: &'a [f64], base: usize, stride: isize, len: usize) -> Result<Self> {
        if len > 0 {
            let first = base as isize;
            let last = first + (len as isize - 1) * stride;
            let (lo, hi) = if stride >= 0 { (first, last) } else { (last, first) };
            if lo < 0 || hi >= data.len() as isize {
                return Err(EntropyError::ViewOutOfBounds {
                    base,
                    stride,
                    len,
                    buffer_len: data.len(),
                });
            }
        }
        Ok(Self {
            data,
            base,
            stride,
            len,
        })
    }

    /// View an entire slice with unit stride.
    pub fn contiguous(data: &'a [f64]) -> Self {
        Self {
            data,
            base: 0,
            stride: 1,
            len: data.len(),
        }
    }

    /// Number of addressable elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the view can serve a block of `cells` elements.
    pub fn covers(&self, cells: usize) -> bool {
        cells <= self.len
    }

    /// Element `i` of the view.
    ///
    /// The index must satisfy `i < len()`; callers iterate over cell counts
    /// they have already validated against [`StridedView::covers`].
    #[inline]
    pub fn value_at(&self, i: usize) -> f64 {
        debug_assert!(i < self.len);
        let idx = self.base as isize + i as isize * self.stride;
        self.data[idx as usize]
    }

    /// Observed (min, max) over all addressable elements.
    ///
    /// Returns `None` for an empty view.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        if self.len == 0 {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for i in 0..self.len {
            let v = self.value_at(i);
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Collect all addressable elements into an owned vector.
    pub fn collect(&self) -> Vec<f64> {
        (0..self.len).map(|i| self.value_at(i)).collect()
    }
}

/// One named scalar channel of simulation data on a block.
///
/// Wraps an optionally bound [`StridedView`] plus a declared value range.
/// The component starts unbound; reading it before the host has supplied a
/// source array is reported as an unbound-source condition by the owning
/// block, never as a silent garbage read.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataComponent<'a> {
    source: Option<StridedView<'a>>,
    range: Option<(f64, f64)>,
}

impl<'a> DataComponent<'a> {
    /// Bind (or rebind) the host source array for this component.
    pub fn bind_source(&mut self, view: StridedView<'a>) {
        self.source = Some(view);
    }

    /// Declare the value range used for scalar binning.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<()> {
        if !(min <= max) {
            return Err(EntropyError::InvalidRange { min, max });
        }
        self.range = Some((min, max));
        Ok(())
    }

    /// The bound source view, if any.
    pub fn source(&self) -> Option<&StridedView<'a>> {
        self.source.as_ref()
    }

    /// The declared value range, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }
}
