//! Field Module: The Random-Field Data Model
//!
//! Represents distributed simulation data without copying it:
//!
//! - [`StridedView`] aliases host arrays through a (base, stride) pair,
//!   borrowed read-only and validated against the buffer at construction.
//! - [`DataComponent`] is one named scalar channel on a block, with an
//!   optionally declared value range.
//! - [`Block`] is one rectangular sub-domain: dimensionality, per-axis
//!   lengths, an analysis extent, rectilinear axis coordinates, and the
//!   components defined on it.
//! - [`RandomVariable`] derives a per-cell scalar (or orientation) from a
//!   feature vector of components.
//! - [`RandomField`] is the per-process session driving the in-situ call
//!   sequence over all of the above.
//! - [`RegularField`] is the padded dense container the entropy engine
//!   sweeps, with halo-backed neighborhood windows.
//!
//! Everything here is single-threaded per session; a simulation rank owns
//! one session and drives it serially between solver steps.

mod block;
mod random_field;
mod regular;
mod view;

pub use block::{Block, Geometry, MAX_BLOCK_DIM};
pub use random_field::{RandomField, RandomVariable, Samples};
pub use regular::RegularField;
pub use view::{DataComponent, StridedView};
