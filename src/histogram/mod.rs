//! Histogram Module: Bin-Index Mapping and Counting
//!
//! Probability mass functions are estimated by counting samples into a
//! fixed number of bins. The module separates the two concerns:
//!
//! - **Bin-index mapping** ([`BinMapping`]): how one sample becomes one
//!   integer bin id. Scalar values map linearly over a value range with
//!   clamping at the boundaries; orientation angles map linearly over
//!   (-π, π]; 3-vectors map to the nearest patch of an injected
//!   unit-sphere discretization.
//!
//! - **Counting** ([`Histogram`]): bin ids become counts and a total,
//!   from which the entropy routines derive probabilities.
//!
//! The sphere patch table is an external resource loaded once per process
//! and shared read-only; `"!"` selects the built-in deterministic layout.

mod builder;
mod sphere;

pub use builder::{
    BinMapping, Histogram, HistogramBuilder, OrientationBinning, ScalarBinning, SphereBinning,
};
pub use sphere::{SpherePatchTable, DEFAULT_PATCH_TOKEN};
