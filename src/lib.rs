//! # field-entropy
//!
//! In-situ information-theoretic analysis of distributed simulation fields.
//!
//! ## Purpose
//!
//! Large numerical simulations cannot afford to write full time steps to
//! disk just to find out where the interesting physics is. This crate
//! estimates Shannon entropy — globally per block and locally per grid
//! cell — over the simulation's own memory while it runs, so a solver can
//! identify regions of high informational complexity in place.
//!
//! ## Methodology
//!
//! 1. **Zero-copy data model**: the host binds its arrays through strided,
//!    borrowed, bounds-checked views; blocks describe the distributed
//!    decomposition and the analysis extent within each sub-domain.
//!
//! 2. **Random variables**: a per-cell scalar is derived from a feature
//!    vector of data components — the raw value, the Euclidean magnitude,
//!    the 2-D orientation angle, or the raw 3-vector for joint
//!    orientation statistics.
//!
//! 3. **Histogram probability estimation**: samples map to integer bin
//!    ids (linear scalar bins, angular bins over (-π, π], or patches of a
//!    unit-sphere discretization) and entropies derive from bin
//!    frequencies. A kernel-density estimator is available for scalar
//!    exploratory use.
//!
//! 4. **Global and local entropy**: one value per block, or one value per
//!    cell over its padded neighborhood window — the latter yields a
//!    spatial map of informational complexity for downstream
//!    visualization.
//!
//! ## Scope
//!
//! Each process analyzes its own blocks; combining per-block results
//! across MPI ranks, dumping buffers to disk, and the Fortran/C binding
//! layer are the host's responsibility. Only row-major regular grids are
//! supported, and the time axis of a block must have length 1.

pub mod entropy;
pub mod error;
pub mod field;
pub mod histogram;

// Re-exports from field
pub use field::{
    Block,
    DataComponent,
    Geometry,
    RandomField,
    RandomVariable,
    RegularField,
    Samples,
    StridedView,
    MAX_BLOCK_DIM,
};

// Re-exports from histogram
pub use histogram::{
    BinMapping,
    Histogram,
    HistogramBuilder,
    OrientationBinning,
    ScalarBinning,
    SphereBinning,
    SpherePatchTable,
    DEFAULT_PATCH_TOKEN,
};

// Re-exports from entropy
pub use entropy::{
    entropy_of_bin_ids,
    histogram_entropy,
    kde_entropy,
    AnalysisConfig,
    GlobalEntropyComputer,
    LocalEntropyComputer,
    DEFAULT_BIN_COUNT,
};

// Re-exports from error
pub use error::{EntropyError, Result};
