//! Error types for field configuration and entropy computation.
//!
//! Configuration problems are detected eagerly, before any buffer is
//! allocated or any numeric sweep starts. Once a configuration is valid the
//! numeric pipeline itself cannot fail; degenerate distributions
//! (single-bin histograms, zero-variance sample sets) are not errors but
//! produce a defined sentinel of zero entropy with normalization skipped.

use crate::field::MAX_BLOCK_DIM;

/// Errors raised while configuring fields or driving the entropy engine.
#[derive(Debug, thiserror::Error)]
pub enum EntropyError {
    #[error("invalid block dimensionality {dim}: expected 1..={max}", max = MAX_BLOCK_DIM)]
    InvalidDimension { dim: usize },
    #[error("invalid length {length} for dim {dim}")]
    InvalidDimLength { dim: usize, length: usize },
    #[error("invalid extent [{low}, {up}] for dim {dim} of length {length}")]
    InvalidExtent {
        dim: usize,
        low: usize,
        up: usize,
        length: usize,
    },
    #[error("invalid block count {count}: at least one block is required")]
    InvalidBlockCount { count: usize },
    #[error("invalid component count {count}: at least one data component is required")]
    InvalidComponentCount { count: usize },
    #[error("invalid feature length {length}: expected 1, 2, or 3")]
    InvalidFeatureLength { length: usize },
    #[error("feature index {index} out of range for {count} data components")]
    FeatureIndexOutOfRange { index: usize, count: usize },
    #[error("vector orientation is only supported for feature vectors of length 2 or 3, got {length}")]
    OrientationUnsupported { length: usize },
    #[error("invalid bin count {0}")]
    InvalidBinCount(usize),
    #[error("bin id {id} out of range for {bin_count} bins")]
    BinIdOutOfRange { id: usize, bin_count: usize },
    #[error("invalid value range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[error("strided view (base {base}, stride {stride}, len {len}) exceeds buffer of {buffer_len} elements")]
    ViewOutOfBounds {
        base: usize,
        stride: isize,
        len: usize,
        buffer_len: usize,
    },
    #[error("data source covers {len} elements but the block has {cells} cells")]
    SourceTooShort { len: usize, cells: usize },
    #[error("sample buffer holds {got} values but the field has {expected} cells")]
    SampleCountMismatch { got: usize, expected: usize },
    #[error("empty sample set")]
    EmptySampleSet,
    #[error("data component {component} has no bound source array")]
    UnboundSource { component: usize },
    #[error("no coordinate axis bound for dim {dim}")]
    UnboundAxis { dim: usize },
    #[error("no block is bound")]
    UnboundBlock,
    #[error("no data component is bound")]
    UnboundComponent,
    #[error("no random variable is bound")]
    UnboundVariable,
    #[error("block index {index} out of range for {count} blocks")]
    BlockIndexOutOfRange { index: usize, count: usize },
    #[error("random variable {index} out of range for {count} variables")]
    VariableIndexOutOfRange { index: usize, count: usize },
    #[error("no sphere patch table has been injected")]
    MissingSphereTable,
    #[error("histogram bin field has not been computed")]
    BinFieldNotComputed,
    #[error("not supported yet: {0}")]
    Unsupported(&'static str),
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, EntropyError>;
