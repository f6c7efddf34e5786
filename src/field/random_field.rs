//! Random fields: the in-situ analysis session.
//!
//! A simulation process owns one `RandomField` per analysis context. The
//! field owns the process's blocks and random-variable definitions and
//! tracks which block, data component, and random variable the host's call
//! sequence is currently configuring. The procedural hosts this mirrors
//! (Fortran or C through a thin binding layer) cannot pass composite
//! objects across the language boundary, so configuration is a cursor
//! protocol: bind a thing, then operate on whatever is bound.
//!
//! The cursor lives in plain fields of the session object, never in
//! process-wide globals; independent sessions coexist and are testable in
//! isolation. The protocol is inherently serial: concurrent calls into one
//! session must be externally serialized.

use crate::entropy::{kde_entropy, AnalysisConfig, GlobalEntropyComputer, LocalEntropyComputer};
use crate::error::{EntropyError, Result};
use crate::field::block::{Block, MAX_BLOCK_DIM};
use crate::field::regular::RegularField;
use crate::field::view::StridedView;
use crate::histogram::{OrientationBinning, ScalarBinning, SphereBinning, SpherePatchTable};

/// A derived scalar (or orientation) random variable over a feature vector
/// of data components.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomVariable {
    /// Indices of the data components forming the feature vector.
    feature: Vec<usize>,
    /// Use the feature vector's orientation instead of its magnitude.
    use_orientation: bool,
}

impl RandomVariable {
    fn unconfigured() -> Self {
        Self {
            feature: Vec::new(),
            use_orientation: false,
        }
    }

    fn configure(
        &mut self,
        indices: &[usize],
        use_orientation: bool,
        component_count: usize,
    ) -> Result<()> {
        if indices.is_empty() || indices.len() > 3 {
            return Err(EntropyError::InvalidFeatureLength {
                length: indices.len(),
            });
        }
        if use_orientation && indices.len() < 2 {
            return Err(EntropyError::OrientationUnsupported {
                length: indices.len(),
            });
        }
        for &index in indices {
            if index >= component_count {
                return Err(EntropyError::FeatureIndexOutOfRange {
                    index,
                    count: component_count,
                });
            }
        }
        self.feature = indices.to_vec();
        self.use_orientation = use_orientation;
        Ok(())
    }

    pub fn feature(&self) -> &[usize] {
        &self.feature
    }

    pub fn uses_orientation(&self) -> bool {
        self.use_orientation
    }

    /// Whether evaluation retains raw 3-vectors instead of reducing to a
    /// scalar (length-3 feature with orientation enabled).
    pub fn is_vector_valued(&self) -> bool {
        self.use_orientation && self.feature.len() == 3
    }
}

/// Dense per-cell samples of a random variable over a block's analysis
/// extent, in row-major order (axis 0 fastest).
#[derive(Debug, Clone)]
pub enum Samples {
    Scalar(Vec<f64>),
    Vector(Vec<[f64; 3]>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::Scalar(v) => v.len(),
            Samples::Vector(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The per-process analysis session: blocks, random variables, and the
/// bound cursor of the host's configuration sequence.
#[derive(Debug)]
pub struct RandomField<'a> {
    blocks: Vec<Block<'a>>,
    variables: Vec<RandomVariable>,
    sphere_table: Option<SpherePatchTable>,
    component_count: usize,
    bound_block: Option<usize>,
    bound_component: Option<usize>,
    bound_variable: Option<usize>,
}

impl<'a> RandomField<'a> {
    /// Create a session holding `n_blocks` blocks, each with
    /// `n_components` (initially unbound) data components.
    pub fn new(n_blocks: usize, n_components: usize) -> Result<Self> {
        if n_blocks == 0 {
            return Err(EntropyError::InvalidBlockCount { count: n_blocks });
        }
        let mut blocks = Vec::with_capacity(n_blocks);
        for _ in 0..n_blocks {
            blocks.push(Block::new(n_components)?);
        }
        Ok(Self {
            blocks,
            variables: Vec::new(),
            sphere_table: None,
            component_count: n_components,
            bound_block: None,
            bound_component: None,
            bound_variable: None,
        })
    }

    /// Inject the unit-sphere patch table used for vector-valued
    /// histograms. Loaded once per process and shared read-only.
    pub fn set_sphere_table(&mut self, table: SpherePatchTable) {
        self.sphere_table = Some(table);
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    // ----- cursor protocol ------------------------------------------------

    /// Bind a block; subsequent block-level operations act on it.
    pub fn bind_block(&mut self, index: usize) -> Result<()> {
        if index >= self.blocks.len() {
            return Err(EntropyError::BlockIndexOutOfRange {
                index,
                count: self.blocks.len(),
            });
        }
        self.bound_block = Some(index);
        Ok(())
    }

    pub fn bound_block_index(&self) -> Option<usize> {
        self.bound_block
    }

    pub fn bound_block(&self) -> Result<&Block<'a>> {
        let index = self.bound_block.ok_or(EntropyError::UnboundBlock)?;
        Ok(&self.blocks[index])
    }

    pub fn bound_block_mut(&mut self) -> Result<&mut Block<'a>> {
        let index = self.bound_block.ok_or(EntropyError::UnboundBlock)?;
        Ok(&mut self.blocks[index])
    }

    /// Bind a data component of the bound block.
    pub fn bind_data_component(&mut self, index: usize) -> Result<()> {
        self.bound_block()?;
        if index >= self.component_count {
            return Err(EntropyError::FeatureIndexOutOfRange {
                index,
                count: self.component_count,
            });
        }
        self.bound_component = Some(index);
        Ok(())
    }

    /// Bind (or rebind) the host source array of the bound component.
    pub fn set_data_source(&mut self, view: StridedView<'a>) -> Result<()> {
        let component = self.bound_component.ok_or(EntropyError::UnboundComponent)?;
        self.bound_block_mut()?
            .component_mut(component)?
            .bind_source(view);
        Ok(())
    }

    /// Declare the value range of the bound component.
    pub fn set_data_range(&mut self, min: f64, max: f64) -> Result<()> {
        let component = self.bound_component.ok_or(EntropyError::UnboundComponent)?;
        self.bound_block_mut()?
            .component_mut(component)?
            .set_range(min, max)
    }

    /// Append a new (unconfigured) random variable and return its id.
    pub fn add_random_variable(&mut self) -> usize {
        self.variables.push(RandomVariable::unconfigured());
        self.variables.len() - 1
    }

    /// Bind a random variable; `set_feature_vector` acts on it.
    pub fn bind_random_variable(&mut self, index: usize) -> Result<()> {
        if index >= self.variables.len() {
            return Err(EntropyError::VariableIndexOutOfRange {
                index,
                count: self.variables.len(),
            });
        }
        self.bound_variable = Some(index);
        Ok(())
    }

    /// Configure the bound random variable's feature vector.
    pub fn set_feature_vector(&mut self, indices: &[usize], use_orientation: bool) -> Result<()> {
        let index = self.bound_variable.ok_or(EntropyError::UnboundVariable)?;
        let count = self.component_count;
        self.variables[index].configure(indices, use_orientation, count)
    }

    pub fn variable(&self, index: usize) -> Result<&RandomVariable> {
        self.variables
            .get(index)
            .ok_or(EntropyError::VariableIndexOutOfRange {
                index,
                count: self.variables.len(),
            })
    }

    // ----- evaluation -----------------------------------------------------

    /// Evaluate a random variable over every cell of the bound block's
    /// analysis extent.
    pub fn evaluate(&self, rv_id: usize) -> Result<Samples> {
        let block = self.bound_block()?;
        block.check_time_axis()?;
        let rv = self.variable(rv_id)?;
        let flen = rv.feature().len();
        if flen == 0 {
            return Err(EntropyError::InvalidFeatureLength { length: 0 });
        }

        let cells = block.cell_count();
        let mut sources = Vec::with_capacity(flen);
        for &f in rv.feature() {
            let source = block.source_of(f)?;
            if !source.covers(cells) {
                return Err(EntropyError::SourceTooShort {
                    len: source.len(),
                    cells,
                });
            }
            sources.push(*source);
        }

        let low = *block.extent_low();
        let up = *block.extent_up();
        let count = block.extent_cell_count();

        if rv.is_vector_valued() {
            let mut out = Vec::with_capacity(count);
            self.sweep_extent(block, low, up, |c| {
                out.push([
                    sources[0].value_at(c),
                    sources[1].value_at(c),
                    sources[2].value_at(c),
                ]);
            });
            log::debug!("evaluated variable {} as {} vector samples", rv_id, out.len());
            Ok(Samples::Vector(out))
        } else {
            let mut out = Vec::with_capacity(count);
            self.sweep_extent(block, low, up, |c| {
                let sample = if flen == 1 {
                    sources[0].value_at(c)
                } else if rv.uses_orientation() {
                    let v0 = sources[0].value_at(c);
                    let v1 = sources[1].value_at(c);
                    v1.atan2(v0)
                } else {
                    let mut sq = 0.0;
                    for source in &sources {
                        let v = source.value_at(c);
                        sq += v * v;
                    }
                    sq.sqrt()
                };
                out.push(sample);
            });
            log::debug!("evaluated variable {} as {} scalar samples", rv_id, out.len());
            Ok(Samples::Scalar(out))
        }
    }

    /// Row-major sweep (axis 0 fastest) over the extent, passing each
    /// cell's full-block linear index to `visit`.
    fn sweep_extent<F: FnMut(usize)>(
        &self,
        block: &Block<'a>,
        low: [usize; MAX_BLOCK_DIM],
        up: [usize; MAX_BLOCK_DIM],
        mut visit: F,
    ) {
        for t in low[3]..=up[3] {
            for z in low[2]..=up[2] {
                for y in low[1]..=up[1] {
                    for x in low[0]..=up[0] {
                        visit(block.linear_index([x, y, z, t]));
                    }
                }
            }
        }
    }

    // ----- entropy orchestration ------------------------------------------

    /// Aggregated Shannon entropy of the bound block under one random
    /// variable: a single value per (block, variable).
    pub fn global_entropy(&self, rv_id: usize, config: &AnalysisConfig) -> Result<f64> {
        let (dim, lengths) = self.extent_shape()?;
        let zeros = vec![0usize; dim];
        match self.evaluate(rv_id)? {
            Samples::Scalar(values) => {
                let field =
                    RegularField::from_samples(&values, dim, &lengths, &zeros, &zeros, &zeros)?;
                let mut computer = GlobalEntropyComputer::new(&field);
                self.bin_scalar_field(&mut computer, rv_id, config, &values)?;
                computer.compute_entropy(config.normalize)
            }
            Samples::Vector(values) => {
                let table = self
                    .sphere_table
                    .as_ref()
                    .ok_or(EntropyError::MissingSphereTable)?;
                let field =
                    RegularField::from_samples(&values, dim, &lengths, &zeros, &zeros, &zeros)?;
                let mut computer = GlobalEntropyComputer::new(&field);
                computer.compute_bin_field(&SphereBinning::new(table))?;
                computer.compute_entropy(config.normalize)
            }
        }
    }

    /// Per-cell Shannon entropy of the bound block over each cell's
    /// neighborhood window: a spatial map of informational complexity.
    ///
    /// `radius` gives the window half-width in cells per declared axis.
    pub fn local_entropy(
        &self,
        rv_id: usize,
        radius: &[usize],
        config: &AnalysisConfig,
    ) -> Result<RegularField<f64>> {
        let (dim, lengths) = self.extent_shape()?;
        if radius.len() < dim {
            return Err(EntropyError::InvalidDimension { dim });
        }
        let zeros = vec![0usize; dim];
        match self.evaluate(rv_id)? {
            Samples::Scalar(values) => {
                let field = RegularField::from_samples(
                    &values, dim, &lengths, &zeros, &zeros, radius,
                )?;
                let mut computer = LocalEntropyComputer::new(&field);
                let rv = self.variable(rv_id)?;
                if rv.uses_orientation() && rv.feature().len() == 2 {
                    computer.compute_bin_field(&OrientationBinning::new(config.bin_count)?)?;
                } else {
                    computer.compute_bin_field(&self.scalar_binning(rv_id, config, &values)?)?;
                }
                computer.compute_entropy_field(config.normalize)
            }
            Samples::Vector(values) => {
                let table = self
                    .sphere_table
                    .as_ref()
                    .ok_or(EntropyError::MissingSphereTable)?;
                let field = RegularField::from_samples(
                    &values, dim, &lengths, &zeros, &zeros, radius,
                )?;
                let mut computer = LocalEntropyComputer::new(&field);
                computer.compute_bin_field(&SphereBinning::new(table))?;
                computer.compute_entropy_field(config.normalize)
            }
        }
    }

    /// Kernel-density-based entropy of a scalar random variable over the
    /// bound block. Exploratory use only: O(n²) in the extent cell count.
    pub fn global_entropy_kde(&self, rv_id: usize, config: &AnalysisConfig) -> Result<f64> {
        match self.evaluate(rv_id)? {
            Samples::Scalar(values) => {
                kde_entropy(&values, config.kde_bandwidth, config.normalize)
            }
            Samples::Vector(_) => Err(EntropyError::Unsupported(
                "KDE entropy of vector-valued random variables",
            )),
        }
    }

    fn extent_shape(&self) -> Result<(usize, Vec<usize>)> {
        let block = self.bound_block()?;
        let dim = block.dim();
        let ext = block.extent_lengths();
        Ok((dim, ext[..dim].to_vec()))
    }

    fn bin_scalar_field(
        &self,
        computer: &mut GlobalEntropyComputer<'_, f64>,
        rv_id: usize,
        config: &AnalysisConfig,
        values: &[f64],
    ) -> Result<()> {
        let rv = self.variable(rv_id)?;
        if rv.uses_orientation() && rv.feature().len() == 2 {
            computer.compute_bin_field(&OrientationBinning::new(config.bin_count)?)
        } else {
            computer.compute_bin_field(&self.scalar_binning(rv_id, config, values)?)
        }
    }

    /// Scalar binning for a random variable: the declared range when the
    /// variable is a single component that has one, the observed sample
    /// range otherwise.
    fn scalar_binning(
        &self,
        rv_id: usize,
        config: &AnalysisConfig,
        values: &[f64],
    ) -> Result<ScalarBinning> {
        let rv = self.variable(rv_id)?;
        if rv.feature().len() == 1 {
            let block = self.bound_block()?;
            if let Some((min, max)) = block.component(rv.feature()[0])?.range() {
                return ScalarBinning::new(config.bin_count, min, max);
            }
        }
        ScalarBinning::from_samples(config.bin_count, values)
    }
}
