use thiserror::Error;

/// Errors raised while constructing or querying a lookup table.
///
/// All variants except [`TableError::Degenerate`] surface at construction.
/// In-range and out-of-range lookups never fail: queries beyond the sampled
/// range degrade to linear extrapolation of the boundary segment.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be read.
    #[error("failed to read table file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A line of the table file did not parse as numeric columns.
    #[error("table file `{path}`, line {line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    /// An axis is not strictly increasing in transformed space.
    #[error("table axis `{axis}` must be strictly increasing")]
    NonMonotonic { axis: &'static str },

    /// The table spans a zero or negative effective range, so an inverse
    /// lookup has no solution.
    #[error("table has a degenerate {what} range; reverse lookup is not defined")]
    Degenerate { what: &'static str },

    /// The sample arrays have inconsistent sizes.
    #[error("table shape mismatch: {reason}")]
    Shape { reason: String },

    /// A transform name in the configuration is not recognized.
    #[error("unknown transform `{0}` (expected `none`, `ln`, or `log10`)")]
    UnknownTransform(String),
}

/// Errors raised by the thermodynamic closure layer.
///
/// Configuration errors surface at construction and are never masked with
/// defaults; calculation errors indicate a logic or configuration defect in
/// an otherwise deterministic evaluation and are reported immediately.
#[derive(Debug, Error)]
pub enum ThermoError {
    /// A material constant is missing, non-physical, or inconsistent.
    #[error("invalid material constant `{name}`: {reason}")]
    InvalidConstant {
        name: &'static str,
        reason: String,
    },

    /// A tabulated closure failed to construct or invert.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A numerical evaluation failed, such as a non-converging inversion.
    #[error("calculation error: {0}")]
    Calculation(String),
}
