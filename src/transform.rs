//! Axis and value transforms for lookup tables.

use std::str::FromStr;

use serde::Deserialize;

use crate::TableError;

/// Monotonic transform applied to a table axis or its values.
///
/// Interpolation happens in transformed space and results are reported back
/// in real space, so a logarithmic axis turns geometrically spaced samples
/// into a uniform grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// No transform.
    #[default]
    #[serde(alias = "none")]
    Identity,

    /// Natural logarithm.
    Ln,

    /// Base-10 logarithm.
    Log10,
}

impl Transform {
    /// Maps a real-space value into transformed space.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Ln => x.ln(),
            Self::Log10 => x.log10(),
        }
    }

    /// Maps a transformed value back into real space.
    #[must_use]
    pub fn invert(self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Ln => x.exp(),
            Self::Log10 => 10f64.powf(x),
        }
    }
}

impl FromStr for Transform {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "identity" => Ok(Self::Identity),
            "ln" | "log" => Ok(Self::Ln),
            "log10" => Ok(Self::Log10),
            other => Err(TableError::UnknownTransform(other.to_string())),
        }
    }
}
