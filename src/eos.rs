//! Equation-of-state closures.
//!
//! Each closure is a stateless function object parameterized by material
//! constants fixed at construction. The concrete set is closed at build
//! time, so the closures sit behind the [`EquationOfState`] sum type
//! rather than a trait object; the solver-facing [`crate::model`] layer
//! dispatches through it once per cell.

mod cold_curve;
mod murnaghan;
mod tabulated;
mod tillotson;

use std::path::PathBuf;

use serde::Deserialize;

use crate::{ThermoError, table::GridSpec};

pub use murnaghan::{Murnaghan, MurnaghanParams};
pub use tabulated::Tabulated;
pub use tillotson::{Tillotson, TillotsonParams};

/// Standard-state pressure [Pa], the reference for ideal-gas entropy.
pub const P_STD: f64 = 101_325.0;

/// Floor applied to densities appearing in denominators, so expansion
/// states degrade smoothly instead of propagating infinities.
pub(crate) const RHO_FLOOR: f64 = 1.0e-10;

/// Closure selection read from configuration: a type name plus that
/// closure's required material constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EosConfig {
    Murnaghan(MurnaghanParams),
    Tillotson(TillotsonParams),
    Tabulated {
        /// Delimited text file of row-major pressure values.
        file: PathBuf,
        #[serde(flatten)]
        grid: GridSpec,
    },
}

/// A selected equation-of-state closure.
///
/// The evaluation contract is uniform across variants: scalar state in,
/// scalar property out, no mutation. The closures differ in which state
/// variables actually enter each relation — the solid Murnaghan form
/// ignores energy, the Mie–Grüneisen forms ignore temperature — so every
/// method takes the full `(ρ, e, T)` triple and each variant reads what it
/// needs.
#[derive(Debug, Clone)]
pub enum EquationOfState {
    Murnaghan(Murnaghan),
    Tillotson(Tillotson),
    Tabulated(Tabulated),
}

impl EquationOfState {
    /// Constructs the closure named by `config`.
    ///
    /// # Errors
    ///
    /// Fails fast on missing or non-physical material constants and on
    /// table construction errors; defaults are never substituted.
    pub fn from_config(config: &EosConfig) -> Result<Self, ThermoError> {
        match config {
            EosConfig::Murnaghan(params) => Ok(Self::Murnaghan(Murnaghan::new(*params)?)),
            EosConfig::Tillotson(params) => Ok(Self::Tillotson(Tillotson::new(*params)?)),
            EosConfig::Tabulated { file, grid } => {
                Ok(Self::Tabulated(Tabulated::from_file(file, grid)?))
            }
        }
    }

    /// Whether this is a solid closure, for which free-surface rarefaction
    /// evaluation is not meaningful.
    #[must_use]
    pub fn solid(&self) -> bool {
        match self {
            Self::Murnaghan(_) => Murnaghan::solid(),
            Self::Tillotson(_) => Tillotson::solid(),
            Self::Tabulated(_) => Tabulated::solid(),
        }
    }

    /// Pressure at the given state.
    #[must_use]
    pub fn pressure(&self, rho: f64, e: f64, t: f64) -> f64 {
        match self {
            Self::Murnaghan(eos) => eos.pressure(rho, t),
            Self::Tillotson(eos) => eos.pressure(rho, e),
            Self::Tabulated(eos) => eos.pressure(rho, e),
        }
    }

    /// Mie–Grüneisen coefficient (solid) or effective polytropic index.
    #[must_use]
    pub fn gamma(&self, rho: f64, e: f64, t: f64, cv: f64) -> f64 {
        match self {
            Self::Murnaghan(eos) => eos.gamma(rho, t, cv),
            Self::Tillotson(eos) => eos.gamma(rho, e),
            Self::Tabulated(eos) => eos.gamma(rho, e),
        }
    }

    /// Pressure derivative with respect to specific volume.
    #[must_use]
    pub fn dpdv(&self, rho: f64, e: f64, t: f64) -> f64 {
        match self {
            Self::Murnaghan(eos) => eos.dpdv(rho, t),
            Self::Tillotson(eos) => eos.dpdv(rho, e),
            Self::Tabulated(eos) => eos.dpdv(rho, e),
        }
    }

    /// Pressure derivative with respect to specific internal energy. The
    /// solid closure has no thermal pressure term, so its derivative is
    /// zero.
    #[must_use]
    pub fn dpde(&self, rho: f64, e: f64, _t: f64) -> f64 {
        match self {
            Self::Murnaghan(_) => 0.0,
            Self::Tillotson(eos) => eos.dpde(rho, e),
            Self::Tabulated(eos) => eos.dpde(rho, e),
        }
    }

    /// Non-ideal sound-speed correction. Only the analytic Mie–Grüneisen
    /// closure decomposes its pressure into region-wise Π and Γ and so
    /// carries one; the other closures return zero.
    #[must_use]
    pub fn delta(&self, p: f64, rho: f64, e: f64, _t: f64) -> f64 {
        match self {
            Self::Murnaghan(_) | Self::Tabulated(_) => 0.0,
            Self::Tillotson(eos) => eos.delta(p, rho, e),
        }
    }

    /// Speed of sound at the given state.
    #[must_use]
    pub fn speed_of_sound(&self, p: f64, rho: f64, e: f64, _t: f64) -> f64 {
        match self {
            Self::Murnaghan(eos) => eos.speed_of_sound(rho),
            Self::Tillotson(eos) => eos.speed_of_sound(p, rho, e),
            Self::Tabulated(eos) => eos.speed_of_sound(p, rho, e),
        }
    }

    /// Reference cold-compression energy at `rho`. Only the Mie–Grüneisen
    /// analytic closure carries one.
    #[must_use]
    pub fn e_ref(&self, rho: f64) -> f64 {
        match self {
            Self::Murnaghan(eos) => eos.e_ref(rho),
            Self::Tillotson(eos) => eos.e_ref(rho),
            Self::Tabulated(_) => 0.0,
        }
    }

    /// Specific internal energy consistent with `(ρ, p)`, seeded with the
    /// current energy for the implicit closures.
    ///
    /// The solid closure's pressure does not determine energy; the current
    /// value is returned unchanged.
    ///
    /// # Errors
    ///
    /// Fails with [`ThermoError::Calculation`] or a table error when the
    /// inversion cannot be completed.
    pub fn energy_from_pressure(&self, rho: f64, p: f64, e_guess: f64) -> Result<f64, ThermoError> {
        match self {
            Self::Murnaghan(_) => Ok(e_guess),
            Self::Tillotson(eos) => eos.energy_from_pressure(rho, p, e_guess),
            Self::Tabulated(eos) => eos.energy_from_pressure(rho, p),
        }
    }
}
