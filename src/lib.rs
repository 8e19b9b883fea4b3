//! Thermodynamic closure models for compressible multi-material flow solvers.
//!
//! Given the local state of a material (density and specific internal energy,
//! or pressure and temperature), this crate returns pressure, temperature,
//! speed of sound, and their partial derivatives. Two structurally different
//! closure strategies sit behind one contract so a solver can swap them
//! without code changes:
//!
//! - analytic piecewise equations of state ([`eos::Murnaghan`],
//!   [`eos::Tillotson`]), and
//! - tabulated interpolation of measured or simulated data
//!   ([`eos::Tabulated`], backed by [`table::Table1D`] / [`table::Table2D`]).
//!
//! The [`model`] layer binds a selected closure to the solver's per-cell
//! fields and exposes the per-substep evaluation the outer time integrator
//! calls; the detonating variant blends an unreacted and a reacted closure
//! through an externally supplied reaction-progress weight.
//!
//! All evaluation methods are pure functions of their arguments and the
//! material constants fixed at construction, so per-cell loops carry no
//! ordering constraint.

mod error;

pub mod eos;
pub mod model;
pub mod table;
pub mod transform;

pub use eos::{EosConfig, EquationOfState};
pub use error::{TableError, ThermoError};
pub use model::ThermoModel;
