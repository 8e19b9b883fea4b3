//! Thermodynamic model layer.
//!
//! A model binds one (or, for detonating material, two blended)
//! equation-of-state closures to the solver's per-cell state and exposes
//! the evaluation the outer time integrator calls once per explicit
//! sub-step. The solver retains sole ownership of its fields; every method
//! takes borrowed slices that live only for the call, so per-cell work is
//! free of shared mutable state and carries no ordering constraint.

mod basic;
mod detonating;

use crate::ThermoError;

pub use basic::{Basic, ThermalParams};
pub use detonating::{ActivationModel, AfterburnModel, Detonating, NoAfterburn};

/// Operations every thermodynamic model exposes to the outer integrator.
///
/// Field-wide methods write one value per cell into the output slice;
/// `speed_of_sound_patch` is the boundary-face overload, evaluated on one
/// patch's face values at a time. `solve` and the ODE-field hooks exist
/// for closures whose internal variables need their own sub-step
/// integration and are no-ops otherwise.
pub trait ThermoModel {
    /// Recomputes pressure and temperature from the current `(ρ, e)`.
    fn correct(&self, rho: &[f64], e: &[f64], p: &mut [f64], t: &mut [f64]);

    /// Thermodynamic pressure from the current state, without touching
    /// temperature.
    fn calc_p(&self, rho: &[f64], e: &[f64], t: &[f64], p_out: &mut [f64]);

    /// Specific internal energy consistent with the current pressure and
    /// density, updated in place (the current energy seeds the implicit
    /// inversions).
    ///
    /// # Errors
    ///
    /// Fails if an inversion does not converge; the field is left
    /// partially updated and the defect is surfaced, not masked.
    fn calc_e(&self, p: &[f64], rho: &[f64], e: &mut [f64]) -> Result<(), ThermoError>;

    /// Speed of sound for every cell.
    fn speed_of_sound(&self, p: &[f64], rho: &[f64], e: &[f64], t: &[f64], c_out: &mut [f64]);

    /// Speed of sound for the faces of one boundary patch.
    fn speed_of_sound_patch(
        &self,
        patch: usize,
        p: &[f64],
        rho: &[f64],
        e: &[f64],
        t: &[f64],
        c_out: &mut [f64],
    );

    /// Explicit energy source term for every cell; zero unless a closure
    /// contributes one.
    fn e_source(&self, source: &mut [f64]);

    /// Advances closure-internal variables for sub-step `step` of the
    /// outer multi-stage scheme with its `a`/`b` coefficient rows.
    fn solve(&mut self, step: usize, a_coeffs: &[f64], b_coeffs: &[f64]);

    /// Allocates the per-substep history needed by the outer multi-stage
    /// integrator. A resource-lifecycle hook with no physics.
    fn set_ode_fields(&mut self, n_steps: usize, n_old: usize, n_delta: usize);

    /// Releases the per-substep history.
    fn clear_ode_fields(&mut self);
}
