use crate::{ThermoError, eos::EquationOfState};

use super::{ThermoModel, basic::ThermalParams};

/// Reaction-progress supplier for a detonating material.
///
/// The activation model owns the reaction-progress variable λ ∈ [0, 1] and
/// its sub-step integration; this layer only consults it. `lambda_pow` is
/// the blending weight (λ raised to the model's exponent), not λ itself.
pub trait ActivationModel {
    /// Blending weight for one cell.
    fn lambda_pow(&self, cell: usize) -> f64;

    /// Blending weights for the faces of one boundary patch.
    fn lambda_pow_patch(&self, patch: usize) -> Vec<f64>;

    /// Detonation energy release for one cell, per unit mass and time.
    fn e_source(&self, cell: usize) -> f64;

    /// Advances the reaction-progress ODE for sub-step `step`.
    fn solve(&mut self, step: usize, a_coeffs: &[f64], b_coeffs: &[f64]);

    fn set_ode_fields(&mut self, n_steps: usize, n_old: usize, n_delta: usize);

    fn clear_ode_fields(&mut self);
}

/// Slow secondary energy release behind the detonation front.
pub trait AfterburnModel {
    /// Cumulative specific energy released so far in one cell [J/kg].
    fn energy(&self, cell: usize) -> f64;

    /// Afterburn energy release for one cell, per unit mass and time.
    fn e_source(&self, cell: usize) -> f64;

    fn solve(&mut self, step: usize, a_coeffs: &[f64], b_coeffs: &[f64]);

    fn set_ode_fields(&mut self, n_steps: usize, n_old: usize, n_delta: usize);

    fn clear_ode_fields(&mut self);
}

/// An afterburn model that releases nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAfterburn;

impl AfterburnModel for NoAfterburn {
    fn energy(&self, _cell: usize) -> f64 {
        0.0
    }

    fn e_source(&self, _cell: usize) -> f64 {
        0.0
    }

    fn solve(&mut self, _step: usize, _a_coeffs: &[f64], _b_coeffs: &[f64]) {}

    fn set_ode_fields(&mut self, _n_steps: usize, _n_old: usize, _n_delta: usize) {}

    fn clear_ode_fields(&mut self) {}
}

/// A detonating material: transitions from an unreacted to a reacted
/// closure as the activation model's reaction progress advances.
///
/// Every output is the λ-weighted blend of the two closures, with the
/// afterburn energy added to the reacted branch's energy input before
/// evaluation. Both branches share the model-level caloric relation
/// `T = e/cv`.
pub struct Detonating<A, B> {
    unreacted: EquationOfState,
    reacted: EquationOfState,
    cv: f64,
    activation: A,
    afterburn: B,
}

impl<A: ActivationModel, B: AfterburnModel> Detonating<A, B> {
    /// Binds the unreacted/reacted closure pair and the external
    /// activation and afterburn models.
    ///
    /// # Errors
    ///
    /// Fails if `cv` is not strictly positive.
    pub fn new(
        unreacted: EquationOfState,
        reacted: EquationOfState,
        thermal: ThermalParams,
        activation: A,
        afterburn: B,
    ) -> Result<Self, ThermoError> {
        if !(thermal.cv > 0.0) {
            return Err(ThermoError::InvalidConstant {
                name: "cv",
                reason: format!("must be strictly positive, got {}", thermal.cv),
            });
        }
        Ok(Self {
            unreacted,
            reacted,
            cv: thermal.cv,
            activation,
            afterburn,
        })
    }

    /// Blended pressure for one cell state with blending weight `xi`.
    fn blend_pressure(&self, xi: f64, rho: f64, e: f64, t: f64, q_afterburn: f64) -> f64 {
        let unreacted = self.unreacted.pressure(rho, e, t);
        let reacted = self.reacted.pressure(rho, e + q_afterburn, t);
        (1.0 - xi) * unreacted + xi * reacted
    }

    fn blend_speed_of_sound(&self, xi: f64, p: f64, rho: f64, e: f64, t: f64, q: f64) -> f64 {
        let unreacted = self.unreacted.speed_of_sound(p, rho, e, t);
        let reacted = self.reacted.speed_of_sound(p, rho, e + q, t);
        (1.0 - xi) * unreacted + xi * reacted
    }
}

impl<A: ActivationModel, B: AfterburnModel> ThermoModel for Detonating<A, B> {
    fn correct(&self, rho: &[f64], e: &[f64], p: &mut [f64], t: &mut [f64]) {
        for i in 0..rho.len() {
            t[i] = e[i] / self.cv;
            let xi = self.activation.lambda_pow(i);
            p[i] = self.blend_pressure(xi, rho[i], e[i], t[i], self.afterburn.energy(i));
        }
    }

    fn calc_p(&self, rho: &[f64], e: &[f64], t: &[f64], p_out: &mut [f64]) {
        for i in 0..rho.len() {
            let xi = self.activation.lambda_pow(i);
            p_out[i] = self.blend_pressure(xi, rho[i], e[i], t[i], self.afterburn.energy(i));
        }
    }

    fn calc_e(&self, p: &[f64], rho: &[f64], e: &mut [f64]) -> Result<(), ThermoError> {
        for i in 0..rho.len() {
            let xi = self.activation.lambda_pow(i);
            let q = self.afterburn.energy(i);
            let unreacted = self.unreacted.energy_from_pressure(rho[i], p[i], e[i])?;
            let reacted = self.reacted.energy_from_pressure(rho[i], p[i], e[i] + q)? - q;
            e[i] = (1.0 - xi) * unreacted + xi * reacted;
        }
        Ok(())
    }

    fn speed_of_sound(&self, p: &[f64], rho: &[f64], e: &[f64], t: &[f64], c_out: &mut [f64]) {
        for i in 0..rho.len() {
            let xi = self.activation.lambda_pow(i);
            c_out[i] =
                self.blend_speed_of_sound(xi, p[i], rho[i], e[i], t[i], self.afterburn.energy(i));
        }
    }

    fn speed_of_sound_patch(
        &self,
        patch: usize,
        p: &[f64],
        rho: &[f64],
        e: &[f64],
        t: &[f64],
        c_out: &mut [f64],
    ) {
        let xi = self.activation.lambda_pow_patch(patch);
        for i in 0..rho.len() {
            // Afterburn energy is a cell quantity; boundary faces see the
            // blend without it.
            c_out[i] = self.blend_speed_of_sound(xi[i], p[i], rho[i], e[i], t[i], 0.0);
        }
    }

    fn e_source(&self, source: &mut [f64]) {
        for (i, s) in source.iter_mut().enumerate() {
            *s = self.activation.e_source(i) + self.afterburn.e_source(i);
        }
    }

    fn solve(&mut self, step: usize, a_coeffs: &[f64], b_coeffs: &[f64]) {
        self.activation.solve(step, a_coeffs, b_coeffs);
        self.afterburn.solve(step, a_coeffs, b_coeffs);
    }

    fn set_ode_fields(&mut self, n_steps: usize, n_old: usize, n_delta: usize) {
        self.activation.set_ode_fields(n_steps, n_old, n_delta);
        self.afterburn.set_ode_fields(n_steps, n_old, n_delta);
    }

    fn clear_ode_fields(&mut self) {
        self.activation.clear_ode_fields();
        self.afterburn.clear_ode_fields();
    }
}
