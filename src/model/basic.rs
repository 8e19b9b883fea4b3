use serde::Deserialize;

use crate::{ThermoError, eos::EquationOfState};

use super::ThermoModel;

/// Thermal constants the model layer adds on top of a closure.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThermalParams {
    /// Constant specific heat at constant volume, `e = cv·T`.
    pub cv: f64,
}

/// A single-material thermodynamic model: one closure, no internal state.
///
/// Temperature follows the constant-`cv` caloric relation `T = e/cv`;
/// everything else defers to the closure.
#[derive(Debug, Clone)]
pub struct Basic {
    eos: EquationOfState,
    cv: f64,
}

impl Basic {
    /// Binds a closure and thermal constants.
    ///
    /// # Errors
    ///
    /// Fails if `cv` is not strictly positive.
    pub fn new(eos: EquationOfState, thermal: ThermalParams) -> Result<Self, ThermoError> {
        if !(thermal.cv > 0.0) {
            return Err(ThermoError::InvalidConstant {
                name: "cv",
                reason: format!("must be strictly positive, got {}", thermal.cv),
            });
        }
        Ok(Self {
            eos,
            cv: thermal.cv,
        })
    }

    /// The bound closure.
    #[must_use]
    pub fn eos(&self) -> &EquationOfState {
        &self.eos
    }
}

impl ThermoModel for Basic {
    fn correct(&self, rho: &[f64], e: &[f64], p: &mut [f64], t: &mut [f64]) {
        for i in 0..rho.len() {
            t[i] = e[i] / self.cv;
            p[i] = self.eos.pressure(rho[i], e[i], t[i]);
        }
    }

    fn calc_p(&self, rho: &[f64], e: &[f64], t: &[f64], p_out: &mut [f64]) {
        for i in 0..rho.len() {
            p_out[i] = self.eos.pressure(rho[i], e[i], t[i]);
        }
    }

    fn calc_e(&self, p: &[f64], rho: &[f64], e: &mut [f64]) -> Result<(), ThermoError> {
        for i in 0..rho.len() {
            e[i] = self.eos.energy_from_pressure(rho[i], p[i], e[i])?;
        }
        Ok(())
    }

    fn speed_of_sound(&self, p: &[f64], rho: &[f64], e: &[f64], t: &[f64], c_out: &mut [f64]) {
        for i in 0..rho.len() {
            c_out[i] = self.eos.speed_of_sound(p[i], rho[i], e[i], t[i]);
        }
    }

    fn speed_of_sound_patch(
        &self,
        _patch: usize,
        p: &[f64],
        rho: &[f64],
        e: &[f64],
        t: &[f64],
        c_out: &mut [f64],
    ) {
        self.speed_of_sound(p, rho, e, t, c_out);
    }

    fn e_source(&self, source: &mut [f64]) {
        source.fill(0.0);
    }

    fn solve(&mut self, _step: usize, _a_coeffs: &[f64], _b_coeffs: &[f64]) {}

    fn set_ode_fields(&mut self, _n_steps: usize, _n_old: usize, _n_delta: usize) {}

    fn clear_ode_fields(&mut self) {}
}
