use serde::Deserialize;

use crate::ThermoError;

/// Material constants for the [`Murnaghan`] solid equation of state.
///
/// All quantities are SI: densities in kg/m³, pressures in Pa,
/// compressibility `kappa` in 1/Pa.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MurnaghanParams {
    /// Reference density ρ₀.
    pub rho0: f64,
    /// Pressure at the reference density.
    #[serde(default)]
    pub p_ref: f64,
    /// Stiffness exponent n.
    pub n: f64,
    /// Compressibility κ.
    pub kappa: f64,
    /// Constant Mie–Grüneisen coefficient.
    pub gamma: f64,
}

/// Murnaghan equation of state for a solid.
///
/// A single closed-form region with no energy dependence:
/// `p(ρ) = p_ref + ((ρ/ρ₀)ⁿ − 1)/(κ·n)`. Every derivative method is the
/// exact analytic derivative of its corresponding value method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Murnaghan {
    rho0: f64,
    p_ref: f64,
    n: f64,
    kappa: f64,
    gamma: f64,
}

impl Murnaghan {
    /// Builds the closure from material constants.
    ///
    /// # Errors
    ///
    /// Fails if `rho0`, `n`, or `kappa` is not strictly positive.
    pub fn new(params: MurnaghanParams) -> Result<Self, ThermoError> {
        for (name, value) in [
            ("rho0", params.rho0),
            ("n", params.n),
            ("kappa", params.kappa),
        ] {
            if !(value > 0.0) {
                return Err(ThermoError::InvalidConstant {
                    name,
                    reason: format!("must be strictly positive, got {value}"),
                });
            }
        }

        Ok(Self {
            rho0: params.rho0,
            p_ref: params.p_ref,
            n: params.n,
            kappa: params.kappa,
            gamma: params.gamma,
        })
    }

    /// Signals that free-surface rarefaction evaluation is not meaningful.
    #[must_use]
    pub const fn solid() -> bool {
        true
    }

    /// Pressure at `(ρ, T)`. Temperature does not enter the closed form.
    #[must_use]
    pub fn pressure(&self, rho: f64, _t: f64) -> f64 {
        self.p_ref + ((rho / self.rho0).powf(self.n) - 1.0) / (self.kappa * self.n)
    }

    /// Constant Mie–Grüneisen coefficient.
    #[must_use]
    pub fn gamma(&self, _rho: f64, _t: f64, _cv: f64) -> f64 {
        self.gamma
    }

    /// Speed of sound, `c = sqrt(∂p/∂ρ)`.
    #[must_use]
    pub fn speed_of_sound(&self, rho: f64) -> f64 {
        self.dpdrho(rho).max(1.0e-10).sqrt()
    }

    /// Pressure derivative with respect to specific volume, `−ρ²·∂p/∂ρ`.
    #[must_use]
    pub fn dpdv(&self, rho: f64, _t: f64) -> f64 {
        -rho * rho * self.dpdrho(rho)
    }

    /// Pressure derivative with respect to temperature; the closed form has
    /// no thermal term.
    #[must_use]
    pub fn dpdt(&self, _rho: f64, _t: f64) -> f64 {
        0.0
    }

    /// Internal energy correction. The solid closure carries none.
    #[must_use]
    pub fn e_ref(&self, _rho: f64) -> f64 {
        0.0
    }

    /// Enthalpy correction. The solid closure carries none.
    #[must_use]
    pub fn h(&self, _rho: f64, _t: f64) -> f64 {
        0.0
    }

    /// Heat capacity difference `Cp − Cv`; zero for the solid closure.
    #[must_use]
    pub fn cp_m_cv(&self, _rho: f64, _t: f64) -> f64 {
        0.0
    }

    /// Entropy; the solid closure has no entropy model.
    #[must_use]
    pub fn entropy(&self, _p: f64) -> f64 {
        0.0
    }

    /// Exact analytic `∂p/∂ρ` of [`Murnaghan::pressure`].
    fn dpdrho(&self, rho: f64) -> f64 {
        (rho / self.rho0).powf(self.n - 1.0) / (self.kappa * self.rho0)
    }
}
