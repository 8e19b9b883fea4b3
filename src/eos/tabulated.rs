use std::path::Path;

use crate::{
    ThermoError,
    table::{GridSpec, Table2D},
};

use super::RHO_FLOOR;

/// Tabulated closure: pressure sampled on a `(ρ, e)` grid.
///
/// Pressure and its partial derivatives come from the table's
/// interpolation stencils; the effective polytropic index is recovered
/// from the Mie–Grüneisen decomposition, `Γ = (∂p/∂e)/ρ + 1`.
#[derive(Debug, Clone)]
pub struct Tabulated {
    p_table: Table2D,
}

impl Tabulated {
    /// Wraps a pressure table with density on x and energy on y.
    #[must_use]
    pub fn new(p_table: Table2D) -> Self {
        Self { p_table }
    }

    /// Reads the pressure grid from a delimited text file.
    ///
    /// # Errors
    ///
    /// Fails on any of the [`Table2D::from_file`] errors.
    pub fn from_file(path: impl AsRef<Path>, spec: &GridSpec) -> Result<Self, ThermoError> {
        Ok(Self::new(Table2D::from_file(path, spec)?))
    }

    #[must_use]
    pub const fn solid() -> bool {
        false
    }

    /// Interpolated pressure at `(ρ, e)`.
    #[must_use]
    pub fn pressure(&self, rho: f64, e: f64) -> f64 {
        self.p_table.lookup(rho, e)
    }

    /// Effective polytropic index, `Γ = (∂p/∂e)/ρ + 1`.
    #[must_use]
    pub fn gamma(&self, rho: f64, e: f64) -> f64 {
        self.dpde(rho, e) / rho.max(RHO_FLOOR) + 1.0
    }

    /// Pressure deviation from the ideal-gas baseline,
    /// `Π = (Γ − 1)·ρ·e − p`.
    #[must_use]
    pub fn pi(&self, rho: f64, e: f64) -> f64 {
        (self.gamma(rho, e) - 1.0) * rho * e - self.pressure(rho, e)
    }

    /// Pressure derivative with respect to specific volume, from the table
    /// stencil: `−ρ²·∂p/∂ρ`.
    #[must_use]
    pub fn dpdv(&self, rho: f64, e: f64) -> f64 {
        -rho * rho * self.p_table.dfdx(rho, e)
    }

    /// Pressure derivative with respect to specific internal energy, from
    /// the table stencil.
    #[must_use]
    pub fn dpde(&self, rho: f64, e: f64) -> f64 {
        self.p_table.dfdy(rho, e)
    }

    /// Speed of sound from `c² = −dpdv/ρ² + (p/ρ²)·dpde`, floored at a
    /// small positive value.
    #[must_use]
    pub fn speed_of_sound(&self, p: f64, rho: f64, e: f64) -> f64 {
        let rho2 = (rho.max(RHO_FLOOR)).powi(2);
        let c_sqr = -self.dpdv(rho, e) / rho2 + p / rho2 * self.dpde(rho, e);
        c_sqr.max(1.0e-10).sqrt()
    }

    /// Inverts the table along the energy axis at fixed density.
    ///
    /// # Errors
    ///
    /// Fails if the energy profile at `rho` is degenerate.
    pub fn energy_from_pressure(&self, rho: f64, p: f64) -> Result<f64, ThermoError> {
        Ok(self.p_table.reverse_lookup_y(p, rho)?)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::Array2;

    use crate::transform::Transform;

    use super::*;

    /// Ideal-gas pressure p = (γ − 1)·ρ·e with γ = 1.4 on a coarse grid.
    fn ideal_gas_table() -> Tabulated {
        let spec = GridSpec {
            nx: 5,
            ny: 5,
            x_min: 0.5,
            dx: 0.5,
            y_min: 1.0e5,
            dy: 1.0e5,
            value_transform: Transform::Identity,
            x_transform: Transform::Identity,
            y_transform: Transform::Identity,
        };
        let values = Array2::from_shape_fn((5, 5), |(i, j)| {
            let rho = 0.5 + i as f64 * 0.5;
            let e = 1.0e5 + j as f64 * 1.0e5;
            0.4 * rho * e
        });
        Tabulated::new(Table2D::new(&spec, values).unwrap())
    }

    #[test]
    fn pressure_matches_the_sampled_relation() {
        let eos = ideal_gas_table();
        // Bilinear interpolation reproduces the bilinear surface exactly.
        assert_relative_eq!(eos.pressure(1.2, 2.5e5), 0.4 * 1.2 * 2.5e5, max_relative = 1e-12);
    }

    #[test]
    fn gamma_recovers_the_polytropic_index() {
        let eos = ideal_gas_table();
        assert_relative_eq!(eos.gamma(1.0, 2.5e5), 1.4, max_relative = 1e-9);
    }

    #[test]
    fn pi_vanishes_for_an_ideal_gas_table() {
        let eos = ideal_gas_table();
        let pi = eos.pi(1.0, 2.5e5);
        assert_relative_eq!(pi / (0.4 * 1.0 * 2.5e5), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn derivatives_come_from_the_table_stencils() {
        let eos = ideal_gas_table();
        let (rho, e) = (1.2, 2.5e5);
        assert_relative_eq!(eos.dpde(rho, e), 0.4 * rho, max_relative = 1e-9);
        assert_relative_eq!(eos.dpdv(rho, e), -rho * rho * 0.4 * e, max_relative = 1e-9);
    }

    #[test]
    fn speed_of_sound_matches_the_ideal_gas_value() {
        let eos = ideal_gas_table();
        let (rho, e) = (1.0, 2.5e5);
        let p = eos.pressure(rho, e);
        // c² = (γ − 1)·e + (γ − 1)·p/ρ = γ·(γ − 1)·e for this table.
        let expected = (1.4 * 0.4 * e).sqrt();
        assert_relative_eq!(eos.speed_of_sound(p, rho, e), expected, max_relative = 1e-9);
    }

    #[test]
    fn energy_from_pressure_inverts_the_energy_axis() {
        let eos = ideal_gas_table();
        let (rho, e) = (1.5, 3.2e5);
        let p = eos.pressure(rho, e);
        assert_relative_eq!(
            eos.energy_from_pressure(rho, p).unwrap(),
            e,
            max_relative = 1e-9
        );
    }
}
