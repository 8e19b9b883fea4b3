//! Reference cold-compression energy integration.
//!
//! Mie–Grüneisen closures define their reference energy implicitly: the
//! closure's own pressure relation is integrated along a density path, with
//! Γ and Π re-evaluated at every intermediate (ρ, E) pair. The relation is
//! therefore solved by marching, not inverted algebraically.

/// Fixed step count of the density-path march. A hard-coded accuracy/cost
/// trade-off, not user-configurable.
const N_STEPS: usize = 10;

/// Integrates `dE/dρ = rhs(ρ, E)` from `rho_start` to `rho_end` with the
/// classical fourth-order Runge–Kutta scheme, starting from `E = 0`.
///
/// Returns zero when the endpoints coincide.
pub(crate) fn integrate(rho_start: f64, rho_end: f64, rhs: impl Fn(f64, f64) -> f64) -> f64 {
    let d_rho = (rho_end - rho_start) / (N_STEPS as f64 + 1.0);
    let mut ec = 0.0;
    let mut rho = rho_start;

    for _ in 0..=N_STEPS {
        let f1 = rhs(rho, ec);
        let e1 = ec + f1 * d_rho / 2.0;

        let f2 = rhs(rho + d_rho / 2.0, e1);
        let e2 = ec + f2 * d_rho / 2.0;

        let f3 = rhs(rho + d_rho / 2.0, e2);
        let e3 = ec + f3 * d_rho;

        let f4 = rhs(rho + d_rho, e3);

        ec += d_rho / 6.0 * (f1 + 2.0 * (f2 + f3) + f4);
        rho += d_rho;
    }

    ec
}
