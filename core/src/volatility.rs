//! Step 5 of the Glicko-2 update: solving for the new volatility.
//!
//! The new volatility is `exp(A / 2)` where `A` is the root of
//!
//! ```text
//! f(x) = e^x (Δ² − φ² − v − e^x) / (2 (φ² + v + e^x)²) − (x − a) / τ²
//! a    = ln(σ²)
//! ```
//!
//! found with the Illinois variant of regula falsi. Everything here is a pure function of its
//! inputs so the solver can be exercised on its own.

use crate::error::{RatingError, SolverStage};

/// Stopping threshold for the root search.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Upper bound on the iterations of both the bracket search and the Illinois iteration.
pub const MAX_ITERATIONS: usize = 500;

/// Everything the volatility equation depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolatilityInput {
    /// Estimated improvement in rating, `Δ`.
    pub delta: f64,
    /// The player's current rating deviation, `φ`.
    pub phi: f64,
    /// Estimated variance of the player's rating based on the game outcome, `v`.
    pub v: f64,
    /// The player's current volatility, `σ`.
    pub sigma: f64,
    /// The system constant, `τ`.
    pub tau: f64,
}

impl VolatilityInput {
    /// The log of the squared current volatility, `a = ln(σ²)`.
    pub fn a(&self) -> f64 {
        (self.sigma * self.sigma).ln()
    }

    /// Evaluate `f(x)`.
    pub fn f(&self, x: f64) -> f64 {
        let ex = x.exp();
        let phi2 = self.phi * self.phi;
        let denom = phi2 + self.v + ex;
        ex * (self.delta * self.delta - phi2 - self.v - ex) / (2.0 * denom * denom)
            - (x - self.a()) / (self.tau * self.tau)
    }

    fn checked_f(&self, x: f64) -> Result<f64, RatingError> {
        RatingError::ensure_finite("volatility function", self.f(x))
    }
}

/// Find the new volatility `σ'`.
///
/// Fails with [`RatingError::NonConvergence`] if either loop runs for more than `max_iterations`
/// steps and with [`RatingError::NonFinite`] if `f` overflows anywhere along the way.
pub fn solve_volatility(input: VolatilityInput, max_iterations: usize) -> Result<f64, RatingError> {
    let VolatilityInput {
        delta, phi, v, tau, ..
    } = input;
    let a = RatingError::ensure_finite("ln(sigma^2)", input.a())?;

    // Bracket the root between A and B.
    let mut big_a = a;
    let excess = delta * delta - phi * phi - v;
    let mut big_b = if excess > 0.0 {
        excess.ln()
    } else {
        let step = tau.abs();
        let mut k = 1;
        loop {
            if k > max_iterations {
                return Err(RatingError::NonConvergence {
                    stage: SolverStage::Bracket,
                    iterations: max_iterations,
                });
            }
            if input.checked_f(a - k as f64 * step)? >= 0.0 {
                break a - k as f64 * step;
            }
            k += 1;
        }
    };

    let mut f_a = input.checked_f(big_a)?;
    let mut f_b = input.checked_f(big_b)?;

    let mut iterations = 0;
    while !converged(big_a, big_b) {
        if iterations == max_iterations {
            return Err(RatingError::NonConvergence {
                stage: SolverStage::Illinois,
                iterations,
            });
        }
        iterations += 1;

        let big_c = big_a + f_a * (big_a - big_b) / (f_b - f_a);
        let big_c = RatingError::ensure_finite("volatility iterate", big_c)?;
        let f_c = input.checked_f(big_c)?;

        if f_c * f_b < 0.0 {
            big_a = big_b;
            f_a = f_b;
        } else {
            f_a /= 2.0;
        }
        big_b = big_c;
        f_b = f_c;

        tracing::trace!(iterations, big_a, big_b, "volatility iteration");
    }

    Ok((big_a / 2.0).exp())
}

/// The search stops once the bracket is strictly narrower than the tolerance.
fn converged(big_a: f64, big_b: f64) -> bool {
    (big_b - big_a).abs() < CONVERGENCE_TOLERANCE
}
