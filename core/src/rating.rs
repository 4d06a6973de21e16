use crate::{
    collection::MatchCollection,
    error::RatingError,
    game::Match,
    player::Player,
    roster::Roster,
    volatility::{self, VolatilityInput},
};
use std::f64::consts::PI;

/// The system constant used when none is given.
///
/// Glicko2 is parameterized by a constant which controls how significantly volatility changes with
/// each result. Recommended parameters are in the range 0.3 to 1.2, with lower values causing less
/// volatility.
pub const DEFAULT_TAU: f64 = 0.5;

/// π², at full double precision.
pub const PI_SQUARED: f64 = PI * PI;

/// The new internal-scale state computed for one side of one match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalculationResult {
    mu: f64,
    phi: f64,
    sigma: f64,
}

impl CalculationResult {
    pub(crate) fn new(mu: f64, phi: f64, sigma: f64) -> Self {
        Self { mu, phi, sigma }
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

/// The Glicko-2 rating engine.
///
/// Every match is rated on its own, as a rating period containing a single game. Apart from the
/// system constant the engine is stateless; all state lives in the players it updates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glicko2 {
    tau: f64,
    max_iterations: usize,
}

impl Default for Glicko2 {
    fn default() -> Self {
        Self::new(DEFAULT_TAU)
    }
}

impl Glicko2 {
    /// An engine with system constant `tau`.
    ///
    /// `tau` is taken as is. Degenerate values (such as zero) surface as errors from the
    /// calculations rather than here.
    pub fn new(tau: f64) -> Self {
        Self {
            tau,
            max_iterations: volatility::MAX_ITERATIONS,
        }
    }

    /// Limit the iterations of each stage of the volatility search.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The probability that `player` beats `opponent`, `E(μ, μj, φj)`.
    pub fn expected_score(&self, player: &Player, opponent: &Player) -> f64 {
        e(player.mu(), opponent.mu(), opponent.phi())
    }

    /// Rate both players referenced by `m` and update them in `roster`.
    pub fn calculate_match(&self, roster: &mut Roster, m: &Match) -> Result<(), RatingError> {
        let (player, opponent) = roster.pair_mut(m.player(), m.opponent())?;
        self.update_pair(player, opponent, m.result())
            .inspect_err(|err| {
                tracing::debug!(
                    player = %m.player(),
                    opponent = %m.opponent(),
                    "match not rated: {err}"
                )
            })?;
        tracing::debug!(
            player = %m.player(),
            opponent = %m.opponent(),
            result = m.result(),
            "rated match"
        );
        Ok(())
    }

    /// Rate every match in `matches`, in order.
    ///
    /// Stops at the first match that cannot be rated. Matches before it have already been applied;
    /// the failing match itself has not changed anything.
    pub fn calculate_matches(
        &self,
        roster: &mut Roster,
        matches: &MatchCollection,
    ) -> Result<(), RatingError> {
        for (index, m) in matches.matches().enumerate() {
            self.calculate_match(roster, m)
                .map_err(|err| RatingError::BatchFailed {
                    index,
                    error: Box::new(err),
                })?;
        }
        Ok(())
    }

    /// Update two players after a game in which `player` scored `result` (1 for a win, ½ for a
    /// draw, 0 for a loss) against `opponent`.
    ///
    /// Both sides are computed from the pre-game state of both players. Neither player is modified
    /// unless both calculations succeed.
    pub fn update_pair(
        &self,
        player: &mut Player,
        opponent: &mut Player,
        result: f64,
    ) -> Result<(), RatingError> {
        let player_update = self.calculate_player(player, opponent, result)?;
        let opponent_update = self.calculate_player(opponent, player, 1.0 - result)?;
        player.apply_update(player_update);
        opponent.apply_update(opponent_update);
        Ok(())
    }

    /// Compute the new state of `player` after scoring `score` against `opponent`, without applying
    /// it.
    pub fn calculate_player(
        &self,
        player: &Player,
        opponent: &Player,
        score: f64,
    ) -> Result<CalculationResult, RatingError> {
        let (mu, phi, sigma) = (player.mu(), player.phi(), player.sigma());
        let (mu_j, phi_j) = (opponent.mu(), opponent.phi());

        // Steps 3 and 4: estimated variance and improvement.
        let g_j = g(phi_j);
        let expected = e(mu, mu_j, phi_j);
        let v = RatingError::ensure_finite("v", 1.0 / (g_j * g_j * expected * (1.0 - expected)))?;
        let delta = RatingError::ensure_finite("delta", v * g_j * (score - expected))?;

        // Step 5: new volatility.
        let sigma_p = volatility::solve_volatility(
            VolatilityInput {
                delta,
                phi,
                v,
                sigma,
                tau: self.tau,
            },
            self.max_iterations,
        )?;

        // Steps 6 and 7: new rating deviation.
        let phi_star = (phi * phi + sigma_p * sigma_p).sqrt();
        let phi_p = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / v).sqrt();

        // Step 8 (internal scale): new rating.
        let mu_p = mu + phi_p * phi_p * g_j * (score - expected);

        let result = Player::from_internal(
            RatingError::ensure_finite("new mu", mu_p)?,
            RatingError::ensure_finite("new phi", phi_p)?,
            RatingError::ensure_finite("new sigma", sigma_p)?,
        )?;
        Ok(CalculationResult::new(
            result.mu(),
            result.phi(),
            result.sigma(),
        ))
    }
}

/// `g(φ)`: the weight given to a game against an opponent with deviation `φ`.
pub fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / PI_SQUARED).sqrt()
}

/// `E(μ, μj, φj)`: the expected score of a player against an opponent.
pub fn e(mu: f64, mu_j: f64, phi_j: f64) -> f64 {
    1.0 / (1.0 + (-g(phi_j) * (mu - mu_j)).exp())
}
