use crate::{error::RatingError, rating::CalculationResult};
use serde::{Deserialize, Serialize};

/// Rating assigned to a player with no history.
pub const DEFAULT_RATING: f64 = 1500.0;

/// Rating deviation assigned to a player with no history.
pub const DEFAULT_RATING_DEVIATION: f64 = 350.0;

/// Volatility assigned to a player with no history.
pub const DEFAULT_VOLATILITY: f64 = 0.06;

/// Ratio between the display scale and the internal Glicko-2 scale.
pub const SCALE: f64 = 173.7178;

/// Convert a display-scale rating `r` to the internal scale.
pub fn mu_from_rating(r: f64) -> f64 {
    (r - DEFAULT_RATING) / SCALE
}

/// Convert an internal-scale rating `mu` to the display scale.
pub fn rating_from_mu(mu: f64) -> f64 {
    mu * SCALE + DEFAULT_RATING
}

/// Convert a display-scale rating deviation `RD` to the internal scale.
pub fn phi_from_deviation(rd: f64) -> f64 {
    rd / SCALE
}

/// Convert an internal-scale rating deviation `phi` to the display scale.
pub fn deviation_from_phi(phi: f64) -> f64 {
    phi * SCALE
}

/// The rating state of a single competitor.
///
/// Every player has a rating `r`, a rating deviation `RD` describing how uncertain that rating is,
/// and a volatility `sigma` describing how erratic the player's results have been. The update math
/// works on a linearly rescaled version of the first two quantities (`mu` and `phi`).
///
/// Only the internal-scale state is stored; the display scale is always derived from it, so the two
/// representations can never drift apart. The only way to change a player after construction is
/// [`Player::apply_update`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "DisplayRating", into = "DisplayRating")]
pub struct Player {
    mu: f64,
    phi: f64,
    sigma: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            mu: mu_from_rating(DEFAULT_RATING),
            phi: phi_from_deviation(DEFAULT_RATING_DEVIATION),
            sigma: DEFAULT_VOLATILITY,
        }
    }
}

impl Player {
    /// Create a player from a display-scale rating, rating deviation and volatility.
    pub fn new(r: f64, rd: f64, sigma: f64) -> Result<Self, RatingError> {
        if !r.is_finite() {
            return Err(RatingError::InvalidPlayer {
                field: "rating",
                value: r,
            });
        }
        check_positive("rating deviation", rd)?;
        Self::from_internal(mu_from_rating(r), phi_from_deviation(rd), sigma)
    }

    /// Create a player directly from its internal-scale state.
    pub fn from_internal(mu: f64, phi: f64, sigma: f64) -> Result<Self, RatingError> {
        if !mu.is_finite() {
            return Err(RatingError::InvalidPlayer {
                field: "mu",
                value: mu,
            });
        }
        check_positive("phi", phi)?;
        check_positive("volatility", sigma)?;
        Ok(Self { mu, phi, sigma })
    }

    /// The rating `r` on the display scale.
    pub fn r(&self) -> f64 {
        rating_from_mu(self.mu)
    }

    /// The rating deviation `RD` on the display scale.
    pub fn rd(&self) -> f64 {
        deviation_from_phi(self.phi)
    }

    /// The rating `mu` on the internal scale.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// The rating deviation `phi` on the internal scale.
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// The volatility `sigma`, which is the same on both scales.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// A 95% confidence interval for the player's true strength: `r` plus or minus twice `RD`.
    pub fn interval(&self) -> (f64, f64) {
        let (r, rd) = (self.r(), self.rd());
        (r - 2.0 * rd, r + 2.0 * rd)
    }

    /// Replace this player's state with the outcome of a rating calculation.
    pub fn apply_update(&mut self, result: CalculationResult) {
        self.mu = result.mu();
        self.phi = result.phi();
        self.sigma = result.sigma();
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), RatingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RatingError::InvalidPlayer { field, value })
    }
}

/// Wire representation of a [`Player`], on the display scale.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
struct DisplayRating {
    r: f64,
    rd: f64,
    sigma: f64,
}

impl From<Player> for DisplayRating {
    fn from(player: Player) -> Self {
        Self {
            r: player.r(),
            rd: player.rd(),
            sigma: player.sigma(),
        }
    }
}

impl TryFrom<DisplayRating> for Player {
    type Error = RatingError;

    fn try_from(rating: DisplayRating) -> Result<Self, Self::Error> {
        Self::new(rating.r, rating.rd, rating.sigma)
    }
}
