use crate::game::PlayerId;
use derive_more::{Display, Error};

/// The step of the volatility search that failed to terminate.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum SolverStage {
    #[display("bracket search")]
    Bracket,
    #[display("Illinois iteration")]
    Illinois,
}

/// Everything that can go wrong while building rating inputs or applying an update.
///
/// Failures are local to one call. In particular, a failed match update leaves both players
/// exactly as they were before the call.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum RatingError {
    /// A player state that would make the update math ill-defined (e.g. a zero deviation).
    #[display("invalid {field}: {value}")]
    InvalidPlayer {
        field: &'static str,
        value: f64,
    },

    #[display("invalid match score: {_0}")]
    InvalidScore(#[error(not(source))] f64),

    #[display("unknown player {_0}")]
    UnknownPlayer(#[error(not(source))] PlayerId),

    /// Both sides of a match refer to the same player.
    #[display("player {_0} cannot play against themselves")]
    DegenerateMatch(#[error(not(source))] PlayerId),

    #[display("volatility {stage} did not converge after {iterations} iterations")]
    NonConvergence {
        stage: SolverStage,
        iterations: usize,
    },

    #[display("{quantity} is not finite ({value})")]
    NonFinite {
        quantity: &'static str,
        value: f64,
    },

    /// A batch of matches stopped at the match with the given position.
    #[display("match {index} failed: {error}")]
    BatchFailed {
        index: usize,
        #[error(source)]
        error: Box<RatingError>,
    },
}

impl RatingError {
    pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { quantity, value })
        }
    }
}
