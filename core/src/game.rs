use crate::error::RatingError;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Handle to a player owned by a [`Roster`](crate::roster::Roster).
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    From,
    Into,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// The categorical outcome of a match, from the perspective of the first player.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    #[display("win")]
    Win,
    #[display("draw")]
    Draw,
    #[display("loss")]
    Loss,
}

impl MatchResult {
    /// The observed score used by the rating update: 1 for a win, ½ for a draw, 0 for a loss.
    pub fn score(self) -> f64 {
        match self {
            Self::Win => 1.0,
            Self::Draw => 0.5,
            Self::Loss => 0.0,
        }
    }

    /// The same outcome, seen from the other side.
    pub fn reverse(self) -> Self {
        match self {
            Self::Win => Self::Loss,
            Self::Draw => Self::Draw,
            Self::Loss => Self::Win,
        }
    }
}

/// A single contest between two players.
///
/// Scores are arbitrary real numbers in whatever unit the caller likes (goals, points, time...).
/// Only their relative order matters: the higher score wins and equal scores are a draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    player: PlayerId,
    opponent: PlayerId,
    score1: f64,
    score2: f64,
}

impl Match {
    pub fn new(
        player: PlayerId,
        opponent: PlayerId,
        score1: f64,
        score2: f64,
    ) -> Result<Self, RatingError> {
        for score in [score1, score2] {
            if !score.is_finite() {
                return Err(RatingError::InvalidScore(score));
            }
        }
        if player == opponent {
            return Err(RatingError::DegenerateMatch(player));
        }
        Ok(Self {
            player,
            opponent,
            score1,
            score2,
        })
    }

    /// The first player.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// The second player.
    pub fn opponent(&self) -> PlayerId {
        self.opponent
    }

    /// The raw scores of the first and second player.
    pub fn scores(&self) -> (f64, f64) {
        (self.score1, self.score2)
    }

    pub fn outcome(&self) -> MatchResult {
        let diff = self.score1 - self.score2;
        if diff > 0.0 {
            MatchResult::Win
        } else if diff < 0.0 {
            MatchResult::Loss
        } else {
            MatchResult::Draw
        }
    }

    /// The first player's observed score: 1.0, 0.5 or 0.0.
    pub fn result(&self) -> f64 {
        self.outcome().score()
    }
}
