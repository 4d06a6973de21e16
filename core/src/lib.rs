//! Skill ratings from pairwise match outcomes using the Glicko-2 system.
//!
//! Build [`Player`](player::Player)s in a [`Roster`](roster::Roster), describe each contest as a
//! [`Match`](game::Match), and hand the matches to a [`Glicko2`](rating::Glicko2) engine, which
//! updates both participants in place.

pub mod collection;
pub mod error;
pub mod game;
pub mod message;
pub mod player;
pub mod rating;
pub mod roster;
pub mod volatility;
