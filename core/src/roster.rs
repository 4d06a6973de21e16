use crate::{error::RatingError, game::PlayerId, player::Player};

/// The players taking part in a competition.
///
/// Matches refer to players by [`PlayerId`]; the roster owns the players themselves and hands out
/// the mutable access the rating engine needs.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player and return its handle.
    pub fn add(&mut self, player: Player) -> PlayerId {
        let id = PlayerId::from(self.players.len());
        self.players.push(player);
        tracing::trace!(%id, r = player.r(), rd = player.rd(), "added player");
        id
    }

    pub fn get(&self, id: PlayerId) -> Result<&Player, RatingError> {
        self.players
            .get(id.index())
            .ok_or(RatingError::UnknownPlayer(id))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = (PlayerId, &Player)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, player)| (PlayerId::from(i), player))
    }

    /// Mutable access to two distinct players at once.
    pub fn pair_mut(
        &mut self,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<(&mut Player, &mut Player), RatingError> {
        self.get(a)?;
        self.get(b)?;
        if a == b {
            return Err(RatingError::DegenerateMatch(a));
        }

        let (i, j) = (a.index(), b.index());
        if i < j {
            let (left, right) = self.players.split_at_mut(j);
            Ok((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.players.split_at_mut(i);
            Ok((&mut right[0], &mut left[j]))
        }
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        [1400.0, 1500.0, 1600.0]
            .into_iter()
            .map(|r| Player::new(r, 100.0, 0.06).unwrap())
            .collect()
    }

    #[test]
    fn test_add_and_get() {
        let mut roster = Roster::new();
        assert!(roster.is_empty());
        let a = roster.add(Player::default());
        let b = roster.add(Player::new(1800.0, 50.0, 0.05).unwrap());
        assert_ne!(a, b);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(b).unwrap().r(), Player::new(1800.0, 50.0, 0.05).unwrap().r());
        assert_eq!(
            roster.get(PlayerId::from(7usize)),
            Err(RatingError::UnknownPlayer(PlayerId::from(7usize)))
        );
    }

    #[test]
    fn test_pair_mut_order() {
        let mut roster = roster();
        let (hi, lo) = roster.pair_mut(PlayerId::from(2usize), PlayerId::from(0usize)).unwrap();
        assert!(hi.r() > lo.r());
        let (lo, hi) = roster.pair_mut(PlayerId::from(0usize), PlayerId::from(2usize)).unwrap();
        assert!(hi.r() > lo.r());
    }

    #[test]
    fn test_pair_mut_rejects_bad_ids() {
        let mut roster = roster();
        let id = PlayerId::from(1usize);
        assert_eq!(
            roster.pair_mut(id, id).unwrap_err(),
            RatingError::DegenerateMatch(id)
        );
        assert_eq!(
            roster.pair_mut(id, PlayerId::from(3usize)).unwrap_err(),
            RatingError::UnknownPlayer(PlayerId::from(3usize))
        );
    }

    #[test]
    fn test_iter() {
        let roster = roster();
        let ids: Vec<_> = roster.iter().map(|(id, _)| usize::from(id)).collect();
        assert_eq!(ids, [0, 1, 2]);
    }
}
