use crate::game::Match;

/// An append-only, ordered batch of matches.
///
/// The collection never owns the players its matches refer to; they stay in whatever
/// [`Roster`](crate::roster::Roster) the matches were built against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchCollection {
    matches: Vec<Match>,
}

impl MatchCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_match(&mut self, m: Match) {
        self.matches.push(m);
    }

    /// Iterate over the matches in the order they were added.
    ///
    /// Each call starts a fresh iteration from the first match.
    pub fn matches(&self) -> impl '_ + ExactSizeIterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<'a> IntoIterator for &'a MatchCollection {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

impl FromIterator<Match> for MatchCollection {
    fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        Self {
            matches: iter.into_iter().collect(),
        }
    }
}

impl Extend<Match> for MatchCollection {
    fn extend<I: IntoIterator<Item = Match>>(&mut self, iter: I) {
        self.matches.extend(iter);
    }
}
