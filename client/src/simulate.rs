use itertools::Itertools;
use rand::Rng;
use skillrank_core::{
    game::{Match, MatchResult, PlayerId},
    message::{PlayerRecord, Standing},
    player::Player,
    rating::Glicko2,
    roster::Roster,
};
use std::io::Write;

/// Random factor applied to a player's skill to produce a match score.
const SCORE_FACTOR: std::ops::Range<f64> = 0.5..2.0;

/// Generate `count` players named `player_00000001`, `player_00000002`, ... with skill 1 to 100.
pub fn random_players(rng: &mut impl Rng, count: usize) -> Vec<PlayerRecord> {
    (1..=count)
        .map(|i| PlayerRecord {
            id: format!("player_{i:08}"),
            skill: rng.gen_range(1..=100) as f64,
        })
        .collect()
}

#[derive(Debug)]
struct Entrant {
    record: PlayerRecord,
    id: PlayerId,
    /// Wins, draws and losses.
    tally: [u64; 3],
}

impl Entrant {
    fn record_result(&mut self, result: MatchResult) {
        let slot = match result {
            MatchResult::Win => 0,
            MatchResult::Draw => 1,
            MatchResult::Loss => 2,
        };
        self.tally[slot] += 1;
    }
}

/// A pool of unrated players rated by random head-to-head matches.
#[derive(Debug)]
pub struct Simulation {
    engine: Glicko2,
    roster: Roster,
    entrants: Vec<Entrant>,
}

impl Simulation {
    /// Start a simulation with a default rating for every record.
    ///
    /// Records without an id are skipped.
    pub fn new(engine: Glicko2, records: Vec<PlayerRecord>) -> Self {
        let mut roster = Roster::new();
        let entrants = records
            .into_iter()
            .filter(|record| {
                if record.id.is_empty() {
                    tracing::debug!(?record, "skipping player without id");
                }
                !record.id.is_empty()
            })
            .map(|record| Entrant {
                id: roster.add(Player::default()),
                record,
                tally: Default::default(),
            })
            .collect();
        Self {
            engine,
            roster,
            entrants,
        }
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Attempt `rounds` pairings. Pairings of a player with itself are skipped.
    pub fn run(&mut self, rng: &mut impl Rng, rounds: u64) {
        if self.is_empty() {
            return;
        }

        let mut played = 0u64;
        for _ in 0..rounds {
            let i = rng.gen_range(0..self.entrants.len());
            let j = rng.gen_range(0..self.entrants.len());
            if i == j {
                continue;
            }

            let score1 = self.entrants[i].record.skill * rng.gen_range(SCORE_FACTOR);
            let score2 = self.entrants[j].record.skill * rng.gen_range(SCORE_FACTOR);
            if let Err(err) = self.play(i, j, score1, score2) {
                tracing::warn!(
                    player = %self.entrants[i].record.id,
                    opponent = %self.entrants[j].record.id,
                    "skipping match: {err:#}"
                );
                continue;
            }
            played += 1;
        }
        tracing::info!(rounds, played, "simulation complete");
    }

    /// Play one match between the entrants at positions `i` and `j`.
    pub fn play(&mut self, i: usize, j: usize, score1: f64, score2: f64) -> anyhow::Result<()> {
        let m = Match::new(self.entrants[i].id, self.entrants[j].id, score1, score2)?;
        self.engine.calculate_match(&mut self.roster, &m)?;

        let outcome = m.outcome();
        self.entrants[i].record_result(outcome);
        self.entrants[j].record_result(outcome.reverse());
        Ok(())
    }

    /// Current standings, sorted by rating from lowest to highest.
    pub fn standings(&self) -> Vec<Standing> {
        self.entrants
            .iter()
            .filter_map(|entrant| {
                let player = self.roster.get(entrant.id).ok()?;
                Some(Standing::new(&entrant.record, player, entrant.tally))
            })
            .sorted_by(|a, b| a.r.total_cmp(&b.r))
            .collect()
    }
}

/// Write standings as CSV, with a header row.
pub fn write_csv(out: impl Write, standings: &[Standing]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for standing in standings {
        writer.serialize(standing)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn records(skills: &[f64]) -> Vec<PlayerRecord> {
        skills
            .iter()
            .enumerate()
            .map(|(i, &skill)| PlayerRecord {
                id: format!("p{i}"),
                skill,
            })
            .collect()
    }

    #[test]
    fn test_random_players() {
        let mut rng = StdRng::seed_from_u64(7);
        let players = random_players(&mut rng, 12);
        assert_eq!(players.len(), 12);
        assert_eq!(players[0].id, "player_00000001");
        assert_eq!(players[11].id, "player_00000012");
        assert!(players
            .iter()
            .all(|p| (1.0..=100.0).contains(&p.skill) && p.skill.fract() == 0.0));
    }

    #[test]
    fn test_skips_anonymous_players() {
        let mut input = records(&[10.0, 20.0]);
        input.push(PlayerRecord {
            id: String::new(),
            skill: 50.0,
        });
        let sim = Simulation::new(Glicko2::default(), input);
        assert_eq!(sim.len(), 2);
    }

    #[test]
    fn test_play_tallies() {
        let mut sim = Simulation::new(Glicko2::default(), records(&[10.0, 20.0, 30.0]));
        sim.play(0, 1, 5.0, 3.0).unwrap();
        sim.play(1, 2, 4.0, 4.0).unwrap();
        assert!(sim.play(2, 2, 1.0, 0.0).is_err());

        let standings = sim.standings();
        let by_id = |id: &str| standings.iter().find(|s| s.id == id).unwrap();
        assert_eq!([by_id("p0").win, by_id("p0").draw, by_id("p0").loss], [1, 0, 0]);
        assert_eq!([by_id("p1").win, by_id("p1").draw, by_id("p1").loss], [0, 1, 1]);
        assert_eq!([by_id("p2").win, by_id("p2").draw, by_id("p2").loss], [0, 1, 0]);
        assert!(by_id("p0").r > 1500.0);
    }

    #[test]
    fn test_run_is_reproducible_and_sorted() {
        // Skills far enough apart that every pairing has a foregone result.
        let skills = [1.0, 10.0, 100.0, 1000.0];
        let run = |seed| {
            let mut sim = Simulation::new(Glicko2::default(), records(&skills));
            sim.run(&mut StdRng::seed_from_u64(seed), 2_000);
            sim.standings()
        };

        let standings = run(42);
        assert_eq!(standings, run(42));
        assert!(standings.windows(2).all(|w| w[0].r <= w[1].r));

        // Every match has exactly one winner and one loser, or two drawers.
        let wins: u64 = standings.iter().map(|s| s.win).sum();
        let losses: u64 = standings.iter().map(|s| s.loss).sum();
        assert_eq!(wins, losses);

        let ids: Vec<_> = standings.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["p0", "p1", "p2", "p3"]);
        assert_eq!(standings[0].win, 0);
        assert_eq!(standings[3].loss, 0);
    }

    #[test]
    fn test_write_csv() {
        let sim = Simulation::new(Glicko2::default(), records(&[1.0]));
        let mut out = Vec::new();
        write_csv(&mut out, &sim.standings()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,skill,win,draw,loss,r,rd,mu,phi,sigma"
        );
        let row: Vec<_> = lines.next().unwrap().split(',').collect();
        assert_eq!(row.len(), 10);
        assert_eq!(row[0], "p0");
        assert_eq!(row[1].parse::<f64>().unwrap(), 1.0);
        assert_eq!(&row[2..5], ["0", "0", "0"]);
        assert_eq!(row[5].parse::<f64>().unwrap(), 1500.0);
        assert!(lines.next().is_none());
    }
}
