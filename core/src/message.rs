use crate::player::Player;
use serde::{Deserialize, Serialize};

/// A competitor as described by a driver's input: an identifier plus a notion of true strength used
/// to generate scores.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PlayerRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub skill: f64,
}

/// One row of a standings table.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Standing {
    pub id: String,
    pub skill: f64,
    pub win: u64,
    pub draw: u64,
    pub loss: u64,
    pub r: f64,
    pub rd: f64,
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
}

impl Standing {
    pub fn new(record: &PlayerRecord, player: &Player, [win, draw, loss]: [u64; 3]) -> Self {
        Self {
            id: record.id.clone(),
            skill: record.skill,
            win,
            draw,
            loss,
            r: player.r(),
            rd: player.rd(),
            mu: player.mu(),
            phi: player.phi(),
            sigma: player.sigma(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_record_defaults() {
        let json = r#"[{"id": "player_00000001", "skill": 42}, {"skill": 7}, {"id": "x"}]"#;
        let records: Vec<PlayerRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].id, "player_00000001");
        assert_eq!(records[0].skill, 42.0);
        assert_eq!(records[1].id, "");
        assert_eq!(records[2].skill, 0.0);
    }

    #[test]
    fn test_standing() {
        let record = PlayerRecord {
            id: "p".into(),
            skill: 10.0,
        };
        let standing = Standing::new(&record, &Player::default(), [3, 1, 2]);
        assert_eq!(standing.win, 3);
        assert_eq!(standing.draw, 1);
        assert_eq!(standing.loss, 2);
        assert_eq!(standing.r, 1500.0);
        assert_eq!(standing.sigma, 0.06);

        let json = serde_json::to_value(&standing).unwrap();
        assert_eq!(json["id"], "p");
        assert_eq!(json["rd"], 350.0);
    }
}
