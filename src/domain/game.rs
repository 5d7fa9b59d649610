use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::match_record::MatchRecord;
use super::require_non_blank;
use crate::error::{LookupError, ValidationError};

/// Ranked Summoner's Rift is always five against five.
pub const PARTICIPANTS_PER_MATCH: usize = 10;

/// A finished ranked match and the records of all ten participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchData")]
pub struct Match {
    match_id: String,
    game_creation: Option<DateTime<Utc>>,
    duration_secs: i64,
    participants: Vec<MatchRecord>,
}

/// Unchecked on-disk shape of a [`Match`].
#[derive(Debug, Deserialize)]
pub struct MatchData {
    pub match_id: String,
    pub game_creation: Option<DateTime<Utc>>,
    pub duration_secs: i64,
    pub participants: Vec<MatchRecord>,
}

impl TryFrom<MatchData> for Match {
    type Error = ValidationError;

    fn try_from(data: MatchData) -> Result<Self, Self::Error> {
        Match::new(
            data.match_id,
            data.game_creation,
            data.duration_secs,
            data.participants,
        )
    }
}

impl Match {
    pub fn new(
        match_id: String,
        game_creation: Option<DateTime<Utc>>,
        duration_secs: i64,
        participants: Vec<MatchRecord>,
    ) -> Result<Self, ValidationError> {
        require_non_blank("match id", &match_id)?;
        if duration_secs <= 0 {
            return Err(ValidationError::NotPositive {
                field: "match duration",
                value: duration_secs,
            });
        }
        if participants.len() != PARTICIPANTS_PER_MATCH {
            return Err(ValidationError::ParticipantCount {
                match_id,
                expected: PARTICIPANTS_PER_MATCH,
                actual: participants.len(),
            });
        }
        if let Some(stray) = participants.iter().find(|p| p.match_id() != match_id) {
            return Err(ValidationError::ForeignParticipant {
                player_id: stray.player_id().to_string(),
                expected: match_id,
                found: stray.match_id().to_string(),
            });
        }
        // per-minute rates divide by the record's duration, so it must be the match's
        if let Some(stray) = participants
            .iter()
            .find(|p| p.duration_secs() != duration_secs)
        {
            return Err(ValidationError::DurationMismatch {
                player_id: stray.player_id().to_string(),
                match_id,
                expected: duration_secs,
                found: stray.duration_secs(),
            });
        }

        Ok(Match {
            match_id,
            game_creation,
            duration_secs,
            participants,
        })
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn game_creation(&self) -> Option<DateTime<Utc>> {
        self.game_creation
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs as f64 / 60.0
    }

    pub fn participants(&self) -> &[MatchRecord] {
        &self.participants
    }

    pub fn find_participant(&self, player_id: &str) -> Result<&MatchRecord, LookupError> {
        self.participants
            .iter()
            .find(|p| p.player_id() == player_id)
            .ok_or_else(|| LookupError::NotFound {
                player_id: player_id.to_string(),
                match_id: self.match_id.clone(),
            })
    }

    /// False both for a loss and for a player who was not in the match.
    pub fn did_player_win(&self, player_id: &str) -> bool {
        self.find_participant(player_id)
            .map(MatchRecord::win)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::match_record::MatchRecordData;

    fn lobby(match_id: &str) -> Vec<MatchRecord> {
        (0..PARTICIPANTS_PER_MATCH)
            .map(|i| {
                MatchRecord::new(MatchRecordData {
                    player_id: format!("p{}", i),
                    match_id: match_id.to_string(),
                    win: i < 5,
                    duration_secs: 1800,
                    ..Default::default()
                })
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_find_participant() {
        let game = Match::new("EUW1_7".to_string(), None, 1800, lobby("EUW1_7")).unwrap();

        assert_eq!(game.find_participant("p3").unwrap().player_id(), "p3");
        assert_eq!(
            game.find_participant("ghost").unwrap_err(),
            LookupError::NotFound {
                player_id: "ghost".to_string(),
                match_id: "EUW1_7".to_string(),
            }
        );
        assert!(game.did_player_win("p0"));
        assert!(!game.did_player_win("p9"));
        assert!(!game.did_player_win("ghost"));
        assert!((game.duration_minutes() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_requires_ten_participants() {
        let mut players = lobby("EUW1_7");
        players.pop();

        let err = Match::new("EUW1_7".to_string(), None, 1800, players).unwrap_err();
        assert_eq!(
            err,
            ValidationError::ParticipantCount {
                match_id: "EUW1_7".to_string(),
                expected: 10,
                actual: 9,
            }
        );
    }

    #[test]
    fn test_rejects_participant_from_other_match() {
        let mut players = lobby("EUW1_7");
        players[4] = lobby("EUW1_8").remove(4);

        let err = Match::new("EUW1_7".to_string(), None, 1800, players).unwrap_err();
        assert!(matches!(err, ValidationError::ForeignParticipant { .. }));
    }

    #[test]
    fn test_rejects_participant_with_different_duration() {
        let mut players = lobby("EUW1_7");
        players[0] = MatchRecord::new(MatchRecordData {
            player_id: "p0".to_string(),
            match_id: "EUW1_7".to_string(),
            lane_minions: 180,
            duration_secs: 600,
            ..Default::default()
        })
        .unwrap();

        let err = Match::new("EUW1_7".to_string(), None, 1800, players).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DurationMismatch {
                player_id: "p0".to_string(),
                match_id: "EUW1_7".to_string(),
                expected: 1800,
                found: 600,
            }
        );
    }

    #[test]
    fn test_rejects_blank_id_and_zero_duration() {
        assert_eq!(
            Match::new(" ".to_string(), None, 1800, lobby("EUW1_7")).unwrap_err(),
            ValidationError::Blank("match id")
        );
        assert!(Match::new("EUW1_7".to_string(), None, 0, lobby("EUW1_7")).is_err());
    }
}
