use serde::{Deserialize, Serialize};
use std::fmt;

use super::require_non_blank;
use crate::error::ValidationError;

/// Lane position as reported by the provider's `teamPosition` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Remakes and some custom games leave the position empty.
    pub fn from_position(position: &str) -> Self {
        match position {
            "TOP" => Role::Top,
            "JUNGLE" => Role::Jungle,
            "MIDDLE" | "MID" => Role::Middle,
            "BOTTOM" | "ADC" => Role::Bottom,
            "UTILITY" | "SUPPORT" => Role::Utility,
            _ => Role::Unknown,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Middle => "Mid",
            Role::Bottom => "Bot",
            Role::Utility => "Support",
            Role::Unknown => "?",
        };
        f.write_str(name)
    }
}

/// `value` per minute, or 0 when there is no playing time to divide by.
pub fn per_minute(value: f64, minutes: f64) -> f64 {
    if minutes > 0.0 {
        value / minutes
    } else {
        0.0
    }
}

/// Unchecked fields of a [`MatchRecord`]. Doubles as the on-disk shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecordData {
    pub player_id: String,
    pub match_id: String,
    pub champion: String,
    pub role: Role,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub lane_minions: u32,
    pub jungle_minions: u32,
    pub vision_score: u32,
    pub gold_earned: u32,
    pub damage_dealt: u32,
    pub duration_secs: i64,
}

/// One participant's performance in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchRecordData")]
pub struct MatchRecord {
    player_id: String,
    match_id: String,
    champion: String,
    role: Role,
    win: bool,
    kills: u32,
    deaths: u32,
    assists: u32,
    lane_minions: u32,
    jungle_minions: u32,
    vision_score: u32,
    gold_earned: u32,
    damage_dealt: u32,
    duration_secs: i64,
}

impl MatchRecord {
    pub fn new(data: MatchRecordData) -> Result<Self, ValidationError> {
        require_non_blank("player id", &data.player_id)?;
        require_non_blank("match id", &data.match_id)?;
        if data.duration_secs <= 0 {
            return Err(ValidationError::NotPositive {
                field: "match duration",
                value: data.duration_secs,
            });
        }

        Ok(MatchRecord {
            player_id: data.player_id,
            match_id: data.match_id,
            champion: data.champion,
            role: data.role,
            win: data.win,
            kills: data.kills,
            deaths: data.deaths,
            assists: data.assists,
            lane_minions: data.lane_minions,
            jungle_minions: data.jungle_minions,
            vision_score: data.vision_score,
            gold_earned: data.gold_earned,
            damage_dealt: data.damage_dealt,
            duration_secs: data.duration_secs,
        })
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn champion(&self) -> &str {
        &self.champion
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn win(&self) -> bool {
        self.win
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn assists(&self) -> u32 {
        self.assists
    }

    pub fn vision_score(&self) -> u32 {
        self.vision_score
    }

    pub fn gold_earned(&self) -> u32 {
        self.gold_earned
    }

    pub fn damage_dealt(&self) -> u32 {
        self.damage_dealt
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs as f64 / 60.0
    }

    /// (kills + assists) / deaths, counting a deathless game as one death.
    pub fn kda(&self) -> f64 {
        let deaths = self.deaths.max(1);
        (self.kills as f64 + self.assists as f64) / deaths as f64
    }

    pub fn total_cs(&self) -> u64 {
        u64::from(self.lane_minions) + u64::from(self.jungle_minions)
    }

    pub fn cs_per_min(&self) -> f64 {
        per_minute(self.total_cs() as f64, self.duration_minutes())
    }

    pub fn vision_per_min(&self) -> f64 {
        per_minute(self.vision_score as f64, self.duration_minutes())
    }

    pub fn gold_per_min(&self) -> f64 {
        per_minute(self.gold_earned as f64, self.duration_minutes())
    }

    pub fn damage_per_min(&self) -> f64 {
        per_minute(self.damage_dealt as f64, self.duration_minutes())
    }
}

impl TryFrom<MatchRecordData> for MatchRecord {
    type Error = ValidationError;

    fn try_from(data: MatchRecordData) -> Result<Self, Self::Error> {
        MatchRecord::new(data)
    }
}
