//! Ranked ladder position: tiers, divisions and per-queue entries.
//!
//! IRON through DIAMOND are split into divisions IV (lowest) to I with
//! 0-100 LP each. MASTER, GRANDMASTER and CHALLENGER have no divisions and
//! uncapped LP.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::require_non_blank;
use crate::error::ValidationError;

pub const RANKED_SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub const ALL: [Tier; 10] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    /// MASTER and above: no divisions, uncapped LP.
    pub fn is_apex(self) -> bool {
        self >= Tier::Master
    }

    /// The tier one step up the ladder, `None` at the top.
    pub fn next(self) -> Option<Tier> {
        let idx = Tier::ALL.iter().position(|t| *t == self)?;
        Tier::ALL.get(idx + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Tier::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownTier(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    I,
    II,
    III,
    IV,
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = match self {
            Division::I => "I",
            Division::II => "II",
            Division::III => "III",
            Division::IV => "IV",
        };
        f.write_str(numeral)
    }
}

impl FromStr for Division {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "I" => Ok(Division::I),
            "II" => Ok(Division::II),
            "III" => Ok(Division::III),
            "IV" => Ok(Division::IV),
            other => Err(ValidationError::UnknownDivision(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankFlags {
    pub hot_streak: bool,
    /// 100+ games in the current tier this season.
    pub veteran: bool,
    /// Recently promoted.
    pub fresh_blood: bool,
    /// Flagged for decay.
    pub inactive: bool,
}

/// Unchecked fields of a [`RankEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntryData {
    pub queue_type: String,
    pub tier: Tier,
    pub division: Option<Division>,
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
    pub flags: RankFlags,
}

/// A player's standing in one ranked queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RankEntryData")]
pub struct RankEntry {
    queue_type: String,
    tier: Tier,
    division: Option<Division>,
    league_points: i32,
    wins: u32,
    losses: u32,
    flags: RankFlags,
}

impl RankEntry {
    pub fn new(data: RankEntryData) -> Result<Self, ValidationError> {
        require_non_blank("queue type", &data.queue_type)?;

        let tier = data.tier;
        match (tier.is_apex(), data.division) {
            (true, Some(_)) => return Err(ValidationError::UnexpectedDivision { tier }),
            (false, None) => return Err(ValidationError::MissingDivision { tier }),
            _ => {}
        }
        if !tier.is_apex() && !(0..=100).contains(&data.league_points) {
            return Err(ValidationError::LeaguePointsOutOfRange {
                tier,
                lp: data.league_points,
            });
        }

        Ok(RankEntry {
            queue_type: data.queue_type,
            tier,
            division: data.division,
            league_points: data.league_points,
            wins: data.wins,
            losses: data.losses,
            flags: data.flags,
        })
    }

    pub fn queue_type(&self) -> &str {
        &self.queue_type
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn division(&self) -> Option<Division> {
        self.division
    }

    pub fn league_points(&self) -> i32 {
        self.league_points
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn flags(&self) -> RankFlags {
        self.flags
    }

    pub fn total_games(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses)
    }

    /// Win rate as a percentage, 0 when no games were played.
    pub fn win_rate(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            0.0
        } else {
            self.wins as f64 * 100.0 / total as f64
        }
    }

    pub fn is_solo_queue(&self) -> bool {
        self.queue_type == RANKED_SOLO_QUEUE
    }

    /// "GOLD II", or just the tier for MASTER and above.
    pub fn full_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RankEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.division {
            Some(division) => write!(f, "{} {}", self.tier, division),
            None => write!(f, "{}", self.tier),
        }
    }
}

impl TryFrom<RankEntryData> for RankEntry {
    type Error = ValidationError;

    fn try_from(data: RankEntryData) -> Result<Self, Self::Error> {
        RankEntry::new(data)
    }
}
