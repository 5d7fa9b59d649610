use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{
    Division, Match, MatchRecord, MatchRecordData, RankEntry, RankEntryData, RankFlags,
    RiotAccount, Role, Summoner, Tier,
};
use crate::error::ValidationError;

// Account V1 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

impl TryFrom<AccountDto> for RiotAccount {
    type Error = ValidationError;

    fn try_from(dto: AccountDto) -> Result<Self, Self::Error> {
        RiotAccount::new(dto.puuid, dto.game_name, dto.tag_line)
    }
}

// Summoner V4 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub puuid: String,
    pub summoner_level: i64,
    #[serde(default)]
    pub profile_icon_id: i32,
}

impl TryFrom<SummonerDto> for Summoner {
    type Error = ValidationError;

    fn try_from(dto: SummonerDto) -> Result<Self, Self::Error> {
        Summoner::new(dto.puuid, dto.summoner_level, dto.profile_icon_id)
    }
}

// League V4 response (one per ranked queue)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub hot_streak: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub fresh_blood: bool,
    #[serde(default)]
    pub inactive: bool,
}

impl TryFrom<LeagueEntryDto> for RankEntry {
    type Error = ValidationError;

    fn try_from(dto: LeagueEntryDto) -> Result<Self, Self::Error> {
        let tier: Tier = dto.tier.parse()?;
        // apex tiers come back with a placeholder "I"
        let division = if tier.is_apex() || dto.rank.trim().is_empty() {
            None
        } else {
            Some(dto.rank.parse::<Division>()?)
        };

        RankEntry::new(RankEntryData {
            queue_type: dto.queue_type,
            tier,
            division,
            league_points: dto.league_points,
            wins: dto.wins,
            losses: dto.losses,
            flags: RankFlags {
                hot_streak: dto.hot_streak,
                veteran: dto.veteran,
                fresh_blood: dto.fresh_blood,
                inactive: dto.inactive,
            },
        })
    }
}

// Match V5 response
#[derive(Debug, Deserialize)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Seconds, or milliseconds on matches without `gameEndTimestamp`.
    pub game_duration: i64,
    #[serde(default)]
    pub game_end_timestamp: Option<i64>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub game_creation: Option<i64>,
    pub queue_id: i32,
    pub participants: Vec<ParticipantDto>,
}

impl MatchInfo {
    pub fn duration_secs(&self) -> i64 {
        if self.game_end_timestamp.is_some() {
            self.game_duration
        } else {
            self.game_duration / 1000
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub vision_score: u32,
    pub gold_earned: u32,
    pub total_damage_dealt_to_champions: u32,
}

impl ParticipantDto {
    fn to_record(&self, match_id: &str, duration_secs: i64) -> Result<MatchRecord, ValidationError> {
        MatchRecord::new(MatchRecordData {
            player_id: self.puuid.clone(),
            match_id: match_id.to_string(),
            champion: self.champion_name.clone(),
            role: Role::from_position(&self.team_position),
            win: self.win,
            kills: self.kills,
            deaths: self.deaths,
            assists: self.assists,
            lane_minions: self.total_minions_killed,
            jungle_minions: self.neutral_minions_killed,
            vision_score: self.vision_score,
            gold_earned: self.gold_earned,
            damage_dealt: self.total_damage_dealt_to_champions,
            duration_secs,
        })
    }
}

impl TryFrom<&MatchDto> for Match {
    type Error = ValidationError;

    fn try_from(dto: &MatchDto) -> Result<Self, Self::Error> {
        let match_id = &dto.metadata.match_id;
        let duration_secs = dto.info.duration_secs();
        let participants = dto
            .info
            .participants
            .iter()
            .map(|p| p.to_record(match_id, duration_secs))
            .collect::<Result<Vec<_>, _>>()?;
        let game_creation = dto
            .info
            .game_creation
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        Match::new(match_id.clone(), game_creation, duration_secs, participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_entry_drops_placeholder_division() {
        let dto: LeagueEntryDto = serde_json::from_str(
            r#"{
                "queueType": "RANKED_SOLO_5x5",
                "tier": "MASTER",
                "rank": "I",
                "leaguePoints": 231,
                "wins": 120,
                "losses": 100,
                "hotStreak": true
            }"#,
        )
        .unwrap();

        let entry = RankEntry::try_from(dto).unwrap();
        assert_eq!(entry.full_label(), "MASTER");
        assert_eq!(entry.league_points(), 231);
        assert!(entry.flags().hot_streak);
        assert!(!entry.flags().inactive);
    }

    #[test]
    fn test_divisioned_entry() {
        let dto: LeagueEntryDto = serde_json::from_str(
            r#"{
                "queueType": "RANKED_FLEX_SR",
                "tier": "EMERALD",
                "rank": "III",
                "leaguePoints": 12,
                "wins": 8,
                "losses": 2
            }"#,
        )
        .unwrap();

        let entry = RankEntry::try_from(dto).unwrap();
        assert_eq!(entry.full_label(), "EMERALD III");
        assert!(!entry.is_solo_queue());
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        let dto = LeagueEntryDto {
            queue_type: "RANKED_SOLO_5x5".to_string(),
            tier: "WOOD".to_string(),
            rank: "I".to_string(),
            league_points: 0,
            wins: 0,
            losses: 0,
            hot_streak: false,
            veteran: false,
            fresh_blood: false,
            inactive: false,
        };
        assert_eq!(
            RankEntry::try_from(dto).unwrap_err(),
            ValidationError::UnknownTier("WOOD".to_string())
        );
    }

    #[test]
    fn test_legacy_duration_in_millis() {
        let info = MatchInfo {
            game_duration: 1_800_000,
            game_end_timestamp: None,
            game_creation: None,
            queue_id: 420,
            participants: Vec::new(),
        };
        assert_eq!(info.duration_secs(), 1800);

        let info = MatchInfo {
            game_duration: 1800,
            game_end_timestamp: Some(1_700_000_000_000),
            ..info
        };
        assert_eq!(info.duration_secs(), 1800);
    }
}
