use serde::{Deserialize, Serialize};

use super::require_non_blank;
use crate::error::ValidationError;

/// A Riot account, identified by its PUUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RiotAccountData")]
pub struct RiotAccount {
    puuid: String,
    game_name: String,
    tag_line: String,
}

/// Unchecked on-disk shape of a [`RiotAccount`].
#[derive(Debug, Deserialize)]
pub struct RiotAccountData {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

impl TryFrom<RiotAccountData> for RiotAccount {
    type Error = ValidationError;

    fn try_from(data: RiotAccountData) -> Result<Self, Self::Error> {
        RiotAccount::new(data.puuid, data.game_name, data.tag_line)
    }
}

impl RiotAccount {
    pub fn new(puuid: String, game_name: String, tag_line: String) -> Result<Self, ValidationError> {
        require_non_blank("PUUID", &puuid)?;
        require_non_blank("game name", &game_name)?;
        require_non_blank("tag line", &tag_line)?;
        Ok(RiotAccount {
            puuid,
            game_name,
            tag_line,
        })
    }

    pub fn puuid(&self) -> &str {
        &self.puuid
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn tag_line(&self) -> &str {
        &self.tag_line
    }

    /// "Name#TAG"
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Server-specific profile of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SummonerData")]
pub struct Summoner {
    puuid: String,
    level: i64,
    profile_icon_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SummonerData {
    pub puuid: String,
    pub level: i64,
    pub profile_icon_id: i32,
}

impl TryFrom<SummonerData> for Summoner {
    type Error = ValidationError;

    fn try_from(data: SummonerData) -> Result<Self, Self::Error> {
        Summoner::new(data.puuid, data.level, data.profile_icon_id)
    }
}

impl Summoner {
    pub fn new(puuid: String, level: i64, profile_icon_id: i32) -> Result<Self, ValidationError> {
        require_non_blank("PUUID", &puuid)?;
        if level < 1 {
            return Err(ValidationError::NotPositive {
                field: "summoner level",
                value: level,
            });
        }
        Ok(Summoner {
            puuid,
            level,
            profile_icon_id,
        })
    }

    pub fn puuid(&self) -> &str {
        &self.puuid
    }

    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn profile_icon_id(&self) -> i32 {
        self.profile_icon_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_riot_id() {
        let account =
            RiotAccount::new("abc".to_string(), "Faker".to_string(), "KR1".to_string()).unwrap();
        assert_eq!(account.riot_id(), "Faker#KR1");
    }

    #[test]
    fn test_account_requires_all_parts() {
        assert_eq!(
            RiotAccount::new("abc".to_string(), "Faker".to_string(), " ".to_string()).unwrap_err(),
            ValidationError::Blank("tag line")
        );
    }

    #[test]
    fn test_summoner_level_must_be_positive() {
        assert!(Summoner::new("abc".to_string(), 1, 0).is_ok());
        assert_eq!(
            Summoner::new("abc".to_string(), 0, 0).unwrap_err(),
            ValidationError::NotPositive {
                field: "summoner level",
                value: 0
            }
        );
    }

    #[test]
    fn test_deserialize_revalidates() {
        let account: RiotAccount =
            serde_json::from_str(r#"{"puuid":"abc","game_name":"Faker","tag_line":"KR1"}"#)
                .unwrap();
        assert_eq!(account.riot_id(), "Faker#KR1");

        assert!(serde_json::from_str::<RiotAccount>(
            r#"{"puuid":" ","game_name":"Faker","tag_line":"KR1"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Summoner>(
            r#"{"puuid":"abc","level":0,"profile_icon_id":7}"#
        )
        .is_err());
    }
}
