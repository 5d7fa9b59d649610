// Riot API URL builders
//
// Account-V1 and Match-V5 live on regional hosts (americas, europe, ...).
// Summoner-V4 and League-V4 live on the platform host (euw1, na1, ...).

use crate::error::AppError;

const RIOT_HOST: &str = "api.riotgames.com";

/// Regional routing cluster for a platform id.
pub fn regional_routing(platform: &str) -> Result<&'static str, AppError> {
    match platform.to_ascii_lowercase().as_str() {
        "na1" | "br1" | "la1" | "la2" => Ok("americas"),
        "euw1" | "eun1" | "tr1" | "ru" | "me1" => Ok("europe"),
        "kr" | "jp1" => Ok("asia"),
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => Ok("sea"),
        other => Err(AppError::ConfigError(format!("Unknown platform: {}", other))),
    }
}

fn path_segment(raw: &str) -> String {
    raw.replace('%', "%25")
        .replace(' ', "%20")
        .replace('#', "%23")
        .replace('/', "%2F")
}

pub fn account_by_riot_id(routing: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "https://{}.{}/riot/account/v1/accounts/by-riot-id/{}/{}",
        routing,
        RIOT_HOST,
        path_segment(game_name),
        path_segment(tag_line)
    )
}

pub fn summoner_by_puuid(platform: &str, puuid: &str) -> String {
    format!(
        "https://{}.{}/lol/summoner/v4/summoners/by-puuid/{}",
        platform, RIOT_HOST, puuid
    )
}

pub fn league_entries_by_puuid(platform: &str, puuid: &str) -> String {
    format!(
        "https://{}.{}/lol/league/v4/entries/by-puuid/{}",
        platform, RIOT_HOST, puuid
    )
}

pub fn match_ids_by_puuid(routing: &str, puuid: &str, queue_id: u32, count: usize) -> String {
    format!(
        "https://{}.{}/lol/match/v5/matches/by-puuid/{}/ids?queue={}&start=0&count={}",
        routing, RIOT_HOST, puuid, queue_id, count
    )
}

pub fn match_by_id(routing: &str, match_id: &str) -> String {
    format!(
        "https://{}.{}/lol/match/v5/matches/{}",
        routing, RIOT_HOST, match_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_routing() {
        assert_eq!(regional_routing("euw1").unwrap(), "europe");
        assert_eq!(regional_routing("NA1").unwrap(), "americas");
        assert_eq!(regional_routing("kr").unwrap(), "asia");
        assert!(regional_routing("moon1").is_err());
    }

    #[test]
    fn test_account_url_escapes_name() {
        assert_eq!(
            account_by_riot_id("europe", "Hide on bush", "KR1"),
            "https://europe.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Hide%20on%20bush/KR1"
        );
    }

    #[test]
    fn test_match_ids_url_filters_queue() {
        let url = match_ids_by_puuid("europe", "abc", 420, 20);
        assert!(url.ends_with("/by-puuid/abc/ids?queue=420&start=0&count=20"));
    }
}
