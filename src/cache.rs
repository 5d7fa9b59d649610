use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Match;
use crate::error::AppError;

/// Fetched matches for one player, kept on disk so reruns only download
/// what is new. Matches are immutable once played, so entries never expire.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchCache {
    pub player: String,
    pub region: String,
    pub last_updated: DateTime<Utc>,
    pub matches: Vec<Match>,
}

impl MatchCache {
    pub fn new(player: &str, region: &str) -> Self {
        MatchCache {
            player: player.to_string(),
            region: region.to_string(),
            last_updated: Utc::now(),
            matches: Vec::new(),
        }
    }

    /// `~/.coach_diff` unless overridden.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coach_diff")
    }

    pub fn cache_path(dir: &Path, player: &str, region: &str) -> PathBuf {
        let file = format!("{}_{}.json", region, player.replace(['#', ' ', '/'], "_"));
        dir.join(file)
    }

    /// Missing file means an empty cache. A file that does not parse is an error.
    pub fn load(dir: &Path, player: &str, region: &str) -> Result<Self, AppError> {
        let path = Self::cache_path(dir, player, region);

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::Cache(format!("Failed to parse {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(MatchCache::new(player, region)),
            Err(e) => Err(AppError::Cache(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::Cache(format!("Failed to create {}: {}", dir.display(), e)))?;

        let path = Self::cache_path(dir, &self.player, &self.region);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Cache(format!("Failed to serialize cache: {}", e)))?;

        fs::write(&path, json)
            .map_err(|e| AppError::Cache(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(())
    }

    pub fn get(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.match_id() == match_id)
    }

    pub fn contains(&self, match_id: &str) -> bool {
        self.get(match_id).is_some()
    }

    /// Adds unseen matches and keeps the most recent first.
    pub fn add_matches(&mut self, new_matches: Vec<Match>) {
        let existing: HashSet<String> = self
            .matches
            .iter()
            .map(|m| m.match_id().to_string())
            .collect();

        self.matches.extend(
            new_matches
                .into_iter()
                .filter(|m| !existing.contains(m.match_id())),
        );
        // undated matches sink to the end
        self.matches
            .sort_by(|a, b| b.game_creation().cmp(&a.game_creation()));

        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchRecord, MatchRecordData, PARTICIPANTS_PER_MATCH};
    use chrono::TimeZone;

    fn game(match_id: &str, day: u32) -> Match {
        let players = (0..PARTICIPANTS_PER_MATCH)
            .map(|i| {
                MatchRecord::new(MatchRecordData {
                    player_id: format!("p{}", i),
                    match_id: match_id.to_string(),
                    duration_secs: 1500,
                    ..Default::default()
                })
                .unwrap()
            })
            .collect();
        let created = Utc.with_ymd_and_hms(2026, 3, day, 18, 0, 0).single();
        Match::new(match_id.to_string(), created, 1500, players).unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("coach_diff_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_add_matches_dedupes_and_sorts_newest_first() {
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        cache.add_matches(vec![game("KR_1", 1), game("KR_3", 3)]);
        cache.add_matches(vec![game("KR_2", 2), game("KR_3", 3)]);

        let ids: Vec<&str> = cache.matches.iter().map(|m| m.match_id()).collect();
        assert_eq!(ids, vec!["KR_3", "KR_2", "KR_1"]);
        assert!(cache.contains("KR_2"));
        assert!(cache.get("KR_9").is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = temp_dir("roundtrip");
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        cache.add_matches(vec![game("KR_1", 1)]);
        cache.save(&dir).unwrap();

        let loaded = MatchCache::load(&dir, "Faker#KR1", "kr").unwrap();
        assert_eq!(loaded.matches, cache.matches);
        assert_eq!(loaded.region, "kr");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_empty_cache() {
        let dir = temp_dir("missing");
        let cache = MatchCache::load(&dir, "Nobody#EUW", "euw1").unwrap();
        assert!(cache.matches.is_empty());
        assert_eq!(cache.player, "Nobody#EUW");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(MatchCache::cache_path(&dir, "Broken#EUW", "euw1"), "{ not json").unwrap();

        assert!(matches!(
            MatchCache::load(&dir, "Broken#EUW", "euw1"),
            Err(AppError::Cache(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
