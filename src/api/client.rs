use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::*;
use crate::config::Config;
use crate::domain::{Match, RankEntry, RiotAccount, Summoner};
use crate::error::AppError;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const MAX_RETRIES: u32 = 3;
const PER_SECOND: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => unreachable!(),
};
const PER_TWO_MINUTES: NonZeroU32 = match NonZeroU32::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Blocking Riot API client. Respects the development key limits of
/// 20 requests per second and 100 per two minutes.
pub struct RiotApiClient {
    config: Config,
    routing: &'static str,
    burst: DirectLimiter,
    sustained: DirectLimiter,
    clock: DefaultClock,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let routing = endpoints::regional_routing(&config.region)?;
        let sustained_quota =
            Quota::with_period(Duration::from_millis(1200)).map(|q| q.allow_burst(PER_TWO_MINUTES));
        let sustained_quota = sustained_quota
            .ok_or_else(|| AppError::ConfigError("invalid rate limit period".to_string()))?;

        Ok(RiotApiClient {
            config,
            routing,
            burst: RateLimiter::direct(Quota::per_second(PER_SECOND)),
            sustained: RateLimiter::direct(sustained_quota),
            clock: DefaultClock::default(),
        })
    }

    fn throttle(&self) {
        for limiter in [&self.burst, &self.sustained] {
            while let Err(not_until) = limiter.check() {
                thread::sleep(not_until.wait_time_from(self.clock.now()));
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let mut retry_count = 0;

        loop {
            self.throttle();
            tracing::debug!(url, "GET");

            let response = ureq::get(url)
                .set("X-Riot-Token", &self.config.api_key)
                .set("User-Agent", concat!("coach_diff/", env!("CARGO_PKG_VERSION")))
                .call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_json::<T>()
                        .map_err(|e| AppError::JsonError(e.to_string()));
                }
                Err(ureq::Error::Status(429, resp)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait = resp
                        .header("Retry-After")
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| Duration::from_millis(2000 * (retry_count as u64 + 1)));
                    tracing::warn!(?wait, attempt = retry_count + 1, "rate limited by Riot API");
                    thread::sleep(wait);
                    retry_count += 1;
                }
                Err(ureq::Error::Status(404, _)) => {
                    return Err(AppError::NotFound(url.to_string()));
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::ApiError(format!("HTTP {} from {}", code, url)));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    pub fn get_account(&self, game_name: &str, tag_line: &str) -> Result<RiotAccount, AppError> {
        let url = endpoints::account_by_riot_id(self.routing, game_name, tag_line);
        let dto: AccountDto = self.get_json(&url).map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(format!("{}#{}", game_name, tag_line)),
            other => other,
        })?;
        Ok(RiotAccount::try_from(dto)?)
    }

    pub fn get_summoner(&self, puuid: &str) -> Result<Summoner, AppError> {
        let url = endpoints::summoner_by_puuid(&self.config.region, puuid);
        let dto: SummonerDto = self.get_json(&url)?;
        Ok(Summoner::try_from(dto)?)
    }

    /// One entry per ranked queue the player has placed in.
    pub fn get_league_entries(&self, puuid: &str) -> Result<Vec<RankEntry>, AppError> {
        let url = endpoints::league_entries_by_puuid(&self.config.region, puuid);
        let dtos: Vec<LeagueEntryDto> = self.get_json(&url)?;
        dtos.into_iter()
            .map(|dto| RankEntry::try_from(dto).map_err(AppError::from))
            .collect()
    }

    /// Most recent match ids for the configured queue, newest first.
    pub fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_by_puuid(self.routing, puuid, self.config.queue_id, count);
        self.get_json(&url)
    }

    /// `None` when the match was played in another queue.
    pub fn get_match(&self, match_id: &str) -> Result<Option<Match>, AppError> {
        let url = endpoints::match_by_id(self.routing, match_id);
        let dto: MatchDto = self.get_json(&url)?;
        if dto.info.queue_id != self.config.queue_id as i32 {
            tracing::debug!(match_id, queue_id = dto.info.queue_id, "skipping match from other queue");
            return Ok(None);
        }
        Ok(Some(Match::try_from(&dto)?))
    }
}
