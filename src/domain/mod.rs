//! Immutable value objects built from provider data.
//!
//! Every type here validates its invariants at construction and exposes
//! its fields through accessors only.

pub mod account;
pub mod game;
pub mod match_record;
pub mod rank;

pub use account::{RiotAccount, Summoner};
pub use game::{Match, PARTICIPANTS_PER_MATCH};
pub use match_record::{per_minute, MatchRecord, MatchRecordData, Role};
pub use rank::{Division, RankEntry, RankEntryData, RankFlags, Tier, RANKED_SOLO_QUEUE};

use crate::error::ValidationError;

pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank(field))
    } else {
        Ok(())
    }
}
