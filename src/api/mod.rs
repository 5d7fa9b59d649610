//! Riot Games API access: DTOs, endpoint URLs and the blocking client.

pub mod client;
pub mod endpoints;
pub mod models;

pub use client::RiotApiClient;
