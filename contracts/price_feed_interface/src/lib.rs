#![no_std]

//! Read-side interface of a native-asset/USD price feed.
//!
//! Mirrors the aggregator shape used by common oracle networks: an answer is
//! a fixed-point integer with `decimals()` fractional digits, grouped into
//! numbered rounds.

use soroban_sdk::{contractclient, contracttype, Env, String};

/// A single price round as reported by a feed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    /// Number of fractional digits in `answer`.
    fn decimals(env: Env) -> u32;

    fn description(env: Env) -> String;

    fn version(env: Env) -> u32;

    /// Most recent round.
    fn latest_round_data(env: Env) -> RoundData;
}
