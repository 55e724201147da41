#![no_std]

mod errors;
mod events;
mod storage;

pub use errors::MockPriceFeedError;
use events::AnswerUpdatedEvent;
pub use price_feed_interface::RoundData;
use soroban_sdk::{contract, contractimpl, Env, String};
use storage::DataKey;

const VERSION: u32 = 0;

/// Settable price feed for development networks and tests.
///
/// Every update opens a new round; the full round history stays queryable.
#[contract]
pub struct MockPriceFeed;

fn latest_round_id(env: &Env) -> Result<u64, MockPriceFeedError> {
    env.storage()
        .instance()
        .get(&DataKey::LatestRound)
        .ok_or(MockPriceFeedError::NotInitialized)
}

fn read_round(env: &Env, round_id: u64) -> Result<RoundData, MockPriceFeedError> {
    env.storage()
        .persistent()
        .get(&DataKey::Round(round_id))
        .ok_or(MockPriceFeedError::RoundNotFound)
}

fn write_round(env: &Env, round: &RoundData) {
    env.storage()
        .persistent()
        .set(&DataKey::Round(round.round_id), round);
    env.storage()
        .instance()
        .set(&DataKey::LatestRound, &round.round_id);

    AnswerUpdatedEvent {
        round_id: round.round_id,
        answer: round.answer,
        updated_at: round.updated_at,
    }
    .publish(env);
}

#[contractimpl]
impl MockPriceFeed {
    /// Initialize the feed with its precision and a first answer (round 1)
    pub fn initialize(
        env: Env,
        decimals: u32,
        initial_answer: i128,
    ) -> Result<(), MockPriceFeedError> {
        if env.storage().instance().has(&DataKey::Decimals) {
            return Err(MockPriceFeedError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Decimals, &decimals);

        let now = env.ledger().timestamp();
        write_round(
            &env,
            &RoundData {
                round_id: 1,
                answer: initial_answer,
                started_at: now,
                updated_at: now,
                answered_in_round: 1,
            },
        );
        Ok(())
    }

    /// Publish a new answer as the next round
    pub fn update_answer(env: Env, answer: i128) -> Result<(), MockPriceFeedError> {
        let round_id = latest_round_id(&env)?
            .checked_add(1)
            .ok_or(MockPriceFeedError::RoundOverflow)?;
        let now = env.ledger().timestamp();
        write_round(
            &env,
            &RoundData {
                round_id,
                answer,
                started_at: now,
                updated_at: now,
                answered_in_round: round_id,
            },
        );
        Ok(())
    }

    /// Overwrite a specific round and make it the latest one
    pub fn update_round_data(
        env: Env,
        round_id: u64,
        answer: i128,
        timestamp: u64,
        started_at: u64,
    ) -> Result<(), MockPriceFeedError> {
        latest_round_id(&env)?;
        write_round(
            &env,
            &RoundData {
                round_id,
                answer,
                started_at,
                updated_at: timestamp,
                answered_in_round: round_id,
            },
        );
        Ok(())
    }

    pub fn decimals(env: Env) -> Result<u32, MockPriceFeedError> {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .ok_or(MockPriceFeedError::NotInitialized)
    }

    pub fn description(env: Env) -> String {
        String::from_str(&env, "MockPriceFeed")
    }

    pub fn version(_env: Env) -> u32 {
        VERSION
    }

    /// Get the most recent round
    pub fn latest_round_data(env: Env) -> Result<RoundData, MockPriceFeedError> {
        let round_id = latest_round_id(&env)?;
        read_round(&env, round_id)
    }

    /// Get a historical round
    pub fn get_round_data(env: Env, round_id: u64) -> Result<RoundData, MockPriceFeedError> {
        latest_round_id(&env)?;
        read_round(&env, round_id)
    }

    pub fn latest_answer(env: Env) -> Result<i128, MockPriceFeedError> {
        Ok(Self::latest_round_data(env)?.answer)
    }

    pub fn latest_round(env: Env) -> Result<u64, MockPriceFeedError> {
        latest_round_id(&env)
    }

    pub fn latest_timestamp(env: Env) -> Result<u64, MockPriceFeedError> {
        Ok(Self::latest_round_data(env)?.updated_at)
    }

    pub fn get_answer(env: Env, round_id: u64) -> Result<i128, MockPriceFeedError> {
        Ok(Self::get_round_data(env, round_id)?.answer)
    }

    pub fn get_timestamp(env: Env, round_id: u64) -> Result<u64, MockPriceFeedError> {
        Ok(Self::get_round_data(env, round_id)?.updated_at)
    }
}
