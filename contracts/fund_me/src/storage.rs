use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,                      // -> Address
    PriceFeed,                  // -> Address
    Token,                      // -> Address
    TokenDecimals,              // -> u32
    Round,                      // -> u32, bumped by every withdrawal
    FunderCount,                // -> u32, funders in the current round
    Funder(u32),                // index -> Address
    AmountFunded(u32, Address), // (round, funder) -> i128
}
