#![no_std]

mod errors;
mod events;
pub mod price_converter;
mod storage;
mod token;

pub use errors::FundMeError;
use events::{FundedEvent, InitializedEvent, WithdrawnEvent};
use price_feed_interface::PriceFeedClient;
use soroban_sdk::{contract, contractimpl, Address, Env};
use storage::DataKey;

/// Smallest accepted contribution: 50 USD, 18 decimals.
pub const MINIMUM_USD: i128 = 50 * 10i128.pow(price_converter::USD_DECIMALS);

#[contract]
pub struct FundMeContract;

fn read_address(env: &Env, key: &DataKey) -> Result<Address, FundMeError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(FundMeError::NotInitialized)
}

fn read_round(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Round).unwrap_or(0)
}

fn read_funder_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::FunderCount)
        .unwrap_or(0)
}

fn read_amount_funded(env: &Env, round: u32, funder: Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::AmountFunded(round, funder))
        .unwrap_or(0)
}

pub(crate) fn add_contribution(funded: i128, amount: i128) -> Result<i128, FundMeError> {
    funded
        .checked_add(amount)
        .ok_or(FundMeError::ArithmeticOverflow)
}

fn next_round(round: u32) -> Result<u32, FundMeError> {
    round.checked_add(1).ok_or(FundMeError::ArithmeticOverflow)
}

/// Owner check shared by both withdraw variants.
fn require_owner(caller: &Address, owner: &Address) -> Result<(), FundMeError> {
    if caller != owner {
        return Err(FundMeError::NotOwner);
    }
    caller.require_auth();
    Ok(())
}

/// Send the whole balance to `owner`. Nothing in storage is touched, so a
/// rejected transfer leaves the ledger exactly as it was.
fn pay_out(env: &Env, token_address: &Address, owner: &Address) -> Result<i128, FundMeError> {
    let contract_address = env.current_contract_address();
    let amount = token::balance(env, token_address, &contract_address);
    if amount > 0 {
        token::try_transfer(env, token_address, &contract_address, owner, &amount)?;
    }
    Ok(amount)
}

/// Contributions are keyed by round, so opening a new round zeroes every
/// funder at once and empties the funder list without visiting it.
fn close_round(env: &Env, owner: Address, amount: i128, next_round: u32, funders_cleared: u32) {
    env.storage().instance().set(&DataKey::Round, &next_round);
    env.storage().instance().set(&DataKey::FunderCount, &0u32);

    WithdrawnEvent {
        owner,
        amount,
        funders_cleared,
    }
    .publish(env);
}

/// Everything a withdrawal reads, loaded in one pass.
struct WithdrawContext {
    owner: Address,
    token: Address,
    round: u32,
    funder_count: u32,
}

impl WithdrawContext {
    fn load(env: &Env) -> Result<Self, FundMeError> {
        Ok(Self {
            owner: read_address(env, &DataKey::Owner)?,
            token: read_address(env, &DataKey::Token)?,
            round: read_round(env),
            funder_count: read_funder_count(env),
        })
    }
}

#[contractimpl]
impl FundMeContract {
    /// Bind the ledger to its owner, price feed and native asset token
    pub fn initialize(
        env: Env,
        owner: Address,
        price_feed: Address,
        token: Address,
    ) -> Result<(), FundMeError> {
        // Check if already initialized
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(FundMeError::AlreadyInitialized);
        }

        // Require owner authorization
        owner.require_auth();

        let token_decimals = token::decimals(&env, &token);

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::PriceFeed, &price_feed);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::TokenDecimals, &token_decimals);

        InitializedEvent {
            owner,
            price_feed,
            token,
        }
        .publish(&env);

        Ok(())
    }

    /// Contribute `amount` of the native asset; must be worth at least
    /// [`MINIMUM_USD`] at the current feed price
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), FundMeError> {
        let price_feed = read_address(&env, &DataKey::PriceFeed)?;
        let token_address = read_address(&env, &DataKey::Token)?;

        // Require funder authorization
        funder.require_auth();

        if amount <= 0 {
            return Err(FundMeError::InsufficientContribution);
        }

        let token_decimals: u32 = env
            .storage()
            .instance()
            .get(&DataKey::TokenDecimals)
            .ok_or(FundMeError::NotInitialized)?;
        let usd_value =
            price_converter::get_conversion_rate(&env, &price_feed, amount, token_decimals)?;
        if usd_value < MINIMUM_USD {
            return Err(FundMeError::InsufficientContribution);
        }

        let round = read_round(&env);
        let funded = read_amount_funded(&env, round, funder.clone());
        let total = add_contribution(funded, amount)?;
        let index = read_funder_count(&env);
        let funder_count = index
            .checked_add(1)
            .ok_or(FundMeError::ArithmeticOverflow)?;

        // Transfer tokens from funder to contract
        let contract_address = env.current_contract_address();
        token::transfer(&env, &token_address, &funder, &contract_address, &amount);

        // Update contribution
        env.storage()
            .persistent()
            .set(&DataKey::AmountFunded(round, funder.clone()), &total);

        // Append funder, duplicates included
        env.storage()
            .persistent()
            .set(&DataKey::Funder(index), &funder);
        env.storage()
            .instance()
            .set(&DataKey::FunderCount, &funder_count);

        FundedEvent {
            funder,
            amount,
            usd_value,
        }
        .publish(&env);

        Ok(())
    }

    /// Pay the whole balance to the owner and reset all contributions (owner only)
    pub fn withdraw(env: Env, caller: Address) -> Result<(), FundMeError> {
        let owner = read_address(&env, &DataKey::Owner)?;
        require_owner(&caller, &owner)?;
        let round = next_round(read_round(&env))?;

        let token_address = read_address(&env, &DataKey::Token)?;
        let amount = pay_out(&env, &token_address, &owner)?;

        let funders_cleared = read_funder_count(&env);
        close_round(&env, owner, amount, round, funders_cleared);
        Ok(())
    }

    /// Same outcome as [`Self::withdraw`], with all stored state read up front
    pub fn cheaper_withdraw(env: Env, caller: Address) -> Result<(), FundMeError> {
        let context = WithdrawContext::load(&env)?;
        require_owner(&caller, &context.owner)?;
        let round = next_round(context.round)?;

        let amount = pay_out(&env, &context.token, &context.owner)?;

        close_round(&env, context.owner, amount, round, context.funder_count);
        Ok(())
    }

    /// Get the funder at `index` in funding order
    pub fn get_funder(env: Env, index: u32) -> Result<Address, FundMeError> {
        if index >= read_funder_count(&env) {
            return Err(FundMeError::IndexOutOfRange);
        }
        env.storage()
            .persistent()
            .get(&DataKey::Funder(index))
            .ok_or(FundMeError::IndexOutOfRange)
    }

    pub fn get_funder_count(env: Env) -> u32 {
        read_funder_count(&env)
    }

    /// Get the amount contributed by `funder` since the last withdrawal
    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        read_amount_funded(&env, read_round(&env), funder)
    }

    pub fn get_price_feed(env: Env) -> Result<Address, FundMeError> {
        read_address(&env, &DataKey::PriceFeed)
    }

    pub fn get_owner(env: Env) -> Result<Address, FundMeError> {
        read_address(&env, &DataKey::Owner)
    }

    pub fn get_token(env: Env) -> Result<Address, FundMeError> {
        read_address(&env, &DataKey::Token)
    }

    /// Version reported by the configured price feed
    pub fn get_version(env: Env) -> Result<u32, FundMeError> {
        let price_feed = read_address(&env, &DataKey::PriceFeed)?;
        Ok(PriceFeedClient::new(&env, &price_feed).version())
    }

    /// Get the native asset balance held by the ledger
    pub fn get_balance(env: Env) -> Result<i128, FundMeError> {
        let token_address = read_address(&env, &DataKey::Token)?;
        Ok(token::balance(
            &env,
            &token_address,
            &env.current_contract_address(),
        ))
    }

    /// USD value (18 decimals) of `amount` at the current feed price
    pub fn get_usd_value(env: Env, amount: i128) -> Result<i128, FundMeError> {
        if amount <= 0 {
            return Err(FundMeError::InvalidAmount);
        }
        let price_feed = read_address(&env, &DataKey::PriceFeed)?;
        let token_decimals: u32 = env
            .storage()
            .instance()
            .get(&DataKey::TokenDecimals)
            .ok_or(FundMeError::NotInitialized)?;
        price_converter::get_conversion_rate(&env, &price_feed, amount, token_decimals)
    }
}
