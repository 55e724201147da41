//! Native-asset to USD conversion backed by a [`PriceFeedInterface`] oracle.
//!
//! USD values are fixed-point integers with [`USD_DECIMALS`] fractional
//! digits regardless of the feed's own precision.
//!
//! [`PriceFeedInterface`]: price_feed_interface::PriceFeedInterface

use crate::errors::FundMeError;
use price_feed_interface::PriceFeedClient;
use soroban_sdk::{Address, Env};

pub const USD_DECIMALS: u32 = 18;

/// Move `value` from `from` to `to` fractional digits, truncating when
/// precision is lost.
pub(crate) fn rescale(value: i128, from: u32, to: u32) -> Result<i128, FundMeError> {
    if from <= to {
        10i128
            .checked_pow(to - from)
            .and_then(|factor| value.checked_mul(factor))
            .ok_or(FundMeError::ConversionOverflow)
    } else {
        10i128
            .checked_pow(from - to)
            .map(|factor| value / factor)
            .ok_or(FundMeError::ConversionOverflow)
    }
}

/// Current price of one whole native unit in USD.
pub fn get_price(env: &Env, price_feed: &Address) -> Result<i128, FundMeError> {
    let feed = PriceFeedClient::new(env, price_feed);
    let answer = feed.latest_round_data().answer;
    if answer <= 0 {
        return Err(FundMeError::InvalidPrice);
    }
    rescale(answer, feed.decimals(), USD_DECIMALS)
}

/// USD value of `amount` base units of an asset with `token_decimals`.
pub fn get_conversion_rate(
    env: &Env,
    price_feed: &Address,
    amount: i128,
    token_decimals: u32,
) -> Result<i128, FundMeError> {
    let price = get_price(env, price_feed)?;
    let unit = 10i128
        .checked_pow(token_decimals)
        .ok_or(FundMeError::ConversionOverflow)?;
    price
        .checked_mul(amount)
        .map(|value| value / unit)
        .ok_or(FundMeError::ConversionOverflow)
}
