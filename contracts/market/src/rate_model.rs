use soroban_sdk::{contractclient, log, Env};

use crate::errors::MarketError;
use crate::storage::MarketConfig;

/// Interface of the external interest rate model.
#[contractclient(name = "RateModelClient")]
pub trait RateModelInterface {
    /// Borrow rate per ledger sequence, as a 1e18 mantissa.
    fn get_borrow_rate(env: Env, cash: u128, borrows: u128, reserves: u128) -> u128;
}

/// Query the configured model. Any invocation failure is a `RateModelError`.
pub fn borrow_rate(
    env: &Env,
    config: &MarketConfig,
    cash: u128,
    borrows: u128,
    reserves: u128,
) -> Result<u128, MarketError> {
    let client = RateModelClient::new(env, &config.rate_model);
    match client.try_get_borrow_rate(&cash, &borrows, &reserves) {
        Ok(Ok(rate)) => Ok(rate),
        _ => {
            log!(env, "rate model failed", cash, borrows, reserves);
            Err(MarketError::RateModelError)
        }
    }
}
