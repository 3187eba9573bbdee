//! # Interest Accrual
//!
//! Brings the market's totals up to the current ledger sequence.
//!
//! ## Model
//! For `delta` sequences elapsed since the last accrual at a per-sequence
//! borrow rate `r` (1e18 mantissa) reported by the rate model:
//!
//! ```text
//! factor         = r * delta
//! interest       = factor * total_borrows
//! total_borrows  = total_borrows + interest
//! total_reserves = reserve_factor * interest + total_reserves
//! borrow_index   = factor * borrow_index + borrow_index
//! ```
//!
//! Every value is computed before the first write, so an arithmetic failure
//! leaves the stored totals untouched.

use soroban_sdk::{log, Env};

use crate::errors::MarketError;
use crate::events;
use crate::market::{self, MarketTotals};
use crate::math::{self, Exp};
use crate::rate_model;
use crate::storage::{self, MarketConfig};

/// Highest borrow rate accepted from the model: 0.0005% per ledger sequence.
pub const MAX_BORROW_RATE: u128 = 5_000_000_000_000;

/// Accrue interest up to the current ledger sequence.
///
/// Does nothing when the market is already fresh.
///
/// # Errors
/// - `RateModelError` - The rate model could not be queried
/// - `BorrowRateTooHigh` - The model returned more than `MAX_BORROW_RATE`
/// - `Overflow` - An intermediate value exceeds `u128`
pub fn accrue_interest(env: &Env) -> Result<(), MarketError> {
    let current = market::current_period(env);
    storage::bump_core_ttl(env);
    let prior = MarketTotals::load(env);
    if prior.accrual_period == current {
        return Ok(());
    }

    let config = storage::get_config(env)?;
    let cash_prior = market::cash_available(env, &config)?;
    let (next, interest) = accrued_totals(env, &config, &prior, cash_prior, current)?;

    next.store(env);
    events::emit_accrue_interest(
        env,
        cash_prior,
        interest,
        next.borrow_index,
        next.total_borrows,
    );
    Ok(())
}

/// Totals as they would stand at `current`, without writing anything.
///
/// Returns the new totals and the interest accumulated over the step.
fn accrued_totals(
    env: &Env,
    config: &MarketConfig,
    prior: &MarketTotals,
    cash: u128,
    current: u32,
) -> Result<(MarketTotals, u128), MarketError> {
    let rate = rate_model::borrow_rate(
        env,
        config,
        cash,
        prior.total_borrows,
        prior.total_reserves,
    )?;
    if rate > MAX_BORROW_RATE {
        log!(env, "borrow rate too high", rate);
        return Err(MarketError::BorrowRateTooHigh);
    }

    let delta = current
        .checked_sub(prior.accrual_period)
        .ok_or(MarketError::Underflow)?;
    let factor = Exp::new(rate).mul_scalar(u128::from(delta))?;

    let interest = factor.mul_scalar_truncate(prior.total_borrows)?;
    let total_borrows = math::add(interest, prior.total_borrows)?;
    let total_reserves =
        Exp::new(config.reserve_factor).mul_scalar_truncate_add(interest, prior.total_reserves)?;
    let borrow_index = factor.mul_scalar_truncate_add(prior.borrow_index, prior.borrow_index)?;

    Ok((
        MarketTotals {
            total_borrows,
            total_reserves,
            borrow_index,
            accrual_period: current,
        },
        interest,
    ))
}
