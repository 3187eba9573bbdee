//! # Admin Module
//!
//! One-time initialization and the admin-only configuration setters.
//!
//! Setters that change how interest accrues (`set_rate_model`,
//! `set_reserve_factor`) accrue under the old parameters first, so the new
//! values only apply from the current ledger sequence onwards.

use soroban_sdk::{Address, Env};

use crate::accrual::accrue_interest;
use crate::errors::MarketError;
use crate::events::{
    EncumberedCashEvent, NewControllerEvent, NewRateModelEvent, NewReserveFactorEvent,
    VerifyPolicyEvent,
};
use crate::market::{self, MarketTotals};
use crate::math::EXP_SCALE;
use crate::storage::{self, MarketConfig, VerifyPolicy};

/// Highest reserve factor: all interest goes to reserves.
pub const MAX_RESERVE_FACTOR: u128 = EXP_SCALE;

/// Initialize the market.
///
/// Starts the borrow index at `1e18` and marks the market fresh at the current
/// ledger sequence.
///
/// # Errors
/// - `AlreadyInitialized` - `initialize` was called before
/// - `InvalidParameter` - `reserve_factor` is above `1e18`
pub fn initialize(env: &Env, admin: Address, config: MarketConfig) -> Result<(), MarketError> {
    if storage::has_admin(env) {
        return Err(MarketError::AlreadyInitialized);
    }
    admin.require_auth();

    if config.reserve_factor > MAX_RESERVE_FACTOR {
        return Err(MarketError::InvalidParameter);
    }

    storage::set_admin(env, &admin);
    storage::set_config(env, &config);
    MarketTotals {
        total_borrows: 0,
        total_reserves: 0,
        borrow_index: EXP_SCALE,
        accrual_period: market::current_period(env),
    }
    .store(env);
    storage::set_encumbered_cash(env, 0);
    Ok(())
}

/// Require that `caller` is the admin and has authorized the call.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), MarketError> {
    let admin = storage::get_admin(env)?;
    if admin != *caller {
        return Err(MarketError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn set_controller(env: &Env, caller: Address, controller: Address) -> Result<(), MarketError> {
    require_admin(env, &caller)?;
    let mut config = storage::get_config(env)?;
    let old_controller = config.controller.clone();
    config.controller = controller.clone();
    storage::set_config(env, &config);

    NewControllerEvent {
        old_controller,
        new_controller: controller,
    }
    .publish(env);
    Ok(())
}

/// Replace the rate model after accruing under the current one.
pub fn set_rate_model(env: &Env, caller: Address, rate_model: Address) -> Result<(), MarketError> {
    require_admin(env, &caller)?;
    accrue_interest(env)?;

    let mut config = storage::get_config(env)?;
    let old_rate_model = config.rate_model.clone();
    config.rate_model = rate_model.clone();
    storage::set_config(env, &config);

    NewRateModelEvent {
        old_rate_model,
        new_rate_model: rate_model,
    }
    .publish(env);
    Ok(())
}

/// Replace the reserve factor after accruing under the current one.
///
/// # Errors
/// - `InvalidParameter` - `reserve_factor` is above `1e18`
/// - `MarketNotFresh` - Accrual did not bring the market up to date
pub fn set_reserve_factor(
    env: &Env,
    caller: Address,
    reserve_factor: u128,
) -> Result<(), MarketError> {
    require_admin(env, &caller)?;
    accrue_interest(env)?;
    market::ensure_fresh(env)?;

    if reserve_factor > MAX_RESERVE_FACTOR {
        return Err(MarketError::InvalidParameter);
    }

    let mut config = storage::get_config(env)?;
    let old_reserve_factor = config.reserve_factor;
    config.reserve_factor = reserve_factor;
    storage::set_config(env, &config);

    NewReserveFactorEvent {
        old_reserve_factor,
        new_reserve_factor: reserve_factor,
    }
    .publish(env);
    Ok(())
}

pub fn set_verify_policy(
    env: &Env,
    caller: Address,
    policy: VerifyPolicy,
) -> Result<(), MarketError> {
    require_admin(env, &caller)?;
    let mut config = storage::get_config(env)?;
    config.verify_policy = policy;
    storage::set_config(env, &config);

    VerifyPolicyEvent { policy }.publish(env);
    Ok(())
}

/// Record how much of the market's underlying is committed elsewhere.
pub fn set_encumbered_cash(env: &Env, caller: Address, amount: u128) -> Result<(), MarketError> {
    require_admin(env, &caller)?;
    storage::set_encumbered_cash(env, amount);

    EncumberedCashEvent { amount }.publish(env);
    Ok(())
}
