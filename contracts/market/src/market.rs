//! # Market State
//!
//! Aggregate state shared by every account: total debt, reserves, the global
//! borrow index and the freshness marker. The market is the sole owner of the
//! account ledger and the only writer of these totals.

use soroban_sdk::Env;

use crate::errors::MarketError;
use crate::storage::{self, MarketConfig};
use crate::transfer::TransferMechanism;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketTotals {
    pub total_borrows: u128,
    pub total_reserves: u128,
    pub borrow_index: u128,
    pub accrual_period: u32,
}

impl MarketTotals {
    pub fn load(env: &Env) -> Self {
        MarketTotals {
            total_borrows: storage::get_total_borrows(env),
            total_reserves: storage::get_total_reserves(env),
            borrow_index: storage::get_borrow_index(env),
            accrual_period: storage::get_accrual_period(env),
        }
    }

    pub fn store(&self, env: &Env) {
        storage::set_total_borrows(env, self.total_borrows);
        storage::set_total_reserves(env, self.total_reserves);
        storage::set_borrow_index(env, self.borrow_index);
        storage::set_accrual_period(env, self.accrual_period);
    }
}

/// Period identifier used by the freshness gate.
pub fn current_period(env: &Env) -> u32 {
    env.ledger().sequence()
}

pub fn is_fresh(env: &Env) -> bool {
    storage::get_accrual_period(env) == current_period(env)
}

/// Balance-changing actions require interest accrued for this period.
pub fn ensure_fresh(env: &Env) -> Result<(), MarketError> {
    if !is_fresh(env) {
        return Err(MarketError::MarketNotFresh);
    }
    Ok(())
}

/// Underlying the market can actually release.
///
/// This is the market's balance of the underlying minus whatever is committed
/// to an external sink. An encumbrance at or above the balance leaves no cash.
pub fn cash_available(env: &Env, config: &MarketConfig) -> Result<u128, MarketError> {
    let held = TransferMechanism::for_config(config)
        .balance_of(env, &env.current_contract_address())?;
    let encumbered = storage::get_encumbered_cash(env);
    if encumbered >= held {
        return Ok(0);
    }
    Ok(held - encumbered)
}
