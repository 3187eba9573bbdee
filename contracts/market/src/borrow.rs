//! # Borrow Implementation
//!
//! Lends the market's underlying to a borrower and records the debt against
//! the current borrow index.
//!
//! ## Ordering
//! Checks run before any arithmetic, arithmetic before the transfer, and the
//! transfer before the first ledger write:
//!
//! 1. accrue interest
//! 2. controller `borrow_allowed`
//! 3. freshness
//! 4. available cash
//! 5. new account and market totals
//! 6. transfer out
//! 7. commit snapshot and `total_borrows`
//! 8. `BorrowEvent`
//! 9. controller `borrow_verify` (enforced policy only)

use soroban_sdk::{Address, Env};

use crate::accrual::accrue_interest;
use crate::controller;
use crate::errors::MarketError;
use crate::events;
use crate::ledger;
use crate::market::{self, MarketTotals};
use crate::math;
use crate::storage;
use crate::transfer::TransferMechanism;

/// Borrow `amount` of the underlying.
///
/// # Arguments
/// * `env` - The contract environment
/// * `borrower` - Account receiving the underlying (must authorize)
/// * `amount` - Amount to borrow
///
/// # Returns
/// The borrower's balance after the action
pub fn borrow(env: &Env, borrower: Address, amount: u128) -> Result<u128, MarketError> {
    borrower.require_auth();
    accrue_interest(env)?;
    borrow_fresh(env, &borrower, amount)
}

/// Borrow against an already accrued market.
pub(crate) fn borrow_fresh(
    env: &Env,
    borrower: &Address,
    amount: u128,
) -> Result<u128, MarketError> {
    let config = storage::get_config(env)?;

    controller::borrow_allowed(env, &config, borrower, amount)?;
    market::ensure_fresh(env)?;

    if amount > market::cash_available(env, &config)? {
        return Err(MarketError::InsufficientCash);
    }

    let totals = MarketTotals::load(env);
    let account_borrows = ledger::borrow_balance_stored(env, borrower, totals.borrow_index)?;
    let account_borrows_new = math::add(account_borrows, amount)?;
    let total_borrows_new = math::add(totals.total_borrows, amount)?;

    TransferMechanism::for_config(&config).transfer_out(env, borrower, amount)?;

    ledger::set_snapshot(env, borrower, account_borrows_new, totals.borrow_index);
    storage::set_total_borrows(env, total_borrows_new);

    events::emit_borrow(
        env,
        borrower.clone(),
        amount,
        account_borrows_new,
        total_borrows_new,
    );

    controller::borrow_verify(env, &config, borrower, amount)?;
    Ok(account_borrows_new)
}
