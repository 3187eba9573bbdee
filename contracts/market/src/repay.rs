//! # Repay Implementation
//!
//! Reduces a borrower's debt with underlying supplied by a payer, who may be
//! the borrower or a third party.
//!
//! Token markets pull the repayment with `transfer_from` against the payer's
//! allowance. Native markets take a `value` argument standing in for the
//! value attached to the call; it must match the effective repay amount
//! exactly. Calling the wrong family of entrypoints for the market's
//! `TransferKind` fails with `UnsupportedTransfer`.
//!
//! Passing `REPAY_ALL` as the amount repays exactly the outstanding balance.

use soroban_sdk::{Address, Env};

use crate::accrual::accrue_interest;
use crate::controller;
use crate::errors::MarketError;
use crate::events;
use crate::ledger;
use crate::market::{self, MarketTotals};
use crate::math;
use crate::storage::{self, TransferKind};
use crate::transfer::{CallValue, TransferMechanism};

/// Amount meaning "repay the whole outstanding balance".
pub const REPAY_ALL: u128 = u128::MAX;

/// Repay the caller's own debt on a token market.
pub fn repay_borrow(env: &Env, borrower: Address, amount: u128) -> Result<u128, MarketError> {
    borrower.require_auth();
    require_kind(env, TransferKind::Token)?;
    accrue_interest(env)?;
    repay_borrow_fresh(env, &borrower, &borrower, amount, None)
}

/// Repay another account's debt on a token market.
pub fn repay_borrow_behalf(
    env: &Env,
    payer: Address,
    borrower: Address,
    amount: u128,
) -> Result<u128, MarketError> {
    payer.require_auth();
    require_kind(env, TransferKind::Token)?;
    accrue_interest(env)?;
    repay_borrow_fresh(env, &payer, &borrower, amount, None)
}

/// Repay the caller's own debt on a native market, sending `value` along.
pub fn repay_borrow_native(
    env: &Env,
    borrower: Address,
    amount: u128,
    value: u128,
) -> Result<u128, MarketError> {
    borrower.require_auth();
    require_kind(env, TransferKind::Native)?;
    accrue_interest(env)?;
    let call_value = CallValue {
        sender: borrower.clone(),
        value,
    };
    repay_borrow_fresh(env, &borrower, &borrower, amount, Some(call_value))
}

/// Repay another account's debt on a native market, sending `value` along.
pub fn repay_borrow_behalf_native(
    env: &Env,
    payer: Address,
    borrower: Address,
    amount: u128,
    value: u128,
) -> Result<u128, MarketError> {
    payer.require_auth();
    require_kind(env, TransferKind::Native)?;
    accrue_interest(env)?;
    let call_value = CallValue {
        sender: payer.clone(),
        value,
    };
    repay_borrow_fresh(env, &payer, &borrower, amount, Some(call_value))
}

/// Repay against an already accrued market.
///
/// # Returns
/// The effective amount repaid
///
/// # Errors
/// - `AuthorizationRejected` - The controller refused the repayment
/// - `MarketNotFresh` - Interest was not accrued for this ledger sequence
/// - `Underflow` - The repayment exceeds the borrower's or the market's debt
/// - `SenderMismatch` / `ValueMismatch` - Native value does not match the call
/// - `InsufficientBalance` / `InsufficientAllowance` - Token payer cannot cover it
/// - `TransferFailed` - The underlying did not arrive in full
pub(crate) fn repay_borrow_fresh(
    env: &Env,
    payer: &Address,
    borrower: &Address,
    amount: u128,
    call_value: Option<CallValue>,
) -> Result<u128, MarketError> {
    let config = storage::get_config(env)?;

    controller::repay_allowed(env, &config, payer, borrower, amount)?;
    market::ensure_fresh(env)?;

    let totals = MarketTotals::load(env);
    // The verify hook sees the index the borrower was last settled at.
    let borrower_index = ledger::snapshot(env, borrower).interest_index;
    let account_borrows = ledger::borrow_balance_stored(env, borrower, totals.borrow_index)?;
    let repay_amount = if amount == REPAY_ALL {
        account_borrows
    } else {
        amount
    };

    let account_borrows_new = math::sub(account_borrows, repay_amount)?;
    let total_borrows_new = math::sub(totals.total_borrows, repay_amount)?;

    TransferMechanism::for_config(&config).transfer_in(
        env,
        payer,
        repay_amount,
        call_value.as_ref(),
    )?;

    ledger::set_snapshot(env, borrower, account_borrows_new, totals.borrow_index);
    storage::set_total_borrows(env, total_borrows_new);

    events::emit_repay_borrow(
        env,
        payer.clone(),
        borrower.clone(),
        repay_amount,
        account_borrows_new,
        total_borrows_new,
    );

    controller::repay_verify(
        env,
        &config,
        payer,
        borrower,
        repay_amount,
        borrower_index,
    )?;
    Ok(repay_amount)
}

fn require_kind(env: &Env, expected: TransferKind) -> Result<(), MarketError> {
    let config = storage::get_config(env)?;
    if TransferMechanism::for_config(&config).kind() != expected {
        return Err(MarketError::UnsupportedTransfer);
    }
    Ok(())
}
