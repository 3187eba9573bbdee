//! # Account Ledger
//!
//! Per-account borrow snapshots. The current balance is derived on demand:
//!
//! `balance = principal * borrow_index / snapshot.interest_index`

use soroban_sdk::{Address, Env};

use crate::errors::MarketError;
use crate::math;
use crate::storage::{self, BorrowSnapshot};

/// Stored snapshot for `account`, zero-valued if it never borrowed.
pub fn snapshot(env: &Env, account: &Address) -> BorrowSnapshot {
    storage::get_account_borrows(env, account)
}

/// Balance owed by `account` at `borrow_index`.
///
/// A snapshot holding principal with a zero index is corrupt and fails with
/// `DivideByZero` rather than reading as zero debt.
pub fn borrow_balance_stored(
    env: &Env,
    account: &Address,
    borrow_index: u128,
) -> Result<u128, MarketError> {
    let snapshot = snapshot(env, account);
    if snapshot.principal == 0 {
        return Ok(0);
    }
    Ok(math::mul_div(
        snapshot.principal,
        borrow_index,
        snapshot.interest_index,
    )?)
}

/// The only writer of account snapshots.
pub fn set_snapshot(env: &Env, account: &Address, principal: u128, interest_index: u128) {
    storage::set_account_borrows(
        env,
        account,
        &BorrowSnapshot {
            principal,
            interest_index,
        },
    );
}
