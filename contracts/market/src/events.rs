//! # Market Events
//!
//! Notifications published after each committed action. Topics are the
//! snake_case struct names (`borrow_event`, `repay_borrow_event`, ...).

use soroban_sdk::{contractevent, Address, Env};

use crate::storage::VerifyPolicy;

/// Emitted after a successful borrow.
#[contractevent]
#[derive(Clone, Debug)]
pub struct BorrowEvent {
    /// Account that received the underlying
    pub borrower: Address,
    /// Amount borrowed in this action
    pub borrow_amount: u128,
    /// Borrower's balance after the action
    pub account_borrows: u128,
    /// Market total after the action
    pub total_borrows: u128,
}

/// Emitted after a successful repayment.
#[contractevent]
#[derive(Clone, Debug)]
pub struct RepayBorrowEvent {
    /// Account that paid
    pub payer: Address,
    /// Account whose debt was reduced
    pub borrower: Address,
    /// Effective amount repaid (the full balance for repay-all)
    pub repay_amount: u128,
    /// Borrower's balance after the action
    pub account_borrows: u128,
    /// Market total after the action
    pub total_borrows: u128,
}

/// Emitted when interest is accrued for a new ledger sequence.
#[contractevent]
#[derive(Clone, Debug)]
pub struct AccrueInterestEvent {
    pub cash_prior: u128,
    pub interest_accumulated: u128,
    pub borrow_index: u128,
    pub total_borrows: u128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct NewControllerEvent {
    pub old_controller: Address,
    pub new_controller: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct NewRateModelEvent {
    pub old_rate_model: Address,
    pub new_rate_model: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct NewReserveFactorEvent {
    pub old_reserve_factor: u128,
    pub new_reserve_factor: u128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct VerifyPolicyEvent {
    pub policy: VerifyPolicy,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct EncumberedCashEvent {
    pub amount: u128,
}

pub fn emit_borrow(
    env: &Env,
    borrower: Address,
    borrow_amount: u128,
    account_borrows: u128,
    total_borrows: u128,
) {
    BorrowEvent {
        borrower,
        borrow_amount,
        account_borrows,
        total_borrows,
    }
    .publish(env);
}

pub fn emit_repay_borrow(
    env: &Env,
    payer: Address,
    borrower: Address,
    repay_amount: u128,
    account_borrows: u128,
    total_borrows: u128,
) {
    RepayBorrowEvent {
        payer,
        borrower,
        repay_amount,
        account_borrows,
        total_borrows,
    }
    .publish(env);
}

pub fn emit_accrue_interest(
    env: &Env,
    cash_prior: u128,
    interest_accumulated: u128,
    borrow_index: u128,
    total_borrows: u128,
) {
    AccrueInterestEvent {
        cash_prior,
        interest_accumulated,
        borrow_index,
        total_borrows,
    }
    .publish(env);
}
