//! # StellarLend Borrow Market
//!
//! Borrow/repay accounting and interest accrual for a single underlying
//! asset. The market tracks per-account debt as a principal plus the global
//! borrow index at the time of the last update, accrues interest once per
//! ledger sequence through an external rate model, and asks an external
//! controller to approve every action.
//!
//! Balance-changing actions compute every new value and move the underlying
//! before the first ledger write; any failure returns an error and the host
//! discards the invocation's writes.

#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env};

mod accrual;
mod admin;
mod borrow;
mod controller;
mod errors;
mod events;
mod ledger;
mod market;
mod math;
mod rate_model;
mod repay;
mod storage;
mod transfer;

pub use accrual::MAX_BORROW_RATE;
pub use admin::MAX_RESERVE_FACTOR;
pub use controller::{ControllerClient, ControllerInterface};
pub use errors::MarketError;
pub use events::{
    AccrueInterestEvent, BorrowEvent, EncumberedCashEvent, NewControllerEvent, NewRateModelEvent,
    NewReserveFactorEvent, RepayBorrowEvent, VerifyPolicyEvent,
};
pub use math::EXP_SCALE;
pub use rate_model::{RateModelClient, RateModelInterface};
pub use repay::REPAY_ALL;
pub use storage::{BorrowSnapshot, MarketConfig, TransferKind, VerifyPolicy};

#[cfg(test)]
mod tests;

#[contract]
pub struct MarketContract;

#[contractimpl]
impl MarketContract {
    /// Initialize the market
    ///
    /// # Arguments
    /// * `admin` - Market admin (must authorize)
    /// * `config` - Underlying asset, transfer kind, controller, rate model,
    ///   reserve factor and verify policy
    ///
    /// # Errors
    /// - `AlreadyInitialized` - The market was already initialized
    /// - `InvalidParameter` - Reserve factor above `1e18`
    pub fn initialize(env: Env, admin: Address, config: MarketConfig) -> Result<(), MarketError> {
        admin::initialize(&env, admin, config)
    }

    /// Borrow underlying from the market
    ///
    /// Accrues interest, asks the controller for approval and sends `amount`
    /// of the underlying to the borrower.
    ///
    /// # Arguments
    /// * `borrower` - The borrower's address (must authorize)
    /// * `amount` - The amount to borrow
    ///
    /// # Returns
    /// The borrower's balance after the borrow
    ///
    /// # Errors
    /// - `AuthorizationRejected` - Controller refused the borrow
    /// - `InsufficientCash` - Market cannot release `amount`
    /// - `Overflow` - Account or market debt would exceed `u128`
    /// - `DivideByZero` - Borrower's snapshot is corrupt
    /// - `TransferFailed` - The underlying could not be sent
    /// - `RateModelError` - Accrual could not query the rate model
    pub fn borrow(env: Env, borrower: Address, amount: u128) -> Result<u128, MarketError> {
        borrow::borrow(&env, borrower, amount)
    }

    /// Repay the caller's own debt (token markets)
    ///
    /// The market pulls the repayment with `transfer_from`, so the borrower
    /// must have approved the market for at least the effective amount.
    ///
    /// # Arguments
    /// * `borrower` - The borrower and payer (must authorize)
    /// * `amount` - Amount to repay, or `REPAY_ALL` for the whole balance
    ///
    /// # Returns
    /// The effective amount repaid
    ///
    /// # Errors
    /// - `UnsupportedTransfer` - The market is a native market
    /// - `AuthorizationRejected` - Controller refused the repayment
    /// - `Underflow` - Amount exceeds the outstanding debt
    /// - `InsufficientBalance` / `InsufficientAllowance` - Payer cannot cover it
    /// - `TransferFailed` - The underlying did not arrive in full
    pub fn repay_borrow(env: Env, borrower: Address, amount: u128) -> Result<u128, MarketError> {
        repay::repay_borrow(&env, borrower, amount)
    }

    /// Repay another account's debt (token markets)
    ///
    /// # Arguments
    /// * `payer` - Account supplying the underlying (must authorize)
    /// * `borrower` - Account whose debt is reduced
    /// * `amount` - Amount to repay, or `REPAY_ALL` for the whole balance
    pub fn repay_borrow_behalf(
        env: Env,
        payer: Address,
        borrower: Address,
        amount: u128,
    ) -> Result<u128, MarketError> {
        repay::repay_borrow_behalf(&env, payer, borrower, amount)
    }

    /// Repay the caller's own debt (native markets)
    ///
    /// # Arguments
    /// * `borrower` - The borrower and sender of the value (must authorize)
    /// * `amount` - Amount to repay, or `REPAY_ALL` for the whole balance
    /// * `value` - Native value sent with the call; must equal the effective amount
    ///
    /// # Errors
    /// - `UnsupportedTransfer` - The market is a token market
    /// - `ValueMismatch` - `value` differs from the effective amount
    pub fn repay_borrow_native(
        env: Env,
        borrower: Address,
        amount: u128,
        value: u128,
    ) -> Result<u128, MarketError> {
        repay::repay_borrow_native(&env, borrower, amount, value)
    }

    /// Repay another account's debt (native markets)
    ///
    /// # Arguments
    /// * `payer` - Sender of the value (must authorize)
    /// * `borrower` - Account whose debt is reduced
    /// * `amount` - Amount to repay, or `REPAY_ALL` for the whole balance
    /// * `value` - Native value sent with the call; must equal the effective amount
    pub fn repay_borrow_behalf_native(
        env: Env,
        payer: Address,
        borrower: Address,
        amount: u128,
        value: u128,
    ) -> Result<u128, MarketError> {
        repay::repay_borrow_behalf_native(&env, payer, borrower, amount, value)
    }

    /// Accrue interest up to the current ledger sequence
    pub fn accrue_interest(env: Env) -> Result<(), MarketError> {
        accrual::accrue_interest(&env)
    }

    /// Replace the controller (admin only)
    pub fn set_controller(
        env: Env,
        caller: Address,
        controller: Address,
    ) -> Result<(), MarketError> {
        admin::set_controller(&env, caller, controller)
    }

    /// Replace the rate model (admin only)
    ///
    /// Interest is accrued under the old model first.
    pub fn set_rate_model(
        env: Env,
        caller: Address,
        rate_model: Address,
    ) -> Result<(), MarketError> {
        admin::set_rate_model(&env, caller, rate_model)
    }

    /// Set the share of interest kept as reserves (admin only)
    ///
    /// # Arguments
    /// * `caller` - The admin (must authorize)
    /// * `reserve_factor` - New factor as a mantissa, at most `1e18`
    pub fn set_reserve_factor(
        env: Env,
        caller: Address,
        reserve_factor: u128,
    ) -> Result<(), MarketError> {
        admin::set_reserve_factor(&env, caller, reserve_factor)
    }

    /// Enable or disable the controller's post-action verify hooks (admin only)
    pub fn set_verify_policy(
        env: Env,
        caller: Address,
        policy: VerifyPolicy,
    ) -> Result<(), MarketError> {
        admin::set_verify_policy(&env, caller, policy)
    }

    /// Set the underlying committed outside the market (admin only)
    ///
    /// Encumbered cash is held by the market but cannot be lent out.
    pub fn set_encumbered_cash(env: Env, caller: Address, amount: u128) -> Result<(), MarketError> {
        admin::set_encumbered_cash(&env, caller, amount)
    }

    pub fn get_config(env: Env) -> Result<MarketConfig, MarketError> {
        storage::get_config(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, MarketError> {
        storage::get_admin(&env)
    }

    /// Stored debt record of `account`
    pub fn borrow_snapshot(env: Env, account: Address) -> BorrowSnapshot {
        ledger::snapshot(&env, &account)
    }

    /// Debt of `account` at the stored borrow index, without accruing
    pub fn borrow_balance_stored(env: Env, account: Address) -> Result<u128, MarketError> {
        ledger::borrow_balance_stored(&env, &account, storage::get_borrow_index(&env))
    }

    /// Debt of `account` after accruing interest to the current sequence
    pub fn borrow_balance_current(env: Env, account: Address) -> Result<u128, MarketError> {
        accrual::accrue_interest(&env)?;
        ledger::borrow_balance_stored(&env, &account, storage::get_borrow_index(&env))
    }

    pub fn total_borrows(env: Env) -> u128 {
        storage::get_total_borrows(&env)
    }

    /// Market debt after accruing interest to the current sequence
    pub fn total_borrows_current(env: Env) -> Result<u128, MarketError> {
        accrual::accrue_interest(&env)?;
        Ok(storage::get_total_borrows(&env))
    }

    pub fn total_reserves(env: Env) -> u128 {
        storage::get_total_reserves(&env)
    }

    pub fn borrow_index(env: Env) -> u128 {
        storage::get_borrow_index(&env)
    }

    /// Ledger sequence of the last accrual
    pub fn accrual_period(env: Env) -> u32 {
        storage::get_accrual_period(&env)
    }

    /// Underlying the market can lend out right now
    pub fn get_cash(env: Env) -> Result<u128, MarketError> {
        let config = storage::get_config(&env)?;
        market::cash_available(&env, &config)
    }

    /// Rate the model currently reports for this market
    pub fn borrow_rate_per_period(env: Env) -> Result<u128, MarketError> {
        let config = storage::get_config(&env)?;
        let cash = market::cash_available(&env, &config)?;
        rate_model::borrow_rate(
            &env,
            &config,
            cash,
            storage::get_total_borrows(&env),
            storage::get_total_reserves(&env),
        )
    }
}
