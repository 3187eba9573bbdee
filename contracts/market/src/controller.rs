//! # Controller Hooks
//!
//! The controller is the external policy contract that approves each action
//! before it runs and, when the market's `VerifyPolicy` is `Enforce`, checks
//! it again afterwards. Every hook answers with a `u32`: `0` allows, any other
//! value is a rejection code.

use soroban_sdk::{contractclient, log, Address, Env};

use crate::errors::MarketError;
use crate::storage::{MarketConfig, VerifyPolicy};

/// Interface of the external controller.
#[contractclient(name = "ControllerClient")]
pub trait ControllerInterface {
    fn borrow_allowed(env: Env, market: Address, borrower: Address, amount: u128) -> u32;

    fn borrow_verify(env: Env, market: Address, borrower: Address, amount: u128) -> u32;

    fn repay_allowed(
        env: Env,
        market: Address,
        payer: Address,
        borrower: Address,
        amount: u128,
    ) -> u32;

    fn repay_verify(
        env: Env,
        market: Address,
        payer: Address,
        borrower: Address,
        amount: u128,
        borrower_index: u128,
    ) -> u32;
}

pub fn borrow_allowed(
    env: &Env,
    config: &MarketConfig,
    borrower: &Address,
    amount: u128,
) -> Result<(), MarketError> {
    let answer = ControllerClient::new(env, &config.controller)
        .try_borrow_allowed(&env.current_contract_address(), borrower, &amount)
        .ok()
        .and_then(|r| r.ok());
    admit(env, answer, MarketError::AuthorizationRejected)
}

pub fn borrow_verify(
    env: &Env,
    config: &MarketConfig,
    borrower: &Address,
    amount: u128,
) -> Result<(), MarketError> {
    if config.verify_policy == VerifyPolicy::Skip {
        return Ok(());
    }
    let answer = ControllerClient::new(env, &config.controller)
        .try_borrow_verify(&env.current_contract_address(), borrower, &amount)
        .ok()
        .and_then(|r| r.ok());
    admit(env, answer, MarketError::VerifyRejected)
}

pub fn repay_allowed(
    env: &Env,
    config: &MarketConfig,
    payer: &Address,
    borrower: &Address,
    amount: u128,
) -> Result<(), MarketError> {
    let answer = ControllerClient::new(env, &config.controller)
        .try_repay_allowed(&env.current_contract_address(), payer, borrower, &amount)
        .ok()
        .and_then(|r| r.ok());
    admit(env, answer, MarketError::AuthorizationRejected)
}

pub fn repay_verify(
    env: &Env,
    config: &MarketConfig,
    payer: &Address,
    borrower: &Address,
    amount: u128,
    borrower_index: u128,
) -> Result<(), MarketError> {
    if config.verify_policy == VerifyPolicy::Skip {
        return Ok(());
    }
    let answer = ControllerClient::new(env, &config.controller)
        .try_repay_verify(
            &env.current_contract_address(),
            payer,
            borrower,
            &amount,
            &borrower_index,
        )
        .ok()
        .and_then(|r| r.ok());
    admit(env, answer, MarketError::VerifyRejected)
}

fn admit(env: &Env, answer: Option<u32>, rejection: MarketError) -> Result<(), MarketError> {
    match answer {
        Some(0) => Ok(()),
        Some(code) => {
            log!(env, "controller rejected", code);
            Err(rejection)
        }
        None => Err(MarketError::ControllerCallFailed),
    }
}
