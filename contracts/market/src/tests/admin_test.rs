use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::errors::MarketError;
use crate::VerifyPolicy;

#[test]
fn test_initialize_sets_defaults() {
    let env = Env::default();
    let m = setup_token_market(&env);

    assert_eq!(m.t.market.get_admin(), m.t.admin);
    assert_eq!(m.t.market.borrow_index(), ONE);
    assert_eq!(m.t.market.total_borrows(), 0);
    assert_eq!(m.t.market.total_reserves(), 0);
    assert_eq!(m.t.market.accrual_period(), 100);

    let config = m.t.market.get_config();
    assert_eq!(config.underlying, m.t.underlying);
    assert_eq!(config.transfer_kind, TransferKind::Token);
    assert_eq!(config.verify_policy, VerifyPolicy::Skip);
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let m = setup_token_market(&env);
    let config = m.t.market.get_config();

    let result = m.t.market.try_initialize(&m.t.admin, &config);
    assert_eq!(result, Err(Ok(MarketError::AlreadyInitialized)));
}

#[test]
fn test_initialize_rejects_reserve_factor_above_one() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let market_id = env.register(MarketContract, ());
    let market = MarketContractClient::new(&env, &market_id);

    let config = MarketConfig {
        underlying: Address::generate(&env),
        transfer_kind: TransferKind::Token,
        controller: Address::generate(&env),
        rate_model: Address::generate(&env),
        reserve_factor: ONE + 1,
        verify_policy: VerifyPolicy::Skip,
    };
    assert_eq!(
        market.try_initialize(&admin, &config),
        Err(Ok(MarketError::InvalidParameter))
    );
}

#[test]
fn test_uninitialized_market_reports_not_initialized() {
    let env = Env::default();
    env.mock_all_auths();
    let market_id = env.register(MarketContract, ());
    let market = MarketContractClient::new(&env, &market_id);
    let borrower = Address::generate(&env);

    assert_eq!(market.try_get_config(), Err(Ok(MarketError::NotInitialized)));
    assert_eq!(market.try_get_admin(), Err(Ok(MarketError::NotInitialized)));
    assert_eq!(
        market.try_borrow(&borrower, &1),
        Err(Ok(MarketError::NotInitialized))
    );
}

#[test]
fn test_setters_require_admin() {
    let env = Env::default();
    let m = setup_token_market(&env);
    let intruder = Address::generate(&env);
    let other = Address::generate(&env);

    assert_eq!(
        m.t.market.try_set_controller(&intruder, &other),
        Err(Ok(MarketError::Unauthorized))
    );
    assert_eq!(
        m.t.market.try_set_rate_model(&intruder, &other),
        Err(Ok(MarketError::Unauthorized))
    );
    assert_eq!(
        m.t.market.try_set_reserve_factor(&intruder, &1),
        Err(Ok(MarketError::Unauthorized))
    );
    assert_eq!(
        m.t.market
            .try_set_verify_policy(&intruder, &VerifyPolicy::Enforce),
        Err(Ok(MarketError::Unauthorized))
    );
    assert_eq!(
        m.t.market.try_set_encumbered_cash(&intruder, &1),
        Err(Ok(MarketError::Unauthorized))
    );
}

#[test]
fn test_set_controller_and_policy() {
    let env = Env::default();
    let m = setup_token_market(&env);
    let controller = Address::generate(&env);

    m.t.market.set_controller(&m.t.admin, &controller);
    m.t.market
        .set_verify_policy(&m.t.admin, &VerifyPolicy::Enforce);

    let config = m.t.market.get_config();
    assert_eq!(config.controller, controller);
    assert_eq!(config.verify_policy, VerifyPolicy::Enforce);
}

#[test]
fn test_set_rate_model_accrues_under_old_model() {
    let env = Env::default();
    let m = setup_token_market(&env);
    let borrower = Address::generate(&env);
    m.t.pretend_borrow(&borrower, ONE, ONE, ONE);
    m.t.rate_model.set_rate(&1_000_000_000_000);
    m.t.fast_forward(3);

    let replacement = Address::generate(&env);
    m.t.market.set_rate_model(&m.t.admin, &replacement);

    assert_eq!(m.t.market.get_config().rate_model, replacement);
    assert_eq!(m.t.market.total_borrows(), ONE + 3_000_000_000_000);
    assert_eq!(m.t.market.accrual_period(), 103);
}

#[test]
fn test_set_rate_model_fails_if_old_model_fails() {
    let env = Env::default();
    let m = setup_token_market(&env);
    m.t.rate_model.set_failing(&true);
    m.t.fast_forward(1);

    let replacement = Address::generate(&env);
    assert_eq!(
        m.t.market.try_set_rate_model(&m.t.admin, &replacement),
        Err(Ok(MarketError::RateModelError))
    );
    assert_eq!(m.t.market.get_config().rate_model, m.t.rate_model.address);
}

#[test]
fn test_set_reserve_factor() {
    let env = Env::default();
    let m = setup_token_market(&env);

    m.t.market.set_reserve_factor(&m.t.admin, &ONE);
    assert_eq!(m.t.market.get_config().reserve_factor, ONE);

    assert_eq!(
        m.t.market.try_set_reserve_factor(&m.t.admin, &(ONE + 1)),
        Err(Ok(MarketError::InvalidParameter))
    );
    assert_eq!(m.t.market.get_config().reserve_factor, ONE);
}

#[test]
fn test_set_reserve_factor_accrues_first() {
    let env = Env::default();
    let m = setup_token_market(&env);
    let borrower = Address::generate(&env);
    m.t.pretend_borrow(&borrower, ONE, ONE, ONE);
    m.t.rate_model.set_rate(&1_000_000_000_000);
    m.t.fast_forward(1);

    m.t.market.set_reserve_factor(&m.t.admin, &(ONE / 2));

    // The elapsed sequence accrued at the old factor of zero.
    assert_eq!(m.t.market.total_reserves(), 0);
    assert_eq!(m.t.market.accrual_period(), 101);

    m.t.fast_forward(1);
    m.t.market.accrue_interest();
    let interest = (ONE + 1_000_000_000_000) / 1_000_000;
    assert_eq!(m.t.market.total_reserves(), interest / 2);
}
