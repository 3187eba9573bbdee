
pub mod admin_test;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::storage::{self, BorrowSnapshot, MarketConfig, TransferKind, VerifyPolicy};
use crate::{MarketContract, MarketContractClient};
use mocks::{MockController, MockControllerClient, MockRateModel, MockRateModelClient, MockToken, MockTokenClient};

pub const BORROW_AMOUNT: u128 = 10_000;
pub const REPAY_AMOUNT: u128 = 1_000;
pub const ONE: u128 = 1_000_000_000_000_000_000;

/// A market wired to a scripted controller and rate model.
pub struct TestMarket {
    pub env: Env,
    pub admin: Address,
    pub market: MarketContractClient<'static>,
    pub controller: MockControllerClient<'static>,
    pub rate_model: MockRateModelClient<'static>,
    pub underlying: Address,
}

/// Everything a failed borrow or repay must leave untouched.
#[derive(Debug, Eq, PartialEq)]
pub struct MarketState {
    pub snapshot: BorrowSnapshot,
    pub total_borrows: u128,
    pub total_reserves: u128,
    pub borrow_index: u128,
    pub accrual_period: u32,
}

/// Market whose underlying is a `MockToken`.
pub struct TokenMarket {
    pub t: TestMarket,
    pub token: MockTokenClient<'static>,
}

/// Market whose underlying is the native asset contract.
pub struct NativeMarket {
    pub t: TestMarket,
    pub native: token::Client<'static>,
    pub native_admin: token::StellarAssetClient<'static>,
}

fn setup_market(env: &Env, underlying: &Address, transfer_kind: TransferKind) -> TestMarket {
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.sequence_number = 100);

    let admin = Address::generate(env);
    let controller_id = env.register(MockController, ());
    let rate_model_id = env.register(MockRateModel, ());
    let market_id = env.register(MarketContract, ());
    let market = MarketContractClient::new(env, &market_id);

    market.initialize(
        &admin,
        &MarketConfig {
            underlying: underlying.clone(),
            transfer_kind,
            controller: controller_id.clone(),
            rate_model: rate_model_id.clone(),
            reserve_factor: 0,
            verify_policy: VerifyPolicy::Skip,
        },
    );

    TestMarket {
        env: env.clone(),
        admin,
        market,
        controller: MockControllerClient::new(env, &controller_id),
        rate_model: MockRateModelClient::new(env, &rate_model_id),
        underlying: underlying.clone(),
    }
}

pub fn setup_token_market(env: &Env) -> TokenMarket {
    let token_id = env.register(MockToken, ());
    let t = setup_market(env, &token_id, TransferKind::Token);
    TokenMarket {
        t,
        token: MockTokenClient::new(env, &token_id),
    }
}

pub fn setup_native_market(env: &Env) -> NativeMarket {
    let issuer = Address::generate(env);
    let native_id = env.register_stellar_asset_contract_v2(issuer).address();
    let t = setup_market(env, &native_id, TransferKind::Native);
    NativeMarket {
        t,
        native: token::Client::new(env, &native_id),
        native_admin: token::StellarAssetClient::new(env, &native_id),
    }
}

impl TestMarket {
    /// Advance the ledger so the market is no longer fresh.
    pub fn fast_forward(&self, sequences: u32) {
        self.env
            .ledger()
            .with_mut(|li| li.sequence_number += sequences);
    }

    /// Give `borrower` a debt without going through `borrow`.
    ///
    /// Sets the account snapshot to `{principal, account_index}`, the market's
    /// total borrows to `principal` and its index to `market_index`, and marks
    /// the market fresh.
    pub fn pretend_borrow(
        &self,
        borrower: &Address,
        account_index: u128,
        market_index: u128,
        principal: u128,
    ) {
        self.env.as_contract(&self.market.address, || {
            storage::set_account_borrows(
                &self.env,
                borrower,
                &BorrowSnapshot {
                    principal,
                    interest_index: account_index,
                },
            );
            storage::set_total_borrows(&self.env, principal);
            storage::set_borrow_index(&self.env, market_index);
            storage::set_accrual_period(&self.env, self.env.ledger().sequence());
        });
    }

    pub fn set_total_borrows(&self, amount: u128) {
        self.env.as_contract(&self.market.address, || {
            storage::set_total_borrows(&self.env, amount);
        });
    }

    /// Stored market state as seen by `account`.
    pub fn state(&self, account: &Address) -> MarketState {
        MarketState {
            snapshot: self.market.borrow_snapshot(account),
            total_borrows: self.market.total_borrows(),
            total_reserves: self.market.total_reserves(),
            borrow_index: self.market.borrow_index(),
            accrual_period: self.market.accrual_period(),
        }
    }

    /// Run `f` inside the market contract, as the entrypoints do.
    pub fn in_market<T>(&self, f: impl FnOnce() -> T) -> T {
        self.env.as_contract(&self.market.address, f)
    }
}
