//! # Market Storage
//!
//! Storage keys, configuration types and the typed accessors the rest of the
//! contract goes through. All market state lives in persistent storage and is
//! written only by the engine (`accrual`, `borrow`, `repay`) and the admin
//! module.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::MarketError;

/// Entries whose remaining TTL drops below this are extended on write.
pub const TTL_THRESHOLD: u32 = 100_000;
pub const TTL_EXTEND_TO: u32 = 200_000;

/// How the underlying asset moves in and out of the market.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TransferKind {
    /// Token-style: repayments are pulled with an allowance
    Token = 0,
    /// Native-value: repayments carry their value with the call
    Native = 1,
}

/// Whether post-action verify hooks on the controller are consulted.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VerifyPolicy {
    /// Hooks are not called
    Skip = 0,
    /// Hooks are called and a non-zero code aborts the action
    Enforce = 1,
}

/// Market configuration, set once by `initialize` and updated by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketConfig {
    /// Underlying asset contract (token or native asset contract)
    pub underlying: Address,
    /// Transfer mechanism selected for the underlying
    pub transfer_kind: TransferKind,
    /// Controller consulted before and after each action
    pub controller: Address,
    /// Interest rate model queried on accrual
    pub rate_model: Address,
    /// Share of accrued interest set aside as reserves (mantissa, <= 1e18)
    pub reserve_factor: u128,
    /// Post-action verify hook policy
    pub verify_policy: VerifyPolicy,
}

/// Per-account debt record.
///
/// `principal` is the balance at the time of the last update and
/// `interest_index` the global borrow index at that moment.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BorrowSnapshot {
    pub principal: u128,
    pub interest_index: u128,
}

/// Storage keys for market data.
#[contracttype]
#[derive(Clone)]
pub enum MarketDataKey {
    /// Market admin
    Admin,
    /// `MarketConfig`
    Config,
    /// Outstanding debt across all accounts, including accrued interest
    TotalBorrows,
    /// Interest set aside for the protocol
    TotalReserves,
    /// Global borrow index (mantissa)
    BorrowIndex,
    /// Ledger sequence of the last accrual
    AccrualPeriod,
    /// Underlying held by the market but committed elsewhere
    EncumberedCash,
    /// Per-account `BorrowSnapshot`
    AccountBorrows(Address),
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().persistent().has(&MarketDataKey::Admin)
}

pub fn get_admin(env: &Env) -> Result<Address, MarketError> {
    env.storage()
        .persistent()
        .get(&MarketDataKey::Admin)
        .ok_or(MarketError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    persist(env, &MarketDataKey::Admin, admin);
}

pub fn get_config(env: &Env) -> Result<MarketConfig, MarketError> {
    env.storage()
        .persistent()
        .get(&MarketDataKey::Config)
        .ok_or(MarketError::NotInitialized)
}

pub fn set_config(env: &Env, config: &MarketConfig) {
    persist(env, &MarketDataKey::Config, config);
}

pub fn get_total_borrows(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&MarketDataKey::TotalBorrows)
        .unwrap_or(0)
}

pub fn set_total_borrows(env: &Env, amount: u128) {
    persist(env, &MarketDataKey::TotalBorrows, &amount);
}

pub fn get_total_reserves(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&MarketDataKey::TotalReserves)
        .unwrap_or(0)
}

pub fn set_total_reserves(env: &Env, amount: u128) {
    persist(env, &MarketDataKey::TotalReserves, &amount);
}

pub fn get_borrow_index(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&MarketDataKey::BorrowIndex)
        .unwrap_or(0)
}

pub fn set_borrow_index(env: &Env, index: u128) {
    persist(env, &MarketDataKey::BorrowIndex, &index);
}

pub fn get_accrual_period(env: &Env) -> u32 {
    env.storage()
        .persistent()
        .get(&MarketDataKey::AccrualPeriod)
        .unwrap_or(0)
}

pub fn set_accrual_period(env: &Env, period: u32) {
    persist(env, &MarketDataKey::AccrualPeriod, &period);
}

pub fn get_encumbered_cash(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&MarketDataKey::EncumberedCash)
        .unwrap_or(0)
}

pub fn set_encumbered_cash(env: &Env, amount: u128) {
    persist(env, &MarketDataKey::EncumberedCash, &amount);
}

pub fn get_account_borrows(env: &Env, account: &Address) -> BorrowSnapshot {
    env.storage()
        .persistent()
        .get(&MarketDataKey::AccountBorrows(account.clone()))
        .unwrap_or_default()
}

pub fn set_account_borrows(env: &Env, account: &Address, snapshot: &BorrowSnapshot) {
    persist(env, &MarketDataKey::AccountBorrows(account.clone()), snapshot);
}

/// Keep the market-wide entries alive, including ones only written at
/// initialization.
pub fn bump_core_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    let keys = [
        MarketDataKey::Admin,
        MarketDataKey::Config,
        MarketDataKey::TotalBorrows,
        MarketDataKey::TotalReserves,
        MarketDataKey::BorrowIndex,
        MarketDataKey::AccrualPeriod,
        MarketDataKey::EncumberedCash,
    ];
    for key in keys.iter() {
        if persistent.has(key) {
            persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
    }
}

fn persist<V>(env: &Env, key: &MarketDataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    let persistent = env.storage().persistent();
    persistent.set(key, value);
    persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
