//! # Transfer Mechanism
//!
//! Moves the underlying asset between the market and its users. The variant is
//! chosen from `MarketConfig::transfer_kind`:
//!
//! - `Token` pulls repayments with `transfer_from` against an allowance the
//!   payer granted to the market.
//! - `NativeValue` expects the repayment to arrive with the call. The sender
//!   and the value it carries must match the payer and the amount exactly.
//!
//! Both variants talk to the asset through `soroban_sdk::token::Client`; on
//! Stellar the native asset is itself exposed as a token contract.

use soroban_sdk::{log, token, Address, Env};

use crate::errors::MarketError;
use crate::storage::{MarketConfig, TransferKind};

/// Value attached to a native-variant repayment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallValue {
    /// Account the value comes from
    pub sender: Address,
    /// Amount of the native asset carried by the call
    pub value: u128,
}

pub enum TransferMechanism {
    Token(Address),
    NativeValue(Address),
}

impl TransferMechanism {
    pub fn for_config(config: &MarketConfig) -> Self {
        match config.transfer_kind {
            TransferKind::Token => TransferMechanism::Token(config.underlying.clone()),
            TransferKind::Native => TransferMechanism::NativeValue(config.underlying.clone()),
        }
    }

    pub fn kind(&self) -> TransferKind {
        match self {
            TransferMechanism::Token(_) => TransferKind::Token,
            TransferMechanism::NativeValue(_) => TransferKind::Native,
        }
    }

    fn client<'a>(&self, env: &'a Env) -> token::Client<'a> {
        let asset = match self {
            TransferMechanism::Token(asset) | TransferMechanism::NativeValue(asset) => asset,
        };
        token::Client::new(env, asset)
    }

    /// Underlying held by `account`.
    pub fn balance_of(&self, env: &Env, account: &Address) -> Result<u128, MarketError> {
        from_token_amount(token_balance(&self.client(env), account)?)
    }

    /// Send `amount` of the underlying from the market to `to`.
    pub fn transfer_out(&self, env: &Env, to: &Address, amount: u128) -> Result<(), MarketError> {
        if amount == 0 {
            return Ok(());
        }
        let value = to_token_amount(amount)?;
        match self
            .client(env)
            .try_transfer(&env.current_contract_address(), to, &value)
        {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(env, "transfer out failed", to.clone(), amount);
                Err(MarketError::TransferFailed)
            }
        }
    }

    /// Bring `amount` of the underlying from `from` into the market.
    ///
    /// `call_value` must be present for the native variant and absent for the
    /// token variant.
    pub fn transfer_in(
        &self,
        env: &Env,
        from: &Address,
        amount: u128,
        call_value: Option<&CallValue>,
    ) -> Result<(), MarketError> {
        match (self, call_value) {
            (TransferMechanism::Token(_), None) => self.pull_with_allowance(env, from, amount),
            (TransferMechanism::NativeValue(_), Some(call_value)) => {
                self.accept_call_value(env, from, amount, call_value)
            }
            _ => Err(MarketError::UnsupportedTransfer),
        }
    }

    fn pull_with_allowance(
        &self,
        env: &Env,
        from: &Address,
        amount: u128,
    ) -> Result<(), MarketError> {
        let client = self.client(env);
        let market = env.current_contract_address();
        let value = to_token_amount(amount)?;

        if token_balance(&client, from)? < value {
            return Err(MarketError::InsufficientBalance);
        }
        let allowance = match client.try_allowance(from, &market) {
            Ok(Ok(allowance)) => allowance,
            _ => return Err(MarketError::TransferFailed),
        };
        if allowance < value {
            return Err(MarketError::InsufficientAllowance);
        }
        if value == 0 {
            return Ok(());
        }

        let before = token_balance(&client, &market)?;
        if !matches!(
            client.try_transfer_from(&market, from, &market, &value),
            Ok(Ok(()))
        ) {
            log!(env, "transfer in failed", from.clone(), amount);
            return Err(MarketError::TransferFailed);
        }
        let after = token_balance(&client, &market)?;

        // Fee-on-transfer or misbehaving tokens must not credit more than arrived.
        if after.checked_sub(before) != Some(value) {
            log!(env, "transfer in short", from.clone(), amount);
            return Err(MarketError::TransferFailed);
        }
        Ok(())
    }

    fn accept_call_value(
        &self,
        env: &Env,
        payer: &Address,
        amount: u128,
        call_value: &CallValue,
    ) -> Result<(), MarketError> {
        if call_value.sender != *payer {
            return Err(MarketError::SenderMismatch);
        }
        if call_value.value != amount {
            return Err(MarketError::ValueMismatch);
        }
        if amount == 0 {
            return Ok(());
        }
        let value = to_token_amount(amount)?;
        match self.client(env).try_transfer(
            &call_value.sender,
            &env.current_contract_address(),
            &value,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(env, "native value not received", payer.clone(), amount);
                Err(MarketError::TransferFailed)
            }
        }
    }
}

fn token_balance(client: &token::Client, account: &Address) -> Result<i128, MarketError> {
    match client.try_balance(account) {
        Ok(Ok(balance)) => Ok(balance),
        _ => Err(MarketError::TransferFailed),
    }
}

fn to_token_amount(amount: u128) -> Result<i128, MarketError> {
    i128::try_from(amount).map_err(|_| MarketError::Overflow)
}

fn from_token_amount(amount: i128) -> Result<u128, MarketError> {
    u128::try_from(amount).map_err(|_| MarketError::Underflow)
}
