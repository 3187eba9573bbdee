use soroban_sdk::contracterror;

use crate::math::MathError;

/// Errors returned by every market entrypoint.
///
/// The first three are ordinary business rejections: nothing was written and
/// the caller may retry once the condition clears. Everything else aborts the
/// whole action.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarketError {
    /// The controller refused the action (its code is written to the log)
    AuthorizationRejected = 1,
    /// Interest has not been accrued for the current ledger sequence
    MarketNotFresh = 2,
    /// Borrow amount exceeds the cash the market can release
    InsufficientCash = 3,
    /// Arithmetic result exceeds `u128`
    Overflow = 4,
    /// Subtraction would go below zero
    Underflow = 5,
    /// Division by a zero denominator (corrupt borrow snapshot)
    DivideByZero = 6,
    /// The interest rate model could not be queried
    RateModelError = 7,
    /// The interest rate model returned a rate above the per-period cap
    BorrowRateTooHigh = 8,
    /// The underlying transfer did not complete as requested
    TransferFailed = 9,
    /// Payer does not hold enough of the underlying asset
    InsufficientBalance = 10,
    /// Payer has not approved the market for enough of the underlying asset
    InsufficientAllowance = 11,
    /// Value carried by a native repay differs from the amount being repaid
    ValueMismatch = 12,
    /// Sender of a native repay is not the stated payer
    SenderMismatch = 13,
    /// Entry point does not match the market's transfer kind
    UnsupportedTransfer = 14,
    /// A post-action verify hook rejected the action
    VerifyRejected = 15,
    /// The controller could not be invoked
    ControllerCallFailed = 16,
    /// `initialize` was already called
    AlreadyInitialized = 17,
    /// The market has not been initialized
    NotInitialized = 18,
    /// Caller is not the market admin
    Unauthorized = 19,
    /// A configuration value is out of range
    InvalidParameter = 20,
}

impl From<MathError> for MarketError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Overflow => MarketError::Overflow,
            MathError::Underflow => MarketError::Underflow,
            MathError::DivideByZero => MarketError::DivideByZero,
        }
    }
}
