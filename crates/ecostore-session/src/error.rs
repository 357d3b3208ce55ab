//! # Session Error Types
//!
//! Business-rule rejections and state-machine violations for the session
//! layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Error Flow in the Session Layer                         │
//! │                                                                         │
//! │  (a) Validation errors      caught BEFORE any state change,            │
//! │      ValidationError        surfaced inline by the form                 │
//! │                                                                         │
//! │  (b) Business rejections    returned as Err values, handled            │
//! │      CouponNotFound,        locally by the calling screen —            │
//! │      InsufficientCoins, …   they are outcomes, not failures            │
//! │                                                                         │
//! │  (c) Network failures       OrderSubmission wraps the gateway          │
//! │                             message; prior state is left intact        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each variant's display string is the user-facing message; the frontend
//! shows it verbatim.

use thiserror::Error;

use ecostore_core::{CoreError, ValidationError};

use crate::checkout::CheckoutStage;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors returned by session-store operations.
#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Coupon Rejections
    // =========================================================================
    /// No unused coupon in the wallet matches the given code.
    #[error("Invalid or used coupon code.")]
    CouponNotFound,

    /// A fixed-amount coupon was applied below the minimum cart subtotal.
    #[error("A minimum spend of ₹300 is required to use this coupon.")]
    MinimumSpendNotMet,

    // =========================================================================
    // Wallet Rejections
    // =========================================================================
    /// Redemption attempted with an insufficient balance.
    /// Balance and history are left unchanged.
    #[error("Not enough EcoCoins: balance {balance}, required {required}")]
    InsufficientCoins { balance: i64, required: i64 },

    // =========================================================================
    // Checkout State Machine
    // =========================================================================
    /// Checkout started or completed with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Operation not allowed in the current checkout stage.
    #[error("Checkout is in {stage:?} stage, cannot {operation}")]
    InvalidStage {
        stage: CheckoutStage,
        operation: &'static str,
    },

    /// The order service rejected or failed the submission.
    /// The cart is left intact so the purchase can be retried.
    #[error("Order submission failed: {0}")]
    OrderSubmission(String),

    // =========================================================================
    // Wrapped Lower-Layer Errors
    // =========================================================================
    /// Core domain error (cart ceilings, etc.).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input validation failure.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages_are_user_facing() {
        assert_eq!(
            SessionError::CouponNotFound.to_string(),
            "Invalid or used coupon code."
        );
        assert_eq!(
            SessionError::MinimumSpendNotMet.to_string(),
            "A minimum spend of ₹300 is required to use this coupon."
        );
        assert_eq!(
            SessionError::InsufficientCoins {
                balance: 50,
                required: 200
            }
            .to_string(),
            "Not enough EcoCoins: balance 50, required 200"
        );
    }
}
