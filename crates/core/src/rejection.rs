//! Rejection Reasons
//!
//! The closed set of business reasons a code can be turned down for. The
//! `Display` output is the message shown to the customer, so reasons carry the
//! amount or quantity the customer is missing.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a code did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The request did not say which store it is for.
    #[error("missing store context")]
    MissingStoreContext,

    /// The code was empty after trimming.
    #[error("please enter a discount code")]
    EmptyCode,

    /// No active discount or usable gift card has this code.
    #[error("this code is not valid")]
    InvalidCode,

    /// The usage cap has been reached.
    #[error("this code has reached its usage limit")]
    Exhausted,

    /// The validity window has not started.
    #[error("this code is not active yet")]
    NotYetActive,

    /// The validity window has ended.
    #[error("this code has expired")]
    Expired,

    /// The cart total is below the required amount.
    #[error("this code requires a minimum purchase of {threshold}")]
    BelowMinimum {
        /// Amount the cart total must reach.
        threshold: Decimal,
    },

    /// The customer has ordered before.
    #[error("this code is only valid on your first order")]
    NotFirstOrder,

    /// The customer already used this code.
    #[error("you have already used this code")]
    AlreadyUsed,

    /// Not enough matching units in the cart.
    #[error("add at least {required} eligible items to use this code")]
    InsufficientQuantity {
        /// Matching units required.
        required: u32,
    },

    /// The gift card is past its expiry.
    #[error("this gift card has expired")]
    GiftCardExpired,
}

impl Rejection {
    /// Stable snake-case name for the JSON boundary.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingStoreContext => "missing_store_context",
            Self::EmptyCode => "empty_code",
            Self::InvalidCode => "invalid_code",
            Self::Exhausted => "exhausted",
            Self::NotYetActive => "not_yet_active",
            Self::Expired => "expired",
            Self::BelowMinimum { .. } => "below_minimum",
            Self::NotFirstOrder => "not_first_order",
            Self::AlreadyUsed => "already_used",
            Self::InsufficientQuantity { .. } => "insufficient_quantity",
            Self::GiftCardExpired => "gift_card_expired",
        }
    }
}
