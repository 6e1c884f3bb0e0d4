//! Gift Cards
//!
//! Gift cards share the code namespace with discounts but have their own
//! balance and expiry rules. A usable card resolves to a pseudo-discount of
//! kind [`DiscountKind::GiftCard`] worth `min(balance, cart_total)`.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    codes::DiscountCode,
    discounts::{Discount, DiscountKind},
    ids::{DiscountUuid, GiftCardUuid},
    rejection::Rejection,
};

/// Gift card lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftCardStatus {
    /// Can be redeemed.
    Active,

    /// Switched off by the merchant.
    Disabled,

    /// Balance used up.
    Depleted,

    /// Marked expired by the store.
    Expired,
}

impl GiftCardStatus {
    /// Stable snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
            Self::Depleted => "depleted",
            Self::Expired => "expired",
        }
    }

    /// Parse a stored status name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "disabled" => Some(Self::Disabled),
            "depleted" => Some(Self::Depleted),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// A stored-value gift card.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftCard {
    /// Unique identifier.
    pub uuid: GiftCardUuid,

    /// Redemption code.
    pub code: DiscountCode,

    /// Remaining balance.
    pub current_balance: Decimal,

    /// Lifecycle status.
    pub status: GiftCardStatus,

    /// Expiry, if any.
    pub expires_at: Option<Timestamp>,
}

impl GiftCard {
    /// Check the card and turn it into a pseudo-discount for this cart.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::GiftCardExpired`] for expired cards and
    /// [`Rejection::InvalidCode`] for cards that are switched off or empty.
    pub fn redeem(&self, cart_total: Decimal, now: Timestamp) -> Result<Discount, Rejection> {
        match self.status {
            GiftCardStatus::Active => {}
            GiftCardStatus::Expired => return Err(Rejection::GiftCardExpired),
            GiftCardStatus::Disabled | GiftCardStatus::Depleted => {
                return Err(Rejection::InvalidCode);
            }
        }

        if self.current_balance <= Decimal::ZERO {
            return Err(Rejection::InvalidCode);
        }

        if self.expires_at.is_some_and(|expires_at| now > expires_at) {
            return Err(Rejection::GiftCardExpired);
        }

        let amount = self.current_balance.min(cart_total.max(Decimal::ZERO));

        Ok(Discount {
            uuid: DiscountUuid::from_uuid(self.uuid.into_uuid()),
            stackable: true,
            ..Discount::new(
                Some(self.code.clone()),
                "Gift card",
                DiscountKind::GiftCard {
                    gift_card: self.uuid,
                    balance: self.current_balance,
                    amount,
                },
            )
        })
    }
}
