//! Discount Kinds
//!
//! Each variant owns exactly the fields that mean something for it, so a
//! percentage discount cannot carry a stray `buy_quantity` and the evaluator's
//! `match` is checked for exhaustiveness by the compiler.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    codes::DiscountCode,
    ids::{GiftCardUuid, ProductUuid},
};

/// Closed set of discount kinds with their kind-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountKind {
    /// Percentage off the matched lines.
    Percentage {
        /// Percent, e.g. `10` for 10% off.
        percent: Decimal,
    },

    /// Fixed amount off the cart.
    FixedAmount {
        /// Amount subtracted.
        amount: Decimal,
    },

    /// Shipping is waived.
    FreeShipping,

    /// Buy `buy_quantity` matching units, pay for `pay_quantity` of them.
    BuyXPayY {
        /// Units the customer must put in the cart.
        buy_quantity: u32,

        /// Units the customer pays for.
        pay_quantity: u32,
    },

    /// Buy `buy_quantity` matching units, get `get_quantity` more at a discount.
    BuyXGetY {
        /// Units the customer must put in the cart.
        buy_quantity: u32,

        /// Units granted once the buy quantity is reached.
        get_quantity: u32,

        /// Discount applied to the granted units; `100` means free.
        get_discount_percent: Decimal,

        /// Products eligible as the granted units.
        gift_product_ids: SmallVec<[ProductUuid; 2]>,

        /// Grant more of the product that was bought instead of a listed gift.
        gift_same_product: bool,
    },

    /// A free product, optionally unlocked by other coupons.
    GiftProduct {
        /// Products handed out as the gift.
        gift_product_ids: SmallVec<[ProductUuid; 2]>,

        /// Codes of other coupons whose redemption unlocks this gift.
        trigger_codes: SmallVec<[DiscountCode; 2]>,
    },

    /// Percentage off that grows with the matched quantity.
    QuantityDiscount {
        /// Quantity tiers; never empty.
        tiers: QuantityTiers,
    },

    /// Spend `spend_amount`, pay only `pay_amount`.
    SpendXPayY {
        /// Cart total required.
        spend_amount: Decimal,

        /// Amount charged once the spend threshold is met.
        pay_amount: Decimal,
    },

    /// Stored-value gift card resolved through the coupon path.
    GiftCard {
        /// Source gift card.
        gift_card: GiftCardUuid,

        /// Balance on the card at resolution time.
        balance: Decimal,

        /// Amount applied to this cart: `min(balance, cart_total)`.
        amount: Decimal,
    },
}

impl DiscountKind {
    /// Stable snake-case name, used for storage and the JSON boundary.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage { .. } => "percentage",
            Self::FixedAmount { .. } => "fixed_amount",
            Self::FreeShipping => "free_shipping",
            Self::BuyXPayY { .. } => "buy_x_pay_y",
            Self::BuyXGetY { .. } => "buy_x_get_y",
            Self::GiftProduct { .. } => "gift_product",
            Self::QuantityDiscount { .. } => "quantity_discount",
            Self::SpendXPayY { .. } => "spend_x_pay_y",
            Self::GiftCard { .. } => "gift_card",
        }
    }

    /// Headline value of the discount.
    ///
    /// Structural kinds whose reward is expressed in quantities rather than a
    /// single number report zero.
    #[must_use]
    pub fn value(&self) -> Decimal {
        match self {
            Self::Percentage { percent } => *percent,
            Self::FixedAmount { amount } | Self::GiftCard { amount, .. } => *amount,
            Self::BuyXGetY {
                get_discount_percent,
                ..
            } => *get_discount_percent,
            Self::SpendXPayY {
                spend_amount,
                pay_amount,
            } => (*spend_amount - *pay_amount).max(Decimal::ZERO),
            Self::FreeShipping
            | Self::BuyXPayY { .. }
            | Self::GiftProduct { .. }
            | Self::QuantityDiscount { .. } => Decimal::ZERO,
        }
    }
}

/// One rung of a quantity discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityTier {
    /// Matched quantity needed to reach this tier.
    pub min_quantity: u32,

    /// Percent off once reached.
    pub discount_percent: Decimal,
}

/// Error returned when building [`QuantityTiers`] from an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a quantity discount needs at least one tier")]
pub struct EmptyTiers;

/// Non-empty tier list with its lowest tier cached.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityTiers {
    tiers: SmallVec<[QuantityTier; 4]>,
    floor: QuantityTier,
}

impl QuantityTiers {
    /// Build from a tier list.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTiers`] when `tiers` is empty.
    pub fn new(tiers: impl IntoIterator<Item = QuantityTier>) -> Result<Self, EmptyTiers> {
        let tiers: SmallVec<[QuantityTier; 4]> = tiers.into_iter().collect();

        let floor = tiers
            .iter()
            .min_by_key(|tier| tier.min_quantity)
            .copied()
            .ok_or(EmptyTiers)?;

        Ok(Self { tiers, floor })
    }

    /// Tier with the smallest `min_quantity`; the gate a cart must pass.
    #[must_use]
    pub const fn floor(&self) -> QuantityTier {
        self.floor
    }

    /// Tiers in the order they were defined.
    #[must_use]
    pub fn as_slice(&self) -> &[QuantityTier] {
        &self.tiers
    }
}
