//! Discounts
//!
//! A discount is a promotional rule owned by a store. The attributes every
//! discount shares live on [`Discount`]; the ones that only make sense for a
//! particular kind live on the [`DiscountKind`] variant.

use jiff::Timestamp;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{codes::DiscountCode, ids::DiscountUuid, scope::Scope};

pub mod kind;

pub use kind::{DiscountKind, EmptyTiers, QuantityTier, QuantityTiers};

/// A promotional rule as read from the catalog.
#[derive(Debug, Clone, PartialEq)]
#[expect(clippy::struct_excessive_bools, reason = "Independent merchant switches")]
pub struct Discount {
    /// Unique identifier.
    pub uuid: DiscountUuid,

    /// Redemption code; `None` for automatic discounts.
    pub code: Option<DiscountCode>,

    /// Display title.
    pub title: String,

    /// Kind and kind-specific data.
    pub kind: DiscountKind,

    /// Cart total the customer must reach.
    pub minimum_amount: Option<Decimal>,

    /// Cart quantity the customer must reach. Carried for presentation.
    pub minimum_quantity: Option<u32>,

    /// Whether the discount combines with others.
    pub stackable: bool,

    /// Lines the discount applies to.
    pub scope: Scope,

    /// Maximum number of redemptions.
    pub usage_limit: Option<u32>,

    /// Redemptions so far.
    pub usage_count: u32,

    /// Each customer may redeem this code once.
    pub once_per_customer: bool,

    /// Only customers without prior orders may redeem.
    pub first_order_only: bool,

    /// Start of the validity window.
    pub starts_at: Option<Timestamp>,

    /// End of the validity window.
    pub ends_at: Option<Timestamp>,

    /// Switched on by the merchant.
    pub is_active: bool,

    /// Codes of other discounts unlocked when this one is redeemed.
    pub activates_codes: SmallVec<[DiscountCode; 2]>,
}

impl Discount {
    /// An active, stackable, store-wide discount with no constraints.
    #[must_use]
    pub fn new(code: Option<DiscountCode>, title: impl Into<String>, kind: DiscountKind) -> Self {
        Self {
            uuid: DiscountUuid::new(),
            code,
            title: title.into(),
            kind,
            minimum_amount: None,
            minimum_quantity: None,
            stackable: true,
            scope: Scope::all(),
            usage_limit: None,
            usage_count: 0,
            once_per_customer: false,
            first_order_only: false,
            starts_at: None,
            ends_at: None,
            is_active: true,
            activates_codes: SmallVec::new(),
        }
    }

    /// Headline value; see [`DiscountKind::value`].
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.kind.value()
    }

    /// Switched on and not past the end of its validity window. This is the
    /// notion of "active" used for chained discounts.
    #[must_use]
    pub fn is_live(&self, now: Timestamp) -> bool {
        self.is_active && self.ends_at.is_none_or(|ends_at| now <= ends_at)
    }

    /// Whether the usage cap has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.usage_limit
            .is_some_and(|limit| self.usage_count >= limit)
    }

    /// Codes of coupons that unlock this discount. Only gift-product
    /// discounts declare triggers.
    #[must_use]
    pub fn trigger_codes(&self) -> &[DiscountCode] {
        match &self.kind {
            DiscountKind::GiftProduct { trigger_codes, .. } => trigger_codes.as_slice(),
            _ => &[],
        }
    }

    /// Whether redeeming `code` unlocks this gift-product discount.
    #[must_use]
    pub fn is_triggered_by(&self, code: &DiscountCode) -> bool {
        self.trigger_codes().contains(code)
    }

    /// Whether this discount's own code is `code`.
    #[must_use]
    pub fn has_code(&self, code: &DiscountCode) -> bool {
        self.code.as_ref() == Some(code)
    }
}
