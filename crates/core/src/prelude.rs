//! Prelude

pub use crate::{
    cart::{CartLine, ProductCategoryIndex, distinct_products},
    chain::{ChainPolicy, ChainedDiscount, activated_discounts, triggered_gift_coupons},
    codes::{CustomerEmail, DiscountCode},
    customers::Customer,
    discounts::{Discount, DiscountKind, QuantityTier, QuantityTiers},
    eligibility::{CustomerHistory, check_customer, check_discount, needs_customer_history},
    gift_cards::{GiftCard, GiftCardStatus},
    ids::{CategoryUuid, DiscountUuid, GiftCardUuid, ProductUuid, StoreUuid},
    rejection::Rejection,
    resolution::{DiscountResolution, Resolution, check_cart},
    scope::{AppliesTo, Scope},
};
