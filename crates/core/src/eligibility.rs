//! Eligibility Checks
//!
//! Gating rules run in a fixed order and stop at the first failure. The order
//! decides which message the customer sees when several rules fail at once:
//!
//! 1. active
//! 2. usage cap
//! 3. start of the validity window
//! 4. end of the validity window
//! 5. minimum cart total
//! 6. first order only
//! 7. once per customer
//!
//! Rules 1–5 depend only on the discount and the cart; rules 6–7 need the
//! customer's order history, which the caller looks up only when an email was
//! supplied and the discount asks for it.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{customers::Customer, discounts::Discount, rejection::Rejection};

/// What the store knows about the customer redeeming the code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerHistory {
    /// Orders placed so far; `None` when the customer is not on record.
    pub prior_orders: Option<u64>,

    /// Whether an earlier order used the code being checked.
    pub used_code: bool,
}

impl CustomerHistory {
    /// History of a customer the store has never seen.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            prior_orders: None,
            used_code: false,
        }
    }

    /// History assembled from the two customer lookups.
    #[must_use]
    pub fn new(customer: Option<&Customer>, used_code: bool) -> Self {
        Self {
            prior_orders: customer.map(|customer| customer.total_orders),
            used_code,
        }
    }

    /// Whether the customer has ordered before. Unknown customers have not.
    #[must_use]
    pub fn has_ordered(&self) -> bool {
        self.prior_orders.is_some_and(|orders| orders > 0)
    }
}

/// Whether rules 6–7 apply to `discount` at all.
#[must_use]
pub const fn needs_customer_history(discount: &Discount) -> bool {
    discount.first_order_only || discount.once_per_customer
}

/// Rules 1–5.
///
/// # Errors
///
/// Returns the [`Rejection`] of the first rule that fails.
pub fn check_discount(
    discount: &Discount,
    cart_total: Decimal,
    now: Timestamp,
) -> Result<(), Rejection> {
    if !discount.is_active {
        return Err(Rejection::InvalidCode);
    }

    if discount.is_exhausted() {
        return Err(Rejection::Exhausted);
    }

    if discount.starts_at.is_some_and(|starts_at| now < starts_at) {
        return Err(Rejection::NotYetActive);
    }

    if discount.ends_at.is_some_and(|ends_at| now > ends_at) {
        return Err(Rejection::Expired);
    }

    if let Some(threshold) = discount.minimum_amount
        && cart_total < threshold
    {
        return Err(Rejection::BelowMinimum { threshold });
    }

    Ok(())
}

/// Rules 6–7. `history` is `None` when no email was supplied, in which case
/// neither rule can be evaluated and both pass.
///
/// # Errors
///
/// Returns [`Rejection::NotFirstOrder`] or [`Rejection::AlreadyUsed`].
pub fn check_customer(
    discount: &Discount,
    history: Option<&CustomerHistory>,
) -> Result<(), Rejection> {
    let Some(history) = history else {
        return Ok(());
    };

    if discount.first_order_only && history.has_ordered() {
        return Err(Rejection::NotFirstOrder);
    }

    if discount.once_per_customer && history.used_code {
        return Err(Rejection::AlreadyUsed);
    }

    Ok(())
}

/// All seven rules in order.
///
/// # Errors
///
/// Returns the [`Rejection`] of the first rule that fails.
pub fn check_eligibility(
    discount: &Discount,
    cart_total: Decimal,
    history: Option<&CustomerHistory>,
    now: Timestamp,
) -> Result<(), Rejection> {
    check_discount(discount, cart_total, now)?;
    check_customer(discount, history)
}
