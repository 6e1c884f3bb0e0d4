//! Quantity and Amount Evaluation
//!
//! Kind-specific thresholds checked against the lines a discount's scope
//! matched. Only runs when the caller submitted cart lines; a headless check
//! without a cart skips this stage.

use rust_decimal::Decimal;

use crate::{discounts::DiscountKind, rejection::Rejection, scope::MatchedLines};

/// Check the kind-specific threshold of a discount.
///
/// # Errors
///
/// Returns [`Rejection::InsufficientQuantity`] or [`Rejection::BelowMinimum`]
/// naming the quantity or amount the cart is missing.
pub fn check_thresholds(
    kind: &DiscountKind,
    matched: &MatchedLines<'_>,
    cart_total: Decimal,
) -> Result<(), Rejection> {
    match kind {
        DiscountKind::BuyXPayY { buy_quantity, .. } | DiscountKind::BuyXGetY { buy_quantity, .. } => {
            require_quantity(matched.total_quantity, *buy_quantity)
        }
        DiscountKind::QuantityDiscount { tiers } => {
            require_quantity(matched.total_quantity, tiers.floor().min_quantity)
        }
        DiscountKind::SpendXPayY { spend_amount, .. } => {
            if cart_total < *spend_amount {
                return Err(Rejection::BelowMinimum {
                    threshold: *spend_amount,
                });
            }

            Ok(())
        }
        DiscountKind::Percentage { .. }
        | DiscountKind::FixedAmount { .. }
        | DiscountKind::FreeShipping
        | DiscountKind::GiftProduct { .. }
        | DiscountKind::GiftCard { .. } => Ok(()),
    }
}

fn require_quantity(matched: u32, required: u32) -> Result<(), Rejection> {
    if matched < required {
        return Err(Rejection::InsufficientQuantity { required });
    }

    Ok(())
}
