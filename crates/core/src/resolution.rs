//! Resolution
//!
//! The outcome of resolving a code, and the cart stage that sits between
//! eligibility and chain resolution.

use rust_decimal::Decimal;

use crate::{
    cart::{CartLine, ProductCategoryIndex},
    chain::ChainedDiscount,
    discounts::Discount,
    evaluator::check_thresholds,
    rejection::Rejection,
};

/// A code that resolved successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The matched discount, or the pseudo-discount of a gift card.
    pub discount: Discount,

    /// Gift-product discounts that list the matched code as a trigger.
    pub triggered_gift_coupons: Vec<ChainedDiscount>,

    /// Discounts the matched discount activates.
    pub activated_discounts: Vec<ChainedDiscount>,
}

impl Resolution {
    /// A resolution with nothing chained to it.
    #[must_use]
    pub const fn standalone(discount: Discount) -> Self {
        Self {
            discount,
            triggered_gift_coupons: Vec::new(),
            activated_discounts: Vec::new(),
        }
    }

    /// Whether anything was chained to the matched discount.
    #[must_use]
    pub fn has_chain(&self) -> bool {
        !self.triggered_gift_coupons.is_empty() || !self.activated_discounts.is_empty()
    }
}

/// Either a [`Resolution`] or the reason the code was turned down.
pub type DiscountResolution = Result<Resolution, Rejection>;

/// Match the discount's scope against the cart and check the kind-specific
/// thresholds over the matching lines.
///
/// # Errors
///
/// Returns the [`Rejection`] reported by [`check_thresholds`].
pub fn check_cart(
    discount: &Discount,
    cart: &[CartLine],
    categories: &ProductCategoryIndex,
    cart_total: Decimal,
) -> Result<(), Rejection> {
    let matched = discount.scope.match_lines(cart, categories);

    check_thresholds(&discount.kind, &matched, cart_total)
}

#[cfg(test)]
mod tests {
    use crate::{
        codes::DiscountCode,
        discounts::DiscountKind,
        ids::{CategoryUuid, ProductUuid},
        scope::Scope,
    };

    use super::*;

    #[test]
    fn excluded_lines_do_not_count_towards_buy_quantity() {
        let shirt = ProductUuid::new();
        let sale = ProductUuid::new();
        let sale_category = CategoryUuid::new();

        let mut scope = Scope::all();
        scope.exclude_category_ids.insert(sale_category);

        let discount = Discount {
            scope,
            ..Discount::new(
                DiscountCode::parse("BUY2PAY1"),
                "Buy two pay one",
                DiscountKind::BuyXPayY {
                    buy_quantity: 2,
                    pay_quantity: 1,
                },
            )
        };

        let categories: ProductCategoryIndex = [(sale, sale_category)].into_iter().collect();
        let cart = [CartLine::new(shirt, 1), CartLine::new(sale, 5)];

        assert_eq!(
            check_cart(&discount, &cart, &categories, Decimal::from(80)),
            Err(Rejection::InsufficientQuantity { required: 2 })
        );
    }

    #[test]
    fn category_scope_counts_matching_lines() {
        let shoes = CategoryUuid::new();
        let sneaker = ProductUuid::new();
        let boot = ProductUuid::new();
        let sock = ProductUuid::new();

        let discount = Discount {
            scope: Scope::categories([shoes]),
            ..Discount::new(
                DiscountCode::parse("SHOES"),
                "Shoes",
                DiscountKind::BuyXPayY {
                    buy_quantity: 2,
                    pay_quantity: 1,
                },
            )
        };

        let categories: ProductCategoryIndex =
            [(sneaker, shoes), (boot, shoes)].into_iter().collect();
        let cart = [
            CartLine::new(sneaker, 1),
            CartLine::new(boot, 1),
            CartLine::new(sock, 4),
        ];

        assert_eq!(
            check_cart(&discount, &cart, &categories, Decimal::from(80)),
            Ok(())
        );
    }

    #[test]
    fn standalone_has_no_chain() {
        let resolution = Resolution::standalone(Discount::new(
            DiscountCode::parse("SHIP"),
            "Ship",
            DiscountKind::FreeShipping,
        ));

        assert!(!resolution.has_chain());
    }
}
