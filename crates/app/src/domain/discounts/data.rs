//! Discounts Data

use jiff::Timestamp;
use rebate::{cart::CartLine, ids::StoreUuid};
use rust_decimal::Decimal;

/// A request to resolve a code.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveRequest {
    /// Store the code is entered in; `None` when the caller lost the context.
    pub store: Option<StoreUuid>,

    /// Code as typed by the customer.
    pub code: String,

    /// Cart total used for minimum-amount checks.
    pub cart_total: Decimal,

    /// Customer email, when known.
    pub customer_email: Option<String>,

    /// Cart lines. `None` (or an empty list) skips the scope and quantity
    /// checks, as headless API callers do.
    pub cart: Option<Vec<CartLine>>,

    /// Time the rules are evaluated at.
    pub point_in_time: Timestamp,
}

impl ResolveRequest {
    /// A headless request with no customer and no cart.
    #[must_use]
    pub fn new(store: StoreUuid, code: impl Into<String>, cart_total: Decimal) -> Self {
        Self {
            store: Some(store),
            code: code.into(),
            cart_total,
            customer_email: None,
            cart: None,
            point_in_time: Timestamp::now(),
        }
    }

    #[must_use]
    pub fn with_customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_cart(mut self, cart: Vec<CartLine>) -> Self {
        self.cart = Some(cart);
        self
    }

    #[must_use]
    pub fn at(mut self, point_in_time: Timestamp) -> Self {
        self.point_in_time = point_in_time;
        self
    }
}

/// Resolver switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Run the discount-level rules against chained discounts and drop the
    /// ones that fail. Off by default: chained discounts only need to be live.
    pub validate_chained_constraints: bool,
}
