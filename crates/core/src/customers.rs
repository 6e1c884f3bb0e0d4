//! Customers

use crate::codes::CustomerEmail;

/// A store customer, as far as discount rules care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Normalised email address.
    pub email: CustomerEmail,

    /// Orders placed so far.
    pub total_orders: u64,
}
