//! Typed Identifiers
//!
//! Every record the engine touches is keyed by a UUID. Wrapping them in a
//! phantom-typed newtype keeps a product UUID from being passed where a
//! category UUID is expected.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use uuid::Uuid;

use crate::{discounts::Discount, gift_cards::GiftCard};

/// UUID tagged with the kind of record it identifies.
pub struct TypedUuid<T>(Uuid, PhantomData<T>);

impl<T> TypedUuid<T> {
    /// Generate a new time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, PhantomData)
    }

    /// Unwrap into the raw UUID.
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl<T> Default for TypedUuid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedUuid<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedUuid<T> {}

impl<T> Debug for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedUuid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedUuid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedUuid<T> {}

impl<T> Hash for TypedUuid<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedUuid<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedUuid<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> FromStr for TypedUuid<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}

impl<T> From<Uuid> for TypedUuid<T> {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

impl<T> From<TypedUuid<T>> for Uuid {
    fn from(value: TypedUuid<T>) -> Self {
        value.into_uuid()
    }
}

/// Store marker. A store is the tenant that owns a discount catalog.
#[derive(Debug)]
pub enum Store {}

/// Product marker.
#[derive(Debug)]
pub enum Product {}

/// Category marker.
#[derive(Debug)]
pub enum Category {}

/// Store UUID
pub type StoreUuid = TypedUuid<Store>;

/// Discount UUID
pub type DiscountUuid = TypedUuid<Discount>;

/// Gift Card UUID
pub type GiftCardUuid = TypedUuid<GiftCard>;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_and_displays_round_trip() -> TestResult {
        let raw = "0190a3c4-5b6d-7e8f-9a0b-1c2d3e4f5a6b";
        let product: ProductUuid = raw.parse()?;

        assert_eq!(product.to_string(), raw);

        Ok(())
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("not-a-uuid".parse::<StoreUuid>().is_err());
    }
}
