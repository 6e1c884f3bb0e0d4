//! In-Memory Discount Repository
//!
//! Serves a YAML [`Catalog`] without a database. Lookups are indexed once at
//! construction; unknown stores behave like empty ones.

use std::path::Path;

use async_trait::async_trait;
use rebate::{
    cart::ProductCategoryIndex,
    codes::{CustomerEmail, DiscountCode},
    customers::Customer,
    discounts::{Discount, DiscountKind},
    fixtures::{Catalog, CustomerRecord, StoreCatalog},
    gift_cards::GiftCard,
    ids::{ProductUuid, StoreUuid},
};
use rustc_hash::FxHashMap;

use crate::domain::discounts::{errors::DiscountRepositoryError, repository::DiscountRepository};

#[derive(Debug, Clone, Default)]
struct StoreIndex {
    active_by_code: FxHashMap<DiscountCode, Discount>,
    gift_products_by_trigger: FxHashMap<DiscountCode, Vec<Discount>>,
    gift_cards: FxHashMap<DiscountCode, GiftCard>,
    customers: FxHashMap<CustomerEmail, CustomerRecord>,
    categories: ProductCategoryIndex,
}

impl From<StoreCatalog> for StoreIndex {
    fn from(store: StoreCatalog) -> Self {
        let mut index = Self {
            categories: store.categories,
            ..Self::default()
        };

        for discount in store.discounts.into_iter().filter(|d| d.is_active) {
            if matches!(discount.kind, DiscountKind::GiftProduct { .. }) {
                for trigger in discount.trigger_codes() {
                    index
                        .gift_products_by_trigger
                        .entry(trigger.clone())
                        .or_default()
                        .push(discount.clone());
                }
            }

            if let Some(code) = discount.code.clone() {
                index.active_by_code.insert(code, discount);
            }
        }

        for card in store.gift_cards {
            index.gift_cards.insert(card.code.clone(), card);
        }

        for record in store.customers {
            index
                .customers
                .insert(record.customer.email.clone(), record);
        }

        index
    }
}

/// Discount repository backed by a loaded catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscountRepository {
    stores: FxHashMap<StoreUuid, StoreIndex>,
}

impl InMemoryDiscountRepository {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            stores: catalog
                .into_stores()
                .into_iter()
                .map(|(uuid, store)| (uuid, StoreIndex::from(store)))
                .collect(),
        }
    }

    /// Load a catalog file and index it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or describes invalid data.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DiscountRepositoryError> {
        Ok(Self::new(Catalog::load(path)?))
    }

    fn store(&self, store: StoreUuid) -> Option<&StoreIndex> {
        self.stores.get(&store)
    }
}

impl From<Catalog> for InMemoryDiscountRepository {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}

#[async_trait]
impl DiscountRepository for InMemoryDiscountRepository {
    async fn find_active_discount_by_code(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Option<Discount>, DiscountRepositoryError> {
        Ok(self
            .store(store)
            .and_then(|index| index.active_by_code.get(code))
            .cloned())
    }

    async fn find_active_gift_card_by_code(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Option<GiftCard>, DiscountRepositoryError> {
        Ok(self
            .store(store)
            .and_then(|index| index.gift_cards.get(code))
            .cloned())
    }

    async fn find_customer_by_email(
        &self,
        store: StoreUuid,
        email: &CustomerEmail,
    ) -> Result<Option<Customer>, DiscountRepositoryError> {
        Ok(self
            .store(store)
            .and_then(|index| index.customers.get(email))
            .map(|record| record.customer.clone()))
    }

    async fn has_prior_order_with_code(
        &self,
        store: StoreUuid,
        email: &CustomerEmail,
        code: &DiscountCode,
    ) -> Result<bool, DiscountRepositoryError> {
        Ok(self
            .store(store)
            .and_then(|index| index.customers.get(email))
            .is_some_and(|record| record.used_codes.contains(code)))
    }

    async fn find_categories_for_products(
        &self,
        store: StoreUuid,
        products: &[ProductUuid],
    ) -> Result<ProductCategoryIndex, DiscountRepositoryError> {
        let Some(index) = self.store(store) else {
            return Ok(ProductCategoryIndex::new());
        };

        Ok(products
            .iter()
            .flat_map(|product| {
                index
                    .categories
                    .categories_of(*product)
                    .iter()
                    .map(move |category| (*product, *category))
            })
            .collect())
    }

    async fn find_active_gift_product_discounts_triggered_by(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Vec<Discount>, DiscountRepositoryError> {
        Ok(self
            .store(store)
            .and_then(|index| index.gift_products_by_trigger.get(code))
            .cloned()
            .unwrap_or_default())
    }

    async fn find_active_discounts_by_codes(
        &self,
        store: StoreUuid,
        codes: &[DiscountCode],
    ) -> Result<Vec<Discount>, DiscountRepositoryError> {
        let Some(index) = self.store(store) else {
            return Ok(Vec::new());
        };

        Ok(codes
            .iter()
            .filter_map(|code| index.active_by_code.get(code))
            .cloned()
            .collect())
    }
}
