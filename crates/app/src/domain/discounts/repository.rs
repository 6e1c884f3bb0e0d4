//! Discount Repository

use async_trait::async_trait;
use mockall::automock;
use rebate::{
    cart::ProductCategoryIndex,
    codes::{CustomerEmail, DiscountCode},
    customers::Customer,
    discounts::Discount,
    gift_cards::GiftCard,
    ids::{ProductUuid, StoreUuid},
};

use crate::domain::discounts::errors::DiscountRepositoryError;

/// Read-only catalog lookups the resolver depends on. Every call is scoped to
/// one store; codes and emails arrive normalised.
#[automock]
#[async_trait]
pub trait DiscountRepository: Send + Sync {
    /// The active discount with this code.
    async fn find_active_discount_by_code(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Option<Discount>, DiscountRepositoryError>;

    /// The gift card with this code. Status and expiry are returned as stored
    /// so the resolver can tell an expired card from an unusable one.
    async fn find_active_gift_card_by_code(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Option<GiftCard>, DiscountRepositoryError>;

    /// The customer with this normalised email, if the store knows them.
    async fn find_customer_by_email(
        &self,
        store: StoreUuid,
        email: &CustomerEmail,
    ) -> Result<Option<Customer>, DiscountRepositoryError>;

    /// Whether any earlier order by this customer used `code`.
    async fn has_prior_order_with_code(
        &self,
        store: StoreUuid,
        email: &CustomerEmail,
        code: &DiscountCode,
    ) -> Result<bool, DiscountRepositoryError>;

    /// Categories of the given products. Products without categories are
    /// absent from the index.
    async fn find_categories_for_products(
        &self,
        store: StoreUuid,
        products: &[ProductUuid],
    ) -> Result<ProductCategoryIndex, DiscountRepositoryError>;

    /// Active gift-product discounts listing `code` among their triggers.
    async fn find_active_gift_product_discounts_triggered_by(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Vec<Discount>, DiscountRepositoryError>;

    /// Active discounts whose code is one of `codes`.
    async fn find_active_discounts_by_codes(
        &self,
        store: StoreUuid,
        codes: &[DiscountCode],
    ) -> Result<Vec<Discount>, DiscountRepositoryError>;
}
