//! Discounts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use rebate::{
    cart::{CartLine, ProductCategoryIndex, distinct_products},
    chain::{ChainPolicy, ChainedDiscount, activated_discounts, triggered_gift_coupons},
    codes::{CustomerEmail, DiscountCode},
    discounts::Discount,
    eligibility::{CustomerHistory, check_customer, check_discount, needs_customer_history},
    ids::StoreUuid,
    rejection::Rejection,
    resolution::{Resolution, check_cart},
};
use tracing::{Span, error, field, info, warn};

use crate::domain::discounts::{
    data::{ResolveRequest, ResolverOptions},
    errors::{DiscountRepositoryError, ResolveError},
    repository::DiscountRepository,
};

/// Resolves codes against any [`DiscountRepository`].
#[derive(Clone)]
pub struct CatalogDiscountsService {
    repository: Arc<dyn DiscountRepository>,
    options: ResolverOptions,
}

impl fmt::Debug for CatalogDiscountsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogDiscountsService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CatalogDiscountsService {
    #[must_use]
    pub fn new(repository: Arc<dyn DiscountRepository>, options: ResolverOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    async fn resolve(&self, request: ResolveRequest) -> Result<Resolution, ResolveError> {
        let ResolveRequest {
            store,
            code,
            cart_total,
            customer_email,
            cart,
            point_in_time,
        } = request;

        let store = store.ok_or(Rejection::MissingStoreContext)?;

        Span::current().record("store_uuid", field::display(store));

        let code = DiscountCode::parse(&code).ok_or(Rejection::EmptyCode)?;

        Span::current().record("code", field::display(&code));

        let Some(discount) = self
            .repository
            .find_active_discount_by_code(store, &code)
            .await?
        else {
            let card = self
                .repository
                .find_active_gift_card_by_code(store, &code)
                .await?
                .ok_or(Rejection::InvalidCode)?;

            return Ok(Resolution::standalone(card.redeem(cart_total, point_in_time)?));
        };

        check_discount(&discount, cart_total, point_in_time)?;

        let email = customer_email.as_deref().and_then(CustomerEmail::parse);
        let cart = cart.filter(|lines| !lines.is_empty());

        let (history, categories) = tokio::try_join!(
            self.customer_history(store, &discount, &code, email.as_ref()),
            self.categories(store, &discount, cart.as_deref()),
        )?;

        check_customer(&discount, history.as_ref())?;

        if let Some(lines) = cart.as_deref() {
            check_cart(&discount, lines, &categories, cart_total)?;
        }

        let policy = ChainPolicy {
            validate_constraints: self.options.validate_chained_constraints,
            ..ChainPolicy::active_only(cart_total, point_in_time)
        };

        let (triggered_gift_coupons, activated_discounts) =
            self.chain(store, &discount, &code, &policy).await;

        Ok(Resolution {
            discount,
            triggered_gift_coupons,
            activated_discounts,
        })
    }

    /// Only the lookups the discount's rules need are issued, and none at all
    /// without an email.
    async fn customer_history(
        &self,
        store: StoreUuid,
        discount: &Discount,
        code: &DiscountCode,
        email: Option<&CustomerEmail>,
    ) -> Result<Option<CustomerHistory>, DiscountRepositoryError> {
        let Some(email) = email else {
            return Ok(None);
        };

        if !needs_customer_history(discount) {
            return Ok(None);
        }

        let customer = async {
            if discount.first_order_only {
                self.repository.find_customer_by_email(store, email).await
            } else {
                Ok(None)
            }
        };

        let used_code = async {
            if discount.once_per_customer {
                self.repository
                    .has_prior_order_with_code(store, email, code)
                    .await
            } else {
                Ok(false)
            }
        };

        let (customer, used_code) = tokio::try_join!(customer, used_code)?;

        Ok(Some(CustomerHistory::new(customer.as_ref(), used_code)))
    }

    async fn categories(
        &self,
        store: StoreUuid,
        discount: &Discount,
        cart: Option<&[CartLine]>,
    ) -> Result<ProductCategoryIndex, DiscountRepositoryError> {
        match cart {
            Some(lines) if discount.scope.needs_categories() => {
                self.repository
                    .find_categories_for_products(store, &distinct_products(lines))
                    .await
            }
            _ => Ok(ProductCategoryIndex::new()),
        }
    }

    /// Chain lookups never fail the resolution; a failed lookup yields an
    /// empty list.
    async fn chain(
        &self,
        store: StoreUuid,
        discount: &Discount,
        code: &DiscountCode,
        policy: &ChainPolicy,
    ) -> (Vec<ChainedDiscount>, Vec<ChainedDiscount>) {
        let triggered = async {
            match self
                .repository
                .find_active_gift_product_discounts_triggered_by(store, code)
                .await
            {
                Ok(candidates) => triggered_gift_coupons(discount, code, candidates, policy),
                Err(source) => {
                    warn!("failed to look up triggered gift coupons: {source}");

                    Vec::new()
                }
            }
        };

        let activated = async {
            if discount.activates_codes.is_empty() {
                return Vec::new();
            }

            match self
                .repository
                .find_active_discounts_by_codes(store, discount.activates_codes.as_slice())
                .await
            {
                Ok(candidates) => activated_discounts(discount, code, candidates, policy),
                Err(source) => {
                    warn!("failed to look up activated discounts: {source}");

                    Vec::new()
                }
            }
        };

        tokio::join!(triggered, activated)
    }
}

#[async_trait]
impl DiscountsService for CatalogDiscountsService {
    #[tracing::instrument(
        name = "discounts.service.resolve_discount",
        skip(self, request),
        fields(
            store_uuid = field::Empty,
            code = field::Empty,
            outcome = field::Empty,
            triggered_count = field::Empty,
            activated_count = field::Empty
        )
    )]
    async fn resolve_discount(&self, request: ResolveRequest) -> Result<Resolution, ResolveError> {
        let cart_total = request.cart_total;
        let outcome = self.resolve(request).await;
        let span = Span::current();

        match &outcome {
            Ok(resolution) => {
                span.record("outcome", "resolved");
                span.record("triggered_count", resolution.triggered_gift_coupons.len());
                span.record("activated_count", resolution.activated_discounts.len());

                info!(
                    discount_uuid = %resolution.discount.uuid,
                    kind = resolution.discount.kind.as_str(),
                    "resolved discount code"
                );
            }
            Err(ResolveError::Rejected(rejection)) => {
                span.record("outcome", rejection.as_str());

                info!(%cart_total, "rejected discount code: {rejection}");
            }
            Err(ResolveError::Repository(source)) => {
                span.record("outcome", "error");

                error!("failed to resolve discount code: {source}");
            }
        }

        outcome
    }
}

#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Look up a code and decide whether it applies to the request's cart
    /// and customer. Business rejections come back as
    /// [`ResolveError::Rejected`]; storage failures as
    /// [`ResolveError::Repository`].
    async fn resolve_discount(&self, request: ResolveRequest) -> Result<Resolution, ResolveError>;
}
