//! Postgres Discount Repository

use std::error::Error as StdError;

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rebate::{
    cart::ProductCategoryIndex,
    codes::{CustomerEmail, DiscountCode},
    customers::Customer,
    discounts::{Discount, DiscountKind, QuantityTier, QuantityTiers},
    gift_cards::{GiftCard, GiftCardStatus},
    ids::{CategoryUuid, DiscountUuid, GiftCardUuid, ProductUuid, StoreUuid},
    scope::{AppliesTo, Scope},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use smallvec::SmallVec;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as, query_scalar, types::Json};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::discounts::{errors::DiscountRepositoryError, repository::DiscountRepository},
};

const FIND_ACTIVE_DISCOUNT_BY_CODE_SQL: &str = include_str!("sql/find_active_discount_by_code.sql");
const FIND_GIFT_CARD_BY_CODE_SQL: &str = include_str!("sql/find_gift_card_by_code.sql");
const FIND_CUSTOMER_BY_EMAIL_SQL: &str = include_str!("sql/find_customer_by_email.sql");
const HAS_PRIOR_ORDER_WITH_CODE_SQL: &str = include_str!("sql/has_prior_order_with_code.sql");
const FIND_CATEGORIES_FOR_PRODUCTS_SQL: &str =
    include_str!("sql/find_categories_for_products.sql");
const FIND_TRIGGERED_GIFT_PRODUCTS_SQL: &str =
    include_str!("sql/find_active_gift_product_discounts_triggered_by.sql");
const FIND_ACTIVE_DISCOUNTS_BY_CODES_SQL: &str =
    include_str!("sql/find_active_discounts_by_codes.sql");

/// Reads the discount catalog from `PostgreSQL`. Every lookup runs in its own
/// store-scoped transaction so row-level security filters the rows.
#[derive(Debug, Clone)]
pub struct PgDiscountRepository {
    db: Db,
}

impl PgDiscountRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiscountRepository for PgDiscountRepository {
    #[tracing::instrument(
        name = "discounts.repository.find_active_discount_by_code",
        skip_all,
        fields(store_uuid = %store, code = %code),
        err
    )]
    async fn find_active_discount_by_code(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Option<Discount>, DiscountRepositoryError> {
        let mut tx = self.db.begin_store_transaction(store).await?;

        let discount = query_as::<Postgres, DiscountRow>(FIND_ACTIVE_DISCOUNT_BY_CODE_SQL)
            .bind(code.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(discount.map(DiscountRow::into_discount))
    }

    #[tracing::instrument(
        name = "discounts.repository.find_gift_card_by_code",
        skip_all,
        fields(store_uuid = %store, code = %code),
        err
    )]
    async fn find_active_gift_card_by_code(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Option<GiftCard>, DiscountRepositoryError> {
        let mut tx = self.db.begin_store_transaction(store).await?;

        let card = query_as::<Postgres, GiftCardRow>(FIND_GIFT_CARD_BY_CODE_SQL)
            .bind(code.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(card.map(|GiftCardRow(card)| card))
    }

    #[tracing::instrument(
        name = "discounts.repository.find_customer_by_email",
        skip_all,
        fields(store_uuid = %store),
        err
    )]
    async fn find_customer_by_email(
        &self,
        store: StoreUuid,
        email: &CustomerEmail,
    ) -> Result<Option<Customer>, DiscountRepositoryError> {
        let mut tx = self.db.begin_store_transaction(store).await?;

        let customer = query_as::<Postgres, CustomerRow>(FIND_CUSTOMER_BY_EMAIL_SQL)
            .bind(email.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(customer.map(|CustomerRow(customer)| customer))
    }

    #[tracing::instrument(
        name = "discounts.repository.has_prior_order_with_code",
        skip_all,
        fields(store_uuid = %store, code = %code),
        err
    )]
    async fn has_prior_order_with_code(
        &self,
        store: StoreUuid,
        email: &CustomerEmail,
        code: &DiscountCode,
    ) -> Result<bool, DiscountRepositoryError> {
        let mut tx = self.db.begin_store_transaction(store).await?;

        let used: bool = query_scalar(HAS_PRIOR_ORDER_WITH_CODE_SQL)
            .bind(email.as_str())
            .bind(code.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(used)
    }

    #[tracing::instrument(
        name = "discounts.repository.find_categories_for_products",
        skip_all,
        fields(store_uuid = %store, products = products.len()),
        err
    )]
    async fn find_categories_for_products(
        &self,
        store: StoreUuid,
        products: &[ProductUuid],
    ) -> Result<ProductCategoryIndex, DiscountRepositoryError> {
        if products.is_empty() {
            return Ok(ProductCategoryIndex::new());
        }

        let uuids: Vec<Uuid> = products.iter().map(|product| product.into_uuid()).collect();

        let mut tx = self.db.begin_store_transaction(store).await?;

        let rows: Vec<(Uuid, Uuid)> = query_as(FIND_CATEGORIES_FOR_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(rows
            .into_iter()
            .map(|(product, category)| {
                (ProductUuid::from_uuid(product), CategoryUuid::from_uuid(category))
            })
            .collect())
    }

    #[tracing::instrument(
        name = "discounts.repository.find_triggered_gift_products",
        skip_all,
        fields(store_uuid = %store, code = %code),
        err
    )]
    async fn find_active_gift_product_discounts_triggered_by(
        &self,
        store: StoreUuid,
        code: &DiscountCode,
    ) -> Result<Vec<Discount>, DiscountRepositoryError> {
        let mut tx = self.db.begin_store_transaction(store).await?;

        let discounts = query_as::<Postgres, DiscountRow>(FIND_TRIGGERED_GIFT_PRODUCTS_SQL)
            .bind(code.as_str())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(discounts.into_iter().map(DiscountRow::into_discount).collect())
    }

    #[tracing::instrument(
        name = "discounts.repository.find_active_discounts_by_codes",
        skip_all,
        fields(store_uuid = %store, codes = codes.len()),
        err
    )]
    async fn find_active_discounts_by_codes(
        &self,
        store: StoreUuid,
        codes: &[DiscountCode],
    ) -> Result<Vec<Discount>, DiscountRepositoryError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let codes: Vec<String> = codes.iter().map(ToString::to_string).collect();

        let mut tx = self.db.begin_store_transaction(store).await?;

        let discounts = query_as::<Postgres, DiscountRow>(FIND_ACTIVE_DISCOUNTS_BY_CODES_SQL)
            .bind(codes)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(discounts.into_iter().map(DiscountRow::into_discount).collect())
    }
}

fn decode_error(
    column: &str,
    source: impl Into<Box<dyn StdError + Send + Sync>>,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: source.into(),
    }
}

fn required<'r, T>(row: &'r PgRow, column: &str) -> sqlx::Result<T>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get::<Option<T>, _>(column)?
        .ok_or_else(|| decode_error(column, format!("{column} is required for this kind")))
}

fn quantity(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = required(row, column)?;

    u32::try_from(value).map_err(|e| decode_error(column, e))
}

fn optional_quantity(row: &PgRow, column: &str) -> sqlx::Result<Option<u32>> {
    row.try_get::<Option<i32>, _>(column)?
        .map(|value| u32::try_from(value).map_err(|e| decode_error(column, e)))
        .transpose()
}

fn codes<C: FromIterator<DiscountCode>>(row: &PgRow, column: &str) -> sqlx::Result<C> {
    let raw: Vec<String> = row.try_get(column)?;

    Ok(raw.iter().filter_map(|code| DiscountCode::parse(code)).collect())
}

fn timestamp(row: &PgRow, column: &str) -> sqlx::Result<Option<jiff::Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(SqlxTimestamp::to_jiff))
}

#[derive(Debug, Deserialize)]
struct TierRow {
    min_quantity: u32,
    discount_percent: Decimal,
}

struct DiscountRow(Discount);

impl DiscountRow {
    fn into_discount(self) -> Discount {
        self.0
    }
}

fn decode_kind(row: &PgRow) -> sqlx::Result<DiscountKind> {
    let kind: String = row.try_get("kind")?;

    let gift_product_ids = || -> sqlx::Result<SmallVec<[ProductUuid; 2]>> {
        let uuids: Vec<Uuid> = row.try_get("gift_product_ids")?;

        Ok(uuids.into_iter().map(ProductUuid::from_uuid).collect())
    };

    match kind.as_str() {
        "percentage" => Ok(DiscountKind::Percentage {
            percent: required(row, "value")?,
        }),
        "fixed_amount" => Ok(DiscountKind::FixedAmount {
            amount: required(row, "value")?,
        }),
        "free_shipping" => Ok(DiscountKind::FreeShipping),
        "buy_x_pay_y" => Ok(DiscountKind::BuyXPayY {
            buy_quantity: quantity(row, "buy_quantity")?,
            pay_quantity: quantity(row, "pay_quantity")?,
        }),
        "buy_x_get_y" => Ok(DiscountKind::BuyXGetY {
            buy_quantity: quantity(row, "buy_quantity")?,
            get_quantity: quantity(row, "get_quantity")?,
            get_discount_percent: row
                .try_get::<Option<Decimal>, _>("get_discount_percent")?
                .unwrap_or(Decimal::ONE_HUNDRED),
            gift_product_ids: gift_product_ids()?,
            gift_same_product: row.try_get("gift_same_product")?,
        }),
        "gift_product" => Ok(DiscountKind::GiftProduct {
            gift_product_ids: gift_product_ids()?,
            trigger_codes: codes(row, "trigger_codes")?,
        }),
        "quantity_discount" => {
            let Json(tiers): Json<Vec<TierRow>> = row.try_get("quantity_tiers")?;

            let tiers = QuantityTiers::new(tiers.into_iter().map(|tier| QuantityTier {
                min_quantity: tier.min_quantity,
                discount_percent: tier.discount_percent,
            }))
            .map_err(|e| decode_error("quantity_tiers", e))?;

            Ok(DiscountKind::QuantityDiscount { tiers })
        }
        "spend_x_pay_y" => Ok(DiscountKind::SpendXPayY {
            spend_amount: required(row, "spend_amount")?,
            pay_amount: required(row, "pay_amount")?,
        }),
        other => Err(decode_error("kind", format!("unknown discount kind {other:?}"))),
    }
}

fn decode_scope(row: &PgRow) -> sqlx::Result<Scope> {
    let applies_to: String = row.try_get("applies_to")?;

    let applies_to = AppliesTo::parse(&applies_to)
        .ok_or_else(|| decode_error("applies_to", format!("unknown target {applies_to:?}")))?;

    let uuids = |column: &str| -> sqlx::Result<Vec<Uuid>> { row.try_get(column) };

    Ok(Scope {
        applies_to,
        product_ids: uuids("product_ids")?.into_iter().map(ProductUuid::from).collect(),
        category_ids: uuids("category_ids")?
            .into_iter()
            .map(CategoryUuid::from)
            .collect(),
        exclude_product_ids: uuids("exclude_product_ids")?
            .into_iter()
            .map(ProductUuid::from)
            .collect(),
        exclude_category_ids: uuids("exclude_category_ids")?
            .into_iter()
            .map(CategoryUuid::from)
            .collect(),
    })
}

impl<'r> FromRow<'r, PgRow> for DiscountRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code: Option<String> = row.try_get("code")?;

        Ok(Self(Discount {
            uuid: DiscountUuid::from_uuid(row.try_get("uuid")?),
            code: code.as_deref().and_then(DiscountCode::parse),
            title: row.try_get("title")?,
            kind: decode_kind(row)?,
            minimum_amount: row.try_get("minimum_amount")?,
            minimum_quantity: optional_quantity(row, "minimum_quantity")?,
            stackable: row.try_get("stackable")?,
            scope: decode_scope(row)?,
            usage_limit: optional_quantity(row, "usage_limit")?,
            usage_count: quantity(row, "usage_count")?,
            once_per_customer: row.try_get("once_per_customer")?,
            first_order_only: row.try_get("first_order_only")?,
            starts_at: timestamp(row, "starts_at")?,
            ends_at: timestamp(row, "ends_at")?,
            is_active: row.try_get("is_active")?,
            activates_codes: codes(row, "activates_codes")?,
        }))
    }
}

struct GiftCardRow(GiftCard);

impl<'r> FromRow<'r, PgRow> for GiftCardRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code: String = row.try_get("code")?;
        let status: String = row.try_get("status")?;

        Ok(Self(GiftCard {
            uuid: GiftCardUuid::from_uuid(row.try_get("uuid")?),
            code: DiscountCode::parse(&code)
                .ok_or_else(|| decode_error("code", "gift card code is blank"))?,
            current_balance: row.try_get("current_balance")?,
            status: GiftCardStatus::parse(&status)
                .ok_or_else(|| decode_error("status", format!("unknown status {status:?}")))?,
            expires_at: timestamp(row, "expires_at")?,
        }))
    }
}

struct CustomerRow(Customer);

impl<'r> FromRow<'r, PgRow> for CustomerRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let email: String = row.try_get("email")?;
        let total_orders: i64 = row.try_get("total_orders")?;

        Ok(Self(Customer {
            email: CustomerEmail::parse(&email)
                .ok_or_else(|| decode_error("email", "customer email is blank"))?,
            total_orders: u64::try_from(total_orders)
                .map_err(|e| decode_error("total_orders", e))?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rebate::{ids::ProductUuid, resolution::Resolution};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::discounts::{
            CatalogDiscountsService, DiscountsService,
            data::{ResolveRequest, ResolverOptions},
        },
        test::TestContext,
    };

    const QUAY_COFFEE: &str = r"
stores:
  - uuid: 0192f7c0-0000-7000-8000-000000000002
    name: Quay Coffee
    discounts:
      - code: WELCOME10
        title: Coffee welcome
        kind: { type: fixed_amount, amount: 2 }
";

    fn code(raw: &str) -> DiscountCode {
        DiscountCode::parse(raw).expect("code is not blank")
    }

    fn seeded<'a>(ctx: &'a TestContext, raw: &str) -> &'a Discount {
        let code = code(raw);

        ctx.catalog
            .discounts
            .iter()
            .find(|discount| discount.has_code(&code))
            .expect("demo discount missing")
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn coded_discounts_read_back_as_seeded() -> TestResult {
        let ctx = TestContext::new().await;

        for raw in ["WELCOME10", "BUY2PAY1", "SUMMER", "BULK", "SPEND200", "LOYAL5", "LAUNCH"] {
            let found = ctx
                .repository
                .find_active_discount_by_code(ctx.store, &code(raw))
                .await?;

            assert_eq!(found.as_ref(), Some(seeded(&ctx, raw)), "{raw}");
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn switched_off_and_unknown_codes_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let mut retired = Discount::new(
            Some(code("RETIRED")),
            "Retired",
            DiscountKind::FreeShipping,
        );
        retired.is_active = false;

        ctx.insert_discount(ctx.store, &retired).await;

        for raw in ["RETIRED", "NOPE"] {
            let found = ctx
                .repository
                .find_active_discount_by_code(ctx.store, &code(raw))
                .await?;

            assert!(found.is_none(), "{raw}");
        }

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn stores_cannot_see_each_others_catalogs() -> TestResult {
        let ctx = TestContext::new().await;
        let coffee = ctx.seed_yaml(QUAY_COFFEE).await;

        let books_welcome = ctx
            .repository
            .find_active_discount_by_code(ctx.store, &code("WELCOME10"))
            .await?;

        let coffee_welcome = ctx
            .repository
            .find_active_discount_by_code(coffee, &code("WELCOME10"))
            .await?;

        let coffee_card = ctx
            .repository
            .find_active_gift_card_by_code(coffee, &code("GC-500"))
            .await?;

        let coffee_customer = ctx
            .repository
            .find_customer_by_email(
                coffee,
                &CustomerEmail::parse("grace@example.com").expect("email is not blank"),
            )
            .await?;

        assert_eq!(
            books_welcome.map(|d| d.title),
            Some("Welcome, 10% off your first order".to_string())
        );
        assert_eq!(coffee_welcome.map(|d| d.title), Some("Coffee welcome".to_string()));
        assert!(coffee_card.is_none());
        assert!(coffee_customer.is_none());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn gift_cards_are_returned_whatever_their_status() -> TestResult {
        let ctx = TestContext::new().await;

        let old = ctx
            .repository
            .find_active_gift_card_by_code(ctx.store, &code("gc-old"))
            .await?;

        let eighty = ctx
            .repository
            .find_active_gift_card_by_code(ctx.store, &code("GC-80"))
            .await?;

        assert_eq!(old.map(|card| card.status), Some(GiftCardStatus::Expired));
        assert_eq!(eighty.as_ref(), ctx.catalog.gift_cards.get(1));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn customer_history_comes_from_customers_and_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let grace = CustomerEmail::parse("Grace@Example.com").expect("email is not blank");
        let ada = CustomerEmail::parse("ada@example.com").expect("email is not blank");
        let nobody = CustomerEmail::parse("nobody@example.com").expect("email is not blank");

        let customer = ctx.repository.find_customer_by_email(ctx.store, &grace).await?;

        assert_eq!(customer.map(|c| c.total_orders), Some(2));
        assert!(
            ctx.repository
                .find_customer_by_email(ctx.store, &nobody)
                .await?
                .is_none()
        );
        assert!(
            ctx.repository
                .has_prior_order_with_code(ctx.store, &grace, &code("loyal5"))
                .await?
        );
        assert!(
            !ctx.repository
                .has_prior_order_with_code(ctx.store, &ada, &code("LOYAL5"))
                .await?
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn categories_are_loaded_for_requested_products_only() -> TestResult {
        let ctx = TestContext::new().await;

        let paperback: ProductUuid = "0192f7c0-0000-7000-8000-0000000000b1".parse()?;
        let mug: ProductUuid = "0192f7c0-0000-7000-8000-0000000000b3".parse()?;
        let unknown = ProductUuid::new();

        let index = ctx
            .repository
            .find_categories_for_products(ctx.store, &[paperback, unknown])
            .await?;

        assert_eq!(index.len(), 1);
        assert_eq!(index.categories_of(paperback), ctx.catalog.categories.categories_of(paperback));
        assert!(index.categories_of(mug).is_empty());

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn trigger_lookup_returns_active_gift_products() -> TestResult {
        let ctx = TestContext::new().await;

        let triggered = ctx
            .repository
            .find_active_gift_product_discounts_triggered_by(ctx.store, &code("summer"))
            .await?;

        let mut titles: Vec<_> = triggered.iter().map(|d| d.title.as_str()).collect();
        titles.sort_unstable();

        // Expired rows are still returned; the chain resolver drops them.
        assert_eq!(titles, vec!["Free poster (last season)", "Free tote bag"]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn trigger_codes_match_whatever_their_case() -> TestResult {
        let ctx = TestContext::new().await;

        sqlx::query(
            "INSERT INTO discounts (uuid, store_uuid, title, kind, gift_product_ids, trigger_codes) \
             VALUES ($1, $2, 'Free mug', 'gift_product', ARRAY[$3::uuid], ARRAY[' summer', 'Autumn'])",
        )
        .bind(Uuid::now_v7())
        .bind(ctx.store.into_uuid())
        .bind(Uuid::now_v7())
        .execute(&ctx.db.pool)
        .await?;

        let triggered = ctx
            .repository
            .find_active_gift_product_discounts_triggered_by(ctx.store, &code("SUMMER"))
            .await?;

        let mug = triggered
            .iter()
            .find(|discount| discount.title == "Free mug")
            .expect("lower-case trigger matched");

        assert_eq!(mug.trigger_codes(), &[code("SUMMER"), code("AUTUMN")]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn activated_codes_come_back_in_requested_order() -> TestResult {
        let ctx = TestContext::new().await;

        let found = ctx
            .repository
            .find_active_discounts_by_codes(
                ctx.store,
                &[code("FREESHIP"), code("NOPE"), code("WELCOME10")],
            )
            .await?;

        let codes: Vec<_> = found
            .iter()
            .filter_map(|d| d.code.as_ref().map(DiscountCode::as_str))
            .collect();

        assert_eq!(codes, vec!["FREESHIP", "WELCOME10"]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn rows_missing_kind_data_are_invalid_records() -> TestResult {
        let ctx = TestContext::new().await;

        sqlx::query(
            "INSERT INTO discounts (uuid, store_uuid, code, title, kind) \
             VALUES ($1, $2, 'BROKEN', 'Broken', 'percentage')",
        )
        .bind(Uuid::now_v7())
        .bind(ctx.store.into_uuid())
        .execute(&ctx.db.pool)
        .await?;

        let result = ctx
            .repository
            .find_active_discount_by_code(ctx.store, &code("BROKEN"))
            .await;

        assert!(matches!(
            result,
            Err(DiscountRepositoryError::InvalidRecord { column, .. }) if column == "value"
        ));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn resolves_summer_chain_against_postgres() -> TestResult {
        let ctx = TestContext::new().await;

        let service = CatalogDiscountsService::new(
            Arc::new(ctx.repository.clone()),
            ResolverOptions::default(),
        );

        let now: jiff::Timestamp = "2026-06-01T00:00:00Z".parse()?;

        let Resolution {
            discount,
            triggered_gift_coupons,
            activated_discounts,
        } = service
            .resolve_discount(
                ResolveRequest::new(ctx.store, "summer", Decimal::from(50)).at(now),
            )
            .await?;

        assert_eq!(discount.title, "Summer sale");
        assert_eq!(
            triggered_gift_coupons
                .iter()
                .map(|c| c.discount.title.as_str())
                .collect::<Vec<_>>(),
            vec!["Free tote bag"]
        );
        assert_eq!(activated_discounts.len(), 1);

        Ok(())
    }
}
