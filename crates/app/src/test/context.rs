//! Seeded stores for repository and service integration tests.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rebate::{
    discounts::{Discount, DiscountKind},
    fixtures::{Catalog, StoreCatalog},
    gift_cards::GiftCard,
    ids::StoreUuid,
};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::{Connection, PgConnection, PgPool, query};
use uuid::Uuid;

use crate::{database::Db, domain::discounts::PgDiscountRepository};

use super::db::TestDb;

/// Login role without `BYPASSRLS`, so row-level security applies to it.
const APP_ROLE: &str = "rebate_app_test";
const APP_ROLE_PASSWORD: &str = "rebate_app_test_password";

/// Store every demo catalog record belongs to.
const DEMO_STORE: &str = "0192f7c0-0000-7000-8000-000000000001";

const DEMO_CATALOG: &str = include_str!("../../../../fixtures/catalogs/demo.yml");

const INSERT_DISCOUNT_SQL: &str = "
    INSERT INTO discounts (
        uuid, store_uuid, code, title, kind, value, minimum_amount, minimum_quantity,
        stackable, applies_to, product_ids, category_ids, exclude_product_ids,
        exclude_category_ids, usage_limit, usage_count, once_per_customer, first_order_only,
        starts_at, ends_at, is_active, buy_quantity, pay_quantity, get_quantity,
        get_discount_percent, gift_product_ids, gift_same_product, quantity_tiers,
        spend_amount, pay_amount, trigger_codes, activates_codes
    )
    VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
        $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32
    )";

pub(crate) struct TestContext {
    pub db: TestDb,
    pub store: StoreUuid,
    pub catalog: StoreCatalog,
    pub repository: PgDiscountRepository,
}

impl TestContext {
    /// A fresh database holding the demo catalog, read through an RLS-bound
    /// repository.
    pub(crate) async fn new() -> Self {
        let db = TestDb::new().await;
        let app_pool = Self::setup_app_pool(&db).await;

        let catalog = Catalog::from_yaml(DEMO_CATALOG).expect("Failed to parse demo catalog");
        let store = StoreUuid::from_uuid(DEMO_STORE.parse().expect("Invalid demo store uuid"));

        let ctx = Self {
            db,
            store,
            catalog: catalog.store(store).cloned().expect("Demo store missing"),
            repository: PgDiscountRepository::new(Db::new(app_pool)),
        };

        for (uuid, store_catalog) in catalog.into_stores() {
            ctx.seed_store(uuid, &store_catalog).await;
        }

        ctx
    }

    /// Insert a store with everything its catalog holds. Runs as the
    /// superuser, so policies don't get in the way.
    pub(crate) async fn seed_store(&self, store: StoreUuid, catalog: &StoreCatalog) {
        let pool = &self.db.pool;

        query("INSERT INTO stores (uuid, name) VALUES ($1, $2)")
            .bind(store.into_uuid())
            .bind(&catalog.name)
            .execute(pool)
            .await
            .expect("Failed to insert store");

        for discount in &catalog.discounts {
            self.insert_discount(store, discount).await;
        }

        for card in &catalog.gift_cards {
            self.insert_gift_card(store, card).await;
        }

        for record in &catalog.customers {
            let email = record.customer.email.as_str();

            query(
                "INSERT INTO customers (uuid, store_uuid, email, total_orders) VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::now_v7())
            .bind(store.into_uuid())
            .bind(email)
            .bind(i64::try_from(record.customer.total_orders).expect("total_orders fits"))
            .execute(pool)
            .await
            .expect("Failed to insert customer");

            for code in &record.used_codes {
                query(
                    "INSERT INTO orders (uuid, store_uuid, customer_email, discount_code) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(Uuid::now_v7())
                .bind(store.into_uuid())
                .bind(email)
                .bind(code.as_str())
                .execute(pool)
                .await
                .expect("Failed to insert order");
            }
        }

        for (product, category) in catalog.categories.pairs() {
            query(
                "INSERT INTO product_categories (store_uuid, product_uuid, category_uuid) \
                 VALUES ($1, $2, $3)",
            )
            .bind(store.into_uuid())
            .bind(product.into_uuid())
            .bind(category.into_uuid())
            .execute(pool)
            .await
            .expect("Failed to insert product category");
        }
    }

    /// Insert a second store from inline YAML, for isolation tests.
    pub(crate) async fn seed_yaml(&self, yaml: &str) -> StoreUuid {
        let catalog = Catalog::from_yaml(yaml).expect("Failed to parse catalog");
        let mut seeded = None;

        for (uuid, store_catalog) in catalog.into_stores() {
            self.seed_store(uuid, &store_catalog).await;
            seeded = Some(uuid);
        }

        seeded.expect("Catalog has no stores")
    }

    pub(crate) async fn insert_discount(&self, store: StoreUuid, discount: &Discount) {
        let columns = KindColumns::from(&discount.kind);
        let scope = &discount.scope;

        query(INSERT_DISCOUNT_SQL)
            .bind(discount.uuid.into_uuid())
            .bind(store.into_uuid())
            .bind(discount.code.as_ref().map(|code| code.as_str().to_string()))
            .bind(&discount.title)
            .bind(discount.kind.as_str())
            .bind(columns.value)
            .bind(discount.minimum_amount)
            .bind(discount.minimum_quantity.map(to_i32))
            .bind(discount.stackable)
            .bind(scope.applies_to.as_str())
            .bind(scope.product_ids.iter().map(|p| p.into_uuid()).collect::<Vec<_>>())
            .bind(scope.category_ids.iter().map(|c| c.into_uuid()).collect::<Vec<_>>())
            .bind(
                scope
                    .exclude_product_ids
                    .iter()
                    .map(|p| p.into_uuid())
                    .collect::<Vec<_>>(),
            )
            .bind(
                scope
                    .exclude_category_ids
                    .iter()
                    .map(|c| c.into_uuid())
                    .collect::<Vec<_>>(),
            )
            .bind(discount.usage_limit.map(to_i32))
            .bind(to_i32(discount.usage_count))
            .bind(discount.once_per_customer)
            .bind(discount.first_order_only)
            .bind(discount.starts_at.map(SqlxTimestamp::from))
            .bind(discount.ends_at.map(SqlxTimestamp::from))
            .bind(discount.is_active)
            .bind(columns.buy_quantity)
            .bind(columns.pay_quantity)
            .bind(columns.get_quantity)
            .bind(columns.get_discount_percent)
            .bind(columns.gift_product_ids)
            .bind(columns.gift_same_product)
            .bind(columns.quantity_tiers)
            .bind(columns.spend_amount)
            .bind(columns.pay_amount)
            .bind(columns.trigger_codes)
            .bind(
                discount
                    .activates_codes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            )
            .execute(&self.db.pool)
            .await
            .expect("Failed to insert discount");
    }

    pub(crate) async fn insert_gift_card(&self, store: StoreUuid, card: &GiftCard) {
        query(
            "INSERT INTO gift_cards (uuid, store_uuid, code, current_balance, status, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(card.uuid.into_uuid())
        .bind(store.into_uuid())
        .bind(card.code.as_str())
        .bind(card.current_balance)
        .bind(card.status.as_str())
        .bind(card.expires_at.map(SqlxTimestamp::from))
        .execute(&self.db.pool)
        .await
        .expect("Failed to insert gift card");
    }

    /// Create the app role (once per server) and connect to this test's
    /// database as it. Superusers bypass RLS even under `FORCE ROW LEVEL
    /// SECURITY`, so repository reads must not use `db.pool`.
    async fn setup_app_pool(test_db: &TestDb) -> PgPool {
        let server_url = test_db
            .superuser_url
            .rsplit_once('/')
            .map_or_else(|| test_db.superuser_url.clone(), |(base, _)| format!("{base}/postgres"));

        let mut server = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect for role setup");

        // Tests race to create the role; "already exists" is fine.
        let created = query(&format!(
            "CREATE ROLE {APP_ROLE} WITH LOGIN PASSWORD '{APP_ROLE_PASSWORD}' \
             NOSUPERUSER NOCREATEDB NOCREATEROLE NOBYPASSRLS"
        ))
        .execute(&mut server)
        .await;

        match created {
            Ok(_) => {}
            Err(sqlx::Error::Database(error))
                if matches!(error.code().as_deref(), Some("42710" | "23505")) => {}
            Err(error) => panic!("Failed to create app role: {error}"),
        }

        query(&format!(
            "GRANT CONNECT ON DATABASE \"{}\" TO {APP_ROLE}",
            test_db.name
        ))
        .execute(&mut server)
        .await
        .expect("Failed to grant CONNECT");

        server.close().await.expect("Failed to close server connection");

        for grant in [
            format!("GRANT USAGE ON SCHEMA public TO {APP_ROLE}"),
            format!("GRANT SELECT ON ALL TABLES IN SCHEMA public TO {APP_ROLE}"),
        ] {
            query(&grant)
                .execute(&test_db.pool)
                .await
                .expect("Failed to grant app role privileges");
        }

        PgPool::connect(&test_db.url_for(APP_ROLE, APP_ROLE_PASSWORD))
            .await
            .expect("Failed to connect as app role")
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).expect("quantity fits in INTEGER")
}

/// The kind-specific columns of a discount row.
struct KindColumns {
    value: Option<Decimal>,
    buy_quantity: Option<i32>,
    pay_quantity: Option<i32>,
    get_quantity: Option<i32>,
    get_discount_percent: Option<Decimal>,
    gift_product_ids: Vec<Uuid>,
    gift_same_product: bool,
    quantity_tiers: serde_json::Value,
    spend_amount: Option<Decimal>,
    pay_amount: Option<Decimal>,
    trigger_codes: Vec<String>,
}

impl Default for KindColumns {
    fn default() -> Self {
        Self {
            value: None,
            buy_quantity: None,
            pay_quantity: None,
            get_quantity: None,
            get_discount_percent: None,
            gift_product_ids: Vec::new(),
            gift_same_product: false,
            quantity_tiers: json!([]),
            spend_amount: None,
            pay_amount: None,
            trigger_codes: Vec::new(),
        }
    }
}

impl From<&DiscountKind> for KindColumns {
    fn from(kind: &DiscountKind) -> Self {
        match kind {
            DiscountKind::Percentage { percent } => Self {
                value: Some(*percent),
                ..Self::default()
            },
            DiscountKind::FixedAmount { amount } => Self {
                value: Some(*amount),
                ..Self::default()
            },
            DiscountKind::FreeShipping => Self::default(),
            DiscountKind::BuyXPayY {
                buy_quantity,
                pay_quantity,
            } => Self {
                buy_quantity: Some(to_i32(*buy_quantity)),
                pay_quantity: Some(to_i32(*pay_quantity)),
                ..Self::default()
            },
            DiscountKind::BuyXGetY {
                buy_quantity,
                get_quantity,
                get_discount_percent,
                gift_product_ids,
                gift_same_product,
            } => Self {
                buy_quantity: Some(to_i32(*buy_quantity)),
                get_quantity: Some(to_i32(*get_quantity)),
                get_discount_percent: Some(*get_discount_percent),
                gift_product_ids: gift_product_ids.iter().map(|p| p.into_uuid()).collect(),
                gift_same_product: *gift_same_product,
                ..Self::default()
            },
            DiscountKind::GiftProduct {
                gift_product_ids,
                trigger_codes,
            } => Self {
                gift_product_ids: gift_product_ids.iter().map(|p| p.into_uuid()).collect(),
                trigger_codes: trigger_codes.iter().map(ToString::to_string).collect(),
                ..Self::default()
            },
            DiscountKind::QuantityDiscount { tiers } => Self {
                quantity_tiers: tiers
                    .as_slice()
                    .iter()
                    .map(|tier| {
                        json!({
                            "min_quantity": tier.min_quantity,
                            "discount_percent": tier.discount_percent
                        })
                    })
                    .collect(),
                ..Self::default()
            },
            DiscountKind::SpendXPayY {
                spend_amount,
                pay_amount,
            } => Self {
                spend_amount: Some(*spend_amount),
                pay_amount: Some(*pay_amount),
                ..Self::default()
            },
            DiscountKind::GiftCard { .. } => panic!("gift cards live in their own table"),
        }
    }
}
