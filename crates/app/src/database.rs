//! Database connection management

use rebate::ids::StoreUuid;
use sqlx::{PgPool, Postgres, Transaction, query};

/// SQL used to set store context for row-level security.
pub const SET_STORE_CONTEXT_SQL: &str = "SELECT set_config('app.current_store_uuid', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction and set store context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting store context fails.
    pub async fn begin_store_transaction(
        &self,
        store: StoreUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_STORE_CONTEXT_SQL)
            .bind(store.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the bundled migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Refuse to run as a role that bypasses row-level security. Superusers and
/// `BYPASSRLS` roles would see every store's rows.
///
/// # Errors
///
/// Returns an error if the role cannot be inspected or bypasses RLS.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), sqlx::Error> {
    let (role, bypasses): (String, bool) = sqlx::query_as(
        "SELECT rolname, rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user",
    )
    .fetch_one(pool)
    .await?;

    if bypasses {
        return Err(sqlx::Error::Configuration(
            format!("database role {role} bypasses row-level security").into(),
        ));
    }

    Ok(())
}
