//! App Context

use std::{path::Path, sync::Arc};

use thiserror::Error;

use crate::{
    config::CatalogSource,
    database::{self, Db},
    domain::discounts::{
        CatalogDiscountsService, DiscountRepository, DiscountRepositoryError, DiscountsService,
        InMemoryDiscountRepository, PgDiscountRepository, data::ResolverOptions,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database: {0}")]
    Database(#[source] sqlx::Error),

    #[error("failed to load catalog: {0}")]
    Catalog(#[source] DiscountRepositoryError),

    #[error("no discount source configured; pass --catalog or --database-url")]
    MissingSource,
}

#[derive(Clone)]
pub struct AppContext {
    pub discounts: Arc<dyn DiscountsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// connected role would bypass row-level security.
    pub async fn from_database_url(
        url: &str,
        options: ResolverOptions,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::with_repository(
            Arc::new(PgDiscountRepository::new(Db::new(pool))),
            options,
        ))
    }

    /// Build application context from a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be read or is invalid.
    pub fn from_catalog(path: impl AsRef<Path>, options: ResolverOptions) -> Result<Self, AppInitError> {
        let repository = InMemoryDiscountRepository::load(path).map_err(AppInitError::Catalog)?;

        Ok(Self::with_repository(Arc::new(repository), options))
    }

    /// Build application context from whichever source is configured.
    ///
    /// # Errors
    ///
    /// Returns an error when no source is configured or the source fails to load.
    pub async fn from_source(
        source: Option<CatalogSource>,
        options: ResolverOptions,
    ) -> Result<Self, AppInitError> {
        match source {
            Some(CatalogSource::File(path)) => Self::from_catalog(path, options),
            Some(CatalogSource::Database(url)) => Self::from_database_url(&url, options).await,
            None => Err(AppInitError::MissingSource),
        }
    }

    #[must_use]
    pub fn with_repository(
        repository: Arc<dyn DiscountRepository>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            discounts: Arc::new(CatalogDiscountsService::new(repository, options)),
        }
    }
}
