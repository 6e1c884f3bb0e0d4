//! Fixtures
//!
//! YAML catalogs used by the demo binary and the tests. A catalog lists
//! stores, and each store carries its discounts, gift cards, customers and
//! product categories.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::{discounts::EmptyTiers, ids::StoreUuid};

pub mod discounts;
pub mod stores;

pub use stores::{CustomerRecord, StoreCatalog};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Blank discount or gift card code
    #[error("Invalid code: {0:?}")]
    InvalidCode(String),

    /// Blank customer email
    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    /// Quantity discount without tiers
    #[error("Invalid discount {title:?}: {source}")]
    EmptyTiers {
        /// Title of the offending discount
        title: String,

        /// Underlying error
        source: EmptyTiers,
    },

    /// Store listed twice
    #[error("Duplicate store: {0}")]
    DuplicateStore(Uuid),

    /// Two discounts of a store share an identifier
    #[error("Duplicate discount {uuid} in store {store}")]
    DuplicateDiscount {
        /// Store the discounts belong to
        store: StoreUuid,

        /// Shared identifier
        uuid: Uuid,
    },

    /// Code used by more than one discount or gift card in a store
    #[error("Duplicate code {code} in store {store}")]
    DuplicateCode {
        /// Store the code belongs to
        store: StoreUuid,

        /// Normalised code
        code: String,
    },
}

/// All stores of a catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stores: FxHashMap<StoreUuid, StoreCatalog>,
}

impl Catalog {
    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or describes invalid data.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: stores::CatalogFixture = serde_norway::from_str(contents)?;
        let mut stores = FxHashMap::default();

        for store_fixture in fixture.stores {
            let uuid = StoreUuid::from_uuid(store_fixture.uuid);
            let store = StoreCatalog::try_from(store_fixture)?;

            if stores.insert(uuid, store).is_some() {
                return Err(FixtureError::DuplicateStore(uuid.into_uuid()));
            }
        }

        Ok(Self { stores })
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// A single store's catalog.
    #[must_use]
    pub fn store(&self, uuid: StoreUuid) -> Option<&StoreCatalog> {
        self.stores.get(&uuid)
    }

    /// Number of stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the catalog has no stores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Take the per-store catalogs.
    #[must_use]
    pub fn into_stores(self) -> FxHashMap<StoreUuid, StoreCatalog> {
        self.stores
    }
}
