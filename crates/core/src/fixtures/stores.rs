//! Store Fixtures

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::{
    cart::ProductCategoryIndex,
    codes::{CustomerEmail, DiscountCode},
    customers::Customer,
    discounts::Discount,
    fixtures::{
        FixtureError,
        discounts::{DiscountFixture, parse_code},
    },
    gift_cards::{GiftCard, GiftCardStatus},
    ids::{CategoryUuid, DiscountUuid, GiftCardUuid, ProductUuid, StoreUuid},
};

/// Wrapper for stores in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Stores in the catalog
    pub stores: Vec<StoreFixture>,
}

/// Store fixture from YAML
#[derive(Debug, Deserialize)]
pub struct StoreFixture {
    /// Store identifier
    pub uuid: Uuid,

    /// Store name
    pub name: String,

    /// Discounts owned by the store
    #[serde(default)]
    pub discounts: Vec<DiscountFixture>,

    /// Gift cards issued by the store
    #[serde(default)]
    pub gift_cards: Vec<GiftCardFixture>,

    /// Known customers
    #[serde(default)]
    pub customers: Vec<CustomerFixture>,

    /// Map of product uuid -> category uuids
    #[serde(default)]
    pub products: FxHashMap<Uuid, Vec<Uuid>>,
}

/// Gift card fixture from YAML
#[derive(Debug, Deserialize)]
pub struct GiftCardFixture {
    /// Identifier; derived from the store and code when omitted
    pub uuid: Option<Uuid>,

    /// Redemption code
    pub code: String,

    /// Remaining balance
    pub balance: Decimal,

    /// Lifecycle status
    #[serde(default)]
    pub status: GiftCardStatusFixture,

    /// Expiry
    pub expires_at: Option<Timestamp>,
}

/// Gift card status fixture
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftCardStatusFixture {
    /// Redeemable
    #[default]
    Active,

    /// Switched off
    Disabled,

    /// Used up
    Depleted,

    /// Expired
    Expired,
}

impl From<GiftCardStatusFixture> for GiftCardStatus {
    fn from(fixture: GiftCardStatusFixture) -> Self {
        match fixture {
            GiftCardStatusFixture::Active => Self::Active,
            GiftCardStatusFixture::Disabled => Self::Disabled,
            GiftCardStatusFixture::Depleted => Self::Depleted,
            GiftCardStatusFixture::Expired => Self::Expired,
        }
    }
}

/// Customer fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CustomerFixture {
    /// Email address
    pub email: String,

    /// Orders placed so far
    #[serde(default)]
    pub total_orders: u64,

    /// Codes used on earlier orders
    #[serde(default)]
    pub used_codes: Vec<String>,
}

/// A customer together with the codes their past orders used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    /// The customer
    pub customer: Customer,

    /// Codes used on earlier orders
    pub used_codes: SmallVec<[DiscountCode; 4]>,
}

impl TryFrom<CustomerFixture> for CustomerRecord {
    type Error = FixtureError;

    fn try_from(fixture: CustomerFixture) -> Result<Self, Self::Error> {
        let email = CustomerEmail::parse(&fixture.email)
            .ok_or_else(|| FixtureError::InvalidEmail(fixture.email.clone()))?;

        let used_codes = fixture
            .used_codes
            .iter()
            .map(|raw| parse_code(raw))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            customer: Customer {
                email,
                total_orders: fixture.total_orders,
            },
            used_codes,
        })
    }
}

/// Everything a store's catalog holds.
#[derive(Debug, Clone, Default)]
pub struct StoreCatalog {
    /// Store name
    pub name: String,

    /// Discounts, in file order
    pub discounts: Vec<Discount>,

    /// Gift cards, in file order
    pub gift_cards: Vec<GiftCard>,

    /// Known customers
    pub customers: Vec<CustomerRecord>,

    /// Product categories
    pub categories: ProductCategoryIndex,
}

impl TryFrom<StoreFixture> for StoreCatalog {
    type Error = FixtureError;

    fn try_from(fixture: StoreFixture) -> Result<Self, Self::Error> {
        let store = StoreUuid::from_uuid(fixture.uuid);
        let mut codes: FxHashSet<DiscountCode> = FxHashSet::default();

        let discounts = fixture
            .discounts
            .into_iter()
            .enumerate()
            .map(|(position, discount)| discount.try_into_discount(store, position))
            .collect::<Result<Vec<Discount>, _>>()?;

        let mut uuids: FxHashSet<DiscountUuid> = FxHashSet::default();

        for discount in &discounts {
            if !uuids.insert(discount.uuid) {
                return Err(FixtureError::DuplicateDiscount {
                    store,
                    uuid: discount.uuid.into_uuid(),
                });
            }
        }

        let gift_cards = fixture
            .gift_cards
            .into_iter()
            .map(|card| card.try_into_gift_card(store))
            .collect::<Result<Vec<_>, _>>()?;

        let claimed = discounts
            .iter()
            .filter_map(|discount| discount.code.as_ref())
            .chain(gift_cards.iter().map(|card| &card.code));

        for code in claimed {
            if !codes.insert(code.clone()) {
                return Err(FixtureError::DuplicateCode {
                    store,
                    code: code.to_string(),
                });
            }
        }

        let customers = fixture
            .customers
            .into_iter()
            .map(CustomerRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let categories = fixture
            .products
            .into_iter()
            .flat_map(|(product, categories)| {
                categories.into_iter().map(move |category| {
                    (ProductUuid::from_uuid(product), CategoryUuid::from_uuid(category))
                })
            })
            .collect();

        Ok(Self {
            name: fixture.name,
            discounts,
            gift_cards,
            customers,
            categories,
        })
    }
}

impl GiftCardFixture {
    /// Convert to a `GiftCard` issued by `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the code is blank.
    pub fn try_into_gift_card(self, store: StoreUuid) -> Result<GiftCard, FixtureError> {
        let code = parse_code(&self.code)?;

        let uuid = self
            .uuid
            .unwrap_or_else(|| Uuid::new_v5(&store.into_uuid(), code.as_str().as_bytes()));

        Ok(GiftCard {
            uuid: GiftCardUuid::from_uuid(uuid),
            code,
            current_balance: self.balance,
            status: self.status.into(),
            expires_at: self.expires_at,
        })
    }
}
