//! Discount Fixtures

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::{
    codes::DiscountCode,
    discounts::{Discount, DiscountKind, QuantityTier, QuantityTiers},
    fixtures::FixtureError,
    ids::{CategoryUuid, DiscountUuid, ProductUuid, StoreUuid},
    scope::{AppliesTo, Scope},
};

const fn enabled() -> bool {
    true
}

/// Discount fixture from YAML
#[derive(Debug, Deserialize)]
#[expect(clippy::struct_excessive_bools, reason = "Independent merchant switches")]
pub struct DiscountFixture {
    /// Identifier; derived from the store and code when omitted, or from the
    /// row's position and title for automatic discounts
    pub uuid: Option<Uuid>,

    /// Redemption code; omitted for automatic discounts
    pub code: Option<String>,

    /// Display title
    pub title: String,

    /// Kind and kind-specific data
    pub kind: KindFixture,

    /// Minimum cart total
    pub minimum_amount: Option<Decimal>,

    /// Minimum cart quantity
    pub minimum_quantity: Option<u32>,

    /// Combines with other discounts
    #[serde(default = "enabled")]
    pub stackable: bool,

    /// Lines the discount applies to
    #[serde(default)]
    pub scope: ScopeFixture,

    /// Usage cap
    pub usage_limit: Option<u32>,

    /// Redemptions so far
    #[serde(default)]
    pub usage_count: u32,

    /// One redemption per customer
    #[serde(default)]
    pub once_per_customer: bool,

    /// First orders only
    #[serde(default)]
    pub first_order_only: bool,

    /// Start of the validity window
    pub starts_at: Option<Timestamp>,

    /// End of the validity window
    pub ends_at: Option<Timestamp>,

    /// Switched on
    #[serde(default = "enabled")]
    pub is_active: bool,

    /// Codes this discount activates
    #[serde(default)]
    pub activates_codes: Vec<String>,
}

/// Discount kind fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindFixture {
    /// Percentage off
    Percentage {
        /// Percent, e.g. `10` for 10%
        percent: Decimal,
    },

    /// Fixed amount off
    FixedAmount {
        /// Amount off
        amount: Decimal,
    },

    /// Free shipping
    FreeShipping,

    /// Buy X, pay for Y
    BuyXPayY {
        /// Units to buy
        buy_quantity: u32,

        /// Units paid for
        pay_quantity: u32,
    },

    /// Buy X, get Y at a discount
    BuyXGetY {
        /// Units to buy
        buy_quantity: u32,

        /// Units received
        get_quantity: u32,

        /// Discount on received units; defaults to free
        #[serde(default = "full_discount")]
        get_discount_percent: Decimal,

        /// Products given away
        #[serde(default)]
        gift_product_ids: Vec<Uuid>,

        /// Give away the purchased product
        #[serde(default)]
        gift_same_product: bool,
    },

    /// Free gift unlocked by other codes
    GiftProduct {
        /// Products given away
        #[serde(default)]
        gift_product_ids: Vec<Uuid>,

        /// Codes that unlock the gift
        #[serde(default)]
        trigger_codes: Vec<String>,
    },

    /// Tiered quantity discount
    QuantityDiscount {
        /// Tiers
        tiers: Vec<TierFixture>,
    },

    /// Spend X, pay Y
    SpendXPayY {
        /// Amount to spend
        spend_amount: Decimal,

        /// Amount paid
        pay_amount: Decimal,
    },
}

const fn full_discount() -> Decimal {
    Decimal::ONE_HUNDRED
}

/// Quantity tier fixture
#[derive(Debug, Deserialize)]
pub struct TierFixture {
    /// Units needed for the tier
    pub min_quantity: u32,

    /// Percent off at this tier
    pub discount_percent: Decimal,
}

/// Scope fixture
#[derive(Debug, Default, Deserialize)]
pub struct ScopeFixture {
    /// What the discount targets
    #[serde(default)]
    pub applies_to: AppliesToFixture,

    /// Included products
    #[serde(default)]
    pub product_ids: Vec<Uuid>,

    /// Included categories
    #[serde(default)]
    pub category_ids: Vec<Uuid>,

    /// Excluded products
    #[serde(default)]
    pub exclude_product_ids: Vec<Uuid>,

    /// Excluded categories
    #[serde(default)]
    pub exclude_category_ids: Vec<Uuid>,
}

/// Scope target fixture
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliesToFixture {
    /// Every line
    #[default]
    All,

    /// Category lines
    Category,

    /// Product lines
    Product,

    /// Members
    Member,
}

impl From<AppliesToFixture> for AppliesTo {
    fn from(fixture: AppliesToFixture) -> Self {
        match fixture {
            AppliesToFixture::All => Self::All,
            AppliesToFixture::Category => Self::Category,
            AppliesToFixture::Product => Self::Product,
            AppliesToFixture::Member => Self::Member,
        }
    }
}

impl From<ScopeFixture> for Scope {
    fn from(fixture: ScopeFixture) -> Self {
        Self {
            applies_to: fixture.applies_to.into(),
            product_ids: fixture.product_ids.into_iter().map(ProductUuid::from).collect(),
            category_ids: fixture
                .category_ids
                .into_iter()
                .map(CategoryUuid::from)
                .collect(),
            exclude_product_ids: fixture
                .exclude_product_ids
                .into_iter()
                .map(ProductUuid::from)
                .collect(),
            exclude_category_ids: fixture
                .exclude_category_ids
                .into_iter()
                .map(CategoryUuid::from)
                .collect(),
        }
    }
}

impl DiscountFixture {
    /// Convert to a `Discount` owned by `store`. `position` is the row's
    /// index in the store's discount list.
    ///
    /// # Errors
    ///
    /// Returns an error if a code is blank or a quantity discount has no tiers.
    pub fn try_into_discount(
        self,
        store: StoreUuid,
        position: usize,
    ) -> Result<Discount, FixtureError> {
        let code = self.code.as_deref().map(parse_code).transpose()?;

        let uuid = self.uuid.unwrap_or_else(|| {
            let name = match &code {
                Some(code) => format!("code:{code}"),
                None => format!("row:{position}:{}", self.title),
            };

            Uuid::new_v5(&store.into_uuid(), name.as_bytes())
        });

        let kind = self.kind.try_into_kind(&self.title)?;

        let activates_codes = self
            .activates_codes
            .iter()
            .map(|raw| parse_code(raw))
            .collect::<Result<SmallVec<_>, _>>()?;

        Ok(Discount {
            uuid: DiscountUuid::from_uuid(uuid),
            code,
            title: self.title,
            kind,
            minimum_amount: self.minimum_amount,
            minimum_quantity: self.minimum_quantity,
            stackable: self.stackable,
            scope: self.scope.into(),
            usage_limit: self.usage_limit,
            usage_count: self.usage_count,
            once_per_customer: self.once_per_customer,
            first_order_only: self.first_order_only,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            is_active: self.is_active,
            activates_codes,
        })
    }
}

impl KindFixture {
    fn try_into_kind(self, title: &str) -> Result<DiscountKind, FixtureError> {
        let kind = match self {
            KindFixture::Percentage { percent } => DiscountKind::Percentage { percent },
            KindFixture::FixedAmount { amount } => DiscountKind::FixedAmount { amount },
            KindFixture::FreeShipping => DiscountKind::FreeShipping,
            KindFixture::BuyXPayY {
                buy_quantity,
                pay_quantity,
            } => DiscountKind::BuyXPayY {
                buy_quantity,
                pay_quantity,
            },
            KindFixture::BuyXGetY {
                buy_quantity,
                get_quantity,
                get_discount_percent,
                gift_product_ids,
                gift_same_product,
            } => DiscountKind::BuyXGetY {
                buy_quantity,
                get_quantity,
                get_discount_percent,
                gift_product_ids: gift_product_ids.into_iter().map(ProductUuid::from).collect(),
                gift_same_product,
            },
            KindFixture::GiftProduct {
                gift_product_ids,
                trigger_codes,
            } => DiscountKind::GiftProduct {
                gift_product_ids: gift_product_ids.into_iter().map(ProductUuid::from).collect(),
                trigger_codes: trigger_codes
                    .iter()
                    .map(|raw| parse_code(raw))
                    .collect::<Result<_, _>>()?,
            },
            KindFixture::QuantityDiscount { tiers } => {
                let tiers = QuantityTiers::new(tiers.into_iter().map(|tier| QuantityTier {
                    min_quantity: tier.min_quantity,
                    discount_percent: tier.discount_percent,
                }))
                .map_err(|source| FixtureError::EmptyTiers {
                    title: title.to_string(),
                    source,
                })?;

                DiscountKind::QuantityDiscount { tiers }
            }
            KindFixture::SpendXPayY {
                spend_amount,
                pay_amount,
            } => DiscountKind::SpendXPayY {
                spend_amount,
                pay_amount,
            },
        };

        Ok(kind)
    }
}

/// Parse a discount or gift card code.
///
/// # Errors
///
/// Returns an error if the code is blank.
pub fn parse_code(raw: &str) -> Result<DiscountCode, FixtureError> {
    DiscountCode::parse(raw).ok_or_else(|| FixtureError::InvalidCode(raw.to_string()))
}
