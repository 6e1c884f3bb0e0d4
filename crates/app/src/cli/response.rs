//! JSON projection of a resolution.

use jiff::Timestamp;
use rebate::{
    chain::ChainedDiscount,
    discounts::{Discount, DiscountKind},
    rejection::Rejection,
    resolution::Resolution,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub(crate) enum ResolveResponse {
    Success {
        discount: DiscountResponse,

        #[serde(skip_serializing_if = "Vec::is_empty")]
        triggered_gift_coupons: Vec<ChainedDiscountResponse>,

        #[serde(skip_serializing_if = "Vec::is_empty")]
        activated_discounts: Vec<ChainedDiscountResponse>,
    },
    Failure {
        reason: &'static str,
        message: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        threshold: Option<Decimal>,

        #[serde(skip_serializing_if = "Option::is_none")]
        required_quantity: Option<u32>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DiscountResponse {
    uuid: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,

    title: String,
    kind: &'static str,
    value: Decimal,
    stackable: bool,
    applies_to: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_amount: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_quantity: Option<u32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    gift_product_ids: Vec<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    balance: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    starts_at: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    ends_at: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChainedDiscountResponse {
    #[serde(flatten)]
    discount: DiscountResponse,

    triggered_by_code: String,
}

impl From<&Discount> for DiscountResponse {
    fn from(discount: &Discount) -> Self {
        let gift_product_ids = match &discount.kind {
            DiscountKind::BuyXGetY {
                gift_product_ids, ..
            }
            | DiscountKind::GiftProduct {
                gift_product_ids, ..
            } => gift_product_ids.iter().map(|uuid| uuid.into_uuid()).collect(),
            _ => Vec::new(),
        };

        let balance = match &discount.kind {
            DiscountKind::GiftCard { balance, .. } => Some(*balance),
            _ => None,
        };

        Self {
            uuid: discount.uuid.into_uuid(),
            code: discount.code.as_ref().map(ToString::to_string),
            title: discount.title.clone(),
            kind: discount.kind.as_str(),
            value: discount.value(),
            stackable: discount.stackable,
            applies_to: discount.scope.applies_to.as_str(),
            minimum_amount: discount.minimum_amount,
            minimum_quantity: discount.minimum_quantity,
            gift_product_ids,
            balance,
            starts_at: discount.starts_at,
            ends_at: discount.ends_at,
        }
    }
}

impl From<&ChainedDiscount> for ChainedDiscountResponse {
    fn from(chained: &ChainedDiscount) -> Self {
        Self {
            discount: DiscountResponse::from(&chained.discount),
            triggered_by_code: chained.triggered_by_code.to_string(),
        }
    }
}

impl From<&Resolution> for ResolveResponse {
    fn from(resolution: &Resolution) -> Self {
        Self::Success {
            discount: DiscountResponse::from(&resolution.discount),
            triggered_gift_coupons: resolution
                .triggered_gift_coupons
                .iter()
                .map(ChainedDiscountResponse::from)
                .collect(),
            activated_discounts: resolution
                .activated_discounts
                .iter()
                .map(ChainedDiscountResponse::from)
                .collect(),
        }
    }
}

impl From<&Rejection> for ResolveResponse {
    fn from(rejection: &Rejection) -> Self {
        let (threshold, required_quantity) = match rejection {
            Rejection::BelowMinimum { threshold } => (Some(*threshold), None),
            Rejection::InsufficientQuantity { required } => (None, Some(*required)),
            _ => (None, None),
        };

        Self::Failure {
            reason: rejection.as_str(),
            message: rejection.to_string(),
            threshold,
            required_quantity,
        }
    }
}
