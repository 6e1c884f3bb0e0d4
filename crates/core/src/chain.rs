//! Chain Resolution
//!
//! A redeemed code can unlock other discounts in two ways:
//!
//! - **Triggers**: a gift-product discount lists the codes that unlock it.
//! - **Activations**: the redeemed discount lists the codes it unlocks.
//!
//! Both are followed for exactly one hop. The repository supplies the
//! candidates; this module filters them, removes duplicates and stamps each
//! survivor with the code that unlocked it.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::{
    codes::DiscountCode,
    discounts::{Discount, DiscountKind},
    eligibility::check_discount,
    ids::DiscountUuid,
};

/// A discount unlocked by another code.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainedDiscount {
    /// The unlocked discount, as stored.
    pub discount: Discount,

    /// Code whose redemption unlocked it.
    pub triggered_by_code: DiscountCode,
}

/// How chained discounts are filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainPolicy {
    /// Also run the discount-level eligibility rules against each chained
    /// discount and drop the ones that fail.
    pub validate_constraints: bool,

    /// Cart total of the parent request.
    pub cart_total: Decimal,

    /// Point in time of the parent request.
    pub now: Timestamp,
}

impl ChainPolicy {
    /// Only liveness is checked: the active flag and the end of the validity
    /// window.
    #[must_use]
    pub const fn active_only(cart_total: Decimal, now: Timestamp) -> Self {
        Self {
            validate_constraints: false,
            cart_total,
            now,
        }
    }

    fn admits(&self, discount: &Discount) -> bool {
        if !discount.is_live(self.now) {
            return false;
        }

        !self.validate_constraints || check_discount(discount, self.cart_total, self.now).is_ok()
    }
}

/// Gift-product discounts that list `matched_code` among their triggers.
///
/// Candidates are skipped when they are not gift-product discounts, are not
/// live, do not list the code or are the primary discount itself.
#[must_use]
pub fn triggered_gift_coupons(
    primary: &Discount,
    matched_code: &DiscountCode,
    candidates: impl IntoIterator<Item = Discount>,
    policy: &ChainPolicy,
) -> Vec<ChainedDiscount> {
    assemble(primary, matched_code, candidates, policy, |candidate| {
        matches!(candidate.kind, DiscountKind::GiftProduct { .. })
            && candidate.is_triggered_by(matched_code)
    })
}

/// Discounts whose code appears in the primary discount's activation list.
#[must_use]
pub fn activated_discounts(
    primary: &Discount,
    matched_code: &DiscountCode,
    candidates: impl IntoIterator<Item = Discount>,
    policy: &ChainPolicy,
) -> Vec<ChainedDiscount> {
    if primary.activates_codes.is_empty() {
        return Vec::new();
    }

    assemble(primary, matched_code, candidates, policy, |candidate| {
        candidate
            .code
            .as_ref()
            .is_some_and(|code| primary.activates_codes.contains(code))
    })
}

fn assemble(
    primary: &Discount,
    matched_code: &DiscountCode,
    candidates: impl IntoIterator<Item = Discount>,
    policy: &ChainPolicy,
    linked: impl Fn(&Discount) -> bool,
) -> Vec<ChainedDiscount> {
    let mut seen: FxHashSet<DiscountUuid> = FxHashSet::default();
    seen.insert(primary.uuid);

    candidates
        .into_iter()
        .filter(|candidate| linked(candidate) && policy.admits(candidate))
        .filter(|candidate| seen.insert(candidate.uuid))
        .map(|discount| ChainedDiscount {
            discount,
            triggered_by_code: matched_code.clone(),
        })
        .collect()
}
