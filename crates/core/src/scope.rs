//! Scope Matching
//!
//! Decides which cart lines a discount can apply to. Exclusions are checked
//! first and always win; inclusion then depends on [`AppliesTo`].

use rustc_hash::FxHashSet;

use crate::{
    cart::{CartLine, ProductCategoryIndex},
    ids::{CategoryUuid, ProductUuid},
};

/// Which lines a discount targets before exclusions are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppliesTo {
    /// Every line.
    #[default]
    All,

    /// Lines whose product has a category in [`Scope::category_ids`].
    Category,

    /// Lines whose product is in [`Scope::product_ids`].
    Product,

    /// Member-only discounts. Membership is decided outside the matcher, so
    /// every non-excluded line matches.
    Member,
}

impl AppliesTo {
    /// Stable snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category => "category",
            Self::Product => "product",
            Self::Member => "member",
        }
    }

    /// Parse a stored name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "category" => Some(Self::Category),
            "product" => Some(Self::Product),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

/// Inclusion and exclusion rules of a discount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    /// Inclusion mode.
    pub applies_to: AppliesTo,

    /// Included products when `applies_to` is [`AppliesTo::Product`].
    pub product_ids: FxHashSet<ProductUuid>,

    /// Included categories when `applies_to` is [`AppliesTo::Category`].
    pub category_ids: FxHashSet<CategoryUuid>,

    /// Products never matched.
    pub exclude_product_ids: FxHashSet<ProductUuid>,

    /// Categories whose products are never matched.
    pub exclude_category_ids: FxHashSet<CategoryUuid>,
}

impl Scope {
    /// Scope matching every line.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Scope limited to the given products.
    #[must_use]
    pub fn products(products: impl IntoIterator<Item = ProductUuid>) -> Self {
        Self {
            applies_to: AppliesTo::Product,
            product_ids: products.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Scope limited to the given categories.
    #[must_use]
    pub fn categories(categories: impl IntoIterator<Item = CategoryUuid>) -> Self {
        Self {
            applies_to: AppliesTo::Category,
            category_ids: categories.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether matching depends on product categories. When it does not, the
    /// category lookup can be skipped.
    #[must_use]
    pub fn needs_categories(&self) -> bool {
        self.applies_to == AppliesTo::Category || !self.exclude_category_ids.is_empty()
    }

    /// Whether `line` falls inside this scope.
    #[must_use]
    pub fn matches(&self, line: &CartLine, index: &ProductCategoryIndex) -> bool {
        let categories = index.categories_of(line.product);

        if self.exclude_product_ids.contains(&line.product)
            || categories
                .iter()
                .any(|category| self.exclude_category_ids.contains(category))
        {
            return false;
        }

        match self.applies_to {
            AppliesTo::All | AppliesTo::Member => true,
            AppliesTo::Product => self.product_ids.contains(&line.product),
            AppliesTo::Category => categories
                .iter()
                .any(|category| self.category_ids.contains(category)),
        }
    }

    /// Lines of `cart` inside this scope, with their summed quantity.
    #[must_use]
    pub fn match_lines<'c>(
        &self,
        cart: &'c [CartLine],
        index: &ProductCategoryIndex,
    ) -> MatchedLines<'c> {
        let lines: Vec<&CartLine> = cart
            .iter()
            .filter(|line| self.matches(line, index))
            .collect();

        let total_quantity = lines
            .iter()
            .fold(0_u32, |total, line| total.saturating_add(line.quantity));

        MatchedLines {
            lines,
            total_quantity,
        }
    }
}

/// Cart lines matched by a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedLines<'c> {
    /// Matching lines in cart order.
    pub lines: Vec<&'c CartLine>,

    /// Sum of the matching lines' quantities.
    pub total_quantity: u32,
}
