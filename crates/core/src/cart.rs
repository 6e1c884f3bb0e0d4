//! Cart Input

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::ids::{CategoryUuid, ProductUuid};

/// A single cart line as submitted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// Product in the line.
    pub product: ProductUuid,

    /// Units of the product.
    pub quantity: u32,
}

impl CartLine {
    /// Create a cart line.
    #[must_use]
    pub const fn new(product: ProductUuid, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

/// Distinct products in a cart, in first-seen order.
#[must_use]
pub fn distinct_products(lines: &[CartLine]) -> Vec<ProductUuid> {
    let mut seen = FxHashSet::default();

    lines
        .iter()
        .map(|line| line.product)
        .filter(|product| seen.insert(*product))
        .collect()
}

/// Product to category lookup built once per resolution from the cart's products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCategoryIndex {
    categories: FxHashMap<ProductUuid, SmallVec<[CategoryUuid; 4]>>,
}

impl ProductCategoryIndex {
    /// Empty index; every product has no categories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `product` belongs to `category`.
    pub fn insert(&mut self, product: ProductUuid, category: CategoryUuid) {
        let categories = self.categories.entry(product).or_default();

        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    /// Categories of `product`; empty when the product is unknown.
    #[must_use]
    pub fn categories_of(&self, product: ProductUuid) -> &[CategoryUuid] {
        self.categories
            .get(&product)
            .map(SmallVec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of products with at least one category.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether no product has a category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every `(product, category)` pair, in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (ProductUuid, CategoryUuid)> + '_ {
        self.categories.iter().flat_map(|(product, categories)| {
            categories.iter().map(move |category| (*product, *category))
        })
    }
}

impl FromIterator<(ProductUuid, CategoryUuid)> for ProductCategoryIndex {
    fn from_iter<I: IntoIterator<Item = (ProductUuid, CategoryUuid)>>(iter: I) -> Self {
        let mut index = Self::new();

        for (product, category) in iter {
            index.insert(product, category);
        }

        index
    }
}
