//! In-memory warehouse: category name -> product name -> product.
//!
//! The warehouse stores whatever it is given. Input checking happens in
//! [`crate::form`] before anything reaches it.

use indexmap::IndexMap;
use tracing::debug;

use crate::product::Product;

/// Result of [`Warehouse::add_or_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    /// An entry with that name already existed; only its quantity changed.
    Merged { quantity: i64 },
}

/// Aggregates shown below a category table.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub products: usize,
    pub units: i64,
    pub value: f64,
}

#[derive(Debug, Default)]
pub struct Warehouse {
    categories: IndexMap<String, IndexMap<String, Product>>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `product`, or adds its quantity to an existing product of the
    /// same name. On merge every other field of the stored product is kept.
    /// Quantities saturate at the `i64` bounds.
    pub fn add_or_merge(&mut self, category: &str, product: Product) -> MergeOutcome {
        let products = self.categories.entry(category.to_string()).or_default();
        match products.get_mut(&product.name) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(product.quantity);
                debug!(
                    category,
                    name = %existing.name,
                    added = product.quantity,
                    quantity = existing.quantity,
                    "merged product quantity"
                );
                MergeOutcome::Merged {
                    quantity: existing.quantity,
                }
            }
            None => {
                debug!(category, name = %product.name, "inserted product");
                products.insert(product.name.clone(), product);
                MergeOutcome::Inserted
            }
        }
    }

    /// Removes `old_name` and adds `product` under its own name. A collision
    /// with another product merges quantities like [`Self::add_or_merge`].
    ///
    /// Returns `None` without touching the warehouse when `old_name` is not
    /// stored in `category`.
    pub fn update(
        &mut self,
        category: &str,
        old_name: &str,
        product: Product,
    ) -> Option<MergeOutcome> {
        if !self.remove(category, old_name) {
            debug!(category, old_name, "update of unknown product ignored");
            return None;
        }
        debug!(category, old_name, new_name = %product.name, "replacing product");
        Some(self.add_or_merge(category, product))
    }

    /// Returns whether a product was removed.
    pub fn remove(&mut self, category: &str, name: &str) -> bool {
        let removed = self
            .categories
            .get_mut(category)
            .and_then(|products| products.shift_remove(name))
            .is_some();
        if removed {
            debug!(category, name, "removed product");
        }
        removed
    }

    pub fn get(&self, category: &str, name: &str) -> Option<&Product> {
        self.categories.get(category)?.get(name)
    }

    /// Products of `category` in insertion order. Unknown categories are empty.
    pub fn list(&self, category: &str) -> Vec<&Product> {
        self.categories
            .get(category)
            .map(|products| products.values().collect())
            .unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn summary(&self, category: &str) -> Summary {
        self.list(category)
            .into_iter()
            .fold(Summary::default(), |summary, product| Summary {
                products: summary.products + 1,
                units: summary.units.saturating_add(product.quantity),
                value: summary.value + product.value(),
            })
    }
}
