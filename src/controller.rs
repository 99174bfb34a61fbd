//! Glue between the windows and the warehouse: one view per category tab,
//! form submission, and the edit/delete selection rules.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    category::Category,
    form::{FormError, ProductForm, ProductRow},
    registry::{MergeOutcome, Summary, Warehouse},
};

/// What a submitted form does to the warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { original: String },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Please select a product first")]
    NoSelection,
}

/// Display state of one category tab.
#[derive(Debug, Default)]
pub struct CategoryView {
    rows: Vec<ProductRow>,
    selected: Option<usize>,
    filter: String,
}

impl CategoryView {
    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&ProductRow> {
        self.rows.get(self.selected?)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    fn refresh(&mut self, warehouse: &Warehouse, category: Category) {
        let needle = self.filter.trim().to_lowercase();
        let previous = self.selected_row().map(|row| row.name.clone());
        self.rows = warehouse
            .list(category.key())
            .into_iter()
            .filter(|product| needle.is_empty() || product.name.to_lowercase().contains(&needle))
            .map(ProductRow::from)
            .collect();
        self.selected = previous.and_then(|name| self.rows.iter().position(|row| row.name == name));
    }
}

/// Warehouse plus the per-category views rendered by the UI.
#[derive(Debug)]
pub struct Inventory {
    warehouse: Warehouse,
    views: HashMap<Category, CategoryView>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            warehouse: Warehouse::new(),
            views: Category::all()
                .map(|category| (category, CategoryView::default()))
                .collect(),
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn view(&self, category: Category) -> &CategoryView {
        &self.views[&category]
    }

    fn view_mut(&mut self, category: Category) -> &mut CategoryView {
        self.views.entry(category).or_default()
    }

    pub fn summary(&self, category: Category) -> Summary {
        self.warehouse.summary(category.key())
    }

    /// Selects a row of the displayed (filtered) table. Out-of-range indices
    /// clear the selection.
    pub fn select(&mut self, category: Category, index: Option<usize>) {
        let view = self.view_mut(category);
        view.selected = index.filter(|i| *i < view.rows.len());
    }

    pub fn set_filter(&mut self, category: Category, filter: &str) {
        self.view_mut(category).filter = filter.to_string();
        self.refresh(category);
    }

    /// Validates `form` and commits it. Nothing changes when validation fails.
    ///
    /// `Ok(None)` means an edit whose original product is no longer stored;
    /// the warehouse is left as it was.
    pub fn submit(
        &mut self,
        category: Category,
        mode: &FormMode,
        form: &ProductForm,
    ) -> Result<Option<MergeOutcome>, FormError> {
        let product = form.validate().inspect_err(|e| {
            warn!(category = category.key(), error = %e, "rejected product form");
        })?;
        let name = product.name.clone();
        let outcome = match mode {
            FormMode::Add => Some(self.warehouse.add_or_merge(category.key(), product)),
            FormMode::Edit { original } => {
                self.warehouse.update(category.key(), original, product)
            }
        };
        match outcome {
            Some(outcome) => {
                info!(category = category.key(), name = %name, ?mode, ?outcome, "saved product");
            }
            None => warn!(category = category.key(), ?mode, "edited product no longer exists"),
        }
        self.refresh(category);
        Ok(outcome)
    }

    /// Form pre-filled from the selected row.
    pub fn begin_edit(
        &self,
        category: Category,
    ) -> Result<(FormMode, ProductForm), ControllerError> {
        let row = self
            .view(category)
            .selected_row()
            .ok_or(ControllerError::NoSelection)?;
        Ok((
            FormMode::Edit {
                original: row.name.clone(),
            },
            ProductForm::from_row(row),
        ))
    }

    /// Name of the selected product, to be confirmed before deletion.
    pub fn request_delete(&self, category: Category) -> Result<String, ControllerError> {
        self.view(category)
            .selected_row()
            .map(|row| row.name.clone())
            .ok_or(ControllerError::NoSelection)
    }

    pub fn confirm_delete(&mut self, category: Category, name: &str) -> bool {
        let removed = self.warehouse.remove(category.key(), name);
        if removed {
            info!(category = category.key(), name, "deleted product");
        }
        self.refresh(category);
        removed
    }

    fn refresh(&mut self, category: Category) {
        let view = self.views.entry(category).or_default();
        view.refresh(&self.warehouse, category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::product::Unit;

    fn form(name: &str, quantity: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            brand: "Green Valley".to_string(),
            quantity: quantity.to_string(),
            price: "1.2".to_string(),
            weight: "500".to_string(),
            unit: Unit::Gram,
            expires_from: "01-03-2024".to_string(),
            expires_to: "20-03-2024".to_string(),
        }
    }

    fn row_names(inventory: &Inventory, category: Category) -> Vec<&str> {
        inventory
            .view(category)
            .rows()
            .iter()
            .map(|row| row.name.as_str())
            .collect()
    }

    #[test]
    fn test_views_exist_for_every_category() {
        let inventory = Inventory::new();
        for category in Category::all() {
            assert!(inventory.view(category).rows().is_empty());
        }
    }

    #[test]
    fn test_submit_add_refreshes_view() {
        let mut inventory = Inventory::new();

        let outcome = inventory.submit(Category::Vegetables, &FormMode::Add, &form("Carrot", "7"));

        assert_eq!(outcome, Ok(Some(MergeOutcome::Inserted)));
        assert_eq!(row_names(&inventory, Category::Vegetables), vec!["Carrot"]);
        assert!(inventory.view(Category::Fruits).rows().is_empty());
    }

    #[test]
    fn test_submit_invalid_range_does_not_mutate() {
        let mut inventory = Inventory::new();
        let mut bad = form("Carrot", "7");
        bad.expires_to = "01-03-2024".to_string();

        let outcome = inventory.submit(Category::Vegetables, &FormMode::Add, &bad);

        assert!(matches!(outcome, Err(FormError::DateRange(_))));
        assert!(inventory.warehouse().list("vegetables").is_empty());
        assert!(inventory.view(Category::Vegetables).rows().is_empty());
    }

    #[test]
    fn test_submit_invalid_edit_keeps_original() {
        let mut inventory = Inventory::new();
        inventory
            .submit(Category::Fruits, &FormMode::Add, &form("Apple", "3"))
            .unwrap();
        let mode = FormMode::Edit {
            original: "Apple".to_string(),
        };

        let outcome = inventory.submit(Category::Fruits, &mode, &form("Pear", "many"));

        assert_eq!(outcome, Err(FormError::InvalidQuantity));
        assert_eq!(row_names(&inventory, Category::Fruits), vec!["Apple"]);
    }

    #[test]
    fn test_edit_selected_row_renames() {
        let mut inventory = Inventory::new();
        inventory
            .submit(Category::Fruits, &FormMode::Add, &form("Apple", "3"))
            .unwrap();
        inventory.select(Category::Fruits, Some(0));

        let (mode, mut edit) = inventory.begin_edit(Category::Fruits).unwrap();
        assert_eq!(edit, form("Apple", "3"));
        edit.name = "Green Apple".to_string();
        inventory.submit(Category::Fruits, &mode, &edit).unwrap();

        assert_eq!(row_names(&inventory, Category::Fruits), vec!["Green Apple"]);
        assert_eq!(inventory.warehouse().get("fruits", "Apple"), None);
    }

    #[rstest]
    #[case::nothing_selected(None)]
    #[case::out_of_range(Some(5))]
    fn test_edit_and_delete_require_selection(#[case] index: Option<usize>) {
        let mut inventory = Inventory::new();
        inventory
            .submit(Category::Drinks, &FormMode::Add, &form("Cola", "24"))
            .unwrap();
        inventory.select(Category::Drinks, index);

        assert_eq!(
            inventory.begin_edit(Category::Drinks).unwrap_err(),
            ControllerError::NoSelection
        );
        assert_eq!(
            inventory.request_delete(Category::Drinks),
            Err(ControllerError::NoSelection)
        );
    }

    #[test]
    fn test_delete_selected() {
        let mut inventory = Inventory::new();
        inventory
            .submit(Category::Drinks, &FormMode::Add, &form("Cola", "24"))
            .unwrap();
        inventory
            .submit(Category::Drinks, &FormMode::Add, &form("Water", "6"))
            .unwrap();
        inventory.select(Category::Drinks, Some(1));

        let name = inventory.request_delete(Category::Drinks).unwrap();
        assert_eq!(name, "Water");
        assert!(inventory.confirm_delete(Category::Drinks, &name));
        assert!(!inventory.confirm_delete(Category::Drinks, &name));

        assert_eq!(row_names(&inventory, Category::Drinks), vec!["Cola"]);
        assert_eq!(inventory.view(Category::Drinks).selected(), None);
    }

    #[test]
    fn test_filter_hides_rows_only() {
        let mut inventory = Inventory::new();
        for name in ["Apple", "Pineapple", "Banana"] {
            inventory
                .submit(Category::Fruits, &FormMode::Add, &form(name, "1"))
                .unwrap();
        }
        inventory.select(Category::Fruits, Some(1));

        inventory.set_filter(Category::Fruits, "APPLE");

        assert_eq!(row_names(&inventory, Category::Fruits), vec!["Apple", "Pineapple"]);
        assert_eq!(inventory.view(Category::Fruits).selected(), Some(1));
        assert_eq!(inventory.warehouse().list("fruits").len(), 3);

        inventory.set_filter(Category::Fruits, "");
        assert_eq!(row_names(&inventory, Category::Fruits).len(), 3);
    }

    #[test]
    fn test_duplicate_add_merges_quantity() {
        let mut inventory = Inventory::new();
        inventory
            .submit(Category::Vegetables, &FormMode::Add, &form("Leek", "2"))
            .unwrap();

        let mut again = form("Leek", "5");
        again.brand = "Other".to_string();
        let outcome = inventory.submit(Category::Vegetables, &FormMode::Add, &again);

        assert_eq!(outcome, Ok(Some(MergeOutcome::Merged { quantity: 7 })));
        let row = &inventory.view(Category::Vegetables).rows()[0];
        assert_eq!(row.quantity, "7");
        assert_eq!(row.brand, "Green Valley");
    }

    #[test]
    fn test_unchanged_edit_keeps_precise_price() {
        let mut inventory = Inventory::new();
        let mut apple = form("Apple", "3");
        apple.price = "2.499".to_string();
        inventory.submit(Category::Fruits, &FormMode::Add, &apple).unwrap();
        inventory.select(Category::Fruits, Some(0));

        let (mode, edit) = inventory.begin_edit(Category::Fruits).unwrap();
        inventory.submit(Category::Fruits, &mode, &edit).unwrap();

        let stored = inventory.warehouse().get("fruits", "Apple").unwrap();
        assert_eq!(stored.price, 2.499);
        assert_eq!(inventory.view(Category::Fruits).rows()[0].price, "2.499");
    }

    #[test]
    fn test_merge_of_huge_quantity_does_not_overflow() {
        let mut inventory = Inventory::new();
        let max = i64::MAX.to_string();
        inventory
            .submit(Category::Fruits, &FormMode::Add, &form("Apple", &max))
            .unwrap();

        let outcome = inventory.submit(Category::Fruits, &FormMode::Add, &form("Apple", "1"));

        assert_eq!(outcome, Ok(Some(MergeOutcome::Merged { quantity: i64::MAX })));
        assert_eq!(inventory.summary(Category::Fruits).units, i64::MAX);
    }

    #[test]
    fn test_edit_of_deleted_product_changes_nothing() {
        let mut inventory = Inventory::new();
        inventory
            .submit(Category::Fruits, &FormMode::Add, &form("Apple", "3"))
            .unwrap();
        inventory.select(Category::Fruits, Some(0));
        let (mode, mut edit) = inventory.begin_edit(Category::Fruits).unwrap();
        assert!(inventory.confirm_delete(Category::Fruits, "Apple"));

        edit.name = "Pear".to_string();
        let outcome = inventory.submit(Category::Fruits, &mode, &edit);

        assert_eq!(outcome, Ok(None));
        assert!(inventory.warehouse().list("fruits").is_empty());
        assert!(inventory.view(Category::Fruits).rows().is_empty());
    }
}
