use strum::{EnumIter, IntoEnumIterator};

/// The product groups the application shows as tabs.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Fruits,
    Vegetables,
    Drinks,
}

impl Category {
    /// Key under which the category's products are stored in the warehouse.
    pub fn key(self) -> &'static str {
        match self {
            Category::Fruits => "fruits",
            Category::Vegetables => "vegetables",
            Category::Drinks => "drinks",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Drinks => "Drinks",
        }
    }

    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }
}
