//! Desktop stock keeping for fruits, vegetables and drinks.
//!
//! [`registry::Warehouse`] holds the products in memory, [`form`] turns user
//! input into products, [`controller::Inventory`] ties both to the category
//! views and [`app::InventoryApp`] renders everything with egui.

pub mod app;
pub mod category;
pub mod config;
pub mod controller;
pub mod form;
pub mod logging;
pub mod product;
pub mod registry;

pub use category::Category;
pub use controller::{ControllerError, FormMode, Inventory};
pub use form::{FormError, ProductForm, ProductRow};
pub use product::{ExpirationWindow, Product, Unit};
pub use registry::{MergeOutcome, Warehouse};
