//! Product form: the text the user types, the text the tables display, and
//! the conversion between those and [`Product`].

use thiserror::Error;

use crate::product::{parse_date, ExpirationError, ExpirationWindow, Product, Unit};

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub name: String,
    pub brand: String,
    pub quantity: String,
    pub price: String,
    pub weight: String,
    pub expiration: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            quantity: product.quantity.to_string(),
            price: product.price.to_string(),
            weight: format!("{} {}", product.weight, product.unit),
            expiration: product.expiration.display(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Quantity must be a whole number")]
    InvalidQuantity,
    #[error("Price must be a number")]
    InvalidPrice,
    #[error("Weight must be a number")]
    InvalidWeight,
    #[error("{field} date \"{value}\" is not in DD-MM-YYYY format")]
    InvalidDate { field: DateField, value: String },
    #[error(transparent)]
    DateRange(#[from] ExpirationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DateField {
    Start,
    End,
}

/// Editable state of the add/edit window.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub quantity: String,
    pub price: String,
    pub weight: String,
    pub unit: Unit,
    pub expires_from: String,
    pub expires_to: String,
}

impl ProductForm {
    /// Fills the form from a displayed row, splitting `"<weight> <unit>"` and
    /// `"from <date> to <date>"` back into their parts. Parts that cannot be
    /// split are left in the first field so the user can fix them.
    pub fn from_row(row: &ProductRow) -> Self {
        let (weight, unit) = split_weight(&row.weight);
        let (expires_from, expires_to) = split_expiration(&row.expiration);
        Self {
            name: row.name.clone(),
            brand: row.brand.clone(),
            quantity: row.quantity.clone(),
            price: row.price.clone(),
            weight,
            unit,
            expires_from,
            expires_to,
        }
    }

    pub fn validate(&self) -> Result<Product, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::InvalidQuantity)?;
        let price = parse_decimal(&self.price).ok_or(FormError::InvalidPrice)?;
        let weight = parse_decimal(&self.weight).ok_or(FormError::InvalidWeight)?;
        let from = parse_date(&self.expires_from).ok_or_else(|| FormError::InvalidDate {
            field: DateField::Start,
            value: self.expires_from.trim().to_string(),
        })?;
        let to = parse_date(&self.expires_to).ok_or_else(|| FormError::InvalidDate {
            field: DateField::End,
            value: self.expires_to.trim().to_string(),
        })?;

        Ok(Product {
            name: name.to_string(),
            brand: self.brand.trim().to_string(),
            quantity,
            price,
            weight,
            unit: self.unit,
            expiration: ExpirationWindow::new(from, to)?,
        })
    }
}

fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

fn split_weight(value: &str) -> (String, Unit) {
    match value.trim().rsplit_once(' ') {
        Some((amount, symbol)) => match Unit::parse(symbol) {
            Ok(unit) => (amount.trim().to_string(), unit),
            Err(_) => (value.trim().to_string(), Unit::default()),
        },
        None => (value.trim().to_string(), Unit::default()),
    }
}

fn split_expiration(value: &str) -> (String, String) {
    let value = value.trim();
    let range = value.strip_prefix("from ").unwrap_or(value);
    match range.split_once(" to ") {
        Some((from, to)) => (from.trim().to_string(), to.trim().to_string()),
        None => (range.to_string(), String::new()),
    }
}
