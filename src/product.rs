//! Product records and the value types they are built from.

use chrono::NaiveDate;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// Day-month-year format used for every date shown to or typed by the user.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Measurement unit attached to a product's weight.
#[derive(Debug, Default, Display, EnumIter, EnumString, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    #[default]
    #[strum(serialize = "kg")]
    Kilogram,
    #[strum(serialize = "g")]
    Gram,
    #[strum(serialize = "mg")]
    Milligram,
    #[strum(serialize = "l")]
    Litre,
    #[strum(serialize = "ml")]
    Millilitre,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Milligram => "mg",
            Unit::Litre => "l",
            Unit::Millilitre => "ml",
        }
    }

    pub fn all() -> impl Iterator<Item = Unit> {
        Unit::iter()
    }

    /// Parses a unit symbol, ignoring surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, UnitError> {
        let symbol = value.trim();
        symbol
            .parse::<Unit>()
            .map_err(|_| UnitError::Unknown(symbol.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("unknown unit \"{0}\"")]
    Unknown(String),
}

/// Shelf-life window of a product. `from` is always strictly before `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl ExpirationWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ExpirationError> {
        if from >= to {
            return Err(ExpirationError::NotBefore { from, to });
        }

        Ok(Self { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Renders the window the way the tables show it, e.g.
    /// `from 01-06-2024 to 15-06-2024`.
    pub fn display(&self) -> String {
        format!(
            "from {} to {}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpirationError {
    #[error(
        "start date {} must be before end date {}",
        .from.format(DATE_FORMAT),
        .to.format(DATE_FORMAT)
    )]
    NotBefore { from: NaiveDate, to: NaiveDate },
}

/// Parses a date typed in [`DATE_FORMAT`].
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub quantity: i64,
    pub price: f64,
    pub weight: f64,
    pub unit: Unit,
    pub expiration: ExpirationWindow,
}

impl Product {
    /// Stock value of this record.
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
