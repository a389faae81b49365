use std::fmt;

use serde::Serialize;

use crate::error::{MealError, Result};

/// A named component of a meal with a non-negative price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    name: String,
    price: f64,
}

impl Ingredient {
    /// Create an ingredient, rejecting empty names and negative or non-finite prices.
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(MealError::MalformedIngredient(format!("({})", price)));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(MealError::InvalidPrice(price.to_string()));
        }
        Ok(Self { name, price })
    }

    /// Create an ingredient from a textual price such as `"1.20"`.
    pub fn parse(name: impl Into<String>, price: &str) -> Result<Self> {
        Self::new(name, parse_price(price)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${:.2})", self.name, self.price)
    }
}

/// Parse a user- or file-supplied price.
///
/// Accepts any finite, non-negative decimal. `inf`, `NaN` and negative values
/// are rejected even though `f64::from_str` accepts them.
pub fn parse_price(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(MealError::InvalidPrice(trimmed.to_string())),
    }
}
