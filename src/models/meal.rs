use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{MealError, Result};
use crate::models::Ingredient;

/// A named dish made of priced ingredients.
///
/// Two meals are equal when their names match exactly; ingredients are not
/// compared. Ordering is alphabetical ignoring case, with the exact name as
/// the tie-break so that the order stays total.
#[derive(Debug, Clone, Serialize)]
pub struct Meal {
    name: String,
    ingredients: Vec<Ingredient>,
}

impl Meal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            ingredients: Vec::new(),
        }
    }

    /// Build a meal from a list of ingredients, failing on the first duplicate.
    pub fn with_ingredients(
        name: impl Into<String>,
        ingredients: impl IntoIterator<Item = Ingredient>,
    ) -> Result<Self> {
        let mut meal = Self::new(name);
        for ingredient in ingredients {
            meal.add_ingredient(ingredient)?;
        }
        Ok(meal)
    }

    /// Append an ingredient, keeping insertion order.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Result<()> {
        if self.has_ingredient(ingredient.name()) {
            return Err(MealError::DuplicateIngredient(ingredient.name().to_string()));
        }
        self.ingredients.push(ingredient);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients.iter().any(|i| i.name() == name)
    }

    /// Sum of all ingredient prices, always derived from the current ingredients.
    pub fn total_price(&self) -> f64 {
        self.ingredients.iter().map(Ingredient::price).sum()
    }

    /// Case-insensitive substring match on the meal name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Case-insensitive substring match on any ingredient name.
    pub fn any_ingredient_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.ingredients
            .iter()
            .any(|i| i.name().to_lowercase().contains(&needle))
    }

    /// Key used to keep meal lists sorted.
    pub fn sort_key(&self) -> (String, &str) {
        (self.name.to_lowercase(), self.name.as_str())
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${:.2})", self.name, self.total_price())
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Meal {}

impl PartialOrd for Meal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl std::hash::Hash for Meal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
