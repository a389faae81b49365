use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{MealError, Result};
use crate::models::Meal;

/// Which of the two lists a [`MealList`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Master catalogue, the source for filter and select.
    Recipes,
    /// Meals the user picked or created.
    Wish,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Recipes => write!(f, "recipes list"),
            ListKind::Wish => write!(f, "wish list"),
        }
    }
}

/// Alphabetically ordered, duplicate-free list of meals.
///
/// Meals are held behind `Rc` so that a recipe selected into the wish list is
/// the same meal in both lists.
#[derive(Debug, Clone)]
pub struct MealList {
    kind: ListKind,
    meals: Vec<Rc<Meal>>,
}

impl MealList {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            meals: Vec::new(),
        }
    }

    pub fn recipes() -> Self {
        Self::new(ListKind::Recipes)
    }

    pub fn wish() -> Self {
        Self::new(ListKind::Wish)
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Insert a meal at its sorted position and return that position.
    ///
    /// Fails with `DuplicateMeal` when a meal of the same name is present;
    /// the list is not modified in that case.
    pub fn add(&mut self, meal: impl Into<Rc<Meal>>) -> Result<usize> {
        let meal = meal.into();
        // The sort key only compares equal for identical names.
        match self.meals.binary_search_by(|m| m.as_ref().cmp(meal.as_ref())) {
            Ok(_) => Err(MealError::DuplicateMeal(meal.name().to_string())),
            Err(pos) => {
                debug!(meal = meal.name(), list = %self.kind, pos, "adding meal");
                self.meals.insert(pos, meal);
                Ok(pos)
            }
        }
    }

    /// Remove and return the meal at a 0-based position.
    pub fn remove(&mut self, index: usize) -> Result<Rc<Meal>> {
        if index >= self.meals.len() {
            return Err(MealError::RemoveIndexOutOfRange {
                index: index as i64,
                len: self.meals.len(),
            });
        }
        let removed = self.meals.remove(index);
        debug!(meal = removed.name(), list = %self.kind, index, "removed meal");
        Ok(removed)
    }

    /// 0-based position of the meal with the same name.
    pub fn index_of(&self, meal: &Meal) -> Result<usize> {
        self.meals
            .binary_search_by(|m| m.as_ref().cmp(meal))
            .map_err(|_| MealError::MealNotFound(meal.name().to_string()))
    }

    pub fn contains(&self, meal: &Meal) -> bool {
        self.index_of(meal).is_ok()
    }

    /// The meals in their current sorted order.
    pub fn meals(&self) -> &[Rc<Meal>] {
        &self.meals
    }

    pub fn get(&self, index: usize) -> Option<&Rc<Meal>> {
        self.meals.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Meal>> {
        self.meals.iter()
    }

    pub fn clear(&mut self) {
        self.meals.clear();
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

/// Convert a 1-based user-facing index into a 0-based list position.
///
/// The text must be an integer in `1..=len`; anything else, including zero
/// and negative numbers, is reported as `RemoveIndexOutOfRange` or
/// `InvalidCommand` for non-numeric input.
pub fn parse_user_index(text: &str, len: usize) -> Result<usize> {
    let trimmed = text.trim();
    let index: i64 = trimmed
        .parse()
        .map_err(|_| MealError::InvalidCommand(format!("'{}' is not a list index", trimmed)))?;
    if index < 1 || index as u64 > len as u64 {
        return Err(MealError::RemoveIndexOutOfRange { index, len });
    }
    Ok((index - 1) as usize)
}
