use std::rc::Rc;

use tracing::debug;

use crate::command::args::{FilterParam, Keyword, SelectArgs};
use crate::error::{MealError, Result};
use crate::models::{parse_price, Meal};
use crate::state::MealList;

/// Tolerance when comparing a meal total against an `mcost/` bound.
const PRICE_EPSILON: f64 = 1e-9;

/// A typed filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum MealFilter {
    /// Case-insensitive substring of the meal name.
    Name(String),
    /// Total price at most this value.
    MaxCost(f64),
    /// Case-insensitive substring of any ingredient name.
    Ingredient(String),
}

impl MealFilter {
    /// Convert a raw `keyword/value` pair, validating `mcost/` as a price.
    pub fn from_param(param: &FilterParam) -> Result<Self> {
        Ok(match param.keyword {
            Keyword::Name => MealFilter::Name(param.value.clone()),
            Keyword::MaxCost => MealFilter::MaxCost(parse_price(&param.value)?),
            Keyword::Ingredient => MealFilter::Ingredient(param.value.clone()),
        })
    }

    pub fn matches(&self, meal: &Meal) -> bool {
        match self {
            MealFilter::Name(needle) => meal.name_contains(needle),
            MealFilter::MaxCost(max) => meal.total_price() <= max + PRICE_EPSILON,
            MealFilter::Ingredient(needle) => meal.any_ingredient_contains(needle),
        }
    }
}

/// Convert every raw parameter, failing on the first invalid one.
pub fn build_filters(params: &[FilterParam]) -> Result<Vec<MealFilter>> {
    params.iter().map(MealFilter::from_param).collect()
}

/// Meals matching every filter, in the list's order.
///
/// With no filters the whole list is returned.
pub fn filter_meals(list: &MealList, filters: &[MealFilter]) -> Vec<Rc<Meal>> {
    let matched: Vec<Rc<Meal>> = list
        .iter()
        .filter(|meal| filters.iter().all(|f| f.matches(meal)))
        .cloned()
        .collect();
    debug!(
        list = %list.kind(),
        filters = filters.len(),
        matched = matched.len(),
        "filtered meals"
    );
    matched
}

/// Resolve a 1-based user index into a filtered candidate list.
pub fn resolve_index(candidates: &[Rc<Meal>], index: i64) -> Result<Rc<Meal>> {
    usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| candidates.get(i))
        .cloned()
        .ok_or_else(|| MealError::InvalidSelectIndex(index.to_string()))
}

/// Outcome of a successful `select`.
#[derive(Debug)]
pub enum Selection {
    /// The filtered candidate list was empty; nothing was added.
    NoMatches,
    /// The meal now shared between the source list and the wish list.
    Added(Rc<Meal>),
}

/// Filter `source` and pick the meal at the 1-based index, without adding it
/// anywhere. `Ok(None)` means the filtered list was empty.
pub fn pick_meal(source: &MealList, args: &SelectArgs) -> Result<Option<Rc<Meal>>> {
    let filters = build_filters(&args.params)?;
    let candidates = filter_meals(source, &filters);
    if candidates.is_empty() {
        return Ok(None);
    }
    resolve_index(&candidates, args.index).map(Some)
}

/// Filter `source`, pick the meal at the 1-based index and add it to `wish`.
///
/// On any error neither list is modified.
pub fn select_meal(source: &MealList, wish: &mut MealList, args: &SelectArgs) -> Result<Selection> {
    match pick_meal(source, args)? {
        None => Ok(Selection::NoMatches),
        Some(meal) => {
            wish.add(Rc::clone(&meal))?;
            Ok(Selection::Added(meal))
        }
    }
}
