mod ingredient;
mod meal;

pub use ingredient::{parse_price, Ingredient};
pub use meal::Meal;
