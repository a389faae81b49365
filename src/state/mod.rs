pub mod codec;
mod meal_list;
mod storage;

pub use meal_list::{parse_user_index, ListKind, MealList};
pub use storage::{
    LineFailure, LoadReport, Storage, StorageConfig, DEFAULT_RECIPES_PATH, DEFAULT_WISH_PATH,
};
