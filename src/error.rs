use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("Invalid price: '{0}' (prices must be non-negative numbers)")]
    InvalidPrice(String),

    #[error("Invalid select index: '{0}'")]
    InvalidSelectIndex(String),

    #[error("A meal named '{0}' already exists in the list")]
    DuplicateMeal(String),

    #[error("Ingredient '{0}' already exists in this meal")]
    DuplicateIngredient(String),

    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Index {index} is out of range for a list of {len} meals")]
    RemoveIndexOutOfRange { index: i64, len: usize },

    #[error("Malformed ingredient: '{0}' (expected Name(price))")]
    MalformedIngredient(String),

    #[error("Missing meal name in '{0}'")]
    MissingMealName(String),

    #[error("Line is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Meal '{0}' has no ingredients")]
    EmptyMeal(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, MealError>;
