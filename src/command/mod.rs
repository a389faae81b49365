pub mod args;
pub mod filter;
pub mod session;

pub use args::{
    parse_create_args, parse_filter_args, parse_select_args, CreateArgs, FilterArgs, FilterParam,
    Keyword, SelectArgs,
};
pub use filter::{
    build_filters, filter_meals, pick_meal, resolve_index, select_meal, MealFilter, Selection,
};
pub use session::{command_verb, Flow, Session, VERBS};
