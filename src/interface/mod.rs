pub mod prompts;
pub mod render;

pub use prompts::{prompt_command, prompt_yes_no, suggest_verb};
pub use render::{display_meal_list, ConsoleReporter, Reporter};
