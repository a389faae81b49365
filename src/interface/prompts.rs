use dialoguer::{Confirm, Input};
use strsim::jaro_winkler;

use crate::error::Result;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Read one command line from the user.
pub fn prompt_command() -> Result<String> {
    let input: String = Input::new()
        .with_prompt("meal-plan")
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Closest known verb to a mistyped one, if any is similar enough.
pub fn suggest_verb<'a>(input: &str, verbs: &[&'a str]) -> Option<&'a str> {
    let input = input.to_lowercase();
    verbs
        .iter()
        .map(|v| (*v, jaro_winkler(v, &input)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(v, _)| v)
}
