use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::state::{StorageConfig, DEFAULT_RECIPES_PATH, DEFAULT_WISH_PATH};

/// EZ Meal Plan: browse recipes, filter them by name, cost or ingredient, and
/// keep a personal wish list.
#[derive(Parser, Debug)]
#[command(name = "ez_meal_plan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the wish-list file.
    #[arg(long, default_value = DEFAULT_WISH_PATH)]
    pub wish_file: PathBuf,

    /// Path to the recipes (master list) file.
    #[arg(long, default_value = DEFAULT_RECIPES_PATH)]
    pub recipes_file: PathBuf,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            wish_path: self.wish_file.clone(),
            recipes_path: self.recipes_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read commands interactively until `bye`.
    Shell,

    /// Run a single command, e.g. `run select 2 mcost/5`.
    Run {
        /// The command words, joined with spaces.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Shell
    }
}
