use std::rc::Rc;

use tracing::{debug, info};

use crate::command::args::{parse_create_args, parse_filter_args, parse_select_args};
use crate::command::filter::{build_filters, filter_meals, pick_meal};
use crate::error::{MealError, Result};
use crate::interface::{suggest_verb, Reporter};
use crate::models::Meal;
use crate::state::codec::{decode_ingredient, RECIPE_SEPARATOR};
use crate::state::{parse_user_index, LoadReport, MealList, Storage};

/// Verbs understood by [`Session::execute`].
pub const VERBS: [&str; 9] = [
    "filter", "select", "create", "recipes", "wishlist", "remove", "clear", "help", "bye",
];

const HELP: &str = "\
Commands:
  recipes                              List every recipe
  wishlist                             List your wish list
  filter [name/X] [mcost/N] [ingredient/Y]
                                       Show recipes matching all given filters
  select <n> [name/X] [mcost/N] [ingredient/Y]
                                       Add the n-th matching recipe to your wish list
  create name/X ingredient/A(1.00) [ingredient/B(0.50)]...
                                       Add a new meal to the recipes and your wish list
  remove <n>                           Remove the n-th meal from your wish list
  clear                                Empty your wish list
  help                                 Show this message
  bye                                  Exit";

/// Whether the command loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The lower-cased first word of a command line.
pub fn command_verb(line: &str) -> String {
    line.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// The two meal lists plus the storage they persist to.
///
/// Every mutation is written to disk before the in-memory list changes, so a
/// failed write leaves both as they were.
pub struct Session {
    storage: Storage,
    recipes: MealList,
    wish: MealList,
}

impl Session {
    /// Bootstrap the files and load both lists, reporting skipped lines.
    pub fn open(storage: Storage, reporter: &mut dyn Reporter) -> Result<Self> {
        storage.ensure_files()?;

        let mut session = Self {
            recipes: MealList::recipes(),
            wish: MealList::wish(),
            storage,
        };

        let recipes = session.storage.load_recipes()?;
        fill_list(&mut session.recipes, recipes, reporter);
        let wish = session.storage.load_wish_list()?;
        fill_list(&mut session.wish, wish, reporter);

        info!(
            recipes = session.recipes.len(),
            wish = session.wish.len(),
            "session opened"
        );
        Ok(session)
    }

    pub fn recipes(&self) -> &MealList {
        &self.recipes
    }

    pub fn wish(&self) -> &MealList {
        &self.wish
    }

    /// Run one input line. Every error, including failed writes, is reported
    /// and the loop continues.
    pub fn execute(&mut self, line: &str, reporter: &mut dyn Reporter) -> Flow {
        match self.dispatch(line, reporter) {
            Ok(flow) => flow,
            Err(e) => {
                debug!(%e, "command failed");
                reporter.report_error(&e.to_string());
                Flow::Continue
            }
        }
    }

    fn dispatch(&mut self, line: &str, reporter: &mut dyn Reporter) -> Result<Flow> {
        let line = line.trim();
        let rest = line
            .split_once(char::is_whitespace)
            .map_or("", |(_, rest)| rest);

        match command_verb(line).as_str() {
            "" => {}
            "filter" => self.filter(line, reporter)?,
            "select" => self.select(line, reporter)?,
            "create" => self.create(line, reporter)?,
            "recipes" => reporter.report_meals(self.recipes.kind(), self.recipes.meals()),
            "wishlist" => reporter.report_meals(self.wish.kind(), self.wish.meals()),
            "remove" => self.remove(rest, reporter)?,
            "clear" => self.clear(reporter)?,
            "help" => reporter.report_message(HELP),
            "bye" => return Ok(Flow::Exit),
            other => {
                let hint = suggest_verb(other, &VERBS)
                    .map(|v| format!(" (did you mean '{}'?)", v))
                    .unwrap_or_default();
                return Err(MealError::UnknownCommand(format!("'{}'{}", other, hint)));
            }
        }
        Ok(Flow::Continue)
    }

    fn filter(&self, line: &str, reporter: &mut dyn Reporter) -> Result<()> {
        let args = parse_filter_args(line)?;
        let matched = filter_meals(&self.recipes, &build_filters(&args.params)?);
        if matched.is_empty() {
            reporter.report_empty_result();
        } else {
            reporter.report_meals(self.recipes.kind(), &matched);
        }
        Ok(())
    }

    fn select(&mut self, line: &str, reporter: &mut dyn Reporter) -> Result<()> {
        let args = parse_select_args(line)?;
        let Some(meal) = pick_meal(&self.recipes, &args)? else {
            reporter.report_empty_result();
            return Ok(());
        };
        if self.wish.contains(&meal) {
            return Err(MealError::DuplicateMeal(meal.name().to_string()));
        }

        self.storage.append_wish(&meal)?;
        self.wish.add(Rc::clone(&meal))?;
        reporter.report_added_meal(&meal, &self.wish);
        Ok(())
    }

    /// Build a new meal and add it to the recipes and the wish list.
    ///
    /// The recipe is written first; if the wish-list write then fails the
    /// recipe stays (on disk and in memory) and the error is reported.
    fn create(&mut self, line: &str, reporter: &mut dyn Reporter) -> Result<()> {
        let args = parse_create_args(line)?;
        if args.name.contains(RECIPE_SEPARATOR)
            || args.ingredients.iter().any(|i| i.contains(RECIPE_SEPARATOR))
        {
            return Err(MealError::InvalidCommand(format!(
                "'{}' cannot appear in a meal or ingredient",
                RECIPE_SEPARATOR
            )));
        }
        let mut meal = Meal::new(args.name);
        for token in &args.ingredients {
            meal.add_ingredient(decode_ingredient(token)?)?;
        }
        if self.recipes.contains(&meal) || self.wish.contains(&meal) {
            return Err(MealError::DuplicateMeal(meal.name().to_string()));
        }

        let meal = Rc::new(meal);
        self.storage.append_recipe(&meal)?;
        self.recipes.add(Rc::clone(&meal))?;
        self.storage.append_wish(&meal)?;
        self.wish.add(Rc::clone(&meal))?;
        reporter.report_added_meal(&meal, &self.wish);
        Ok(())
    }

    fn remove(&mut self, rest: &str, reporter: &mut dyn Reporter) -> Result<()> {
        let index = parse_user_index(rest, self.wish.len())?;
        let remaining = self
            .wish
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, m)| m.as_ref());
        self.storage.save_wish_list(remaining)?;

        let removed = self.wish.remove(index)?;
        reporter.report_removed_meal(&removed, &self.wish);
        Ok(())
    }

    fn clear(&mut self, reporter: &mut dyn Reporter) -> Result<()> {
        self.storage.clear_wish_list()?;
        self.wish.clear();
        reporter.report_message("Your wish list is now empty.");
        Ok(())
    }
}

/// Add loaded meals to a list, reporting decode failures and duplicates.
fn fill_list(list: &mut MealList, report: LoadReport, reporter: &mut dyn Reporter) {
    for failure in report.failures {
        reporter.report_error(&format!(
            "Skipped line {} of the {} file: {}",
            failure.line,
            list.kind(),
            failure.error
        ));
    }
    for meal in report.meals {
        if let Err(e) = list.add(Rc::new(meal)) {
            reporter.report_error(&format!("Skipped a meal in the {} file: {}", list.kind(), e));
        }
    }
}
