use std::rc::Rc;

use crate::models::Meal;
use crate::state::{ListKind, MealList};

/// Everything the session tells the user goes through this trait.
pub trait Reporter {
    fn report_added_meal(&mut self, meal: &Meal, list: &MealList);

    fn report_removed_meal(&mut self, meal: &Meal, list: &MealList);

    /// The filtered candidate set was empty.
    fn report_empty_result(&mut self);

    fn report_error(&mut self, message: &str);

    fn report_meals(&mut self, kind: ListKind, meals: &[Rc<Meal>]);

    fn report_message(&mut self, message: &str);
}

/// Prints to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report_added_meal(&mut self, meal: &Meal, list: &MealList) {
        println!("Added to your {}: {}", list.kind(), meal);
        println!("You now have {} meal(s) in your {}.", list.len(), list.kind());
    }

    fn report_removed_meal(&mut self, meal: &Meal, list: &MealList) {
        println!("Removed from your {}: {}", list.kind(), meal);
        println!("You now have {} meal(s) in your {}.", list.len(), list.kind());
    }

    fn report_empty_result(&mut self) {
        println!("No meals match your filter.");
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn report_meals(&mut self, kind: ListKind, meals: &[Rc<Meal>]) {
        display_meal_list(kind, meals);
    }

    fn report_message(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Display a numbered list of meals with their ingredients.
pub fn display_meal_list(kind: ListKind, meals: &[Rc<Meal>]) {
    if meals.is_empty() {
        println!("Your {} is empty.", kind);
        return;
    }

    println!();
    println!("=== {} ({} meals) ===", kind, meals.len());
    println!();

    let width = meals.len().to_string().len();
    for (i, meal) in meals.iter().enumerate() {
        println!("{:>width$}. {}", i + 1, meal, width = width);
        let ingredients: Vec<String> = meal.ingredients().iter().map(|i| i.to_string()).collect();
        if !ingredients.is_empty() {
            println!("{:>width$}  {}", "", ingredients.join(", "), width = width);
        }
    }

    println!();
}

/// Collects reports in memory so tests can assert on them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub added: Vec<(String, ListKind)>,
    pub removed: Vec<(String, ListKind)>,
    pub empty_results: usize,
    pub errors: Vec<String>,
    pub listings: Vec<(ListKind, Vec<String>)>,
    pub messages: Vec<String>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn report_added_meal(&mut self, meal: &Meal, list: &MealList) {
        self.added.push((meal.name().to_string(), list.kind()));
    }

    fn report_removed_meal(&mut self, meal: &Meal, list: &MealList) {
        self.removed.push((meal.name().to_string(), list.kind()));
    }

    fn report_empty_result(&mut self) {
        self.empty_results += 1;
    }

    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn report_meals(&mut self, kind: ListKind, meals: &[Rc<Meal>]) {
        self.listings
            .push((kind, meals.iter().map(|m| m.name().to_string()).collect()));
    }

    fn report_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
