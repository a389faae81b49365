use std::rc::Rc;

use ez_meal_plan_rs::command::{
    build_filters, filter_meals, parse_filter_args, parse_select_args, select_meal, Selection,
};
use ez_meal_plan_rs::models::{Ingredient, Meal};
use ez_meal_plan_rs::state::MealList;
use ez_meal_plan_rs::MealError;

fn meal(name: &str, ingredient: &str, price: f64) -> Meal {
    Meal::with_ingredients(name, [Ingredient::new(ingredient, price).unwrap()]).unwrap()
}

fn sample_recipes() -> MealList {
    let mut recipes = MealList::recipes();
    recipes.add(meal("Chicken Rice", "Chicken", 1.0)).unwrap();
    recipes.add(meal("French Fries", "Potato", 0.8)).unwrap();
    recipes.add(meal("Apple Pie", "Apple", 0.5)).unwrap();
    recipes
}

fn names(meals: &[Rc<Meal>]) -> Vec<String> {
    meals.iter().map(|m| m.to_string()).collect()
}

#[test]
fn test_recipes_are_alphabetical() {
    let recipes = sample_recipes();
    assert_eq!(
        names(recipes.meals()),
        vec!["Apple Pie ($0.50)", "Chicken Rice ($1.00)", "French Fries ($0.80)"]
    );
}

#[test]
fn test_filter_by_max_cost() {
    let recipes = sample_recipes();
    let args = parse_filter_args("filter mcost/0.9").unwrap();
    let matched = filter_meals(&recipes, &build_filters(&args.params).unwrap());
    assert_eq!(names(&matched), vec!["Apple Pie ($0.50)", "French Fries ($0.80)"]);
}

#[test]
fn test_select_second_of_filtered() {
    let recipes = sample_recipes();
    let mut wish = MealList::wish();

    let args = parse_select_args("select 2 mcost/0.9").unwrap();
    let selection = select_meal(&recipes, &mut wish, &args).unwrap();

    match selection {
        Selection::Added(meal) => assert_eq!(meal.name(), "French Fries"),
        Selection::NoMatches => panic!("expected French Fries to be selected"),
    }
    assert_eq!(names(wish.meals()), vec!["French Fries ($0.80)"]);
}

#[test]
fn test_select_past_end_of_filtered() {
    let recipes = sample_recipes();
    let mut wish = MealList::wish();

    let args = parse_select_args("select 3 mcost/0.9").unwrap();
    let result = select_meal(&recipes, &mut wish, &args);

    assert!(matches!(result, Err(MealError::InvalidSelectIndex(_))));
    assert!(wish.is_empty());
}

#[test]
fn test_select_without_filters_uses_whole_list() {
    let recipes = sample_recipes();
    let mut wish = MealList::wish();

    let args = parse_select_args("select 3").unwrap();
    select_meal(&recipes, &mut wish, &args).unwrap();
    assert!(wish.contains(&Meal::new("French Fries")));
}

#[test]
fn test_select_non_numeric_index() {
    assert!(matches!(
        parse_select_args("select first mcost/0.9"),
        Err(MealError::InvalidSelectIndex(_))
    ));
}

#[test]
fn test_select_zero_or_negative_index() {
    let recipes = sample_recipes();
    let mut wish = MealList::wish();

    for line in ["select 0", "select -1"] {
        let args = parse_select_args(line).unwrap();
        assert!(matches!(
            select_meal(&recipes, &mut wish, &args),
            Err(MealError::InvalidSelectIndex(_))
        ));
    }
    assert!(wish.is_empty());
}
