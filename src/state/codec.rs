use serde::Deserialize;

use crate::error::{MealError, Result};
use crate::models::{Ingredient, Meal};

/// Separator between the meal name and each ingredient in the recipes file.
pub const RECIPE_SEPARATOR: char = '|';

/// Decode one line of the recipes file: `Name | Ing(1.00) | Ing(0.20)`.
///
/// Returns `Ok(None)` for lines that are skipped without complaint (blank
/// lines, lines without ingredients). Any malformed ingredient discards the
/// whole meal.
pub fn decode_recipe_line(line: &str) -> Result<Option<Meal>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split(RECIPE_SEPARATOR).map(str::trim).collect();
    if parts.len() < 2 {
        return Ok(None);
    }

    if parts[0].is_empty() {
        return Err(MealError::MissingMealName(line.to_string()));
    }

    let mut meal = Meal::new(parts[0]);
    for token in &parts[1..] {
        meal.add_ingredient(decode_ingredient(token)?)?;
    }
    Ok(Some(meal))
}

/// Decode a `Name(price)` token, as stored in the recipes file or typed in
/// a `create` command.
pub fn decode_ingredient(token: &str) -> Result<Ingredient> {
    let malformed = || MealError::MalformedIngredient(token.to_string());

    let open = token.find('(').ok_or_else(malformed)?;
    let close = token[open..]
        .find(')')
        .map(|offset| open + offset)
        .ok_or_else(malformed)?;

    let name = token[..open].trim();
    if name.is_empty() {
        return Err(malformed());
    }
    Ingredient::parse(name, &token[open + 1..close])
}

/// Encode a meal as one recipes-file line, without the trailing newline.
pub fn encode_recipe_line(meal: &Meal) -> Result<String> {
    if meal.ingredients().is_empty() {
        return Err(MealError::EmptyMeal(meal.name().to_string()));
    }

    let mut line = meal.name().to_string();
    for ingredient in meal.ingredients() {
        line.push_str(&format!(
            " {} {}({})",
            RECIPE_SEPARATOR,
            ingredient.name(),
            format_price(ingredient.price())
        ));
    }
    Ok(line)
}

/// Two decimals when that is exact, otherwise the shortest lossless form.
fn format_price(price: f64) -> String {
    let cents = format!("{:.2}", price);
    if cents.parse::<f64>() == Ok(price) {
        cents
    } else {
        price.to_string()
    }
}

#[derive(Deserialize)]
struct StoredMeal {
    name: String,
    #[serde(default)]
    ingredients: Vec<StoredIngredient>,
}

#[derive(Deserialize)]
struct StoredIngredient {
    name: String,
    price: f64,
}

/// Decode one line of the wish-list file (a single-line JSON object).
///
/// Ingredients are rebuilt through [`Ingredient::new`], so a stored negative
/// price surfaces as `InvalidPrice` rather than being trusted.
pub fn decode_wish_line(line: &str) -> Result<Option<Meal>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let stored: StoredMeal = serde_json::from_str(line)?;
    let ingredients = stored
        .ingredients
        .into_iter()
        .map(|i| Ingredient::new(i.name, i.price))
        .collect::<Result<Vec<_>>>()?;
    if stored.name.trim().is_empty() {
        return Err(MealError::MissingMealName(line.to_string()));
    }
    Meal::with_ingredients(stored.name, ingredients).map(Some)
}

/// Encode a meal as one wish-list line, without the trailing newline.
pub fn encode_wish_line(meal: &Meal) -> Result<String> {
    Ok(serde_json::to_string(meal)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn test_decode_recipe_line() {
        let meal = decode_recipe_line("Chicken Rice | Chicken(1.00) | Rice(0.20)")
            .unwrap()
            .unwrap();
        assert_eq!(meal.name(), "Chicken Rice");
        assert_eq!(meal.ingredients().len(), 2);
        assert_eq!(meal.ingredients()[1].name(), "Rice");
        assert_float_absolute_eq!(meal.total_price(), 1.2, 1e-9);
    }

    #[test]
    fn test_decode_recipe_line_tolerates_spacing() {
        let meal = decode_recipe_line("  Toast|Bread ( 0.5 )|  Butter(0.25)  ")
            .unwrap()
            .unwrap();
        assert_eq!(meal.name(), "Toast");
        assert_eq!(meal.ingredients()[0].name(), "Bread");
        assert_float_absolute_eq!(meal.total_price(), 0.75, 1e-9);
    }

    #[test]
    fn test_decode_recipe_skips_blank_and_ingredientless_lines() {
        assert!(decode_recipe_line("").unwrap().is_none());
        assert!(decode_recipe_line("    ").unwrap().is_none());
        assert!(decode_recipe_line("Plain Water").unwrap().is_none());
    }

    #[test]
    fn test_decode_recipe_rejects_missing_bracket() {
        let result = decode_recipe_line("Soup | Carrot(0.30 | Onion(0.10)");
        assert!(matches!(result, Err(MealError::MalformedIngredient(_))));

        let result = decode_recipe_line("Soup | Carrot 0.30");
        assert!(matches!(result, Err(MealError::MalformedIngredient(_))));
    }

    #[test]
    fn test_decode_recipe_rejects_bad_price() {
        assert!(matches!(
            decode_recipe_line("Soup | Carrot(abc)"),
            Err(MealError::InvalidPrice(_))
        ));
        assert!(matches!(
            decode_recipe_line("Soup | Carrot(-1)"),
            Err(MealError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_encode_recipe_line() {
        let meal = decode_recipe_line("Chicken Rice|Chicken(1)|Rice(0.2)")
            .unwrap()
            .unwrap();
        assert_eq!(
            encode_recipe_line(&meal).unwrap(),
            "Chicken Rice | Chicken(1.00) | Rice(0.20)"
        );
    }

    #[test]
    fn test_decode_recipe_rejects_missing_name() {
        assert!(matches!(
            decode_recipe_line("| Apple(0.50)"),
            Err(MealError::MissingMealName(_))
        ));
        assert!(matches!(
            decode_recipe_line("   | Apple(0.50) | Flour(0.10)"),
            Err(MealError::MissingMealName(_))
        ));
    }

    #[test]
    fn test_encode_keeps_sub_cent_prices() {
        let meal = decode_recipe_line("Tea | Leaves(0.125) | Water(0)")
            .unwrap()
            .unwrap();
        let line = encode_recipe_line(&meal).unwrap();
        assert_eq!(line, "Tea | Leaves(0.125) | Water(0.00)");

        let reloaded = decode_recipe_line(&line).unwrap().unwrap();
        assert_eq!(reloaded.ingredients(), meal.ingredients());
    }

    #[test]
    fn test_decode_ingredient_token() {
        let ingredient = decode_ingredient("Egg (0.35)").unwrap();
        assert_eq!(ingredient.name(), "Egg");
        assert_eq!(ingredient.price(), 0.35);
        assert!(matches!(
            decode_ingredient("(0.35)"),
            Err(MealError::MalformedIngredient(_))
        ));
    }

    #[test]
    fn test_encode_recipe_line_requires_ingredients() {
        assert!(matches!(
            encode_recipe_line(&Meal::new("Air")),
            Err(MealError::EmptyMeal(_))
        ));
    }

    #[test]
    fn test_wish_line_roundtrip() {
        let meal = decode_recipe_line("Apple Pie | Apple(0.50) | Flour(0.10)")
            .unwrap()
            .unwrap();
        let line = encode_wish_line(&meal).unwrap();
        assert!(!line.contains('\n'));

        let decoded = decode_wish_line(&line).unwrap().unwrap();
        assert_eq!(decoded, meal);
        assert_eq!(decoded.ingredients(), meal.ingredients());
    }

    #[test]
    fn test_wish_line_negative_price() {
        let line = r#"{"name":"Soup","ingredients":[{"name":"Carrot","price":-0.3}]}"#;
        assert!(matches!(
            decode_wish_line(line),
            Err(MealError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_wish_line_blank_name() {
        let line = r#"{"name":"  ","ingredients":[{"name":"Carrot","price":0.3}]}"#;
        assert!(matches!(
            decode_wish_line(line),
            Err(MealError::MissingMealName(_))
        ));
    }

    #[test]
    fn test_wish_line_garbage() {
        assert!(matches!(
            decode_wish_line("Soup | Carrot(0.30)"),
            Err(MealError::Format(_))
        ));
        assert!(decode_wish_line("  ").unwrap().is_none());
    }
}
