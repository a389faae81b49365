//! Free-form argument extraction for `filter`, `select` and `create`.
//!
//! A command line looks like `select 2 name/chicken mcost/5`. Keyword markers
//! (`name/`, `mcost/`, `ingredient/`) are found case-insensitively at the start
//! of a whitespace-delimited token; each value runs until the next marker or
//! the end of the line.

use std::fmt;

use crate::error::{MealError, Result};

/// A recognised filter keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Name,
    MaxCost,
    Ingredient,
}

impl Keyword {
    pub const ALL: [Keyword; 3] = [Keyword::Name, Keyword::MaxCost, Keyword::Ingredient];

    /// The literal marker that introduces this keyword's value.
    pub fn marker(self) -> &'static str {
        match self {
            Keyword::Name => "name/",
            Keyword::MaxCost => "mcost/",
            Keyword::Ingredient => "ingredient/",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// The command verbs that take keyword arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Filter,
    Select,
    Create,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Filter => "filter",
            Verb::Select => "select",
            Verb::Create => "create",
        }
    }
}

/// One `keyword/value` pair as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParam {
    pub keyword: Keyword,
    pub value: String,
}

/// Arguments of a `filter` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArgs {
    pub params: Vec<FilterParam>,
}

/// Arguments of a `select` command. The index is still 1-based and unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectArgs {
    pub index: i64,
    pub params: Vec<FilterParam>,
}

/// Arguments of a `create` command: the meal name and its raw
/// `Name(price)` ingredient tokens, in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Byte offset of a keyword marker within the argument text.
#[derive(Debug, Clone, Copy)]
struct Boundary {
    offset: usize,
    keyword: Keyword,
}

/// The argument text split at keyword boundaries.
#[derive(Debug)]
struct Tokens<'a> {
    /// Text before the first keyword, trimmed.
    leading: &'a str,
    params: Vec<(Keyword, &'a str)>,
}

/// Find every keyword marker in one pass over `text`, in offset order.
///
/// Markers are ASCII, so comparing bytes case-insensitively on the original
/// string keeps every offset on a char boundary.
fn scan_keywords(text: &str) -> Vec<Boundary> {
    let bytes = text.as_bytes();
    let mut boundaries = Vec::new();
    let mut at_token_start = true;

    for (offset, &byte) in bytes.iter().enumerate() {
        if at_token_start {
            for keyword in Keyword::ALL {
                let marker = keyword.marker().as_bytes();
                if bytes.len() - offset >= marker.len()
                    && bytes[offset..offset + marker.len()].eq_ignore_ascii_case(marker)
                {
                    boundaries.push(Boundary { offset, keyword });
                    break;
                }
            }
        }
        at_token_start = byte.is_ascii_whitespace();
    }

    boundaries
}

fn tokenize(text: &str) -> Tokens<'_> {
    let boundaries = scan_keywords(text);
    let leading_end = boundaries.first().map_or(text.len(), |b| b.offset);

    let params = boundaries
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let start = b.offset + b.keyword.marker().len();
            let end = boundaries.get(i + 1).map_or(text.len(), |next| next.offset);
            (b.keyword, text[start..end].trim())
        })
        .collect();

    Tokens {
        leading: text[..leading_end].trim(),
        params,
    }
}

/// Strip the verb from the front of the line, case-insensitively.
fn strip_verb(line: &str, verb: Verb) -> Result<&str> {
    let line = line.trim();
    let word = verb.as_str();
    let head = line.get(..word.len()).filter(|h| h.eq_ignore_ascii_case(word));
    let rest = head.map(|h| &line[h.len()..]);

    match rest {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => Ok(rest),
        _ => Err(MealError::InvalidCommand(format!(
            "expected the line to start with '{}'",
            word
        ))),
    }
}

fn collect_params(pairs: Vec<(Keyword, &str)>) -> Result<Vec<FilterParam>> {
    pairs
        .into_iter()
        .map(|(keyword, value)| {
            if value.is_empty() {
                Err(MealError::InvalidCommand(format!("missing value after '{}'", keyword)))
            } else {
                Ok(FilterParam {
                    keyword,
                    value: value.to_string(),
                })
            }
        })
        .collect()
}

/// Parse `filter <keyword/value>...`.
pub fn parse_filter_args(line: &str) -> Result<FilterArgs> {
    let tokens = tokenize(strip_verb(line, Verb::Filter)?);

    if tokens.params.is_empty() {
        return Err(MealError::InvalidCommand(format!(
            "filter needs at least one of {}, {}, {}",
            Keyword::Name,
            Keyword::MaxCost,
            Keyword::Ingredient
        )));
    }
    if !tokens.leading.is_empty() {
        return Err(MealError::InvalidCommand(format!(
            "unexpected '{}' before the first filter keyword",
            tokens.leading
        )));
    }

    Ok(FilterArgs {
        params: collect_params(tokens.params)?,
    })
}

/// Parse `select <index> [keyword/value]...`.
///
/// The index must be an integer; whether it is in range is decided against
/// the filtered list later.
pub fn parse_select_args(line: &str) -> Result<SelectArgs> {
    let tokens = tokenize(strip_verb(line, Verb::Select)?);

    let index = tokens
        .leading
        .parse::<i64>()
        .map_err(|_| MealError::InvalidSelectIndex(tokens.leading.to_string()))?;

    Ok(SelectArgs {
        index,
        params: collect_params(tokens.params)?,
    })
}

/// Parse `create name/<meal> ingredient/<Name(price)>...`.
pub fn parse_create_args(line: &str) -> Result<CreateArgs> {
    let tokens = tokenize(strip_verb(line, Verb::Create)?);

    if !tokens.leading.is_empty() {
        return Err(MealError::InvalidCommand(format!(
            "unexpected '{}' before '{}'",
            tokens.leading,
            Keyword::Name
        )));
    }

    let mut name = None;
    let mut ingredients = Vec::new();
    for param in collect_params(tokens.params)? {
        match param.keyword {
            Keyword::Name if name.is_none() => name = Some(param.value),
            Keyword::Name => {
                return Err(MealError::InvalidCommand(format!(
                    "'{}' given more than once",
                    Keyword::Name
                )));
            }
            Keyword::Ingredient => ingredients.push(param.value),
            Keyword::MaxCost => {
                return Err(MealError::InvalidCommand(format!(
                    "'{}' cannot be used with create",
                    Keyword::MaxCost
                )));
            }
        }
    }

    let name = name.ok_or_else(|| {
        MealError::InvalidCommand(format!("create needs a meal '{}'", Keyword::Name))
    })?;
    if ingredients.is_empty() {
        return Err(MealError::InvalidCommand(format!(
            "create needs at least one '{}'",
            Keyword::Ingredient
        )));
    }

    Ok(CreateArgs { name, ingredients })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(keyword: Keyword, value: &str) -> FilterParam {
        FilterParam {
            keyword,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_filter_single_keyword() {
        let args = parse_filter_args("filter name/Chicken Rice").unwrap();
        assert_eq!(args.params, vec![param(Keyword::Name, "Chicken Rice")]);
    }

    #[test]
    fn test_filter_multiple_keywords_any_order() {
        let args = parse_filter_args("filter mcost/5  ingredient/Rice name/Chicken").unwrap();
        assert_eq!(
            args.params,
            vec![
                param(Keyword::MaxCost, "5"),
                param(Keyword::Ingredient, "Rice"),
                param(Keyword::Name, "Chicken"),
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive_values_keep_case() {
        let args = parse_filter_args("FILTER Name/French Fries INGREDIENT/PoTaTo").unwrap();
        assert_eq!(
            args.params,
            vec![
                param(Keyword::Name, "French Fries"),
                param(Keyword::Ingredient, "PoTaTo"),
            ]
        );
    }

    #[test]
    fn test_marker_inside_word_is_value_text() {
        let args = parse_filter_args("filter ingredient/surname/x").unwrap();
        assert_eq!(args.params, vec![param(Keyword::Ingredient, "surname/x")]);

        let args = parse_filter_args("filter name/a surname/b").unwrap();
        assert_eq!(args.params, vec![param(Keyword::Name, "a surname/b")]);
    }

    #[test]
    fn test_repeated_keyword_yields_two_params() {
        let args = parse_filter_args("filter name/chicken name/rice").unwrap();
        assert_eq!(args.params.len(), 2);
    }

    #[test]
    fn test_filter_without_keyword_rejected() {
        assert!(matches!(
            parse_filter_args("filter chicken"),
            Err(MealError::InvalidCommand(_))
        ));
        assert!(matches!(
            parse_filter_args("filter"),
            Err(MealError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_filter_stray_text_rejected() {
        assert!(matches!(
            parse_filter_args("filter oops name/chicken"),
            Err(MealError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_filter_empty_value_rejected() {
        assert!(matches!(
            parse_filter_args("filter name/ mcost/3"),
            Err(MealError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_select_index_only() {
        let args = parse_select_args("select 2").unwrap();
        assert_eq!(args.index, 2);
        assert!(args.params.is_empty());
    }

    #[test]
    fn test_select_with_filters() {
        let args = parse_select_args("  Select   3 mcost/0.9 name/pie ").unwrap();
        assert_eq!(args.index, 3);
        assert_eq!(
            args.params,
            vec![param(Keyword::MaxCost, "0.9"), param(Keyword::Name, "pie")]
        );
    }

    #[test]
    fn test_select_zero_and_negative_parse() {
        assert_eq!(parse_select_args("select 0").unwrap().index, 0);
        assert_eq!(parse_select_args("select -4").unwrap().index, -4);
    }

    #[test]
    fn test_select_non_numeric_index() {
        for line in ["select", "select two", "select 1.5", "select name/x", "select 2name/x"] {
            assert!(
                matches!(parse_select_args(line), Err(MealError::InvalidSelectIndex(_))),
                "expected InvalidSelectIndex for {:?}",
                line
            );
        }
    }

    #[test]
    fn test_create_args() {
        let args =
            parse_create_args("create name/Nasi Lemak ingredient/Rice(0.40) INGREDIENT/Egg (0.35)")
                .unwrap();
        assert_eq!(args.name, "Nasi Lemak");
        assert_eq!(args.ingredients, vec!["Rice(0.40)", "Egg (0.35)"]);
    }

    #[test]
    fn test_create_args_rejected() {
        for line in [
            "create",
            "create ingredient/Rice(0.40)",
            "create name/Rice",
            "create name/A name/B ingredient/Rice(0.40)",
            "create name/A mcost/3 ingredient/Rice(0.40)",
            "create stray name/A ingredient/Rice(0.40)",
        ] {
            assert!(
                matches!(parse_create_args(line), Err(MealError::InvalidCommand(_))),
                "expected InvalidCommand for {:?}",
                line
            );
        }
    }

    #[test]
    fn test_wrong_verb_rejected() {
        assert!(parse_select_args("selection 1").is_err());
        assert!(parse_filter_args("select name/x").is_err());
    }

    #[test]
    fn test_non_ascii_values() {
        let args = parse_filter_args("filter name/Crème Brûlée ingredient/crème").unwrap();
        assert_eq!(
            args.params,
            vec![
                param(Keyword::Name, "Crème Brûlée"),
                param(Keyword::Ingredient, "crème"),
            ]
        );
    }
}
