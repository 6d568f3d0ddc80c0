use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use err_derive::Error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use infra::documents::{DocMeta, HasMeta};
use infra::ids::{Entity, Id};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Starters,
    Mains,
    Dessert,
    Drinks,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dish {
    #[serde(flatten)]
    pub(super) meta: DocMeta<Dish>,
    pub(super) name: String,
    pub(super) description: String,
    pub(super) category: Category,
    pub(super) price: Decimal,
}

/// A dish as entered, before validation. Every field is raw text.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DishDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(display = "Dish name must not be empty")]
    EmptyName,
    #[error(display = "Price must be a number greater than zero; got {:?}", _0)]
    InvalidPrice(String),
    #[error(
        display = "Unknown category {:?}; expected one of Starters, Mains, Dessert, Drinks",
        _0
    )]
    InvalidCategory(String),
}

/// The checked fields of a `DishDraft`, ready to become a `Dish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Checked {
    pub(super) name: String,
    pub(super) description: String,
    pub(super) category: Category,
    pub(super) price: Decimal,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Starters,
        Category::Mains,
        Category::Dessert,
        Category::Drinks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Starters => "Starters",
            Category::Mains => "Mains",
            Category::Dessert => "Dessert",
            Category::Drinks => "Drinks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let wanted = src.trim();
        Category::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| ValidationError::InvalidCategory(src.to_string()))
    }
}

impl Dish {
    pub(super) fn new(id: Id<Dish>, checked: Checked) -> Self {
        let meta = DocMeta::new_with_id(id);
        let Checked {
            name,
            description,
            category,
            price,
        } = checked;
        Dish {
            meta,
            name,
            description,
            category,
            price,
        }
    }

    pub(super) fn replace(&mut self, checked: Checked) {
        let id = self.meta.id;
        *self = Dish::new(id, checked);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn added_at(&self) -> SystemTime {
        self.meta.id.timestamp()
    }
}

impl Entity for Dish {
    const PREFIX: &'static str = "dish";
}

impl HasMeta for Dish {
    fn meta(&self) -> &DocMeta<Self> {
        &self.meta
    }
}

impl DishDraft {
    pub fn new(name: &str, description: &str, category: &str, price: impl ToString) -> Self {
        DishDraft {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            price: price.to_string(),
        }
    }

    /// Checks the name, then the price, then the category; the first
    /// failure wins.
    pub(super) fn check(&self) -> Result<Checked, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let price = parse_price(&self.price)?;
        let category = self.category.parse::<Category>()?;

        Ok(Checked {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            category,
            price,
        })
    }
}

/// Half a cent rounds up to the smallest price that still shows as `0.01`.
const MIN_PRICE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);
const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn parse_price(src: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidPrice(src.to_string());
    let text = src.trim();
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || "+-.eE".contains(c))
    {
        return Err(invalid());
    }
    let price = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| invalid())?;
    if price < MIN_PRICE || price > MAX_PRICE {
        return Err(invalid());
    }
    Ok(price)
}

impl ValidationError {
    /// Stable reason code for callers that branch on the failure.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "empty_name",
            ValidationError::InvalidPrice(_) => "invalid_price",
            ValidationError::InvalidCategory(_) => "invalid_category",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn check(name: &str, category: &str, price: &str) -> Result<Checked, ValidationError> {
        DishDraft::new(name, "", category, price).check()
    }

    #[test]
    fn should_accept_a_well_formed_draft() {
        let checked = DishDraft::new("  Grilled Salmon ", " with lemon ", "Mains", "185.00")
            .check()
            .expect("check");

        assert_eq!(
            checked,
            Checked {
                name: "Grilled Salmon".into(),
                description: "with lemon".into(),
                category: Category::Mains,
                price: Decimal::new(18500, 2),
            }
        );
    }

    #[test]
    fn should_reject_blank_names() {
        assert_eq!(check("", "Mains", "10"), Err(ValidationError::EmptyName));
        assert_eq!(check(" \t ", "Mains", "10"), Err(ValidationError::EmptyName));
    }

    #[test]
    fn should_reject_prices_that_are_not_positive_numbers() {
        for price in &[
            "0", "-5", "-0.01", "", "  ", "abc", "NaN", "inf", "1.2.3", "1_000", "0x10", "1e",
        ] {
            let err = check("Soup", "Starters", price).expect_err(price);
            assert_eq!(err.reason(), "invalid_price", "price: {:?}", price);
        }
    }

    #[test]
    fn should_reject_prices_that_cannot_show_as_cents() {
        for price in &["0.001", "0.0049", "1000000000.01", "79228162514264337593543950335"] {
            let err = check("Soup", "Starters", price).expect_err(price);
            assert_eq!(err.reason(), "invalid_price", "price: {:?}", price);
        }
        assert_eq!(
            check("Soup", "Starters", "0.005").map(|c| c.price),
            Ok(Decimal::new(5, 3))
        );
        assert_eq!(
            check("Soup", "Starters", "1000000000").map(|c| c.price),
            Ok(Decimal::new(1_000_000_000, 0))
        );
    }

    #[test]
    fn should_accept_scientific_notation_and_padding() {
        let checked = check("Soup", "Starters", " 1.5e1 ").expect("check");
        assert_eq!(checked.price, Decimal::new(15, 0));
    }

    #[test]
    fn should_reject_unknown_categories() {
        let err = check("Soup", "Snacks", "10").expect_err("Snacks");
        assert_eq!(err, ValidationError::InvalidCategory("Snacks".into()));
        assert_eq!(err.reason(), "invalid_category");
    }

    #[test]
    fn should_report_name_before_price_before_category() {
        assert_eq!(check("", "Snacks", "-1").map_err(|e| e.reason()), Err("empty_name"));
        assert_eq!(
            check("Soup", "Snacks", "-1").map_err(|e| e.reason()),
            Err("invalid_price")
        );
    }

    #[test]
    fn category_parses_labels_ignoring_case() {
        for c in Category::ALL.iter() {
            assert_eq!(c.label().parse::<Category>(), Ok(*c));
            assert_eq!(c.label().to_uppercase().parse::<Category>(), Ok(*c));
        }
    }

    #[test]
    fn category_display_matches_label() {
        assert_eq!(Category::Dessert.to_string(), "Dessert");
    }

    #[test]
    fn float_prices_survive_conversion_to_text() {
        let draft = DishDraft::new("Steak", "", "Mains", 185.00_f64);
        assert_eq!(draft.price, "185");
        assert_eq!(draft.check().expect("check").price, Decimal::new(185, 0));

        let nan = DishDraft::new("Steak", "", "Mains", std::f64::NAN);
        assert_eq!(nan.check().map_err(|e| e.reason()), Err("invalid_price"));
    }
}
