use std::fmt;
use std::str::FromStr;

use super::models::{Category, Dish, ValidationError};

/// Picks either a single category or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    All,
    Only(Category),
}

const ALL_LABEL: &str = "All";

impl Selector {
    /// In the order a picker should offer them.
    pub const OPTIONS: [Selector; 5] = [
        Selector::All,
        Selector::Only(Category::Starters),
        Selector::Only(Category::Mains),
        Selector::Only(Category::Dessert),
        Selector::Only(Category::Drinks),
    ];

    pub fn matches(&self, dish: &Dish) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(category) => dish.category() == *category,
        }
    }
}

impl From<Category> for Selector {
    fn from(category: Category) -> Self {
        Selector::Only(category)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Selector::All => fmt.write_str(ALL_LABEL),
            Selector::Only(category) => category.fmt(fmt),
        }
    }
}

impl FromStr for Selector {
    type Err = ValidationError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.trim().eq_ignore_ascii_case(ALL_LABEL) {
            return Ok(Selector::All);
        }
        src.parse::<Category>().map(Selector::Only)
    }
}

/// The dishes matching `selector`, in their original relative order.
pub fn filter(dishes: &[Dish], selector: Selector) -> Vec<&Dish> {
    dishes.iter().filter(|d| selector.matches(d)).collect()
}
