//! Plain-text rendering of dishes.

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::menu::{Dish, Selector};
use infra::documents::HasMeta;

pub const EMPTY_MENU: &str = "No dishes added yet.";
pub const EMPTY_FILTER: &str = "No dishes found for this category.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    currency: String,
}

impl Layout {
    pub fn new(currency: &str) -> Self {
        Layout {
            currency: currency.to_string(),
        }
    }

    /// Always two decimal places, prefixed with the currency. Halves
    /// round away from zero, as on a till.
    pub fn price(&self, price: Decimal) -> String {
        let mut amount =
            price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        format!("{} {}", self.currency, amount)
    }

    pub fn total(&self, count: usize) -> String {
        format!("Total menu items: {}", count)
    }

    pub fn write_dish<W: Write>(&self, out: &mut W, dish: &Dish) -> io::Result<()> {
        writeln!(out, "{}", dish.name())?;
        writeln!(out, "  {}", dish.category())?;
        writeln!(out, "  {}", self.price(dish.price()))?;
        if !dish.description().is_empty() {
            writeln!(out, "  {}", dish.description())?;
        }
        writeln!(out, "  id: {}", dish.id())?;
        Ok(())
    }

    pub fn write_details<W: Write>(&self, out: &mut W, dish: &Dish) -> io::Result<()> {
        self.write_dish(out, dish)?;
        let added: DateTime<Utc> = dish.added_at().into();
        writeln!(
            out,
            "  added: {}",
            added.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    /// The full menu, headed by its size.
    pub fn write_menu<W: Write>(&self, out: &mut W, dishes: &[Dish]) -> io::Result<()> {
        writeln!(out, "{}", self.total(dishes.len()))?;
        if dishes.is_empty() {
            return writeln!(out, "{}", EMPTY_MENU);
        }
        for dish in dishes {
            self.write_dish(out, dish)?;
        }
        Ok(())
    }

    pub fn write_filtered<W: Write>(
        &self,
        out: &mut W,
        selector: Selector,
        dishes: &[Dish],
    ) -> io::Result<()> {
        writeln!(out, "{}: {}", selector, dishes.len())?;
        if dishes.is_empty() {
            return writeln!(out, "{}", EMPTY_FILTER);
        }
        for dish in dishes {
            self.write_dish(out, dish)?;
        }
        Ok(())
    }

    /// The picker's choices: "All" and then each category.
    pub fn write_categories<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for option in Selector::OPTIONS.iter() {
            writeln!(out, "{}", option)?;
        }
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new(crate::config::DEFAULT_CURRENCY)
    }
}
