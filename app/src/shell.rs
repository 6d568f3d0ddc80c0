//! A line-oriented command interpreter over a `MenuCard`.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use err_derive::Error;
use log::*;
use serde::Serialize;
use structopt::clap::AppSettings;
use structopt::StructOpt;

use infra::documents::HasMeta;
use infra::ids::Id;

use crate::display::EMPTY_MENU;
use crate::menu::{
    AddDish, CountDishes, Dish, DishDraft, EditDish, FilterMenu, RemoveDish, Selector, ShowDish,
    ShowMenu, ValidationError,
};
use crate::services::{Commandable, Queryable};
use crate::MenuCard;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "menucard",
    about = "Menu commands",
    setting = AppSettings::NoBinaryName,
    setting = AppSettings::ColorNever,
    setting = AppSettings::DisableVersion
)]
enum Command {
    #[structopt(name = "add", about = "Add a dish")]
    Add(DishArgs),
    #[structopt(name = "edit", about = "Replace the details of a dish")]
    Edit {
        id: Id<Dish>,
        #[structopt(flatten)]
        dish: DishArgs,
    },
    #[structopt(name = "remove", about = "Remove a dish")]
    Remove { id: Id<Dish> },
    #[structopt(name = "show", about = "Show one dish")]
    Show { id: Id<Dish> },
    #[structopt(name = "list", about = "List every dish")]
    List,
    #[structopt(name = "filter", about = "List dishes in one category, or all")]
    Filter { selector: Selector },
    #[structopt(name = "count", about = "Count the dishes")]
    Count,
    #[structopt(name = "categories", about = "List the filter choices: All, then each category")]
    Categories,
    #[structopt(name = "quit", about = "Stop reading commands")]
    Quit,
}

#[derive(Debug, StructOpt)]
struct DishArgs {
    name: String,
    #[structopt(short = "c", long = "category")]
    category: String,
    #[structopt(short = "p", long = "price", allow_hyphen_values = true)]
    price: String,
    #[structopt(short = "d", long = "description", default_value = "")]
    description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error(display = "Unterminated quote in {:?}", _0)]
    UnterminatedQuote(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a> {
    card: &'a mut MenuCard,
    json: bool,
}

impl From<DishArgs> for DishDraft {
    fn from(args: DishArgs) -> Self {
        DishDraft {
            name: args.name,
            description: args.description,
            category: args.category,
            price: args.price,
        }
    }
}

/// Splits a line into words. Single or double quotes group words; within
/// double quotes a backslash escapes the next character.
pub fn split_words(line: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('"'), '\\') => {
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => word.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::replace(&mut word, String::new()));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(SplitError::UnterminatedQuote(line.to_string()));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

impl<'a> Shell<'a> {
    pub fn new(card: &'a mut MenuCard, json: bool) -> Self {
        Shell { card, json }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for (lineno, line) in input.lines().enumerate() {
            let line = line.context("read command")?;
            trace!("{}: {:?}", lineno + 1, line);
            let flow = self
                .eval(&line, out)
                .with_context(|| format!("line {}: {:?}", lineno + 1, line))?;
            if flow == Flow::Quit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn eval<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = match split_words(trimmed) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };
        let cmd = match Command::from_iter_safe(words) {
            Ok(cmd) => cmd,
            Err(e) => {
                writeln!(out, "{}", e.message)?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Command: {:?}", cmd);

        match self.dispatch(cmd, out) {
            Ok(flow) => Ok(flow),
            Err(e) => match e.downcast_ref::<ValidationError>() {
                Some(invalid) => {
                    writeln!(out, "Rejected ({}): {}", invalid.reason(), invalid)?;
                    Ok(Flow::Continue)
                }
                None => Err(e),
            },
        }
    }

    fn dispatch<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<Flow> {
        let layout = self.card.layout().clone();
        match cmd {
            Command::Add(args) => {
                let dish = self.card.menu_mut().execute(AddDish(args.into()))?;
                writeln!(out, "Added {}: {}", dish.name(), dish.id())?;
            }
            Command::Edit { id, dish } => {
                let edit = EditDish {
                    id,
                    draft: dish.into(),
                };
                match self.card.menu_mut().execute(edit)? {
                    Some(dish) => writeln!(out, "Updated {}: {}", dish.name(), id)?,
                    None => writeln!(out, "No dish {}", id)?,
                }
            }
            Command::Remove { id } => match self.card.menu_mut().execute(RemoveDish(id))? {
                Some(dish) => writeln!(out, "Removed {}", dish.name())?,
                None => writeln!(out, "No dish {}", id)?,
            },
            Command::Show { id } => match self.card.menu().query(ShowDish(id))? {
                Some(dish) if self.json => self.write_json(out, &dish)?,
                Some(dish) => layout.write_details(out, &dish)?,
                None => writeln!(out, "No dish {}", id)?,
            },
            Command::List => {
                let dishes = self.card.menu().query(ShowMenu)?;
                if self.json {
                    self.write_json(out, &dishes)?;
                } else {
                    layout.write_menu(out, &dishes)?;
                }
            }
            Command::Filter { selector } => {
                let dishes = self.card.menu().query(FilterMenu(selector))?;
                if self.json {
                    self.write_json(out, &dishes)?;
                } else {
                    layout.write_filtered(out, selector, &dishes)?;
                }
            }
            Command::Count => {
                let count = self.card.menu().query(CountDishes)?;
                writeln!(out, "{}", layout.total(count))?;
                if count == 0 {
                    writeln!(out, "{}", EMPTY_MENU)?;
                }
            }
            Command::Categories => layout.write_categories(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn write_json<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, value).context("write json")?;
        writeln!(out)?;
        Ok(())
    }
}
