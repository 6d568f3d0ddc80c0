use anyhow::Result;
use log::*;

use infra::ids::Id;

use super::filter::Selector;
use super::manager::Menu;
use super::models::{Dish, DishDraft};
use crate::services::{Commandable, Queryable, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowMenu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMenu(pub Selector);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowDish(pub Id<Dish>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountDishes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDish(pub DishDraft);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDish {
    pub id: Id<Dish>,
    pub draft: DishDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveDish(pub Id<Dish>);

impl Request for ShowMenu {
    type Resp = Vec<Dish>;
}

impl Request for FilterMenu {
    type Resp = Vec<Dish>;
}

impl Request for ShowDish {
    type Resp = Option<Dish>;
}

impl Request for CountDishes {
    type Resp = usize;
}

impl Request for AddDish {
    type Resp = Dish;
}

impl Request for EditDish {
    type Resp = Option<Dish>;
}

impl Request for RemoveDish {
    type Resp = Option<Dish>;
}

impl Queryable<ShowMenu> for Menu {
    fn query(&self, _: ShowMenu) -> Result<Vec<Dish>> {
        Ok(self.list().to_vec())
    }
}

impl Queryable<FilterMenu> for Menu {
    fn query(&self, FilterMenu(selector): FilterMenu) -> Result<Vec<Dish>> {
        Ok(self.filtered(selector).into_iter().cloned().collect())
    }
}

impl Queryable<ShowDish> for Menu {
    fn query(&self, ShowDish(id): ShowDish) -> Result<Option<Dish>> {
        let res = self.get(id).cloned();
        trace!("Load {} -> {:?}", id, res);
        Ok(res)
    }
}

impl Queryable<CountDishes> for Menu {
    fn query(&self, _: CountDishes) -> Result<usize> {
        Ok(self.count())
    }
}

impl Commandable<AddDish> for Menu {
    fn execute(&mut self, AddDish(draft): AddDish) -> Result<Dish> {
        Ok(self.add(&draft)?)
    }
}

impl Commandable<EditDish> for Menu {
    fn execute(&mut self, EditDish { id, draft }: EditDish) -> Result<Option<Dish>> {
        Ok(self.update(id, &draft)?)
    }
}

impl Commandable<RemoveDish> for Menu {
    fn execute(&mut self, RemoveDish(id): RemoveDish) -> Result<Option<Dish>> {
        Ok(self.remove(id))
    }
}
