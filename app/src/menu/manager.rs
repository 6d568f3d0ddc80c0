use log::*;
use serde::{Deserialize, Serialize};

use infra::documents::HasMeta;
use infra::ids::{Id, IdGen};

use super::filter::{self, Selector};
use super::models::{Dish, DishDraft, ValidationError};

/// Where newly added dishes land in the list.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InsertionOrder {
    /// Prepend; the most recently added dish is listed first.
    NewestFirst,
    /// Append; the most recently added dish is listed last.
    NewestLast,
}

/// The authoritative, ordered collection of dishes.
///
/// `add`, `update` and `remove` are the only mutators. Each either applies
/// completely or leaves the list untouched.
#[derive(Debug)]
pub struct Menu {
    idgen: IdGen,
    order: InsertionOrder,
    dishes: Vec<Dish>,
}

impl Default for InsertionOrder {
    fn default() -> Self {
        InsertionOrder::NewestFirst
    }
}

impl Menu {
    pub fn new(order: InsertionOrder) -> Self {
        Menu {
            idgen: IdGen::new(),
            order,
            dishes: Vec::new(),
        }
    }

    pub fn order(&self) -> InsertionOrder {
        self.order
    }

    pub fn add(&mut self, draft: &DishDraft) -> Result<Dish, ValidationError> {
        let checked = draft.check().map_err(|e| {
            warn!("Rejected dish {:?}: {}", draft.name, e);
            e
        })?;
        let id = self.idgen.generate();
        debug_assert!(self.get(id).is_none(), "Duplicate dish id {}", id);
        let dish = Dish::new(id, checked);

        match self.order {
            InsertionOrder::NewestFirst => self.dishes.insert(0, dish.clone()),
            InsertionOrder::NewestLast => self.dishes.push(dish.clone()),
        }
        debug!("Added {} ({:?}); now {} dishes", id, dish.name(), self.count());
        Ok(dish)
    }

    /// Replaces the details of an existing dish, keeping its id and place in
    /// the list. Yields `None` when no such dish exists.
    pub fn update(
        &mut self,
        id: Id<Dish>,
        draft: &DishDraft,
    ) -> Result<Option<Dish>, ValidationError> {
        let checked = draft.check().map_err(|e| {
            warn!("Rejected edit of {}: {}", id, e);
            e
        })?;
        let res = self.dishes.iter_mut().find(|d| d.id() == id).map(|dish| {
            dish.replace(checked);
            dish.clone()
        });
        debug!("Update {} -> {:?}", id, res);
        Ok(res)
    }

    /// Removing an unknown id does nothing.
    pub fn remove(&mut self, id: Id<Dish>) -> Option<Dish> {
        let res = self
            .dishes
            .iter()
            .position(|d| d.id() == id)
            .map(|idx| self.dishes.remove(idx));
        debug!("Remove {} -> {:?}; now {} dishes", id, res, self.count());
        res
    }

    pub fn get(&self, id: Id<Dish>) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id() == id)
    }

    pub fn list(&self) -> &[Dish] {
        trace!("list: {} dishes", self.dishes.len());
        &self.dishes
    }

    pub fn count(&self) -> usize {
        self.dishes.len()
    }

    pub fn filtered(&self, selector: Selector) -> Vec<&Dish> {
        let res = filter::filter(&self.dishes, selector);
        trace!("filter {}: {} of {} dishes", selector, res.len(), self.count());
        res
    }
}

impl Default for Menu {
    fn default() -> Self {
        Menu::new(InsertionOrder::default())
    }
}
