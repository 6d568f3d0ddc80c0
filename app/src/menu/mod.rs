mod filter;
mod manager;
mod models;
mod requests;

pub use self::filter::{filter, Selector};
pub use self::manager::{InsertionOrder, Menu};
pub use self::models::{Category, Dish, DishDraft, ValidationError};
pub use self::requests::{AddDish, CountDishes, EditDish, FilterMenu, RemoveDish, ShowDish, ShowMenu};
