//! Guarded with `#[cfg(test)]` from `lib.rs`

use anyhow::Result;
use maplit::hashset;

use crate::config::Config;
use crate::menu::{
    AddDish, Category, CountDishes, DishDraft, FilterMenu, RemoveDish, Selector, ShowMenu,
    ValidationError,
};
use crate::services::{Commandable, Queryable};
use crate::MenuCard;
use infra::documents::HasMeta;

fn init_logging() {
    env_logger::try_init().unwrap_or_default();
}

#[test]
fn salmon_scenario_as_transaction_script() -> Result<()> {
    init_logging();
    let mut card = MenuCard::new(&Config::default())?;
    let menu = card.menu_mut();

    let salmon = menu.execute(AddDish(DishDraft::new("Grilled Salmon", "", "Mains", 185.00)))?;
    assert_eq!(menu.query(CountDishes)?, 1);

    let err = menu
        .execute(AddDish(DishDraft::new("Bad Item", "", "Mains", -5)))
        .expect_err("negative price");
    assert_eq!(
        err.downcast_ref::<ValidationError>().map(|e| e.reason()),
        Some("invalid_price")
    );
    assert_eq!(menu.query(CountDishes)?, 1);

    let starters = menu.query(FilterMenu(Selector::Only(Category::Starters)))?;
    assert!(starters.is_empty());
    let mains = menu.query(FilterMenu(Selector::Only(Category::Mains)))?;
    assert_eq!(mains, vec![salmon.clone()]);

    menu.execute(RemoveDish(salmon.id()))?;
    assert_eq!(menu.query(CountDishes)?, 0);
    Ok(())
}

#[test]
fn seeded_menu_lists_newest_first() -> Result<()> {
    init_logging();
    let config = Config::from_toml(
        r#"
        [[menu.seed]]
        name = "Bruschetta"
        category = "Starters"
        price = "65"

        [[menu.seed]]
        name = "Rooibos"
        description = "Iced"
        category = "Drinks"
        price = "25.50"
        "#,
    )?;

    let card = MenuCard::new(&config)?;
    let names = card
        .menu()
        .query(ShowMenu)?
        .iter()
        .map(|d| d.name().to_string())
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["Rooibos", "Bruschetta"]);
    Ok(())
}

#[test]
fn invalid_seed_refuses_to_start() {
    init_logging();
    let config = Config::from_toml(
        r#"
        [[menu.seed]]
        name = "Mystery"
        category = "Snacks"
        price = "10"
        "#,
    )
    .expect("parse");

    let err = MenuCard::new(&config).expect_err("invalid seed");

    assert!(
        format!("{:#}", err).contains("Mystery"),
        "error should name the seed: {:#}",
        err
    );
}

#[test]
fn every_category_partition_covers_the_menu() -> Result<()> {
    init_logging();
    let mut card = MenuCard::new(&Config::default())?;
    let menu = card.menu_mut();
    for (name, category) in &[
        ("Soup", "Starters"),
        ("Stew", "Mains"),
        ("Tart", "Dessert"),
        ("Tea", "Drinks"),
        ("Salad", "Starters"),
    ] {
        menu.execute(AddDish(DishDraft::new(name, "", category, 10)))?;
    }

    let mut seen = hashset! {};
    for category in Category::ALL.iter() {
        for dish in menu.query(FilterMenu((*category).into()))? {
            assert_eq!(dish.category(), *category);
            assert!(seen.insert(dish.id()), "{:?} listed twice", dish);
        }
    }

    let all = menu
        .query(ShowMenu)?
        .iter()
        .map(|d| d.id())
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(seen, all);
    Ok(())
}
