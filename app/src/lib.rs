use anyhow::{Context, Result};
use log::*;

pub mod config;
pub mod display;
pub mod menu;
pub mod services;
pub mod shell;
#[cfg(test)]
mod test;

use crate::display::Layout;
use crate::menu::Menu;

/// The application root: owns the one menu and knows how to show it.
#[derive(Debug)]
pub struct MenuCard {
    menu: Menu,
    layout: Layout,
}

impl MenuCard {
    pub fn new(config: &config::Config) -> Result<Self> {
        let mut menu = Menu::new(config.menu.order);
        for seed in config.menu.seed.iter() {
            menu.add(seed)
                .with_context(|| format!("seed dish {:?}", seed.name))?;
        }
        info!(
            "Menu ready: {} dishes, {:?}",
            menu.count(),
            config.menu.order
        );

        let layout = Layout::new(&config.menu.currency);
        Ok(MenuCard { menu, layout })
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut Menu {
        &mut self.menu
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
