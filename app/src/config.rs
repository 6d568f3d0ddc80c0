use std::collections::HashMap;

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};

use crate::menu::{DishDraft, InsertionOrder};

pub const DEFAULT_CURRENCY: &str = "R";
const ENV_PREFIX: &str = "MENUCARD_";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MenuConfig {
    #[serde(default)]
    pub order: InsertionOrder,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Dishes added at start-up, through the usual validation.
    #[serde(default)]
    pub seed: Vec<DishDraft>,
}

/// Settings that may be overridden from `MENUCARD_*` environment variables.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct EnvOverrides {
    order: Option<InsertionOrder>,
    currency: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    modules: HashMap<String, LogLevel>,
    timestamp_nanos: bool,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            order: InsertionOrder::default(),
            currency: default_currency(),
            seed: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml(src: &str) -> Result<Self> {
        let config = toml::from_str(src).context("parse config")?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<()> {
        let overrides = envy::prefixed(ENV_PREFIX)
            .from_env::<EnvOverrides>()
            .context("read environment overrides")?;
        self.apply(overrides);
        Ok(())
    }

    pub fn apply(&mut self, overrides: EnvOverrides) {
        debug!("Apply overrides: {:?}", overrides);
        if let Some(order) = overrides.order {
            self.menu.order = order;
        }
        if let Some(currency) = overrides.currency {
            self.menu.currency = currency;
        }
    }
}

impl LogLevel {
    fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(module, level.to_filter());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        b
    }
}
