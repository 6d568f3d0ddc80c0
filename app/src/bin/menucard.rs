use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::*;
use serde::Deserialize;
use structopt::StructOpt;

use menucard::shell::Shell;
use menucard::MenuCard;

#[derive(Debug, StructOpt)]
#[structopt(name = "menucard", about = "Browse, add and filter menu items.")]
struct Opt {
    /// Configuration file
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,
    /// Print dishes as JSON
    #[structopt(long = "json")]
    json: bool,
    /// File of commands to run; standard input when absent
    #[structopt(parse(from_os_str))]
    script: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
struct Config {
    #[serde(flatten)]
    menucard: menucard::config::Config,
    #[serde(default)]
    env_logger: menucard::config::EnvLogger,
}

fn load_config(path: &Path) -> Result<Config> {
    let mut config_buf = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut config_buf))
        .with_context(|| format!("read {:?}", path))?;
    let config = toml::from_str(&config_buf).with_context(|| format!("parse {:?}", path))?;
    Ok(config)
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let mut config = match opt.config.as_deref() {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    config.env_logger.builder().init();
    debug!("Options: {:?}", opt);
    config.menucard.apply_env()?;

    let mut card = MenuCard::new(&config.menucard)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut shell = Shell::new(&mut card, opt.json);

    match opt.script.as_deref() {
        Some(path) => {
            let script = File::open(path).with_context(|| format!("open {:?}", path))?;
            shell.run(BufReader::new(script), &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            shell.run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
