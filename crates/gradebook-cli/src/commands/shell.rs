//! The `gradebook shell` command.

use std::io;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::load_config_from;
use crate::menu::Menu;

pub fn execute(roster: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let roster = roster.or(config.roster.clone());
    let registry = super::load_registry(roster.as_deref())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), registry)
        .with_defaults(config.default_weight, config.low_performer_threshold);
    menu.run()
}
