pub mod init;
pub mod list;
pub mod report;
pub mod shell;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use gradebook_core::parser;
use gradebook_core::Registry;

/// Build a registry from a roster file or a directory of roster files.
///
/// With no path the registry starts empty.
pub fn load_registry(roster: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::new();
    let Some(path) = roster else {
        return Ok(registry);
    };

    let rosters = if path.is_dir() {
        parser::load_roster_directory(path)?
    } else {
        vec![parser::parse_roster(path)?]
    };

    for roster in &rosters {
        roster
            .apply(&mut registry)
            .with_context(|| format!("failed to load roster {}", path.display()))?;
    }
    tracing::info!(
        users = registry.users().count(),
        courses = registry.list_courses().len(),
        "loaded roster {}",
        path.display()
    );

    Ok(registry)
}
