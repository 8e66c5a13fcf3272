//! Run command implementation - one full rotation cycle

use anyhow::{bail, Result};
use rotarc_core::Config;

use crate::output::{print_error, print_prune, print_rotation, print_size_check};

pub fn execute(config: &Config) -> Result<()> {
    let report = rotarc_engine::run(config)?;

    match &report.rotation {
        Ok(rotation) => print_rotation(rotation),
        Err(e) => print_error(&e.to_string()),
    }
    match &report.size {
        Ok(check) => print_size_check(check),
        Err(e) => print_error(&e.to_string()),
    }
    match &report.prune {
        Ok(prune) => print_prune(prune),
        Err(e) => print_error(&e.to_string()),
    }

    if !report.is_success() {
        bail!("rotation cycle completed with errors");
    }
    Ok(())
}
