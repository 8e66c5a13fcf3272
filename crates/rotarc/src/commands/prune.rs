//! Prune command implementation - delete archives past the retention window

use anyhow::Result;
use rotarc_core::Config;

use crate::output::print_prune;

pub fn execute(config: &Config) -> Result<()> {
    config.validate()?;
    let report = rotarc_engine::prune(&config.archive_dir, config.retention)?;
    print_prune(&report);
    Ok(())
}
