//! Archive command implementation - bundle log files without pruning

use anyhow::Result;
use rotarc_core::Config;

use crate::output::print_rotation;

pub fn execute(config: &Config) -> Result<()> {
    config.validate()?;
    let report = rotarc_engine::rotate(&config.log_dir, &config.archive_dir, &config.pattern)?;
    print_rotation(&report);
    Ok(())
}
