//! Check command implementation - measure log volume against the threshold

use anyhow::Result;
use rotarc_core::Config;

use crate::output::print_size_check;

pub fn execute(config: &Config) -> Result<()> {
    config.validate()?;
    let check = rotarc_engine::check_size(&config.log_dir, config.threshold_mb)?;
    print_size_check(&check);
    Ok(())
}
