pub mod assemble;
pub mod parents;
pub mod summary;

use std::path::Path;

use anyhow::{Result, bail};
use pangan::{Dataset, LinkConfig, Sources};

use crate::cli::{Cli, SourceArgs};

/// Configuration from `--config`, with `--cutoff` applied on top.
pub fn load_config(cli: &Cli) -> Result<LinkConfig> {
    let config = match &cli.config {
        Some(path) => LinkConfig::from_json_file(path)?,
        None => LinkConfig::default(),
    };
    let config = match cli.cutoff {
        Some(cutoff) => config.with_cutoff(cutoff),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

pub fn load_dataset(cli: &Cli, args: &SourceArgs) -> Result<(Dataset, LinkConfig)> {
    let config = load_config(cli)?;
    let dataset = Sources::new(&args.geometry, &args.clusters).assemble(&config)?;
    Ok((dataset, config))
}

/// Refuse to clobber an existing file unless `--force` was given.
pub fn ensure_writable(cli: &Cli, path: &Path) -> Result<()> {
    if path.exists() && !cli.force {
        bail!("[cli] {} already exists, pass --force to overwrite", path.display());
    }
    Ok(())
}
