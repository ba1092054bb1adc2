use anyhow::{Result, bail};
use serde_json::json;

use crate::cli::{Cli, SummaryArgs};

pub fn run(cli: &Cli, args: &SummaryArgs) -> Result<()> {
    let (dataset, config) = super::load_dataset(cli, &args.sources)?;

    let view = match &args.parent {
        Some(parent) => {
            let view = dataset.filter_parent(parent);
            if view.is_empty() {
                bail!("[summary] no regions under parent {:?}; run `pangan parents` to list them", parent);
            }
            view
        }
        None => dataset.view(),
    };

    let summary = json!({
        "parent": args.parent,
        "headline": view.headline(&config.indicators),
        "clusters": view.cluster_summary(&config.indicators),
        "distribution": view.distribution(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
