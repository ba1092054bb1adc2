use anyhow::Result;
use tracing::info;

use crate::cli::{AssembleArgs, Cli};

pub fn run(cli: &Cli, args: &AssembleArgs) -> Result<()> {
    for path in [&args.geojson, &args.csv].into_iter().flatten() {
        super::ensure_writable(cli, path)?;
    }

    let (dataset, _) = super::load_dataset(cli, &args.sources)?;
    let report = dataset.report();
    info!(
        "[assemble] {} regions: {} exact, {} fuzzy, {} unmatched",
        dataset.len(), report.exact, report.fuzzy, report.unmatched.len()
    );

    if let Some(path) = &args.geojson {
        info!("[assemble] writing GeoJSON to {}", path.display());
        dataset.view().write_geojson(path)?;
    }
    if let Some(path) = &args.csv {
        info!("[assemble] writing detail table to {}", path.display());
        dataset.view().write_csv(path)?;
    }
    if args.report {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    Ok(())
}
