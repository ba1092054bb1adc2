use anyhow::Result;

use crate::cli::{Cli, SourceArgs};

pub fn run(cli: &Cli, args: &SourceArgs) -> Result<()> {
    let (dataset, _) = super::load_dataset(cli, args)?;
    for parent in dataset.parents() {
        println!("{}", parent);
    }
    Ok(())
}
