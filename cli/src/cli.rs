use std::path::PathBuf;

/// Food-security mapping CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "pangan", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON file with column names and the match cutoff
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Minimum similarity for a fuzzy name match, overrides the config file
    #[arg(long, global = true)]
    pub cutoff: Option<f64>,

    /// Overwrite existing output files
    #[arg(long, global = true)]
    pub force: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Link clusters to boundaries and write the joined dataset
    Assemble(AssembleArgs),

    /// Print headline metrics and per-cluster summaries as JSON
    Summary(SummaryArgs),

    /// List the parent regions (provinces) present in the boundaries
    Parents(SourceArgs),
}

#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Boundary file (.shp, .geojson or .json)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub geometry: PathBuf,

    /// Clustering result (.csv, or .xlsx/.xls/.ods workbook)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub clusters: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct AssembleArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output choropleth GeoJSON
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub geojson: Option<PathBuf>,

    /// Output detail table CSV
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    /// Print the link report as JSON
    #[arg(long)]
    pub report: bool,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Restrict the summary to one parent region
    #[arg(long)]
    pub parent: Option<String>,
}
