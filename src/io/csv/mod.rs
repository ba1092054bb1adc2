//! Clustering results in, detail tables out.

mod read;
mod write;

pub(crate) use read::{read_cluster_table, read_csv, read_csv_string};
pub(crate) use write::{write_csv, write_csv_string};
