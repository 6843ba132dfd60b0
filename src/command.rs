use dexbase::species::Asset;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dexter")]
#[command(about = "Browse the National Pokédex species catalog.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
    /// Retries for failed downloads (overrides the configuration)
    #[arg(long, global = true)]
    pub retries: Option<usize>,
    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    /// Do not read or write the image cache
    #[arg(long, global = true)]
    pub no_cache: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every species, optionally of a single generation
    #[command(alias = "ls")]
    List {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=9))]
        generation: Option<u8>,
    },
    /// Show a species by dex number or slug
    Show { species: String },
    /// Find species whose name contains the query
    #[command(alias = "s")]
    Search { query: String },
    /// Write the whole catalog as JSON or RON
    Export {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Defaults to standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check the catalog for data defects
    Validate,
    /// Download an image of a species
    Fetch {
        species: String,
        #[arg(short, long, default_value = "artwork")]
        asset: Asset,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Download an image of every species, or of one generation, into a directory
    Mirror {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=9))]
        generation: Option<u8>,
        #[arg(short, long, default_value = "sprite")]
        asset: Asset,
        #[arg(short, long)]
        output: PathBuf,
        /// Downloads in flight at once
        #[arg(short, long, default_value_t = 8)]
        concurrency: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Ron,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
