//! Command line interface of the light provider program.

use clap::{Args, Parser, Subcommand};

/// Fetch signed headers and validator sets from a tendermint full node.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct ProviderCli {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "config.json")]
    pub config: String,
    /// The query to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The queries supported by the program.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the signed header at a height
    SignedHeader(HeightArgs),
    /// Print the validator set at a height
    ValidatorSet(HeightArgs),
}

/// Arguments shared by every query.
#[derive(Clone, Debug, Args)]
pub struct HeightArgs {
    /// The block height, 0 for the latest
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub height: i64,
}
