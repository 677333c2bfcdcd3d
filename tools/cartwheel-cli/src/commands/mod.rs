//! CLI command implementations.

pub mod cart;
pub mod config;

use cartwheel_commerce::ProductId;
use clap::{Args, Subcommand};

/// Arguments for commands that act on one product.
#[derive(Args)]
pub struct ItemArgs {
    /// Product id.
    pub id: ProductId,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Product id.
    pub id: ProductId,

    /// New quantity (must be at least 1).
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
