pub mod check;
pub mod completions;
pub mod convert;
pub mod dump;

use clap::{Parser, Subcommand};

/// def2fgd - QUAKED entity definitions to FGD converter
#[derive(Parser, Debug)]
#[command(name = "def2fgd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert definition files under a directory to FGD
    Convert(convert::ConvertArgs),

    /// Validate definition files without writing anything
    Check(check::CheckArgs),

    /// Print the parsed entities of a definition file as JSON
    Dump(dump::DumpArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
