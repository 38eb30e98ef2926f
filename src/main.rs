use clap::Parser;
use miette::Result;
use def2fgd::cli::{Cli, Commands};
use def2fgd::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Convert(args) => {
            def2fgd::cli::convert::run(args, &printer)?;
        }
        Commands::Check(args) => {
            def2fgd::cli::check::run(args, &printer)?;
        }
        Commands::Dump(args) => def2fgd::cli::dump::run(args, &printer)?,
        Commands::Completions(args) => def2fgd::cli::completions::run(args)?,
    }

    Ok(())
}
