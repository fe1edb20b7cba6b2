use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("rflp_finder=debug,info")
    } else {
        EnvFilter::new("rflp_finder=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let source = cli.enzyme_source();

    match cli.command {
        cli::Commands::Judge(args) => {
            cli::judge::run(args, source.as_ref(), cli.format, cli.verbose)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, source.as_ref(), cli.format, cli.verbose)?;
        }
        cli::Commands::Transform(args) => {
            cli::transform::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Enzymes(args) => {
            cli::enzymes::run(args, source.as_ref(), cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
