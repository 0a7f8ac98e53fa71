use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use quickadd::cli::args::{Cli, Commands};
use quickadd::cli::commands;
use quickadd::config::{config_file_for, Config};
use quickadd::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = config_file_for(cli.config.as_deref())?;
    let config = Config::load_from_path(&config_path)?;

    config.general.color.apply();
    logging::init(&config.logging).context("failed to initialise logging")?;

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match &cli.command {
        Commands::Parse(args) => commands::parse(&args.joined(), cli.reference_time()?, format)?,
        Commands::Date(args) => commands::date(&args.joined(), cli.reference_time()?, format)?,
        Commands::Time(args) => commands::time(&args.joined(), format)?,
        Commands::Datetime(args) => {
            commands::datetime(&args.joined(), cli.reference_time()?, format)?
        },
        Commands::Config(args) => commands::config(&args.command, &config, &config_path)?,
        Commands::Completions { shell } => commands::completions(*shell)?,
    };

    let output = output.trim_end();
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
