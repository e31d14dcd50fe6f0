use clap::Parser;
use ideogram::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{genomes, tracks},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Tracks(_) => "tracks",
        Command::Genomes(_) => "genomes",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Tracks(args) => tracks::tracks(args)?,
        Command::Genomes(args) => genomes::genomes(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
