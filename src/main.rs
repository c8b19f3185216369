use std::process::ExitCode;

use clap::Parser;

#[macro_use]
extern crate log;

mod commands;
mod image_util;
mod logger;

use commands::SkyboxCommand;

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
struct Cli {
    #[clap(subcommand)]
    command: SkyboxCommand,

    /// Increase log verbosity, can be repeated (-v debug, -vv trace).
    /// RUST_LOG takes precedence when set.
    #[clap(short, long, action = clap::ArgAction::Count, global = true, verbatim_doc_comment)]
    verbose: u8,

    /// Only log warnings and errors.
    #[clap(short, long, action, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    logger::init(logger::level_filter(args.verbose, args.quiet));
    debug!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let res = match args.command {
        SkyboxCommand::Split { args } => commands::split(&args),
        SkyboxCommand::Check { args } => commands::check(&args),
    };

    if let Err(err) = res {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
