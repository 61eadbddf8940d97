use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with GA parameters and score weights, applied over the request.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Run(cmd::run::RunArgs),
    Verify(cmd::verify::VerifyArgs),
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.debug);

    let outcome = match cli.command {
        Commands::Run(args) => {
            // Overrides live in the subcommand's matches, not the root.
            let sub_matches = matches.subcommand_matches("run").unwrap_or(&matches);
            cmd::run::run(args, cli.config.as_deref(), sub_matches)
        }
        Commands::Verify(args) => cmd::verify::run(args),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
