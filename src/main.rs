use clap::Parser;
use tracing::{error, info};

use stratagem::adapter::inbound::cli::command::{Cli, ColorChoice};
use stratagem::adapter::inbound::cli::output::{self, OutputConfig};
use stratagem::adapter::inbound::cli::{diagnostic, dispatch};
use stratagem::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    output::set_color(match cli.color {
        ColorChoice::Auto => None,
        ColorChoice::Always => Some(true),
        ColorChoice::Never => Some(false),
    });

    // A broken config is reported by the command itself.
    let mut logging = Config::load_or_default(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_default();
    logging.apply_verbosity(cli.verbose, cli.quiet);
    logging.init();
    info!(version = env!("CARGO_PKG_VERSION"), "stratagem starting");

    let code = match dispatch(&cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "Command failed");
            if output::is_json() {
                output::error(&err.to_string());
            } else {
                eprintln!("{:?}", diagnostic::report(err, &cli.config));
            }
            1
        }
    };

    std::process::exit(code);
}
