use clap::{CommandFactory, Parser};
use colored::*;
use std::process;

use plutus_export::cli::Args;
use plutus_export::config::{Config, JsonConfig};
use plutus_export::orchestrator::{run, OrchestratorContext};
use plutus_export::ui::display_error;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.config_init {
        match JsonConfig::init() {
            Ok(path) => {
                println!("{}", format!("Wrote example config to {}", path.display()).green());
                return;
            }
            Err(e) => {
                display_error(&e.to_string());
                process::exit(1);
            }
        }
    }

    let Some(command) = args.command.clone() else {
        let _ = Args::command().print_help();
        process::exit(1);
    };

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            display_error(&e.to_string());
            process::exit(1);
        }
    };

    if let Err(e) = run(OrchestratorContext { config, command }).await {
        display_error(&e.to_string());
        process::exit(1);
    }
}
