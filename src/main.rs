//! Voice Notes entry point

use std::process::ExitCode;

use clap::Parser;

use voice_notes::cli::{
    app::{config_from_args, load_merged_config, run_server, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, ServeArgs},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voice_notes::infrastructure::{logging, XdgConfigStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    let serve_args = match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::default(),
    };

    let config = load_merged_config(&store, config_from_args(&serve_args)).await;

    if let Err(e) = config.validate() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_USAGE_ERROR);
    }
    logging::init(config.log_format_or_default());

    run_server(config).await
}
