//! DignityDirective CLI entry point

use std::process::ExitCode;

use clap::Parser;

use dignity_directive::cli::{
    app::{load_merged_config, run_wizard, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    WizardOptions,
};
use dignity_directive::domain::config::AppConfig;
use dignity_directive::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        model: cli.model.clone(),
        clipboard: if cli.clipboard { Some(true) } else { None },
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = WizardOptions {
        model: config.model_or_default().to_string(),
        clipboard: config.clipboard_or_default(),
    };

    run_wizard(options).await
}
