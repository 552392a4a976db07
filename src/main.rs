//! Video Interview CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use video_interview::cli::{
    app::{cli_config, load_merged_config, load_questions, resolve_options},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_interview, EXIT_ERROR, EXIT_USAGE_ERROR,
};
use video_interview::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "video_interview=warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command.take() {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Questions) => {
            let config = load_merged_config(cli_config(&cli)).await;
            return match load_questions(cli.questions.as_deref(), &config).await {
                Ok(questions) => {
                    for (i, question) in questions.iter().enumerate() {
                        presenter.output(&format!("{}. {}", i + 1, question));
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    presenter.error(&e);
                    ExitCode::from(EXIT_USAGE_ERROR)
                }
            };
        }
        None => {}
    }

    // Merge config
    let config = load_merged_config(cli_config(&cli)).await;

    let options = match resolve_options(&config, cli.json) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let questions = match load_questions(cli.questions.as_deref(), &config).await {
        Ok(questions) => questions,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run_interview(options, questions).await
}
