//! CLI entrypoint for medichat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::Result;
use clap::Parser;
use medichat_application::{ChatConfig, InitSessionUseCase};
use medichat_infrastructure::{ConfigLoader, FileConfig, GeminiGateway};
use medichat_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputConfig, StreamingRenderer};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting medichat");

    let config_path = cli.config.as_deref();

    if cli.show_config {
        print_config_sources(&cli)?;
        return Ok(ExitCode::SUCCESS);
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(config_path)?
    };
    file_config.validate()?;

    let output = OutputConfig {
        color: file_config.output.color && !cli.no_color,
        show_typing: file_config.output.show_typing && !cli.no_typing,
    };
    if !output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiGateway::from_config(&file_config.provider)?);
    let chat_config = ChatConfig::default();

    println!("{}", ConsoleFormatter::banner(&chat_config.model));
    println!();

    let renderer = StreamingRenderer::new(output);
    let controller = match InitSessionUseCase::new(gateway)
        .with_config(chat_config)
        .execute(&renderer)
        .await
    {
        Ok(controller) => controller,
        Err(e) => {
            renderer.abandon();
            error!("Initialization failed: {:?}", e);
            eprintln!("{}", ConsoleFormatter::init_error(&e.to_string()));
            return Ok(ExitCode::FAILURE);
        }
    };

    ChatRepl::new(controller, renderer).run().await?;

    Ok(ExitCode::SUCCESS)
}

fn print_config_sources(cli: &Cli) -> Result<()> {
    if cli.no_config {
        println!("Configuration files disabled by --no-config");
    } else {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
    }
    println!();

    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    let credential = if config.provider.resolve_api_key().is_some() {
        "found"
    } else {
        "missing"
    };
    println!("API key (${}): {}", config.provider.api_key_env, credential);
    Ok(())
}
