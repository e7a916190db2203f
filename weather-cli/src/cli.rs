use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{App, Config, IconResolver, RequestStatus, View, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather by city name")]
pub struct Cli {
    /// OpenWeather API key; overrides the one in the config file.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city in the config file.
    Configure,

    /// Show current weather for one city and exit.
    Show {
        /// City name, sent to the provider as typed.
        city: String,
    },

    /// Search the default city, then prompt for more (the default command).
    Interactive {
        /// City searched on start instead of the configured default.
        #[arg(long)]
        city: Option<String>,
    },
}

const QUIT: &str = ":q";

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let command = self.command.unwrap_or(Command::Interactive { city: None });

        match command {
            Command::Configure => configure(Config::load()?),
            Command::Show { city } => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                show(&config, city).await
            }
            Command::Interactive { city } => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                interactive(&config, city).await
            }
        }
    }
}

fn build_app(config: &Config, initial_query: String) -> anyhow::Result<App> {
    let provider = provider_from_config(config)?;
    Ok(App::new(provider, IconResolver::default(), initial_query))
}

fn configure(mut config: Config) -> anyhow::Result<ExitCode> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_string());
    config.default_city = default_city;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(ExitCode::SUCCESS)
}

async fn show(config: &Config, city: String) -> anyhow::Result<ExitCode> {
    let mut app = build_app(config, city)?;
    let status = app.search().await;
    println!("{}", View::from_status(status));

    Ok(match status {
        RequestStatus::Success(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

async fn interactive(config: &Config, city: Option<String>) -> anyhow::Result<ExitCode> {
    let initial = city.unwrap_or_else(|| config.default_city.clone());
    let mut app = build_app(config, initial)?;

    // initial load
    search_and_render(&mut app).await;

    loop {
        let input = Text::new("City:")
            .with_initial_value(app.query())
            .with_help_message("Enter to search, :q or Esc to quit")
            .prompt();

        let text = match input {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        if text.trim() == QUIT {
            break;
        }

        app.set_query(text);
        search_and_render(&mut app).await;
    }

    Ok(ExitCode::SUCCESS)
}

async fn search_and_render(app: &mut App) {
    println!("{}", View::Loading);
    let status = app.search().await;
    println!("{}\n", View::from_status(status));
}
