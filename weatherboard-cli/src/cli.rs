use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, Select, Text};
use std::io::IsTerminal;

use weatherboard_core::{
    AppState, BoostTable, Config, Coordinates, Dashboard, FixedLocation, JsonFileStore,
    LocationQuery, OpenWeatherGateway, RecentStore, UnitSystem, gateway_from_config,
};

use crate::render::TerminalSurface;

type TerminalDashboard = Dashboard<OpenWeatherGateway, TerminalSurface, JsonFileStore>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Weather dashboard with outfit tips")]
pub struct Cli {
    /// Show temperatures in Fahrenheit for this run.
    #[arg(long, global = true)]
    pub fahrenheit: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and defaults.
    Configure,

    /// Show weather for a city or a coordinate pair.
    Show {
        /// City name, e.g. "Seoul".
        city: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true, conflicts_with = "city")]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Show weather for the configured home location, or the default city.
    Here {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// List recent searches, or look up the N-th one (1-based).
    Recent { index: Option<usize> },

    /// Search repeatedly; see the prompt for commands.
    Interactive,
}

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplAction {
    Search(LocationQuery),
    ToggleUnits,
    Recent(usize),
    Quit,
    Nothing,
    Invalid(String),
}

impl ReplAction {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        match parts.next() {
            None => ReplAction::Nothing,
            Some(":q") => ReplAction::Quit,
            Some(":u") => ReplAction::ToggleUnits,
            Some(":r") => match parts.next().map(str::parse::<usize>) {
                Some(Ok(n)) if n >= 1 => ReplAction::Recent(n - 1),
                _ => ReplAction::Invalid("usage: :r N".into()),
            },
            Some(":at") => {
                let lat = parts.next().and_then(|v| v.parse::<f64>().ok());
                let lon = parts.next().and_then(|v| v.parse::<f64>().ok());
                match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        ReplAction::Search(LocationQuery::coordinates(lat, lon))
                    }
                    _ => ReplAction::Invalid("usage: :at LAT LON".into()),
                }
            }
            Some(cmd) if cmd.starts_with(':') => {
                ReplAction::Invalid(format!("unknown command {cmd}"))
            }
            Some(_) => LocationQuery::place(input)
                .map(ReplAction::Search)
                .unwrap_or(ReplAction::Nothing),
        }
    }
}

impl Cli {
    /// Returns `false` when the requested weather could not be shown.
    pub async fn run(self) -> Result<bool> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(true)
            }
            Command::Show { city, lat, lon } => {
                let query = match (city, lat, lon) {
                    (_, Some(lat), Some(lon)) => LocationQuery::coordinates(lat, lon),
                    (Some(city), _, _) => LocationQuery::place(&city)
                        .context("City name must not be blank")?,
                    _ => bail!("Provide a city name or --lat/--lon."),
                };

                let mut dash = build_dashboard(self.fahrenheit)?;
                dash.render_recent_cities();
                let found = dash.lookup(query).await;
                dash.surface().print();
                Ok(found)
            }
            Command::Here { lat, lon } => {
                let config = Config::load()?;
                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
                    _ => config.home,
                };

                let mut dash = dashboard_from(&config, self.fahrenheit)?;
                let found = dash.start(&FixedLocation(position)).await;
                dash.surface().print();
                Ok(found)
            }
            Command::Recent { index: None } => {
                let store = JsonFileStore::new(Config::recent_cities_path()?);
                let list = store.load();
                if list.is_empty() {
                    println!("No recent searches yet.");
                }
                for (i, city) in list.iter().enumerate() {
                    println!("{}. {city}", i + 1);
                }
                Ok(true)
            }
            Command::Recent { index: Some(n) } => {
                if n == 0 {
                    bail!("Recent searches are numbered from 1.");
                }
                let mut dash = build_dashboard(self.fahrenheit)?;
                let Some(found) = dash.select_recent(n - 1).await else {
                    bail!("No recent search number {n}. Run `weatherboard recent` to list them.");
                };
                dash.surface().print();
                Ok(found)
            }
            Command::Interactive => {
                let mut dash = build_dashboard(self.fahrenheit)?;
                interactive(&mut dash).await?;
                Ok(true)
            }
        }
    }
}

fn build_dashboard(fahrenheit: bool) -> Result<TerminalDashboard> {
    let config = Config::load()?;
    dashboard_from(&config, fahrenheit)
}

fn dashboard_from(config: &Config, fahrenheit: bool) -> Result<TerminalDashboard> {
    let gateway = gateway_from_config(config)?;
    let store = JsonFileStore::new(Config::recent_cities_path()?);

    let mut state = AppState::from_config(config);
    if fahrenheit {
        state.units = UnitSystem::Fahrenheit;
    }

    let surface = TerminalSurface::new(std::io::stdout().is_terminal());
    Ok(Dashboard::new(gateway, surface, store, state))
}

async fn interactive(dash: &mut TerminalDashboard) -> Result<()> {
    dash.render_recent_cities();
    dash.surface().print();

    loop {
        let line = match Text::new("도시>")
            .with_help_message(":u 단위 전환 · :r N 최근 검색 · :at LAT LON 좌표 · :q 종료")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let action = ReplAction::parse(&line);
        tracing::debug!("Prompt input {line:?} parsed as {action:?}");

        match action {
            ReplAction::Quit => break,
            ReplAction::Nothing => continue,
            ReplAction::Invalid(msg) => {
                eprintln!("{msg}");
                continue;
            }
            ReplAction::ToggleUnits => {
                let units = dash.toggle_units().await;
                println!("단위: {}", units.temperature_suffix());
            }
            ReplAction::Recent(index) => {
                if dash.select_recent(index).await.is_none() {
                    eprintln!("No recent search number {}", index + 1);
                    continue;
                }
            }
            ReplAction::Search(query) => {
                dash.lookup(query).await;
            }
        }

        dash.surface().print();
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("https://home.openweathermap.org/api_keys")
        .prompt()?;
    config.api_key = Some(api_key.trim().to_string());

    let units = Select::new("Default unit:", vec![UnitSystem::Celsius, UnitSystem::Fahrenheit])
        .prompt()?;
    config.units = units;

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let table = Select::new("Boost table:", vec!["wind-aware", "legacy"]).prompt()?;
    config.boost_table = match table {
        "legacy" => BoostTable::Legacy,
        _ => BoostTable::WindAware,
    };

    if Confirm::new("Set a home location for `weatherboard here`?")
        .with_default(config.home.is_some())
        .prompt()?
    {
        let lat = CustomType::<f64>::new("Latitude:").prompt()?;
        let lon = CustomType::<f64>::new("Longitude:").prompt()?;
        config.home = Some(Coordinates::new(lat, lon));
    } else {
        config.home = None;
    }

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}
