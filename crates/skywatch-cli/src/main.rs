//! Skywatch CLI — terminal weather lookup with search history and a watchlist

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skywatch::config::{files, weather::API_KEY_ENV};
use skywatch::data::{self, HistoryService, Settings, WatchlistService};
use skywatch::weather::{
    alerts, condition_emoji, CurrentWeather, Forecast, OpenWeatherProvider, Units,
    WeatherProvider,
};

#[derive(Parser)]
#[command(name = "skywatch", about = "Weather lookup with search history and a city watchlist", version)]
struct Cli {
    /// Directory holding history, watchlist and settings files
    #[arg(long, global = true, env = "SKYWATCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Unit system for this invocation (overrides saved settings)
    #[arg(long, global = true)]
    units: Option<Units>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current weather for a city and record it in the history
    Weather {
        /// City name
        city: String,

        /// Also show the 5-day forecast
        #[arg(long)]
        forecast: bool,

        /// OpenWeatherMap API key
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Show or clear recent searches
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Manage watched cities
    Watch {
        #[command(subcommand)]
        action: WatchAction,
    },

    /// Show or set the saved unit system
    Units {
        /// metric or imperial
        value: Option<Units>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List recent searches, most recent first
    List,
    /// Forget all searches
    Clear,
}

#[derive(Subcommand)]
enum WatchAction {
    /// Start watching a city
    Add { city: String },
    /// Stop watching a city
    Remove { city: String },
    /// Check whether a city is watched
    Has { city: String },
    /// List watched cities
    List,
    /// Stop watching every city
    Clear,
    /// Current weather for every watched city
    Compare {
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: Option<String>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Locations of the data files for this invocation
struct Paths {
    history: PathBuf,
    watchlist: PathBuf,
    settings: PathBuf,
}

impl Paths {
    /// Files under `data_dir` if given, else in the default config directory
    fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let path = |name: &str| -> Result<PathBuf> {
            match &data_dir {
                Some(dir) => Ok(dir.join(name)),
                None => Ok(data::data_path(name)?),
            }
        };
        Ok(Self {
            history: path(files::HISTORY)?,
            watchlist: path(files::WATCHLIST)?,
            settings: path(files::SETTINGS)?,
        })
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = Paths::resolve(cli.data_dir)?;
    let mut settings = Settings::load_or_default(&paths.settings);
    let units = cli.units.unwrap_or(settings.units);

    match cli.command {
        Command::Weather {
            city,
            forecast,
            api_key,
        } => {
            let provider = provider(api_key)?;
            let current = provider.current(&city, units)?;

            print!("{}", format_current(&current));
            for alert in alerts(&current) {
                println!("{}", alert.message(units.temperature_symbol()));
            }

            let mut history = HistoryService::load_from(&paths.history);
            history.add_city(&current.city);
            settings.set_last_city(&current.city);
            if let Err(e) = settings.save_to(&paths.settings) {
                tracing::warn!(error = %e, "failed to save settings");
            }

            if forecast {
                match provider.forecast(&city, units) {
                    Ok(f) => print!("{}", format_forecast(&f)),
                    Err(e) => eprintln!("Could not load forecast: {e}"),
                }
            }
        }

        Command::History { action } => {
            let mut history = HistoryService::load_from(&paths.history);
            match action.unwrap_or(HistoryAction::List) {
                HistoryAction::List => {
                    if history.is_empty() {
                        println!("No recent searches.");
                    }
                    for (i, city) in history.history().iter().enumerate() {
                        println!("{:>2}. {city}", i + 1);
                    }
                }
                HistoryAction::Clear => {
                    history.clear_history();
                    println!("Search history cleared");
                }
            }
        }

        Command::Watch { action } => {
            let mut watchlist = WatchlistService::load_from(&paths.watchlist);
            run_watch(action, &mut watchlist, units)?;
        }

        Command::Units { value } => match value {
            Some(units) => {
                settings.units = units;
                settings
                    .save_to(&paths.settings)
                    .context("saving settings")?;
                println!("Units set to {units}");
            }
            None => println!("{}", settings.units),
        },
    }

    Ok(())
}

fn run_watch(action: WatchAction, watchlist: &mut WatchlistService, units: Units) -> Result<()> {
    match action {
        WatchAction::Add { city } => {
            let name = display_name(&city)?;
            if watchlist.add_city(&city) {
                println!("{name} added to watchlist");
            } else {
                println!("{name} is already in your watchlist.");
            }
        }
        WatchAction::Remove { city } => {
            let name = display_name(&city)?;
            if watchlist.remove_city(&city) {
                println!("{name} removed from watchlist");
            } else {
                println!("{name} is not in your watchlist.");
            }
        }
        WatchAction::Has { city } => {
            let watched = watchlist.city_exists(&city);
            println!("{}", if watched { "yes" } else { "no" });
        }
        WatchAction::List => {
            if watchlist.is_empty() {
                println!("Your watchlist is empty.");
            }
            for city in watchlist.watchlist() {
                println!("{city}");
            }
        }
        WatchAction::Clear => {
            watchlist.clear_watchlist();
            println!("Watchlist cleared");
        }
        WatchAction::Compare { api_key } => {
            if watchlist.is_empty() {
                println!("Your watchlist is empty.");
                return Ok(());
            }
            let provider = provider(api_key)?;
            let results = fetch_all(&provider, watchlist.watchlist(), units);
            for (city, result) in watchlist.watchlist().iter().zip(results) {
                match result {
                    Ok(w) => println!("{}", format_compare_row(&w)),
                    Err(e) => println!("{city}: {e}"),
                }
            }
        }
    }
    Ok(())
}

/// Current weather for every city at once, one thread per city
///
/// Results come back in the same order as `cities`.
fn fetch_all(
    provider: &dyn WeatherProvider,
    cities: &[String],
    units: Units,
) -> Vec<skywatch::Result<CurrentWeather>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = cities
            .iter()
            .map(|city| scope.spawn(move || provider.current(city, units)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

fn provider(api_key: Option<String>) -> Result<OpenWeatherProvider> {
    let provider = match api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => OpenWeatherProvider::new(key.trim())?,
        None => OpenWeatherProvider::from_env()?,
    };
    Ok(provider)
}

fn display_name(city: &str) -> Result<String> {
    data::normalize_city(city).context("Enter a city name")
}

// =============================================================================
// Formatting
// =============================================================================

fn num(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v:.1}"))
}

fn int<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "--".to_string(), |v| v.to_string())
}

fn format_current(w: &CurrentWeather) -> String {
    let t = w.units.temperature_symbol();
    let place = if w.country.is_empty() {
        w.city.clone()
    } else {
        format!("{}, {}", w.city, w.country)
    };
    let visibility = w
        .visibility
        .map_or_else(|| "--".to_string(), |m| format!("{:.1} km", f64::from(m) / 1000.0));
    let clock = |ts: Option<chrono::DateTime<chrono::Utc>>| {
        ts.map_or_else(|| "--".to_string(), |t| local_clock(&t))
    };

    let mut out = String::new();
    out.push_str(&format!("{} {place}\n", condition_emoji(&w.description)));
    out.push_str(&format!("📍 {}, {}\n", num(w.latitude), num(w.longitude)));
    out.push_str(&format!("{}\n", w.description));
    out.push_str(&format!(
        "{}{t} (feels like {}{t})  ↓{}° ↑{}°\n",
        num(w.temperature),
        num(w.feels_like),
        num(w.temp_min),
        num(w.temp_max)
    ));
    out.push_str(&format!(
        "Humidity {}%  Pressure {} hPa  Wind {} {} {}°\n",
        int(w.humidity),
        int(w.pressure),
        num(w.wind_speed),
        w.units.speed_unit(),
        int(w.wind_deg)
    ));
    out.push_str(&format!(
        "Clouds {}%  Visibility {visibility}\n",
        int(w.clouds)
    ));
    out.push_str(&format!(
        "Sunrise {}  Sunset {}\n",
        clock(w.sunrise),
        clock(w.sunset)
    ));
    out
}

/// Hours and minutes in the machine's local time zone
fn local_clock(t: &chrono::DateTime<chrono::Utc>) -> String {
    t.with_timezone(&chrono::Local).format("%H:%M").to_string()
}

fn format_forecast(f: &Forecast) -> String {
    let t = f.units.temperature_symbol();
    let mut out = format!("5-Day Forecast for {}\n", f.city);
    for day in f.daily() {
        out.push_str(&format!(
            "  {}  {} {:>6}{t}  ↓{}° ↑{}°  {}\n",
            day.day_label(),
            condition_emoji(&day.description),
            num(day.temperature),
            num(day.temp_min),
            num(day.temp_max),
            day.description
        ));
    }
    out
}

fn format_compare_row(w: &CurrentWeather) -> String {
    format!(
        "{} {}: {}{} {}",
        condition_emoji(&w.description),
        w.city,
        num(w.temperature),
        w.units.temperature_symbol(),
        w.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use clap::CommandFactory;
    use skywatch::weather::ForecastEntry;
    use skywatch::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;

    fn sample_weather() -> CurrentWeather {
        CurrentWeather {
            city: "London".to_string(),
            country: "GB".to_string(),
            latitude: Some(51.5085),
            longitude: Some(-0.1257),
            temperature: Some(12.34),
            feels_like: Some(11.0),
            temp_min: Some(10.0),
            temp_max: None,
            humidity: Some(81),
            pressure: Some(1012),
            description: "Light rain".to_string(),
            icon: "10d".to_string(),
            wind_speed: Some(4.6),
            wind_deg: Some(240),
            clouds: Some(75),
            visibility: Some(10_000),
            sunrise: chrono::Utc.timestamp_opt(1_709_276_400, 0).single(),
            sunset: None,
            units: Units::Metric,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_watch_add() {
        let cli = Cli::try_parse_from(["skywatch", "watch", "add", "new york"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Watch { action: WatchAction::Add { ref city } } if city == "new york"
        ));
    }

    #[test]
    fn test_parse_global_units() {
        let cli = Cli::try_parse_from(["skywatch", "history", "--units", "imperial"]).unwrap();
        assert_eq!(cli.units, Some(Units::Imperial));
        assert!(matches!(cli.command, Command::History { action: None }));
    }

    #[test]
    fn test_parse_rejects_unknown_units() {
        assert!(Cli::try_parse_from(["skywatch", "units", "kelvin"]).is_err());
    }

    #[test]
    fn test_format_current() {
        let out = format_current(&sample_weather());
        assert!(out.starts_with("🌧️ London, GB\n"));
        assert!(out.contains("12.3°C (feels like 11.0°C)  ↓10.0° ↑--°"));
        assert!(out.contains("Wind 4.6 m/s 240°"));
        assert!(out.contains("Visibility 10.0 km"));
        assert!(out.contains("Sunset --"));
    }

    #[test]
    fn test_sun_times_use_local_zone() {
        let weather = sample_weather();
        let sunrise = weather.sunrise.unwrap();
        let expected = sunrise.with_timezone(&chrono::Local).format("%H:%M").to_string();

        let out = format_current(&weather);

        assert!(out.contains(&format!("Sunrise {expected}  Sunset --\n")), "{out}");
        assert!(!out.contains("UTC"));
    }

    #[test]
    fn test_format_forecast_one_line_per_day() {
        let entry = |ts: i64| ForecastEntry {
            time: chrono::Utc.timestamp_opt(ts, 0).unwrap(),
            temperature: Some(3.0),
            temp_min: Some(1.0),
            temp_max: Some(4.0),
            description: "Snow".to_string(),
            icon: "13d".to_string(),
        };
        let forecast = Forecast {
            city: "Oslo".to_string(),
            entries: vec![entry(1_709_251_200), entry(1_709_262_000), entry(1_709_337_600)],
            units: Units::Imperial,
        };

        let out = format_forecast(&forecast);
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("Fri, Mar 01"));
        assert!(out.contains("°F"));
    }

    #[test]
    fn test_format_compare_row() {
        assert_eq!(format_compare_row(&sample_weather()), "🌧️ London: 12.3°C Light rain");
    }

    /// Fails for one city, sleeps briefly, and tracks how many calls overlap
    struct SlowProvider {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl WeatherProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn current(&self, city: &str, units: Units) -> skywatch::Result<CurrentWeather> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(100));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if city == "Atlantis" {
                return Err(AppError::CityNotFound(city.to_string()));
            }
            Ok(CurrentWeather {
                city: city.to_string(),
                units,
                ..sample_weather()
            })
        }

        fn forecast(&self, city: &str, _units: Units) -> skywatch::Result<Forecast> {
            Err(AppError::CityNotFound(city.to_string()))
        }
    }

    #[test]
    fn test_fetch_all_runs_cities_concurrently_in_order() {
        let provider = SlowProvider {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        };
        let cities: Vec<String> = ["Oslo", "Atlantis", "Lima", "Baku"]
            .iter()
            .map(|c| c.to_string())
            .collect();

        let results = fetch_all(&provider, &cities, Units::Imperial);

        assert_eq!(results.len(), cities.len());
        assert_eq!(results[0].as_ref().unwrap().city, "Oslo");
        assert!(matches!(results[1], Err(AppError::CityNotFound(_))));
        assert_eq!(results[2].as_ref().unwrap().city, "Lima");
        assert_eq!(results[3].as_ref().unwrap().units, Units::Imperial);
        assert!(provider.peak.load(Ordering::SeqCst) > 1);
    }

    #[test]
    fn test_paths_follow_data_dir() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::resolve(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(paths.history, dir.path().join(files::HISTORY));
        assert_eq!(paths.watchlist, dir.path().join(files::WATCHLIST));
        assert_eq!(paths.settings, dir.path().join(files::SETTINGS));
    }

    #[test]
    fn test_default_paths_share_config_dir() {
        // No config dir on some CI sandboxes
        let Ok(paths) = Paths::resolve(None) else {
            return;
        };
        let dir = data::config_dir().unwrap();

        assert_eq!(paths.history, dir.join(files::HISTORY));
        assert_eq!(paths.watchlist, dir.join(files::WATCHLIST));
        assert_eq!(paths.settings, dir.join(files::SETTINGS));
    }

    #[test]
    fn test_watch_commands_update_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(files::WATCHLIST);
        let mut watchlist = WatchlistService::load_from(&path);

        run_watch(WatchAction::Add { city: "paris".into() }, &mut watchlist, Units::Metric).unwrap();
        run_watch(WatchAction::Add { city: "PARIS".into() }, &mut watchlist, Units::Metric).unwrap();
        run_watch(WatchAction::Remove { city: "rome".into() }, &mut watchlist, Units::Metric).unwrap();

        assert_eq!(WatchlistService::load_from(&path).watchlist(), ["Paris"]);
    }

    #[test]
    fn test_watch_add_blank_is_error() {
        let dir = TempDir::new().unwrap();
        let mut watchlist = WatchlistService::load_from(dir.path().join(files::WATCHLIST));

        let result = run_watch(WatchAction::Add { city: "  ".into() }, &mut watchlist, Units::Metric);
        assert!(result.is_err());
        assert!(watchlist.is_empty());
    }

    #[test]
    fn test_compare_empty_watchlist_needs_no_key() {
        let dir = TempDir::new().unwrap();
        let mut watchlist = WatchlistService::load_from(dir.path().join(files::WATCHLIST));

        let result = run_watch(WatchAction::Compare { api_key: None }, &mut watchlist, Units::Metric);
        assert!(result.is_ok());
    }

    #[test]
    fn test_units_command_persists() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "skywatch",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "units",
            "imperial",
        ])
        .unwrap();

        run(cli).unwrap();

        let settings = Settings::load_from(&dir.path().join(files::SETTINGS)).unwrap();
        assert_eq!(settings.units, Units::Imperial);
    }

    #[test]
    fn test_history_clear_command() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(files::HISTORY);
        HistoryService::load_from(&path).add_city("Lima");

        let cli = Cli::try_parse_from([
            "skywatch",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "history",
            "clear",
        ])
        .unwrap();
        run(cli).unwrap();

        assert!(HistoryService::load_from(&path).is_empty());
    }
}
