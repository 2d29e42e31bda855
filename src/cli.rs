use serde::Serialize;
use tokio::runtime::Runtime;

use crate::bdl::BdlClient;
use crate::config::{Config, DEFAULT_RANKING_YEAR};
use crate::data::{fetch_ranking, fetch_time_series, RankingTable, RegionDirectory, TimeSeries};
use crate::error::BdlError;
use crate::server;
use crate::server::forms::TrendRequest;

const USAGE: &str =
    "usage: regional_prices <serve|regions|ranking [year]|trend <region> <from> <to>>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Regions,
    Ranking,
    Trend,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("regions") => Some(Command::Regions),
        Some("ranking") => Some(Command::Ranking),
        Some("trend") => Some(Command::Trend),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return 2;
        }
    };

    match command {
        Command::Serve => handle_serve(config),
        Command::Regions => handle_regions(config),
        Command::Ranking => handle_ranking(config, args),
        Command::Trend => handle_trend(config, args),
    }
}

fn runtime() -> Option<Runtime> {
    match Runtime::new() {
        Ok(runtime) => Some(runtime),
        Err(err) => {
            eprintln!("failed to start async runtime: {err}");
            None
        }
    }
}

fn handle_serve(config: Config) -> i32 {
    let Some(runtime) = runtime() else { return 1 };
    match runtime.block_on(server::run_server(config)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err:#}");
            1
        }
    }
}

fn handle_regions(config: Config) -> i32 {
    let Some(runtime) = runtime() else { return 1 };
    let result = runtime.block_on(load_regions(&config));
    match result {
        Ok(directory) => print_json(&directory.regions()),
        Err(err) => {
            eprintln!("failed to load regions: {err}");
            1
        }
    }
}

fn handle_ranking(config: Config, args: &[String]) -> i32 {
    let year = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_RANKING_YEAR)
        .to_string();
    let Some(runtime) = runtime() else { return 1 };
    let result = runtime.block_on(ranking_for(&config, &year));
    match result {
        Ok(table) => print_json(&table),
        Err(err) => {
            eprintln!("failed to fetch ranking for {year}: {err}");
            1
        }
    }
}

fn handle_trend(config: Config, args: &[String]) -> i32 {
    let (Some(region), Some(from), Some(to)) = (args.get(2), args.get(3), args.get(4)) else {
        eprintln!("usage: regional_prices trend <region> <from> <to>");
        return 2;
    };
    let (Ok(from), Ok(to)) = (from.parse::<i32>(), to.parse::<i32>()) else {
        eprintln!("invalid year range '{from}'..'{to}'");
        return 2;
    };
    let request = TrendRequest {
        region: region.clone(),
        from,
        to,
    };
    let years = match request.years() {
        Ok(years) => years,
        Err(message) => {
            eprintln!("{message}");
            return 2;
        }
    };

    let Some(runtime) = runtime() else { return 1 };
    let result = runtime.block_on(trend_for(&config, &request.region, &years));
    match result {
        Ok(series) => print_json(&series),
        Err(err) => {
            eprintln!("failed to fetch trend for {}: {err}", request.region);
            1
        }
    }
}

async fn load_regions(config: &Config) -> Result<RegionDirectory, BdlError> {
    let client = BdlClient::new(config)?;
    RegionDirectory::load(&client).await
}

async fn ranking_for(config: &Config, year: &str) -> Result<RankingTable, BdlError> {
    let client = BdlClient::new(config)?;
    fetch_ranking(&client, year).await
}

async fn trend_for(
    config: &Config,
    region: &str,
    years: &[String],
) -> Result<TimeSeries, BdlError> {
    let client = BdlClient::new(config)?;
    let directory = RegionDirectory::load(&client).await?;
    fetch_time_series(&client, &directory, region, years).await
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(
            parse_command(&args(&["bin", "serve"])),
            Some(Command::Serve)
        );
        assert_eq!(
            parse_command(&args(&["bin", "trend", "x"])),
            Some(Command::Trend)
        );
        assert_eq!(parse_command(&args(&["bin", "simulate"])), None);
        assert_eq!(parse_command(&args(&["bin"])), None);
    }
}
