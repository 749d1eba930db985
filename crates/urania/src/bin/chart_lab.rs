use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;

use urania::{BirthTime, ChartService, Ephemeris};

/// Print a natal chart, and optionally one day's transits, as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,

    /// Local birth time, HH:MM[:SS]. Omit when unknown.
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// East positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// IANA timezone, e.g. Europe/Moscow.
    #[arg(long, default_value = "UTC")]
    tz: String,

    /// Also compute transits for this date (in the same timezone).
    #[arg(long)]
    transit_date: Option<NaiveDate>,

    /// Print only the Sun / Moon / Ascendant summary.
    #[arg(long)]
    summary: bool,

    /// Engine config file (otherwise URANIA_CONFIG or configs/urania.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("invalid time {s:?}: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = urania_config::load_engine_settings(args.config.as_deref())?;
    let ephemeris = Ephemeris::from_settings(&settings).context("Failed to initialise ephemeris")?;
    log::info!(
        "Using {} ephemeris with {} houses",
        ephemeris.backend_name(),
        ephemeris.house_system()
    );
    let service = ChartService::new(ephemeris);
    let birth_time = BirthTime::from(args.time);

    let output = if args.summary {
        let summary = service
            .natal_summary(args.date, birth_time, args.lat, args.lon, &args.tz)
            .await?;
        json!({ "summary": summary })
    } else {
        let natal = service
            .natal_chart(args.date, birth_time, args.lat, args.lon, &args.tz)
            .await?;
        let transits = match args.transit_date {
            Some(date) => Some(service.daily_transits(natal.clone(), date, &args.tz).await?),
            None => None,
        };
        json!({ "natal": natal, "transits": transits })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
