//! `boatyard` CLI: browse availability and book boats at hire points.
//!
//! ## Usage
//!
//! ```sh
//! # Write the example hire points to ./boatyard.json
//! boatyard seed
//!
//! # List hire points, their opening hours and fleets
//! boatyard hire-points
//!
//! # Bookable durations
//! boatyard durations
//!
//! # Slot grid for 5 people, 30 minutes, on a given day
//! boatyard slots --hire-point 1 --date 2016-02-01 --people 5 --duration 30
//!
//! # Book it
//! boatyard book --hire-point 1 --name "Morning Party" \
//!     --start "2016-02-01 10:15" --duration 30 --people 5
//!
//! # The day's bookings
//! boatyard bookings --hire-point 1 --date 2016-02-01
//! ```
//!
//! Settings come from `--config`, `./boatyard.toml`, and `BOATYARD_*` environment
//! variables; `--data` overrides the data file.

mod seed;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use hire_engine::format::humanize_minutes;
use hire_engine::{
    Boat, Engine, EngineConfig, HirePoint, HirePointId, InMemoryStore, Snapshot, Store,
};
use tracing::{debug, info};

use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "boatyard", version, about = "Boat hire availability and booking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML); defaults to ./boatyard.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data file holding hire points and reservations (JSON)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the example hire points to the data file
    Seed {
        /// Overwrite an existing data file
        #[arg(long)]
        force: bool,
    },
    /// List hire points with opening hours and fleets
    HirePoints,
    /// List bookable durations
    Durations,
    /// Show the slot grid of a day
    Slots {
        #[arg(long)]
        hire_point: u64,
        /// Day to inspect (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Party size
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        people: u32,
        /// Duration in minutes
        #[arg(long)]
        duration: i64,
        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// Book boats for a party
    Book {
        #[arg(long)]
        hire_point: u64,
        /// Customer name
        #[arg(long)]
        name: String,
        /// Start time ("YYYY-MM-DD HH:MM")
        #[arg(long, value_parser = parse_start)]
        start: NaiveDateTime,
        /// Duration in minutes
        #[arg(long)]
        duration: i64,
        /// Party size
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        people: u32,
    },
    /// List the bookings of a day
    Bookings {
        #[arg(long)]
        hire_point: u64,
        /// Day to list (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let level = settings.log_level.raised_by(cli.verbose);
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = EngineConfig::new(settings.slot_minutes, settings.max_duration_minutes)
        .context("Invalid slot settings")?;
    let data_file = cli.data.unwrap_or(settings.data_file);
    debug!(data_file = %data_file.display(), ?config, "settings loaded");

    match cli.command {
        Commands::Seed { force } => {
            if data_file.exists() && !force {
                anyhow::bail!(
                    "Data file {} already exists (use --force to overwrite)",
                    data_file.display()
                );
            }
            let snapshot = seed::example_snapshot()?;
            save(&data_file, &snapshot)?;
            println!(
                "Wrote {} hire points to {}",
                snapshot.hire_points.len(),
                data_file.display()
            );
        }
        Commands::HirePoints => {
            let engine = open(&data_file, config)?;
            for hire_point in engine.hire_points()? {
                print_hire_point(&hire_point);
            }
        }
        Commands::Durations => {
            for duration in config.duration_choices() {
                let minutes = duration.num_minutes();
                println!("{:>4}  {}", minutes, humanize_minutes(minutes));
            }
        }
        Commands::Slots {
            hire_point,
            date,
            people,
            duration,
            json,
        } => {
            let engine = open(&data_file, config)?;
            let duration = checked_duration(&config, duration)?;
            let hire_point = HirePointId(hire_point);
            let site = engine.store().hire_point(hire_point)?;
            let grid = engine.bookable_grid(hire_point, date, people, duration)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else if grid.is_empty() {
                println!("{} is closed on {}", site.name, date.format("%A %Y-%m-%d"));
            } else {
                println!("{}, {}", site.name, date.format("%A %Y-%m-%d"));
                for slot in &grid {
                    if slot.available {
                        println!("  {}  available  {}", slot.label(), boat_list(&slot.boats));
                    } else {
                        println!("  {}  booked", slot.label());
                    }
                }
            }
        }
        Commands::Book {
            hire_point,
            name,
            start,
            duration,
            people,
        } => {
            let engine = open(&data_file, config)?;
            let duration = checked_duration(&config, duration)?;
            let hire_point = HirePointId(hire_point);

            let reservation = match engine.place_booking(hire_point, &name, start, duration, people) {
                Ok(reservation) => reservation,
                Err(err) if err.is_booking_refusal() => {
                    anyhow::bail!("Booking failed: {}", err)
                }
                Err(err) => return Err(err).context("Booking failed"),
            };

            save(&data_file, &engine.store().snapshot()?)?;
            info!(reservation = %reservation.id, "saved");
            println!(
                "Booked #{} for {} ({} people) {} - {}, boats: {}",
                reservation.id,
                reservation.name,
                reservation.party_size,
                reservation.start.format("%Y-%m-%d %H:%M"),
                reservation.end.format("%H:%M"),
                reservation
                    .boats
                    .iter()
                    .map(|id| format!("#{id}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Commands::Bookings { hire_point, date } => {
            let engine = open(&data_file, config)?;
            let hire_point = HirePointId(hire_point);
            let site = engine.store().hire_point(hire_point)?;
            let bookings = engine.reservations_on(hire_point, date)?;

            if bookings.is_empty() {
                println!("No bookings at {} on {}", site.name, date);
            }
            for booking in bookings {
                let boats: Vec<String> = booking.boats.iter().map(|id| format!("#{id}")).collect();
                println!(
                    "{} - {}  {}  ({} people)  boats: {}",
                    booking.start.format("%H:%M"),
                    booking.end.format("%H:%M"),
                    booking.name,
                    booking.party_size,
                    boats.join(", ")
                );
            }
        }
    }

    Ok(())
}

/// Accept "YYYY-MM-DD HH:MM[:SS]" with a space or a `T` separator.
fn parse_start(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
        .ok_or_else(|| format!("invalid start time '{raw}', expected YYYY-MM-DD HH:MM"))
}

fn checked_duration(config: &EngineConfig, minutes: i64) -> Result<Duration> {
    let duration = Duration::minutes(minutes);
    config
        .validate_duration(duration)
        .with_context(|| format!("Invalid duration: {minutes} minutes"))?;
    Ok(duration)
}

fn open(path: &Path, config: EngineConfig) -> Result<Engine<InMemoryStore>> {
    let json = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read data file: {} (run `boatyard seed` to create one)",
            path.display()
        )
    })?;
    let snapshot = Snapshot::from_json(&json)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
    let store = InMemoryStore::from_snapshot(snapshot)
        .with_context(|| format!("Inconsistent data file: {}", path.display()))?;
    Ok(Engine::with_config(store, config))
}

fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = snapshot.to_json_pretty()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write file: {}", path.display()))
}

fn print_hire_point(hire_point: &HirePoint) {
    const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    println!("{}  {}", hire_point.id, hire_point.name);
    if !hire_point.description.is_empty() {
        println!("    {}", hire_point.description);
    }
    if hire_point.calendar.is_empty() {
        println!("    closed every day");
    }
    for hours in hire_point.calendar.entries() {
        let day = DAYS.get(usize::from(hours.day) - 1).copied().unwrap_or("?");
        println!(
            "    {}  {} - {}",
            day,
            hours.open.format("%H:%M"),
            hours.close.format("%H:%M")
        );
    }
    println!(
        "    {} boats, {} seats: {}",
        hire_point.fleet.len(),
        hire_point.fleet.total_seats(),
        boat_list(hire_point.fleet.boats())
    );
}

fn boat_list(boats: &[Boat]) -> String {
    boats
        .iter()
        .map(|boat| format!("#{} ({} seats)", boat.id, boat.seats))
        .collect::<Vec<_>>()
        .join(", ")
}
