//! Integration tests for the `boatyard` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the seed, listing,
//! slot and booking subcommands through the actual binary, each against its
//! own data file in the system temp directory.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: a fresh data file path unique to `name`.
fn data_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("boatyard-test-{name}.json"));
    let _ = std::fs::remove_file(&path);
    path
}

/// Helper: `boatyard --data <path> <args...>`.
fn boatyard(data: &PathBuf, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("boatyard").unwrap();
    cmd.env_remove("BOATYARD_DATA_FILE")
        .env_remove("BOATYARD_LOG_LEVEL")
        .arg("--data")
        .arg(data)
        .args(args);
    cmd
}

/// Helper: a data file already holding the example hire points.
fn seeded(name: &str) -> PathBuf {
    let path = data_file(name);
    boatyard(&path, &["seed"]).assert().success();
    path
}

// ─────────────────────────────────────────────────────────────────────────────
// seed
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn seed_writes_three_hire_points() {
    let path = data_file("seed");
    boatyard(&path, &["seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 hire points"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["hire_points"].as_array().unwrap().len(), 3);
    assert_eq!(json["hire_points"][0]["name"], "West Hire Point");
    assert_eq!(json["hire_points"][0]["fleet"].as_array().unwrap().len(), 6);
    assert!(json["reservations"].as_array().unwrap().is_empty());
}

#[test]
fn seed_refuses_to_overwrite_without_force() {
    let path = seeded("seed-force");
    boatyard(&path, &["seed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    boatyard(&path, &["seed", "--force"]).assert().success();
}

// ─────────────────────────────────────────────────────────────────────────────
// hire-points / durations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hire_points_lists_hours_and_fleets() {
    let path = seeded("hire-points");
    boatyard(&path, &["hire-points"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1  West Hire Point"))
        .stdout(predicate::str::contains("Mon  10:00 - 18:00"))
        .stdout(predicate::str::contains("6 boats, 26 seats"))
        .stdout(predicate::str::contains("Weekend Kids Lake"))
        .stdout(predicate::str::contains("East Hire Point"));
}

#[test]
fn durations_lists_quarter_hours_up_to_three_hours() {
    let path = data_file("durations");
    let output = boatyard(&path, &["durations"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    assert_eq!(stdout.lines().count(), 12);
    assert!(stdout.contains("15 minutes"));
    assert!(stdout.contains("1 hour 30 minutes"));
    assert!(stdout.contains("3 hours"));
}

#[test]
fn missing_data_file_suggests_seed() {
    let path = data_file("missing");
    boatyard(&path, &["hire-points"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("boatyard seed"));
}

// ─────────────────────────────────────────────────────────────────────────────
// slots
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_shows_grid_with_boats() {
    let path = seeded("slots");
    boatyard(
        &path,
        &["slots", "--hire-point", "1", "--date", "2016-02-01", "--people", "5", "--duration", "30"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("West Hire Point"))
    .stdout(predicate::str::contains(
        "10:00 AM - 10:30 AM  available  #1 (2 seats), #2 (2 seats), #3 (4 seats)",
    ))
    .stdout(predicate::str::contains("05:30 PM - 06:00 PM"));
}

#[test]
fn slots_json_output() {
    let path = seeded("slots-json");
    let output = boatyard(
        &path,
        &[
            "slots", "--hire-point", "1", "--date", "2016-02-01", "--people", "4", "--duration",
            "30", "--json",
        ],
    )
    .assert()
    .success();

    let grid: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    let grid = grid.as_array().unwrap();
    // 10:00 to 17:30 inclusive.
    assert_eq!(grid.len(), 31);
    assert_eq!(grid[0]["start"], "2016-02-01T10:00:00");
    assert_eq!(grid[0]["available"], true);
    assert_eq!(grid[0]["boats"][0]["seats"], 4);
}

#[test]
fn slots_on_closed_day() {
    let path = seeded("slots-closed");
    boatyard(
        &path,
        &["slots", "--hire-point", "1", "--date", "2016-02-06", "--people", "2", "--duration", "60"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("closed on Saturday"));
}

#[test]
fn slots_rejects_invalid_duration() {
    let path = seeded("slots-duration");
    boatyard(
        &path,
        &["slots", "--hire-point", "1", "--date", "2016-02-01", "--people", "2", "--duration", "20"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn slots_rejects_zero_people() {
    let path = seeded("slots-people");
    boatyard(
        &path,
        &["slots", "--hire-point", "1", "--date", "2016-02-01", "--people", "0", "--duration", "30"],
    )
    .assert()
    .failure();
}

#[test]
fn slots_unknown_hire_point() {
    let path = seeded("slots-unknown");
    boatyard(
        &path,
        &["slots", "--hire-point", "9", "--date", "2016-02-01", "--people", "2", "--duration", "30"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown hire point: 9"));
}

// ─────────────────────────────────────────────────────────────────────────────
// book / bookings
// ─────────────────────────────────────────────────────────────────────────────

fn book(path: &PathBuf, name: &str, start: &str, duration: &str, people: &str) -> Command {
    boatyard(
        path,
        &[
            "book", "--hire-point", "1", "--name", name, "--start", start, "--duration", duration,
            "--people", people,
        ],
    )
}

#[test]
fn booking_is_saved_and_listed() {
    let path = seeded("book");
    book(&path, "Morning Party", "2016-02-01 10:15", "30", "5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Booked #1 for Morning Party (5 people)"))
        .stdout(predicate::str::contains("2016-02-01 10:15 - 10:45"))
        .stdout(predicate::str::contains("boats: #1, #2, #3"));

    boatyard(&path, &["bookings", "--hire-point", "1", "--date", "2016-02-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10:15 - 10:45  Morning Party  (5 people)"));

    boatyard(&path, &["bookings", "--hire-point", "1", "--date", "2016-02-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookings"));
}

#[test]
fn fully_booked_window_refused() {
    let path = seeded("book-full");
    // 26 seats: every boat.
    book(&path, "Everyone", "2016-02-01 12:00", "60", "26")
        .assert()
        .success();
    book(&path, "Late Comer", "2016-02-01 12:30", "30", "1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking failed"))
        .stderr(predicate::str::contains("no boats available"));

    // Adjacent window is still free.
    book(&path, "Next", "2016-02-01 13:00", "30", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Booked #2"));
}

#[test]
fn booking_past_closing_refused() {
    let path = seeded("book-closed");
    book(&path, "Late", "2016-02-01 17:45", "30", "2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Booking failed"))
        .stderr(predicate::str::contains("closed"));

    book(&path, "Just in time", "2016-02-01 17:30", "30", "2")
        .assert()
        .success();
}

#[test]
fn booking_rejects_malformed_start() {
    let path = seeded("book-start");
    book(&path, "Ada", "tomorrow at noon", "30", "2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid start time"));
}
