//! Example data set written by `boatyard seed`.

use anyhow::Result;
use chrono::NaiveTime;
use hire_engine::{Boat, BoatId, Calendar, Fleet, HirePoint, HirePointId, OpeningHours, Snapshot};

struct Template {
    name: &'static str,
    description: &'static str,
    days: &'static [u8],
    open: u32,
    close: u32,
    seats: &'static [u32],
}

const TEMPLATES: [Template; 3] = [
    Template {
        name: "West Hire Point",
        description: "Rowing boats and pedalos available to hire.",
        days: &[1, 2, 3, 4, 5],
        open: 10,
        close: 18,
        seats: &[2, 2, 4, 4, 6, 8],
    },
    Template {
        name: "Weekend Kids Lake",
        description: "Rowing boats and pedalos available to hire for kids.",
        days: &[5, 6, 7],
        open: 9,
        close: 23,
        seats: &[2, 4, 4, 4, 8],
    },
    Template {
        name: "East Hire Point",
        description: "Rowing boats and pedalos available to hire.",
        days: &[1, 2, 3, 4, 5, 6, 7],
        open: 11,
        close: 20,
        seats: &[2, 2, 2, 2, 4, 4, 4],
    },
];

/// Three hire points with their opening hours and fleets, and no reservations.
pub fn example_snapshot() -> Result<Snapshot> {
    let mut next_boat = 1;
    let mut hire_points = Vec::new();

    for (index, template) in TEMPLATES.iter().enumerate() {
        let id = HirePointId(index as u64 + 1);
        let calendar = Calendar::new(template.days.iter().map(|&day| OpeningHours {
            day,
            open: hour(template.open),
            close: hour(template.close),
        }))?;
        let fleet: Fleet = template
            .seats
            .iter()
            .map(|&seats| {
                let boat = Boat::new(BoatId(next_boat), id, seats);
                next_boat += 1;
                boat
            })
            .collect();
        hire_points.push(HirePoint::new(
            id,
            template.name,
            template.description,
            calendar,
            fleet,
        ));
    }

    Ok(Snapshot {
        hire_points,
        reservations: Vec::new(),
    })
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN)
}
