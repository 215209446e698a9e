//! Text rendering of events for the terminal

use std::fmt::Write;

use seatplan_core::{Event, SeatStatus};

const AVAILABLE: &str = "[   ]";
const RESERVED: &str = "[ R ]";
const OCCUPIED: &str = "[ X ]";

/// Header block with the event details and occupancy figures
pub fn event_info(event: &Event) -> String {
    let summary = event.summary();
    let mut out = String::new();

    let _ = writeln!(out, "{}", event.name);
    let _ = writeln!(out, "Date & Time: {}", event.date_time.format("%d.%m.%Y %H:%M"));
    let _ = writeln!(out, "Location: {}", event.location);
    let _ = writeln!(
        out,
        "Capacity: {} seats ({} rows x {} seats)",
        summary.total,
        event.num_rows(),
        event.num_seats_per_row()
    );
    let _ = writeln!(
        out,
        "Occupied: {} | Available: {}",
        summary.occupied, summary.available
    );
    let _ = writeln!(out, "Unassigned Guests: {}", summary.unassigned);
    out
}

/// Stage on top, one line per row, then who sits where
pub fn seating_map(event: &Event) -> String {
    let rows = event.seats_by_row();
    let mut out = String::new();

    if rows.is_empty() {
        out.push_str("No seats\n");
        return out;
    }

    let _ = writeln!(out, "      Stage / Podium");
    for (row, seats) in &rows {
        let cells: Vec<&str> = seats
            .iter()
            .map(|seat| match seat.status() {
                SeatStatus::Available => AVAILABLE,
                SeatStatus::Reserved => RESERVED,
                SeatStatus::Occupied(_) => OCCUPIED,
            })
            .collect();
        let _ = writeln!(out, "{:<5} {}", format!("R{}", row), cells.join(" "));
    }
    let _ = writeln!(
        out,
        "Legend: {} available  {} reserved  {} occupied",
        AVAILABLE, RESERVED, OCCUPIED
    );

    let seated: Vec<String> = rows
        .values()
        .flatten()
        .filter_map(|seat| {
            seat.guest()
                .map(|g| format!("  {:<8} {}", seat.identifier(), g.full_name()))
        })
        .collect();
    if !seated.is_empty() {
        let _ = writeln!(out, "Seated:");
        for line in seated {
            let _ = writeln!(out, "{}", line);
        }
    }

    out
}

/// Numbered list of the unassigned pool
pub fn unassigned_list(event: &Event) -> String {
    if event.unassigned_guests().is_empty() {
        return "No unassigned guests\n".to_string();
    }

    let mut out = String::new();
    for (i, guest) in event.unassigned_guests().iter().enumerate() {
        let _ = write!(out, "{:>3}. {}", i + 1, guest.full_name());
        let contact: Vec<&str> = [guest.email.as_str(), guest.phone.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !contact.is_empty() {
            let _ = write!(out, " ({})", contact.join(", "));
        }
        out.push('\n');
    }
    out
}
