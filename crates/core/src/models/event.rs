//! Event model - a seating grid plus the pool of guests waiting for a seat

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::{decode, decode_str, format_date_time, parse_date_time, EventRecord};
use super::{Guest, GuestId, Seat, SeatPosition};
use crate::error::{Error, Result};

pub const DEFAULT_ROWS: u32 = 10;
pub const DEFAULT_SEATS_PER_ROW: u32 = 10;

/// Handle for an event inside a planner. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a guest currently is within an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestLocation {
    /// Index into the unassigned pool
    Unassigned(usize),
    Seated(SeatPosition),
}

/// Occupancy figures for an info panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventSummary {
    pub total: usize,
    /// Every seat that is not available, reserved-but-empty included
    pub occupied: usize,
    pub available: usize,
    /// Reserved seats with nobody on them
    pub reserved: usize,
    pub seated: usize,
    pub unassigned: usize,
}

/// An event with a fixed seat grid
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub date_time: NaiveDateTime,
    pub location: String,
    num_rows: u32,
    num_seats_per_row: u32,
    /// Row-major: row ascending, then number ascending
    seats: Vec<Seat>,
    /// Insertion order is kept
    unassigned_guests: Vec<Guest>,
}

impl Event {
    /// Create an event with the default 10x10 grid
    pub fn new(name: impl Into<String>, date_time: NaiveDateTime, location: impl Into<String>) -> Self {
        Self::with_grid(name, date_time, location, DEFAULT_ROWS, DEFAULT_SEATS_PER_ROW)
    }

    /// Create an event with an explicit grid.
    ///
    /// Dimensions are not validated: a zero on either axis gives an event
    /// with no seats.
    pub fn with_grid(
        name: impl Into<String>,
        date_time: NaiveDateTime,
        location: impl Into<String>,
        num_rows: u32,
        num_seats_per_row: u32,
    ) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            date_time,
            location: location.into(),
            num_rows,
            num_seats_per_row,
            seats: generate_seats(num_rows, num_seats_per_row),
            unassigned_guests: Vec::new(),
        }
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    pub fn num_seats_per_row(&self) -> u32 {
        self.num_seats_per_row
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn unassigned_guests(&self) -> &[Guest] {
        &self.unassigned_guests
    }

    /// Number of seats in the grid. For a decoded event the recorded seats
    /// are authoritative, so this can differ from `num_rows * num_seats_per_row`.
    pub fn total_seats(&self) -> usize {
        self.seats.len()
    }

    /// Add a guest to the unassigned pool. Duplicates are not detected.
    pub fn add_guest(&mut self, guest: Guest) -> GuestId {
        let id = guest.id;
        tracing::debug!(event = %self.name, guest_id = %id, "Guest added to pool");
        self.unassigned_guests.push(guest);
        id
    }

    pub fn seat(&self, row: u32, number: u32) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|s| s.row == row && s.number == number)
    }

    pub fn seat_mut(&mut self, row: u32, number: u32) -> Option<&mut Seat> {
        self.seats
            .iter_mut()
            .find(|s| s.row == row && s.number == number)
    }

    /// Look up a seat by its `R{row}-S{number}` identifier
    pub fn seat_by_identifier(&self, identifier: &str) -> Option<&Seat> {
        let pos: SeatPosition = identifier.parse().ok()?;
        self.seat(pos.row, pos.number)
    }

    /// Seats that are not available; reserved empty seats count too
    pub fn occupied_seats_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_available()).count()
    }

    pub fn available_seats_count(&self) -> usize {
        self.total_seats() - self.occupied_seats_count()
    }

    pub fn summary(&self) -> EventSummary {
        let seated = self.seats.iter().filter(|s| s.guest().is_some()).count();
        let reserved = self
            .seats
            .iter()
            .filter(|s| s.reserved && s.guest().is_none())
            .count();
        let occupied = self.occupied_seats_count();

        EventSummary {
            total: self.total_seats(),
            occupied,
            available: self.total_seats() - occupied,
            reserved,
            seated,
            unassigned: self.unassigned_guests.len(),
        }
    }

    /// Seats grouped by row, each row sorted by seat number
    pub fn seats_by_row(&self) -> BTreeMap<u32, Vec<&Seat>> {
        let mut rows: BTreeMap<u32, Vec<&Seat>> = BTreeMap::new();
        for seat in &self.seats {
            rows.entry(seat.row).or_default().push(seat);
        }
        for seats in rows.values_mut() {
            seats.sort_by_key(|s| s.number);
        }
        rows
    }

    /// Currently seated guests keyed by id
    pub fn seated_guests(&self) -> BTreeMap<GuestId, SeatPosition> {
        self.seats
            .iter()
            .filter_map(|s| s.guest().map(|g| (g.id, s.position())))
            .collect()
    }

    pub fn locate_guest(&self, guest_id: GuestId) -> Option<GuestLocation> {
        if let Some(index) = self.pool_index(guest_id) {
            return Some(GuestLocation::Unassigned(index));
        }
        self.seats
            .iter()
            .find(|s| s.guest().is_some_and(|g| g.id == guest_id))
            .map(|s| GuestLocation::Seated(s.position()))
    }

    /// Find a guest wherever they are
    pub fn guest(&self, guest_id: GuestId) -> Option<&Guest> {
        self.unassigned_guests
            .iter()
            .find(|g| g.id == guest_id)
            .or_else(|| {
                self.seats
                    .iter()
                    .filter_map(Seat::guest)
                    .find(|g| g.id == guest_id)
            })
    }

    /// Drop a guest from the unassigned pool
    pub fn remove_unassigned(&mut self, guest_id: GuestId) -> Result<Guest> {
        let index = self
            .pool_index(guest_id)
            .ok_or_else(|| Error::NotFound(format!("Unassigned guest {}", guest_id)))?;
        let guest = self.unassigned_guests.remove(index);
        tracing::debug!(event = %self.name, guest_id = %guest_id, "Guest removed from pool");
        Ok(guest)
    }

    /// Move a guest from the pool onto a seat.
    ///
    /// Returns `Ok(false)` and leaves the pool untouched when the seat is
    /// not available.
    pub fn assign_from_pool(&mut self, guest_id: GuestId, row: u32, number: u32) -> Result<bool> {
        let target = self.require_seat(row, number)?;
        let index = self
            .pool_index(guest_id)
            .ok_or_else(|| Error::NotFound(format!("Unassigned guest {}", guest_id)))?;

        let guest = self.unassigned_guests.remove(index);
        if let Err(guest) = self.seats[target].assign_guest(guest) {
            self.unassigned_guests.insert(index, guest);
            return Ok(false);
        }

        Ok(true)
    }

    /// Free a seat and send its guest to the back of the pool
    pub fn release_to_pool(&mut self, row: u32, number: u32) -> Result<Option<GuestId>> {
        let target = self.require_seat(row, number)?;
        let Some(guest) = self.seats[target].release() else {
            return Ok(None);
        };

        let id = guest.id;
        self.unassigned_guests.push(guest);
        Ok(Some(id))
    }

    /// Move a seated guest to another seat.
    ///
    /// A guest who is not seated, or a target that is not available, makes
    /// this a no-op returning `Ok(false)`. Pool guests go through
    /// [`Event::assign_from_pool`] instead.
    pub fn relocate_guest(&mut self, guest_id: GuestId, row: u32, number: u32) -> Result<bool> {
        let target = self.require_seat(row, number)?;
        let Some(source) = self
            .seats
            .iter()
            .position(|s| s.guest().is_some_and(|g| g.id == guest_id))
        else {
            tracing::debug!(guest_id = %guest_id, "Guest not seated, nothing to relocate");
            return Ok(false);
        };

        if !self.seats[target].is_available() {
            return Ok(false);
        }

        let Some(guest) = self.seats[source].release() else {
            return Ok(false);
        };
        if let Err(guest) = self.seats[target].assign_guest(guest) {
            self.seats[source].restore(guest);
            return Ok(false);
        }

        tracing::debug!(
            guest_id = %guest_id,
            from = %self.seats[source].position(),
            to = %self.seats[target].position(),
            "Guest relocated"
        );
        Ok(true)
    }

    pub fn set_reserved(&mut self, row: u32, number: u32, reserved: bool) -> Result<()> {
        let index = self.require_seat(row, number)?;
        let seat = &mut self.seats[index];
        if reserved {
            seat.reserve();
        } else {
            seat.unreserve();
        }
        Ok(())
    }

    /// "{name} - {dd.mm.yyyy HH:MM}", as shown in event lists
    pub fn list_label(&self) -> String {
        format!("{} - {}", self.name, self.date_time.format("%d.%m.%Y %H:%M"))
    }

    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            name: self.name.clone(),
            date_time: format_date_time(&self.date_time),
            location: self.location.clone(),
            num_rows: self.num_rows,
            num_seats_per_row: self.num_seats_per_row,
            seats: self.seats.iter().map(Seat::to_record).collect(),
            unassigned_guests: self
                .unassigned_guests
                .iter()
                .map(Guest::to_record)
                .collect(),
        }
    }

    /// Rebuild an event. The recorded seats replace the generated grid.
    ///
    /// Seats with a zero coordinate or a position that appears twice make
    /// the record malformed.
    pub fn from_record(record: EventRecord) -> Result<Self> {
        let date_time = parse_date_time(&record.date_time)?;

        let mut positions = HashSet::new();
        for seat in &record.seats {
            let position = SeatPosition::new(seat.row, seat.number);
            if seat.row == 0 || seat.number == 0 {
                return Err(Error::MalformedRecord(format!(
                    "event '{}': seat {} has a zero coordinate",
                    record.name, position
                )));
            }
            if !positions.insert(position) {
                return Err(Error::MalformedRecord(format!(
                    "event '{}': seat {} appears more than once",
                    record.name, position
                )));
            }
        }

        Ok(Self {
            id: EventId::new(),
            name: record.name,
            date_time,
            location: record.location,
            num_rows: record.num_rows,
            num_seats_per_row: record.num_seats_per_row,
            seats: record.seats.into_iter().map(Seat::from_record).collect(),
            unassigned_guests: record
                .unassigned_guests
                .into_iter()
                .map(Guest::from_record)
                .collect(),
        })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::from_record(decode(value, "event")?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_record(decode_str(json, "event")?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    fn pool_index(&self, guest_id: GuestId) -> Option<usize> {
        self.unassigned_guests.iter().position(|g| g.id == guest_id)
    }

    fn require_seat(&self, row: u32, number: u32) -> Result<usize> {
        self.seats
            .iter()
            .position(|s| s.row == row && s.number == number)
            .ok_or_else(|| Error::NotFound(format!("Seat {}", SeatPosition::new(row, number))))
    }
}

fn generate_seats(num_rows: u32, num_seats_per_row: u32) -> Vec<Seat> {
    (1..=num_rows)
        .flat_map(|row| (1..=num_seats_per_row).map(move |number| Seat::new(row, number)))
        .collect()
}
