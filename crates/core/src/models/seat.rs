//! Seat model - one cell of an event's seating grid

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::{decode, SeatRecord};
use super::Guest;
use crate::error::{Error, Result};

/// Grid coordinates of a seat, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatPosition {
    pub row: u32,
    pub number: u32,
}

impl SeatPosition {
    pub fn new(row: u32, number: u32) -> Self {
        Self { row, number }
    }
}

impl std::fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}-S{}", self.row, self.number)
    }
}

impl FromStr for SeatPosition {
    type Err = Error;

    /// Parse an identifier such as `R2-S7` (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidOperation(format!("'{}' is not a seat identifier", s));

        let upper = s.trim().to_ascii_uppercase();
        let (row, number) = upper.split_once('-').ok_or_else(invalid)?;
        let row = row.strip_prefix('R').ok_or_else(invalid)?;
        let number = number.strip_prefix('S').ok_or_else(invalid)?;

        Ok(Self {
            row: row.parse().map_err(|_| invalid())?,
            number: number.parse().map_err(|_| invalid())?,
        })
    }
}

/// What a seat currently shows to the room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus<'a> {
    Available,
    /// Blocked with nobody on it
    Reserved,
    Occupied(&'a Guest),
}

impl SeatStatus<'_> {
    pub fn label(&self) -> String {
        match self {
            SeatStatus::Available => "available".to_string(),
            SeatStatus::Reserved => "reserved".to_string(),
            SeatStatus::Occupied(guest) => format!("occupied by {}", guest.full_name()),
        }
    }
}

/// A seat owns the guest sitting on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub row: u32,
    pub number: u32,
    guest: Option<Guest>,
    pub reserved: bool,
}

impl Seat {
    pub fn new(row: u32, number: u32) -> Self {
        Self {
            row,
            number,
            guest: None,
            reserved: false,
        }
    }

    pub fn position(&self) -> SeatPosition {
        SeatPosition::new(self.row, self.number)
    }

    /// `R{row}-S{number}`
    pub fn identifier(&self) -> String {
        self.position().to_string()
    }

    pub fn guest(&self) -> Option<&Guest> {
        self.guest.as_ref()
    }

    /// Free and not reserved
    pub fn is_available(&self) -> bool {
        self.guest.is_none() && !self.reserved
    }

    /// Place a guest on this seat.
    ///
    /// Fails without touching the seat when it is occupied or reserved, and
    /// hands the guest back. Whether the guest already sits somewhere else
    /// is the caller's concern.
    pub fn assign_guest(&mut self, guest: Guest) -> std::result::Result<(), Guest> {
        if !self.is_available() {
            return Err(guest);
        }
        tracing::debug!(seat = %self.position(), guest_id = %guest.id, "Guest seated");
        self.guest = Some(guest);
        Ok(())
    }

    /// Clear the seat, returning whoever was on it. No-op when empty.
    pub fn release(&mut self) -> Option<Guest> {
        let guest = self.guest.take();
        if let Some(g) = &guest {
            tracing::debug!(seat = %self.position(), guest_id = %g.id, "Seat released");
        }
        guest
    }

    /// Put a guest back without the availability check. Only used to roll
    /// back a move that could not complete.
    pub(super) fn restore(&mut self, guest: Guest) {
        self.guest = Some(guest);
    }

    pub fn reserve(&mut self) {
        self.reserved = true;
    }

    pub fn unreserve(&mut self) {
        self.reserved = false;
    }

    /// Occupancy wins over the reserved flag
    pub fn status(&self) -> SeatStatus<'_> {
        match (&self.guest, self.reserved) {
            (Some(guest), _) => SeatStatus::Occupied(guest),
            (None, true) => SeatStatus::Reserved,
            (None, false) => SeatStatus::Available,
        }
    }

    pub fn to_record(&self) -> SeatRecord {
        SeatRecord {
            row: self.row,
            number: self.number,
            reserved: self.reserved,
            guest: self.guest.as_ref().map(Guest::to_record),
        }
    }

    pub fn from_record(record: SeatRecord) -> Self {
        Self {
            row: record.row,
            number: record.number,
            guest: record.guest.map(Guest::from_record),
            reserved: record.reserved,
        }
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        decode::<SeatRecord>(value, "seat").map(Self::from_record)
    }
}
