//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::{BTreeSet, HashSet};

use crate::models::{Event, GuestId, Seat};

/// Guest ids that show up in more than one place (pool entries and seats).
///
/// The core does not prevent these states; callers that add the same guest
/// twice or seat a copy of a seated guest produce them.
pub fn duplicate_guest_ids(event: &Event) -> Vec<GuestId> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();

    let pooled = event.unassigned_guests().iter().map(|g| g.id);
    let seated = event.seats().iter().filter_map(Seat::guest).map(|g| g.id);

    for id in pooled.chain(seated) {
        if !seen.insert(id) {
            duplicates.insert(id);
        }
    }

    duplicates.into_iter().collect()
}

/// Validate that a seat's coordinates are in range
pub fn assert_seat_invariants(seat: &Seat) {
    debug_assert!(
        seat.row >= 1 && seat.number >= 1,
        "Seat {} has a zero coordinate",
        seat.identifier()
    );
}

/// Validate that an event's state is internally consistent
pub fn assert_event_invariants(event: &Event) {
    if !cfg!(debug_assertions) {
        return;
    }

    let mut identifiers = HashSet::new();
    for seat in event.seats() {
        assert_seat_invariants(seat);
        let first_time = identifiers.insert(seat.position());
        debug_assert!(
            first_time,
            "Event '{}' has seat {} more than once",
            event.name,
            seat.identifier()
        );
    }

    // Every guest sits in exactly one place
    let duplicates = duplicate_guest_ids(event);
    debug_assert!(
        duplicates.is_empty(),
        "Event '{}' holds guests {:?} in more than one place",
        event.name,
        duplicates
    );
}
