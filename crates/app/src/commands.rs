//! Command handlers
//!
//! Each handler works on the loaded planner and reports what it did. The
//! caller saves the snapshot when a handler changed something.

use std::fs;

use chrono::NaiveDateTime;
use seatplan_core::{
    parse_date_time, Error, Event, EventId, Guest, GuestId, Result, SeatPosition, SnapshotStore,
};

use crate::cli::{Cli, Commands, EventCommand, GuestCommand, SeatCommand};
use crate::render;
use crate::state::AppState;

/// Result of one command
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub changed: bool,
}

impl Outcome {
    fn changed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: true,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: false,
        }
    }
}

/// Entry point used by `main`
pub fn run(cli: Cli) -> Result<()> {
    let mut state = AppState::open(cli.data, cli.config)?;
    let outcome = execute(&mut state, cli.command)?;
    print!("{}", outcome.message);
    Ok(())
}

/// Run a command and persist the planner if it changed
pub fn execute<S: SnapshotStore>(state: &mut AppState<S>, command: Commands) -> Result<Outcome> {
    let outcome = match command {
        Commands::Event(cmd) => event_command(state, cmd)?,
        Commands::Guest(cmd) => guest_command(state, cmd)?,
        Commands::Seat(cmd) => seat_command(state, cmd)?,
    };
    if outcome.changed {
        state.save()?;
    }
    Ok(outcome)
}

fn event_command<S: SnapshotStore>(state: &mut AppState<S>, cmd: EventCommand) -> Result<Outcome> {
    match cmd {
        EventCommand::Create {
            name,
            at,
            location,
            rows,
            seats_per_row,
        } => {
            if name.trim().is_empty() || location.trim().is_empty() {
                return Err(Error::InvalidOperation(
                    "Event name and location are required".to_string(),
                ));
            }
            if state.planner.find_by_name(&name).is_some() {
                return Err(Error::InvalidOperation(format!(
                    "An event named '{}' already exists",
                    name
                )));
            }
            let date_time = parse_when(&at)?;
            let rows = rows.unwrap_or(state.config.default_rows);
            let seats_per_row = seats_per_row.unwrap_or(state.config.default_seats_per_row);
            let id = state
                .planner
                .create_event(name.clone(), date_time, location, rows, seats_per_row);
            let total = lookup(state, id)?.total_seats();
            Ok(Outcome::changed(format!(
                "Event '{}' was created with {} seats\n",
                name, total
            )))
        }
        EventCommand::List => {
            if state.planner.is_empty() {
                return Ok(Outcome::unchanged("No events\n"));
            }
            let mut out = String::new();
            for event in state.planner.events() {
                out.push_str(&event.list_label());
                out.push('\n');
            }
            Ok(Outcome::unchanged(out))
        }
        EventCommand::Show { event } => {
            let event = event_ref(state, &event)?;
            Ok(Outcome::unchanged(format!(
                "{}\n{}",
                render::event_info(event),
                render::seating_map(event)
            )))
        }
        EventCommand::Delete { event } => {
            let id = state.event_id(&event)?;
            let removed = state.planner.remove_event(id)?;
            Ok(Outcome::changed(format!("Event '{}' was deleted\n", removed.name)))
        }
        EventCommand::Export { event, output } => {
            let json = event_ref(state, &event)?.to_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    Ok(Outcome::unchanged(format!(
                        "Event '{}' exported to {}\n",
                        event,
                        path.display()
                    )))
                }
                None => Ok(Outcome::unchanged(format!("{}\n", json))),
            }
        }
        EventCommand::Import { file } => {
            let content = fs::read_to_string(&file)?;
            let event = Event::from_json(&content)?;
            if state.planner.find_by_name(&event.name).is_some() {
                return Err(Error::InvalidOperation(format!(
                    "An event named '{}' already exists",
                    event.name
                )));
            }
            let name = event.name.clone();
            state.planner.insert(event);
            Ok(Outcome::changed(format!("Event '{}' was imported\n", name)))
        }
    }
}

fn guest_command<S: SnapshotStore>(state: &mut AppState<S>, cmd: GuestCommand) -> Result<Outcome> {
    match cmd {
        GuestCommand::Add {
            event,
            last_name,
            first_name,
            email,
            phone,
        } => {
            if last_name.trim().is_empty() || first_name.trim().is_empty() {
                return Err(Error::InvalidOperation(
                    "First name and last name are required".to_string(),
                ));
            }
            let guest = Guest::new(last_name, first_name)
                .with_email(email)
                .with_phone(phone);
            let name = guest.full_name();
            event_mut(state, &event)?.add_guest(guest);
            Ok(Outcome::changed(format!("Guest '{}' was added\n", name)))
        }
        GuestCommand::Remove { event, position } => {
            let event = event_mut(state, &event)?;
            let guest_id = pool_guest(event, position)?;
            let guest = event.remove_unassigned(guest_id)?;
            Ok(Outcome::changed(format!(
                "Guest '{}' was removed\n",
                guest.full_name()
            )))
        }
        GuestCommand::List { event } => {
            let event = event_ref(state, &event)?;
            Ok(Outcome::unchanged(render::unassigned_list(event)))
        }
    }
}

fn seat_command<S: SnapshotStore>(state: &mut AppState<S>, cmd: SeatCommand) -> Result<Outcome> {
    match cmd {
        SeatCommand::Assign {
            event,
            seat,
            position,
        } => {
            let pos: SeatPosition = seat.parse()?;
            let event = event_mut(state, &event)?;
            let guest_id = pool_guest(event, position)?;
            let name = guest_name(event, guest_id);
            if !event.assign_from_pool(guest_id, pos.row, pos.number)? {
                return Err(Error::InvalidOperation(format!(
                    "Seat {} is not available",
                    pos
                )));
            }
            Ok(Outcome::changed(format!("{} was seated at {}\n", name, pos)))
        }
        SeatCommand::Release { event, seat } => {
            let pos: SeatPosition = seat.parse()?;
            let event = event_mut(state, &event)?;
            match event.release_to_pool(pos.row, pos.number)? {
                Some(guest_id) => Ok(Outcome::changed(format!(
                    "Seat {} was freed; {} is unassigned again\n",
                    pos,
                    guest_name(event, guest_id)
                ))),
                None => Ok(Outcome::unchanged(format!("Seat {} is already free\n", pos))),
            }
        }
        SeatCommand::Move { event, from, to } => {
            let from: SeatPosition = from.parse()?;
            let to: SeatPosition = to.parse()?;
            let event = event_mut(state, &event)?;
            let guest_id = event
                .seat(from.row, from.number)
                .ok_or_else(|| Error::NotFound(format!("Seat {}", from)))?
                .guest()
                .map(|g| g.id)
                .ok_or_else(|| Error::InvalidOperation(format!("Seat {} is empty", from)))?;

            if !event.relocate_guest(guest_id, to.row, to.number)? {
                return Err(Error::InvalidOperation(format!("Seat {} is not available", to)));
            }
            Ok(Outcome::changed(format!(
                "{} moved from {} to {}\n",
                guest_name(event, guest_id),
                from,
                to
            )))
        }
        SeatCommand::Reserve { event, seat } => {
            let pos: SeatPosition = seat.parse()?;
            event_mut(state, &event)?.set_reserved(pos.row, pos.number, true)?;
            Ok(Outcome::changed(format!("Seat {} is reserved\n", pos)))
        }
        SeatCommand::Unreserve { event, seat } => {
            let pos: SeatPosition = seat.parse()?;
            event_mut(state, &event)?.set_reserved(pos.row, pos.number, false)?;
            Ok(Outcome::changed(format!("Seat {} is no longer reserved\n", pos)))
        }
    }
}

/// Accept ISO-8601 as well as the `DD.MM.YYYY HH:MM` form used in listings
fn parse_when(s: &str) -> Result<NaiveDateTime> {
    parse_date_time(s).or_else(|e| {
        NaiveDateTime::parse_from_str(s.trim(), "%d.%m.%Y %H:%M").map_err(|_| e)
    })
}

fn event_ref<'a, S: SnapshotStore>(state: &'a AppState<S>, name: &str) -> Result<&'a Event> {
    let id = state.event_id(name)?;
    lookup(state, id)
}

fn lookup<S: SnapshotStore>(state: &AppState<S>, id: EventId) -> Result<&Event> {
    state
        .planner
        .event(id)
        .ok_or_else(|| Error::NotFound(format!("Event {}", id)))
}

fn event_mut<'a, S: SnapshotStore>(state: &'a mut AppState<S>, name: &str) -> Result<&'a mut Event> {
    let id = state.event_id(name)?;
    state
        .planner
        .event_mut(id)
        .ok_or_else(|| Error::NotFound(format!("Event '{}'", name)))
}

/// Resolve a 1-based unassigned-list position to a guest id
fn pool_guest(event: &Event, position: usize) -> Result<GuestId> {
    position
        .checked_sub(1)
        .and_then(|i| event.unassigned_guests().get(i))
        .map(|g| g.id)
        .ok_or_else(|| {
            Error::NotFound(format!(
                "No unassigned guest at position {} (list has {})",
                position,
                event.unassigned_guests().len()
            ))
        })
}

fn guest_name(event: &Event, guest_id: GuestId) -> String {
    event
        .guest(guest_id)
        .map(Guest::full_name)
        .unwrap_or_else(|| guest_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_core::{MemoryStore, PlannerConfig};
    use tempfile::TempDir;

    fn state() -> AppState<MemoryStore> {
        AppState::with_store(PlannerConfig::default(), MemoryStore::new()).unwrap()
    }

    fn create_tech_conf(state: &mut AppState<MemoryStore>) {
        execute(
            state,
            Commands::Event(EventCommand::Create {
                name: "Tech Conf".to_string(),
                at: "2024-05-01T18:00".to_string(),
                location: "Hall A".to_string(),
                rows: Some(2),
                seats_per_row: Some(3),
            }),
        )
        .unwrap();
    }

    fn add_guest(state: &mut AppState<MemoryStore>, last: &str, first: &str) {
        execute(
            state,
            Commands::Guest(GuestCommand::Add {
                event: "Tech Conf".to_string(),
                last_name: last.to_string(),
                first_name: first.to_string(),
                email: String::new(),
                phone: String::new(),
            }),
        )
        .unwrap();
    }

    fn seat(state: &mut AppState<MemoryStore>, cmd: SeatCommand) -> Result<Outcome> {
        execute(state, Commands::Seat(cmd))
    }

    fn tech_conf(state: &AppState<MemoryStore>) -> &Event {
        state.planner.find_by_name("Tech Conf").unwrap()
    }

    #[test]
    fn test_create_event_saves_snapshot() {
        let mut state = state();
        create_tech_conf(&mut state);

        let saved = state.store().document().unwrap();
        assert_eq!(saved.events.len(), 1);
        assert_eq!(saved.events[0].seats.len(), 6);
    }

    #[test]
    fn test_create_uses_config_defaults() {
        let mut state = state();
        state.config.default_rows = 4;
        state.config.default_seats_per_row = 5;
        let outcome = execute(
            &mut state,
            Commands::Event(EventCommand::Create {
                name: "Gala".to_string(),
                at: "31.12.2024 20:00".to_string(),
                location: "Ballroom".to_string(),
                rows: None,
                seats_per_row: None,
            }),
        )
        .unwrap();
        assert_eq!(outcome.message, "Event 'Gala' was created with 20 seats\n");
        assert_eq!(state.planner.events()[0].list_label(), "Gala - 31.12.2024 20:00");
    }

    #[test]
    fn test_duplicate_event_name_rejected() {
        let mut state = state();
        create_tech_conf(&mut state);
        let err = execute(
            &mut state,
            Commands::Event(EventCommand::Create {
                name: "Tech Conf".to_string(),
                at: "2024-05-02T18:00".to_string(),
                location: "Hall B".to_string(),
                rows: None,
                seats_per_row: None,
            }),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
    }

    #[test]
    fn test_create_requires_name_and_location() {
        let mut state = state();
        for (name, location) in [("", "Hall A"), ("Tech Conf", "  "), (" ", "")] {
            let err = execute(
                &mut state,
                Commands::Event(EventCommand::Create {
                    name: name.to_string(),
                    at: "2024-05-01T18:00".to_string(),
                    location: location.to_string(),
                    rows: None,
                    seats_per_row: None,
                }),
            )
            .unwrap_err();
            assert!(matches!(err, Error::InvalidOperation(_)));
        }
        assert!(state.planner.is_empty());
        assert!(state.store().document().is_none());
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut state = state();
        let err = execute(
            &mut state,
            Commands::Event(EventCommand::Create {
                name: "Later".to_string(),
                at: "soon".to_string(),
                location: "Hall A".to_string(),
                rows: None,
                seats_per_row: None,
            }),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord(_)));
        assert!(state.store().document().is_none());
    }

    #[test]
    fn test_assign_release_flow() {
        let mut state = state();
        create_tech_conf(&mut state);
        add_guest(&mut state, "Roe", "Rick");
        add_guest(&mut state, "Doe", "Jane");

        let outcome = seat(
            &mut state,
            SeatCommand::Assign {
                event: "Tech Conf".to_string(),
                seat: "R1-S2".to_string(),
                position: 2,
            },
        )
        .unwrap();
        assert_eq!(outcome.message, "Doe Jane was seated at R1-S2\n");
        assert_eq!(tech_conf(&state).occupied_seats_count(), 1);

        // Seat taken: error and nothing moves
        let err = seat(
            &mut state,
            SeatCommand::Assign {
                event: "Tech Conf".to_string(),
                seat: "R1-S2".to_string(),
                position: 1,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert_eq!(tech_conf(&state).unassigned_guests().len(), 1);

        let outcome = seat(
            &mut state,
            SeatCommand::Release {
                event: "Tech Conf".to_string(),
                seat: "r1-s2".to_string(),
            },
        )
        .unwrap();
        assert!(outcome.changed);
        assert_eq!(tech_conf(&state).occupied_seats_count(), 0);
        let names: Vec<String> = tech_conf(&state)
            .unassigned_guests()
            .iter()
            .map(Guest::full_name)
            .collect();
        assert_eq!(names, ["Roe Rick", "Doe Jane"]);

        let outcome = seat(
            &mut state,
            SeatCommand::Release {
                event: "Tech Conf".to_string(),
                seat: "R1-S2".to_string(),
            },
        )
        .unwrap();
        assert!(!outcome.changed);
    }

    #[test]
    fn test_move_guest() {
        let mut state = state();
        create_tech_conf(&mut state);
        add_guest(&mut state, "Doe", "Jane");
        seat(
            &mut state,
            SeatCommand::Assign {
                event: "Tech Conf".to_string(),
                seat: "R1-S1".to_string(),
                position: 1,
            },
        )
        .unwrap();

        let outcome = seat(
            &mut state,
            SeatCommand::Move {
                event: "Tech Conf".to_string(),
                from: "R1-S1".to_string(),
                to: "R2-S3".to_string(),
            },
        )
        .unwrap();
        assert_eq!(outcome.message, "Doe Jane moved from R1-S1 to R2-S3\n");
        assert!(tech_conf(&state).seat(1, 1).unwrap().is_available());
        assert!(!tech_conf(&state).seat(2, 3).unwrap().is_available());

        // Empty source seat
        let err = seat(
            &mut state,
            SeatCommand::Move {
                event: "Tech Conf".to_string(),
                from: "R1-S1".to_string(),
                to: "R1-S2".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
    }

    #[test]
    fn test_reserve_blocks_assignment() {
        let mut state = state();
        create_tech_conf(&mut state);
        add_guest(&mut state, "Doe", "Jane");
        seat(
            &mut state,
            SeatCommand::Reserve {
                event: "Tech Conf".to_string(),
                seat: "R2-S1".to_string(),
            },
        )
        .unwrap();
        assert_eq!(tech_conf(&state).occupied_seats_count(), 1);

        assert!(seat(
            &mut state,
            SeatCommand::Assign {
                event: "Tech Conf".to_string(),
                seat: "R2-S1".to_string(),
                position: 1,
            },
        )
        .is_err());

        seat(
            &mut state,
            SeatCommand::Unreserve {
                event: "Tech Conf".to_string(),
                seat: "R2-S1".to_string(),
            },
        )
        .unwrap();
        assert_eq!(tech_conf(&state).occupied_seats_count(), 0);
    }

    #[test]
    fn test_guest_remove_and_positions() {
        let mut state = state();
        create_tech_conf(&mut state);
        add_guest(&mut state, "Doe", "Jane");

        let err = execute(
            &mut state,
            Commands::Guest(GuestCommand::Remove {
                event: "Tech Conf".to_string(),
                position: 0,
            }),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let outcome = execute(
            &mut state,
            Commands::Guest(GuestCommand::Remove {
                event: "Tech Conf".to_string(),
                position: 1,
            }),
        )
        .unwrap();
        assert_eq!(outcome.message, "Guest 'Doe Jane' was removed\n");
        assert!(tech_conf(&state).unassigned_guests().is_empty());
    }

    #[test]
    fn test_guest_add_requires_names() {
        let mut state = state();
        create_tech_conf(&mut state);
        let err = execute(
            &mut state,
            Commands::Guest(GuestCommand::Add {
                event: "Tech Conf".to_string(),
                last_name: " ".to_string(),
                first_name: "Jane".to_string(),
                email: String::new(),
                phone: String::new(),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
    }

    #[test]
    fn test_unknown_event() {
        let mut state = state();
        let err = execute(
            &mut state,
            Commands::Guest(GuestCommand::List {
                event: "Nope".to_string(),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_show_and_list() {
        let mut state = state();
        create_tech_conf(&mut state);

        let list = execute(&mut state, Commands::Event(EventCommand::List)).unwrap();
        assert_eq!(list.message, "Tech Conf - 01.05.2024 18:00\n");
        assert!(!list.changed);

        let show = execute(
            &mut state,
            Commands::Event(EventCommand::Show {
                event: "Tech Conf".to_string(),
            }),
        )
        .unwrap();
        assert!(show.message.contains("Occupied: 0 | Available: 6"));
        assert!(show.message.contains("Stage / Podium"));
    }

    #[test]
    fn test_export_import_delete() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tech-conf.json");
        let mut state = state();
        create_tech_conf(&mut state);
        add_guest(&mut state, "Doe", "Jane");

        execute(
            &mut state,
            Commands::Event(EventCommand::Export {
                event: "Tech Conf".to_string(),
                output: Some(path.clone()),
            }),
        )
        .unwrap();

        // Same name is refused while the original exists
        assert!(execute(
            &mut state,
            Commands::Event(EventCommand::Import { file: path.clone() }),
        )
        .is_err());

        execute(
            &mut state,
            Commands::Event(EventCommand::Delete {
                event: "Tech Conf".to_string(),
            }),
        )
        .unwrap();
        assert!(state.planner.is_empty());

        execute(
            &mut state,
            Commands::Event(EventCommand::Import { file: path }),
        )
        .unwrap();
        assert_eq!(tech_conf(&state).unassigned_guests()[0].full_name(), "Doe Jane");
        assert_eq!(state.store().document().unwrap().events.len(), 1);
    }
}
