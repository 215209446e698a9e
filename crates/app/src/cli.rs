use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for seatplan
#[derive(Parser, Debug)]
#[command(
    name = "seatplan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plan event seating: seat grids, guest lists and seat assignments",
    long_about = None
)]
pub struct Cli {
    /// Override the events snapshot file
    #[arg(global = true, long = "data")]
    pub data: Option<PathBuf>,

    /// Override the configuration file
    #[arg(global = true, long = "config")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, inspect and delete events
    #[command(subcommand)]
    Event(EventCommand),

    /// Manage an event's unassigned guests
    #[command(subcommand)]
    Guest(GuestCommand),

    /// Assign, release, move and reserve seats
    #[command(subcommand)]
    Seat(SeatCommand),
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// Create a new event
    Create {
        name: String,

        #[arg(long = "at", help = "Date and time (YYYY-MM-DDTHH:MM or DD.MM.YYYY HH:MM)")]
        at: String,

        #[arg(long = "location")]
        location: String,

        #[arg(
            long = "rows",
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Number of rows (default from config)"
        )]
        rows: Option<u32>,

        #[arg(
            long = "seats",
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Seats per row (default from config)"
        )]
        seats_per_row: Option<u32>,
    },

    /// List all events
    List,

    /// Show event details and the seating map
    Show { event: String },

    /// Delete an event with its seats and guests
    Delete { event: String },

    /// Print an event record as JSON, or write it to a file
    Export {
        event: String,

        #[arg(long = "output")]
        output: Option<PathBuf>,
    },

    /// Add an event from a JSON record file
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum GuestCommand {
    /// Add a guest to the unassigned list
    Add {
        event: String,

        #[arg(long = "last")]
        last_name: String,

        #[arg(long = "first")]
        first_name: String,

        #[arg(long = "email", default_value = "")]
        email: String,

        #[arg(long = "phone", default_value = "")]
        phone: String,
    },

    /// Remove an unassigned guest by list position
    Remove {
        event: String,

        /// 1-based position in the unassigned list
        position: usize,
    },

    /// List unassigned guests in the order they were added
    List { event: String },
}

#[derive(Subcommand, Debug)]
pub enum SeatCommand {
    /// Seat an unassigned guest
    Assign {
        event: String,

        /// Seat identifier, e.g. R1-S2
        seat: String,

        /// 1-based position in the unassigned list
        position: usize,
    },

    /// Free a seat; its guest goes back to the unassigned list
    Release { event: String, seat: String },

    /// Move a seated guest to another seat
    Move {
        event: String,
        from: String,
        to: String,
    },

    /// Block a seat from assignment
    Reserve { event: String, seat: String },

    /// Lift a reservation
    Unreserve { event: String, seat: String },
}
