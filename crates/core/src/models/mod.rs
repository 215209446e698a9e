//! Data models for Seatplan

mod event;
mod guest;
mod record;
mod seat;

pub use event::*;
pub use guest::*;
pub use record::{
    format_date_time, parse_date_time, EventRecord, GuestRecord, PlannerDocument, SeatRecord,
};
pub(crate) use record::{decode, decode_str};
pub use seat::*;
