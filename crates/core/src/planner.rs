//! Planner - the book of events a front end works on
//!
//! Events are kept in creation order and addressed by [`EventId`].

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::models::{decode, decode_str, Event, EventId, PlannerDocument};

#[derive(Debug, Default)]
pub struct Planner {
    events: Vec<Event>,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event and return its handle
    pub fn create_event(
        &mut self,
        name: impl Into<String>,
        date_time: NaiveDateTime,
        location: impl Into<String>,
        num_rows: u32,
        num_seats_per_row: u32,
    ) -> EventId {
        let event = Event::with_grid(name, date_time, location, num_rows, num_seats_per_row);
        self.insert(event)
    }

    pub fn insert(&mut self, event: Event) -> EventId {
        let id = event.id;
        tracing::info!(event_id = %id, name = %event.name, seats = event.total_seats(), "Event created");
        self.events.push(event);
        id
    }

    /// Delete an event together with its seats and guests
    pub fn remove_event(&mut self, id: EventId) -> Result<Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("Event {}", id)))?;
        let event = self.events.remove(index);
        tracing::info!(event_id = %id, name = %event.name, "Event deleted");
        Ok(event)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// First event with this exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_document(&self) -> PlannerDocument {
        PlannerDocument {
            events: self.events.iter().map(Event::to_record).collect(),
        }
    }

    pub fn from_document(document: PlannerDocument) -> Result<Self> {
        let events = document
            .events
            .into_iter()
            .map(Event::from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { events })
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::from_document(decode(value, "planner")?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_document(decode_str(json, "planner")?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }
}
