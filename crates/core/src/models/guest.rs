//! Guest model

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::record::{decode, GuestRecord};
use crate::error::Result;

static NEXT_GUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle for a guest, unique within the running process.
///
/// Ids are handed out in creation order and are never written to records,
/// so they must not be used as persistence keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GuestId(pub u64);

impl GuestId {
    pub fn next() -> Self {
        Self(NEXT_GUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "G{}", self.0)
    }
}

/// A person who can be placed on a seat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub id: GuestId,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

impl Guest {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id: GuestId::next(),
            last_name: last_name.into(),
            first_name: first_name.into(),
            email: String::new(),
            phone: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// "{last} {first}", the form shown in guest lists
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    pub fn to_record(&self) -> GuestRecord {
        GuestRecord {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Build a guest from a decoded record. A fresh id is assigned.
    pub fn from_record(record: GuestRecord) -> Self {
        Self::new(record.last_name, record.first_name)
            .with_email(record.email)
            .with_phone(record.phone)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        decode::<GuestRecord>(value, "guest").map(Self::from_record)
    }

    /// Compare everything except the process-local id
    pub fn same_person(&self, other: &Guest) -> bool {
        self.to_record() == other.to_record()
    }
}

impl std::fmt::Display for Guest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.last_name, self.first_name)
    }
}
