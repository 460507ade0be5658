use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use super::{blank_as_none, lenient, Entity, StatusAction, UnknownStatus};
use crate::error::AppError;
use crate::pipeline::{FieldValue, Record, SearchScope, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Pending => "Pending",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "pending" => Ok(BookingStatus::Pending),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Bookings keep every column optional; fixtures are known to carry gaps.
/// `room` is free text and is not checked against the room list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u64,
    #[serde(default, alias = "nama")]
    pub name: Option<String>,
    #[serde(default, alias = "ruangan")]
    pub room: Option<String>,
    #[serde(default, alias = "tanggal", deserialize_with = "lenient")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BookingDraft {
    #[serde(alias = "nama")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(alias = "ruangan")]
    #[validate(length(min = 1, message = "room is required"))]
    pub room: String,
    #[serde(alias = "tanggal", deserialize_with = "blank_as_none")]
    #[validate(required(message = "date is required"))]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required(message = "status is required"))]
    pub status: Option<BookingStatus>,
}

impl Record for Booking {
    const FIELDS: &'static [&'static str] = &["id", "name", "room", "date", "status"];

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => self.id.into(),
            "name" => self.name.as_deref().into(),
            "room" => self.room.as_deref().into(),
            // ISO dates order correctly as text.
            "date" => self.date.map(|d| FieldValue::Text(d.format("%Y-%m-%d").to_string())).into(),
            "status" => self.status.map(|s| s.as_str()).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Booking {
    type Draft = BookingDraft;

    const VIEW: &'static str = "bookings";

    const SEARCH_SCOPE: SearchScope = SearchScope::Fields(&["name", "room", "status"]);

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("id"))
    }

    fn from_draft(id: u64, draft: BookingDraft) -> Self {
        Booking {
            id,
            name: Some(draft.name),
            room: Some(draft.room),
            date: draft.date,
            status: draft.status,
        }
    }

    fn apply_action(&mut self, action: StatusAction) -> Result<(), AppError> {
        self.status = Some(match action {
            StatusAction::Approve | StatusAction::Confirm => BookingStatus::Confirmed,
            StatusAction::Reject | StatusAction::Cancel => BookingStatus::Cancelled,
        });
        Ok(())
    }
}
