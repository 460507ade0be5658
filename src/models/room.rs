use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use super::{blank_as_none, lenient, Entity, StatusAction, UnknownStatus};
use crate::error::AppError;
use crate::pipeline::{FieldValue, Record, SearchScope, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RoomStatus {
    Available,
    Unavailable,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Unavailable => "Unavailable",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Maintenance => "Maintenance",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(RoomStatus::Available),
            "unavailable" => Ok(RoomStatus::Unavailable),
            "occupied" => Ok(RoomStatus::Occupied),
            "maintenance" => Ok(RoomStatus::Maintenance),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for RoomStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    #[serde(default, alias = "nama")]
    pub name: String,
    #[serde(default, alias = "kapasitas")]
    pub capacity: i64,
    #[serde(default, alias = "kategori")]
    pub category: String,
    #[serde(default, alias = "harga")]
    pub price: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RoomDraft {
    #[serde(alias = "nama")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(alias = "kapasitas")]
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: i64,
    #[serde(alias = "kategori")]
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(alias = "harga")]
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required(message = "status is required"))]
    pub status: Option<RoomStatus>,
}

impl Record for Room {
    const FIELDS: &'static [&'static str] = &["id", "name", "capacity", "category", "price", "status"];

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        let value = match key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "capacity" => self.capacity.into(),
            "category" => self.category.as_str().into(),
            "price" => self.price.into(),
            "status" => self.status.map(|s| s.as_str()).into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Room {
    type Draft = RoomDraft;

    const VIEW: &'static str = "rooms";

    const SEARCH_SCOPE: SearchScope = SearchScope::AllFields;

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::asc("name"))
    }

    fn from_draft(id: u64, draft: RoomDraft) -> Self {
        Room {
            id,
            name: draft.name,
            capacity: draft.capacity,
            category: draft.category,
            price: draft.price,
            status: draft.status,
        }
    }

    fn apply_action(&mut self, action: StatusAction) -> Result<(), AppError> {
        self.status = Some(match action {
            StatusAction::Approve => RoomStatus::Available,
            StatusAction::Reject => RoomStatus::Unavailable,
            other => return Err(super::unsupported(Self::VIEW, other)),
        });
        Ok(())
    }
}
