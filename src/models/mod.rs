pub mod booking;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingDraft, BookingStatus};
pub use room::{Room, RoomDraft, RoomStatus};
pub use user::{User, UserDraft};

use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use tracing::warn;
use validator::Validate;

use crate::error::AppError;
use crate::pipeline::{Record, SearchScope, SortSpec};

/// Status-changing buttons of the admin tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Approve,
    Reject,
    Confirm,
    Cancel,
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusAction::Approve => "approve",
            StatusAction::Reject => "reject",
            StatusAction::Confirm => "confirm",
            StatusAction::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status `{0}`")]
pub struct UnknownStatus(pub String);

/// A record type that backs one admin list view.
pub trait Entity: Record + Serialize + DeserializeOwned {
    /// Form input for create and edit.
    type Draft: Validate + DeserializeOwned + Send + 'static;

    /// Route segment and log name of the view.
    const VIEW: &'static str;

    const SEARCH_SCOPE: SearchScope;

    fn default_sort() -> Option<SortSpec>;

    fn from_draft(id: u64, draft: Self::Draft) -> Self;

    /// Edit keeps the id and replaces every form field.
    fn apply_draft(&mut self, draft: Self::Draft) {
        *self = Self::from_draft(self.id(), draft);
    }

    fn apply_action(&mut self, action: StatusAction) -> Result<(), AppError> {
        Err(unsupported(Self::VIEW, action))
    }
}

pub(crate) fn unsupported(view: &str, action: StatusAction) -> AppError {
    AppError::Validation(format!("action `{}` is not available for {}", action, view))
}

/// Optional value parsed from a string field; absent, null and blank all map to `None`.
pub(crate) fn blank_as_none<'de, D, S>(deserializer: D) -> Result<Option<S>, D::Error>
where
    D: Deserializer<'de>,
    S: FromStr,
    S::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Fixture cell read like [`blank_as_none`], except that a value which does
/// not parse is logged and read as `None` instead of failing the whole row.
pub(crate) fn lenient<'de, D, S>(deserializer: D) -> Result<Option<S>, D::Error>
where
    D: Deserializer<'de>,
    S: FromStr,
    S::Err: fmt::Display,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    };

    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!("Blanking unreadable fixture value `{}`: {}", value, e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_lowercase_names() {
        let action: StatusAction = serde_json::from_str("\"approve\"").unwrap();
        assert_eq!(action, StatusAction::Approve);
        assert_eq!(StatusAction::Cancel.to_string(), "cancel");
    }

    #[derive(Debug, Deserialize)]
    struct Cell {
        #[serde(default, deserialize_with = "lenient")]
        status: Option<RoomStatus>,
    }

    #[test]
    fn lenient_cells_blank_what_they_cannot_read() {
        let cell: Cell = serde_json::from_str(r#"{"status": "occupied"}"#).unwrap();
        assert_eq!(cell.status, Some(RoomStatus::Occupied));

        for raw in [r#"{"status": "Booked"}"#, r#"{"status": 3}"#, r#"{"status": "  "}"#, r#"{}"#] {
            let cell: Cell = serde_json::from_str(raw).unwrap();
            assert_eq!(cell.status, None, "{}", raw);
        }
    }

    #[test]
    fn users_reject_every_status_action() {
        let mut user = User { id: 1, name: "Ana".into(), email: "ana@example.com".into() };
        assert!(matches!(user.apply_action(StatusAction::Approve), Err(AppError::Validation(_))));
    }
}
