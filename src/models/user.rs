use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;
use crate::pipeline::{FieldValue, Record, SearchScope, SortSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default, alias = "nama")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserDraft {
    #[serde(alias = "nama")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

impl Record for User {
    const FIELDS: &'static [&'static str] = &["id", "name", "email"];

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            _ => None,
        }
    }
}

impl Entity for User {
    type Draft = UserDraft;

    const VIEW: &'static str = "users";

    // The user table searches by name only.
    const SEARCH_SCOPE: SearchScope = SearchScope::Fields(&["name"]);

    fn default_sort() -> Option<SortSpec> {
        None
    }

    fn from_draft(id: u64, draft: UserDraft) -> Self {
        User { id, name: draft.name, email: draft.email }
    }
}
