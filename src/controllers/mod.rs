pub mod collection;
pub mod dashboard;

use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::models::{Booking, Room, User};

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(dashboard::routes())
        .merge(collection::routes::<Room>())
        .merge(collection::routes::<User>())
        .merge(collection::routes::<Booking>())
}

// GET / - the navigation bar
pub async fn navigation() -> Json<Value> {
    Json(json!({
        "name": "Room Admin API",
        "views": [
            { "title": "Dashboard", "href": "/api/dashboard" },
            { "title": "Room", "href": "/api/rooms" },
            { "title": "User", "href": "/api/users" },
            { "title": "Booking", "href": "/api/bookings" }
        ]
    }))
}
