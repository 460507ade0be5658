//! collection.rs
//!
//! Routes shared by every list view (`rooms`, `users`, `bookings`).
//!
//! Each view gets the same set of endpoints, generic over the record type:
//! - stateless listing with search, sort and page in the query string;
//! - the interactive session (search box, header clicks, prev/next);
//! - create, edit, delete and status changes on the in-memory collection;
//! - reloading the fixture, which throws local changes away.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::middleware::Confirmed;
use crate::models::{Booking, Entity, Room, StatusAction, User};
use crate::pipeline::{ListPage, ListQuery, SessionCommand, SortOrder, SortSpec};
use crate::store::{views::check_sort_key, SessionView, ViewStore};
use crate::AppState;

/// Ties a record type to the store that holds it.
pub trait ViewRoute: Entity {
    fn store(state: &AppState) -> &ViewStore<Self>;
}

impl ViewRoute for Room {
    fn store(state: &AppState) -> &ViewStore<Self> {
        &state.rooms
    }
}

impl ViewRoute for User {
    fn store(state: &AppState) -> &ViewStore<Self> {
        &state.users
    }
}

impl ViewRoute for Booking {
    fn store(state: &AppState) -> &ViewStore<Self> {
        &state.bookings
    }
}

pub fn routes<T: ViewRoute>() -> Router<Arc<AppState>> {
    let base = format!("/{}", T::VIEW);
    Router::new()
        .route(&base, get(list::<T>).post(create::<T>))
        .route(&format!("{}/session", base), get(session::<T>).post(apply_command::<T>))
        .route(&format!("{}/reload", base), post(reload::<T>))
        .route(
            &format!("{}/{{id}}", base),
            get(get_one::<T>).put(update::<T>).delete(delete::<T>),
        )
        .route(&format!("{}/{{id}}/status", base), patch(change_status::<T>))
}

/* ---------- LISTING ---------- */

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub page: Option<i64>,
}

impl ListParams {
    /// Without `sort` the view's default ordering applies and `order` is ignored.
    pub fn into_query<T: Entity>(self) -> Result<ListQuery, AppError> {
        let sort = match self.sort.filter(|key| !key.is_empty()) {
            Some(key) => {
                check_sort_key::<T>(&key)?;
                Some(SortSpec { key, order: self.order.unwrap_or_default() })
            }
            None => T::default_sort(),
        };

        Ok(ListQuery {
            search: self.search.unwrap_or_default(),
            sort,
            page: usize::try_from(self.page.unwrap_or(1)).unwrap_or(0).max(1),
        })
    }
}

// GET /api/{view}
async fn list<T: ViewRoute>(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListPage<T>>, AppError> {
    let Query(params) = params?;
    let query = params.into_query::<T>()?;
    Ok(Json(T::store(&state).list(&query).await))
}

// GET /api/{view}/session
async fn session<T: ViewRoute>(State(state): State<Arc<AppState>>) -> Json<SessionView<T>> {
    Json(T::store(&state).session_view().await)
}

// POST /api/{view}/session
async fn apply_command<T: ViewRoute>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SessionCommand>, JsonRejection>,
) -> Result<Json<SessionView<T>>, AppError> {
    let Json(command) = payload?;
    Ok(Json(T::store(&state).apply(command).await?))
}

/* ---------- RECORDS ---------- */

// GET /api/{view}/{id}
async fn get_one<T: ViewRoute>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<T>, AppError> {
    Ok(Json(T::store(&state).get(id).await?))
}

// POST /api/{view}
async fn create<T: ViewRoute>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<T::Draft>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(draft) = payload?;
    let record = T::store(&state).create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// PUT /api/{view}/{id}
async fn update<T: ViewRoute>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    payload: Result<Json<T::Draft>, JsonRejection>,
) -> Result<Json<T>, AppError> {
    let Json(draft) = payload?;
    Ok(Json(T::store(&state).update(id, draft).await?))
}

// DELETE /api/{view}/{id}?confirm=true
async fn delete<T: ViewRoute>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    _confirmed: Confirmed,
) -> Result<Json<T>, AppError> {
    Ok(Json(T::store(&state).delete(id).await?))
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    action: StatusAction,
}

// PATCH /api/{view}/{id}/status
async fn change_status<T: ViewRoute>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<T>, AppError> {
    let Json(change) = payload?;
    Ok(Json(T::store(&state).transition(id, change.action).await?))
}

// POST /api/{view}/reload
async fn reload<T: ViewRoute>(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let records = T::store(&state).reload().await;
    Json(json!({ "view": T::VIEW, "records": records }))
}
