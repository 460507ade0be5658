pub mod config;
pub mod controllers;
pub mod error;
pub mod fixtures;
pub mod middleware;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod store;

use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use models::{Booking, Room, User};
use store::{StoreConfig, ViewStore};

// One store per list view; nothing is shared between them
pub struct AppState {
    pub config: config::Config,
    pub rooms: ViewStore<Room>,
    pub users: ViewStore<User>,
    pub bookings: ViewStore<Booking>,
}

impl AppState {
    /// Seeds every view from its fixture. Views whose fixture cannot be read start empty.
    pub async fn new(config: config::Config) -> Arc<Self> {
        let (rooms, users, bookings) = tokio::join!(
            ViewStore::load(rooms_store(&config)),
            ViewStore::load(users_store(&config)),
            ViewStore::load(bookings_store(&config)),
        );
        Arc::new(Self { config, rooms, users, bookings })
    }

    /// State over records supplied by the caller instead of fixture files.
    pub fn with_records(
        config: config::Config,
        rooms: Vec<Room>,
        users: Vec<User>,
        bookings: Vec<Booking>,
    ) -> Arc<Self> {
        Arc::new(Self {
            rooms: ViewStore::new(rooms_store(&config), rooms),
            users: ViewStore::new(users_store(&config), users),
            bookings: ViewStore::new(bookings_store(&config), bookings),
            config,
        })
    }
}

fn rooms_store(config: &config::Config) -> StoreConfig {
    StoreConfig {
        fixture: config.fixtures.rooms_path(),
        page_size: config.views.rooms_page_size,
    }
}

fn users_store(config: &config::Config) -> StoreConfig {
    StoreConfig {
        fixture: config.fixtures.users_path(),
        page_size: config.views.users_page_size,
    }
}

fn bookings_store(config: &config::Config) -> StoreConfig {
    StoreConfig {
        fixture: config.fixtures.bookings_path(),
        page_size: config.views.bookings_page_size,
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static("x-confirm"),
        ]);

    Router::new()
        .route("/", get(controllers::navigation))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
