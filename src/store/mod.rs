use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::info;

use crate::fixtures;
use crate::models::Entity;
use crate::pipeline::{ViewOptions, ViewSession};

pub mod mutations;
pub mod views;

pub use mutations::next_id;
pub use views::SessionView;

/// Where a view's records come from and how many rows a page shows.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub fixture: PathBuf,
    pub page_size: usize,
}

struct ViewState<T> {
    records: Vec<T>,
    session: ViewSession,
}

/// In-memory collection and interactive state of one admin view.
///
/// Nothing here is shared between views and nothing is written back to the
/// fixture; a reload discards every local change.
pub struct ViewStore<T: Entity> {
    config: StoreConfig,
    state: RwLock<ViewState<T>>,
}

impl<T: Entity> ViewStore<T> {
    pub fn new(config: StoreConfig, records: Vec<T>) -> Self {
        Self {
            config,
            state: RwLock::new(ViewState {
                records,
                session: ViewSession::new(T::default_sort()),
            }),
        }
    }

    /// Seeds the store from its fixture. A broken fixture gives an empty view.
    pub async fn load(config: StoreConfig) -> Self {
        let records = fixtures::load_fixture::<T>(&config.fixture).await;
        info!("{} view ready with {} records", T::VIEW, records.len());
        Self::new(config, records)
    }

    pub fn options(&self) -> ViewOptions {
        ViewOptions {
            page_size: self.config.page_size.max(1),
            scope: T::SEARCH_SCOPE,
        }
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.state.read().await.records.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::models::{Booking, Room, RoomStatus, User};

    pub fn config(page_size: usize) -> StoreConfig {
        StoreConfig { fixture: PathBuf::from("/nonexistent/fixture.json"), page_size }
    }

    pub fn room(id: u64, name: &str, price: i64, status: RoomStatus) -> Room {
        Room {
            id,
            name: name.to_string(),
            capacity: 10,
            category: "Meeting".to_string(),
            price,
            status: Some(status),
        }
    }

    pub fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    pub fn users(ids: &[u64]) -> ViewStore<User> {
        ViewStore::new(config(10), ids.iter().map(|id| user(*id, &format!("user{}", id))).collect())
    }

    pub fn bookings() -> ViewStore<Booking> {
        ViewStore::new(config(5), Vec::new())
    }
}
