use tracing::{info, warn};
use validator::Validate;

use super::ViewStore;
use crate::error::AppError;
use crate::fixtures;
use crate::models::{Entity, StatusAction};
use crate::pipeline::{Record, ViewSession};

/// Id for a new record: one past the largest id in use, 1 for an empty view.
/// `None` once the largest id is `u64::MAX`.
pub fn next_id<T: Record>(records: &[T]) -> Option<u64> {
    match records.iter().map(Record::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

impl<T: Entity> ViewStore<T> {
    pub async fn get(&self, id: u64) -> Result<T, AppError> {
        let state = self.state.read().await;
        state
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(AppError::NotFound { view: T::VIEW, id })
    }

    pub async fn create(&self, draft: T::Draft) -> Result<T, AppError> {
        draft.validate()?;

        let mut state = self.state.write().await;
        let id = next_id(&state.records).ok_or_else(|| {
            AppError::Validation(format!("{} has no free ids left", T::VIEW))
        })?;
        let record = T::from_draft(id, draft);
        state.records.push(record.clone());

        info!("{}: created record {}", T::VIEW, id);
        Ok(record)
    }

    pub async fn update(&self, id: u64, draft: T::Draft) -> Result<T, AppError> {
        draft.validate()?;

        let mut state = self.state.write().await;
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(AppError::NotFound { view: T::VIEW, id })?;
        record.apply_draft(draft);

        info!("{}: updated record {}", T::VIEW, id);
        Ok(record.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<T, AppError> {
        let mut state = self.state.write().await;
        let index = state
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(AppError::NotFound { view: T::VIEW, id })?;
        let removed = state.records.remove(index);

        info!("{}: deleted record {}", T::VIEW, id);
        Ok(removed)
    }

    pub async fn transition(&self, id: u64, action: StatusAction) -> Result<T, AppError> {
        let mut state = self.state.write().await;
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(AppError::NotFound { view: T::VIEW, id })?;

        // Work on a copy so a refused action leaves the stored record as it was.
        let mut updated = record.clone();
        if let Err(e) = updated.apply_action(action) {
            warn!("{}: refused {} on record {}", T::VIEW, action, id);
            return Err(e);
        }
        *record = updated.clone();

        info!("{}: applied {} to record {}", T::VIEW, action, id);
        Ok(updated)
    }

    /// Re-reads the fixture and drops every local change, session included.
    pub async fn reload(&self) -> usize {
        let records = fixtures::load_fixture::<T>(&self.config.fixture).await;

        let mut state = self.state.write().await;
        state.records = records;
        state.session = ViewSession::new(T::default_sort());

        info!("{}: reloaded {} records from fixture", T::VIEW, state.records.len());
        state.records.len()
    }
}
