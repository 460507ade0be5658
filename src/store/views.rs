use serde::Serialize;

use super::{ViewState, ViewStore};
use crate::error::AppError;
use crate::models::Entity;
use crate::pipeline::{self, ListPage, ListQuery, SessionCommand, SortSpec};

/// Session state together with the rows it currently selects.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView<T> {
    pub search: String,
    pub sort: Option<SortSpec>,
    pub listing: ListPage<T>,
}

/// Sort keys must name a field of the record.
pub fn check_sort_key<T: Entity>(key: &str) -> Result<(), AppError> {
    if T::FIELDS.contains(&key) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "cannot sort {} by `{}`; expected one of: {}",
            T::VIEW,
            key,
            T::FIELDS.join(", ")
        )))
    }
}

impl<T: Entity> ViewStore<T> {
    /// Stateless projection of the current records.
    pub async fn list(&self, query: &ListQuery) -> ListPage<T> {
        let state = self.state.read().await;
        pipeline::run(&state.records, &self.options(), query)
    }

    pub async fn session_view(&self) -> SessionView<T> {
        let mut state = self.state.write().await;
        self.project_session(&mut state)
    }

    /// Applies one gesture to the session and returns the resulting view.
    pub async fn apply(&self, command: SessionCommand) -> Result<SessionView<T>, AppError> {
        if let SessionCommand::Sort { key } = &command {
            check_sort_key::<T>(key)?;
        }

        let mut state = self.state.write().await;
        state.session.apply(command, T::default_sort());
        Ok(self.project_session(&mut state))
    }

    fn project_session(&self, state: &mut ViewState<T>) -> SessionView<T> {
        let listing = pipeline::run(&state.records, &self.options(), &state.session.query());
        state.session.clamp_to(listing.page_count);
        SessionView {
            search: state.session.search().to_string(),
            sort: state.session.sort().cloned(),
            listing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, RoomStatus, User};
    use crate::pipeline::SortOrder;
    use crate::store::testing;

    #[tokio::test]
    async fn rooms_open_sorted_by_name() {
        let store = ViewStore::<Room>::new(
            testing::config(5),
            vec![
                testing::room(1, "Melati", 100, RoomStatus::Available),
                testing::room(2, "Anggrek", 200, RoomStatus::Occupied),
            ],
        );

        let view = store.session_view().await;

        assert_eq!(view.sort, Some(SortSpec::asc("name")));
        assert_eq!(view.listing.items[0].name, "Anggrek");
    }

    #[tokio::test]
    async fn next_on_last_page_stays_there() {
        let store = testing::users(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);

        store.apply(SessionCommand::Next).await.unwrap();
        let view = store.apply(SessionCommand::Next).await.unwrap();
        assert_eq!(view.listing.page, 2);

        let view = store.apply(SessionCommand::Prev).await.unwrap();
        assert_eq!(view.listing.page, 1);
    }

    #[tokio::test]
    async fn search_returns_to_first_page() {
        let store = testing::users(&(1..=25).collect::<Vec<_>>());
        store.apply(SessionCommand::Page { page: 3 }).await.unwrap();

        let view = store
            .apply(SessionCommand::Search { term: "user1".into() })
            .await
            .unwrap();

        assert_eq!(view.listing.page, 1);
        // user1, user10..user19
        assert_eq!(view.listing.total, 11);
    }

    #[tokio::test]
    async fn sort_clicks_toggle_direction() {
        let store = testing::users(&[3, 1, 2]);

        let view = store.apply(SessionCommand::Sort { key: "id".into() }).await.unwrap();
        assert_eq!(view.listing.items.iter().map(|u| u.id).collect::<Vec<_>>(), [1, 2, 3]);

        let view = store.apply(SessionCommand::Sort { key: "id".into() }).await.unwrap();
        assert_eq!(view.sort.map(|s| s.order), Some(SortOrder::Desc));
        assert_eq!(view.listing.items.iter().map(|u| u.id).collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[tokio::test]
    async fn unknown_sort_key_is_refused() {
        let store = testing::users(&[1]);
        let result = store.apply(SessionCommand::Sort { key: "password".into() }).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn user_search_ignores_email() {
        let store = ViewStore::<User>::new(
            testing::config(10),
            vec![
                User { id: 1, name: "Ana".into(), email: "budi@example.com".into() },
                User { id: 2, name: "Budi".into(), email: "x@example.com".into() },
            ],
        );

        let page = store
            .list(&ListQuery { search: "budi".into(), ..Default::default() })
            .await;

        assert_eq!(page.items.iter().map(|u| u.id).collect::<Vec<_>>(), [2]);
    }
}
