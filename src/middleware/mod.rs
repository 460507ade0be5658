use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::AppError;

const CONFIRM_HEADER: &str = "x-confirm";

/// Proof that the caller confirmed a destructive action, either with
/// `?confirm=true` or an `X-Confirm: true` header.
#[derive(Debug, Clone, Copy)]
pub struct Confirmed;

#[derive(Debug, Default, Deserialize)]
struct ConfirmParams {
    confirm: Option<String>,
}

fn is_yes(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

impl<S> FromRequestParts<S> for Confirmed
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let by_header = parts
            .headers
            .get(CONFIRM_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_yes);

        let by_query = Query::<ConfirmParams>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(params)| params.confirm)
            .is_some_and(|value| is_yes(&value));

        if by_header || by_query {
            Ok(Confirmed)
        } else {
            Err(AppError::ConfirmationRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<Confirmed, AppError> {
        let (mut parts, _) = request.into_parts();
        Confirmed::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_query_flag() {
        let request = Request::builder().uri("/api/rooms/1?confirm=true").body(()).unwrap();
        assert!(extract(request).await.is_ok());
    }

    #[tokio::test]
    async fn accepts_header() {
        let request = Request::builder()
            .uri("/api/rooms/1")
            .header("X-Confirm", "yes")
            .body(())
            .unwrap();
        assert!(extract(request).await.is_ok());
    }

    #[tokio::test]
    async fn refuses_without_confirmation() {
        let request = Request::builder().uri("/api/rooms/1?confirm=false").body(()).unwrap();
        assert!(matches!(extract(request).await, Err(AppError::ConfirmationRequired)));
    }
}
