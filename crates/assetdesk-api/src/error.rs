//! Maps domain `AppError` to HTTP responses.

// The `IntoResponse` impl lives next to `AppError` in `assetdesk-core`
// (orphan rule); re-exported here so existing paths keep working.
pub use assetdesk_core::error::{ApiErrorResponse, status_for};

#[cfg(test)]
use assetdesk_core::error::{AppError, ErrorKind};
#[cfg(test)]
use axum::http::StatusCode;
#[cfg(test)]
use axum::response::IntoResponse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_to_status() {
        assert_eq!(status_for(ErrorKind::NotFound).0, StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Validation).0, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Conflict).0, StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::Database).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::conflict("This email address is already in use").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: ApiErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "CONFLICT");
        assert_eq!(body.message, "This email address is already in use");
        assert!(body.details.is_none());
    }
}
