use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::views;

/// Error type returned by request handlers, rendered as an HTML error page.
///
/// Validation failures never reach this type. They are recovered where they
/// occur by re-rendering the offending form with messages at HTTP 200.
pub enum AppError {
    /// A record id did not resolve to a row.
    NotFound(String),
    /// Anything unexpected. Details go to the log, the client gets a
    /// generic page.
    Internal(anyhow::Error),
}

impl AppError {
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, page) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, views::not_found(&msg)),
            Self::Internal(err) => {
                tracing::error!("unhandled error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, views::internal_error())
            }
        };
        (status, Html(page)).into_response()
    }
}

/// Lets `?` lift any error convertible to `anyhow::Error` into
/// `AppError::Internal`.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
