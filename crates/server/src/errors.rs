use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, info};

use crate::views;

/// Failure of a page handler, rendered as an HTML error page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Body could not be read as a url-encoded form.
    #[error(transparent)]
    BadForm(#[from] FormRejection),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::Service(ServiceError::InvalidId(_) | ServiceError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            PageError::Service(ServiceError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            PageError::BadForm(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            PageError::Service(err @ (ServiceError::InvalidId(_) | ServiceError::NotFound(_))) => {
                info!(error = %err, "animal lookup failed");
                "That animal does not exist."
            }
            PageError::Service(ServiceError::Db(msg)) => {
                error!(error = %msg, "document store request failed");
                "Something went wrong while talking to the database."
            }
            PageError::BadForm(rejection) => {
                info!(status = status.as_u16(), error = %rejection.body_text(), "form submission rejected");
                "The submitted form could not be read."
            }
        };
        (status, views::error_page(status, message)).into_response()
    }
}
