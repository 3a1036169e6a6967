use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{DomainErrorKind, Error as DomainError};

extern crate log;
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Every failure of a domain operation is reported to the client as a 400 with the
// domain error's message. Only authentication failures get their own status.
// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.0.error_kind {
            DomainErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            DomainErrorKind::Validation
            | DomainErrorKind::Entity(_)
            | DomainErrorKind::Notification(_)
            | DomainErrorKind::Config => StatusCode::BAD_REQUEST,
        };

        warn!("Request failed with {status}: {:?}", self.0);

        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
