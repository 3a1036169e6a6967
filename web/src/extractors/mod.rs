pub(crate) mod authenticated_actor;
pub(crate) mod json_body;

use axum::http::StatusCode;

type RejectionType = (StatusCode, String);
