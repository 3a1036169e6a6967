use crate::Error;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use domain::error::Error as DomainError;
use log::*;
use serde::de::DeserializeOwned;

/// A JSON request body whose rejections are reported like any other invalid
/// input: 400 with a `{message}` body.
pub(crate) struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!("Rejecting request body: {rejection}");
                Err(DomainError::validation(rejection.body_text()).into())
            }
        }
    }
}
