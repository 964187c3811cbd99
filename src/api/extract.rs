//! JSON body extractor whose rejections use the error envelope.

use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::models::ErrorResponse;

/// Like [`axum::Json`], but a malformed body is answered with
/// `{"message": ...}` and the status axum picked (400, 415 or 422).
/// Field rules are not checked here; the service does that.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(data)) => Ok(JsonBody(data)),
            Err(rejection) => {
                debug!(status = %rejection.status(), "rejected request body");
                Err((rejection.status(), Json(ErrorResponse::new(rejection.body_text()))).into_response())
            }
        }
    }
}
