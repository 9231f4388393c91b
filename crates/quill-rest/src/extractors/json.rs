//! JSON body extractor that reports failures in the API error envelope.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use quill_core::QuillError;
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] on the request side.
///
/// A missing content type, malformed JSON or a body of the wrong shape all
/// become `QuillError::Validation` (400).
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_app_error)?;
        Ok(Self(value))
    }
}

fn json_rejection_to_app_error(rejection: JsonRejection) -> AppError {
    AppError(QuillError::validation(format!(
        "Invalid JSON body: {}",
        rejection.body_text()
    )))
}
