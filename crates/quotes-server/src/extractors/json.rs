//! JSON body extractor with typed rejections

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body deserialized into a payload type that lists its accepted
/// fields (`#[serde(deny_unknown_fields)]`).
///
/// Unknown keys, missing required keys, malformed JSON and a missing
/// `Content-Type` all become [`ApiError::Validation`].
pub struct AllowListedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AllowListedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                ApiError::Validation(rejection.body_text())
            })?;
        Ok(Self(value))
    }
}
