//! Request extraction that rejects in the standard error envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use ekono_core::error::CoreError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that also runs the payload's [`Validate`] rules.
///
/// Malformed JSON, a missing content type, unknown or missing fields, and
/// rule violations all reject with 400 `VALIDATION_ERROR` in the standard
/// error envelope instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreatePipelineRequest>) { .. }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))?;

        value
            .validate()
            .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

        Ok(ValidatedJson(value))
    }
}

/// Path extractor whose rejection is a JSON 400 `VALIDATION_ERROR`.
///
/// A segment that does not parse into `T` (for example `/pipelines/abc`, or
/// an id past `i64::MAX`) would otherwise get axum's plain-text 400.
#[derive(Debug, Clone, Copy)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Core(CoreError::Validation(rejection.body_text())))?;
        Ok(PathParam(value))
    }
}
