//! Request extractors that report every input problem through
//! [`HttpError::Validation`].
//!
//! Axum's own `Json`, `Query` and `Path` reject malformed input with a mix of
//! 400/422 plain-text responses. The wrappers here run the same extraction,
//! then apply `garde` rules where the target type has them, so a handler sees
//! either a fully checked value or never runs at all.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::Json;
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::validation::{validate, ValidationErrorResponse};

/// JSON body deserialized into `T` and validated with `garde`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

/// Query string deserialized into `T` and validated with `garde`.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

/// Path parameters deserialized into `T`. A value that does not parse is a
/// validation failure on the `path` field.
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + garde::Validate,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(from_json_rejection)?;
        validate(&value)?;
        Ok(ValidJson(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + garde::Validate,
    T::Context: Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(from_query_rejection)?;
        validate(&value)?;
        Ok(ValidQuery(value))
    }
}

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(from_path_rejection)?;
        Ok(PathParam(value))
    }
}

fn from_json_rejection(rejection: JsonRejection) -> HttpError {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            ValidationErrorResponse::single("body", rejection.body_text(), "json").into()
        }
        other => HttpError::Custom {
            status: other.status(),
            body: serde_json::json!({ "error": other.body_text() }),
        },
    }
}

fn from_query_rejection(rejection: QueryRejection) -> HttpError {
    ValidationErrorResponse::single("query", rejection.body_text(), "query").into()
}

fn from_path_rejection(rejection: PathRejection) -> HttpError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(_) => {
            ValidationErrorResponse::single("path", rejection.body_text(), "path").into()
        }
        other => HttpError::Internal(other.body_text()),
    }
}
