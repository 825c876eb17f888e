use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tickerbook_core::errors::{DatabaseError, Error as CoreError, FieldErrors, ValidationError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

/// Failure half of the response envelope.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    ok: bool,
    field_errors: FieldErrors,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
                CoreError::MarketData(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let (message, field_errors) = match self {
            ApiError::Core(CoreError::Validation(ValidationError::Fields {
                message,
                field_errors,
            })) => (message, field_errors),
            other => (other.to_string(), FieldErrors::new()),
        };

        let body = Json(ErrorBody {
            ok: false,
            field_errors,
            message,
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tickerbook_core::errors::FieldErrorsBuilder;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(CoreError::not_found("purchase x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::Database(DatabaseError::UniqueViolation("x".into()))).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(CoreError::Unexpected("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let mut builder = FieldErrorsBuilder::new();
        builder.add("buyPrice", "Buy price must be greater than 0");
        let validation = builder.finish("Invalid purchase").unwrap_err();
        assert_eq!(ApiError::from(validation).status(), StatusCode::BAD_REQUEST);
    }
}
