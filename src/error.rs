//! Application error type with HTTP status code mapping.
//!
//! [`AppError`] is the single error type of the service. Every variant maps
//! to an HTTP status, a numeric code and a destructive toast, so any failure
//! reaching a handler is shown to the user the same way: as a transient
//! notification carrying either a generic or a backend-supplied message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::Toast;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": { "code": 2002, "message": "Você já possui um ingresso para este evento." },
///   "toast": { "variant": "destructive", "title": "Já inscrito", "description": "..." }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error payload.
    pub error: ErrorBody,
    /// Notification the page shows.
    pub toast: Toast,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`AppError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 / 401                    |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
/// | 4000–4999 | Plan rules      | 422 Unprocessable Entity     |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required form field is empty.
    #[error("Preencha todos os campos obrigatórios ({0}).")]
    MissingFields(String),

    /// A field is present but unusable.
    #[error("{0}")]
    InvalidRequest(String),

    /// An organizer registered without choosing a plan.
    #[error("Organizadores devem escolher um plano.")]
    PlanRequired,

    /// No user matches the login e-mail.
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    /// The referenced row does not exist.
    #[error("{entity} não encontrado: {id}")]
    NotFound {
        /// Entity kind (e.g. `"Evento"`).
        entity: &'static str,
        /// Requested identifier.
        id: uuid::Uuid,
    },

    /// The participant already holds a ticket for the event.
    #[error("Você já possui um ingresso para este evento.")]
    AlreadyRegistered,

    /// The backend rejected a write because of a constraint.
    #[error("{0}")]
    Conflict(String),

    /// The organizer's plan does not allow another event.
    #[error("Seu plano permite no máximo {max_events} eventos.")]
    PlanLimitReached {
        /// Event cap of the organizer's plan.
        max_events: i32,
    },

    /// Backend failure with the message it supplied.
    #[error("{0}")]
    Backend(String),

    /// Internal server error.
    #[error("Erro interno: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for [`AppError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<uuid::Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingFields(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::PlanRequired => 1003,
            Self::InvalidCredentials => 1004,
            Self::NotFound { .. } => 2001,
            Self::AlreadyRegistered => 2002,
            Self::Conflict(_) => 2003,
            Self::Internal(_) => 3000,
            Self::Backend(_) => 3001,
            Self::PlanLimitReached { .. } => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::InvalidRequest(_) | Self::PlanRequired => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyRegistered | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PlanLimitReached { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Backend(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Title of the toast shown for this error.
    #[must_use]
    pub const fn toast_title(&self) -> &'static str {
        match self {
            Self::MissingFields(_) => "Campos obrigatórios",
            Self::InvalidRequest(_) => "Dados inválidos",
            Self::PlanRequired => "Plano obrigatório",
            Self::InvalidCredentials => "Erro no login",
            Self::NotFound { .. } => "Não encontrado",
            Self::AlreadyRegistered => "Já inscrito",
            Self::Conflict(_) => "Operação não permitida",
            Self::PlanLimitReached { .. } => "Limite do plano atingido",
            Self::Backend(_) | Self::Internal(_) => "Erro",
        }
    }

    /// Converts the error into the toast a page shows.
    #[must_use]
    pub fn to_toast(&self) -> Toast {
        Toast::destructive(self.toast_title(), self.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::RowNotFound => Self::Backend("registro não encontrado".to_string()),
            sqlx::Error::Database(ref db) => match db.kind() {
                ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation => {
                    Self::Conflict(db.message().to_string())
                }
                _ => Self::Backend(db.message().to_string()),
            },
            other => Self::Backend(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
            toast: self.to_toast(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::ToastVariant;

    #[test]
    fn codes_fall_in_their_ranges() {
        assert_eq!(AppError::MissingFields("title".into()).error_code(), 1001);
        assert_eq!(AppError::not_found("Evento", uuid::Uuid::nil()).error_code(), 2001);
        assert_eq!(AppError::Backend("down".into()).error_code(), 3001);
        assert_eq!(AppError::PlanLimitReached { max_events: 3 }.error_code(), 4001);
    }

    #[test]
    fn statuses_match_categories() {
        assert_eq!(AppError::PlanRequired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AlreadyRegistered.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn toast_is_destructive_and_carries_message() {
        let toast = AppError::AlreadyRegistered.to_toast();
        assert_eq!(toast.variant, ToastVariant::Destructive);
        assert_eq!(toast.title, "Já inscrito");
        assert_eq!(toast.description, "Você já possui um ingresso para este evento.");
    }

    #[test]
    fn backend_message_is_passed_through() {
        let err = AppError::Backend("connection reset".into());
        assert_eq!(err.to_toast().description, "connection reset");
    }

    #[test]
    fn row_not_found_maps_to_backend_error() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.error_code(), 3001);
    }

    #[test]
    fn response_uses_variant_status() {
        let response = AppError::not_found("Evento", uuid::Uuid::nil()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
