use crate::report::ReportError;
use crate::store::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Product not found with id: {0}")]
    ProductNotFound(i64),

    #[error("Product not found with search: {0}")]
    SearchNotFound(String),

    #[error("No products found")]
    Empty,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Error al generar el reporte: {0}")]
    Report(#[from] ReportError),

    #[error("Service overloaded, please try again later")]
    ServiceOverloaded,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::ProductNotFound(_) => {
                (StatusCode::NOT_FOUND, "ProductNotFound", self.to_string())
            }
            Self::SearchNotFound(_) => (StatusCode::NOT_FOUND, "SearchNotFound", self.to_string()),
            Self::Empty => (StatusCode::NOT_FOUND, "Empty", self.to_string()),
            Self::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::Store(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
            Self::Report(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "ReportFailed",
                    self.to_string(),
                )
            }
            Self::ServiceOverloaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ServiceOverloaded",
                self.to_string(),
            ),
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::ProductNotFound(id),
            other => Self::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
