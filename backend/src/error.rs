//! Error handling for the Water Plant Inventory service
//!
//! Provides consistent error responses in English and Spanish. Deduction
//! errors surface the planner's taxonomy; store failures surface the generic
//! could-not-load / could-not-save messages the original UI showed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::DeductionError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        message_es: String,
    },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error(transparent)]
    Deduction(#[from] DeductionError),

    // Store errors
    #[error("Store read failure: {0}")]
    StoreRead(sqlx::Error),

    #[error("Store write failure: {0}")]
    StoreWrite(sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error code for a deduction failure, one per planner variant
fn deduction_code(err: &DeductionError) -> &'static str {
    match err {
        DeductionError::InvalidQuantity => "INVALID_QUANTITY",
        DeductionError::UnknownProduct(_) => "UNKNOWN_PRODUCT",
        DeductionError::MaterialNotFound(_) => "MATERIAL_NOT_FOUND",
        DeductionError::AmbiguousMaterial(_) => "AMBIGUOUS_MATERIAL",
        DeductionError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
    }
}

/// Spanish rendering of a deduction failure, matching the messages the
/// original production form showed
fn deduction_message_es(err: &DeductionError) -> String {
    match err {
        DeductionError::InvalidQuantity => {
            "La cantidad producida debe ser mayor a cero".to_string()
        }
        DeductionError::UnknownProduct(product) => {
            format!("Producto desconocido: {}", product)
        }
        DeductionError::MaterialNotFound(name) => {
            format!("No se encontró el insumo: {}", name)
        }
        DeductionError::AmbiguousMaterial(name) => {
            format!("El insumo coincide con más de un registro: {}", name)
        }
        DeductionError::InsufficientStock {
            name,
            available,
            required,
            ..
        } => format!(
            "No hay stock suficiente de {}. Disponible: {}, requerido: {}",
            name, available, required
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_CREDENTIALS".to_string(),
                    message_en: "Invalid email or password".to_string(),
                    message_es: "Usuario o contraseña incorrectos".to_string(),
                    field: None,
                },
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "TOKEN_EXPIRED".to_string(),
                    message_en: "Token has expired".to_string(),
                    message_es: "El token ha expirado".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "INVALID_TOKEN".to_string(),
                    message_en: "Invalid token".to_string(),
                    message_es: "Token inválido".to_string(),
                    field: None,
                },
            ),
            AppError::Unauthorized { message, message_es } => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: None,
                },
            ),
            AppError::Validation { field, message, message_es } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateEntry(field) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message_en: format!("A record with this {} already exists", field),
                    message_es: format!("Ya existe un registro con este {}", field),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_es: format!("No se encontró {}", resource),
                    field: None,
                },
            ),
            AppError::Deduction(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: deduction_code(err).to_string(),
                    message_en: err.to_string(),
                    message_es: deduction_message_es(err),
                    field: None,
                },
            ),
            AppError::StoreRead(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STORE_READ_FAILURE".to_string(),
                    message_en: "Could not load data from the store".to_string(),
                    message_es: "No se pudieron cargar los datos".to_string(),
                    field: None,
                },
            ),
            AppError::StoreWrite(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STORE_WRITE_FAILURE".to_string(),
                    message_en: "Could not save data to the store".to_string(),
                    message_es: "Ocurrió un error al guardar".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
