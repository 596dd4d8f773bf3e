use std::error::Error;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::{bson, error::Error as MongoError};
use thiserror::Error;
use bson::ser::Error as BsonError;
use bson::de::Error as BsonDeError;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    MongoError(#[from] MongoError),

    #[error("Serialization error")]
    SerializationError(#[from] BsonError),

    #[error("Deserialization error")]
    DeserializationError(#[from] BsonDeError)
}

impl ApiError {
    pub fn owner_not_found(id: u32) -> Self {
        ApiError::NotFound(format!("Owner {} not found", id))
    }

    pub fn pet_not_found(id: u32) -> Self {
        ApiError::NotFound(format!("Pet {} not found", id))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::InvalidData(_)
            | ApiError::SerializationError(_)
            | ApiError::DeserializationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) | ApiError::MongoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let code = status.as_u16();

        match self {
            ApiError::BadRequest(message)
            | ApiError::InvalidData(message)
            | ApiError::NotFound(message)
            | ApiError::InternalServerError(message) => {
                HttpResponse::build(status).json(serde_json::json!({
                    "error": message,
                    "code": code
                }))
            },
            ApiError::MongoError(message) => {
                HttpResponse::build(status).json(serde_json::json!({
                    "error": format!("Database error: {}", message),
                    "code": code,
                    "details": message.source().map(|src| src.to_string())
                }))
            },
            ApiError::SerializationError(message) => {
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Invalid data format",
                    "code": code,
                    "details": message.source().map(|src| src.to_string())
                }))
            },
            ApiError::DeserializationError(message) => {
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Invalid data format",
                    "code": code,
                    "details": message.source().map(|src| src.to_string())
                }))
            }
        }
    }
}

// ----------------------------- TESTS --------------------------------
