// src/errors.rs
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoloBrandError {
    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Text generation error: {0}")]
    TextGeneration(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HoloBrandError {
    fn category(&self) -> &'static str {
        match self {
            HoloBrandError::ImageProcessing(_) => "Image processing error",
            HoloBrandError::TextGeneration(_) => "AI service error",
            HoloBrandError::NotConfigured(_) => "AI service unavailable",
            HoloBrandError::Validation(_) => "Validation error",
            HoloBrandError::Serialization(_) => "Data processing error",
        }
    }
}

impl ResponseError for HoloBrandError {
    fn status_code(&self) -> StatusCode {
        match self {
            HoloBrandError::ImageProcessing(_) | HoloBrandError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            HoloBrandError::TextGeneration(_) | HoloBrandError::NotConfigured(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            HoloBrandError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.category(),
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = HoloBrandError::Validation("missing field `colors`".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Validation error: missing field `colors`");
    }

    #[test]
    fn text_generation_maps_to_service_unavailable() {
        let err = HoloBrandError::TextGeneration("timeout".to_string());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            HoloBrandError::NotConfigured("OPENAI_API_KEY".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn serialization_maps_to_internal_error() {
        let err = HoloBrandError::Serialization("Layout could not be encoded".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.category(), "Data processing error");
    }
}
