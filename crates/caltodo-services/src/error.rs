//! Error type shared by the REST clients.

use caltodo_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request never produced a response (connection refused, reset, DNS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error body produced by the backend's exception handler.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl ServiceError {
    /// HTTP status of the failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `message` field of the backend's error body, when it sent one.
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Http { body, .. } => parse_server_message(body),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Localized message for notice dialogs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "네트워크 오류가 발생했습니다. 다시 시도해 주세요.".to_string(),
            Self::Http { status, .. } => match self.server_message() {
                Some(msg) => format!("요청이 실패했습니다 ({}): {}", status, msg),
                None => format!("요청이 실패했습니다 ({}).", status),
            },
            Self::Decode(_) => "서버 응답을 해석하지 못했습니다.".to_string(),
            Self::InvalidUrl(_) => "API 주소 설정이 올바르지 않습니다.".to_string(),
        }
    }
}

fn parse_server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Network(e) => AppError::Network(e.into_network_error()),
            ServiceError::Http { status, body } => {
                let message = parse_server_message(&body).unwrap_or(body);
                AppError::Network(NetworkError::ServerError { status, message })
            }
            ServiceError::Decode(s) => AppError::Network(NetworkError::InvalidResponse(s)),
            ServiceError::InvalidUrl(s) => AppError::Config(ConfigError::Invalid(s)),
        }
    }
}
