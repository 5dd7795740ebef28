//! Error taxonomy shared by the planner crates.
//!
//! Remote failures land in `NetworkError`, the SQLite mirror in
//! `StorageError`, and a bad API address in `ConfigError`. Each carries a
//! Korean `user_message()` for notice dialogs; `Display` keeps the detail
//! for logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Planner-level failure with no better home, e.g. an invalid month.
    #[error("Service error: {0}")]
    Service(String),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Service(_) => "요청을 처리하지 못했습니다. 다시 시도해 주세요.",
        }
    }
}

/// Talking to the CalTodo backend failed.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response; `message` is the backend's `ApiError.message` when present.
    #[error("HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Undecodable response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "네트워크 오류가 발생했습니다. 연결 상태를 확인해 주세요."
            }
            NetworkError::Timeout => "요청 시간이 초과되었습니다. 다시 시도해 주세요.",
            NetworkError::ServerError { status: 404, .. } => {
                "항목을 찾을 수 없습니다. 새로고침 후 다시 시도해 주세요."
            }
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "서버에 문제가 발생했습니다. 잠시 후 다시 시도해 주세요."
            }
            NetworkError::ServerError { .. } => "요청이 거부되었습니다. 입력을 확인해 주세요.",
            NetworkError::InvalidResponse(_) => "서버 응답을 해석하지 못했습니다.",
        }
    }
}

/// The local storage mirror (SQLite key/value table) failed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cannot open local storage: {0}")]
    OpenFailed(String),

    #[error("Local storage query failed: {0}")]
    QueryFailed(String),

    #[error("Local storage is corrupt: {0}")]
    Corruption(String),

    #[error("Cannot serialize planner data: {0}")]
    Serialization(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::OpenFailed(_) => "로컬 저장소를 열 수 없습니다.",
            StorageError::QueryFailed(_) => "로컬 저장에 실패했습니다.",
            StorageError::Corruption(_) => "로컬 데이터가 손상되었을 수 있습니다.",
            StorageError::Serialization(_) => "로컬 데이터를 저장하지 못했습니다.",
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config value (API origin, storage path) failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "설정이 올바르지 않습니다.",
        }
    }
}

/// Classify a reqwest failure.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            return NetworkError::Timeout;
        }
        if self.is_decode() {
            return NetworkError::InvalidResponse(self.to_string());
        }
        match self.status() {
            Some(status) => NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            },
            None => NetworkError::ConnectionFailed(self.to_string()),
        }
    }
}

/// Classify a rusqlite failure.
pub trait RusqliteErrorExt {
    fn into_storage_error(self) -> StorageError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_storage_error(self) -> StorageError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                StorageError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(_, _) => StorageError::OpenFailed(self.to_string()),
            _ => StorageError::QueryFailed(self.to_string()),
        }
    }
}
