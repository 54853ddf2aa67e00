use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No route matches path: {path}")]
    RouteNotFound { path: String },
}

impl ClientError {
    /// Short message suitable for the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::Http(e) if e.is_timeout() => "後端回應逾時".to_string(),
            ClientError::Http(e) if e.is_connect() => "無法連線到後端服務".to_string(),
            ClientError::Http(e) => match e.status() {
                Some(status) => format!("後端回傳錯誤狀態 {}", status),
                None => format!("請求失敗: {}", e),
            },
            ClientError::RouteNotFound { path } => format!("找不到頁面: {}", path),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClientError::Http(e) if e.is_timeout() || e.is_connect() => {
                "確認後端已啟動，並檢查 --base-url 設定"
            }
            ClientError::Http(_) => "檢查請求參數，或查看後端日誌",
            ClientError::ConfigParse { .. } | ClientError::InvalidConfigValue { .. } => {
                "檢查設定檔與命令列參數"
            }
            ClientError::RouteNotFound { .. } => "使用 `routes` 指令列出可用頁面",
            ClientError::Io(_) | ClientError::Serialization(_) => "請重試，若持續發生請回報問題",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
