use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partial settings update, forwarded to the backend as-is.
pub type ConfigPatch = Map<String, Value>;

/// Query parameters for the large-file listing, forwarded as-is.
pub type QueryParams = Map<String, Value>;

/// Typed convenience for building [`QueryParams`] for `/api/scan/large-files`.
/// Unset fields are left out so the backend applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LargeFileQuery {
    pub drive: Option<String>,
    pub min_size_mb: Option<f64>,
    pub extensions: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl LargeFileQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drive(mut self, drive: impl Into<String>) -> Self {
        self.drive = Some(drive.into());
        self
    }

    pub fn min_size_mb(mut self, mb: f64) -> Self {
        self.min_size_mb = Some(mb);
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn into_params(self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(drive) = self.drive {
            params.insert("drive".to_string(), Value::String(drive));
        }
        if let Some(mb) = self.min_size_mb {
            // Whole numbers go out as integers so the query reads `500`, not `500.0`.
            let value = if mb.fract() == 0.0 && mb.abs() < i64::MAX as f64 {
                Value::from(mb as i64)
            } else {
                Value::from(mb)
            };
            params.insert("min_size_mb".to_string(), value);
        }
        if !self.extensions.is_empty() {
            // Backend splits on commas.
            params.insert(
                "extensions".to_string(),
                Value::String(self.extensions.join(",")),
            );
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), Value::from(limit));
        }
        if let Some(offset) = self.offset {
            params.insert("offset".to_string(), Value::from(offset));
        }
        params
    }
}

impl From<LargeFileQuery> for QueryParams {
    fn from(query: LargeFileQuery) -> Self {
        query.into_params()
    }
}

// Read models for the backend's responses. The client returns raw JSON;
// these are for callers that want typed access.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveInfo {
    pub drive: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub free_percent: f64,
    pub usn_available: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeFileItem {
    pub path: String,
    pub size_bytes: u64,
    pub mtime_ns: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeFilesPage {
    pub items: Vec<LargeFileItem>,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub start_with_windows: bool,
    /// `minimize_to_tray` or `quit`.
    pub on_close: String,
    pub disk_thresholds: Vec<DiskThreshold>,
    pub cleanup_rules: Vec<CleanupRule>,
    pub notification: NotificationSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            start_with_windows: false,
            on_close: "minimize_to_tray".to_string(),
            disk_thresholds: Vec::new(),
            cleanup_rules: Vec::new(),
            notification: NotificationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskThreshold {
    /// `None` applies to every drive.
    pub drive_letter: Option<String>,
    pub free_percent_alert_below: f64,
}

impl Default for DiskThreshold {
    fn default() -> Self {
        Self {
            drive_letter: None,
            free_percent_alert_below: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupRule {
    pub id: String,
    pub enabled: bool,
    pub target_path: String,
    /// `large_file`, `by_extension` or `junk`.
    pub rule_type: String,
    pub size_mb_min: f64,
    pub extensions: Vec<String>,
    pub cron_expr: String,
    /// `false` means notify only.
    pub auto_clean: bool,
}

impl Default for CleanupRule {
    fn default() -> Self {
        Self {
            id: String::new(),
            enabled: true,
            target_path: String::new(),
            rule_type: "large_file".to_string(),
            size_mb_min: 500.0,
            extensions: vec![".mp4".to_string(), ".avi".to_string()],
            cron_expr: "0 3 * * *".to_string(),
            auto_clean: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub use_windows_toast: bool,
    pub email_enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_use_tls: bool,
    pub notify_email_to: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            use_windows_toast: true,
            email_enabled: false,
            smtp_host: String::new(),
            smtp_port: 465,
            smtp_user: String::new(),
            smtp_password: String::new(),
            smtp_use_tls: true,
            notify_email_to: String::new(),
        }
    }
}
