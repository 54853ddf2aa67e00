use crate::config::ClientConfig;
use crate::domain::model::{ConfigPatch, QueryParams};
use crate::domain::ports::DiskCleanerApi;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use serde_json::{json, Value};
use std::sync::OnceLock;
use url::Url;

static SHARED: OnceLock<ApiClient> = OnceLock::new();

/// A single backend call, before it is turned into an HTTP request.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    DiskDrives,
    DiskUsage { drive: &'a str },
    GetConfig,
    UpdateConfig { partial: &'a ConfigPatch },
    LargeFiles { params: &'a QueryParams },
    RebuildIndex { drive: &'a str },
    Health,
    PickFolder { initial_dir: &'a str },
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::UpdateConfig { .. } | Endpoint::RebuildIndex { .. } => Method::POST,
            _ => Method::GET,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::DiskDrives => "/api/disk/drives".to_string(),
            Endpoint::DiskUsage { drive } => {
                format!("/api/disk/usage/{}", urlencoding::encode(drive))
            }
            Endpoint::GetConfig | Endpoint::UpdateConfig { .. } => "/api/config".to_string(),
            Endpoint::LargeFiles { .. } => "/api/scan/large-files".to_string(),
            Endpoint::RebuildIndex { .. } => "/api/scan/rebuild-index".to_string(),
            Endpoint::Health => "/api/health".to_string(),
            Endpoint::PickFolder { .. } => "/api/pick-folder".to_string(),
        }
    }

    pub fn query(&self) -> Vec<(String, String)> {
        match self {
            Endpoint::LargeFiles { params } => query_pairs(params),
            Endpoint::PickFolder { initial_dir } => {
                vec![("initial_dir".to_string(), initial_dir.to_string())]
            }
            _ => Vec::new(),
        }
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            Endpoint::UpdateConfig { partial } => Some(Value::Object((*partial).clone())),
            Endpoint::RebuildIndex { drive } => Some(json!({ "drive": drive })),
            _ => None,
        }
    }
}

/// Flattens an opaque mapping into query pairs. `null` entries are dropped
/// and arrays repeat their key once per element.
pub fn query_pairs(params: &QueryParams) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push((key.clone(), query_value(item)));
                }
            }
            other => pairs.push((key.clone(), query_value(other))),
        }
    }
    pairs
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Whole floats go out as integers: `100`, not `100.0`.
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                (f as i64).to_string()
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// `path` from a folder-picker response, or `""` when missing, null or empty.
pub fn picked_path(body: &Value) -> String {
    body.get("path")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// HTTP client for the local disk-cleaner backend.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Process-wide client built from [`ClientConfig::default`] on first use.
    pub fn shared() -> Result<&'static ApiClient> {
        if let Some(client) = SHARED.get() {
            return Ok(client);
        }
        let client = ApiClient::new(ClientConfig::default())?;
        Ok(SHARED.get_or_init(|| client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ClientError::InvalidConfigValue {
            field: "client.base_url".to_string(),
            value: raw,
            reason: e.to_string(),
        })
    }

    /// Builds the request for `endpoint` without sending it.
    ///
    /// The client's default headers (the shared `Content-Type`) are merged
    /// in by reqwest only at execute time, so they are absent here; POST
    /// requests carry `Content-Type` from their JSON body.
    pub fn build_request(&self, endpoint: Endpoint<'_>) -> Result<Request> {
        let mut request = self
            .client
            .request(endpoint.method(), self.url(&endpoint.path())?);

        let query = endpoint.query();
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = endpoint.body() {
            request = request.json(&body);
        }

        Ok(request.build()?)
    }

    async fn send(&self, endpoint: Endpoint<'_>) -> Result<Value> {
        let request = self.build_request(endpoint)?;
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let response = response.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl DiskCleanerApi for ApiClient {
    async fn get_disk_drives(&self) -> Result<Value> {
        self.send(Endpoint::DiskDrives).await
    }

    async fn get_disk_usage(&self, drive: &str) -> Result<Value> {
        self.send(Endpoint::DiskUsage { drive }).await
    }

    async fn get_config(&self) -> Result<Value> {
        self.send(Endpoint::GetConfig).await
    }

    async fn update_config(&self, partial: &ConfigPatch) -> Result<Value> {
        self.send(Endpoint::UpdateConfig { partial }).await
    }

    async fn get_large_files(&self, params: &QueryParams) -> Result<Value> {
        self.send(Endpoint::LargeFiles { params }).await
    }

    async fn rebuild_index(&self, drive: &str) -> Result<Value> {
        self.send(Endpoint::RebuildIndex { drive }).await
    }

    async fn health(&self) -> Result<Value> {
        self.send(Endpoint::Health).await
    }

    async fn pick_folder(&self, initial_dir: &str) -> Result<String> {
        let body = self.send(Endpoint::PickFolder { initial_dir }).await?;
        Ok(picked_path(&body))
    }
}
