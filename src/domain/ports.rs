use crate::domain::model::{ConfigPatch, QueryParams};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// One method per backend endpoint. Every call sends exactly one request
/// and hands back the response body without looking at it.
#[async_trait]
pub trait DiskCleanerApi: Send + Sync {
    /// GET `/api/disk/drives`
    async fn get_disk_drives(&self) -> Result<Value>;

    /// GET `/api/disk/usage/{drive}`
    async fn get_disk_usage(&self, drive: &str) -> Result<Value>;

    /// GET `/api/config`
    async fn get_config(&self) -> Result<Value>;

    /// POST `/api/config`
    async fn update_config(&self, partial: &ConfigPatch) -> Result<Value>;

    /// GET `/api/scan/large-files`
    async fn get_large_files(&self, params: &QueryParams) -> Result<Value>;

    /// POST `/api/scan/rebuild-index`
    async fn rebuild_index(&self, drive: &str) -> Result<Value>;

    /// GET `/api/health`
    async fn health(&self) -> Result<Value>;

    /// GET `/api/pick-folder`; the chosen directory, or `""` when cancelled.
    async fn pick_folder(&self, initial_dir: &str) -> Result<String>;
}

/// A page-level view the route table can mount.
#[async_trait]
pub trait Page: Send + Sync {
    fn name(&self) -> &'static str;

    fn title(&self) -> &'static str;

    async fn render(&self, api: &dyn DiskCleanerApi) -> Result<String>;
}
