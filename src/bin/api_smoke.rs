//! Quick check against a running backend: health plus the first page of
//! large files.

use winclean_client::domain::model::{HealthStatus, LargeFileQuery, LargeFilesPage};
use winclean_client::{ApiClient, ClientConfig, ClientError, DiskCleanerApi, Result};

async fn smoke(api: &ApiClient) -> Result<()> {
    let health: HealthStatus = serde_json::from_value(api.health().await?)?;
    let state = if health.is_ok() { "up" } else { "degraded" };
    println!("Health: {} ({})", health.status, state);

    let params = LargeFileQuery::new().min_size_mb(500.0).limit(10).into_params();
    let page: LargeFilesPage = serde_json::from_value(api.get_large_files(&params).await?)?;
    println!("Items count: {}", page.items.len());
    for item in page.items.iter().take(5) {
        println!(
            "  {}: {:.2} MB",
            item.path,
            item.size_bytes as f64 / 1024.0 / 1024.0
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| winclean_client::config::DEFAULT_BASE_URL.to_string());
    let api = ApiClient::new(ClientConfig::new(base_url).with_timeout(10))?;

    match smoke(&api).await {
        Ok(()) => Ok(()),
        Err(ClientError::Http(e)) if e.is_connect() => {
            println!("Server not running");
            Ok(())
        }
        Err(e) => {
            println!("Error: {}", e);
            Err(anyhow::Error::new(e).context("smoke test failed"))
        }
    }
}
