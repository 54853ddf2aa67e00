pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use config::ClientConfig;
pub use self::core::{client::ApiClient, router::RouteTable};
pub use domain::model::{ConfigPatch, LargeFileQuery, QueryParams};
pub use domain::ports::{DiskCleanerApi, Page};
pub use utils::error::{ClientError, Result};
