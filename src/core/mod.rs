pub mod client;
pub mod router;

pub use crate::domain::model::{ConfigPatch, QueryParams};
pub use crate::domain::ports::{DiskCleanerApi, Page};
pub use crate::utils::error::Result;
