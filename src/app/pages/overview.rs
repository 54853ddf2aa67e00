use super::format_bytes;
use crate::domain::model::{DriveInfo, LargeFileQuery, LargeFilesPage};
use crate::domain::ports::{DiskCleanerApi, Page};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt::Write;

const TOP_FILES: u32 = 10;

/// Drive usage plus the largest files currently in the index.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverviewPage;

#[async_trait]
impl Page for OverviewPage {
    fn name(&self) -> &'static str {
        "Overview"
    }

    fn title(&self) -> &'static str {
        "Disk overview"
    }

    async fn render(&self, api: &dyn DiskCleanerApi) -> Result<String> {
        let drives: Vec<DriveInfo> = serde_json::from_value(api.get_disk_drives().await?)?;
        let params = LargeFileQuery::new().limit(TOP_FILES).into_params();
        let large: LargeFilesPage = serde_json::from_value(api.get_large_files(&params).await?)?;

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title());
        let _ = writeln!(
            out,
            "{:<6} {:>12} {:>12} {:>8}  USN",
            "Drive", "Total", "Used", "Free%"
        );
        for drive in &drives {
            let usn = match drive.usn_available {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            };
            let _ = writeln!(
                out,
                "{:<6} {:>12} {:>12} {:>7.2}%  {}",
                drive.drive,
                format_bytes(drive.total_bytes),
                format_bytes(drive.used_bytes),
                drive.free_percent,
                usn
            );
        }
        if drives.is_empty() {
            let _ = writeln!(out, "(no drives reported)");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Largest indexed files");
        if large.items.is_empty() {
            let _ = writeln!(out, "(index is empty; run `rebuild-index <DRIVE>`)");
        }
        for item in &large.items {
            let _ = writeln!(out, "{:>12}  {}", format_bytes(item.size_bytes), item.path);
        }

        Ok(out)
    }
}
