use super::yes_no;
use crate::domain::model::AppSettings;
use crate::domain::ports::{DiskCleanerApi, Page};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsPage;

#[async_trait]
impl Page for SettingsPage {
    fn name(&self) -> &'static str {
        "Settings"
    }

    fn title(&self) -> &'static str {
        "Settings"
    }

    async fn render(&self, api: &dyn DiskCleanerApi) -> Result<String> {
        let settings: AppSettings = serde_json::from_value(api.get_config().await?)?;

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title());
        let _ = writeln!(
            out,
            "Start with Windows: {}",
            yes_no(settings.start_with_windows)
        );
        let _ = writeln!(out, "On close: {}", settings.on_close);

        let _ = writeln!(out, "Disk alerts:");
        if settings.disk_thresholds.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for threshold in &settings.disk_thresholds {
            let _ = writeln!(
                out,
                "  {}: free below {}%",
                threshold.drive_letter.as_deref().unwrap_or("all drives"),
                threshold.free_percent_alert_below
            );
        }

        let n = &settings.notification;
        let _ = writeln!(out, "Notifications:");
        let _ = writeln!(out, "  Windows toast: {}", yes_no(n.use_windows_toast));
        if n.email_enabled {
            let _ = writeln!(
                out,
                "  Email: {} via {}:{} (TLS {})",
                n.notify_email_to,
                n.smtp_host,
                n.smtp_port,
                yes_no(n.smtp_use_tls)
            );
        } else {
            let _ = writeln!(out, "  Email: off");
        }

        Ok(out)
    }
}
