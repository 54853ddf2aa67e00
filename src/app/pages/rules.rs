use crate::domain::model::{AppSettings, CleanupRule};
use crate::domain::ports::{DiskCleanerApi, Page};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct RulesPage;

fn describe(rule: &CleanupRule) -> String {
    let criteria = match rule.rule_type.as_str() {
        "large_file" => format!(">= {} MB", rule.size_mb_min),
        "by_extension" => rule.extensions.join(" "),
        "junk" => "temp and cache files".to_string(),
        other => other.to_string(),
    };
    let action = if rule.auto_clean { "clean" } else { "notify" };
    let state = if rule.enabled { "on " } else { "off" };
    format!(
        "[{}] {} {} ({}) at '{}' -> {}",
        state, rule.rule_type, rule.target_path, criteria, rule.cron_expr, action
    )
}

#[async_trait]
impl Page for RulesPage {
    fn name(&self) -> &'static str {
        "Rules"
    }

    fn title(&self) -> &'static str {
        "Cleanup rules"
    }

    async fn render(&self, api: &dyn DiskCleanerApi) -> Result<String> {
        let settings: AppSettings = serde_json::from_value(api.get_config().await?)?;

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title());
        if settings.cleanup_rules.is_empty() {
            let _ = writeln!(out, "(no rules configured)");
        }
        for rule in &settings.cleanup_rules {
            let _ = writeln!(out, "{}", describe(rule));
        }
        Ok(out)
    }
}
